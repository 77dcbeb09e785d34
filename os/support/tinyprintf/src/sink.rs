/// A destination that accepts one byte at a time.
///
/// Hardware implementations may busy-wait until the transmitter can take the
/// byte. There is no timeout and no failure path.
pub trait ByteSink {
    fn put(&mut self, byte: u8);
}

impl<S> ByteSink for &mut S
where
    S: ByteSink + ?Sized,
{
    #[inline]
    fn put(&mut self, byte: u8) {
        (**self).put(byte);
    }
}

/// Adapts a closure into a [`ByteSink`].
pub struct FnSink<F>(pub F);

impl<F> ByteSink for FnSink<F>
where
    F: FnMut(u8),
{
    #[inline]
    fn put(&mut self, byte: u8) {
        (self.0)(byte);
    }
}

/// Sink for routers that never reach the hardware path.
pub(crate) struct Discard;

impl ByteSink for Discard {
    #[inline]
    fn put(&mut self, _byte: u8) {}
}
