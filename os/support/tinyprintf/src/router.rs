use crate::PrintError;
use crate::sink::{ByteSink, Discard};

/// Where the bytes of the current call go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Straight to the hardware [`ByteSink`]. May block.
    Hardware,
    /// Into a caller-supplied buffer through a [`MemoryCursor`].
    Memory,
    /// Nowhere; bytes are only counted.
    Measure,
}

/// Write position inside a caller-owned destination buffer.
///
/// The last slot of the buffer is reserved for the NUL terminator, so at
/// most `capacity - 1` bytes of output fit.
#[derive(Debug)]
pub struct MemoryCursor<'a> {
    buf: &'a mut [u8],
    offset: usize,
}

impl<'a> MemoryCursor<'a> {
    #[must_use]
    pub const fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Stores `byte` at the cursor and advances it.
    ///
    /// # Errors
    /// [`PrintError::BufferTooSmall`] if only the terminator slot is left.
    #[inline]
    pub fn put(&mut self, byte: u8) -> Result<(), PrintError> {
        if self.offset + 1 >= self.buf.len() {
            return Err(PrintError::BufferTooSmall {
                capacity: self.buf.len(),
            });
        }
        self.buf[self.offset] = byte;
        self.offset += 1;
        Ok(())
    }

    /// Writes the NUL terminator at the cursor and returns the output length.
    ///
    /// # Errors
    /// [`PrintError::BufferTooSmall`] for a zero-length buffer.
    pub fn terminate(self) -> Result<usize, PrintError> {
        match self.buf.get_mut(self.offset) {
            Some(slot) => {
                *slot = 0;
                Ok(self.offset)
            }
            None => Err(PrintError::BufferTooSmall { capacity: 0 }),
        }
    }
}

enum Target<'r, S: ?Sized> {
    Hardware(&'r mut S),
    Memory(MemoryCursor<'r>),
    Measure,
}

/// Routes each emitted byte to the destination picked when the call started.
///
/// The router is created fresh for every entry-point call, which makes the
/// output mode and cursor private to that call.
pub struct Router<'r, S: ?Sized> {
    target: Target<'r, S>,
    emitted: usize,
}

impl<'r, S> Router<'r, S>
where
    S: ByteSink + ?Sized,
{
    #[must_use]
    pub const fn hardware(sink: &'r mut S) -> Self {
        Self {
            target: Target::Hardware(sink),
            emitted: 0,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        match self.target {
            Target::Hardware(_) => OutputMode::Hardware,
            Target::Memory(_) => OutputMode::Memory,
            Target::Measure => OutputMode::Measure,
        }
    }

    /// Number of bytes routed so far.
    #[must_use]
    pub const fn emitted(&self) -> usize {
        self.emitted
    }

    /// Deposits one byte at the current destination.
    ///
    /// # Errors
    /// Only the memory destination fails, with [`PrintError::BufferTooSmall`].
    #[inline]
    pub fn route(&mut self, byte: u8) -> Result<(), PrintError> {
        match &mut self.target {
            Target::Hardware(sink) => sink.put(byte),
            Target::Memory(cursor) => cursor.put(byte)?,
            Target::Measure => {}
        }
        self.emitted += 1;
        Ok(())
    }

    /// Ends the call. A memory destination gets its NUL terminator here.
    ///
    /// Returns the number of bytes emitted, terminator excluded.
    ///
    /// # Errors
    /// [`PrintError::BufferTooSmall`] if the memory destination is empty.
    pub fn finish(self) -> Result<usize, PrintError> {
        match self.target {
            Target::Memory(cursor) => cursor.terminate(),
            Target::Hardware(_) | Target::Measure => Ok(self.emitted),
        }
    }
}

impl<'r> Router<'r, Discard> {
    pub(crate) const fn memory(buf: &'r mut [u8]) -> Self {
        Self {
            target: Target::Memory(MemoryCursor::new(buf)),
            emitted: 0,
        }
    }

    pub(crate) const fn measure() -> Self {
        Self {
            target: Target::Measure,
            emitted: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_reserves_terminator_slot() {
        let mut buf = [0xAAu8; 3];
        let mut cursor = MemoryCursor::new(&mut buf);
        assert_eq!(cursor.put(b'a'), Ok(()));
        assert_eq!(cursor.put(b'b'), Ok(()));
        assert_eq!(
            cursor.put(b'c'),
            Err(PrintError::BufferTooSmall { capacity: 3 })
        );
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.terminate(), Ok(2));
        assert_eq!(buf, *b"ab\0");
    }

    #[test]
    fn empty_buffer_cannot_be_terminated() {
        let mut buf = [0u8; 0];
        let cursor = MemoryCursor::new(&mut buf);
        assert_eq!(cursor.capacity(), 0);
        assert_eq!(
            cursor.terminate(),
            Err(PrintError::BufferTooSmall { capacity: 0 })
        );
    }

    #[test]
    fn hardware_route_reaches_sink() {
        let mut out = Vec::new();
        let mut sink = crate::FnSink(|b: u8| out.push(b));
        let mut router = Router::hardware(&mut sink);
        assert_eq!(router.mode(), OutputMode::Hardware);
        router.route(b'o').unwrap();
        router.route(b'k').unwrap();
        assert_eq!(router.finish(), Ok(2));
        drop(sink);
        assert_eq!(out, b"ok");
    }

    #[test]
    fn measure_only_counts() {
        let mut router = Router::measure();
        assert_eq!(router.mode(), OutputMode::Measure);
        for b in *b"12345" {
            router.route(b).unwrap();
        }
        assert_eq!(router.emitted(), 5);
        assert_eq!(router.finish(), Ok(5));
    }
}
