use core::{
    cell::UnsafeCell,
    ops::{Deref, DerefMut},
    sync::atomic::{AtomicBool, Ordering},
};

use log::debug;

use crate::sink::ByteSink;
use crate::{Arg, PrintError, Printer};

/// A [`Printer`] that can live in a `static` and be used from anywhere.
///
/// Every call takes the printer exclusively for its duration. A call that
/// arrives while another one is in progress, such as from an interrupt
/// handler or a second core, fails with [`PrintError::Busy`] instead of
/// waiting. Spinning there would never finish on a single core.
///
/// ```rust
/// use tinyprintf::{FnSink, SharedPrinter};
///
/// static CONSOLE: SharedPrinter<FnSink<fn(u8)>> = SharedPrinter::new();
///
/// CONSOLE.install(FnSink(|_| {})).unwrap();
/// assert_eq!(tinyprintf::printf!(CONSOLE, "%u", 12u16), Ok(2));
/// ```
pub struct SharedPrinter<S> {
    /// call state
    /// * `false`: idle
    /// * `true`: a call holds the printer
    busy: AtomicBool,
    printer: UnsafeCell<Option<Printer<S>>>,
}

// Safety: the busy flag grants exclusive access; only S: Send may cross contexts.
unsafe impl<S: Send> Sync for SharedPrinter<S> {}

impl<S> Default for SharedPrinter<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SharedPrinter<S> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
            printer: UnsafeCell::new(None),
        }
    }

    /// Not logged on failure: a logger writing through this printer would
    /// land here again.
    #[inline]
    fn try_lock(&self) -> Result<SharedGuard<'_, S>, PrintError> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map(|_| SharedGuard { shared: self })
            .map_err(|_| PrintError::Busy)
    }

    /// Installs `sink` as the output, returning the previously installed one.
    ///
    /// # Errors
    /// [`PrintError::Busy`] if called from inside another call.
    pub fn install(&self, sink: S) -> Result<Option<S>, PrintError> {
        let previous = self
            .try_lock()?
            .replace(Printer::new(sink))
            .map(Printer::into_inner);
        debug!("shared printer sink installed");
        Ok(previous)
    }

    /// Removes and returns the installed sink.
    ///
    /// # Errors
    /// [`PrintError::Busy`] if called from inside another call.
    pub fn uninstall(&self) -> Result<Option<S>, PrintError> {
        Ok(self.try_lock()?.take().map(Printer::into_inner))
    }

    /// Runs `f` with exclusive access to the installed printer.
    ///
    /// # Errors
    /// [`PrintError::Busy`] if the printer is already in use,
    /// [`PrintError::NoSink`] if nothing is installed.
    pub fn with<R>(&self, f: impl FnOnce(&mut Printer<S>) -> R) -> Result<R, PrintError> {
        let mut guard = self.try_lock()?;
        let printer = guard.as_mut().ok_or(PrintError::NoSink)?;
        Ok(f(printer))
    }
}

impl<S> SharedPrinter<S>
where
    S: ByteSink,
{
    /// [`Printer::printf`] on the installed sink.
    ///
    /// # Errors
    /// [`PrintError::Busy`], [`PrintError::NoSink`], or the argument errors of
    /// [`Printer::printf`].
    pub fn printf(&self, format: &[u8], args: &[Arg<'_>]) -> Result<usize, PrintError> {
        self.with(|printer| printer.printf(format, args))?
    }
}

struct SharedGuard<'a, S> {
    shared: &'a SharedPrinter<S>,
}

impl<S> Deref for SharedGuard<'_, S> {
    type Target = Option<Printer<S>>;
    fn deref(&self) -> &Self::Target {
        unsafe { &*self.shared.printer.get() }
    }
}

impl<S> DerefMut for SharedGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { &mut *self.shared.printer.get() }
    }
}

impl<S> Drop for SharedGuard<'_, S> {
    fn drop(&mut self) {
        // Release publishes the printer state to the next caller.
        self.shared.busy.store(false, Ordering::Release);
    }
}
