//! Serial channel over caller-supplied byte hooks.
//!
//! A [`Channel`] binds one [`RxQueue`](crate::queue::RxQueue) to a
//! [`ByteSink`]/[`ByteSource`] pair and splits into three handles:
//! [`Tx`] (foreground transmit), [`Rx`] (foreground receive) and
//! [`RxHandler`] (the interrupt-context producer). Channels are plain
//! caller-owned values; an application with one UART creates exactly one,
//! an application with several creates one per peripheral.

use embedded_hal_nb as e_nb;
use embedded_io as e_io;

use crate::queue::RxQueue;

mod rx;
mod tx;

pub use rx::{Rx, RxHandler};
pub use tx::Tx;

/// Transmit one byte now.
///
/// Assumed synchronous: when the call returns, the byte has been handed
/// to the transport (UART data register, USB endpoint, loopback line...).
pub trait ByteSink {
    fn write_byte(&mut self, byte: u8);
}

/// A byte is available and is returned now.
///
/// Only ever invoked from [`RxHandler::handler`], once per invocation. It
/// is the caller's responsibility to fire the handler only when a byte has
/// actually arrived.
pub trait ByteSource {
    fn read_byte(&mut self) -> u8;
}

impl<T: ByteSink + ?Sized> ByteSink for &mut T {
    #[inline]
    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte);
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    #[inline]
    fn read_byte(&mut self) -> u8 {
        (**self).read_byte()
    }
}

/// Channel error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The receive queue holds no data.
    Empty,
    /// A bounded read ran out of retries before enough data arrived.
    Timeout,
}

impl e_io::Error for Error {
    #[inline]
    fn kind(&self) -> e_io::ErrorKind {
        match self {
            Error::Empty => e_io::ErrorKind::Interrupted,
            Error::Timeout => e_io::ErrorKind::TimedOut,
        }
    }
}

impl e_nb::serial::Error for Error {
    #[inline]
    fn kind(&self) -> e_nb::serial::ErrorKind {
        e_nb::serial::ErrorKind::Other
    }
}

/// One serial channel: a receive queue bound to a transport hook pair.
///
/// The hooks are installed at construction and the queue is wiped, then
/// [`split`](Self::split) hands each execution context its own piece.
pub struct Channel<'q, S, R, const N: usize> {
    queue: &'q RxQueue<N>,
    sink: S,
    source: R,
}

impl<'q, S, R, const N: usize> Channel<'q, S, R, N>
where
    S: ByteSink,
    R: ByteSource,
{
    /// Binds `queue` to the transport hooks, wiping any stale contents.
    pub fn bind(queue: &'q RxQueue<N>, sink: S, source: R) -> Self {
        queue.wipe();
        Self {
            queue,
            sink,
            source,
        }
    }

    /// Splits into the transmit handle, the consumer handle and the
    /// interrupt-context receive handler.
    ///
    /// `read_retry_times` bounds the [`embedded_io::Read`] spin on the
    /// consumer handle; the dedicated blocking reads are unaffected.
    pub fn split(self, read_retry_times: u32) -> (Tx<S>, Rx<'q, N>, RxHandler<'q, R, N>) {
        (
            Tx::new(self.sink),
            Rx::new(self.queue, read_retry_times),
            RxHandler::new(self.queue, self.source),
        )
    }
}
