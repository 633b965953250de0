//! Consumer-side reads and the interrupt-context receive handler.

use super::*;
use crate::os;
use crate::transfer::Payload;

// RX -------------------------------------------------------------------------

/// Foreground receive handle over the queue.
pub struct Rx<'q, const N: usize> {
    queue: &'q RxQueue<N>,
    retry_times: u32,
}

impl<'q, const N: usize> Rx<'q, N> {
    pub(super) fn new(queue: &'q RxQueue<N>, retry_times: u32) -> Self {
        Self { queue, retry_times }
    }

    /// Takes the oldest byte out of the queue.
    pub fn read_byte(&mut self) -> Result<u8, Error> {
        self.queue.dequeue().ok_or(Error::Empty)
    }

    /// Oldest buffered byte, without consuming it.
    pub fn peek_first(&self) -> Result<u8, Error> {
        self.queue.peek_first().ok_or(Error::Empty)
    }

    /// Newest buffered byte, without consuming it.
    pub fn peek_last(&self) -> Result<u8, Error> {
        self.queue.peek_last().ok_or(Error::Empty)
    }

    /// Bytes currently buffered and unread.
    pub fn available(&self) -> usize {
        self.queue.len()
    }

    /// Discards everything buffered so far.
    pub fn flush(&mut self) {
        self.queue.reset();
    }

    /// Drains up to `buf.len()` already-buffered bytes without waiting.
    /// Returns how many were copied.
    pub fn read_available(&mut self, buf: &mut [u8]) -> usize {
        let mut n = 0;
        while n < buf.len() {
            match self.queue.dequeue() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        n
    }

    /// Fills `buf`, spinning until every byte has arrived.
    ///
    /// Spins forever if the producer never fires; use
    /// [`read_bytes_retry`](Self::read_bytes_retry) to bound the wait.
    pub fn read_bytes(&mut self, buf: &mut [u8]) {
        for slot in buf {
            loop {
                if let Some(b) = self.queue.dequeue() {
                    *slot = b;
                    break;
                }
                os::yield_cpu();
            }
        }
    }

    /// Fills `buf`, giving up after `retry_times` consecutive empty polls
    /// for any single byte.
    pub fn read_bytes_retry(&mut self, buf: &mut [u8], retry_times: u32) -> Result<(), Error> {
        'bytes: for slot in buf {
            for _ in 0..=retry_times {
                if let Some(b) = self.queue.dequeue() {
                    *slot = b;
                    continue 'bytes;
                }
                os::yield_cpu();
            }
            return Err(Error::Timeout);
        }
        Ok(())
    }

    /// Rebuilds a value from its native-endian bytes in arrival order.
    ///
    /// Same unbounded spin as [`read_bytes`](Self::read_bytes).
    pub fn read_value<T: Payload>(&mut self) -> T {
        let mut bytes = T::zeroed();
        self.read_bytes(bytes.as_mut());
        T::from_ne_bytes(bytes)
    }

    /// Bounded variant of [`read_value`](Self::read_value).
    pub fn read_value_retry<T: Payload>(&mut self, retry_times: u32) -> Result<T, Error> {
        let mut bytes = T::zeroed();
        self.read_bytes_retry(bytes.as_mut(), retry_times)?;
        Ok(T::from_ne_bytes(bytes))
    }
}

impl<const N: usize> e_io::ErrorType for Rx<'_, N> {
    type Error = Error;
}

impl<const N: usize> e_io::Read for Rx<'_, N> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        for _ in 0..=self.retry_times {
            let n = self.read_available(buf);
            if n > 0 {
                return Ok(n);
            }
            os::yield_cpu();
        }
        Err(Error::Timeout)
    }
}

impl<const N: usize> e_nb::serial::ErrorType for Rx<'_, N> {
    type Error = Error;
}

impl<const N: usize> e_nb::serial::Read<u8> for Rx<'_, N> {
    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        self.queue.dequeue().ok_or(nb::Error::WouldBlock)
    }
}

// RX interrupt ---------------------------------------------------------------

/// Interrupt-context producer.
///
/// Call [`handler`](Self::handler) from the receive interrupt, once per
/// received byte. This is the only place the source hook or the queue's
/// producer side is ever invoked.
pub struct RxHandler<'q, R, const N: usize> {
    queue: &'q RxQueue<N>,
    source: R,
}

impl<'q, R, const N: usize> RxHandler<'q, R, N>
where
    R: ByteSource,
{
    pub(super) fn new(queue: &'q RxQueue<N>, source: R) -> Self {
        Self { queue, source }
    }

    /// Reads one byte from the source hook and enqueues it.
    pub fn handler(&mut self) {
        let byte = self.source.read_byte();
        self.queue.enqueue(byte);
    }
}
