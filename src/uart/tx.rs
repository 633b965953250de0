//! Transmit helpers. The transmit path is unbuffered: every byte goes
//! straight through the sink hook, and the caller blocks until it returns.

use super::*;
use crate::transfer::Payload;

/// Foreground transmit handle.
pub struct Tx<S> {
    sink: S,
}

impl<S: ByteSink> Tx<S> {
    pub(super) fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Pushes one byte through the sink hook.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.sink.write_byte(byte);
    }

    /// Sends every byte of `buf`, in order.
    pub fn write_bytes(&mut self, buf: &[u8]) {
        for &b in buf {
            self.sink.write_byte(b);
        }
    }

    /// Sends `s` followed by CR and LF.
    pub fn write_line(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
        self.sink.write_byte(b'\r');
        self.sink.write_byte(b'\n');
    }

    /// Sends the native-endian bytes of `value`.
    pub fn write_value<T: Payload>(&mut self, value: T) {
        self.write_bytes(value.to_ne_bytes().as_ref());
    }
}

impl<S: ByteSink> core::fmt::Write for Tx<S> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

impl<S> e_io::ErrorType for Tx<S> {
    type Error = Error;
}

impl<S: ByteSink> e_io::Write for Tx<S> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        // The sink is synchronous: a returned write_byte has already left.
        Ok(())
    }
}

impl<S> e_nb::serial::ErrorType for Tx<S> {
    type Error = Error;
}

impl<S: ByteSink> e_nb::serial::Write<u8> for Tx<S> {
    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        self.sink.write_byte(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }
}
