//! In-memory loopback transport for tests and demos.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::uart::{ByteSink, ByteSource};

/// One shared serial line: what the sink end writes, the source end reads.
///
/// Clones share the same line, so a single `Loopback` can serve as both
/// hooks of a [`Channel`](crate::Channel).
#[derive(Clone, Default)]
pub struct Loopback {
    line: Arc<Mutex<VecDeque<u8>>>,
}

impl Loopback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written but not yet consumed by the source end.
    pub fn pending(&self) -> usize {
        self.line.lock().unwrap().len()
    }
}

impl ByteSink for Loopback {
    fn write_byte(&mut self, byte: u8) {
        self.line.lock().unwrap().push_back(byte);
    }
}

impl ByteSource for Loopback {
    /// Panics when the line is empty: per the hook contract, the receive
    /// handler must only fire after a byte has arrived.
    fn read_byte(&mut self) -> u8 {
        self.line
            .lock()
            .unwrap()
            .pop_front()
            .expect("read_byte fired with no byte on the line")
    }
}
