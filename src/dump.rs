//! Diagnostic dump of the raw receive storage.

use core::fmt;

use crate::queue::RxQueue;

impl<const N: usize> RxQueue<N> {
    /// Diagnostic view of the raw storage, one line per slot.
    pub fn dump(&self) -> QueueDump<'_, N> {
        QueueDump { queue: self }
    }
}

/// Renders the occupancy and every storage slot as `index: 0xVV`.
///
/// The snapshot is taken once, atomically, when formatting starts.
pub struct QueueDump<'q, const N: usize> {
    queue: &'q RxQueue<N>,
}

impl<const N: usize> fmt::Display for QueueDump<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (storage, len) = self.queue.snapshot();
        writeln!(f, "rx buffer ({} of {} bytes):", len, N)?;
        for (i, b) in storage.iter().enumerate() {
            writeln!(f, "{:3}: 0x{:02X}", i, b)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_lists_every_slot() {
        let q = RxQueue::<4>::new();
        q.enqueue(0x41);
        q.enqueue(0x42);
        let text = q.dump().to_string();
        assert!(text.starts_with("rx buffer (2 of 4 bytes):"));
        assert!(text.contains("  0: 0x41"));
        assert!(text.contains("  1: 0x42"));
        assert!(text.contains("  3: 0x00"));
        assert_eq!(text.lines().count(), 5);
    }
}
