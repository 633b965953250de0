//! Fixed-capacity receive FIFO shared between the interrupt and the main loop.
//!
//! The producer side ([`enqueue`](RxQueue::enqueue)) runs in interrupt
//! context and only ever appends; the consumer side (everything else) runs
//! in the foreground and only ever removes. When the queue is full a new
//! byte silently displaces the oldest one, so the peripheral never has to
//! wait and the consumer always sees the most recent `N` bytes.
//!
//! Every operation runs inside a critical section, so cursor updates from
//! one context cannot tear the other's. That also makes a foreground
//! [`reset`](RxQueue::reset) safe against an interrupt arriving mid-flush.

use core::cell::RefCell;
use critical_section::Mutex;

/// Cursor state of the ring.
///
/// When occupied, the live span runs from `front` to `end` inclusive,
/// wrapping through `N - 1` back to `0`. Equal cursors mean exactly one
/// byte, never a full queue; fullness is decided by the producer before
/// it inserts.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Cursors {
    Empty,
    Occupied { front: usize, end: usize },
}

struct RawQueue<const N: usize> {
    storage: [u8; N],
    cursors: Cursors,
}

impl<const N: usize> RawQueue<N> {
    const fn advance(i: usize) -> usize {
        if i + 1 == N {
            0
        } else {
            i + 1
        }
    }

    fn enqueue(&mut self, byte: u8) {
        match self.cursors {
            Cursors::Empty => {
                self.storage[0] = byte;
                self.cursors = Cursors::Occupied { front: 0, end: 0 };
            }
            Cursors::Occupied { front, end } => {
                let end = Self::advance(end);
                // Full: drop the oldest byte first. Never reported anywhere.
                let front = if end == front {
                    Self::advance(front)
                } else {
                    front
                };
                self.storage[end] = byte;
                self.cursors = Cursors::Occupied { front, end };
            }
        }
    }

    fn dequeue(&mut self) -> Option<u8> {
        match self.cursors {
            Cursors::Empty => None,
            Cursors::Occupied { front, end } => {
                let byte = self.storage[front];
                self.cursors = if front == end {
                    Cursors::Empty
                } else {
                    Cursors::Occupied {
                        front: Self::advance(front),
                        end,
                    }
                };
                Some(byte)
            }
        }
    }

    fn peek_first(&self) -> Option<u8> {
        match self.cursors {
            Cursors::Empty => None,
            Cursors::Occupied { front, .. } => Some(self.storage[front]),
        }
    }

    fn peek_last(&self) -> Option<u8> {
        match self.cursors {
            Cursors::Empty => None,
            Cursors::Occupied { end, .. } => Some(self.storage[end]),
        }
    }

    fn len(&self) -> usize {
        match self.cursors {
            Cursors::Empty => 0,
            Cursors::Occupied { front, end } => {
                if front <= end {
                    end - front + 1
                } else {
                    N - front + end + 1
                }
            }
        }
    }
}

/// Fixed-capacity byte FIFO for received data.
///
/// `N` is the capacity in bytes and must be at least 1 (checked at compile
/// time). The queue is `Sync` and all methods take `&self`, so a single
/// `static` instance can be shared between an interrupt handler and the
/// main loop:
///
/// ```
/// use uart_channel::RxQueue;
///
/// static RX_QUEUE: RxQueue<128> = RxQueue::new();
///
/// RX_QUEUE.enqueue(0x41);
/// assert_eq!(RX_QUEUE.dequeue(), Some(0x41));
/// ```
pub struct RxQueue<const N: usize> {
    inner: Mutex<RefCell<RawQueue<N>>>,
}

impl<const N: usize> RxQueue<N> {
    const CAPACITY_CHECK: () = assert!(N > 0, "RxQueue capacity must be at least 1");

    /// Creates an empty queue with zeroed storage.
    pub const fn new() -> Self {
        let _ = Self::CAPACITY_CHECK;
        Self {
            inner: Mutex::new(RefCell::new(RawQueue {
                storage: [0; N],
                cursors: Cursors::Empty,
            })),
        }
    }

    /// Appends one byte. Producer side, interrupt context only.
    ///
    /// On a full queue the oldest unread byte is discarded to make room;
    /// the loss is not signalled to either side.
    pub fn enqueue(&self, byte: u8) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).enqueue(byte));
    }

    /// Removes and returns the oldest byte, or `None` when empty.
    pub fn dequeue(&self) -> Option<u8> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).dequeue())
    }

    /// Returns the oldest byte without removing it.
    pub fn peek_first(&self) -> Option<u8> {
        critical_section::with(|cs| self.inner.borrow_ref(cs).peek_first())
    }

    /// Returns the newest byte without removing it.
    pub fn peek_last(&self) -> Option<u8> {
        critical_section::with(|cs| self.inner.borrow_ref(cs).peek_last())
    }

    /// Number of buffered, unread bytes, in `0..=N`.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Discards all buffered data. Consumer side.
    pub fn reset(&self) {
        critical_section::with(|cs| {
            self.inner.borrow_ref_mut(cs).cursors = Cursors::Empty;
        });
    }

    /// Zeroes the storage and resets the cursors. Used at channel binding.
    pub(crate) fn wipe(&self) {
        critical_section::with(|cs| {
            let mut raw = self.inner.borrow_ref_mut(cs);
            raw.storage = [0; N];
            raw.cursors = Cursors::Empty;
        });
    }

    /// Copies out the raw storage and the current occupancy in one go.
    #[cfg(any(test, feature = "dump"))]
    pub(crate) fn snapshot(&self) -> ([u8; N], usize) {
        critical_section::with(|cs| {
            let raw = self.inner.borrow_ref(cs);
            (raw.storage, raw.len())
        })
    }
}

impl<const N: usize> Default for RxQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order_within_capacity() {
        let q = RxQueue::<8>::new();
        for b in 10..18u8 {
            q.enqueue(b);
        }
        assert_eq!(q.len(), 8);
        for b in 10..18u8 {
            assert_eq!(q.dequeue(), Some(b));
        }
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn receive_then_drain_one() {
        let q = RxQueue::<128>::new();
        for b in 0x41..=0x45u8 {
            q.enqueue(b);
        }
        assert_eq!(q.len(), 5);
        assert_eq!(q.dequeue(), Some(0x41));
        assert_eq!(q.len(), 4);
    }

    #[test]
    fn overflow_drops_oldest() {
        let q = RxQueue::<4>::new();
        for b in [0x01, 0x02, 0x03, 0x04, 0x05] {
            q.enqueue(b);
        }
        assert_eq!(q.len(), 4);
        assert_eq!(q.dequeue(), Some(0x02));
        assert_eq!(q.dequeue(), Some(0x03));
        assert_eq!(q.dequeue(), Some(0x04));
        assert_eq!(q.dequeue(), Some(0x05));
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn overflow_by_many_keeps_last_capacity() {
        let q = RxQueue::<4>::new();
        for b in 0..10u8 {
            q.enqueue(b);
        }
        assert_eq!(q.len(), 4);
        for b in 6..10u8 {
            assert_eq!(q.dequeue(), Some(b));
        }
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn occupancy_is_enqueues_minus_dequeues() {
        let q = RxQueue::<16>::new();
        for b in 0..12u8 {
            q.enqueue(b);
        }
        assert_eq!(q.len(), 12);
        for b in 0..5u8 {
            assert_eq!(q.dequeue(), Some(b));
        }
        assert_eq!(q.len(), 7);
    }

    #[test]
    fn wraparound_keeps_order() {
        let q = RxQueue::<5>::new();
        for b in 0..4u8 {
            q.enqueue(b);
        }
        assert_eq!(q.dequeue(), Some(0));
        assert_eq!(q.dequeue(), Some(1));
        // end wraps through the seam back to slot 0
        for b in 4..7u8 {
            q.enqueue(b);
        }
        assert_eq!(q.len(), 5);
        for b in 2..7u8 {
            assert_eq!(q.dequeue(), Some(b));
        }
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn reset_discards_everything() {
        let q = RxQueue::<8>::new();
        for b in 0..5u8 {
            q.enqueue(b);
        }
        q.reset();
        assert_eq!(q.len(), 0);
        assert_eq!(q.dequeue(), None);
        // usable again after the flush
        q.enqueue(0xAA);
        assert_eq!(q.dequeue(), Some(0xAA));
    }

    #[test]
    fn peeks_never_consume() {
        let q = RxQueue::<8>::new();
        assert_eq!(q.peek_first(), None);
        assert_eq!(q.peek_last(), None);
        q.enqueue(1);
        q.enqueue(2);
        q.enqueue(3);
        for _ in 0..3 {
            assert_eq!(q.peek_first(), Some(1));
            assert_eq!(q.peek_last(), Some(3));
            assert_eq!(q.len(), 3);
        }
    }

    #[test]
    fn exactly_full_then_drain() {
        let q = RxQueue::<4>::new();
        for b in 1..=4u8 {
            q.enqueue(b);
        }
        assert_eq!(q.len(), 4);
        assert_eq!(q.peek_last(), Some(4));
        for b in 1..=4u8 {
            assert_eq!(q.dequeue(), Some(b));
        }
    }

    #[test]
    fn single_slot_queue() {
        let q = RxQueue::<1>::new();
        q.enqueue(1);
        assert_eq!(q.len(), 1);
        q.enqueue(2);
        assert_eq!(q.len(), 1);
        assert_eq!(q.dequeue(), Some(2));
        assert_eq!(q.dequeue(), None);
    }
}
