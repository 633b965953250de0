#![cfg_attr(not(feature = "std"), no_std)]

//! Fixed-capacity single-producer/single-consumer byte FIFO decoupling an
//! interrupt-driven serial receiver from a polling consumer, plus
//! unbuffered transmit helpers over a caller-supplied byte sink.
//!
//! The receive path is: interrupt fires → [`RxHandler::handler`] reads the
//! [`ByteSource`] hook once → the byte lands in the [`RxQueue`] → the
//! foreground drains it through [`Rx`] in FIFO order. On overflow the
//! queue silently drops its oldest byte, so the interrupt never waits and
//! the consumer always sees the most recent data. The transmit path
//! bypasses the queue entirely: [`Tx`] pushes each byte through the
//! [`ByteSink`] hook synchronously.
//!
//! ```
//! use uart_channel::{loopback::Loopback, Channel, RxQueue};
//!
//! let queue = RxQueue::<64>::new();
//! let line = Loopback::new();
//! let (mut tx, mut rx, mut rx_irq) =
//!     Channel::bind(&queue, line.clone(), line.clone()).split(8);
//!
//! tx.write_line("ok");
//! // one interrupt per byte on the line
//! while line.pending() > 0 {
//!     rx_irq.handler();
//! }
//! assert_eq!(rx.available(), 4);
//! assert_eq!(rx.read_byte(), Ok(b'o'));
//! ```

pub mod queue;
pub mod uart;

mod os;
mod transfer;

#[cfg(any(test, feature = "dump"))]
mod dump;
#[cfg(feature = "std")]
pub mod loopback;

pub use queue::RxQueue;
pub use transfer::Payload;
pub use uart::{ByteSink, ByteSource, Channel, Error, Rx, RxHandler, Tx};

#[cfg(any(test, feature = "dump"))]
pub use dump::QueueDump;

pub use embedded_hal_nb;
pub use embedded_io;
pub use nb;
