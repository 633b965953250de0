//! Single-channel loopback demo: one explicitly owned channel, the
//! "single instance" usage pattern. Run with `cargo run --example loopback`.

use core::fmt::Write;

use uart_channel::{loopback::Loopback, Channel, RxQueue};

fn main() {
    let queue = RxQueue::<128>::new();
    let line = Loopback::new();
    let (mut tx, mut rx, mut rx_irq) =
        Channel::bind(&queue, line.clone(), line.clone()).split(16);

    tx.write_line("hello over loopback");
    write!(tx, "value={}", 42).unwrap();
    tx.write_value(0xCAFEu16);

    // Pretend the receive interrupt fired once per byte on the line.
    while line.pending() > 0 {
        rx_irq.handler();
    }
    println!("buffered: {} bytes", rx.available());

    let mut buf = [0u8; 128];
    let n = rx.read_available(&mut buf[..]);
    let (text, tail) = buf[..n].split_at(n - 2);
    println!("text: {:?}", String::from_utf8_lossy(text));
    println!("tail: {:02X?}", tail);
}
