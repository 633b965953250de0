cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        /// Give the CPU away between polls of the receive queue.
        #[inline]
        pub fn yield_cpu() {
            std::thread::yield_now();
        }
    } else {
        /// Give the CPU away between polls of the receive queue.
        #[inline]
        pub fn yield_cpu() {
            core::hint::spin_loop();
        }
    }
}
