//! Lock-free single-producer single-consumer frame ring.
//!
//! Bridges the USB transfer interrupt and the cooperative main loop. Each
//! ring has exactly one producer and one consumer, which may run in
//! different contexts (ISR vs. thread mode, or two host threads in tests).
//!
//! # Safety Contract
//!
//! - Only ONE context may call the `try_push*` methods (the producer).
//! - Only ONE context may call the `try_pop*` methods (the consumer).
//!
//! The producer finishes writing a slot before publishing `write` with
//! `Release`; the consumer finishes reading a slot before releasing it by
//! advancing `read` with `Release`. Each side loads the other's index with
//! `Acquire`.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::constants::RINGBUF_FRAMES;
use crate::frame::Frame;

/// Fixed-capacity SPSC queue of [`Frame`]s.
///
/// The ring is empty when `read == write` and full when
/// `(write + 1) % N == read`, so usable capacity is `N - 1`.
pub struct FrameRing<const N: usize = RINGBUF_FRAMES> {
    slots: [UnsafeCell<Frame>; N],
    /// Next slot the producer fills (producer-owned).
    write: AtomicUsize,
    /// Next slot the consumer drains (consumer-owned).
    read: AtomicUsize,
}

// SAFETY: Frame is plain data. The SPSC contract guarantees a slot is only
// touched by the producer while it lies outside [read, write) and only by the
// consumer while inside it, and the index hand-off is Release/Acquire.
unsafe impl<const N: usize> Sync for FrameRing<N> {}
unsafe impl<const N: usize> Send for FrameRing<N> {}

impl<const N: usize> FrameRing<N> {
    /// Create an empty ring with every slot silent.
    ///
    /// # Panics
    ///
    /// Compile-time assertion: `N` must be at least 2.
    pub const fn new() -> Self {
        assert!(N >= 2, "frame ring needs at least 2 slots (1 usable)");

        #[allow(clippy::declare_interior_mut_const)]
        const SILENT_SLOT: UnsafeCell<Frame> = UnsafeCell::new(Frame::SILENCE);
        FrameRing {
            slots: [SILENT_SLOT; N],
            write: AtomicUsize::new(0),
            read: AtomicUsize::new(0),
        }
    }

    /// Copy `frame` into the ring (producer side).
    ///
    /// Returns `false`, leaving the ring unchanged, if it is full.
    pub fn try_push(&self, frame: &Frame) -> bool {
        self.try_push_with(|slot| {
            *slot = *frame;
            true
        })
    }

    /// Fill the next free slot in place (producer side).
    ///
    /// `fill` receives the slot and returns whether to publish it. Returning
    /// `false` discards whatever was written, as does a full ring (in which
    /// case `fill` is never called). Returns whether a frame was published.
    pub fn try_push_with(&self, fill: impl FnOnce(&mut Frame) -> bool) -> bool {
        let write = self.write.load(Ordering::Relaxed);
        let next = (write + 1) % N;

        if next == self.read.load(Ordering::Acquire) {
            return false;
        }

        // SAFETY: sole producer; `next != read` means the consumer is not
        // looking at this slot and will not until `write` is advanced.
        let slot = unsafe { &mut *self.slots[write].get() };
        if !fill(slot) {
            return false;
        }

        self.write.store(next, Ordering::Release);
        true
    }

    /// Take the oldest frame out of the ring (consumer side).
    pub fn try_pop(&self) -> Option<Frame> {
        self.try_pop_with(|slot| *slot)
    }

    /// Read the oldest frame in place, then release its slot (consumer side).
    ///
    /// Returns `None` without calling `read` if the ring is empty.
    pub fn try_pop_with<R>(&self, read: impl FnOnce(&Frame) -> R) -> Option<R> {
        let tail = self.read.load(Ordering::Relaxed);

        if tail == self.write.load(Ordering::Acquire) {
            return None;
        }

        // SAFETY: sole consumer; `tail != write` means the producer published
        // this slot and will not reuse it until `read` is advanced past it.
        let out = read(unsafe { &*self.slots[tail].get() });

        self.read.store((tail + 1) % N, Ordering::Release);
        Some(out)
    }

    pub fn is_empty(&self) -> bool {
        self.read.load(Ordering::Acquire) == self.write.load(Ordering::Acquire)
    }

    pub fn is_full(&self) -> bool {
        let write = self.write.load(Ordering::Acquire);
        let read = self.read.load(Ordering::Acquire);
        (write + 1) % N == read
    }

    /// Number of frames currently queued.
    pub fn len(&self) -> usize {
        let write = self.write.load(Ordering::Acquire);
        let read = self.read.load(Ordering::Acquire);
        (write + N - read) % N
    }

    /// Maximum number of frames the ring holds at once.
    pub const fn capacity(&self) -> usize {
        N - 1
    }
}

impl<const N: usize> Default for FrameRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::constants::FRAME_SAMPLES;

    fn tagged(tag: i32) -> Frame {
        Frame::from_fn(|i, ch| (tag << 8) + (i * 2 + ch) as i32)
    }

    #[test]
    fn push_and_pop_fifo() {
        let ring: FrameRing<4> = FrameRing::new(); // capacity 3
        assert!(ring.is_empty());
        assert_eq!(ring.capacity(), 3);

        assert!(ring.try_push(&tagged(1)));
        assert!(ring.try_push(&tagged(2)));
        assert!(ring.try_push(&tagged(3)));
        assert_eq!(ring.len(), 3);
        assert!(ring.is_full());

        // Full: push is refused and nothing changes
        assert!(!ring.try_push(&tagged(4)));
        assert_eq!(ring.len(), 3);

        assert_eq!(ring.try_pop(), Some(tagged(1)));
        assert_eq!(ring.try_pop(), Some(tagged(2)));
        assert_eq!(ring.try_pop(), Some(tagged(3)));
        assert_eq!(ring.try_pop(), None);
        assert!(ring.is_empty());
    }

    #[test]
    fn default_capacity_is_fifteen_frames() {
        let ring: FrameRing = FrameRing::new();
        for tag in 0..15 {
            assert!(ring.try_push(&tagged(tag)));
        }
        assert!(ring.is_full());
        assert!(!ring.try_push(&tagged(99)));
    }

    #[test]
    fn wraparound_keeps_order() {
        let ring: FrameRing<3> = FrameRing::new();
        for round in 0..10 {
            assert!(ring.try_push(&tagged(round * 2)));
            assert!(ring.try_push(&tagged(round * 2 + 1)));
            assert!(ring.is_full());
            assert_eq!(ring.try_pop(), Some(tagged(round * 2)));
            assert_eq!(ring.try_pop(), Some(tagged(round * 2 + 1)));
            assert!(ring.is_empty());
        }
    }

    #[test]
    fn aborted_fill_publishes_nothing() {
        let ring: FrameRing<4> = FrameRing::new();
        let published = ring.try_push_with(|slot| {
            slot.samples[0] = 123;
            false
        });
        assert!(!published);
        assert!(ring.is_empty());
        assert_eq!(ring.try_pop(), None);
    }

    #[test]
    fn pop_with_reads_in_place() {
        let ring: FrameRing<4> = FrameRing::new();
        ring.try_push(&tagged(5));
        let last = ring.try_pop_with(|f| f.sample(FRAME_SAMPLES - 1, 1));
        assert_eq!(last, Some((5 << 8) + 95));
        assert!(ring.try_pop_with(|f| f.samples[0]).is_none());
    }

    #[test]
    fn interleaved_ops_match_model_queue() {
        // Pseudo-random push/pop schedule checked against a VecDeque model
        let ring: FrameRing<5> = FrameRing::new();
        let mut model = std::collections::VecDeque::new();
        let mut seed: u32 = 0x1234_5678;
        let mut next_tag = 0;

        for _ in 0..2000 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;

            if seed % 3 != 0 {
                let was_full = ring.is_full();
                let pushed = ring.try_push(&tagged(next_tag));
                assert_eq!(pushed, !was_full);
                if pushed {
                    model.push_back(next_tag);
                }
                next_tag += 1;
            } else {
                let was_empty = ring.is_empty();
                let popped = ring.try_pop();
                assert_eq!(popped.is_none(), was_empty);
                assert_eq!(popped, model.pop_front().map(tagged));
            }
            assert_eq!(ring.len(), model.len());
        }
    }

    #[test]
    fn cross_thread_transfer_is_fifo() {
        use std::sync::Arc;

        let ring: Arc<FrameRing<8>> = Arc::new(FrameRing::new());
        let producer = {
            let ring = Arc::clone(&ring);
            std::thread::spawn(move || {
                let mut tag = 0;
                while tag < 500 {
                    if ring.try_push(&tagged(tag)) {
                        tag += 1;
                    } else {
                        std::thread::yield_now();
                    }
                }
            })
        };

        let mut expected = 0;
        while expected < 500 {
            match ring.try_pop() {
                Some(frame) => {
                    assert_eq!(frame, tagged(expected));
                    expected += 1;
                }
                None => std::thread::yield_now(),
            }
        }
        producer.join().unwrap();
        assert!(ring.is_empty());
    }
}
