//! Integration tests exercising the full audio path in software.
//!
//! The USB host is simulated by calling the transport hooks directly:
//!
//! ```text
//! host OUT bytes → UsbAudioPort::on_rx_done → inbound ring
//!     → Pipeline::poll (effect) → outbound ring
//!     → UsbAudioPort::on_tx_request → host IN bytes
//! ```

#[cfg(test)]
mod tests {
    extern crate std;

    use crate::constants::{FRAME_BYTES, FRAME_SAMPLES, STUTTER_FRAMES};
    use crate::effect::{AnyEffect, EffectKind};
    use crate::effects::{Stutter, StutterState, TapeStop};
    use crate::frame::Frame;
    use crate::io::{FrameRing, UsbAudioPort};
    use crate::pipeline::{Pipeline, Step};

    /// Host-side packet `n` of a ramp that never repeats within a test.
    fn host_packet(n: usize) -> [u8; FRAME_BYTES] {
        let frame = Frame::from_fn(|i, ch| {
            let v = ((n * FRAME_SAMPLES + i) as i32 * 3) << 8;
            if ch == 0 { v } else { -v }
        });
        let mut bytes = [0u8; FRAME_BYTES];
        frame.write_le_bytes(&mut bytes).unwrap();
        bytes
    }

    /// One isochronous interval: host sends a packet, loop spins once,
    /// host collects a packet.
    fn interval<E: crate::effect::Effect>(
        port: &UsbAudioPort,
        pipeline: &mut Pipeline<E>,
        n: usize,
        pressed: bool,
    ) -> [u8; FRAME_BYTES] {
        assert!(port.on_rx_done(&host_packet(n)));
        pipeline.poll(pressed);
        let mut out = [0u8; FRAME_BYTES];
        port.on_tx_request(&mut out);
        out
    }

    // ---------------------------------------------------------------
    // Loopback through pass-through effects is byte-exact
    // ---------------------------------------------------------------
    #[test]
    fn loopback_is_byte_exact_when_idle() {
        for kind in [EffectKind::Stutter, EffectKind::TapeStop] {
            let rx = FrameRing::new();
            let tx = FrameRing::new();
            let port = UsbAudioPort::new(&rx, &tx);
            let mut pipeline = Pipeline::new(AnyEffect::new(kind), &rx, &tx);

            for n in 0..100 {
                let out = interval(&port, &mut pipeline, n, false);
                assert_eq!(out, host_packet(n), "{kind} frame {n}");
            }
            assert_eq!(port.dropped_rx(), 0);
            assert_eq!(port.silence_tx(), 0);
        }
    }

    // ---------------------------------------------------------------
    // Silence in → silence out for every engine
    // ---------------------------------------------------------------
    #[test]
    fn silence_stays_silent_for_every_effect() {
        for kind in EffectKind::ALL {
            let rx = FrameRing::new();
            let tx = FrameRing::new();
            let port = UsbAudioPort::new(&rx, &tx);
            let mut pipeline = Pipeline::new(AnyEffect::new(kind), &rx, &tx);

            for _ in 0..200 {
                assert!(port.on_rx_done(&[0u8; FRAME_BYTES]));
                assert_eq!(pipeline.poll(false), Step::Processed);
                let mut out = [0xFFu8; FRAME_BYTES];
                port.on_tx_request(&mut out);
                assert!(out.iter().all(|&b| b == 0), "{kind} produced non-silence");
            }
        }
    }

    // ---------------------------------------------------------------
    // Rate skew: host faster than the loop drops, slower gets silence
    // ---------------------------------------------------------------
    #[test]
    fn stalled_loop_drops_newest_and_host_hears_silence() {
        let rx = FrameRing::new();
        let tx = FrameRing::new();
        let port = UsbAudioPort::new(&rx, &tx);
        let mut pipeline = Pipeline::new(TapeStop::new(), &rx, &tx);

        // Loop stalls for 20 intervals
        for n in 0..20 {
            port.on_rx_done(&host_packet(n));
            let mut out = [0xAAu8; FRAME_BYTES];
            port.on_tx_request(&mut out);
            assert!(out.iter().all(|&b| b == 0));
        }
        assert_eq!(port.dropped_rx(), 20 - rx.capacity() as u32);
        assert_eq!(port.silence_tx(), 20);

        // Loop catches up; the oldest queued frames come out first
        let mut drained = 0;
        while pipeline.poll(false) == Step::Processed {
            drained += 1;
        }
        assert_eq!(drained, rx.capacity());
        let mut out = [0u8; FRAME_BYTES];
        port.on_tx_request(&mut out);
        assert_eq!(out, host_packet(0));
    }

    #[test]
    fn slow_host_backpressures_the_loop() {
        let rx = FrameRing::new();
        let tx = FrameRing::new();
        let port = UsbAudioPort::new(&rx, &tx);
        let mut pipeline = Pipeline::new(Stutter::new(), &rx, &tx);

        for n in 0..rx.capacity() {
            port.on_rx_done(&host_packet(n));
            pipeline.poll(false);
        }
        assert!(tx.is_full());

        port.on_rx_done(&host_packet(99));
        assert_eq!(pipeline.poll(false), Step::Backpressured);
        assert_eq!(rx.len(), 1);
        assert_eq!(port.dropped_rx(), 0);
    }

    // ---------------------------------------------------------------
    // Stutter driven by the control through the whole path
    // ---------------------------------------------------------------
    #[test]
    fn stutter_loops_the_captured_packets() {
        let rx = FrameRing::new();
        let tx = FrameRing::new();
        let port = UsbAudioPort::new(&rx, &tx);
        let mut fx = Stutter::new();
        let mut pipeline = Pipeline::new(&mut fx, &rx, &tx);

        for n in 0..STUTTER_FRAMES {
            assert_eq!(interval(&port, &mut pipeline, n, true), host_packet(n));
        }
        assert_eq!(pipeline.effect().state(), StutterState::Looping);

        for round in 0..2 {
            for n in 0..STUTTER_FRAMES {
                let out = interval(&port, &mut pipeline, 1000 + round * 100 + n, true);
                assert_eq!(out, host_packet(n), "round {round} frame {n}");
            }
        }

        // Release: live audio again
        assert_eq!(interval(&port, &mut pipeline, 5000, false), host_packet(5000));
        drop(pipeline);
        assert_eq!(fx.state(), StutterState::Idle);
    }

    // ---------------------------------------------------------------
    // ISR and main loop on separate threads
    // ---------------------------------------------------------------
    #[test]
    fn threaded_transport_delivers_in_order() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::vec::Vec;

        static RX: FrameRing = FrameRing::new();
        static TX: FrameRing = FrameRing::new();
        static DONE: AtomicBool = AtomicBool::new(false);
        const PACKETS: usize = 300;

        let port = UsbAudioPort::new(&RX, &TX);

        let main_loop = std::thread::spawn(|| {
            let mut pipeline = Pipeline::new(TapeStop::new(), &RX, &TX);
            while !DONE.load(Ordering::Acquire) || !RX.is_empty() {
                if pipeline.poll(false) != Step::Processed {
                    std::thread::yield_now();
                }
            }
            pipeline.processed()
        });

        let mut received = Vec::new();
        let mut sent = 0;
        while received.len() < PACKETS {
            if sent < PACKETS && !RX.is_full() {
                port.on_rx_done(&host_packet(sent));
                sent += 1;
            }
            if !TX.is_empty() {
                let mut out = [0u8; FRAME_BYTES];
                port.on_tx_request(&mut out);
                received.push(out);
            } else {
                std::thread::yield_now();
            }
        }
        DONE.store(true, Ordering::Release);

        assert_eq!(main_loop.join().unwrap() as usize, PACKETS);
        assert_eq!(port.dropped_rx(), 0);
        for (n, out) in received.iter().enumerate() {
            assert_eq!(*out, host_packet(n), "packet {n}");
        }
    }
}
