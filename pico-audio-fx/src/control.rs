//! Momentary control input and edge detection.
//!
//! The control is a level, not an event: only its current state is
//! sampled, once per main-loop iteration. Effects that react to presses
//! and releases derive the transitions themselves with [`EdgeDetector`].

/// A source of the momentary control level (`true` = pressed).
pub trait MomentaryControl {
    /// Sample the current level.
    fn is_pressed(&mut self) -> bool;
}

impl<F: FnMut() -> bool> MomentaryControl for F {
    fn is_pressed(&mut self) -> bool {
        self()
    }
}

/// [`MomentaryControl`] over a GPIO input pin.
///
/// A failed pin read counts as released.
#[cfg(feature = "hal")]
pub struct PinControl<P> {
    pin: P,
    active_low: bool,
}

#[cfg(feature = "hal")]
impl<P: embedded_hal::digital::InputPin> PinControl<P> {
    /// Pressed when the pin reads high.
    pub fn active_high(pin: P) -> Self {
        PinControl { pin, active_low: false }
    }

    /// Pressed when the pin reads low (button to ground with pull-up).
    pub fn active_low(pin: P) -> Self {
        PinControl { pin, active_low: true }
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}

#[cfg(feature = "hal")]
impl<P: embedded_hal::digital::InputPin> MomentaryControl for PinControl<P> {
    fn is_pressed(&mut self) -> bool {
        let read = if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        };
        read.unwrap_or(false)
    }
}

/// Transition observed between two consecutive control samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Level unchanged.
    None,
    /// Released → pressed.
    Rising,
    /// Pressed → released.
    Falling,
}

/// Remembers the previous level and reports transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    prev: bool,
}

impl EdgeDetector {
    /// Starts as released, so a first pressed sample is a rising edge.
    pub const fn new() -> Self {
        EdgeDetector { prev: false }
    }

    pub fn update(&mut self, level: bool) -> Edge {
        let edge = match (self.prev, level) {
            (false, true) => Edge::Rising,
            (true, false) => Edge::Falling,
            _ => Edge::None,
        };
        self.prev = level;
        edge
    }

    /// Last sampled level.
    pub fn level(&self) -> bool {
        self.prev
    }
}
