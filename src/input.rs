//! Board-side button input and debouncing.
//!
//! Physical buttons bounce: one press produces a flurry of electrical
//! transitions. The [`Debouncer`] accepts a not-pressed→pressed edge
//! only if the debounce window has elapsed since the last accepted
//! edge of the same button, so one press yields one event.

use std::time::{Duration, Instant};

use crate::protocol::ButtonEvent;

/// Source of raw button levels, polled once per receiver loop
/// iteration. Implementations wrap GPIO pins, a simulator keyboard,
/// or nothing at all.
pub trait ButtonInput {
    /// Current pressed level of a button (true while held)
    fn is_pressed(&mut self, button: ButtonEvent) -> bool;
}

/// Input source with no buttons attached; never reports a press
pub struct NoButtons;

impl ButtonInput for NoButtons {
    fn is_pressed(&mut self, _button: ButtonEvent) -> bool {
        false
    }
}

#[derive(Default, Clone, Copy)]
struct ButtonState {
    pressed: bool,
    last_accepted: Option<Instant>,
}

/// Per-button edge detector with a minimum interval between accepted
/// presses.
pub struct Debouncer {
    window: Duration,
    state: [ButtonState; 2],
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: [ButtonState::default(); 2],
        }
    }

    /// Feed the current level of `button` sampled at `now`.
    ///
    /// Returns true when this sample is an accepted press: a rising
    /// edge at least one debounce window after the previous accepted
    /// press of the same button. The caller sends the event packet;
    /// the timestamp here advances whether or not that send succeeds.
    pub fn update(&mut self, button: ButtonEvent, pressed: bool, now: Instant) -> bool {
        let state = &mut self.state[button.idx()];
        let rising = pressed && !state.pressed;
        state.pressed = pressed;
        if !rising {
            return false;
        }
        match state.last_accepted {
            Some(last) if now.duration_since(last) < self.window => false,
            _ => {
                state.last_accepted = Some(now);
                true
            }
        }
    }
}
