//! The three game keys.

use embedded_hal::digital::InputPin;

use crate::game::Key;

/// Key lines idle high and read low while held down. The fields stay public
/// so the interrupt handler can reach the EXTI flags on the concrete pins.
pub struct Keypad<C, F, R> {
    pub confirm: C,
    pub finalize: F,
    pub reset: R,
}

impl<C: InputPin, F: InputPin, R: InputPin> Keypad<C, F, R> {
    pub fn new(confirm: C, finalize: F, reset: R) -> Self {
        Self {
            confirm,
            finalize,
            reset,
        }
    }

    /// Level sample taken when the settle window runs out. At most one key is
    /// reported; with several held, confirm beats finalize beats reset.
    /// `None` means everything was released again before the window closed.
    pub fn sample(&mut self) -> Option<Key> {
        if self.confirm.is_low().unwrap_or(false) {
            Some(Key::Confirm)
        } else if self.finalize.is_low().unwrap_or(false) {
            Some(Key::Finalize)
        } else if self.reset.is_low().unwrap_or(false) {
            Some(Key::Reset)
        } else {
            None
        }
    }
}
