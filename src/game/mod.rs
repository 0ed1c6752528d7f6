//! Rules and shared state of the lottery draw game.
//!
//! [`Game`] owns everything the tasks share: the two display digits, the set
//! of confirmed numbers, the draw counter and the pseudo-random register.
//! The drum task advances it through [`Game::draw`], the key dispatcher
//! through [`Game::press`]; the display task only ever reads
//! [`Game::digits`].

pub mod bcd;
pub mod lfsr;

use heapless::FnvIndexSet;

use self::lfsr::Lfsr16;

/// Digit code rendered as an unlit position.
pub const DIGIT_BLANK: u8 = 10;
/// Digit code rendered as a dash, shown when a round is over.
pub const DIGIT_DASH: u8 = 11;

/// Confirmed draws per round. Once the counter reaches this the round can
/// only be finished or reset.
pub const DRAW_CAP: u8 = 8;

/// The three player keys, in the priority order a settled sample resolves
/// them when several are held at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Confirm,
    Finalize,
    Reset,
}

/// Control messages for the drum task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrumCommand {
    /// Suspend the draw ticks.
    Stop,
    /// Resume the draw ticks if they are suspended.
    Start,
    /// Reseed the random register and restart the draw ticks from a full
    /// period.
    Restart,
}

/// What a key press asks the caller to do once the game lock is released.
#[derive(Debug, PartialEq, Eq)]
pub struct Outcome {
    pub drum: Option<DrumCommand>,
    pub emit: Option<u8>,
}

pub struct Game {
    digits: [u8; 2],
    visited: FnvIndexSet<u8, 32>,
    draws: u8,
    lfsr: Lfsr16,
    candidate: u8,
}

impl Game {
    pub fn new() -> Self {
        Self {
            digits: [0; 2],
            visited: FnvIndexSet::new(),
            draws: 0,
            lfsr: Lfsr16::new(),
            candidate: 0,
        }
    }

    /// Current display content, `[ones, tens]`.
    pub fn digits(&self) -> [u8; 2] {
        self.digits
    }

    /// The number most recently put on display by a draw tick.
    pub fn candidate(&self) -> u8 {
        self.candidate
    }

    /// Confirmed draws this round, saturating at [`DRAW_CAP`].
    pub fn draws(&self) -> u8 {
        self.draws
    }

    /// One drum tick: steps the register until its low five bits name a
    /// number not yet confirmed, then latches that candidate and its decimal
    /// split into the display buffer.
    ///
    /// The walk always terminates inside the tick. Confirms cap the set at
    /// seven entries, so at least 25 of the 32 possible values stay free, and
    /// the full-period register reaches a state for every five-bit value.
    pub fn draw(&mut self) -> u8 {
        loop {
            let candidate = (self.lfsr.step() & 0x1F) as u8;
            if !self.visited.contains(&candidate) {
                self.candidate = candidate;
                self.digits = bcd::split_digits(candidate);
                return candidate;
            }
        }
    }

    /// Puts the random register back on its seed. Called by the drum task as
    /// part of a [`DrumCommand::Restart`], so the register stays owned by the
    /// task that steps it.
    pub fn reseed(&mut self) {
        self.lfsr = Lfsr16::new();
    }

    /// Applies one settled key press and returns the side effects to carry
    /// out.
    pub fn press(&mut self, key: Key) -> Outcome {
        match key {
            // Freeze the drum on the displayed number. The first seven
            // confirms record and report it; later ones only keep the drum
            // stopped.
            Key::Confirm => {
                if self.draws < DRAW_CAP {
                    self.draws += 1;
                }
                let emit = if self.draws < DRAW_CAP {
                    self.visited.insert(self.candidate).ok();
                    Some(self.candidate)
                } else {
                    None
                };
                Outcome {
                    drum: Some(DrumCommand::Stop),
                    emit,
                }
            }
            // Next draw, or end of round once seven numbers are in.
            Key::Finalize => {
                if self.draws >= DRAW_CAP - 1 {
                    self.digits = [DIGIT_DASH, DIGIT_BLANK];
                    Outcome {
                        drum: None,
                        emit: Some(b'\n'),
                    }
                } else {
                    Outcome {
                        drum: Some(DrumCommand::Start),
                        emit: None,
                    }
                }
            }
            // Back to a fresh round; the drum restarts from its seed.
            Key::Reset => {
                self.visited.clear();
                self.draws = 0;
                Outcome {
                    drum: Some(DrumCommand::Restart),
                    emit: Some(b'\n'),
                }
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_state_shows_zero() {
        let game = Game::new();
        assert_eq!(game.digits(), [0, 0]);
        assert_eq!(game.draws(), 0);
    }

    #[test]
    fn first_draw_latches_zero() {
        // From the seed the register walks 0x8000 down to 0x0040; every one
        // of those states has zero in its low five bits.
        let mut game = Game::new();
        assert_eq!(game.draw(), 0);
        assert_eq!(game.digits(), [0, 0]);
        assert_eq!(game.candidate(), 0);
    }

    #[test]
    fn unconfirmed_draws_may_repeat() {
        let mut game = Game::new();
        for _ in 0..6 {
            assert_eq!(game.draw(), 0);
        }
    }

    #[test]
    fn confirm_freezes_records_and_reports() {
        let mut game = Game::new();
        game.draw();
        let outcome = game.press(Key::Confirm);
        assert_eq!(
            outcome,
            Outcome {
                drum: Some(DrumCommand::Stop),
                emit: Some(0),
            }
        );
        assert_eq!(game.draws(), 1);
        assert!(game.visited.contains(&0));
    }

    #[test]
    fn confirmed_numbers_never_come_up_again() {
        // Hand-walked register: confirming every draw fences off
        // 0, 16, 8, 4, 2, 1, 20 in that order.
        let mut game = Game::new();
        for &expected in &[0, 16, 8, 4, 2, 1, 20] {
            let drawn = game.draw();
            assert_eq!(drawn, expected);
            assert!(!game.visited.contains(&drawn));
            let outcome = game.press(Key::Confirm);
            assert_eq!(outcome.emit, Some(expected));
            assert!(game.visited.contains(&drawn));
        }
        assert_eq!(game.draws(), 7);
        assert_eq!(game.visited.len(), 7);
    }

    #[test]
    fn eighth_confirm_counts_but_records_nothing() {
        let mut game = Game::new();
        for _ in 0..7 {
            game.draw();
            game.press(Key::Confirm);
        }
        let eighth = game.draw();
        assert_eq!(eighth, 26);
        let outcome = game.press(Key::Confirm);
        assert_eq!(outcome.drum, Some(DrumCommand::Stop));
        assert_eq!(outcome.emit, None);
        assert_eq!(game.draws(), 8);
        assert_eq!(game.visited.len(), 7);
        assert!(!game.visited.contains(&eighth));
    }

    #[test]
    fn counter_saturates_at_the_cap() {
        let mut game = Game::new();
        for _ in 0..12 {
            game.draw();
            game.press(Key::Confirm);
        }
        assert_eq!(game.draws(), DRAW_CAP);
    }

    #[test]
    fn double_confirm_reports_the_number_again() {
        // A second settled press with no draw in between counts and reports
        // the same number twice; only the set keeps it unique.
        let mut game = Game::new();
        game.draw();
        assert_eq!(game.press(Key::Confirm).emit, Some(0));
        assert_eq!(game.press(Key::Confirm).emit, Some(0));
        assert_eq!(game.draws(), 2);
        assert_eq!(game.visited.len(), 1);
    }

    #[test]
    fn finalize_resumes_the_drum_mid_round() {
        let mut game = Game::new();
        game.draw();
        game.press(Key::Confirm);
        let outcome = game.press(Key::Finalize);
        assert_eq!(
            outcome,
            Outcome {
                drum: Some(DrumCommand::Start),
                emit: None,
            }
        );
        // The displayed number stays until the next draw tick.
        assert_eq!(game.digits(), [0, 0]);
    }

    #[test]
    fn finalize_ends_the_round_after_seven_confirms() {
        let mut game = Game::new();
        for _ in 0..7 {
            game.draw();
            game.press(Key::Confirm);
        }
        let outcome = game.press(Key::Finalize);
        assert_eq!(
            outcome,
            Outcome {
                drum: None,
                emit: Some(b'\n'),
            }
        );
        assert_eq!(game.digits(), [DIGIT_DASH, DIGIT_BLANK]);
    }

    #[test]
    fn finalize_after_the_end_shows_the_dash_again() {
        let mut game = Game::new();
        for _ in 0..7 {
            game.draw();
            game.press(Key::Confirm);
        }
        game.press(Key::Finalize);
        let outcome = game.press(Key::Finalize);
        assert_eq!(outcome.emit, Some(b'\n'));
        assert_eq!(outcome.drum, None);
        assert_eq!(game.digits(), [DIGIT_DASH, DIGIT_BLANK]);
    }

    #[test]
    fn reset_clears_the_round() {
        let mut game = Game::new();
        for _ in 0..5 {
            game.draw();
            game.press(Key::Confirm);
        }
        let outcome = game.press(Key::Reset);
        assert_eq!(
            outcome,
            Outcome {
                drum: Some(DrumCommand::Restart),
                emit: Some(b'\n'),
            }
        );
        assert_eq!(game.draws(), 0);
        assert!(game.visited.is_empty());
        // Reseeded by the drum task when it handles the restart; afterwards
        // the draw sequence starts over.
        game.reseed();
        assert_eq!(game.draw(), 0);
    }
}
