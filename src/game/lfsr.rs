//! Pseudo-random source for the draw drum.

/// 16-bit Fibonacci LFSR with taps at bits 0, 2, 3 and 5 feeding bit 15.
///
/// The tap set is maximal: from any nonzero seed the register walks all
/// 65535 nonzero states before repeating, and never lands on the all-zero
/// fixed point. The low five bits of each state serve as the draw candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lfsr16 {
    state: u16,
}

impl Lfsr16 {
    pub const SEED: u16 = 1;

    pub const fn new() -> Self {
        Self { state: Self::SEED }
    }

    /// Advances the register one step and returns the new state.
    pub fn step(&mut self) -> u16 {
        let s = self.state;
        let feedback = (s ^ (s >> 2) ^ (s >> 3) ^ (s >> 5)) & 1;
        self.state = (s >> 1) | (feedback << 15);
        self.state
    }

    pub fn value(&self) -> u16 {
        self.state
    }
}

impl Default for Lfsr16 {
    fn default() -> Self {
        Self::new()
    }
}
