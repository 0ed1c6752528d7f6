//! Two-position multiplexed 7-segment display on plain GPIO.

use embedded_hal::digital::OutputPin;

/// Segment encodings indexed by digit code, bit 0 = segment a through
/// bit 6 = segment g. Codes 10 and 11 are the blank and dash sentinels;
/// anything past the table renders blank.
const PATTERNS: [u8; 12] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F, // 0..9
    0x00, // blank
    0x40, // dash
];

/// Seven shared segment lines plus one active-low select line per position.
/// Only one position is ever driven at a time; persistence of vision does the
/// rest.
pub struct SevenSeg<P> {
    segments: [P; 7],
    selects: [P; 2],
    lit: usize,
}

impl<P: OutputPin> SevenSeg<P> {
    /// Takes ownership of the lines and releases both selects, so the display
    /// stays dark until the first refresh step.
    pub fn new(segments: [P; 7], selects: [P; 2]) -> Self {
        let mut display = Self {
            segments,
            selects,
            lit: 0,
        };
        for select in display.selects.iter_mut() {
            select.set_high().ok();
        }
        display
    }

    /// One refresh step: releases the position lit by the previous step,
    /// drives the other position's pattern onto the shared segment lines,
    /// then sinks that position's select. Both selects stay released while
    /// the segment lines change.
    ///
    /// Returns the index of the position now lit.
    pub fn step(&mut self, digits: [u8; 2]) -> usize {
        let next = self.lit ^ 1;
        self.selects[self.lit].set_high().ok();
        self.drive(digits[next]);
        self.selects[next].set_low().ok();
        self.lit = next;
        next
    }

    fn drive(&mut self, code: u8) {
        let pattern = PATTERNS.get(code as usize).copied().unwrap_or(0);
        for (bit, segment) in self.segments.iter_mut().enumerate() {
            if pattern & (1 << bit) != 0 {
                segment.set_high().ok();
            } else {
                segment.set_low().ok();
            }
        }
    }
}
