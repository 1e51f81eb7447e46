//! Fixed-width outcome history shift register.

use super::Outcome;

/// Returns a mask covering the low `bits` bits.
pub fn low_mask(bits: u32) -> u32 {
    if bits >= u32::BITS {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}

/// Shifts `outcome` into `history` as the new least-significant bit,
/// keeping only the bits under `mask`.
pub fn shift_in(history: u32, outcome: Outcome, mask: u32) -> u32 {
    ((history << 1) | outcome.bit()) & mask
}

/// A global history register of a fixed width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRegister {
    bits: u32,
    mask: u32,
}

impl HistoryRegister {
    /// Creates an all-zero register `width` bits wide.
    pub fn new(width: u32) -> Self {
        Self {
            bits: 0,
            mask: low_mask(width),
        }
    }

    /// Current history; bit 0 is the most recent outcome.
    pub fn value(&self) -> u32 {
        self.bits
    }

    pub fn width(&self) -> u32 {
        self.mask.count_ones()
    }

    pub fn push(&mut self, outcome: Outcome) {
        self.bits = shift_in(self.bits, outcome, self.mask);
    }
}
