//! Binary to BCD conversion without division, shift-and-add-3 style.

/// Splits a byte into `[ones, tens]`.
///
/// The input bits are fed in MSB first; before every shift any accumulator
/// nibble at 5 or more is nudged up by 3 so the decimal carries line up with
/// the binary ones. Exact for 0..=99. Wider inputs lose the carry out of the
/// tens nibble, so 100..=255 comes back as `n % 100`.
pub fn split_digits(number: u8) -> [u8; 2] {
    let mut digits = [0u8; 2];
    for bit in (0..8).rev() {
        let mut carry = (number >> bit) & 1;
        for nibble in digits.iter_mut() {
            let mut value = *nibble;
            if value >= 5 {
                value += 3;
            }
            value = (value << 1) | carry;
            carry = (value >> 4) & 1;
            *nibble = value & 0xF;
        }
    }
    digits
}
