/// Splits an instruction word into its four nibbles, most significant first.
pub fn nibble_split(word: u16) -> (u8, u8, u8, u8) {
    (
        ((word & 0xF000) >> 12) as u8,
        ((word & 0x0F00) >> 8) as u8,
        ((word & 0x00F0) >> 4) as u8,
        (word & 0x000F) as u8,
    )
}

pub fn join_bytes(high: u8, low: u8) -> u16 {
    ((high as u16) << 8) | (low as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_word_into_nibbles() {
        assert_eq!(nibble_split(0xD5A3), (0xD, 0x5, 0xA, 0x3));
        assert_eq!(nibble_split(0x00E0), (0x0, 0x0, 0xE, 0x0));
    }

    #[test]
    fn joins_high_and_low_byte() {
        assert_eq!(join_bytes(0x12, 0x34), 0x1234);
        assert_eq!(join_bytes(0x00, 0xEE), 0x00EE);
    }
}
