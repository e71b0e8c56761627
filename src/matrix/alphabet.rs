//! The 27-letter Spanish alphabet ring used by the Hill cipher demos:
//! A = 0 through Z = 26, with Ñ at 14.

use crate::error::Error;

/// Ring size of the alphabet, the Hill cipher modulus.
pub const RING_SIZE: u64 = 27;

/// Padding symbol the Hill demos append to fill the last block: X = 24.
pub const PADDING: u64 = 24;

const LETTERS: [char; RING_SIZE as usize] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'Ñ', 'O', 'P', 'Q',
    'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Maps a letter (either case) to its ring value. Fails with
/// [`Error::UnsupportedSymbol`] for anything outside the 27 letters.
pub fn char_to_num(ch: char) -> Result<u64, Error> {
    let upper = if ch == 'ñ' {
        'Ñ'
    } else {
        ch.to_ascii_uppercase()
    };
    LETTERS
        .iter()
        .position(|&l| l == upper)
        .map(|i| i as u64)
        .ok_or(Error::UnsupportedSymbol { symbol: ch })
}

/// Maps a ring value back to its letter; the value is reduced mod 27 first.
pub fn num_to_char(n: u64) -> char {
    LETTERS[(n % RING_SIZE) as usize]
}

/// Converts text to ring values, skipping spaces. Any other character
/// outside the alphabet is an error, not silently dropped.
pub fn text_to_nums(text: &str) -> Result<Vec<u64>, Error> {
    text.chars()
        .filter(|ch| !ch.is_whitespace())
        .map(char_to_num)
        .collect()
}

/// Converts ring values back to text.
pub fn nums_to_text(nums: &[u64]) -> String {
    nums.iter().map(|&n| num_to_char(n)).collect()
}

#[test]
fn test_alphabet_positions() {
    assert_eq!(char_to_num('A').unwrap(), 0);
    assert_eq!(char_to_num('Ñ').unwrap(), 14);
    assert_eq!(char_to_num('ñ').unwrap(), 14);
    assert_eq!(char_to_num('X').unwrap(), PADDING);
    assert_eq!(char_to_num('Z').unwrap(), 26);
    assert_eq!(num_to_char(14), 'Ñ');
    assert_eq!(num_to_char(27 + 1), 'B');
}

#[test]
fn test_text_roundtrip() {
    let nums = text_to_nums("HOLAÑ").unwrap();
    assert_eq!(nums, vec![7, 15, 11, 0, 14]);
    assert_eq!(nums_to_text(&nums), "HOLAÑ");
    // spaces are skipped, case is folded
    assert_eq!(text_to_nums("ho la").unwrap(), text_to_nums("HOLA").unwrap());
}

#[test]
fn test_unsupported_symbol() {
    assert_eq!(
        text_to_nums("HOLA!").unwrap_err(),
        Error::UnsupportedSymbol { symbol: '!' }
    );
}
