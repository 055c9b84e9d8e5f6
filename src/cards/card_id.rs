use std::fmt;
use std::str::FromStr;

use crate::error::CardIdError;

const CARD_DIGITS: u32 = 1000;
const MAX_ID: u32 = 99_999;

/// Five digit card identifier as used by NetrunnerDB, e.g. `01001`.
///
/// The first two digits are the set code and the last three the card number
/// within the set. Cached files on disk are named after this encoding, so it
/// must stay exactly 2+3 zero padded digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId {
    set_code: u32,
    number: u32,
}

impl CardId {
    pub fn from_number(value: u32) -> Result<Self, CardIdError> {
        if value > MAX_ID {
            return Err(CardIdError::OutOfRange(value));
        }
        Ok(CardId {
            set_code: value / CARD_DIGITS,
            number: value % CARD_DIGITS,
        })
    }

    pub fn set_code(&self) -> u32 {
        self.set_code
    }

    pub fn as_number(&self) -> u32 {
        self.set_code * CARD_DIGITS + self.number
    }

    /// Three digit, zero padded card number used for file names.
    pub fn file_stem(&self) -> String {
        format!("{:03}", self.number)
    }

    pub fn next(&self) -> Result<Self, CardIdError> {
        Self::from_number(self.as_number() + 1)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:03}", self.set_code, self.number)
    }
}

impl FromStr for CardId {
    type Err = CardIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 5 || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(CardIdError::NotNumeric(s.to_string()));
        }
        let value = s
            .parse::<u32>()
            .map_err(|_| CardIdError::NotNumeric(s.to_string()))?;
        Self::from_number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_with_zero_padding() {
        let id = CardId::from_number(1001).unwrap();
        assert_eq!(id.to_string(), "01001");
        assert_eq!(id.set_code(), 1);
        assert_eq!(id.file_stem(), "001");
    }

    #[test]
    fn test_two_digit_set_codes_are_not_padded_further() {
        let id = CardId::from_number(12045).unwrap();
        assert_eq!(id.to_string(), "12045");
        assert_eq!(id.set_code(), 12);
        assert_eq!(id.file_stem(), "045");
    }

    #[test]
    fn test_parse_matches_encoding() {
        let id: CardId = "04120".parse().unwrap();
        assert_eq!(id.as_number(), 4120);
        assert_eq!(id.to_string(), "04120");
    }

    #[test]
    fn test_parse_rejects_wrong_width_and_letters() {
        assert_eq!(
            "1001".parse::<CardId>(),
            Err(CardIdError::NotNumeric("1001".to_string()))
        );
        assert!("0100a".parse::<CardId>().is_err());
        assert!("010011".parse::<CardId>().is_err());
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            CardId::from_number(100_000),
            Err(CardIdError::OutOfRange(100_000))
        );
        let last = CardId::from_number(99_999).unwrap();
        assert!(last.next().is_err());
    }

    #[test]
    fn test_next_crosses_into_next_set() {
        let id = CardId::from_number(1999).unwrap();
        assert_eq!(id.next().unwrap().to_string(), "02000");
    }
}
