use std::collections::HashMap;

use crate::cards::card_id::CardId;
use crate::error::CatalogError;

lazy_static::lazy_static! {
    /// Numeric set code to the short set name used as the cache directory.
    /// A new release has to be added here before its cards can be cached.
    static ref SET_NAMES: HashMap<u32, &'static str> = HashMap::from([
        (1, "core"),
        (2, "wla"),
        (3, "ta"),
        (4, "ca"),
        (5, "asis"),
        (6, "hs"),
        (7, "fp"),
        (8, "cac"),
        (9, "om"),
        (10, "st"),
        (11, "mt"),
        (12, "tc"),
        (13, "fal"),
        (14, "dt"),
        (15, "hap"),
        (16, "up"),
        (17, "tsb"),
        (18, "fc"),
        (19, "uao"),
        (20, "atr"),
    ]);
}

pub fn lookup_set_name(set_code: u32) -> Result<&'static str, CatalogError> {
    SET_NAMES
        .get(&set_code)
        .copied()
        .ok_or(CatalogError::UnknownSetCode(set_code))
}

pub fn set_name_for(card_id: &CardId) -> Result<&'static str, CatalogError> {
    lookup_set_name(card_id.set_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_set() {
        assert_eq!(lookup_set_name(1), Ok("core"));
        let id: CardId = "01001".parse().unwrap();
        assert_eq!(set_name_for(&id), Ok("core"));
    }

    #[test]
    fn test_every_known_code_resolves() {
        for code in 1..=20 {
            assert!(lookup_set_name(code).is_ok(), "set code {} missing", code);
        }
        assert_eq!(lookup_set_name(20), Ok("atr"));
    }

    #[test]
    fn test_unknown_set_code() {
        assert_eq!(lookup_set_name(99), Err(CatalogError::UnknownSetCode(99)));
        assert_eq!(lookup_set_name(0), Err(CatalogError::UnknownSetCode(0)));
        let id: CardId = "99001".parse().unwrap();
        assert_eq!(set_name_for(&id), Err(CatalogError::UnknownSetCode(99)));
    }
}
