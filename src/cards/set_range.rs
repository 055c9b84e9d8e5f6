use std::fmt;

use crate::cards::card_id::CardId;
use crate::error::{CardIdError, ScheduleError};

/// Card identifier bounds of every released set or cycle, in release order.
const RELEASED_SETS: [(&str, u32, u32); 6] = [
    ("core", 1001, 1113),
    ("genesis", 2001, 2120),
    ("cac", 3001, 3055),
    ("spin", 4001, 4120),
    ("hap", 5001, 5055),
    ("lunar", 6001, 6120),
];

pub const ALL_SETS: &str = "all";

/// Inclusive range of card identifiers walked as one unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetRange {
    pub name: String,
    pub start: CardId,
    pub end: CardId,
}

impl SetRange {
    pub fn new(name: &str, start: u32, end: u32) -> Result<Self, CardIdError> {
        let (start, end) = (CardId::from_number(start)?, CardId::from_number(end)?);
        if start > end {
            return Err(CardIdError::OutOfRange(start.as_number()));
        }
        Ok(SetRange {
            name: name.to_string(),
            start,
            end,
        })
    }

    pub fn overlaps(&self, other: &SetRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn card_count(&self) -> u32 {
        self.end.as_number() - self.start.as_number() + 1
    }
}

impl fmt::Display for SetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}-{})", self.name, self.start, self.end)
    }
}

pub fn released_sets() -> Vec<SetRange> {
    RELEASED_SETS
        .iter()
        .filter_map(|(name, start, end)| SetRange::new(name, *start, *end).ok())
        .collect()
}

/// Picks the ranges matching a set selector, either `all` or one set name.
pub fn select_sets(selector: &str) -> Result<Vec<SetRange>, ScheduleError> {
    let selector = selector.trim().to_lowercase();
    if selector == ALL_SETS {
        return Ok(released_sets());
    }

    let selected: Vec<SetRange> = released_sets()
        .into_iter()
        .filter(|range| range.name == selector)
        .collect();

    if selected.is_empty() {
        return Err(ScheduleError::UnknownSet(selector));
    }
    Ok(selected)
}
