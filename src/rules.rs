use std::fmt;

use serde::{Deserialize, Serialize};

use crate::global::*;
use crate::hands::*;

/// Section of the scorecard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Scored by counting a single pip
    Upper,
    /// Scored by dice patterns
    Lower,
}

/// Field on the scorecard, in enumeration order: upper section first, then lower section
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Aces,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
    Chance,
}

use Category::*;

impl Category {
    /// Every category in enumeration order
    pub const ALL: [Category; US_LENGTH + LS_LENGTH] = [
        Aces,
        Twos,
        Threes,
        Fours,
        Fives,
        Sixes,
        ThreeOfAKind,
        FourOfAKind,
        FullHouse,
        SmallStraight,
        LargeStraight,
        Yahtzee,
        Chance,
    ];

    /// Upper section, indexed by pip - 1
    pub const UPPER: [Category; US_LENGTH] = [Aces, Twos, Threes, Fours, Fives, Sixes];

    /// Position in enumeration order
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Upper section field counting `pip`, if there is one
    pub fn upper(pip: Pip) -> Option<Category> {
        Self::UPPER.get((pip as usize).checked_sub(1)?).copied()
    }

    /// Pip counted by an upper section field
    pub fn pip(self) -> Option<Pip> {
        match self.section() {
            Section::Upper => Some(self.index() as Pip + 1),
            Section::Lower => None,
        }
    }

    pub fn section(self) -> Section {
        match self {
            Aces | Twos | Threes | Fours | Fives | Sixes => Section::Upper,
            _ => Section::Lower,
        }
    }

    /// Name of field for user interaction
    pub fn name(self) -> &'static str {
        match self {
            Aces => "Aces",
            Twos => "Twos",
            Threes => "Threes",
            Fours => "Fours",
            Fives => "Fives",
            Sixes => "Sixes",
            ThreeOfAKind => "Three of a Kind",
            FourOfAKind => "Four of a Kind",
            FullHouse => "Full House",
            SmallStraight => "Small Straight",
            LargeStraight => "Large Straight",
            Yahtzee => "Yahtzee",
            Chance => "Chance",
        }
    }

    /// Score `hand` would earn in this field
    pub fn score(self, hand: &Hand) -> Score {
        match self {
            Aces => generic_upper_section(1, hand),
            Twos => generic_upper_section(2, hand),
            Threes => generic_upper_section(3, hand),
            Fours => generic_upper_section(4, hand),
            Fives => generic_upper_section(5, hand),
            Sixes => generic_upper_section(6, hand),
            ThreeOfAKind => generic_identical(3, hand),
            FourOfAKind => generic_identical(4, hand),
            FullHouse => full_house(hand),
            SmallStraight => generic_straight(4, SMALL_STRAIGHT_SCORE, hand),
            LargeStraight => generic_straight(5, LARGE_STRAIGHT_SCORE, hand),
            Yahtzee => yahtzee(hand),
            Chance => total(hand),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
