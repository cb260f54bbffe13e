use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// The three suits, in ranking order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Blue,
    Black,
    Green,
}

impl Suit {
    pub const ALL: [Suit; 3] = [Suit::Blue, Suit::Black, Suit::Green];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Black => "black",
            Self::Green => "green",
        }
    }

    pub const fn ordinal(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Suit {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|suit| suit.name() == s)
            .ok_or(GameError::InvalidCardText)
    }
}

/// Card ranks. `One` through `Ten` chain into runs, the three symbol ranks never do, and `Star` only exists on the
/// flower.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "?")]
    Question,
    #[serde(rename = "#")]
    Hash,
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "*")]
    Star,
}

impl Rank {
    /// Every rank dealt in a regular suit, excludes `Star`.
    pub const ALL: [Rank; 13] = [
        Rank::One,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Question,
        Rank::Hash,
        Rank::Percent,
    ];

    pub const fn symbol(self) -> &'static str {
        use Rank::*;
        match self {
            One => "1",
            Two => "2",
            Three => "3",
            Four => "4",
            Five => "5",
            Six => "6",
            Seven => "7",
            Eight => "8",
            Nine => "9",
            Ten => "10",
            Question => "?",
            Hash => "#",
            Percent => "%",
            Star => "*",
        }
    }

    /// Face value for the numeric ranks.
    pub const fn value(self) -> Option<u8> {
        match self {
            Self::Question | Self::Hash | Self::Percent | Self::Star => None,
            numeric => Some(numeric as u8 + 1),
        }
    }

    pub const fn is_numeric(self) -> bool {
        self.value().is_some()
    }

    pub const fn ordinal(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Rank {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .chain([Rank::Star])
            .find(|rank| rank.symbol() == s)
            .ok_or(GameError::InvalidCardText)
    }
}

/// Immutable suit and rank pair. Ordering is by suit, then rank.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    /// The single wild card of the deck.
    pub const FLOWER: Card = Card::new(Suit::Black, Rank::Star);

    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub const fn is_flower(self) -> bool {
        matches!(self.rank, Rank::Star)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.suit, self.rank)
    }
}

impl FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let (suit, rank) = s.split_once(':').ok_or(GameError::InvalidCardText)?;
        Ok(Self::new(suit.parse()?, rank.parse()?))
    }
}
