use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::*;

/// Fixed purpose of a board position, assigned once when the game is dealt.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellRole {
    /// Free cell, holds any single card.
    Exit,
    /// Unusable.
    Null,
    /// Only accepts the flower.
    Flower,
    /// Builds same-suit ascending runs.
    Run,
    /// Play area dealt at the start.
    Board,
}

/// Roles of the top-left eight cells, every other cell is [`CellRole::Board`].
pub const HEADER_ROLES: [CellRole; 8] = [
    CellRole::Exit,
    CellRole::Exit,
    CellRole::Exit,
    CellRole::Null,
    CellRole::Flower,
    CellRole::Run,
    CellRole::Run,
    CellRole::Run,
];

/// Cards held by a cell. Stacks are ordered bottom to top, the last card is the head.
///
/// Saved as `"empty"`, a bare card object, or an array of cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SavedContent", into = "SavedContent")]
pub enum CellContent {
    Empty,
    Single(Card),
    Stack(SmallVec<[Card; 4]>),
}

impl CellContent {
    /// Topmost card, the only one that can be moved or built upon.
    pub fn head(&self) -> Option<Card> {
        match self {
            Self::Empty => None,
            Self::Single(card) => Some(*card),
            Self::Stack(cards) => cards.last().copied(),
        }
    }

    /// The card when this cell holds exactly one plain card.
    pub const fn single(&self) -> Option<Card> {
        match self {
            Self::Single(card) => Some(*card),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head().is_none()
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(_) => 1,
            Self::Stack(cards) => cards.len(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        let cards: &[Card] = match self {
            Self::Empty => &[],
            Self::Single(card) => core::slice::from_ref(card),
            Self::Stack(cards) => cards,
        };
        cards.iter().copied()
    }

    pub(crate) fn push(&mut self, card: Card) {
        let next = match core::mem::replace(self, Self::Empty) {
            Self::Empty => Self::Single(card),
            Self::Single(below) => Self::Stack(smallvec![below, card]),
            Self::Stack(mut cards) => {
                cards.push(card);
                Self::Stack(cards)
            }
        };
        *self = next;
    }

    pub(crate) fn pop(&mut self) -> Option<Card> {
        let (head, next) = match core::mem::replace(self, Self::Empty) {
            Self::Empty => (None, Self::Empty),
            Self::Single(card) => (Some(card), Self::Empty),
            Self::Stack(mut cards) => {
                let head = cards.pop();
                let next = match cards.len() {
                    0 => Self::Empty,
                    1 => Self::Single(cards[0]),
                    _ => Self::Stack(cards),
                };
                (head, next)
            }
        };
        *self = next;
        head
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Empty
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EmptyMarker {
    Empty,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SavedContent {
    Empty(EmptyMarker),
    Single(Card),
    Stack(SmallVec<[Card; 4]>),
}

impl From<SavedContent> for CellContent {
    fn from(saved: SavedContent) -> Self {
        match saved {
            SavedContent::Empty(_) => Self::Empty,
            SavedContent::Single(card) => Self::Single(card),
            SavedContent::Stack(cards) => Self::Stack(cards),
        }
    }
}

impl From<CellContent> for SavedContent {
    fn from(content: CellContent) -> Self {
        match content {
            CellContent::Empty => Self::Empty(EmptyMarker::Empty),
            CellContent::Single(card) => Self::Single(card),
            CellContent::Stack(cards) => Self::Stack(cards),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    None,
    Selected,
}

impl Default for CellState {
    fn default() -> Self {
        Self::None
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    #[serde(rename = "kind")]
    role: CellRole,
    #[serde(rename = "cell")]
    content: CellContent,
    #[serde(rename = "cellState")]
    state: CellState,
}

impl Tile {
    pub const fn new(role: CellRole, content: CellContent) -> Self {
        Self {
            role,
            content,
            state: CellState::None,
        }
    }

    pub const fn empty(role: CellRole) -> Self {
        Self::new(role, CellContent::Empty)
    }

    pub const fn role(&self) -> CellRole {
        self.role
    }

    pub const fn content(&self) -> &CellContent {
        &self.content
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    pub const fn is_selected(&self) -> bool {
        matches!(self.state, CellState::Selected)
    }

    pub(crate) fn content_mut(&mut self) -> &mut CellContent {
        &mut self.content
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    const BLUE_ONE: Card = Card::new(Suit::Blue, Rank::One);
    const BLUE_TWO: Card = Card::new(Suit::Blue, Rank::Two);
    const BLUE_THREE: Card = Card::new(Suit::Blue, Rank::Three);

    #[test]
    fn push_grows_single_into_stack() {
        let mut content = CellContent::Empty;

        content.push(BLUE_ONE);
        assert_eq!(content, CellContent::Single(BLUE_ONE));

        content.push(BLUE_TWO);
        content.push(BLUE_THREE);
        assert_eq!(content.len(), 3);
        assert_eq!(content.head(), Some(BLUE_THREE));
        assert_eq!(content.single(), None);
        assert_eq!(content.iter().collect::<Vec<_>>(), [BLUE_ONE, BLUE_TWO, BLUE_THREE]);
    }

    #[test]
    fn pop_collapses_stack_back_to_single() {
        let mut content = CellContent::Single(BLUE_ONE);
        content.push(BLUE_TWO);

        assert_eq!(content.pop(), Some(BLUE_TWO));
        assert_eq!(content, CellContent::Single(BLUE_ONE));
        assert_eq!(content.pop(), Some(BLUE_ONE));
        assert_eq!(content, CellContent::Empty);
        assert_eq!(content.pop(), None);
    }

    #[test]
    fn empty_stack_counts_as_empty() {
        let content = CellContent::Stack(SmallVec::new());

        assert!(content.is_empty());
        assert_eq!(content.head(), None);
    }

    #[test]
    fn saved_tile_shape() {
        let tile = Tile::empty(CellRole::Exit);
        assert_eq!(
            serde_json::to_string(&tile).unwrap(),
            r#"{"kind":"exit","cell":"empty","cellState":"none"}"#
        );

        let mut content = CellContent::Single(BLUE_ONE);
        assert_eq!(serde_json::to_string(&content).unwrap(), r#"{"suit":"blue","rank":"1"}"#);
        content.push(BLUE_TWO);
        assert_eq!(
            serde_json::to_string(&content).unwrap(),
            r#"[{"suit":"blue","rank":"1"},{"suit":"blue","rank":"2"}]"#
        );
    }

    #[test]
    fn loads_saved_tiles() {
        let tile: Tile =
            serde_json::from_str(r#"{"kind":"run","cell":[{"suit":"green","rank":"3"},{"suit":"green","rank":"4"}],"cellState":"selected"}"#)
                .unwrap();
        assert_eq!(tile.role(), CellRole::Run);
        assert_eq!(tile.content().len(), 2);
        assert_eq!(tile.content().head(), Some(Card::new(Suit::Green, Rank::Four)));
        assert!(tile.is_selected());

        let tile: Tile = serde_json::from_str(r#"{"kind":"board","cell":{"suit":"black","rank":"*"},"cellState":"none"}"#)
            .unwrap();
        assert_eq!(tile.content(), &CellContent::Single(Card::FLOWER));

        assert!(serde_json::from_str::<Tile>(r#"{"kind":"board","cell":"full","cellState":"none"}"#).is_err());
    }
}
