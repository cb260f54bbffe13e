#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use rules::*;
pub use tile::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod generator;
mod rules;
mod tile;
mod types;

/// Narrowest board that still fits the header row.
pub const MIN_WIDTH: Coord = HEADER_ROLES.len() as Coord;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
}

impl BoardConfig {
    /// Header row plus five rows, exactly enough for the whole deck.
    pub const STANDARD: Self = Self::new_unchecked((8, 6));

    pub const fn new_unchecked(size: Coord2) -> Self {
        Self { size }
    }

    pub fn new((width, height): Coord2) -> Self {
        let width = width.clamp(MIN_WIDTH, Coord::MAX);
        let height = height.clamp(1, Coord::MAX);
        Self::new_unchecked((width, height))
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate(&self) -> Result<Self> {
        if self.width() < MIN_WIDTH || self.height() == 0 {
            Err(GameError::InvalidDimensions)
        } else {
            Ok(*self)
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Grid of tiles addressed by linear index, `row * width + column`.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    size: Coord2,
    tiles: Array2<Tile>,
}

impl Board {
    /// Lays out the header row and deals `deck` one row down, so the card at `deck[i]` lands on index `i + width`.
    pub fn deal(config: BoardConfig, deck: &[Card]) -> Result<Self> {
        let config = config.validate()?;
        let total = usize::from(config.total_cells());

        let tiles: Vec<Tile> = (0..total)
            .map(|index| match HEADER_ROLES.get(index) {
                Some(&role) => Tile::empty(role),
                None => {
                    let content = cell_above(index, config.width())
                        .and_then(|deck_index| deck.get(deck_index))
                        .map_or(CellContent::Empty, |&card| CellContent::Single(card));
                    Tile::new(CellRole::Board, content)
                }
            })
            .collect();

        let tiles = Array2::from_shape_vec(config.size.to_nd_index(), tiles)
            .map_err(|_| GameError::InvalidBoardShape)?;
        log::debug!(
            "dealt {} cards on a {}x{} board",
            dealt_cards(config, deck.len()),
            config.width(),
            config.height()
        );

        Ok(Self {
            size: config.size,
            tiles,
        })
    }

    /// Rebuilds a board from its tiles in index order, `tiles.len()` must be a whole number of rows.
    pub fn from_tiles(width: Coord, tiles: Vec<Tile>) -> Result<Self> {
        let columns = usize::from(width);
        if columns == 0 || tiles.len() % columns != 0 {
            return Err(GameError::InvalidBoardShape);
        }
        let height = Coord::try_from(tiles.len() / columns).map_err(|_| GameError::InvalidBoardShape)?;
        let size = (width, height);
        let tiles = Array2::from_shape_vec(size.to_nd_index(), tiles)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { size, tiles })
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn width(&self) -> Coord {
        self.size.0
    }

    pub fn height(&self) -> Coord {
        self.size.1
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn tile(&self, index: CellIndex) -> Option<&Tile> {
        self.tiles.get(self.tiles.nd_index(index)?)
    }

    pub(crate) fn tile_mut(&mut self, index: CellIndex) -> Option<&mut Tile> {
        let nd_index = self.tiles.nd_index(index)?;
        self.tiles.get_mut(nd_index)
    }

    /// Tiles with their linear index, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, &Tile)> {
        self.tiles.iter().enumerate()
    }

    /// Number of cards anywhere on the board.
    pub fn card_count(&self) -> usize {
        self.tiles.iter().map(|tile| tile.content().len()).sum()
    }

    /// Checks the shape, the fixed roles, the single selection, and that no card exists twice.
    pub fn validate(&self) -> Result<()> {
        BoardConfig::new_unchecked(self.size).validate()?;

        if self.tiles.dim() != (usize::from(self.size.1), usize::from(self.size.0)) {
            return Err(GameError::InvalidBoardShape);
        }

        let mut seen = BTreeSet::new();
        for card in self.tiles.iter().flat_map(|tile| tile.content().iter()) {
            if card.is_flower() && card != Card::FLOWER {
                return Err(GameError::InvalidCardText);
            }
            if !seen.insert(card) {
                return Err(GameError::DuplicateCard);
            }
        }

        let roles_match = self.iter().all(|(index, tile)| {
            let expected = HEADER_ROLES.get(index).copied().unwrap_or(CellRole::Board);
            tile.role() == expected
        });
        let selected = self.tiles.iter().filter(|tile| tile.is_selected()).count();
        if !roles_match || selected > 1 {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(())
    }

    pub(crate) fn take_head(&mut self, index: CellIndex) -> Option<Card> {
        self.tile_mut(index)?.content_mut().pop()
    }

    pub(crate) fn put(&mut self, index: CellIndex, card: Card) -> Result<()> {
        self.tile_mut(index)
            .ok_or(GameError::InvalidIndex)?
            .content_mut()
            .push(card);
        Ok(())
    }
}

impl Index<CellIndex> for Board {
    type Output = Tile;

    fn index(&self, index: CellIndex) -> &Self::Output {
        match self.tile(index) {
            Some(tile) => tile,
            None => panic!("cell index {index} out of range for {:?} board", self.tiles.dim()),
        }
    }
}

/// How many cards of a `deck_len` deck fit on the board, dealing starts one row down.
fn dealt_cards(config: BoardConfig, deck_len: usize) -> usize {
    let total = usize::from(config.total_cells());
    deck_len.min(total.saturating_sub(usize::from(config.width())))
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    Rejected,
    Moved,
    Won,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Rejected => false,
            Self::Moved => true,
            Self::Won => true,
        }
    }
}
