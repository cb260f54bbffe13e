use alloc::vec::Vec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::*;

/// One game in progress: the dealt board and the currently selected cell.
///
/// Saved as `{"currentTile": -1, "width": 8, "board": [tile, ...]}` with the tiles in index order. A missing `width`
/// means the narrowest board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "SavedGame", try_from = "SavedGame")]
pub struct Game {
    current: Option<CellIndex>,
    board: Board,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedGame {
    #[serde(
        default,
        serialize_with = "serialize_selection",
        deserialize_with = "deserialize_selection"
    )]
    current_tile: Option<CellIndex>,
    #[serde(default = "min_width")]
    width: Coord,
    board: Vec<Tile>,
}

const fn min_width() -> Coord {
    MIN_WIDTH
}

impl From<Game> for SavedGame {
    fn from(game: Game) -> Self {
        Self {
            current_tile: game.current,
            width: game.board.width(),
            board: game.board.iter().map(|(_, tile)| tile.clone()).collect(),
        }
    }
}

impl TryFrom<SavedGame> for Game {
    type Error = GameError;

    /// Only the shape is checked here, [`Game::validate`] does the rest.
    fn try_from(saved: SavedGame) -> Result<Self> {
        Ok(Self {
            current: saved.current_tile,
            board: Board::from_tiles(saved.width, saved.board)?,
        })
    }
}

impl Game {
    /// Deals a freshly shuffled deck, the same seed always gives the same layout.
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self> {
        let deck = shuffled_deck(RandomShuffler::new(seed));
        Self::from_board(Board::deal(config, &deck)?)
    }

    pub fn from_board(board: Board) -> Result<Self> {
        board.validate()?;
        let current = board
            .iter()
            .find_map(|(index, tile)| tile.is_selected().then_some(index));
        Ok(Self { current, board })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tile(&self, index: CellIndex) -> Option<&Tile> {
        self.board.tile(index)
    }

    pub fn selected(&self) -> Option<CellIndex> {
        self.current
    }

    /// Card that would move if the selection were played.
    pub fn selected_card(&self) -> Option<Card> {
        self.tile(self.current?)?.content().head()
    }

    /// Cells to highlight for the current selection.
    pub fn highlights(&self) -> Vec<CellIndex> {
        match self.selected_card() {
            Some(card) => legal_targets(&self.board, card),
            None => Vec::new(),
        }
    }

    pub fn can_place(&self, target: CellIndex, card: Card) -> bool {
        can_place(&self.board, target, card)
    }

    /// Clicking a cell: the selected cell or an empty one clears the selection, any other cell becomes selected.
    pub fn select(&mut self, index: CellIndex) -> Result<Option<CellIndex>> {
        let tile = self.board.tile(index).ok_or(GameError::InvalidIndex)?;
        let next = if self.current == Some(index) || tile.content().is_empty() {
            None
        } else {
            Some(index)
        };
        self.set_selection(next);
        Ok(next)
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(None);
    }

    /// Moves the head card of `from` onto `to` if the rules allow it.
    pub fn move_card(&mut self, from: CellIndex, to: CellIndex) -> Result<MoveOutcome> {
        let source = self.board.tile(from).ok_or(GameError::InvalidIndex)?;
        self.board.tile(to).ok_or(GameError::InvalidIndex)?;
        let card = source.content().head().ok_or(GameError::EmptySource)?;

        if from == to || !can_place(&self.board, to, card) {
            log::debug!("rejected {card} from {from} to {to}");
            return Ok(MoveOutcome::Rejected);
        }

        self.board.take_head(from);
        self.board.put(to, card)?;
        self.clear_selection();
        log::debug!("moved {card} from {from} to {to}");

        if self.is_won() {
            log::info!("game won");
            Ok(MoveOutcome::Won)
        } else {
            Ok(MoveOutcome::Moved)
        }
    }

    /// Plays the selected card onto `to`.
    pub fn move_selected(&mut self, to: CellIndex) -> Result<MoveOutcome> {
        let from = self.current.ok_or(GameError::NothingSelected)?;
        self.move_card(from, to)
    }

    /// Every dealt card has left the play area.
    pub fn is_won(&self) -> bool {
        self.board
            .iter()
            .filter(|(_, tile)| tile.role() == CellRole::Board)
            .all(|(_, tile)| tile.content().is_empty())
    }

    /// Checks a game that did not come from [`Game::new`], e.g. one loaded from saved state.
    pub fn validate(&self) -> Result<()> {
        self.board.validate()?;
        let marked = self
            .board
            .iter()
            .find_map(|(index, tile)| tile.is_selected().then_some(index));
        if marked != self.current {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(())
    }

    fn set_selection(&mut self, next: Option<CellIndex>) {
        if let Some(tile) = self.current.take().and_then(|prev| self.board.tile_mut(prev)) {
            tile.set_state(CellState::None);
        }
        if let Some(tile) = next.and_then(|index| self.board.tile_mut(index)) {
            tile.set_state(CellState::Selected);
        }
        self.current = next;
    }
}

/// No selection is written as `-1`.
fn serialize_selection<S>(current: &Option<CellIndex>, serializer: S) -> core::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match *current {
        Some(index) => serializer.serialize_u64(index as u64),
        None => serializer.serialize_i64(-1),
    }
}

/// Accepts an index, `null`, or any negative number for no selection.
fn deserialize_selection<'de, D>(deserializer: D) -> core::result::Result<Option<CellIndex>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.and_then(|index| CellIndex::try_from(index).ok()))
}
