//! Saved-game text format shared with the page that stores it.
//!
//! A [`Game`] is written as JSON and then percent-escaped, so the result can sit in a single query parameter and be
//! restored on back/forward navigation or from a shared link.

use gridsol_core::{BoardConfig, Game, GameError};
use thiserror::Error;

pub use escape::*;

mod escape;

/// Query parameter holding the saved game.
pub const QUERY_KEY: &str = "game";

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Saved game is not valid percent-escaped text")]
    Escape,
    #[error("Saved game could not be parsed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Saved game is inconsistent: {0}")]
    Game(#[from] GameError),
}

pub type Result<T> = core::result::Result<T, CodecError>;

pub fn encode(game: &Game) -> Result<String> {
    let json = serde_json::to_string(game)?;
    Ok(escape(&json))
}

pub fn decode(value: &str) -> Result<Game> {
    let json = unescape(value)?;
    let game: Game = serde_json::from_str(&json)?;
    game.validate()?;
    Ok(game)
}

/// Restores the saved game if there is a usable one, otherwise deals a new one.
pub fn load_or_new(
    value: Option<&str>,
    config: BoardConfig,
    seed: u64,
) -> core::result::Result<Game, GameError> {
    match value.map(decode) {
        Some(Ok(game)) => {
            log::debug!("restored saved game");
            Ok(game)
        }
        Some(Err(err)) => {
            log::warn!("Could not restore saved game, starting a new one: {err}");
            Game::new(config, seed)
        }
        None => Game::new(config, seed),
    }
}

/// Picks the saved game out of a `key=value&...` query string.
pub fn find_in_query(query: &str) -> Option<&str> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(key, value)| (key == QUERY_KEY).then_some(value))
}

#[cfg(test)]
mod tests {
    use gridsol_core::{Card, MoveOutcome, build_deck};

    use super::*;

    fn played_game() -> Game {
        let mut game = Game::new(BoardConfig::STANDARD, 99).unwrap();
        let card = game.tile(8).unwrap().content().head().unwrap();
        let outcome = game.move_card(8, 0).unwrap();
        assert_eq!(outcome, MoveOutcome::Moved, "{card} to an empty exit");
        game.select(9).unwrap();
        game
    }

    #[test]
    fn encoded_game_is_url_safe() {
        let encoded = encode(&played_game()).unwrap();

        assert!(
            encoded
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b"-_.~%".contains(&b))
        );
    }

    #[test]
    fn decode_restores_encoded_game() {
        let game = played_game();
        let restored = decode(&encode(&game).unwrap()).unwrap();

        assert_eq!(restored, game);
        assert_eq!(restored.selected(), Some(9));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode("%7Bnot json"), Err(CodecError::Json(_))));
        assert!(matches!(decode("%G0"), Err(CodecError::Escape)));
        assert!(matches!(decode(""), Err(CodecError::Json(_))));
    }

    #[test]
    fn decode_rejects_inconsistent_board() {
        let game = Game::new(BoardConfig::STANDARD, 1).unwrap();
        let json = serde_json::to_string(&game)
            .unwrap()
            .replacen(r#""kind":"null""#, r#""kind":"exit""#, 1);

        assert!(matches!(
            decode(&escape(&json)),
            Err(CodecError::Game(GameError::InvalidBoardShape))
        ));
    }

    /// Unseeded deal written the way the browser page stores it: no width, flat tiles, `-1` for no selection.
    fn page_saved_json() -> String {
        let empty = |kind: &str| format!(r#"{{"kind":"{kind}","cell":"empty","cellState":"none"}}"#);
        let dealt = |card: &Card| {
            let card = serde_json::to_string(card).unwrap();
            format!(r#"{{"kind":"board","cell":{card},"cellState":"none"}}"#)
        };

        let tiles: Vec<String> = ["exit", "exit", "exit", "null", "flower", "run", "run", "run"]
            .into_iter()
            .map(empty)
            .chain(build_deck().iter().map(dealt))
            .collect();
        format!(r#"{{"currentTile":-1,"board":[{}]}}"#, tiles.join(","))
    }

    #[test]
    fn decodes_page_saved_game() {
        let game = decode(&escape(&page_saved_json())).unwrap();
        let deck = build_deck();

        assert_eq!(game.selected(), None);
        assert_eq!(game.board().size(), (8, 6));
        assert_eq!(game.tile(8).unwrap().content().single(), Some(deck[0]));
        assert_eq!(game.tile(47).unwrap().content().single(), Some(Card::FLOWER));
        assert_eq!(decode(&encode(&game).unwrap()).unwrap(), game);
    }

    #[test]
    fn decode_rejects_duplicate_cards() {
        let json = page_saved_json().replacen(
            r#"{"kind":"exit","cell":"empty","cellState":"none"}"#,
            r#"{"kind":"exit","cell":{"suit":"black","rank":"*"},"cellState":"none"}"#,
            1,
        );

        assert!(matches!(
            decode(&escape(&json)),
            Err(CodecError::Game(GameError::DuplicateCard))
        ));
    }

    #[test]
    fn load_falls_back_to_new_game() {
        let fresh = Game::new(BoardConfig::STANDARD, 4).unwrap();

        assert_eq!(load_or_new(None, BoardConfig::STANDARD, 4), Ok(fresh.clone()));
        assert_eq!(load_or_new(Some("%%%"), BoardConfig::STANDARD, 4), Ok(fresh));

        let saved = played_game();
        let encoded = encode(&saved).unwrap();
        assert_eq!(load_or_new(Some(&encoded), BoardConfig::STANDARD, 4), Ok(saved));
    }

    #[test]
    fn finds_saved_game_in_query() {
        assert_eq!(find_in_query("?seed=3&game=abc%7B"), Some("abc%7B"));
        assert_eq!(find_in_query("game=x"), Some("x"));
        assert_eq!(find_in_query("?seed=3"), None);
        assert_eq!(find_in_query(""), None);
    }
}
