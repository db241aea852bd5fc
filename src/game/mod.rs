// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::{Illegal, MoveId, PlayError, Position, PositionError, Replay, ResolvedMove, Verdict};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("game has no starting position")]
    MissingPosition,
    #[error(transparent)]
    Position(#[from] PositionError),
}

/// A starting position and the move tokens played from it.
///
/// In text form the first whitespace separated field is the piece
/// placement and every field after it is one ply, white first.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub position: Position,
    pub moves: Vec<String>,
}

impl FromStr for GameRecord {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let position = fields.next().ok_or(GameError::MissingPosition)?.parse()?;
        let moves = fields.map(str::to_string).collect();
        Ok(Self { position, moves })
    }
}

/// One played ply, as seen right after it was resolved.
#[derive(Debug)]
pub struct Ply<'a> {
    pub id: MoveId,
    pub token: &'a str,
    pub resolved: ResolvedMove,
    /// The board after the ply. Unchanged if the move was illegal.
    pub position: &'a Position,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    Completed {
        plies: usize,
    },
    Illegal {
        ply: MoveId,
        token: String,
        reason: Illegal,
    },
}

impl GameRecord {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read game file {}", path.display()))?;
        let game = text
            .parse()
            .with_context(|| format!("failed to parse game file {}", path.display()))?;
        Ok(game)
    }

    /// Replays every move, calling `observe` after each one. Stops at the
    /// first illegal move.
    pub fn play<F>(&self, mut observe: F) -> Result<GameOutcome, PlayError>
    where
        F: FnMut(&Ply<'_>),
    {
        let mut replay = Replay::new(self.position.clone());
        for token in &self.moves {
            let id = replay.next_move_id();
            let resolved = replay.submit(token)?;
            observe(&Ply {
                id,
                token,
                resolved,
                position: replay.position(),
            });
            if let Verdict::Illegal(reason) = resolved.verdict {
                info!("game stopped at ply {} ({}): {}", id.value() + 1, token, reason);
                return Ok(GameOutcome::Illegal {
                    ply: id,
                    token: token.clone(),
                    reason,
                });
            }
        }
        Ok(GameOutcome::Completed {
            plies: replay.history().len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Material, NotationError, Square::*};

    const FOOLS_MATE: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR f3 e5 g4 Qh4#";

    #[test]
    fn test_parse_game() {
        let game: GameRecord = FOOLS_MATE.parse().unwrap();
        assert_eq!(game.position, Position::default());
        assert_eq!(game.moves, vec!["f3", "e5", "g4", "Qh4#"]);
    }

    #[test]
    fn test_parse_game_across_lines() {
        let game: GameRecord = "8/8/8/8/8/8/8/K6k\n  Kb2 Kg2\n\tKc3\n".parse().unwrap();
        assert_eq!(game.position.contents(A1), Some(Material::WK));
        assert_eq!(game.moves, vec!["Kb2", "Kg2", "Kc3"]);
    }

    #[test]
    fn test_parse_game_errors() {
        assert_eq!("".parse::<GameRecord>(), Err(GameError::MissingPosition));
        assert_eq!(" \n ".parse::<GameRecord>(), Err(GameError::MissingPosition));
        assert_eq!(
            "rnbqkbnr/ppppzppp e4".parse::<GameRecord>(),
            Err(GameError::Position(PositionError::InvalidPiece('z')))
        );
    }

    #[test]
    fn test_play_to_completion() {
        let game: GameRecord = FOOLS_MATE.parse().unwrap();
        let mut seen = Vec::new();
        let outcome = game
            .play(|ply| seen.push((ply.id.move_number(), ply.id.turn(), ply.token.to_string())))
            .unwrap();
        assert_eq!(outcome, GameOutcome::Completed { plies: 4 });
        assert_eq!(
            seen,
            vec![
                (1, Color::White, "f3".to_string()),
                (1, Color::Black, "e5".to_string()),
                (2, Color::White, "g4".to_string()),
                (2, Color::Black, "Qh4#".to_string()),
            ]
        );
    }

    #[test]
    fn test_play_stops_at_illegal_move() {
        let game: GameRecord = "8/8/8/8/5k2/8/PPPPPPPP/7K e4+ Ke5".parse().unwrap();
        let mut plies = 0;
        let outcome = game
            .play(|ply| {
                plies += 1;
                assert!(!ply.resolved.is_legal());
                assert_eq!(ply.position, &game.position);
            })
            .unwrap();
        assert_eq!(plies, 1);
        assert_eq!(
            outcome,
            GameOutcome::Illegal {
                ply: MoveId::START,
                token: "e4+".to_string(),
                reason: Illegal::NoLegalSource,
            }
        );
    }

    #[test]
    fn test_play_reports_notation_errors() {
        let game: GameRecord = "8/8/8/8/8/8/8/K6k Kb2 Kg".parse().unwrap();
        assert!(matches!(
            game.play(|_| {}),
            Err(PlayError::Notation(NotationError::MalformedNotation(_)))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameRecord::load("no/such/game.txt").unwrap_err();
        assert!(err.to_string().contains("no/such/game.txt"));
    }
}
