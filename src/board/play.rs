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

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::material::Color;
use super::moves::{LegalMoves, ResolvedMove};
use super::position::Position;
use super::san::NotationError;
use super::Turn;

use Color::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error("no more moves are accepted after the illegal move at ply {}", .0.value() + 1)]
    Halted(MoveId),
}

/// Counts plies from the start of a replay. White plays the even ids.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MoveId(u16);

impl MoveId {
    pub const START: MoveId = MoveId(0);

    #[inline]
    pub fn new(move_count: u16, turn: Color) -> Self {
        match turn {
            White => Self(move_count * 2),
            Black => Self(move_count * 2 + 1),
        }
    }
    #[inline]
    pub fn turn(&self) -> Color {
        const TURNS: [Color; 2] = [White, Black];
        TURNS[self.value() % 2]
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0 as usize
    }
    #[inline]
    pub fn move_number(&self) -> usize {
        1 + self.value() / 2
    }
    #[inline]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for MoveId {
    #[inline]
    fn default() -> Self {
        MoveId::START
    }
}

/// Plays a sequence of move tokens against one position, white first,
/// alternating every ply. The first illegal move stops the replay.
#[derive(Debug, Clone)]
pub struct Replay {
    position: Position,
    next_move_id: MoveId,
    history: Vec<ResolvedMove>,
    halted_at: Option<MoveId>,
}

impl Default for Replay {
    fn default() -> Self {
        Self::new(Position::default())
    }
}

impl Replay {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            next_move_id: MoveId::START,
            history: Vec::new(),
            halted_at: None,
        }
    }

    /// Resolves `token` for the side to move and, if it is legal, plays it.
    ///
    /// An illegal move is recorded in the history and halts the replay;
    /// later submissions fail with `PlayError::Halted`. Tokens that cannot
    /// be parsed leave the replay untouched.
    pub fn submit(&mut self, token: &str) -> Result<ResolvedMove, PlayError> {
        if let Some(move_id) = self.halted_at {
            return Err(PlayError::Halted(move_id));
        }
        let move_id = self.next_move_id;
        let resolved = self.position.resolve_san(token, move_id.turn())?;
        match resolved.legal() {
            Some(mv) => {
                let _ = self.position.apply_move(mv);
                self.next_move_id = move_id.next();
                debug!("ply {}: {} {} played", move_id.value() + 1, move_id.turn(), token);
            }
            None => {
                warn!("ply {}: {} {} is illegal", move_id.value() + 1, move_id.turn(), token);
                self.halted_at = Some(move_id);
            }
        }
        self.history.push(resolved);
        Ok(resolved)
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn next_move_id(&self) -> MoveId {
        self.next_move_id
    }

    /// Every submitted move that could be parsed, the illegal one included.
    #[inline]
    pub fn history(&self) -> &[ResolvedMove] {
        &self.history
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted_at.is_some()
    }

    #[inline]
    pub fn halted_at(&self) -> Option<MoveId> {
        self.halted_at
    }
}

impl Turn for Replay {
    #[inline]
    fn turn(&self) -> Color {
        self.next_move_id.turn()
    }
}

impl AsRef<Position> for Replay {
    fn as_ref(&self) -> &Position {
        &self.position
    }
}

impl LegalMoves for Replay {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::material::Material;
    use crate::board::moves::{Illegal, Verdict};
    use crate::board::square::Square::*;

    #[test]
    fn test_move_id() {
        let id = MoveId::START;
        assert_eq!(id.turn(), White);
        assert_eq!(id.move_number(), 1);
        let id = id.next();
        assert_eq!(id.turn(), Black);
        assert_eq!(id.move_number(), 1);
        let id = id.next();
        assert_eq!(id.turn(), White);
        assert_eq!(id.move_number(), 2);
        assert_eq!(MoveId::new(3, Black).value(), 7);
    }

    #[test]
    fn test_turns_alternate() {
        let mut replay = Replay::default();
        assert_eq!(replay.turn(), White);
        assert!(replay.submit("e4").unwrap().is_legal());
        assert_eq!(replay.turn(), Black);
        assert!(replay.submit("e5").unwrap().is_legal());
        assert_eq!(replay.turn(), White);
        assert!(replay.submit("Nf3").unwrap().is_legal());
        assert!(replay.submit("Nc6").unwrap().is_legal());
        assert_eq!(replay.history().len(), 4);
        assert_eq!(replay.next_move_id().move_number(), 3);
        assert_eq!(replay.position().contents(F3), Some(Material::WN));
        assert_eq!(replay.position().contents(C6), Some(Material::BN));
    }

    #[test]
    fn test_fools_mate() {
        let mut replay = Replay::default();
        for token in ["f3", "e5", "g4"] {
            assert!(replay.submit(token).unwrap().is_legal());
        }
        let resolved = replay.submit("Qh4#").unwrap();
        assert_eq!(resolved.from(), Some(D8));
        assert!(replay.is_in_check(White));
        assert!(!replay.is_halted());
    }

    #[test]
    fn test_illegal_move_halts() {
        let mut replay = Replay::default();
        assert!(replay.submit("e4").unwrap().is_legal());
        let resolved = replay.submit("e4").unwrap();
        assert_eq!(resolved.verdict, Verdict::Illegal(Illegal::DestinationOccupied));
        assert!(replay.is_halted());
        assert_eq!(replay.halted_at(), Some(MoveId::START.next()));
        // the board is left as it was before the illegal move
        assert_eq!(replay.position().contents(E7), Some(Material::BP));
        assert_eq!(replay.history().len(), 2);
        assert_eq!(
            replay.submit("e5"),
            Err(PlayError::Halted(MoveId::START.next()))
        );
    }

    #[test]
    fn test_notation_error_leaves_replay_untouched() {
        let mut replay = Replay::default();
        assert!(matches!(replay.submit("Nf"), Err(PlayError::Notation(_))));
        assert!(!replay.is_halted());
        assert_eq!(replay.turn(), White);
        assert!(replay.history().is_empty());
        assert!(replay.submit("Nf3").unwrap().is_legal());
    }
}
