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

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::geometry::{attacks, can_reach, is_path_clear};
use super::material::{Color, Material};
use super::position::Position;
use super::san::{self, NotationError, ParsedMove};
use super::square::Square;

/// A move whose source square has been found and which has passed every
/// rule. Applying it to the position it was resolved against is always
/// safe.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegalMove {
    pub from: Square,
    pub to: Square,
    /// What ends up on `to`: the moving piece, or the piece a pawn
    /// promotes to.
    pub placed: Material,
    pub captured: Option<Material>,
}

/// Why a well formed move token was rejected.
#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Illegal {
    #[strum(to_string = "destination holds one of the mover's own pieces")]
    OwnPieceAtDestination,
    #[strum(to_string = "capture of an empty square")]
    CaptureOfEmptySquare,
    #[strum(to_string = "destination is occupied but no capture was declared")]
    DestinationOccupied,
    #[strum(to_string = "no piece can legally make this move")]
    NoLegalSource,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Legal(LegalMove),
    Illegal(Illegal),
}

/// A parsed move token together with the outcome of resolving it.
///
/// When the move is legal, the source hints of `parsed` are replaced with
/// the file and rank of the square the piece actually moved from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedMove {
    pub parsed: ParsedMove,
    pub verdict: Verdict,
}

impl ResolvedMove {
    #[inline]
    pub fn is_legal(&self) -> bool {
        matches!(self.verdict, Verdict::Legal(_))
    }

    #[inline]
    pub fn legal(&self) -> Option<&LegalMove> {
        match &self.verdict {
            Verdict::Legal(mv) => Some(mv),
            Verdict::Illegal(_) => None,
        }
    }

    #[inline]
    pub fn from(&self) -> Option<Square> {
        self.legal().map(|mv| mv.from)
    }

    #[inline]
    pub fn to(&self) -> Square {
        self.parsed.to
    }

    #[inline]
    pub fn captured(&self) -> Option<Material> {
        self.legal().and_then(|mv| mv.captured)
    }
}

/// Rules of play evaluated against a position.
pub trait LegalMoves: AsRef<Position> {
    /// Whether any piece of the other side could capture the king of
    /// `color`. A side without a king is never in check.
    fn is_in_check(&self, color: Color) -> bool {
        let pos: &Position = self.as_ref();
        let Some(king) = pos.king(color) else {
            return false;
        };
        pos.occupied_by(!color)
            .any(|(from, material)| attacks(pos, material, from, king))
    }

    /// Parses `token` for `color` and resolves it.
    fn resolve_san(&self, token: &str, color: Color) -> Result<ResolvedMove, NotationError> {
        let parsed = san::parse(token, color)?;
        debug!("parsed '{}' as {:?}", token, parsed);
        Ok(self.resolve(parsed))
    }

    /// Finds the square the move is made from.
    ///
    /// Squares are tried in scan order (a8 through h1) and the first one
    /// that passes every rule is taken. No attempt is made to find out
    /// whether a second square would also have qualified.
    fn resolve(&self, mut parsed: ParsedMove) -> ResolvedMove {
        let pos: &Position = self.as_ref();
        let verdict = match find_source(pos, &parsed) {
            Ok(mv) => {
                parsed.from_file = Some(mv.from.file());
                parsed.from_rank = Some(mv.from.rank());
                Verdict::Legal(mv)
            }
            Err(reason) => Verdict::Illegal(reason),
        };
        debug!("{} {}: {:?}", parsed.color, parsed, verdict);
        ResolvedMove { parsed, verdict }
    }
}

impl AsRef<Position> for Position {
    fn as_ref(&self) -> &Position {
        self
    }
}

impl LegalMoves for Position {}

fn find_source(pos: &Position, parsed: &ParsedMove) -> Result<LegalMove, Illegal> {
    let to = parsed.to;
    let captured = pos.contents(to);
    match captured {
        Some(material) if material.color() == parsed.color => {
            return Err(Illegal::OwnPieceAtDestination)
        }
        Some(_) if !parsed.capture => return Err(Illegal::DestinationOccupied),
        None if parsed.capture => return Err(Illegal::CaptureOfEmptySquare),
        _ => {}
    }

    let mover = Material::new(parsed.color, parsed.piece);
    let placed = Material::new(parsed.color, parsed.promotion.unwrap_or(parsed.piece));
    for (from, material) in pos.occupied_by(parsed.color) {
        if material != mover || !parsed.matches_source(from) {
            continue;
        }
        if !can_reach(parsed.piece, parsed.color, from, to, parsed.capture) {
            trace!("{}: cannot reach {} from {}", parsed, to, from);
            continue;
        }
        if !is_path_clear(pos, parsed.piece, parsed.capture, from, to) {
            trace!("{}: path from {} is blocked", parsed, from);
            continue;
        }
        let candidate = LegalMove {
            from,
            to,
            placed,
            captured,
        };
        let mut scratch = pos.clone();
        let _ = scratch.apply_move(&candidate);
        if scratch.is_in_check(parsed.color) {
            trace!("{}: moving from {} leaves the king in check", parsed, from);
            continue;
        }
        if scratch.is_in_check(!parsed.color) != parsed.gives_check() {
            trace!("{}: check marker disagrees for {}", parsed, from);
            continue;
        }
        return Ok(candidate);
    }
    Err(Illegal::NoLegalSource)
}
