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

//! Movement rules for each kind of piece.
//!
//! Rules come in two halves. `can_reach` answers whether a piece could get
//! from one square to another on an empty board. `is_path_clear` answers
//! whether the squares strictly between the two are empty. Neither looks
//! at what stands on the source or destination squares.

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use super::material::{Color, Material, Piece};
use super::position::Position;
use super::square::{Mask, Rank, Square};

use Color::*;
use Piece::*;

/// Whether `piece` of `color` moves in the shape of `from` to `to`.
/// Pawns advance straight unless `capture` is set, in which case they
/// only take one step diagonally forward.
pub fn can_reach(piece: Piece, color: Color, from: Square, to: Square, capture: bool) -> bool {
    let offset = to - from;
    let (dx, dy) = (offset.x.abs(), offset.y.abs());
    match piece {
        King => dx.max(dy) == 1,
        Queen => offset.is_straight() || offset.is_diagonal(),
        Rook => offset.is_straight(),
        Bishop => offset.is_diagonal(),
        Knight => (dx, dy) == (1, 2) || (dx, dy) == (2, 1),
        Pawn => {
            // rows are counted from rank 8, so white advances upwards
            let forward = match color {
                White => -1,
                Black => 1,
            };
            if capture {
                offset.y == forward && dx == 1
            } else {
                offset.x == 0
                    && (offset.y == forward
                        || (offset.y == 2 * forward && from.rank() == Rank::pawn_rank(color)))
            }
        }
    }
}

/// Whether `from` and `to` share a row or a column with nothing in between.
pub fn is_line_clear(position: &Position, from: Square, to: Square) -> bool {
    (to - from).is_straight() && is_vacant_between(position, from, to)
}

/// Whether `from` and `to` share a diagonal with nothing in between.
pub fn is_diagonal_clear(position: &Position, from: Square, to: Square) -> bool {
    (to - from).is_diagonal() && is_vacant_between(position, from, to)
}

pub fn is_path_clear(
    position: &Position,
    piece: Piece,
    capture: bool,
    from: Square,
    to: Square,
) -> bool {
    match piece {
        King | Knight => true,
        Pawn if capture => is_diagonal_clear(position, from, to),
        Pawn => is_line_clear(position, from, to),
        Bishop => is_diagonal_clear(position, from, to),
        Rook => is_line_clear(position, from, to),
        Queen => is_line_clear(position, from, to) || is_diagonal_clear(position, from, to),
    }
}

/// Whether `material` standing on `from` could capture on `target`.
pub fn attacks(position: &Position, material: Material, from: Square, target: Square) -> bool {
    let piece = material.piece();
    can_reach(piece, material.color(), from, target, true)
        && is_path_clear(position, piece, true, from, target)
}

fn is_vacant_between(position: &Position, from: Square, to: Square) -> bool {
    between(from, to).iter().all(|square| position.is_vacant(square))
}

#[inline]
pub fn between(from: Square, to: Square) -> Mask {
    let index = from.to_index() * 64 + to.to_index();
    SQUARES_BETWEEN[index]
}

static SQUARES_BETWEEN: Lazy<Vec<Mask>> = Lazy::new(|| {
    // Returns a mask of squares between `start` and `end` (exclusive of both)
    // if they are not equal and in a line. Otherwise returns an empty mask.
    fn squares_between(start: Square, end: Square) -> Mask {
        let mut mask = Mask::empty();
        if let Some(step) = (end - start).to_unit() {
            let mut next = start + step;
            while let Some(square) = next {
                if square == end {
                    break;
                }
                mask |= square;
                next = square + step;
            }
        }
        mask
    }

    let mut table = vec![Mask::empty(); 64 * 64];
    for start in Square::iter() {
        for end in Square::iter() {
            table[start.to_index() * 64 + end.to_index()] = squares_between(start, end);
        }
    }
    table
});
