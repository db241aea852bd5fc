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

//! Chess board that resolves moves written in algebraic notation
//!
//! A _board_ holds the contents of the 64 squares and decides, for a
//! move token such as `Nbd7` or `exd8=Q+`, which piece is meant and
//! whether moving it is legal. The following features are supported:
//!
//! [x] Piece movement for all six kinds of piece
//! [x] Source disambiguation by file, rank or both
//! [x] Self-check detection, including pinned pieces
//! [x] Verification of check and mate markers
//! [x] Promotion to queen, rook, bishop or knight
//! [ ] Castling
//! [ ] En passant
//! [ ] Checkmate and stalemate detection
//!
//! Some of the key abstractions include:
//!
//! * A `Square` represents the coordinates for a single square
//!   on an 8-by-8 board. The 8 rows and 8 columns on a board
//!   are represented by `Rank` (`Rank1` .. `Rank8`) and `File`
//!   (`FileA` .. `FileH`) respectively. Squares are declared from
//!   `A8` to `H1`, the order in which a board is printed and the
//!   order in which candidate pieces are searched.
//!
//! * A `Mask` is a 64-bit (u64) value in which each bit maps to a
//!   square on the board. Masks are used for the squares lying
//!   strictly between two others, which must be empty for a sliding
//!   piece to pass.
//!
//! * `Material` represents a piece of a specific color. A `Piece` has
//!   six variants: `King`, `Queen`, `Rook`, `Bishop`, `Knight` and `Pawn`.
//!   `Color` is either `White` or `Black`.
//!
//! * A `Position` holds the contents of each square. It can be read
//!   from and written as the piece placement field of FEN, and printed
//!   as a framed text grid. The only method that modifies a position
//!   is `apply_move`, which takes a `LegalMove`.
//!
//! * `parse` turns a move token into a `ParsedMove`, which records
//!   everything the token says without looking at the board.
//!
//! * The `LegalMoves` trait resolves a `ParsedMove` against a position.
//!   The result is a `ResolvedMove` holding either a `LegalMove` or the
//!   reason the move is `Illegal`.
//!
//! * A `Replay` plays tokens for both sides in turn, white first, and
//!   stops at the first illegal move.
//!

pub mod geometry;
mod material;
mod moves;
mod play;
mod position;
mod san;
mod square;

pub use material::*;
pub use moves::*;
pub use play::*;
pub use position::*;
pub use san::*;
pub use square::*;

pub trait Turn {
    fn turn(&self) -> Color;
}
