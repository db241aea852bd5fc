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

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use strum::IntoEnumIterator;
use thiserror::Error;

use super::material::{Color, Material, Piece};
use super::moves::LegalMove;
use super::square::{File, Rank, Square};

use Piece::*;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

const RANK_SEPARATOR: char = '/';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("empty position")]
    Empty,
    #[error("invalid piece '{0}' in position")]
    InvalidPiece(char),
    #[error("rank {rank} describes more than 8 squares")]
    TooManyFiles { rank: usize },
    #[error("position describes more than 8 ranks")]
    TooManyRanks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Squares([Option<Material>; 64]);

impl Squares {
    fn empty() -> Self {
        Self([None; 64])
    }
}

impl Index<Square> for Squares {
    type Output = Option<Material>;
    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index.to_index()]
    }
}

impl IndexMut<Square> for Squares {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.0[index.to_index()]
    }
}

/// The contents of all 64 squares.
///
/// A position is a plain value: cloning it yields an independent board,
/// which is how candidate moves are tried out without touching the board
/// a game is being played on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    squares: Squares,
}

impl Default for Position {
    fn default() -> Self {
        const BACK_RANK: [Piece; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut position = Self::empty();
        for (file, piece) in File::iter().zip(BACK_RANK) {
            for color in Color::iter() {
                let square = Square::new(file, Rank::pawn_rank(color));
                let _ = position.place(square, Material::new(color, Pawn));
                let square = Square::new(file, Rank::back_rank(color));
                let _ = position.place(square, Material::new(color, piece));
            }
        }
        position
    }
}

impl Position {
    pub fn empty() -> Self {
        Self {
            squares: Squares::empty(),
        }
    }

    /// Reads the piece placement of a FEN record. Only the first
    /// whitespace separated field is considered. Ranks are listed from
    /// rank 8 down; ranks or files left out are empty.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let placement = fen.split_whitespace().next().ok_or(PositionError::Empty)?;
        let mut position = Self::empty();
        for (row, group) in placement.split(RANK_SEPARATOR).enumerate() {
            if row >= 8 {
                return Err(PositionError::TooManyRanks);
            }
            let rank = Rank::from_index(row);
            let mut column = 0;
            for c in group.chars() {
                let width = match c.to_digit(10) {
                    Some(run) => run as usize,
                    None => {
                        let material = Material::from_char(c).ok_or(PositionError::InvalidPiece(c))?;
                        if column < 8 {
                            let square = Square::new(File::from_index(column), rank);
                            position.squares[square] = Some(material);
                        }
                        1
                    }
                };
                column += width;
                if column > 8 {
                    return Err(PositionError::TooManyFiles { rank: 8 - row });
                }
            }
        }
        Ok(position)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for rank in Rank::iter() {
            if rank != Rank::Rank8 {
                fen.push(RANK_SEPARATOR);
            }
            let mut run = 0;
            for file in File::iter() {
                match self.contents(Square::new(file, rank)) {
                    Some(material) => {
                        if run > 0 {
                            fen.push_str(&run.to_string());
                            run = 0;
                        }
                        fen.push(material.to_char());
                    }
                    None => run += 1,
                }
            }
            if run > 0 {
                fen.push_str(&run.to_string());
            }
        }
        fen
    }

    #[inline]
    pub fn contents(&self, square: Square) -> Option<Material> {
        self.squares[square]
    }

    #[inline]
    pub fn is_vacant(&self, square: Square) -> bool {
        self.contents(square).is_none()
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.contents(square).is_some()
    }

    /// The first square in scan order holding the king of `color`.
    pub fn king(&self, color: Color) -> Option<Square> {
        let king = Material::new(color, King);
        Square::iter().find(|square| self.contents(*square) == Some(king))
    }

    /// Squares occupied by `color`, in scan order.
    pub fn occupied_by(&self, color: Color) -> impl Iterator<Item = (Square, Material)> + '_ {
        Square::iter().filter_map(move |square| match self.contents(square) {
            Some(material) if material.color() == color => Some((square, material)),
            _ => None,
        })
    }

    /// Moves the piece of a resolved move. Whatever occupied the destination
    /// is replaced and returned. No legality checks are done here.
    pub fn apply_move(&mut self, mv: &LegalMove) -> Option<Material> {
        let _ = self.remove(mv.from);
        self.place(mv.to, mv.placed)
    }

    fn place(&mut self, square: Square, material: Material) -> Option<Material> {
        self.squares[square].replace(material)
    }

    fn remove(&mut self, square: Square) -> Option<Material> {
        self.squares[square].take()
    }
}

impl Index<Square> for Position {
    type Output = Option<Material>;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index]
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn columns(f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "* |")?;
            for file in File::iter() {
                if file != File::FileA {
                    write!(f, " ")?;
                }
                write!(f, "{}", file.to_char().to_ascii_uppercase())?;
            }
            writeln!(f, "| *")
        }
        fn spacers(f: &mut fmt::Formatter<'_>) -> fmt::Result {
            writeln!(f, "* -{} *", "--".repeat(8))
        }

        columns(f)?;
        spacers(f)?;
        for rank in Rank::iter() {
            write!(f, "{} ", rank)?;
            for file in File::iter() {
                let cell = self
                    .contents(Square::new(file, rank))
                    .map_or(' ', |material| material.to_char());
                write!(f, "|{}", cell)?;
            }
            writeln!(f, "| {}", rank)?;
        }
        spacers(f)?;
        columns(f)
    }
}

impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_fen())
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let fen = String::deserialize(deserializer)?;
        Self::from_fen(&fen).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
impl Position {
    pub fn set_contents(mut self, square: Square, value: Option<Material>) -> Self {
        self.squares[square] = value;
        self
    }
}
