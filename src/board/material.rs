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
use std::ops::Not;
use strum_macros::Display;
use strum_macros::EnumIter;

/// A piece of a specific color, i.e. the contents of an occupied square.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material {
    color: Color,
    piece: Piece,
}

impl Material {
    pub const WK: Self = Self::white(King);
    pub const WQ: Self = Self::white(Queen);
    pub const WR: Self = Self::white(Rook);
    pub const WB: Self = Self::white(Bishop);
    pub const WN: Self = Self::white(Knight);
    pub const WP: Self = Self::white(Pawn);

    pub const BK: Self = Self::black(King);
    pub const BQ: Self = Self::black(Queen);
    pub const BR: Self = Self::black(Rook);
    pub const BB: Self = Self::black(Bishop);
    pub const BN: Self = Self::black(Knight);
    pub const BP: Self = Self::black(Pawn);

    #[inline]
    pub const fn new(color: Color, piece: Piece) -> Self {
        Self { color, piece }
    }

    #[inline]
    pub const fn white(piece: Piece) -> Self {
        Self::new(White, piece)
    }

    #[inline]
    pub const fn black(piece: Piece) -> Self {
        Self::new(Black, piece)
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub fn is_white(&self) -> bool {
        self.color == White
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.color == Black
    }

    /// Decodes a board letter: uppercase is white, lowercase is black.
    pub fn from_char(c: char) -> Option<Self> {
        let piece = Piece::from_char(c.to_ascii_uppercase())?;
        let color = if c.is_ascii_uppercase() { White } else { Black };
        Some(Self::new(color, piece))
    }

    pub fn to_char(&self) -> char {
        let c = self.piece.to_char();
        match self.color {
            White => c,
            Black => c.to_ascii_lowercase(),
        }
    }
}

use Color::{Black, White};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Color {
    White,
    Black,
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
use Piece::{Bishop, King, Knight, Pawn, Queen, Rook};

impl Piece {
    /// Uppercase letter as used in notation and for white on the board.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'P' => Some(Pawn),
            'N' => Some(Knight),
            'B' => Some(Bishop),
            'R' => Some(Rook),
            'Q' => Some(Queen),
            'K' => Some(King),
            _ => None,
        }
    }

    pub const fn to_char(&self) -> char {
        match self {
            Pawn => 'P',
            Knight => 'N',
            Bishop => 'B',
            Rook => 'R',
            Queen => 'Q',
            King => 'K',
        }
    }

    pub fn is_king(&self) -> bool {
        matches!(*self, King)
    }
    pub fn is_pawn(&self) -> bool {
        matches!(*self, Pawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        assert_eq!(Material::from_char('K'), Some(Material::WK));
        assert_eq!(Material::from_char('n'), Some(Material::BN));
        assert_eq!(Material::from_char('x'), None);
        assert_eq!(Material::from_char('1'), None);
        assert_eq!(Material::BQ.to_char(), 'q');
        assert_eq!(Material::WP.to_char(), 'P');
    }

    #[test]
    fn test_color_classification() {
        assert!(Material::WR.is_white());
        assert!(!Material::WR.is_black());
        assert!(Material::BP.is_black());
        assert_eq!(!White, Black);
        assert_eq!(White.to_string(), "White");
    }
}
