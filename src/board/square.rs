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
use std::ops::{Add, BitOr, BitOrAssign, Sub};
use std::str::FromStr;
use strum_macros::EnumIter;
use thiserror::Error;

use super::material::Color;

use Color::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    #[error("invalid square '{file}{rank}'")]
    InvalidSquare { file: char, rank: char },
    #[error("invalid rank '{0}'")]
    InvalidRank(char),
}

/// A square on the board. Squares are declared in scan order: row 0 is
/// rank 8 and columns run from file a to file h, so the discriminant of
/// each variant is `row * 8 + column`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[rustfmt::skip]
pub enum Square {
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
}

#[rustfmt::skip]
use Square::{
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
};

impl Square {
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self::from_index(rank.to_index() * 8 + file.to_index())
    }

    #[inline]
    #[rustfmt::skip]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [Square; 64] = [
            A8, B8, C8, D8, E8, F8, G8, H8,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A1, B1, C1, D1, E1, F1, G1, H1,
        ];
        debug_assert!(index < 64);
        VALUES[index]
    }

    /// Grid coordinate to square. Both values must be below 8.
    #[inline]
    pub const fn from_coordinate(row: usize, column: usize) -> Self {
        Self::from_index(row * 8 + column)
    }

    /// Converts an algebraic file letter and rank digit into a square.
    pub fn from_algebraic(file: char, rank: char) -> Result<Self, SquareError> {
        match (File::try_from_char(file), Rank::try_from_char(rank)) {
            (Some(file), Some(rank)) => Ok(Self::new(file, rank)),
            _ => Err(SquareError::InvalidSquare { file, rank }),
        }
    }

    #[inline]
    pub const fn to_algebraic(&self) -> (char, char) {
        (self.file().to_char(), self.rank().to_char())
    }

    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_mask(&self) -> Mask {
        Mask::new(0x1 << (63 - self.to_index()))
    }
    #[inline]
    pub const fn row(&self) -> usize {
        self.to_index() / 8
    }
    #[inline]
    pub const fn column(&self) -> usize {
        self.to_index() % 8
    }
    #[inline]
    pub const fn file(&self) -> File {
        File::from_index(self.column())
    }
    #[inline]
    pub const fn rank(&self) -> Rank {
        Rank::from_index(self.row())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let file = chars.next().unwrap_or(' ');
        let rank = chars.next().unwrap_or(' ');
        if chars.next().is_some() {
            return Err(SquareError::InvalidSquare { file, rank });
        }
        Self::from_algebraic(file, rank)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum File {
    FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
}

use File::{
    FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
};

impl File {
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [File; 8] = [
            FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
        ];
        debug_assert!(index < 8);
        VALUES[index]
    }

    /// Only lowercase letters name files; uppercase letters belong to pieces.
    #[inline]
    pub const fn try_from_char(c: char) -> Option<Self> {
        match c {
            'a' => Some(FileA),
            'b' => Some(FileB),
            'c' => Some(FileC),
            'd' => Some(FileD),
            'e' => Some(FileE),
            'f' => Some(FileF),
            'g' => Some(FileG),
            'h' => Some(FileH),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_char(&self) -> char {
        const VALUES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
        VALUES[self.to_index()]
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Rank {
    Rank8, Rank7, Rank6, Rank5, Rank4, Rank3, Rank2, Rank1,
}

use Rank::{
    Rank8, Rank7, Rank6, Rank5, Rank4, Rank3, Rank2, Rank1,
};

impl Rank {
    #[inline]
    pub const fn back_rank(color: Color) -> Self {
        match color {
            White => Rank1,
            Black => Rank8,
        }
    }
    /// The rank pawns of `color` start on.
    #[inline]
    pub const fn pawn_rank(color: Color) -> Self {
        match color {
            White => Rank2,
            Black => Rank7,
        }
    }
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [Rank; 8] = [
            Rank8, Rank7, Rank6, Rank5, Rank4, Rank3, Rank2, Rank1,
        ];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub const fn try_from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank1),
            '2' => Some(Rank2),
            '3' => Some(Rank3),
            '4' => Some(Rank4),
            '5' => Some(Rank5),
            '6' => Some(Rank6),
            '7' => Some(Rank7),
            '8' => Some(Rank8),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_char(&self) -> char {
        const VALUES: [char; 8] = ['8', '7', '6', '5', '4', '3', '2', '1'];
        VALUES[self.to_index()]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Signed distance between two squares, measured in rows (`y`, growing
/// towards rank 1) and columns (`x`, growing towards file h).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: isize,
    pub y: isize,
}

impl Offset {
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    /// Unit step along the line from one square to another, if the two
    /// squares share a row, a column or a diagonal.
    pub fn to_unit(self) -> Option<Self> {
        let (x, y) = match (self.x, self.y) {
            (0, 0) => return None,
            (x, y) if x == 0 || y == 0 || x.abs() == y.abs() => (x.signum(), y.signum()),
            _ => return None,
        };
        Some(Self { x, y })
    }

    #[inline]
    pub fn is_straight(&self) -> bool {
        (self.x == 0) != (self.y == 0)
    }

    #[inline]
    pub fn is_diagonal(&self) -> bool {
        self.x != 0 && self.x.abs() == self.y.abs()
    }
}

impl Add<Offset> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Offset) -> Self::Output {
        let column = self.column().checked_add_signed(rhs.x).filter(|c| *c < 8)?;
        let row = self.row().checked_add_signed(rhs.y).filter(|r| *r < 8)?;
        Some(Square::from_coordinate(row, column))
    }
}

impl Sub for Square {
    type Output = Offset;
    fn sub(self, rhs: Self) -> Self::Output {
        Offset::new(
            self.column() as isize - rhs.column() as isize,
            self.row() as isize - rhs.row() as isize,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mask(u64);

impl Mask {
    #[inline]
    pub const fn new(val: u64) -> Self {
        Self(val)
    }

    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn contains(&self, square: Square) -> bool {
        (self.0 & square.to_mask().0) != 0
    }

    pub fn iter(&self) -> MaskIter {
        MaskIter(self.0)
    }
}

impl BitOr for Mask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign<Square> for Mask {
    fn bitor_assign(&mut self, rhs: Square) {
        self.0 |= rhs.to_mask().0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskIter(u64);

impl Iterator for MaskIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 != 0 {
            let square = Square::from_index(self.0.leading_zeros() as usize);
            self.0 &= !square.to_mask().0;
            return Some(square);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_scan_order_starts_at_a8() {
        let squares: Vec<Square> = Square::iter().collect();
        assert_eq!(squares[0], A8);
        assert_eq!(squares[7], H8);
        assert_eq!(squares[8], A7);
        assert_eq!(squares[63], H1);
    }

    #[test]
    fn test_coordinates() {
        assert_eq!(E4.row(), 4);
        assert_eq!(E4.column(), 4);
        assert_eq!(A8.row(), 0);
        assert_eq!(H1.row(), 7);
        assert_eq!(H1.column(), 7);
        assert_eq!(Square::from_coordinate(6, 4), E2);
    }

    #[test]
    fn test_from_algebraic() {
        assert_eq!(Square::from_algebraic('e', '4'), Ok(E4));
        assert_eq!(Square::from_algebraic('a', '8'), Ok(A8));
        assert_eq!(
            Square::from_algebraic('i', '4'),
            Err(SquareError::InvalidSquare { file: 'i', rank: '4' })
        );
        assert!(Square::from_algebraic('a', '9').is_err());
        assert!(Square::from_algebraic('a', '0').is_err());
        assert!(Square::from_algebraic('E', '4').is_err());
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("g7".parse::<Square>(), Ok(G7));
        assert!("g".parse::<Square>().is_err());
        assert!("g77".parse::<Square>().is_err());
        assert_eq!(C3.to_string(), "c3");
        assert_eq!(C3.to_algebraic(), ('c', '3'));
    }

    #[test]
    fn test_offset_shapes() {
        assert!((E4 - E2).is_straight());
        assert!((A1 - H1).is_straight());
        assert!((H8 - A1).is_diagonal());
        assert!(!(G1 - F3).is_straight());
        assert!(!(G1 - F3).is_diagonal());
        assert_eq!((E4 - E2).to_unit(), Some(Offset::new(0, -1)));
        assert_eq!((G1 - F3).to_unit(), None);
        assert_eq!((E4 - E4).to_unit(), None);
    }

    #[test]
    fn test_add_offset() {
        assert_eq!(E2 + Offset::new(0, -2), Some(E4));
        assert_eq!(A1 + Offset::new(-1, 0), None);
        assert_eq!(H8 + Offset::new(0, -1), None);
    }

    #[test]
    fn test_mask_iter_in_scan_order() {
        let mut mask = Mask::empty();
        mask |= E2;
        mask |= B7;
        mask |= H8;
        assert_eq!(mask.len(), 3);
        assert!(mask.contains(B7));
        assert!(!mask.contains(B6));
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![H8, B7, E2]);
    }

    proptest! {
        #[test]
        fn test_algebraic_round_trip(index in 0usize..64) {
            let square = Square::from_index(index);
            let (file, rank) = square.to_algebraic();
            prop_assert_eq!(Square::from_algebraic(file, rank), Ok(square));
        }
    }
}
