// Copyright 2026 Tobin Edwards
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

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::material::{Color, Piece};
use super::square::{File, Rank, Square, SquareError};

use Piece::*;

const CAPTURE: char = 'x';
const PROMOTION: char = '=';
const CHECK: char = '+';
const MATE: char = '#';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty move")]
    Empty,
    #[error("no destination square in '{0}'")]
    MalformedNotation(String),
    #[error("invalid promotion in '{0}'")]
    InvalidPromotion(String),
    #[error(transparent)]
    InvalidSquare(#[from] SquareError),
}

/// Everything a move token says, before looking at the board.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedMove {
    pub color: Color,
    pub piece: Piece,
    pub from_file: Option<File>,
    pub from_rank: Option<Rank>,
    pub to: Square,
    pub capture: bool,
    pub promotion: Option<Piece>,
    pub check: bool,
    pub mate: bool,
}

impl ParsedMove {
    /// Whether the token claims the opponent is left in check.
    #[inline]
    pub fn gives_check(&self) -> bool {
        self.check || self.mate
    }

    /// Whether `square` agrees with the source file and rank given in
    /// the token, if any.
    pub fn matches_source(&self, square: Square) -> bool {
        self.from_file.map_or(true, |file| square.file() == file)
            && self.from_rank.map_or(true, |rank| square.rank() == rank)
    }
}

impl fmt::Display for ParsedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.piece.is_pawn() {
            write!(f, "{}", self.piece.to_char())?;
        }
        if let Some(file) = self.from_file {
            write!(f, "{}", file)?;
        }
        if let Some(rank) = self.from_rank {
            write!(f, "{}", rank)?;
        }
        if self.capture {
            write!(f, "{}", CAPTURE)?;
        }
        write!(f, "{}", self.to)?;
        if let Some(piece) = self.promotion {
            write!(f, "{}{}", PROMOTION, piece.to_char())?;
        }
        if self.mate {
            write!(f, "{}", MATE)
        } else if self.check {
            write!(f, "{}", CHECK)
        } else {
            Ok(())
        }
    }
}

/// Decomposes a move token such as `Nbxd7+` or `e8=Q` for the side `color`.
///
/// The token is read once from the end towards the start. The first digit
/// seen is the destination rank and the first file letter the destination
/// file; any digit or file letter seen after those is a source hint.
/// Markers may appear anywhere and do not take up a digit or letter slot.
pub fn parse(token: &str, color: Color) -> Result<ParsedMove, NotationError> {
    let chars: Vec<char> = token.chars().collect();
    if chars.is_empty() {
        return Err(NotationError::Empty);
    }

    let piece = Piece::from_char(chars[0]).unwrap_or(Pawn);
    let mut to_rank = None;
    let mut to_file = None;
    let mut from_rank = None;
    let mut from_file = None;
    let mut capture = false;
    let mut promotion = None;
    let mut check = false;
    let mut mate = false;

    for (i, &c) in chars.iter().enumerate().rev() {
        if c.is_ascii_digit() && to_rank.is_none() {
            to_rank = Some(c);
        } else if let (Some(file), None) = (File::try_from_char(c), to_file) {
            to_file = Some(file);
        } else if c.is_ascii_digit() {
            from_rank = Some(Rank::try_from_char(c).ok_or(SquareError::InvalidRank(c))?);
        } else if let Some(file) = File::try_from_char(c) {
            from_file = Some(file);
        } else {
            match c {
                CAPTURE => capture = true,
                CHECK => check = true,
                MATE => mate = true,
                PROMOTION => {
                    let promoted = chars
                        .get(i + 1)
                        .copied()
                        .and_then(Piece::from_char)
                        .filter(|p| matches!(p, Queen | Rook | Bishop | Knight))
                        .ok_or_else(|| NotationError::InvalidPromotion(token.to_string()))?;
                    promotion = Some(promoted);
                }
                // the leading piece letter and the letter after '='
                _ if i == 0 && Piece::from_char(c).is_some() => {}
                _ if i > 0 && chars[i - 1] == PROMOTION => {}
                _ => warn!("ignoring '{}' in move '{}'", c, token),
            }
        }
    }

    let (Some(file), Some(rank)) = (to_file, to_rank) else {
        return Err(NotationError::MalformedNotation(token.to_string()));
    };
    let to = Square::from_algebraic(file.to_char(), rank)?;

    Ok(ParsedMove {
        color,
        piece,
        from_file,
        from_rank,
        to,
        capture,
        promotion,
        check,
        mate,
    })
}
