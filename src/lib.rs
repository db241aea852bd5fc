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

//! Replays chess games written in algebraic notation.
//!
//! ```
//! use chess_replay::{LegalMoves, Position, Replay, Color};
//!
//! let mut replay = Replay::new(Position::default());
//! for token in ["f3", "e5", "g4", "Qh4#"] {
//!     assert!(replay.submit(token).unwrap().is_legal());
//! }
//! assert!(replay.is_in_check(Color::White));
//! ```

pub mod board;
pub mod game;

pub use board::*;
pub use game::*;
