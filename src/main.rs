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

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chess_replay::{Color, GameOutcome, GameRecord, Ply, ResolvedMove};
use clap::{Parser, ValueEnum};
use serde::Serialize;

/// Replays a chess game and prints the board after every move.
///
/// The game file holds the starting piece placement (as in FEN) followed
/// by the moves in algebraic notation, separated by whitespace.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Game file to replay.
    game: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print the moves only, without the board.
    #[arg(short, long)]
    quiet: bool,

    /// Log more; repeat for even more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// Move headers followed by a drawing of the board.
    Text,
    /// One JSON object per move.
    Json,
}

#[derive(Serialize)]
struct PlyRecord<'a> {
    ply: usize,
    color: Color,
    token: &'a str,
    resolved: ResolvedMove,
    fen: String,
}

fn main() -> Result<ExitCode> {
    let config = Config::parse();
    let level = match config.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let game = GameRecord::load(&config.game)?;
    if config.format == Format::Text && !config.quiet {
        println!("{}", game.position);
    }

    let mut failure = None;
    let outcome = game
        .play(|ply| {
            if failure.is_none() {
                failure = print_ply(&config, ply).err();
            }
        })
        .with_context(|| format!("failed to replay {}", config.game.display()))?;
    if let Some(err) = failure {
        return Err(err);
    }

    match outcome {
        GameOutcome::Completed { .. } => Ok(ExitCode::SUCCESS),
        GameOutcome::Illegal { .. } => {
            if config.format == Format::Text {
                println!("Illegal move, stopping.");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_ply(config: &Config, ply: &Ply<'_>) -> Result<()> {
    match config.format {
        Format::Text => {
            println!("{} {}: {}", ply.id.move_number(), ply.id.turn(), ply.token);
            if !config.quiet && ply.resolved.is_legal() {
                println!("{}", ply.position);
            }
        }
        Format::Json => {
            let record = PlyRecord {
                ply: ply.id.value() + 1,
                color: ply.id.turn(),
                token: ply.token,
                resolved: ply.resolved,
                fen: ply.position.to_fen(),
            };
            println!("{}", serde_json::to_string(&record)?);
        }
    }
    Ok(())
}
