//! Chart sources.
//!
//! A chart file (`.cbm`) holds one arrow per line as `column::y`.  The
//! column (1..=4) picks both the lane and the direction: 1 Left, 2 Down,
//! 3 Up, 4 Right.  Blank lines and `#` comments are skipped.

use std::fs;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use log::info;
use rand::Rng;
use thiserror::Error;

use crate::config::GameConfig;
use crate::entities::{Arrow, Direction, Position};

const SEPARATOR: &str = "::";

#[derive(Debug, Error)]
pub enum MapError {
    #[error("cannot read chart {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("line {line}: expected `column::y`, found {content:?}")]
    Malformed { line: usize, content: String },
    #[error("line {line}: bad number {content:?}: {source}")]
    BadNumber {
        line: usize,
        content: String,
        source: ParseIntError,
    },
    #[error("line {line}: column {column} is not a lane (1-4)")]
    UnknownColumn { line: usize, column: i32 },
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse chart text into arrows, in file order.
pub fn parse_arrows(source: &str, tile_size: i32) -> Result<Vec<Arrow>, MapError> {
    let mut arrows = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let (column, y) = text
            .split_once(SEPARATOR)
            .ok_or_else(|| MapError::Malformed {
                line,
                content: text.to_string(),
            })?;
        let column = parse_field(column, line)?;
        let y = parse_field(y, line)?;
        let direction =
            Direction::from_column(column).ok_or(MapError::UnknownColumn { line, column })?;

        arrows.push(Arrow::new(
            Position::new(column * tile_size - tile_size, y),
            direction,
        ));
    }
    Ok(arrows)
}

fn parse_field(field: &str, line: usize) -> Result<i32, MapError> {
    let field = field.trim();
    field.parse().map_err(|source| MapError::BadNumber {
        line,
        content: field.to_string(),
        source,
    })
}

pub fn load_arrows(path: &Path, tile_size: i32) -> Result<Vec<Arrow>, MapError> {
    let source = fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let arrows = parse_arrows(&source, tile_size)?;
    info!("loaded {} arrows from {}", arrows.len(), path.display());
    Ok(arrows)
}

// ── Random charts ─────────────────────────────────────────────────────────────

/// Minimum vertical gap between consecutive generated arrows.
pub const MIN_SPACING: i32 = 20;
pub const MAX_SPACING: i32 = 120;

/// Build a chart of `count` arrows in random lanes, starting just below the
/// lane and stacking downward.  All randomness comes through `rng` so a
/// seeded generator gives a repeatable chart.
pub fn generate(rng: &mut impl Rng, count: usize, config: &GameConfig) -> Vec<Arrow> {
    let mut y = config.lane_height;
    (0..count)
        .map(|_| {
            y += rng.gen_range(MIN_SPACING..=MAX_SPACING);
            let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            Arrow::in_lane(direction, y, config.tile_size)
        })
        .collect()
}
