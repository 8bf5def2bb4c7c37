//! Map ingestion from JSON documents and plain-text drawings.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use cleaning_robot_core::Position;
use cleaning_robot_world::{Grid, GridError};
use serde::Deserialize;
use thiserror::Error;

/// Character marking an obstacle in text maps.
const OBSTACLE_GLYPH: char = 'x';

/// Errors that can occur while ingesting a map.
///
/// Everything except [`MapError::Grid`] is a parse failure; `Grid` means the
/// document parsed but describes an impossible grid.
#[derive(Debug, Error)]
pub(crate) enum MapError {
    /// The file extension names no supported format.
    #[error("unsupported map format `{0}`, expected .json or .txt")]
    UnsupportedFormat(String),
    /// The map file could not be read.
    #[error("could not read map file {}", path.display())]
    Io {
        /// Location of the map file.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// The JSON document could not be deserialised.
    #[error("invalid JSON map: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// A JSON map omitted one of its dimensions.
    #[error("JSON map is missing `{0}`")]
    MissingDimension(&'static str),
    /// A text map contained no rows.
    #[error("text map is empty")]
    EmptyText,
    /// A text map is too large to address.
    #[error("text map exceeds the addressable grid size")]
    TooLarge,
    /// The parsed map describes an invalid grid.
    #[error("map describes an invalid grid: {0}")]
    Grid(#[from] GridError),
}

#[derive(Debug, Deserialize)]
struct JsonMap {
    rows: Option<u32>,
    cols: Option<u32>,
    #[serde(default)]
    tiles: Vec<JsonTile>,
}

#[derive(Debug, Deserialize)]
struct JsonTile {
    x: i32,
    y: i32,
    #[serde(default = "walkable_by_default")]
    walkable: bool,
}

fn walkable_by_default() -> bool {
    true
}

/// Loads a map, choosing the parser from the file extension.
pub(crate) fn load_map(path: &Path) -> Result<Grid, MapError> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let read = || {
        fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    match extension.as_str() {
        "json" => parse_json_map(&read()?),
        "txt" => parse_text_map(&read()?),
        _ => Err(MapError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Parses `{rows, cols, tiles: [{x, y, walkable}]}`.
///
/// Tiles whose `walkable` flag is false become obstacles; a missing flag
/// means walkable.
pub(crate) fn parse_json_map(contents: &str) -> Result<Grid, MapError> {
    let map: JsonMap = serde_json::from_str(contents)?;
    let height = map.rows.ok_or(MapError::MissingDimension("rows"))?;
    let width = map.cols.ok_or(MapError::MissingDimension("cols"))?;

    let obstacles = map
        .tiles
        .into_iter()
        .filter(|tile| !tile.walkable)
        .map(|tile| Position::new(tile.x, tile.y));

    Ok(Grid::new(width, height, obstacles)?)
}

/// Parses a text drawing where `x` at column x of line y marks an obstacle.
///
/// Empty lines before and after the drawing are ignored; the characters of
/// each row are kept as written. The width is the length of the first row
/// and the height is the number of rows.
pub(crate) fn parse_text_map(contents: &str) -> Result<Grid, MapError> {
    let all: Vec<&str> = contents.lines().collect();
    let first = all
        .iter()
        .position(|line| !line.is_empty())
        .ok_or(MapError::EmptyText)?;
    let last = all
        .iter()
        .rposition(|line| !line.is_empty())
        .ok_or(MapError::EmptyText)?;
    let lines = &all[first..=last];

    let width = lines.first().map_or(0, |line| line.chars().count());
    let width = u32::try_from(width).map_err(|_| MapError::TooLarge)?;
    let height = u32::try_from(lines.len()).map_err(|_| MapError::TooLarge)?;

    let mut obstacles = Vec::new();
    for (y, line) in lines.iter().enumerate() {
        for (x, glyph) in line.chars().enumerate() {
            if glyph != OBSTACLE_GLYPH {
                continue;
            }
            let x = i32::try_from(x).map_err(|_| MapError::TooLarge)?;
            let y = i32::try_from(y).map_err(|_| MapError::TooLarge)?;
            obstacles.push(Position::new(x, y));
        }
    }

    Ok(Grid::new(width, height, obstacles)?)
}
