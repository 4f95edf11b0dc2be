//! Turn a level in to a block volume.
//!
//! ```text,ignore
//!  MapData ──> GridTransform ──> Raster (per subsector) ──> columns ──> Schematic
//!                                                              │
//!                                                              └──> colours
//! ```
//!
//! The level is flattened to a 2D raster first. Each cell collects the
//! sectors covering it and the walls crossing it, then every cell is drawn as
//! a vertical column of blocks: a solid wall, or a floor and ceiling with the
//! step faces, bars and lights between.

mod colours;
mod columns;
mod raster;
#[cfg(test)]
mod tests;

use std::error::Error;
use std::fmt;

use glam::{UVec3, Vec2};
use level::{LevelError, MapData};
use log::info;
use math::{DEFAULT_SCALE, GridTransform, ScaleMode};
use rand::Rng;
use schematic::{BlockKind, Schematic};
use wad::LevelSource;

pub use colours::{ColourClassifier, DEFAULT_COLOUR, closest_wool, rgb_to_lab};
pub use columns::{ColumnExtents, ColumnRenderer, effective_ceiling};
pub use raster::{Pixel, Raster, rasterize_subsector};

/// Light is placed with a chance of `lightlevel / 255 / light_divisor`
pub const DEFAULT_LIGHT_DIVISOR: f32 = 10.0;
pub const DEFAULT_SKY_MARKER: &str = "sky";

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub scale: ScaleMode,
    /// Empty blocks added under the lowest floor
    pub vertical_margin: u32,
    pub light_divisor: f32,
    /// A ceiling flat with this in its name (any case) is open sky
    pub sky_marker: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            scale: ScaleMode::Fixed(DEFAULT_SCALE),
            vertical_margin: 0,
            light_divisor: DEFAULT_LIGHT_DIVISOR,
            sky_marker: DEFAULT_SKY_MARKER.to_owned(),
        }
    }
}

/// Why a level could not be converted. Any of these aborts the whole level.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    Level(LevelError),
    /// The scale or target span is zero, negative or not a number
    InvalidScale(ScaleMode),
    /// The subsector's top and bottom borders cover different columns, the
    /// polygon is not convex or is degenerate
    BorderMismatch { subsector: usize },
    MissingPlayerStart,
    /// The player start is not over an open (non wall) cell
    PlayerStartOutsideLevel { x: i32, z: i32 },
}

impl Error for ConvertError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConvertError::Level(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Level(e) => write!(f, "invalid level: {}", e),
            ConvertError::InvalidScale(mode) => write!(f, "invalid scale {:?}", mode),
            ConvertError::BorderMismatch { subsector } => write!(
                f,
                "subsector {}: top and bottom borders do not cover the same columns",
                subsector
            ),
            ConvertError::MissingPlayerStart => write!(f, "level has no player 1 start"),
            ConvertError::PlayerStartOutsideLevel { x, z } => {
                write!(f, "player 1 start at ({}, {}) is not in an open area", x, z)
            }
        }
    }
}

impl From<LevelError> for ConvertError {
    fn from(e: LevelError) -> Self {
        ConvertError::Level(e)
    }
}

fn check_scale(mode: ScaleMode) -> Result<(), ConvertError> {
    let value = match mode {
        ScaleMode::Fixed(scale) => scale,
        ScaleMode::Fit { target_span } => target_span,
    };
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConvertError::InvalidScale(mode))
    }
}

/// Load the level from `source` then convert it
pub fn convert_source(
    name: &str,
    source: &impl LevelSource,
    options: &ConvertOptions,
    rng: &mut impl Rng,
) -> Result<Schematic, ConvertError> {
    let map = MapData::load(name, source)?;
    convert_level(&map, source, options, rng)
}

/// Convert a loaded level. `rng` decides where lights go, seed it to get the
/// same schematic every run.
pub fn convert_level(
    map: &MapData,
    source: &impl LevelSource,
    options: &ConvertOptions,
    rng: &mut impl Rng,
) -> Result<Schematic, ConvertError> {
    check_scale(options.scale)?;
    let extents = map.get_map_extents();
    let transform = GridTransform::new(
        extents.min_vertex,
        extents.max_vertex,
        extents.min_floor,
        extents.max_ceiling,
        options.scale,
        options.vertical_margin,
    );
    let size = transform.grid_size();
    info!("{}: Grid size {}x{}x{}", map.name(), size.x, size.y, size.z);

    let mut schematic = Schematic::new(size);
    let mut raster = Raster::new(size.x, size.z);
    for subsector in map.subsectors() {
        rasterize_subsector(&mut raster, map, subsector, &transform)?;
    }

    let mut columns = ColumnRenderer::new(map, source, &transform, options);
    for (cell, pixel) in raster.iter_mut() {
        pixel.floor = columns.render(&mut schematic, cell, pixel, rng);
    }
    info!(
        "{}: Rendered columns, {} colours classified",
        map.name(),
        columns.colours().num_cached()
    );

    let start = map.player_start().ok_or(ConvertError::MissingPlayerStart)?;
    let cell = transform.to_grid(Vec2::new(start.x as f32, start.y as f32));
    let floor = raster
        .get(cell)
        .and_then(|p| p.floor)
        .ok_or(ConvertError::PlayerStartOutsideLevel {
            x: cell.x,
            z: cell.y,
        })?;
    schematic.set_centre(UVec3::new(cell.x as u32, (floor + 1) as u32, cell.y as u32));

    // Level space is right handed with Y up the map, the schematic is left
    // handed
    schematic.mirror_z();

    let counts = schematic.block_counts();
    info!(
        "{}: {} wool, {} glass, {} torches",
        map.name(),
        counts[BlockKind::Wool.id() as usize],
        counts[BlockKind::Glass.id() as usize],
        counts[BlockKind::Torch.id() as usize]
    );
    Ok(schematic)
}
