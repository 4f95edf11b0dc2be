//! The Level Graph: a decoded level with every cross reference resolved and
//! checked, read-only once built.
//!
//! The records point at each other in cycles (sector to sidedefs, sidedef to
//! partner, segment to partner) so everything is stored in flat arrays and
//! referenced by index.

mod error;
pub mod flags;
pub mod map_data;
pub mod map_defs;

pub use error::LevelError;
pub use flags::LineDefFlags;
pub use map_data::{MapData, MapExtents};
pub use map_defs::{LineDef, Sector, Segment, SideDef, SubSector, VertexId};
