//! This crate contains the structures used to hand a decoded Doom level over
//! to the converter: vertices, lines, sides, sectors, the GL nodes output
//! (GL vertices, segments and subsectors), things, and the pictures used for
//! floors, ceilings and walls.
//!
//! Reading the lumps out of a WAD is somebody else's job. Anything able to
//! produce the records implements `LevelSource`. `LevelTables` is the plain
//! in-memory implementation, and can be deserialised from a dump.
//!
//! ```text,ignore
//!   GL_SSECT ──> GL_SEGS ──> GL_VERT / VERTEXES
//!                   │
//!                   └──> LINEDEFS ──> SIDEDEFS ──> SECTORS ──> flats
//!                                        │
//!                                        └──> textures
//! ```

pub mod tables;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;

pub use tables::LevelTables;

use types::*;

/// Read-only access to a decoded level. Each iterator starts from the first
/// record every time it is called.
pub trait LevelSource {
    fn vertex_iter(&self) -> impl Iterator<Item = WadVertex> + '_;

    fn gl_vertex_iter(&self) -> impl Iterator<Item = WadGlVertex> + '_;

    fn sector_iter(&self) -> impl Iterator<Item = WadSector> + '_;

    fn sidedef_iter(&self) -> impl Iterator<Item = WadSideDef> + '_;

    fn linedef_iter(&self) -> impl Iterator<Item = WadLineDef> + '_;

    fn gl_segment_iter(&self) -> impl Iterator<Item = WadGlSegment> + '_;

    fn gl_subsector_iter(&self) -> impl Iterator<Item = WadSubSector> + '_;

    fn thing_iter(&self) -> impl Iterator<Item = WadThing> + '_;

    /// The palette used to expand flats and textures
    fn palette(&self) -> &WadPalette;

    /// Look up a floor/ceiling flat by name
    fn flat(&self, name: &str) -> Option<&WadPicture>;

    /// Look up a composed wall texture by name
    fn texture(&self, name: &str) -> Option<&WadPicture>;
}
