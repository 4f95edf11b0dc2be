//! The runtime forms of the level records. Every cross reference is an index
//! in to the matching `MapData` array.

use glam::Vec2;
use wad::types::{GL_VERTEX_FLAG, NO_TEXTURE};

use crate::LineDefFlags;

/// A vertex id as used by GL segments. Bit 31 picks the GL vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexId(pub u32);

impl VertexId {
    pub const fn regular(index: u32) -> Self {
        Self(index)
    }

    pub const fn gl(index: u32) -> Self {
        Self(index | GL_VERTEX_FLAG)
    }

    pub const fn is_gl(self) -> bool {
        self.0 & GL_VERTEX_FLAG != 0
    }

    /// Index in to the vertex list the id belongs to
    pub const fn index(self) -> usize {
        (self.0 & !GL_VERTEX_FLAG) as usize
    }
}

/// The SECTORS record, at runtime.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Sector {
    /// An incremented "ID" of sorts.
    pub num: usize,
    pub floorheight: f32,
    pub ceilingheight: f32,
    /// Name of the floor flat
    pub floorpic: String,
    /// Name of the ceiling flat
    pub ceilingpic: String,
    /// Clamped to 0-255
    pub lightlevel: u8,
    pub special: i16,
    pub tag: i16,
    /// Every sidedef facing this sector
    pub sidedefs: Vec<usize>,
}

impl Sector {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        num: usize,
        floorheight: f32,
        ceilingheight: f32,
        floorpic: &str,
        ceilingpic: &str,
        lightlevel: i16,
        special: i16,
        tag: i16,
    ) -> Self {
        Self {
            num,
            floorheight,
            ceilingheight,
            floorpic: floorpic.to_owned(),
            ceilingpic: ceilingpic.to_owned(),
            lightlevel: lightlevel.clamp(0, 255) as u8,
            special,
            tag,
            sidedefs: Vec::new(),
        }
    }

    /// A closed door or crusher, floor and ceiling at the same height
    pub fn is_closed(&self) -> bool {
        self.floorheight == self.ceilingheight
    }
}

/// The texture and sector data for one side of a `LineDef`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SideDef {
    pub num: usize,
    pub textureoffset: f32,
    pub rowoffset: f32,
    pub toptexture: Option<String>,
    pub bottomtexture: Option<String>,
    pub midtexture: Option<String>,
    /// Sector the SideDef is facing.
    pub sector: usize,
    /// Set once the owning linedef is loaded
    pub linedef: Option<usize>,
    /// The sidedef on the other side of a two sided line
    pub partner: Option<usize>,
}

impl SideDef {
    pub fn new(
        num: usize,
        textureoffset: f32,
        rowoffset: f32,
        toptexture: &str,
        bottomtexture: &str,
        midtexture: &str,
        sector: usize,
    ) -> Self {
        Self {
            num,
            textureoffset,
            rowoffset,
            toptexture: texture_name(toptexture),
            bottomtexture: texture_name(bottomtexture),
            midtexture: texture_name(midtexture),
            sector,
            linedef: None,
            partner: None,
        }
    }
}

fn texture_name(name: &str) -> Option<String> {
    let name = name.trim_end_matches('\u{0}');
    if name.is_empty() || name == NO_TEXTURE {
        None
    } else {
        Some(name.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineDef {
    pub num: usize,
    /// The line starts from this point
    pub v1: Vec2,
    /// The line ends at this point
    pub v2: Vec2,
    /// See `LineDefFlags`
    pub flags: u32,
    pub special: i16,
    pub tag: i16,
    /// The right side
    pub front_sidedef: Option<usize>,
    /// The left side, if the line is two sided
    pub back_sidedef: Option<usize>,
    /// The only sidedef if the line has one side. A one sided line is a solid
    /// wall, nothing can be seen or reached through it.
    pub onesided: Option<usize>,
}

impl LineDef {
    pub fn block_player(&self) -> bool {
        LineDefFlags::Blocking.is_set(self.flags)
    }

    pub fn is_twosided(&self) -> bool {
        self.front_sidedef.is_some() && self.back_sidedef.is_some()
    }

    /// Both sides, front first
    pub fn sides(&self) -> impl Iterator<Item = usize> {
        self.front_sidedef.into_iter().chain(self.back_sidedef)
    }
}

/// A GL segment. Mini-segs along partition lines have no linedef, sidedef or
/// sector.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub num: usize,
    pub v1: Vec2,
    pub v2: Vec2,
    pub start: VertexId,
    pub end: VertexId,
    pub linedef: Option<usize>,
    pub sidedef: Option<usize>,
    /// Sector of the sidedef, the sector this seg faces
    pub sector: Option<usize>,
    /// 0 (front/right) or 1 (back/left)
    pub side: u16,
    /// The seg on the other side, in the neighbouring subsector
    pub partner: Option<usize>,
}

impl Segment {
    pub fn is_miniseg(&self) -> bool {
        self.linedef.is_none()
    }
}

/// A convex polygon bound to exactly one sector.
#[derive(Debug, Clone, PartialEq)]
pub struct SubSector {
    pub num: usize,
    pub sector: usize,
    /// Index of the first segment
    pub start_seg: usize,
    pub seg_count: usize,
    /// The polygon, in segment order. Open, the closing vertex is not repeated.
    pub vertexes: Vec<Vec2>,
}

impl SubSector {
    pub fn segment_range(&self) -> std::ops::Range<usize> {
        self.start_seg..self.start_seg + self.seg_count
    }
}
