//! Hand built levels. Coordinates are picked so that with the default 1/24
//! scale every vertex lands exactly on a grid line.
//!
//! The palette colours are copies of wool colours so the converted colours
//! are predictable:
//!
//! | Picture    | Palette | Colour     |
//! |------------|---------|------------|
//! | `FLOOR4_8` | 1       | orange     |
//! | `CEIL3_5`  | 2       | light blue |
//! | `STARTAN3` | 3       | lime       |
//! | `STEP1`    | 4       | red        |
//! | `BROWN1`   | 5       | brown      |
//! | `MIDGRATE` | 6       | purple     |
//! | `F_SKY1`   | 2       | light blue |

use crate::LevelTables;
use crate::types::*;

pub const FLOOR_FLAT: &str = "FLOOR4_8";
pub const CEIL_FLAT: &str = "CEIL3_5";
pub const SKY_FLAT: &str = "F_SKY1";
pub const WALL_TEX: &str = "STARTAN3";
pub const LOWER_TEX: &str = "STEP1";
pub const UPPER_TEX: &str = "BROWN1";
pub const MID_TEX: &str = "MIDGRATE";

/// Bit 0 of the linedef flags, blocks players and monsters
pub const ML_BLOCKING: u16 = 1;
/// Bit 2 of the linedef flags
pub const ML_TWOSIDED: u16 = 1 << 2;

/// Builder for small levels. Every call returns the index of what was added.
pub struct TestLevel {
    tables: LevelTables,
}

impl TestLevel {
    pub fn new(name: &str) -> Self {
        let mut tables = LevelTables::new(name);
        tables.palette = WadPalette::new(vec![
            WadColour::new(0, 0, 0),
            WadColour::new(219, 125, 62),
            WadColour::new(107, 138, 201),
            WadColour::new(65, 174, 56),
            WadColour::new(150, 52, 48),
            WadColour::new(79, 50, 31),
            WadColour::new(126, 61, 181),
        ]);
        for (name, colour) in [(FLOOR_FLAT, 1), (CEIL_FLAT, 2), (SKY_FLAT, 2)] {
            tables.add_flat(WadPicture::new(name, 2, 2, vec![colour; 4]));
        }
        for (name, colour) in [(WALL_TEX, 3), (LOWER_TEX, 4), (UPPER_TEX, 5), (MID_TEX, 6)] {
            tables.add_texture(WadPicture::new(name, 2, 2, vec![colour; 4]));
        }
        Self { tables }
    }

    pub fn vertex(&mut self, x: f32, y: f32) -> u16 {
        self.tables.vertexes.push(WadVertex::new(x, y));
        (self.tables.vertexes.len() - 1) as u16
    }

    /// Returns the id a segment uses to refer to the new GL vertex
    pub fn gl_vertex(&mut self, x: f32, y: f32) -> u32 {
        self.tables
            .gl_vertexes
            .push(WadGlVertex::new((x * 65536.0) as i32, (y * 65536.0) as i32));
        (self.tables.gl_vertexes.len() - 1) as u32 | GL_VERTEX_FLAG
    }

    pub fn sector(&mut self, floor: i16, ceiling: i16, floor_tex: &str, ceil_tex: &str) -> u16 {
        self.tables
            .sectors
            .push(WadSector::new(floor, ceiling, floor_tex, ceil_tex, 160, 0, 0));
        (self.tables.sectors.len() - 1) as u16
    }

    pub fn side(&mut self, sector: u16, upper: &str, lower: &str, middle: &str) -> u16 {
        self.tables
            .sidedefs
            .push(WadSideDef::new(0, 0, upper, lower, middle, sector));
        (self.tables.sidedefs.len() - 1) as u16
    }

    pub fn line(&mut self, v1: u16, v2: u16, flags: u16, front: u16, back: Option<u16>) -> u16 {
        self.tables
            .linedefs
            .push(WadLineDef::new(v1, v2, flags, 0, 0, Some(front), back));
        (self.tables.linedefs.len() - 1) as u16
    }

    /// Add a subsector from segments `(start, end, linedef, side)`, the
    /// vertex ids are regular ids unless `GL_VERTEX_FLAG` is set
    pub fn subsector(&mut self, segs: &[(u32, u32, Option<u16>, u16)]) -> u32 {
        let start_seg = self.tables.gl_segments.len() as u32;
        for &(v1, v2, linedef, side) in segs {
            self.tables
                .gl_segments
                .push(WadGlSegment::new(v1, v2, linedef, side, None));
        }
        self.tables
            .gl_subsectors
            .push(WadSubSector::new(segs.len() as u32, start_seg));
        (self.tables.gl_subsectors.len() - 1) as u32
    }

    pub fn partner(&mut self, seg_a: u32, seg_b: u32) {
        self.tables.gl_segments[seg_a as usize].partner = Some(seg_b);
        self.tables.gl_segments[seg_b as usize].partner = Some(seg_a);
    }

    pub fn thing(&mut self, x: i16, y: i16, kind: i16) {
        self.tables.things.push(WadThing::new(x, y, 90, kind, 7));
    }

    pub fn build(self) -> LevelTables {
        self.tables
    }
}

/// A single sector box, `width` by `depth` map units, walled on all four
/// sides, one subsector, player start in the middle.
pub fn rectangle_room(width: f32, depth: f32, floor: i16, ceiling: i16) -> LevelTables {
    let mut level = TestLevel::new("ROOM");
    let v0 = level.vertex(0.0, 0.0);
    let v1 = level.vertex(width, 0.0);
    let v2 = level.vertex(width, depth);
    let v3 = level.vertex(0.0, depth);
    let sector = level.sector(floor, ceiling, FLOOR_FLAT, CEIL_FLAT);

    // Clockwise, so the front (right) side of each line faces in to the room
    let mut segs = Vec::new();
    for (a, b) in [(v0, v3), (v3, v2), (v2, v1), (v1, v0)] {
        let side = level.side(sector, NO_TEXTURE, NO_TEXTURE, WALL_TEX);
        let line = level.line(a, b, ML_BLOCKING, side, None);
        segs.push((a as u32, b as u32, Some(line), 0));
    }
    level.subsector(&segs);
    level.thing((width / 2.0) as i16, (depth / 2.0) as i16, PLAYER_ONE_START);
    level.build()
}

/// Two sectors side by side, each `half_width` by `depth`, split by a two
/// sided line at `x = half_width`. The left sector is 0, the right is 1. The
/// dividing line is linedef 6 with its front side facing the right sector.
///
/// ```text,ignore
///  v5 ──── v4 ──── v3
///  │   0   │   1   │
///  v0 ──── v1 ──── v2
/// ```
pub struct SplitRoom {
    pub level: TestLevel,
    pub divider: u16,
}

impl SplitRoom {
    pub fn new(
        half_width: f32,
        depth: f32,
        left: (i16, i16, &str),
        right: (i16, i16, &str),
        divider_flags: u16,
        divider_sides: [(&str, &str, &str); 2],
    ) -> Self {
        let mut level = TestLevel::new("SPLIT");
        let v0 = level.vertex(0.0, 0.0);
        let v1 = level.vertex(half_width, 0.0);
        let v2 = level.vertex(half_width * 2.0, 0.0);
        let v3 = level.vertex(half_width * 2.0, depth);
        let v4 = level.vertex(half_width, depth);
        let v5 = level.vertex(0.0, depth);

        let s0 = level.sector(left.0, left.1, FLOOR_FLAT, left.2);
        let s1 = level.sector(right.0, right.1, FLOOR_FLAT, right.2);

        let wall = |level: &mut TestLevel, a: u16, b: u16, sector: u16| {
            let side = level.side(sector, NO_TEXTURE, NO_TEXTURE, WALL_TEX);
            level.line(a, b, ML_BLOCKING, side, None)
        };
        let l0 = wall(&mut level, v0, v5, s0);
        let l1 = wall(&mut level, v5, v4, s0);
        let l2 = wall(&mut level, v4, v3, s1);
        let l3 = wall(&mut level, v3, v2, s1);
        let l4 = wall(&mut level, v2, v1, s1);
        let l5 = wall(&mut level, v1, v0, s0);

        let [front, back] = divider_sides;
        let front = level.side(s1, front.0, front.1, front.2);
        let back = level.side(s0, back.0, back.1, back.2);
        let divider = level.line(v1, v4, divider_flags | ML_TWOSIDED, front, Some(back));

        let (v0, v1, v2, v3, v4, v5) = (
            v0 as u32, v1 as u32, v2 as u32, v3 as u32, v4 as u32, v5 as u32,
        );
        level.subsector(&[
            (v0, v5, Some(l0), 0),
            (v5, v4, Some(l1), 0),
            (v4, v1, Some(divider), 1),
            (v1, v0, Some(l5), 0),
        ]);
        level.subsector(&[
            (v1, v4, Some(divider), 0),
            (v4, v3, Some(l2), 0),
            (v3, v2, Some(l3), 0),
            (v2, v1, Some(l4), 0),
        ]);
        level.partner(2, 4);
        level.thing((half_width / 2.0) as i16, (depth / 2.0) as i16, PLAYER_ONE_START);

        Self { level, divider }
    }

    pub fn build(self) -> LevelTables {
        self.level.build()
    }
}
