//! Decoded level records, in WAD order:
//!  - Thing
//!  - LineDef
//!  - SideDef
//!  - Vertex
//!  - Sector
//!  - GL_VERT
//!  - GL_SEGS
//!  - GL_SSECT
//!
//! These arrive already decoded from whatever reads the lumps. Field meanings
//! are kept as close to the lump layout as possible so that a dump of a real
//! level maps across one to one.

use serde::{Deserialize, Serialize};

/// Set on a vertex id used by a `WadGlSegment` when the id refers to the GL
/// (BSP generated) vertex list instead of the regular `VERTEXES` list.
pub const GL_VERTEX_FLAG: u32 = 1 << 31;

/// The texture name Doom uses for "no texture here"
pub const NO_TEXTURE: &str = "-";

/// Player 1 start. Mandatory in every level.
pub const PLAYER_ONE_START: i16 = 1;

/// A `Thing` describes only the position, type, and angle + spawn flags
///
/// | Field Size | Data Type | Content    |
/// |------------|-----------|------------|
/// |  0x00-0x01 |    i16    | X Position |
/// |  0x02-0x03 |    i16    | Y Position |
/// |  0x04-0x05 |    i16    | Angle      |
/// |  0x06-0x07 |    i16    | Type       |
/// |  0x08-0x09 |    i16    | Flags      |
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct WadThing {
    pub x: i16,
    pub y: i16,
    #[serde(default)]
    pub angle: i16,
    pub kind: i16,
    #[serde(default)]
    pub flags: i16,
}

impl WadThing {
    pub fn new(x: i16, y: i16, angle: i16, kind: i16, flags: i16) -> WadThing {
        WadThing {
            x,
            y,
            angle,
            kind,
            flags,
        }
    }
}

/// A `Vertex` is the basic struct used for any type of coordinate in the level
///
/// | Field Size | Data Type | Content      |
/// |------------|-----------|--------------|
/// |  0x00-0x01 |    i16    | X Coordinate |
/// |  0x02-0x03 |    i16    | Y Coordinate |
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct WadVertex {
    pub x: f32,
    pub y: f32,
}

impl WadVertex {
    pub fn new(x: f32, y: f32) -> WadVertex {
        WadVertex { x, y }
    }
}

/// A vertex created by the nodes builder while splitting lines. Stored as
/// 16.16 fixed point.
///
/// | Field Size | Data Type | Content               |
/// |------------|-----------|-----------------------|
/// |  0x00-0x03 |    i32    | X Coordinate (fixed)  |
/// |  0x04-0x07 |    i32    | Y Coordinate (fixed)  |
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct WadGlVertex {
    pub x: i32,
    pub y: i32,
}

impl WadGlVertex {
    pub fn new(x: i32, y: i32) -> WadGlVertex {
        WadGlVertex { x, y }
    }
}

/// Each linedef represents a line from one of the VERTEXES to another.
///
///| Field Size | Data Type      | Content                                   |
///|------------|----------------|-------------------------------------------|
///|  0x00-0x01 | Unsigned short | Start vertex                              |
///|  0x02-0x03 | Unsigned short | End vertex                                |
///|  0x04-0x05 | Unsigned short | Flags                                     |
///|  0x06-0x07 | Unsigned short | Line type / Action                        |
///|  0x08-0x09 | Unsigned short | Sector tag                                |
///|  0x10-0x11 | Unsigned short | Front sidedef ( 0xFFFF side not present ) |
///|  0x12-0x13 | Unsigned short | Back sidedef  ( 0xFFFF side not present ) |
///
/// A line normally has at least a front side. The `0xFFFF` sentinel is
/// expected to be turned in to `None` by the decoder.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct WadLineDef {
    /// The line starts from this point
    pub start_vertex: u16,
    /// The line ends at this point
    pub end_vertex: u16,
    /// The line attributes, see `LineDefFlags`
    #[serde(default)]
    pub flags: u16,
    #[serde(default)]
    pub special: i16,
    /// Ties this line's effect type to all SECTORS with the same tag
    #[serde(default)]
    pub sector_tag: i16,
    /// The front (right) `SideDef` for this line
    pub front_sidedef: Option<u16>,
    /// The back (left) `SideDef` for this line
    pub back_sidedef: Option<u16>,
}

impl WadLineDef {
    pub fn new(
        start_vertex: u16,
        end_vertex: u16,
        flags: u16,
        special: i16,
        sector_tag: i16,
        front_sidedef: Option<u16>,
        back_sidedef: Option<u16>,
    ) -> WadLineDef {
        WadLineDef {
            start_vertex,
            end_vertex,
            flags,
            special,
            sector_tag,
            front_sidedef,
            back_sidedef,
        }
    }
}

/// A sidedef is a definition of what wall texture(s) to draw along a
/// `LineDef`, and a group of sidedefs outline the space of a `Sector`
///
/// Each `SideDef` record is 30 bytes
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct WadSideDef {
    #[serde(default)]
    pub x_offset: i16,
    #[serde(default)]
    pub y_offset: i16,
    /// Name of upper texture used for example in the upper of a window
    #[serde(default)]
    pub upper_tex: String,
    /// Name of lower texture used for example in the front of a step
    #[serde(default)]
    pub lower_tex: String,
    /// The regular part of a wall
    #[serde(default)]
    pub middle_tex: String,
    /// Sector that this sidedef faces or helps to surround
    pub sector: u16,
}

impl WadSideDef {
    pub fn new(
        x_offset: i16,
        y_offset: i16,
        upper_tex: &str,
        lower_tex: &str,
        middle_tex: &str,
        sector: u16,
    ) -> WadSideDef {
        WadSideDef {
            x_offset,
            y_offset,
            // better to address this early to avoid many trims later
            upper_tex: upper_tex.trim_end_matches('\u{0}').to_owned(),
            lower_tex: lower_tex.trim_end_matches('\u{0}').to_owned(),
            middle_tex: middle_tex.trim_end_matches('\u{0}').to_owned(),
            sector,
        }
    }
}

/// A `Sector` is a horizontal (east-west and north-south) area of the level
/// where a floor height and ceiling height is defined.
///
/// Each `Sector` record is 26 bytes
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct WadSector {
    pub floor_height: i16,
    pub ceil_height: i16,
    /// Floor texture name
    pub floor_tex: String,
    /// Ceiling texture name
    pub ceil_tex: String,
    /// Light level from 0-255
    pub light_level: i16,
    /// This determines some area-effects called special sectors
    #[serde(default)]
    pub kind: i16,
    /// a "tag" number corresponding to LINEDEF(s) with the same tag
    #[serde(default)]
    pub tag: i16,
}

impl WadSector {
    pub fn new(
        floor_height: i16,
        ceil_height: i16,
        floor_tex: &str,
        ceil_tex: &str,
        light_level: i16,
        kind: i16,
        tag: i16,
    ) -> WadSector {
        WadSector {
            floor_height,
            ceil_height,
            floor_tex: floor_tex.trim_end_matches('\u{0}').to_owned(),
            ceil_tex: ceil_tex.trim_end_matches('\u{0}').to_owned(),
            light_level,
            kind,
            tag,
        }
    }
}

/// A segment of a GL subsector. Unlike the vanilla `SEGS` these form closed
/// convex polygons, and include the "mini-segs" that run along partition
/// lines without any wall behind them.
///
/// | Field Size | Data Type | Content                                               |
/// |------------|-----------|-------------------------------------------------------|
/// |  0x00-0x03 |    u32    | Start vertex, bit 31 set if a GL vertex               |
/// |  0x04-0x07 |    u32    | End vertex, bit 31 set if a GL vertex                 |
/// |  0x08-0x09 |    u16    | Linedef, `0xFFFF` for a mini-seg                      |
/// |  0x0A-0x0B |    u16    | Side, 0 = front/right, 1 = back/left                  |
/// |  0x0C-0x0F |    u32    | Partner seg on the other side, `0xFFFFFFFF` for none  |
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct WadGlSegment {
    pub start_vertex: u32,
    pub end_vertex: u32,
    /// The Linedef this segment travels along, `None` for a mini-seg
    pub linedef: Option<u16>,
    /// The `side`, 0 = front/right, 1 = back/left
    #[serde(default)]
    pub side: u16,
    /// The seg running the opposite direction in the neighbouring subsector
    pub partner: Option<u32>,
}

impl WadGlSegment {
    pub fn new(
        start_vertex: u32,
        end_vertex: u32,
        linedef: Option<u16>,
        side: u16,
        partner: Option<u32>,
    ) -> WadGlSegment {
        WadGlSegment {
            start_vertex,
            end_vertex,
            linedef,
            side,
            partner,
        }
    }
}

/// A `SubSector` divides up all the SECTORS into convex polygons.
///
/// | Field Size | Data Type | Content                            |
/// |------------|-----------|------------------------------------|
/// |  0x00-0x03 |    u32    | How many segments line this sector |
/// |  0x04-0x07 |    u32    | Index to the starting segment      |
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct WadSubSector {
    /// How many `Segment`s line this `SubSector`
    pub seg_count: u32,
    /// The `Segment` to start with
    pub start_seg: u32,
}

impl WadSubSector {
    pub fn new(seg_count: u32, start_seg: u32) -> WadSubSector {
        WadSubSector {
            seg_count,
            start_seg,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WadColour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl WadColour {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The colours for indexed pictures. Doom's PLAYPAL holds 14 of these, only
/// the first is of any use for converting.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct WadPalette {
    pub colours: Vec<WadColour>,
}

impl WadPalette {
    pub fn new(colours: Vec<WadColour>) -> Self {
        Self { colours }
    }

    /// Indexes past the end of a short palette come back black
    pub fn colour(&self, index: u8) -> WadColour {
        self.colours
            .get(index as usize)
            .copied()
            .unwrap_or_default()
    }
}

/// A flat or a composed wall texture. `pixels` are palette indexes stored row
/// by row.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct WadPicture {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl WadPicture {
    pub fn new(name: &str, width: usize, height: usize, pixels: Vec<u8>) -> Self {
        if pixels.len() != width * height {
            panic!(
                "picture {} has {} pixels, expected {}x{}",
                name,
                pixels.len(),
                width,
                height
            );
        }
        Self {
            name: name.to_owned(),
            width,
            height,
            pixels,
        }
    }

    /// Integer mean of each channel over every pixel. An empty picture is black.
    pub fn average_colour(&self, palette: &WadPalette) -> WadColour {
        if self.pixels.is_empty() {
            return WadColour::default();
        }
        let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
        for &p in &self.pixels {
            let c = palette.colour(p);
            r += c.r as u64;
            g += c.g as u64;
            b += c.b as u64;
        }
        let count = self.pixels.len() as u64;
        WadColour::new((r / count) as u8, (g / count) as u8, (b / count) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidedef_names_trimmed() {
        let side = WadSideDef::new(0, 0, "STARTAN3\0", "-\0\0\0\0\0\0\0", "", 2);
        assert_eq!(side.upper_tex, "STARTAN3");
        assert_eq!(side.lower_tex, NO_TEXTURE);
        assert_eq!(side.middle_tex, "");
        assert_eq!(side.sector, 2);
    }

    #[test]
    fn average_of_two_colours() {
        let palette = WadPalette::new(vec![WadColour::new(0, 0, 0), WadColour::new(200, 100, 51)]);
        let pic = WadPicture::new("TEST", 2, 1, vec![0, 1]);
        assert_eq!(pic.average_colour(&palette), WadColour::new(100, 50, 25));
    }

    #[test]
    fn short_palette_is_black() {
        let palette = WadPalette::new(vec![WadColour::new(1, 2, 3)]);
        assert_eq!(palette.colour(0), WadColour::new(1, 2, 3));
        let pic = WadPicture::new("TEST", 1, 1, vec![9]);
        assert_eq!(pic.average_colour(&palette), WadColour::new(0, 0, 0));
    }

    #[test]
    #[should_panic]
    fn picture_size_mismatch() {
        WadPicture::new("BAD", 4, 4, vec![0; 3]);
    }
}
