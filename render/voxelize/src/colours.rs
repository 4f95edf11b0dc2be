//! Match flats and textures to the closest wool colour.
//!
//! A picture is reduced to its average colour, then compared against the
//! wool colours in CIE L*a*b* (D65 white) using the plain Euclidean distance
//! (CIE76). Black wool is never a candidate.

use std::collections::HashMap;

use glam::{Mat3, Vec3};
use log::{debug, warn};
use schematic::{BLACK_WOOL, WOOL_COLOURS};
use wad::LevelSource;
use wad::types::{WadColour, WadPicture};

/// Used for anything that can't be looked up
pub const DEFAULT_COLOUR: u8 = 0;

const D65_WHITE: Vec3 = Vec3::new(0.950_47, 1.0, 1.088_83);

/// Linear sRGB to XYZ, columns are R, G, B
const SRGB_TO_XYZ: Mat3 = Mat3::from_cols(
    Vec3::new(0.412_456_4, 0.212_672_9, 0.019_333_9),
    Vec3::new(0.357_576_1, 0.715_152_2, 0.119_192_0),
    Vec3::new(0.180_437_5, 0.072_175_0, 0.950_304_1),
);

fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f32) -> f32 {
    const DELTA: f32 = 6.0 / 29.0;
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

/// sRGB bytes to `(L, a, b)`
pub fn rgb_to_lab(rgb: [u8; 3]) -> Vec3 {
    let linear = Vec3::new(
        srgb_to_linear(rgb[0]),
        srgb_to_linear(rgb[1]),
        srgb_to_linear(rgb[2]),
    );
    let xyz = SRGB_TO_XYZ * linear / D65_WHITE;
    let (fx, fy, fz) = (lab_f(xyz.x), lab_f(xyz.y), lab_f(xyz.z));
    Vec3::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// The wool colour index closest to `colour`. Ties go to the lower index.
pub fn closest_wool(colour: WadColour) -> u8 {
    let lab = rgb_to_lab([colour.r, colour.g, colour.b]);
    let mut best = DEFAULT_COLOUR;
    let mut best_dist = f32::INFINITY;
    for (i, (_, rgb)) in WOOL_COLOURS.iter().enumerate() {
        if i as u8 == BLACK_WOOL {
            continue;
        }
        let dist = lab.distance(rgb_to_lab(*rgb));
        if dist < best_dist {
            best = i as u8;
            best_dist = dist;
        }
    }
    best
}

/// Memoised colour lookups for one level. Flats and textures live in
/// separate namespaces so each gets its own cache, keyed by upper case name.
pub struct ColourClassifier<'a, S: LevelSource> {
    source: &'a S,
    flats: HashMap<String, u8>,
    textures: HashMap<String, u8>,
}

impl<'a, S: LevelSource> ColourClassifier<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            flats: HashMap::new(),
            textures: HashMap::new(),
        }
    }

    fn classify(&self, picture: &WadPicture) -> u8 {
        let average = picture.average_colour(self.source.palette());
        let colour = closest_wool(average);
        debug!(
            "Mapped {} ({}, {}, {}) to {} wool",
            picture.name, average.r, average.g, average.b, WOOL_COLOURS[colour as usize].0
        );
        colour
    }

    pub fn flat(&mut self, name: &str) -> u8 {
        let key = name.to_ascii_uppercase();
        if let Some(colour) = self.flats.get(&key) {
            return *colour;
        }
        let colour = match self.source.flat(name) {
            Some(picture) => self.classify(picture),
            None => {
                warn!("Unable to find flat {}", name);
                DEFAULT_COLOUR
            }
        };
        self.flats.insert(key, colour);
        colour
    }

    pub fn texture(&mut self, name: &str) -> u8 {
        let key = name.to_ascii_uppercase();
        if let Some(colour) = self.textures.get(&key) {
            return *colour;
        }
        let colour = match self.source.texture(name) {
            Some(picture) => self.classify(picture),
            None => {
                warn!("Unable to find texture {}", name);
                DEFAULT_COLOUR
            }
        };
        self.textures.insert(key, colour);
        colour
    }

    pub fn num_cached(&self) -> usize {
        self.flats.len() + self.textures.len()
    }
}
