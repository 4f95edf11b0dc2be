use std::collections::HashMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::LevelSource;
use crate::types::*;

/// A complete level held in plain vectors. Pictures are keyed by upper case
/// name, lookups are case insensitive like the lump directory.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LevelTables {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub vertexes: Vec<WadVertex>,
    #[serde(default)]
    pub gl_vertexes: Vec<WadGlVertex>,
    #[serde(default)]
    pub sectors: Vec<WadSector>,
    #[serde(default)]
    pub sidedefs: Vec<WadSideDef>,
    #[serde(default)]
    pub linedefs: Vec<WadLineDef>,
    #[serde(default)]
    pub gl_segments: Vec<WadGlSegment>,
    #[serde(default)]
    pub gl_subsectors: Vec<WadSubSector>,
    #[serde(default)]
    pub things: Vec<WadThing>,
    #[serde(default)]
    pub palette: WadPalette,
    #[serde(default)]
    flats: HashMap<String, WadPicture>,
    #[serde(default)]
    textures: HashMap<String, WadPicture>,
}

impl LevelTables {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    pub fn add_flat(&mut self, pic: WadPicture) {
        debug!("{}: Added flat {}", self.name, pic.name);
        self.flats.insert(pic.name.to_ascii_uppercase(), pic);
    }

    pub fn add_texture(&mut self, pic: WadPicture) {
        debug!("{}: Added texture {}", self.name, pic.name);
        self.textures.insert(pic.name.to_ascii_uppercase(), pic);
    }

    pub fn num_flats(&self) -> usize {
        self.flats.len()
    }

    pub fn num_textures(&self) -> usize {
        self.textures.len()
    }

    /// Normalise the picture keys after deserialising, dumps may use any case
    pub fn normalise(&mut self) {
        self.flats = self
            .flats
            .drain()
            .map(|(k, v)| (k.to_ascii_uppercase(), v))
            .collect();
        self.textures = self
            .textures
            .drain()
            .map(|(k, v)| (k.to_ascii_uppercase(), v))
            .collect();
        info!(
            "{}: {} vertexes, {} gl vertexes, {} sectors, {} sidedefs, {} linedefs, {} segs, {} subsectors, {} things, {} flats, {} textures",
            self.name,
            self.vertexes.len(),
            self.gl_vertexes.len(),
            self.sectors.len(),
            self.sidedefs.len(),
            self.linedefs.len(),
            self.gl_segments.len(),
            self.gl_subsectors.len(),
            self.things.len(),
            self.num_flats(),
            self.num_textures(),
        );
    }
}

impl LevelSource for LevelTables {
    fn vertex_iter(&self) -> impl Iterator<Item = WadVertex> + '_ {
        self.vertexes.iter().copied()
    }

    fn gl_vertex_iter(&self) -> impl Iterator<Item = WadGlVertex> + '_ {
        self.gl_vertexes.iter().copied()
    }

    fn sector_iter(&self) -> impl Iterator<Item = WadSector> + '_ {
        self.sectors.iter().cloned()
    }

    fn sidedef_iter(&self) -> impl Iterator<Item = WadSideDef> + '_ {
        self.sidedefs.iter().cloned()
    }

    fn linedef_iter(&self) -> impl Iterator<Item = WadLineDef> + '_ {
        self.linedefs.iter().cloned()
    }

    fn gl_segment_iter(&self) -> impl Iterator<Item = WadGlSegment> + '_ {
        self.gl_segments.iter().cloned()
    }

    fn gl_subsector_iter(&self) -> impl Iterator<Item = WadSubSector> + '_ {
        self.gl_subsectors.iter().cloned()
    }

    fn thing_iter(&self) -> impl Iterator<Item = WadThing> + '_ {
        self.things.iter().copied()
    }

    fn palette(&self) -> &WadPalette {
        &self.palette
    }

    fn flat(&self, name: &str) -> Option<&WadPicture> {
        self.flats.get(&name.to_ascii_uppercase())
    }

    fn texture(&self, name: &str) -> Option<&WadPicture> {
        self.textures.get(&name.to_ascii_uppercase())
    }
}
