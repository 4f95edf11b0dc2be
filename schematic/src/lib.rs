//! A dense block volume plus the metadata a schematic needs: the size, two
//! bytes per block, and an optional centre point.
//!
//! Blocks are stored ordered Y, Z, X with X varying fastest, the same layout
//! the schematic byte arrays use, so they can be framed without copying.

mod blocks;

use glam::UVec3;
use log::debug;

pub use blocks::{BLACK_WOOL, BlockKind, WOOL_COLOURS};

/// One block: the block id and its data value (the colour for wool)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Voxel {
    pub block: u8,
    pub data: u8,
}

impl Voxel {
    pub const fn new(kind: BlockKind, data: u8) -> Self {
        Self {
            block: kind as u8,
            data,
        }
    }

    pub const fn wool(colour: u8) -> Self {
        Self::new(BlockKind::Wool, colour)
    }

    pub const fn kind(&self) -> Option<BlockKind> {
        BlockKind::from_id(self.block)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schematic {
    size: UVec3,
    blocks: Vec<u8>,
    data: Vec<u8>,
    centre: Option<UVec3>,
}

impl Schematic {
    /// An empty (all air) volume of `size` blocks
    pub fn new(size: UVec3) -> Self {
        let len = size.x as usize * size.y as usize * size.z as usize;
        debug!("Schematic {}x{}x{}, {} blocks", size.x, size.y, size.z, len);
        Self {
            size,
            blocks: vec![0; len],
            data: vec![0; len],
            centre: None,
        }
    }

    pub const fn size(&self) -> UVec3 {
        self.size
    }

    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as u32) < self.size.x
            && (y as u32) < self.size.y
            && (z as u32) < self.size.z
    }

    /// # Panics
    /// If the position is outside the volume
    fn index(&self, x: i32, y: i32, z: i32) -> usize {
        if !self.contains(x, y, z) {
            panic!(
                "Block ({}, {}, {}) is outside the {}x{}x{} schematic",
                x, y, z, self.size.x, self.size.y, self.size.z
            );
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        (y * self.size.z as usize + z) * self.size.x as usize + x
    }

    /// # Panics
    /// If the position is outside the volume
    pub fn get(&self, x: i32, y: i32, z: i32) -> Voxel {
        let i = self.index(x, y, z);
        Voxel {
            block: self.blocks[i],
            data: self.data[i],
        }
    }

    /// # Panics
    /// If the position is outside the volume
    pub fn set(&mut self, x: i32, y: i32, z: i32, voxel: Voxel) {
        let i = self.index(x, y, z);
        self.blocks[i] = voxel.block;
        self.data[i] = voxel.data;
    }

    /// Change the block id only, the data byte is left as it was
    ///
    /// # Panics
    /// If the position is outside the volume
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, kind: BlockKind) {
        let i = self.index(x, y, z);
        self.blocks[i] = kind.id();
    }

    /// Block ids, Y then Z then X order
    pub fn blocks(&self) -> &[u8] {
        &self.blocks
    }

    /// Data values, in the same order as `blocks()`
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub const fn centre(&self) -> Option<UVec3> {
        self.centre
    }

    /// # Panics
    /// If the centre is outside the volume
    pub fn set_centre(&mut self, centre: UVec3) {
        if centre.cmpge(self.size).any() {
            panic!(
                "Centre {} is outside the {}x{}x{} schematic",
                centre, self.size.x, self.size.y, self.size.z
            );
        }
        self.centre = Some(centre);
    }

    /// How many blocks of each id the volume holds, air included
    pub fn block_counts(&self) -> [usize; 256] {
        let mut counts = [0; 256];
        for b in &self.blocks {
            counts[*b as usize] += 1;
        }
        counts
    }

    /// Reflect the volume end to end along Z, so `z` swaps with
    /// `size.z - 1 - z`. The centre is reflected with it.
    pub fn mirror_z(&mut self) {
        let row = self.size.x as usize;
        let depth = self.size.z as usize;
        if row == 0 || depth < 2 {
            return;
        }
        for layer in 0..self.size.y as usize {
            let base = layer * depth * row;
            for z in 0..depth / 2 {
                let a = base + z * row;
                let b = base + (depth - 1 - z) * row;
                for arr in [&mut self.blocks, &mut self.data] {
                    let (lo, hi) = arr.split_at_mut(b);
                    lo[a..a + row].swap_with_slice(&mut hi[..row]);
                }
            }
        }
        if let Some(centre) = self.centre.as_mut() {
            centre.z = self.size.z - 1 - centre.z;
        }
    }
}
