use std::collections::BTreeMap;

use glam::IVec2;
use level::{MapData, SubSector};
use math::{GridTransform, Line};

use crate::ConvertError;

/// One raster cell: everything whose geometry passes over this `(x, z)`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Pixel {
    /// Sectors covering the cell, in the order they were first seen
    pub sectors: Vec<usize>,
    /// Linedefs with a wall crossing the cell
    pub linedefs: Vec<usize>,
    /// Grid Y of the floor voxel, set once the column is rendered as open
    pub floor: Option<i32>,
}

impl Pixel {
    pub fn add_sector(&mut self, sector: usize) {
        if !self.sectors.contains(&sector) {
            self.sectors.push(sector);
        }
    }

    pub fn add_linedef(&mut self, linedef: usize) {
        if !self.linedefs.contains(&linedef) {
            self.linedefs.push(linedef);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty() && self.linedefs.is_empty()
    }
}

/// The level footprint, one `Pixel` per grid column. Sized up front from the
/// grid so nothing grows while rasterizing.
#[derive(Debug, Clone)]
pub struct Raster {
    width: i32,
    depth: i32,
    cells: Vec<Pixel>,
}

impl Raster {
    pub fn new(width: u32, depth: u32) -> Self {
        Self {
            width: width as i32,
            depth: depth as i32,
            cells: vec![Pixel::default(); width as usize * depth as usize],
        }
    }

    fn index(&self, p: IVec2) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.depth {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// `p` is `(x, z)`
    pub fn get(&self, p: IVec2) -> Option<&Pixel> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// # Panics
    /// If `p` is outside the raster
    pub fn get_mut(&mut self, p: IVec2) -> &mut Pixel {
        let Some(i) = self.index(p) else {
            panic!(
                "Raster cell ({}, {}) is outside the {}x{} raster",
                p.x, p.y, self.width, self.depth
            );
        };
        &mut self.cells[i]
    }

    /// Every cell that something touched, X varying fastest
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (IVec2, &mut Pixel)> {
        let width = self.width;
        self.cells
            .iter_mut()
            .enumerate()
            .filter(|(_, p)| !p.is_empty())
            .map(move |(i, p)| (IVec2::new(i as i32 % width, i as i32 / width), p))
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &Pixel)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_empty())
            .map(move |(i, p)| (IVec2::new(i as i32 % width, i as i32 / width), p))
    }
}

/// Trace the border of a convex subsector in to the raster, then fill
/// between the borders.
///
/// Segments run clockwise, so one heading towards +X in level space is on the
/// top (largest Z) of the polygon and one heading towards -X on the bottom.
/// For each column X the top keeps the largest Z traced and the bottom the
/// smallest, and every cell from bottom to top inclusive gets the sector.
///
/// Walls are recorded on every traced cell of a segment that has a sidedef.
/// Mini-segs only bound the fill.
pub fn rasterize_subsector(
    raster: &mut Raster,
    map: &MapData,
    subsector: &SubSector,
    transform: &GridTransform,
) -> Result<(), ConvertError> {
    let mut top: BTreeMap<i32, i32> = BTreeMap::new();
    let mut bottom: BTreeMap<i32, i32> = BTreeMap::new();

    for seg in map.subsector_segments(subsector) {
        let start = transform.to_grid(seg.v1);
        let end = transform.to_grid(seg.v2);
        // Classified in level space so a seg that collapses to a single grid
        // column keeps the side its direction gives it
        let is_top = seg.v2.x >= seg.v1.x;
        let wall = seg.sidedef.and(seg.linedef);

        for p in Line::new(start, end) {
            if let Some(linedef) = wall {
                raster.get_mut(p).add_linedef(linedef);
            }
            if is_top {
                top.entry(p.x)
                    .and_modify(|z| *z = (*z).max(p.y))
                    .or_insert(p.y);
            } else {
                bottom
                    .entry(p.x)
                    .and_modify(|z| *z = (*z).min(p.y))
                    .or_insert(p.y);
            }
        }
    }

    if !top.keys().eq(bottom.keys()) {
        return Err(ConvertError::BorderMismatch {
            subsector: subsector.num,
        });
    }

    for (x, z_top) in top {
        let z_bottom = bottom[&x];
        for z in z_bottom..=z_top {
            raster.get_mut(IVec2::new(x, z)).add_sector(subsector.sector);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use glam::IVec2;
    use level::MapData;
    use math::{GridTransform, ScaleMode};
    use wad::testing::*;
    use wad::types::NO_TEXTURE;

    use super::{Raster, rasterize_subsector};
    use crate::ConvertError;

    fn transform_for(map: &MapData) -> GridTransform {
        let e = map.get_map_extents();
        GridTransform::new(
            e.min_vertex,
            e.max_vertex,
            e.min_floor,
            e.max_ceiling,
            ScaleMode::default(),
            0,
        )
    }

    fn rasterize(map: &MapData) -> Result<Raster, ConvertError> {
        let transform = transform_for(map);
        let size = transform.grid_size();
        let mut raster = Raster::new(size.x, size.z);
        for ss in map.subsectors() {
            rasterize_subsector(&mut raster, map, ss, &transform)?;
        }
        Ok(raster)
    }

    #[test]
    fn square_fills_footprint() {
        // 10 blocks a side, both edges land in the raster
        let map = MapData::load("SQUARE", &rectangle_room(240.0, 240.0, 0, 128)).unwrap();
        let raster = rasterize(&map).unwrap();
        let filled = raster.iter().filter(|(_, p)| !p.sectors.is_empty()).count();
        assert_eq!(filled, 11 * 11);
        for (_, p) in raster.iter() {
            assert_eq!(p.sectors, vec![0]);
        }
    }

    #[test]
    fn walls_only_on_border() {
        let map = MapData::load("ROOM", &rectangle_room(240.0, 192.0, 0, 128)).unwrap();
        let raster = rasterize(&map).unwrap();
        let mut walls = 0;
        for (p, pixel) in raster.iter() {
            let border = p.x == 0 || p.x == 10 || p.y == 0 || p.y == 8;
            assert_eq!(!pixel.linedefs.is_empty(), border, "{p}");
            if border {
                walls += 1;
            }
        }
        assert_eq!(walls, 36);
        // corners touch two walls
        assert_eq!(raster.get(IVec2::new(0, 0)).unwrap().linedefs.len(), 2);
        assert_eq!(raster.get(IVec2::new(5, 0)).unwrap().linedefs, vec![3]);
    }

    #[test]
    fn split_room_shares_divider_column() {
        let split = SplitRoom::new(
            96.0,
            96.0,
            (0, 128, CEIL_FLAT),
            (24, 128, CEIL_FLAT),
            0,
            [(NO_TEXTURE, NO_TEXTURE, NO_TEXTURE); 2],
        );
        let divider = split.divider as usize;
        let map = MapData::load("SPLIT", &split.build()).unwrap();
        let raster = rasterize(&map).unwrap();
        assert_eq!(raster.get(IVec2::new(2, 2)).unwrap().sectors, vec![0]);
        assert_eq!(raster.get(IVec2::new(6, 2)).unwrap().sectors, vec![1]);
        let shared = raster.get(IVec2::new(4, 2)).unwrap();
        assert_eq!(shared.sectors, vec![0, 1]);
        assert_eq!(shared.linedefs, vec![divider]);
        assert_eq!(divider, 6);
    }

    #[test]
    fn minisegs_bound_without_walls() {
        let mut level = TestLevel::new("TRI");
        let v0 = level.vertex(0.0, 0.0);
        let v1 = level.vertex(0.0, 96.0);
        let sector = level.sector(0, 128, FLOOR_FLAT, CEIL_FLAT);
        let side = level.side(sector, NO_TEXTURE, NO_TEXTURE, WALL_TEX);
        let line = level.line(v0, v1, ML_BLOCKING, side, None);
        let g = level.gl_vertex(96.0, 0.0);
        level.subsector(&[
            (v0 as u32, v1 as u32, Some(line), 0),
            (v1 as u32, g, None, 0),
            (g, v0 as u32, None, 0),
        ]);
        let map = MapData::load("TRI", &level.build()).unwrap();
        let raster = rasterize(&map).unwrap();

        // the hypotenuse runs from (0, 4) to (4, 0)
        for x in 0..=4 {
            let top = 4 - x;
            for z in 0..=top {
                let p = raster.get(IVec2::new(x, z)).unwrap();
                assert_eq!(p.sectors, vec![0]);
                assert_eq!(p.linedefs.is_empty(), x != 0);
            }
            if top < 4 {
                assert!(raster.get(IVec2::new(x, top + 1)).unwrap().is_empty());
            }
        }
    }

    #[test]
    fn degenerate_subsector_mismatch() {
        let mut level = TestLevel::new("SLIVER");
        let v0 = level.vertex(0.0, 0.0);
        let v1 = level.vertex(0.0, 96.0);
        let sector = level.sector(0, 128, FLOOR_FLAT, CEIL_FLAT);
        let side = level.side(sector, NO_TEXTURE, NO_TEXTURE, WALL_TEX);
        let line = level.line(v0, v1, ML_BLOCKING, side, None);
        level.subsector(&[
            (v0 as u32, v1 as u32, Some(line), 0),
            (v1 as u32, v0 as u32, None, 0),
        ]);
        let map = MapData::load("SLIVER", &level.build()).unwrap();
        let err = rasterize(&map).unwrap_err();
        assert_eq!(err, ConvertError::BorderMismatch { subsector: 0 });
    }

    #[test]
    #[should_panic]
    fn raster_bounds() {
        let mut raster = Raster::new(2, 2);
        raster.get_mut(IVec2::new(2, 0));
    }
}
