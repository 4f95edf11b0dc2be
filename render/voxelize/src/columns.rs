use glam::IVec2;
use level::{MapData, Sector};
use log::trace;
use math::GridTransform;
use rand::Rng;
use schematic::{BlockKind, Schematic, Voxel};
use wad::LevelSource;

use crate::ConvertOptions;
use crate::colours::{ColourClassifier, DEFAULT_COLOUR};
use crate::raster::Pixel;

/// The vertical limits of a column, over every sector covering it. Real
/// heights, in level space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnExtents {
    pub floor_high: f32,
    /// Owner of the highest floor
    pub floor_sector: usize,
    pub floor_low: f32,
    pub ceil_high: f32,
    pub ceil_low: f32,
    /// Owner of the lowest ceiling
    pub ceil_sector: usize,
}

impl ColumnExtents {
    /// `None` if no sector covers the column. When sectors share an extreme
    /// the first one seen keeps ownership, and the order sectors are seen in
    /// carries no meaning.
    pub fn find(map: &MapData, sectors: &[usize]) -> Option<Self> {
        let mut extents: Option<ColumnExtents> = None;
        for &num in sectors {
            let sector = &map.sectors()[num];
            let floor = sector.floorheight;
            let ceiling = effective_ceiling(map, sector);

            let Some(e) = extents.as_mut() else {
                extents = Some(ColumnExtents {
                    floor_high: floor,
                    floor_sector: num,
                    floor_low: floor,
                    ceil_high: ceiling,
                    ceil_low: ceiling,
                    ceil_sector: num,
                });
                continue;
            };
            if floor > e.floor_high {
                e.floor_high = floor;
                e.floor_sector = num;
            }
            e.floor_low = e.floor_low.min(floor);
            e.ceil_high = e.ceil_high.max(ceiling);
            if ceiling < e.ceil_low {
                e.ceil_low = ceiling;
                e.ceil_sector = num;
            }
        }
        extents
    }
}

/// A closed door (floor level with ceiling) is drawn open: its ceiling is
/// taken from the highest ceiling of the sectors on the other side of its
/// lines.
pub fn effective_ceiling(map: &MapData, sector: &Sector) -> f32 {
    let mut ceiling = sector.ceilingheight;
    if sector.is_closed() {
        for &side in &sector.sidedefs {
            if let Some(partner) = map.sidedefs()[side].partner {
                let other = map.sidedefs()[partner].sector;
                ceiling = ceiling.max(map.sectors()[other].ceilingheight);
            }
        }
    }
    ceiling
}

/// Paints the columns of one level in to a schematic
pub struct ColumnRenderer<'a, S: LevelSource> {
    map: &'a MapData,
    transform: &'a GridTransform,
    options: &'a ConvertOptions,
    colours: ColourClassifier<'a, S>,
    sky_marker: String,
}

impl<'a, S: LevelSource> ColumnRenderer<'a, S> {
    pub fn new(
        map: &'a MapData,
        source: &'a S,
        transform: &'a GridTransform,
        options: &'a ConvertOptions,
    ) -> Self {
        Self {
            map,
            transform,
            options,
            colours: ColourClassifier::new(source),
            sky_marker: options.sky_marker.to_ascii_lowercase(),
        }
    }

    pub fn colours(&self) -> &ColourClassifier<'a, S> {
        &self.colours
    }

    fn is_sky(&self, flat: &str) -> bool {
        !self.sky_marker.is_empty() && flat.to_ascii_lowercase().contains(&self.sky_marker)
    }

    /// A texture from the side of any of `linedefs` that faces `sector`,
    /// picked by `slot`
    fn side_texture(
        &mut self,
        linedefs: &[usize],
        sector: usize,
        slot: fn(&level::SideDef) -> Option<&String>,
    ) -> u8 {
        let map = self.map;
        let name = linedefs
            .iter()
            .flat_map(|&l| map.linedefs()[l].sides())
            .map(|s| &map.sidedefs()[s])
            .filter(|side| side.sector == sector)
            .find_map(slot);
        match name {
            Some(name) => self.colours.texture(name),
            None => DEFAULT_COLOUR,
        }
    }

    /// Render one column. Returns the grid Y of the floor voxel when the
    /// column is open, `None` for a wall or an empty cell.
    pub fn render(
        &mut self,
        schematic: &mut Schematic,
        cell: IVec2,
        pixel: &Pixel,
        rng: &mut impl Rng,
    ) -> Option<i32> {
        let map = self.map;
        let extents = ColumnExtents::find(map, &pixel.sectors)?;
        let (x, z) = (cell.x, cell.y);

        let floor_high = self.transform.floor_height(extents.floor_high);
        let floor_low = self.transform.floor_height(extents.floor_low);
        let ceil_high = self.transform.ceiling_height(extents.ceil_high);
        let ceil_low = self.transform.ceiling_height(extents.ceil_low);

        // A solid wall anywhere in the cell fills the whole column, drawing
        // only part of it leaves gaps where the wall clips the cell
        let mut wall: Option<(f32, usize)> = None;
        for &l in &pixel.linedefs {
            let Some(side) = map.linedefs()[l].onesided else {
                continue;
            };
            let sector = &map.sectors()[map.sidedefs()[side].sector];
            let size = sector.ceilingheight - sector.floorheight;
            if wall.is_none_or(|(max, _)| size > max) {
                wall = Some((size, side));
            }
        }
        if let Some((_, side)) = wall {
            let colour = match &map.sidedefs()[side].midtexture {
                Some(name) => self.colours.texture(name),
                None => DEFAULT_COLOUR,
            };
            for y in floor_low..=ceil_high {
                schematic.set(x, y, z, Voxel::wool(colour));
            }
            return None;
        }

        let light = pixel
            .sectors
            .iter()
            .map(|&s| map.sectors()[s].lightlevel)
            .max()
            .unwrap_or_default();
        let has_light =
            rng.gen_range(0.0f32..1.0) < light as f32 / 255.0 / self.options.light_divisor;

        let floor = floor_high;
        let ceiling = ceil_low;

        // Floor, with the step face below it down to the lowest floor
        let floor_sector = &map.sectors()[extents.floor_sector];
        let floor_colour = self.colours.flat(&floor_sector.floorpic);
        let lower_colour = self.side_texture(&pixel.linedefs, extents.floor_sector, |s| {
            s.bottomtexture.as_ref()
        });
        schematic.set(x, floor, z, Voxel::wool(floor_colour));
        for y in floor_low..floor {
            schematic.set(x, y, z, Voxel::wool(lower_colour));
        }

        // Ceiling, with the face above it up to the highest ceiling. Sky is
        // left open.
        let ceil_sector = &map.sectors()[extents.ceil_sector];
        let sky = self.is_sky(&ceil_sector.ceilingpic);
        if !sky {
            let ceil_colour = self.colours.flat(&ceil_sector.ceilingpic);
            let upper_colour = self.side_texture(&pixel.linedefs, extents.ceil_sector, |s| {
                s.toptexture.as_ref()
            });
            schematic.set(x, ceiling, z, Voxel::wool(ceil_colour));
            for y in ceiling + 1..=ceil_high {
                schematic.set(x, y, z, Voxel::wool(upper_colour));
            }
        }

        // Impassable lines with a texture in the middle, like bars and grates
        let glass = pixel.linedefs.iter().any(|&l| {
            let line = &map.linedefs()[l];
            line.block_player() && line.sides().any(|s| map.sidedefs()[s].midtexture.is_some())
        });
        if glass {
            for y in floor + 1..ceiling {
                schematic.set(x, y, z, Voxel::new(BlockKind::Glass, 0));
            }
        }

        if has_light && !sky && !glass {
            trace!("Torch at ({}, {}, {})", x, floor + 1, z);
            schematic.set_block(x, floor + 1, z, BlockKind::Torch);
        }

        Some(floor)
    }
}

#[cfg(test)]
mod tests {
    use level::MapData;
    use wad::testing::*;
    use wad::types::NO_TEXTURE;

    use super::{ColumnExtents, effective_ceiling};

    fn split(left: (i16, i16), right: (i16, i16)) -> MapData {
        let split = SplitRoom::new(
            96.0,
            96.0,
            (left.0, left.1, CEIL_FLAT),
            (right.0, right.1, CEIL_FLAT),
            0,
            [(NO_TEXTURE, NO_TEXTURE, NO_TEXTURE); 2],
        );
        MapData::load("SPLIT", &split.build()).unwrap()
    }

    #[test]
    fn extents_of_two_sectors() {
        let map = split((0, 128), (24, 96));
        let e = ColumnExtents::find(&map, &[0, 1]).unwrap();
        assert_eq!(e.floor_high, 24.0);
        assert_eq!(e.floor_sector, 1);
        assert_eq!(e.floor_low, 0.0);
        assert_eq!(e.ceil_high, 128.0);
        assert_eq!(e.ceil_low, 96.0);
        assert_eq!(e.ceil_sector, 1);

        let e = ColumnExtents::find(&map, &[1, 0]).unwrap();
        assert_eq!(e.floor_sector, 1);
        assert_eq!(e.ceil_sector, 1);

        assert!(ColumnExtents::find(&map, &[]).is_none());
    }

    #[test]
    fn equal_extremes_keep_first_owner() {
        let map = split((0, 128), (0, 128));
        let e = ColumnExtents::find(&map, &[1, 0]).unwrap();
        assert_eq!(e.floor_sector, 1);
        assert_eq!(e.ceil_sector, 1);
    }

    #[test]
    fn closed_door_opens_to_neighbour() {
        let map = split((0, 128), (0, 0));
        assert_eq!(effective_ceiling(&map, &map.sectors()[1]), 128.0);
        // an open sector keeps its own ceiling
        assert_eq!(effective_ceiling(&map, &map.sectors()[0]), 128.0);

        let e = ColumnExtents::find(&map, &[1]).unwrap();
        assert_eq!(e.ceil_low, 128.0);
        assert_eq!(e.ceil_high, 128.0);
    }

    #[test]
    fn closed_door_without_neighbour_stays_closed() {
        let map = MapData::load("ROOM", &rectangle_room(96.0, 96.0, 32, 32)).unwrap();
        assert_eq!(effective_ceiling(&map, &map.sectors()[0]), 32.0);
    }
}
