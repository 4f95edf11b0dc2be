#[cfg(test)]
mod convert_tests {
    use glam::UVec3;
    use level::{LevelError, MapData};
    use math::ScaleMode;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use schematic::{BlockKind, Schematic, Voxel};
    use wad::LevelTables;
    use wad::testing::*;
    use wad::types::{NO_TEXTURE, WadThing};

    use crate::{ConvertError, ConvertOptions, DEFAULT_COLOUR, convert_level, convert_source};

    const AIR: Voxel = Voxel::new(BlockKind::Air, 0);
    const GLASS: Voxel = Voxel::new(BlockKind::Glass, 0);
    const TORCH: Voxel = Voxel::new(BlockKind::Torch, 0);
    const ORANGE: Voxel = Voxel::wool(1);
    const LIGHT_BLUE: Voxel = Voxel::wool(3);
    const LIME: Voxel = Voxel::wool(5);
    const BROWN: Voxel = Voxel::wool(12);
    const RED: Voxel = Voxel::wool(14);
    const PURPLE: Voxel = Voxel::wool(10);
    const WHITE: Voxel = Voxel::wool(DEFAULT_COLOUR);

    /// Chance of a light is zero
    fn dark() -> ConvertOptions {
        ConvertOptions {
            light_divisor: f32::INFINITY,
            ..Default::default()
        }
    }

    fn convert(tables: &LevelTables, options: &ConvertOptions) -> Result<Schematic, ConvertError> {
        convert_source("TEST", tables, options, &mut StdRng::seed_from_u64(0))
    }

    fn column(s: &Schematic, x: i32, z: i32) -> Vec<Voxel> {
        (0..s.size().y as i32).map(|y| s.get(x, y, z)).collect()
    }

    fn split(
        left: (i16, i16, &str),
        right: (i16, i16, &str),
        flags: u16,
        sides: [(&str, &str, &str); 2],
    ) -> LevelTables {
        SplitRoom::new(96.0, 96.0, left, right, flags, sides).build()
    }

    const BARE: [(&str, &str, &str); 2] = [(NO_TEXTURE, NO_TEXTURE, NO_TEXTURE); 2];

    #[test]
    fn rectangle_room() {
        // 240 x 192 units, 128 high, at 24 units a block
        let tables = wad::testing::rectangle_room(240.0, 192.0, 0, 128);
        let s = convert(&tables, &dark()).unwrap();
        assert_eq!(s.size(), UVec3::new(11, 8, 9));
        assert_eq!(s.centre(), Some(UVec3::new(5, 1, 4)));

        let wall = [LIME, LIME, LIME, LIME, LIME, LIME, LIME, AIR];
        let open = [ORANGE, AIR, AIR, AIR, AIR, AIR, LIGHT_BLUE, AIR];
        for x in 0..11 {
            for z in 0..9 {
                let border = x == 0 || x == 10 || z == 0 || z == 8;
                let expected = if border { &wall } else { &open };
                assert_eq!(column(&s, x, z), expected, "column ({x}, {z})");
            }
        }
    }

    #[test]
    fn walls_and_open_columns_exclusive() {
        let mut tables = wad::testing::rectangle_room(240.0, 192.0, 0, 128);
        tables.sectors[0].light_level = 255;
        let options = ConvertOptions {
            light_divisor: 1.0,
            ..Default::default()
        };
        let s = convert(&tables, &options).unwrap();
        for x in 0..11 {
            for z in 0..9 {
                let col = column(&s, x, z);
                let full = col[..7].iter().all(|v| v.kind() == Some(BlockKind::Wool));
                let border = x == 0 || x == 10 || z == 0 || z == 8;
                assert_eq!(full, border, "column ({x}, {z})");
                if border {
                    assert!(!col.contains(&TORCH));
                }
            }
        }
    }

    #[test]
    fn lights_follow_light_level() {
        let mut tables = wad::testing::rectangle_room(240.0, 192.0, 0, 128);
        tables.sectors[0].light_level = 255;
        let always = ConvertOptions {
            light_divisor: 1.0,
            ..Default::default()
        };
        let s = convert(&tables, &always).unwrap();
        assert_eq!(s.block_counts()[BlockKind::Torch.id() as usize], 9 * 7);
        assert_eq!(s.get(4, 1, 4), TORCH);

        tables.sectors[0].light_level = 0;
        let s = convert(&tables, &always).unwrap();
        assert_eq!(s.block_counts()[BlockKind::Torch.id() as usize], 0);
    }

    #[test]
    fn lights_repeat_with_seed() {
        let tables = wad::testing::rectangle_room(960.0, 960.0, 0, 128);
        let map = MapData::load("BIG", &tables).unwrap();
        let options = ConvertOptions::default();

        let a = convert_level(&map, &tables, &options, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = convert_level(&map, &tables, &options, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
        // 39 x 39 open cells at about 6% each
        let torches = a.block_counts()[BlockKind::Torch.id() as usize];
        assert!(torches > 0 && torches < 39 * 39 / 4, "{torches}");
    }

    #[test]
    fn step_faces() {
        // right is higher on the floor and lower on the ceiling
        let tables = split(
            (0, 128, CEIL_FLAT),
            (24, 96, CEIL_FLAT),
            0,
            [
                (UPPER_TEX, LOWER_TEX, NO_TEXTURE),
                (NO_TEXTURE, NO_TEXTURE, NO_TEXTURE),
            ],
        );
        let s = convert(&tables, &dark()).unwrap();
        assert_eq!(s.size(), UVec3::new(9, 8, 5));
        assert_eq!(
            column(&s, 4, 2),
            [RED, ORANGE, AIR, AIR, LIGHT_BLUE, BROWN, BROWN, AIR]
        );
        // left side only
        assert_eq!(
            column(&s, 2, 2),
            [ORANGE, AIR, AIR, AIR, AIR, AIR, LIGHT_BLUE, AIR]
        );
        // right side only
        assert_eq!(
            column(&s, 6, 2),
            [AIR, ORANGE, AIR, AIR, LIGHT_BLUE, AIR, AIR, AIR]
        );
    }

    #[test]
    fn bare_step_faces_are_default_colour() {
        let tables = split((0, 128, CEIL_FLAT), (24, 96, CEIL_FLAT), 0, BARE);
        let s = convert(&tables, &dark()).unwrap();
        assert_eq!(
            column(&s, 4, 2),
            [WHITE, ORANGE, AIR, AIR, LIGHT_BLUE, WHITE, WHITE, AIR]
        );
    }

    /// Left walls are lime, right walls purple. The corner columns on the
    /// divider touch one wall of each.
    fn corner_walls(left: (i16, i16), right: (i16, i16)) -> Schematic {
        let mut tables = split(
            (left.0, left.1, CEIL_FLAT),
            (right.0, right.1, CEIL_FLAT),
            0,
            BARE,
        );
        let sectors = [0, 0, 1, 1, 1, 0];
        for (side, sector) in tables.sidedefs.iter_mut().zip(sectors) {
            assert_eq!(side.sector, sector);
            side.middle_tex = (if sector == 0 { WALL_TEX } else { MID_TEX }).to_owned();
        }
        convert(&tables, &dark()).unwrap()
    }

    #[test]
    fn tallest_wall_textures_corner() {
        let s = corner_walls((0, 128), (0, 64));
        for z in [0, 4] {
            assert_eq!(s.get(4, 3, z), LIME, "corner z {z}");
        }
        assert_eq!(s.get(8, 3, 2), PURPLE);

        let s = corner_walls((0, 64), (0, 128));
        for z in [0, 4] {
            assert_eq!(s.get(4, 3, z), PURPLE, "corner z {z}");
        }
        assert_eq!(s.get(0, 2, 2), LIME);

        // same height, the left subsector is traced first
        let s = corner_walls((0, 128), (0, 128));
        for z in [0, 4] {
            assert_eq!(s.get(4, 3, z), LIME, "corner z {z}");
        }
    }

    #[test]
    fn sky_is_left_open() {
        let tables = split((0, 128, CEIL_FLAT), (0, 128, SKY_FLAT), 0, BARE);
        let s = convert(&tables, &dark()).unwrap();
        for x in 5..=7 {
            for z in 1..=3 {
                let col = column(&s, x, z);
                assert_eq!(col[0], ORANGE);
                assert!(col[1..].iter().all(|v| *v == AIR), "column ({x}, {z})");
            }
        }
        assert_eq!(s.get(2, 6, 2), LIGHT_BLUE);
    }

    #[test]
    fn sky_marker_is_configurable() {
        let tables = split((0, 128, CEIL_FLAT), (0, 128, SKY_FLAT), 0, BARE);
        let options = ConvertOptions {
            sky_marker: "NOTHING".to_owned(),
            ..dark()
        };
        let s = convert(&tables, &options).unwrap();
        assert_eq!(s.get(6, 6, 2), LIGHT_BLUE);
    }

    #[test]
    fn sky_has_no_lights() {
        // the lower sky ceiling owns the shared column
        let mut tables = split((0, 128, CEIL_FLAT), (0, 120, SKY_FLAT), 0, BARE);
        tables.sectors[1].light_level = 255;
        tables.sectors[0].light_level = 0;
        let options = ConvertOptions {
            light_divisor: 1.0,
            ..Default::default()
        };
        let s = convert(&tables, &options).unwrap();
        assert_eq!(s.block_counts()[BlockKind::Torch.id() as usize], 0);
    }

    #[test]
    fn blocking_middle_texture_is_glass() {
        let mut tables = split(
            (0, 128, CEIL_FLAT),
            (0, 128, CEIL_FLAT),
            ML_BLOCKING,
            [
                (NO_TEXTURE, NO_TEXTURE, NO_TEXTURE),
                (NO_TEXTURE, NO_TEXTURE, MID_TEX),
            ],
        );
        tables.sectors[0].light_level = 255;
        tables.sectors[1].light_level = 255;
        let options = ConvertOptions {
            light_divisor: 1.0,
            ..Default::default()
        };
        let s = convert(&tables, &options).unwrap();
        assert_eq!(
            column(&s, 4, 2),
            [ORANGE, GLASS, GLASS, GLASS, GLASS, GLASS, LIGHT_BLUE, AIR]
        );
        // the open cells beside get lights
        assert_eq!(s.get(3, 1, 2), TORCH);
        assert_eq!(s.get(5, 1, 2), TORCH);
    }

    #[test]
    fn passable_middle_texture_is_open() {
        let tables = split(
            (0, 128, CEIL_FLAT),
            (0, 128, CEIL_FLAT),
            0,
            [
                (NO_TEXTURE, NO_TEXTURE, MID_TEX),
                (NO_TEXTURE, NO_TEXTURE, MID_TEX),
            ],
        );
        let s = convert(&tables, &dark()).unwrap();
        assert_eq!(s.block_counts()[BlockKind::Glass.id() as usize], 0);
    }

    #[test]
    fn closed_door_drawn_open() {
        let tables = split((0, 128, CEIL_FLAT), (0, 0, CEIL_FLAT), 0, BARE);
        let s = convert(&tables, &dark()).unwrap();
        assert_eq!(
            column(&s, 6, 2),
            [ORANGE, AIR, AIR, AIR, AIR, AIR, LIGHT_BLUE, AIR]
        );
    }

    #[test]
    fn missing_texture_is_white() {
        let mut tables = wad::testing::rectangle_room(240.0, 192.0, 0, 128);
        for side in tables.sidedefs.iter_mut() {
            side.middle_tex = "NOSUCH".to_owned();
        }
        let s = convert(&tables, &dark()).unwrap();
        assert_eq!(s.get(0, 3, 3), Voxel::wool(0));
    }

    #[test]
    fn vertical_margin() {
        let tables = wad::testing::rectangle_room(240.0, 192.0, 0, 128);
        let options = ConvertOptions {
            vertical_margin: 2,
            ..dark()
        };
        let s = convert(&tables, &options).unwrap();
        assert_eq!(s.size(), UVec3::new(11, 12, 9));
        assert_eq!(s.get(4, 0, 4), AIR);
        assert_eq!(s.get(4, 1, 4), AIR);
        assert_eq!(s.get(4, 2, 4), ORANGE);
        assert_eq!(s.get(4, 8, 4), LIGHT_BLUE);
        assert_eq!(s.centre(), Some(UVec3::new(5, 3, 4)));
    }

    #[test]
    fn fit_scale() {
        let tables = wad::testing::rectangle_room(256.0, 192.0, 0, 128);
        let options = ConvertOptions {
            scale: ScaleMode::Fit { target_span: 16.0 },
            ..dark()
        };
        let s = convert(&tables, &options).unwrap();
        // 16 units a block
        assert_eq!(s.size(), UVec3::new(17, 10, 13));
    }

    #[test]
    fn centre_is_mirrored() {
        let mut tables = wad::testing::rectangle_room(240.0, 192.0, 0, 128);
        tables.things[0] = WadThing::new(48, 48, 0, 1, 7);
        let s = convert(&tables, &dark()).unwrap();
        // grid z 2 becomes 8 - 2
        assert_eq!(s.centre(), Some(UVec3::new(2, 1, 6)));
    }

    #[test]
    fn player_start_errors() {
        let mut tables = wad::testing::rectangle_room(240.0, 192.0, 0, 128);
        tables.things.clear();
        assert_eq!(
            convert(&tables, &dark()).unwrap_err(),
            ConvertError::MissingPlayerStart
        );

        // in a wall column
        tables.things.push(WadThing::new(0, 0, 0, 1, 7));
        assert_eq!(
            convert(&tables, &dark()).unwrap_err(),
            ConvertError::PlayerStartOutsideLevel { x: 0, z: 0 }
        );

        tables.things[0] = WadThing::new(960, 48, 0, 1, 7);
        assert_eq!(
            convert(&tables, &dark()).unwrap_err(),
            ConvertError::PlayerStartOutsideLevel { x: 40, z: 2 }
        );
    }

    #[test]
    fn invalid_scales() {
        let tables = wad::testing::rectangle_room(240.0, 192.0, 0, 128);
        for scale in [
            ScaleMode::Fixed(0.0),
            ScaleMode::Fixed(f32::NAN),
            ScaleMode::Fit { target_span: -1.0 },
        ] {
            let options = ConvertOptions { scale, ..dark() };
            let err = convert(&tables, &options).unwrap_err();
            assert!(matches!(err, ConvertError::InvalidScale(_)));
        }
    }

    #[test]
    fn level_errors_pass_through() {
        let mut tables = wad::testing::rectangle_room(240.0, 192.0, 0, 128);
        tables.gl_segments.swap(0, 1);
        let err = convert(&tables, &dark()).unwrap_err();
        assert_eq!(
            err,
            ConvertError::Level(LevelError::BrokenSegmentChain {
                subsector: 0,
                segment: 1
            })
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
