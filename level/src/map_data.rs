use glam::Vec2;
use log::{debug, info};
use math::fixed_to_float;
use wad::LevelSource;
use wad::types::{PLAYER_ONE_START, WadThing};

use crate::LevelError;
use crate::map_defs::{LineDef, Sector, Segment, SideDef, SubSector, VertexId};

/// The smallest vector and the largest vertex, combined make up a
/// rectangle enclosing the level area
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MapExtents {
    pub min_vertex: Vec2,
    pub max_vertex: Vec2,
    pub width: f32,
    pub height: f32,
    pub min_floor: f32,
    pub max_ceiling: f32,
}

/// A `MapData` holds a level cross referenced and checked, ready for
/// conversion. It is built once and only read after that.
///
/// The records reference each other by index in to the arrays here, so the
/// arrays are only reachable as slices.
#[derive(Debug, Default)]
pub struct MapData {
    name: String,
    vertexes: Vec<Vec2>,
    gl_vertexes: Vec<Vec2>,
    sectors: Vec<Sector>,
    sidedefs: Vec<SideDef>,
    linedefs: Vec<LineDef>,
    segments: Vec<Segment>,
    subsectors: Vec<SubSector>,
    things: Vec<WadThing>,
    extents: MapExtents,
}

impl MapData {
    /// Build the map from the raw records. Records depend on the ones loaded
    /// before them, so the order here matters.
    pub fn load(name: &str, source: &impl LevelSource) -> Result<Self, LevelError> {
        let mut map = MapData {
            name: name.to_owned(),
            ..Default::default()
        };

        map.vertexes = source.vertex_iter().map(|v| Vec2::new(v.x, v.y)).collect();
        map.gl_vertexes = source
            .gl_vertex_iter()
            .map(|v| Vec2::new(fixed_to_float(v.x), fixed_to_float(v.y)))
            .collect();
        if map.vertexes.is_empty() && map.gl_vertexes.is_empty() {
            return Err(LevelError::NoVertexes);
        }
        info!(
            "{}: Loaded {} vertexes, {} GL vertexes",
            name,
            map.vertexes.len(),
            map.gl_vertexes.len()
        );

        map.load_sectors(source)?;
        map.load_sidedefs(source)?;
        map.load_linedefs(source)?;
        map.load_segments(source)?;
        map.load_subsectors(source)?;

        map.things = source.thing_iter().collect();
        info!("{}: Loaded {} things", name, map.things.len());

        map.set_extents();
        Ok(map)
    }

    fn load_sectors(&mut self, source: &impl LevelSource) -> Result<(), LevelError> {
        self.sectors = source
            .sector_iter()
            .enumerate()
            .map(|(i, s)| {
                Sector::new(
                    i,
                    s.floor_height as f32,
                    s.ceil_height as f32,
                    &s.floor_tex,
                    &s.ceil_tex,
                    s.light_level,
                    s.kind,
                    s.tag,
                )
            })
            .collect();
        if self.sectors.is_empty() {
            return Err(LevelError::NoSectors);
        }
        info!("{}: Loaded {} sectors", self.name, self.sectors.len());
        Ok(())
    }

    fn load_sidedefs(&mut self, source: &impl LevelSource) -> Result<(), LevelError> {
        for (i, s) in source.sidedef_iter().enumerate() {
            let sector = s.sector as usize;
            let Some(owner) = self.sectors.get_mut(sector) else {
                return Err(LevelError::MissingSector { sidedef: i, sector });
            };
            owner.sidedefs.push(i);
            self.sidedefs.push(SideDef::new(
                i,
                s.x_offset as f32,
                s.y_offset as f32,
                &s.upper_tex,
                &s.lower_tex,
                &s.middle_tex,
                sector,
            ));
        }
        info!("{}: Loaded {} sidedefs", self.name, self.sidedefs.len());
        Ok(())
    }

    fn load_linedefs(&mut self, source: &impl LevelSource) -> Result<(), LevelError> {
        for (i, l) in source.linedef_iter().enumerate() {
            let v1 = self.vertex(VertexId::regular(l.start_vertex as u32))?;
            let v2 = self.vertex(VertexId::regular(l.end_vertex as u32))?;

            let mut check_side = |side: Option<u16>| -> Result<Option<usize>, LevelError> {
                let Some(side) = side.map(|s| s as usize) else {
                    return Ok(None);
                };
                let Some(sidedef) = self.sidedefs.get_mut(side) else {
                    return Err(LevelError::MissingSideDef {
                        linedef: i,
                        sidedef: side,
                    });
                };
                sidedef.linedef = Some(i);
                Ok(Some(side))
            };
            let front = check_side(l.front_sidedef)?;
            let back = check_side(l.back_sidedef)?;

            let onesided = match (front, back) {
                (Some(front), Some(back)) => {
                    self.sidedefs[front].partner = Some(back);
                    self.sidedefs[back].partner = Some(front);
                    None
                }
                (front, back) => front.or(back),
            };

            self.linedefs.push(LineDef {
                num: i,
                v1,
                v2,
                flags: l.flags as u32,
                special: l.special,
                tag: l.sector_tag,
                front_sidedef: front,
                back_sidedef: back,
                onesided,
            });
        }
        info!("{}: Loaded {} linedefs", self.name, self.linedefs.len());
        Ok(())
    }

    fn load_segments(&mut self, source: &impl LevelSource) -> Result<(), LevelError> {
        let mut partners = Vec::new();
        for (i, s) in source.gl_segment_iter().enumerate() {
            let start = VertexId(s.start_vertex);
            let end = VertexId(s.end_vertex);

            let (linedef, sidedef) = match s.linedef.map(|l| l as usize) {
                None => (None, None),
                Some(l) => {
                    let Some(line) = self.linedefs.get(l) else {
                        return Err(LevelError::MissingLineDef {
                            segment: i,
                            linedef: l,
                        });
                    };
                    let side = if s.side == 0 {
                        line.front_sidedef
                    } else {
                        line.back_sidedef
                    };
                    let Some(side) = side else {
                        return Err(LevelError::MissingSegmentSide {
                            segment: i,
                            side: s.side,
                        });
                    };
                    (Some(l), Some(side))
                }
            };

            let v1 = self.vertex(start)?;
            let v2 = self.vertex(end)?;
            let sector = sidedef.map(|s| self.sidedefs[s].sector);
            partners.push(s.partner);
            self.segments.push(Segment {
                num: i,
                v1,
                v2,
                start,
                end,
                linedef,
                sidedef,
                sector,
                side: s.side,
                partner: None,
            });
        }

        // Partners can point forward, so link once every seg exists
        for (i, partner) in partners.into_iter().enumerate() {
            let Some(partner) = partner.map(|p| p as usize) else {
                continue;
            };
            if partner >= self.segments.len() {
                return Err(LevelError::MissingPartnerSegment {
                    segment: i,
                    partner,
                });
            }
            self.segments[i].partner = Some(partner);
        }
        info!("{}: Loaded {} segments", self.name, self.segments.len());
        Ok(())
    }

    fn load_subsectors(&mut self, source: &impl LevelSource) -> Result<(), LevelError> {
        for (i, s) in source.gl_subsector_iter().enumerate() {
            let start_seg = s.start_seg as usize;
            let seg_count = s.seg_count as usize;
            let end = start_seg + seg_count;
            if end > self.segments.len() {
                return Err(LevelError::MissingSegment {
                    subsector: i,
                    segment: start_seg.max(self.segments.len()),
                });
            }

            let segs = &self.segments[start_seg..end];
            let mut sector = None;
            let mut vertexes = Vec::with_capacity(segs.len());
            for (n, seg) in segs.iter().enumerate() {
                if let Some(prev) = vertexes.last() {
                    if *prev != seg.v1 {
                        return Err(LevelError::BrokenSegmentChain {
                            subsector: i,
                            segment: start_seg + n,
                        });
                    }
                    // The end of the previous seg is this seg's start
                    vertexes.pop();
                }
                vertexes.push(seg.v1);
                vertexes.push(seg.v2);

                if let Some(seg_sector) = seg.sector {
                    match sector {
                        None => sector = Some(seg_sector),
                        Some(s) if s != seg_sector => {
                            return Err(LevelError::SubSectorSectorMismatch {
                                subsector: i,
                                segment: start_seg + n,
                            });
                        }
                        Some(_) => {}
                    }
                }
            }

            let Some(sector) = sector else {
                return Err(LevelError::SubSectorWithoutSector { subsector: i });
            };
            if vertexes.first() != vertexes.last() {
                return Err(LevelError::OpenSegmentChain { subsector: i });
            }
            vertexes.pop();

            self.subsectors.push(SubSector {
                num: i,
                sector,
                start_seg,
                seg_count,
                vertexes,
            });
        }
        info!("{}: Loaded {} subsectors", self.name, self.subsectors.len());
        Ok(())
    }

    fn set_extents(&mut self) {
        // baseline is the first vertex, not zero, so a level entirely in
        // negative space still gets its max set correctly
        let mut all = self.vertexes.iter().chain(self.gl_vertexes.iter());
        let first = all.next().copied().unwrap_or_default();
        let (min, max) = all.fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)));
        self.extents.min_vertex = min;
        self.extents.max_vertex = max;
        self.extents.width = max.x - min.x;
        self.extents.height = max.y - min.y;

        let mut min = self.sectors[0].floorheight;
        let mut max = self.sectors[0].ceilingheight;
        for sector in &self.sectors {
            min = min.min(sector.floorheight);
            max = max.max(sector.ceilingheight);
        }
        self.extents.min_floor = min;
        self.extents.max_ceiling = max;
        debug!("{}: Extents {:?}", self.name, self.extents);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a vertex in either list by its segment id
    pub fn vertex(&self, id: VertexId) -> Result<Vec2, LevelError> {
        let list = if id.is_gl() {
            &self.gl_vertexes
        } else {
            &self.vertexes
        };
        list.get(id.index())
            .copied()
            .ok_or(LevelError::MissingVertex { id: id.0 })
    }

    pub fn vertexes(&self) -> &[Vec2] {
        &self.vertexes
    }

    pub fn gl_vertexes(&self) -> &[Vec2] {
        &self.gl_vertexes
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn sidedefs(&self) -> &[SideDef] {
        &self.sidedefs
    }

    pub fn linedefs(&self) -> &[LineDef] {
        &self.linedefs
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn subsectors(&self) -> &[SubSector] {
        &self.subsectors
    }

    /// The segments bounding a subsector, in order
    pub fn subsector_segments(&self, subsector: &SubSector) -> &[Segment] {
        &self.segments[subsector.segment_range()]
    }

    pub fn things(&self) -> &[WadThing] {
        &self.things
    }

    pub fn get_map_extents(&self) -> &MapExtents {
        &self.extents
    }

    /// The player one start. If a level has more than one the last is used.
    pub fn player_start(&self) -> Option<&WadThing> {
        self.things
            .iter()
            .rev()
            .find(|t| t.kind == PLAYER_ONE_START)
    }
}
