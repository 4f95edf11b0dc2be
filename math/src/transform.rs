use glam::{IVec2, UVec3, Vec2, Vec3};
use log::{debug, info};

/// Default scale: one block for every 24 map units, a player is about 2
/// blocks tall.
pub const DEFAULT_SCALE: f32 = 1.0 / 24.0;

/// Span in blocks the level is fitted to when using `ScaleMode::Fit`
pub const DEFAULT_TARGET_SPAN: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleMode {
    /// A constant number of blocks per map unit
    Fixed(f32),
    /// The largest scale that fits every axis within the target span
    Fit { target_span: f32 },
}

impl Default for ScaleMode {
    fn default() -> Self {
        ScaleMode::Fixed(DEFAULT_SCALE)
    }
}

/// Maps level space to the voxel grid.
///
/// Level X becomes grid X, level Y becomes grid Z, and heights become grid Y.
/// Every axis shares the one scale, applied after translating the minimum
/// corner of the level to the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTransform {
    /// Applied before scaling, `(x, height, y)`
    translation: Vec3,
    scale: f32,
    max_vertex: Vec2,
    max_height: f32,
    /// Whole blocks added to every height after scaling
    vertical_margin: u32,
}

impl GridTransform {
    /// # Panics
    /// If the minimum corner does not land at or above zero on every axis
    /// after the transform. This can only happen with a broken scale (NaN,
    /// negative or zero).
    pub fn new(
        min_vertex: Vec2,
        max_vertex: Vec2,
        min_height: f32,
        max_height: f32,
        mode: ScaleMode,
        vertical_margin: u32,
    ) -> Self {
        let size = max_vertex - min_vertex;
        let candidates = |span: f32| {
            [size.x, size.y, max_height - min_height]
                .into_iter()
                .filter(|d| *d > 0.0)
                .map(|d| span / d)
                .fold(f32::INFINITY, f32::min)
        };

        let scale = match mode {
            ScaleMode::Fixed(scale) => {
                let fit = candidates(DEFAULT_TARGET_SPAN);
                if scale > fit {
                    debug!(
                        "Fixed scale {scale} is larger than the {fit} needed to fit {DEFAULT_TARGET_SPAN} blocks"
                    );
                }
                scale
            }
            ScaleMode::Fit { target_span } => {
                let fit = candidates(target_span);
                if fit.is_finite() { fit } else { 1.0 }
            }
        };

        if !(scale > 0.0 && scale.is_finite()) {
            panic!("Invalid grid scale {}", scale);
        }

        let transform = Self {
            translation: Vec3::new(-min_vertex.x, -min_height, -min_vertex.y),
            scale,
            max_vertex,
            max_height,
            vertical_margin,
        };

        let min_xz = transform.to_grid(min_vertex);
        let min_y = transform.height(min_height);
        if min_xz.x < 0 || min_xz.y < 0 || min_y < 0.0 {
            panic!(
                "Transformed minimum corner ({}, {}, {}) is below zero",
                min_xz.x, min_y, min_xz.y
            );
        }

        info!("Grid scale is {}, 1 block is {} map units", scale, 1.0 / scale);
        transform
    }

    pub const fn scale(&self) -> f32 {
        self.scale
    }

    pub const fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Horizontal position to a grid cell `(x, z)`, rounding down
    pub fn to_grid(&self, v: Vec2) -> IVec2 {
        IVec2::new(
            ((v.x + self.translation.x) * self.scale).floor() as i32,
            ((v.y + self.translation.z) * self.scale).floor() as i32,
        )
    }

    /// Height to a real grid Y. Callers round down for floors and up for
    /// ceilings so the geometry is always contained.
    pub fn height(&self, h: f32) -> f32 {
        (h + self.translation.y) * self.scale + self.vertical_margin as f32
    }

    pub fn floor_height(&self, h: f32) -> i32 {
        self.height(h).floor() as i32
    }

    pub fn ceiling_height(&self, h: f32) -> i32 {
        self.height(h).ceil() as i32
    }

    /// Grid dimensions `(x, y, z)`. One extra cell horizontally because the
    /// maximum vertex itself lands inside the grid, two vertically so there is
    /// room for a block above the highest ceiling and the vertical margin
    /// repeated on top.
    pub fn grid_size(&self) -> UVec3 {
        let max = self.to_grid(self.max_vertex);
        let top = self.height(self.max_height).ceil() as u32;
        UVec3::new(
            max.x as u32 + 1,
            top + 2 + self.vertical_margin,
            max.y as u32 + 1,
        )
    }
}
