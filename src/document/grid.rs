use crate::document::model::Pt;

pub const COL_COUNT :i32 = 20;
pub const ROW_COUNT :i32 = 10;

/// Extra border of grid cells around the playable device area. Stored
/// vertex coordinates include this offset.
pub const MARGIN :i32 = 2;

/// Pure mapping between device pixel coordinates and integer grid vertices.
/// Tile dimensions come from dividing the device size by the fixed
/// column/row counts; the full canvas extends `margin` tiles past the
/// device area on every side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid {
    pub cols :i32,
    pub rows :i32,
    pub margin :i32,
    pub tile_w :f64,
    pub tile_h :f64,
}

impl Grid {
    pub fn new(device_w :f64, device_h :f64) -> Grid {
        Self::with_dims(device_w, device_h, COL_COUNT, ROW_COUNT, MARGIN)
    }

    pub fn with_dims(device_w :f64, device_h :f64, cols :i32, rows :i32, margin :i32) -> Grid {
        Grid {
            cols, rows, margin,
            tile_w: device_w / cols as f64,
            tile_h: device_h / rows as f64,
        }
    }

    /// Total canvas width including both margins.
    pub fn width(&self) -> f64 { self.tile_w * (self.cols + 2 * self.margin) as f64 }

    pub fn height(&self) -> f64 { self.tile_h * (self.rows + 2 * self.margin) as f64 }

    pub fn device_width(&self) -> f64 { self.tile_w * self.cols as f64 }

    pub fn device_height(&self) -> f64 { self.tile_h * self.rows as f64 }

    /// Snaps a canvas pixel position to the nearest grid vertex. The
    /// half-tile offset before the ceiling centers the snap on tile
    /// boundaries; the rounding rule must stay bit-compatible with the old
    /// editor or drags and hit tests land on different vertices.
    pub fn vertex_at(&self, x :f64, y :f64) -> Pt {
        let col = ((x - 0.5 * self.tile_w) / self.width() * (self.cols + 2 * self.margin) as f64).ceil();
        let row = ((y - 0.5 * self.tile_h) / self.height() * (self.rows + 2 * self.margin) as f64).ceil();
        Pt { x: col as i32, y: row as i32 }
    }

    /// Pixel center of a vertex, for drawing and hit testing.
    pub fn point_for_vertex(&self, v :Pt) -> (f64, f64) {
        (v.x as f64 * self.tile_w, v.y as f64 * self.tile_h)
    }

    /// Maps a point given relative to the playable device area (old level
    /// files have no margin) by relocating it into the canvas first.
    pub fn vertex_from_device_point(&self, x :f64, y :f64) -> Pt {
        self.vertex_at(x + self.margin as f64 * self.tile_w,
                       y + self.margin as f64 * self.tile_h)
    }
}
