/// Axis-aligned rectangle in integer pixel coordinates (LTRB, inclusive).
///
/// Built from a normalized box with `pixel = normalized * dimension`,
/// truncated toward zero. No clamping or reordering is applied, so a box
/// may extend past the frame or have `right < left`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    #[inline]
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Map a normalized LTRB box onto a `cols` x `rows` frame.
    #[inline]
    pub fn from_normalized(bbox: [f32; 4], cols: u32, rows: u32) -> Self {
        let [left, top, right, bottom] = bbox;
        Self {
            left: scale(left, cols),
            top: scale(top, rows),
            right: scale(right, cols),
            bottom: scale(bottom, rows),
        }
    }

    /// Convert to LTRB format.
    #[inline]
    pub fn to_ltrb(&self) -> [i32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }

    /// Inclusive width; zero for a degenerate box.
    #[inline]
    pub fn width(&self) -> u32 {
        if self.right < self.left {
            0
        } else {
            self.right.abs_diff(self.left).saturating_add(1)
        }
    }

    /// Inclusive height; zero for a degenerate box.
    #[inline]
    pub fn height(&self) -> u32 {
        if self.bottom < self.top {
            0
        } else {
            self.bottom.abs_diff(self.top).saturating_add(1)
        }
    }

    /// True when the corners are out of order and nothing would be drawn.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Pull coordinates lying beyond a `cols` x `rows` frame in to one pixel
    /// outside it.
    ///
    /// Edges inside the frame are unchanged and edges outside stay outside,
    /// so drawing the clipped box paints exactly the same pixels. Degenerate
    /// boxes are returned as they are.
    pub fn clipped(&self, cols: u32, rows: u32) -> Self {
        if self.is_degenerate() {
            return *self;
        }
        let max_x = i32::try_from(cols).unwrap_or(i32::MAX);
        let max_y = i32::try_from(rows).unwrap_or(i32::MAX);
        Self {
            left: self.left.clamp(-1, max_x),
            top: self.top.clamp(-1, max_y),
            right: self.right.clamp(-1, max_x),
            bottom: self.bottom.clamp(-1, max_y),
        }
    }

    /// Convert to an `imageproc` rectangle, or `None` for a degenerate box.
    pub fn to_imageproc(&self) -> Option<imageproc::rect::Rect> {
        if self.is_degenerate() {
            return None;
        }
        Some(imageproc::rect::Rect::at(self.left, self.top).of_size(self.width(), self.height()))
    }
}

// `as` truncates toward zero and saturates on overflow.
#[inline]
fn scale(norm: f32, dim: u32) -> i32 {
    (norm * dim as f32) as i32
}
