//! Label text measurement and rasterization.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};
use serde::Deserialize;

/// Glyph cell edge in font units.
const GLYPH_CELL: u32 = 8;
/// Glyph rows drawn above the baseline row.
const GLYPH_ASCENT: u32 = 7;

/// Font scale and stroke thickness for label text.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontStyle {
    pub scale: f32,
    pub thickness: u32,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            scale: 0.5,
            thickness: 1,
        }
    }
}

/// Rendered extent of a string.
///
/// `height` is measured upward from the baseline, `baseline` downward
/// from it, matching how the label background is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextSize {
    pub width: u32,
    pub height: u32,
    pub baseline: u32,
}

/// Something that can measure and draw label text onto a frame.
pub trait TextRenderer: Send + Sync {
    /// Measure `text` as it would be drawn with `style`.
    fn text_size(&self, text: &str, style: FontStyle) -> TextSize;

    /// Draw `text` with its baseline-left corner at `origin`.
    ///
    /// Pixels falling outside the frame are dropped.
    fn draw_text(
        &self,
        frame: &mut RgbImage,
        text: &str,
        origin: (i32, i32),
        style: FontStyle,
        color: Rgb<u8>,
    );
}

/// Fixed-width 8x8 bitmap font, magnified by the style's scale.
///
/// A scale of 0.5 draws glyphs at their native 8 pixel cell, every further
/// 0.5 adds one pixel per font unit. Thickness dilates each stroke.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFont;

impl BitmapFont {
    fn magnification(style: FontStyle) -> u32 {
        ((style.scale * 2.0).round() as u32).max(1)
    }

    fn glyph(c: char) -> [u8; 8] {
        BASIC_FONTS
            .get(c)
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8])
    }
}

impl TextRenderer for BitmapFont {
    fn text_size(&self, text: &str, style: FontStyle) -> TextSize {
        let m = Self::magnification(style);
        let extra = style.thickness.saturating_sub(1);
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        TextSize {
            width: if chars == 0 {
                0
            } else {
                chars
                    .saturating_mul(GLYPH_CELL.saturating_mul(m))
                    .saturating_add(extra)
            },
            height: GLYPH_ASCENT.saturating_mul(m),
            baseline: m.saturating_add(extra),
        }
    }

    fn draw_text(
        &self,
        frame: &mut RgbImage,
        text: &str,
        origin: (i32, i32),
        style: FontStyle,
        color: Rgb<u8>,
    ) {
        // i64 keeps glyph offsets exact for any u32 magnification.
        let m = i64::from(Self::magnification(style));
        let span = m + i64::from(style.thickness.max(1)) - 1;
        let (width, height) = (i64::from(frame.width()), i64::from(frame.height()));
        let top = i64::from(origin.1) - i64::from(GLYPH_ASCENT) * m;
        let advance = i64::from(GLYPH_CELL) * m;

        for (i, c) in text.chars().enumerate() {
            let cell_left = (i as i64)
                .saturating_mul(advance)
                .saturating_add(i64::from(origin.0));
            if cell_left >= width {
                break;
            }
            for (row, bits) in Self::glyph(c).iter().enumerate() {
                let y0 = top + row as i64 * m;
                let ys = y0.max(0)..y0.saturating_add(span).min(height);
                if ys.is_empty() {
                    continue;
                }
                for col in 0..i64::from(GLYPH_CELL) {
                    // Least significant bit is the leftmost pixel.
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    let x0 = cell_left.saturating_add(col * m);
                    let xs = x0.max(0)..x0.saturating_add(span).min(width);
                    for y in ys.clone() {
                        for x in xs.clone() {
                            frame.put_pixel(x as u32, y as u32, color);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_size_reference_style() {
        let size = BitmapFont.text_size("person: 0.9", FontStyle::default());
        assert_eq!(
            size,
            TextSize {
                width: 88,
                height: 7,
                baseline: 1
            }
        );
    }

    #[test]
    fn test_text_size_scales() {
        let style = FontStyle {
            scale: 1.0,
            thickness: 2,
        };
        let size = BitmapFont.text_size("ab", style);
        assert_eq!(size.width, 2 * 16 + 1);
        assert_eq!(size.height, 14);
        assert_eq!(size.baseline, 3);
    }

    #[test]
    fn test_text_size_empty() {
        assert_eq!(BitmapFont.text_size("", FontStyle::default()).width, 0);
    }

    #[test]
    fn test_draw_text_stays_in_measured_box() {
        let mut frame = RgbImage::from_pixel(64, 32, Rgb([255, 255, 255]));
        let style = FontStyle::default();
        let size = BitmapFont.text_size("cat", style);
        BitmapFont.draw_text(&mut frame, "cat", (4, 20), style, Rgb([0, 0, 0]));

        let mut inked = 0;
        for (x, y, px) in frame.enumerate_pixels() {
            if *px == Rgb([0, 0, 0]) {
                inked += 1;
                assert!(x >= 4 && x < 4 + size.width);
                assert!(y >= 20 - size.height && y < 20 + size.baseline);
            }
        }
        assert!(inked > 0);
    }

    #[test]
    fn test_draw_text_clips_at_edges() {
        let mut frame = RgbImage::new(4, 4);
        // Must not panic when the text runs off every side.
        BitmapFont.draw_text(&mut frame, "WWWW", (-6, 2), FontStyle::default(), Rgb([9, 9, 9]));
    }

    #[test]
    fn test_huge_scale_saturates() {
        let style = FontStyle {
            scale: 1e9,
            thickness: u32::MAX,
        };
        let size = BitmapFont.text_size("person: 0.9", style);
        assert_eq!(size.width, u32::MAX);
        assert_eq!(size.baseline, u32::MAX);

        let mut frame = RgbImage::new(8, 8);
        BitmapFont.draw_text(&mut frame, "person: 0.9", (0, 4), style, Rgb([1, 2, 3]));
        BitmapFont.draw_text(&mut frame, "x", (i32::MIN, i32::MAX), style, Rgb([1, 2, 3]));
    }
}
