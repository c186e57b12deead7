//! Input blob preparation for MobileNet-SSD style networks.

use std::borrow::Cow;

use image::RgbImage;
use image::imageops::{self, FilterType};
use ndarray::Array4;

/// Turns an RGB frame into a normalized NCHW blob.
///
/// Each channel value becomes `(value - mean) * scale`. The defaults match
/// the Caffe MobileNet-SSD deploy model: 300x300 input, mean 127.5,
/// scale 1/127.5.
#[derive(Debug, Clone)]
pub struct SsdPreprocessor {
    pub input_width: u32,
    pub input_height: u32,
    pub scale: f32,
    pub mean: [f32; 3],
    /// Emit channels in BGR order instead of RGB.
    pub swap_rb: bool,
}

impl Default for SsdPreprocessor {
    fn default() -> Self {
        Self {
            input_width: 300,
            input_height: 300,
            scale: 0.007843,
            mean: [127.5; 3],
            swap_rb: false,
        }
    }
}

impl SsdPreprocessor {
    /// Resize `frame` to the network input and return a `[1, 3, H, W]` blob.
    ///
    /// The frame is stretched, not cropped, so the normalized boxes the
    /// network returns map straight back onto the original frame.
    pub fn blob(&self, frame: &RgbImage) -> Array4<f32> {
        let (w, h) = (self.input_width, self.input_height);
        let resized = if frame.dimensions() == (w, h) {
            Cow::Borrowed(frame)
        } else {
            Cow::Owned(imageops::resize(frame, w, h, FilterType::Triangle))
        };

        let mut blob = Array4::<f32>::zeros((1, 3, h as usize, w as usize));
        for (x, y, px) in resized.enumerate_pixels() {
            for c in 0..3 {
                let src = if self.swap_rb { 2 - c } else { c };
                blob[[0, c, y as usize, x as usize]] =
                    (px.0[src] as f32 - self.mean[c]) * self.scale;
            }
        }
        blob
    }
}
