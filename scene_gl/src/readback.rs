/// Read-back — colour and depth images of the bound target.
///
/// The device returns rows bottom to top; both image types store rows top
/// to bottom, so the rows are flipped on the way out.

use image::{ImageBuffer, Luma, Rgb, RgbImage};
use crate::camera::ClipPlanes;
use crate::device::{GlDevice, PixelFormat, PixelRect};

/// Row-major index of pixel (x, y)
fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

// ===== BGR IMAGE =====

/// 8-bit BGR image, rows top to bottom, tightly packed
#[derive(Debug, Clone, PartialEq)]
pub struct BgrImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl BgrImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// `[b, g, r]` at column `x` of row `y` (row 0 is the top)
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = pixel_index(self.width, x, y) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Convert to an RGB `image` buffer
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let [b, g, r] = self.pixel(x, y);
            Rgb([r, g, b])
        })
    }
}

// ===== DEPTH IMAGE =====

/// Eye-space depth in scene units, rows top to bottom
///
/// Pixels where nothing was drawn hold 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthImage {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl DepthImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Depth at column `x` of row `y` (row 0 is the top)
    pub fn depth(&self, x: u32, y: u32) -> f32 {
        self.data[pixel_index(self.width, x, y)]
    }

    /// Convert to a single-channel `f32` image buffer
    pub fn to_luma_image(&self) -> ImageBuffer<Luma<f32>, Vec<f32>> {
        ImageBuffer::from_fn(self.width, self.height, |x, y| Luma([self.depth(x, y)]))
    }
}

// ===== READ-BACK =====

fn full_rect(width: u32, height: u32) -> PixelRect {
    PixelRect::new(0, 0, width as i32, height as i32)
}

/// Reverse the row order of a tightly packed image
fn flip_rows<T: Copy>(data: &[T], row_len: usize) -> Vec<T> {
    if row_len == 0 {
        return Vec::new();
    }
    data.chunks_exact(row_len).rev().flatten().copied().collect()
}

/// Read the bound target's `width`×`height` colour as BGR
pub fn read_bgr_image(device: &dyn GlDevice, width: u32, height: u32) -> BgrImage {
    let raw = device.read_pixels(full_rect(width, height), PixelFormat::Bgr);
    BgrImage {
        width,
        height,
        data: flip_rows(&raw, width as usize * 3),
    }
}

/// Read the bound target's depth buffer as eye-space distances
///
/// Values are linearized with `clip`; the cleared value 1.0 becomes 0.0.
pub fn read_depth_image(device: &dyn GlDevice, width: u32, height: u32, clip: ClipPlanes) -> DepthImage {
    let raw = device.read_depth(full_rect(width, height));
    let data = flip_rows(&raw, width as usize)
        .into_iter()
        .map(|d| if d >= 1.0 { 0.0 } else { clip.linearize_depth(d) })
        .collect();
    DepthImage { width, height, data }
}

#[cfg(test)]
#[path = "readback_tests.rs"]
mod tests;
