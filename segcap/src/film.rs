use image::{Rgb, RgbImage};

use crate::math::{Point2, Vec2, Vec3};

/// The color buffer of one capture, linear RGB in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct RawFrame {
    res: Vec2<u32>,
    // Row-major, row 0 at the top
    pixels: Vec<Vec3<f32>>,
}

impl RawFrame {
    /// Creates a new `RawFrame` filled with `clear_color`.
    pub fn new(res: Vec2<u32>, clear_color: Vec3<f32>) -> Self {
        Self {
            res,
            pixels: vec![clear_color; (res.x as usize) * (res.y as usize)],
        }
    }

    pub fn res(&self) -> Vec2<u32> {
        self.res
    }

    pub fn pixels(&self) -> &[Vec3<f32>] {
        &self.pixels
    }

    /// Creates a new `RawFrame` from row-major `pixels`.
    /// Returns `None` if the count doesn't match `res`.
    pub fn from_pixels(res: Vec2<u32>, pixels: Vec<Vec3<f32>>) -> Option<Self> {
        if pixels.len() == (res.x as usize) * (res.y as usize) {
            Some(Self { res, pixels })
        } else {
            None
        }
    }

    pub fn pixel(&self, p: Point2<u32>) -> Vec3<f32> {
        self.pixels[(p.y as usize) * (self.res.x as usize) + (p.x as usize)]
    }

    pub fn set_pixel(&mut self, p: Point2<u32>, color: Vec3<f32>) {
        let offset = (p.y as usize) * (self.res.x as usize) + (p.x as usize);
        self.pixels[offset] = color;
    }

    /// Quantizes the buffer to 8 bits per channel.
    pub fn to_image(&self) -> RgbImage {
        let quantize = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        RgbImage::from_fn(self.res.x, self.res.y, |x, y| {
            let c = self.pixel(Point2::new(x, y));
            Rgb([quantize(c.x), quantize(c.y), quantize(c.z)])
        })
    }
}
