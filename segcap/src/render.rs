use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    camera::CaptureRequest,
    capture::FrameSampler,
    film::RawFrame,
    math::{Vec2, Vec3},
    query::GeometryQuery,
    scene::Scene,
};

/// Produces the color frame of a capture.
pub trait FrameRenderer: Send + Sync {
    fn render(&self, request: &CaptureRequest) -> RawFrame;
}

/// Fills the whole frame with one color.
pub struct SolidRenderer {
    pub color: Vec3<f32>,
}

impl FrameRenderer for SolidRenderer {
    fn render(&self, request: &CaptureRequest) -> RawFrame {
        RawFrame::new(request.resolution, self.color)
    }
}

/// Object colors with simple headlight shading over a sky gradient.
pub struct ShadedRenderer {
    scene: Arc<Scene>,
    sky_horizon: Vec3<f32>,
    sky_zenith: Vec3<f32>,
}

impl ShadedRenderer {
    pub fn new(scene: Arc<Scene>) -> Self {
        Self {
            scene,
            sky_horizon: Vec3::new(0.85, 0.9, 0.95),
            sky_zenith: Vec3::new(0.35, 0.55, 0.85),
        }
    }

    fn shade(&self, sampler: &FrameSampler, j: u32, i: u32) -> Vec3<f32> {
        let ray = sampler.ray(j, i);
        match self.scene.query(ray, sampler.request().far_clip) {
            Some(hit) => {
                let albedo = self
                    .scene
                    .object(hit.object)
                    .map_or_else(|| Vec3::splat(0.5), |o| o.color);
                albedo * (0.2 + 0.8 * ray.d.dot_n(hit.n).abs())
            }
            None => {
                let t = ray.d.y.clamp(0.0, 1.0);
                self.sky_horizon * (1.0 - t) + self.sky_zenith * t
            }
        }
    }
}

impl FrameRenderer for ShadedRenderer {
    fn render(&self, request: &CaptureRequest) -> RawFrame {
        let sampler = FrameSampler::new(request);
        let Vec2 { x: w, y: h } = request.resolution;

        // Rows in parallel, the collect keeps them in order
        let pixels: Vec<Vec3<f32>> = (0..h)
            .into_par_iter()
            .flat_map_iter(|i| {
                let sampler = &sampler;
                (0..w).map(move |j| self.shade(sampler, j, i))
            })
            .collect();

        RawFrame::from_pixels(request.resolution, pixels)
            .unwrap_or_else(|| RawFrame::new(request.resolution, self.sky_horizon))
    }
}
