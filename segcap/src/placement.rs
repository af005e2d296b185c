use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    camera::{CaptureRequest, Lens, Orientation},
    math::{Bounds3, Point3, Vec3},
    scene::Scene,
    segcap_info, segcap_warn,
};

#[derive(Debug, Error, PartialEq)]
pub enum PlacementError {
    #[error("Road '{0}' has no measurable extent")]
    NoExtent(String),
    #[error("Invalid spacing [{min}, {max}]")]
    InvalidSpacing { min: f32, max: f32 },
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PlacementSettings {
    /// Camera height above the bottom of the road bounds
    pub camera_height: f32,
    pub min_spacing: f32,
    pub max_spacing: f32,
    /// Length left uncovered at the far end of each road
    pub end_margin: f32,
    /// Center cameras get an integer yaw offset in `[-yaw_jitter, yaw_jitter)` degrees
    pub yaw_jitter: i32,
    /// Extra yaw for the side cameras in `[-side_yaw_jitter, side_yaw_jitter)` degrees
    pub side_yaw_jitter: i32,
    pub seed: u64,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            camera_height: 6.0,
            min_spacing: 30.0,
            max_spacing: 50.0,
            end_margin: 50.0,
            yaw_jitter: 10,
            side_yaw_jitter: 3,
            seed: 0,
        }
    }
}

/// Places rows of three cameras along roads, looking down the road.
pub struct RoadPlacer {
    settings: PlacementSettings,
    lens: Lens,
    rng: Pcg32,
}

impl RoadPlacer {
    pub fn new(settings: PlacementSettings, lens: Lens) -> Result<Self, PlacementError> {
        let PlacementSettings {
            min_spacing,
            max_spacing,
            ..
        } = settings;
        // The spacing range has to be finite and non-empty
        if !(min_spacing > 0.0 && min_spacing.is_finite())
            || !max_spacing.is_finite()
            || max_spacing < min_spacing
        {
            return Err(PlacementError::InvalidSpacing {
                min: min_spacing,
                max: max_spacing,
            });
        }

        Ok(Self {
            settings,
            lens,
            rng: Pcg32::new(settings.seed, 0),
        })
    }

    /// Places cameras along every road in `scene`, skipping the ones without extent.
    pub fn place_scene(&mut self, scene: &Scene) -> Vec<CaptureRequest> {
        let mut requests = Vec::new();
        for (road, bounds) in scene.roads() {
            match self.place_road(&road.name, bounds) {
                Ok(placed) => {
                    segcap_info!("Road '{}': placed {} cameras", road.name, placed.len());
                    requests.extend(placed);
                }
                Err(why) => segcap_warn!("Skipping road: {}", why),
            }
        }
        requests
    }

    /// Places cameras along a single road with world space `bounds`.
    pub fn place_road(
        &mut self,
        name: &str,
        bounds: Bounds3<f32>,
    ) -> Result<Vec<CaptureRequest>, PlacementError> {
        if bounds.is_empty() {
            return Err(PlacementError::NoExtent(name.to_string()));
        }
        let size = bounds.diagonal();
        if size.x <= 0.0 && size.z <= 0.0 {
            return Err(PlacementError::NoExtent(name.to_string()));
        }

        let center = bounds.center();
        let height = bounds.p_min.y + self.settings.camera_height;
        let along_z = size.x < size.z;
        let (start, end, direction, side, base_yaw) = if along_z {
            (
                Point3::new(center.x, height, bounds.p_min.z),
                Point3::new(center.x, height, bounds.p_max.z),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 0.0),
                0.0,
            )
        } else {
            (
                Point3::new(bounds.p_min.x, height, center.z),
                Point3::new(bounds.p_max.x, height, center.z),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                90.0,
            )
        };
        let side_offset = side * (size.x.min(size.z) / 4.0);

        let mut requests = Vec::new();
        let mut remaining = start.dist(end) - self.settings.end_margin;
        let mut position = start;
        while remaining > 0.0 {
            let yaw = base_yaw + self.jitter(self.settings.yaw_jitter) as f32;
            requests.push(CaptureRequest::new(
                &self.lens,
                position,
                Orientation::yaw(yaw),
            ));

            let side_yaw = yaw + self.jitter(self.settings.side_yaw_jitter) as f32;
            for p in [position - side_offset, position + side_offset] {
                requests.push(CaptureRequest::new(&self.lens, p, Orientation::yaw(side_yaw)));
            }

            let spacing = remaining.min(self.spacing());
            position += direction * spacing;
            remaining -= spacing;
        }

        Ok(requests)
    }

    fn jitter(&mut self, range: i32) -> i32 {
        if range > 0 {
            self.rng.gen_range(-range..range)
        } else {
            0
        }
    }

    fn spacing(&mut self) -> f32 {
        if self.settings.max_spacing > self.settings.min_spacing {
            self.rng
                .gen_range(self.settings.min_spacing..self.settings.max_spacing)
        } else {
            self.settings.min_spacing
        }
    }
}
