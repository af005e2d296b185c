use serde::{Deserialize, Serialize};

use crate::math::{
    transforms::{rotation_euler, translation},
    Point3, Transform, Vec2, Vec3,
};

/// Intrinsics shared by every capture
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Lens {
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Width over height of the far plane
    pub aspect: f32,
    pub far_clip: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            fov: 10.0,
            aspect: 960.0 / 540.0,
            far_clip: 200.0,
        }
    }
}

/// Euler angles in degrees, applied roll first, then pitch and finally yaw
#[derive(Copy, Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Orientation {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Orientation {
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    pub fn yaw(yaw: f32) -> Self {
        Self::new(0.0, yaw, 0.0)
    }

    pub fn rotation(&self) -> Transform<f32> {
        rotation_euler(Vec3::new(self.pitch, self.yaw, self.roll))
    }
}

/// Everything one capture needs to know about its camera. Immutable once issued.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CaptureRequest {
    pub resolution: Vec2<u32>,
    pub fov: f32,
    pub aspect: f32,
    pub far_clip: f32,
    pub position: Point3<f32>,
    pub orientation: Orientation,
}

/// Corners of the far clip plane in world space
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FarPlane {
    pub top_left: Point3<f32>,
    pub top_right: Point3<f32>,
    pub bottom_left: Point3<f32>,
    pub bottom_right: Point3<f32>,
}

impl CaptureRequest {
    pub fn new(lens: &Lens, position: Point3<f32>, orientation: Orientation) -> Self {
        Self {
            resolution: Vec2::new(lens.width, lens.height),
            fov: lens.fov,
            aspect: lens.aspect,
            far_clip: lens.far_clip,
            position,
            orientation,
        }
    }

    pub fn camera_to_world(&self) -> Transform<f32> {
        &translation(Vec3::from(self.position)) * &self.orientation.rotation()
    }

    /// Returns the world space (right, up, forward) basis of the camera.
    pub fn basis(&self) -> (Vec3<f32>, Vec3<f32>, Vec3<f32>) {
        let rotation = self.orientation.rotation();
        (
            (&rotation * Vec3::new(1.0, 0.0, 0.0)).normalized(),
            (&rotation * Vec3::new(0.0, 1.0, 0.0)).normalized(),
            (&rotation * Vec3::new(0.0, 0.0, 1.0)).normalized(),
        )
    }

    pub fn far_plane(&self) -> FarPlane {
        let (right, up, forward) = self.basis();
        let half_h = self.far_clip * (self.fov.to_radians() / 2.0).tan();
        let half_w = half_h * self.aspect;

        let center = self.position + forward * self.far_clip;
        let dx = right * half_w;
        let dy = up * half_h;

        FarPlane {
            top_left: center - dx + dy,
            top_right: center + dx + dy,
            bottom_left: center - dx - dy,
            bottom_right: center + dx - dy,
        }
    }

    pub fn pixel_count(&self) -> usize {
        (self.resolution.x as usize) * (self.resolution.y as usize)
    }
}
