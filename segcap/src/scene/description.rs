use serde::Deserialize;

use super::{Categories, SceneError};
use crate::math::{
    transforms::{rotation_euler, scale, translation},
    Transform, Vec3,
};

/// Top level of a scene file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Road,
    Detectable,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectDescription {
    pub name: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default = "default_color")]
    pub color: [f32; 3],
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler angles in degrees
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    #[serde(default)]
    pub shapes: Vec<ShapeDescription>,
}

/// Shapes are given in object space
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum ShapeDescription {
    Sphere {
        #[serde(default)]
        center: [f32; 3],
        radius: f32,
    },
    Cuboid {
        #[serde(default)]
        center: [f32; 3],
        size: [f32; 3],
    },
    Quad {
        corners: [[f32; 3]; 4],
    },
    Mesh {
        points: Vec<[f32; 3]>,
        indices: Vec<usize>,
    },
}

fn default_color() -> [f32; 3] {
    [0.5, 0.5, 0.5]
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl ObjectDescription {
    pub fn categories(&self) -> Categories {
        self.categories
            .iter()
            .fold(Categories::empty(), |acc, c| match c {
                Category::Road => acc | Categories::ROAD,
                Category::Detectable => acc | Categories::DETECTABLE,
            })
    }

    /// Returns `translation(position) * rotation(rotation) * scale(scale)`.
    pub fn object_to_world(&self) -> Result<Transform<f32>, SceneError> {
        if self.scale.iter().any(|&s| s == 0.0 || !s.is_finite()) {
            return Err(SceneError::InvalidShape(format!(
                "Object '{}' has a degenerate scale {:?}",
                self.name, self.scale
            )));
        }
        if self
            .position
            .iter()
            .chain(self.rotation.iter())
            .any(|v| !v.is_finite())
        {
            return Err(SceneError::InvalidShape(format!(
                "Object '{}' has a non-finite position or rotation",
                self.name
            )));
        }

        let t = translation(Vec3::from(self.position));
        let r = rotation_euler(Vec3::from(self.rotation));
        let s = scale(Vec3::from(self.scale));
        Ok(&t * &(&r * &s))
    }
}
