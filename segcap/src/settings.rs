use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    camera::Lens,
    capture::{Emitter, MaskFilter, OutputLayout},
    placement::PlacementSettings,
    scene::SceneLoadSettings,
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Everything configurable about a run. Missing fields take their defaults.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub lens: Lens,
    /// Masks need a bounding box strictly wider and taller than this, in pixels
    pub min_extent: u32,
    pub output_root: PathBuf,
    /// Capture threads, 0 for one per logical core
    pub threads: usize,
    pub bvh: SceneLoadSettings,
    pub placement: PlacementSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lens: Lens::default(),
            min_extent: MaskFilter::default().min_extent,
            output_root: PathBuf::from("ScreenShoot"),
            threads: 0,
            bvh: SceneLoadSettings::default(),
            placement: PlacementSettings::default(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Parses and validates settings. An empty document gives the defaults.
    pub fn from_yaml(text: &str) -> Result<Self, SettingsError> {
        let settings = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: String| Err(SettingsError::Invalid(msg));

        let Lens {
            width,
            height,
            fov,
            aspect,
            far_clip,
        } = self.lens;
        if width == 0 || height == 0 {
            return invalid(format!("Resolution {}x{} has no pixels", width, height));
        }
        if !(fov > 0.0 && fov < 180.0) {
            return invalid(format!("Field of view {} is outside (0, 180)", fov));
        }
        if !(aspect > 0.0 && aspect.is_finite()) {
            return invalid(format!("Aspect ratio {} is not positive", aspect));
        }
        if !(far_clip > 0.0 && far_clip.is_finite()) {
            return invalid(format!("Far clip {} is not positive", far_clip));
        }
        if self.bvh.max_shapes_in_node == 0 {
            return invalid("BVH nodes need room for at least one shape".into());
        }

        let p = &self.placement;
        if !(p.min_spacing > 0.0 && p.min_spacing.is_finite()) {
            return invalid(format!(
                "Minimum spacing {} is not positive and finite",
                p.min_spacing
            ));
        }
        if !p.max_spacing.is_finite() {
            return invalid(format!("Maximum spacing {} is not finite", p.max_spacing));
        }
        if p.min_spacing > p.max_spacing {
            return invalid(format!(
                "Minimum spacing {} is larger than maximum spacing {}",
                p.min_spacing, p.max_spacing
            ));
        }
        if p.yaw_jitter < 0 || p.side_yaw_jitter < 0 {
            return invalid("Yaw jitter can't be negative".into());
        }

        Ok(())
    }

    pub fn emitter(&self) -> Emitter {
        Emitter::new(
            OutputLayout::new(&self.output_root),
            MaskFilter::new(self.min_extent),
        )
    }
}
