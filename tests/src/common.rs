// Shared fixtures
#![cfg(test)]

use std::{path::PathBuf, sync::Arc};

use segcap::{
    camera::{CaptureRequest, Lens, Orientation},
    math::Point3,
    scene::{Scene, SceneLoadSettings},
};

/// Fresh directory under the system temp dir, unique per test and process.
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("segcap-{}-{}", name, std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn scene(yaml: &str) -> Arc<Scene> {
    Arc::new(Scene::from_yaml(yaml, &SceneLoadSettings::default()).unwrap())
}

/// Camera at the origin looking down +Z with the default lens
pub fn forward_request() -> CaptureRequest {
    CaptureRequest::new(&Lens::default(), Point3::zeros(), Orientation::default())
}

pub fn small_request(width: u32, height: u32) -> CaptureRequest {
    let lens = Lens {
        width,
        height,
        aspect: width as f32 / height as f32,
        ..Lens::default()
    };
    CaptureRequest::new(&lens, Point3::zeros(), Orientation::default())
}

/// YAML for an axis-aligned quad at depth `z` covering `[x0, x1] x [y0, y1]`
pub fn quad_object(
    name: &str,
    categories: &str,
    x0: f32,
    x1: f32,
    y0: f32,
    y1: f32,
    z: f32,
) -> String {
    format!(
        r#"
  - name: "{name}"
    categories: [{categories}]
    shapes:
      - type: quad
        corners: [[{x0}, {y0}, {z}], [{x1}, {y0}, {z}], [{x1}, {y1}, {z}], [{x0}, {y1}, {z}]]
"#
    )
}

/// Quad at depth `z` whose edges sit half a pixel outside the columns `j0..=j1` and rows
/// `i0..=i1` of the default lens, as seen from [forward_request].
pub fn pixel_quad(
    name: &str,
    categories: &str,
    j0: u32,
    j1: u32,
    i0: u32,
    i1: u32,
    z: f32,
) -> String {
    let lens = Lens::default();
    let half_h = z * (lens.fov.to_radians() / 2.0).tan();
    let half_w = half_h * lens.aspect;
    let x = |j: f32| -half_w + j * 2.0 * half_w / lens.width as f32;
    let y = |i: f32| half_h - i * 2.0 * half_h / lens.height as f32;
    quad_object(
        name,
        categories,
        x(j0 as f32 - 0.5),
        x(j1 as f32 + 0.5),
        y(i1 as f32 + 0.5),
        y(i0 as f32 - 0.5),
        z,
    )
}

pub fn scene_with(objects: &[String]) -> Arc<Scene> {
    scene(&format!("name: test\nobjects:\n{}", objects.concat()))
}
