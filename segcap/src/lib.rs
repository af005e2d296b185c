#[macro_use]
mod macros;

pub mod bvh;
pub mod camera;
pub mod capture;
pub mod film;
pub mod hit;
pub mod math;
pub mod placement;
pub mod query;
pub mod render;
pub mod runner;
pub mod scene;
pub mod settings;
pub mod shapes;

// Used by the exported logging macros
pub use log;
