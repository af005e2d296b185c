use crate::{hit::Hit, math::Ray};

/// Nearest-hit queries against a static scene.
///
/// Implementations have to be deterministic and free of side effects so that independent
/// captures can share one instance across threads.
pub trait GeometryQuery: Send + Sync {
    /// Finds the nearest surface along `ray` within `max_distance`, if any.
    fn query(&self, ray: Ray<f32>, max_distance: f32) -> Option<Hit>;
}
