use crate::{
    camera::{CaptureRequest, FarPlane},
    hit::Hit,
    math::{lerp, Point2, Point3, Ray},
    query::GeometryQuery,
};

/// Turns pixels of a [CaptureRequest] into world space rays through its far plane.
pub struct FrameSampler {
    request: CaptureRequest,
    far_plane: FarPlane,
}

impl FrameSampler {
    pub fn new(request: &CaptureRequest) -> Self {
        Self {
            request: *request,
            far_plane: request.far_plane(),
        }
    }

    pub fn request(&self) -> &CaptureRequest {
        &self.request
    }

    /// Finds the far plane point of pixel (`j`, `i`), row 0 being the top.
    ///
    /// Interpolates with `j / W` and `i / H` so the last column and row stop one pixel short
    /// of the right and bottom edges.
    pub fn pixel_point(&self, j: u32, i: u32) -> Point3<f32> {
        let u = j as f32 / self.request.resolution.x as f32;
        let v = i as f32 / self.request.resolution.y as f32;
        let FarPlane {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        } = self.far_plane;
        lerp(v, lerp(u, top_left, top_right), lerp(u, bottom_left, bottom_right))
    }

    /// Creates the unit length ray from the camera through pixel (`j`, `i`).
    pub fn ray(&self, j: u32, i: u32) -> Ray<f32> {
        let o = self.request.position;
        let d = (self.pixel_point(j, i) - o).normalized();
        Ray::new(o, d, self.request.far_clip)
    }

    /// Queries every pixel once, rows outer and columns inner, handing each result to `f`.
    pub fn sweep<Q, F>(&self, query: &Q, mut f: F)
    where
        Q: GeometryQuery + ?Sized,
        F: FnMut(Point2<u32>, Option<Hit>),
    {
        let (w, h) = (self.request.resolution.x, self.request.resolution.y);
        for i in 0..h {
            for j in 0..w {
                let hit = query.query(self.ray(j, i), self.request.far_clip);
                f(Point2::new(j, i), hit);
            }
        }
    }
}
