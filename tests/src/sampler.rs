#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_abs_diff_ne};

    use segcap::{
        camera::{CaptureRequest, Lens, Orientation},
        capture::FrameSampler,
        hit::Hit,
        math::{Point2, Point3, Ray, Vec3},
        query::GeometryQuery,
        scene::ObjectId,
    };

    use crate::common::forward_request;

    #[test]
    fn corners() {
        let request = forward_request();
        let sampler = FrameSampler::new(&request);
        let plane = request.far_plane();

        assert_abs_diff_eq!(sampler.pixel_point(0, 0), plane.top_left, epsilon = 1e-4);

        // The last column and row stop one pixel short of the far edges
        let last = sampler.pixel_point(959, 539);
        assert_abs_diff_ne!(last, plane.bottom_right, epsilon = 1e-3);
        let step_x = (plane.top_right.x - plane.top_left.x) / 960.0;
        let step_y = (plane.top_left.y - plane.bottom_left.y) / 540.0;
        assert_abs_diff_eq!(
            last,
            Point3::new(plane.bottom_right.x - step_x, plane.bottom_right.y + step_y, 200.0),
            epsilon = 1e-3
        );
    }

    #[test]
    fn rays() {
        let request = forward_request();
        let sampler = FrameSampler::new(&request);

        let ray = sampler.ray(480, 270);
        assert_eq!(ray.o, request.position);
        assert_abs_diff_eq!(ray.d.len(), 1.0, epsilon = 1e-6);
        // j = W/2, i = H/2 is exactly the center of the far plane
        assert_abs_diff_eq!(ray.d, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
        assert_eq!(ray.t_max, request.far_clip);

        // Columns go right, rows go down
        assert!(sampler.ray(0, 270).d.x < 0.0);
        assert!(sampler.ray(959, 270).d.x > 0.0);
        assert!(sampler.ray(480, 0).d.y > 0.0);
        assert!(sampler.ray(480, 539).d.y < 0.0);
    }

    #[test]
    fn moved_camera() {
        let lens = Lens::default();
        let position = Point3::new(3.0, 6.0, -2.0);
        let request = CaptureRequest::new(&lens, position, Orientation::yaw(90.0));
        let sampler = FrameSampler::new(&request);
        let ray = sampler.ray(480, 270);
        assert_eq!(ray.o, position);
        assert_abs_diff_eq!(ray.d, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    // Reports a hit for a fixed set of pixels, found by their ray direction
    struct Recorder;

    impl GeometryQuery for Recorder {
        fn query(&self, ray: Ray<f32>, max_distance: f32) -> Option<Hit> {
            assert_eq!(max_distance, 200.0);
            if ray.d.x > 0.0 && ray.d.y > 0.0 {
                Some(Hit {
                    t: 1.0,
                    p: ray.point(1.0),
                    n: ray.d.into(),
                    object: ObjectId(0),
                })
            } else {
                None
            }
        }
    }

    #[test]
    fn sweep() {
        let lens = Lens {
            width: 8,
            height: 4,
            aspect: 2.0,
            ..Lens::default()
        };
        let request = CaptureRequest::new(&lens, Point3::zeros(), Orientation::default());
        let sampler = FrameSampler::new(&request);

        let mut visited = Vec::new();
        let mut hits = Vec::new();
        sampler.sweep(&Recorder, |pixel, hit| {
            visited.push(pixel);
            if hit.is_some() {
                hits.push(pixel);
            }
        });

        assert_eq!(visited.len(), 32);
        // Rows outer, columns inner
        assert_eq!(visited[0], Point2::new(0, 0));
        assert_eq!(visited[1], Point2::new(1, 0));
        assert_eq!(visited[8], Point2::new(0, 1));
        assert_eq!(visited[31], Point2::new(7, 3));

        // Upper right quadrant, excluding the center column and row
        let expected: Vec<_> = (0..2)
            .flat_map(|i| (5..8).map(move |j| Point2::new(j, i)))
            .collect();
        assert_eq!(hits, expected);
    }
}
