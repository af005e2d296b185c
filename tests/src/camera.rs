#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use segcap::{
        camera::{CaptureRequest, Lens, Orientation},
        math::{Point3, Vec2, Vec3},
    };

    #[test]
    fn from_lens() {
        let lens = Lens::default();
        assert_eq!((lens.width, lens.height), (960, 540));
        assert_eq!(lens.fov, 10.0);
        assert_eq!(lens.far_clip, 200.0);

        let position = Point3::new(1.0, 2.0, 3.0);
        let request = CaptureRequest::new(&lens, position, Orientation::yaw(45.0));
        assert_eq!(request.resolution, Vec2::new(960, 540));
        assert_eq!(request.position, position);
        assert_eq!(request.orientation, Orientation::new(0.0, 45.0, 0.0));
        assert_eq!(request.pixel_count(), 960 * 540);
    }

    #[test]
    fn far_plane() {
        let lens = Lens {
            fov: 90.0,
            aspect: 2.0,
            far_clip: 10.0,
            ..Lens::default()
        };
        let request = CaptureRequest::new(&lens, Point3::zeros(), Orientation::default());
        let plane = request.far_plane();

        // tan(45) = 1 so the half height equals the distance
        assert_abs_diff_eq!(plane.top_left, Point3::new(-20.0, 10.0, 10.0), epsilon = 1e-4);
        assert_abs_diff_eq!(plane.top_right, Point3::new(20.0, 10.0, 10.0), epsilon = 1e-4);
        assert_abs_diff_eq!(plane.bottom_left, Point3::new(-20.0, -10.0, 10.0), epsilon = 1e-4);
        assert_abs_diff_eq!(plane.bottom_right, Point3::new(20.0, -10.0, 10.0), epsilon = 1e-4);
    }

    #[test]
    fn far_plane_default_lens() {
        let request =
            CaptureRequest::new(&Lens::default(), Point3::zeros(), Orientation::default());
        let plane = request.far_plane();
        let half_h = 200.0 * 5.0f32.to_radians().tan();
        let half_w = half_h * 960.0 / 540.0;
        assert_abs_diff_eq!(
            plane.top_left,
            Point3::new(-half_w, half_h, 200.0),
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(
            plane.bottom_right,
            Point3::new(half_w, -half_h, 200.0),
            epsilon = 1e-3
        );
    }

    #[test]
    fn oriented() {
        let lens = Lens {
            fov: 90.0,
            aspect: 1.0,
            far_clip: 10.0,
            ..Lens::default()
        };
        let position = Point3::new(5.0, 6.0, 0.0);
        let request = CaptureRequest::new(&lens, position, Orientation::yaw(90.0));

        let (right, up, forward) = request.basis();
        assert_abs_diff_eq!(forward, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_abs_diff_eq!(right, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_abs_diff_eq!(up, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);

        let plane = request.far_plane();
        assert_abs_diff_eq!(plane.top_left, Point3::new(15.0, 16.0, 10.0), epsilon = 1e-4);
        assert_abs_diff_eq!(plane.bottom_right, Point3::new(15.0, -4.0, -10.0), epsilon = 1e-4);

        // Camera to world agrees with the basis
        let to_world = request.camera_to_world();
        assert_abs_diff_eq!(
            &to_world * Point3::new(0.0, 0.0, 1.0),
            Point3::new(6.0, 6.0, 0.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn pitched() {
        let lens = Lens {
            fov: 90.0,
            aspect: 1.0,
            far_clip: 10.0,
            ..Lens::default()
        };
        let request = CaptureRequest::new(&lens, Point3::zeros(), Orientation::new(90.0, 0.0, 0.0));
        let (_, up, forward) = request.basis();
        assert_abs_diff_eq!(forward, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-6);
        assert_abs_diff_eq!(up, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }
}
