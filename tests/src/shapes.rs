#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use std::sync::Arc;

    use segcap::{
        math::{
            transforms::{scale, translation},
            Normal, Point3, Ray, Transform, Vec3,
        },
        scene::{ObjectId, SceneError},
        shapes::{Mesh, Shape, Sphere},
    };

    fn forward_ray(x: f32, y: f32) -> Ray<f32> {
        Ray::new(Point3::new(x, y, 0.0), Vec3::new(0.0, 0.0, 1.0), f32::INFINITY)
    }

    fn unit_quad(z: f32) -> Vec<Arc<dyn Shape>> {
        let mesh = Mesh::quad(
            &Transform::identity(),
            [
                Point3::new(-1.0, -1.0, z),
                Point3::new(1.0, -1.0, z),
                Point3::new(1.0, 1.0, z),
                Point3::new(-1.0, 1.0, z),
            ],
        )
        .unwrap();
        Arc::new(mesh).triangles(ObjectId(7))
    }

    fn nearest(shapes: &[Arc<dyn Shape>], ray: &Ray<f32>) -> Option<f32> {
        shapes
            .iter()
            .filter_map(|s| s.intersect(ray))
            .map(|h| h.t)
            .fold(None, |acc: Option<f32>, t| Some(acc.map_or(t, |a| a.min(t))))
    }

    #[test]
    fn quad_hit() {
        let quad = unit_quad(5.0);
        assert_eq!(quad.len(), 2);

        let hit = quad
            .iter()
            .find_map(|s| s.intersect(&forward_ray(0.25, 0.5)))
            .unwrap();
        assert_abs_diff_eq!(hit.t, 5.0);
        assert_abs_diff_eq!(hit.p, Point3::new(0.25, 0.5, 5.0), epsilon = 1e-6);
        assert_eq!(hit.object, ObjectId(7));
        // Facing the ray origin
        assert_abs_diff_eq!(hit.n, Normal::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn quad_miss() {
        let quad = unit_quad(5.0);
        assert!(nearest(&quad, &forward_ray(1.5, 0.0)).is_none());
        // Behind the origin
        assert!(nearest(&quad, &forward_ray(0.0, 0.0).limited(4.0)).is_none());
        let backwards = Ray::new(Point3::zeros(), Vec3::new(0.0, 0.0, -1.0), f32::INFINITY);
        assert!(nearest(&quad, &backwards).is_none());
    }

    #[test]
    fn quad_diagonal() {
        // The shared edge belongs to at least one of the triangles
        let quad = unit_quad(5.0);
        for i in 0..=10 {
            let v = -0.9 + 0.18 * i as f32;
            assert!(nearest(&quad, &forward_ray(v, v)).is_some(), "{}", v);
        }
    }

    #[test]
    fn world_bound() {
        let quad = unit_quad(5.0);
        let bound = quad
            .iter()
            .fold(segcap::math::Bounds3::empty(), |b, s| b.union_b(s.world_bound()));
        assert_eq!(bound.p_min, Point3::new(-1.0, -1.0, 5.0));
        assert_eq!(bound.p_max, Point3::new(1.0, 1.0, 5.0));
    }

    #[test]
    fn cuboid() {
        let mesh = Mesh::cuboid(
            &translation(Vec3::new(0.0, 0.0, 10.0)),
            Point3::zeros(),
            Vec3::new(2.0, 2.0, 4.0),
        )
        .unwrap();
        assert_eq!(mesh.indices.len(), 36);
        let cube = Arc::new(mesh).triangles(ObjectId(0));
        assert_eq!(cube.len(), 12);

        // Nearest face is the one at z = 8
        assert_abs_diff_eq!(nearest(&cube, &forward_ray(0.2, 0.3)).unwrap(), 8.0);
        // From inside, the far face
        let inside = Ray::new(
            Point3::new(0.0, 0.0, 10.0),
            Vec3::new(1.0, 0.0, 0.0),
            f32::INFINITY,
        );
        assert_abs_diff_eq!(nearest(&cube, &inside).unwrap(), 1.0);
        assert!(nearest(&cube, &forward_ray(1.5, 0.0)).is_none());
    }

    #[test]
    fn mesh_validation() {
        let points = vec![Point3::zeros(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
        assert!(Mesh::new(&Transform::identity(), vec![0, 1, 2], points.clone()).is_ok());
        assert!(matches!(
            Mesh::new(&Transform::identity(), vec![0, 1], points.clone()),
            Err(SceneError::InvalidShape(_))
        ));
        assert!(matches!(
            Mesh::new(&Transform::identity(), vec![0, 1, 3], points),
            Err(SceneError::InvalidShape(_))
        ));
        assert!(matches!(
            Mesh::cuboid(
                &Transform::identity(),
                Point3::zeros(),
                Vec3::new(1.0, -1.0, 1.0)
            ),
            Err(SceneError::InvalidShape(_))
        ));
    }

    #[test]
    fn mesh_to_world() {
        let mesh = Mesh::new(
            &translation(Vec3::new(0.0, 0.0, 3.0)),
            vec![0, 1, 2],
            vec![Point3::zeros(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
        )
        .unwrap();
        assert_eq!(mesh.points[1], Point3::new(1.0, 0.0, 3.0));
    }

    #[test]
    fn sphere() {
        let sphere = Sphere::new(&translation(Vec3::new(0.0, 0.0, 10.0)), 2.0, ObjectId(3));
        let hit = sphere.intersect(&forward_ray(0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(hit.t, 8.0, epsilon = 1e-5);
        assert_abs_diff_eq!(hit.n, Normal::new(0.0, 0.0, -1.0), epsilon = 1e-5);
        assert_eq!(hit.object, ObjectId(3));
        assert_eq!(sphere.object(), ObjectId(3));

        assert!(sphere.intersect(&forward_ray(2.5, 0.0)).is_none());
        assert!(sphere.intersect(&forward_ray(0.0, 0.0).limited(7.0)).is_none());

        // From inside the far side is hit
        let inside = Ray::new(
            Point3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, 1.0, 0.0),
            f32::INFINITY,
        );
        assert_abs_diff_eq!(sphere.intersect(&inside).unwrap().t, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn scaled_sphere() {
        // Distances stay in world units through a scaling transform
        let to_world = &translation(Vec3::new(0.0, 0.0, 10.0)) * &scale(Vec3::new(1.0, 1.0, 3.0));
        let sphere = Sphere::new(&to_world, 1.0, ObjectId(0));
        let hit = sphere.intersect(&forward_ray(0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(hit.t, 7.0, epsilon = 1e-5);

        let bound = sphere.world_bound();
        assert_abs_diff_eq!(bound.p_min, Point3::new(-1.0, -1.0, 7.0), epsilon = 1e-5);
        assert_abs_diff_eq!(bound.p_max, Point3::new(1.0, 1.0, 13.0), epsilon = 1e-5);
    }
}
