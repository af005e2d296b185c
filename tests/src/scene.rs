#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use segcap::{
        math::{Point3, Ray, Vec3},
        query::GeometryQuery,
        scene::{
            display_name, Categories, DetectableSet, ObjectId, Scene, SceneError,
            SceneLoadSettings, SceneObject,
        },
    };

    use crate::common::temp_dir;

    const TOWN: &str = r#"
name: town
objects:
  - name: Road
    categories: [road]
    color: [0.35, 0.35, 0.35]
    shapes:
      - type: cuboid
        center: [0, -0.05, 100]
        size: [12, 0.1, 200]
  - name: Cube(Clone)
    categories: [detectable]
    color: [0.8, 0.2, 0.2]
    position: [0, 1, 40]
    shapes:
      - type: cuboid
        size: [2, 2, 2]
      - type: sphere
        center: [0, 2, 0]
        radius: 0.5
  - name: Wall
    position: [0, 0, 30]
    rotation: [0, 90, 0]
    shapes:
      - type: quad
        corners: [[0, -1, -1], [0, -1, 1], [0, 1, 1], [0, 1, -1]]
"#;

    fn load(yaml: &str) -> Result<Scene, SceneError> {
        Scene::from_yaml(yaml, &SceneLoadSettings::default())
    }

    #[test]
    fn objects() {
        let scene = load(TOWN).unwrap();
        assert_eq!(scene.name, "town");
        assert_eq!(scene.objects.len(), 3);

        let road = scene.object(ObjectId(0)).unwrap();
        assert_eq!(road.name, "Road");
        assert!(road.is_road());
        assert!(!road.is_detectable());
        assert_eq!(road.color, Vec3::new(0.35, 0.35, 0.35));

        let cube = scene.object(ObjectId(1)).unwrap();
        assert_eq!(cube.categories, Categories::DETECTABLE);
        assert_eq!(cube.display_name(), "Cube");

        let wall = scene.object(ObjectId(2)).unwrap();
        assert!(wall.categories.is_empty());
        assert!(scene.object(ObjectId(3)).is_none());

        // 12 + 12 triangles, one sphere and 2 triangles
        assert_eq!(scene.bvh.shape_count(), 27);
    }

    #[test]
    fn object_bounds() {
        let scene = load(TOWN).unwrap();
        let road = scene.object_bounds[0];
        assert_abs_diff_eq!(road.p_min, Point3::new(-6.0, -0.1, 0.0), epsilon = 1e-5);
        assert_abs_diff_eq!(road.p_max, Point3::new(6.0, 0.0, 200.0), epsilon = 1e-5);

        // Every shape of the cube object counts
        let cube = scene.object_bounds[1];
        assert_abs_diff_eq!(cube.p_min, Point3::new(-1.0, 0.0, 39.0), epsilon = 1e-5);
        assert_abs_diff_eq!(cube.p_max, Point3::new(1.0, 3.5, 41.0), epsilon = 1e-5);

        let roads: Vec<_> = scene.roads().map(|(o, _)| o.name.clone()).collect();
        assert_eq!(roads, vec!["Road".to_string()]);
    }

    #[test]
    fn query() {
        let scene = load(TOWN).unwrap();
        let origin = Point3::new(0.0, 0.5, 0.0);
        let forward = Vec3::new(0.0, 0.0, 1.0);

        // The rotated wall faces the camera and sits in front of the cube
        let hit = scene
            .query(Ray::new(origin, forward, f32::INFINITY), 200.0)
            .unwrap();
        assert_eq!(hit.object, ObjectId(2));
        assert_abs_diff_eq!(hit.t, 30.0, epsilon = 1e-4);

        // Past the wall's edge the cube is next
        let origin = Point3::new(0.0, 1.5, 0.0);
        let hit = scene
            .query(Ray::new(origin, forward, f32::INFINITY), 200.0)
            .unwrap();
        assert_eq!(hit.object, ObjectId(1));
        assert_abs_diff_eq!(hit.t, 39.0, epsilon = 1e-4);

        // Limited by the query distance, not the ray
        assert!(scene
            .query(Ray::new(origin, forward, f32::INFINITY), 20.0)
            .is_none());

        let up = Vec3::new(0.0, 1.0, 0.0);
        assert!(scene
            .query(Ray::new(Point3::new(0.0, 5.0, 0.0), up, f32::INFINITY), 200.0)
            .is_none());
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name("Car(Clone)"), "Car");
        assert_eq!(display_name("Car(Clone)(Clone)"), "Car");
        assert_eq!(display_name("Sign (Clone) A"), "Sign  A");
        assert_eq!(display_name("props/bin\\1"), "props_bin_1");
        assert_eq!(display_name("Plain"), "Plain");
    }

    #[test]
    fn detectable_set() {
        let objects = vec![
            SceneObject::new("a", Categories::DETECTABLE, Vec3::zeros()),
            SceneObject::new("b", Categories::ROAD, Vec3::zeros()),
            SceneObject::new("c", Categories::ROAD | Categories::DETECTABLE, Vec3::zeros()),
        ];
        let set = DetectableSet::new(&objects);
        assert!(set.contains(ObjectId(0)));
        assert!(!set.contains(ObjectId(1)));
        assert!(set.contains(ObjectId(2)));
        assert!(!set.contains(ObjectId(3)));
        assert_eq!(set.len(), 2);

        let set = DetectableSet::from_ids(3, &[ObjectId(1), ObjectId(9)]);
        assert!(set.contains(ObjectId(1)));
        assert!(!set.contains(ObjectId(0)));
        assert!(!set.contains(ObjectId(9)));
        assert!(DetectableSet::default().is_empty());
    }

    #[test]
    fn defaults() {
        let scene = load(
            r#"
objects:
  - name: Ball
    shapes:
      - type: sphere
        radius: 1
"#,
        )
        .unwrap();
        assert_eq!(scene.name, "");
        let ball = &scene.objects[0];
        assert!(ball.categories.is_empty());
        assert_eq!(ball.color, Vec3::new(0.5, 0.5, 0.5));
        assert_abs_diff_eq!(
            scene.object_bounds[0].p_max,
            Point3::new(1.0, 1.0, 1.0),
            epsilon = 1e-6
        );

        assert_eq!(load("objects: []").unwrap().objects.len(), 0);
    }

    #[test]
    fn mesh_shape() {
        let scene = load(
            r#"
objects:
  - name: Tri
    categories: [detectable]
    shapes:
      - type: mesh
        points: [[-1, -1, 5], [1, -1, 5], [0, 1, 5]]
        indices: [0, 1, 2]
"#,
        )
        .unwrap();
        let hit = scene
            .query(
                Ray::new(Point3::zeros(), Vec3::new(0.0, 0.0, 1.0), f32::INFINITY),
                10.0,
            )
            .unwrap();
        assert_eq!(hit.object, ObjectId(0));
    }

    #[test]
    fn invalid() {
        assert!(matches!(load("objects: ["), Err(SceneError::Parse(_))));
        assert!(matches!(
            load("objects:\n  - name: A\n    shapes:\n      - type: cone\n"),
            Err(SceneError::Parse(_))
        ));
        assert!(matches!(
            load("objects:\n  - name: A\n    categories: [vehicle]\n"),
            Err(SceneError::Parse(_))
        ));
        assert!(matches!(
            load("objects:\n  - name: A\n    shapes:\n      - type: sphere\n        radius: -1\n"),
            Err(SceneError::InvalidShape(_))
        ));
        assert!(matches!(
            load("objects:\n  - name: A\n    scale: [1, 0, 1]\n"),
            Err(SceneError::InvalidShape(_))
        ));
        assert!(matches!(
            load(concat!(
                "objects:\n  - name: A\n    shapes:\n      - type: mesh\n",
                "        points: [[0, 0, 0]]\n        indices: [0, 0, 1]\n",
            )),
            Err(SceneError::InvalidShape(_))
        ));
    }

    #[test]
    fn from_file() {
        let dir = temp_dir("scene-load");
        let path = dir.join("harbor.yaml");
        std::fs::write(&path, "objects:\n  - name: A\n").unwrap();

        let scene = Scene::load(&path, &SceneLoadSettings::default()).unwrap();
        // Unnamed scenes take the file name
        assert_eq!(scene.name, "harbor");
        assert_eq!(scene.objects.len(), 1);

        assert!(matches!(
            Scene::load(&dir.join("missing.yaml"), &SceneLoadSettings::default()),
            Err(SceneError::Io { .. })
        ));
    }
}
