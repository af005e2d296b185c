mod description;

pub use description::{Category, ObjectDescription, SceneDescription, ShapeDescription};

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    bvh::{BoundingVolumeHierarchy, SplitMethod},
    hit::Hit,
    math::{transforms::translation, Bounds3, Point3, Ray, Vec3},
    query::GeometryQuery,
    shapes::{Mesh, Shape, Sphere},
    segcap_debug, segcap_info,
};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse scene: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid shape: {0}")]
    InvalidShape(String),
}

/// Identifies a logical scene object. Every shape of an object reports the same id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Categories: u8 {
        /// Cameras get placed along these
        const ROAD = 1 << 0;
        /// Gets a segmentation mask
        const DETECTABLE = 1 << 1;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub categories: Categories,
    pub color: Vec3<f32>,
}

impl SceneObject {
    pub fn new(name: &str, categories: Categories, color: Vec3<f32>) -> Self {
        Self {
            name: name.to_string(),
            categories,
            color,
        }
    }

    pub fn is_detectable(&self) -> bool {
        self.categories.contains(Categories::DETECTABLE)
    }

    pub fn is_road(&self) -> bool {
        self.categories.contains(Categories::ROAD)
    }

    /// Name used in mask file names: instancing markers stripped, no path separators.
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }
}

pub fn display_name(name: &str) -> String {
    name.replace("(Clone)", "").replace(['/', '\\'], "_")
}

/// Detectability of every scene object, resolved once so the per-pixel test is a lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetectableSet(Vec<bool>);

impl DetectableSet {
    pub fn new(objects: &[SceneObject]) -> Self {
        Self(objects.iter().map(SceneObject::is_detectable).collect())
    }

    /// Marks exactly the ids in `ids` detectable, out of `object_count` objects.
    pub fn from_ids(object_count: usize, ids: &[ObjectId]) -> Self {
        let mut flags = vec![false; object_count];
        for id in ids {
            if let Some(f) = flags.get_mut(id.index()) {
                *f = true;
            }
        }
        Self(flags)
    }

    pub fn contains(&self, object: ObjectId) -> bool {
        self.0.get(object.index()).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.0.iter().filter(|&&d| d).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SceneLoadSettings {
    pub split_method: SplitMethod,
    pub max_shapes_in_node: u16,
}

impl Default for SceneLoadSettings {
    fn default() -> Self {
        Self {
            split_method: SplitMethod::Middle,
            max_shapes_in_node: 4,
        }
    }
}

pub struct Scene {
    pub name: String,
    pub objects: Vec<SceneObject>,
    /// World space bounds per object, indexed by [ObjectId]
    pub object_bounds: Vec<Bounds3<f32>>,
    pub bvh: BoundingVolumeHierarchy,
}

impl Scene {
    /// Loads a YAML scene description from `path`.
    pub fn load(path: &Path, settings: &SceneLoadSettings) -> Result<Self, SceneError> {
        let load_start = Instant::now();

        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut scene = Self::from_yaml(&text, settings)?;
        if scene.name.is_empty() {
            scene.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }

        segcap_info!(
            "Scene '{}': {} objects, {} shapes, {} BVH nodes, loaded in {:.2}s",
            scene.name,
            scene.objects.len(),
            scene.bvh.shape_count(),
            scene.bvh.node_count(),
            load_start.elapsed().as_secs_f32()
        );

        Ok(scene)
    }

    pub fn from_yaml(text: &str, settings: &SceneLoadSettings) -> Result<Self, SceneError> {
        let description: SceneDescription = serde_yaml::from_str(text)?;
        Self::from_description(&description, settings)
    }

    pub fn from_description(
        description: &SceneDescription,
        settings: &SceneLoadSettings,
    ) -> Result<Self, SceneError> {
        let mut objects = Vec::with_capacity(description.objects.len());
        let mut shapes: Vec<Arc<dyn Shape>> = Vec::new();

        for (i, desc) in description.objects.iter().enumerate() {
            let id = ObjectId(i as u32);
            let object_to_world = desc.object_to_world()?;

            for shape in &desc.shapes {
                match shape {
                    ShapeDescription::Sphere { center, radius } => {
                        if radius.is_nan() || *radius <= 0.0 {
                            return Err(SceneError::InvalidShape(format!(
                                "Sphere of '{}' has a non-positive radius {}",
                                desc.name, radius
                            )));
                        }
                        let to_world = &object_to_world * &translation(Vec3::from(*center));
                        shapes.push(Arc::new(Sphere::new(&to_world, *radius, id)));
                    }
                    ShapeDescription::Cuboid { center, size } => {
                        let mesh = Mesh::cuboid(
                            &object_to_world,
                            Point3::from(*center),
                            Vec3::from(*size),
                        )?;
                        shapes.extend(Arc::new(mesh).triangles(id));
                    }
                    ShapeDescription::Quad { corners } => {
                        let mesh = Mesh::quad(&object_to_world, corners.map(Point3::from))?;
                        shapes.extend(Arc::new(mesh).triangles(id));
                    }
                    ShapeDescription::Mesh { points, indices } => {
                        let mesh = Mesh::new(
                            &object_to_world,
                            indices.clone(),
                            points.iter().map(|&p| Point3::from(p)).collect(),
                        )?;
                        shapes.extend(Arc::new(mesh).triangles(id));
                    }
                }
            }

            objects.push(SceneObject {
                name: desc.name.clone(),
                categories: desc.categories(),
                color: Vec3::from(desc.color),
            });
        }

        Ok(Self::new(&description.name, objects, shapes, settings))
    }

    /// Creates a new `Scene` from shapes that already carry the [ObjectId]s of `objects`.
    pub fn new(
        name: &str,
        objects: Vec<SceneObject>,
        shapes: Vec<Arc<dyn Shape>>,
        settings: &SceneLoadSettings,
    ) -> Self {
        let mut object_bounds = vec![Bounds3::empty(); objects.len()];
        for s in &shapes {
            if let Some(b) = object_bounds.get_mut(s.object().index()) {
                *b = b.union_b(s.world_bound());
            }
        }

        let build_start = Instant::now();
        let bvh = BoundingVolumeHierarchy::new(
            shapes,
            settings.max_shapes_in_node as usize,
            settings.split_method,
        );
        segcap_debug!(
            "BVH built in {:.2}ms with {}",
            build_start.elapsed().as_secs_f32() * 1000.0,
            settings.split_method
        );

        Self {
            name: name.to_string(),
            objects,
            object_bounds,
            bvh,
        }
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.index())
    }

    pub fn detectable(&self) -> DetectableSet {
        DetectableSet::new(&self.objects)
    }

    /// Roads with their world bounds
    pub fn roads(&self) -> impl Iterator<Item = (&SceneObject, Bounds3<f32>)> {
        self.objects
            .iter()
            .zip(self.object_bounds.iter())
            .filter(|(o, _)| o.is_road())
            .map(|(o, &b)| (o, b))
    }
}

impl GeometryQuery for Scene {
    fn query(&self, ray: Ray<f32>, max_distance: f32) -> Option<Hit> {
        self.bvh.intersect(ray.limited(max_distance))
    }
}
