use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
    hit::Hit,
    math::{Bounds3, Point3, Ray, Vec3},
    shapes::Shape,
};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Primitives_and_Intersection_Acceleration/Bounding_Volume_Hierarchies.html

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Display, EnumString)]
pub enum SplitMethod {
    Middle,
    EqualCounts,
}

pub struct BoundingVolumeHierarchy {
    split_method: SplitMethod,
    max_shapes_in_node: usize,
    nodes: Vec<BVHNode>,
    shapes: Vec<Arc<dyn Shape>>,
}

impl BoundingVolumeHierarchy {
    /// Creates a new `BoundingVolumeHierarchy` for the given [Shape]s.
    pub fn new(
        shapes: Vec<Arc<dyn Shape>>,
        max_shapes_in_node: usize,
        split_method: SplitMethod,
    ) -> Self {
        let mut shape_info: Vec<BVHPrimitiveInfo> = shapes
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let b = s.world_bound();
                BVHPrimitiveInfo {
                    shape_index: i,
                    bounds: b,
                    centroid: b.p_min + b.diagonal() * 0.5,
                }
            })
            .collect();

        let mut ret = Self {
            split_method,
            max_shapes_in_node: max_shapes_in_node.clamp(1, u16::MAX as usize),
            nodes: Vec::new(),
            shapes: Vec::new(),
        };
        if shapes.is_empty() {
            return ret;
        }

        let mut ordered_shapes = Vec::with_capacity(shapes.len());
        let (root, node_count) =
            ret.recursive_build(&shapes, &mut shape_info, 0, shapes.len(), &mut ordered_shapes);
        ret.shapes = ordered_shapes;

        ret.nodes = vec![BVHNode::default(); node_count];
        ret.flatten_tree(root, 0);

        ret
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// World space bounds of everything in the hierarchy
    pub fn bounds(&self) -> Bounds3<f32> {
        self.nodes.first().map_or_else(Bounds3::empty, |n| n.bounds)
    }

    /// Finds the closest hit along `ray` within `(0, ray.t_max]`.
    pub fn intersect(&self, mut ray: Ray<f32>) -> Option<Hit> {
        if self.nodes.is_empty() {
            return None;
        }

        let mut hit: Option<Hit> = None;

        let inv_dir = Vec3::new(1.0 / ray.d.x, 1.0 / ray.d.y, 1.0 / ray.d.z);
        let dir_is_neg = [inv_dir.x < 0.0, inv_dir.y < 0.0, inv_dir.z < 0.0];

        let mut current_node_index = 0;
        let mut to_visit_stack: Vec<usize> = Vec::with_capacity(64);
        loop {
            let node = &self.nodes[current_node_index];
            if node.bounds.intersect(&ray, inv_dir, dir_is_neg) {
                match node.content {
                    NodeContent::Interior {
                        second_child_index,
                        split_axis,
                    } => {
                        // Front to back so t_max shrinks early
                        if dir_is_neg[split_axis as usize] {
                            to_visit_stack.push(current_node_index + 1);
                            current_node_index = second_child_index as usize;
                        } else {
                            to_visit_stack.push(second_child_index as usize);
                            current_node_index += 1;
                        }
                        continue;
                    }
                    NodeContent::Leaf {
                        first_shape_index,
                        shape_count,
                    } => {
                        let first = first_shape_index as usize;
                        let shape_range = first..(first + shape_count as usize);
                        for shape in &self.shapes[shape_range] {
                            if let Some(new_hit) = shape.intersect(&ray) {
                                // Shapes only report hits within t_max so this is always closer
                                ray.t_max = new_hit.t;
                                hit = Some(new_hit);
                            }
                        }
                    }
                    NodeContent::Uninitialized => unreachable!(),
                }
            }

            match to_visit_stack.pop() {
                Some(next) => current_node_index = next,
                None => break,
            }
        }
        hit
    }

    fn recursive_build(
        &self,
        shapes: &[Arc<dyn Shape>],
        shape_info: &mut [BVHPrimitiveInfo],
        start: usize,
        end: usize,
        ordered_shapes: &mut Vec<Arc<dyn Shape>>,
    ) -> (Box<BVHBuildNode>, usize) {
        let bounds = shape_info[start..end]
            .iter()
            .fold(Bounds3::default(), |b, s| b.union_b(s.bounds));
        let first_shape_index = ordered_shapes.len();

        let shape_count = end - start;
        macro_rules! init_leaf {
            () => {{
                ordered_shapes.extend(
                    shape_info[start..end]
                        .iter()
                        .map(|s| Arc::clone(&shapes[s.shape_index])),
                );
                (
                    BVHBuildNode::leaf(first_shape_index, shape_count, bounds),
                    1,
                )
            }};
        }

        if shape_count <= self.max_shapes_in_node {
            return init_leaf!();
        }

        let centroid_bounds = shape_info[start..end]
            .iter()
            .fold(Bounds3::default(), |b, s| b.union_p(s.centroid));
        let axis = centroid_bounds.maximum_extent();

        if centroid_bounds.p_max[axis] == centroid_bounds.p_min[axis] {
            // Identical centroids, can't be split
            if shape_count <= u16::MAX as usize {
                return init_leaf!();
            }
        }

        let mut mid = start;
        // 'Middle' falls back to 'equal counts' if everything lands on one side
        let split_method = match self.split_method {
            SplitMethod::Middle => {
                let mid_value = (centroid_bounds.p_min[axis] + centroid_bounds.p_max[axis]) / 2.0;
                mid = partition(&mut shape_info[start..end], |s| {
                    s.centroid[axis] < mid_value
                }) + start;

                if mid != start && mid != end {
                    SplitMethod::Middle
                } else {
                    SplitMethod::EqualCounts
                }
            }
            SplitMethod::EqualCounts => SplitMethod::EqualCounts,
        };

        if split_method == SplitMethod::EqualCounts {
            mid = (start + end) / 2;
            shape_info[start..end].select_nth_unstable_by(mid - start, |a, b| {
                a.centroid[axis]
                    .partial_cmp(&b.centroid[axis])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        let (child0, child0_node_count) =
            self.recursive_build(shapes, shape_info, start, mid, ordered_shapes);
        let (child1, child1_node_count) =
            self.recursive_build(shapes, shape_info, mid, end, ordered_shapes);
        (
            BVHBuildNode::interior(axis, child0, child1),
            1 + child0_node_count + child1_node_count,
        )
    }

    fn flatten_tree(&mut self, root: Box<BVHBuildNode>, mut next_index: usize) -> usize {
        match root.content {
            BuildNodeContent::Interior {
                children: [child0, child1],
                split_axis,
            } => {
                let self_index = next_index;
                let second_child_index = self.flatten_tree(child0, self_index + 1);
                next_index = self.flatten_tree(child1, second_child_index);
                self.nodes[self_index] =
                    BVHNode::interior(root.bounds, second_child_index, split_axis);
            }
            BuildNodeContent::Leaf {
                first_shape_index,
                shape_count,
            } => {
                self.nodes[next_index] = BVHNode::leaf(root.bounds, first_shape_index, shape_count);
                next_index += 1;
            }
        }
        next_index
    }
}

/// Moves the items matching `pred` to the front, returning how many there were.
fn partition<T, F>(items: &mut [T], pred: F) -> usize
where
    F: Fn(&T) -> bool,
{
    let mut first_false = 0;
    for i in 0..items.len() {
        if pred(&items[i]) {
            items.swap(first_false, i);
            first_false += 1;
        }
    }
    first_false
}

struct BVHPrimitiveInfo {
    shape_index: usize,
    bounds: Bounds3<f32>,
    centroid: Point3<f32>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum NodeContent {
    Interior {
        second_child_index: u32,
        split_axis: u8,
    },
    Leaf {
        first_shape_index: u32,
        shape_count: u16,
    },
    Uninitialized,
}

#[derive(Copy, Clone)]
struct BVHNode {
    bounds: Bounds3<f32>,
    content: NodeContent,
}

impl BVHNode {
    fn default() -> Self {
        Self {
            bounds: Bounds3::default(),
            content: NodeContent::Uninitialized,
        }
    }

    fn interior(bounds: Bounds3<f32>, second_child_index: usize, split_axis: usize) -> Self {
        Self {
            bounds,
            content: NodeContent::Interior {
                second_child_index: second_child_index as u32,
                split_axis: split_axis as u8,
            },
        }
    }

    fn leaf(bounds: Bounds3<f32>, first_shape_index: usize, shape_count: usize) -> Self {
        Self {
            bounds,
            content: NodeContent::Leaf {
                first_shape_index: first_shape_index as u32,
                shape_count: shape_count as u16,
            },
        }
    }
}

enum BuildNodeContent {
    Interior {
        children: [Box<BVHBuildNode>; 2],
        split_axis: usize,
    },
    Leaf {
        // Index into the ordered shape array
        first_shape_index: usize,
        shape_count: usize,
    },
}

struct BVHBuildNode {
    bounds: Bounds3<f32>,
    content: BuildNodeContent,
}

impl BVHBuildNode {
    fn interior(
        split_axis: usize,
        child0: Box<BVHBuildNode>,
        child1: Box<BVHBuildNode>,
    ) -> Box<Self> {
        Box::new(Self {
            bounds: child0.bounds.union_b(child1.bounds),
            content: BuildNodeContent::Interior {
                children: [child0, child1],
                split_axis,
            },
        })
    }

    fn leaf(first_shape_index: usize, shape_count: usize, bounds: Bounds3<f32>) -> Box<Self> {
        Box::new(Self {
            bounds,
            content: BuildNodeContent::Leaf {
                first_shape_index,
                shape_count,
            },
        })
    }
}
