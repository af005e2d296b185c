use std::io::prelude::*;
use std::time::Instant;

use segcap::{
    bvh::SplitMethod,
    camera::{CaptureRequest, Lens, Orientation},
    capture::extract_masks,
    math::Point3,
    scene::{
        Category, ObjectDescription, Scene, SceneDescription, SceneLoadSettings, ShapeDescription,
    },
};

const ITERATIONS: usize = 5;
const GRID: usize = 40;

// Rows of boxes with a ball on top, along both sides of a long road
fn street() -> SceneDescription {
    let mut objects = vec![ObjectDescription {
        name: "Road".into(),
        categories: vec![Category::Road],
        color: [0.3, 0.3, 0.3],
        position: [0.0, 0.0, 0.0],
        rotation: [0.0, 0.0, 0.0],
        scale: [1.0, 1.0, 1.0],
        shapes: vec![ShapeDescription::Cuboid {
            center: [0.0, -0.05, 500.0],
            size: [12.0, 0.1, 1000.0],
        }],
    }];

    for i in 0..GRID * GRID {
        let row = (i / GRID) as f32;
        let col = (i % GRID) as f32;
        let side = if i % 2 == 0 { -1.0 } else { 1.0 };
        objects.push(ObjectDescription {
            name: format!("Block{}", i),
            categories: vec![Category::Detectable],
            color: [0.8, 0.4, 0.2],
            position: [side * (10.0 + col * 3.0), 0.0, row * 25.0],
            rotation: [0.0, col * 7.0, 0.0],
            scale: [1.0, 1.0 + row * 0.05, 1.0],
            shapes: vec![
                ShapeDescription::Cuboid {
                    center: [0.0, 1.0, 0.0],
                    size: [2.0, 2.0, 4.0],
                },
                ShapeDescription::Sphere {
                    center: [0.0, 3.0, 0.0],
                    radius: 1.0,
                },
            ],
        });
    }

    SceneDescription {
        name: "street".into(),
        objects,
    }
}

fn bench_build(description: &SceneDescription, settings: &SceneLoadSettings) -> Scene {
    let start = Instant::now();
    let scene = match Scene::from_description(description, settings) {
        Ok(scene) => scene,
        Err(why) => panic!("Failed to build the bench scene: {}", why),
    };
    let elapsed_ms = (start.elapsed().as_nanos() as f64) * 1e-6;
    println!(
        "Build    took {:4.1} ms total, {} nodes for {} shapes",
        elapsed_ms,
        scene.bvh.node_count(),
        scene.bvh.shape_count()
    );
    scene
}

fn bench_sweep(scene: &Scene, request: &CaptureRequest) {
    let detectable = scene.detectable();
    let start = Instant::now();
    let mut records = 0;
    for _ in 0..ITERATIONS {
        records += extract_masks(request, scene, &detectable).len();
    }
    if records == 0 {
        panic!("We only wanted to force the loop to be executed!")
    }
    let elapsed_ns = start.elapsed().as_nanos();
    let elapsed_ms = (elapsed_ns as f64) * 1e-6;
    let rays = (ITERATIONS as f64) * (request.pixel_count() as f64);
    let ns_per_ray = (elapsed_ns as f64) / rays;
    println!(
        "Sweep    took {:4.1} ms total, {:0.1} ns per ray, {} masks per frame",
        elapsed_ms,
        ns_per_ray,
        records / ITERATIONS
    );
}

fn main() {
    let description = street();
    let request = CaptureRequest::new(
        &Lens::default(),
        Point3::new(0.0, 6.0, 0.0),
        Orientation::new(2.0, 0.0, 0.0),
    );

    for split_method in [SplitMethod::Middle, SplitMethod::EqualCounts] {
        for max_shapes_in_node in [1, 4, 16] {
            println!("{} {}", split_method, max_shapes_in_node);
            let settings = SceneLoadSettings {
                split_method,
                max_shapes_in_node,
            };
            let scene = bench_build(&description, &settings);
            bench_sweep(&scene, &request);
        }
    }

    println!("Press enter to quit...");
    // Read a single byte and discard
    let _ = std::io::stdin().read(&mut [0u8]);
}
