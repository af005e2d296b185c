use std::collections::HashMap;

use image::{Rgb, RgbImage};

use crate::{
    hit::Hit,
    math::{Bounds2, Point2, Vec2},
    scene::{DetectableSet, ObjectId},
};

pub const FOREGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

/// Pixels of one object within one capture.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskRecord {
    object: ObjectId,
    resolution: Vec2<u32>,
    /// Row-major, `true` where the pixel's ray hit `object` first
    occupancy: Vec<bool>,
    /// Inclusive pixel bounds of the set occupancy
    bounds: Bounds2<u32>,
}

impl MaskRecord {
    /// Creates a new `MaskRecord` with only `pixel` set.
    pub fn new(object: ObjectId, resolution: Vec2<u32>, pixel: Point2<u32>) -> Self {
        let mut ret = Self {
            object,
            resolution,
            occupancy: vec![false; (resolution.x as usize) * (resolution.y as usize)],
            bounds: Bounds2::point(pixel),
        };
        ret.mark(pixel);
        ret
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn resolution(&self) -> Vec2<u32> {
        self.resolution
    }

    pub fn bounds(&self) -> Bounds2<u32> {
        self.bounds
    }

    /// Width and height of the bounds as `max - min`, so a single pixel spans 0.
    pub fn span(&self) -> Vec2<u32> {
        self.bounds.diagonal()
    }

    fn offset(&self, pixel: Point2<u32>) -> usize {
        debug_assert!(pixel.x < self.resolution.x && pixel.y < self.resolution.y);
        (pixel.y as usize) * (self.resolution.x as usize) + (pixel.x as usize)
    }

    /// Sets `pixel` and grows the bounds to include it.
    pub fn mark(&mut self, pixel: Point2<u32>) {
        let offset = self.offset(pixel);
        self.occupancy[offset] = true;
        self.bounds = self.bounds.union_p(pixel);
    }

    pub fn is_set(&self, pixel: Point2<u32>) -> bool {
        self.occupancy[self.offset(pixel)]
    }

    pub fn occupancy(&self) -> &[bool] {
        &self.occupancy
    }

    pub fn pixel_count(&self) -> usize {
        self.occupancy.iter().filter(|&&o| o).count()
    }

    /// Recomputes the bounds from the occupancy buffer alone.
    pub fn tight_bounds(&self) -> Option<Bounds2<u32>> {
        let w = self.resolution.x as usize;
        self.occupancy
            .iter()
            .enumerate()
            .filter(|(_, &o)| o)
            .map(|(offset, _)| Point2::new((offset % w) as u32, (offset / w) as u32))
            .fold(None, |acc: Option<Bounds2<u32>>, p| {
                Some(acc.map_or_else(|| Bounds2::point(p), |b| b.union_p(p)))
            })
    }

    /// Converts the occupancy into a binary image, row 0 at the top.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.resolution.x, self.resolution.y, |x, y| {
            if self.is_set(Point2::new(x, y)) {
                FOREGROUND
            } else {
                BACKGROUND
            }
        })
    }
}

/// Collects per-object masks from the hits of a frame sweep.
pub struct MaskAggregator<'a> {
    resolution: Vec2<u32>,
    detectable: &'a DetectableSet,
    records: Vec<MaskRecord>,
    record_index: HashMap<ObjectId, usize>,
}

impl<'a> MaskAggregator<'a> {
    pub fn new(resolution: Vec2<u32>, detectable: &'a DetectableSet) -> Self {
        Self {
            resolution,
            detectable,
            records: Vec::new(),
            record_index: HashMap::new(),
        }
    }

    /// Records the result of the query at `pixel`.
    ///
    /// Misses and hits on objects that aren't detectable leave every record untouched.
    pub fn record(&mut self, pixel: Point2<u32>, hit: Option<Hit>) {
        let object = match hit {
            Some(Hit { object, .. }) if self.detectable.contains(object) => object,
            _ => return,
        };

        match self.record_index.get(&object) {
            Some(&index) => self.records[index].mark(pixel),
            None => {
                self.record_index.insert(object, self.records.len());
                self.records.push(MaskRecord::new(object, self.resolution, pixel));
            }
        }
    }

    pub fn get(&self, object: ObjectId) -> Option<&MaskRecord> {
        self.record_index.get(&object).map(|&i| &self.records[i])
    }

    /// Records in the order their objects were first hit
    pub fn records(&self) -> &[MaskRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<MaskRecord> {
        self.records
    }
}
