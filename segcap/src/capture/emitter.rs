use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use image::{ImageFormat, RgbImage};
use thiserror::Error;

use super::aggregator::MaskRecord;
use crate::{
    film::RawFrame,
    math::Bounds2,
    scene::{ObjectId, SceneObject},
    segcap_debug, segcap_info, segcap_warn,
};

pub const RAW_DIR: &str = "Raw_image";
pub const MASK_DIR: &str = "Binary_image";
const FILE_PREFIX: &str = "Cam_";

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to list '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("No capture index left after {last}")]
    IndexExhausted { last: u64 },
}

/// Drops masks whose bounds aren't strictly wider and taller than `min_extent` pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MaskFilter {
    pub min_extent: u32,
}

impl Default for MaskFilter {
    fn default() -> Self {
        Self { min_extent: 30 }
    }
}

impl MaskFilter {
    pub fn new(min_extent: u32) -> Self {
        Self { min_extent }
    }

    pub fn passes(&self, record: &MaskRecord) -> bool {
        let span = record.span();
        span.x > self.min_extent && span.y > self.min_extent
    }
}

/// File locations under an output root
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.root.join(RAW_DIR)
    }

    pub fn mask_dir(&self) -> PathBuf {
        self.root.join(MASK_DIR)
    }

    pub fn raw_path(&self, index: u64) -> PathBuf {
        self.raw_dir().join(format!("{}{}.png", FILE_PREFIX, index))
    }

    pub fn mask_path(&self, index: u64, display_name: &str) -> PathBuf {
        self.mask_dir().join(format!("{}{}_{}.png", FILE_PREFIX, index, display_name))
    }

    pub fn create_dirs(&self) -> Result<(), EmitError> {
        for path in [self.raw_dir(), self.mask_dir()] {
            fs::create_dir_all(&path).map_err(|source| EmitError::CreateDir { path, source })?;
        }
        Ok(())
    }

    /// Finds the largest index among the raw frames already written, 0 if there are none.
    pub fn recover_max_index(&self) -> Result<u64, EmitError> {
        let path = self.raw_dir();
        let entries = match fs::read_dir(&path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(source) => return Err(EmitError::ReadDir { path, source }),
        };

        let mut max_index = 0;
        for entry in entries {
            let entry = entry.map_err(|source| EmitError::ReadDir {
                path: path.clone(),
                source,
            })?;
            if let Some(index) = entry.file_name().to_str().and_then(parse_raw_index) {
                max_index = max_index.max(index);
            }
        }
        Ok(max_index)
    }
}

/// Parses `index` from a `Cam_{index}.{ext}` file name.
pub fn parse_raw_index(file_name: &str) -> Option<u64> {
    let rest = file_name.strip_prefix(FILE_PREFIX)?;
    let (number, _ext) = rest.rsplit_once('.')?;
    number.parse().ok()
}

/// Hands out capture indices, continuing after whatever is already on disk.
#[derive(Debug)]
pub struct IndexAllocator {
    next: u64,
}

impl IndexAllocator {
    /// Creates a new `IndexAllocator` that continues after the raw frames in `layout`.
    pub fn recover(layout: &OutputLayout) -> Result<Self, EmitError> {
        let max_index = layout.recover_max_index()?;
        let next = max_index
            .checked_add(1)
            .ok_or(EmitError::IndexExhausted { last: max_index })?;
        Ok(Self::starting_at(next))
    }

    pub fn starting_at(next: u64) -> Self {
        Self { next: next.max(1) }
    }

    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Hands out the next index. The last representable index is never handed out.
    pub fn allocate(&mut self) -> Result<u64, EmitError> {
        let index = self.next;
        self.next = index
            .checked_add(1)
            .ok_or(EmitError::IndexExhausted { last: index })?;
        Ok(index)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EmittedMask {
    pub object: ObjectId,
    pub display_name: String,
    pub path: PathBuf,
    pub bounds: Bounds2<u32>,
}

/// What a single capture wrote
#[derive(Clone, Debug, PartialEq)]
pub struct EmitReport {
    pub index: u64,
    pub raw_path: PathBuf,
    /// In the order the objects were first hit
    pub masks: Vec<EmittedMask>,
    /// Records that failed the [MaskFilter]
    pub discarded: usize,
}

/// Writes the raw frame and the masks that pass the filter.
#[derive(Clone, Debug)]
pub struct Emitter {
    layout: OutputLayout,
    filter: MaskFilter,
}

impl Emitter {
    pub fn new(layout: OutputLayout, filter: MaskFilter) -> Self {
        Self { layout, filter }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub fn filter(&self) -> &MaskFilter {
        &self.filter
    }

    /// Writes `frame` and every passing record in `records` under capture `index`.
    ///
    /// `objects` is indexed by [ObjectId] and provides the names for the mask files.
    pub fn emit(
        &self,
        index: u64,
        frame: &RawFrame,
        records: &[MaskRecord],
        objects: &[SceneObject],
    ) -> Result<EmitReport, EmitError> {
        self.layout.create_dirs()?;

        let raw_path = self.layout.raw_path(index);
        write_png(&frame.to_image(), &raw_path)?;
        segcap_info!("Saved raw image to {}", raw_path.display());

        let mut masks = Vec::new();
        let mut discarded = 0;
        let mut written_names = HashSet::new();
        for record in records {
            let name = objects
                .get(record.object().index())
                .map_or_else(|| record.object().0.to_string(), SceneObject::display_name);

            if !self.filter.passes(record) {
                segcap_debug!(
                    "Cam_{}: discarded '{}' with span {:?}",
                    index,
                    name,
                    record.span()
                );
                discarded += 1;
                continue;
            }

            if !written_names.insert(name.clone()) {
                segcap_warn!(
                    "Cam_{}: more than one object is named '{}', the later mask overwrites",
                    index,
                    name
                );
            }

            let path = self.layout.mask_path(index, &name);
            write_png(&record.to_image(), &path)?;
            segcap_info!("Saved mask of '{}' to {}", name, path.display());

            masks.push(EmittedMask {
                object: record.object(),
                display_name: name,
                path,
                bounds: record.bounds(),
            });
        }

        Ok(EmitReport {
            index,
            raw_path,
            masks,
            discarded,
        })
    }
}

fn write_png(image: &RgbImage, path: &Path) -> Result<(), EmitError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| EmitError::Write {
            path: path.to_path_buf(),
            source,
        })
}
