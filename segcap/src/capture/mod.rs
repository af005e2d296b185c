mod aggregator;
mod emitter;
mod sampler;

pub use aggregator::{MaskAggregator, MaskRecord, BACKGROUND, FOREGROUND};
pub use emitter::{
    parse_raw_index, EmitError, EmitReport, EmittedMask, Emitter, IndexAllocator, MaskFilter,
    OutputLayout, MASK_DIR, RAW_DIR,
};
pub use sampler::FrameSampler;

use crate::{
    camera::CaptureRequest,
    film::RawFrame,
    query::GeometryQuery,
    render::FrameRenderer,
    scene::{DetectableSet, SceneObject},
};

/// Sweeps every pixel of `request` and aggregates the masks of detectable objects.
///
/// Records are returned in the order their objects were first hit.
pub fn extract_masks<Q>(
    request: &CaptureRequest,
    query: &Q,
    detectable: &DetectableSet,
) -> Vec<MaskRecord>
where
    Q: GeometryQuery + ?Sized,
{
    let sampler = FrameSampler::new(request);
    let mut aggregator = MaskAggregator::new(request.resolution, detectable);
    sampler.sweep(query, |pixel, hit| aggregator.record(pixel, hit));
    aggregator.into_records()
}

/// A capture that has been assigned its index but not rendered yet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Capture {
    pub index: u64,
    pub request: CaptureRequest,
}

impl Capture {
    pub fn new(index: u64, request: CaptureRequest) -> Self {
        Self { index, request }
    }

    /// First phase: produce the color frame.
    pub fn render<R>(self, renderer: &R) -> RenderedCapture
    where
        R: FrameRenderer + ?Sized,
    {
        RenderedCapture {
            index: self.index,
            request: self.request,
            frame: renderer.render(&self.request),
        }
    }
}

/// A capture whose frame is complete and can be read back.
pub struct RenderedCapture {
    pub index: u64,
    pub request: CaptureRequest,
    pub frame: RawFrame,
}

impl RenderedCapture {
    /// Second phase: sample the geometry behind the finished frame.
    pub fn extract_masks<Q>(self, query: &Q, detectable: &DetectableSet) -> ExtractedCapture
    where
        Q: GeometryQuery + ?Sized,
    {
        let records = extract_masks(&self.request, query, detectable);
        ExtractedCapture {
            index: self.index,
            request: self.request,
            frame: self.frame,
            records,
        }
    }
}

/// A capture with its frame and unfiltered mask records, ready to be written out.
pub struct ExtractedCapture {
    pub index: u64,
    pub request: CaptureRequest,
    pub frame: RawFrame,
    pub records: Vec<MaskRecord>,
}

impl ExtractedCapture {
    pub fn emit(
        &self,
        emitter: &Emitter,
        objects: &[SceneObject],
    ) -> Result<EmitReport, EmitError> {
        emitter.emit(self.index, &self.frame, &self.records, objects)
    }
}
