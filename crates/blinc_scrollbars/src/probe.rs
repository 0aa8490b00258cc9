//! Native scrollbar width probe
//!
//! Measures how much layout space the platform's native scrollbars take by
//! attaching a hidden, absolutely positioned `overflow: scroll` box with a
//! larger child and diffing its outer width against its client width.
//! Overlay-scrollbar platforms report zero.
//!
//! The width is environment-derived, so it is measured at most once per
//! process and then shared read-only by every instance.

use std::sync::OnceLock;

use crate::error::Result;
use crate::types::Size;

/// Outer size of the probe box
pub const PROBE_OUTER: Size = Size::new(100.0, 100.0);
/// Size of the child that forces both scrollbars to appear
pub const PROBE_INNER: Size = Size::new(200.0, 200.0);

/// What the host must attach for a probe measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeSpec {
    /// Fixed outer size of the `overflow: scroll` element
    pub outer: Size,
    /// Size of its child, larger than `outer` on both axes
    pub inner: Size,
}

impl Default for ProbeSpec {
    fn default() -> Self {
        Self {
            outer: PROBE_OUTER,
            inner: PROBE_INNER,
        }
    }
}

/// Widths read from an attached probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeReading {
    /// Border-box width (`offsetWidth`)
    pub outer_width: f32,
    /// Width inside the scrollbars (`clientWidth`)
    pub client_width: f32,
}

/// Handle to an attached probe element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProbeId(pub u64);

/// Host side of the probe: attach, read, detach
pub trait ProbeHost {
    /// Attach a hidden offscreen probe element described by `spec`
    fn attach_probe(&mut self, spec: &ProbeSpec) -> Result<ProbeId>;

    /// Read the committed widths of an attached probe
    fn read_probe(&self, probe: ProbeId) -> Result<ProbeReading>;

    /// Remove a probe element
    fn detach_probe(&mut self, probe: ProbeId);
}

/// Run one probe measurement, always detaching what was attached
pub fn measure_scrollbar_width<H: ProbeHost + ?Sized>(host: &mut H) -> Result<f32> {
    let probe = host.attach_probe(&ProbeSpec::default())?;
    let reading = host.read_probe(probe);
    host.detach_probe(probe);
    let reading = reading?;
    Ok((reading.outer_width - reading.client_width).max(0.0))
}

/// Lazily initialized, never torn down scrollbar width
///
/// A failed probe is not cached: it reports zero (overlay scrollbars, the
/// safe default) and the next caller probes again.
#[derive(Debug, Default)]
pub struct ScrollbarWidthCache {
    width: OnceLock<f32>,
}

impl ScrollbarWidthCache {
    pub const fn new() -> Self {
        Self {
            width: OnceLock::new(),
        }
    }

    /// Cached width, probing through `host` on first use
    pub fn get_or_probe<H: ProbeHost + ?Sized>(&self, host: &mut H) -> f32 {
        if let Some(width) = self.width.get() {
            return *width;
        }
        match measure_scrollbar_width(host) {
            Ok(width) => {
                tracing::debug!("native scrollbar width: {width}px");
                *self.width.get_or_init(|| width)
            }
            Err(err) => {
                tracing::warn!("scrollbar probe failed, assuming overlay scrollbars: {err}");
                0.0
            }
        }
    }

    /// Cached width, if a probe has succeeded
    pub fn get(&self) -> Option<f32> {
        self.width.get().copied()
    }
}

static PROCESS_CACHE: ScrollbarWidthCache = ScrollbarWidthCache::new();

/// Process-wide native scrollbar width
pub fn scrollbar_width<H: ProbeHost + ?Sized>(host: &mut H) -> f32 {
    PROCESS_CACHE.get_or_probe(host)
}

/// The process-wide cache, for instances that share it explicitly
pub fn process_cache() -> &'static ScrollbarWidthCache {
    &PROCESS_CACHE
}
