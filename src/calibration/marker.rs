use serde::{Deserialize, Serialize};

/// One known point on the channel-to-physical-unit mapping.
///
/// The pair `(0, 0)` is the sentinel instruments write after the last real
/// marker; it is never stored in a [`MarkerSet`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationMarker {
    /// Channel position (may be fractional, e.g. a fitted peak centroid)
    pub channel: f64,
    /// Physical value at that channel (keV, microseconds, ...)
    pub value: f64,
}

/// A marker after sorting and deduplication, used as a segment endpoint.
pub type Breakpoint = CalibrationMarker;

impl CalibrationMarker {
    /// Create a marker
    pub fn new(channel: f64, value: f64) -> Self {
        Self { channel, value }
    }

    /// Whether this is the `(0, 0)` end-of-list sentinel
    pub fn is_sentinel(&self) -> bool {
        self.channel == 0.0 && self.value == 0.0
    }
}

impl From<(f64, f64)> for CalibrationMarker {
    fn from((channel, value): (f64, f64)) -> Self {
        Self::new(channel, value)
    }
}

/// Outcome of offering a marker to a [`MarkerSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPush {
    /// Marker stored
    Accepted,
    /// Sentinel seen; the set is now closed
    Terminated,
    /// The set already held its maximum; the set is now closed
    Full,
    /// The set was closed before this marker arrived
    Closed,
}

/// Bounded, order-preserving collection of calibration markers.
///
/// Collection stops for good at the first sentinel or once `limit` markers
/// have been stored. Both the IEC reader and externally supplied marker
/// lists go through this type so they share the same truncation rules.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSet {
    markers: Vec<CalibrationMarker>,
    limit: usize,
    closed: bool,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT)
    }
}

impl MarkerSet {
    /// Calibration slots available in an IEC 1455 header
    pub const DEFAULT_LIMIT: usize = 24;

    /// Create an empty set holding at most `limit` markers
    pub fn new(limit: usize) -> Self {
        Self {
            markers: Vec::with_capacity(limit.min(Self::DEFAULT_LIMIT)),
            limit,
            closed: false,
        }
    }

    /// Collect markers from an iterator, stopping where a [`MarkerSet`] closes
    pub fn collect<I>(markers: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = CalibrationMarker>,
    {
        let mut set = Self::new(limit);
        for marker in markers {
            if set.push(marker) != MarkerPush::Accepted {
                break;
            }
        }
        set
    }

    /// Offer one marker to the set
    pub fn push(&mut self, marker: CalibrationMarker) -> MarkerPush {
        if self.closed {
            return MarkerPush::Closed;
        }
        if marker.is_sentinel() {
            self.closed = true;
            return MarkerPush::Terminated;
        }
        if self.markers.len() >= self.limit {
            self.closed = true;
            return MarkerPush::Full;
        }
        self.markers.push(marker);
        MarkerPush::Accepted
    }

    /// Whether further markers will be rejected
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Maximum number of markers this set will hold
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of stored markers
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether no marker has been stored
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Stored markers in arrival order
    pub fn as_slice(&self) -> &[CalibrationMarker] {
        &self.markers
    }

    /// Consume the set, returning the stored markers in arrival order
    pub fn into_vec(self) -> Vec<CalibrationMarker> {
        self.markers
    }

    /// Markers for a periodic time calibration.
    ///
    /// Marker `i` maps `channels[i]` to `period * (i + 1)`, the layout used when
    /// a time calibrator injects pulses at a fixed period and the centroid
    /// channel of each pulse peak is known.
    pub fn periodic(channels: &[f64], period: f64) -> Vec<CalibrationMarker> {
        channels
            .iter()
            .enumerate()
            .map(|(i, &channel)| CalibrationMarker::new(channel, period * (i + 1) as f64))
            .collect()
    }
}
