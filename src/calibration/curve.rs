use std::fmt;

use log::debug;

use super::{
    Breakpoint, CalibrationError, CalibrationMarker, CalibrationOptions, CalibrationStrategy,
    MarkerSet, OvershootPolicy, TwoPointFormula,
};

/// Shape of a built calibration curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveMode {
    /// Exactly two breakpoints: every x is multiplied by `factor`
    Scale {
        /// Uniform multiplicative factor
        factor: f64,
    },
    /// Three or more breakpoints, mapped with a forward-only cursor
    Piecewise,
    /// Least-squares line `slope * x + intercept`
    Linear {
        /// Slope of the fitted line
        slope: f64,
        /// Intercept of the fitted line
        intercept: f64,
    },
}

impl fmt::Display for CurveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveMode::Scale { factor } => write!(f, "scale x{factor}"),
            CurveMode::Piecewise => write!(f, "piecewise"),
            CurveMode::Linear { slope, intercept } => write!(f, "linear {slope}x + {intercept}"),
        }
    }
}

/// Immutable channel-to-physical-unit mapping.
///
/// Built once from a marker set and then only read. [`map`](Self::map) is
/// pure: the cursor it walks lives on the stack of each call.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationCurve {
    breakpoints: Vec<Breakpoint>,
    mode: CurveMode,
    overshoot: OvershootPolicy,
}

impl CalibrationCurve {
    /// Build a curve from raw markers.
    ///
    /// Markers are truncated at the first `(0, 0)` sentinel and at
    /// `options.max_markers`, sorted by channel, and deduplicated keeping the
    /// last-seen value for a repeated channel.
    pub fn build(
        markers: &[CalibrationMarker],
        options: &CalibrationOptions,
    ) -> Result<Self, CalibrationError> {
        let set = MarkerSet::collect(markers.iter().copied(), options.max_markers);
        if set.len() < markers.len() {
            debug!(
                "Using {} of {} supplied calibration markers",
                set.len(),
                markers.len()
            );
        }

        for marker in set.as_slice() {
            validate_marker(marker)?;
        }
        let breakpoints = sort_and_dedup(set.into_vec());

        let mode = match options.strategy {
            CalibrationStrategy::Piecewise => match breakpoints.len() {
                0 | 1 => {
                    return Err(CalibrationError::InsufficientMarkers {
                        found: breakpoints.len(),
                        required: 2,
                    })
                }
                2 => CurveMode::Scale {
                    factor: two_point_factor(&breakpoints, options.two_point_formula)?,
                },
                _ => CurveMode::Piecewise,
            },
            CalibrationStrategy::LeastSquares => {
                if breakpoints.len() < 2 {
                    return Err(CalibrationError::InsufficientMarkers {
                        found: breakpoints.len(),
                        required: 2,
                    });
                }
                let (slope, intercept) = least_squares(&breakpoints);
                CurveMode::Linear { slope, intercept }
            }
        };

        debug!(
            "Built {:?} calibration from {} breakpoints",
            mode,
            breakpoints.len()
        );

        Ok(Self {
            breakpoints,
            mode,
            overshoot: options.overshoot,
        })
    }

    /// Sorted, deduplicated breakpoints the curve was built from
    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// Curve shape
    pub fn mode(&self) -> CurveMode {
        self.mode
    }

    /// Cursor policy used by piecewise curves
    pub fn overshoot(&self) -> OvershootPolicy {
        self.overshoot
    }

    /// Map a sequence of channel values to physical values.
    ///
    /// `xs` is expected in ascending order; piecewise curves walk their
    /// breakpoints forward once and never rescan. Values below the first
    /// breakpoint extrapolate toward the origin, values past the last one
    /// extrapolate along the final segment.
    pub fn map(&self, xs: &[f64]) -> Vec<f64> {
        match self.mode {
            CurveMode::Scale { factor } => xs.iter().map(|&x| x * factor).collect(),
            CurveMode::Linear { slope, intercept } => {
                xs.iter().map(|&x| slope * x + intercept).collect()
            }
            CurveMode::Piecewise => {
                let mut cursor = Cursor::new(&self.breakpoints, self.overshoot);
                xs.iter().map(|&x| cursor.value_at(x)).collect()
            }
        }
    }
}

/// Forward-only walk over the breakpoints of one `map` call
struct Cursor<'a> {
    breakpoints: &'a [Breakpoint],
    overshoot: OvershootPolicy,
    next: usize,
}

impl<'a> Cursor<'a> {
    fn new(breakpoints: &'a [Breakpoint], overshoot: OvershootPolicy) -> Self {
        Self {
            breakpoints,
            overshoot,
            next: 0,
        }
    }

    fn value_at(&mut self, x: f64) -> f64 {
        let breakpoints = self.breakpoints;

        if self.overshoot == OvershootPolicy::Advance {
            while self.next < breakpoints.len() && x > breakpoints[self.next].channel {
                self.next += 1;
            }
        }

        let Some(head) = breakpoints.get(self.next) else {
            return segment_ending_at(breakpoints, breakpoints.len() - 1).eval(x);
        };

        let y = segment_ending_at(breakpoints, self.next).eval(x);
        if x == head.channel {
            self.next += 1;
        }
        y
    }
}

/// Straight line anchored at a breakpoint
#[derive(Debug, Clone, Copy)]
struct Segment {
    slope: f64,
    anchor: Breakpoint,
}

impl Segment {
    fn eval(&self, x: f64) -> f64 {
        self.slope * (x - self.anchor.channel) + self.anchor.value
    }
}

/// Segment `(end - 1, end)`, or the virtual segment from the origin when `end == 0`.
///
/// Requires at least two breakpoints.
fn segment_ending_at(breakpoints: &[Breakpoint], end: usize) -> Segment {
    let head = breakpoints[end];
    if end == 0 {
        if head.channel > 0.0 {
            return Segment {
                slope: head.value / head.channel,
                anchor: head,
            };
        }
        // A breakpoint at channel 0 leaves no origin segment
        let first = segment_ending_at(breakpoints, 1);
        return Segment {
            slope: first.slope,
            anchor: head,
        };
    }
    let tail = breakpoints[end - 1];
    Segment {
        slope: (head.value - tail.value) / (head.channel - tail.channel),
        anchor: head,
    }
}

fn validate_marker(marker: &CalibrationMarker) -> Result<(), CalibrationError> {
    let reason = if !marker.channel.is_finite() || !marker.value.is_finite() {
        "non-finite coordinate"
    } else if marker.channel < 0.0 {
        "negative channel"
    } else {
        return Ok(());
    };
    Err(CalibrationError::InvalidMarker {
        channel: marker.channel,
        value: marker.value,
        reason,
    })
}

fn sort_and_dedup(mut markers: Vec<CalibrationMarker>) -> Vec<Breakpoint> {
    // Stable sort keeps arrival order among equal channels, so the last of a
    // run is the last one seen.
    markers.sort_by(|a, b| a.channel.total_cmp(&b.channel));

    let mut breakpoints: Vec<Breakpoint> = Vec::with_capacity(markers.len());
    for marker in markers {
        match breakpoints.last_mut() {
            Some(last) if last.channel == marker.channel => *last = marker,
            _ => breakpoints.push(marker),
        }
    }
    breakpoints
}

fn two_point_factor(
    breakpoints: &[Breakpoint],
    formula: TwoPointFormula,
) -> Result<f64, CalibrationError> {
    let (low, high) = (breakpoints[0], breakpoints[1]);
    match formula {
        TwoPointFormula::RatioOfDeltas => Ok((high.value - low.value) / (high.channel - low.channel)),
        TwoPointFormula::RatioOfValues => {
            if low.channel == 0.0 {
                return Err(CalibrationError::DegenerateMarkers(format!(
                    "ratio-of-values needs a nonzero channel, lowest marker is at channel 0 (value {})",
                    low.value
                )));
            }
            Ok(low.value / low.channel)
        }
    }
}

fn least_squares(breakpoints: &[Breakpoint]) -> (f64, f64) {
    let n = breakpoints.len() as f64;
    let mean_x = breakpoints.iter().map(|b| b.channel).sum::<f64>() / n;
    let mean_y = breakpoints.iter().map(|b| b.value).sum::<f64>() / n;

    let (sxy, sxx) = breakpoints.iter().fold((0.0, 0.0), |(sxy, sxx), b| {
        let dx = b.channel - mean_x;
        (sxy + dx * (b.value - mean_y), sxx + dx * dx)
    });

    // Distinct channels guarantee sxx > 0
    let slope = sxy / sxx;
    (slope, mean_y - slope * mean_x)
}
