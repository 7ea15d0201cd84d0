//! Playback state for a recorded trace
//!
//! Walks the per-step frames `stride` steps at a time and maps simulation
//! coordinates into a fixed pixel box centred on the trajectories. Also
//! samples each body's `Ax` and `Ux` against time for the series panels,
//! normalised to a unit square over the whole trace.

use crate::simulation::states::NVec2;
use crate::trace::reader::Frame;

/// Half-width in pixels that all trajectories are fitted into
pub const VIEW_EXTENT: f32 = 340.0;

/// Quantity plotted against time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Ax, // x acceleration
    Ux, // x velocity
}

impl Series {
    pub const ALL: [Series; 2] = [Series::Ax, Series::Ux];

    pub fn label(self) -> &'static str {
        match self {
            Series::Ax => "Acceleration (ax) vs Time",
            Series::Ux => "Velocity (ux) vs Time",
        }
    }

    fn value(self, frame: &Frame, body: usize) -> Option<f64> {
        let column = match self {
            Series::Ax => &frame.accelerations,
            Series::Ux => &frame.velocities,
        };
        column.get(body).map(|w| w.x)
    }
}

#[derive(Debug, Clone)]
pub struct Replay {
    frames: Vec<Frame>,
    stride: usize,
    cursor: usize,
    center: NVec2,
    scale: f64,
    time_span: (f64, f64),
    ax_span: (f64, f64),
    ux_span: (f64, f64),
}

/// (min, max) of `values`, or (0, 0) when empty
fn span(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 0.0))
}

/// Position of `v` inside `span` as a fraction; the middle for a flat span
fn fraction(v: f64, (lo, hi): (f64, f64)) -> f32 {
    if hi > lo {
        ((v - lo) / (hi - lo)) as f32
    } else {
        0.5
    }
}

impl Replay {
    pub fn new(frames: Vec<Frame>, stride: usize) -> Self {
        let mut min = NVec2::repeat(f64::INFINITY);
        let mut max = NVec2::repeat(f64::NEG_INFINITY);
        for p in frames.iter().flat_map(|f| f.positions.iter()) {
            min = min.inf(p);
            max = max.sup(p);
        }

        let (center, scale) = if min.x <= max.x {
            let half = 0.5 * (max - min).max();
            let scale = if half > 0.0 { VIEW_EXTENT as f64 / half } else { 1.0 };
            ((min + max) * 0.5, scale)
        } else {
            (NVec2::zeros(), 1.0)
        };

        let time_span = span(frames.iter().map(|f| f.time));
        let ax_span = span(frames.iter().flat_map(|f| f.accelerations.iter().map(|a| a.x)));
        let ux_span = span(frames.iter().flat_map(|f| f.velocities.iter().map(|v| v.x)));

        Self {
            frames,
            stride: stride.max(1),
            cursor: 0,
            center,
            scale,
            time_span,
            ax_span,
            ux_span,
        }
    }

    pub fn bodies(&self) -> usize {
        self.frames.first().map_or(0, |f| f.positions.len())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&Frame> {
        self.frames.get(self.cursor)
    }

    /// Move `stride` steps ahead, wrapping to the start after the last frame
    pub fn advance(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        let last = self.frames.len() - 1;
        self.cursor = if self.cursor == last {
            0
        } else {
            (self.cursor + self.stride).min(last)
        };
    }

    /// Positions of `body` from the start up to the cursor, sampled every `stride` steps
    pub fn trail(&self, body: usize) -> impl Iterator<Item = NVec2> + '_ {
        self.played().filter_map(move |f| f.positions.get(body).copied())
    }

    /// Frames up to the cursor, every `stride` steps
    fn played(&self) -> impl Iterator<Item = &Frame> + '_ {
        let end = if self.frames.is_empty() { 0 } else { self.cursor + 1 };
        self.frames[..end].iter().step_by(self.stride)
    }

    /// Map a simulation position to pixel coordinates
    pub fn to_screen(&self, p: &NVec2) -> (f32, f32) {
        let s = (p - self.center) * self.scale;
        (s.x as f32, s.y as f32)
    }

    /// `(time, value)` of `body` from the start up to the cursor, sampled every `stride` steps
    pub fn series(&self, body: usize, kind: Series) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.played().filter_map(move |f| kind.value(f, body).map(|v| (f.time, v)))
    }

    /// Map a series sample into the unit square, time along x
    pub fn to_plot(&self, kind: Series, time: f64, value: f64) -> (f32, f32) {
        let span = match kind {
            Series::Ax => self.ax_span,
            Series::Ux => self.ux_span,
        };
        (fraction(time, self.time_span), fraction(value, span))
    }
}
