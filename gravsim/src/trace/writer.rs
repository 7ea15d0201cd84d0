use std::io::Write;

use super::{COLUMNS, FIELD_WIDTH, PRECISION};
use crate::error::SimResult;
use crate::simulation::states::Body;

/// Appends one row per body per step to any `Write` sink.
///
/// Each call to [`append`](Self::append) flushes, so a step is fully written
/// before the next one starts.
pub struct TraceWriter<W: Write> {
    out: W,
    rows: usize,
}

impl<W: Write> TraceWriter<W> {
    /// Wrap `out`, writing the header row first when `write_header` is set
    pub fn new(mut out: W, write_header: bool) -> SimResult<Self> {
        if write_header {
            for col in COLUMNS {
                write!(out, "{col:>w$}", w = FIELD_WIDTH)?;
            }
            writeln!(out)?;
            out.flush()?;
        }
        Ok(Self { out, rows: 0 })
    }

    /// Write every body's state at elapsed time `t`
    pub fn append(&mut self, bodies: &[Body], t: f64) -> SimResult<()> {
        for (i, b) in bodies.iter().enumerate() {
            writeln!(
                self.out,
                "{t:>w$.p$}{idx:>w$}{m:>w$.p$}{sx:>w$.p$}{sy:>w$.p$}{ux:>w$.p$}{uy:>w$.p$}{ax:>w$.p$}{ay:>w$.p$}",
                idx = i + 1,
                m = b.m(),
                sx = b.x.x,
                sy = b.x.y,
                ux = b.v.x,
                uy = b.v.y,
                ax = b.a.x,
                ay = b.a.y,
                w = FIELD_WIDTH,
                p = PRECISION,
            )?;
        }
        self.out.flush()?;
        self.rows += bodies.len();
        Ok(())
    }

    /// Data rows written through this writer (header excluded)
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn flush(&mut self) -> SimResult<()> {
        Ok(self.out.flush()?)
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
