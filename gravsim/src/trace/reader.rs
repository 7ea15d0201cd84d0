//! Parse a trace back into records and per-step frames

use std::io::BufRead;

use super::COLUMNS;
use crate::error::{SimError, SimResult};
use crate::simulation::states::NVec2;

/// One data row of the trace
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRecord {
    pub time: f64,
    pub body: usize, // 1-based
    pub m: f64,
    pub x: NVec2,
    pub v: NVec2,
    pub a: NVec2,
}

/// Read every data row. A header row is accepted on the first line only.
/// Blank lines are skipped.
pub fn read_trace<R: BufRead>(reader: R) -> SimResult<Vec<TraceRecord>> {
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if idx == 0 && fields == COLUMNS {
            continue;
        }
        if fields.len() != COLUMNS.len() {
            return Err(SimError::TraceFormat {
                line: lineno,
                reason: format!("expected {} fields, found {}", COLUMNS.len(), fields.len()),
            });
        }

        let real = |k: usize| -> SimResult<f64> {
            fields[k].parse::<f64>().map_err(|e| SimError::TraceFormat {
                line: lineno,
                reason: format!("column {}: {e}", COLUMNS[k]),
            })
        };
        let body = fields[1].parse::<usize>().map_err(|e| SimError::TraceFormat {
            line: lineno,
            reason: format!("column Body: {e}"),
        })?;

        records.push(TraceRecord {
            time: real(0)?,
            body,
            m: real(2)?,
            x: NVec2::new(real(3)?, real(4)?),
            v: NVec2::new(real(5)?, real(6)?),
            a: NVec2::new(real(7)?, real(8)?),
        });
    }

    Ok(records)
}

/// State of every body at one step, indexed by `body - 1`
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub time: f64,
    pub positions: Vec<NVec2>,
    pub velocities: Vec<NVec2>,
    pub accelerations: Vec<NVec2>,
}

/// Group records into per-step frames of `bodies` entries each.
/// A trailing partial step is dropped.
pub fn frames(records: &[TraceRecord], bodies: usize) -> Vec<Frame> {
    if bodies == 0 {
        return Vec::new();
    }
    records
        .chunks_exact(bodies)
        .map(|step| Frame {
            time: step[0].time,
            positions: step.iter().map(|r| r.x).collect(),
            velocities: step.iter().map(|r| r.v).collect(),
            accelerations: step.iter().map(|r| r.a).collect(),
        })
        .collect()
}
