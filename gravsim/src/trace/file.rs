//! Owned trace sink for one run
//!
//! [`TraceFile`] opens the trace in append mode, writes the header only if the
//! file was empty, and truncates the file back to empty when dropped. The drop
//! runs on every exit path, so the truncation holds for failed runs too.

use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::writer::TraceWriter;
use crate::error::SimResult;

pub struct TraceFile {
    path: PathBuf,
    writer: TraceWriter<BufWriter<File>>,
}

impl TraceFile {
    pub fn open(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let empty = file.metadata()?.len() == 0;
        debug!(path = %path.display(), header = empty, "trace opened");

        let writer = TraceWriter::new(BufWriter::new(file), empty)?;
        Ok(Self { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&mut self) -> &mut TraceWriter<BufWriter<File>> {
        &mut self.writer
    }
}

impl Drop for TraceFile {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            warn!(path = %self.path.display(), error = %e, "failed to flush trace");
        }
        match self.writer.get_ref().get_ref().set_len(0) {
            Ok(()) => debug!(path = %self.path.display(), "trace truncated"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to truncate trace"),
        }
    }
}
