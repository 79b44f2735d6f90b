//! Bucket files inside an output directory.

use std::io::{self, BufWriter};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use campsite_core::SinkProvider;
use cap_std::fs_utf8;

/// Opens bucket files inside an existing output directory.
///
/// Existing files are truncated. Clones share the directory handle, so one
/// opened directory can serve several export runs.
#[derive(Debug, Clone)]
pub struct DirectorySinks {
    dir: Arc<fs_utf8::Dir>,
    path: Utf8PathBuf,
}

impl DirectorySinks {
    /// Open the output directory. The directory is never created.
    ///
    /// # Errors
    /// Returns the I/O error raised while opening the directory.
    pub fn new(path: &Utf8Path) -> io::Result<Self> {
        let dir = campsite_fs::open_dir(path)?;
        Ok(Self {
            dir: Arc::new(dir),
            path: path.to_owned(),
        })
    }

    /// Path the directory was opened from.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl SinkProvider for DirectorySinks {
    type Sink = BufWriter<fs_utf8::File>;

    fn open(&mut self, file_name: &str) -> io::Result<Self::Sink> {
        campsite_fs::create_file(&self.dir, file_name).map(BufWriter::new)
    }
}
