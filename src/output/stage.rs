// stage.rs - Staged output files with atomic publish

use crate::error::Result;
use std::fs::{create_dir_all, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Collects output files written to `<path>.tmp` staging names and renames
/// them into place in one final pass.
///
/// All tables of a run are published together or not at all: until
/// `commit` runs, no final output path is touched, and dropping the stage
/// without committing removes the staging files.
#[derive(Debug, Default)]
pub struct OutputStage {
    staged: Vec<(PathBuf, PathBuf)>, // (tmp, final)
    committed: bool,
}

impl OutputStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffered writer for the staged version of `path`.
    ///
    /// The caller must flush (or drop) the writer before `commit`.
    pub fn create(&mut self, path: impl AsRef<Path>) -> Result<BufWriter<File>> {
        let final_path = path.as_ref().to_path_buf();
        ensure_parent_dir(&final_path)?;

        let mut tmp_name = final_path.as_os_str().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let file = File::create(&tmp_path)?;
        self.staged.push((tmp_path, final_path));
        Ok(BufWriter::new(file))
    }

    /// Number of staged files
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Atomically publish every staged file under its final name
    pub fn commit(mut self) -> Result<()> {
        for (tmp, final_path) in &self.staged {
            std::fs::rename(tmp, final_path)?;
        }
        self.committed = true;
        Ok(())
    }
}

impl Drop for OutputStage {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for (tmp, _) in &self.staged {
            let _ = std::fs::remove_file(tmp);
        }
    }
}
