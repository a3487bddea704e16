//! Scratch directory holding rendered documents handed to kubectl.
//!
//! The directory is shared by every run on the machine and is never cleaned
//! up. File names are fixed per document family, so concurrent runs of the
//! same install overwrite each other's files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const SCRATCH_DIR_NAME: &str = ".coolknative";

#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<system temp>/.coolknative`.
    pub fn system() -> Self {
        Self::new(std::env::temp_dir().join(SCRATCH_DIR_NAME))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` to `file_name`, creating the directory on first use and
    /// replacing any previous content.
    pub fn write(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        if !self.root.is_dir() {
            tracing::debug!(dir = %self.root.display(), "creating scratch directory");
            fs::create_dir_all(&self.root)?;
        }
        let path = self.root.join(file_name);
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn creates_directory_and_overwrites_fixed_names() {
        let tmp = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::new(tmp.path().join(SCRATCH_DIR_NAME));

        let first = scratch.write("temp_cicd.yaml", b"kind: A\nextra: line\n").unwrap();
        let second = scratch.write("temp_cicd.yaml", b"kind: B\n").unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(&second).unwrap(), "kind: B\n");
    }

    #[test]
    fn write_fails_when_root_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        let scratch = ScratchDir::new(&blocker);
        assert!(scratch.write("temp.yaml", b"x").is_err());
    }
}
