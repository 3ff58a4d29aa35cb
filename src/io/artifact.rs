//! The transient composite artifact and atomic file writes.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Suffix of the composite artifact's file name.
pub const ARTIFACT_SUFFIX: &str = "composite.org";

/// Stem used when the root's directory has no usable name.
const FALLBACK_STEM: &str = "orgtangle";

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Returns the artifact path for a root document.
///
/// The name depends only on the root's directory, so every root in the
/// same directory shares one artifact location.
pub fn artifact_path(root: &Path) -> PathBuf {
    let dir = root.parent().unwrap_or(Path::new(""));
    let stem = dir
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.trim_start_matches('.'))
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_STEM);
    dir.join(format!(".{}.{}", stem, ARTIFACT_SUFFIX))
}

/// A composite document persisted beside its root.
#[derive(Debug)]
pub struct Artifact {
    path: PathBuf,
}

impl Artifact {
    /// Writes `content` to the artifact location for `root`.
    pub fn write(root: &Path, content: &str) -> io::Result<Self> {
        let path = artifact_path(root);
        atomic_write(&path, content)?;
        tracing::debug!("Wrote composite artifact {}", path.display());
        Ok(Self { path })
    }

    /// Returns the artifact path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the artifact from disk.
    pub fn delete(self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Deleted composite artifact {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Writes `content` to `path` via a temporary file and rename.
///
/// Missing parent directories are created.
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let temp_path = parent.join(format!(
        ".orgtangle-tmp-{}-{}",
        std::process::id(),
        counter,
    ));

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_artifact_path_uses_directory_name() {
        let path = artifact_path(Path::new("/home/me/project/main.org"));
        assert_eq!(path, PathBuf::from("/home/me/project/.project.composite.org"));
    }

    #[test]
    fn test_artifact_path_fallback() {
        let path = artifact_path(Path::new("main.org"));
        assert_eq!(path, PathBuf::from(".orgtangle.composite.org"));
    }

    #[test]
    fn test_artifact_path_hidden_directory() {
        let path = artifact_path(Path::new("/tmp/.tmpXYZ/main.org"));
        assert_eq!(path, PathBuf::from("/tmp/.tmpXYZ/.tmpXYZ.composite.org"));

        let path = artifact_path(Path::new("/tmp/.../main.org"));
        assert_eq!(path, PathBuf::from("/tmp/.../.orgtangle.composite.org"));
    }

    #[test]
    fn test_artifact_path_shared_by_siblings() {
        assert_eq!(
            artifact_path(Path::new("/p/a.org")),
            artifact_path(Path::new("/p/b.org"))
        );
    }

    #[test]
    fn test_write_and_delete() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("main.org");

        let artifact = Artifact::write(&root, "composite").unwrap();
        assert_eq!(artifact.path().parent(), Some(dir.path()));
        assert_eq!(fs::read_to_string(artifact.path()).unwrap(), "composite");

        let path = artifact.path().to_path_buf();
        artifact.delete().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_atomic_write_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out/nested/file.py");

        atomic_write(&path, "print(1)\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "print(1)\n");

        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".orgtangle-tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
