//! File emission driver.
//!
//! All disk writes for a generation pass go through the [`Emitter`].
//! Content is compared against what is already on disk and identical
//! files are left untouched, so the build tool never sees a spurious
//! change. Any I/O failure is fatal: the pass aborts and the output
//! directory must be considered inconsistent until the next successful
//! run.

use std::fs;
use std::path::{Path, PathBuf};

use droidgen_core::{ExportError, Result};
use tracing::{debug, info};

/// Writes generated artifacts under a single output root.
pub struct Emitter {
    root: PathBuf,
}

impl Emitter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute path for a generated file.
    pub fn target(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.root.join(rel)
    }

    /// Remove the generated subtrees of a previous pass so no orphaned
    /// artifacts survive a regeneration. Missing entries are fine.
    pub fn remove_stale(&self) -> Result<()> {
        for dir in ["app/src", "app/build", "gradle"] {
            remove_dir_if_present(&self.target(dir))?;
        }
        for file in ["app/build.gradle", "local.properties", "settings.gradle"] {
            remove_file_if_present(&self.target(file))?;
        }
        debug!("removed stale generated files under {:?}", self.root);
        Ok(())
    }

    /// Write a text file, creating parent directories, skipping the
    /// write when the on-disk content already matches. Returns whether
    /// anything was written.
    pub fn write_text(&self, rel: impl AsRef<Path>, content: &str) -> Result<bool> {
        self.write_binary(rel, content.as_bytes())
    }

    /// Binary counterpart of [`write_text`](Self::write_text).
    pub fn write_binary(&self, rel: impl AsRef<Path>, content: &[u8]) -> Result<bool> {
        let path = self.target(rel.as_ref());

        if let Ok(existing) = fs::read(&path) {
            if existing == content {
                debug!("unchanged, skipping {:?}", path);
                return Ok(false);
            }
        }

        self.create_parent_dirs(&path)?;
        fs::write(&path, content)?;
        info!("wrote {:?}", path);
        Ok(true)
    }

    /// Set the execute permission on a generated launcher script.
    #[cfg(unix)]
    pub fn set_executable(&self, rel: impl AsRef<Path>) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let path = self.target(rel);
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(perms.mode() | 0o755);
        fs::set_permissions(&path, perms)?;
        Ok(())
    }

    #[cfg(not(unix))]
    pub fn set_executable(&self, _rel: impl AsRef<Path>) -> Result<()> {
        Ok(())
    }

    /// Create a symlink at `link` (relative to the root) pointing to
    /// `original`, creating the link's parent directories first. The
    /// symlink itself failing is fatal.
    pub fn create_symlink(&self, original: &Path, link: impl AsRef<Path>) -> Result<()> {
        let link_path = self.target(link);
        self.create_parent_dirs(&link_path)?;

        symlink_file(original, &link_path).map_err(|_| ExportError::Symlink {
            original: original.to_path_buf(),
            link: link_path,
        })
    }

    fn create_parent_dirs(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|_| ExportError::CreateDirectory(parent.to_path_buf()))?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn symlink_file(original: &Path, link: &Path) -> std::io::Result<()> {
    if link.exists() || link.symlink_metadata().is_ok() {
        fs::remove_file(link)?;
    }
    std::os::unix::fs::symlink(original, link)
}

#[cfg(windows)]
fn symlink_file(original: &Path, link: &Path) -> std::io::Result<()> {
    if link.exists() {
        fs::remove_file(link)?;
    }
    std::os::windows::fs::symlink_file(original, link)
}

fn remove_dir_if_present(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn remove_file_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());

        assert!(emitter.write_text("gradle/wrapper/gradle-wrapper.properties", "x").unwrap());
        assert!(dir.path().join("gradle/wrapper/gradle-wrapper.properties").exists());
    }

    #[test]
    fn identical_content_suppresses_the_second_write() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());

        assert!(emitter.write_text("settings.gradle", "include ':app'").unwrap());
        let mtime = fs::metadata(dir.path().join("settings.gradle"))
            .unwrap()
            .modified()
            .unwrap();

        assert!(!emitter.write_text("settings.gradle", "include ':app'").unwrap());
        let mtime_after = fs::metadata(dir.path().join("settings.gradle"))
            .unwrap()
            .modified()
            .unwrap();
        assert_eq!(mtime, mtime_after);
    }

    #[test]
    fn changed_content_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());

        emitter.write_text("local.properties", "sdk.dir=/a").unwrap();
        assert!(emitter.write_text("local.properties", "sdk.dir=/b").unwrap());
        let content = fs::read_to_string(dir.path().join("local.properties")).unwrap();
        assert_eq!(content, "sdk.dir=/b");
    }

    #[test]
    fn remove_stale_clears_previous_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());

        emitter.write_text("app/src/main/AndroidManifest.xml", "<old/>").unwrap();
        emitter.write_text("app/build.gradle", "old").unwrap();
        emitter.write_text("settings.gradle", "old").unwrap();
        emitter.write_text("app/keep.txt", "kept").unwrap();

        emitter.remove_stale().unwrap();

        assert!(!dir.path().join("app/src").exists());
        assert!(!dir.path().join("app/build.gradle").exists());
        assert!(!dir.path().join("settings.gradle").exists());
        assert!(dir.path().join("app/keep.txt").exists());
    }

    #[test]
    fn remove_stale_on_empty_root_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        Emitter::new(dir.path()).remove_stale().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn execute_permission_is_set() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());

        emitter.write_text("gradlew", "#!/bin/sh\n").unwrap();
        emitter.set_executable("gradlew").unwrap();

        let mode = fs::metadata(dir.path().join("gradlew")).unwrap().permissions().mode();
        assert_ne!(mode & 0o111, 0);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_points_at_the_original() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());

        let original = dir.path().join("original.cpp");
        fs::write(&original, "int main() {}\n").unwrap();

        emitter.create_symlink(&original, "app/src/main/jni/original.cpp").unwrap();

        let link = dir.path().join("app/src/main/jni/original.cpp");
        assert_eq!(fs::read_link(&link).unwrap(), original);
        assert_eq!(fs::read_to_string(&link).unwrap(), "int main() {}\n");
    }
}
