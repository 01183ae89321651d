//! Mirrors the project's native source tree into the generated
//! project's JNI folder using symlinks, so edits in either place are
//! the same file.

use std::path::PathBuf;

use droidgen_core::{Project, Result, SourceGroup};
use tracing::debug;

use crate::emit::Emitter;

/// Root of the native source tree inside the generated project.
pub const JNI_DIR: &str = "app/src/main/jni";

/// Symlink every source file in the project into the JNI folder,
/// preserving the group structure as subdirectories. Returns the
/// paths (relative to the JNI folder) that were linked, in project
/// order.
pub fn link_native_sources(emitter: &Emitter, project: &Project) -> Result<Vec<PathBuf>> {
    let mut linked = Vec::new();
    for group in &project.source_groups {
        link_group(emitter, group, PathBuf::new(), &mut linked)?;
    }
    debug!("linked {} native sources into {}", linked.len(), JNI_DIR);
    Ok(linked)
}

fn link_group(
    emitter: &Emitter,
    group: &SourceGroup,
    prefix: PathBuf,
    linked: &mut Vec<PathBuf>,
) -> Result<()> {
    match group {
        SourceGroup::Group { name, children } => {
            let prefix = prefix.join(name);
            for child in children {
                link_group(emitter, child, prefix.clone(), linked)?;
            }
        }
        SourceGroup::File(file) => {
            let file_name = match file.path.file_name() {
                Some(name) => name,
                None => return Ok(()),
            };
            let rel = prefix.join(file_name);
            emitter.create_symlink(&file.path, PathBuf::from(JNI_DIR).join(&rel))?;
            linked.push(rel);
        }
    }
    Ok(())
}
