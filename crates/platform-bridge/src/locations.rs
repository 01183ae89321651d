//! Well-known folder lookup.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::PlatformBridge;

/// The folders callers can ask the platform for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialDirectory {
    Home,
    AppData,
    Documents,
    Pictures,
    Music,
    Movies,
    Downloads,
    Temp,
}

/// Resolve a well-known folder through the bridge. The temp folder is
/// a `.temp` directory under app data, created on first use; creation
/// failure answers `None` like any other unavailable service.
pub fn special_location(bridge: &dyn PlatformBridge, kind: SpecialDirectory) -> Option<PathBuf> {
    match kind {
        SpecialDirectory::Temp => {
            let temp = bridge.special_directory(SpecialDirectory::AppData)?.join(".temp");
            if let Err(err) = fs::create_dir_all(&temp) {
                debug!("could not create temp folder {:?}: {}", temp, err);
                return None;
            }
            Some(temp)
        }
        other => bridge.special_directory(other),
    }
}
