//! Droidgen - Android Studio project exporter
//!
//! Generates a complete, openable Android Studio / Gradle project from
//! a `droidgen.toml` project description: build scripts, manifest,
//! resources, NDK makefiles, and wrapper files, all emitted
//! idempotently into an output directory.
//!
//! ## Architecture
//!
//! Droidgen is organized into specialized crates:
//!
//! - `droidgen-core`: project model, settings store, path helpers
//! - `droidgen-gradle-script`: Gradle script element tree and rendering
//! - `droidgen-manifest-writer`: manifest and resource XML generation
//! - `droidgen-exporter`: descriptor assembly and file emission
//! - `droidgen-platform-bridge`: host-service shims (content URIs,
//!   well-known folders, blocking HTTP)

#![warn(clippy::all)]

pub mod commands;

// Re-export main components for library usage
pub use droidgen_core as core;
pub use droidgen_exporter as exporter;
pub use droidgen_gradle_script as gradle_script;
pub use droidgen_manifest_writer as manifest_writer;
pub use droidgen_platform_bridge as platform_bridge;

/// Prelude module for convenient imports
pub mod prelude {
    pub use droidgen_core::{BuildConfiguration, Project, SettingsStore};
    pub use droidgen_exporter::{AndroidStudioExporter, ExportOptions};
    pub use droidgen_platform_bridge::{ContentUri, ContentUriResolver, PlatformBridge};
}
