//! Android Studio project exporter
//!
//! One generation pass walks the project model and produces a complete
//! Gradle build tree under an output root: build scripts, manifest,
//! string resources, icons, wrapper files and the NDK makefile pair.
//! The pass is single-threaded and synchronous; the caller serialises
//! invocations and owns the output directory for the duration.

pub mod activity;
pub mod assembler;
pub mod emit;
pub mod exporter;
pub mod icons;
pub mod ndk_build;
pub mod sources;

pub use assembler::Assembler;
pub use emit::Emitter;
pub use exporter::{AndroidStudioExporter, ExportOptions};
pub use icons::DensityIcon;
