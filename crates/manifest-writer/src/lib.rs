//! Manifest and resource writer
//!
//! Builds the manifest and string-resource documents as [`MarkupElement`]
//! trees and renders them to XML. Like the script builder, the tree is
//! fully constructed before rendering starts and rendering never mutates
//! it.

pub mod manifest;
pub mod markup;
pub mod resources;

pub use manifest::{build_manifest, ManifestSpec};
pub use markup::{MarkupElement, WriteError};
pub use resources::build_string_resources;
