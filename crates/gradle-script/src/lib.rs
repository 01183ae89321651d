//! Gradle script builder
//!
//! A tree-of-statements model for generated build scripts. The assembler
//! constructs a [`ScriptElement`] tree, then rendering flattens it into
//! indented text. Rendering is a pure traversal: it depends only on tree
//! shape and string content, never mutates the tree, and cannot fail.

pub mod element;
pub mod fragments;

pub use element::ScriptElement;
