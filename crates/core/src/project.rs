//! Project model
//!
//! The in-memory description of the project being exported: build
//! configurations, the source-file tree, and the exporter settings.
//! Loaded from and saved to `droidgen.toml`. The model is read-only for
//! the duration of a generation pass.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ExportError, Result};
use crate::settings::SettingsStore;

/// Compiler optimisation level for a build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimisationLevel {
    None,
    Speed,
    Size,
}

impl OptimisationLevel {
    /// The `-O<flag>` suffix handed to the compiler.
    pub fn gcc_flag(&self) -> &'static str {
        match self {
            OptimisationLevel::None => "0",
            OptimisationLevel::Speed => "3",
            OptimisationLevel::Size => "s",
        }
    }
}

/// A named build variant (debug/release) with its compiler settings.
///
/// Immutable once read for a generation pass; owned by the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfiguration {
    /// Configuration name. Only "Debug" and "Release" (any letter case)
    /// are accepted by the exporter.
    pub name: String,

    /// Whether this is a debug configuration.
    pub debug: bool,

    /// Optimisation level.
    #[serde(default = "default_optimisation")]
    pub optimisation: OptimisationLevel,

    /// Whitespace/comma-delimited list of target architectures.
    #[serde(default)]
    pub architectures: String,

    /// Preprocessor defines, in insertion order.
    #[serde(default)]
    pub preprocessor_defines: IndexMap<String, String>,

    /// Header search paths.
    #[serde(default)]
    pub header_search_paths: Vec<String>,

    /// Library search paths.
    #[serde(default)]
    pub library_search_paths: Vec<String>,

    /// Extra compiler flags, space separated.
    #[serde(default)]
    pub extra_compiler_flags: String,

    /// Extra linker flags, space separated.
    #[serde(default)]
    pub extra_linker_flags: String,
}

fn default_optimisation() -> OptimisationLevel {
    OptimisationLevel::Speed
}

impl BuildConfiguration {
    /// A debug configuration with the stock architecture list.
    pub fn debug() -> Self {
        Self {
            name: "Debug".to_string(),
            debug: true,
            optimisation: OptimisationLevel::None,
            architectures: "armeabi x86".to_string(),
            preprocessor_defines: IndexMap::new(),
            header_search_paths: Vec::new(),
            library_search_paths: Vec::new(),
            extra_compiler_flags: String::new(),
            extra_linker_flags: String::new(),
        }
    }

    /// A release configuration with the stock architecture list.
    pub fn release() -> Self {
        Self {
            name: "Release".to_string(),
            debug: false,
            optimisation: OptimisationLevel::Speed,
            architectures: "armeabi armeabi-v7a x86".to_string(),
            preprocessor_defines: IndexMap::new(),
            header_search_paths: Vec::new(),
            library_search_paths: Vec::new(),
            extra_compiler_flags: String::new(),
            extra_linker_flags: String::new(),
        }
    }
}

/// A leaf file reference in the source tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path relative to the project root.
    pub path: PathBuf,

    /// Whether the file takes part in compilation (as opposed to being
    /// a header or resource that is only linked into the tree).
    #[serde(default = "default_true")]
    pub compile: bool,
}

fn default_true() -> bool {
    true
}

/// Recursive source tree node: a named folder of children, or a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceGroup {
    Group {
        name: String,
        #[serde(default)]
        children: Vec<SourceGroup>,
    },
    File(SourceFile),
}

impl SourceGroup {
    /// Generic tree-to-sequence filter: collect every leaf file matching
    /// the predicate, depth-first, in declaration order. Pure; the only
    /// accumulator is the returned vector.
    pub fn collect_files<'a, P>(&'a self, predicate: &P, out: &mut Vec<&'a SourceFile>)
    where
        P: Fn(&SourceFile) -> bool,
    {
        match self {
            SourceGroup::Group { children, .. } => {
                for child in children {
                    child.collect_files(predicate, out);
                }
            }
            SourceGroup::File(file) => {
                if predicate(file) {
                    out.push(file);
                }
            }
        }
    }

    /// True for folder nodes.
    pub fn is_group(&self) -> bool {
        matches!(self, SourceGroup::Group { .. })
    }
}

/// All files matching the predicate across a set of top-level groups.
pub fn collect_all_files<'a, P>(groups: &'a [SourceGroup], predicate: P) -> Vec<&'a SourceFile>
where
    P: Fn(&SourceFile) -> bool,
{
    let mut out = Vec::new();
    for group in groups {
        group.collect_files(&predicate, &mut out);
    }
    out
}

/// The project being exported (droidgen.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project name, used as the app label.
    pub name: String,

    /// Marketing version string (android:versionName).
    pub version: String,

    /// Bundle identifier (e.g. "com.example.myapp").
    pub bundle_identifier: String,

    /// Build configurations, usually one debug and one release.
    #[serde(default)]
    pub configurations: Vec<BuildConfiguration>,

    /// Top-level source groups.
    #[serde(default)]
    pub source_groups: Vec<SourceGroup>,

    /// Exporter settings.
    #[serde(default)]
    pub settings: SettingsStore,
}

impl Project {
    /// Name of the project file inside a project directory.
    pub const FILE_NAME: &'static str = "droidgen.toml";

    /// A minimal project with stock debug/release configurations.
    pub fn new(name: impl Into<String>, bundle_identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: "1.0.0".to_string(),
            bundle_identifier: bundle_identifier.into(),
            configurations: vec![BuildConfiguration::debug(), BuildConfiguration::release()],
            source_groups: Vec::new(),
            settings: SettingsStore::new(),
        }
    }

    /// Load a project from its directory.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(Self::FILE_NAME);

        if !path.exists() {
            return Err(ExportError::Project(format!(
                "no {} found in {:?}",
                Self::FILE_NAME,
                project_dir
            )));
        }

        let content = std::fs::read_to_string(&path)?;
        let project: Project = toml::from_str(&content)?;
        Ok(project)
    }

    /// Save the project file into a directory.
    pub fn save(&self, project_dir: &Path) -> Result<()> {
        let path = project_dir.join(Self::FILE_NAME);
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        info!("wrote project file {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<SourceGroup> {
        vec![SourceGroup::Group {
            name: "Source".to_string(),
            children: vec![
                SourceGroup::File(SourceFile {
                    path: PathBuf::from("Source/Main.cpp"),
                    compile: true,
                }),
                SourceGroup::Group {
                    name: "Headers".to_string(),
                    children: vec![SourceGroup::File(SourceFile {
                        path: PathBuf::from("Source/App.h"),
                        compile: false,
                    })],
                },
                SourceGroup::File(SourceFile {
                    path: PathBuf::from("Source/App.cpp"),
                    compile: true,
                }),
            ],
        }]
    }

    #[test]
    fn collects_compiled_files_in_order() {
        let groups = tree();
        let files = collect_all_files(&groups, |f| f.compile);
        let paths: Vec<_> = files.iter().map(|f| f.path.to_str().unwrap()).collect();
        assert_eq!(paths, vec!["Source/Main.cpp", "Source/App.cpp"]);
    }

    #[test]
    fn predicate_filters_nothing_when_always_true() {
        let groups = tree();
        assert_eq!(collect_all_files(&groups, |_| true).len(), 3);
    }

    #[test]
    fn project_roundtrips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let mut project = Project::new("Demo", "com.example.demo");
        project.settings.set(crate::settings::keys::MIN_SDK, "26");
        project.save(dir.path()).unwrap();

        let loaded = Project::load(dir.path()).unwrap();
        assert_eq!(loaded.name, "Demo");
        assert_eq!(loaded.configurations.len(), 2);
        assert_eq!(loaded.settings.get(crate::settings::keys::MIN_SDK), "26");
    }
}
