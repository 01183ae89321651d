//! The Android Studio project generator.
//!
//! Ties the assembler, the markup builders, and the emission driver
//! together into one `export` pass that produces a complete, openable
//! Gradle project under the chosen output directory.

use std::path::PathBuf;

use droidgen_core::{collect_all_files, Project, Result};
use droidgen_manifest_writer::{build_manifest, build_string_resources};
use tracing::info;

use crate::activity;
use crate::assembler::Assembler;
use crate::emit::Emitter;
use crate::icons::{self, DensityIcon};
use crate::ndk_build;
use crate::sources;

/// Minimal POSIX launcher that defers to the wrapper jar. Written
/// alongside the wrapper so the generated project builds from a clean
/// checkout with only a JDK installed.
const GRADLEW_UNIX: &str = "#!/usr/bin/env sh\n\
DIR=\"$(cd \"$(dirname \"$0\")\" && pwd)\"\n\
exec java -classpath \"$DIR/gradle/wrapper/gradle-wrapper.jar\" org.gradle.wrapper.GradleWrapperMain \"$@\"\n";

const GRADLEW_WINDOWS: &str = "@rem Gradle startup script for Windows\r\n\
@echo off\r\n\
set DIR=%~dp0\r\n\
java -classpath \"%DIR%gradle\\wrapper\\gradle-wrapper.jar\" org.gradle.wrapper.GradleWrapperMain %*\r\n";

/// Per-run inputs that are not part of the project file.
pub struct ExportOptions {
    /// Directory the generated project is written into.
    pub output_dir: PathBuf,

    /// Launcher icons, one per density bucket. Empty means the project
    /// ships without an icon.
    pub icons: Vec<DensityIcon>,

    /// `gradle-wrapper.jar` contents, when the caller has a copy to
    /// bundle.
    pub wrapper_jar: Option<Vec<u8>>,

    /// Wrapper licence text to place next to the jar.
    pub wrapper_license: Option<Vec<u8>>,

    /// Body of the generated activity class, with
    /// [`activity::PACKAGE_TOKEN`] and [`activity::CLASS_NAME_TOKEN`]
    /// placeholders. `None` means the caller supplies the activity
    /// source by other means.
    pub activity_template: Option<String>,
}

impl ExportOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            icons: Vec::new(),
            wrapper_jar: None,
            wrapper_license: None,
            activity_template: None,
        }
    }
}

/// Generates the full project tree for one [`Project`].
pub struct AndroidStudioExporter<'a> {
    project: &'a Project,
    assembler: Assembler<'a>,
}

impl<'a> AndroidStudioExporter<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self {
            project,
            assembler: Assembler::new(project),
        }
    }

    /// Run a full generation pass. Previously generated files are
    /// removed first, so the output always reflects exactly the
    /// current project. Any failure aborts the pass where it happened;
    /// the output directory is only guaranteed consistent after a
    /// successful run.
    pub fn export(&self, options: &ExportOptions) -> Result<()> {
        info!(
            project = %self.project.name,
            out = %options.output_dir.display(),
            "generating Android Studio project"
        );

        let asm = &self.assembler;
        let emitter = Emitter::new(&options.output_dir);

        emitter.remove_stale()?;
        if let Some(template) = &options.activity_template {
            activity::write_activity_source(&emitter, asm, template)?;
        }
        sources::link_native_sources(&emitter, self.project)?;

        emitter.write_text("settings.gradle", &asm.settings_gradle())?;
        emitter.write_text("build.gradle", &asm.project_build_gradle())?;
        emitter.write_text("app/build.gradle", &asm.app_build_gradle()?)?;
        emitter.write_text("local.properties", &asm.local_properties())?;
        emitter.write_text(
            "gradle/wrapper/gradle-wrapper.properties",
            &asm.wrapper_properties(),
        )?;

        emitter.write_text("gradlew", GRADLEW_UNIX)?;
        emitter.write_text("gradlew.bat", GRADLEW_WINDOWS)?;
        if let Some(jar) = &options.wrapper_jar {
            emitter.write_binary("gradle/wrapper/gradle-wrapper.jar", jar)?;
        }
        if let Some(license) = &options.wrapper_license {
            emitter.write_binary("gradle/LICENSE-for-wrapper.txt", license)?;
        }
        emitter.set_executable("gradlew")?;

        let manifest = asm.manifest_spec(!options.icons.is_empty())?;
        emitter.write_text(
            "app/src/main/AndroidManifest.xml",
            &build_manifest(&manifest).to_xml_string()?,
        )?;
        emitter.write_text(
            "app/src/main/res/values/string.xml",
            &build_string_resources(&self.project.name).to_xml_string()?,
        )?;
        icons::write_icons(&emitter, &options.icons)?;

        let compiled = collect_all_files(&self.project.source_groups, |f| f.compile);
        emitter.write_text("app/Application.mk", &ndk_build::application_mk(asm))?;
        emitter.write_text("app/Android.mk", &ndk_build::android_mk(asm, &compiled))?;

        info!("project generated");
        Ok(())
    }
}
