//! CLI commands for droidgen.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use droidgen_core::Project;
use droidgen_exporter::{AndroidStudioExporter, ExportOptions};

/// Export command options
pub struct ExportCommand {
    /// Directory holding the project file.
    pub project_dir: PathBuf,

    /// Output directory; defaults to `<project_dir>/Builds/Android`.
    pub output_dir: Option<PathBuf>,
}

impl ExportCommand {
    /// Load the project and run one generation pass.
    pub async fn execute(&self) -> Result<PathBuf> {
        let project_file = self.project_dir.join(Project::FILE_NAME);
        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| self.project_dir.join("Builds").join("Android"));

        info!("Exporting {:?} to {:?}", project_file, output_dir);

        // Emission is synchronous file I/O; keep it off the runtime.
        let out = output_dir.clone();
        let project_dir = self.project_dir.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let project = Project::load(&project_dir)
                .with_context(|| format!("failed to load {:?}", project_file))?;
            let exporter = AndroidStudioExporter::new(&project);
            exporter.export(&ExportOptions::new(&out)).context("export failed")?;
            Ok(())
        })
        .await??;

        info!("Export complete: {:?}", output_dir);
        Ok(output_dir)
    }
}

/// Init command options
pub struct InitCommand {
    /// Directory to create the project file in.
    pub project_dir: PathBuf,

    /// Project name; defaults to the directory name.
    pub name: Option<String>,
}

impl InitCommand {
    /// Write a default project file.
    pub async fn execute(&self) -> Result<PathBuf> {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => self
                .project_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Untitled".to_string()),
        };

        let project_file = self.project_dir.join(Project::FILE_NAME);
        if project_file.exists() {
            anyhow::bail!("{:?} already exists", project_file);
        }

        let bundle_id = format!(
            "com.example.{}",
            name.to_lowercase().replace(|c: char| !c.is_ascii_alphanumeric(), "")
        );

        let dir = self.project_dir.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            std::fs::create_dir_all(&dir)?;
            let project = Project::new(&name, &bundle_id);
            project.save(&dir).context("failed to write project file")?;
            Ok(())
        })
        .await??;

        info!("Created {:?}", project_file);
        Ok(project_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn init_writes_a_loadable_project_file() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = InitCommand {
            project_dir: dir.path().join("My App"),
            name: None,
        };

        let file = cmd.execute().await.unwrap();
        assert!(file.ends_with(Project::FILE_NAME));
        let project = Project::load(file.parent().unwrap()).unwrap();
        assert_eq!(project.name, "My App");
        assert_eq!(project.bundle_identifier, "com.example.myapp");
    }

    #[tokio::test]
    async fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = InitCommand {
            project_dir: dir.path().to_path_buf(),
            name: Some("App".into()),
        };
        cmd.execute().await.unwrap();
        assert!(cmd.execute().await.is_err());
    }

    #[tokio::test]
    async fn export_runs_on_an_initialised_project() {
        let dir = tempfile::tempdir().unwrap();
        InitCommand {
            project_dir: dir.path().to_path_buf(),
            name: Some("Demo".into()),
        }
        .execute()
        .await
        .unwrap();

        let out = ExportCommand {
            project_dir: dir.path().to_path_buf(),
            output_dir: None,
        }
        .execute()
        .await
        .unwrap();

        assert!(out.join("settings.gradle").exists());
        assert!(out.join("app/build.gradle").exists());
    }
}
