//! The `update-version` task

use std::path::Path;

use tracing::{info, warn};

use crate::actions::WorkflowEnv;
use crate::project::build_file::{BuildFileUpdate, find_build_file, prepare_build_file};
use crate::project::descriptor::DescriptorBumper;
use crate::project::error::ProjectError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionUpdate {
    pub assembly_version: Option<String>,
    pub file_version: Option<String>,
    pub build_file: Option<BuildFileUpdate>,
}

/// Bumps the project descriptor in place, exports the new versions and, when
/// `root` holds a JPRM build file, moves its version to the new file version.
///
/// The build file is checked before anything is written, so a build file
/// that cannot be updated leaves the descriptor untouched.
pub fn update_version(
    project_path: &Path,
    root: &Path,
    workflow: &WorkflowEnv,
) -> Result<VersionUpdate, ProjectError> {
    if !project_path.exists() {
        return Err(ProjectError::NotFound(project_path.to_path_buf()));
    }

    let io_error = |source| ProjectError::Io {
        path: project_path.to_path_buf(),
        source,
    };

    let content = std::fs::read_to_string(project_path).map_err(io_error)?;
    let bumped = DescriptorBumper::new().bump(&content)?;

    let pending_build_file = match (&bumped.file_version, find_build_file(root)) {
        (Some(file_version), Some(path)) => {
            info!("Updating version in JPRM build file: {}", path.display());
            Some(prepare_build_file(&path, file_version)?)
        }
        _ => None,
    };

    std::fs::write(project_path, &bumped.content).map_err(io_error)?;
    info!("Version incremented successfully!");

    let build_file = pending_build_file.map(|pending| pending.write()).transpose()?;

    for (name, value) in [
        ("NEW_ASSEMBLY_VERSION", &bumped.assembly_version),
        ("NEW_FILE_VERSION", &bumped.file_version),
    ] {
        match value {
            Some(value) => workflow
                .export_variable(name, value)
                .map_err(ProjectError::Export)?,
            None => warn!("{} has no field for {}", project_path.display(), name),
        }
    }

    if let Some(update) = &build_file {
        let path_display = update.path.to_string_lossy();
        for (name, value) in [
            ("old-version", update.old_version.as_str()),
            ("new-version", update.new_version.as_str()),
            ("build-yaml-updated", "true"),
            ("build-yaml-path", path_display.as_ref()),
        ] {
            workflow
                .set_output(name, value)
                .map_err(ProjectError::Export)?;
        }
    }

    Ok(VersionUpdate {
        assembly_version: bumped.assembly_version,
        file_version: bumped.file_version,
        build_file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CSPROJ: &str = "<Project>\n  <PropertyGroup>\n    <AssemblyVersion>1.2.3</AssemblyVersion>\n    <FileVersion>1.2.3</FileVersion>\n  </PropertyGroup>\n</Project>\n";

    #[test]
    fn update_version_rewrites_descriptor_and_exports_versions() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("Plugin.csproj");
        let env_file = dir.path().join("github_env");
        std::fs::write(&project, CSPROJ).unwrap();
        let workflow = WorkflowEnv::new(Some(env_file.clone()), None);

        let update = update_version(&project, dir.path(), &workflow).unwrap();

        assert_eq!(update.assembly_version.as_deref(), Some("1.2.4"));
        assert_eq!(update.file_version.as_deref(), Some("1.2.4"));
        assert_eq!(update.build_file, None);
        assert_eq!(
            std::fs::read_to_string(&project).unwrap(),
            CSPROJ.replace("1.2.3", "1.2.4")
        );
        assert_eq!(
            std::fs::read_to_string(&env_file).unwrap(),
            "NEW_ASSEMBLY_VERSION=1.2.4\nNEW_FILE_VERSION=1.2.4\n"
        );
    }

    #[test]
    fn update_version_follows_up_with_build_file() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("Plugin.csproj");
        let output_file = dir.path().join("github_output");
        std::fs::write(&project, CSPROJ).unwrap();
        std::fs::write(
            dir.path().join("build.yaml"),
            "name: Plugin\nversion: 1.2.3\n",
        )
        .unwrap();
        let workflow = WorkflowEnv::new(None, Some(output_file.clone()));

        let update = update_version(&project, dir.path(), &workflow).unwrap();

        let build_file = update.build_file.unwrap();
        assert_eq!(build_file.old_version, "1.2.3");
        assert_eq!(build_file.new_version, "1.2.4");

        let outputs = std::fs::read_to_string(&output_file).unwrap();
        assert!(outputs.contains("old-version=1.2.3\n"));
        assert!(outputs.contains("new-version=1.2.4\n"));
        assert!(outputs.contains("build-yaml-updated=true\n"));
    }

    #[test]
    fn update_version_fails_for_missing_project() {
        let dir = TempDir::new().unwrap();
        let result = update_version(
            &dir.path().join("missing.csproj"),
            dir.path(),
            &WorkflowEnv::default(),
        );

        assert!(matches!(result, Err(ProjectError::NotFound(_))));
    }

    #[test]
    fn update_version_leaves_descriptor_untouched_when_build_file_lacks_version() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("Plugin.csproj");
        let env_file = dir.path().join("github_env");
        std::fs::write(&project, CSPROJ).unwrap();
        std::fs::write(dir.path().join("build.yaml"), "name: Plugin\n").unwrap();
        let workflow = WorkflowEnv::new(Some(env_file.clone()), None);

        for _ in 0..2 {
            let result = update_version(&project, dir.path(), &workflow);
            assert!(matches!(result, Err(ProjectError::MissingVersionField(_))));
        }

        assert_eq!(std::fs::read_to_string(&project).unwrap(), CSPROJ);
        assert!(!env_file.exists());
    }
}
