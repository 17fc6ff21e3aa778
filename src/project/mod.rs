//! Project-side release chores
//!
//! # Modules
//!
//! - [`descriptor`]: bumps `<AssemblyVersion>` / `<FileVersion>` in a `.csproj`
//! - [`build_file`]: finds and updates the JPRM build file (`build.yaml`)
//! - [`workflow`]: the `update-version` task tying both together
//! - [`error`]: Error type for project operations

pub mod build_file;
pub mod descriptor;
pub mod error;
pub mod workflow;
