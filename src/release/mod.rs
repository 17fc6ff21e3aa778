//! Manifest-side release tasks
//!
//! # Modules
//!
//! - [`artifact`]: MD5 checksums of local and downloaded release zips
//! - [`dispatch`]: repository dispatch announcing a release to the manifest repo
//! - [`workflow`]: the `update-manifest` and `apply-release` tasks
//! - [`error`]: Error type for release operations

pub mod artifact;
pub mod dispatch;
pub mod error;
pub mod workflow;
