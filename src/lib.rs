//! Release automation for Jellyfin plugins
//!
//! - [`project`]: version bumps of the project descriptor and JPRM build file
//! - [`release`]: announcing releases and applying them to the manifest feed
//! - [`manifest`]: the manifest feed itself
//! - [`docs`]: keeping the documented Jellyfin requirement current
//! - [`version`]: version tokens, patterns and the NuGet index

pub mod actions;
pub mod config;
pub mod docs;
pub mod manifest;
pub mod project;
pub mod release;
pub mod version;
