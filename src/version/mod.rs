//! Version handling layer
//!
//! This module provides parsing and comparison of dotted versions, glob-style
//! version matching, and fetching of published versions from a package index.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│   Matcher   │────▶│ compat ver. │
//! │  (fetch)    │     │ (glob, last)│     │  "10.10.3"  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │
//!        ▼
//! ┌─────────────┐     ┌─────────────┐
//! │ Registries  │     │    Token    │
//! │   (NuGet)   │     │(parse, cmp) │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`token`]: `VersionToken`, strict dotted-integer versions
//! - [`matcher`]: single-wildcard version patterns
//! - [`registry`]: Registry trait for fetching versions from remote sources
//! - [`registries`]: Concrete registry implementations (NuGet)
//! - [`error`]: Error types for version and registry operations
//! - [`types`]: Common types like `PackageVersions`

pub mod error;
pub mod matcher;
pub mod registries;
pub mod registry;
pub mod token;
pub mod types;
