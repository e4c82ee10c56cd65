//! Manifest parsing
//!
//! The workspace manifest is a line-oriented membership list; per-package
//! manifests are JSON documents read with serde.

pub mod package;
pub mod workspace;

pub use package::{load_package_manifest, PackageManifest, PACKAGE_MANIFEST};
pub use workspace::{load_member_patterns, WORKSPACE_MANIFEST};
