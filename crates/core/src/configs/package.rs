//! Package manifest parsing.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::types::{MonoflowError, MonoflowResult};

/// File a member directory must carry to count as a package.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Parsed `package.json` contents, limited to the fields the orchestrator
/// uses. Dependency values (version ranges) are kept only because the map
/// shape requires them; ordering decisions use the keys.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
}

pub fn parse_package_manifest(json_str: &str) -> serde_json::Result<PackageManifest> {
    serde_json::from_str(json_str)
}

/// Load the manifest inside `package_dir`.
///
/// Returns `Ok(None)` when the directory has no manifest at all; malformed
/// JSON is fatal and names the offending path.
pub fn load_package_manifest(package_dir: &Path) -> MonoflowResult<Option<PackageManifest>> {
    let manifest_path = package_dir.join(PACKAGE_MANIFEST);
    if !manifest_path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&manifest_path)?;
    let manifest =
        parse_package_manifest(&contents).map_err(|source| MonoflowError::ManifestParse {
            path: manifest_path,
            source,
        })?;
    Ok(Some(manifest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_manifest() {
        let json = r#"{
            "name": "ui",
            "version": "1.0.0",
            "dependencies": { "shared": "workspace:*", "react": "^18.0.0" },
            "scripts": { "build": "tsc", "dev": "tsc --watch" }
        }"#;
        let manifest = parse_package_manifest(json).unwrap();
        assert_eq!(manifest.name, "ui");
        assert_eq!(manifest.dependencies.len(), 2);
        assert!(manifest.scripts.contains_key("build"));
    }

    #[test]
    fn dependencies_and_scripts_default_to_empty() {
        let manifest = parse_package_manifest(r#"{ "name": "bare" }"#).unwrap();
        assert!(manifest.dependencies.is_empty());
        assert!(manifest.scripts.is_empty());
    }

    #[test]
    fn missing_name_is_an_error() {
        assert!(parse_package_manifest(r#"{ "scripts": {} }"#).is_err());
    }

    #[test]
    fn load_reports_the_offending_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join(PACKAGE_MANIFEST), "{ not json").unwrap();

        let err = load_package_manifest(temp_dir.path()).unwrap_err();
        match err {
            MonoflowError::ManifestParse { path, .. } => {
                assert!(path.ends_with(PACKAGE_MANIFEST));
            }
            other => panic!("expected ManifestParse, got {other:?}"),
        }
    }

    #[test]
    fn load_skips_directories_without_a_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(load_package_manifest(temp_dir.path()).unwrap().is_none());
    }
}
