//! Tier classification for execution staging.
//!
//! Tiering is derived from the conventional directory layout and is a
//! scheduling hint only. It decides which parallel batch a package lands
//! in; it never overrides topological order.

use std::path::Path;

use crate::workspace::Package;

/// Path component that marks a package as a shared library.
const LIBRARY_ROOT: &str = "packages";
/// Path component that marks a package as a runnable application.
const APPLICATION_ROOT: &str = "apps";

/// Scheduling tier a package belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Library,
    Application,
}

/// Classify a package by its directory location.
///
/// Packages outside both conventional roots have no tier; they participate
/// only in strictly ordered execution modes.
pub fn classify(package: &Package) -> Option<Tier> {
    classify_path(&package.directory)
}

fn classify_path(path: &Path) -> Option<Tier> {
    for component in path.components() {
        let component = component.as_os_str();
        if component == LIBRARY_ROOT {
            return Some(Tier::Library);
        }
        if component == APPLICATION_ROOT {
            return Some(Tier::Application);
        }
    }
    None
}
