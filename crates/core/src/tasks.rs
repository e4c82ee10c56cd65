//! Task names and console label colors.

use std::fmt;

use colored::Color;

/// A named operation a package may or may not support via a declared
/// script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Build,
    Dev,
    Start,
}

impl TaskKind {
    /// The script name looked up in package manifests.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Build => "build",
            TaskKind::Dev => "dev",
            TaskKind::Start => "start",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Get a consistent label color for a package name
pub fn get_package_color(package_name: &str) -> Color {
    // Simple byte hash keeps colors stable across runs
    let hash = package_name
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));

    let colors = [
        Color::Cyan,
        Color::Magenta,
        Color::Blue,
        Color::BrightCyan,
        Color::BrightMagenta,
        Color::BrightBlue,
    ];

    colors[(hash % colors.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_names_match_script_keys() {
        assert_eq!(TaskKind::Build.as_str(), "build");
        assert_eq!(TaskKind::Dev.as_str(), "dev");
        assert_eq!(TaskKind::Start.as_str(), "start");
        assert_eq!(TaskKind::Start.to_string(), "start");
    }

    #[test]
    fn package_colors_are_stable() {
        assert_eq!(get_package_color("ui"), get_package_color("ui"));
    }
}
