//! Process path categorization
//!
//! Collapses Windows process paths into a handful of buckets so the path can be
//! used as a categorical feature.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathCategory {
    Temporary,
    SystemFiles,
    ProgramFiles,
    UserFiles,
    NetworkLocations,
    Other,
}

impl PathCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathCategory::Temporary => "Temporary",
            PathCategory::SystemFiles => "System Files",
            PathCategory::ProgramFiles => "Program Files",
            PathCategory::UserFiles => "User Files",
            PathCategory::NetworkLocations => "Network Locations",
            PathCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for PathCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rules are checked in order; temp folders win over their parent location
/// (C:\Users\x\AppData\Local\Temp is Temporary, not User Files).
pub fn categorize_path(path: &str) -> PathCategory {
    let p = path.to_lowercase();

    if p.contains("\\temp\\") || p.contains("\\tmp\\") || p.contains("\\appdata\\local\\temp\\") {
        PathCategory::Temporary
    } else if p.starts_with("c:\\windows\\system32\\") || p.starts_with("c:\\windows\\syswow64\\") {
        PathCategory::SystemFiles
    } else if p.starts_with("c:\\program files\\") || p.starts_with("c:\\program files (x86)\\") {
        PathCategory::ProgramFiles
    } else if p.starts_with("c:\\users\\") {
        PathCategory::UserFiles
    } else if p.starts_with("\\\\") {
        PathCategory::NetworkLocations
    } else {
        PathCategory::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(categorize_path(r"C:\Windows\System32\cmd.exe"), PathCategory::SystemFiles);
        assert_eq!(categorize_path(r"c:\windows\syswow64\rundll32.exe"), PathCategory::SystemFiles);
        assert_eq!(categorize_path(r"C:\Program Files (x86)\App\app.exe"), PathCategory::ProgramFiles);
        assert_eq!(categorize_path(r"C:\Users\bob\Desktop\x.exe"), PathCategory::UserFiles);
        assert_eq!(categorize_path(r"\\fileserver\share\tool.exe"), PathCategory::NetworkLocations);
        assert_eq!(categorize_path(r"D:\tools\x.exe"), PathCategory::Other);
        assert_eq!(categorize_path(""), PathCategory::Other);
    }

    #[test]
    fn test_temp_wins_over_user_files() {
        assert_eq!(
            categorize_path(r"C:\Users\bob\AppData\Local\Temp\dropper.exe"),
            PathCategory::Temporary
        );
        assert_eq!(categorize_path(r"C:\Windows\Temp\a.exe"), PathCategory::Temporary);
    }

    #[test]
    fn test_display_matches_export_labels() {
        assert_eq!(PathCategory::NetworkLocations.to_string(), "Network Locations");
    }
}
