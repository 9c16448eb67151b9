use crate::error::Error;
use crate::Platform;
use std::collections::BTreeMap;
use std::path::Path;

/// The platform to executable-path table written to `path.txt`. The electron
/// launcher reads this file to locate the binary inside the extracted
/// distribution.
#[derive(Clone, Debug)]
pub struct PathTxt {
    entries: BTreeMap<String, String>,
}

impl Default for PathTxt {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            Platform::Darwin.to_string(),
            "Electron.app/Contents/MacOS/Electron".to_string(),
        );
        entries.insert(Platform::Win32.to_string(), "electron.exe".to_string());
        Self { entries }
    }
}

impl PathTxt {
    /// Defaults extended with the manifest's `pathTxt` entries.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut table = Self::default();
        for (platform, path) in overrides {
            table.entries.insert(platform.clone(), path.clone());
        }
        table
    }

    /// The executable path for a platform, empty when unmapped.
    pub fn value_for(&self, platform: Platform) -> &str {
        self.entries
            .get(&platform.to_string())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Writes the platform's entry as the entire file content.
    pub fn write(&self, output: &Path, platform: Platform) -> Result<(), Error> {
        std::fs::write(output, self.value_for(platform)).map_err(|source| {
            Error::ConfigWriteFailed {
                path: output.to_path_buf(),
                source,
            }
        })
    }
}
