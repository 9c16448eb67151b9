use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const ELECTRON: &str = "electron";

/// The parts of a `package.json` the fixer reads. Besides the two dependency
/// maps, a project may carry override fields for the mirror origin, the
/// download directory, the symbol-archive flag and the platform-path table.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub symbols: bool,
    pub origin: Option<String>,
    pub entry: Option<PathBuf>,
    #[serde(default)]
    pub path_txt: BTreeMap<String, String>,
}

impl Manifest {
    pub fn parse_from_json(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// The declared electron specifier, `dependencies` first.
    pub fn electron_spec(&self) -> Option<&str> {
        self.dependencies
            .get(ELECTRON)
            .or_else(|| self.dev_dependencies.get(ELECTRON))
            .map(|spec| spec.as_str())
    }

    pub fn declares_electron(&self) -> bool {
        self.electron_spec().is_some()
    }
}

/// Strips a leading `^` or `~` range operator from a specifier.
pub fn normalize_specifier(spec: &str) -> &str {
    spec.strip_prefix(['^', '~']).unwrap_or(spec)
}
