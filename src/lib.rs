use crate::config::PathTxt;
use crate::manifest::Manifest;
use crate::resolve::InstalledVersionResolver;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub mod command;
pub mod config;
pub mod download;
pub mod error;
pub mod extract;
pub mod manifest;
pub mod resolve;
mod task;

pub use error::Error;

pub const DEFAULT_ORIGIN: &str = "https://npmmirror.com/mirrors/electron";

/// Operating-system identifiers as electron names them in archive file names.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Platform {
    Darwin,
    Linux,
    Win32,
}

impl Platform {
    pub fn host() -> Result<Self> {
        Ok(if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "macos") {
            Platform::Darwin
        } else if cfg!(target_os = "windows") {
            Platform::Win32
        } else {
            anyhow::bail!("unsupported host");
        })
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Darwin => write!(f, "darwin"),
            Self::Linux => write!(f, "linux"),
            Self::Win32 => write!(f, "win32"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(platform: &str) -> Result<Self> {
        Ok(match platform {
            "darwin" => Self::Darwin,
            "linux" => Self::Linux,
            "win32" => Self::Win32,
            _ => anyhow::bail!("unsupported platform {}", platform),
        })
    }
}

/// Architectures electron publishes archives for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arch {
    Arm64,
    Armv7l,
    Ia32,
    X64,
}

impl Arch {
    pub fn host() -> Result<Self> {
        if cfg!(target_arch = "x86_64") {
            Ok(Arch::X64)
        } else if cfg!(target_arch = "aarch64") {
            Ok(Arch::Arm64)
        } else {
            anyhow::bail!("unsupported host");
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Arm64 => write!(f, "arm64"),
            Self::Armv7l => write!(f, "armv7l"),
            Self::Ia32 => write!(f, "ia32"),
            Self::X64 => write!(f, "x64"),
        }
    }
}

impl std::str::FromStr for Arch {
    type Err = anyhow::Error;

    fn from_str(arch: &str) -> Result<Self> {
        Ok(match arch {
            "arm64" => Self::Arm64,
            "armv7l" => Self::Armv7l,
            "ia32" => Self::Ia32,
            "x64" => Self::X64,
            _ => anyhow::bail!("unsupported arch {}", arch),
        })
    }
}

/// Everything a fix run needs, resolved up front: the manifest, the target
/// platform/arch, the mirror origin, the download directory and the
/// platform-path table, with manifest overrides already applied.
pub struct FixEnv {
    manifest: Manifest,
    root_dir: Option<PathBuf>,
    platform: Platform,
    arch: Arch,
    version: String,
    origin: String,
    download_dir: PathBuf,
    path_txt: PathTxt,
    symbols: bool,
    archive: Option<String>,
}

impl FixEnv {
    pub fn new(
        manifest: Manifest,
        root_dir: Option<PathBuf>,
        resolver: &dyn InstalledVersionResolver,
    ) -> Result<Self> {
        Self::with_target(manifest, root_dir, Platform::host()?, Arch::host()?, resolver)
    }

    pub fn with_target(
        manifest: Manifest,
        root_dir: Option<PathBuf>,
        platform: Platform,
        arch: Arch,
        resolver: &dyn InstalledVersionResolver,
    ) -> Result<Self> {
        let version = resolve::resolve_version(&manifest, resolver);
        let origin = manifest
            .origin
            .as_deref()
            .unwrap_or(DEFAULT_ORIGIN)
            .trim_end_matches('/')
            .to_string();
        let download_dir = manifest.entry.clone().unwrap_or_else(std::env::temp_dir);
        let path_txt = PathTxt::with_overrides(&manifest.path_txt);
        let symbols = manifest.symbols;
        Ok(Self {
            manifest,
            root_dir,
            platform,
            arch,
            version,
            origin,
            download_dir,
            path_txt,
            symbols,
            archive: None,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn arch(&self) -> Arch {
        self.arch
    }

    pub fn path_txt(&self) -> &PathTxt {
        &self.path_txt
    }

    /// Bypasses name construction entirely for callers that already know the
    /// archive they want.
    pub fn set_archive_name(&mut self, name: impl Into<String>) {
        self.archive = Some(name.into());
    }

    /// `electron-v<version>-<platform>-<arch>[-symbols]`, without extension.
    pub fn archive_name(&self) -> Result<String, Error> {
        if let Some(archive) = &self.archive {
            return Ok(archive.clone());
        }
        if self.version.is_empty() {
            return Err(Error::VersionUnresolved);
        }
        let mut name = format!("electron-v{}-{}-{}", self.version, self.platform, self.arch);
        if self.symbols {
            name.push_str("-symbols");
        }
        Ok(name)
    }

    pub fn download_url(&self) -> Result<String, Error> {
        Ok(format!(
            "{}/{}/{}.zip",
            self.origin,
            self.version,
            self.archive_name()?
        ))
    }

    /// Where the archive is downloaded to and extracted from. Deliberately a
    /// single path, also when `entry` overrides the download directory.
    pub fn archive_path(&self) -> Result<PathBuf, Error> {
        Ok(self
            .download_dir
            .join(format!("{}.zip", self.archive_name()?)))
    }

    pub fn electron_dir(&self) -> PathBuf {
        let out = Path::new("node_modules").join("electron");
        match &self.root_dir {
            Some(root) => root.join(out),
            None => out,
        }
    }

    pub fn electron_package_json(&self) -> PathBuf {
        self.electron_dir().join("package.json")
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.electron_dir().join("dist")
    }

    pub fn path_txt_file(&self) -> PathBuf {
        self.electron_dir().join("path.txt")
    }

    /// The electron package is targetable when it is declared in the manifest
    /// and, if a root directory is known, its package descriptor exists on
    /// disk.
    pub fn is_install_electron(&self) -> bool {
        if self.root_dir.is_some() && !self.electron_package_json().exists() {
            return false;
        }
        self.manifest.declares_electron()
    }
}
