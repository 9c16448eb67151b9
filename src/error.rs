use std::path::PathBuf;
use thiserror::Error;

/// Everything that can terminate a fix run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to resolve an electron version from the manifest")]
    VersionUnresolved,
    #[error("archive does not exist: {}", .path.display())]
    ArchiveMissing { path: PathBuf },
    #[error("failed to download {url}")]
    DownloadFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to extract {}", .archive.display())]
    ExtractFailed {
        archive: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to write {}", .path.display())]
    ConfigWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
