use crate::error::Error;
use console::style;
use std::fs::File;
use std::path::Path;
use std::process::Command;
use zip::ZipArchive;

/// Given an existing archive and a destination directory, extract all
/// entries, overwriting conflicts.
pub trait Extract {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), Error>;
}

fn ensure_archive(archive: &Path) -> Result<(), Error> {
    if !archive.exists() {
        return Err(Error::ArchiveMissing {
            path: archive.to_path_buf(),
        });
    }
    Ok(())
}

/// Extraction via the platform's archive utility: `unzip` everywhere except
/// windows, where the powershell `Expand-Archive` cmdlet is used.
pub struct CommandExtractor;

impl CommandExtractor {
    fn command(archive: &Path, dest: &Path) -> Command {
        if cfg!(target_os = "windows") {
            let mut command = Command::new("powershell");
            command
                .arg("-NoProfile")
                .arg("-Command")
                .arg("Expand-Archive")
                .arg("-Path")
                .arg(archive)
                .arg("-DestinationPath")
                .arg(dest)
                .arg("-Force");
            command
        } else {
            let mut command = Command::new("unzip");
            command.arg("-o").arg(archive).arg("-d").arg(dest);
            command
        }
    }
}

impl Extract for CommandExtractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), Error> {
        ensure_archive(archive)?;
        let failed = |source: Box<dyn std::error::Error + Send + Sync>| {
            let err = Error::ExtractFailed {
                archive: archive.to_path_buf(),
                source,
            };
            eprintln!("{} {}", style("[ERROR]").red(), err);
            err
        };
        let mut command = Self::command(archive, dest);
        let status = command.status().map_err(|err| failed(err.into()))?;
        if !status.success() {
            return Err(failed(
                format!("`{:?}` exited with {:?}", command, status.code()).into(),
            ));
        }
        Ok(())
    }
}

/// In-process extraction via the zip crate. Avoids the subprocess dependency
/// when the host has no archive utility on the path.
pub struct ZipExtractor;

impl Extract for ZipExtractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), Error> {
        ensure_archive(archive)?;
        let failed = |source: Box<dyn std::error::Error + Send + Sync>| Error::ExtractFailed {
            archive: archive.to_path_buf(),
            source,
        };
        let file = File::open(archive).map_err(|err| failed(err.into()))?;
        let mut zip = ZipArchive::new(file).map_err(|err| failed(err.into()))?;
        zip.extract(dest).map_err(|err| failed(err.into()))?;
        Ok(())
    }
}
