use crate::download::Download;
use crate::error::Error;
use crate::extract::Extract;
use crate::task::TaskRunner;
use crate::FixEnv;
use anyhow::Result;
use console::style;

/// Patches the installed electron package: downloads the matching archive,
/// extracts it into `node_modules/electron/dist` and writes `path.txt`.
pub fn start(env: &FixEnv, downloader: &dyn Download, extractor: &(dyn Extract + Sync)) -> Result<()> {
    let archive_name = env.archive_name()?;
    println!(
        "{}",
        style(format!("Electron version: {}", env.version())).bold()
    );

    let mut runner = TaskRunner::new(2);
    runner.start_task(format!("Download {}.zip", archive_name));

    if !env.is_install_electron() {
        runner.fail_task("You didn't install electron!");
        println!(
            "{}",
            style("Try it `yarn add electron` or `npm install electron -D`.")
                .yellow()
                .bold()
        );
        return Ok(());
    }

    let url = env.download_url()?;
    let archive = env.archive_path()?;
    downloader.download(&url, &archive)?;
    runner.end_task();

    runner.start_task("Extract distribution and write path.txt");
    let dist = env.dist_dir();
    let config = env.path_txt_file();
    // The two final steps have no ordering dependency on each other; both
    // must finish before the run counts as successful.
    std::thread::scope(|scope| -> Result<(), Error> {
        let unzip = scope.spawn(|| extractor.extract(&archive, &dist));
        let wrote = env.path_txt().write(&config, env.platform());
        match unzip.join() {
            Ok(extracted) => extracted?,
            Err(panic) => std::panic::resume_unwind(panic),
        }
        wrote
    })?;
    runner.end_task();

    println!("{}", style("Success!").green().bold());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ZipExtractor;
    use crate::manifest::Manifest;
    use crate::resolve::InstalledVersionResolver;
    use crate::{Arch, Platform};
    use std::collections::BTreeMap;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    struct NoListing;

    impl InstalledVersionResolver for NoListing {
        fn installed_version(&self, _package: &str) -> Result<Option<String>> {
            Ok(None)
        }
    }

    /// Stands in for the mirror: writes a known-good archive to `dest`.
    struct FixtureDownload;

    impl Download for FixtureDownload {
        fn download(&self, _url: &str, dest: &Path) -> Result<(), Error> {
            let mut zip = ZipWriter::new(File::create(dest).unwrap());
            zip.start_file("electron", FileOptions::default()).unwrap();
            zip.write_all(b"binary").unwrap();
            zip.finish().unwrap();
            Ok(())
        }
    }

    struct RefuseDownload;

    impl Download for RefuseDownload {
        fn download(&self, url: &str, _dest: &Path) -> Result<(), Error> {
            panic!("unexpected download of {}", url);
        }
    }

    fn env_for(root: &Path, entry: &Path, version: &str) -> FixEnv {
        let manifest = Manifest {
            dependencies: BTreeMap::from([("electron".to_string(), version.to_string())]),
            entry: Some(entry.to_path_buf()),
            ..Manifest::default()
        };
        FixEnv::with_target(
            manifest,
            Some(root.to_path_buf()),
            Platform::Darwin,
            Arch::X64,
            &NoListing,
        )
        .unwrap()
    }

    #[test]
    fn start_populates_dist_and_path_txt() {
        let dir = tempfile::tempdir().unwrap();
        let electron = dir.path().join("node_modules").join("electron");
        std::fs::create_dir_all(&electron).unwrap();
        std::fs::write(electron.join("package.json"), "{}").unwrap();

        let env = env_for(dir.path(), dir.path(), "30.0.0");
        start(&env, &FixtureDownload, &ZipExtractor).unwrap();

        assert_eq!(
            std::fs::read_to_string(electron.join("dist").join("electron")).unwrap(),
            "binary"
        );
        assert_eq!(
            std::fs::read_to_string(electron.join("path.txt")).unwrap(),
            "Electron.app/Contents/MacOS/Electron"
        );
    }

    #[test]
    fn start_stops_cleanly_when_electron_not_installed() {
        let dir = tempfile::tempdir().unwrap();
        // No package descriptor under node_modules/electron.
        let env = env_for(dir.path(), dir.path(), "30.0.0");
        start(&env, &RefuseDownload, &ZipExtractor).unwrap();
        assert!(!dir.path().join("node_modules").join("electron").join("dist").exists());
    }

    #[test]
    fn start_fails_when_version_unresolved() {
        let manifest = Manifest {
            dependencies: BTreeMap::from([("electron".to_string(), "catalog:".to_string())]),
            ..Manifest::default()
        };
        let env =
            FixEnv::with_target(manifest, None, Platform::Darwin, Arch::X64, &NoListing).unwrap();
        let err = start(&env, &RefuseDownload, &ZipExtractor).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::VersionUnresolved)
        ));
    }
}
