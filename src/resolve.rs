use crate::manifest::{normalize_specifier, Manifest, ELECTRON};
use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

/// Resolves the version of a package the package manager actually installed.
/// Catalog specifiers carry no version of their own, so resolution has to ask
/// the workspace tooling. Implemented as a trait so the core stays testable
/// without a pnpm installation.
pub trait InstalledVersionResolver {
    fn installed_version(&self, package: &str) -> Result<Option<String>>;
}

/// Asks `pnpm list <package> --json` in the project root.
pub struct PnpmList {
    root: PathBuf,
}

impl PnpmList {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PnpmProject {
    #[serde(default)]
    dependencies: BTreeMap<String, PnpmPackage>,
    #[serde(default)]
    dev_dependencies: BTreeMap<String, PnpmPackage>,
}

#[derive(Deserialize)]
struct PnpmPackage {
    version: String,
}

impl InstalledVersionResolver for PnpmList {
    fn installed_version(&self, package: &str) -> Result<Option<String>> {
        let output = Command::new("pnpm")
            .arg("list")
            .arg(package)
            .arg("--json")
            .current_dir(&self.root)
            .output()?;
        anyhow::ensure!(
            output.status.success(),
            "pnpm list exited with {:?}",
            output.status.code()
        );
        let projects: Vec<PnpmProject> = serde_json::from_slice(&output.stdout)?;
        for project in projects {
            if let Some(pkg) = project
                .dev_dependencies
                .get(package)
                .or_else(|| project.dependencies.get(package))
            {
                return Ok(Some(pkg.version.clone()));
            }
        }
        Ok(None)
    }
}

/// Turns the manifest's electron specifier into a bare version string, or an
/// empty string when nothing is declared. Catalog failures are recovered here
/// with a warning; an empty result only becomes an error once the archive
/// name is built.
pub fn resolve_version(manifest: &Manifest, resolver: &dyn InstalledVersionResolver) -> String {
    let Some(spec) = manifest.electron_spec() else {
        return String::new();
    };
    if let Some(rest) = spec.strip_prefix("catalog:") {
        match resolver.installed_version(ELECTRON) {
            Ok(Some(version)) => return version,
            Ok(None) => {}
            Err(err) => log::warn!("failed to resolve catalog version via pnpm: {}", err),
        }
        return rest.to_string();
    }
    normalize_specifier(spec).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<String>);

    impl InstalledVersionResolver for Fixed {
        fn installed_version(&self, _package: &str) -> Result<Option<String>> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl InstalledVersionResolver for Failing {
        fn installed_version(&self, _package: &str) -> Result<Option<String>> {
            anyhow::bail!("pnpm not found")
        }
    }

    fn manifest(spec: &str) -> Manifest {
        serde_json::from_str(&format!(r#"{{"dependencies":{{"electron":"{}"}}}}"#, spec)).unwrap()
    }

    #[test]
    fn caret_specifier_resolves_to_bare_version() {
        assert_eq!(resolve_version(&manifest("^12.0.0"), &Failing), "12.0.0");
    }

    #[test]
    fn catalog_specifier_uses_installed_version() {
        let resolver = Fixed(Some("31.2.0".into()));
        assert_eq!(resolve_version(&manifest("catalog:"), &resolver), "31.2.0");
    }

    #[test]
    fn catalog_failure_falls_back_to_text_after_colon() {
        assert_eq!(resolve_version(&manifest("catalog:29.1.0"), &Failing), "29.1.0");
        assert_eq!(resolve_version(&manifest("catalog:"), &Failing), "");
    }

    #[test]
    fn catalog_without_listing_entry_falls_back() {
        let resolver = Fixed(None);
        assert_eq!(resolve_version(&manifest("catalog:default"), &resolver), "default");
    }

    #[test]
    fn missing_declaration_resolves_empty() {
        let empty = Manifest::default();
        assert_eq!(resolve_version(&empty, &Failing), "");
    }

    #[test]
    fn pnpm_listing_parses() {
        let json = r#"[{"name":"app","devDependencies":{"electron":{"version":"30.0.0","from":"electron"}}}]"#;
        let projects: Vec<PnpmProject> = serde_json::from_str(json).unwrap();
        assert_eq!(projects[0].dev_dependencies["electron"].version, "30.0.0");
    }
}
