use crate::error::Error;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use reqwest::blocking::Client;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub trait Download {
    fn download(&self, url: &str, dest: &Path) -> Result<(), Error>;
}

pub struct DownloadManager {
    client: Client,
}

impl DownloadManager {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for DownloadManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Download for DownloadManager {
    fn download(&self, url: &str, dest: &Path) -> Result<(), Error> {
        let failed = |source: Box<dyn std::error::Error + Send + Sync>| Error::DownloadFailed {
            url: url.to_string(),
            source,
        };
        let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stdout())
        .with_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {prefix:.bold} [{elapsed}] {wide_bar:.green} {bytes}/{total_bytes} {msg}")
                .map_err(|err| failed(err.into()))?
                .progress_chars("█▇▆▅▄▃▂▁  ")
        );
        if let Some(file_name) = dest.file_name().and_then(|name| name.to_str()) {
            pb.set_prefix(file_name.to_string());
        }
        pb.set_message("📥 downloading");

        let mut resp = self.client.get(url).send().map_err(|err| failed(err.into()))?;
        if !resp.status().is_success() {
            return Err(failed(
                format!("GET {} returned status code {}", url, resp.status()).into(),
            ));
        }
        let len = resp.content_length().unwrap_or_default();
        pb.set_length(len);

        // No partial-download cleanup: a failed transfer leaves whatever was
        // written at `dest`.
        let dest = BufWriter::new(File::create(dest).map_err(|err| failed(err.into()))?);
        std::io::copy(&mut resp, &mut pb.wrap_write(dest)).map_err(|err| failed(err.into()))?;
        pb.finish_with_message("📥 downloaded");

        Ok(())
    }
}
