//! Dataset download.
//!
//! The response body is streamed into `<file>.partial` and renamed into place
//! once complete, so an interrupted run never leaves a truncated dataset
//! behind under the final name.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

/// How a call to [`ensure_dataset`] was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was already present.
    Existing { bytes: u64 },
    /// The file was fetched.
    Downloaded { bytes: u64 },
}

impl DownloadOutcome {
    pub fn bytes(&self) -> u64 {
        match self {
            Self::Existing { bytes } | Self::Downloaded { bytes } => *bytes,
        }
    }
}

/// Download `url` to `path` unless `path` already exists.
#[instrument(skip_all, fields(url = %url, path = %path.display()))]
pub async fn ensure_dataset(url: &str, path: &Path, show_progress: bool) -> Result<DownloadOutcome> {
    if path.exists() {
        let bytes = fs::metadata(path).await?.len();
        info!(bytes = bytes, "File already exists, skipping download");
        return Ok(DownloadOutcome::Existing { bytes });
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(600))
        .build()
        .context("Failed to build HTTP client")?;

    info!("Downloading dataset");
    let bytes = download(&client, url, path, show_progress).await?;
    info!(bytes = bytes, "Download complete");

    Ok(DownloadOutcome::Downloaded { bytes })
}

async fn download(client: &Client, url: &str, path: &Path, show_progress: bool) -> Result<u64> {
    let response = client
        .get(url)
        .send()
        .await
        .context("HTTP request failed")?;

    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("Download of {} failed with status {}", url, status));
    }

    let total = response.content_length();
    let progress = progress_bar(total, show_progress)?;

    let temp_path = partial_path(path);
    let mut file = fs::File::create(&temp_path)
        .await
        .with_context(|| format!("Failed to create {}", temp_path.display()))?;

    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Failed to read response body")?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
        progress.set_position(written);
    }
    file.flush().await?;
    drop(file);
    progress.finish_and_clear();

    if let Some(expected) = total {
        if written != expected {
            fs::remove_file(&temp_path).await.ok();
            return Err(anyhow!(
                "Download size mismatch: expected {} bytes, got {}",
                expected,
                written
            ));
        }
    }

    fs::rename(&temp_path, path)
        .await
        .with_context(|| format!("Failed to move download to {}", path.display()))?;

    Ok(written)
}

fn progress_bar(total: Option<u64>, visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }

    let bar = match total {
        Some(len) => {
            let bar = ProgressBar::new(len);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} ({eta})")?
                    .progress_chars("##-"),
            );
            bar
        }
        None => {
            let bar = ProgressBar::new_spinner();
            bar.set_style(ProgressStyle::default_spinner().template("{spinner} {bytes} downloaded")?);
            bar
        }
    };
    Ok(bar)
}

/// `<path>.partial`
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".partial");
    PathBuf::from(name)
}
