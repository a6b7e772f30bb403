//! Cover image persistence and detached downloads

use crate::fetch::fetch_bytes;
use reqwest::Client;
use std::io;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use url::Url;

/// Longest filename stem we will produce; long titles get cut here
const MAX_FILENAME_LEN: usize = 200;

/// Makes a book title safe to use as a filename
///
/// Characters that are invalid on common filesystems (`< > : " / \ | ? * '`)
/// become `_`, and the result is length-capped.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .take(MAX_FILENAME_LEN)
        .map(|ch| match ch {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' | '\'' => '_',
            _ => ch,
        })
        .collect()
}

/// Writes image bytes to disk, creating parent directories as needed
pub fn save_image(bytes: &[u8], path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        super::ensure_directory(parent)?;
    }
    std::fs::write(path, bytes)
}

/// Spawns a detached task that downloads one image and writes it to `path`
///
/// Image downloads are a side channel: a failure is logged at warn level and
/// never affects the record that referenced the image. The caller joins the
/// returned handle before process exit.
pub fn spawn_image_download(client: Client, image_url: Url, path: PathBuf) -> JoinHandle<()> {
    tokio::spawn(async move {
        match fetch_bytes(&client, &image_url).await {
            Ok(bytes) => {
                if let Err(e) = save_image(&bytes, &path) {
                    tracing::warn!("Failed to write image {}: {}", path.display(), e);
                } else {
                    tracing::debug!("Saved image {}", path.display());
                }
            }
            Err(e) => {
                tracing::warn!("Failed to download image {}: {}", image_url, e);
            }
        }
    })
}
