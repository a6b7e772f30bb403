//! Persistence collaborators: CSV rows and cover images
//!
//! Nothing in here knows about scraping; these are the file-side collaborators
//! the runner hands records to.

mod csv;
mod images;

pub use csv::append_rows;
pub use images::{sanitize_filename, save_image, spawn_image_download};

use std::io;
use std::path::Path;

/// Creates a directory (and parents) if it does not exist
pub fn ensure_directory(path: &Path) -> io::Result<()> {
    if !path.as_os_str().is_empty() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
