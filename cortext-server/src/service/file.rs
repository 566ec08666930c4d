//! File Service
//!
//! Reads and writes the two fixed files the API exposes: the input text
//! and the generated HTML artifact. No locking: a run may observe a
//! partially written input file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::File;

/// Service error type
#[derive(Debug)]
pub enum FileError {
    NotFound(PathBuf),
    Io(std::io::Error),
}

impl From<std::io::Error> for FileError {
    fn from(err: std::io::Error) -> Self {
        FileError::Io(err)
    }
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::NotFound(path) => write!(f, "{} not found", path.display()),
            FileError::Io(err) => write!(f, "{}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, FileError>;

/// Replaces the contents of `path` with `text`
///
/// The parent directory must already exist.
pub async fn write_text(path: &Path, text: &str) -> Result<()> {
    tokio::fs::write(path, text.as_bytes()).await?;

    tracing::info!("Wrote {} bytes to {}", text.len(), path.display());

    Ok(())
}

/// An artifact opened for streaming
#[derive(Debug)]
pub struct Artifact {
    pub file: File,
    pub len: u64,
}

/// Opens the artifact at `path` without reading it
///
/// Anything that is not a regular file is rejected here, before a response
/// starts streaming.
pub async fn open_artifact(path: &Path) -> Result<Artifact> {
    let file = File::open(path).await.map_err(|err| not_found_or_io(path, err))?;
    let metadata = file.metadata().await?;

    if !metadata.is_file() {
        return Err(FileError::Io(std::io::Error::new(
            ErrorKind::InvalidInput,
            format!("{} is not a regular file", path.display()),
        )));
    }

    Ok(Artifact {
        file,
        len: metadata.len(),
    })
}

/// Reads the whole artifact at `path`
pub async fn read_artifact(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|err| not_found_or_io(path, err))
}

fn not_found_or_io(path: &Path, err: std::io::Error) -> FileError {
    if err.kind() == ErrorKind::NotFound {
        FileError::NotFound(path.to_path_buf())
    } else {
        FileError::Io(err)
    }
}
