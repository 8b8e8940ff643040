use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path).with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file, creating the parent directory first
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content).with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}

/// Conventional file names inside the content directory
///
/// Per-sentence files are prefixed with the sentence index, e.g.
/// `3-original.png`, `3-converted.png`, `3-sentence.png`.
#[derive(Debug, Clone)]
pub struct ContentPaths {
    root: PathBuf,
}

impl ContentPaths {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Saved content document
    pub fn state_file(&self) -> PathBuf {
        self.root.join("content.json")
    }

    /// Script read by the renderer template
    pub fn script_file(&self) -> PathBuf {
        self.root.join("after-effects-script.js")
    }

    /// Downloaded image for a sentence
    pub fn original_image(&self, index: usize) -> PathBuf {
        self.root.join(format!("{}-original.png", index))
    }

    /// Full-frame composite for a sentence
    pub fn converted_image(&self, index: usize) -> PathBuf {
        self.root.join(format!("{}-converted.png", index))
    }

    /// Caption image for a sentence
    pub fn sentence_image(&self, index: usize) -> PathBuf {
        self.root.join(format!("{}-sentence.png", index))
    }

    pub fn thumbnail(&self) -> PathBuf {
        self.root.join("youtube-thumbnail.jpg")
    }
}
