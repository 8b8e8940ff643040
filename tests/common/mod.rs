/*!
 * Common test utilities for the wikireel test suite
 */

use anyhow::Result;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use async_trait::async_trait;
use wikireel::app_config::Config;
use wikireel::content::{Content, Prefix, Sentence};
use wikireel::errors::MediaError;
use wikireel::video::{CaptionLayout, ImageTool, Renderer};

/// Article text in the shape the Wikipedia parser returns
pub const SAMPLE_ARTICLE: &str = "Rio de Janeiro

Rio de Janeiro (Portuguese for River of January) is a city. It was founded in 1565.

== History ==

It is known for its beaches. Dr. Silva lived there. The Cristo Redentor statue (built 1931) overlooks the bay. The city hosted the Olympics.
";

/// Route library logs through the test harness; `RUST_LOG=debug` shows them
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Writes both credential files and returns a config pointing at `dir`
pub fn create_test_config(dir: &Path) -> Result<Config> {
    let algorithmia = create_test_file(dir, "credentials/algorithmia.json", r#"{"apiKey": "simple-key"}"#)?;
    let watson = create_test_file(
        dir,
        "credentials/watson-nlu.json",
        r#"{"apikey": "watson-key", "url": "https://example.test/nlu"}"#,
    )?;

    let mut config = Config::default();
    config.content_dir = dir.join("content");
    config.lang = "en".to_string();
    config.credentials.algorithmia_path = algorithmia;
    config.credentials.watson_path = watson;
    Ok(config)
}

/// A document as the text stage would leave it
pub fn sample_content(sentences: usize) -> Content {
    let mut content = Content::new("Rio de Janeiro", Prefix::WhatIs, "en", 7);
    content.source_content_original = "Rio de Janeiro is a city.".to_string();
    content.source_content_sanitized = "Rio de Janeiro is a city.".to_string();
    content.sentences = (0..sentences)
        .map(|i| {
            let mut sentence = Sentence::new(format!("Sentence number {}.", i));
            sentence.keywords = vec![format!("keyword {}", i)];
            sentence
        })
        .collect();
    content
}

/// Image tool and renderer double that records every call in order
#[derive(Default)]
pub struct RecordingMedia {
    events: Mutex<Vec<String>>,
}

impl RecordingMedia {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().push(event);
    }
}

#[async_trait]
impl ImageTool for RecordingMedia {
    async fn convert_image(&self, index: usize) -> Result<(), MediaError> {
        self.push(format!("convert {}", index));
        Ok(())
    }

    async fn create_sentence_image(&self, index: usize, text: &str, layout: CaptionLayout) -> Result<(), MediaError> {
        self.push(format!("caption {} {} {} {}", index, layout.size_arg(), layout.gravity, text));
        Ok(())
    }

    async fn create_thumbnail(&self) -> Result<(), MediaError> {
        self.push("thumbnail".to_string());
        Ok(())
    }
}

#[async_trait]
impl Renderer for RecordingMedia {
    async fn render(&self) -> Result<(), MediaError> {
        self.push("render".to_string());
        Ok(())
    }
}
