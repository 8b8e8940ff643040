use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::sync::Arc;

use crate::app_config::{Config, Credentials};
use crate::content::{Content, Prefix};
use crate::file_utils::ContentPaths;
use crate::language_utils;
use crate::prompt::Prompt;
use crate::providers::RetryPolicy;
use crate::providers::algorithmia::Algorithmia;
use crate::providers::watson::WatsonNlu;
use crate::state::{ContentStore, FileStore};
use crate::text::TextRobot;
use crate::video::{AfterEffects, ImageMagick, VideoRobot};

// @module: Application controller wiring the pipeline stages together

/// Answers given up front, usually from command line flags
///
/// Missing values are asked interactively.
#[derive(Debug, Clone, Default)]
pub struct ContentRequest {
    pub search_term: Option<String>,
    pub prefix: Option<Prefix>,
    pub lang: Option<String>,
    pub maximum_sentences: Option<usize>,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a controller after checking the configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Store backed by the configured content directory
    pub fn store(&self) -> FileStore {
        FileStore::new(ContentPaths::new(&self.config.content_dir))
    }

    /// Assemble a new document, asking for whatever the request leaves out
    ///
    /// Returns `None` when the user cancels the prefix menu.
    pub fn start_content(&self, request: ContentRequest, prompt: &mut dyn Prompt) -> Result<Option<Content>> {
        if request.maximum_sentences == Some(0) {
            bail!("Maximum sentences must be greater than 0");
        }

        let search_term = match request.search_term.filter(|t| !t.trim().is_empty()) {
            Some(term) => term.trim().to_string(),
            None => prompt.ask_search_term()?,
        };

        let prefix = match request.prefix {
            Some(prefix) => prefix,
            None => match prompt.ask_prefix()? {
                Some(prefix) => prefix,
                None => {
                    info!("Cancelled, nothing to do");
                    return Ok(None);
                }
            },
        };

        let lang = request.lang.unwrap_or_else(|| self.config.lang.clone());
        let lang = language_utils::normalize_to_part1(&lang)?;
        let maximum_sentences = request.maximum_sentences.unwrap_or(self.config.maximum_sentences);

        Ok(Some(Content::new(search_term, prefix, lang, maximum_sentences)))
    }

    /// Text robot talking to the real services
    pub fn text_robot(&self) -> Result<TextRobot> {
        let credentials = Credentials::load(&self.config.credentials)?;
        let text = &self.config.text;

        let articles = Algorithmia::new(
            credentials.algorithmia_api_key,
            &text.algorithmia_endpoint,
            &text.wikipedia_algorithm,
            text.fetch_timeout_secs,
            text.request_timeout_secs,
        );
        let keywords = WatsonNlu::new(
            credentials.watson_api_key,
            credentials.watson_url,
            &text.watson_version,
            text.request_timeout_secs,
        );

        Ok(TextRobot::new(Arc::new(articles), Arc::new(keywords))
            .with_retry(RetryPolicy::new(text.retry_count, text.retry_backoff_ms))
            .with_keyword_concurrency(text.keyword_concurrency)
            .with_abbreviations(text.extra_abbreviations.clone())
            .with_progress(Self::progress_bar("sentences")))
    }

    /// Video robot using ImageMagick and After Effects
    pub fn video_robot(&self) -> VideoRobot {
        let paths = ContentPaths::new(&self.config.content_dir);
        let images = ImageMagick::from_config(&self.config.video, paths.clone());
        let renderer = AfterEffects::from_config(&self.config.video, self.config.output_path());

        VideoRobot::new(Arc::new(images), Arc::new(renderer), Arc::new(FileStore::new(paths)))
            .with_layouts(self.config.video.caption_layouts.clone())
            .with_progress(Self::progress_bar("images"))
    }

    /// Run the text stage and save the result for the video stage
    pub async fn run_text(&self, content: Content) -> Result<Content> {
        let robot = self.text_robot()?;
        self.run_text_with(&robot, content).await
    }

    pub async fn run_text_with(&self, robot: &TextRobot, content: Content) -> Result<Content> {
        let title = content.title();
        info!("Starting text stage for '{}'", title);

        let content = robot
            .run(content)
            .await
            .with_context(|| format!("Text stage failed for '{}'", title))?;

        if content.sentences.is_empty() {
            warn!("No sentences were found for '{}'", title);
        }

        let store = self.store();
        store.save(&content).context("Failed to save content document")?;
        info!("Saved {} sentences to {:?}", content.sentences.len(), store.paths().state_file());
        Ok(content)
    }

    /// Run the video stage on the saved document
    pub async fn run_video(&self) -> Result<Content> {
        info!("Starting video stage from {:?}", self.store().paths().state_file());
        let content = self.video_robot().run_from_store().await.context("Video stage failed")?;
        info!("Video written to {:?}", self.config.output_path());
        Ok(content)
    }

    /// Run both stages, handing the document over directly
    pub async fn run_all(&self, content: Content) -> Result<Content> {
        let content = self.run_text(content).await?;
        let content = self.video_robot().run(content).await.context("Video stage failed")?;
        info!("Video written to {:?}", self.config.output_path());
        Ok(content)
    }

    fn progress_bar(unit: &str) -> ProgressBar {
        let progress_bar = ProgressBar::new(0);
        let template = format!(
            "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
            unit
        );
        let style = ProgressStyle::default_bar()
            .template(&template)
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%)"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("=>-"));
        progress_bar
    }
}
