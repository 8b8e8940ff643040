use indicatif::ProgressBar;
use log::{info, warn};
use std::sync::Arc;

use crate::content::Content;
use crate::errors::AppError;
use crate::state::ContentStore;
use crate::video::layout::CaptionLayouts;
use crate::video::magick::ImageTool;
use crate::video::renderer::Renderer;

// @module: Video stage of the content pipeline

/// Turns an annotated document into a rendered video
///
/// Each step finishes for every sentence before the next one starts:
/// conversions, captions, thumbnail, script, render.
pub struct VideoRobot {
    images: Arc<dyn ImageTool>,
    renderer: Arc<dyn Renderer>,
    store: Arc<dyn ContentStore>,
    layouts: CaptionLayouts,
    progress: ProgressBar,
}

impl VideoRobot {
    pub fn new(images: Arc<dyn ImageTool>, renderer: Arc<dyn Renderer>, store: Arc<dyn ContentStore>) -> Self {
        Self {
            images,
            renderer,
            store,
            layouts: CaptionLayouts::default(),
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_layouts(mut self, layouts: CaptionLayouts) -> Self {
        self.layouts = layouts;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Load the saved document from the store and run every video step
    pub async fn run_from_store(&self) -> Result<Content, AppError> {
        let content = self.store.load()?;
        self.run(content).await
    }

    /// Run every video step on the given document
    pub async fn run(&self, content: Content) -> Result<Content, AppError> {
        if content.sentences.is_empty() {
            warn!("[video-robot] '{}' has no sentences", content.title());
        }

        self.convert_all_images(&content).await?;
        self.create_all_sentence_images(&content).await?;
        self.create_youtube_thumbnail().await?;
        self.create_after_effects_script(&content)?;
        self.render_video_with_after_effects().await?;

        info!("[video-robot] Done with '{}'", content.title());
        Ok(content)
    }

    pub async fn convert_all_images(&self, content: &Content) -> Result<(), AppError> {
        info!("[video-robot] Converting {} images", content.sentences.len());
        self.start_progress(content.sentences.len());
        let mut result = Ok(());
        for index in 0..content.sentences.len() {
            result = self.images.convert_image(index).await;
            if result.is_err() {
                break;
            }
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();
        Ok(result?)
    }

    pub async fn create_all_sentence_images(&self, content: &Content) -> Result<(), AppError> {
        info!("[video-robot] Creating {} sentence images", content.sentences.len());
        self.start_progress(content.sentences.len());
        let mut result = Ok(());
        for (index, sentence) in content.sentences.iter().enumerate() {
            let layout = self.layouts.for_index(index);
            result = self.images.create_sentence_image(index, &sentence.text, layout).await;
            if result.is_err() {
                break;
            }
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();
        Ok(result?)
    }

    pub async fn create_youtube_thumbnail(&self) -> Result<(), AppError> {
        info!("[video-robot] Creating YouTube thumbnail");
        self.images.create_thumbnail().await?;
        Ok(())
    }

    pub fn create_after_effects_script(&self, content: &Content) -> Result<(), AppError> {
        info!("[video-robot] Writing After Effects script");
        self.store.save_script(content)?;
        Ok(())
    }

    pub async fn render_video_with_after_effects(&self) -> Result<(), AppError> {
        self.renderer.render().await?;
        Ok(())
    }

    fn start_progress(&self, len: usize) {
        self.progress.reset();
        self.progress.set_length(len as u64);
    }
}
