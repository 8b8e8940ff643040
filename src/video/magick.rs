/*!
 * ImageMagick invocations for the video stage.
 *
 * Every operation maps to one `convert` process. Argument lists are built
 * by pure functions so they can be checked without the binary installed.
 */

use async_trait::async_trait;
use log::{debug, error};
use std::path::Path;
use tokio::process::Command;

use crate::app_config::VideoConfig;
use crate::errors::MediaError;
use crate::file_utils::{ContentPaths, FileManager};
use crate::video::layout::CaptionLayout;

/// Image operations the video stage needs
#[async_trait]
pub trait ImageTool: Send + Sync {
    /// Fit `{index}-original.png` into a full frame as `{index}-converted.png`
    async fn convert_image(&self, index: usize) -> Result<(), MediaError>;

    /// Render the caption of sentence `index` as `{index}-sentence.png`
    async fn create_sentence_image(&self, index: usize, text: &str, layout: CaptionLayout) -> Result<(), MediaError>;

    /// Derive the thumbnail from the first converted image
    async fn create_thumbnail(&self) -> Result<(), MediaError>;
}

/// `convert` command line wrapper
#[derive(Debug, Clone)]
pub struct ImageMagick {
    binary: String,
    paths: ContentPaths,
    width: u32,
    height: u32,
    blur: String,
}

impl ImageMagick {
    pub fn new(binary: impl Into<String>, paths: ContentPaths, width: u32, height: u32, blur: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            paths,
            width,
            height,
            blur: blur.into(),
        }
    }

    pub fn from_config(config: &VideoConfig, paths: ContentPaths) -> Self {
        Self::new(&config.convert_binary, paths, config.width, config.height, &config.blur)
    }

    fn frame(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// Blurred fill background with the fitted image centered on top
    pub fn convert_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let frame = self.frame();
        let fill = format!("{}^", frame);
        let mut args = vec![format!("{}[0]", input.display())];
        args.extend(
            [
                "(", "-clone", "0", "-background", "white", "-blur", self.blur.as_str(), "-resize", fill.as_str(), ")",
                "(", "-clone", "0", "-background", "white", "-resize", frame.as_str(), ")",
                "-delete", "0",
                "-gravity", "center",
                "-compose", "over",
                "-composite",
                "-extent", frame.as_str(),
            ]
            .iter()
            .map(|s| s.to_string()),
        );
        args.push(output.display().to_string());
        args
    }

    /// White text on a transparent box sized by `layout`
    pub fn caption_args(text: &str, layout: CaptionLayout, output: &Path) -> Vec<String> {
        vec![
            "-size".to_string(),
            layout.size_arg(),
            "-gravity".to_string(),
            layout.gravity.as_arg().to_string(),
            "-background".to_string(),
            "transparent".to_string(),
            "-fill".to_string(),
            "white".to_string(),
            "-kerning".to_string(),
            "-1".to_string(),
            format!("caption:{}", text),
            output.display().to_string(),
        ]
    }

    pub fn thumbnail_args(input: &Path, output: &Path) -> Vec<String> {
        vec![input.display().to_string(), output.display().to_string()]
    }

    fn require(path: &Path) -> Result<(), MediaError> {
        if FileManager::file_exists(path) {
            Ok(())
        } else {
            Err(MediaError::MissingInput(path.to_path_buf()))
        }
    }

    async fn execute(&self, args: &[String]) -> Result<(), MediaError> {
        debug!("{} {}", self.binary, args.join(" "));

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .map_err(|source| MediaError::SpawnFailed {
                tool: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("{} failed: {}", self.binary, stderr);
            return Err(MediaError::ToolFailed {
                tool: self.binary.clone(),
                status: output.status.to_string(),
                stderr,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ImageTool for ImageMagick {
    async fn convert_image(&self, index: usize) -> Result<(), MediaError> {
        let input = self.paths.original_image(index);
        Self::require(&input)?;
        let output = self.paths.converted_image(index);
        self.execute(&self.convert_args(&input, &output)).await
    }

    async fn create_sentence_image(&self, index: usize, text: &str, layout: CaptionLayout) -> Result<(), MediaError> {
        let output = self.paths.sentence_image(index);
        self.execute(&Self::caption_args(text, layout, &output)).await
    }

    async fn create_thumbnail(&self) -> Result<(), MediaError> {
        let input = self.paths.converted_image(0);
        Self::require(&input)?;
        self.execute(&Self::thumbnail_args(&input, &self.paths.thumbnail())).await
    }
}
