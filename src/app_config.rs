use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};

use crate::content::DEFAULT_MAXIMUM_SENTENCES;
use crate::file_utils::FileManager;
use crate::video::layout::CaptionLayouts;

// Application configuration module
// This module handles the application configuration including loading,
// validating and saving configuration settings, plus the API credentials
// that live in their own files.

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory holding the saved document, images and render output
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Article language code (ISO)
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Maximum number of sentences kept from the article
    #[serde(default = "default_maximum_sentences")]
    pub maximum_sentences: usize,

    /// Credential file locations
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Text stage settings
    #[serde(default)]
    pub text: TextConfig,

    /// Video stage settings
    #[serde(default)]
    pub video: VideoConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Where the API keys are read from
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CredentialsConfig {
    // @field: Algorithmia key file ({"apiKey": "..."})
    #[serde(default = "default_algorithmia_credentials")]
    pub algorithmia_path: PathBuf,

    // @field: Watson NLU key file ({"apikey": "...", "url": "..."})
    #[serde(default = "default_watson_credentials")]
    pub watson_path: PathBuf,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            algorithmia_path: default_algorithmia_credentials(),
            watson_path: default_watson_credentials(),
        }
    }
}

/// Text stage configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TextConfig {
    /// Algorithmia API base URL
    #[serde(default = "default_algorithmia_endpoint")]
    pub algorithmia_endpoint: String,

    /// Algorithm path of the Wikipedia parser
    #[serde(default = "default_wikipedia_algorithm")]
    pub wikipedia_algorithm: String,

    /// Server-side timeout passed to the Wikipedia algorithm, in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Watson NLU API version date
    #[serde(default = "default_watson_version")]
    pub watson_version: String,

    /// Maximum keyword requests in flight. 1 keeps calls strictly sequential.
    #[serde(default = "default_keyword_concurrency")]
    pub keyword_concurrency: usize,

    /// Extra abbreviations that never end a sentence (without the dot)
    #[serde(default)]
    pub extra_abbreviations: Vec<String>,

    /// Retry count for transient failures
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Base backoff in milliseconds, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Client-side HTTP timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            algorithmia_endpoint: default_algorithmia_endpoint(),
            wikipedia_algorithm: default_wikipedia_algorithm(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            watson_version: default_watson_version(),
            keyword_concurrency: default_keyword_concurrency(),
            extra_abbreviations: Vec::new(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Video stage configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VideoConfig {
    /// ImageMagick binary (`convert`, or `magick` on ImageMagick 7)
    #[serde(default = "default_convert_binary")]
    pub convert_binary: String,

    /// Output frame width
    #[serde(default = "default_width")]
    pub width: u32,

    /// Output frame height
    #[serde(default = "default_height")]
    pub height: u32,

    /// Blur geometry for the background copy
    #[serde(default = "default_blur")]
    pub blur: String,

    /// Caption boxes, cycled by sentence index
    #[serde(default)]
    pub caption_layouts: CaptionLayouts,

    /// Path to the After Effects command-line renderer
    #[serde(default = "default_aerender_path")]
    pub aerender_path: PathBuf,

    /// After Effects project used as the template
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,

    /// Composition to render
    #[serde(default = "default_composition")]
    pub composition: String,

    /// Rendered file name inside the content directory
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            convert_binary: default_convert_binary(),
            width: default_width(),
            height: default_height(),
            blur: default_blur(),
            caption_layouts: CaptionLayouts::default(),
            aerender_path: default_aerender_path(),
            template_path: default_template_path(),
            composition: default_composition(),
            output_file: default_output_file(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// API keys loaded from the credential files
#[derive(Debug, Clone)]
pub struct Credentials {
    pub algorithmia_api_key: String,
    pub watson_api_key: String,
    pub watson_url: String,
}

#[derive(Deserialize)]
struct AlgorithmiaKeyFile {
    #[serde(rename = "apiKey")]
    api_key: String,
}

#[derive(Deserialize)]
struct WatsonKeyFile {
    apikey: String,
    #[serde(default = "default_watson_url")]
    url: String,
}

impl Credentials {
    /// Read both credential files
    pub fn load(config: &CredentialsConfig) -> Result<Self> {
        let algorithmia: AlgorithmiaKeyFile = read_json(&config.algorithmia_path)?;
        let watson: WatsonKeyFile = read_json(&config.watson_path)?;

        if algorithmia.api_key.trim().is_empty() {
            return Err(anyhow!("Algorithmia API key is empty in {:?}", config.algorithmia_path));
        }
        if watson.apikey.trim().is_empty() {
            return Err(anyhow!("Watson API key is empty in {:?}", config.watson_path));
        }

        Ok(Self {
            algorithmia_api_key: algorithmia.api_key,
            watson_api_key: watson.apikey,
            watson_url: watson.url,
        })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = FileManager::read_to_string(path).context("Failed to read credentials file")?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse credentials file: {:?}", path))
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_lang() -> String {
    "pt".to_string()
}

fn default_maximum_sentences() -> usize {
    DEFAULT_MAXIMUM_SENTENCES
}

fn default_algorithmia_credentials() -> PathBuf {
    PathBuf::from("credentials/algorithmia.json")
}

fn default_watson_credentials() -> PathBuf {
    PathBuf::from("credentials/watson-nlu.json")
}

fn default_algorithmia_endpoint() -> String {
    "https://api.algorithmia.com".to_string()
}

fn default_wikipedia_algorithm() -> String {
    "web/WikipediaParser/0.1.2".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    300
}

fn default_watson_version() -> String {
    "2018-04-05".to_string()
}

fn default_watson_url() -> String {
    "https://gateway.watsonplatform.net/natural-language-understanding/api".to_string()
}

fn default_keyword_concurrency() -> usize {
    1
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_request_timeout_secs() -> u64 {
    // Must outlast the server-side parser timeout
    360
}

fn default_convert_binary() -> String {
    "convert".to_string()
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

fn default_blur() -> String {
    "0x9".to_string()
}

fn default_aerender_path() -> PathBuf {
    PathBuf::from("/Applications/Adobe After Effects CC 2019/aerender")
}

fn default_template_path() -> PathBuf {
    PathBuf::from("templates/1/template.aep")
}

fn default_composition() -> String {
    "main".to_string()
}

fn default_output_file() -> String {
    "output.mov".to_string()
}

impl Config {
    /// Load the configuration file, creating it with defaults when missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let raw = FileManager::read_to_string(path).context("Failed to open config file")?;
            return serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse config file: {:?}", path));
        }

        log::warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        FileManager::write_to_file(path, &json).context("Failed to write default config")?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::normalize_to_part1(&self.lang)?;

        if self.maximum_sentences == 0 {
            return Err(anyhow!("maximum_sentences must be at least 1"));
        }
        if self.text.keyword_concurrency == 0 {
            return Err(anyhow!("text.keyword_concurrency must be at least 1"));
        }
        if self.video.width == 0 || self.video.height == 0 {
            return Err(anyhow!("video.width and video.height must be positive"));
        }
        self.video.caption_layouts.validate()?;

        Ok(())
    }

    /// Location of the rendered video, relative to the working directory
    pub fn output_path(&self) -> PathBuf {
        self.content_dir.join(&self.video.output_file)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            content_dir: default_content_dir(),
            lang: default_lang(),
            maximum_sentences: default_maximum_sentences(),
            credentials: CredentialsConfig::default(),
            text: TextConfig::default(),
            video: VideoConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
