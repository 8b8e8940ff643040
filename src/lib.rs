/*!
 * # wikireel - narrated videos from Wikipedia articles
 *
 * A Rust library that condenses a Wikipedia article into a handful of
 * keyword-annotated sentences and turns them into a rendered video.
 *
 * ## Features
 *
 * - Fetch article text through the Algorithmia Wikipedia parser
 * - Strip markup and parenthetical asides, split into sentences
 * - Annotate sentences with keywords from Watson Natural Language Understanding
 * - Persist the content document between stages as versioned JSON
 * - Build frame images, captions and a thumbnail with ImageMagick
 * - Render the final video with the After Effects command line renderer
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `content`: The document shared by every stage
 * - `state`: Loading and saving the document, writing the render script
 * - `text`: Text stage (`sanitize`, `segmenter`, `robot`)
 * - `video`: Video stage (`layout`, `magick`, `renderer`, `robot`)
 * - `providers`: Clients for the external text services:
 *   - `providers::algorithmia`: Wikipedia article fetching
 *   - `providers::watson`: Keyword extraction
 *   - `providers::retry`: Retry policy for transient failures
 * - `prompt`: Interactive questions
 * - `app_controller`: Main application controller
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations and content file names
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod content;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod prompt;
pub mod providers;
pub mod state;
pub mod text;
pub mod video;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use content::{Content, Prefix, Sentence};
pub use errors::{AppError, MediaError, ProviderError, StateError};
pub use language_utils::{get_language_name, normalize_to_part1};
pub use state::{ContentStore, FileStore};
pub use text::TextRobot;
pub use video::VideoRobot;
