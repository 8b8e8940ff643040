/*!
 * Text stage: from a search term to annotated sentences.
 *
 * - `sanitize`: strips markup, blank lines and parenthetical asides
 * - `segmenter`: splits sanitized text into sentences
 * - `robot`: runs fetch, sanitize, segment, truncate and annotate in order
 */

pub mod robot;
pub mod sanitize;
pub mod segmenter;

pub use robot::TextRobot;
pub use sanitize::sanitize;
pub use segmenter::SentenceSegmenter;
