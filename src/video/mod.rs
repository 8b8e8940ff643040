/*!
 * Video stage: from annotated sentences to a rendered video.
 *
 * - `layout`: caption box table, cycled by sentence index
 * - `magick`: ImageMagick conversions, captions and thumbnail
 * - `renderer`: the After Effects command line renderer
 * - `robot`: runs the steps in order over the whole document
 */

pub mod layout;
pub mod magick;
pub mod renderer;
pub mod robot;

pub use layout::{CaptionLayout, CaptionLayouts, Gravity};
pub use magick::{ImageMagick, ImageTool};
pub use renderer::{AfterEffects, Renderer};
pub use robot::VideoRobot;
