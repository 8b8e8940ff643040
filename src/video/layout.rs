/*!
 * Caption layouts for sentence images.
 *
 * Each sentence caption is rendered into a box whose size and text gravity
 * depend on the sentence position. The table repeats, so any index resolves
 * to a layout.
 */

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ImageMagick gravity for caption text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gravity {
    Center,
    West,
    East,
    North,
    South,
}

impl Gravity {
    /// The argument ImageMagick expects after `-gravity`
    pub fn as_arg(&self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::West => "west",
            Self::East => "east",
            Self::North => "north",
            Self::South => "south",
        }
    }
}

impl fmt::Display for Gravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_arg())
    }
}

/// Size and alignment of one caption box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionLayout {
    pub width: u32,
    pub height: u32,
    pub gravity: Gravity,
}

impl CaptionLayout {
    pub const fn new(width: u32, height: u32, gravity: Gravity) -> Self {
        Self { width, height, gravity }
    }

    /// Banner across the top of the frame
    pub const fn banner() -> Self {
        Self::new(1920, 400, Gravity::Center)
    }

    /// Text centered over the whole frame
    pub const fn full_frame() -> Self {
        Self::new(1920, 1080, Gravity::Center)
    }

    /// Narrow panel with left-aligned text
    pub const fn side_panel() -> Self {
        Self::new(800, 1080, Gravity::West)
    }

    /// Geometry in the `WxH` form used by `-size`
    pub fn size_arg(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Ordered, repeating table of caption layouts
///
/// Never empty: both construction and deserialization validate the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CaptionLayout>", into = "Vec<CaptionLayout>")]
pub struct CaptionLayouts(Vec<CaptionLayout>);

impl TryFrom<Vec<CaptionLayout>> for CaptionLayouts {
    type Error = anyhow::Error;

    fn try_from(layouts: Vec<CaptionLayout>) -> Result<Self> {
        Self::new(layouts)
    }
}

impl From<CaptionLayouts> for Vec<CaptionLayout> {
    fn from(layouts: CaptionLayouts) -> Self {
        layouts.0
    }
}

impl CaptionLayouts {
    /// Build a table, rejecting an empty one or zero-sized boxes
    pub fn new(layouts: Vec<CaptionLayout>) -> Result<Self> {
        let table = Self(layouts);
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(anyhow!("Caption layout table must contain at least one layout"));
        }
        if let Some((index, _)) = self.0.iter().enumerate().find(|(_, l)| l.width == 0 || l.height == 0) {
            return Err(anyhow!("Caption layout {} has a zero dimension", index));
        }
        Ok(())
    }

    /// Layout for the sentence at `index`, cycling through the table
    pub fn for_index(&self, index: usize) -> CaptionLayout {
        self.0[index % self.0.len()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CaptionLayouts {
    fn default() -> Self {
        Self(vec![
            CaptionLayout::banner(),
            CaptionLayout::full_frame(),
            CaptionLayout::side_panel(),
        ])
    }
}
