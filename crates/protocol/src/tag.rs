//! The tag palette.
//!
//! Tags are free-form labels attached to tasks. Known tags map to an HSL color
//! triple (`"hue saturation% lightness%"`); anything else falls back to
//! [`DEFAULT_TAG_COLOR`].

/// Tag selected by default for new tasks.
pub const DEFAULT_TAG: &str = "Design";

/// Color used for tags that are not part of the palette.
pub const DEFAULT_TAG_COLOR: &str = "258 60% 55%";

/// Known tags and their HSL colors, in display order.
pub const TAG_COLORS: [(&str, &str); 10] = [
    ("Wireframes", "258 60% 55%"),
    ("Data Entry", "20 80% 55%"),
    ("Media", "340 65% 55%"),
    ("Design", "170 60% 40%"),
    ("Graphic Design", "290 50% 55%"),
    ("UI Design", "200 70% 50%"),
    ("Development", "150 60% 40%"),
    ("Marketing", "30 80% 50%"),
    ("Research", "230 60% 55%"),
    ("Bug Fix", "0 70% 55%"),
];

/// Returns the HSL color for a tag.
///
/// # Examples
///
/// ```
/// use taskflow_protocol::tag::{tag_color, DEFAULT_TAG_COLOR};
///
/// assert_eq!(tag_color("Bug Fix"), "0 70% 55%");
/// assert_eq!(tag_color("Something else"), DEFAULT_TAG_COLOR);
/// ```
#[must_use]
pub fn tag_color(tag: &str) -> &'static str {
    TAG_COLORS
        .iter()
        .find(|(name, _)| *name == tag)
        .map_or(DEFAULT_TAG_COLOR, |(_, color)| color)
}

/// Returns the palette position of a tag, if it is a known tag.
#[must_use]
pub fn tag_index(tag: &str) -> Option<usize> {
    TAG_COLORS.iter().position(|(name, _)| *name == tag)
}

/// Returns the tag name at a palette position, wrapping around.
#[must_use]
pub const fn tag_at(index: usize) -> &'static str {
    TAG_COLORS[index % TAG_COLORS.len()].0
}
