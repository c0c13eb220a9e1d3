//! Decoded entities of the WDB container
//!
//! All entities are produced in a single top-to-bottom decode pass and are
//! never mutated afterwards. Name fields keep the trailing NUL padding they
//! carry on disk; [`strip_padding`] removes it before a name is used as
//! metadata or a path segment.

/// A 3-component float vector as stored in model records
pub type Vec3 = [f32; 3];

/// A decoded WDB file: an ordered sequence of worlds
///
/// The declared world count always equals `worlds.len()`; a count that the
/// buffer cannot satisfy fails the decode instead of producing a short file.
#[derive(Debug, Clone, PartialEq)]
pub struct WdbFile {
    /// The worlds in file order
    pub worlds: Vec<World>,
}

/// A single world: a named collection of parts and models
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    /// World name, possibly NUL-padded
    pub name: String,
    /// Part records in file order
    pub parts: Vec<Part>,
    /// Model records in file order
    pub models: Vec<Model>,
}

/// A model record with its embedded ROI blob and placement transform
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Model name, possibly NUL-padded
    pub name: String,
    /// The embedded ROI blob, materialized from its pointer-resolved range
    pub data: Vec<u8>,
    /// Name of the presenter driving this model, possibly NUL-padded
    pub presenter_name: String,
    /// World-space location
    pub location: Vec3,
    /// Facing direction
    pub direction: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Whether the model starts out visible
    pub visibility: bool,
}

/// A part record: a named ROI blob without placement data
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// ROI name, possibly NUL-padded
    pub roi_name: String,
    /// The embedded ROI blob, materialized from its pointer-resolved range
    pub data: Vec<u8>,
}

/// Strip trailing NUL padding from a fixed-layout text field
///
/// Idempotent: stripping an already-stripped string is a no-op.
///
/// # Examples
///
/// ```
/// use lego_wdb::types::strip_padding;
///
/// assert_eq!(strip_padding("ISLE\0\0"), "ISLE");
/// assert_eq!(strip_padding("ISLE"), "ISLE");
/// ```
pub fn strip_padding(name: &str) -> &str {
    name.trim_end_matches('\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_padding() {
        assert_eq!(strip_padding("ACT1\0\0\0"), "ACT1");
        assert_eq!(strip_padding("\0"), "");
        assert_eq!(strip_padding(""), "");
    }

    #[test]
    fn test_strip_padding_idempotent() {
        let once = strip_padding("ISLE\0\0");
        assert_eq!(strip_padding(once), once);
    }

    #[test]
    fn test_strip_padding_keeps_interior_nul() {
        // Only trailing fill bytes are padding
        assert_eq!(strip_padding("a\0b\0"), "a\0b");
    }
}
