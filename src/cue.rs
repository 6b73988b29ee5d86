use crate::error::ReferenceError;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static COORDINATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("coordinate pattern is valid"));

const FRAGMENT: &str = "#xywh=";

/// One time range of the cue file and the thumbnail shown during it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CueEntry {
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub region: ThumbnailRegion,
}

impl CueEntry {
    /// Start inclusive, end exclusive.
    pub fn covers(&self, time: f64) -> bool {
        time >= self.start_seconds && time < self.end_seconds
    }
}

/// Which image (or which part of a sprite sheet) to show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ThumbnailRegion {
    /// Whole image at its natural size
    FullImage { image_url: String },
    /// Crop of a shared sprite sheet
    SpriteCrop {
        image_url: String,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

impl ThumbnailRegion {
    /// Build a region from an (already resolved) reference line such as
    /// `sheet.jpg#xywh=10,20,160,90` or `frame1.jpg`.
    pub fn from_reference(reference: &str) -> Result<Self, ReferenceError> {
        let Some(idx) = reference.to_ascii_lowercase().find(FRAGMENT) else {
            return Ok(Self::FullImage {
                image_url: reference.to_string(),
            });
        };

        let image_url = &reference[..idx];
        let fragment = &reference[idx + FRAGMENT.len()..];

        let coords: Vec<u32> = COORDINATE
            .find_iter(fragment)
            .take(4)
            .map(|m| m.as_str().parse::<u32>())
            .collect::<Result<_, _>>()
            .map_err(|_| ReferenceError::BadCoordinates {
                reference: reference.to_string(),
            })?;

        let &[x, y, width, height] = coords.as_slice() else {
            return Err(ReferenceError::BadCoordinates {
                reference: reference.to_string(),
            });
        };

        if width == 0 || height == 0 {
            return Err(ReferenceError::EmptyRegion {
                reference: reference.to_string(),
            });
        }

        Ok(Self::SpriteCrop {
            image_url: image_url.to_string(),
            x,
            y,
            width,
            height,
        })
    }

    pub fn image_url(&self) -> &str {
        match self {
            Self::FullImage { image_url } | Self::SpriteCrop { image_url, .. } => image_url,
        }
    }

    /// Rendered box width, when the region fixes one
    pub fn width(&self) -> Option<u32> {
        match self {
            Self::FullImage { .. } => None,
            Self::SpriteCrop { width, .. } => Some(*width),
        }
    }

    pub fn height(&self) -> Option<u32> {
        match self {
            Self::FullImage { .. } => None,
            Self::SpriteCrop { height, .. } => Some(*height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_reference() {
        let region = ThumbnailRegion::from_reference("sheet.jpg#xywh=10,20,160,90").unwrap();
        assert_eq!(
            region,
            ThumbnailRegion::SpriteCrop {
                image_url: "sheet.jpg".into(),
                x: 10,
                y: 20,
                width: 160,
                height: 90,
            }
        );
    }

    #[test]
    fn test_plain_reference() {
        let region = ThumbnailRegion::from_reference("frame1.jpg").unwrap();
        assert_eq!(
            region,
            ThumbnailRegion::FullImage {
                image_url: "frame1.jpg".into()
            }
        );
        assert_eq!(region.width(), None);
        assert_eq!(region.height(), None);
    }

    #[test]
    fn test_fragment_is_case_insensitive_and_separators_are_loose() {
        let region = ThumbnailRegion::from_reference("s.png#XYWH=1; 2 / 3 x 4").unwrap();
        assert_eq!(region.image_url(), "s.png");
        assert_eq!(region.width(), Some(3));
        assert_eq!(region.height(), Some(4));
    }

    #[test]
    fn test_too_few_coordinates() {
        let err = ThumbnailRegion::from_reference("s.png#xywh=1,2,3").unwrap_err();
        assert!(matches!(err, ReferenceError::BadCoordinates { .. }));
    }

    #[test]
    fn test_overflowing_coordinate() {
        let err = ThumbnailRegion::from_reference("s.png#xywh=1,2,99999999999,4").unwrap_err();
        assert!(matches!(err, ReferenceError::BadCoordinates { .. }));
    }

    #[test]
    fn test_zero_size_region() {
        let err = ThumbnailRegion::from_reference("s.png#xywh=0,0,0,90").unwrap_err();
        assert!(matches!(err, ReferenceError::EmptyRegion { .. }));
    }

    #[test]
    fn test_entry_range_is_half_open() {
        let entry = CueEntry {
            start_seconds: 5.0,
            end_seconds: 10.0,
            region: ThumbnailRegion::FullImage {
                image_url: "a.jpg".into(),
            },
        };
        assert!(entry.covers(5.0));
        assert!(entry.covers(9.99));
        assert!(!entry.covers(10.0));
        assert!(!entry.covers(4.99));
    }
}
