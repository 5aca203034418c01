//! Marker positioning and annotation field rules.
//!
//! Annotation positions are stored as percentages of the photo's width and
//! height, so a marker stays anchored to the same spot no matter how large
//! the image is rendered. Clients may send either percentages directly or
//! raw pixel coordinates, which are resolved against the photo's stored
//! dimensions.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lower bound of a normalized coordinate.
pub const MIN_PERCENT: f64 = 0.0;

/// Upper bound of a normalized coordinate.
pub const MAX_PERCENT: f64 = 100.0;

/// Maximum annotation title length.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum annotation content length.
pub const MAX_CONTENT_LENGTH: usize = 5000;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A marker position in percent of the image size, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Build a position after checking both axes.
    pub fn new(x: f64, y: f64) -> Result<Self, CoreError> {
        validate_position(x, y)?;
        Ok(Self { x, y })
    }
}

/// Marker coordinates as submitted by a client, before resolution.
///
/// `x`/`y` are percent; `px`/`py` are pixels on the original image. A
/// request uses one form or the other, never both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct MarkerFields {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub px: Option<f64>,
    pub py: Option<f64>,
}

/// A complete marker placement in one of the two accepted forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerInput {
    Percent { x: f64, y: f64 },
    Pixels { px: f64, py: f64 },
}

impl MarkerFields {
    fn uses_pixels(&self) -> bool {
        self.px.is_some() || self.py.is_some()
    }

    fn uses_percent(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    /// Collapse into a complete [`MarkerInput`]. `Ok(None)` means no
    /// coordinate was sent at all.
    pub fn to_input(self) -> Result<Option<MarkerInput>, CoreError> {
        if self.uses_pixels() && self.uses_percent() {
            return Err(CoreError::Validation(
                "Send either x/y (percent) or px/py (pixels), not both".into(),
            ));
        }
        match (self.x, self.y, self.px, self.py) {
            (None, None, None, None) => Ok(None),
            (Some(x), Some(y), _, _) => Ok(Some(MarkerInput::Percent { x, y })),
            (_, _, Some(px), Some(py)) => Ok(Some(MarkerInput::Pixels { px, py })),
            _ if self.uses_pixels() => Err(CoreError::Validation(
                "px and py must be sent together".into(),
            )),
            _ => Err(CoreError::Validation("x and y are both required".into())),
        }
    }

    /// Resolve a required placement, as on create.
    pub fn resolve(self, dimensions: Option<(i32, i32)>) -> Result<Position, CoreError> {
        self.to_input()?
            .ok_or_else(|| {
                CoreError::Validation("A marker position (x/y or px/py) is required".into())
            })?
            .resolve(dimensions)
    }

    /// Resolve a partial placement, as on update.
    ///
    /// Percent input may move a single axis. Pixel input always carries
    /// both axes because each pixel is relative to its own dimension.
    pub fn resolve_partial(
        self,
        dimensions: Option<(i32, i32)>,
    ) -> Result<(Option<f64>, Option<f64>), CoreError> {
        if self.uses_pixels() {
            let pos = self.resolve(dimensions)?;
            return Ok((Some(pos.x), Some(pos.y)));
        }
        if let Some(x) = self.x {
            validate_axis("x", x)?;
        }
        if let Some(y) = self.y {
            validate_axis("y", y)?;
        }
        Ok((self.x, self.y))
    }
}

impl MarkerInput {
    /// Resolve to a normalized position.
    ///
    /// Pixel input needs the photo's dimensions; photos whose dimensions
    /// could not be read at upload time only accept percent input.
    pub fn resolve(self, dimensions: Option<(i32, i32)>) -> Result<Position, CoreError> {
        match self {
            MarkerInput::Percent { x, y } => Position::new(x, y),
            MarkerInput::Pixels { px, py } => {
                let (width, height) = dimensions.ok_or_else(|| {
                    CoreError::Validation(
                        "Photo dimensions are unknown; send x/y in percent instead".into(),
                    )
                })?;
                position_from_pixels(px, py, f64::from(width), f64::from(height))
            }
        }
    }
}

fn validate_axis(axis: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation(format!(
            "{axis} must be a finite number"
        )));
    }
    if !(MIN_PERCENT..=MAX_PERCENT).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{axis} must be between {MIN_PERCENT} and {MAX_PERCENT}, got {value}"
        )));
    }
    Ok(())
}

/// Validate a normalized position. Both axes must be finite and in `[0, 100]`.
pub fn validate_position(x: f64, y: f64) -> Result<(), CoreError> {
    validate_axis("x", x)?;
    validate_axis("y", y)
}

/// Convert a pixel coordinate on an image into a normalized position.
///
/// Clicks that land just outside the image (e.g. on a border) are clamped
/// onto the edge rather than rejected.
pub fn position_from_pixels(
    px: f64,
    py: f64,
    width: f64,
    height: f64,
) -> Result<Position, CoreError> {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(CoreError::Validation(format!(
            "image dimensions must be positive, got {width}x{height}"
        )));
    }
    if !(px.is_finite() && py.is_finite()) {
        return Err(CoreError::Validation(
            "pixel coordinates must be finite numbers".into(),
        ));
    }
    let x = (px / width * MAX_PERCENT).clamp(MIN_PERCENT, MAX_PERCENT);
    let y = (py / height * MAX_PERCENT).clamp(MIN_PERCENT, MAX_PERCENT);
    Ok(Position { x, y })
}

/// Convert a normalized position back to pixels for a rendered size.
pub fn to_pixels(position: Position, width: f64, height: f64) -> (f64, f64) {
    (
        position.x / MAX_PERCENT * width,
        position.y / MAX_PERCENT * height,
    )
}

// ---------------------------------------------------------------------------
// Text fields
// ---------------------------------------------------------------------------

/// Validate and trim an annotation title. Titles are required.
pub fn validate_title(title: &str) -> Result<String, CoreError> {
    crate::validation::validate_name("title", title, MAX_TITLE_LENGTH)
}

/// Validate annotation content. Content may be empty but not oversized.
pub fn validate_content(content: &str) -> Result<String, CoreError> {
    let len = content.chars().count();
    if len > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "content must be at most {MAX_CONTENT_LENGTH} characters, got {len}"
        )));
    }
    Ok(content.trim_end().to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
