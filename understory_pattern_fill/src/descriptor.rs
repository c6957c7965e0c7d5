// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill values and pattern descriptors.

use alloc::string::String;
use core::fmt::Write as _;
use kurbo::{PathEl, Shape, Size};
use peniko::Color;
use understory_vector_scene::fmt_number;

use crate::palette::css_color;

/// Width and height of a pattern tile when the descriptor leaves them unset.
pub const DEFAULT_TILE_SIZE: f64 = 10.0;

/// Stroke color of a path pattern without an explicit stroke.
pub const DEFAULT_STROKE: &str = "#343434";

/// Stroke width of a path pattern without an explicit stroke width.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Fill of a path pattern's geometry without an explicit fill.
pub const DEFAULT_PATH_FILL: &str = "transparent";

/// Color used when nothing else about a pattern can be rendered.
pub const NEUTRAL_GRAY: &str = "#A0A0A0";

/// A value assigned to an element's fill.
///
/// Callers hand this to [`PatternRenderer::set_fill`](crate::PatternRenderer::set_fill)
/// without knowing whether the result is a solid color or a pattern reference.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FillValue {
    /// No fill.
    #[default]
    None,
    /// Any CSS paint string, including `url(#id)` references.
    Solid(String),
    /// A tiled pattern.
    Pattern(PatternDescriptor),
}

impl FillValue {
    /// Returns the pattern descriptor, if this is a pattern fill.
    pub fn as_pattern(&self) -> Option<&PatternDescriptor> {
        match self {
            Self::Pattern(p) => Some(p),
            _ => None,
        }
    }
}

impl From<&str> for FillValue {
    fn from(color: &str) -> Self {
        Self::Solid(String::from(color))
    }
}

impl From<String> for FillValue {
    fn from(color: String) -> Self {
        Self::Solid(color)
    }
}

impl From<Color> for FillValue {
    fn from(color: Color) -> Self {
        Self::Solid(css_color(color))
    }
}

impl From<PatternDescriptor> for FillValue {
    fn from(pattern: PatternDescriptor) -> Self {
        Self::Pattern(pattern)
    }
}

impl<T: Into<Self>> From<Option<T>> for FillValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

/// Description of a tiled fill.
///
/// The tile is `width`×`height` user-space units (default
/// [`DEFAULT_TILE_SIZE`] each), optionally painted with `background` before
/// its content.
///
/// # Example
///
/// ```rust
/// use understory_pattern_fill::{PathSpec, PatternDescriptor};
///
/// let hatch = PatternDescriptor::path(
///     PathSpec::new("M 0 0 L 10 10").with_stroke("#2b908f"),
/// )
/// .with_size(8.0, 8.0)
/// .with_background("#ffffff");
///
/// assert_eq!(hatch.size().width, 8.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PatternDescriptor {
    /// Tile width.
    pub width: Option<f64>,
    /// Tile height.
    pub height: Option<f64>,
    /// Color painted under the content, over the whole tile.
    pub background: Option<String>,
    /// What the tile shows.
    pub content: PatternContent,
}

/// The single content source of a pattern tile.
#[derive(Clone, Debug, PartialEq)]
pub enum PatternContent {
    /// Vector geometry.
    Path(PathPattern),
    /// A referenced raster image.
    Image(ImagePattern),
    /// A flat color covering the tile.
    Solid(String),
    /// Nothing could be resolved.
    Empty,
}

/// Vector geometry content.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPattern {
    /// The geometry and its paint.
    pub spec: PathSpec,
    /// Flat color for surfaces that cannot draw the geometry.
    pub fallback: Option<String>,
}

/// Path data plus stroke and fill for the pattern geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct PathSpec {
    /// SVG path data.
    pub d: String,
    /// Stroke color, default [`DEFAULT_STROKE`].
    pub stroke: Option<String>,
    /// Stroke width, default [`DEFAULT_STROKE_WIDTH`].
    pub stroke_width: Option<f64>,
    /// Fill color, default [`DEFAULT_PATH_FILL`].
    pub fill: Option<String>,
}

/// Raster image content.
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePattern {
    /// Image reference (URL or path); never loaded here.
    pub href: String,
    /// Image opacity; only honored within `[0, 1]`.
    pub opacity: Option<f64>,
    /// First recolor color for the legacy two-tone tile.
    pub color1: Option<String>,
    /// Second recolor color for the legacy two-tone tile.
    pub color2: Option<String>,
}

impl PatternDescriptor {
    /// A pattern with the given content and default size.
    pub fn new(content: PatternContent) -> Self {
        Self {
            width: None,
            height: None,
            background: None,
            content,
        }
    }

    /// A path pattern.
    pub fn path(spec: impl Into<PathSpec>) -> Self {
        Self::new(PatternContent::Path(PathPattern {
            spec: spec.into(),
            fallback: None,
        }))
    }

    /// An image pattern.
    pub fn image(href: impl Into<String>) -> Self {
        Self::new(PatternContent::Image(ImagePattern {
            href: href.into(),
            opacity: None,
            color1: None,
            color2: None,
        }))
    }

    /// A flat-color tile.
    pub fn solid(color: impl Into<String>) -> Self {
        Self::new(PatternContent::Solid(color.into()))
    }

    /// A pattern without content.
    pub fn empty() -> Self {
        Self::new(PatternContent::Empty)
    }

    /// Sets the tile size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets the background color.
    #[must_use]
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Sets the flat color used where path geometry cannot be drawn.
    ///
    /// Ignored for non-path content.
    #[must_use]
    pub fn with_fallback(mut self, color: impl Into<String>) -> Self {
        if let PatternContent::Path(path) = &mut self.content {
            path.fallback = Some(color.into());
        }
        self
    }

    /// Sets the image opacity.
    ///
    /// Ignored for non-image content.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        if let PatternContent::Image(image) = &mut self.content {
            image.opacity = Some(opacity);
        }
        self
    }

    /// Sets the legacy two-tone recolor colors.
    ///
    /// Ignored for non-image content.
    #[must_use]
    pub fn with_recolor(mut self, color1: impl Into<String>, color2: impl Into<String>) -> Self {
        if let PatternContent::Image(image) = &mut self.content {
            image.color1 = Some(color1.into());
            image.color2 = Some(color2.into());
        }
        self
    }

    /// Returns the tile size with defaults applied.
    pub fn size(&self) -> Size {
        Size::new(
            self.width.unwrap_or(DEFAULT_TILE_SIZE),
            self.height.unwrap_or(DEFAULT_TILE_SIZE),
        )
    }
}

impl PathSpec {
    /// Path data with default stroke and fill.
    pub fn new(d: impl Into<String>) -> Self {
        Self {
            d: d.into(),
            stroke: None,
            stroke_width: None,
            fill: None,
        }
    }

    /// Path data taken from a shape's outline.
    pub fn from_shape(shape: &impl Shape, tolerance: f64) -> Self {
        Self::new(svg_path_data(shape.path_elements(tolerance)))
    }

    /// Sets the stroke color.
    #[must_use]
    pub fn with_stroke(mut self, color: impl Into<String>) -> Self {
        self.stroke = Some(color.into());
        self
    }

    /// Sets the stroke width.
    #[must_use]
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    /// Sets the fill color.
    #[must_use]
    pub fn with_fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    /// Stroke color with the default applied.
    pub fn stroke(&self) -> &str {
        self.stroke.as_deref().unwrap_or(DEFAULT_STROKE)
    }

    /// Stroke width with the default applied.
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH)
    }

    /// Fill color with the default applied.
    pub fn fill(&self) -> &str {
        self.fill.as_deref().unwrap_or(DEFAULT_PATH_FILL)
    }
}

impl From<&str> for PathSpec {
    fn from(d: &str) -> Self {
        Self::new(d)
    }
}

impl From<String> for PathSpec {
    fn from(d: String) -> Self {
        Self::new(d)
    }
}

impl ImagePattern {
    /// The opacity to apply, or `None` for full opacity.
    ///
    /// Values outside `[0, 1]` (including NaN) are ignored.
    pub fn effective_opacity(&self) -> Option<f64> {
        self.opacity.filter(|o| (0.0..=1.0).contains(o))
    }

    /// Both recolor colors, when the legacy two-tone tile applies.
    pub fn recolor(&self) -> Option<(&str, &str)> {
        Some((self.color1.as_deref()?, self.color2.as_deref()?))
    }
}

fn svg_path_data(elements: impl Iterator<Item = PathEl>) -> String {
    let mut d = String::new();
    for el in elements {
        if !d.is_empty() {
            d.push(' ');
        }
        match el {
            PathEl::MoveTo(p) => {
                let _ = write!(d, "M {} {}", fmt_number(p.x), fmt_number(p.y));
            }
            PathEl::LineTo(p) => {
                let _ = write!(d, "L {} {}", fmt_number(p.x), fmt_number(p.y));
            }
            PathEl::QuadTo(p1, p2) => {
                let _ = write!(
                    d,
                    "Q {} {} {} {}",
                    fmt_number(p1.x),
                    fmt_number(p1.y),
                    fmt_number(p2.x),
                    fmt_number(p2.y)
                );
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let _ = write!(
                    d,
                    "C {} {} {} {} {} {}",
                    fmt_number(p1.x),
                    fmt_number(p1.y),
                    fmt_number(p2.x),
                    fmt_number(p2.y),
                    fmt_number(p3.x),
                    fmt_number(p3.y)
                );
            }
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}
