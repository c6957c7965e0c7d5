// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration.
//!
//! These are plain structs that can be built in code or, with the `serde`
//! feature, deserialized from JSON-shaped option trees:
//!
//! ```json
//! {
//!   "colors": ["#7cb5ec", "#434348"],
//!   "defs": {
//!     "patterns": [
//!       { "id": "hatch", "path": { "d": "M 0 0 L 10 10", "strokeWidth": 1 } },
//!       { "image": "tile.png", "width": 6, "height": 6, "opacity": 0.5 }
//!     ]
//!   }
//! }
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::descriptor::{
    ImagePattern, PathPattern, PathSpec, PatternContent, PatternDescriptor,
};
use crate::palette::Palette;
use crate::store::DEFAULT_NAMESPACE;

/// Options for one chart.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ChartOptions {
    /// Series colors; the engine default palette when absent or empty.
    pub colors: Option<Vec<String>>,
    /// Reusable definitions.
    pub defs: Option<DefsOptions>,
    /// Prefix of generated identifiers, [`DEFAULT_NAMESPACE`] when absent.
    pub namespace: Option<String>,
    /// Document base prepended to fill references.
    pub url_base: Option<String>,
}

impl ChartOptions {
    /// The palette these options select.
    pub fn palette(&self) -> Palette {
        Palette::new(self.colors.iter().flatten().cloned())
    }

    /// The identifier namespace these options select.
    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }

    /// The declared patterns, in order.
    pub fn patterns(&self) -> &[PatternDeclaration] {
        self.defs.as_ref().map_or(&[], |defs| defs.patterns.as_slice())
    }
}

/// Reusable definitions declared by a chart.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DefsOptions {
    /// Pattern declarations.
    pub patterns: Vec<PatternDeclaration>,
}

/// A pattern as written in chart options.
///
/// Several content fields may be set at once; [`to_descriptor`] keeps the
/// first of path, image, and color.
///
/// [`to_descriptor`]: PatternDeclaration::to_descriptor
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PatternDeclaration {
    /// Identifier to register the pattern under.
    pub id: Option<String>,
    /// Vector geometry.
    pub path: Option<PathDeclaration>,
    /// Image reference.
    #[cfg_attr(feature = "serde", serde(alias = "pattern"))]
    pub image: Option<String>,
    /// Flat color; for path patterns, the fallback color.
    pub color: Option<String>,
    /// Tile width.
    pub width: Option<f64>,
    /// Tile height.
    pub height: Option<f64>,
    /// Background color.
    pub background: Option<String>,
    /// Image opacity.
    #[cfg_attr(feature = "serde", serde(alias = "pattern-opacity"))]
    pub opacity: Option<f64>,
    /// First legacy recolor color.
    pub color1: Option<String>,
    /// Second legacy recolor color.
    pub color2: Option<String>,
}

impl PatternDeclaration {
    /// Converts the declaration to a descriptor.
    ///
    /// Content precedence is path, then image, then color; a declaration with
    /// none of them becomes [`PatternContent::Empty`].
    pub fn to_descriptor(&self) -> PatternDescriptor {
        let content = if let Some(path) = &self.path {
            PatternContent::Path(PathPattern {
                spec: path.to_spec(),
                fallback: self.color.clone(),
            })
        } else if let Some(href) = &self.image {
            PatternContent::Image(ImagePattern {
                href: href.clone(),
                opacity: self.opacity,
                color1: self.color1.clone(),
                color2: self.color2.clone(),
            })
        } else if let Some(color) = &self.color {
            PatternContent::Solid(color.clone())
        } else {
            log::warn!(
                "pattern declaration {:?} has no path, image, or color",
                self.id.as_deref().unwrap_or("<unnamed>")
            );
            PatternContent::Empty
        };
        PatternDescriptor {
            width: self.width,
            height: self.height,
            background: self.background.clone(),
            content,
        }
    }
}

/// Path geometry as written in chart options: bare path data, or path data
/// with paint.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PathDeclaration {
    /// Path data only.
    Data(String),
    /// Path data with optional stroke and fill.
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Spec {
        /// Path data.
        d: String,
        /// Stroke color.
        #[cfg_attr(feature = "serde", serde(default))]
        stroke: Option<String>,
        /// Stroke width.
        #[cfg_attr(feature = "serde", serde(default))]
        stroke_width: Option<f64>,
        /// Fill color.
        #[cfg_attr(feature = "serde", serde(default))]
        fill: Option<String>,
    },
}

impl PathDeclaration {
    /// The path spec this declaration describes.
    pub fn to_spec(&self) -> PathSpec {
        match self {
            Self::Data(d) => PathSpec::new(d.clone()),
            Self::Spec {
                d,
                stroke,
                stroke_width,
                fill,
            } => PathSpec {
                d: d.clone(),
                stroke: stroke.clone(),
                stroke_width: *stroke_width,
                fill: fill.clone(),
            },
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for crate::FillValue {
    /// `null` is no fill, a string is a color, an object is a pattern
    /// declaration.
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Color(String),
            Pattern(PatternDeclaration),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None => Self::None,
            Some(Raw::Color(color)) => Self::Solid(color),
            Some(Raw::Pattern(declaration)) => Self::Pattern(declaration.to_descriptor()),
        })
    }
}
