// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart color palettes.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use peniko::Color;

/// The engine default palette, used when a chart supplies no colors.
pub const DEFAULT_COLORS: [&str; 10] = [
    "#7cb5ec", "#434348", "#90ed7d", "#f7a35c", "#8085e9", "#f15c80", "#e4d354", "#2b908f",
    "#f45b5b", "#91e8e1",
];

/// An ordered list of CSS colors.
///
/// A palette is never empty: constructing one from an empty list yields the
/// default palette. Indexing cycles, so series `n` of a chart with fewer
/// colors than series reuses `n % len`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| String::from(*c)).collect(),
        }
    }
}

impl Palette {
    /// Creates a palette from CSS color strings.
    ///
    /// Falls back to [`DEFAULT_COLORS`] when `colors` is empty.
    pub fn new<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    /// Creates a palette from colors.
    pub fn from_colors(colors: impl IntoIterator<Item = Color>) -> Self {
        Self::new(colors.into_iter().map(css_color))
    }

    /// Returns the color for `index`, cycling through the palette.
    pub fn get(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    /// Returns the number of distinct colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; kept for symmetry with [`Palette::len`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterates over the colors in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.colors.iter().map(String::as_str)
    }
}

/// Formats a color as a CSS color string.
///
/// Opaque colors become `#rrggbb`; translucent ones `rgba(r,g,b,a)`.
pub fn css_color(color: Color) -> String {
    let rgba = color.to_rgba8();
    if rgba.a == u8::MAX {
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    } else {
        let a = f64::from(rgba.a) / 255.0;
        format!(
            "rgba({},{},{},{})",
            rgba.r,
            rgba.g,
            rgba.b,
            understory_vector_scene::fmt_number(a)
        )
    }
}
