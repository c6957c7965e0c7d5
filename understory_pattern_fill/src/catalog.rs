// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The built-in pattern catalog.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::descriptor::{PathSpec, PatternDescriptor};
use crate::palette::Palette;
use crate::renderer::PatternRenderer;

/// Geometry of the built-in patterns, on a 10×10 tile.
///
/// In order: diagonal hatch, reverse diagonal hatch, vertical bars,
/// horizontal bars, steps, square, circle, mirrored steps, diamond, chevron.
pub const DEFAULT_PATTERN_PATHS: [&str; 10] = [
    "M 0 0 L 10 10 M 9 -1 L 11 1 M -1 9 L 1 11",
    "M 0 10 L 10 0 M -1 1 L 1 -1 M 9 11 L 11 9",
    "M 3 0 L 3 10 M 8 0 L 8 10",
    "M 0 3 L 10 3 M 0 8 L 10 8",
    "M 0 3 L 5 3 L 5 0 M 5 10 L 5 7 L 10 7",
    "M 3 3 L 8 3 L 8 8 L 3 8 Z",
    "M 5 5 m -4 0 a 4 4 0 1 1 8 0 a 4 4 0 1 1 -8 0",
    "M 10 3 L 5 3 L 5 0 M 5 10 L 5 7 L 0 7",
    "M 2 5 L 5 2 L 8 5 L 5 8 Z",
    "M 0 0 L 5 10 L 10 0",
];

/// Identifier of built-in pattern `index` in `namespace`.
pub fn default_pattern_id(namespace: &str, index: usize) -> String {
    format!("{namespace}-default-pattern-{index}")
}

/// The ten built-in path patterns, bound to a palette.
///
/// Pattern `i` is stroked with `palette.get(i)`, which also serves as its flat
/// fallback where path geometry cannot be drawn.
#[derive(Copy, Clone, Debug, Default)]
pub struct PredefinedPatterns;

impl PredefinedPatterns {
    /// Descriptors of the built-in patterns, in catalog order.
    pub fn descriptors(&self, palette: &Palette) -> Vec<PatternDescriptor> {
        DEFAULT_PATTERN_PATHS
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let color = palette.get(i);
                PatternDescriptor::path(PathSpec::new(*d).with_stroke(color)).with_fallback(color)
            })
            .collect()
    }

    /// Registers every built-in pattern with `renderer` under
    /// [`default_pattern_id`] and returns the identifiers in order.
    pub fn install(&self, renderer: &mut PatternRenderer, palette: &Palette) -> Vec<String> {
        let namespace = String::from(renderer.store().namespace());
        self.descriptors(palette)
            .iter()
            .enumerate()
            .map(|(i, descriptor)| {
                let id = default_pattern_id(&namespace, i);
                renderer.add_pattern(Some(id.as_str()), descriptor)
            })
            .collect()
    }
}
