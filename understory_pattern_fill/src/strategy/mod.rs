// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill strategies.
//!
//! A [`FillStrategy`] decorates a [`SolidFill`] primitive: solid colors go
//! straight to the primitive, pattern descriptors are resolved by the
//! strategy. Which strategy a renderer uses is decided once, from its
//! [`RendererCapabilities`], by [`strategy_for`].

mod legacy;
mod svg;

pub use legacy::{LegacyFill, LegacySolidFill};
pub use svg::{SvgFill, SvgSolidFill};

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt::Debug;
use understory_vector_scene::{NodeId, Scene};

use crate::descriptor::{FillValue, PatternDescriptor};
use crate::store::PaintDefinitionStore;

/// What the target surface can express.
///
/// The default is [`RendererCapabilities::SVG`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RendererCapabilities {
    /// Whether the surface draws `<pattern>` definitions referenced by `url(#id)`.
    pub native_patterns: bool,
}

impl RendererCapabilities {
    /// A modern vector surface with native pattern support.
    pub const SVG: Self = Self {
        native_patterns: true,
    };

    /// A legacy surface that can only tile images.
    pub const LEGACY: Self = Self {
        native_patterns: false,
    };
}

impl Default for RendererCapabilities {
    fn default() -> Self {
        Self::SVG
    }
}

/// The underlying "set fill color" primitive of a surface.
pub trait SolidFill: Debug {
    /// Sets `element`'s fill to `color`, or clears it for `None`.
    fn apply(&self, scene: &mut Scene, element: NodeId, color: Option<&str>);
}

/// Resolves fill values for one kind of surface.
pub trait FillStrategy: Debug {
    /// Applies a plain color (or no fill).
    fn resolve_solid(
        &mut self,
        scene: &mut Scene,
        store: &mut PaintDefinitionStore,
        element: NodeId,
        color: Option<&str>,
    );

    /// Applies a pattern descriptor.
    fn resolve_pattern(
        &mut self,
        scene: &mut Scene,
        store: &mut PaintDefinitionStore,
        element: NodeId,
        pattern: &PatternDescriptor,
    );

    /// Registers a pattern without assigning it to any element.
    ///
    /// Uses `id` when given, otherwise a fresh identifier from the store, and
    /// returns the identifier used.
    fn register_pattern(
        &mut self,
        scene: &mut Scene,
        store: &mut PaintDefinitionStore,
        id: Option<&str>,
        pattern: &PatternDescriptor,
    ) -> String;

    /// Applies any fill value, dispatching on its kind.
    fn set_fill(
        &mut self,
        scene: &mut Scene,
        store: &mut PaintDefinitionStore,
        element: NodeId,
        value: &FillValue,
    ) {
        match value {
            FillValue::None => self.resolve_solid(scene, store, element, None),
            FillValue::Solid(color) => {
                self.resolve_solid(scene, store, element, Some(color.as_str()));
            }
            FillValue::Pattern(pattern) => self.resolve_pattern(scene, store, element, pattern),
        }
    }
}

/// Selects the strategy matching `capabilities`.
pub fn strategy_for(capabilities: RendererCapabilities) -> Box<dyn FillStrategy> {
    if capabilities.native_patterns {
        Box::new(<SvgFill>::default())
    } else {
        Box::new(<LegacyFill>::default())
    }
}

/// Extracts `id` from a `url(#id)` or `url(<base>#id)` reference.
pub(crate) fn reference_target(color: &str) -> Option<&str> {
    let inner = color.trim().strip_prefix("url(")?.strip_suffix(')')?;
    let (_, id) = inner.split_once('#')?;
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_targets() {
        assert_eq!(reference_target("url(#p-1)"), Some("p-1"));
        assert_eq!(reference_target(" url(page.html#p-1) "), Some("p-1"));
        assert_eq!(reference_target("url(#)"), None);
        assert_eq!(reference_target("#ff0000"), None);
        assert_eq!(reference_target("url(tile.png)"), None);
    }

    #[test]
    fn capabilities_select_the_strategy() {
        let svg = strategy_for(RendererCapabilities::SVG);
        assert!(alloc::format!("{svg:?}").starts_with("SvgFill"));
        let legacy = strategy_for(RendererCapabilities::LEGACY);
        assert!(alloc::format!("{legacy:?}").starts_with("LegacyFill"));
    }
}
