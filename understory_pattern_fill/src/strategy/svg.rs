// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill resolution for surfaces with native `<pattern>` support.

use alloc::string::String;
use understory_vector_scene::{NodeId, Scene};

use super::{FillStrategy, SolidFill};
use crate::builder::PatternBuilder;
use crate::descriptor::PatternDescriptor;
use crate::store::PaintDefinitionStore;

/// Sets the SVG `fill` attribute; no fill becomes `fill="none"`.
#[derive(Copy, Clone, Debug, Default)]
pub struct SvgSolidFill;

impl SolidFill for SvgSolidFill {
    fn apply(&self, scene: &mut Scene, element: NodeId, color: Option<&str>) {
        scene.set_attr(element, "fill", color.unwrap_or("none"));
    }
}

/// The modern fill strategy.
///
/// Every pattern fill builds a new definition under a fresh identifier and
/// points the element's `fill` at it with `url(<base>#<id>)`. Plain colors,
/// `url(#id)` references included, are handed to the wrapped primitive
/// unchanged.
#[derive(Clone, Debug, Default)]
pub struct SvgFill<S = SvgSolidFill> {
    solid: S,
    builder: PatternBuilder,
}

impl<S: SolidFill> SvgFill<S> {
    /// Wraps a solid-fill primitive.
    pub fn new(solid: S) -> Self {
        Self {
            solid,
            builder: PatternBuilder,
        }
    }

    /// The wrapped primitive.
    pub fn solid(&self) -> &S {
        &self.solid
    }
}

impl<S: SolidFill> FillStrategy for SvgFill<S> {
    fn resolve_solid(
        &mut self,
        scene: &mut Scene,
        _store: &mut PaintDefinitionStore,
        element: NodeId,
        color: Option<&str>,
    ) {
        self.solid.apply(scene, element, color);
    }

    fn resolve_pattern(
        &mut self,
        scene: &mut Scene,
        store: &mut PaintDefinitionStore,
        element: NodeId,
        pattern: &PatternDescriptor,
    ) {
        let id = store.next_id();
        self.builder.build(scene, store, id.clone(), pattern);
        scene.set_attr(element, "fill", store.reference(&id));
    }

    fn register_pattern(
        &mut self,
        scene: &mut Scene,
        store: &mut PaintDefinitionStore,
        id: Option<&str>,
        pattern: &PatternDescriptor,
    ) -> String {
        let id = id.map_or_else(|| store.next_id(), String::from);
        self.builder.build(scene, store, id.clone(), pattern);
        id
    }
}
