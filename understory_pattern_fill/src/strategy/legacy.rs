// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill emulation for surfaces without native pattern support.
//!
//! Such surfaces fill a shape either with a flat color or with a `<fill>`
//! override child that tiles an image, optionally recolored in two tones.
//! They cannot draw arbitrary path geometry, and they have no definitions
//! container: registered patterns are kept as descriptors in the store and
//! resolved when an element's fill references them.

use alloc::string::String;
use hashbrown::HashMap;
use understory_vector_scene::{NodeId, Scene};

use super::{FillStrategy, SolidFill, reference_target};
use crate::descriptor::{ImagePattern, NEUTRAL_GRAY, PatternContent, PatternDescriptor};
use crate::store::PaintDefinitionStore;

/// Tag of the fill override child.
const OVERRIDE_TAG: &str = "fill";

/// Sets `fillcolor` and toggles `filled`.
#[derive(Copy, Clone, Debug, Default)]
pub struct LegacySolidFill;

impl SolidFill for LegacySolidFill {
    fn apply(&self, scene: &mut Scene, element: NodeId, color: Option<&str>) {
        match color {
            Some(color) => {
                scene.set_attr(element, "filled", "t");
                scene.set_attr(element, "fillcolor", color);
            }
            None => scene.set_attr(element, "filled", "f"),
        }
    }
}

/// The legacy fill strategy.
///
/// Fallback order mirrors the modern strategy: path geometry (not drawable
/// here, so its fallback color), then image tiling, then a flat color, then
/// [`NEUTRAL_GRAY`].
///
/// Each element owns at most one override node. A flat fill detaches it and
/// a later tile fill puts the same node back.
#[derive(Clone, Debug, Default)]
pub struct LegacyFill<S = LegacySolidFill> {
    solid: S,
    parked: HashMap<NodeId, NodeId>,
}

impl<S: SolidFill> LegacyFill<S> {
    /// Wraps a solid-fill primitive.
    pub fn new(solid: S) -> Self {
        Self {
            solid,
            parked: HashMap::new(),
        }
    }

    /// The wrapped primitive.
    pub fn solid(&self) -> &S {
        &self.solid
    }

    /// Points `element`'s fill override at `image`, reusing its override
    /// node when it has one.
    fn apply_tile(&mut self, scene: &mut Scene, element: NodeId, image: &ImagePattern) {
        let node = match scene.find_child(element, OVERRIDE_TAG) {
            Some(node) => node,
            None => {
                let node = self
                    .parked
                    .remove(&element)
                    .unwrap_or_else(|| scene.create_element(OVERRIDE_TAG));
                scene.append(element, node);
                node
            }
        };
        match image.recolor() {
            Some((color1, color2)) => {
                scene.set_attr(node, "color", color1);
                scene.set_attr(node, "color2", color2);
                scene.set_attr(node, "type", "pattern");
            }
            None => {
                scene.remove_attr(node, "color");
                scene.remove_attr(node, "color2");
                scene.set_attr(node, "type", "tile");
            }
        }
        scene.set_attr(node, "src", &image.href);

        // Attached nodes do not repaint when their fill child changes.
        if scene.parent(element).is_some() {
            scene.reattach(element);
        }
    }

    /// Applies a flat color, dropping any tile override first.
    fn apply_flat(&mut self, scene: &mut Scene, element: NodeId, color: Option<&str>) {
        if let Some(previous) = scene.find_child(element, OVERRIDE_TAG) {
            scene.detach(previous);
            self.parked.insert(element, previous);
        }
        self.solid.apply(scene, element, color);
    }
}

impl<S: SolidFill> FillStrategy for LegacyFill<S> {
    fn resolve_solid(
        &mut self,
        scene: &mut Scene,
        store: &mut PaintDefinitionStore,
        element: NodeId,
        color: Option<&str>,
    ) {
        let Some(id) = color.and_then(reference_target) else {
            self.apply_flat(scene, element, color);
            return;
        };
        match store.get(id).map(|def| def.descriptor().clone()) {
            Some(pattern) => self.resolve_pattern(scene, store, element, &pattern),
            None => {
                log::warn!("no pattern registered as `{id}`; filling with {NEUTRAL_GRAY}");
                self.apply_flat(scene, element, Some(NEUTRAL_GRAY));
            }
        }
    }

    fn resolve_pattern(
        &mut self,
        scene: &mut Scene,
        _store: &mut PaintDefinitionStore,
        element: NodeId,
        pattern: &PatternDescriptor,
    ) {
        match &pattern.content {
            PatternContent::Path(path) => {
                let color = path.fallback.as_deref().unwrap_or(NEUTRAL_GRAY);
                log::warn!("path patterns are not supported here; filling with {color}");
                self.apply_flat(scene, element, Some(color));
            }
            PatternContent::Image(image) => self.apply_tile(scene, element, image),
            PatternContent::Solid(color) => self.apply_flat(scene, element, Some(color)),
            PatternContent::Empty => {
                log::warn!("pattern has no path, image, or color; filling with {NEUTRAL_GRAY}");
                self.apply_flat(scene, element, Some(NEUTRAL_GRAY));
            }
        }
    }

    fn register_pattern(
        &mut self,
        _scene: &mut Scene,
        store: &mut PaintDefinitionStore,
        id: Option<&str>,
        pattern: &PatternDescriptor,
    ) -> String {
        let id = id.map_or_else(|| store.next_id(), String::from);
        store.insert_detached(id.clone(), pattern.clone());
        id
    }
}
