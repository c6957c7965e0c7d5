// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Materializing pattern descriptors as `<pattern>` definitions.

use alloc::string::String;
use kurbo::{Rect, Size};
use understory_vector_scene::{NodeId, Scene};

use crate::descriptor::{ImagePattern, PathPattern, PatternContent, PatternDescriptor};
use crate::store::{PaintDefinition, PaintDefinitionStore};

/// Builds tiled paint definitions.
///
/// Every call creates a new `<pattern>` element in the store's shared
/// definitions container, even for a descriptor that was built before.
#[derive(Copy, Clone, Debug, Default)]
pub struct PatternBuilder;

impl PatternBuilder {
    /// Builds `descriptor` under `id` and returns the recorded definition.
    ///
    /// The tile gets, in order:
    /// - a full-tile background rect when `background` is set and the content
    ///   is a path or an image;
    /// - one content child: the path, the image, or a flat-color rect.
    ///
    /// [`PatternContent::Empty`] produces a definition with no children.
    pub fn build<'a>(
        &self,
        scene: &mut Scene,
        store: &'a mut PaintDefinitionStore,
        id: String,
        descriptor: &PatternDescriptor,
    ) -> &'a PaintDefinition {
        let definition = store.create_pattern(scene, id, descriptor);
        let Some(pattern) = definition.node() else {
            return definition;
        };
        let tile = Rect::from_origin_size((0.0, 0.0), descriptor.size());

        match &descriptor.content {
            PatternContent::Path(path) => {
                write_background(scene, pattern, tile, descriptor.background.as_deref());
                write_path(scene, pattern, path);
            }
            PatternContent::Image(image) => {
                write_background(scene, pattern, tile, descriptor.background.as_deref());
                write_image(scene, pattern, tile.size(), image);
            }
            PatternContent::Solid(color) => {
                let rect = scene.rect(tile);
                scene.set_attr(rect, "fill", color);
                scene.set_attr(rect, "stroke-width", 0_u32);
                scene.append(pattern, rect);
            }
            PatternContent::Empty => {
                log::warn!(
                    "pattern `{}` has no path, image, or color; the tile stays empty",
                    definition.id()
                );
            }
        }

        definition
    }
}

fn write_background(scene: &mut Scene, pattern: NodeId, tile: Rect, color: Option<&str>) {
    if let Some(color) = color {
        let rect = scene.rect(tile);
        scene.set_attr(rect, "fill", color);
        scene.append(pattern, rect);
    }
}

fn write_path(scene: &mut Scene, pattern: NodeId, path: &PathPattern) {
    let node = scene.path(&path.spec.d);
    scene.set_attr(node, "stroke", path.spec.stroke());
    scene.set_attr(node, "stroke-width", path.spec.stroke_width());
    scene.set_attr(node, "fill", path.spec.fill());
    scene.append(pattern, node);
}

fn write_image(scene: &mut Scene, pattern: NodeId, size: Size, image: &ImagePattern) {
    let node = scene.image(&image.href, Rect::from_origin_size((0.0, 0.0), size));
    match (image.opacity, image.effective_opacity()) {
        (_, Some(opacity)) => scene.set_attr(node, "opacity", opacity),
        (Some(ignored), None) => {
            log::warn!("image pattern opacity {ignored} is outside [0, 1]; using full opacity");
        }
        (None, None) => {}
    }
    scene.append(pattern, node);
}
