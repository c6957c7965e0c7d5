// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pattern renderer.

use alloc::boxed::Box;
use alloc::string::String;
use understory_vector_scene::{NodeId, Scene};

use crate::descriptor::{FillValue, PatternDescriptor};
use crate::store::{IdSource, PaintDefinitionStore};
use crate::strategy::{FillStrategy, RendererCapabilities, strategy_for};

/// Resolves fills for the elements of one vector scene.
///
/// The fill strategy is chosen once, at construction, from the renderer's
/// [`RendererCapabilities`].
///
/// # Example
///
/// ```rust
/// use kurbo::Rect;
/// use understory_pattern_fill::{PatternDescriptor, PatternRenderer, RendererCapabilities};
///
/// let mut renderer = PatternRenderer::new(RendererCapabilities::SVG, "demo");
/// let bar = renderer.scene_mut().rect(Rect::new(0.0, 0.0, 20.0, 80.0));
/// let root = renderer.scene().root();
/// renderer.scene_mut().append(root, bar);
///
/// renderer.set_fill(bar, PatternDescriptor::path("M 0 0 L 10 10"));
/// assert_eq!(renderer.scene().attr(bar, "fill"), Some("url(#demo-pattern-0)"));
/// ```
#[derive(Debug)]
pub struct PatternRenderer {
    scene: Scene,
    store: PaintDefinitionStore,
    strategy: Box<dyn FillStrategy>,
    capabilities: RendererCapabilities,
}

impl PatternRenderer {
    /// Creates a renderer with an empty scene and its own identifier counter.
    pub fn new(capabilities: RendererCapabilities, namespace: impl Into<String>) -> Self {
        Self::with_id_source(capabilities, namespace, IdSource::new())
    }

    /// Creates a renderer drawing identifiers from a shared counter.
    pub fn with_id_source(
        capabilities: RendererCapabilities,
        namespace: impl Into<String>,
        ids: IdSource,
    ) -> Self {
        Self {
            scene: Scene::new(),
            store: PaintDefinitionStore::with_id_source(namespace, ids),
            strategy: strategy_for(capabilities),
            capabilities,
        }
    }

    /// Creates a renderer around a caller-built strategy.
    ///
    /// This is how a custom [`SolidFill`](crate::SolidFill) primitive is
    /// decorated. `capabilities` is recorded as given.
    pub fn with_strategy(
        capabilities: RendererCapabilities,
        store: PaintDefinitionStore,
        strategy: Box<dyn FillStrategy>,
    ) -> Self {
        Self {
            scene: Scene::new(),
            store,
            strategy,
            capabilities,
        }
    }

    /// What the target surface can express.
    #[inline]
    pub fn capabilities(&self) -> RendererCapabilities {
        self.capabilities
    }

    /// Sets the fill of `element`.
    ///
    /// Callers need not know whether `value` ends up as a plain color or a
    /// pattern reference.
    pub fn set_fill(&mut self, element: NodeId, value: impl Into<FillValue>) {
        let value = value.into();
        self.strategy
            .set_fill(&mut self.scene, &mut self.store, element, &value);
    }

    /// Registers a pattern without assigning it, returning its identifier.
    ///
    /// Elements can then use it with a `url(#id)` fill.
    pub fn add_pattern(&mut self, id: Option<&str>, descriptor: &PatternDescriptor) -> String {
        self.strategy
            .register_pattern(&mut self.scene, &mut self.store, id, descriptor)
    }

    /// Sets the document base prepended to references.
    pub fn set_url_base(&mut self, base: impl Into<String>) {
        self.store.set_url_base(base);
    }

    /// The scene.
    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene, mutably.
    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The definitions registered so far.
    #[inline]
    pub fn store(&self) -> &PaintDefinitionStore {
        &self.store
    }

    /// Serializes the scene as a standalone SVG document.
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        self.scene.to_svg(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{SolidFill, SvgFill};
    use kurbo::Rect;

    fn bar(renderer: &mut PatternRenderer) -> NodeId {
        let scene = renderer.scene_mut();
        let bar = scene.rect(Rect::new(0.0, 0.0, 10.0, 40.0));
        scene.append(scene.root(), bar);
        bar
    }

    #[test]
    fn capabilities_pick_the_strategy_once() {
        let mut svg = PatternRenderer::new(RendererCapabilities::SVG, "a");
        let mut legacy = PatternRenderer::new(RendererCapabilities::LEGACY, "b");
        let pattern = PatternDescriptor::image("tile.png");

        let element = bar(&mut svg);
        svg.set_fill(element, pattern.clone());
        assert_eq!(svg.scene().attr(element, "fill"), Some("url(#a-pattern-0)"));

        let element = bar(&mut legacy);
        legacy.set_fill(element, pattern);
        assert_eq!(legacy.scene().attr(element, "fill"), None);
        assert!(legacy.scene().find_child(element, "fill").is_some());
        assert_eq!(legacy.capabilities(), RendererCapabilities::LEGACY);
    }

    #[test]
    fn url_base_reaches_references() {
        let mut renderer = PatternRenderer::new(RendererCapabilities::SVG, "a");
        renderer.set_url_base("/report");
        let element = bar(&mut renderer);
        renderer.set_fill(element, PatternDescriptor::solid("red"));
        assert_eq!(
            renderer.scene().attr(element, "fill"),
            Some("url(/report#a-pattern-0)")
        );
    }

    #[derive(Debug)]
    struct Uppercase;

    impl SolidFill for Uppercase {
        fn apply(&self, scene: &mut Scene, element: NodeId, color: Option<&str>) {
            let color = color.map(str::to_uppercase);
            scene.set_attr(element, "fill", color.as_deref().unwrap_or("NONE"));
        }
    }

    #[test]
    fn custom_primitives_are_decorated() {
        let mut renderer = PatternRenderer::with_strategy(
            RendererCapabilities::SVG,
            PaintDefinitionStore::new("c"),
            Box::new(SvgFill::new(Uppercase)),
        );
        let element = bar(&mut renderer);

        renderer.set_fill(element, "#abcdef");
        assert_eq!(renderer.scene().attr(element, "fill"), Some("#ABCDEF"));

        renderer.set_fill(element, PatternDescriptor::path("M 0 0"));
        assert_eq!(renderer.scene().attr(element, "fill"), Some("url(#c-pattern-0)"));
    }
}
