// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart container setup.

use alloc::string::String;
use alloc::vec::Vec;
use understory_vector_scene::NodeId;

use crate::catalog::PredefinedPatterns;
use crate::descriptor::FillValue;
use crate::options::ChartOptions;
use crate::palette::Palette;
use crate::renderer::PatternRenderer;
use crate::store::IdSource;
use crate::strategy::RendererCapabilities;

/// A chart's rendering container with its pattern definitions in place.
///
/// Construction runs in a fixed order: the renderer (scene and definition
/// store) is created, then the ten built-in patterns are registered under
/// `<namespace>-default-pattern-<i>`, then every pattern declared in
/// `defs.patterns`.
///
/// # Example
///
/// ```rust
/// use understory_pattern_fill::{Chart, ChartOptions, RendererCapabilities};
///
/// let chart = Chart::new(&ChartOptions::default(), RendererCapabilities::SVG);
/// assert_eq!(chart.default_pattern_ids().len(), 10);
/// assert_eq!(chart.default_pattern_ids()[0], "understory-default-pattern-0");
/// ```
#[derive(Debug)]
pub struct Chart {
    renderer: PatternRenderer,
    palette: Palette,
    default_pattern_ids: Vec<String>,
    declared_pattern_ids: Vec<String>,
}

impl Chart {
    /// Sets up a chart with its own identifier counter.
    pub fn new(options: &ChartOptions, capabilities: RendererCapabilities) -> Self {
        Self::with_id_source(options, capabilities, IdSource::new())
    }

    /// Sets up a chart drawing identifiers from a shared counter.
    ///
    /// Charts rendered into one document should share an [`IdSource`] so that
    /// their generated identifiers never collide.
    pub fn with_id_source(
        options: &ChartOptions,
        capabilities: RendererCapabilities,
        ids: IdSource,
    ) -> Self {
        let mut renderer = PatternRenderer::with_id_source(capabilities, options.namespace(), ids);
        if let Some(base) = &options.url_base {
            renderer.set_url_base(base.clone());
        }

        let palette = options.palette();
        let default_pattern_ids = PredefinedPatterns.install(&mut renderer, &palette);
        let declared_pattern_ids: Vec<String> = options
            .patterns()
            .iter()
            .map(|declaration| {
                renderer.add_pattern(declaration.id.as_deref(), &declaration.to_descriptor())
            })
            .collect();

        log::debug!(
            "chart `{}` set up with {} built-in and {} declared patterns",
            options.namespace(),
            default_pattern_ids.len(),
            declared_pattern_ids.len()
        );

        Self {
            renderer,
            palette,
            default_pattern_ids,
            declared_pattern_ids,
        }
    }

    /// The renderer.
    #[inline]
    pub fn renderer(&self) -> &PatternRenderer {
        &self.renderer
    }

    /// The renderer, mutably.
    #[inline]
    pub fn renderer_mut(&mut self) -> &mut PatternRenderer {
        &mut self.renderer
    }

    /// The active palette.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Sets the fill of `element`; see [`PatternRenderer::set_fill`].
    pub fn set_fill(&mut self, element: NodeId, value: impl Into<FillValue>) {
        self.renderer.set_fill(element, value);
    }

    /// Identifiers of the built-in patterns, in catalog order.
    pub fn default_pattern_ids(&self) -> &[String] {
        &self.default_pattern_ids
    }

    /// Identifiers of the declared patterns, in declaration order.
    pub fn declared_pattern_ids(&self) -> &[String] {
        &self.declared_pattern_ids
    }
}
