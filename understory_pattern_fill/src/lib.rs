// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pattern_fill --heading-base-level=0

//! Understory Pattern Fill: tiled pattern fills for vector chart scenes.
//!
//! Chart code assigns fills without caring what kind of paint they are. A
//! [`FillValue`] is either a plain color or a [`PatternDescriptor`] (path
//! geometry, a referenced image, or a flat-color tile, optionally over a
//! background); [`PatternRenderer::set_fill`] turns it into attributes and
//! definitions in an [`understory_vector_scene::Scene`].
//!
//! The pieces, leaf first:
//!
//! - [`PaintDefinitionStore`] owns the shared `<defs>` container, hands out
//!   identifiers from an [`IdSource`], and formats `url(<base>#<id>)`
//!   references.
//! - [`PatternBuilder`] materializes a descriptor as a `<pattern>` definition.
//! - [`FillStrategy`] decorates a surface's [`SolidFill`] primitive. [`SvgFill`]
//!   serves surfaces with native patterns; [`LegacyFill`] emulates image tiling
//!   with a `<fill>` override child and degrades path patterns to a flat
//!   color. [`strategy_for`] picks one from [`RendererCapabilities`].
//! - [`PredefinedPatterns`] is the catalog of ten built-in geometries, stroked
//!   with the chart [`Palette`].
//! - [`Chart`] sets up a renderer from [`ChartOptions`]: built-in patterns
//!   first, then declared ones.
//!
//! Definitions are never deduplicated: every pattern fill creates a new one.
//! Nothing here fails; unrenderable input degrades to a neutral gray or an
//! empty tile and is reported through the `log` facade.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_pattern_fill::{Chart, ChartOptions, PatternDescriptor, RendererCapabilities};
//!
//! let mut chart = Chart::new(&ChartOptions::default(), RendererCapabilities::SVG);
//!
//! let scene = chart.renderer_mut().scene_mut();
//! let bar = scene.rect(Rect::new(0.0, 0.0, 20.0, 80.0));
//! scene.append(scene.root(), bar);
//!
//! chart.set_fill(bar, "url(#understory-default-pattern-2)");
//! chart.set_fill(
//!     bar,
//!     PatternDescriptor::image("tile.png").with_size(6.0, 6.0).with_opacity(0.5),
//! );
//!
//! let svg = chart.renderer().to_svg(200, 100);
//! assert!(svg.contains("<pattern id=\"understory-pattern-0\""));
//! assert!(svg.contains("fill=\"url(#understory-pattern-0)\""));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo` and `peniko`.
//! - `libm`: float math for `no_std` builds.
//! - `serde` (default): deserialize [`ChartOptions`] and [`FillValue`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod builder;
mod catalog;
mod chart;
mod descriptor;
mod options;
mod palette;
mod renderer;
mod store;
mod strategy;

pub use builder::PatternBuilder;
pub use catalog::{DEFAULT_PATTERN_PATHS, PredefinedPatterns, default_pattern_id};
pub use chart::Chart;
pub use descriptor::{
    DEFAULT_PATH_FILL, DEFAULT_STROKE, DEFAULT_STROKE_WIDTH, DEFAULT_TILE_SIZE, FillValue,
    ImagePattern, NEUTRAL_GRAY, PathPattern, PathSpec, PatternContent, PatternDescriptor,
};
pub use options::{ChartOptions, DefsOptions, PathDeclaration, PatternDeclaration};
pub use palette::{DEFAULT_COLORS, Palette, css_color};
pub use renderer::PatternRenderer;
pub use store::{DEFAULT_NAMESPACE, IdSource, PaintDefinition, PaintDefinitionStore};
pub use strategy::{
    FillStrategy, LegacyFill, LegacySolidFill, RendererCapabilities, SolidFill, SvgFill,
    SvgSolidFill, strategy_for,
};
