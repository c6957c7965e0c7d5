// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_vector_scene --heading-base-level=0

//! Understory Vector Scene: a retained, SVG-shaped node tree.
//!
//! This crate provides the small capability surface that paint and fill
//! code needs from a vector document:
//!
//! - create named elements ([`Scene::create_element`]) and convenience
//!   primitives ([`Scene::rect`], [`Scene::path`], [`Scene::image`]);
//! - set, read, and remove attributes ([`Scene::set_attr`], [`Scene::attr`]);
//! - build the hierarchy ([`Scene::append`], [`Scene::detach`],
//!   [`Scene::reattach`]);
//! - obtain the document-wide definitions container ([`Scene::defs`]);
//! - serialize to SVG markup ([`Scene::to_svg`], [`Scene::markup`]).
//!
//! It does not lay out, rasterize, or load images; image elements only carry
//! their reference.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_vector_scene::Scene;
//!
//! let mut scene = Scene::new();
//! let bar = scene.rect(Rect::new(0.0, 0.0, 40.0, 120.0));
//! scene.set_attr(bar, "fill", "#7cb5ec");
//! scene.append(scene.root(), bar);
//!
//! let svg = scene.to_svg(200, 200);
//! assert!(svg.contains("fill=\"#7cb5ec\""));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod markup;
mod node;
mod scene;

pub use node::{AttrValue, NodeId, fmt_number};
pub use scene::Scene;
