// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG markup serialization.

use alloc::string::String;
use core::fmt::Write as _;

use crate::Scene;
use crate::node::NodeId;

impl Scene {
    /// Export the attached tree as an SVG document.
    ///
    /// `width`/`height` are used both as the SVG `width`/`height` attributes and to set
    /// `viewBox="0 0 width height"`.
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        let mut svg = String::new();
        let _ = write!(svg, "<svg");
        for (name, value) in self.attrs(self.root()) {
            write_attr(&mut svg, name, value);
        }
        let _ = writeln!(
            svg,
            " width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
        );
        for child in self.children(self.root()) {
            self.write_node(&mut svg, *child);
        }
        svg.push_str("</svg>");
        svg
    }

    /// Serializes a single node and its subtree.
    ///
    /// The node does not need to be attached.
    pub fn markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(&mut out, id);
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId) {
        let Some(tag) = self.tag(id) else {
            return;
        };
        let _ = write!(out, "<{tag}");
        for (name, value) in self.attrs(id) {
            write_attr(out, name, value);
        }
        let children = self.children(id);
        if children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in children {
            self.write_node(out, *child);
        }
        let _ = write!(out, "</{tag}>");
    }
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {name}=\"");
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}
