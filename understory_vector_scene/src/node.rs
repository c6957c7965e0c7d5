// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node handles, attribute values, and per-node storage.

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use smallvec::SmallVec;

/// Identifier for a node in a [`Scene`](crate::Scene).
///
/// This is a small, opaque handle that is stable for the lifetime of the
/// scene. Nodes are never freed; detaching a node only removes it from its
/// parent's child list.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A formatted attribute value.
///
/// Numbers are formatted the way SVG export expects them: integral values
/// without a fractional part, everything else with at most three decimals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttrValue(String);

impl AttrValue {
    /// Returns the formatted value.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the value and returns the formatted string.
    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self(String::from(value))
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self(fmt_number(value))
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        Self(fmt_number(f64::from(value)))
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        Self(format!("{value}"))
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        Self(format!("{value}"))
    }
}

/// Formats a scalar for SVG output.
///
/// Integral values print without a decimal point; other finite values are
/// rounded to three decimals with trailing zeros removed.
pub fn fmt_number(v: f64) -> String {
    if v.is_finite() {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "best-effort pretty formatting"
        )]
        let i = v as i64;
        #[allow(clippy::cast_precision_loss, reason = "compared against the input")]
        let diff = (i as f64) - v;
        if diff > -1e-9 && diff < 1e-9 {
            return format!("{i}");
        }
    } else {
        return format!("{v}");
    }

    let mut s = format!("{v:.3}");
    while s.contains('.') && s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

pub(crate) type Attribute = (Cow<'static, str>, String);

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) tag: Cow<'static, str>,
    pub(crate) attrs: SmallVec<[Attribute; 4]>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    /// Number of times this node has been attached to a parent.
    pub(crate) attach_count: u32,
}

impl Node {
    pub(crate) fn new(tag: Cow<'static, str>) -> Self {
        Self {
            tag,
            attrs: SmallVec::new(),
            children: Vec::new(),
            parent: None,
            attach_count: 0,
        }
    }

    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn set_attr(&mut self, name: Cow<'static, str>, value: String) {
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    pub(crate) fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|(k, _)| k == name)?;
        Some(self.attrs.remove(pos).1)
    }
}
