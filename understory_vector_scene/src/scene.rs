// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained node tree.

use alloc::borrow::Cow;
use alloc::vec::Vec;
use kurbo::Rect;

use crate::node::{AttrValue, Node, NodeId};

/// A retained, SVG-shaped node tree.
///
/// The scene always has a root `<svg>` element. Nodes are created detached
/// and become part of the document once appended to the root or one of its
/// descendants. A single shared `<defs>` container is created on demand by
/// [`Scene::defs`] and kept as the first child of the root.
///
/// Operations on a [`NodeId`] from another scene are ignored: getters return
/// `None` and mutators do nothing.
#[derive(Clone, Debug)]
pub struct Scene {
    nodes: Vec<Node>,
    root: NodeId,
    defs: Option<NodeId>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates a scene containing only the root `<svg>` element.
    pub fn new() -> Self {
        let mut root = Node::new(Cow::Borrowed("svg"));
        root.set_attr(
            Cow::Borrowed("xmlns"),
            "http://www.w3.org/2000/svg".into(),
        );
        Self {
            nodes: alloc::vec![root],
            root: NodeId(0),
            defs: None,
        }
    }

    /// Returns the root `<svg>` element.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the number of nodes ever created, attached or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the scene holds nothing but its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Creates a detached element with the given tag name.
    pub fn create_element(&mut self, tag: impl Into<Cow<'static, str>>) -> NodeId {
        let id = u32::try_from(self.nodes.len()).expect("Scene: too many nodes for u32 NodeId");
        self.nodes.push(Node::new(tag.into()));
        NodeId(id)
    }

    /// Returns the tag name of a node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.tag.as_ref())
    }

    /// Sets (or replaces) an attribute.
    pub fn set_attr(
        &mut self,
        id: NodeId,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<AttrValue>,
    ) {
        if let Some(node) = self.node_mut(id) {
            node.set_attr(name.into(), value.into().into_string());
        }
    }

    /// Returns the value of an attribute.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).and_then(|n| n.attr(name))
    }

    /// Removes an attribute, returning its previous value.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<alloc::string::String> {
        self.node_mut(id).and_then(|n| n.remove_attr(name))
    }

    /// Iterates over the attributes of a node in insertion order.
    pub fn attrs(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.node(id)
            .into_iter()
            .flat_map(|n| n.attrs.iter().map(|(k, v)| (k.as_ref(), v.as_str())))
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is detached from it first.
    /// Appending a node to itself or to one of its descendants is ignored.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        if self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        if self.is_ancestor_or_self(child, parent) {
            return;
        }
        self.detach(child);
        self.nodes[parent.idx()].children.push(child);
        let node = &mut self.nodes[child.idx()];
        node.parent = Some(parent);
        node.attach_count += 1;
    }

    /// Removes `child` from its parent, keeping it (and its subtree) alive.
    ///
    /// Returns `false` if the node had no parent.
    pub fn detach(&mut self, child: NodeId) -> bool {
        let Some(parent) = self.node(child).and_then(|n| n.parent) else {
            return false;
        };
        self.nodes[parent.idx()].children.retain(|c| *c != child);
        self.nodes[child.idx()].parent = None;
        true
    }

    /// Detaches a node and attaches it again at the same position.
    ///
    /// Some display surfaces only pick up changes to a node's children when
    /// the node itself is re-inserted. Returns `false` if the node had no
    /// parent.
    pub fn reattach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.node(id).and_then(|n| n.parent) else {
            return false;
        };
        let Some(pos) = self.nodes[parent.idx()]
            .children
            .iter()
            .position(|c| *c == id)
        else {
            return false;
        };
        self.nodes[parent.idx()].children.remove(pos);
        self.nodes[parent.idx()].children.insert(pos, id);
        self.nodes[id.idx()].attach_count += 1;
        true
    }

    /// Returns how many times a node has been attached to a parent.
    pub fn attach_count(&self, id: NodeId) -> u32 {
        self.node(id).map_or(0, |n| n.attach_count)
    }

    /// Returns the children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Returns the parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Returns the first child of `id` with the given tag name.
    pub fn find_child(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|c| self.tag(*c) == Some(tag))
    }

    /// Returns the first descendant whose `id` attribute equals `element_id`.
    pub fn find_by_id(&self, element_id: &str) -> Option<NodeId> {
        let mut stack = alloc::vec![self.root];
        while let Some(id) = stack.pop() {
            if self.attr(id, "id") == Some(element_id) {
                return Some(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        None
    }

    /// Returns the shared `<defs>` container, creating it on first use.
    ///
    /// The container is inserted as the first child of the root so that
    /// definitions precede every element that references them.
    pub fn defs(&mut self) -> NodeId {
        if let Some(defs) = self.defs {
            return defs;
        }
        let defs = self.create_element("defs");
        let root = self.root;
        self.nodes[root.idx()].children.insert(0, defs);
        let node = &mut self.nodes[defs.idx()];
        node.parent = Some(root);
        node.attach_count += 1;
        self.defs = Some(defs);
        defs
    }

    /// Returns the `<defs>` container if it has been created.
    #[inline]
    pub fn existing_defs(&self) -> Option<NodeId> {
        self.defs
    }

    /// Creates a detached `<rect>` covering `rect`.
    pub fn rect(&mut self, rect: Rect) -> NodeId {
        let id = self.create_element("rect");
        self.set_attr(id, "x", rect.x0);
        self.set_attr(id, "y", rect.y0);
        self.set_attr(id, "width", rect.width());
        self.set_attr(id, "height", rect.height());
        id
    }

    /// Creates a detached `<path>` with the given path data.
    pub fn path(&mut self, d: impl Into<AttrValue>) -> NodeId {
        let id = self.create_element("path");
        self.set_attr(id, "d", d);
        id
    }

    /// Creates a detached `<image>` referencing `href`, placed in `rect`.
    ///
    /// The image is referenced, never loaded or decoded.
    pub fn image(&mut self, href: impl Into<AttrValue>, rect: Rect) -> NodeId {
        let id = self.create_element("image");
        self.set_attr(id, "x", rect.x0);
        self.set_attr(id, "y", rect.y0);
        self.set_attr(id, "width", rect.width());
        self.set_attr(id, "height", rect.height());
        self.set_attr(id, "href", href);
        id
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.idx())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.idx())
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent(id) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }
}
