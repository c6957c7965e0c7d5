// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paint definition store and identifier allocation.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;
use hashbrown::HashMap;
use kurbo::Size;
use understory_vector_scene::{NodeId, Scene};

use crate::descriptor::PatternDescriptor;

/// Namespace used for generated identifiers when none is configured.
pub const DEFAULT_NAMESPACE: &str = "understory";

/// A monotonically increasing identifier counter.
///
/// Cloning an `IdSource` shares the counter: stores built from clones of the
/// same source never hand out the same number twice. A fresh source starts
/// at zero.
#[derive(Clone, Debug, Default)]
pub struct IdSource {
    next: Rc<Cell<u64>>,
}

impl IdSource {
    /// Creates a counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next number and advances the counter.
    pub fn next_value(&self) -> u64 {
        let value = self.next.get();
        self.next.set(value + 1);
        value
    }

    /// Returns how many numbers have been issued.
    #[inline]
    pub fn issued(&self) -> u64 {
        self.next.get()
    }
}

/// A registered, reusable paint resource.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintDefinition {
    id: String,
    size: Size,
    descriptor: PatternDescriptor,
    node: Option<NodeId>,
}

impl PaintDefinition {
    /// The document-unique identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Tile dimensions.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// The descriptor this definition was built from.
    #[inline]
    pub fn descriptor(&self) -> &PatternDescriptor {
        &self.descriptor
    }

    /// The `<pattern>` node inside the definitions container.
    ///
    /// `None` for surfaces without a definitions container, which keep the
    /// descriptor only.
    #[inline]
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }
}

/// Owner of every paint definition of one document.
///
/// The store holds the shared definitions container of the scene, hands out
/// identifiers of the form `<namespace>-pattern-<n>`, and formats references
/// to definitions. Definitions are never deduplicated: registering the same
/// descriptor twice yields two definitions.
#[derive(Debug)]
pub struct PaintDefinitionStore {
    namespace: String,
    url_base: String,
    ids: IdSource,
    defs: Option<NodeId>,
    definitions: Vec<PaintDefinition>,
    by_id: HashMap<String, usize>,
}

impl Default for PaintDefinitionStore {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl PaintDefinitionStore {
    /// Creates an empty store with its own identifier counter.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self::with_id_source(namespace, IdSource::new())
    }

    /// Creates an empty store drawing identifiers from `ids`.
    pub fn with_id_source(namespace: impl Into<String>, ids: IdSource) -> Self {
        Self {
            namespace: namespace.into(),
            url_base: String::new(),
            ids,
            defs: None,
            definitions: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// The identifier namespace.
    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The identifier counter.
    #[inline]
    pub fn id_source(&self) -> &IdSource {
        &self.ids
    }

    /// The document base prepended to references.
    #[inline]
    pub fn url_base(&self) -> &str {
        &self.url_base
    }

    /// Sets the document base prepended to references.
    ///
    /// Documents served with a `<base>` element need the page URL here so
    /// that `url(#id)` resolves against the document and not the base.
    pub fn set_url_base(&mut self, base: impl Into<String>) {
        self.url_base = base.into();
    }

    /// Allocates a fresh identifier.
    pub fn next_id(&mut self) -> String {
        format!("{}-pattern-{}", self.namespace, self.ids.next_value())
    }

    /// Formats the fill reference for a definition identifier.
    pub fn reference(&self, id: &str) -> String {
        format!("url({}#{})", self.url_base, id)
    }

    /// Returns the shared definitions container, creating it on first use.
    pub fn defs(&mut self, scene: &mut Scene) -> NodeId {
        *self.defs.get_or_insert_with(|| scene.defs())
    }

    /// Creates an empty `<pattern>` element in the definitions container and
    /// records it under `id`.
    ///
    /// The returned definition always has a [`node`](PaintDefinition::node).
    pub fn create_pattern(
        &mut self,
        scene: &mut Scene,
        id: String,
        descriptor: &PatternDescriptor,
    ) -> &PaintDefinition {
        let size = descriptor.size();
        let defs = self.defs(scene);
        let node = scene.create_element("pattern");
        scene.set_attr(node, "id", &id);
        scene.set_attr(node, "patternUnits", "userSpaceOnUse");
        scene.set_attr(node, "width", size.width);
        scene.set_attr(node, "height", size.height);
        scene.append(defs, node);
        self.record(id, size, descriptor.clone(), Some(node))
    }

    /// Records a definition that has no scene node.
    pub fn insert_detached(
        &mut self,
        id: String,
        descriptor: PatternDescriptor,
    ) -> &PaintDefinition {
        self.record(id, descriptor.size(), descriptor, None)
    }

    /// Returns the first definition registered under `id`.
    ///
    /// This is the definition a `url(#id)` reference resolves to in the
    /// serialized document.
    pub fn get(&self, id: &str) -> Option<&PaintDefinition> {
        self.by_id.get(id).map(|idx| &self.definitions[*idx])
    }

    /// Returns the number of definitions.
    #[inline]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if no definitions have been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterates over definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &PaintDefinition> + '_ {
        self.definitions.iter()
    }

    fn record(
        &mut self,
        id: String,
        size: Size,
        descriptor: PatternDescriptor,
        node: Option<NodeId>,
    ) -> &PaintDefinition {
        let idx = self.definitions.len();
        // Documents resolve `url(#id)` to the first element with that id.
        if self.by_id.contains_key(&id) {
            log::warn!("paint definition `{id}` registered again; references keep the first");
        } else {
            self.by_id.insert(id.clone(), idx);
        }
        log::debug!(
            "registered paint definition `{id}` ({}x{})",
            size.width,
            size.height
        );
        self.definitions.push(PaintDefinition {
            id,
            size,
            descriptor,
            node,
        });
        &self.definitions[idx]
    }
}
