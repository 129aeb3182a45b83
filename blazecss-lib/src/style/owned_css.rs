// src/style/owned_css.rs
// A fully-owned stylesheet tree. Nodes live in an arena and link to each other
// by index so the engine can insert, clone and remove rules while walking.
use std::fmt;

use crate::inherit::scope::Scope;

/// Handle to a node inside an [`OwnedStylesheet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// 1-based line and column of a node in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    /// `@media screen`, `@supports (display: grid)`, ...
    AtRule { name: String, params: String },
    Rule {
        /// Comma separated selector list, e.g. ".foo,\n.bar"
        selector: String,
        /// Scope assigned when the rule was copied into a conditional block.
        scope_hint: Option<Scope>,
    },
    Declaration {
        property: String,
        value: String,
        important: bool,
    },
}

#[derive(Debug, Clone)]
pub struct OwnedNode {
    pub kind: NodeKind,
    pub source: Option<SourceLocation>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl OwnedNode {
    fn new(kind: NodeKind) -> Self {
        OwnedNode {
            kind,
            source: None,
            parent: None,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OwnedStylesheet {
    nodes: Vec<Option<OwnedNode>>,
    root: NodeId,
}

impl Default for OwnedStylesheet {
    fn default() -> Self {
        Self::new()
    }
}

impl OwnedStylesheet {
    pub fn new() -> Self {
        OwnedStylesheet {
            nodes: vec![Some(OwnedNode::new(NodeKind::Root))],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&OwnedNode> {
        self.nodes.get(id.0).and_then(|slot| slot.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut OwnedNode> {
        self.nodes.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.get(id).map(|node| &node.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.get(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    pub fn source(&self, id: NodeId) -> Option<SourceLocation> {
        self.get(id).and_then(|node| node.source)
    }

    pub fn set_source(&mut self, id: NodeId, source: SourceLocation) {
        if let Some(node) = self.get_mut(id) {
            node.source = Some(source);
        }
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    // ------------------------------
    // Building
    // ------------------------------

    fn allocate(&mut self, node: OwnedNode) -> NodeId {
        self.nodes.push(Some(node));
        NodeId(self.nodes.len() - 1)
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.allocate(OwnedNode::new(kind));
        self.attach(parent, id, None);
        id
    }

    pub fn append_at_rule(&mut self, parent: NodeId, name: &str, params: &str) -> NodeId {
        self.append(
            parent,
            NodeKind::AtRule {
                name: name.to_string(),
                params: params.to_string(),
            },
        )
    }

    pub fn append_rule(&mut self, parent: NodeId, selector: &str) -> NodeId {
        self.append(
            parent,
            NodeKind::Rule {
                selector: selector.to_string(),
                scope_hint: None,
            },
        )
    }

    pub fn append_declaration(&mut self, parent: NodeId, property: &str, value: &str) -> NodeId {
        self.append(
            parent,
            NodeKind::Declaration {
                property: property.to_string(),
                value: value.to_string(),
                important: false,
            },
        )
    }

    pub fn append_important_declaration(
        &mut self,
        parent: NodeId,
        property: &str,
        value: &str,
    ) -> NodeId {
        self.append(
            parent,
            NodeKind::Declaration {
                property: property.to_string(),
                value: value.to_string(),
                important: true,
            },
        )
    }

    // ------------------------------
    // Accessors
    // ------------------------------

    pub fn selector(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Rule { selector, .. } => Some(selector),
            _ => None,
        }
    }

    pub fn set_selector(&mut self, id: NodeId, new_selector: String) {
        if let Some(NodeKind::Rule { selector, .. }) = self.get_mut(id).map(|n| &mut n.kind) {
            *selector = new_selector;
        }
    }

    pub fn scope_hint(&self, id: NodeId) -> Option<&Scope> {
        match self.kind(id)? {
            NodeKind::Rule { scope_hint, .. } => scope_hint.as_ref(),
            _ => None,
        }
    }

    pub fn set_scope_hint(&mut self, id: NodeId, scope: Scope) {
        if let Some(NodeKind::Rule { scope_hint, .. }) = self.get_mut(id).map(|n| &mut n.kind) {
            *scope_hint = Some(scope);
        }
    }

    /// `(property, value)` of a declaration node.
    pub fn declaration(&self, id: NodeId) -> Option<(&str, &str)> {
        match self.kind(id)? {
            NodeKind::Declaration {
                property, value, ..
            } => Some((property, value)),
            _ => None,
        }
    }

    pub fn set_declaration_value(&mut self, id: NodeId, new_value: String) {
        if let Some(NodeKind::Declaration { value, .. }) = self.get_mut(id).map(|n| &mut n.kind) {
            *value = new_value;
        }
    }

    pub fn at_rule_params(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::AtRule { params, .. } => Some(params),
            _ => None,
        }
    }

    pub fn is_rule(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Rule { .. }))
    }

    pub fn is_at_rule(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::AtRule { .. }))
    }

    // ------------------------------
    // Traversal
    // ------------------------------

    /// The node following `id` in document order, staying inside `within`.
    /// Reads the current links, so it is safe to call after mutating the tree.
    pub fn next_in_order(&self, within: NodeId, id: NodeId) -> Option<NodeId> {
        if let Some(&first) = self.children(id).first() {
            return Some(first);
        }
        self.next_after_subtree(within, id)
    }

    /// Like [`next_in_order`](Self::next_in_order) but skips the children of `id`.
    pub fn next_after_subtree(&self, within: NodeId, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        while current != within {
            let parent = self.parent(current)?;
            let siblings = self.children(parent);
            let index = siblings.iter().position(|&child| child == current)?;
            if let Some(&next) = siblings.get(index + 1) {
                return Some(next);
            }
            current = parent;
        }
        None
    }

    /// All nodes below `within` in document order (`within` excluded).
    pub fn descendants(&self, within: NodeId) -> Descendants<'_> {
        Descendants {
            sheet: self,
            within,
            cursor: self.next_in_order(within, within),
        }
    }

    /// All rules in the whole document.
    pub fn rules(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(self.root).filter(|&id| self.is_rule(id))
    }

    // ------------------------------
    // Structural mutation
    // ------------------------------

    fn attach(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            match index {
                Some(i) => node.children.insert(i, child),
                None => node.children.push(child),
            }
        }
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(node) = self.get_mut(parent) {
            node.children.retain(|&child| child != id);
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = None;
        }
    }

    /// Deep copy of the subtree at `id`. The copy is detached; place it with
    /// [`insert_before`](Self::insert_before).
    pub fn clone_subtree(&mut self, id: NodeId) -> Option<NodeId> {
        let node = self.get(id)?;
        let kind = node.kind.clone();
        let source = node.source;
        let children = node.children.clone();

        let copy = self.allocate(OwnedNode {
            kind,
            source,
            parent: None,
            children: Vec::new(),
        });
        for child in children {
            if let Some(child_copy) = self.clone_subtree(child) {
                self.attach(copy, child_copy, None);
            }
        }
        Some(copy)
    }

    /// Moves `node` so it becomes the sibling immediately before `sibling`.
    /// Returns false when `sibling` has no parent.
    pub fn insert_before(&mut self, sibling: NodeId, node: NodeId) -> bool {
        if node == sibling || !self.contains(node) {
            return false;
        }
        let Some(parent) = self.parent(sibling) else {
            return false;
        };
        self.detach(node);
        let index = self
            .children(parent)
            .iter()
            .position(|&child| child == sibling)
            .unwrap_or(0);
        self.attach(parent, node, Some(index));
        true
    }

    /// Unlinks `id` from its parent and frees its whole subtree.
    /// The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.contains(id) {
            return false;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current.0).and_then(|slot| slot.take()) {
                stack.extend(node.children);
            }
        }
        true
    }

    /// Removes `id`, then every ancestor left without children, stopping at
    /// the first ancestor that still has children or at the root.
    pub fn remove_with_empty_ancestors(&mut self, id: NodeId) {
        let mut parent = self.parent(id);
        self.remove(id);
        while let Some(current) = parent {
            if current == self.root || !self.children(current).is_empty() {
                break;
            }
            parent = self.parent(current);
            self.remove(current);
        }
    }
}

pub struct Descendants<'a> {
    sheet: &'a OwnedStylesheet,
    within: NodeId,
    cursor: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.cursor?;
        self.cursor = self.sheet.next_in_order(self.within, current);
        Some(current)
    }
}
