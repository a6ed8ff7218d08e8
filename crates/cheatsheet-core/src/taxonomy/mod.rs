//! Keyword taxonomy.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Each parent keeps
//! a keyword -> child edge map for lookups plus an ordered child list, so
//! listings come back in the order keywords were first created. Slot 0 is the
//! unnamed root. Detached nodes leave a tombstone; ids are never reused.

use std::collections::HashMap;

mod codec;
mod restructure;
mod suggest;

#[cfg(test)]
mod tests;

pub use suggest::{DEFAULT_SUGGESTION_LIMIT, DEFAULT_SUGGESTION_RATIO, PathSuggestion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: Self = Self(0);

    const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct KeywordNode {
    keyword: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl KeywordNode {
    fn new(keyword: String, parent: Option<NodeId>) -> Self {
        Self {
            keyword,
            parent,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Taxonomy {
    nodes: Vec<Option<KeywordNode>>,
    edges: HashMap<NodeId, HashMap<String, NodeId>>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Taxonomy {
    fn eq(&self, other: &Self) -> bool {
        self.all_paths() == other.all_paths()
    }
}

impl Eq for Taxonomy {}

impl Taxonomy {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(KeywordNode::new(String::new(), None))],
            edges: HashMap::new(),
        }
    }

    /// Builds a taxonomy containing every path in `paths`.
    pub fn from_paths<I, P, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut taxonomy = Self::new();
        for path in paths {
            taxonomy.ensure_path_exists(path.as_ref());
        }
        taxonomy
    }

    /// Number of live keyword nodes, root excluded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count().saturating_sub(1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<NodeId> {
        let mut current = NodeId::ROOT;
        for keyword in path {
            current = self.child(current, keyword.as_ref())?;
        }
        Some(current)
    }

    #[must_use]
    pub fn contains_path<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.resolve(path).is_some()
    }

    #[must_use]
    pub fn child(&self, parent: NodeId, keyword: &str) -> Option<NodeId> {
        self.edges.get(&parent)?.get(keyword).copied()
    }

    #[must_use]
    pub fn keyword(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|node| node.keyword.as_str())
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Root-first keyword path of a live node. The root maps to `[]`.
    #[must_use]
    pub fn path_of(&self, id: NodeId) -> Option<Vec<String>> {
        let mut path = Vec::new();
        let mut current = self.node(id)?;
        while let Some(parent) = current.parent {
            path.push(current.keyword.clone());
            current = self.node(parent)?;
        }
        path.reverse();
        Some(path)
    }

    /// Walks `path` from the root, creating missing nodes. Idempotent.
    pub fn ensure_path_exists<S: AsRef<str>>(&mut self, path: &[S]) -> NodeId {
        let mut current = NodeId::ROOT;
        for keyword in path {
            current = self.ensure_child(current, keyword.as_ref());
        }
        current
    }

    /// Immediate child keywords of `path` in creation order; empty when the
    /// path is unknown.
    #[must_use]
    pub fn get_children<S: AsRef<str>>(&self, path: &[S]) -> Vec<String> {
        let Some(id) = self.resolve(path) else {
            return Vec::new();
        };
        self.child_keywords(id)
            .map(ToString::to_string)
            .collect()
    }

    pub fn child_keywords(&self, id: NodeId) -> impl Iterator<Item = &str> + '_ {
        self.child_ids(id)
            .iter()
            .filter_map(|child| self.keyword(*child))
    }

    /// Every node path in depth-first pre-order, siblings in creation order.
    #[must_use]
    pub fn all_paths(&self) -> Vec<Vec<String>> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        self.collect_paths(NodeId::ROOT, &mut prefix, &mut out);
        out
    }

    fn collect_paths(&self, id: NodeId, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
        for child in self.child_ids(id) {
            let Some(keyword) = self.keyword(*child) else {
                continue;
            };
            prefix.push(keyword.to_string());
            out.push(prefix.clone());
            self.collect_paths(*child, prefix, out);
            prefix.pop();
        }
    }

    fn ensure_child(&mut self, parent: NodeId, keyword: &str) -> NodeId {
        if let Some(existing) = self.child(parent, keyword) {
            return existing;
        }
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes
            .push(Some(KeywordNode::new(keyword.to_string(), Some(parent))));
        self.attach(parent, id, keyword);
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, keyword: &str) {
        self.edges
            .entry(parent)
            .or_default()
            .insert(keyword.to_string(), child);
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
    }

    /// Unlinks `id` from its parent. The node and its subtree stay allocated.
    fn detach(&mut self, id: NodeId) {
        let Some(node) = self.node(id) else {
            return;
        };
        let Some(parent) = node.parent else {
            return;
        };
        let keyword = node.keyword.clone();
        let mut drop_edges = false;
        if let Some(children) = self.edges.get_mut(&parent) {
            children.remove(&keyword);
            drop_edges = children.is_empty();
        }
        if drop_edges {
            self.edges.remove(&parent);
        }
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.retain(|child| *child != id);
        }
    }

    fn tombstone(&mut self, id: NodeId) {
        if id == NodeId::ROOT {
            return;
        }
        self.edges.remove(&id);
        if let Some(slot) = self.nodes.get_mut(id.index()) {
            *slot = None;
        }
    }

    fn child_ids(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |node| node.children.as_slice())
    }

    fn node(&self, id: NodeId) -> Option<&KeywordNode> {
        self.nodes.get(id.index())?.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut KeywordNode> {
        self.nodes.get_mut(id.index())?.as_mut()
    }
}

/// Keywords are stored without surrounding whitespace.
pub(crate) fn trim_keyword(keyword: &str) -> String {
    keyword.trim().to_string()
}

/// True when `prefix` is a positional prefix of `full_path`. The empty prefix
/// matches every path.
#[must_use]
pub fn is_prefix<A, B>(prefix: &[A], full_path: &[B]) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    prefix.len() <= full_path.len()
        && prefix
            .iter()
            .zip(full_path)
            .all(|(wanted, actual)| wanted.as_ref() == actual.as_ref())
}
