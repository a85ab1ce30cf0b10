use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// External node identifier, stable across copies and serialization.
pub type NodeId = u64;

/// Disambiguates parallel edges between the same ordered pair of nodes.
pub type EdgeKey = u64;

/// Attributes attached to a node.
///
/// `labels` is the well-known field used by the readers, savers and label
/// strategies; anything else goes into `extra`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAttrs {
    pub labels: Vec<String>,
    pub extra: BTreeMap<String, String>,
}

impl NodeAttrs {
    pub fn labeled<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NodeAttrs {
            labels: labels.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// Attributes attached to an edge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeAttrs {
    pub label: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl EdgeAttrs {
    pub fn labeled<S: Into<String>>(label: S) -> Self {
        EdgeAttrs {
            label: Some(label.into()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct NodeData {
    pub(crate) id: NodeId,
    pub(crate) attrs: NodeAttrs,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct EdgeData {
    pub(crate) key: EdgeKey,
    pub(crate) attrs: EdgeAttrs,
}

/// Borrowed view of one edge: endpoints in their original orientation,
/// per-pair key and attributes.
#[derive(Clone, Copy, Debug)]
pub struct EdgeView<'a> {
    pub src: NodeId,
    pub dst: NodeId,
    pub key: EdgeKey,
    pub attrs: &'a EdgeAttrs,
}

impl EdgeView<'_> {
    /// The unique identity of this edge within its graph.
    pub fn identity(&self) -> (NodeId, NodeId, EdgeKey) {
        (self.src, self.dst, self.key)
    }
}

/// Directed labeled multigraph over a petgraph adjacency structure.
///
/// Nodes carry stable external ids; parallel edges between the same ordered
/// pair are disambiguated by an [`EdgeKey`]. `(src, dst, key)` is unique within
/// a graph and self-loops are permitted. Nodes are never removed, so iteration
/// order over nodes is insertion order.
///
/// Cloning produces a fully independent copy, attribute maps included.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Multigraph {
    graph: DiGraph<NodeData, EdgeData>,
    node_lookup: HashMap<NodeId, NodeIndex>,
    edge_lookup: HashMap<(NodeId, NodeId, EdgeKey), EdgeIndex>,
}

impl Default for Multigraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Multigraph {
    pub fn new() -> Self {
        Multigraph {
            graph: DiGraph::new(),
            node_lookup: HashMap::new(),
            edge_lookup: HashMap::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_lookup.contains_key(&id)
    }

    pub fn contains_edge(&self, src: NodeId, dst: NodeId, key: EdgeKey) -> bool {
        self.edge_lookup.contains_key(&(src, dst, key))
    }

    /// Inserts a node, or replaces the attributes of an existing one.
    pub fn add_node(&mut self, id: NodeId, attrs: NodeAttrs) {
        match self.node_lookup.get(&id) {
            Some(&ix) => self.graph[ix].attrs = attrs,
            None => {
                let ix = self.graph.add_node(NodeData { id, attrs });
                self.node_lookup.insert(id, ix);
            }
        }
    }

    /// Inserts an edge and returns its key.
    ///
    /// With `key: None` a fresh key is assigned, scoped to the `(src, dst)`
    /// pair. An explicit key that is already in use fails with
    /// [`GraphError::DuplicateEdge`]. Missing endpoints are created with
    /// default attributes.
    pub fn add_edge(
        &mut self,
        src: NodeId,
        dst: NodeId,
        key: Option<EdgeKey>,
        attrs: EdgeAttrs,
    ) -> Result<EdgeKey, GraphError> {
        let key = match key {
            Some(key) => {
                if self.contains_edge(src, dst, key) {
                    return Err(GraphError::DuplicateEdge { src, dst, key });
                }
                key
            }
            None => self.next_key(src, dst),
        };

        self.ensure_node(src);
        self.ensure_node(dst);
        let src_ix = self.node_lookup[&src];
        let dst_ix = self.node_lookup[&dst];
        let edge_ix = self.graph.add_edge(src_ix, dst_ix, EdgeData { key, attrs });
        self.edge_lookup.insert((src, dst, key), edge_ix);
        Ok(key)
    }

    fn ensure_node(&mut self, id: NodeId) {
        if !self.contains_node(id) {
            self.add_node(id, NodeAttrs::default());
        }
    }

    fn next_key(&self, src: NodeId, dst: NodeId) -> EdgeKey {
        let mut key = self.edge_count_between(src, dst) as EdgeKey;
        while self.contains_edge(src, dst, key) {
            key += 1;
        }
        key
    }

    pub fn node_attrs(&self, id: NodeId) -> Option<&NodeAttrs> {
        self.node_lookup.get(&id).map(|&ix| &self.graph[ix].attrs)
    }

    pub fn node_attrs_mut(&mut self, id: NodeId) -> Option<&mut NodeAttrs> {
        let ix = *self.node_lookup.get(&id)?;
        Some(&mut self.graph[ix].attrs)
    }

    pub fn edge_attrs(&self, src: NodeId, dst: NodeId, key: EdgeKey) -> Option<&EdgeAttrs> {
        self.edge_lookup
            .get(&(src, dst, key))
            .map(|&ix| &self.graph[ix].attrs)
    }

    pub fn edge_attrs_mut(&mut self, src: NodeId, dst: NodeId, key: EdgeKey) -> Option<&mut EdgeAttrs> {
        let ix = *self.edge_lookup.get(&(src, dst, key))?;
        Some(&mut self.graph[ix].attrs)
    }

    /// Nodes with their attributes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NodeAttrs)> + '_ {
        self.graph.node_indices().map(move |ix| {
            let node = &self.graph[ix];
            (node.id, &node.attrs)
        })
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_indices().map(move |ix| self.graph[ix].id)
    }

    /// All edges with keys and attributes.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> + '_ {
        self.graph.edge_references().map(move |edge| EdgeView {
            src: self.graph[edge.source()].id,
            dst: self.graph[edge.target()].id,
            key: edge.weight().key,
            attrs: &edge.weight().attrs,
        })
    }

    /// Edges incident to `id` in either direction, each in its original
    /// orientation. A self-loop shows up twice; callers deduplicate via
    /// [`EdgeView::identity`]. Unknown nodes yield nothing.
    pub fn incident_edges(&self, id: NodeId) -> impl Iterator<Item = EdgeView<'_>> + '_ {
        let ix = self.node_lookup.get(&id).copied();
        let outgoing = ix
            .into_iter()
            .flat_map(move |ix| self.graph.edges_directed(ix, Direction::Outgoing));
        let incoming = ix
            .into_iter()
            .flat_map(move |ix| self.graph.edges_directed(ix, Direction::Incoming));
        outgoing.chain(incoming).map(move |edge| EdgeView {
            src: self.graph[edge.source()].id,
            dst: self.graph[edge.target()].id,
            key: edge.weight().key,
            attrs: &edge.weight().attrs,
        })
    }

    /// Distinct neighbors of `id`, considering both edge directions.
    pub fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        let &ix = self
            .node_lookup
            .get(&id)
            .ok_or(GraphError::NodeNotFound(id))?;
        Ok(self
            .graph
            .neighbors_undirected(ix)
            .map(|other| self.graph[other].id)
            .unique()
            .collect_vec())
    }

    /// Number of parallel edges from `src` to `dst`.
    pub fn edge_count_between(&self, src: NodeId, dst: NodeId) -> usize {
        match (self.node_lookup.get(&src), self.node_lookup.get(&dst)) {
            (Some(&s), Some(&d)) => self.graph.edges_connecting(s, d).count(),
            _ => 0,
        }
    }

    /// Keys of the parallel edges from `src` to `dst`, ascending.
    pub fn keys_between(&self, src: NodeId, dst: NodeId) -> Vec<EdgeKey> {
        match (self.node_lookup.get(&src), self.node_lookup.get(&dst)) {
            (Some(&s), Some(&d)) => self
                .graph
                .edges_connecting(s, d)
                .map(|edge| edge.weight().key)
                .sorted()
                .collect_vec(),
            _ => Vec::new(),
        }
    }

    pub(crate) fn inner(&self) -> &DiGraph<NodeData, EdgeData> {
        &self.graph
    }

    pub(crate) fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.node_lookup.get(&id).copied()
    }
}
