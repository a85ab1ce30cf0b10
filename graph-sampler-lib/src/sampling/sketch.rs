use std::collections::VecDeque;

use itertools::Itertools;
use log::debug;
use petgraph::graph::NodeIndex;
use rand::Rng;
use rayon::prelude::*;

use crate::error::GraphError;
use crate::multigraph::{Multigraph, NodeId};

/// Landmark distance sketch: one BFS distance column per landmark.
///
/// Rows follow the graph's node insertion order. Distances are hop counts over
/// the undirected view of the graph; nodes unreachable from a landmark hold
/// the sentinel value `node_count`, which exceeds any real distance since the
/// diameter is strictly below the node count.
///
/// The sketch is a compressed coordinate embedding: `L` BFS runs cost
/// `O(L * (V + E))` where exact all-pairs distances would cost `O(N)` runs.
/// It is scoped to one selection pass and never stored as graph state.
#[derive(Debug)]
pub struct DistanceSketch {
    node_ids: Vec<NodeId>,
    columns: Vec<Vec<u32>>,
}

impl DistanceSketch {
    /// Builds a sketch from `num_landmarks` nodes sampled uniformly without
    /// replacement. The landmark count is clamped to the node count; an empty
    /// graph yields an empty sketch.
    ///
    /// The BFS runs are independent and fill disjoint columns, so they run on
    /// the rayon pool.
    pub fn build<R: Rng + ?Sized>(graph: &Multigraph, num_landmarks: usize, rng: &mut R) -> Self {
        let n = graph.node_count();
        if n == 0 {
            return DistanceSketch {
                node_ids: Vec::new(),
                columns: Vec::new(),
            };
        }
        let count = num_landmarks.min(n);
        let landmark_rows = rand::seq::index::sample(rng, n, count).into_vec();
        debug!("sampled {} landmarks from {} nodes", count, n);
        Self::from_landmark_rows(graph, landmark_rows)
    }

    /// Builds a sketch from an explicit landmark list.
    pub fn from_landmarks(graph: &Multigraph, landmarks: &[NodeId]) -> Result<Self, GraphError> {
        let rows = landmarks
            .iter()
            .map(|&id| {
                graph
                    .index_of(id)
                    .map(NodeIndex::index)
                    .ok_or(GraphError::NodeNotFound(id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_landmark_rows(graph, rows))
    }

    fn from_landmark_rows(graph: &Multigraph, rows: Vec<usize>) -> Self {
        let node_ids = graph.node_ids().collect_vec();
        let columns = rows
            .par_iter()
            .map(|&row| bfs_distances(graph, row))
            .collect();
        DistanceSketch { node_ids, columns }
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn landmark_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty() || self.columns.is_empty()
    }

    pub fn node_id(&self, row: usize) -> NodeId {
        self.node_ids[row]
    }

    /// Distance column of one landmark, indexed by row.
    pub fn column(&self, landmark: usize) -> &[u32] {
        &self.columns[landmark]
    }

    /// Manhattan distance between the landmark vectors of two rows.
    pub fn l1_distance(&self, a: usize, b: usize) -> u64 {
        self.columns
            .iter()
            .map(|column| (i64::from(column[a]) - i64::from(column[b])).abs() as u64)
            .sum()
    }
}

/// Hop distances from the node at `start_row` over the undirected view.
fn bfs_distances(graph: &Multigraph, start_row: usize) -> Vec<u32> {
    let n = graph.node_count();
    let sentinel = n as u32;
    let mut dist = vec![sentinel; n];
    let mut queue = VecDeque::new();

    dist[start_row] = 0;
    queue.push_back(NodeIndex::new(start_row));

    while let Some(ix) = queue.pop_front() {
        let next = dist[ix.index()] + 1;
        for neighbor in graph.inner().neighbors_undirected(ix) {
            if dist[neighbor.index()] == sentinel {
                dist[neighbor.index()] = next;
                queue.push_back(neighbor);
            }
        }
    }
    dist
}
