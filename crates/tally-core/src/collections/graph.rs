//! Weighted directed adjacency over labels
//!
//! Edge weights only accumulate. Undirected relationships are modeled by the
//! caller adding both directions. Self-loops and negative weights are ignored
//! so weights stay monotonically non-decreasing.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Adjacency<V> {
    edges: Vec<(V, f64)>,
    index: HashMap<V, usize>,
}

impl<V> Default for Adjacency<V> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            index: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RelationGraph<V> {
    vertices: Vec<V>,
    adjacency: HashMap<V, Adjacency<V>>,
}

impl<V> Default for RelationGraph<V> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            adjacency: HashMap::new(),
        }
    }
}

impl<V: Eq + Hash + Clone> RelationGraph<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, vertex: V) {
        if !self.adjacency.contains_key(&vertex) {
            self.vertices.push(vertex.clone());
            self.adjacency.insert(vertex, Adjacency::default());
        }
    }

    /// Add `weight` to the from→to edge, creating vertices and edge as needed
    pub fn add_edge(&mut self, from: V, to: V, weight: f64) {
        if from == to || weight.is_nan() || weight < 0.0 {
            tracing::debug!(weight, "Ignoring self-loop or negative edge weight");
            return;
        }

        self.add_vertex(from.clone());
        self.add_vertex(to.clone());

        let Some(adj) = self.adjacency.get_mut(&from) else {
            return;
        };
        match adj.index.get(&to) {
            Some(&slot) => adj.edges[slot].1 += weight,
            None => {
                adj.index.insert(to.clone(), adj.edges.len());
                adj.edges.push((to, weight));
            }
        }
    }

    /// Out-neighbors with weights in discovery order; empty for unknown vertices
    pub fn connections(&self, vertex: &V) -> &[(V, f64)] {
        self.adjacency
            .get(vertex)
            .map(|adj| adj.edges.as_slice())
            .unwrap_or(&[])
    }

    /// Neighbors sorted by descending weight, ties in discovery order
    pub fn related_to(&self, vertex: &V) -> Vec<(V, f64)> {
        let mut related = self.connections(vertex).to_vec();
        related.sort_by(|a, b| b.1.total_cmp(&a.1));
        related
    }

    /// Top `limit` edges across the whole graph as (from, to, weight)
    pub fn strongest_connections(&self, limit: usize) -> Vec<(V, V, f64)> {
        let mut all: Vec<(V, V, f64)> = self
            .vertices
            .iter()
            .flat_map(|from| {
                self.connections(from)
                    .iter()
                    .map(move |(to, w)| (from.clone(), to.clone(), *w))
            })
            .collect();

        all.sort_by(|a, b| b.2.total_cmp(&a.2));
        all.truncate(limit);
        all
    }

    /// Vertices in discovery order
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
