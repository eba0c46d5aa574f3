//! Hierarchical (layered) layout
//!
//! Phases:
//!   1. Cycle removal: DFS back edges are reversed
//!   2. Rank assignment: longest path over the resulting DAG
//!   3. Virtual nodes on edges spanning more than one rank
//!   4. Crossing minimisation: barycenter sweeps
//!   5. Coordinate assignment with a fixed node box
//!
//! The whole pipeline is deterministic: the same nodes, edges and direction
//! always produce bit-identical positions.

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{depth_first_search, DfsEvent, EdgeRef};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::components::{Edge, Node};
use crate::config::LayoutConfig;
use crate::value_objects::{ConnectionSides, EdgeId, LayoutDirection, NodeId, Position2D};

/// A node placed by the layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub id: NodeId,
    /// Layer index along the direction of the layout
    pub rank: usize,
    /// Top-left corner of the node's box
    pub position: Position2D,
    pub sides: ConnectionSides,
}

/// Output of one layout run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    /// Placed nodes, in input order
    pub nodes: Vec<PositionedNode>,
    /// Edges that had to point against the rank flow to break cycles
    pub reversed_edges: Vec<EdgeId>,
    pub rank_count: usize,
    /// Edge crossings left after ordering, counted on the layered graph
    pub crossings: usize,
}

impl LayoutResult {
    /// Placement of `id`, if it was part of the input
    pub fn get(&self, id: NodeId) -> Option<&PositionedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Layered graph drawing with a fixed per-node bounding box
#[derive(Debug, Clone, Default)]
pub struct HierarchicalLayout {
    config: LayoutConfig,
}

impl HierarchicalLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Place `nodes` so that every edge points from a lower to a higher rank.
    ///
    /// Edges whose endpoints are not among `nodes` are ignored, as are self
    /// loops. Repeated ids in `nodes` are placed once.
    pub fn compute(&self, nodes: &[NodeId], edges: &[Edge], direction: LayoutDirection) -> LayoutResult {
        let graph = build_graph(nodes, edges);
        if graph.node_count() == 0 {
            return LayoutResult::default();
        }

        let back = back_edges(&graph);
        let reversed_edges: Vec<EdgeId> = graph
            .edge_references()
            .filter(|edge| edge.source() != edge.target())
            .filter(|edge| back.contains(&(edge.source(), edge.target())))
            .map(|edge| *edge.weight())
            .collect();

        let dag_edges: Vec<(usize, usize)> = graph
            .edge_references()
            .filter(|edge| edge.source() != edge.target())
            .map(|edge| {
                let (s, t) = (edge.source(), edge.target());
                if back.contains(&(s, t)) {
                    (t.index(), s.index())
                } else {
                    (s.index(), t.index())
                }
            })
            .collect();

        let ranks = assign_ranks(graph.node_count(), &dag_edges);
        let mut layered = LayeredGraph::new(&ranks, &dag_edges);
        let crossings = layered.minimise_crossings(self.config.ordering_sweeps);

        let size = self.config.node_size();
        let (cross_extent, rank_extent) = match direction {
            LayoutDirection::TopToBottom => (size.width, size.height),
            LayoutDirection::LeftToRight => (size.height, size.width),
        };
        let slot = cross_extent + self.config.node_separation;
        let cross = layered.assign_cross_coordinates(slot, self.config.alignment_passes);

        let real = graph.node_count();
        let min_cross = cross[..real].iter().copied().fold(f64::INFINITY, f64::min);
        let rank_step = rank_extent + self.config.rank_separation;
        let sides = direction.connection_sides();

        let placed: Vec<PositionedNode> = graph
            .node_indices()
            .map(|index| {
                let rank = ranks[index.index()];
                let along = rank as f64 * rank_step;
                let across = cross[index.index()] - min_cross;
                let position = match direction {
                    LayoutDirection::TopToBottom => Position2D::new(across, along),
                    LayoutDirection::LeftToRight => Position2D::new(along, across),
                };
                PositionedNode {
                    id: graph[index],
                    rank,
                    position,
                    sides,
                }
            })
            .collect();

        let rank_count = layered.layers.len();
        info!(
            nodes = placed.len(),
            edges = dag_edges.len(),
            ranks = rank_count,
            reversed = reversed_edges.len(),
            crossings,
            direction = %direction,
            "hierarchical layout computed"
        );

        LayoutResult {
            nodes: placed,
            reversed_edges,
            rank_count,
            crossings,
        }
    }
}

/// Lay out `nodes` and `edges` with the given configuration
pub fn layout<'a>(
    nodes: impl IntoIterator<Item = &'a Node>,
    edges: impl IntoIterator<Item = &'a Edge>,
    direction: LayoutDirection,
    config: &LayoutConfig,
) -> Vec<PositionedNode> {
    let ids: Vec<NodeId> = nodes.into_iter().map(|node| node.id).collect();
    let edges: Vec<Edge> = edges.into_iter().copied().collect();
    HierarchicalLayout::new(config.clone())
        .compute(&ids, &edges, direction)
        .nodes
}

fn build_graph(nodes: &[NodeId], edges: &[Edge]) -> DiGraph<NodeId, EdgeId> {
    let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
    let mut index: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(nodes.len());

    for id in nodes {
        index.entry(*id).or_insert_with(|| graph.add_node(*id));
    }
    for edge in edges {
        if let (Some(&s), Some(&t)) = (index.get(&edge.source), index.get(&edge.target)) {
            graph.add_edge(s, t, edge.id);
        }
    }

    graph
}

/// Node pairs closing a cycle during a DFS started from every node in order
fn back_edges(graph: &DiGraph<NodeId, EdgeId>) -> HashSet<(NodeIndex, NodeIndex)> {
    let mut back = HashSet::new();
    depth_first_search(graph, graph.node_indices(), |event| {
        if let DfsEvent::BackEdge(u, v) = event {
            back.insert((u, v));
        }
    });
    back
}

/// Longest-path ranks: sources sit on rank 0, every edge gains at least one rank
fn assign_ranks(node_count: usize, dag_edges: &[(usize, usize)]) -> Vec<usize> {
    let mut dag: DiGraph<(), ()> = DiGraph::with_capacity(node_count, dag_edges.len());
    for _ in 0..node_count {
        dag.add_node(());
    }
    for &(s, t) in dag_edges {
        dag.add_edge(NodeIndex::new(s), NodeIndex::new(t), ());
    }

    let order = toposort(&dag, None).unwrap_or_else(|cycle| {
        warn!(node = cycle.node_id().index(), "cycle survived back-edge reversal");
        dag.node_indices().collect()
    });

    let mut ranks = vec![0usize; node_count];
    for node in order {
        let next = ranks[node.index()] + 1;
        for successor in dag.neighbors(node) {
            let rank = &mut ranks[successor.index()];
            *rank = (*rank).max(next);
        }
    }
    ranks
}

/// Proper layered graph: every link joins adjacent ranks.
///
/// Slots `0..n` are the real nodes (same numbering as the petgraph indices),
/// slots from `n` on are virtual nodes splitting long edges.
struct LayeredGraph {
    layers: Vec<Vec<usize>>,
    upper: Vec<Vec<usize>>,
    lower: Vec<Vec<usize>>,
    /// Index of each slot inside its layer
    order: Vec<usize>,
}

impl LayeredGraph {
    fn new(ranks: &[usize], dag_edges: &[(usize, usize)]) -> Self {
        let mut rank_of = ranks.to_vec();
        let mut upper = vec![Vec::new(); ranks.len()];
        let mut lower = vec![Vec::new(); ranks.len()];

        for &(s, t) in dag_edges {
            let (from, to) = (rank_of[s], rank_of[t]);
            if to <= from {
                continue;
            }
            let mut previous = s;
            for rank in from + 1..to {
                let virtual_slot = rank_of.len();
                rank_of.push(rank);
                upper.push(Vec::new());
                lower.push(Vec::new());
                lower[previous].push(virtual_slot);
                upper[virtual_slot].push(previous);
                previous = virtual_slot;
            }
            lower[previous].push(t);
            upper[t].push(previous);
        }

        let layer_count = rank_of.iter().copied().max().map_or(0, |max| max + 1);
        let mut layers = vec![Vec::new(); layer_count];
        let mut order = vec![0; rank_of.len()];
        for (slot, &rank) in rank_of.iter().enumerate() {
            order[slot] = layers[rank].len();
            layers[rank].push(slot);
        }

        Self {
            layers,
            upper,
            lower,
            order,
        }
    }

    /// Reorder layers with alternating barycenter sweeps, keeping the best
    /// ordering seen. Returns its crossing count.
    fn minimise_crossings(&mut self, sweeps: usize) -> usize {
        let mut best_layers = self.layers.clone();
        let mut best = self.crossings();

        for _ in 0..sweeps {
            if best == 0 {
                break;
            }
            for rank in 1..self.layers.len() {
                self.sort_by_barycenter(rank, true);
            }
            for rank in (0..self.layers.len().saturating_sub(1)).rev() {
                self.sort_by_barycenter(rank, false);
            }

            let crossings = self.crossings();
            if crossings >= best {
                break;
            }
            best = crossings;
            best_layers = self.layers.clone();
        }

        self.layers = best_layers;
        for rank in 0..self.layers.len() {
            self.refresh_order(rank);
        }
        best
    }

    fn sort_by_barycenter(&mut self, rank: usize, from_upper: bool) {
        let neighbours = if from_upper { &self.upper } else { &self.lower };
        let barycenters: HashMap<usize, f64> = self.layers[rank]
            .iter()
            .map(|&slot| {
                let adjacent = &neighbours[slot];
                let value = if adjacent.is_empty() {
                    self.order[slot] as f64
                } else {
                    adjacent.iter().map(|&n| self.order[n] as f64).sum::<f64>()
                        / adjacent.len() as f64
                };
                (slot, value)
            })
            .collect();

        self.layers[rank].sort_by(|a, b| barycenters[a].total_cmp(&barycenters[b]));
        self.refresh_order(rank);
    }

    fn refresh_order(&mut self, rank: usize) {
        for (position, &slot) in self.layers[rank].iter().enumerate() {
            self.order[slot] = position;
        }
    }

    fn crossings(&self) -> usize {
        let mut total = 0;
        for layer in self.layers.iter().take(self.layers.len().saturating_sub(1)) {
            let links: Vec<(usize, usize)> = layer
                .iter()
                .flat_map(|&slot| {
                    self.lower[slot]
                        .iter()
                        .map(move |&below| (self.order[slot], self.order[below]))
                })
                .collect();
            for (i, &(a0, a1)) in links.iter().enumerate() {
                for &(b0, b1) in &links[i + 1..] {
                    if (a0 < b0 && a1 > b1) || (a0 > b0 && a1 < b1) {
                        total += 1;
                    }
                }
            }
        }
        total
    }

    /// Centre coordinate of every slot on the axis across the ranks.
    ///
    /// Layers start packed and centred on the widest one; refinement passes
    /// then pull each node towards the mean of its neighbours while keeping
    /// layer order and at least `slot` between centres.
    fn assign_cross_coordinates(&self, slot: f64, passes: usize) -> Vec<f64> {
        let widest = self.layers.iter().map(Vec::len).max().unwrap_or(0);
        let mut cross = vec![0.0; self.order.len()];

        for layer in &self.layers {
            let offset = (widest - layer.len()) as f64 * slot / 2.0;
            for (position, &node) in layer.iter().enumerate() {
                cross[node] = offset + position as f64 * slot;
            }
        }

        for pass in 0..passes {
            let from_upper = pass % 2 == 0;
            let ranks: Vec<usize> = if from_upper {
                (1..self.layers.len()).collect()
            } else {
                (0..self.layers.len().saturating_sub(1)).rev().collect()
            };
            let neighbours = if from_upper { &self.upper } else { &self.lower };

            for rank in ranks {
                let layer = &self.layers[rank];
                let desired: Vec<f64> = layer
                    .iter()
                    .map(|&node| {
                        let adjacent = &neighbours[node];
                        if adjacent.is_empty() {
                            cross[node]
                        } else {
                            adjacent.iter().map(|&n| cross[n]).sum::<f64>() / adjacent.len() as f64
                        }
                    })
                    .collect();

                let mut placed: Vec<f64> = Vec::with_capacity(desired.len());
                for &want in &desired {
                    let value = match placed.last() {
                        Some(&left) => want.max(left + slot),
                        None => want,
                    };
                    placed.push(value);
                }

                // placing only ever pushes right; shift back to the desired mean
                let shift = (desired.iter().sum::<f64>() - placed.iter().sum::<f64>())
                    / placed.len() as f64;
                for (&node, value) in layer.iter().zip(placed) {
                    cross[node] = value + shift;
                }
            }
        }

        cross
    }
}
