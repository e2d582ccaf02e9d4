//! Layered auto-layout.
//!
//! Assigns every node a rank consistent with edge direction (sources rank
//! above targets), orders nodes within each rank by insertion order, and
//! spaces them on a fixed grid of 420x340 bounding boxes. Pure: callers get
//! a fresh node list back and commit the positions themselves.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use flowcell_core::{Edge, Node, Position};

/// Bounding box width of a cell (editor plus output panel).
pub const NODE_WIDTH: f64 = 420.0;
/// Bounding box height of a cell.
pub const NODE_HEIGHT: f64 = 340.0;
/// Gap between neighbouring cells within a rank.
pub const NODE_SEP: f64 = 50.0;
/// Gap between consecutive ranks.
pub const RANK_SEP: f64 = 50.0;

/// Which way ranks grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Ranks grow downward.
    #[default]
    #[serde(rename = "TB")]
    TopBottom,
    /// Ranks grow rightward.
    #[serde(rename = "LR")]
    LeftRight,
}

impl Direction {
    /// Parse a config string ("TB" or "LR", case-insensitive). Anything
    /// else falls back to top-bottom.
    pub fn from_config(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "LR" => Self::LeftRight,
            _ => Self::TopBottom,
        }
    }
}

/// Compute non-overlapping positions for the whole graph.
///
/// The input is never mutated; the returned nodes carry the new top-left
/// positions (internally the grid is centre-based, converted on the way
/// out). Identical input always produces identical output. Cyclic edge
/// sets terminate: edges that would close a cycle are ignored for ranking.
pub fn layout(nodes: &[Node], edges: &[Edge], direction: Direction) -> Vec<Node> {
    let ranks = assign_ranks(nodes, edges);

    // Within-rank slot, in node insertion order.
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut rank_counts: HashMap<usize, usize> = HashMap::new();
    for node in nodes {
        let rank = ranks[node.id.as_str()];
        let count = rank_counts.entry(rank).or_insert(0);
        slots.insert(node.id.as_str(), *count);
        *count += 1;
    }

    debug!(
        nodes = nodes.len(),
        ranks = rank_counts.len(),
        ?direction,
        "Computed layout"
    );

    nodes
        .iter()
        .map(|node| {
            let rank = ranks[node.id.as_str()] as f64;
            let slot = slots[node.id.as_str()] as f64;

            // Centre of the cell on the grid.
            let along = rank * (rank_extent(direction) + RANK_SEP) + rank_extent(direction) / 2.0;
            let across = slot * (slot_extent(direction) + NODE_SEP) + slot_extent(direction) / 2.0;

            let (cx, cy) = match direction {
                Direction::TopBottom => (across, along),
                Direction::LeftRight => (along, across),
            };

            let mut out = node.clone();
            out.position = Position::new(cx - NODE_WIDTH / 2.0, cy - NODE_HEIGHT / 2.0);
            out
        })
        .collect()
}

fn rank_extent(direction: Direction) -> f64 {
    match direction {
        Direction::TopBottom => NODE_HEIGHT,
        Direction::LeftRight => NODE_WIDTH,
    }
}

fn slot_extent(direction: Direction) -> f64 {
    match direction {
        Direction::TopBottom => NODE_WIDTH,
        Direction::LeftRight => NODE_HEIGHT,
    }
}

/// Longest-path ranking: a node sits one rank below its deepest parent.
/// Nodes with no incoming edges (and isolated nodes) sit on rank 0.
///
/// Cycles cannot hang the recursion: a node already on the active DFS path
/// reports rank 0 to its successor instead of recursing, which breaks the
/// cycle at the back edge.
fn assign_ranks<'a>(nodes: &'a [Node], edges: &'a [Edge]) -> HashMap<&'a str, usize> {
    let mut parents: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
    for edge in edges {
        parents
            .entry(edge.target.as_str())
            .or_default()
            .push(edge.source.as_str());
    }

    let mut ranks: HashMap<&'a str, usize> = HashMap::new();
    let mut on_path: Vec<&'a str> = Vec::new();
    for node in nodes {
        rank_of(node.id.as_str(), &parents, &mut ranks, &mut on_path);
    }
    ranks
}

fn rank_of<'a>(
    id: &'a str,
    parents: &HashMap<&'a str, Vec<&'a str>>,
    ranks: &mut HashMap<&'a str, usize>,
    on_path: &mut Vec<&'a str>,
) -> usize {
    if let Some(&rank) = ranks.get(id) {
        return rank;
    }
    if on_path.contains(&id) {
        // Back edge: treat the cycle-closing parent as rank 0.
        return 0;
    }

    on_path.push(id);
    let mut rank = 0;
    if let Some(ps) = parents.get(id) {
        for &p in ps {
            rank = rank.max(rank_of(p, parents, ranks, on_path) + 1);
        }
    }
    on_path.pop();

    ranks.insert(id, rank);
    rank
}
