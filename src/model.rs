//! The decoded layout: graph, clusters, nodes and edges.
//!
//! DESIGN
//! ======
//! [`Graph`] owns every node, edge and cluster in source order. Cross
//! references (edge endpoints, cluster members) are Graphviz `_gvid`s wrapped
//! in [`NodeId`] / [`EdgeId`], resolved through the graph's indices. The
//! assembler checks every reference before a graph exists, so a graph never
//! holds a dangling id of its own.
//!
//! Nothing here is mutable after assembly.

use std::collections::HashMap;

use serde::Serialize;
use xdot::{BoundingBox, DrawCommand, Point, Spline};

// =============================================================================
// IDS
// =============================================================================

/// `_gvid` of a node (an entry of the envelope's `objects`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

/// `_gvid` of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EdgeId(pub u32);

/// `_gvid` of a cluster. Shares the object id space with [`NodeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClusterId(pub u32);

// =============================================================================
// RECORDS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub gvid: NodeId,
    pub name: String,
    pub label: Option<String>,
    pub comment: Option<String>,
    /// Center of the node.
    pub position: Point,
    pub style: Option<String>,
    pub shape: Option<String>,
    /// Height in inches.
    pub height: f64,
    /// Width in inches.
    pub width: f64,
    pub color: Option<String>,
    pub label_position: Option<Point>,
    pub label_width: Option<f64>,
    pub label_height: Option<f64>,
    pub draw_commands: Vec<DrawCommand>,
    pub label_draw_commands: Vec<DrawCommand>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub gvid: EdgeId,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub label: Option<String>,
    pub style: Option<String>,
    pub head: NodeId,
    pub tail: NodeId,
    pub path: Spline,
    /// `_draw_`: the edge body.
    pub draw_commands: Vec<DrawCommand>,
    /// `_hdraw_`: the arrowhead at the head end.
    pub arrow_head_draw_commands: Vec<DrawCommand>,
    /// `_tdraw_`: the arrowhead at the tail end.
    pub arrow_tail_draw_commands: Vec<DrawCommand>,
    /// `_ldraw_`: the edge label.
    pub label_draw_commands: Vec<DrawCommand>,
    /// `_hldraw_`: the head label.
    pub head_label_draw_commands: Vec<DrawCommand>,
    /// `_tldraw_`: the tail label.
    pub tail_label_draw_commands: Vec<DrawCommand>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    pub gvid: ClusterId,
    pub name: String,
    pub label: Option<String>,
    pub comment: Option<String>,
    pub width: f64,
    pub style: Option<String>,
    pub shape: Option<String>,
    pub color: Option<String>,
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
    pub bounding_box: Option<BoundingBox>,
    pub label_position: Option<Point>,
    pub label_width: Option<f64>,
    pub label_height: Option<f64>,
    pub draw_commands: Vec<DrawCommand>,
    pub label_draw_commands: Vec<DrawCommand>,
}

// =============================================================================
// GRAPH
// =============================================================================

/// Root of a decoded layout. Built by [`crate::decode_graph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    pub(crate) name: String,
    pub(crate) comment: Option<String>,
    pub(crate) label: Option<String>,
    pub(crate) label_position: Option<Point>,
    pub(crate) directed: bool,
    pub(crate) strict: bool,
    pub(crate) bounding_box: BoundingBox,
    pub(crate) clusters: Vec<Cluster>,
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) draw_commands: Vec<DrawCommand>,
    pub(crate) label_draw_commands: Vec<DrawCommand>,
    #[serde(skip)]
    pub(crate) node_index: HashMap<NodeId, usize>,
    #[serde(skip)]
    pub(crate) edge_index: HashMap<EdgeId, usize>,
    /// First cluster record per id; duplicates stay in `clusters`.
    #[serde(skip)]
    pub(crate) cluster_index: HashMap<ClusterId, usize>,
}

impl Graph {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn label_position(&self) -> Option<Point> {
        self.label_position
    }

    #[must_use]
    pub fn directed(&self) -> bool {
        self.directed
    }

    #[must_use]
    pub fn strict(&self) -> bool {
        self.strict
    }

    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Clusters in source order.
    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Nodes in source order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in source order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn draw_commands(&self) -> &[DrawCommand] {
        &self.draw_commands
    }

    #[must_use]
    pub fn label_draw_commands(&self) -> &[DrawCommand] {
        &self.label_draw_commands
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_index.get(&id).map(|&idx| &self.nodes[idx])
    }

    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edge_index.get(&id).map(|&idx| &self.edges[idx])
    }

    /// First cluster carrying `id`.
    #[must_use]
    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.cluster_index.get(&id).map(|&idx| &self.clusters[idx])
    }

    /// First node with the given name. Node names are unique per graph in DOT.
    #[must_use]
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    #[must_use]
    pub fn cluster_by_name(&self, name: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn head_of(&self, edge: &Edge) -> Option<&Node> {
        self.node(edge.head)
    }

    #[must_use]
    pub fn tail_of(&self, edge: &Edge) -> Option<&Node> {
        self.node(edge.tail)
    }

    /// Member nodes of `cluster`, in the cluster's listed order.
    pub fn cluster_nodes<'a>(&'a self, cluster: &'a Cluster) -> impl Iterator<Item = &'a Node> + 'a {
        cluster.nodes.iter().filter_map(|&id| self.node(id))
    }

    /// Member edges of `cluster`, in the cluster's listed order.
    pub fn cluster_edges<'a>(&'a self, cluster: &'a Cluster) -> impl Iterator<Item = &'a Edge> + 'a {
        cluster.edges.iter().filter_map(|&id| self.edge(id))
    }

    /// Edges whose tail is `id`.
    pub fn edges_from(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.tail == id)
    }

    /// Edges whose head is `id`.
    pub fn edges_to(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.head == id)
    }
}
