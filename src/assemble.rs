//! Graph assembly: turns a deserialized [`Envelope`] into a [`Graph`].
//!
//! ALGORITHM
//! =========
//! 1. Partition `objects` by name: a name starting with `cluster` or `%` is
//!    a cluster placeholder, anything else is a node. This is Graphviz's own
//!    naming convention for subgraphs and is applied verbatim (case-sensitive
//!    prefix match on the raw name), so a node literally named `clusterA`
//!    becomes a cluster.
//! 2. Build every node and index it by `_gvid`.
//! 3. Build every edge, resolving `tail` / `head` against the node index.
//! 4. Index edges by `_gvid`.
//! 5. Build every cluster, resolving its `nodes` / `edges` member lists.
//! 6. Build the root from the envelope's own fields.
//!
//! The first failure anywhere aborts the whole assembly.
//!
//! Duplicate `_gvid`s are not expected from Graphviz and are not validated.
//! For nodes and edges a later record replaces the earlier one in place (it
//! keeps the earlier record's position in iteration order). Clusters are
//! never merged: every cluster record is kept in source order and the id
//! lookup answers with the first. Both cases log a warning.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use tracing::{debug, warn};
use xdot::{Point, XdotError, decode_commands, parse_bounding_box, parse_point, parse_spline};

use crate::envelope::{Envelope, RawEdge, RawObject};
use crate::error::{DecodeError, RecordRef};
use crate::model::{Cluster, ClusterId, Edge, EdgeId, Graph, Node, NodeId};

/// Object-name prefix Graphviz uses for clusters.
pub const CLUSTER_PREFIX: &str = "cluster";

/// Object-name prefix Graphviz uses for anonymous subgraphs (`%1`, `%2`, ...).
pub const ANONYMOUS_SUBGRAPH_PREFIX: &str = "%";

/// `true` when an `objects` entry with this name is a cluster placeholder.
#[must_use]
pub fn is_cluster_name(name: &str) -> bool {
    name.starts_with(CLUSTER_PREFIX) || name.starts_with(ANONYMOUS_SUBGRAPH_PREFIX)
}

/// Build a [`Graph`] from an envelope.
///
/// # Errors
///
/// - [`DecodeError::Field`] for the first geometry string or draw-command
///   list that fails to decode.
/// - [`DecodeError::DanglingReference`] for the first edge endpoint or
///   cluster member whose id was not built.
pub fn assemble(envelope: &Envelope) -> Result<Graph, DecodeError> {
    let (cluster_records, node_records): (Vec<&RawObject>, Vec<&RawObject>) =
        envelope.objects.iter().partition(|o| is_cluster_name(&o.name));

    let mut nodes = Vec::with_capacity(node_records.len());
    let mut node_index = HashMap::with_capacity(node_records.len());
    for raw in node_records {
        let node = build_node(raw)?;
        insert_last_wins(&mut nodes, &mut node_index, node.gvid, node, "node");
    }

    let mut edges = Vec::with_capacity(envelope.edges.len());
    let mut edge_index = HashMap::with_capacity(envelope.edges.len());
    for raw in &envelope.edges {
        let edge = build_edge(raw, &node_index)?;
        insert_last_wins(&mut edges, &mut edge_index, edge.gvid, edge, "edge");
    }

    let mut clusters = Vec::with_capacity(cluster_records.len());
    let mut cluster_index = HashMap::with_capacity(cluster_records.len());
    for raw in cluster_records {
        let cluster = build_cluster(raw, &node_index, &edge_index)?;
        match cluster_index.entry(cluster.gvid) {
            Entry::Occupied(_) => warn!(gvid = cluster.gvid.gvid(), kind = "cluster", "duplicate gvid; both records kept"),
            Entry::Vacant(slot) => {
                slot.insert(clusters.len());
            }
        }
        clusters.push(cluster);
    }

    let record = RecordRef::Graph { name: envelope.name.clone() };
    let graph = Graph {
        name: envelope.name.clone(),
        comment: envelope.comment.clone(),
        label: envelope.label.clone(),
        label_position: optional_point(&record, "lp", envelope.lp.as_deref())?,
        directed: envelope.directed,
        strict: envelope.strict,
        bounding_box: context(&record, "bb", parse_bounding_box(&envelope.bb))?,
        clusters,
        nodes,
        edges,
        draw_commands: context(&record, "_draw_", decode_commands(envelope.draw.as_deref()))?,
        label_draw_commands: context(&record, "_ldraw_", decode_commands(envelope.ldraw.as_deref()))?,
        node_index,
        edge_index,
        cluster_index,
    };

    debug!(
        graph = %graph.name,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        clusters = graph.clusters.len(),
        "assembled layout graph"
    );
    Ok(graph)
}

// =============================================================================
// RECORD BUILDERS
// =============================================================================

fn build_node(raw: &RawObject) -> Result<Node, DecodeError> {
    let record = RecordRef::Node { gvid: raw.gvid, name: raw.name.clone() };
    Ok(Node {
        gvid: NodeId(raw.gvid),
        name: raw.name.clone(),
        label: raw.label.clone(),
        comment: raw.comment.clone(),
        position: context(&record, "pos", required(raw.pos.as_deref()).and_then(parse_point))?,
        style: raw.style.clone(),
        shape: raw.shape.clone(),
        height: raw.height,
        width: raw.width,
        color: raw.color.clone(),
        label_position: optional_point(&record, "lp", raw.lp.as_deref())?,
        label_width: raw.lwidth,
        label_height: raw.lheight,
        draw_commands: context(&record, "_draw_", decode_commands(raw.draw.as_deref()))?,
        label_draw_commands: context(&record, "_ldraw_", decode_commands(raw.ldraw.as_deref()))?,
    })
}

fn build_edge(raw: &RawEdge, node_index: &HashMap<NodeId, usize>) -> Result<Edge, DecodeError> {
    let record = RecordRef::Edge { gvid: raw.gvid };
    Ok(Edge {
        gvid: EdgeId(raw.gvid),
        name: raw.name.clone(),
        comment: raw.comment.clone(),
        label: raw.label.clone(),
        style: raw.style.clone(),
        head: resolve(&record, "head", NodeId(raw.head), node_index)?,
        tail: resolve(&record, "tail", NodeId(raw.tail), node_index)?,
        path: context(&record, "pos", required(raw.pos.as_deref()).and_then(parse_spline))?,
        draw_commands: context(&record, "_draw_", decode_commands(raw.draw.as_deref()))?,
        arrow_head_draw_commands: context(&record, "_hdraw_", decode_commands(raw.hdraw.as_deref()))?,
        arrow_tail_draw_commands: context(&record, "_tdraw_", decode_commands(raw.tdraw.as_deref()))?,
        label_draw_commands: context(&record, "_ldraw_", decode_commands(raw.ldraw.as_deref()))?,
        head_label_draw_commands: context(&record, "_hldraw_", decode_commands(raw.hldraw.as_deref()))?,
        tail_label_draw_commands: context(&record, "_tldraw_", decode_commands(raw.tldraw.as_deref()))?,
    })
}

fn build_cluster(
    raw: &RawObject,
    node_index: &HashMap<NodeId, usize>,
    edge_index: &HashMap<EdgeId, usize>,
) -> Result<Cluster, DecodeError> {
    let record = RecordRef::Cluster { gvid: raw.gvid, name: raw.name.clone() };
    let nodes = raw
        .nodes
        .iter()
        .flatten()
        .map(|&id| resolve(&record, "nodes", NodeId(id), node_index))
        .collect::<Result<Vec<_>, _>>()?;
    let edges = raw
        .edges
        .iter()
        .flatten()
        .map(|&id| resolve(&record, "edges", EdgeId(id), edge_index))
        .collect::<Result<Vec<_>, _>>()?;
    let bounding_box = raw
        .bb
        .as_deref()
        .map(|bb| context(&record, "bb", parse_bounding_box(bb)))
        .transpose()?;

    Ok(Cluster {
        gvid: ClusterId(raw.gvid),
        name: raw.name.clone(),
        label: raw.label.clone(),
        comment: raw.comment.clone(),
        width: raw.width,
        style: raw.style.clone(),
        shape: raw.shape.clone(),
        color: raw.color.clone(),
        nodes,
        edges,
        bounding_box,
        label_position: optional_point(&record, "lp", raw.lp.as_deref())?,
        label_width: raw.lwidth,
        label_height: raw.lheight,
        draw_commands: context(&record, "_draw_", decode_commands(raw.draw.as_deref()))?,
        label_draw_commands: context(&record, "_ldraw_", decode_commands(raw.ldraw.as_deref()))?,
    })
}

// =============================================================================
// HELPERS
// =============================================================================

/// Attach record context to a leaf decode error.
fn context<T>(record: &RecordRef, field: &'static str, result: Result<T, XdotError>) -> Result<T, DecodeError> {
    result.map_err(|source| DecodeError::Field { record: record.clone(), field, source })
}

fn required(value: Option<&str>) -> Result<&str, XdotError> {
    value.ok_or_else(|| XdotError::MalformedGeometry { input: String::new(), reason: "field is absent".into() })
}

fn optional_point(record: &RecordRef, name: &'static str, value: Option<&str>) -> Result<Option<Point>, DecodeError> {
    value.map(|text| context(record, name, parse_point(text))).transpose()
}

trait Gvid: Copy + Eq + Hash {
    fn gvid(self) -> u32;
}

impl Gvid for NodeId {
    fn gvid(self) -> u32 {
        self.0
    }
}

impl Gvid for EdgeId {
    fn gvid(self) -> u32 {
        self.0
    }
}

impl Gvid for ClusterId {
    fn gvid(self) -> u32 {
        self.0
    }
}

fn resolve<K: Gvid>(
    record: &RecordRef,
    field: &'static str,
    id: K,
    index: &HashMap<K, usize>,
) -> Result<K, DecodeError> {
    if index.contains_key(&id) {
        Ok(id)
    } else {
        Err(DecodeError::DanglingReference { record: record.clone(), field, target: id.gvid() })
    }
}

fn insert_last_wins<K: Gvid, V>(
    items: &mut Vec<V>,
    index: &mut HashMap<K, usize>,
    key: K,
    value: V,
    kind: &'static str,
) {
    match index.entry(key) {
        Entry::Occupied(slot) => {
            warn!(gvid = key.gvid(), kind, "duplicate gvid; later record replaces the earlier one");
            items[*slot.get()] = value;
        }
        Entry::Vacant(slot) => {
            slot.insert(items.len());
            items.push(value);
        }
    }
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod tests;
