mod snapshot;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Deserialize;
use tracing::{debug, trace};

use crate::graph::{self, Graph, NodeType, RelationType};
use crate::util::short_name;

pub use snapshot::{
    AliasEntry, ConceptEntry, LiteralEntry, RelationEntry, Snapshot, load_snapshot,
    parse_snapshot, spawn_snapshot_loader,
};

/// Maps a reasoner's relation category onto the relation types the graph
/// understands. Unknown categories are plain properties.
pub fn relation_type_for_category(category: &str) -> RelationType {
    match category {
        "Parents" => RelationType::Superclass,
        "Children" => RelationType::Subclass,
        "Instances" => RelationType::Instance,
        "Classes" => RelationType::Class,
        "comment" => RelationType::Comment,
        _ => RelationType::Property,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralDedup {
    #[default]
    ByValue,
    ByQualifiedName,
}

pub fn literal_node_id(policy: LiteralDedup, subject: &str, property: &str, value: &str) -> String {
    match policy {
        LiteralDedup::ByValue => value.to_owned(),
        LiteralDedup::ByQualifiedName => format!("{subject}#{property}={value}"),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConnectorEvent {
    AddNode {
        id: String,
        label: Option<String>,
        node_type: NodeType,
    },
    AddNodeConnectedTo {
        id: String,
        label: Option<String>,
        neighbour: String,
        relation_type: RelationType,
        edge_label: String,
    },
    AddLiteral {
        subject: String,
        property: String,
        value: String,
    },
    AddAlias {
        alias: String,
        canonical: String,
    },
    ActiveConcept(String),
}

/// Applies one event to the graph. Returns `false` when the graph refused
/// the node (labelled-only policy) or the concept is unknown.
pub fn apply_event(graph: &mut Graph, event: ConnectorEvent) -> graph::Result<bool> {
    match event {
        ConnectorEvent::AddNode {
            id,
            label,
            node_type,
        } => {
            graph.add_node(&id, label.as_deref(), None, node_type);
            Ok(true)
        }
        ConnectorEvent::AddNodeConnectedTo {
            id,
            label,
            neighbour,
            relation_type,
            edge_label,
        } => graph.add_node_connected_to(
            &id,
            label.as_deref(),
            &neighbour,
            relation_type,
            &edge_label,
        ),
        ConnectorEvent::AddLiteral {
            subject,
            property,
            value,
        } => {
            let id = literal_node_id(graph.config().literal_dedup, &subject, &property, &value);
            graph.add_node_connected_to(
                &id,
                Some(&value),
                &subject,
                RelationType::DataProperty,
                short_name(&property),
            )
        }
        ConnectorEvent::AddAlias { alias, canonical } => {
            graph.add_alias(&alias, &canonical);
            Ok(true)
        }
        ConnectorEvent::ActiveConcept(id) => Ok(tickle_concept(graph, &id)),
    }
}

fn tickle_concept(graph: &mut Graph, id: &str) -> bool {
    match graph.find_node(id) {
        Some(node) => {
            graph.tickle(node);
            trace!(id, "tickled active concept");
            true
        }
        None => {
            debug!(id, "ignored unknown active concept");
            false
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ActiveConcepts {
    pending: Arc<Mutex<HashSet<String>>>,
}

impl ActiveConcepts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&self, id: impl Into<String>) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.into());
    }

    pub fn is_empty(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    pub fn drain(&self) -> Vec<String> {
        let mut drained = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .collect::<Vec<_>>();
        drained.sort_unstable();
        drained
    }

    pub fn tickle_pending(&self, graph: &mut Graph) -> usize {
        self.drain()
            .iter()
            .filter(|id| tickle_concept(graph, id))
            .count()
    }
}
