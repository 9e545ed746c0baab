use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::graph::{Graph, NodeType};

use super::{ActiveConcepts, ConnectorEvent, apply_event, relation_type_for_category};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub concepts: Vec<ConceptEntry>,
    pub relations: Vec<RelationEntry>,
    pub literals: Vec<LiteralEntry>,
    pub aliases: Vec<AliasEntry>,
    pub active: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ConceptEntry {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, rename = "type")]
    pub node_type: NodeType,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RelationEntry {
    pub from: String,
    pub to: String,
    pub category: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LiteralEntry {
    pub subject: String,
    pub property: String,
    pub value: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AliasEntry {
    pub alias: String,
    pub id: String,
}

impl Snapshot {
    /// Events rebuilding the snapshot: aliases first so alias concepts fold
    /// into their canonical node, then concepts, relations and literals.
    /// Active concepts are not included.
    pub fn events(&self) -> Vec<ConnectorEvent> {
        let labels = self
            .concepts
            .iter()
            .filter_map(|concept| Some((concept.id.as_str(), concept.label.as_deref()?)))
            .collect::<HashMap<_, _>>();

        let concepts = self.concepts.iter().map(|concept| ConnectorEvent::AddNode {
            id: concept.id.clone(),
            label: concept.label.clone(),
            node_type: concept.node_type,
        });
        let aliases = self.aliases.iter().map(|alias| ConnectorEvent::AddAlias {
            alias: alias.alias.clone(),
            canonical: alias.id.clone(),
        });
        let relations = self
            .relations
            .iter()
            .map(|relation| ConnectorEvent::AddNodeConnectedTo {
                id: relation.to.clone(),
                label: labels.get(relation.to.as_str()).map(|label| (*label).to_owned()),
                neighbour: relation.from.clone(),
                relation_type: relation_type_for_category(&relation.category),
                edge_label: relation.label.clone(),
            });
        let literals = self.literals.iter().map(|literal| ConnectorEvent::AddLiteral {
            subject: literal.subject.clone(),
            property: literal.property.clone(),
            value: literal.value.clone(),
        });

        aliases
            .chain(concepts)
            .chain(relations)
            .chain(literals)
            .collect()
    }

    pub fn apply_to(&self, graph: &mut Graph) {
        for event in self.events() {
            if let Err(error) = apply_event(graph, event) {
                warn!(%error, "skipped snapshot event");
            }
        }
        for id in &self.active {
            if let Some(node) = graph.find_node(id) {
                graph.tickle(node);
            }
        }
    }
}

pub fn parse_snapshot(raw: &str) -> Result<Snapshot> {
    serde_json::from_str(raw).context("invalid ontology snapshot")
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    parse_snapshot(&raw).with_context(|| format!("invalid snapshot file {}", path.display()))
}

/// Reads the snapshot on a worker thread and streams its events back. Active
/// concepts go to `active` once every event has been sent. The channel
/// closes when the worker is done; a read failure is sent as the only item.
pub fn spawn_snapshot_loader(
    path: PathBuf,
    active: ActiveConcepts,
) -> Receiver<Result<ConnectorEvent, String>> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let snapshot = match load_snapshot(&path) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                let _ = tx.send(Err(format!("{error:#}")));
                return;
            }
        };

        let events = snapshot.events();
        info!(
            path = %path.display(),
            events = events.len(),
            "loaded ontology snapshot"
        );
        for event in events {
            if tx.send(Ok(event)).is_err() {
                return;
            }
        }
        for id in snapshot.active {
            active.notify(id);
        }
    });

    rx
}
