mod distance;
mod edge;
mod error;
mod export;
mod node;
mod relation;

use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

use crate::config::{GraphConfig, PhysicsConfig};
use crate::physics::{PhysicsScratch, step_physics};
use crate::util::stable_tag;

pub use edge::Edge;
pub use error::{GraphError, Result};
pub use node::{DecayState, Node, NodeType};
pub use relation::{NodeRelation, RelationRef, RelationType};

const RANDOM_ID_LENGTH: usize = 6;
const MAX_ALIAS_HOPS: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handles are only valid for the graph that issued them; indexing with a
/// foreign handle panics like out-of-bounds slice access.
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index_by_id: HashMap<String, NodeId>,
    index_by_tag: HashMap<u32, NodeId>,
    aliases: HashMap<String, String>,
    selected: Vec<NodeId>,
    hovered: Option<NodeId>,
    distances_dirty: bool,
    config: GraphConfig,
    physics: PhysicsConfig,
    physics_scratch: PhysicsScratch,
    rng: StdRng,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(GraphConfig::default(), PhysicsConfig::default())
    }
}

impl Graph {
    pub fn new(config: GraphConfig, physics: PhysicsConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            index_by_id: HashMap::new(),
            index_by_tag: HashMap::new(),
            aliases: HashMap::new(),
            selected: Vec::new(),
            hovered: None,
            distances_dirty: false,
            config,
            physics,
            physics_scratch: PhysicsScratch::default(),
            rng,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsConfig {
        &mut self.physics
    }

    pub fn set_spring_parameters(&mut self, spring_constant: f32, nominal_length: f32) {
        self.physics.spring_constant = spring_constant;
        self.physics.nominal_length = nominal_length;
        for edge in &mut self.edges {
            edge.spring_constant = spring_constant;
            edge.nominal_length = nominal_length;
        }
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn relation(&self, relation: RelationRef) -> &NodeRelation {
        &self.nodes[relation.node.0].relations[relation.index]
    }

    pub fn nodes(&self) -> impl ExactSizeIterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    pub fn edges(&self) -> impl ExactSizeIterator<Item = (EdgeId, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(index, edge)| (EdgeId(index), edge))
    }

    fn canonical_id(&self, id: &str) -> String {
        let mut current = id;
        for _ in 0..MAX_ALIAS_HOPS {
            match self.aliases.get(current) {
                Some(next) if next != current => current = next.as_str(),
                _ => break,
            }
        }
        current.to_owned()
    }

    /// Future lookups and creations under `alias` resolve to `canonical_id`.
    /// A node already created under `alias` stays reachable: it becomes the
    /// canonical node if there is none yet, and keeps its own id otherwise.
    pub fn add_alias(&mut self, alias: &str, canonical_id: &str) {
        let canonical = self.canonical_id(canonical_id);
        if alias == canonical {
            debug!(alias, canonical_id, "ignored circular alias");
            return;
        }

        if let Some(&existing) = self.index_by_id.get(alias) {
            if self.index_by_id.contains_key(&canonical) {
                warn!(alias, canonical_id, "alias names a separate node, keeping both");
                return;
            }
            self.index_by_id.insert(canonical.clone(), existing);
            debug!(alias, %canonical, "existing node now answers to its canonical id");
        }

        self.aliases.insert(alias.to_owned(), canonical);
        debug!(alias, canonical_id, "added alias");
    }

    /// Looks a node up by external id. Missing nodes are an error; use
    /// [`Graph::find_node`] where a miss is routine.
    pub fn get_node(&self, id: &str) -> Result<NodeId> {
        self.find_node(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_owned()))
    }

    pub fn find_node(&self, id: &str) -> Option<NodeId> {
        if self.aliases.is_empty() {
            return self.index_by_id.get(id).copied();
        }
        self.index_by_id
            .get(&self.canonical_id(id))
            .or_else(|| self.index_by_id.get(id))
            .copied()
    }

    pub fn node_by_tag(&self, tag: u32) -> Option<NodeId> {
        self.index_by_tag.get(&tag).copied()
    }

    pub fn random_node(&mut self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        Some(NodeId(self.rng.random_range(0..self.nodes.len())))
    }

    fn allocate_tag(&self, id: &str) -> u32 {
        let mut tag = stable_tag(id);
        while self.index_by_tag.contains_key(&tag) {
            tag = tag.wrapping_add(1).max(1);
        }
        tag
    }

    fn initial_position(&mut self, neighbour: Option<NodeId>) -> Vec2 {
        match neighbour {
            Some(neighbour) => {
                let jitter = self.config.neighbour_jitter.abs().max(0.0);
                let offset = vec2(
                    self.rng.random_range(-jitter..=jitter),
                    self.rng.random_range(-jitter..=jitter),
                );
                self.nodes[neighbour.0].position + offset
            }
            None => {
                let spread = self.config.initial_spread.abs().max(1.0);
                vec2(
                    self.rng.random_range(-spread..=spread),
                    self.rng.random_range(-spread..=spread),
                )
            }
        }
    }

    /// Returns the node for `id`, creating it if needed. An existing node is
    /// returned untouched. New nodes are dropped next to `neighbour` if given.
    pub fn add_node(
        &mut self,
        id: &str,
        label: Option<&str>,
        neighbour: Option<NodeId>,
        node_type: NodeType,
    ) -> NodeId {
        if let Some(existing) = self.find_node(id) {
            trace!(id, "node already exists");
            return existing;
        }
        let id = self.canonical_id(id);

        let position = self.initial_position(neighbour);
        let tag = self.allocate_tag(&id);
        let handle = NodeId(self.nodes.len());

        self.nodes.push(Node::new(
            &id,
            label,
            node_type,
            tag,
            position,
            &self.physics,
        ));
        self.index_by_tag.insert(tag, handle);
        self.index_by_id.insert(id.clone(), handle);
        self.distances_dirty = true;

        debug!(%id, tag, "added node");
        handle
    }

    pub fn edges_for(&self, node: NodeId) -> Vec<EdgeId> {
        self.edges()
            .filter(|(_, edge)| edge.touches(node))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn edges_between(&self, a: NodeId, b: NodeId) -> Vec<EdgeId> {
        self.edges()
            .filter(|(_, edge)| edge.spans(a, b))
            .map(|(id, _)| id)
            .collect()
    }

    fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.edges
            .iter()
            .position(|edge| edge.spans(a, b))
            .map(EdgeId)
    }

    /// Adds a relation from `from` to `to`, reusing the edge between the two
    /// nodes if there is one. A non-undefined relation gets an undefined
    /// back-relation on `to` unless `to` already relates to `from`.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        relation_type: RelationType,
        label: &str,
    ) -> Result<EdgeId> {
        if from == to {
            let id = self.nodes[from.0].id.clone();
            warn!(%id, label, "ignored relation from a node to itself");
            return Err(GraphError::SelfRelationIgnored(id));
        }

        let edge = match self.edge_between(from, to) {
            Some(edge) => edge,
            None => {
                let handle = EdgeId(self.edges.len());
                self.edges.push(Edge::new(
                    from,
                    to,
                    self.nodes[from.0].position,
                    self.nodes[to.0].position,
                    self.physics.spring_constant,
                    self.physics.nominal_length,
                ));
                debug!(
                    from = %self.nodes[from.0].id,
                    to = %self.nodes[to.0].id,
                    "added edge"
                );
                handle
            }
        };

        let index = self.nodes[from.0].push_relation(from, to, relation_type, label, edge);
        self.edges[edge.0].add_relation(RelationRef { node: from, index });

        if relation_type != RelationType::Undefined && !self.nodes[to.0].has_relation_to(from) {
            let back = self.nodes[to.0].push_relation(to, from, RelationType::Undefined, "", edge);
            self.edges[edge.0].add_relation(RelationRef {
                node: to,
                index: back,
            });
            trace!(
                from = %self.nodes[to.0].id,
                to = %self.nodes[from.0].id,
                "added undefined back-relation"
            );
        }

        self.distances_dirty = true;
        Ok(edge)
    }

    /// Connector entry point: adds `id` next to the existing `neighbour_id`
    /// and relates the neighbour to it. Returns `false` when a new node
    /// without a label is rejected by the labelled-only policy.
    pub fn add_node_connected_to(
        &mut self,
        id: &str,
        label: Option<&str>,
        neighbour_id: &str,
        relation_type: RelationType,
        edge_label: &str,
    ) -> Result<bool> {
        let is_new = self.find_node(id).is_none();
        if is_new && self.config.only_labelled_nodes && label.is_none_or(str::is_empty) {
            debug!(id, "rejected unlabelled node");
            return Ok(false);
        }

        let neighbour = self.get_node(neighbour_id)?;
        let node = self.add_node(
            id,
            label,
            Some(neighbour),
            NodeType::for_relation(relation_type),
        );

        match self.add_edge(neighbour, node, relation_type, edge_label) {
            Ok(_) | Err(GraphError::SelfRelationIgnored(_)) => Ok(true),
            Err(error) => Err(error),
        }
    }

    pub fn add_random_nodes(&mut self, amount: usize, relations_per_node: usize) -> Vec<NodeId> {
        let mut added = Vec::with_capacity(amount);
        for _ in 0..amount {
            let id = (0..RANDOM_ID_LENGTH)
                .map(|_| self.rng.random_range(b'a'..=b'z') as char)
                .collect::<String>();
            let anchor = self.random_node();
            let node = self.add_node(&id, None, anchor, NodeType::Class);

            for _ in 0..relations_per_node {
                let Some(target) = self.random_node() else {
                    continue;
                };
                if let Err(error) = self.add_edge(node, target, RelationType::Subclass, "test") {
                    trace!(%error, "skipped random relation");
                }
            }
            added.push(node);
        }
        added
    }

    pub fn selected(&self) -> &[NodeId] {
        &self.selected
    }

    pub fn get_selected(&self) -> Option<NodeId> {
        match self.selected.as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }

    pub fn select(&mut self, node: NodeId) {
        if self.nodes[node.0].selected {
            return;
        }

        self.nodes[node.0].set_selected(true, self.config.selected_charge_factor);
        self.selected.push(node);
        debug!(id = %self.nodes[node.0].id, "selected node");
        self.compute_distances();
    }

    pub fn deselect(&mut self, node: NodeId) {
        if !self.nodes[node.0].selected {
            return;
        }

        self.nodes[node.0].set_selected(false, self.config.selected_charge_factor);
        self.selected.retain(|&selected| selected != node);
        debug!(id = %self.nodes[node.0].id, "deselected node");
        self.compute_distances();
    }

    pub fn clear_select(&mut self) {
        let factor = self.config.selected_charge_factor;
        for node in self.selected.drain(..) {
            self.nodes[node.0].set_selected(false, factor);
        }
        self.compute_distances();
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    pub fn set_hovered(&mut self, node: Option<NodeId>) {
        if self.hovered == node {
            return;
        }
        if let Some(previous) = self.hovered {
            self.nodes[previous.0].hovered = false;
        }
        if let Some(next) = node {
            self.nodes[next.0].hovered = true;
        }
        self.hovered = node;
    }

    pub fn tickle(&mut self, node: NodeId) {
        self.nodes[node.0].tickle(self.physics.decay_time);
    }

    pub fn compute_distances(&mut self) {
        distance::compute_distances(
            &mut self.nodes,
            &self.edges,
            &self.selected,
            self.config.max_node_levels,
        );
        self.distances_dirty = false;
    }

    pub fn refresh_distances(&mut self) {
        if self.distances_dirty {
            self.compute_distances();
        }
    }

    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        step_physics(
            &mut self.nodes,
            &mut self.edges,
            &self.physics,
            &mut self.physics_scratch,
            dt,
        );

        for node in &mut self.nodes {
            node.advance_decay(dt);
        }

        self.refresh_distances();
    }

    pub fn edge_endpoints(&self, edge: EdgeId) -> (Vec2, Vec2) {
        let edge = &self.edges[edge.0];
        (
            self.nodes[edge.node1.0].position,
            self.nodes[edge.node2.0].position,
        )
    }

    pub fn edge_label(&self, edge: EdgeId) -> String {
        let mut labels: Vec<&str> = Vec::new();
        for &relation in &self.edges[edge.0].relations {
            let label = self.relation(relation).display_label();
            if !label.is_empty() && !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> Graph {
        Graph::new(
            GraphConfig {
                seed: Some(11),
                ..GraphConfig::default()
            },
            PhysicsConfig::default(),
        )
    }

    fn class(graph: &mut Graph, id: &str) -> NodeId {
        graph.add_node(id, None, None, NodeType::Class)
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut graph = graph();
        let first = class(&mut graph, "A");
        let position = graph.node(first).position();
        let second = graph.add_node("A", Some("other label"), None, NodeType::Instance);

        assert_eq!(first, second);
        assert_eq!(graph.nodes_count(), 1);
        assert_eq!(graph.node(first).label(), "A");
        assert_eq!(graph.node(first).node_type(), NodeType::Class);
        assert_eq!(graph.node(first).position(), position);
    }

    #[test]
    fn relations_between_a_pair_share_one_edge() {
        let mut graph = graph();
        let a = class(&mut graph, "A");
        let b = class(&mut graph, "B");

        let first = graph.add_edge(a, b, RelationType::Instance, "loves").unwrap();
        assert_eq!(graph.edges_count(), 1);
        assert_eq!(graph.nodes_count(), 2);

        let second = graph
            .add_edge(b, a, RelationType::ObjProperty, "hates")
            .unwrap();
        let third = graph.add_edge(a, b, RelationType::Comment, "").unwrap();

        assert_eq!(first, second);
        assert_eq!(first, third);
        assert_eq!(graph.edges_count(), 1);
        assert_eq!(graph.edges_between(a, b), vec![first]);
        assert_eq!(graph.edges_between(b, a), vec![first]);

        for (_, node) in graph.nodes() {
            for relation in node.relations() {
                assert_eq!(relation.edge, first);
            }
        }
        let relation_count: usize = graph.nodes().map(|(_, node)| node.relations().len()).sum();
        assert_eq!(graph.edge(first).relation_count(), relation_count);
    }

    #[test]
    fn non_undefined_relations_get_a_back_relation() {
        let mut graph = graph();
        let a = class(&mut graph, "A");
        let b = class(&mut graph, "B");

        graph.add_edge(a, b, RelationType::Subclass, "").unwrap();

        let back = graph.node(b).relations_to(a).collect::<Vec<_>>();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].relation_type, RelationType::Undefined);

        graph.add_edge(a, b, RelationType::ObjProperty, "likes").unwrap();
        assert_eq!(graph.node(b).relations_to(a).count(), 1);
    }

    #[test]
    fn undefined_relations_do_not_get_a_back_relation() {
        let mut graph = graph();
        let a = class(&mut graph, "A");
        let b = class(&mut graph, "B");

        graph.add_edge(a, b, RelationType::Undefined, "").unwrap();
        assert!(!graph.node(b).has_relation_to(a));
    }

    #[test]
    fn self_relations_are_rejected() {
        let mut graph = graph();
        let a = class(&mut graph, "A");

        let result = graph.add_edge(a, a, RelationType::Subclass, "loop");

        assert_eq!(result, Err(GraphError::SelfRelationIgnored("A".to_owned())));
        assert_eq!(graph.edges_count(), 0);
        assert_eq!(graph.nodes_count(), 1);
        assert!(graph.node(a).relations().is_empty());
    }

    #[test]
    fn lookups_by_id_and_tag() {
        let mut graph = graph();
        let a = class(&mut graph, "oro:Animal");

        assert_eq!(graph.get_node("oro:Animal"), Ok(a));
        assert_eq!(
            graph.get_node("oro:Plant"),
            Err(GraphError::NodeNotFound("oro:Plant".to_owned()))
        );
        assert_eq!(graph.find_node("oro:Plant"), None);

        let tag = graph.node(a).tag();
        assert_eq!(graph.node_by_tag(tag), Some(a));
        assert_eq!(graph.node_by_tag(0), None);
    }

    #[test]
    fn tags_stay_unique() {
        let mut graph = graph();
        let ids = graph.add_random_nodes(200, 0);

        let mut tags = ids
            .iter()
            .map(|&id| graph.node(id).tag())
            .collect::<Vec<_>>();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), graph.nodes_count());
    }

    #[test]
    fn aliases_resolve_to_the_canonical_node() {
        let mut graph = graph();
        let dog = class(&mut graph, "oro:Dog");
        graph.add_alias("oro:Canine", "oro:Dog");

        assert_eq!(graph.find_node("oro:Canine"), Some(dog));
        assert_eq!(class(&mut graph, "oro:Canine"), dog);
        assert_eq!(graph.nodes_count(), 1);

        graph.add_alias("oro:Hound", "oro:Canine");
        assert_eq!(graph.get_node("oro:Hound"), Ok(dog));

        graph.add_alias("oro:Dog", "oro:Hound");
        assert_eq!(graph.find_node("oro:Dog"), Some(dog));
    }

    #[test]
    fn alias_over_an_existing_node_keeps_it_reachable() {
        let mut graph = graph();
        let canine = class(&mut graph, "oro:Canine");
        graph.add_alias("oro:Canine", "oro:Dog");

        assert_eq!(graph.get_node("oro:Canine"), Ok(canine));
        assert_eq!(graph.get_node("oro:Dog"), Ok(canine));
        assert_eq!(class(&mut graph, "oro:Canine"), canine);
        assert_eq!(class(&mut graph, "oro:Dog"), canine);
        assert_eq!(graph.nodes_count(), 1);
    }

    #[test]
    fn alias_between_two_existing_nodes_keeps_both() {
        let mut graph = graph();
        let dog = class(&mut graph, "oro:Dog");
        let canine = class(&mut graph, "oro:Canine");
        graph.add_alias("oro:Canine", "oro:Dog");

        assert_eq!(graph.get_node("oro:Canine"), Ok(canine));
        assert_eq!(graph.get_node("oro:Dog"), Ok(dog));
        assert_eq!(class(&mut graph, "oro:Canine"), canine);
        assert_eq!(graph.nodes_count(), 2);
    }

    #[test]
    fn connected_node_is_seeded_near_its_neighbour() {
        let mut graph = graph();
        let animal = class(&mut graph, "Animal");

        let accepted = graph
            .add_node_connected_to("Dog", Some("dog"), "Animal", RelationType::Subclass, "")
            .unwrap();
        assert!(accepted);

        let dog = graph.get_node("Dog").unwrap();
        let jitter = graph.config().neighbour_jitter;
        let offset = graph.node(dog).position() - graph.node(animal).position();
        assert!(offset.x.abs() <= jitter && offset.y.abs() <= jitter);
        assert_eq!(graph.node(dog).node_type(), NodeType::Class);
        assert!(graph.node(animal).has_relation_to(dog));
        assert!(graph.node(dog).has_relation_to(animal));
    }

    #[test]
    fn connector_insertion_reports_missing_neighbour() {
        let mut graph = graph();
        let result =
            graph.add_node_connected_to("Dog", Some("dog"), "Animal", RelationType::Subclass, "");
        assert_eq!(result, Err(GraphError::NodeNotFound("Animal".to_owned())));
    }

    #[test]
    fn labelled_only_policy_rejects_unlabelled_nodes() {
        let mut graph = Graph::new(
            GraphConfig {
                only_labelled_nodes: true,
                seed: Some(3),
                ..GraphConfig::default()
            },
            PhysicsConfig::default(),
        );
        class(&mut graph, "Animal");

        let accepted = graph
            .add_node_connected_to("Dog", None, "Animal", RelationType::Subclass, "")
            .unwrap();
        assert!(!accepted);
        assert_eq!(graph.nodes_count(), 1);
        assert_eq!(graph.edges_count(), 0);
    }

    #[test]
    fn labelled_only_policy_accepts_relations_to_existing_nodes() {
        let mut graph = Graph::new(
            GraphConfig {
                only_labelled_nodes: true,
                seed: Some(3),
                ..GraphConfig::default()
            },
            PhysicsConfig::default(),
        );
        let animal = graph.add_node("Animal", Some("animal"), None, NodeType::Class);
        let dog = graph.add_node("Dog", Some("dog"), None, NodeType::Class);

        let accepted = graph
            .add_node_connected_to("Dog", None, "Animal", RelationType::Subclass, "")
            .unwrap();
        assert!(accepted);
        assert_eq!(graph.nodes_count(), 2);
        assert_eq!(graph.edges_between(animal, dog).len(), 1);
        assert_eq!(graph.node(dog).label(), "dog");
    }

    #[test]
    fn star_distances_from_selected_centre() {
        let mut graph = graph();
        let centre = class(&mut graph, "C");
        let leaves = (0..5)
            .map(|index| {
                let leaf = class(&mut graph, &format!("leaf{index}"));
                graph
                    .add_edge(centre, leaf, RelationType::Instance, "")
                    .unwrap();
                leaf
            })
            .collect::<Vec<_>>();

        graph.compute_distances();
        for (_, node) in graph.nodes() {
            assert_eq!(node.distance_to_selected(), -1);
        }

        graph.select(centre);
        assert_eq!(graph.node(centre).distance_to_selected(), 0);
        for leaf in &leaves {
            assert_eq!(graph.node(*leaf).distance_to_selected(), 1);
        }

        graph.clear_select();
        for (_, node) in graph.nodes() {
            assert_eq!(node.distance_to_selected(), -1);
        }
    }

    #[test]
    fn distances_take_the_nearest_selected_node() {
        let mut graph = graph();
        let chain = (0..7)
            .map(|index| class(&mut graph, &format!("n{index}")))
            .collect::<Vec<_>>();
        for pair in chain.windows(2) {
            graph
                .add_edge(pair[0], pair[1], RelationType::Subclass, "")
                .unwrap();
        }

        graph.select(chain[0]);
        graph.select(chain[6]);

        let distances = chain
            .iter()
            .map(|&id| graph.node(id).distance_to_selected())
            .collect::<Vec<_>>();
        assert_eq!(distances, vec![0, 1, 2, 3, 2, 1, 0]);
    }

    #[test]
    fn distances_are_capped_for_far_and_unreachable_nodes() {
        let mut graph = Graph::new(
            GraphConfig {
                max_node_levels: 2,
                seed: Some(5),
                ..GraphConfig::default()
            },
            PhysicsConfig::default(),
        );
        let chain = (0..5)
            .map(|index| class(&mut graph, &format!("n{index}")))
            .collect::<Vec<_>>();
        for pair in chain.windows(2) {
            graph
                .add_edge(pair[0], pair[1], RelationType::Superclass, "")
                .unwrap();
        }
        let island = class(&mut graph, "island");

        graph.select(chain[0]);

        let distances = chain
            .iter()
            .map(|&id| graph.node(id).distance_to_selected())
            .collect::<Vec<_>>();
        assert_eq!(distances, vec![0, 1, 2, 2, 2]);
        assert_eq!(graph.node(island).distance_to_selected(), 2);
    }

    #[test]
    fn distances_follow_edges_against_relation_direction() {
        let mut graph = graph();
        let a = class(&mut graph, "A");
        let b = class(&mut graph, "B");
        graph.add_edge(a, b, RelationType::Undefined, "").unwrap();
        assert!(!graph.node(b).has_relation_to(a));

        graph.select(b);
        assert_eq!(graph.node(a).distance_to_selected(), 1);
    }

    #[test]
    fn structural_changes_refresh_distances_on_next_step() {
        let mut graph = graph();
        let a = class(&mut graph, "A");
        graph.select(a);

        let b = class(&mut graph, "B");
        graph.add_edge(a, b, RelationType::Instance, "").unwrap();
        graph.step(1.0 / 60.0);

        assert_eq!(graph.node(b).distance_to_selected(), 1);
    }

    #[test]
    fn refresh_distances_only_runs_after_changes() {
        let mut graph = graph();
        let a = class(&mut graph, "A");
        graph.select(a);

        let b = class(&mut graph, "B");
        graph.add_edge(a, b, RelationType::Instance, "").unwrap();
        assert_eq!(graph.node(b).distance_to_selected(), -1);

        graph.refresh_distances();
        assert_eq!(graph.node(b).distance_to_selected(), 1);
    }

    #[test]
    fn selection_boosts_charge_and_tracks_single_focus() {
        let mut graph = graph();
        let a = class(&mut graph, "A");
        let b = class(&mut graph, "B");
        let base = graph.node(a).charge();
        let factor = graph.config().selected_charge_factor;

        graph.select(a);
        graph.select(a);
        assert_eq!(graph.node(a).charge(), base * factor);
        assert_eq!(graph.get_selected(), Some(a));

        graph.select(b);
        assert_eq!(graph.get_selected(), None);
        assert_eq!(graph.selected(), &[a, b]);

        graph.deselect(a);
        assert_eq!(graph.node(a).charge(), base);
        assert!(!graph.node(a).is_selected());
        assert_eq!(graph.get_selected(), Some(b));

        graph.clear_select();
        assert_eq!(graph.get_selected(), None);
        assert_eq!(graph.node(b).charge(), base);
    }

    #[test]
    fn hover_flag_follows_the_hovered_node() {
        let mut graph = graph();
        let a = class(&mut graph, "A");
        let b = class(&mut graph, "B");

        graph.set_hovered(Some(a));
        assert!(graph.node(a).is_hovered());

        graph.set_hovered(Some(b));
        assert!(!graph.node(a).is_hovered());
        assert!(graph.node(b).is_hovered());

        graph.set_hovered(None);
        assert!(!graph.node(b).is_hovered());
        assert_eq!(graph.hovered(), None);
    }

    #[test]
    fn edge_queries_and_labels() {
        let mut graph = graph();
        let a = class(&mut graph, "A");
        let b = class(&mut graph, "B");
        let c = class(&mut graph, "C");

        let ab = graph.add_edge(a, b, RelationType::Instance, "loves").unwrap();
        graph.add_edge(b, a, RelationType::ObjProperty, "hates").unwrap();
        graph.add_edge(a, b, RelationType::ObjProperty, "loves").unwrap();
        let bc = graph.add_edge(b, c, RelationType::Subclass, "").unwrap();

        assert_eq!(graph.edges_for(b), vec![ab, bc]);
        assert_eq!(graph.edges_for(c), vec![bc]);
        assert!(graph.edges_between(a, c).is_empty());
        assert_eq!(graph.edge_label(ab), "loves, hates");
        assert_eq!(graph.edge_label(bc), "subclass");
    }

    #[test]
    fn random_nodes_grow_the_graph() {
        let mut graph = graph();
        assert_eq!(graph.random_node(), None);

        let added = graph.add_random_nodes(10, 1);
        assert_eq!(added.len(), 10);
        assert_eq!(graph.nodes_count(), 10);
        assert!(graph.edges_count() <= 10);
        for id in added {
            assert_eq!(graph.node(id).id().len(), RANDOM_ID_LENGTH);
        }
    }

    #[test]
    fn tickle_relaxes_during_steps() {
        let mut graph = graph();
        let a = class(&mut graph, "A");
        graph.tickle(a);
        assert_eq!(graph.node(a).decay_ratio(), 1.0);

        let decay_time = graph.physics().decay_time;
        let steps = (decay_time * 60.0).ceil() as usize + 1;
        for _ in 0..steps {
            graph.step(1.0 / 60.0);
        }
        assert_eq!(graph.node(a).decay_ratio(), 0.0);
        assert!(!graph.node(a).decay().decaying);
    }

    #[test]
    fn spring_parameters_reach_existing_edges() {
        let mut graph = graph();
        let a = class(&mut graph, "A");
        let b = class(&mut graph, "B");
        let edge = graph.add_edge(a, b, RelationType::Instance, "").unwrap();

        graph.set_spring_parameters(3.0, 25.0);
        assert_eq!(graph.edge(edge).spring_constant(), 3.0);
        assert_eq!(graph.edge(edge).nominal_length(), 25.0);
    }
}
