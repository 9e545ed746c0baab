use eframe::egui::Vec2;
use serde::Deserialize;

use crate::config::PhysicsConfig;
use crate::util::{sanitize_id, short_name};

use super::relation::{NodeRelation, RelationType};
use super::{EdgeId, NodeId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Class,
    Instance,
    Literal,
    #[default]
    Undefined,
}

impl NodeType {
    pub fn for_relation(relation_type: RelationType) -> Self {
        match relation_type {
            RelationType::Subclass | RelationType::Superclass | RelationType::Class => {
                Self::Class
            }
            RelationType::Instance => Self::Instance,
            RelationType::DataProperty | RelationType::Comment => Self::Literal,
            RelationType::Property | RelationType::ObjProperty | RelationType::Undefined => {
                Self::Undefined
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DecayState {
    pub ratio: f32,
    pub speed: f32,
    pub decaying: bool,
    pub elapsed: f32,
}

impl DecayState {
    fn start(&mut self, decay_time: f32) {
        self.ratio = 1.0;
        self.elapsed = 0.0;
        self.speed = 1.0 / decay_time.max(0.001);
        self.decaying = true;
    }

    fn advance(&mut self, dt: f32) {
        if !self.decaying {
            return;
        }

        self.elapsed += dt;
        self.ratio = (1.0 - self.elapsed * self.speed).max(0.0);
        if self.ratio <= 0.0 {
            self.decaying = false;
        }
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) id: String,
    pub(crate) sanitized_id: String,
    pub(crate) label: String,
    pub(crate) node_type: NodeType,
    pub(crate) tag: u32,
    pub(crate) relations: Vec<NodeRelation>,

    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) mass: f32,
    pub(crate) damping: f32,
    pub(crate) charge: f32,
    pub(crate) kinetic_energy: f32,

    pub(crate) selected: bool,
    pub(crate) hovered: bool,
    pub(crate) distance_to_selected: i32,
    pub(crate) decay: DecayState,
}

impl Node {
    pub(crate) fn new(
        id: &str,
        label: Option<&str>,
        node_type: NodeType,
        tag: u32,
        position: Vec2,
        physics: &PhysicsConfig,
    ) -> Self {
        let label = label
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| short_name(id))
            .to_owned();

        Self {
            id: id.to_owned(),
            sanitized_id: sanitize_id(id),
            label,
            node_type,
            tag,
            relations: Vec::new(),
            position,
            velocity: Vec2::ZERO,
            mass: physics.mass.max(f32::EPSILON),
            damping: physics.damping.clamp(0.01, 0.99),
            charge: physics.charge,
            kinetic_energy: 0.0,
            selected: false,
            hovered: false,
            distance_to_selected: -1,
            decay: DecayState::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sanitized_id(&self) -> &str {
        &self.sanitized_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn tag(&self) -> u32 {
        self.tag
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn charge(&self) -> f32 {
        self.charge
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.kinetic_energy
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Hops to the nearest selected node, `-1` when nothing is selected.
    pub fn distance_to_selected(&self) -> i32 {
        self.distance_to_selected
    }

    pub fn decay(&self) -> DecayState {
        self.decay
    }

    pub fn decay_ratio(&self) -> f32 {
        self.decay.ratio
    }

    pub fn relations(&self) -> &[NodeRelation] {
        &self.relations
    }

    pub fn relations_to(&self, other: NodeId) -> impl Iterator<Item = &NodeRelation> {
        self.relations.iter().filter(move |relation| relation.to == other)
    }

    pub fn has_relation_to(&self, other: NodeId) -> bool {
        self.relations_to(other).next().is_some()
    }

    pub fn connected_nodes(&self) -> Vec<NodeId> {
        let mut connected = Vec::with_capacity(self.relations.len());
        for relation in &self.relations {
            if !connected.contains(&relation.to) {
                connected.push(relation.to);
            }
        }
        connected
    }

    pub fn effective_charge(&self, tickle_charge_factor: f32) -> f32 {
        self.charge * (1.0 + (tickle_charge_factor - 1.0) * self.decay.ratio)
    }

    pub(crate) fn push_relation(
        &mut self,
        self_id: NodeId,
        to: NodeId,
        relation_type: RelationType,
        label: &str,
        edge: EdgeId,
    ) -> usize {
        self.relations.push(NodeRelation {
            from: self_id,
            to,
            relation_type,
            label: label.to_owned(),
            edge,
        });
        self.relations.len() - 1
    }

    pub(crate) fn set_selected(&mut self, selected: bool, charge_factor: f32) {
        if self.selected == selected {
            return;
        }

        let factor = charge_factor.max(f32::EPSILON);
        if selected {
            self.charge *= factor;
        } else {
            self.charge /= factor;
        }
        self.selected = selected;
    }

    pub(crate) fn tickle(&mut self, decay_time: f32) {
        self.decay.start(decay_time);
    }

    pub(crate) fn advance_decay(&mut self, dt: f32) {
        self.decay.advance(dt);
    }
}
