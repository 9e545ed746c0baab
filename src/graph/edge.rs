use eframe::egui::Vec2;

use super::NodeId;
use super::relation::RelationRef;

#[derive(Clone, Debug)]
pub struct Edge {
    pub(crate) node1: NodeId,
    pub(crate) node2: NodeId,
    pub(crate) relations: Vec<RelationRef>,
    pub(crate) length: f32,
    pub(crate) spring_constant: f32,
    pub(crate) nominal_length: f32,
    pub(crate) anchor: Vec2,
}

impl Edge {
    pub(crate) fn new(
        node1: NodeId,
        node2: NodeId,
        pos1: Vec2,
        pos2: Vec2,
        spring_constant: f32,
        nominal_length: f32,
    ) -> Self {
        Self {
            node1,
            node2,
            relations: Vec::new(),
            length: (pos2 - pos1).length(),
            spring_constant,
            nominal_length,
            anchor: (pos1 + pos2) * 0.5,
        }
    }

    pub fn node1(&self) -> NodeId {
        self.node1
    }

    pub fn node2(&self) -> NodeId {
        self.node2
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn spring_constant(&self) -> f32 {
        self.spring_constant
    }

    pub fn nominal_length(&self) -> f32 {
        self.nominal_length
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn relations(&self) -> &[RelationRef] {
        &self.relations
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.node1 == node || self.node2 == node
    }

    pub fn spans(&self, a: NodeId, b: NodeId) -> bool {
        (self.node1 == a && self.node2 == b) || (self.node1 == b && self.node2 == a)
    }

    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.node1 == node {
            Some(self.node2)
        } else if self.node2 == node {
            Some(self.node1)
        } else {
            None
        }
    }

    pub(crate) fn add_relation(&mut self, relation: RelationRef) {
        if !self.relations.contains(&relation) {
            self.relations.push(relation);
        }
    }

    pub(crate) fn step(&mut self, pos1: Vec2, pos2: Vec2, dt: f32, smoothing: f32) {
        debug_assert!(
            !self.relations.is_empty(),
            "edge between {:?} and {:?} has no backing relation",
            self.node1,
            self.node2
        );

        self.length = (pos2 - pos1).length();

        let midpoint = (pos1 + pos2) * 0.5;
        let follow = (smoothing * dt).clamp(0.0, 1.0);
        self.anchor += (midpoint - self.anchor) * follow;
    }
}
