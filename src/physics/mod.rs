mod forces;

use eframe::egui::Vec2;

use crate::config::PhysicsConfig;
use crate::graph::{Edge, Node};

pub use forces::{centering_force, coulomb_force, hooke_force, project};
use forces::fallback_direction;

#[derive(Default)]
pub(crate) struct PhysicsScratch {
    forces: Vec<Vec2>,
    charges: Vec<f32>,
}

/// Advances every node by one tick and refreshes edge lengths and anchors.
///
/// Unselected nodes feel Coulomb repulsion from every other node; selected
/// nodes feel centering gravity instead. Every node feels the springs of the
/// edges touching it.
pub(crate) fn step_physics(
    nodes: &mut [Node],
    edges: &mut [Edge],
    config: &PhysicsConfig,
    scratch: &mut PhysicsScratch,
    dt: f32,
) {
    let node_count = nodes.len();
    if node_count == 0 {
        return;
    }

    let coulomb_constant = config.coulomb_constant.max(0.0);
    let min_distance_sq = config.min_distance_sq.max(f32::EPSILON);
    let centering_strength = config.centering_strength.max(0.0);
    let max_speed = config.max_speed.abs().max(0.0);
    let min_kinetic_energy = config.min_kinetic_energy.max(0.0);

    let forces = &mut scratch.forces;
    forces.clear();
    forces.resize(node_count, Vec2::ZERO);

    let charges = &mut scratch.charges;
    charges.clear();
    charges.extend(
        nodes
            .iter()
            .map(|node| node.effective_charge(config.tickle_charge_factor)),
    );

    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let i_free = !nodes[i].selected;
            let j_free = !nodes[j].selected;
            if !i_free && !j_free {
                continue;
            }

            let force = coulomb_force(
                nodes[i].position,
                nodes[j].position,
                charges[i],
                charges[j],
                coulomb_constant,
                min_distance_sq,
                fallback_direction(i, j),
            );
            if i_free {
                forces[i] += force;
            }
            if j_free {
                forces[j] -= force;
            }
        }
    }

    for edge in edges.iter() {
        let (first, second) = (edge.node1.index(), edge.node2.index());
        let force = hooke_force(
            nodes[first].position,
            nodes[second].position,
            edge.spring_constant,
            edge.nominal_length,
        );
        forces[first] += force;
        forces[second] -= force;
    }

    for (node, force) in nodes.iter_mut().zip(forces.iter_mut()) {
        if node.selected {
            *force += centering_force(node.position, centering_strength);
        }
        integrate(node, *force, dt, max_speed, min_kinetic_energy);
    }

    for edge in edges.iter_mut() {
        let first = nodes[edge.node1.index()].position;
        let second = nodes[edge.node2.index()].position;
        edge.step(first, second, dt, config.anchor_smoothing);
    }
}

/// Damped explicit Euler step. Nodes whose kinetic energy stays at or below
/// `min_kinetic_energy` keep their position exactly.
pub(crate) fn integrate(
    node: &mut Node,
    force: Vec2,
    dt: f32,
    max_speed: f32,
    min_kinetic_energy: f32,
) {
    let force = if force.x.is_finite() && force.y.is_finite() {
        force
    } else {
        Vec2::ZERO
    };

    let mut velocity = (node.velocity + force * dt) * node.damping;
    velocity.x = velocity.x.clamp(-max_speed, max_speed);
    velocity.y = velocity.y.clamp(-max_speed, max_speed);

    node.velocity = velocity;
    node.kinetic_energy = node.mass * velocity.length_sq();
    if node.kinetic_energy > min_kinetic_energy {
        node.position += velocity * dt;
    }
}
