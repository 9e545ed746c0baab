use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::connector::LiteralDedup;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub physics: PhysicsConfig,
    pub graph: GraphConfig,
    pub viewer: ViewerConfig,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub coulomb_constant: f32,
    /// Lower bound on the squared distance in Coulomb repulsion.
    pub min_distance_sq: f32,
    pub spring_constant: f32,
    pub nominal_length: f32,
    pub centering_strength: f32,
    pub mass: f32,
    pub charge: f32,
    pub damping: f32,
    pub max_speed: f32,
    pub min_kinetic_energy: f32,
    pub tickle_charge_factor: f32,
    /// Seconds for a tickled node to relax back to baseline.
    pub decay_time: f32,
    pub anchor_smoothing: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            coulomb_constant: 20_000.0,
            min_distance_sq: 0.01,
            spring_constant: 10.0,
            nominal_length: 60.0,
            centering_strength: 5.0,
            mass: 1.0,
            charge: 1.0,
            damping: 0.9,
            max_speed: 400.0,
            min_kinetic_energy: 0.5,
            tickle_charge_factor: 2.0,
            decay_time: 2.0,
            anchor_smoothing: 4.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub max_node_levels: i32,
    pub selected_charge_factor: f32,
    /// Half-width of the square new unconnected nodes are dropped in.
    pub initial_spread: f32,
    /// Half-width of the jitter around a neighbour for connected nodes.
    pub neighbour_jitter: f32,
    pub only_labelled_nodes: bool,
    pub literal_dedup: LiteralDedup,
    pub seed: Option<u64>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_node_levels: 5,
            selected_charge_factor: 3.0,
            initial_spread: 200.0,
            neighbour_jitter: 20.0,
            only_labelled_nodes: false,
            literal_dedup: LiteralDedup::ByValue,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window_size: [f32; 2],
    pub events_per_frame: usize,
    pub random_nodes_per_key: usize,
    pub random_relations_per_node: usize,
    pub export_path: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_size: [1280.0, 860.0],
            events_per_frame: 16,
            random_nodes_per_key: 2,
            random_relations_per_node: 1,
            export_path: PathBuf::from("oroview.dot"),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&raw).with_context(|| format!("invalid config file {}", path.display()))
}

pub fn parse_config(raw: &str) -> Result<Config> {
    serde_json::from_str(raw).context("invalid JSON configuration")
}
