pub mod config;
pub mod connector;
pub mod graph;
pub mod physics;
pub mod util;
