use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};

use eframe::egui::{self, Context, Pos2, Vec2};
use tracing::{info, warn};

use oroview::config::{Config, ViewerConfig};
use oroview::connector::{ActiveConcepts, ConnectorEvent, apply_event, spawn_snapshot_loader};
use oroview::graph::Graph;

mod graph;
mod render_utils;
mod ui;

const MAX_FRAME_DT: f32 = 1.0 / 20.0;

pub struct OroViewApp {
    config: Config,
    snapshot: Option<PathBuf>,
    model: ViewModel,
}

struct ViewModel {
    graph: Graph,
    viewer: ViewerConfig,
    active: ActiveConcepts,
    events: Option<Receiver<Result<ConnectorEvent, String>>>,
    load_error: Option<String>,
    status: Option<String>,
    search: String,
    pan: Vec2,
    zoom: f32,
    paused: bool,
    show_debug: bool,
    view_scratch: ViewScratch,
}

#[derive(Default)]
struct ViewScratch {
    tags: Vec<u32>,
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
    visible_indices: Vec<usize>,
}

impl OroViewApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config, snapshot: Option<PathBuf>) -> Self {
        let model = Self::start_model(&config, snapshot.clone());
        Self {
            config,
            snapshot,
            model,
        }
    }

    fn start_model(config: &Config, snapshot: Option<PathBuf>) -> ViewModel {
        let mut model = ViewModel::new(config);
        if let Some(path) = snapshot {
            info!(path = %path.display(), "streaming ontology snapshot");
            model.events = Some(spawn_snapshot_loader(path, model.active.clone()));
        }
        model
    }
}

impl eframe::App for OroViewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|input| input.stable_dt).clamp(0.0, MAX_FRAME_DT);
        self.model.tick(dt);

        let mut reload_requested = false;
        self.model
            .show(ctx, self.snapshot.is_some(), &mut reload_requested);

        if reload_requested {
            self.model = Self::start_model(&self.config, self.snapshot.clone());
        }

        if !self.model.paused || self.model.events.is_some() {
            ctx.request_repaint();
        }
    }
}

impl ViewModel {
    fn new(config: &Config) -> Self {
        Self {
            graph: Graph::new(config.graph.clone(), config.physics),
            viewer: config.viewer.clone(),
            active: ActiveConcepts::new(),
            events: None,
            load_error: None,
            status: None,
            search: String::new(),
            pan: Vec2::ZERO,
            zoom: 1.0,
            paused: false,
            show_debug: false,
            view_scratch: ViewScratch::default(),
        }
    }

    /// One logic tick: connector events, active concepts, then physics.
    /// Active ids wait in the inbox until the loader has drained, so they
    /// are not dropped before their nodes exist.
    fn tick(&mut self, dt: f32) {
        self.pump_events();
        if self.events.is_none() {
            self.active.tickle_pending(&mut self.graph);
        }
        if !self.paused {
            self.graph.step(dt);
        }
        self.graph.refresh_distances();
    }

    fn pump_events(&mut self) {
        let Some(rx) = self.events.take() else {
            return;
        };

        let budget = self.viewer.events_per_frame.max(1);
        let mut applied = 0;
        let mut connected = true;
        while applied < budget {
            match rx.try_recv() {
                Ok(Ok(event)) => {
                    if let Err(error) = apply_event(&mut self.graph, event) {
                        warn!(%error, "skipped connector event");
                    }
                    applied += 1;
                }
                Ok(Err(error)) => {
                    warn!(%error, "snapshot loader failed");
                    self.load_error = Some(error);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    connected = false;
                    break;
                }
            }
        }

        if connected {
            self.events = Some(rx);
        } else {
            info!(
                nodes = self.graph.nodes_count(),
                edges = self.graph.edges_count(),
                "connector finished"
            );
        }
    }

    fn show(&mut self, ctx: &Context, can_reload: bool, reload_requested: &mut bool) {
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| self.draw_top_bar(ui, can_reload, reload_requested));

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        if self.show_debug {
            egui::SidePanel::right("debug")
                .resizable(true)
                .default_width(320.0)
                .show(ctx, |ui| self.draw_debug(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use oroview::config::GraphConfig;
    use oroview::graph::{NodeType, RelationType};

    use super::*;

    fn model(events_per_frame: usize) -> ViewModel {
        let config = Config {
            graph: GraphConfig {
                seed: Some(4),
                ..GraphConfig::default()
            },
            viewer: ViewerConfig {
                events_per_frame,
                ..ViewerConfig::default()
            },
            ..Config::default()
        };
        ViewModel::new(&config)
    }

    fn add_node(id: &str) -> Result<ConnectorEvent, String> {
        Ok(ConnectorEvent::AddNode {
            id: id.to_owned(),
            label: None,
            node_type: NodeType::Class,
        })
    }

    #[test]
    fn events_are_applied_within_the_frame_budget() {
        let mut model = model(2);
        let (tx, rx) = mpsc::channel();
        for id in ["a", "b", "c"] {
            tx.send(add_node(id)).unwrap();
        }
        drop(tx);
        model.events = Some(rx);

        model.tick(1.0 / 60.0);
        assert_eq!(model.graph.nodes_count(), 2);
        assert!(model.events.is_some());

        model.tick(1.0 / 60.0);
        assert_eq!(model.graph.nodes_count(), 3);

        model.tick(1.0 / 60.0);
        assert!(model.events.is_none());
    }

    #[test]
    fn loader_errors_are_kept_for_display() {
        let mut model = model(8);
        let (tx, rx) = mpsc::channel();
        tx.send(Err("failed to read snapshot".to_owned())).unwrap();
        drop(tx);
        model.events = Some(rx);

        model.tick(1.0 / 60.0);
        assert_eq!(model.load_error.as_deref(), Some("failed to read snapshot"));
        assert!(model.events.is_none());
    }

    #[test]
    fn active_concepts_are_tickled_on_tick() {
        let mut model = model(8);
        let node = model.graph.add_node("oro:Dog", None, None, NodeType::Class);
        model.active.notify("oro:Dog");
        model.paused = true;

        model.tick(1.0 / 60.0);
        assert_eq!(model.graph.node(node).decay_ratio(), 1.0);
        assert!(model.active.is_empty());
    }

    #[test]
    fn distances_refresh_while_paused() {
        let mut model = model(8);
        let root = model.graph.add_node("oro:Animal", None, None, NodeType::Class);
        model.graph.select(root);
        model.paused = true;

        let (tx, rx) = mpsc::channel();
        tx.send(Ok(ConnectorEvent::AddNodeConnectedTo {
            id: "oro:Dog".to_owned(),
            label: None,
            neighbour: "oro:Animal".to_owned(),
            relation_type: RelationType::Subclass,
            edge_label: String::new(),
        }))
        .unwrap();
        drop(tx);
        model.events = Some(rx);

        model.tick(1.0 / 60.0);
        let dog = model.graph.find_node("oro:Dog").unwrap();
        assert_eq!(model.graph.node(dog).distance_to_selected(), 1);
    }

    #[test]
    fn active_concepts_wait_for_queued_events() {
        let mut model = model(1);
        let (tx, rx) = mpsc::channel();
        for id in ["oro:Cat", "oro:Dog"] {
            tx.send(add_node(id)).unwrap();
        }
        drop(tx);
        model.events = Some(rx);
        model.active.notify("oro:Dog");
        model.paused = true;

        model.tick(1.0 / 60.0);
        assert!(!model.active.is_empty());

        model.tick(1.0 / 60.0);
        model.tick(1.0 / 60.0);
        let dog = model.graph.find_node("oro:Dog").unwrap();
        assert_eq!(model.graph.node(dog).decay_ratio(), 1.0);
        assert!(model.active.is_empty());
    }
}
