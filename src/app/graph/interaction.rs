use eframe::egui::{self, Context, Key, Rect, Ui};
use tracing::debug;

use oroview::graph::NodeId;

use super::super::ViewModel;
use super::super::render_utils::{circle_visible, screen_to_world};

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.1, 6.0);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    pub(in crate::app) fn collect_visible(&mut self, rect: Rect) {
        let scratch = &mut self.view_scratch;
        scratch.visible_indices.clear();
        scratch.visible_indices.extend(
            (0..scratch.screen_positions.len()).filter(|&index| {
                circle_visible(rect, scratch.screen_positions[index], scratch.screen_radii[index])
            }),
        );
    }

    /// Tag of the visible node under the pointer, 0 when there is none.
    pub(in crate::app) fn picked_tag(&self, ui: &Ui) -> u32 {
        let Some(pointer) = ui.input(|input| input.pointer.hover_pos()) else {
            return 0;
        };

        let scratch = &self.view_scratch;
        scratch
            .visible_indices
            .iter()
            .filter_map(|&index| {
                let distance = scratch.screen_positions[index].distance(pointer);
                (distance <= scratch.screen_radii[index]).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(0, |(index, _)| scratch.tags[index])
    }

    pub(in crate::app) fn handle_graph_click(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        picked: Option<NodeId>,
    ) {
        if !response.clicked_by(egui::PointerButton::Primary) {
            return;
        }

        let additive = ui.input(|input| input.modifiers.shift);
        match picked {
            Some(node) if additive => {
                if self.graph.node(node).is_selected() {
                    self.graph.deselect(node);
                } else {
                    self.graph.select(node);
                }
            }
            Some(node) => {
                self.graph.clear_select();
                self.graph.select(node);
            }
            None => self.graph.clear_select(),
        }
    }

    pub(in crate::app) fn add_random_nodes(&mut self) {
        let added = self.graph.add_random_nodes(
            self.viewer.random_nodes_per_key,
            self.viewer.random_relations_per_node,
        );
        debug!(count = added.len(), "added random nodes");
    }

    pub(in crate::app) fn handle_shortcuts(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let (space, pause, debug_panel, escape) = ctx.input(|input| {
            (
                input.key_pressed(Key::Space),
                input.key_pressed(Key::P),
                input.key_pressed(Key::D),
                input.key_pressed(Key::Escape),
            )
        });

        if space {
            self.add_random_nodes();
        }
        if pause {
            self.paused = !self.paused;
        }
        if debug_panel {
            self.show_debug = !self.show_debug;
        }
        if escape {
            self.graph.clear_select();
        }
    }
}
