use std::collections::HashSet;

use eframe::egui::epaint::QuadraticBezierShape;
use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};

use oroview::graph::NodeId;

use super::super::ViewModel;
use super::super::render_utils::{
    blend_color, circle_visible, curve_control, curve_visible, dim_color, distance_fade,
    draw_background, node_color, node_radius, world_to_screen,
};

impl ViewModel {
    fn update_screen_space(&mut self, rect: egui::Rect) {
        let scratch = &mut self.view_scratch;
        scratch.tags.clear();
        scratch.screen_positions.clear();
        scratch.screen_radii.clear();

        for (_, node) in self.graph.nodes() {
            scratch.tags.push(node.tag());
            scratch
                .screen_positions
                .push(world_to_screen(rect, self.pan, self.zoom, node.position()));
            scratch
                .screen_radii
                .push(node_radius(self.zoom, node.decay_ratio()));
        }
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);
        self.update_screen_space(rect);
        self.collect_visible(rect);

        let picked = self.graph.node_by_tag(self.picked_tag(ui));
        self.graph.set_hovered(picked);
        if picked.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }
        self.handle_graph_click(ui, &response, picked);

        let search_matches = self
            .search_matches()
            .into_iter()
            .map(|(node, _)| node)
            .collect::<HashSet<NodeId>>();
        let search_active = !search_matches.is_empty();
        let max_levels = self.graph.config().max_node_levels;
        let zoom_sqrt = self.zoom.sqrt();
        let show_edge_labels = self.zoom > 1.2;

        for (edge_id, edge) in self.graph.edges() {
            let first = self.graph.node(edge.node1());
            let second = self.graph.node(edge.node2());
            let start = self.view_scratch.screen_positions[edge.node1().index()];
            let end = self.view_scratch.screen_positions[edge.node2().index()];
            let anchor = world_to_screen(rect, self.pan, self.zoom, edge.anchor());
            let control = curve_control(start, anchor, end);
            if !curve_visible(rect, [start, control, end], 2.0) {
                continue;
            }

            let focused = first.is_selected()
                || second.is_selected()
                || first.is_hovered()
                || second.is_hovered();
            let fade = distance_fade(
                first.distance_to_selected().min(second.distance_to_selected()),
                max_levels,
            );
            let (width, color) = if focused {
                (
                    (1.8 * zoom_sqrt).clamp(1.0, 4.0),
                    Color32::from_rgb(241, 146, 94),
                )
            } else {
                (
                    (1.1 * zoom_sqrt).clamp(0.6, 3.0),
                    dim_color(Color32::from_rgba_unmultiplied(120, 126, 138, 200), fade),
                )
            };

            painter.add(QuadraticBezierShape::from_points_stroke(
                [start, control, end],
                false,
                Color32::TRANSPARENT,
                Stroke::new(width, color),
            ));

            if focused || show_edge_labels {
                let label = self.graph.edge_label(edge_id);
                if !label.is_empty() {
                    painter.text(
                        anchor,
                        Align2::CENTER_CENTER,
                        label,
                        FontId::proportional(11.0),
                        dim_color(Color32::from_gray(210), fade),
                    );
                }
            }
        }

        let selected_color = Color32::from_rgb(245, 206, 93);
        for (index, (node_id, node)) in self.graph.nodes().enumerate() {
            let position = self.view_scratch.screen_positions[index];
            let radius = self.view_scratch.screen_radii[index];
            if !circle_visible(rect, position, radius) {
                continue;
            }

            let is_match = search_matches.contains(&node_id);
            let base_color = node_color(node.node_type());
            let color = if node.is_selected() {
                selected_color
            } else if node.is_hovered() {
                Color32::from_rgb(255, 164, 101)
            } else if is_match {
                blend_color(base_color, Color32::from_rgb(103, 196, 255), 0.68)
            } else if search_active {
                dim_color(base_color, 0.4)
            } else {
                dim_color(base_color, distance_fade(node.distance_to_selected(), max_levels))
            };

            painter.circle_filled(position, radius, color);
            if node.decay_ratio() > 0.0 {
                let alpha = (node.decay_ratio() * 180.0) as u8;
                painter.circle_stroke(
                    position,
                    radius + 3.0 + (1.0 - node.decay_ratio()) * 8.0,
                    Stroke::new(1.4, Color32::from_rgba_unmultiplied(245, 206, 93, alpha)),
                );
            }
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(
                    if node.is_selected() { 2.2 } else { 1.0 },
                    Color32::from_rgba_unmultiplied(15, 15, 15, 190),
                ),
            );

            let should_draw_label = node.is_selected()
                || node.is_hovered()
                || is_match
                || node.distance_to_selected() == 1
                || self.zoom > 0.8;
            if should_draw_label {
                painter.text(
                    position + vec2(radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    node.label(),
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }

        if let Some(hovered) = self.graph.hovered() {
            let node = self.graph.node(hovered);
            let panel_text = format!(
                "{}  |  {}  |  relations {}",
                node.label(),
                node.id(),
                node.relations().len()
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                panel_text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if self.paused {
            painter.text(
                rect.right_top() + vec2(-10.0, 10.0),
                Align2::RIGHT_TOP,
                "paused",
                FontId::proportional(13.0),
                Color32::from_gray(200),
            );
        }
    }
}
