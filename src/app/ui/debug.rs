use eframe::egui::{self, RichText, Ui};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_debug(&self, ui: &mut Ui) {
        ui.heading("Debug");
        ui.add_space(6.0);

        ui.label(format!("Nodes: {}", self.graph.nodes_count()));
        ui.label(format!("Edges: {}", self.graph.edges_count()));
        ui.label(format!("Selected: {}", self.graph.selected().len()));
        ui.label(format!("Zoom: {:.2}", self.zoom));
        ui.label(if self.paused {
            "Simulation paused"
        } else {
            "Simulation running"
        });

        ui.separator();
        let Some(selected) = self.graph.get_selected() else {
            ui.label("Select a single node to inspect it.");
            return;
        };

        let node = self.graph.node(selected);
        ui.label(RichText::new(node.label()).strong());
        ui.small(node.id());
        ui.add_space(6.0);

        ui.label(format!("Type: {:?}", node.node_type()));
        ui.label(format!("Tag: {}", node.tag()));
        ui.label(format!(
            "Position: ({:.1}, {:.1})",
            node.position().x,
            node.position().y
        ));
        ui.label(format!(
            "Velocity: ({:.2}, {:.2})",
            node.velocity().x,
            node.velocity().y
        ));
        ui.label(format!("Charge: {:.2}", node.charge()));
        ui.label(format!("Kinetic energy: {:.3}", node.kinetic_energy()));
        ui.label(format!("Decay: {:.2}", node.decay_ratio()));
        ui.label(format!("Relations: {}", node.relations().len()));

        ui.separator();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for relation in node.relations() {
                    let target = self.graph.node(relation.to);
                    let label = relation.display_label();
                    if label.is_empty() {
                        ui.label(format!("- {}", target.label()));
                    } else {
                        ui.label(format!("- {label} -> {}", target.label()));
                    }
                }
            });
    }
}
