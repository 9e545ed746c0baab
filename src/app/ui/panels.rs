use eframe::egui::{self, Align, Key, Layout, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use oroview::graph::NodeId;
use oroview::util::short_name;

use super::super::ViewModel;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    /// Nodes whose label or short name match the search box, best first.
    pub(in crate::app) fn search_matches(&self) -> Vec<(NodeId, i64)> {
        let query = self.search.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let matcher = SkimMatcherV2::default();
        let mut matches = self
            .graph
            .nodes()
            .filter_map(|(id, node)| {
                let by_label = fuzzy_match_score(&matcher, node.label(), query);
                let by_name = fuzzy_match_score(&matcher, short_name(node.id()), query);
                by_label.max(by_name).map(|score| (id, score))
            })
            .collect::<Vec<_>>();
        matches.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        matches
    }

    fn select_best_match(&mut self) {
        let Some(&(best, _)) = self.search_matches().first() else {
            return;
        };
        self.graph.clear_select();
        self.graph.select(best);
        self.graph.tickle(best);
    }

    pub(in crate::app) fn draw_top_bar(
        &mut self,
        ui: &mut Ui,
        can_reload: bool,
        reload_requested: &mut bool,
    ) {
        ui.horizontal(|ui| {
            ui.heading("oroview");
            ui.separator();

            let search = ui.add(
                egui::TextEdit::singleline(&mut self.search)
                    .hint_text("Search concepts")
                    .desired_width(220.0),
            );
            if search.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter)) {
                self.select_best_match();
            }

            ui.separator();
            ui.label(format!("nodes: {}", self.graph.nodes_count()));
            ui.label(format!("edges: {}", self.graph.edges_count()));
            ui.label(format!("selected: {}", self.graph.selected().len()));

            let reload_button = ui.add_enabled(can_reload, egui::Button::new("Reload snapshot"));
            if reload_button.clicked() {
                *reload_requested = true;
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if self.events.is_some() {
                    ui.spinner();
                    ui.label("loading");
                }
                if let Some(error) = &self.load_error {
                    ui.colored_label(egui::Color32::from_rgb(232, 110, 96), error.as_str());
                } else if let Some(status) = &self.status {
                    ui.label(status.as_str());
                }
            });
        });
    }
}
