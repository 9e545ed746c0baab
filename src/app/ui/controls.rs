use std::fs::File;
use std::io::BufWriter;
use std::ops::RangeInclusive;

use anyhow::{Context, Result};
use eframe::egui::{self, Key, Response, Ui};
use tracing::{info, warn};

use super::super::ViewModel;

const SLIDER_KEY_BASE_RATE: f32 = 10.0;
const SLIDER_KEY_ACCEL_PER_SEC: f32 = 9.0;
const SLIDER_KEY_ACCEL_MAX: f32 = 40.0;

#[derive(Clone, Copy, Default)]
struct SliderKeyHoldState {
    positive_secs: f32,
    negative_secs: f32,
}

fn slider_key_accel_multiplier(hold_secs: f32) -> f32 {
    let ramp = hold_secs * SLIDER_KEY_ACCEL_PER_SEC;
    (1.0 + ramp + ramp * ramp * 0.15).min(SLIDER_KEY_ACCEL_MAX)
}

/// Holding an arrow key on a focused slider speeds up the longer it is held.
fn apply_slider_arrow_acceleration(
    ui: &Ui,
    response: &Response,
    value: &mut f32,
    range: &RangeInclusive<f32>,
) -> bool {
    let state_id = response.id.with("arrow_key_hold_state");
    let mut hold_state = ui.ctx().data(|data| {
        data.get_temp::<SliderKeyHoldState>(state_id)
            .unwrap_or_default()
    });

    if !response.has_focus() {
        ui.ctx()
            .data_mut(|data| data.insert_temp(state_id, SliderKeyHoldState::default()));
        return false;
    }

    let (delta_time, increase_down, decrease_down) = ui.input(|input| {
        (
            input.stable_dt.min(0.1),
            input.key_down(Key::ArrowRight) || input.key_down(Key::ArrowUp),
            input.key_down(Key::ArrowLeft) || input.key_down(Key::ArrowDown),
        )
    });

    hold_state.positive_secs = if increase_down {
        hold_state.positive_secs + delta_time
    } else {
        0.0
    };
    hold_state.negative_secs = if decrease_down {
        hold_state.negative_secs + delta_time
    } else {
        0.0
    };
    ui.ctx()
        .data_mut(|data| data.insert_temp(state_id, hold_state));

    let direction = (increase_down as i8) - (decrease_down as i8);
    if direction == 0 {
        return false;
    }

    let hold_secs = if direction > 0 {
        hold_state.positive_secs
    } else {
        hold_state.negative_secs
    };
    let step = ((range.end() - range.start()) / 200.0).max(0.0005);
    let speed = SLIDER_KEY_BASE_RATE * slider_key_accel_multiplier(hold_secs);

    let old_value = *value;
    let delta = direction as f32 * step * speed * delta_time;
    *value = (*value + delta).clamp(*range.start(), *range.end());
    ui.ctx().request_repaint();
    (*value - old_value).abs() > f32::EPSILON
}

fn tuning_slider(
    ui: &mut Ui,
    value: &mut f32,
    range: RangeInclusive<f32>,
    text: &str,
    hover: &str,
) -> bool {
    let slider = ui
        .add(
            egui::Slider::new(&mut *value, range.clone())
                .text(text)
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text(hover);
    if slider.hovered() {
        slider.request_focus();
    }
    let accelerated = apply_slider_arrow_acceleration(ui, &slider, value, &range);
    slider.changed() || accelerated
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Layout Controls");
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let pause_text = if self.paused { "Resume" } else { "Pause" };
            if ui.button(pause_text).on_hover_text("Shortcut: P").clicked() {
                self.paused = !self.paused;
            }
            if ui
                .button("Add random nodes")
                .on_hover_text("Shortcut: Space")
                .clicked()
            {
                self.add_random_nodes();
            }
        });
        ui.horizontal(|ui| {
            if ui
                .button("Clear selection")
                .on_hover_text("Shortcut: Escape")
                .clicked()
            {
                self.graph.clear_select();
            }
            if ui.button("Export GraphViz").clicked() {
                self.status = Some(match self.export_graphviz() {
                    Ok(message) => message,
                    Err(error) => {
                        warn!(error = %format!("{error:#}"), "GraphViz export failed");
                        format!("{error:#}")
                    }
                });
            }
        });
        ui.checkbox(&mut self.show_debug, "Debug panel")
            .on_hover_text("Shortcut: D");

        ui.separator();
        ui.collapsing("Forces", |ui| {
            let physics = self.graph.physics_mut();
            tuning_slider(
                ui,
                &mut physics.coulomb_constant,
                0.0..=80_000.0,
                "Repulsion",
                "Coulomb constant between every pair of unselected nodes.",
            );
            tuning_slider(
                ui,
                &mut physics.centering_strength,
                0.0..=20.0,
                "Centering",
                "Pull of selected nodes towards the origin.",
            );
            tuning_slider(
                ui,
                &mut physics.max_speed,
                10.0..=1000.0,
                "Max speed",
                "Per-axis velocity limit.",
            );
            tuning_slider(
                ui,
                &mut physics.min_kinetic_energy,
                0.0..=10.0,
                "Rest threshold",
                "Nodes with less kinetic energy than this stay put.",
            );
            tuning_slider(
                ui,
                &mut physics.tickle_charge_factor,
                1.0..=6.0,
                "Tickle boost",
                "Charge multiplier of an active concept at the start of its decay.",
            );

            let mut spring_constant = physics.spring_constant;
            let mut nominal_length = physics.nominal_length;
            let spring_changed = tuning_slider(
                ui,
                &mut spring_constant,
                0.5..=40.0,
                "Spring",
                "Hooke constant of every edge.",
            );
            let length_changed = tuning_slider(
                ui,
                &mut nominal_length,
                10.0..=200.0,
                "Edge length",
                "Rest length of every edge.",
            );
            if spring_changed || length_changed {
                self.graph
                    .set_spring_parameters(spring_constant, nominal_length);
            }
        });

        ui.collapsing("Shortcuts", |ui| {
            ui.label("Click: select node");
            ui.label("Shift + click: add or remove from selection");
            ui.label("Right or middle drag: pan");
            ui.label("Scroll: zoom");
            ui.label("Space: add random nodes");
            ui.label("P: pause   D: debug   Escape: clear selection");
        });
    }

    fn export_graphviz(&self) -> Result<String> {
        let path = &self.viewer.export_path;
        let file = File::create(path)
            .with_context(|| format!("failed to create export file {}", path.display()))?;
        self.graph
            .write_graphviz(BufWriter::new(file))
            .with_context(|| format!("failed to write export file {}", path.display()))?;

        info!(path = %path.display(), "wrote GraphViz export");
        Ok(format!("exported to {}", path.display()))
    }
}
