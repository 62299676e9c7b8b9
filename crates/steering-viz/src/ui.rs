/*
 * UI Module
 *
 * The egui control panel: preset selection, reset, and live tuning of the
 * steering parameters. Edits are made on a copy and handed back to the
 * population, which rejects combinations that fail validation.
 */

use nannou_egui::{egui, Egui};

use steering::{BehaviorPreset, FrameStats, SteeringParams, UpdateOrder};

#[derive(Default)]
pub struct UiActions {
    pub reset: bool,
    pub params: Option<SteeringParams>,
}

pub fn update_ui(
    egui: &mut Egui,
    selected_preset: &mut BehaviorPreset,
    current: &SteeringParams,
    stats: &FrameStats,
    show_debug: &mut bool,
    paused: &mut bool,
) -> UiActions {
    let mut actions = UiActions::default();
    let mut params = current.clone();

    let ctx = egui.begin_frame();

    egui::Window::new("Steering Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Spawn Preset", |ui| {
                for preset in BehaviorPreset::ALL {
                    ui.selectable_value(selected_preset, preset, preset.label());
                }
                ui.label("Left click to spawn, R to reset");

                if ui.button("Reset Agents").clicked() {
                    actions.reset = true;
                }
            });

            ui.collapsing("Motion Limits", |ui| {
                ui.add(egui::Slider::new(&mut params.max_speed, SteeringParams::max_speed_range()).text("Max Speed"));
                ui.add(egui::Slider::new(&mut params.max_force, SteeringParams::max_force_range()).text("Max Force"));
                ui.add(egui::Slider::new(&mut params.avoidance_weight, SteeringParams::weight_range()).text("Avoidance Weight"));
            });

            ui.collapsing("Distances", |ui| {
                ui.add(egui::Slider::new(&mut params.arrival_radius, SteeringParams::radius_range()).text("Arrival Radius"));
                ui.add(egui::Slider::new(&mut params.avoidance_distance, SteeringParams::radius_range()).text("Avoidance Distance"));
                ui.add(egui::Slider::new(&mut params.follow_distance, SteeringParams::radius_range()).text("Follow Distance"));
                ui.add(egui::Slider::new(&mut params.queue_distance, SteeringParams::radius_range()).text("Queue Distance"));
                ui.add(egui::Slider::new(&mut params.desired_distance_from_wall, SteeringParams::radius_range()).text("Wall Distance"));
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut params.separation_weight, SteeringParams::weight_range()).text("Separation Weight"));
                ui.add(egui::Slider::new(&mut params.alignment_weight, SteeringParams::weight_range()).text("Alignment Weight"));
                ui.add(egui::Slider::new(&mut params.cohesion_weight, SteeringParams::weight_range()).text("Cohesion Weight"));
                ui.add(egui::Slider::new(&mut params.separation_radius, SteeringParams::radius_range()).text("Separation Radius"));
                ui.add(egui::Slider::new(&mut params.neighbor_radius, SteeringParams::radius_range()).text("Neighbor Radius"));
            });

            ui.collapsing("Performance Tuning", |ui| {
                ui.checkbox(&mut params.enable_spatial_grid, "Enable Spatial Grid");

                let mut snapshot = params.update_order == UpdateOrder::Snapshot;
                ui.checkbox(&mut snapshot, "Snapshot Update Order");
                params.update_order = if snapshot {
                    UpdateOrder::Snapshot
                } else {
                    UpdateOrder::Sequential
                };

                ui.separator();
                ui.label(format!("Agents: {}", stats.agent_count));
                ui.label(format!("Neighbor candidates: {}", stats.neighbor_candidates));
            });

            ui.checkbox(show_debug, "Show Debug Info");
            ui.checkbox(paused, "Pause Simulation");
        });

    if params != *current {
        actions.params = Some(params);
    }
    actions
}

// Draw frame statistics in the top-left corner
pub fn draw_debug_info(draw: &nannou::Draw, stats: &FrameStats, window_rect: nannou::geom::Rect) {
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;
    let panel_height = line_height * 5.0 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.top() - margin;

    let debug_texts = [
        format!("Frame: {}", stats.frame),
        format!("Agents: {}", stats.agent_count),
        format!("Obstacles: {}", stats.obstacle_count),
        format!("Top speed: {:.2}", stats.max_speed_observed),
        format!("Top force: {:.3}", stats.max_force_observed),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(text_x + 80.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
