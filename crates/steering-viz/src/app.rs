/*
 * Application Module
 *
 * This module defines the application model and the per-frame update. Each
 * frame gathers the window size, the cursor and any queued spawns into a
 * FrameInput and hands it to the population.
 *
 * The engine works in a [0, width] x [0, height] arena while nannou puts the
 * origin at the window center, so positions are shifted by half the window
 * size in each direction when crossing between the two.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{info, warn};

use steering::{
    BehaviorPreset, FrameInput, FrameOutput, Obstacle, Population, SpawnRequest,
    DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH,
};

use crate::config;
use crate::input;
use crate::renderer;
use crate::ui;

// Obstacles placed at startup, as (x, y, radius) in world coordinates
const OBSTACLES: [(f32, f32, f32); 4] = [
    (200.0, 160.0, 35.0),
    (560.0, 420.0, 50.0),
    (420.0, 250.0, 25.0),
    (650.0, 140.0, 30.0),
];

pub struct Model {
    pub population: Population,
    pub egui: Egui,
    pub selected_preset: BehaviorPreset,
    pub pending_spawns: Vec<SpawnRequest>,
    pub mouse_position: Point2,
    pub output: FrameOutput,
    pub show_debug: bool,
    pub paused: bool,
}

pub fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Steering Behaviors")
        .size(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .expect("Failed to build the main window");

    let window = app.window(window_id).expect("Main window was just created");
    let egui = Egui::from_window(&window);

    let params = config::load_params();
    let mut population = Population::new(params, (DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT))
        .expect("Parameters are validated on load and the default arena is not empty");

    for (x, y, radius) in OBSTACLES {
        match Obstacle::new(steering::vec2(x, y), radius) {
            Ok(obstacle) => population.add_obstacle(obstacle),
            Err(err) => warn!(%err, "Skipping obstacle"),
        }
    }

    info!(obstacles = population.obstacles().len(), "Arena ready");

    Model {
        output: FrameOutput {
            obstacles: population.obstacles().to_vec(),
            ..FrameOutput::default()
        },
        population,
        egui,
        selected_preset: BehaviorPreset::Seek,
        pending_spawns: Vec::new(),
        mouse_position: Point2::ZERO,
        show_debug: false,
        paused: false,
    }
}

pub fn update(app: &App, model: &mut Model, update: Update) {
    model.egui.set_elapsed_time(update.since_start);

    let actions = ui::update_ui(
        &mut model.egui,
        &mut model.selected_preset,
        model.population.params(),
        &model.output.stats,
        &mut model.show_debug,
        &mut model.paused,
    );

    if let Some(params) = actions.params {
        if let Err(err) = model.population.set_params(params) {
            warn!(%err, "Rejected parameter change");
        }
    }
    if actions.reset {
        reset(model);
    }
    if model.paused {
        return;
    }

    let window_rect = app.window_rect();
    let bounds = (window_rect.w().max(1.0) as u32, window_rect.h().max(1.0) as u32);
    let target = screen_to_world(model.mouse_position, window_rect);

    let mut frame_input = FrameInput::new(
        update.since_last.as_secs_f32(),
        bounds,
        (target.x.round() as i32, target.y.round() as i32),
    );
    frame_input.spawn_requests = std::mem::take(&mut model.pending_spawns);

    match model.population.step(&frame_input) {
        Ok(output) => model.output = output,
        Err(err) => warn!(%err, "Frame rejected"),
    }
}

// Queue a spawn of the selected preset under the cursor
pub fn queue_spawn(app: &App, model: &mut Model) {
    let position = screen_to_world(model.mouse_position, app.window_rect());
    model.pending_spawns.push(SpawnRequest {
        position,
        preset: model.selected_preset,
    });
}

pub fn reset(model: &mut Model) {
    model.population.reset();
    model.pending_spawns.clear();
    model.output.agents.clear();
}

pub fn screen_to_world(point: Point2, window_rect: Rect) -> steering::Vec2 {
    steering::vec2(point.x + window_rect.w() / 2.0, point.y + window_rect.h() / 2.0)
}

pub fn world_to_screen(position: steering::Vec2, window_rect: Rect) -> Point2 {
    pt2(position.x - window_rect.w() / 2.0, position.y - window_rect.h() / 2.0)
}
