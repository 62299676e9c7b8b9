/*
 * Steering Behaviors Playground
 *
 * Interactive front end for the steering engine. Left click spawns an agent
 * running the preset selected in the control panel, the cursor is the target
 * that seek, flee, pursue, evade and arrival react to, R clears the arena and
 * Escape quits.
 *
 * Set STEERING_CONFIG to a JSON file to override the default parameters, and
 * RUST_LOG to control log output.
 */

use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod input;
mod renderer;
mod ui;

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    nannou::app(app::model)
        .update(app::update)
        .run();
}
