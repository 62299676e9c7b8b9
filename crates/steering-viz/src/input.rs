/*
 * Input Module
 *
 * Mouse and keyboard handlers. Clicks that land on the control panel belong
 * to egui and never spawn agents.
 */

use nannou::prelude::*;
use nannou::winit::event::WindowEvent;

use crate::app::{self, Model};

pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.mouse_position = pos;
}

pub fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left && !model.egui.ctx().is_pointer_over_area() {
        app::queue_spawn(app, model);
    }
}

pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    match key {
        Key::R => app::reset(model),
        Key::Escape => app.quit(),
        _ => {}
    }
}

// Pass events to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &WindowEvent) {
    model.egui.handle_raw_event(event);
}
