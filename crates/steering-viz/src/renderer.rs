/*
 * Renderer Module
 *
 * Draws the last frame reported by the population: obstacles as outlined
 * circles and agents as triangles pointing along their heading, colored by
 * preset. The debug overlay adds leader links and frame statistics.
 */

use nannou::prelude::*;
use tracing::warn;

use steering::{AgentSnapshot, BehaviorPreset};

use crate::app::{world_to_screen, Model};
use crate::ui;

const AGENT_SIZE: f32 = 7.0;

pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();

    for obstacle in &model.output.obstacles {
        draw.ellipse()
            .xy(world_to_screen(obstacle.position(), window_rect))
            .radius(obstacle.radius())
            .color(rgba(0.25, 0.25, 0.3, 1.0))
            .stroke(rgba(0.6, 0.6, 0.7, 1.0))
            .stroke_weight(1.5);
    }

    if model.show_debug {
        draw_leader_links(&draw, &model.output.agents, window_rect);
    }

    for agent in &model.output.agents {
        draw_agent(&draw, agent, window_rect);
    }

    if model.show_debug {
        ui::draw_debug_info(&draw, &model.output.stats, window_rect);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(?err, "Failed to draw frame");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(?err, "Failed to draw controls");
    }
}

fn draw_agent(draw: &Draw, agent: &AgentSnapshot, window_rect: Rect) {
    let points = [
        pt2(AGENT_SIZE, 0.0),
        pt2(-AGENT_SIZE, AGENT_SIZE / 2.0),
        pt2(-AGENT_SIZE, -AGENT_SIZE / 2.0),
    ];

    draw.polygon()
        .color(preset_color(agent.preset))
        .points(points)
        .xy(world_to_screen(agent.position, window_rect))
        .rotate(agent.heading);
}

fn draw_leader_links(draw: &Draw, agents: &[AgentSnapshot], window_rect: Rect) {
    for agent in agents {
        let Some(leader_id) = agent.leader else { continue };
        let Some(leader) = agents.iter().find(|other| other.id == leader_id) else { continue };

        draw.line()
            .start(world_to_screen(agent.position, window_rect))
            .end(world_to_screen(leader.position, window_rect))
            .color(rgba(1.0, 1.0, 1.0, 0.2))
            .stroke_weight(1.0);
    }
}

fn preset_color(preset: BehaviorPreset) -> Rgb<u8> {
    match preset {
        BehaviorPreset::Seek => rgb(120, 200, 255),
        BehaviorPreset::Flee => rgb(255, 110, 110),
        BehaviorPreset::Pursue => rgb(80, 140, 255),
        BehaviorPreset::Evade => rgb(255, 160, 60),
        BehaviorPreset::Wander => rgb(200, 200, 200),
        BehaviorPreset::Arrival => rgb(120, 255, 160),
        BehaviorPreset::Flocking => rgb(220, 220, 120),
        BehaviorPreset::FollowLeader => rgb(200, 130, 255),
        BehaviorPreset::Queue => rgb(255, 130, 210),
        BehaviorPreset::WallFollow => rgb(90, 220, 210),
    }
}
