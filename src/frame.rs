/*
 * Frame Module
 *
 * The per-frame contract with the presentation layer: what it hands in
 * (time step, window size, pointer, spawn clicks) and what it gets back
 * (agent positions and headings plus read-only obstacle and stats
 * snapshots for drawing).
 */

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::agent::{Agent, AgentId};
use crate::behavior::BehaviorPreset;
use crate::debug::FrameStats;
use crate::error::{Result, SteeringError};
use crate::obstacle::Obstacle;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub position: Vec2,
    pub preset: BehaviorPreset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub dt: f32,
    pub world_bounds: (u32, u32),
    /// Pointer position in world space.
    pub external_target: (i32, i32),
    pub spawn_requests: Vec<SpawnRequest>,
}

impl FrameInput {
    pub fn new(dt: f32, world_bounds: (u32, u32), external_target: (i32, i32)) -> Self {
        Self {
            dt,
            world_bounds,
            external_target,
            spawn_requests: Vec::new(),
        }
    }

    pub fn with_spawn(mut self, position: Vec2, preset: BehaviorPreset) -> Self {
        self.spawn_requests.push(SpawnRequest { position, preset });
        self
    }

    pub fn time_step(&self) -> Result<f32> {
        if !self.dt.is_finite() || self.dt < 0.0 {
            return Err(SteeringError::InvalidTimeStep(self.dt));
        }
        Ok(self.dt)
    }

    pub fn bounds(&self) -> Result<Vec2> {
        bounds_from(self.world_bounds)
    }

    pub fn target(&self) -> Vec2 {
        Vec2::new(self.external_target.0 as f32, self.external_target.1 as f32)
    }
}

/// Convert integer window bounds, rejecting an empty arena.
pub fn bounds_from((width, height): (u32, u32)) -> Result<Vec2> {
    if width == 0 || height == 0 {
        return Err(SteeringError::InvalidBounds { width, height });
    }
    Ok(Vec2::new(width as f32, height as f32))
}

/// Everything the presentation layer needs to draw one agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub position: Vec2,
    pub heading: f32,
    pub preset: BehaviorPreset,
    pub leader: Option<AgentId>,
}

impl From<&Agent> for AgentSnapshot {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            position: agent.position,
            heading: agent.heading,
            preset: agent.preset(),
            leader: agent.follow_target,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub agents: Vec<AgentSnapshot>,
    pub obstacles: Vec<Obstacle>,
    pub stats: FrameStats,
}
