/*
 * Population Module
 *
 * This module owns the agents and obstacles of one arena and drives the
 * per-frame update over all of them. Agents live in a slot map; the spawn
 * order is kept separately because it decides who follows whom and in which
 * order agents are updated.
 *
 * Follow links always point at an earlier spawn: the previous agent, or the
 * very first one for follow-leader spawns. Agents are only ever removed all
 * at once by reset, which also clears the bookkeeping, so links never
 * dangle. Should one resolve to nothing anyway, the agent simply acts as a
 * leader.
 */

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use slotmap::SlotMap;
use std::f32::consts::TAU;
use tracing::{debug, info, trace, warn};

use crate::agent::{Agent, AgentId};
use crate::behavior::{BehaviorKind, BehaviorPreset};
use crate::context::WorldContext;
use crate::debug::FrameStats;
use crate::error::Result;
use crate::frame::{bounds_from, AgentSnapshot, FrameInput, FrameOutput};
use crate::math::wrap;
use crate::obstacle::Obstacle;
use crate::params::{SteeringParams, UpdateOrder};
use crate::spatial_grid::SpatialGrid;

pub struct Population {
    params: SteeringParams,
    bounds: Vec2,
    agents: SlotMap<AgentId, Agent>,
    order: Vec<AgentId>,
    obstacles: Vec<Obstacle>,
    rng: ChaCha8Rng,
    first_spawn: Option<AgentId>,
    last_spawn: Option<AgentId>,
    last_target: Vec2,
    spatial_grid: Option<SpatialGrid>,
    stats: FrameStats,
}

impl Population {
    /// Validates `params` and seeds the RNG from `params.rng_seed`, or from
    /// system entropy when no seed is set.
    pub fn new(params: SteeringParams, world_bounds: (u32, u32)) -> Result<Self> {
        let rng = match params.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(params, world_bounds, rng)
    }

    pub fn with_rng(params: SteeringParams, world_bounds: (u32, u32), rng: ChaCha8Rng) -> Result<Self> {
        params.validate()?;
        let bounds = bounds_from(world_bounds)?;

        Ok(Self {
            params,
            bounds,
            agents: SlotMap::with_key(),
            order: Vec::new(),
            obstacles: Vec::new(),
            rng,
            first_spawn: None,
            last_spawn: None,
            last_target: Vec2::ZERO,
            spatial_grid: None,
            stats: FrameStats::default(),
        })
    }

    pub fn params(&self) -> &SteeringParams {
        &self.params
    }

    /// Replace the parameters. Existing agents keep their spawn-time weights.
    pub fn set_params(&mut self, params: SteeringParams) -> Result<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn set_bounds(&mut self, world_bounds: (u32, u32)) -> Result<()> {
        let bounds = bounds_from(world_bounds)?;
        if bounds != self.bounds {
            debug!(width = bounds.x, height = bounds.y, "World bounds changed");
            self.bounds = bounds;
        }
        Ok(())
    }

    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        debug!(
            x = obstacle.position().x,
            y = obstacle.position().y,
            radius = obstacle.radius(),
            "Obstacle added"
        );
        self.obstacles.push(obstacle);
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id)
    }

    /// Agents in spawn order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.order.iter().filter_map(move |&id| self.agents.get(id))
    }

    pub fn leader_of(&self, id: AgentId) -> Option<AgentId> {
        self.agents.get(id).and_then(|agent| agent.follow_target)
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Create an agent at `position` running `preset`.
    ///
    /// The agent starts with a random heading and the preset's initial speed,
    /// and follows the previous spawn (or the first spawn, for
    /// follow-leader). The first agent after a reset follows nobody.
    pub fn spawn(&mut self, position: Vec2, preset: BehaviorPreset) -> AgentId {
        let position = wrap(position, self.bounds);
        let heading = self.rng.gen_range(0.0..TAU);
        let speed = preset.initial_speed_factor() * self.params.max_speed;
        let weights = preset.weights(self.params.avoidance_weight);
        let follow_target = if preset.follows_first_spawn() {
            self.first_spawn
        } else {
            self.last_spawn
        };
        let last_target = self.last_target;

        let id = self.agents.insert_with_key(|id| {
            let mut agent = Agent::new(id, position, heading, speed, preset, weights);
            agent.follow_target = follow_target;
            agent.previous_target = last_target;
            agent
        });

        self.order.push(id);
        if self.first_spawn.is_none() {
            self.first_spawn = Some(id);
        }
        self.last_spawn = Some(id);

        info!(
            x = position.x,
            y = position.y,
            preset = preset.label(),
            follows = follow_target.is_some(),
            "Agent spawned"
        );

        id
    }

    /// Remove every agent. Obstacles stay.
    pub fn reset(&mut self) {
        info!(agents = self.order.len(), "Population reset");
        self.agents.clear();
        self.order.clear();
        self.first_spawn = None;
        self.last_spawn = None;
        if let Some(grid) = self.spatial_grid.as_mut() {
            grid.clear();
        }
    }

    /// Advance every agent by one frame, in spawn order.
    ///
    /// A negative or non-finite `dt`, or a non-finite target, skips the frame
    /// and leaves every agent untouched.
    pub fn update_all(&mut self, dt: f32, external_target: Vec2) {
        if !dt.is_finite() || dt < 0.0 || !external_target.is_finite() {
            warn!(dt, x = external_target.x, y = external_target.y, "Skipping frame with invalid input");
            return;
        }

        self.last_target = external_target;
        self.prepare_spatial_grid();

        let neighbor_candidates = match self.params.update_order {
            UpdateOrder::Sequential => self.update_sequential(dt, external_target),
            UpdateOrder::Snapshot => self.update_snapshot(dt, external_target),
        };

        self.record_stats(neighbor_candidates);
        trace!(
            frame = self.stats.frame,
            agents = self.stats.agent_count,
            neighbor_candidates = self.stats.neighbor_candidates,
            max_speed = self.stats.max_speed_observed,
            max_force = self.stats.max_force_observed,
            "Frame updated"
        );
    }

    // Commit each agent right away: later agents read this frame's state
    fn update_sequential(&mut self, dt: f32, external_target: Vec2) -> usize {
        let mut nearby = Vec::new();
        let mut neighbor_candidates = 0;

        for slot in 0..self.order.len() {
            let id = self.order[slot];
            let mut agent = match self.agents.get(id) {
                Some(agent) => agent.clone(),
                None => continue,
            };
            let old_position = agent.position;

            let candidates = neighbor_candidates_for(
                &agent,
                &self.order,
                self.spatial_grid.as_ref(),
                &mut nearby,
            );
            neighbor_candidates += candidates.len();

            let ctx = WorldContext::new(
                self.bounds,
                dt,
                external_target,
                &self.obstacles,
                &self.agents,
                candidates,
            );
            agent.step(&ctx, &mut self.rng, &self.params);

            if let Some(grid) = self.spatial_grid.as_mut() {
                grid.relocate(slot, old_position, agent.position);
            }
            self.agents[id] = agent;
        }

        neighbor_candidates
    }

    // Compute every agent against the start-of-frame state, then commit
    fn update_snapshot(&mut self, dt: f32, external_target: Vec2) -> usize {
        let mut nearby = Vec::new();
        let mut neighbor_candidates = 0;
        let mut updated = Vec::with_capacity(self.order.len());

        for &id in &self.order {
            let mut agent = match self.agents.get(id) {
                Some(agent) => agent.clone(),
                None => continue,
            };

            let candidates = neighbor_candidates_for(
                &agent,
                &self.order,
                self.spatial_grid.as_ref(),
                &mut nearby,
            );
            neighbor_candidates += candidates.len();

            let ctx = WorldContext::new(
                self.bounds,
                dt,
                external_target,
                &self.obstacles,
                &self.agents,
                candidates,
            );
            agent.step(&ctx, &mut self.rng, &self.params);
            updated.push(agent);
        }

        for agent in updated {
            let id = agent.id;
            self.agents[id] = agent;
        }

        neighbor_candidates
    }

    // Rebuild the grid from the current positions, or drop it when disabled
    fn prepare_spatial_grid(&mut self) {
        if !self.params.enable_spatial_grid {
            self.spatial_grid = None;
            return;
        }

        let cell_size = self.params.grid_cell_size();
        let bounds = self.bounds;
        let rebuild = self
            .spatial_grid
            .as_ref()
            .map_or(true, |grid| !grid.matches(cell_size, bounds));
        if rebuild {
            self.spatial_grid = Some(SpatialGrid::new(cell_size, bounds));
        }

        if let Some(grid) = self.spatial_grid.as_mut() {
            grid.clear();
            for (slot, id) in self.order.iter().enumerate() {
                if let Some(agent) = self.agents.get(*id) {
                    grid.insert(slot, agent.position);
                }
            }
        }
    }

    fn record_stats(&mut self, neighbor_candidates: usize) {
        let mut max_speed: f32 = 0.0;
        let mut max_force: f32 = 0.0;
        for agent in self.agents.values() {
            max_speed = max_speed.max(agent.velocity.length());
            max_force = max_force.max(agent.last_force().length());
        }

        self.stats = FrameStats {
            frame: self.stats.frame + 1,
            agent_count: self.order.len(),
            obstacle_count: self.obstacles.len(),
            neighbor_candidates,
            max_speed_observed: max_speed,
            max_force_observed: max_force,
        };
    }

    pub fn snapshot(&self) -> Vec<AgentSnapshot> {
        self.agents().map(AgentSnapshot::from).collect()
    }

    /// Apply one frame of presentation input and report the result.
    pub fn step(&mut self, input: &FrameInput) -> Result<FrameOutput> {
        let dt = input.time_step()?;
        self.set_bounds(input.world_bounds)?;

        for request in &input.spawn_requests {
            self.spawn(request.position, request.preset);
        }
        self.update_all(dt, input.target());

        Ok(FrameOutput {
            agents: self.snapshot(),
            obstacles: self.obstacles.clone(),
            stats: self.stats,
        })
    }
}

// Neighbors worth scanning for `agent`; empty unless it flocks
fn neighbor_candidates_for<'a>(
    agent: &Agent,
    order: &'a [AgentId],
    grid: Option<&SpatialGrid>,
    nearby: &'a mut Vec<AgentId>,
) -> &'a [AgentId] {
    if !agent.weights().is_active(BehaviorKind::Flocking) {
        return &[];
    }

    match grid {
        Some(grid) => {
            nearby.clear();
            nearby.extend(grid.get_nearby_indices(agent.position).into_iter().map(|slot| order[slot]));
            nearby.as_slice()
        }
        None => order,
    }
}
