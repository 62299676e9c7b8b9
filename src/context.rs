/*
 * World Context Module
 *
 * The read-only slice of the world an agent sees while it computes its
 * steering force: bounds, frame delta, obstacles, the external target and a
 * view of the other agents. A context is built per agent per frame and is
 * never stored.
 */

use glam::Vec2;
use slotmap::SlotMap;

use crate::agent::{Agent, AgentId};
use crate::obstacle::Obstacle;

#[derive(Clone, Copy)]
pub struct WorldContext<'a> {
    pub bounds: Vec2,
    pub dt: f32,
    pub external_target: Vec2,
    pub obstacles: &'a [Obstacle],
    agents: &'a SlotMap<AgentId, Agent>,
    // Neighbor candidates in spawn order; may be the whole population
    candidates: &'a [AgentId],
}

impl<'a> WorldContext<'a> {
    pub fn new(
        bounds: Vec2,
        dt: f32,
        external_target: Vec2,
        obstacles: &'a [Obstacle],
        agents: &'a SlotMap<AgentId, Agent>,
        candidates: &'a [AgentId],
    ) -> Self {
        Self {
            bounds,
            dt,
            external_target,
            obstacles,
            agents,
            candidates,
        }
    }

    /// Resolve a handle. Stale handles resolve to `None`.
    pub fn agent(&self, id: AgentId) -> Option<&'a Agent> {
        self.agents.get(id)
    }

    /// Candidate neighbors of `exclude`, without `exclude` itself.
    pub fn neighbors(&self, exclude: AgentId) -> impl Iterator<Item = &'a Agent> + 'a {
        let agents = self.agents;
        let candidates = self.candidates;
        candidates
            .iter()
            .filter(move |&&id| id != exclude)
            .filter_map(move |&id| agents.get(id))
    }
}
