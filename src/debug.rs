/*
 * Debug Information Module
 *
 * Per-frame statistics collected by the population update, for logging and
 * for the presentation layer's overlay.
 */

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameStats {
    pub frame: u64,
    pub agent_count: usize,
    pub obstacle_count: usize,
    // Neighbor candidates visited, summed over all agents
    pub neighbor_candidates: usize,
    pub max_speed_observed: f32,
    pub max_force_observed: f32,
}
