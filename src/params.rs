/*
 * Steering Parameters Module
 *
 * This module defines the SteeringParams struct that holds every tunable
 * constant of the steering engine: speed and force limits, behavior radii,
 * wander noise, flocking sub-weights and the update policy. The presentation
 * layer exposes some of them through sliders, so the slider ranges live here
 * as well.
 */

use serde::{Deserialize, Serialize};

use crate::error::{Result, SteeringError};

/// How agents observe each other within a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpdateOrder {
    /// Each agent is committed as soon as it is computed, so agents later in
    /// spawn order see their predecessors' new state.
    #[default]
    Sequential,
    /// Every agent is computed against the start-of-frame state and all
    /// results are committed together.
    Snapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringParams {
    pub max_speed: f32,
    pub max_force: f32,
    // Frames of linear extrapolation used by pursue/evade
    pub prediction_time: f32,
    pub arrival_radius: f32,
    pub avoidance_distance: f32,
    pub follow_distance: f32,
    pub queue_distance: f32,
    pub desired_distance_from_wall: f32,
    pub neighbor_radius: f32,
    pub separation_radius: f32,
    pub wander_radius: f32,
    pub wander_distance: f32,
    // Half-width of the uniform wander angle increment, in radians
    pub wander_noise: f32,
    // Weight given to obstacle avoidance by every preset
    pub avoidance_weight: f32,
    pub cohesion_weight: f32,
    pub alignment_weight: f32,
    pub separation_weight: f32,
    pub update_order: UpdateOrder,
    pub enable_spatial_grid: bool,
    pub cell_size_factor: f32,  // Multiplier for cell size relative to neighbor radius
    pub rng_seed: Option<u64>,
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            max_speed: 4.0,
            max_force: 6.0,
            prediction_time: 20.0,
            arrival_radius: 300.0,
            avoidance_distance: 40.0,
            follow_distance: 40.0,
            queue_distance: 30.0,
            desired_distance_from_wall: 60.0,
            neighbor_radius: 50.0,
            separation_radius: 25.0,
            wander_radius: 40.0,
            wander_distance: 1.0,
            wander_noise: 0.3,
            avoidance_weight: 2.0,
            cohesion_weight: 1.0,
            alignment_weight: 1.0,
            separation_weight: 1.5,
            update_order: UpdateOrder::Sequential,
            enable_spatial_grid: false,
            cell_size_factor: 1.0,
            rng_seed: None,
        }
    }
}

impl SteeringParams {
    /// Reject values that would make the engine divide by zero or produce
    /// NaN motion.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.max_speed,
            self.max_force,
            self.prediction_time,
            self.arrival_radius,
            self.avoidance_distance,
            self.follow_distance,
            self.queue_distance,
            self.desired_distance_from_wall,
            self.neighbor_radius,
            self.separation_radius,
            self.wander_radius,
            self.wander_distance,
            self.wander_noise,
            self.avoidance_weight,
            self.cohesion_weight,
            self.alignment_weight,
            self.separation_weight,
            self.cell_size_factor,
        ];
        if finite.iter().any(|value| !value.is_finite()) {
            return Err(SteeringError::InvalidConfig("all parameters must be finite"));
        }

        if self.max_speed <= 0.0 {
            return Err(SteeringError::InvalidConfig("max_speed must be positive"));
        }
        if self.max_force <= 0.0 {
            return Err(SteeringError::InvalidConfig("max_force must be positive"));
        }
        if self.arrival_radius <= 0.0 {
            return Err(SteeringError::InvalidConfig("arrival_radius must be positive"));
        }
        if self.prediction_time < 0.0 {
            return Err(SteeringError::InvalidConfig("prediction_time must not be negative"));
        }

        let distances = [
            self.avoidance_distance,
            self.follow_distance,
            self.queue_distance,
            self.desired_distance_from_wall,
            self.neighbor_radius,
            self.separation_radius,
            self.wander_radius,
            self.wander_distance,
        ];
        if distances.iter().any(|&value| value < 0.0) {
            return Err(SteeringError::InvalidConfig("radii and distances must not be negative"));
        }
        if self.separation_radius > self.neighbor_radius {
            return Err(SteeringError::InvalidConfig(
                "separation_radius must not exceed neighbor_radius",
            ));
        }
        if self.wander_noise < 0.0 {
            return Err(SteeringError::InvalidConfig("wander_noise must not be negative"));
        }
        if self.avoidance_weight <= 0.0 {
            return Err(SteeringError::InvalidConfig("avoidance_weight must be positive"));
        }
        if self.cell_size_factor < 1.0 {
            return Err(SteeringError::InvalidConfig(
                "cell_size_factor below 1.0 would miss neighbors",
            ));
        }

        Ok(())
    }

    // Edge length of a spatial grid cell
    pub fn grid_cell_size(&self) -> f32 {
        self.neighbor_radius.max(1.0) * self.cell_size_factor
    }

    // Get parameter ranges for UI sliders
    pub fn max_speed_range() -> std::ops::RangeInclusive<f32> {
        0.5..=20.0
    }

    pub fn max_force_range() -> std::ops::RangeInclusive<f32> {
        0.5..=30.0
    }

    pub fn weight_range() -> std::ops::RangeInclusive<f32> {
        0.0..=3.0
    }

    pub fn radius_range() -> std::ops::RangeInclusive<f32> {
        10.0..=400.0
    }
}
