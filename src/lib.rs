/*
 * Steering Simulation - Module Definitions
 *
 * This file defines the module structure of the steering engine: vector
 * helpers, obstacles, the behavior table, the agent with its behavior
 * library, and the population that drives the per-frame update.
 */

// Re-export key components for easier access
pub use agent::{Agent, AgentId, FlockForces};
pub use behavior::{BehaviorKind, BehaviorPreset, BehaviorWeights};
pub use context::WorldContext;
pub use debug::FrameStats;
pub use error::SteeringError;
pub use frame::{AgentSnapshot, FrameInput, FrameOutput, SpawnRequest};
pub use obstacle::Obstacle;
pub use params::{SteeringParams, UpdateOrder};
pub use population::Population;
pub use spatial_grid::SpatialGrid;

pub use glam::{vec2, Vec2};

// Define modules
pub mod agent;
pub mod behavior;
pub mod context;
pub mod debug;
pub mod error;
pub mod frame;
pub mod math;
pub mod obstacle;
pub mod params;
pub mod population;
pub mod spatial_grid;

// Constants
pub const DEFAULT_WORLD_WIDTH: u32 = 800;
pub const DEFAULT_WORLD_HEIGHT: u32 = 600;
