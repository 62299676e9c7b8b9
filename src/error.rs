/*
 * Error Module
 *
 * Errors raised when the simulation is constructed or driven with values
 * that would otherwise turn into NaN motion. Behavior functions themselves
 * never fail.
 */

use thiserror::Error;

/// Errors that can occur when configuring or stepping the simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SteeringError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// An obstacle was built with a negative or non-finite radius or position.
    #[error("invalid obstacle: radius {radius} must be finite and non-negative")]
    InvalidObstacle { radius: f32 },
    /// World bounds must be non-zero on both axes.
    #[error("invalid world bounds {width}x{height}")]
    InvalidBounds { width: u32, height: u32 },
    /// Frame delta must be finite and non-negative.
    #[error("invalid frame delta {0}")]
    InvalidTimeStep(f32),
}

pub type Result<T> = std::result::Result<T, SteeringError>;
