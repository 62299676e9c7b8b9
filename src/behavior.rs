/*
 * Behavior Module
 *
 * The closed set of steering behaviors an agent can run, the weight table
 * that switches them on, and the named presets the population hands out at
 * spawn time. A weight of zero means the behavior is skipped entirely.
 */

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorKind {
    Seek,
    Flee,
    Pursue,
    Evade,
    Wander,
    Arrival,
    Flocking,
    ObstacleAvoidance,
    FollowLeader,
    Queue,
    WallFollow,
}

impl BehaviorKind {
    pub const COUNT: usize = 11;

    // Evaluation order of the update step
    pub const ALL: [BehaviorKind; BehaviorKind::COUNT] = [
        BehaviorKind::Seek,
        BehaviorKind::Flee,
        BehaviorKind::Pursue,
        BehaviorKind::Evade,
        BehaviorKind::Wander,
        BehaviorKind::Arrival,
        BehaviorKind::Flocking,
        BehaviorKind::ObstacleAvoidance,
        BehaviorKind::FollowLeader,
        BehaviorKind::Queue,
        BehaviorKind::WallFollow,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Per-behavior multipliers. Zero disables a behavior.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BehaviorWeights {
    weights: [f32; BehaviorKind::COUNT],
}

impl BehaviorWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: BehaviorKind, weight: f32) -> Self {
        self.set(kind, weight);
        self
    }

    pub fn set(&mut self, kind: BehaviorKind, weight: f32) {
        self.weights[kind.index()] = weight;
    }

    pub fn get(&self, kind: BehaviorKind) -> f32 {
        self.weights[kind.index()]
    }

    pub fn is_active(&self, kind: BehaviorKind) -> bool {
        self.get(kind) != 0.0
    }

    /// Active behaviors with their weights, in evaluation order.
    pub fn active(&self) -> impl Iterator<Item = (BehaviorKind, f32)> + '_ {
        BehaviorKind::ALL
            .iter()
            .map(move |&kind| (kind, self.get(kind)))
            .filter(|&(_, weight)| weight != 0.0)
    }
}

/// Named behavior bundles selectable when spawning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorPreset {
    Seek,
    Flee,
    Pursue,
    Evade,
    Wander,
    Arrival,
    Flocking,
    FollowLeader,
    Queue,
    WallFollow,
}

impl BehaviorPreset {
    pub const ALL: [BehaviorPreset; 10] = [
        BehaviorPreset::Seek,
        BehaviorPreset::Flee,
        BehaviorPreset::Pursue,
        BehaviorPreset::Evade,
        BehaviorPreset::Wander,
        BehaviorPreset::Arrival,
        BehaviorPreset::Flocking,
        BehaviorPreset::FollowLeader,
        BehaviorPreset::Queue,
        BehaviorPreset::WallFollow,
    ];

    pub fn primary(self) -> BehaviorKind {
        match self {
            BehaviorPreset::Seek => BehaviorKind::Seek,
            BehaviorPreset::Flee => BehaviorKind::Flee,
            BehaviorPreset::Pursue => BehaviorKind::Pursue,
            BehaviorPreset::Evade => BehaviorKind::Evade,
            BehaviorPreset::Wander => BehaviorKind::Wander,
            BehaviorPreset::Arrival => BehaviorKind::Arrival,
            BehaviorPreset::Flocking => BehaviorKind::Flocking,
            BehaviorPreset::FollowLeader => BehaviorKind::FollowLeader,
            BehaviorPreset::Queue => BehaviorKind::Queue,
            BehaviorPreset::WallFollow => BehaviorKind::WallFollow,
        }
    }

    /// The primary behavior at 1.0 with obstacle avoidance layered on top as
    /// a safety override.
    pub fn weights(self, avoidance_weight: f32) -> BehaviorWeights {
        BehaviorWeights::new()
            .with(self.primary(), 1.0)
            .with(BehaviorKind::ObstacleAvoidance, avoidance_weight)
    }

    /// Fraction of the maximum speed an agent starts with.
    pub fn initial_speed_factor(self) -> f32 {
        match self {
            BehaviorPreset::Seek
            | BehaviorPreset::Flee
            | BehaviorPreset::Pursue
            | BehaviorPreset::Evade => 1.0,
            BehaviorPreset::Arrival => 0.25,
            BehaviorPreset::Wander
            | BehaviorPreset::Flocking
            | BehaviorPreset::FollowLeader
            | BehaviorPreset::Queue
            | BehaviorPreset::WallFollow => 0.5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BehaviorPreset::Seek => "Seek",
            BehaviorPreset::Flee => "Flee",
            BehaviorPreset::Pursue => "Pursue",
            BehaviorPreset::Evade => "Evade",
            BehaviorPreset::Wander => "Wander",
            BehaviorPreset::Arrival => "Arrival",
            BehaviorPreset::Flocking => "Flocking",
            BehaviorPreset::FollowLeader => "Follow Leader",
            BehaviorPreset::Queue => "Queue",
            BehaviorPreset::WallFollow => "Wall Follow",
        }
    }

    /// Whether spawns of this preset attach to the very first agent instead
    /// of the previous one.
    pub fn follows_first_spawn(self) -> bool {
        matches!(self, BehaviorPreset::FollowLeader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_order_matches_discriminants() {
        for (i, kind) in BehaviorKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn every_preset_has_one_primary_and_avoidance() {
        for preset in BehaviorPreset::ALL {
            let weights = preset.weights(2.0);
            let active: Vec<_> = weights.active().collect();
            assert_eq!(active.len(), 2, "{:?}", preset);
            assert_eq!(weights.get(preset.primary()), 1.0);
            assert_eq!(weights.get(BehaviorKind::ObstacleAvoidance), 2.0);
        }
    }

    #[test]
    fn zero_weight_is_inactive() {
        let weights = BehaviorWeights::new()
            .with(BehaviorKind::Seek, 1.0)
            .with(BehaviorKind::Seek, 0.0);
        assert!(!weights.is_active(BehaviorKind::Seek));
        assert_eq!(weights.active().count(), 0);
    }

    #[test]
    fn only_follow_leader_attaches_to_first_spawn() {
        let attached: Vec<_> = BehaviorPreset::ALL
            .into_iter()
            .filter(|preset| preset.follows_first_spawn())
            .collect();
        assert_eq!(attached, vec![BehaviorPreset::FollowLeader]);
    }
}
