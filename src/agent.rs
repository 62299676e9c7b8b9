/*
 * Agent Module
 *
 * This module defines the Agent struct and its steering behaviors.
 * Every behavior returns a force for the current frame; the update step sums
 * the weighted forces of the active behaviors, clamps the total, and
 * integrates velocity and position like a point mass:
 * 1. Targeting: seek, flee, pursue, evade, arrival
 * 2. Roaming: wander (the only behavior with state of its own)
 * 3. Group: flocking, follow-leader, queueing
 * 4. Environment: obstacle avoidance, wall-following
 */

use glam::Vec2;
use rand::Rng;
use slotmap::new_key_type;
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::behavior::{BehaviorKind, BehaviorPreset, BehaviorWeights};
use crate::context::WorldContext;
use crate::math::{cast_ray, distance, from_heading, heading_of, magnitude, normalize, rotate, truncate, wrap};
use crate::obstacle::Obstacle;
use crate::params::SteeringParams;

new_key_type! {
    /// Handle to an agent in the population arena.
    pub struct AgentId;
}

/// The three flocking components, before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlockForces {
    pub cohesion: Vec2,
    pub alignment: Vec2,
    pub separation: Vec2,
}

impl FlockForces {
    pub fn weighted(&self, params: &SteeringParams) -> Vec2 {
        self.cohesion * params.cohesion_weight
            + self.alignment * params.alignment_weight
            + self.separation * params.separation_weight
    }
}

#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub heading: f32,
    /// Agent this one follows or queues behind. Never `id` itself.
    pub follow_target: Option<AgentId>,
    pub(crate) preset: BehaviorPreset,
    pub(crate) weights: BehaviorWeights,
    pub(crate) wander_angle: f32,
    pub(crate) previous_target: Vec2,
    acceleration: Vec2,
    last_force: Vec2,
}

impl Agent {
    pub fn new(id: AgentId, position: Vec2, heading: f32, speed: f32, preset: BehaviorPreset, weights: BehaviorWeights) -> Self {
        Self {
            id,
            position,
            velocity: from_heading(heading) * speed,
            heading,
            follow_target: None,
            preset,
            weights,
            wander_angle: heading,
            previous_target: position,
            acceleration: Vec2::ZERO,
            last_force: Vec2::ZERO,
        }
    }

    pub fn preset(&self) -> BehaviorPreset {
        self.preset
    }

    pub fn weights(&self) -> &BehaviorWeights {
        &self.weights
    }

    pub fn wander_angle(&self) -> f32 {
        self.wander_angle
    }

    pub fn previous_target_position(&self) -> Vec2 {
        self.previous_target
    }

    /// Clamped total force applied by the most recent update.
    pub fn last_force(&self) -> Vec2 {
        self.last_force
    }

    // Unit vector along the velocity, or along the heading when standing still
    fn forward(&self) -> Vec2 {
        let direction = normalize(self.velocity);
        if direction == Vec2::ZERO {
            from_heading(self.heading)
        } else {
            direction
        }
    }

    // Reynolds steering: full force along (desired - velocity)
    fn steer(&self, desired: Vec2, params: &SteeringParams, dt: f32) -> Vec2 {
        normalize(desired - self.velocity) * params.max_force * dt
    }

    pub fn seek(&self, target: Vec2, params: &SteeringParams, dt: f32) -> Vec2 {
        let offset = target - self.position;
        if magnitude(offset) == 0.0 {
            return Vec2::ZERO;
        }

        let desired = normalize(offset) * params.max_speed;
        self.steer(desired, params, dt)
    }

    pub fn flee(&self, target: Vec2, params: &SteeringParams, dt: f32) -> Vec2 {
        -self.seek(target, params, dt)
    }

    // Seek the target's position extrapolated linearly over the prediction horizon
    pub fn pursue(&self, target_position: Vec2, target_velocity: Vec2, params: &SteeringParams, dt: f32) -> Vec2 {
        let predicted = target_position + target_velocity * params.prediction_time;
        self.seek(predicted, params, dt)
    }

    pub fn evade(&self, target_position: Vec2, target_velocity: Vec2, params: &SteeringParams, dt: f32) -> Vec2 {
        -self.pursue(target_position, target_velocity, params, dt)
    }

    /// Random walk on a circle just ahead of the agent.
    ///
    /// The wander angle is advanced by a uniform step in
    /// `[-wander_noise, wander_noise]` every call, independently of `dt`.
    pub fn wander<R: Rng + ?Sized>(&mut self, rng: &mut R, params: &SteeringParams, dt: f32) -> Vec2 {
        let step = if params.wander_noise > 0.0 {
            rng.gen_range(-params.wander_noise..=params.wander_noise)
        } else {
            0.0
        };
        self.wander_angle = (self.wander_angle + step).rem_euclid(TAU);

        let center = self.position + self.forward() * params.wander_distance;
        let target = center + from_heading(self.wander_angle) * params.wander_radius;
        self.seek(target, params, dt)
    }

    /// Desired velocity of the arrival behavior: full speed outside the
    /// arrival radius, scaled down linearly inside it.
    pub fn arrival_desired_velocity(&self, target: Vec2, params: &SteeringParams) -> Vec2 {
        let offset = target - self.position;
        let remaining = magnitude(offset);
        if remaining == 0.0 {
            return Vec2::ZERO;
        }

        let mut speed = params.max_speed;
        if remaining < params.arrival_radius {
            speed *= remaining / params.arrival_radius;
        }
        normalize(offset) * speed
    }

    pub fn arrival(&self, target: Vec2, params: &SteeringParams, dt: f32) -> Vec2 {
        if distance(self.position, target) == 0.0 {
            return Vec2::ZERO;
        }

        let desired = self.arrival_desired_velocity(target, params);
        self.steer(desired, params, dt)
    }

    pub fn obstacle_avoidance(&self, obstacles: &[Obstacle], params: &SteeringParams, dt: f32) -> Vec2 {
        let mut away = Vec2::ZERO;
        let mut count = 0;

        for obstacle in obstacles {
            if obstacle.is_within(self.position, params.avoidance_distance) {
                away += normalize(self.position - obstacle.position());
                count += 1;
            }
        }

        if count == 0 {
            return Vec2::ZERO;
        }

        away /= count as f32;
        normalize(away) * params.max_force * dt
    }

    /// Arrive at a point trailing the leader; a leader itself wanders.
    pub fn follow_leader<R: Rng + ?Sized>(&mut self, ctx: &WorldContext, rng: &mut R, params: &SteeringParams) -> Vec2 {
        match self.leader(ctx) {
            Some(leader) => {
                let behind = leader.position - normalize(leader.velocity) * params.follow_distance;
                self.arrival(behind, params, ctx.dt)
            }
            None => self.wander(rng, params, ctx.dt),
        }
    }

    /// Close the gap to the agent ahead, then hold position.
    pub fn queue<R: Rng + ?Sized>(&mut self, ctx: &WorldContext, rng: &mut R, params: &SteeringParams) -> Vec2 {
        match self.leader(ctx) {
            Some(leader) => {
                if distance(self.position, leader.position) > params.queue_distance {
                    self.seek(leader.position, params, ctx.dt)
                } else {
                    Vec2::ZERO
                }
            }
            None => self.wander(rng, params, ctx.dt),
        }
    }

    // Resolve the follow handle; a stale handle or a self reference means no leader
    fn leader<'a>(&self, ctx: &WorldContext<'a>) -> Option<&'a Agent> {
        self.follow_target
            .filter(|&id| id != self.id)
            .and_then(|id| ctx.agent(id))
    }

    /// Keep obstacle centers at the wall distance on either side.
    ///
    /// Rays are cast perpendicular to the direction of travel; the left ray
    /// is checked first and wins when both sides are close.
    pub fn wall_follow(&self, obstacles: &[Obstacle], params: &SteeringParams, dt: f32) -> Vec2 {
        if obstacles.is_empty() {
            return Vec2::ZERO;
        }

        let forward = self.forward();
        let left = rotate(forward, FRAC_PI_2);
        let right = -left;
        let reach = params.desired_distance_from_wall;
        let centers: Vec<Vec2> = obstacles.iter().map(Obstacle::position).collect();

        if let Some(hit) = cast_ray(self.position, left, reach, &centers) {
            return self.seek(hit.point + right * reach, params, dt);
        }
        if let Some(hit) = cast_ray(self.position, right, reach, &centers) {
            return self.seek(hit.point + left * reach, params, dt);
        }

        Vec2::ZERO
    }

    /// Cohesion, alignment and separation from one pass over `neighbors`,
    /// given as `(position, velocity)` pairs.
    pub fn flock<I>(&self, neighbors: I, params: &SteeringParams, dt: f32) -> FlockForces
    where
        I: IntoIterator<Item = (Vec2, Vec2)>,
    {
        let mut center = Vec2::ZERO;
        let mut heading = Vec2::ZERO;
        let mut away = Vec2::ZERO;
        let mut neighbor_count = 0;
        let mut separation_count = 0;

        // Process all neighbors in a single pass
        for (position, velocity) in neighbors {
            let d = distance(self.position, position);

            if d < params.neighbor_radius {
                center += position;
                heading += velocity;
                neighbor_count += 1;
            }

            if d < params.separation_radius {
                away += normalize(self.position - position);
                separation_count += 1;
            }
        }

        let mut forces = FlockForces::default();

        if neighbor_count > 0 {
            center /= neighbor_count as f32;
            heading /= neighbor_count as f32;

            forces.cohesion = self.seek(center, params, dt);

            let desired = normalize(heading) * params.max_speed;
            forces.alignment = (desired - self.velocity) * dt;
        }

        if separation_count > 0 {
            away /= separation_count as f32;
            forces.separation = self.seek(self.position + away, params, dt);
        }

        forces
    }

    /// Weighted sum of every active behavior, before clamping.
    ///
    /// Also records the external target as observed this frame, which is
    /// what pursue and evade difference against next frame.
    pub fn steering_force<R: Rng + ?Sized>(&mut self, ctx: &WorldContext, rng: &mut R, params: &SteeringParams) -> Vec2 {
        let dt = ctx.dt;
        let target = ctx.external_target;
        let target_velocity = target - self.previous_target;
        let weights = self.weights;
        let mut total = Vec2::ZERO;

        for (kind, weight) in weights.active() {
            let force = match kind {
                BehaviorKind::Seek => self.seek(target, params, dt),
                BehaviorKind::Flee => self.flee(target, params, dt),
                BehaviorKind::Pursue => self.pursue(target, target_velocity, params, dt),
                BehaviorKind::Evade => self.evade(target, target_velocity, params, dt),
                BehaviorKind::Wander => self.wander(rng, params, dt),
                BehaviorKind::Arrival => self.arrival(target, params, dt),
                BehaviorKind::Flocking => {
                    let neighbors = ctx.neighbors(self.id).map(|other| (other.position, other.velocity));
                    self.flock(neighbors, params, dt).weighted(params)
                }
                BehaviorKind::ObstacleAvoidance => self.obstacle_avoidance(ctx.obstacles, params, dt),
                BehaviorKind::FollowLeader => self.follow_leader(ctx, rng, params),
                BehaviorKind::Queue => self.queue(ctx, rng, params),
                BehaviorKind::WallFollow => self.wall_follow(ctx.obstacles, params, dt),
            };
            total += force * weight;
        }

        self.previous_target = target;
        total
    }

    // Apply a force to the agent
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    // Update the agent's position based on its velocity and accumulated force
    pub fn update(&mut self, params: &SteeringParams, bounds: Vec2) {
        // Limit force
        let force = truncate(self.acceleration, params.max_force);
        self.last_force = force;

        // Update velocity and limit speed
        self.velocity = truncate(self.velocity + force, params.max_speed);

        // Update position and wrap around the arena
        self.position = wrap(self.position + self.velocity, bounds);

        if self.velocity != Vec2::ZERO {
            self.heading = heading_of(self.velocity);
        }

        // Reset acceleration
        self.acceleration = Vec2::ZERO;
    }

    /// Full per-frame update: steer, then integrate.
    pub fn step<R: Rng + ?Sized>(&mut self, ctx: &WorldContext, rng: &mut R, params: &SteeringParams) {
        let force = self.steering_force(ctx, rng, params);
        self.apply_force(force);
        self.update(params, ctx.bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use slotmap::SlotMap;

    const EPS: f32 = 1e-4;
    const DT: f32 = 1.0 / 60.0;
    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn spawn(agents: &mut SlotMap<AgentId, Agent>, position: Vec2, velocity: Vec2, preset: BehaviorPreset) -> AgentId {
        let params = SteeringParams::default();
        agents.insert_with_key(|id| {
            let mut agent = Agent::new(id, position, heading_of(velocity), 0.0, preset, preset.weights(params.avoidance_weight));
            agent.velocity = velocity;
            agent
        })
    }

    fn lone_agent(position: Vec2, velocity: Vec2) -> Agent {
        let mut agents = SlotMap::with_key();
        let id = spawn(&mut agents, position, velocity, BehaviorPreset::Seek);
        agents.remove(id).unwrap()
    }

    #[test]
    fn seek_toward_own_position_is_zero() {
        let params = SteeringParams::default();
        let agent = lone_agent(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0));
        assert_eq!(agent.seek(agent.position, &params, DT), Vec2::ZERO);
    }

    #[test]
    fn seek_has_full_force_scaled_by_dt() {
        let params = SteeringParams::default();
        let agent = lone_agent(Vec2::ZERO, Vec2::ZERO);
        let force = agent.seek(Vec2::new(100.0, 0.0), &params, DT);
        assert!((force.length() - params.max_force * DT).abs() < EPS);
        assert!(force.x > 0.0);
    }

    #[test]
    fn flee_is_negated_seek() {
        let params = SteeringParams::default();
        let agent = lone_agent(Vec2::new(10.0, 10.0), Vec2::new(0.5, 1.0));
        let target = Vec2::new(200.0, 50.0);
        assert_eq!(agent.flee(target, &params, DT), -agent.seek(target, &params, DT));
    }

    #[test]
    fn pursue_leads_a_moving_target() {
        let params = SteeringParams::default();
        let agent = lone_agent(Vec2::ZERO, Vec2::ZERO);
        let target = Vec2::new(100.0, 0.0);
        let target_velocity = Vec2::new(0.0, 5.0);

        let force = agent.pursue(target, target_velocity, &params, DT);
        let expected = agent.seek(target + target_velocity * params.prediction_time, &params, DT);
        assert_eq!(force, expected);
        assert!(force.y > 0.0);
        assert_eq!(agent.evade(target, target_velocity, &params, DT), -force);
    }

    #[test]
    fn arrival_halves_speed_at_half_radius() {
        let params = SteeringParams {
            arrival_radius: 300.0,
            ..SteeringParams::default()
        };
        let agent = lone_agent(Vec2::ZERO, Vec2::ZERO);
        let desired = agent.arrival_desired_velocity(Vec2::new(150.0, 0.0), &params);
        assert!((desired.length() - params.max_speed * 0.5).abs() < EPS);
    }

    #[test]
    fn arrival_matches_seek_outside_radius() {
        let params = SteeringParams::default();
        let agent = lone_agent(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let target = Vec2::new(params.arrival_radius + 50.0, 0.0);
        assert_eq!(agent.arrival(target, &params, DT), agent.seek(target, &params, DT));
        assert_eq!(agent.arrival(agent.position, &params, DT), Vec2::ZERO);
    }

    #[test]
    fn arrival_brakes_when_too_fast_near_target() {
        let params = SteeringParams::default();
        let agent = lone_agent(Vec2::ZERO, Vec2::new(params.max_speed, 0.0));
        let force = agent.arrival(Vec2::new(30.0, 0.0), &params, DT);
        assert!(force.x < 0.0);
    }

    #[test]
    fn wander_is_reproducible_with_a_seed() {
        let params = SteeringParams::default();
        let mut a = lone_agent(Vec2::new(400.0, 300.0), Vec2::new(1.0, 0.0));
        let mut b = a.clone();
        let mut rng_a = ChaCha8Rng::seed_from_u64(7);
        let mut rng_b = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..50 {
            let fa = a.wander(&mut rng_a, &params, DT);
            let fb = b.wander(&mut rng_b, &params, DT);
            assert_eq!(fa, fb);
        }
        assert_eq!(a.wander_angle(), b.wander_angle());
    }

    #[test]
    fn wander_step_is_bounded() {
        let params = SteeringParams::default();
        let mut agent = lone_agent(Vec2::new(400.0, 300.0), Vec2::new(1.0, 0.0));
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..200 {
            let before = agent.wander_angle();
            agent.wander(&mut rng, &params, DT);
            let mut delta = (agent.wander_angle() - before).rem_euclid(TAU);
            if delta > std::f32::consts::PI {
                delta -= TAU;
            }
            assert!(delta.abs() <= params.wander_noise + EPS);
        }
    }

    #[test]
    fn wander_without_noise_keeps_angle() {
        let params = SteeringParams {
            wander_noise: 0.0,
            ..SteeringParams::default()
        };
        let mut agent = lone_agent(Vec2::new(400.0, 300.0), Vec2::new(0.0, 1.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let angle = agent.wander_angle();
        agent.wander(&mut rng, &params, DT);
        assert!((agent.wander_angle() - angle).abs() < EPS);
    }

    #[test]
    fn avoidance_pushes_away_from_close_obstacles() {
        let params = SteeringParams::default();
        let agent = lone_agent(Vec2::new(100.0, 100.0), Vec2::ZERO);
        let obstacles = [
            Obstacle::new(Vec2::new(130.0, 100.0), 10.0).unwrap(),
            Obstacle::new(Vec2::new(500.0, 500.0), 10.0).unwrap(),
        ];
        let force = agent.obstacle_avoidance(&obstacles, &params, DT);
        assert!(force.x < 0.0);
        assert!(force.y.abs() < EPS);
        assert!((force.length() - params.max_force * DT).abs() < EPS);
    }

    #[test]
    fn avoidance_is_zero_when_clear() {
        let params = SteeringParams::default();
        let agent = lone_agent(Vec2::new(100.0, 100.0), Vec2::ZERO);
        let obstacles = [Obstacle::new(Vec2::new(400.0, 100.0), 10.0).unwrap()];
        assert_eq!(agent.obstacle_avoidance(&obstacles, &params, DT), Vec2::ZERO);
    }

    #[test]
    fn isolated_flocking_is_zero() {
        let params = SteeringParams::default();
        let agent = lone_agent(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0));
        let far = [(Vec2::new(500.0, 500.0), Vec2::new(0.0, 1.0))];
        assert_eq!(agent.flock(far, &params, DT), FlockForces::default());
        assert_eq!(agent.flock(std::iter::empty(), &params, DT), FlockForces::default());
    }

    #[test]
    fn flocking_components_point_the_right_way() {
        let params = SteeringParams::default();
        let agent = lone_agent(Vec2::new(100.0, 100.0), Vec2::ZERO);
        // One neighbor close enough to trigger separation, one only cohesion
        let neighbors = [
            (Vec2::new(110.0, 100.0), Vec2::new(0.0, 2.0)),
            (Vec2::new(140.0, 100.0), Vec2::new(0.0, 2.0)),
        ];
        let forces = agent.flock(neighbors, &params, DT);

        assert!(forces.cohesion.x > 0.0);
        assert!(forces.alignment.y > 0.0);
        assert!(forces.separation.x < 0.0);
    }

    #[test]
    fn alignment_is_the_full_velocity_difference() {
        let params = SteeringParams::default();
        let agent = lone_agent(Vec2::new(100.0, 100.0), Vec2::new(4.0, 0.0));
        let oncoming = [(Vec2::new(140.0, 100.0), Vec2::new(-4.0, 0.0))];

        // Desired (-4, 0) minus velocity (4, 0), larger than max_force and left unclamped
        let forces = agent.flock(oncoming, &params, 1.0);
        assert!((forces.alignment - Vec2::new(-8.0, 0.0)).length() < EPS);
        assert_eq!(forces.separation, Vec2::ZERO);
    }

    #[test]
    fn follower_aims_behind_the_leader() {
        let params = SteeringParams::default();
        let mut agents = SlotMap::with_key();
        let leader = spawn(&mut agents, Vec2::new(400.0, 300.0), Vec2::new(2.0, 0.0), BehaviorPreset::Wander);
        let follower = spawn(&mut agents, Vec2::new(380.0, 350.0), Vec2::ZERO, BehaviorPreset::FollowLeader);
        agents[follower].follow_target = Some(leader);

        let order = [leader, follower];
        let ctx = WorldContext::new(BOUNDS, DT, Vec2::ZERO, &[], &agents, &order);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut agent = agents[follower].clone();
        let force = agent.follow_leader(&ctx, &mut rng, &params);

        // Target is (360, 300): behind the leader along its reversed heading
        let expected = normalize(Vec2::new(360.0, 300.0) - agent.position);
        assert!(force.x < 0.0, "force should point behind the leader, got {force:?}");
        assert!((normalize(force) - expected).length() < EPS);
    }

    #[test]
    fn leader_without_target_wanders() {
        let params = SteeringParams::default();
        let mut agents = SlotMap::with_key();
        let solo = spawn(&mut agents, Vec2::new(400.0, 300.0), Vec2::new(1.0, 0.0), BehaviorPreset::FollowLeader);
        let order = [solo];
        let ctx = WorldContext::new(BOUNDS, DT, Vec2::ZERO, &[], &agents, &order);

        let mut via_follow = agents[solo].clone();
        let mut via_wander = agents[solo].clone();
        let mut rng_a = ChaCha8Rng::seed_from_u64(9);
        let mut rng_b = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(
            via_follow.follow_leader(&ctx, &mut rng_a, &params),
            via_wander.wander(&mut rng_b, &params, DT)
        );
    }

    #[test]
    fn queue_holds_when_close() {
        let params = SteeringParams::default();
        let mut agents = SlotMap::with_key();
        let front = spawn(&mut agents, Vec2::new(400.0, 300.0), Vec2::ZERO, BehaviorPreset::Queue);
        let near = spawn(&mut agents, Vec2::new(380.0, 300.0), Vec2::ZERO, BehaviorPreset::Queue);
        let far = spawn(&mut agents, Vec2::new(200.0, 300.0), Vec2::ZERO, BehaviorPreset::Queue);
        agents[near].follow_target = Some(front);
        agents[far].follow_target = Some(front);

        let order = [front, near, far];
        let ctx = WorldContext::new(BOUNDS, DT, Vec2::ZERO, &[], &agents, &order);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        assert_eq!(agents[near].clone().queue(&ctx, &mut rng, &params), Vec2::ZERO);
        assert!(agents[far].clone().queue(&ctx, &mut rng, &params).x > 0.0);
    }

    #[test]
    fn queue_without_leader_wanders() {
        let params = SteeringParams::default();
        let mut agents = SlotMap::with_key();
        let solo = spawn(&mut agents, Vec2::new(400.0, 300.0), Vec2::new(1.0, 0.0), BehaviorPreset::Queue);
        let gone = spawn(&mut agents, Vec2::new(300.0, 300.0), Vec2::ZERO, BehaviorPreset::Queue);
        agents.remove(gone);
        agents[solo].follow_target = Some(gone);

        let order = [solo];
        let ctx = WorldContext::new(BOUNDS, DT, Vec2::ZERO, &[], &agents, &order);
        let mut via_queue = agents[solo].clone();
        let mut via_wander = agents[solo].clone();
        let mut rng_a = ChaCha8Rng::seed_from_u64(13);
        let mut rng_b = ChaCha8Rng::seed_from_u64(13);

        assert_eq!(
            via_queue.queue(&ctx, &mut rng_a, &params),
            via_wander.wander(&mut rng_b, &params, DT)
        );
        assert_eq!(via_queue.wander_angle(), via_wander.wander_angle());
    }

    #[test]
    fn wall_follow_prefers_left_ray() {
        let params = SteeringParams::default();
        // Moving along +x: left is +y, right is -y
        let agent = lone_agent(Vec2::new(100.0, 100.0), Vec2::new(2.0, 0.0));
        let obstacles = [
            Obstacle::new(Vec2::new(100.0, 60.0), 5.0).unwrap(),
            Obstacle::new(Vec2::new(100.0, 130.0), 5.0).unwrap(),
        ];
        let force = agent.wall_follow(&obstacles, &params, DT);
        // Left hit at (100, 130), steer toward (100, 70)
        assert!(force.y < 0.0);

        let right_only = [obstacles[0]];
        let force = agent.wall_follow(&right_only, &params, DT);
        assert!(force.y > 0.0);
    }

    #[test]
    fn wall_follow_is_zero_without_hits() {
        let params = SteeringParams::default();
        let agent = lone_agent(Vec2::new(100.0, 100.0), Vec2::new(2.0, 0.0));
        let ahead = [Obstacle::new(Vec2::new(150.0, 100.0), 5.0).unwrap()];
        assert_eq!(agent.wall_follow(&ahead, &params, DT), Vec2::ZERO);
    }

    #[test]
    fn update_clamps_force_and_speed_and_wraps() {
        let params = SteeringParams::default();
        let mut agent = lone_agent(Vec2::new(799.0, 300.0), Vec2::new(params.max_speed, 0.0));
        agent.apply_force(Vec2::new(100.0, 0.0));
        agent.update(&params, BOUNDS);

        assert!((agent.last_force().length() - params.max_force).abs() < EPS);
        assert!(agent.velocity.length() <= params.max_speed + EPS);
        assert_eq!(agent.position.x, 0.0);
        assert!(agent.heading.abs() < EPS);
    }

    #[test]
    fn update_keeps_heading_when_stopped() {
        let params = SteeringParams::default();
        let mut agent = lone_agent(Vec2::new(100.0, 100.0), Vec2::new(0.0, 1.0));
        agent.heading = 1.0;
        agent.velocity = Vec2::ZERO;
        agent.update(&params, BOUNDS);
        assert_eq!(agent.heading, 1.0);
    }

    #[test]
    fn steering_force_tracks_target_motion() {
        let params = SteeringParams::default();
        let mut agents = SlotMap::with_key();
        let id = spawn(&mut agents, Vec2::new(100.0, 100.0), Vec2::ZERO, BehaviorPreset::Pursue);
        let order = [id];
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut agent = agents[id].clone();
        agent.previous_target = Vec2::new(300.0, 100.0);

        let target = Vec2::new(300.0, 110.0);
        let ctx = WorldContext::new(BOUNDS, DT, target, &[], &agents, &order);
        let force = agent.steering_force(&ctx, &mut rng, &params);

        let expected = agent.pursue(target, Vec2::new(0.0, 10.0), &params, DT);
        assert_eq!(force, expected);
        assert_eq!(agent.previous_target_position(), target);
    }
}
