/*
 * Math Module
 *
 * Small vector helpers shared by the steering behaviors. Everything here is a
 * pure function over glam's Vec2. None of these helpers panic: degenerate
 * inputs such as a zero vector come back as a zero vector so the caller ends
 * up with a zero force instead of NaN.
 */

use glam::Vec2;

/// Unit vector in the direction of `v`, or zero when `v` has no length.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let length = v.length();
    if length == 0.0 {
        Vec2::ZERO
    } else {
        v / length
    }
}

#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    v.length()
}

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f32 {
    a.x * b.x + a.y * b.y
}

/// Rotate `v` counter-clockwise by `radians`.
#[inline]
pub fn rotate(v: Vec2, radians: f32) -> Vec2 {
    let (sin, cos) = radians.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Clamp the length of `v` to `max`, keeping its direction.
#[inline]
pub fn truncate(v: Vec2, max: f32) -> Vec2 {
    let length_squared = v.length_squared();
    if length_squared > max * max {
        v * (max / length_squared.sqrt())
    } else {
        v
    }
}

/// Heading angle of `v` in radians.
#[inline]
pub fn heading_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Unit vector pointing along `heading` (radians).
#[inline]
pub fn from_heading(heading: f32) -> Vec2 {
    let (sin, cos) = heading.sin_cos();
    Vec2::new(cos, sin)
}

/// Whether `point` lies strictly inside the circle.
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    (point - center).length_squared() < radius * radius
}

/// Teleport wrap against `[0, bounds.x] x [0, bounds.y]`.
///
/// A negative coordinate jumps to the far bound and a coordinate past the
/// bound jumps to zero. Values exactly on an edge are left alone.
pub fn wrap(position: Vec2, bounds: Vec2) -> Vec2 {
    let mut wrapped = position;

    // Wrap X position
    if wrapped.x < 0.0 {
        wrapped.x = bounds.x;
    } else if wrapped.x > bounds.x {
        wrapped.x = 0.0;
    }

    // Wrap Y position
    if wrapped.y < 0.0 {
        wrapped.y = bounds.y;
    } else if wrapped.y > bounds.y {
        wrapped.y = 0.0;
    }

    wrapped
}

/// The closest candidate found by [`cast_ray`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Index of the point in the slice that was cast against.
    pub index: usize,
    pub point: Vec2,
    /// Length of the point's projection onto the ray.
    pub distance: f32,
    /// Distance from the point to the ray line.
    pub perpendicular: f32,
}

/// Cast a ray from `origin` along `direction` and pick the candidate closest
/// to the ray line.
///
/// A point only counts when its projection onto the ray lies in
/// `(0, max_length]`. Among those the smallest perpendicular distance wins,
/// with the earlier point kept on a tie. A zero direction never hits.
pub fn cast_ray(origin: Vec2, direction: Vec2, max_length: f32, points: &[Vec2]) -> Option<RayHit> {
    let direction = normalize(direction);
    if direction == Vec2::ZERO {
        return None;
    }

    let mut best: Option<RayHit> = None;
    for (index, &point) in points.iter().enumerate() {
        let offset = point - origin;
        let projection = dot(offset, direction);
        if projection <= 0.0 || projection > max_length {
            continue;
        }

        let perpendicular = (offset - direction * projection).length();
        let closer = best.map_or(true, |hit| perpendicular < hit.perpendicular);
        if closer {
            best = Some(RayHit {
                index,
                point,
                distance: projection,
                perpendicular,
            });
        }
    }

    best
}
