use eframe::egui::{Vec2, vec2};

/// Resolves a scalar force acting along `delta` into x/y components.
///
/// A positive force points the same way as `delta`, a negative one against
/// it. Pure-axis deltas are handled before the ratio formula so a zero
/// component never ends up in a denominator; the ratio is always taken as
/// minor/major axis to keep it bounded.
pub fn project(force: f32, delta: Vec2) -> Vec2 {
    if delta.x == 0.0 && delta.y == 0.0 {
        return Vec2::ZERO;
    }
    if delta.y == 0.0 {
        return vec2(force * delta.x.signum(), 0.0);
    }
    if delta.x == 0.0 {
        return vec2(0.0, force * delta.y.signum());
    }

    if delta.x.abs() >= delta.y.abs() {
        let dydx = delta.y / delta.x;
        let sqdydx = 1.0 / (1.0 + dydx * dydx).sqrt();
        vec2(
            force * sqdydx * delta.x.signum(),
            force * dydx.abs() * sqdydx * delta.y.signum(),
        )
    } else {
        let dxdy = delta.x / delta.y;
        let sqdxdy = 1.0 / (1.0 + dxdy * dxdy).sqrt();
        vec2(
            force * dxdy.abs() * sqdxdy * delta.x.signum(),
            force * sqdxdy * delta.y.signum(),
        )
    }
}

pub(super) fn fallback_direction(first: usize, second: usize) -> Vec2 {
    let angle = ((first as f32) * 0.618_034 + (second as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

pub fn coulomb_force(
    point_a: Vec2,
    point_b: Vec2,
    charge_a: f32,
    charge_b: f32,
    coulomb_constant: f32,
    min_distance_sq: f32,
    fallback: Vec2,
) -> Vec2 {
    let delta = point_a - point_b;
    let distance_sq = delta.length_sq();
    let magnitude = coulomb_constant * charge_a * charge_b / distance_sq.max(min_distance_sq);

    if distance_sq <= f32::EPSILON {
        fallback * magnitude
    } else {
        project(magnitude, delta)
    }
}

pub fn hooke_force(point_a: Vec2, point_b: Vec2, spring_constant: f32, nominal_length: f32) -> Vec2 {
    let delta = point_b - point_a;
    let magnitude = -spring_constant * (delta.length() - nominal_length);
    project(magnitude, -delta)
}

pub fn centering_force(position: Vec2, strength: f32) -> Vec2 {
    -position * strength
}
