use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use oroview::graph::NodeType;

const BASE_NODE_RADIUS: f32 = 7.0;

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(22, 24, 30));

    let step = (64.0 * zoom.clamp(0.5, 2.0)).max(24.0);
    let origin = rect.center() + pan;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(58, 64, 76, 60));

    let mut x = origin.x.rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = origin.y.rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn curve_visible(rect: Rect, points: [Pos2; 3], padding: f32) -> bool {
    let min_x = points.iter().map(|point| point.x).fold(f32::INFINITY, f32::min) - padding;
    let max_x = points.iter().map(|point| point.x).fold(f32::NEG_INFINITY, f32::max) + padding;
    let min_y = points.iter().map(|point| point.y).fold(f32::INFINITY, f32::min) - padding;
    let max_y = points.iter().map(|point| point.y).fold(f32::NEG_INFINITY, f32::max) + padding;

    !(max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom())
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

/// Control point of the quadratic curve from `start` to `end` that passes
/// through `anchor` at its midpoint.
pub(super) fn curve_control(start: Pos2, anchor: Pos2, end: Pos2) -> Pos2 {
    let chord_mid = start + (end - start) * 0.5;
    anchor + (anchor - chord_mid)
}

pub(super) fn node_color(node_type: NodeType) -> Color32 {
    match node_type {
        NodeType::Class => Color32::from_rgb(88, 154, 226),
        NodeType::Instance => Color32::from_rgb(112, 196, 128),
        NodeType::Literal => Color32::from_rgb(232, 176, 84),
        NodeType::Undefined => Color32::from_rgb(150, 154, 162),
    }
}

pub(super) fn node_radius(zoom: f32, decay_ratio: f32) -> f32 {
    let base = BASE_NODE_RADIUS * zoom.powf(0.5);
    (base * (1.0 + decay_ratio.clamp(0.0, 1.0) * 0.9)).clamp(2.5, 40.0)
}

/// Brightness for a node `distance` hops away from the selection. Nodes are
/// fully lit when nothing is selected.
pub(super) fn distance_fade(distance: i32, max_levels: i32) -> f32 {
    if distance < 0 || max_levels <= 0 {
        return 1.0;
    }
    let ratio = distance.min(max_levels) as f32 / max_levels as f32;
    1.0 - ratio * 0.8
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    #[test]
    fn screen_mapping_round_trips() {
        let rect = Rect::from_min_size(pos2(10.0, 20.0), vec2(400.0, 300.0));
        let world = vec2(-35.0, 12.5);
        let screen = world_to_screen(rect, vec2(5.0, -7.0), 1.5, world);
        let back = screen_to_world(rect, vec2(5.0, -7.0), 1.5, screen);
        assert!((back - world).length() < 1e-4);
    }

    #[test]
    fn straight_curve_keeps_the_chord_midpoint() {
        let control = curve_control(pos2(0.0, 0.0), pos2(5.0, 0.0), pos2(10.0, 0.0));
        assert_eq!(control, pos2(5.0, 0.0));

        let bent = curve_control(pos2(0.0, 0.0), pos2(5.0, 2.0), pos2(10.0, 0.0));
        assert_eq!(bent, pos2(5.0, 4.0));
    }

    #[test]
    fn fade_follows_distance() {
        assert_eq!(distance_fade(-1, 5), 1.0);
        assert_eq!(distance_fade(0, 5), 1.0);
        assert!(distance_fade(2, 5) > distance_fade(4, 5));
        assert!((distance_fade(5, 5) - 0.2).abs() < 1e-6);
        assert_eq!(distance_fade(9, 5), distance_fade(5, 5));
    }

    #[test]
    fn tickled_nodes_are_larger() {
        assert!(node_radius(1.0, 1.0) > node_radius(1.0, 0.0));
        assert_eq!(node_radius(1.0, 0.0), BASE_NODE_RADIUS);
    }

    #[test]
    fn curve_visibility_uses_all_control_points() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        assert!(curve_visible(
            rect,
            [pos2(-50.0, 50.0), pos2(50.0, 50.0), pos2(150.0, 50.0)],
            0.0
        ));
        assert!(!curve_visible(
            rect,
            [pos2(-50.0, -50.0), pos2(-40.0, -60.0), pos2(-30.0, -50.0)],
            2.0
        ));
    }
}
