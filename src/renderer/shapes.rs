//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;

/// Two triangles covering the axis-aligned rectangle at `top_left`
pub fn rect(top_left: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0) = (top_left.x, top_left.y);
    let (x1, y1) = (x0 + size.x, y0 + size.y);

    [
        Vertex::new(x0, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Filled rectangle with a translucent band over its top `shine_fraction`
pub fn highlighted_rect(
    out: &mut Vec<Vertex>,
    top_left: Vec2,
    size: Vec2,
    color: [f32; 4],
    shine: [f32; 4],
    shine_fraction: f32,
) {
    out.extend_from_slice(&rect(top_left, size, color));
    out.extend_from_slice(&rect(
        top_left,
        Vec2::new(size.x, size.y * shine_fraction),
        shine,
    ));
}

/// Square of edge `size` centred on `center`, faded by `alpha`
pub fn square(center: Vec2, size: f32, color: [f32; 4], alpha: f32) -> [Vertex; 6] {
    let half = size / 2.0;
    let color = [color[0], color[1], color[2], color[3] * alpha];
    rect(center - Vec2::splat(half), Vec2::splat(size), color)
}
