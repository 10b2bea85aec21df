use crate::scene::DisplayGeometry;

/// Column-major orthographic projection of the display rectangle.
///
/// Maps the top-left corner to clip space `(-1, +1)` and the bottom-right
/// corner to `(+1, -1)`.
pub fn ortho_projection(geometry: &DisplayGeometry) -> [f32; 16] {
    let l = geometry.display_pos.x;
    let r = geometry.display_pos.x + geometry.display_size.x;
    let t = geometry.display_pos.y;
    let b = geometry.display_pos.y + geometry.display_size.y;

    #[rustfmt::skip]
    let m = [
        2.0 / (r - l),     0.0,               0.0,  0.0,
        0.0,               2.0 / (t - b),     0.0,  0.0,
        0.0,               0.0,               -1.0, 0.0,
        (r + l) / (l - r), (t + b) / (b - t), 0.0,  1.0,
    ];
    m
}
