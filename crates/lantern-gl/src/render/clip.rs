use crate::coords::{ClipRect, ScissorRect};
use crate::scene::DisplayGeometry;

/// Projects a clip rectangle into framebuffer space and converts it to a
/// bottom-left-origin scissor box.
///
/// Returns `None` when the rectangle lies entirely outside the framebuffer.
/// Partially visible rectangles are not clamped; GL clips the scissor box.
pub fn project_clip(
    clip: ClipRect,
    geometry: &DisplayGeometry,
    fb_width: i32,
    fb_height: i32,
) -> Option<ScissorRect> {
    let r = clip.to_framebuffer(geometry.display_pos, geometry.framebuffer_scale);
    let (fb_w, fb_h) = (fb_width as f32, fb_height as f32);

    if !(r.min.x < fb_w && r.min.y < fb_h && r.max.x >= 0.0 && r.max.y >= 0.0) {
        return None;
    }

    Some(ScissorRect::new(
        r.min.x as i32,
        (fb_h - r.max.y) as i32,
        (r.max.x - r.min.x) as i32,
        (r.max.y - r.min.y) as i32,
    ))
}
