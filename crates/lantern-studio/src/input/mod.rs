//! Input subsystem.
//!
//! Window-system events are translated into platform-agnostic [`InputEvent`]s
//! (`platform::winit`), tracked in a small [`InputState`], and forwarded to the
//! GUI context (`imgui_io`).

mod imgui_io;
pub mod platform;
mod state;
mod types;

pub use imgui_io::feed_imgui;
pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, Modifiers, MouseButton, MouseWheelDelta};
