//! Forwards input events to the GUI context.

use imgui::Io;

use super::types::{InputEvent, Key, Modifiers, MouseButton, MouseWheelDelta};

/// Pixel deltas per wheel "line" reported to the GUI.
const PIXELS_PER_LINE: f32 = 20.0;

/// Queues one event on the GUI io.
pub fn feed_imgui(io: &mut Io, ev: &InputEvent) {
    match ev {
        InputEvent::ModifiersChanged(m) => feed_modifiers(io, *m),

        InputEvent::Key { key, state } => {
            if let Some(k) = map_key(*key) {
                io.add_key_event(k, state.is_pressed());
            }
        }

        InputEvent::PointerMoved { x, y } => io.add_mouse_pos_event([*x, *y]),

        InputEvent::PointerLeft => io.add_mouse_pos_event([-f32::MAX, -f32::MAX]),

        InputEvent::PointerButton { button, state } => {
            if let Some(button) = map_mouse_button(*button) {
                io.add_mouse_button_event(button, state.is_pressed());
            }
        }

        InputEvent::MouseWheel(delta) => io.add_mouse_wheel_event(wheel_lines(*delta)),

        InputEvent::Text(text) => {
            for c in text.chars() {
                io.add_input_character(c);
            }
        }

        InputEvent::Focused(_) => {}
    }
}

fn feed_modifiers(io: &mut Io, m: Modifiers) {
    io.add_key_event(imgui::Key::ModCtrl, m.ctrl);
    io.add_key_event(imgui::Key::ModShift, m.shift);
    io.add_key_event(imgui::Key::ModAlt, m.alt);
    io.add_key_event(imgui::Key::ModSuper, m.meta);
}

pub(crate) fn wheel_lines(delta: MouseWheelDelta) -> [f32; 2] {
    match delta {
        MouseWheelDelta::Line { x, y } => [x, y],
        MouseWheelDelta::Pixel { x, y } => [x / PIXELS_PER_LINE, y / PIXELS_PER_LINE],
    }
}

pub(crate) fn map_mouse_button(b: MouseButton) -> Option<imgui::MouseButton> {
    Some(match b {
        MouseButton::Left => imgui::MouseButton::Left,
        MouseButton::Right => imgui::MouseButton::Right,
        MouseButton::Middle => imgui::MouseButton::Middle,
        MouseButton::Back => imgui::MouseButton::Extra1,
        MouseButton::Forward => imgui::MouseButton::Extra2,
        MouseButton::Other => return None,
    })
}

pub(crate) fn map_key(key: Key) -> Option<imgui::Key> {
    use imgui::Key as K;

    Some(match key {
        Key::Escape => K::Escape,
        Key::Enter => K::Enter,
        Key::Tab => K::Tab,
        Key::Backspace => K::Backspace,
        Key::Space => K::Space,
        Key::Insert => K::Insert,
        Key::Delete => K::Delete,
        Key::Home => K::Home,
        Key::End => K::End,
        Key::PageUp => K::PageUp,
        Key::PageDown => K::PageDown,
        Key::ArrowUp => K::UpArrow,
        Key::ArrowDown => K::DownArrow,
        Key::ArrowLeft => K::LeftArrow,
        Key::ArrowRight => K::RightArrow,
        Key::Shift => K::LeftShift,
        Key::Control => K::LeftCtrl,
        Key::Alt => K::LeftAlt,
        Key::Meta => K::LeftSuper,
        Key::A => K::A,
        Key::B => K::B,
        Key::C => K::C,
        Key::D => K::D,
        Key::E => K::E,
        Key::F => K::F,
        Key::G => K::G,
        Key::H => K::H,
        Key::I => K::I,
        Key::J => K::J,
        Key::K => K::K,
        Key::L => K::L,
        Key::M => K::M,
        Key::N => K::N,
        Key::O => K::O,
        Key::P => K::P,
        Key::Q => K::Q,
        Key::R => K::R,
        Key::S => K::S,
        Key::T => K::T,
        Key::U => K::U,
        Key::V => K::V,
        Key::W => K::W,
        Key::X => K::X,
        Key::Y => K::Y,
        Key::Z => K::Z,
        Key::Digit0 => K::Alpha0,
        Key::Digit1 => K::Alpha1,
        Key::Digit2 => K::Alpha2,
        Key::Digit3 => K::Alpha3,
        Key::Digit4 => K::Alpha4,
        Key::Digit5 => K::Alpha5,
        Key::Digit6 => K::Alpha6,
        Key::Digit7 => K::Alpha7,
        Key::Digit8 => K::Alpha8,
        Key::Digit9 => K::Alpha9,
        Key::F1 => K::F1,
        Key::F2 => K::F2,
        Key::F3 => K::F3,
        Key::F4 => K::F4,
        Key::F5 => K::F5,
        Key::F6 => K::F6,
        Key::F7 => K::F7,
        Key::F8 => K::F8,
        Key::F9 => K::F9,
        Key::F10 => K::F10,
        Key::F11 => K::F11,
        Key::F12 => K::F12,
        Key::Unknown => return None,
    })
}
