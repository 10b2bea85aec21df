use super::types::InputEvent;

/// Input state the runtime consults between events.
///
/// The GUI context keeps its own key, button and pointer state.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether a window of this application has keyboard focus.
    pub focused: bool,
}

impl InputState {
    pub fn apply_event(&mut self, ev: &InputEvent) {
        if let InputEvent::Focused(f) = ev {
            self.focused = *f;
        }
    }
}
