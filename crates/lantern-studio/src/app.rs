use winit::dpi::PhysicalSize;

use crate::time::FrameTime;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
    /// Rebuild the font atlas at a new size once the current frame is presented.
    RebuildFonts { size_pixels: f32 },
}

/// Per-frame context handed to the application.
#[derive(Debug, Copy, Clone)]
pub struct FrameInfo {
    pub time: FrameTime,
    pub framebuffer_size: PhysicalSize<u32>,
    pub scale_factor: f64,
}

/// Application contract driven by the runtime.
pub trait App {
    /// Font size used for the initial atlas.
    fn font_size_pixels(&self) -> f32 {
        13.0
    }

    /// Color the main framebuffer is cleared to before the GUI is drawn.
    fn clear_color(&self) -> [f32; 4];

    /// Declares the UI for one frame.
    fn on_frame(&mut self, ui: &imgui::Ui, frame: &FrameInfo) -> AppControl;
}
