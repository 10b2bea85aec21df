use imgui::Condition;

use crate::app::{App, AppControl, FrameInfo};

const FONT_SIZE_MIN: f32 = 8.0;
const FONT_SIZE_MAX: f32 = 32.0;

/// Small showcase window: background color, timing readout, demo window and
/// font atlas rebuilds.
#[derive(Debug, Clone)]
pub struct ExampleUi {
    background: [f32; 3],
    show_demo: bool,
    /// Size requested through the slider.
    font_size: f32,
    /// Size the current atlas was built with.
    atlas_font_size: f32,
}

impl Default for ExampleUi {
    fn default() -> Self {
        Self {
            background: [0.10, 0.12, 0.16],
            show_demo: false,
            font_size: 13.0,
            atlas_font_size: 13.0,
        }
    }
}

impl ExampleUi {
    /// Returns the size to rebuild the atlas at, if the slider moved away
    /// from the size the atlas was built with.
    fn pending_rebuild(&self) -> Option<f32> {
        let size = self.font_size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
        if (size - self.atlas_font_size).abs() < f32::EPSILON {
            None
        } else {
            Some(size)
        }
    }

    fn request_rebuild(&mut self) -> AppControl {
        match self.pending_rebuild() {
            Some(size_pixels) => {
                self.atlas_font_size = size_pixels;
                AppControl::RebuildFonts { size_pixels }
            }
            None => AppControl::Continue,
        }
    }
}

impl App for ExampleUi {
    fn font_size_pixels(&self) -> f32 {
        self.atlas_font_size
    }

    fn clear_color(&self) -> [f32; 4] {
        let [r, g, b] = self.background;
        [r, g, b, 1.0]
    }

    fn on_frame(&mut self, ui: &imgui::Ui, frame: &FrameInfo) -> AppControl {
        let framerate = ui.io().framerate;

        let control = ui
            .window("lantern")
            .size([320.0, 220.0], Condition::FirstUseEver)
            .position([16.0, 16.0], Condition::FirstUseEver)
            .build(|| {
                ui.text("OpenGL ES renderer backend");
                ui.separator();

                ui.color_edit3("background", &mut self.background);
                ui.text(format!(
                    "frame {}  {:.1} fps  {}x{}",
                    frame.time.frame_index,
                    framerate,
                    frame.framebuffer_size.width,
                    frame.framebuffer_size.height,
                ));
                ui.checkbox("show demo window", &mut self.show_demo);

                ui.slider("font size", FONT_SIZE_MIN, FONT_SIZE_MAX, &mut self.font_size);
                if ui.button("Rebuild font atlas") {
                    return self.request_rebuild();
                }
                AppControl::Continue
            })
            .unwrap_or(AppControl::Continue);

        if self.show_demo {
            ui.show_demo_window(&mut self.show_demo);
        }

        control
    }
}
