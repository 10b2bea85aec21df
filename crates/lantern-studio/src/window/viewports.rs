//! Secondary OS windows for GUI viewports dragged outside the main window.
//!
//! The GUI asks for windows while it updates its platform windows, which is
//! not a point where winit can create them. Requests are recorded in
//! [`ViewportWindows`] and carried out by [`ViewportWindows::realize`] before
//! the platform windows are rendered.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::c_void;
use std::ptr;
use std::rc::Rc;

use anyhow::{Context, Result};
use glutin::surface::{Surface, WindowSurface};
use imgui::ViewportFlags;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::device::GlContext;

/// Window placement in GUI coordinates (logical pixels, screen space).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Placement {
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub focused: bool,
    pub minimized: bool,
}

impl Placement {
    pub fn of(window: &Window) -> Self {
        let scale = window.scale_factor();
        let pos = window
            .inner_position()
            .map(|p| p.to_logical::<f32>(scale))
            .unwrap_or_default();
        let size = window.inner_size().to_logical::<f32>(scale);
        Self {
            pos: [pos.x, pos.y],
            size: [size.width, size.height],
            focused: window.has_focus(),
            minimized: window.is_minimized().unwrap_or(false),
        }
    }
}

/// Window-system requests not yet handed to the GUI.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Requests {
    pub close: bool,
    pub moved: bool,
    pub resized: bool,
}

/// Change reported by the window system for one viewport window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WindowChange {
    Placed(Placement),
    Focused(bool),
    CloseRequested,
}

struct ViewportWindow {
    placement: Placement,
    title: String,
    decorated: bool,
    visible: bool,
    requests: Requests,
    // Dropped before the window it presents to.
    surface: Option<Surface<WindowSurface>>,
    window: Option<Window>,
}

/// Platform data of the GUI's main viewport.
const MAIN_VIEWPORT: usize = 1;

/// Bookkeeping for the main window and every secondary viewport window.
///
/// Viewports are identified by a key stored in the GUI viewport's platform
/// data; [`MAIN_VIEWPORT`] is the main window.
#[derive(Default)]
pub struct ViewportWindows {
    main: Placement,
    windows: HashMap<usize, ViewportWindow>,
    next_key: usize,
}

pub type SharedViewports = Rc<RefCell<ViewportWindows>>;

impl ViewportWindows {
    /// Records a window to be created on the next [`realize`](Self::realize).
    pub fn create(&mut self, pos: [f32; 2], size: [f32; 2], decorated: bool) -> usize {
        self.next_key = self.next_key.max(MAIN_VIEWPORT) + 1;
        let key = self.next_key;
        self.windows.insert(
            key,
            ViewportWindow {
                placement: Placement {
                    pos,
                    size,
                    ..Placement::default()
                },
                title: String::new(),
                decorated,
                visible: false,
                requests: Requests::default(),
                surface: None,
                window: None,
            },
        );
        key
    }

    pub fn destroy(&mut self, key: usize) {
        if self.windows.remove(&key).is_some() {
            log::debug!("viewport window {key} destroyed");
        }
    }

    /// Placement of viewport `key`, or of the main window for `None`.
    pub fn placement(&self, key: Option<usize>) -> Placement {
        match key {
            Some(key) => self.windows.get(&key).map(|w| w.placement).unwrap_or_default(),
            None => self.main,
        }
    }

    pub fn show(&mut self, key: usize) {
        if let Some(vw) = self.windows.get_mut(&key) {
            vw.visible = true;
            if let Some(window) = &vw.window {
                window.set_visible(true);
            }
        }
    }

    pub fn set_pos(&mut self, key: usize, pos: [f32; 2]) {
        if let Some(vw) = self.windows.get_mut(&key) {
            vw.placement.pos = pos;
            if let Some(window) = &vw.window {
                window.set_outer_position(LogicalPosition::new(pos[0], pos[1]));
            }
        }
    }

    pub fn set_size(&mut self, key: usize, size: [f32; 2]) {
        if let Some(vw) = self.windows.get_mut(&key) {
            vw.placement.size = size;
            if let Some(window) = &vw.window {
                let _ = window.request_inner_size(LogicalSize::new(size[0], size[1]));
            }
        }
    }

    pub fn set_title(&mut self, key: usize, title: &str) {
        if let Some(vw) = self.windows.get_mut(&key) {
            vw.title = title.to_string();
            if let Some(window) = &vw.window {
                window.set_title(title);
            }
        }
    }

    pub fn focus(&self, key: usize) {
        if let Some(window) = self.windows.get(&key).and_then(|w| w.window.as_ref()) {
            window.focus_window();
        }
    }

    /// Applies a window-system change to viewport `key`.
    pub fn record(&mut self, key: usize, change: WindowChange) {
        let Some(vw) = self.windows.get_mut(&key) else {
            return;
        };
        match change {
            WindowChange::Placed(placement) => {
                vw.requests.moved |= placement.pos != vw.placement.pos;
                vw.requests.resized |= placement.size != vw.placement.size;
                vw.placement = placement;
            }
            WindowChange::Focused(focused) => vw.placement.focused = focused,
            WindowChange::CloseRequested => vw.requests.close = true,
        }
    }

    /// Hands pending requests to the caller and clears them.
    pub fn take_requests(&mut self, key: usize) -> Requests {
        self.windows
            .get_mut(&key)
            .map(|w| std::mem::take(&mut w.requests))
            .unwrap_or_default()
    }

    /// Updates the main window placement from a main-window event and
    /// returns the main window origin.
    pub fn main_event(&mut self, window: &Window, event: &WindowEvent) -> [f32; 2] {
        match event {
            WindowEvent::Moved(_) | WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.main = Placement::of(window);
            }
            WindowEvent::Focused(focused) => self.main.focused = *focused,
            _ => {}
        }
        self.main.pos
    }

    pub fn set_main(&mut self, placement: Placement) {
        self.main = placement;
    }

    /// Handles an event for a secondary window.
    ///
    /// Returns the window's scale factor and origin when `id` belongs to a
    /// viewport window.
    pub fn window_event(&mut self, gl: &GlContext, id: WindowId, event: &WindowEvent) -> Option<(f64, [f32; 2])> {
        let (key, vw) = self
            .windows
            .iter()
            .find(|(_, w)| w.window.as_ref().is_some_and(|win| win.id() == id))?;
        let key = *key;
        let window = vw.window.as_ref()?;
        let scale = window.scale_factor();

        let change = match event {
            WindowEvent::CloseRequested => Some(WindowChange::CloseRequested),
            WindowEvent::Focused(focused) => Some(WindowChange::Focused(*focused)),
            WindowEvent::Resized(size) => {
                if let Some(surface) = &vw.surface {
                    gl.resize_surface(surface, *size);
                }
                Some(WindowChange::Placed(Placement::of(window)))
            }
            WindowEvent::Moved(_) | WindowEvent::ScaleFactorChanged { .. } => {
                Some(WindowChange::Placed(Placement::of(window)))
            }
            _ => None,
        };
        if let Some(change) = change {
            self.record(key, change);
        }
        Some((scale, self.placement(Some(key)).pos))
    }

    /// Creates the OS windows and surfaces for viewports recorded since the
    /// last call.
    pub fn realize(&mut self, event_loop: &ActiveEventLoop, gl: &GlContext) -> Result<()> {
        for (key, vw) in self.windows.iter_mut().filter(|(_, w)| w.window.is_none()) {
            let Placement { pos, size, .. } = vw.placement;
            let attrs = Window::default_attributes()
                .with_title(vw.title.clone())
                .with_decorations(vw.decorated)
                .with_visible(false)
                .with_position(LogicalPosition::new(pos[0], pos[1]))
                .with_inner_size(LogicalSize::new(size[0].max(1.0), size[1].max(1.0)));
            let window = event_loop
                .create_window(attrs)
                .context("failed to create viewport window")?;
            let surface = gl.create_surface(&window)?;
            if vw.visible {
                window.set_visible(true);
            }
            log::debug!("viewport window {key} created at {pos:?} ({size:?})");

            vw.surface = Some(surface);
            vw.window = Some(window);
        }
        Ok(())
    }

    fn surface(&self, key: usize) -> Option<&Surface<WindowSurface>> {
        self.windows.get(&key)?.surface.as_ref()
    }
}

fn key_of(viewport: &imgui::Viewport) -> Option<usize> {
    match viewport.platform_user_data.addr() {
        0 | MAIN_VIEWPORT => None,
        key => Some(key),
    }
}

/// Marks the context's main viewport as owned by the runtime's main window.
pub fn register_main_viewport(_ctx: &mut imgui::Context) {
    // SAFETY: imgui-rs allows a single live context, so the borrowed one is
    // current and its main viewport is valid.
    unsafe {
        let main = imgui::sys::igGetMainViewport();
        (*main).PlatformUserData = ptr::without_provenance_mut::<c_void>(MAIN_VIEWPORT);
    }
}

/// imgui platform viewport backend over winit windows sharing one GL context.
pub struct WinitPlatformBackend {
    windows: SharedViewports,
    gl: Rc<GlContext>,
}

impl WinitPlatformBackend {
    pub fn new(windows: SharedViewports, gl: Rc<GlContext>) -> Self {
        Self { windows, gl }
    }
}

impl imgui::PlatformViewportBackend for WinitPlatformBackend {
    fn create_window(&mut self, viewport: &mut imgui::Viewport) {
        let decorated = !viewport.flags.contains(ViewportFlags::NO_DECORATION);
        let key = self
            .windows
            .borrow_mut()
            .create(viewport.pos, viewport.size, decorated);
        viewport.platform_user_data = ptr::without_provenance_mut::<c_void>(key);
    }

    fn destroy_window(&mut self, viewport: &mut imgui::Viewport) {
        // The main window belongs to the runtime.
        if let Some(key) = key_of(viewport) {
            self.windows.borrow_mut().destroy(key);
            viewport.platform_user_data = ptr::null_mut();
        }
    }

    fn show_window(&mut self, viewport: &mut imgui::Viewport) {
        if let Some(key) = key_of(viewport) {
            self.windows.borrow_mut().show(key);
        }
    }

    fn set_window_pos(&mut self, viewport: &mut imgui::Viewport, pos: [f32; 2]) {
        if let Some(key) = key_of(viewport) {
            self.windows.borrow_mut().set_pos(key, pos);
        }
    }

    fn get_window_pos(&mut self, viewport: &mut imgui::Viewport) -> [f32; 2] {
        self.windows.borrow().placement(key_of(viewport)).pos
    }

    fn set_window_size(&mut self, viewport: &mut imgui::Viewport, size: [f32; 2]) {
        if let Some(key) = key_of(viewport) {
            self.windows.borrow_mut().set_size(key, size);
        }
    }

    fn get_window_size(&mut self, viewport: &mut imgui::Viewport) -> [f32; 2] {
        self.windows.borrow().placement(key_of(viewport)).size
    }

    fn set_window_focus(&mut self, viewport: &mut imgui::Viewport) {
        if let Some(key) = key_of(viewport) {
            self.windows.borrow().focus(key);
        }
    }

    fn get_window_focus(&mut self, viewport: &mut imgui::Viewport) -> bool {
        self.windows.borrow().placement(key_of(viewport)).focused
    }

    fn get_window_minimized(&mut self, viewport: &mut imgui::Viewport) -> bool {
        self.windows.borrow().placement(key_of(viewport)).minimized
    }

    fn set_window_title(&mut self, viewport: &mut imgui::Viewport, title: &str) {
        if let Some(key) = key_of(viewport) {
            self.windows.borrow_mut().set_title(key, title);
        }
    }

    // winit has no per-window opacity.
    fn set_window_alpha(&mut self, _viewport: &mut imgui::Viewport, _alpha: f32) {}

    fn update_window(&mut self, viewport: &mut imgui::Viewport) {
        if let Some(key) = key_of(viewport) {
            let requests = self.windows.borrow_mut().take_requests(key);
            viewport.platform_request_close |= requests.close;
            viewport.platform_request_move |= requests.moved;
            viewport.platform_request_resize |= requests.resized;
        }
    }

    fn render_window(&mut self, viewport: &mut imgui::Viewport) {
        let Some(key) = key_of(viewport) else {
            return;
        };
        let windows = self.windows.borrow();
        if let Some(surface) = windows.surface(key) {
            if let Err(e) = self.gl.make_current(surface) {
                log::error!("viewport window {key}: {e:#}");
            }
        }
    }

    fn swap_buffers(&mut self, viewport: &mut imgui::Viewport) {
        let Some(key) = key_of(viewport) else {
            return;
        };
        let windows = self.windows.borrow();
        if let Some(surface) = windows.surface(key) {
            if let Err(e) = self.gl.swap_surface(surface) {
                log::error!("viewport window {key}: {e:#}");
            }
        }
    }

    fn create_vk_surface(
        &mut self,
        _viewport: &mut imgui::Viewport,
        _instance: u64,
        _out_surface: &mut u64,
    ) -> i32 {
        // VK_ERROR_EXTENSION_NOT_PRESENT: GL only.
        -7
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(pos: [f32; 2], size: [f32; 2]) -> WindowChange {
        WindowChange::Placed(Placement {
            pos,
            size,
            ..Placement::default()
        })
    }

    #[test]
    fn keys_are_unique_and_never_main() {
        let mut w = ViewportWindows::default();
        let a = w.create([0.0, 0.0], [10.0, 10.0], false);
        let b = w.create([0.0, 0.0], [10.0, 10.0], false);
        assert!(a > MAIN_VIEWPORT);
        assert_ne!(a, b);

        w.destroy(a);
        let c = w.create([0.0, 0.0], [10.0, 10.0], false);
        assert_ne!(c, a);
        assert_eq!(w.windows.len(), 2);
    }

    #[test]
    fn missing_key_reads_main_window() {
        let mut w = ViewportWindows::default();
        let main = Placement {
            pos: [100.0, 50.0],
            size: [1280.0, 768.0],
            focused: true,
            minimized: false,
        };
        w.set_main(main);
        let key = w.create([5.0, 6.0], [70.0, 80.0], true);

        assert_eq!(w.placement(None), main);
        assert_eq!(w.placement(Some(key)).pos, [5.0, 6.0]);
        assert_eq!(w.placement(Some(key)).size, [70.0, 80.0]);
        assert!(!w.placement(Some(key)).focused);
    }

    #[test]
    fn placement_set_before_creation_is_kept() {
        let mut w = ViewportWindows::default();
        let key = w.create([0.0, 0.0], [10.0, 10.0], false);

        w.set_pos(key, [300.0, 200.0]);
        w.set_size(key, [640.0, 480.0]);
        w.set_title(key, "Dear ImGui");
        w.show(key);

        let vw = &w.windows[&key];
        assert_eq!(vw.placement.pos, [300.0, 200.0]);
        assert_eq!(vw.placement.size, [640.0, 480.0]);
        assert_eq!(vw.title, "Dear ImGui");
        assert!(vw.visible);
        assert!(vw.window.is_none());
    }

    #[test]
    fn window_changes_become_requests_once() {
        let mut w = ViewportWindows::default();
        let key = w.create([0.0, 0.0], [10.0, 10.0], false);

        w.record(key, placed([4.0, 0.0], [10.0, 10.0]));
        w.record(key, WindowChange::CloseRequested);
        assert_eq!(
            w.take_requests(key),
            Requests {
                close: true,
                moved: true,
                resized: false,
            }
        );
        assert_eq!(w.take_requests(key), Requests::default());

        w.record(key, placed([4.0, 0.0], [20.0, 10.0]));
        assert!(w.take_requests(key).resized);
    }

    #[test]
    fn focus_follows_viewport_windows() {
        let mut w = ViewportWindows::default();
        let key = w.create([0.0, 0.0], [10.0, 10.0], false);
        assert!(!w.placement(Some(key)).focused);

        w.record(key, WindowChange::Focused(true));
        assert!(w.placement(Some(key)).focused);
        assert!(!w.placement(None).focused);

        w.destroy(key);
        assert!(!w.placement(Some(key)).focused);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut w = ViewportWindows::default();
        w.record(42, WindowChange::CloseRequested);
        w.set_pos(42, [1.0, 1.0]);
        w.destroy(42);
        assert_eq!(w.take_requests(42), Requests::default());
        assert_eq!(w.placement(Some(42)), Placement::default());
    }
}
