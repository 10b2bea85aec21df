use std::ffi::CStr;
use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use glutin::config::{Api, Config, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::{Display, DisplayApiPreference};
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Initialization parameters for the GL layer.
#[derive(Debug, Clone)]
pub struct GlContextConfig {
    /// Requested OpenGL ES version (major, minor).
    pub gles_version: (u8, u8),

    /// Wait for vertical blank on swap.
    pub vsync: bool,
}

impl Default for GlContextConfig {
    fn default() -> Self {
        Self {
            gles_version: (3, 0),
            vsync: true,
        }
    }
}

/// Current GL context bound to the main window's surface.
///
/// Secondary windows get their own surfaces from
/// [`create_surface`](Self::create_surface); they share this context, which is
/// made current on one surface at a time. Must be dropped before the window it
/// was created from.
pub struct GlContext {
    gl: Rc<glow::Context>,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    display: Display,
    config: Config,
}

fn display_preference(window: RawWindowHandle) -> DisplayApiPreference {
    #[cfg(target_os = "windows")]
    {
        DisplayApiPreference::EglThenWgl(Some(window))
    }

    #[cfg(target_os = "macos")]
    {
        let _ = window;
        DisplayApiPreference::Cgl
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        let _ = window;
        DisplayApiPreference::Egl
    }
}

impl GlContext {
    pub fn new(window: &Window, config: &GlContextConfig) -> Result<Self> {
        let raw_display = window
            .display_handle()
            .context("window has no display handle")?
            .as_raw();
        let raw_window = window
            .window_handle()
            .context("window has no window handle")?
            .as_raw();

        let preference = display_preference(raw_window);
        log::debug!("creating GL display");
        // SAFETY: both handles come from a live window that outlives the display.
        let display = unsafe { Display::new(raw_display, preference) }
            .context("failed to create GL display")?;

        let template = ConfigTemplateBuilder::new()
            .with_api(Api::GLES3)
            .with_alpha_size(8)
            .with_transparency(false)
            .build();

        let gl_config = unsafe { display.find_configs(template) }
            .context("failed to query GL configs")?
            .next()
            .ok_or_else(|| anyhow!("no GLES 3 capable GL config"))?;

        let surface = window_surface(&display, &gl_config, window)?;

        let (major, minor) = config.gles_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(major, minor))))
            .build(Some(raw_window));
        let context = unsafe { display.create_context(&gl_config, &context_attributes) }
            .context("failed to create GL context")?
            .make_current(&surface)
            .context("failed to make GL context current")?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("failed to set swap interval: {e}");
        }

        // SAFETY: the context is current on this thread; the loader resolves
        // symbols from the same display.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|s: &CStr| display.get_proc_address(s))
        };

        log::info!("GLES {major}.{minor} context created (vsync: {})", config.vsync);

        Ok(Self {
            gl: Rc::new(gl),
            surface,
            context,
            display,
            config: gl_config,
        })
    }

    #[inline]
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Shared handle for code that outlives a borrow of this context.
    pub fn shared_gl(&self) -> Rc<glow::Context> {
        Rc::clone(&self.gl)
    }

    /// Creates a surface for another window, compatible with this context.
    pub fn create_surface(&self, window: &Window) -> Result<Surface<WindowSurface>> {
        window_surface(&self.display, &self.config, window)
    }

    /// Makes the context current on `surface`.
    pub fn make_current(&self, surface: &Surface<WindowSurface>) -> Result<()> {
        self.context
            .make_current(surface)
            .context("failed to make GL context current")
    }

    /// Makes the context current on the main window again.
    pub fn make_main_current(&self) -> Result<()> {
        self.make_current(&self.surface)
    }

    pub fn resize_surface(&self, surface: &Surface<WindowSurface>, size: PhysicalSize<u32>) {
        if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            surface.resize(&self.context, w, h);
        }
    }

    pub fn swap_surface(&self, surface: &Surface<WindowSurface>) -> Result<()> {
        surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }

    /// Resizes the surface. Zero-sized requests (minimized window) are ignored.
    pub fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            log::debug!("ignoring resize to {}x{}", size.width, size.height);
            return;
        };
        self.surface.resize(&self.context, w, h);
    }

    pub fn swap_buffers(&self) -> Result<()> {
        self.swap_surface(&self.surface)
    }
}

fn window_surface(display: &Display, config: &Config, window: &Window) -> Result<Surface<WindowSurface>> {
    let raw_window = window
        .window_handle()
        .context("window has no window handle")?
        .as_raw();
    let size = window.inner_size();
    let attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_window,
        nonzero(size.width),
        nonzero(size.height),
    );
    // SAFETY: the handle belongs to a live window; callers drop the surface
    // before the window.
    unsafe { display.create_window_surface(config, &attributes) }
        .context("failed to create window surface")
}

fn nonzero(v: u32) -> NonZeroU32 {
    NonZeroU32::new(v).unwrap_or(NonZeroU32::MIN)
}
