use std::rc::Rc;

use anyhow::{Context, Result};

use imgui::{ConfigFlags, FontConfig, FontSource, PlatformMonitor};
use lantern_gl::gl::GlApi;
use lantern_gl::host::{ImguiHost, ImguiViewportBackend, SharedRenderer};
use lantern_gl::scene::DrawFrame;
use lantern_gl::{GlRenderer, RendererConfig};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::app::{App, AppControl, FrameInfo};
use crate::device::{GlContext, GlContextConfig};
use crate::input::platform::winit::translate_window_event;
use crate::input::{feed_imgui, InputEvent, InputState};
use crate::time::FrameClock;

use super::viewports::{register_main_viewport, Placement, SharedViewports, WinitPlatformBackend};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub context: GlContextConfig,
    pub renderer: RendererConfig,
    /// Let GUI windows leave the main window as OS windows of their own.
    pub viewports: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "lantern studio".to_string(),
            initial_size: LogicalSize::new(1280.0, 768.0),
            context: GlContextConfig::default(),
            renderer: RendererConfig::default(),
            viewports: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Everything tied to the main window.
///
/// Field order is drop order: the renderer goes first (it is disposed
/// explicitly in `teardown`), then the GUI context with its viewport
/// backends, the viewport windows, the GL context, and the window last.
struct Session {
    renderer: SharedRenderer,
    imgui: imgui::Context,
    viewports: SharedViewports,
    viewports_enabled: bool,
    input: InputState,
    events: Vec<InputEvent>,
    clock: FrameClock,
    gl: Rc<GlContext>,
    window: Window,
}

impl Session {
    fn create<A: App>(event_loop: &ActiveEventLoop, config: &RuntimeConfig, app: &A) -> Result<Self> {
        let mut attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        if let Some(monitor) = event_loop.primary_monitor() {
            let screen = monitor.size();
            let window = config.initial_size.to_physical::<f64>(monitor.scale_factor());
            let x = (f64::from(screen.width) - window.width).max(0.0) / 2.0;
            let y = (f64::from(screen.height) - window.height).max(0.0) / 2.0;
            attrs = attrs.with_position(PhysicalPosition::new(x, y));
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gl = Rc::new(GlContext::new(&window, &config.context)?);
        let viewports = SharedViewports::default();
        viewports.borrow_mut().set_main(Placement::of(&window));

        let mut imgui = imgui::Context::create();
        imgui.set_ini_filename(None);
        imgui.set_platform_name(Some(format!(
            "lantern-studio-winit {}",
            env!("CARGO_PKG_VERSION")
        )));
        imgui.io_mut().config_flags |= ConfigFlags::NAV_ENABLE_KEYBOARD | ConfigFlags::DOCKING_ENABLE;
        if config.viewports {
            let io = imgui.io_mut();
            io.config_flags |= ConfigFlags::VIEWPORTS_ENABLE;
            io.backend_flags.insert(imgui::BackendFlags::PLATFORM_HAS_VIEWPORTS);
            imgui.set_platform_backend(WinitPlatformBackend::new(viewports.clone(), gl.clone()));
            register_main_viewport(&mut imgui);
            update_monitors(&mut imgui, event_loop, &window);
        }
        add_default_font(&mut imgui, app.font_size_pixels());

        let renderer = SharedRenderer::default();
        let backend = ImguiViewportBackend::new(gl.shared_gl(), renderer.clone());
        let initialized = GlRenderer::init(
            gl.gl(),
            &mut ImguiHost::with_viewport_backend(&mut imgui, backend),
            &config.renderer,
        )
        .context("failed to initialize GL renderer")?;
        *renderer.borrow_mut() = Some(initialized);

        window.request_redraw();

        Ok(Self {
            renderer,
            imgui,
            viewports,
            viewports_enabled: config.viewports,
            input: InputState {
                focused: window.has_focus(),
            },
            events: Vec::new(),
            clock: FrameClock::default(),
            gl,
            window,
        })
    }

    /// Handles a main-window event. Returns whether it produced any input for
    /// the GUI.
    fn handle_input(&mut self, event: &WindowEvent) -> bool {
        let main_pos = self.viewports.borrow_mut().main_event(&self.window, event);
        // Without viewports the GUI works in window coordinates.
        let origin = if self.viewports_enabled { main_pos } else { [0.0, 0.0] };
        self.feed_input(self.window.scale_factor(), origin, event)
    }

    /// Handles an event for a secondary viewport window.
    fn handle_viewport_event(&mut self, window_id: WindowId, event: &WindowEvent) -> bool {
        let found = self.viewports.borrow_mut().window_event(&self.gl, window_id, event);
        match found {
            Some((scale, origin)) => self.feed_input(scale, origin, event),
            None => false,
        }
    }

    fn feed_input(&mut self, scale_factor: f64, origin: [f32; 2], event: &WindowEvent) -> bool {
        translate_window_event(scale_factor, origin, event, &mut self.events);
        let produced = !self.events.is_empty();

        let io = self.imgui.io_mut();
        for ev in self.events.drain(..) {
            self.input.apply_event(&ev);
            feed_imgui(io, &ev);
        }
        produced
    }

    /// Drives one frame: GUI frame, render, viewport windows, present.
    fn redraw<A: App>(&mut self, event_loop: &ActiveEventLoop, app: &mut A) -> Result<AppControl> {
        let time = self.clock.tick();
        let size = self.window.inner_size();
        let scale = self.window.scale_factor();

        let io = self.imgui.io_mut();
        io.update_delta_time(time.dt);
        io.display_size = [
            (f64::from(size.width) / scale) as f32,
            (f64::from(size.height) / scale) as f32,
        ];
        io.display_framebuffer_scale = [scale as f32, scale as f32];

        let gl = self.gl.gl();
        let [r, g, b, a] = app.clear_color();
        gl.viewport(0, 0, size.width as i32, size.height as i32);
        gl.clear_color(r, g, b, a);
        gl.clear(glow::COLOR_BUFFER_BIT);

        let info = FrameInfo {
            time,
            framebuffer_size: size,
            scale_factor: scale,
        };
        let ui = self.imgui.new_frame();
        let control = app.on_frame(ui, &info);
        let draw_data = self.imgui.render();

        if let Some(renderer) = self.renderer.borrow_mut().as_mut() {
            renderer.render(gl, &DrawFrame::from_imgui(draw_data));
        }

        if self.viewports_enabled {
            self.imgui.update_platform_windows();
            self.viewports.borrow_mut().realize(event_loop, &self.gl)?;
            self.imgui.render_platform_windows_default();
            self.gl.make_main_current()?;
        }

        self.window.pre_present_notify();
        self.gl.swap_buffers()?;

        if let AppControl::RebuildFonts { size_pixels } = control {
            self.rebuild_fonts(size_pixels)?;
        }

        Ok(control)
    }

    fn rebuild_fonts(&mut self, size_pixels: f32) -> Result<()> {
        log::debug!("rebuilding font atlas at {size_pixels}px");

        self.imgui.fonts().clear();
        add_default_font(&mut self.imgui, size_pixels);
        // The atlas rebuild stalls; keep it out of the next delta.
        self.clock.reset();

        if let Some(renderer) = self.renderer.borrow_mut().as_mut() {
            renderer
                .update_fonts_texture(self.gl.gl(), &mut ImguiHost::new(&mut self.imgui))
                .context("failed to rebuild font texture")?;
        }
        Ok(())
    }

    /// Releases renderer resources while the GL context is still alive.
    fn teardown(mut self) {
        let renderer = self.renderer.borrow_mut().take();
        if let Some(renderer) = renderer {
            renderer.dispose(self.gl.gl(), &mut ImguiHost::new(&mut self.imgui));
        }
        log::debug!("session closed");
    }
}

/// Publishes the monitor layout in GUI coordinates. Falls back to the main
/// window's area when the platform lists no monitors.
fn update_monitors(imgui: &mut imgui::Context, event_loop: &ActiveEventLoop, window: &Window) {
    let mut monitors: Vec<PlatformMonitor> = event_loop
        .available_monitors()
        .map(|monitor| {
            let scale = monitor.scale_factor();
            let pos = monitor.position().to_logical::<f32>(scale);
            let size = monitor.size().to_logical::<f32>(scale);
            platform_monitor([pos.x, pos.y], [size.width, size.height], scale as f32)
        })
        .collect();

    if monitors.is_empty() {
        let main = Placement::of(window);
        monitors.push(platform_monitor(main.pos, main.size, window.scale_factor() as f32));
    }
    log::debug!("{} monitor(s) available to GUI viewports", monitors.len());
    imgui.platform_io_mut().monitors.replace_from_slice(&monitors);
}

fn platform_monitor(pos: [f32; 2], size: [f32; 2], dpi_scale: f32) -> PlatformMonitor {
    PlatformMonitor {
        main_pos: pos,
        main_size: size,
        work_pos: pos,
        work_size: size,
        dpi_scale,
    }
}

fn add_default_font(imgui: &mut imgui::Context, size_pixels: f32) {
    imgui.fonts().add_font(&[FontSource::DefaultFontData {
        config: Some(FontConfig {
            size_pixels,
            ..FontConfig::default()
        }),
    }]);
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    app: A,
    session: Option<Session>,
    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            session: None,
            exit_requested: false,
            fatal: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        if let Some(session) = self.session.take() {
            session.teardown();
        }
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        self.request_exit(event_loop);
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() || self.exit_requested {
            return;
        }

        match Session::create(event_loop, &self.config, &self.app) {
            Ok(session) => self.session = Some(session),
            Err(e) => self.fail(event_loop, e.context("failed to create main window")),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw while focused; vsync paces the loop. Unfocused
        // windows only redraw on incoming events.
        if let Some(session) = &self.session {
            if session.input.focused {
                session.window.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.window.id() != window_id {
            // Secondary windows are drawn from the main window's frame.
            if session.handle_viewport_event(window_id, &event) {
                session.window.request_redraw();
            }
            return;
        }

        if session.handle_input(&event) {
            session.window.request_redraw();
        }

        match &event {
            WindowEvent::CloseRequested => self.request_exit(event_loop),

            WindowEvent::Resized(new_size) => {
                session.gl.resize(*new_size);
                session.window.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                session.gl.resize(session.window.inner_size());
                if session.viewports_enabled {
                    update_monitors(&mut session.imgui, event_loop, &session.window);
                }
                session.window.request_redraw();
            }

            WindowEvent::RedrawRequested => match session.redraw(event_loop, &mut self.app) {
                Ok(AppControl::Exit) => self.request_exit(event_loop),
                Ok(_) => {}
                Err(e) => self.fail(event_loop, e),
            },

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(session) = self.session.take() {
            session.teardown();
        }
    }
}
