//! Windowed frontend
//!
//! Owns the window, samples input between frames, paces frames at the target
//! rate and feeds the simulation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::assets::Assets;
use crate::audio::AudioManager;
use crate::consts::*;
use crate::renderer::{Canvas, Hud, Presenter, build_scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

pub const WINDOW_TITLE: &str = "Marshmallow Roasting Game";

/// Accumulates window input between frames
#[derive(Debug, Default)]
pub struct InputTracker {
    pointer: Vec2,
    button_down: bool,
    button_pressed: bool,
    confirm: bool,
}

impl InputTracker {
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    pub fn button(&mut self, down: bool) {
        if down && !self.button_down {
            self.button_pressed = true;
        }
        self.button_down = down;
    }

    pub fn confirm(&mut self) {
        self.confirm = true;
    }

    /// Input for the next frame. One-shot flags are cleared, so a press and
    /// release between two frames still counts as one press, and that frame
    /// sees the button as held.
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            pointer: self.pointer,
            button_down: self.button_down || self.button_pressed,
            button_pressed: self.button_pressed,
            confirm: self.confirm,
        };
        self.button_pressed = false;
        self.confirm = false;
        input
    }
}

/// Frames per second over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame at `time` seconds
    pub fn record(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest sample is the one we overwrite next
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((self.frame_times.len() - 1) as f64 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

struct Graphics {
    window: Arc<Window>,
    presenter: Presenter,
}

pub struct App {
    settings: Settings,
    assets: Assets,
    audio: AudioManager,
    state: GameState,
    canvas: Canvas,
    input: InputTracker,
    fps: FpsCounter,
    gfx: Option<Graphics>,
    started: Instant,
    last_frame: Option<Instant>,
    next_frame: Instant,
    frame_interval: Duration,
    /// Startup failure inside the event loop, reported once it returns
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(settings: Settings, assets: Assets, audio: AudioManager) -> Self {
        let mut state = GameState::new(settings.rules());
        if settings.skip_title {
            state.start_round();
        }
        let now = Instant::now();

        Self {
            settings,
            assets,
            audio,
            state,
            canvas: Canvas::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            input: InputTracker::default(),
            fps: FpsCounter::default(),
            gfx: None,
            started: now,
            last_frame: None,
            next_frame: now,
            frame_interval: Duration::from_secs_f64(1.0 / TARGET_FPS as f64),
            error: None,
        }
    }

    fn init_graphics(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Graphics> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("failed to create surface")?;
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable GPU adapter")?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let presenter = pollster::block_on(Presenter::new(
            surface,
            &adapter,
            size.width.max(1),
            size.height.max(1),
            (SCREEN_WIDTH, SCREEN_HEIGHT),
        ))
        .context("failed to create GPU device")?;

        Ok(Graphics { window, presenter })
    }

    /// Simulate, compose and present one frame
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32())
            .min(MAX_FRAME_DT);
        self.last_frame = Some(now);
        self.fps.record(now.duration_since(self.started).as_secs_f64());

        let input = self.input.sample();
        let events = tick(&mut self.state, &input, dt);
        self.handle_events(&events);

        let hud = Hud {
            fps: self.settings.show_fps.then(|| self.fps.fps()),
        };
        let scene = build_scene(&self.state, &hud);
        self.canvas
            .paint(&scene, &self.assets.sprites, &self.assets.typeface);

        let Some(gfx) = &mut self.gfx else { return };
        match gfx.presenter.render(&self.canvas) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gfx.presenter.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Scored {
                    index,
                    state,
                    delta,
                } => {
                    log::debug!(
                        "Marshmallow {index} taken {} ({delta:+}), score {}",
                        state.as_str(),
                        self.state.score
                    );
                    if let Some(cue) = state.sound_cue() {
                        self.audio.play(cue, &self.assets.sounds);
                    }
                }
                GameEvent::PhaseChanged(phase) => {
                    log::info!("Phase changed to {:?} (score {})", phase, self.state.score);
                }
            }
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match &event.logical_key {
            Key::Named(NamedKey::Enter) => self.input.confirm(),
            Key::Named(NamedKey::Escape) => {
                log::info!("Escape pressed, exiting");
                event_loop.exit();
            }
            Key::Character(c) if c.eq_ignore_ascii_case("m") => self.audio.toggle_muted(),
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gfx.is_some() {
            return;
        }
        match self.init_graphics(event_loop) {
            Ok(gfx) => {
                gfx.window.request_redraw();
                self.gfx = Some(gfx);
                self.next_frame = Instant::now();
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gfx) = &mut self.gfx {
                    gfx.presenter.resize(size.width, size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let scale = self.gfx.as_ref().map_or(1.0, |g| g.window.scale_factor());
                let logical = position.to_logical::<f32>(scale);
                self.input.pointer_moved(Vec2::new(logical.x, logical.y));
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.input.button(state == ElementState::Pressed),
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gfx) = &self.gfx else { return };

        let now = Instant::now();
        if now >= self.next_frame {
            gfx.window.request_redraw();
            self.next_frame += self.frame_interval;
            if self.next_frame < now {
                self.next_frame = now + self.frame_interval;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

/// Open the window and run until it is closed
pub fn run(settings: Settings, assets: Assets, audio: AudioManager) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(settings, assets, audio);
    event_loop
        .run_app(&mut app)
        .context("event loop failed")?;

    match app.error.take() {
        Some(e) => Err(e),
        None => {
            log::info!("Final score: {}", app.state.score);
            Ok(())
        }
    }
}
