use anyhow::{Context, Result};
use blockworld_common::GameConfig;
use blockworld_input::{Action, Control, Screen, Session};
use blockworld_render::{Direction, Frame, Projection};
use blockworld_render_wgpu::{GpuContext, WgpuRenderer};
use blockworld_world::World;
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec2;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

mod ui;

#[derive(Parser)]
#[command(name = "blockworld-desktop", about = "First-person block world")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML file overriding the built-in settings
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Keyboard to action. Escape quits from any screen.
fn key_action(key: KeyCode, pressed: bool) -> Option<Action> {
    let direction = match key {
        KeyCode::Escape => return pressed.then_some(Action::Quit),
        KeyCode::KeyW => Direction::Forward,
        KeyCode::KeyS => Direction::Backward,
        KeyCode::KeyA => Direction::Left,
        KeyCode::KeyD => Direction::Right,
        KeyCode::Space => Direction::Up,
        KeyCode::ShiftLeft => Direction::Down,
        _ => return None,
    };
    Some(if pressed {
        Action::Press(direction)
    } else {
        Action::Release(direction)
    })
}

/// Keys the game must see even when egui has keyboard focus: Escape always
/// quits, and a release must never leave a direction held.
fn bypasses_ui(key: KeyCode, pressed: bool) -> bool {
    key == KeyCode::Escape || !pressed
}

/// Window and everything that renders into it.
struct Gfx {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gfx {
    fn new(
        event_loop: &ActiveEventLoop,
        config: &GameConfig,
        world: &World,
        egui_ctx: &EguiContext,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.window.title.clone())
            .with_inner_size(PhysicalSize::new(config.window.width, config.window.height));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let size = window.inner_size();
        let gpu = pollster::block_on(GpuContext::new(window.clone(), size.width, size.height))
            .context("initialise GPU")?;

        let (width, height) = gpu.size();
        let renderer = WgpuRenderer::new(&gpu.device, &gpu.queue, gpu.format(), width, height, world);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.format(), None, 1, false);

        Ok(Self {
            window,
            gpu,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn grab_cursor(&self) {
        let grabbed = self
            .window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            tracing::warn!("cursor grab unavailable: {e}");
        }
        self.window.set_cursor_visible(false);
    }

    /// Run the egui pass on top of the already rendered scene.
    fn paint_ui(
        &mut self,
        egui_ctx: &EguiContext,
        view: &wgpu::TextureView,
        run_ui: impl FnMut(&EguiContext),
    ) {
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, run_ui);
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = self.gpu.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let device = &self.gpu.device;
        let queue = &self.gpu.queue;
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        self.egui_renderer
            .update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

struct App {
    config: GameConfig,
    world: World,
    session: Session,
    projection: Projection,
    egui_ctx: EguiContext,
    gfx: Option<Gfx>,
    failure: Option<anyhow::Error>,
}

impl App {
    fn new(config: GameConfig) -> Self {
        let world = World::from_config(&config);
        let session = Session::from_config(&config);
        let projection =
            Projection::from_config(&config.projection, config.window.width, config.window.height);
        tracing::info!(
            tiles = world.tiles().len(),
            blocks = world.blocks().len(),
            "world ready"
        );
        Self {
            config,
            world,
            session,
            projection,
            egui_ctx: EguiContext::default(),
            gfx: None,
            failure: None,
        }
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, action: Action) {
        match self.session.handle(action) {
            Control::Continue => {}
            Control::ScreenChanged(Screen::InGame) => {
                if let Some(gfx) = &self.gfx {
                    gfx.grab_cursor();
                }
            }
            Control::ScreenChanged(_) => {}
            Control::Exit => {
                tracing::info!("exit requested");
                event_loop.exit();
            }
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let Some(gfx) = self.gfx.as_mut() else {
            return;
        };
        if gfx.gpu.resize(size.width, size.height) {
            gfx.renderer.resize(&gfx.gpu.device, size.width, size.height);
            self.projection.resize(size.width, size.height);
            self.session.resize(size.width, size.height);
        }
    }

    fn redraw(&mut self) {
        let Some(gfx) = self.gfx.as_mut() else {
            return;
        };

        if let Some(state) = self.session.update(Instant::now()) {
            tracing::trace!(dt = state.dt, moves = state.moves, "camera updated");
        }

        let frame = Frame::build(
            self.session.camera(),
            &self.projection,
            &self.world,
            self.config.clear_color,
        );

        let output = match gfx.gpu.acquire() {
            Ok(Some(output)) => output,
            Ok(None) => return,
            Err(e) => {
                tracing::error!("{e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gfx.renderer
            .render(&gfx.gpu.device, &gfx.gpu.queue, &view, &frame);

        let session = &mut self.session;
        let title = self.config.window.title.as_str();
        gfx.paint_ui(&self.egui_ctx, &view, |ctx| ui::draw(ctx, session, title));

        output.present();
        gfx.window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gfx.is_some() {
            return;
        }

        match Gfx::new(event_loop, &self.config, &self.world, &self.egui_ctx) {
            Ok(gfx) => {
                let (width, height) = gfx.gpu.size();
                self.projection.resize(width, height);
                self.session.resize(width, height);
                self.gfx = Some(gfx);
            }
            Err(e) => {
                tracing::error!("startup failed: {e:#}");
                self.failure = Some(e);
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
        let bypass = match &event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => bypasses_ui(*key, *state == ElementState::Pressed),
            WindowEvent::Focused(false) => true,
            _ => false,
        };

        if let Some(gfx) = &mut self.gfx {
            let response = gfx.egui_winit.on_window_event(&gfx.window, &event);
            if response.consumed && !bypass {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Focused(false) => self.dispatch(event_loop, Action::ReleaseAll),
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(action) = key_action(key, state == ElementState::Pressed) {
                    self.dispatch(event_loop, action);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let p = Vec2::new(position.x as f32, position.y as f32);
                self.dispatch(event_loop, Action::CursorMoved(p));
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => {
                let p = self.session.cursor();
                self.dispatch(event_loop, Action::Click(p));
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            let delta = Vec2::new(delta.0 as f32, delta.1 as f32);
            self.dispatch(event_loop, Action::MouseMotion(delta));
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gfx) = &self.gfx {
            gfx.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("blockworld-desktop starting");

    let config = GameConfig::load_or_default(cli.config.as_deref())
        .context("load configuration")?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
