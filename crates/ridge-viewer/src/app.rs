//! Viewer application implementing winit ApplicationHandler
//!
//! Runs the frame loop: input, camera, terrain regeneration, upload, draw.

use crate::controls::apply_input;
use anyhow::{Context, Result};
use log::{error, info, warn};
use ridge_core::{Color, PointerMode, Vec3, ViewerConfig};
use ridge_render::{FlyCamera, FrameSettings, Projection, RenderContext, TerrainRenderer};
use ridge_runtime::{FrameClock, InputState};
use ridge_terrain::TerrainStream;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

pub struct ViewerApp {
    config: ViewerConfig,

    // Systems
    pub clock: FrameClock,
    pub input: InputState,
    stream: TerrainStream,

    // Rendering
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    renderer: Option<TerrainRenderer>,
    camera: FlyCamera,
    projection: Projection,

    shading: bool,
    cursor_captured: bool,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig) -> ridge_core::Result<Self> {
        let stream = TerrainStream::from_config(&config)?;
        let camera = FlyCamera::from_config(&config.camera);
        let aspect = config.window.width as f32 / config.window.height.max(1) as f32;
        let projection = Projection::from_config(&config.projection, aspect);

        Ok(Self {
            config,
            clock: FrameClock::new(),
            input: InputState::new(),
            stream,
            window: None,
            render_context: None,
            renderer: None,
            camera,
            projection,
            shading: true,
            cursor_captured: false,
        })
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_config = &self.config.window;
        let window_attrs = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );

        if window_config.fullscreen {
            window.set_fullscreen(Some(winit::window::Fullscreen::Borderless(None)));
        }

        self.window = Some(window.clone());

        let render_context = pollster::block_on(RenderContext::new(window))
            .context("Failed to initialize GPU")?;
        self.projection.aspect = render_context.aspect_ratio();

        let (width, depth) = self.stream.size();
        let renderer = TerrainRenderer::new(&render_context, width, depth);

        self.render_context = Some(render_context);
        self.renderer = Some(renderer);

        self.capture_cursor();
        Ok(())
    }

    fn capture_cursor(&mut self) {
        if let Some(window) = &self.window {
            // Try confined first, then locked
            if let Err(e) = window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
            {
                warn!("Cursor grab unavailable: {}", e);
            }
            window.set_cursor_visible(false);
            self.cursor_captured = true;
            self.input.reset_pointer();
        }
    }

    fn release_cursor(&mut self) {
        if let Some(window) = &self.window {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
            self.cursor_captured = false;
            self.input.reset_pointer();
        }
    }

    fn tick(&mut self) {
        if let Some(fps) = self.clock.tick() {
            if let Some(window) = &self.window {
                window.set_title(&format!("{} - {:.0} FPS", self.config.window.title, fps));
            }
        }

        let dt = self.clock.delta_time as f32;
        apply_input(&mut self.camera, &self.input, &self.config.camera, dt);

        if self.input.is_action_just_pressed("toggle_shading") {
            self.shading = !self.shading;
            info!("Shading {}", if self.shading { "on" } else { "off" });
        }
    }

    fn render(&mut self) {
        let Some(context) = &mut self.render_context else {
            return;
        };
        let Some(renderer) = &mut self.renderer else {
            return;
        };

        // On failure the buffers still hold last frame's grid; the next frame retries
        match self.stream.update(self.camera.position()) {
            Ok(grid) => renderer.upload_grid(context, grid),
            Err(e) => error!("Terrain update failed: {}", e),
        }

        let output = match context.acquire_frame() {
            Ok(Some(output)) => output,
            Ok(None) => return,
            Err(e) => {
                error!("{}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let settings = FrameSettings {
            sky_color: Color::from_array(self.config.window.sky_color),
            light_offset: Vec3::from_array(self.config.light.offset),
            shading: self.shading,
        };

        if let Err(e) = renderer.render(context, &self.camera, &self.projection, &settings, &view) {
            error!("Render error: {}", e);
        }

        output.present();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.initialize(event_loop) {
                error!("{:#}", e);
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
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                    self.projection.aspect = context.aspect_ratio();
                }
            }

            WindowEvent::Focused(false) => {
                self.input.clear_keys();
                self.input.reset_pointer();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            // Escape releases the cursor first, exits second
                            if key_code == KeyCode::Escape {
                                if self.cursor_captured {
                                    self.release_cursor();
                                } else {
                                    event_loop.exit();
                                }
                                return;
                            }
                            self.input.process_key_down(key_code);
                        }
                        ElementState::Released => {
                            self.input.process_key_up(key_code);
                        }
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if !self.cursor_captured
                    && state == ElementState::Pressed
                    && button == MouseButton::Left
                {
                    self.capture_cursor();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if self.cursor_captured && self.config.camera.pointer_mode == PointerMode::Cursor {
                    self.input.process_mouse_move(position.x, position.y);
                }
            }

            WindowEvent::RedrawRequested => {
                self.tick();
                self.render();
                self.input.end_frame();
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if !self.cursor_captured || self.config.camera.pointer_mode != PointerMode::Raw {
            return;
        }

        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.process_mouse_raw_delta(delta.0, delta.1);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
