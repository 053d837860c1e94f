use log::{error, info, warn};
use pixels::{Pixels, SurfaceTexture};
use retroframe_core::{Frontend, MouseButton};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::PhysicalKey;
use winit::window::{Fullscreen, Window, WindowId};

use crate::host::WindowState;
use crate::keybinds::{self, Hotkey, Hotkeys};

const TITLE: &str = "retroframe";

/// The windowed main loop: one core frame per display period.
pub struct App {
    frontend: Frontend,
    state: Rc<RefCell<WindowState>>,
    hotkeys: Hotkeys,
    state_directory: PathBuf,
    scale: u32,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    buffer_size: (u32, u32),
    next_frame: Instant,
}

impl App {
    pub fn new(
        frontend: Frontend,
        state: Rc<RefCell<WindowState>>,
        hotkeys: Hotkeys,
        state_directory: PathBuf,
        scale: u32,
    ) -> Self {
        Self {
            frontend,
            state,
            hotkeys,
            state_directory,
            scale: scale.max(1),
            window: None,
            pixels: None,
            buffer_size: (0, 0),
            next_frame: Instant::now(),
        }
    }

    pub fn into_frontend(self) -> Frontend {
        self.frontend
    }

    fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frontend.av_info().target_fps()))
    }

    fn step(&mut self, event_loop: &ActiveEventLoop) {
        self.state.borrow_mut().poll_gamepads();
        self.frontend.run_frame();
        self.state.borrow_mut().end_frame();

        if let Some(message) = self.frontend.take_message()
            && let Some(window) = &self.window
        {
            window.set_title(&format!("{TITLE} - {}", message.text));
        }
        if self.frontend.should_close() {
            info!("Core requested shutdown");
            event_loop.exit();
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn hotkey(&mut self, hotkey: Hotkey, event_loop: &ActiveEventLoop) {
        match hotkey {
            Hotkey::SaveState => {
                if let Err(e) = self.frontend.save_state_to_file(&self.state_directory) {
                    warn!("Save state failed: {e}");
                }
            }
            Hotkey::LoadState => {
                if let Err(e) = self.frontend.load_state_from_file(&self.state_directory) {
                    warn!("Load state failed: {e}");
                }
            }
            Hotkey::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    let fullscreen = match window.fullscreen() {
                        Some(_) => None,
                        None => Some(Fullscreen::Borderless(None)),
                    };
                    window.set_fullscreen(fullscreen);
                }
            }
            Hotkey::Quit => event_loop.exit(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(pixels) = self.pixels.as_mut() else {
            return;
        };

        let state = self.state.borrow();
        if let Some(texture) = state.presented.and_then(|id| state.texture(id)) {
            let size = (texture.width, texture.height);
            if size != self.buffer_size {
                if let Err(e) = pixels.resize_buffer(size.0, size.1) {
                    error!("Failed to resize framebuffer: {e}");
                    return;
                }
                self.buffer_size = size;
            }
            let frame = pixels.frame_mut();
            if frame.len() == texture.rgba.len() {
                frame.copy_from_slice(&texture.rgba);
            }
        }

        if let Err(e) = pixels.render() {
            error!("Render failed: {e}");
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let geometry = self.frontend.av_info().geometry;
        let (width, height) = (geometry.base_width.max(1), geometry.base_height.max(1));
        let attributes = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(LogicalSize::new(
                f64::from(width * self.scale),
                f64::from(height * self.scale),
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        let pixels = match Pixels::new(width, height, surface) {
            Ok(pixels) => pixels,
            Err(e) => {
                error!("Failed to create framebuffer: {e}");
                event_loop.exit();
                return;
            }
        };

        {
            let mut state = self.state.borrow_mut();
            state.screen = (size.width, size.height);
            if let Some(mhz) = window
                .current_monitor()
                .and_then(|monitor| monitor.refresh_rate_millihertz())
            {
                state.refresh_rate = mhz as f32 / 1000.0;
            }
        }

        self.buffer_size = (width, height);
        self.pixels = Some(pixels);
        self.window = Some(window);
        self.next_frame = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                self.state.borrow_mut().screen = (size.width, size.height);
                if let Some(pixels) = self.pixels.as_mut()
                    && let Err(e) = pixels.resize_surface(size.width, size.height)
                {
                    error!("Failed to resize surface: {e}");
                    event_loop.exit();
                }
            }
            WindowEvent::Focused(false) => self.state.borrow_mut().release_all(),
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let Some(key) = keybinds::key_from_code(code) else {
                    return;
                };
                let down = event.state == ElementState::Pressed;
                self.state.borrow_mut().key_event(key, down);
                if down
                    && !event.repeat
                    && let Some(hotkey) = self.hotkeys.action(key)
                {
                    self.hotkey(hotkey, event_loop);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state
                    .borrow_mut()
                    .mouse_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    winit::event::MouseButton::Left => MouseButton::Left,
                    winit::event::MouseButton::Right => MouseButton::Right,
                    winit::event::MouseButton::Middle => MouseButton::Middle,
                    _ => return,
                };
                self.state
                    .borrow_mut()
                    .mouse_button(button, state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / 40.0,
                };
                self.state.borrow_mut().wheel_moved(lines);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            return;
        }

        let now = Instant::now();
        if now >= self.next_frame {
            self.step(event_loop);
            let period = self.frame_period();
            self.next_frame += period;
            if self.next_frame < now {
                self.next_frame = now + period;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}
