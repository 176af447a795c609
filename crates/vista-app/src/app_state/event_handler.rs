//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

use super::core::VistaApp;

/// Viewer controls bound to the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    ToggleGyro,
    Center,
    Recalibrate,
    Retry,
    Quit,
}

impl Command {
    fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::Named(NamedKey::Escape) => Some(Command::Quit),
            Key::Named(NamedKey::Enter) => Some(Command::Retry),
            Key::Character(c) => match c.to_ascii_lowercase().as_str() {
                "g" => Some(Command::ToggleGyro),
                "c" => Some(Command::Center),
                "r" => Some(Command::Recalibrate),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Whether the event loop should keep running after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

impl ApplicationHandler for VistaApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            event_loop.exit();
            return;
        }

        self.update_window_title();
        self.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.on_window_event(event) == Flow::Exit {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        // Continuous rendering: one frame per display refresh.
        self.request_redraw();
    }
}

impl VistaApp {
    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn on_window_event(&mut self, event: WindowEvent) -> Flow {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                return Flow::Exit;
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.viewer.resize(size.width, size.height);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                if self.mouse_dragging {
                    let (x, y) = self.cursor;
                    self.viewer.input().pointer_move(x, y);
                }
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.handle_mouse_button(state),

            WindowEvent::Touch(touch) => self.handle_touch(touch),

            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(&event.logical_key, event.state, event.repeat);
            }

            WindowEvent::RedrawRequested => {
                if self.should_exit {
                    return Flow::Exit;
                }
                self.viewer.frame();
                self.update_window_title();
            }

            _ => {}
        }
        if self.should_exit {
            Flow::Exit
        } else {
            Flow::Continue
        }
    }

    fn handle_mouse_button(&mut self, state: ElementState) {
        let (x, y) = self.cursor;
        match state {
            ElementState::Pressed => {
                self.mouse_dragging = true;
                self.viewer.input().pointer_down(x, y);
            }
            ElementState::Released => {
                self.mouse_dragging = false;
                self.viewer.input().pointer_up();
            }
        }
    }

    /// Only the first finger down drives the camera.
    fn handle_touch(&mut self, touch: Touch) {
        let (x, y) = (touch.location.x as f32, touch.location.y as f32);
        match touch.phase {
            TouchPhase::Started if self.active_touch.is_none() => {
                self.active_touch = Some(touch.id);
                self.viewer.input().pointer_down(x, y);
            }
            TouchPhase::Moved if self.active_touch == Some(touch.id) => {
                self.viewer.input().pointer_move(x, y);
            }
            TouchPhase::Ended | TouchPhase::Cancelled if self.active_touch == Some(touch.id) => {
                self.active_touch = None;
                self.viewer.input().pointer_up();
            }
            _ => {}
        }
    }

    /// Presses only; key repeat is ignored.
    fn handle_key(&mut self, key: &Key, state: ElementState, repeat: bool) {
        if state != ElementState::Pressed || repeat {
            return;
        }
        if let Some(command) = Command::from_key(key) {
            self.dispatch(command);
        }
    }

    fn dispatch(&mut self, command: Command) {
        tracing::debug!(?command, "Dispatching");
        match command {
            Command::ToggleGyro => {
                let input = self.viewer.input();
                let use_gyro = !input.use_gyro();
                input.set_use_gyro(use_gyro);
                self.mouse_dragging = false;
                self.active_touch = None;
            }
            Command::Center => self.viewer.input().center(),
            Command::Recalibrate => self.viewer.input().recalibrate(),
            Command::Retry => {
                if self.viewer.status().error.is_some() {
                    self.retry();
                }
            }
            Command::Quit => {
                self.shutdown();
                self.should_exit = true;
            }
        }
        self.update_window_title();
    }
}
