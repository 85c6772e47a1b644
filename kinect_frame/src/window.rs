//! The output window: a `minifb` framebuffer plus input polling.

use minifb::{KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub use minifb::Key;

use crate::canvas::Canvas;
use crate::error::FrameError;

// ════════════════════════════════════════════════════════════════════════════
// InputEvent
// ════════════════════════════════════════════════════════════════════════════

/// Input gathered from the window once per tick.  Coordinates are surface
/// pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Window closed, or Escape / Q pressed.
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    MouseDown   { x: f32, y: f32 },
    MouseUp     { x: f32, y: f32 },
    /// Pointer moved with no button held.
    MouseMotion { x: f32, y: f32 },
    /// Pointer moved with the left button held.
    MouseDrag   { x: f32, y: f32 },
}

// ════════════════════════════════════════════════════════════════════════════
// Surface
// ════════════════════════════════════════════════════════════════════════════

pub struct Surface {
    window:     Window,
    canvas:     Canvas,
    last_mouse: Option<(f32, f32)>,
    mouse_down: bool,
}

impl Surface {
    pub fn open(title: &str, width: usize, height: usize) -> Result<Self, FrameError> {
        let window = Window::new(
            title,
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        Ok(Surface {
            window,
            canvas: Canvas::new(width, height),
            last_mouse: None,
            mouse_down: false,
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    pub fn canvas(&mut self) -> &mut Canvas { &mut self.canvas }

    /// Translate window state since the last poll into [`InputEvent`]s.
    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if !self.window.is_open() {
            events.push(InputEvent::Quit);
            return events;
        }

        for key in self.window.get_keys_pressed(KeyRepeat::No) {
            if matches!(key, Key::Escape | Key::Q) {
                events.push(InputEvent::Quit);
            }
            events.push(InputEvent::KeyDown(key));
        }
        for key in self.window.get_keys_released() {
            events.push(InputEvent::KeyUp(key));
        }

        let down = self.window.get_mouse_down(MouseButton::Left);
        if let Some((x, y)) = self.window.get_mouse_pos(MouseMode::Discard) {
            if down && !self.mouse_down {
                events.push(InputEvent::MouseDown { x, y });
            } else if !down && self.mouse_down {
                events.push(InputEvent::MouseUp { x, y });
            }
            if self.last_mouse != Some((x, y)) {
                events.push(if down {
                    InputEvent::MouseDrag { x, y }
                } else {
                    InputEvent::MouseMotion { x, y }
                });
                self.last_mouse = Some((x, y));
            }
        }
        self.mouse_down = down;

        events
    }

    /// Page flip: push the canvas to the window.
    pub fn present(&mut self) -> Result<(), FrameError> {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.window.update_with_buffer(self.canvas.pixels(), w, h)?;
        Ok(())
    }
}
