// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input fed to a canvas by its host, and events the canvas raises back.

use floatcanvas_view::PixelPoint;
use kurbo::Point;

/// A mouse button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
}

bitflags::bitflags! {
    /// Buttons held down while a pointer event happened.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        /// Primary button.
        const LEFT   = 0b0000_0001;
        /// Wheel button.
        const MIDDLE = 0b0000_0010;
        /// Secondary button.
        const RIGHT  = 0b0000_0100;
    }
}

impl MouseButtons {
    /// The flag for a single button.
    pub fn from_button(button: PointerButton) -> Self {
        match button {
            PointerButton::Left => Self::LEFT,
            PointerButton::Middle => Self::MIDDLE,
            PointerButton::Right => Self::RIGHT,
        }
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers held during an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT   = 0b0000_0001;
        /// Control.
        const CONTROL = 0b0000_0010;
        /// Alt or Option.
        const ALT     = 0b0000_0100;
        /// Meta, Command or Windows.
        const META    = 0b0000_1000;
    }
}

/// What the pointer did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerKind {
    /// A button was pressed.
    Down(PointerButton),
    /// A button was released.
    Up(PointerButton),
    /// A button was double-clicked.
    DoubleClick(PointerButton),
    /// The pointer moved.
    Move,
    /// The wheel turned; positive is away from the user.
    Wheel(f64),
}

/// A pointer event in panel pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,
    /// Pointer position.
    pub pos: PixelPoint,
    /// Buttons held after the event.
    pub buttons: MouseButtons,
    /// Modifier keys held.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// An event with no buttons or modifiers held.
    pub fn new(kind: PointerKind, pos: PixelPoint) -> Self {
        Self {
            kind,
            pos,
            buttons: MouseButtons::empty(),
            modifiers: Modifiers::empty(),
        }
    }

    /// A button press. The pressed button is reported as held.
    pub fn down(button: PointerButton, pos: PixelPoint) -> Self {
        Self {
            buttons: MouseButtons::from_button(button),
            ..Self::new(PointerKind::Down(button), pos)
        }
    }

    /// A button release.
    pub fn up(button: PointerButton, pos: PixelPoint) -> Self {
        Self::new(PointerKind::Up(button), pos)
    }

    /// A double click.
    pub fn double_click(button: PointerButton, pos: PixelPoint) -> Self {
        Self {
            buttons: MouseButtons::from_button(button),
            ..Self::new(PointerKind::DoubleClick(button), pos)
        }
    }

    /// Motion with `buttons` held.
    pub fn moved(pos: PixelPoint, buttons: MouseButtons) -> Self {
        Self {
            buttons,
            ..Self::new(PointerKind::Move, pos)
        }
    }

    /// A wheel turn of `delta` notches.
    pub fn wheel(delta: f64, pos: PixelPoint) -> Self {
        Self::new(PointerKind::Wheel(delta), pos)
    }

    /// Returns a copy with `modifiers` held.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// `true` if the left button is held.
    pub fn left_is_down(&self) -> bool {
        self.buttons.contains(MouseButtons::LEFT)
    }
}

/// A key press or release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Logical key name, as reported by the host.
    pub key: String,
    /// Modifier keys held.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key with no modifiers.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::empty(),
        }
    }
}

/// Whether a key went down or up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// Pressed.
    Down,
    /// Released.
    Up,
}

/// An event raised by the canvas for the host to handle.
///
/// Pointer input that no hit-test callback consumed is re-raised with its
/// world coordinate attached. Drain them with
/// [`Canvas::take_events`](crate::Canvas::take_events).
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasEvent {
    /// Pointer input, with the world point under the pointer.
    Pointer {
        /// What happened.
        kind: PointerKind,
        /// Panel pixel position.
        pixel: PixelPoint,
        /// World position.
        world: Point,
    },
    /// A key was pressed.
    KeyDown(KeyEvent),
    /// A key was released.
    KeyUp(KeyEvent),
}

/// Pointer shape requested by the active mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// The platform arrow.
    #[default]
    Default,
    /// Open hand, ready to pan.
    Hand,
    /// Closed hand, while panning.
    GrabHand,
    /// Magnifier with a plus.
    MagPlus,
    /// Magnifier with a minus.
    MagMinus,
    /// Crosshair.
    Cross,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_reports_its_button_held() {
        let ev = PointerEvent::down(PointerButton::Left, PixelPoint::new(1, 2));
        assert!(ev.left_is_down());
        let ev = PointerEvent::up(PointerButton::Left, PixelPoint::new(1, 2));
        assert!(!ev.left_is_down());
        let ev = PointerEvent::moved(PixelPoint::ORIGIN, MouseButtons::RIGHT)
            .with_modifiers(Modifiers::SHIFT | Modifiers::CONTROL);
        assert!(!ev.left_is_down());
        assert!(ev.modifiers.contains(Modifiers::SHIFT));
    }
}
