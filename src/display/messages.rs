// src/display/messages.rs
//! Message types exchanged with displays and windows.
//!
//! Control queries flow from the pipeline into a display; window events flow
//! from a native window back towards the pipeline. Both are plain values so
//! they can cross threads by ownership transfer.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Raw code of `ControlQuery::DisplaySize`.
pub const CHANGE_DISPLAY_SIZE: i32 = 1;
/// Raw code of `ControlQuery::SourceAspect`.
pub const CHANGE_SOURCE_ASPECT: i32 = 2;
/// Raw code of `ControlQuery::SourceCrop`.
pub const CHANGE_SOURCE_CROP: i32 = 3;
/// Raw code of `ControlQuery::SourcePlace`.
pub const CHANGE_SOURCE_PLACE: i32 = 4;

/// Size of a display surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

/// Display configuration change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlQuery {
    /// The surface the display renders into was resized.
    DisplaySize(DisplaySize),
    /// The source sample aspect ratio changed.
    SourceAspect,
    /// The source crop window changed.
    SourceCrop,
    /// The source placement inside the display changed.
    SourcePlace,
    /// A query code this contract does not define.
    Unknown(i32),
}

impl ControlQuery {
    /// Decodes a raw query code. `size` is the new display size carried by
    /// `CHANGE_DISPLAY_SIZE` and ignored otherwise.
    pub fn from_code(code: i32, size: DisplaySize) -> Self {
        match code {
            CHANGE_DISPLAY_SIZE => ControlQuery::DisplaySize(size),
            CHANGE_SOURCE_ASPECT => ControlQuery::SourceAspect,
            CHANGE_SOURCE_CROP => ControlQuery::SourceCrop,
            CHANGE_SOURCE_PLACE => ControlQuery::SourcePlace,
            other => ControlQuery::Unknown(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            ControlQuery::DisplaySize(_) => CHANGE_DISPLAY_SIZE,
            ControlQuery::SourceAspect => CHANGE_SOURCE_ASPECT,
            ControlQuery::SourceCrop => CHANGE_SOURCE_CROP,
            ControlQuery::SourcePlace => CHANGE_SOURCE_PLACE,
            ControlQuery::Unknown(code) => *code,
        }
    }
}

/// Errors returned by `DisplayDriver::control`.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    /// The query is not applicable to this display. Callers treat this as
    /// "configuration not applied", not as a fatal error.
    #[error("unsupported control query {0}")]
    Unsupported(i32),

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

bitflags! {
    /// Mouse buttons held down while a mouse event was generated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ButtonMask: u8 {
        const LEFT = 1 << 0;
        const MIDDLE = 1 << 1;
        const RIGHT = 1 << 2;
        const WHEEL_UP = 1 << 3;
        const WHEEL_DOWN = 1 << 4;
    }
}

/// Represents mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
}

impl MouseButton {
    pub fn mask(self) -> ButtonMask {
        match self {
            MouseButton::Left => ButtonMask::LEFT,
            MouseButton::Middle => ButtonMask::MIDDLE,
            MouseButton::Right => ButtonMask::RIGHT,
            MouseButton::WheelUp => ButtonMask::WHEEL_UP,
            MouseButton::WheelDown => ButtonMask::WHEEL_DOWN,
        }
    }
}

/// Pointer input reported by a window, in that window's pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    Moved { x: i32, y: i32 },
    Pressed(MouseButton),
    Released(MouseButton),
    DoubleClick(MouseButton),
}

/// Input reported by a window towards its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    /// The window was resized by the platform.
    Resized(DisplaySize),
    Mouse(MouseEvent),
    /// A key was pressed; the value is the platform-independent key code.
    Key(u32),
    /// The user asked for the window to close.
    CloseRequested,
}
