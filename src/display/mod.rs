// src/display/mod.rs
//! Uniform display contract and leaf display backends.
//!
//! - DisplayDriver: open/prepare/display/control/close contract
//! - Messages: control queries and window events
//! - Placement: default display size computation

pub mod driver;
pub mod drivers;
pub mod messages;
pub mod placement;

pub use driver::DisplayDriver;
pub use drivers::HeadlessDisplayDriver;
pub use messages::{
    ButtonMask, ControlQuery, DisplayError, DisplaySize, MouseButton, MouseEvent, WindowEvent,
};
pub use placement::{default_display_size, DisplayPlacement};
