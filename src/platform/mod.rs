//! Platform abstraction layer
//!
//! Translates host events (browser key names, pointer buttons) into field
//! input flags.

pub mod input;

pub use input::{HostEvent, InputAdapter, key_direction};
