#![forbid(unsafe_code)]

//! `mmdpreview` previews Mermaid diagram text with pluggable icon packs.
//!
//! The icon pack model, compiler and loader come from `mmdpreview-core` and are re-exported
//! here. The [`preview`] module drives one render state machine per open document on top of an
//! external diagram renderer and display surface.

pub use mmdpreview_core::*;

pub mod preview;

#[cfg(test)]
mod tests;
