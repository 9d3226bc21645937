#![forbid(unsafe_code)]

//! Icon pack model, SVG icon compiler and icon pack loader (headless).
//!
//! - [`compiler`]: offline batch tool turning vendor SVG files into an [`IconPackDocument`]
//! - [`loader`]: best-effort, concurrent loading of packs from disk or HTTP(S)
//! - [`settings`]: preview configuration and the built-in default packs
//!
//! Async APIs are runtime-agnostic (no specific executor required).

pub mod compiler;
pub mod error;
pub mod loader;
pub mod model;
pub mod settings;

pub use compiler::{CompileReport, IconTable, compile_pack, parse_svg};
pub use error::{CompileError, DiagramSyntaxError, Error, PackLoadError, Result};
pub use loader::{LoadReport, PackLoader, PackTransport};
pub use model::{
    IconPackDocument, IconRecord, LoadedPack, PackDescriptor, PackSource, WORKSPACE_PLACEHOLDER,
};
pub use settings::{PreviewSettings, default_packs, is_diagram_path};

#[cfg(test)]
mod tests;
