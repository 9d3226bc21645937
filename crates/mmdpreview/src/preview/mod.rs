//! Preview pipeline: pack registration, render attempts with last-good fallback, and the
//! controller owning one session per open document.

pub mod controller;
pub mod protocol;
pub mod renderer;
pub mod sanitize;
pub mod session;
pub mod surface;

pub use controller::{FinishedLoading, LoadedPacks, OpenOutcome, PackLoadJob, PreviewController};
pub use protocol::HostMessage;
pub use renderer::{DiagramRenderer, IconRegistry, RenderFuture};
pub use sanitize::{sanitize_error_message, status_summary};
pub use session::{
    CompletionOutcome, PreviewSession, RenderAttempt, RenderCompletion, RenderState, RenderStatus,
    SessionPhase,
};
pub use surface::{
    MemorySurface, PreviewSurface, StatusKind, StatusLine, StrayPattern, SurfaceElement, Viewport,
};
