//! Render state machine for one open diagram document.
//!
//! Session phases: `Uninitialized -> Loading -> Ready`. While ready, every content update runs
//! `Idle -> Rendering -> Ok | Error`. Each render attempt carries the generation it was started
//! under; a completion whose generation is no longer current is discarded, so a slow render can
//! never overwrite fresher output.

use super::protocol::HostMessage;
use super::renderer::{DiagramRenderer, RenderFuture};
use super::sanitize::{sanitize_error_message, status_summary};
use super::surface::{PreviewSurface, StatusKind, StatusLine, StrayPattern};
use mmdpreview_core::settings::DEFAULT_THEME;
use mmdpreview_core::{DiagramSyntaxError, LoadedPack};

/// Prefix of the element ids handed to the renderer (`mmk8s1`, `mmk8s2`, ...).
pub const RENDER_ID_PREFIX: &str = "mmk8s";

/// Artifacts purged before every attempt.
pub const PRE_RENDER_STRAYS: &[StrayPattern] = &[
    StrayPattern::IdPrefix("dmermaid-"),
    StrayPattern::Class("mermaid-error"),
];

/// Artifacts purged after a failed attempt.
pub const FAILED_RENDER_STRAYS: &[StrayPattern] = &[
    StrayPattern::TagIdPrefix {
        tag: "svg",
        prefix: "dmermaid",
    },
    StrayPattern::OutsideDiagramIdPrefix(RENDER_ID_PREFIX),
];

const STATUS_INITIALIZING: &str = "Initializing…";
const STATUS_RENDERING: &str = "Rendering…";
const STATUS_OK: &str = "✓ OK";
const STATUS_EMPTY: &str = "Empty file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Idle,
    Loading,
    Rendering,
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    pub status: RenderStatus,
    /// Most recent successfully rendered markup.
    pub last_good: Option<String>,
    /// Incremented on every render attempt, including empty content.
    pub generation: u64,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            status: RenderStatus::Idle,
            last_good: None,
            generation: 0,
        }
    }
}

/// An in-flight render started by [`PreviewSession::begin_render`].
pub struct RenderAttempt {
    /// Epoch of the session that started the attempt.
    pub epoch: u64,
    pub generation: u64,
    pub render_id: String,
    output: RenderFuture,
}

impl std::fmt::Debug for RenderAttempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderAttempt")
            .field("epoch", &self.epoch)
            .field("generation", &self.generation)
            .field("render_id", &self.render_id)
            .finish_non_exhaustive()
    }
}

impl RenderAttempt {
    /// Waits for the renderer. The result must be handed back to
    /// [`PreviewSession::complete`] to take effect.
    pub async fn finish(self) -> RenderCompletion {
        RenderCompletion {
            epoch: self.epoch,
            generation: self.generation,
            render_id: self.render_id,
            result: self.output.await,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCompletion {
    pub epoch: u64,
    pub generation: u64,
    pub render_id: String,
    pub result: Result<String, DiagramSyntaxError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    Rendered,
    Failed,
    /// A newer attempt started after this one, or the attempt belongs to another session; the
    /// result was dropped.
    Stale,
}

pub struct PreviewSession<R, S> {
    epoch: u64,
    renderer: R,
    surface: S,
    phase: SessionPhase,
    state: RenderState,
}

impl<R, S> PreviewSession<R, S>
where
    R: DiagramRenderer,
    S: PreviewSurface,
{
    pub fn new(renderer: R, mut surface: S) -> Self {
        surface.set_status(StatusLine::new(StatusKind::Loading, STATUS_INITIALIZING));
        Self {
            epoch: 0,
            renderer,
            surface,
            phase: SessionPhase::Uninitialized,
            state: RenderState::default(),
        }
    }

    /// Tags the session with an identity distinct from every other session of its owner, so
    /// results started by a closed session are never applied to a reopened one.
    pub fn with_epoch(mut self, epoch: u64) -> Self {
        self.epoch = epoch;
        self
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Enters `Loading`. Returns false when the session already left `Uninitialized`.
    pub fn start_loading(&mut self) -> bool {
        if self.phase != SessionPhase::Uninitialized {
            return false;
        }
        self.phase = SessionPhase::Loading;
        self.state.status = RenderStatus::Loading;
        true
    }

    /// Registers the loaded packs once and renders the initial content.
    ///
    /// A second `init` is ignored.
    pub fn init(
        &mut self,
        content: &str,
        icon_packs: &[LoadedPack],
        theme: &str,
    ) -> Option<RenderAttempt> {
        if self.phase == SessionPhase::Ready {
            tracing::warn!("ignoring repeated init for a ready preview session");
            return None;
        }
        if !icon_packs.is_empty() {
            self.renderer.register_icon_packs(icon_packs);
        }
        let theme = if theme.trim().is_empty() {
            DEFAULT_THEME
        } else {
            theme
        };
        self.renderer.initialize(theme);
        self.phase = SessionPhase::Ready;
        self.state.status = RenderStatus::Idle;
        self.surface.set_ready();
        self.begin_render(content)
    }

    /// Applies a host message. Updates received before the session is ready are dropped; the
    /// `init` message carries the latest content.
    pub fn handle_message(&mut self, message: HostMessage) -> Option<RenderAttempt> {
        match message {
            HostMessage::Init {
                content,
                icon_packs,
                theme,
            } => self.init(&content, &icon_packs, &theme),
            HostMessage::Update { content } => {
                if self.phase != SessionPhase::Ready {
                    tracing::debug!(phase = ?self.phase, "dropping update before init");
                    return None;
                }
                self.begin_render(&content)
            }
        }
    }

    /// Starts a render attempt for `content`.
    ///
    /// Returns `None` when nothing needs rendering: the session is not ready, or the content is
    /// blank (reported as `Ok` with an empty indicator).
    pub fn begin_render(&mut self, content: &str) -> Option<RenderAttempt> {
        if self.phase != SessionPhase::Ready {
            return None;
        }

        self.state.generation += 1;
        let generation = self.state.generation;
        self.surface.purge(PRE_RENDER_STRAYS);

        if content.trim().is_empty() {
            self.state.status = RenderStatus::Ok;
            self.surface
                .set_status(StatusLine::new(StatusKind::Ok, STATUS_EMPTY));
            return None;
        }

        self.state.status = RenderStatus::Rendering;
        self.surface
            .set_status(StatusLine::new(StatusKind::Loading, STATUS_RENDERING));

        let render_id = format!("{RENDER_ID_PREFIX}{generation}");
        let output = self.renderer.render(&render_id, content);
        Some(RenderAttempt {
            epoch: self.epoch,
            generation,
            render_id,
            output,
        })
    }

    /// Applies a finished attempt if it was started by this session and is still the current
    /// generation.
    pub fn complete(&mut self, completion: RenderCompletion) -> CompletionOutcome {
        if completion.epoch != self.epoch {
            tracing::debug!(
                attempt_epoch = completion.epoch,
                epoch = self.epoch,
                "discarding render from another session"
            );
            return CompletionOutcome::Stale;
        }
        if completion.generation != self.state.generation {
            tracing::debug!(
                attempt = completion.generation,
                current = self.state.generation,
                "discarding stale render"
            );
            return CompletionOutcome::Stale;
        }

        match completion.result {
            Ok(svg) => {
                self.surface.show_diagram(&svg);
                self.surface.hide_error();
                self.surface
                    .set_status(StatusLine::new(StatusKind::Ok, STATUS_OK));
                self.state.last_good = Some(svg);
                self.state.status = RenderStatus::Ok;
                CompletionOutcome::Rendered
            }
            Err(err) => {
                if let Some(last_good) = &self.state.last_good {
                    self.surface.show_diagram(last_good);
                }
                let clean = sanitize_error_message(&err.message);
                self.surface.show_error(&clean);
                self.surface.set_status(StatusLine::new(
                    StatusKind::Error,
                    format!("✗ {}", status_summary(&clean)),
                ));
                self.surface.purge(FAILED_RENDER_STRAYS);
                self.state.status = RenderStatus::Error;
                CompletionOutcome::Failed
            }
        }
    }

    /// Runs one update end to end: start, await the renderer, apply.
    pub async fn update(&mut self, content: &str) -> Option<CompletionOutcome> {
        let attempt = self.begin_render(content)?;
        let completion = attempt.finish().await;
        Some(self.complete(completion))
    }
}
