use super::protocol::HostMessage;
use super::renderer::DiagramRenderer;
use super::session::{CompletionOutcome, PreviewSession, RenderAttempt, RenderCompletion};
use super::surface::PreviewSurface;
use mmdpreview_core::{
    LoadReport, PackDescriptor, PackLoadError, PackLoader, PreviewSettings, is_diagram_path,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum OpenOutcome {
    /// The path is not a Mermaid file; nothing was opened.
    NotDiagram,
    /// A session for the path already exists and should be brought to front.
    Revealed,
    /// A new session was created in `Loading`; run the job, then call
    /// [`PreviewController::finish_loading`].
    Loading(PackLoadJob),
}

/// Pack loading for one new session, detached from the controller so it can run anywhere.
#[derive(Debug, Clone)]
pub struct PackLoadJob {
    path: PathBuf,
    epoch: u64,
    loader: PackLoader,
    descriptors: Vec<PackDescriptor>,
}

impl PackLoadJob {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn descriptors(&self) -> &[PackDescriptor] {
        &self.descriptors
    }

    pub fn run_sync(self) -> LoadedPacks {
        let report = self.loader.load_sync(&self.descriptors);
        LoadedPacks {
            path: self.path,
            epoch: self.epoch,
            report,
        }
    }

    /// Async variant of [`PackLoadJob::run_sync`].
    ///
    /// The fetches run on scoped threads, but the returned future blocks the polling thread until
    /// all of them settle. Hosts on an async runtime should run it on a blocking-capable thread.
    pub async fn run(self) -> LoadedPacks {
        self.run_sync()
    }
}

#[derive(Debug, Clone)]
pub struct LoadedPacks {
    pub path: PathBuf,
    /// Epoch of the session the job was created for.
    pub epoch: u64,
    pub report: LoadReport,
}

#[derive(Debug)]
pub struct FinishedLoading {
    /// Packs that failed to load; to be shown to the user.
    pub warnings: Vec<PackLoadError>,
    /// The initial render, if the session is still open and has content.
    pub attempt: Option<RenderAttempt>,
}

/// Owns the open preview sessions, keyed by document path.
pub struct PreviewController<R, S, F> {
    settings: PreviewSettings,
    extension_dir: PathBuf,
    loader: PackLoader,
    factory: F,
    sessions: HashMap<PathBuf, PreviewSession<R, S>>,
    last_epoch: u64,
}

impl<R, S, F> PreviewController<R, S, F>
where
    R: DiagramRenderer,
    S: PreviewSurface,
    F: FnMut(&Path) -> (R, S),
{
    /// `factory` creates a fresh renderer and surface for every new session.
    pub fn new(
        settings: PreviewSettings,
        extension_dir: impl Into<PathBuf>,
        loader: PackLoader,
        factory: F,
    ) -> Self {
        Self {
            settings,
            extension_dir: extension_dir.into(),
            loader,
            factory,
            sessions: HashMap::new(),
            last_epoch: 0,
        }
    }

    pub fn settings(&self) -> &PreviewSettings {
        &self.settings
    }

    /// Descriptors loaded for every new session: user packs, then the built-in defaults.
    pub fn descriptors(&self) -> Vec<PackDescriptor> {
        self.settings.descriptors(&self.extension_dir)
    }

    pub fn open(&mut self, path: &Path) -> OpenOutcome {
        if !is_diagram_path(path) {
            return OpenOutcome::NotDiagram;
        }
        if self.sessions.contains_key(path) {
            return OpenOutcome::Revealed;
        }

        self.last_epoch += 1;
        let epoch = self.last_epoch;
        let (renderer, surface) = (self.factory)(path);
        let mut session = PreviewSession::new(renderer, surface).with_epoch(epoch);
        session.start_loading();
        self.sessions.insert(path.to_path_buf(), session);
        tracing::debug!(path = %path.display(), epoch, "opened preview session");

        OpenOutcome::Loading(PackLoadJob {
            path: path.to_path_buf(),
            epoch,
            loader: self.loader.clone(),
            descriptors: self.descriptors(),
        })
    }

    /// Sends `init` with the loaded packs and the current document text.
    ///
    /// A no-op (apart from returning the warnings) when the session was closed meanwhile, even
    /// if the same path has been reopened since.
    pub fn finish_loading(&mut self, loaded: LoadedPacks, content: &str) -> FinishedLoading {
        let LoadedPacks {
            path,
            epoch,
            report,
        } = loaded;
        let session = self
            .sessions
            .get_mut(&path)
            .filter(|session| session.epoch() == epoch);
        let attempt = match session {
            Some(session) => session.handle_message(HostMessage::Init {
                content: content.to_string(),
                icon_packs: report.packs,
                theme: self.settings.theme().to_string(),
            }),
            None => {
                tracing::debug!(path = %path.display(), "session closed before packs loaded");
                None
            }
        };
        FinishedLoading {
            warnings: report.warnings,
            attempt,
        }
    }

    /// Forwards a content change to the session for `path`, if one is open.
    pub fn update(&mut self, path: &Path, content: &str) -> Option<RenderAttempt> {
        if !is_diagram_path(path) {
            return None;
        }
        self.sessions
            .get_mut(path)?
            .handle_message(HostMessage::Update {
                content: content.to_string(),
            })
    }

    /// Applies a finished render. Returns `None` when the session no longer exists; a render
    /// started by an earlier session for the same path is reported as stale.
    pub fn complete(
        &mut self,
        path: &Path,
        completion: RenderCompletion,
    ) -> Option<CompletionOutcome> {
        Some(self.sessions.get_mut(path)?.complete(completion))
    }

    pub fn close(&mut self, path: &Path) -> bool {
        self.sessions.remove(path).is_some()
    }

    pub fn close_all(&mut self) {
        self.sessions.clear();
    }

    pub fn is_open(&self, path: &Path) -> bool {
        self.sessions.contains_key(path)
    }

    pub fn session(&self, path: &Path) -> Option<&PreviewSession<R, S>> {
        self.sessions.get(path)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
