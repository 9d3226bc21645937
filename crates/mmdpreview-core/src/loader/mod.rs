//! Icon pack loader: ordered [`PackDescriptor`]s -> ordered [`LoadedPack`]s.
//!
//! Descriptors load concurrently and fail independently. A failed descriptor becomes a
//! [`PackLoadError`] warning and is left out of the result; the relative order of the packs
//! that did load is preserved, so earlier (user) packs keep their registration priority.

mod transport;

pub use transport::{HttpResponse, PackTransport, USER_AGENT, UreqTransport};

use crate::PackLoadError;
use crate::model::{IconPackDocument, LoadedPack, PackDescriptor, PackSource};
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// Maximum number of redirects followed for one remote pack.
pub const MAX_REDIRECTS: usize = 8;

/// Fetches and parses a remote pack, following redirects iteratively.
///
/// `Location` headers are resolved relative to the URL that produced them.
pub fn fetch_document(
    transport: &dyn PackTransport,
    url: &str,
) -> Result<IconPackDocument, String> {
    let mut current = Url::parse(url).map_err(|err| format!("invalid URL `{url}`: {err}"))?;

    for _ in 0..=MAX_REDIRECTS {
        let response = transport.get(current.as_str())?;
        if response.is_redirect() {
            let Some(location) = response.location.as_deref() else {
                return Err(format!(
                    "HTTP {} from {current} without a Location header",
                    response.status
                ));
            };
            let next = current
                .join(location)
                .map_err(|err| format!("invalid redirect target `{location}`: {err}"))?;
            tracing::debug!(from = %current, to = %next, "following redirect");
            current = next;
            continue;
        }
        if !response.is_success() {
            return Err(format!("HTTP {} from {current}", response.status));
        }
        return IconPackDocument::from_json_str(&response.body).map_err(|err| err.to_string());
    }

    Err(format!("too many redirects (more than {MAX_REDIRECTS})"))
}

/// Reads and parses a local pack file.
pub fn read_document(path: &Path) -> Result<IconPackDocument, String> {
    let text = std::fs::read_to_string(path).map_err(|err| format!("{}: {err}", path.display()))?;
    IconPackDocument::from_json_str(&text).map_err(|err| format!("{}: {err}", path.display()))
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub packs: Vec<LoadedPack>,
    pub warnings: Vec<PackLoadError>,
}

#[derive(Clone)]
pub struct PackLoader {
    transport: Arc<dyn PackTransport>,
    workspace_root: Option<String>,
}

impl Default for PackLoader {
    fn default() -> Self {
        Self {
            transport: Arc::new(UreqTransport::default()),
            workspace_root: None,
        }
    }
}

impl std::fmt::Debug for PackLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackLoader")
            .field("workspace_root", &self.workspace_root)
            .finish_non_exhaustive()
    }
}

impl PackLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transport(mut self, transport: Arc<dyn PackTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Sets the value substituted for the workspace placeholder in local paths.
    pub fn with_workspace_root(mut self, root: Option<String>) -> Self {
        self.workspace_root = root;
        self
    }

    pub fn workspace_root(&self) -> Option<&str> {
        self.workspace_root.as_deref()
    }

    pub fn load_one(&self, descriptor: &PackDescriptor) -> Result<LoadedPack, PackLoadError> {
        let icons = match descriptor.source(self.workspace_root()) {
            PackSource::Remote(url) => fetch_document(self.transport.as_ref(), &url).map_err(
                |reason| PackLoadError::Fetch {
                    name: descriptor.name.clone(),
                    reason,
                },
            )?,
            PackSource::Local(path) => {
                read_document(&path).map_err(|reason| PackLoadError::Read {
                    name: descriptor.name.clone(),
                    reason,
                })?
            }
        };
        Ok(LoadedPack {
            name: descriptor.name.clone(),
            icons,
        })
    }

    /// Loads every descriptor concurrently and waits for all of them to settle.
    pub fn load_sync(&self, descriptors: &[PackDescriptor]) -> LoadReport {
        let outcomes = std::thread::scope(|scope| {
            let handles = descriptors
                .iter()
                .map(|descriptor| scope.spawn(move || self.load_one(descriptor)))
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .zip(descriptors)
                .map(|(handle, descriptor)| {
                    handle
                        .join()
                        .unwrap_or_else(|_| Err(panicked(descriptor)))
                })
                .collect::<Vec<_>>()
        });

        let mut report = LoadReport::default();
        for outcome in outcomes {
            match outcome {
                Ok(pack) => {
                    tracing::debug!(pack = %pack.name, icons = pack.icons.len(), "loaded icon pack");
                    report.packs.push(pack);
                }
                Err(err) => {
                    tracing::warn!(pack = err.name(), "{err}");
                    report.warnings.push(err);
                }
            }
        }
        report
    }

    /// Async variant of [`PackLoader::load_sync`]. No specific executor is required.
    ///
    /// The work is not offloaded: polling the future blocks the current thread until every
    /// descriptor settles, including remote fetches (up to the transport timeout each). On a
    /// multi-task runtime, call it from a blocking-capable thread.
    pub async fn load(&self, descriptors: &[PackDescriptor]) -> LoadReport {
        self.load_sync(descriptors)
    }
}

fn panicked(descriptor: &PackDescriptor) -> PackLoadError {
    let reason = "loader thread panicked".to_string();
    if descriptor.is_remote() {
        PackLoadError::Fetch {
            name: descriptor.name.clone(),
            reason,
        }
    } else {
        PackLoadError::Read {
            name: descriptor.name.clone(),
            reason,
        }
    }
}
