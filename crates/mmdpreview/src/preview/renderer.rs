use futures::future::BoxFuture;
use indexmap::IndexMap;
use mmdpreview_core::{DiagramSyntaxError, IconPackDocument, IconRecord, LoadedPack};

pub type RenderFuture = BoxFuture<'static, Result<String, DiagramSyntaxError>>;

/// The diagram rendering library a session drives.
///
/// Each session owns its own renderer, so icon registrations never leak between documents.
pub trait DiagramRenderer: Send {
    /// Applies the theme; called once when the session becomes ready.
    fn initialize(&mut self, theme: &str);

    /// Registers icon packs in order. A later pack with the same name replaces an earlier one.
    fn register_icon_packs(&mut self, packs: &[LoadedPack]);

    /// Renders `text` under the unique element id `id`, returning SVG markup.
    fn render(&self, id: &str, text: &str) -> RenderFuture;
}

/// Per-session icon pack registry with last-registration-wins semantics.
///
/// Renderer implementations can embed this to resolve `pack:icon` references.
#[derive(Debug, Clone, Default)]
pub struct IconRegistry {
    packs: IndexMap<String, IconPackDocument>,
}

impl IconRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, packs: &[LoadedPack]) {
        for pack in packs {
            if self.packs.contains_key(&pack.name) {
                tracing::debug!(pack = %pack.name, "icon pack overridden");
            }
            self.packs.insert(pack.name.clone(), pack.icons.clone());
        }
    }

    pub fn pack(&self, name: &str) -> Option<&IconPackDocument> {
        self.packs.get(name)
    }

    /// Resolves an `pack:icon` reference, e.g. `aws:lambda`.
    pub fn resolve(&self, reference: &str) -> Option<&IconRecord> {
        let (pack, icon) = reference.split_once(':')?;
        self.packs.get(pack)?.get(icon)
    }

    pub fn pack_names(&self) -> impl Iterator<Item = &str> {
        self.packs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}
