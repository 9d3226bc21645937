mod surface;

use crate::preview::{DiagramRenderer, IconRegistry, RenderFuture};
use crate::{DiagramSyntaxError, IconPackDocument, LoadedPack};

pub(crate) const SYNTAX_ERROR: &str =
    "<p>Parse error on line 1:</p>\nbad diagram\n^\nExpecting &#39;SPACE&#39;, got &lt;EOF&gt;";

/// Renders any text not starting with `bad` as `<svg id="..">text</svg>`.
#[derive(Debug, Default)]
pub(crate) struct FakeRenderer {
    pub registry: IconRegistry,
    pub theme: Option<String>,
    pub register_calls: usize,
}

impl DiagramRenderer for FakeRenderer {
    fn initialize(&mut self, theme: &str) {
        self.theme = Some(theme.to_string());
    }

    fn register_icon_packs(&mut self, packs: &[LoadedPack]) {
        self.register_calls += 1;
        self.registry.register(packs);
    }

    fn render(&self, id: &str, text: &str) -> RenderFuture {
        let result = if text.starts_with("bad") {
            Err(DiagramSyntaxError::new(SYNTAX_ERROR))
        } else {
            Ok(format!(r#"<svg id="{id}">{text}</svg>"#))
        };
        Box::pin(async move { result })
    }
}

pub(crate) fn pack(name: &str, icon: &str, body: &str) -> LoadedPack {
    let mut icons = IconPackDocument::new(name);
    icons
        .icons
        .insert(icon.to_string(), crate::IconRecord::new(48.0, 48.0, body));
    LoadedPack {
        name: name.to_string(),
        icons,
    }
}
