use crate::model::PackDescriptor;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Name of the settings section in the host configuration.
pub const SETTINGS_SECTION: &str = "mermaidK8sPreview";

pub const DEFAULT_THEME: &str = "dark";

/// File name of the compiled AWS pack shipped next to the extension.
pub const BUNDLED_AWS_PACK_FILE: &str = "aws-icons.json";

pub const DEFAULT_K8S_PACK_URL: &str = "https://unpkg.com/@rama_krishna/k8s-icons/icons.json";

const DIAGRAM_EXTENSIONS: &[&str] = &["mmd", "mermaid"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreviewSettings {
    /// User-configured packs. Registered before the defaults, so they win on name collisions.
    pub icon_packs: Vec<PackDescriptor>,
    pub theme: String,
    /// Appends the built-in packs after the user packs.
    pub preload_defaults: bool,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            icon_packs: Vec::new(),
            theme: DEFAULT_THEME.to_string(),
            preload_defaults: true,
        }
    }
}

impl PreviewSettings {
    /// Reads settings from a JSON document.
    ///
    /// Accepted shapes:
    /// - the bare section: `{ "iconPacks": [...], "theme": "dark" }`
    /// - a nested section: `{ "mermaidK8sPreview": { "iconPacks": [...] } }`
    /// - editor-style dotted keys: `{ "mermaidK8sPreview.iconPacks": [...] }`
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(root) = value else {
            return Err(Error::InvalidSettings {
                message: "settings must be a JSON object".to_string(),
            });
        };

        let mut section = match root.get(SETTINGS_SECTION) {
            Some(Value::Object(nested)) => nested.clone(),
            Some(_) => {
                return Err(Error::InvalidSettings {
                    message: format!("`{SETTINGS_SECTION}` must be an object"),
                });
            }
            None => Map::new(),
        };

        let dotted_prefix = format!("{SETTINGS_SECTION}.");
        let mut saw_section_keys = !section.is_empty();
        for (key, value) in &root {
            if let Some(field) = key.strip_prefix(&dotted_prefix) {
                section.insert(field.to_string(), value.clone());
                saw_section_keys = true;
            }
        }

        let section = if saw_section_keys || root.contains_key(SETTINGS_SECTION) {
            section
        } else {
            root
        };

        serde_json::from_value(Value::Object(section)).map_err(|err| Error::InvalidSettings {
            message: err.to_string(),
        })
    }

    pub fn theme(&self) -> &str {
        if self.theme.trim().is_empty() {
            DEFAULT_THEME
        } else {
            &self.theme
        }
    }

    /// Full descriptor list for a session: user packs first, then the defaults.
    ///
    /// Packs register in list order with the last registration winning, so a default whose
    /// name is already claimed by a user pack is left out.
    pub fn descriptors(&self, extension_dir: &Path) -> Vec<PackDescriptor> {
        let mut out = self.icon_packs.clone();
        if self.preload_defaults {
            let defaults = default_packs(extension_dir)
                .into_iter()
                .filter(|default| !self.icon_packs.iter().any(|user| user.name == default.name));
            out.extend(defaults);
        }
        out
    }
}

/// Built-in packs: the bundled AWS pack produced by the compiler and the remote k8s pack.
pub fn default_packs(extension_dir: &Path) -> Vec<PackDescriptor> {
    vec![
        PackDescriptor::new(
            "aws",
            extension_dir
                .join(BUNDLED_AWS_PACK_FILE)
                .to_string_lossy()
                .into_owned(),
        ),
        PackDescriptor::new("k8s", DEFAULT_K8S_PACK_URL),
    ]
}

/// Returns true for files the preview handles (`.mmd` / `.mermaid`).
pub fn is_diagram_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DIAGRAM_EXTENSIONS.contains(&ext))
}
