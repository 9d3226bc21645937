//! Icon pack data model shared by the compiler, the loader and the preview engine.
//!
//! The JSON shape is `{ "prefix": "...", "icons": { "<name>": { "width", "height", "body" } } }`.
//! Packs in the wider Iconify format may omit per-icon sizes and declare pack-level `width` /
//! `height` defaults instead; those are resolved while parsing so every [`IconRecord`] carries
//! its own size. Any other Iconify fields (`aliases`, `info`, per-icon `left` / `top` /
//! `rotate` / flips, ...) are kept verbatim and written back out for the renderer.

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Token substituted with the workspace root in local pack paths.
pub const WORKSPACE_PLACEHOLDER: &str = "${workspaceFolder}";

/// Iconify's implicit icon size when neither the icon nor the pack declares one.
const ICONIFY_DEFAULT_SIZE: f64 = 16.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconRecord {
    #[serde(serialize_with = "serialize_dimension")]
    pub width: f64,
    #[serde(serialize_with = "serialize_dimension")]
    pub height: f64,
    pub body: String,
    /// Additional Iconify icon properties, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IconRecord {
    pub fn new(width: f64, height: f64, body: impl Into<String>) -> Self {
        Self {
            width,
            height,
            body: body.into(),
            extra: Map::new(),
        }
    }

    fn validate(&self, name: &str) -> std::result::Result<(), String> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(format!("icon `{name}` has non-positive width {}", self.width));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(format!(
                "icon `{name}` has non-positive height {}",
                self.height
            ));
        }
        if self.body.trim().is_empty() {
            return Err(format!("icon `{name}` has an empty body"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconPackDocument {
    pub prefix: String,
    pub icons: IndexMap<String, IconRecord>,
    /// Pack-level Iconify fields other than `prefix` and `icons`, including the `width` /
    /// `height` defaults, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawPackDocument {
    #[serde(default)]
    prefix: String,
    icons: IndexMap<String, RawIcon>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawIcon {
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
    body: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for IconPackDocument {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawPackDocument::deserialize(deserializer)?;
        let pack_size = |key: &str| {
            raw.extra
                .get(key)
                .and_then(Value::as_f64)
                .unwrap_or(ICONIFY_DEFAULT_SIZE)
        };
        let default_width = pack_size("width");
        let default_height = pack_size("height");
        let icons = raw
            .icons
            .into_iter()
            .map(|(name, icon)| {
                let record = IconRecord {
                    width: icon.width.unwrap_or(default_width),
                    height: icon.height.unwrap_or(default_height),
                    body: icon.body,
                    extra: icon.extra,
                };
                (name, record)
            })
            .collect();
        Ok(Self {
            prefix: raw.prefix,
            icons,
            extra: raw.extra,
        })
    }
}

impl IconPackDocument {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            icons: IndexMap::new(),
            extra: Map::new(),
        }
    }

    /// Parses and validates a pack document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(text)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Checks the published-document invariants: positive sizes and non-empty bodies.
    pub fn validate(&self) -> Result<()> {
        for (name, icon) in &self.icons {
            icon.validate(name)
                .map_err(|message| Error::InvalidPack { message })?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&IconRecord> {
        self.icons.get(name)
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// Configuration entry naming one icon pack source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackDescriptor {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackSource {
    Remote(String),
    Local(PathBuf),
}

impl PackDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn is_remote(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }

    /// Resolves the descriptor URL, substituting [`WORKSPACE_PLACEHOLDER`] in local paths.
    ///
    /// Without a workspace root the placeholder is replaced by an empty string.
    pub fn source(&self, workspace_root: Option<&str>) -> PackSource {
        if self.is_remote() {
            return PackSource::Remote(self.url.clone());
        }
        let path = self
            .url
            .replace(WORKSPACE_PLACEHOLDER, workspace_root.unwrap_or_default());
        PackSource::Local(PathBuf::from(path))
    }
}

/// Runtime materialization of a [`PackDescriptor`] that loaded successfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedPack {
    pub name: String,
    pub icons: IconPackDocument,
}

fn serialize_dimension<S: Serializer>(
    value: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    // Integral sizes are written as JSON integers (`48`, not `48.0`).
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
