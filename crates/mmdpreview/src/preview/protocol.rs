use mmdpreview_core::LoadedPack;
use serde::{Deserialize, Serialize};

/// Messages sent from the host process to a preview surface.
///
/// `init` is sent exactly once per session, after pack loading settled; `update` is sent on
/// every content change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    Init {
        content: String,
        #[serde(rename = "iconPacks", default)]
        icon_packs: Vec<LoadedPack>,
        #[serde(default)]
        theme: String,
    },
    Update {
        content: String,
    },
}

impl HostMessage {
    pub fn content(&self) -> &str {
        match self {
            Self::Init { content, .. } | Self::Update { content } => content,
        }
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
