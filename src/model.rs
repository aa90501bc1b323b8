use serde::Serialize;
use std::collections::BTreeMap;

/// Slot a media file fills inside its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Video,
    Audio,
    Subtitles,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Video => "video",
            Role::Audio => "audio",
            Role::Subtitles => "subtitles",
        }
    }
}

/// One classified file, as yielded by the traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub category: String,
    pub base_id: String,
    pub role: Role,
    pub filename: String, // bare file name, never a path
}

/// base id -> role -> file name
pub type Group = BTreeMap<Role, String>;

/// category -> base id -> role -> file name
pub type Grouping = BTreeMap<String, BTreeMap<String, Group>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menu {
    pub screens: Vec<Screen>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub key: String,
    pub header: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub label: String,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    Navigate {
        target: String,
    },
    Play {
        video: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        audio: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        subtitles: Option<String>,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Navigate { .. } => "navigate",
            Action::Play { .. } => "play",
        }
    }
}

impl Item {
    pub fn navigate(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: Action::Navigate {
                target: target.into(),
            },
        }
    }

    pub fn play(
        label: impl Into<String>,
        video: impl Into<String>,
        audio: Option<String>,
        subtitles: Option<String>,
    ) -> Self {
        Self {
            label: label.into(),
            action: Action::Play {
                video: video.into(),
                audio,
                subtitles,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_item_json_omits_absent_tracks() {
        let item = Item::play("ep1", "ep1.mp4", None, Some("ep1.vtt".to_string()));
        let json = serde_json::to_value(&item).expect("serialize item");
        assert_eq!(
            json,
            serde_json::json!({
                "label": "ep1",
                "action": "play",
                "video": "ep1.mp4",
                "subtitles": "ep1.vtt",
            })
        );
    }

    #[test]
    fn navigate_item_json_has_target_only() {
        let item = Item::navigate("BACK", "main");
        let json = serde_json::to_value(&item).expect("serialize item");
        assert_eq!(
            json,
            serde_json::json!({ "label": "BACK", "action": "navigate", "target": "main" })
        );
        assert_eq!(item.action.name(), "navigate");
    }
}
