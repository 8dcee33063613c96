//! Hotspot descriptors.
//!
//! Room data arrives as loosely shaped [`HotspotSpec`] records (a `type` tag plus
//! optional fields). They are checked once, when a room's markers are created,
//! and turned into the tagged [`Hotspot`] enum that the rest of the engine
//! matches on exhaustively.

use crate::constants::NAVIGATION_FALLBACK_LABEL;
use crate::error::{Result, ViewerError};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavigationHotspot {
    pub position: Vec3,
    pub title: Option<String>,
    pub target: RoomId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArtifactHotspot {
    pub position: Vec3,
    pub title: Option<String>,
    pub image_url: String,
    pub description: String,
    pub music_url: Option<String>,
    pub narration_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Hotspot {
    Navigation(NavigationHotspot),
    Artifact(ArtifactHotspot),
}

impl Hotspot {
    pub fn position(&self) -> Vec3 {
        match self {
            Hotspot::Navigation(h) => h.position,
            Hotspot::Artifact(h) => h.position,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Hotspot::Navigation(h) => h.title.as_deref(),
            Hotspot::Artifact(h) => h.title.as_deref(),
        }
    }

    /// Tooltip text. Untitled hotspots read "Enter".
    pub fn label(&self) -> &str {
        self.title()
            .filter(|t| !t.is_empty())
            .unwrap_or(NAVIGATION_FALLBACK_LABEL)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotspotType {
    Navigation,
    Artifact,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Position> for Vec3 {
    fn from(p: Position) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

impl From<Vec3> for Position {
    fn from(v: Vec3) -> Self {
        Position {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

/// Hotspot as written in room data, before validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotSpec {
    #[serde(rename = "type")]
    pub kind: HotspotType,
    pub position: Position,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "action")]
    pub target: Option<RoomId>,
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "music")]
    pub music_url: Option<String>,
    #[serde(default, alias = "audioDescription")]
    pub narration_url: Option<String>,
}

impl HotspotSpec {
    pub fn navigation(position: Vec3, title: Option<&str>, target: impl Into<RoomId>) -> Self {
        Self {
            kind: HotspotType::Navigation,
            position: position.into(),
            title: title.map(str::to_owned),
            target: Some(target.into()),
            image_url: None,
            description: None,
            music_url: None,
            narration_url: None,
        }
    }

    pub fn artifact(position: Vec3, title: &str, image_url: &str, description: &str) -> Self {
        Self {
            kind: HotspotType::Artifact,
            position: position.into(),
            title: Some(title.to_owned()),
            target: None,
            image_url: Some(image_url.to_owned()),
            description: Some(description.to_owned()),
            music_url: None,
            narration_url: None,
        }
    }

    pub fn with_music(mut self, url: &str) -> Self {
        self.music_url = Some(url.to_owned());
        self
    }

    pub fn with_narration(mut self, url: &str) -> Self {
        self.narration_url = Some(url.to_owned());
        self
    }

    /// Check the fields required by this hotspot's variant.
    ///
    /// `room` names the room this hotspot belongs to (for diagnostics) and
    /// `is_known_room` decides whether a navigation target exists.
    pub fn validate(&self, room: &RoomId, is_known_room: impl Fn(&RoomId) -> bool) -> Result<Hotspot> {
        let position = Vec3::from(self.position);
        if !position.is_finite() {
            return Err(ViewerError::invalid_hotspot(room, "position is not finite"));
        }
        let title = non_empty(&self.title);
        match self.kind {
            HotspotType::Navigation => {
                let target = self
                    .target
                    .as_ref()
                    .filter(|t| !t.as_str().is_empty())
                    .ok_or_else(|| {
                        ViewerError::invalid_hotspot(room, "navigation hotspot has no target")
                    })?;
                if !is_known_room(target) {
                    return Err(ViewerError::invalid_hotspot(
                        room,
                        format!("navigation target {} does not exist", target),
                    ));
                }
                Ok(Hotspot::Navigation(NavigationHotspot {
                    position,
                    title,
                    target: target.clone(),
                }))
            }
            HotspotType::Artifact => {
                if title.is_none() {
                    return Err(ViewerError::invalid_hotspot(room, "artifact hotspot has no title"));
                }
                let image_url = non_empty(&self.image_url).ok_or_else(|| {
                    ViewerError::invalid_hotspot(room, "artifact hotspot has no image")
                })?;
                Ok(Hotspot::Artifact(ArtifactHotspot {
                    position,
                    title,
                    image_url,
                    description: self.description.clone().unwrap_or_default(),
                    music_url: non_empty(&self.music_url),
                    narration_url: non_empty(&self.narration_url),
                }))
            }
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}
