use crate::error::{Result, ViewerError};
use crate::hotspot::{HotspotSpec, RoomId};
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDefinition {
    pub id: RoomId,
    pub panorama_url: String,
    pub ambient_url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub hotspots: Vec<HotspotSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    #[serde(default)]
    initial_room: Option<RoomId>,
    rooms: Vec<RoomDefinition>,
}

/// Static per-room data, loaded once at startup and never mutated.
///
/// Room order matters: a room's ambient track index is its position here.
#[derive(Clone, Debug)]
pub struct RoomCatalog {
    rooms: Vec<RoomDefinition>,
    index: FnvHashMap<RoomId, usize>,
    initial: RoomId,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<RoomDefinition>) -> Result<Self> {
        let initial = rooms
            .first()
            .map(|r| r.id.clone())
            .ok_or_else(|| ViewerError::Catalog("no rooms defined".into()))?;
        Self::with_initial(rooms, initial)
    }

    pub fn with_initial(rooms: Vec<RoomDefinition>, initial: RoomId) -> Result<Self> {
        if rooms.is_empty() {
            return Err(ViewerError::Catalog("no rooms defined".into()));
        }
        let mut index = FnvHashMap::default();
        for (i, room) in rooms.iter().enumerate() {
            if room.id.as_str().is_empty() {
                return Err(ViewerError::Catalog(format!("room #{} has an empty id", i)));
            }
            if index.insert(room.id.clone(), i).is_some() {
                return Err(ViewerError::Catalog(format!("duplicate room id {}", room.id)));
            }
        }
        if !index.contains_key(&initial) {
            return Err(ViewerError::Catalog(format!(
                "initial room {} is not defined",
                initial
            )));
        }
        Ok(Self {
            rooms,
            index,
            initial,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| ViewerError::Catalog(e.to_string()))?;
        match file.initial_room {
            Some(initial) => Self::with_initial(file.rooms, initial),
            None => Self::new(file.rooms),
        }
    }

    pub fn get(&self, id: &RoomId) -> Option<&RoomDefinition> {
        self.index.get(id).map(|&i| &self.rooms[i])
    }

    pub fn contains(&self, id: &RoomId) -> bool {
        self.index.contains_key(id)
    }

    pub fn ambient_index(&self, id: &RoomId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn initial_room(&self) -> &RoomId {
        &self.initial
    }

    pub fn rooms(&self) -> &[RoomDefinition] {
        &self.rooms
    }

    pub fn ambient_urls(&self) -> impl Iterator<Item = &str> {
        self.rooms.iter().map(|r| r.ambient_url.as_str())
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
