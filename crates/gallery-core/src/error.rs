use crate::hotspot::RoomId;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ViewerError {
    #[error("failed to load asset {url}: {reason}")]
    AssetLoadFailure { url: String, reason: String },
    #[error("invalid hotspot in {room}: {reason}")]
    InvalidHotspotPayload { room: RoomId, reason: String },
    #[error("unknown room {0}")]
    UnknownRoom(RoomId),
    #[error("invalid room catalog: {0}")]
    Catalog(String),
}

impl ViewerError {
    pub fn asset(url: impl Into<String>, reason: impl Into<String>) -> Self {
        ViewerError::AssetLoadFailure {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_hotspot(room: &RoomId, reason: impl Into<String>) -> Self {
        ViewerError::InvalidHotspotPayload {
            room: room.clone(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
