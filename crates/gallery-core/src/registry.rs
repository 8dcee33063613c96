use crate::hotspot::Hotspot;
use crate::scene::{MarkerHandle, MarkerKind, SceneSurface};

#[derive(Clone, Debug, PartialEq)]
pub struct RegisteredMarker {
    pub handle: MarkerHandle,
    pub hotspot: Hotspot,
}

/// Markers of the current room. Rooms are swapped wholesale, so markers are
/// only ever added in bulk and removed all at once.
#[derive(Debug, Default)]
pub struct HotspotRegistry {
    markers: Vec<RegisteredMarker>,
}

impl HotspotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear<S: SceneSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.markers.is_empty() {
            return;
        }
        for marker in self.markers.drain(..) {
            surface.remove_marker(marker.handle);
        }
    }

    pub fn add_all<S, I>(&mut self, surface: &mut S, hotspots: I)
    where
        S: SceneSurface + ?Sized,
        I: IntoIterator<Item = Hotspot>,
    {
        for hotspot in hotspots {
            let kind = match &hotspot {
                Hotspot::Navigation(_) => MarkerKind::Navigation,
                Hotspot::Artifact(_) => MarkerKind::Artifact,
            };
            let handle = surface.add_marker(hotspot.position(), kind);
            self.markers.push(RegisteredMarker { handle, hotspot });
        }
    }

    pub fn get(&self, handle: MarkerHandle) -> Option<&Hotspot> {
        self.markers
            .iter()
            .find(|m| m.handle == handle)
            .map(|m| &m.hotspot)
    }

    pub fn handles(&self) -> Vec<MarkerHandle> {
        self.markers.iter().map(|m| m.handle).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredMarker> {
        self.markers.iter()
    }

    pub fn hotspots(&self) -> impl Iterator<Item = &Hotspot> {
        self.markers.iter().map(|m| &m.hotspot)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
