use crate::events::ViewerEvent;
use crate::hotspot::{ArtifactHotspot, Hotspot, RoomId};
use crate::registry::HotspotRegistry;
use crate::scene::{MarkerHandle, SceneSurface};
use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InteractionState {
    pub hovered: Option<MarkerHandle>,
    pub pointer: Vec2,
}

/// What a click on a hotspot asks for.
#[derive(Clone, Debug, PartialEq)]
pub enum Activation {
    Navigate(RoomId),
    OpenArtifact(ArtifactHotspot),
}

#[derive(Debug, Default)]
pub struct PointerController {
    state: InteractionState,
}

impl PointerController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nearest registered hotspot under the screen point.
    pub fn hit_test<'r, S>(
        surface: &S,
        registry: &'r HotspotRegistry,
        x: f32,
        y: f32,
    ) -> Option<(MarkerHandle, &'r Hotspot)>
    where
        S: SceneSurface + ?Sized,
    {
        if registry.is_empty() {
            return None;
        }
        let ray = surface.project_pointer_to_ray(x, y);
        let handles = registry.handles();
        surface
            .intersect(&ray, &handles)
            .into_iter()
            .find_map(|hit| registry.get(hit.marker).map(|h| (hit.marker, h)))
    }

    pub fn pointer_moved<S>(
        &mut self,
        x: f32,
        y: f32,
        surface: &S,
        registry: &HotspotRegistry,
        out: &mut Vec<ViewerEvent>,
    ) where
        S: SceneSurface + ?Sized,
    {
        self.state.pointer = Vec2::new(x, y);
        match Self::hit_test(surface, registry, x, y) {
            Some((handle, hotspot)) => {
                self.state.hovered = Some(handle);
                out.push(ViewerEvent::TooltipShown {
                    label: hotspot.label().to_owned(),
                    x,
                    y,
                });
            }
            None => self.hide_tooltip(out),
        }
    }

    pub fn clicked<S>(
        &mut self,
        x: f32,
        y: f32,
        surface: &S,
        registry: &HotspotRegistry,
    ) -> Option<Activation>
    where
        S: SceneSurface + ?Sized,
    {
        self.state.pointer = Vec2::new(x, y);
        let (_, hotspot) = Self::hit_test(surface, registry, x, y)?;
        Some(match hotspot {
            Hotspot::Navigation(nav) => Activation::Navigate(nav.target.clone()),
            Hotspot::Artifact(artifact) => Activation::OpenArtifact(artifact.clone()),
        })
    }

    /// Drop hover state, e.g. when the markers it pointed at are gone.
    pub fn hide_tooltip(&mut self, out: &mut Vec<ViewerEvent>) {
        if self.state.hovered.take().is_some() {
            out.push(ViewerEvent::TooltipHidden);
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }
}
