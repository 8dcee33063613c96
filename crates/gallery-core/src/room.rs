use crate::audio::{AudioBackend, AudioEngine};
use crate::catalog::RoomCatalog;
use crate::error::{Result, ViewerError};
use crate::events::ViewerEvent;
use crate::hotspot::{Hotspot, RoomId};
use crate::registry::HotspotRegistry;
use crate::scene::{LoadResult, LoadTicket, SceneSurface};
use instant::Instant;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoomPhase {
    Idle,
    Loading { ticket: LoadTicket, target: RoomId },
}

/// What happened to a reported panorama load.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    Entered(RoomId),
    Failed(ViewerError),
    /// A newer switch was requested after this load started.
    Stale,
}

/// Owns the current room and the hotspot registry.
///
/// The registry is cleared as soon as a switch is requested and refilled only
/// when the latest requested panorama has loaded. Every request carries a
/// fresh [`LoadTicket`]; completions for any other ticket are dropped.
pub struct RoomStateMachine {
    catalog: RoomCatalog,
    current: RoomId,
    phase: RoomPhase,
    registry: HotspotRegistry,
    next_ticket: u64,
}

impl RoomStateMachine {
    pub fn new(catalog: RoomCatalog) -> Self {
        let current = catalog.initial_room().clone();
        Self {
            catalog,
            current,
            phase: RoomPhase::Idle,
            registry: HotspotRegistry::new(),
            next_ticket: 1,
        }
    }

    pub fn switch_room<S, B>(
        &mut self,
        target: &RoomId,
        surface: &mut S,
        audio: &mut AudioEngine<B>,
        crossfade: Duration,
        now: Instant,
        out: &mut Vec<ViewerEvent>,
    ) -> Result<LoadTicket>
    where
        S: SceneSurface + ?Sized,
        B: AudioBackend,
    {
        let room = self
            .catalog
            .get(target)
            .ok_or_else(|| ViewerError::UnknownRoom(target.clone()))?;
        let ambient_index = self.catalog.ambient_index(target).unwrap_or(usize::MAX);

        self.registry.clear(surface);

        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        if let RoomPhase::Loading { target: abandoned, .. } = &self.phase {
            log::debug!("[room] abandoning load of {}", abandoned);
        }
        self.phase = RoomPhase::Loading {
            ticket,
            target: target.clone(),
        };
        log::info!("[room] switching {} -> {}", self.current, target);

        out.push(ViewerEvent::LoadingShown);
        out.push(ViewerEvent::RoomTitleChanged(room.title.clone()));
        surface.load_panorama(&room.panorama_url, ticket);

        // audio moves right away, without waiting for the imagery
        audio.select_ambient(ambient_index, crossfade, now);
        Ok(ticket)
    }

    pub fn panorama_loaded<S>(
        &mut self,
        ticket: LoadTicket,
        result: LoadResult,
        surface: &mut S,
        out: &mut Vec<ViewerEvent>,
    ) -> LoadOutcome
    where
        S: SceneSurface + ?Sized,
    {
        let target = match &self.phase {
            RoomPhase::Loading { ticket: latest, target } if *latest == ticket => target.clone(),
            _ => {
                log::debug!("[room] dropping stale load {:?}", ticket);
                return LoadOutcome::Stale;
            }
        };
        self.phase = RoomPhase::Idle;
        out.push(ViewerEvent::LoadingHidden);

        if let Err(e) = result {
            // stay on the previous room; its markers are already gone
            log::error!("[room] failed to load panorama for {}: {}", target, e);
            out.push(ViewerEvent::Diagnostic(e.clone()));
            return LoadOutcome::Failed(e);
        }

        surface.present_panorama(ticket);
        let hotspots = self.validated_hotspots(&target, out);
        self.registry.add_all(surface, hotspots);
        self.current = target.clone();
        log::info!(
            "[room] entered {} with {} hotspots",
            self.current,
            self.registry.len()
        );
        out.push(ViewerEvent::RoomEntered(target.clone()));
        LoadOutcome::Entered(target)
    }

    fn validated_hotspots(&self, room: &RoomId, out: &mut Vec<ViewerEvent>) -> Vec<Hotspot> {
        let Some(definition) = self.catalog.get(room) else {
            return Vec::new();
        };
        definition
            .hotspots
            .iter()
            .filter_map(|spec| match spec.validate(room, |id| self.catalog.contains(id)) {
                Ok(hotspot) => Some(hotspot),
                Err(e) => {
                    log::warn!("[room] rejecting hotspot: {}", e);
                    out.push(ViewerEvent::Diagnostic(e));
                    None
                }
            })
            .collect()
    }

    pub fn current_room(&self) -> &RoomId {
        &self.current
    }

    /// Ambient track index of the current room.
    pub fn current_ambient_index(&self) -> usize {
        self.catalog.ambient_index(&self.current).unwrap_or(0)
    }

    pub fn phase(&self) -> &RoomPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, RoomPhase::Loading { .. })
    }

    pub fn registry(&self) -> &HotspotRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &RoomCatalog {
        &self.catalog
    }
}
