use fnv::FnvHashMap;
use gallery_core::{AudioBackend, TrackId, ViewerError};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Tracks that played to their end, drained by the frame loop.
pub type EndedQueue = Rc<RefCell<Vec<TrackId>>>;
/// Tracks whose source failed to load or decode, drained by the frame loop.
pub type FailedQueue = Rc<RefCell<Vec<(TrackId, ViewerError)>>>;

struct Track {
    element: web::HtmlAudioElement,
    on_ended: Closure<dyn FnMut()>,
    on_error: Closure<dyn FnMut()>,
}

/// [`AudioBackend`] over one `<audio>` element per track.
pub struct HtmlAudioBackend {
    tracks: FnvHashMap<TrackId, Track>,
    ended: EndedQueue,
    failed: FailedQueue,
}

impl HtmlAudioBackend {
    pub fn new(ended: EndedQueue, failed: FailedQueue) -> Self {
        Self {
            tracks: FnvHashMap::default(),
            ended,
            failed,
        }
    }

    fn element(&self, id: TrackId) -> Option<&web::HtmlAudioElement> {
        let track = self.tracks.get(&id);
        if track.is_none() {
            log::debug!("[audio] unknown track {:?}", id);
        }
        track.map(|t| &t.element)
    }
}

impl AudioBackend for HtmlAudioBackend {
    fn create_track(&mut self, id: TrackId, url: &str, looping: bool) -> gallery_core::Result<()> {
        let element = web::HtmlAudioElement::new_with_src(url)
            .map_err(|e| ViewerError::asset(url, format!("{:?}", e)))?;
        element.set_loop(looping);
        element.set_preload("auto");

        let ended = self.ended.clone();
        let on_ended = Closure::wrap(Box::new(move || {
            ended.borrow_mut().push(id);
        }) as Box<dyn FnMut()>);
        element
            .add_event_listener_with_callback("ended", on_ended.as_ref().unchecked_ref())
            .map_err(|e| ViewerError::asset(url, format!("{:?}", e)))?;

        let failed = self.failed.clone();
        let url_for_error = url.to_owned();
        let el_for_error = element.clone();
        let on_error = Closure::wrap(Box::new(move || {
            let reason = el_for_error
                .error()
                .map(|e| format!("media error code {}", e.code()))
                .unwrap_or_else(|| "media error".to_owned());
            failed
                .borrow_mut()
                .push((id, ViewerError::asset(url_for_error.as_str(), reason)));
        }) as Box<dyn FnMut()>);
        element
            .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
            .map_err(|e| ViewerError::asset(url, format!("{:?}", e)))?;

        self.tracks.insert(
            id,
            Track {
                element,
                on_ended,
                on_error,
            },
        );
        Ok(())
    }

    fn play(&mut self, id: TrackId) {
        let Some(el) = self.element(id) else {
            return;
        };
        match el.play() {
            Ok(promise) => spawn_local(async move {
                // autoplay policy or a broken source rejects here
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("[audio] play {:?} rejected: {:?}", id, e);
                }
            }),
            Err(e) => log::warn!("[audio] play {:?} failed: {:?}", id, e),
        }
    }

    fn pause(&mut self, id: TrackId) {
        if let Some(el) = self.element(id) {
            _ = el.pause();
        }
    }

    fn rewind(&mut self, id: TrackId) {
        if let Some(el) = self.element(id) {
            el.set_current_time(0.0);
        }
    }

    fn set_volume(&mut self, id: TrackId, volume: f32) {
        if let Some(el) = self.element(id) {
            el.set_volume(volume.clamp(0.0, 1.0) as f64);
        }
    }

    fn release(&mut self, id: TrackId) {
        let Some(track) = self.tracks.remove(&id) else {
            return;
        };
        _ = track.element.pause();
        _ = track
            .element
            .remove_event_listener_with_callback("ended", track.on_ended.as_ref().unchecked_ref());
        _ = track
            .element
            .remove_event_listener_with_callback("error", track.on_error.as_ref().unchecked_ref());
        _ = track.element.remove_attribute("src");
        track.element.load();
    }
}
