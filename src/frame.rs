use crate::audio::{EndedQueue, FailedQueue};
use crate::overlay::Chrome;
use crate::surface::LoadQueue;
use crate::SharedViewer;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub viewer: SharedViewer,
    pub loads: LoadQueue,
    pub ended: EndedQueue,
    pub failed: FailedQueue,
    pub chrome: Chrome,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        // take the queues first so completions raised while we run land in the next frame
        let loads = std::mem::take(&mut *self.loads.borrow_mut());
        let ended = std::mem::take(&mut *self.ended.borrow_mut());
        let failed = std::mem::take(&mut *self.failed.borrow_mut());

        let events = {
            let mut viewer = self.viewer.borrow_mut();
            for (ticket, result) in loads {
                viewer.panorama_loaded(ticket, result);
            }
            for track in ended {
                viewer.track_ended(track);
            }
            for (track, error) in failed {
                viewer.track_failed(track, error);
            }
            viewer.frame(now);
            viewer.drain_events()
        };
        for ev in &events {
            self.chrome.apply(ev);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref().map(|c| c.as_ref().clone()))
    else {
        return;
    };
    _ = w.request_animation_frame(cb.unchecked_ref());
}
