use crate::input::{key_action, KeyAction};
use crate::SharedViewer;
use instant::Instant;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, viewer: &SharedViewer) {
    let Some(action) = key_action(&ev.key()) else {
        return;
    };
    let mut viewer = viewer.borrow_mut();
    match action {
        KeyAction::CloseArtifact => {
            if viewer.artifact_state().is_open() {
                viewer.close_artifact(Instant::now());
                ev.prevent_default();
            }
        }
        KeyAction::ToggleNarration => {
            viewer.toggle_narration();
        }
    }
}

pub fn wire_global_keydown(viewer: SharedViewer) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &viewer);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
