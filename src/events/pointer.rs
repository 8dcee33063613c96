use crate::constants::{CLICK_SLOP_PX, PITCH_LIMIT_RAD};
use crate::dom;
use crate::input::DragState;
use crate::SharedViewer;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub stage: web::HtmlElement,
    pub viewer: SharedViewer,
    pub drag_state: Rc<RefCell<DragState>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = dom::pointer_local_px(&ev, &w.stage);
        let delta = w.drag_state.borrow_mut().update(pos);
        let mut viewer = w.viewer.borrow_mut();
        if w.drag_state.borrow().active {
            if delta != glam::Vec2::ZERO {
                viewer
                    .surface_mut()
                    .camera_mut()
                    .rotate_by_drag(delta, PITCH_LIMIT_RAD);
            }
            return;
        }
        viewer.pointer_moved(pos.x, pos.y);
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let stage_for_listener = w.stage.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        let pos = dom::pointer_local_px(&ev, &w.stage);
        w.drag_state.borrow_mut().begin(pos);
        _ = w.stage.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = stage_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = dom::pointer_local_px(&ev, &w.stage);
        let is_click = w.drag_state.borrow_mut().end(pos, CLICK_SLOP_PX);
        if is_click {
            log::debug!("[click] at ({:.0}, {:.0})", pos.x, pos.y);
            w.viewer.borrow_mut().clicked(pos.x, pos.y, Instant::now());
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
