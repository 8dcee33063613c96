#![cfg(target_arch = "wasm32")]
use gallery_core::{RoomCatalog, Viewer, ViewerConfig};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod audio;
mod camera;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod surface;

use constants::{PANORAMA_ID, STAGE_ID};

const ROOMS_JSON: &str = include_str!("../assets/rooms.json");

pub(crate) type GalleryViewer = Viewer<surface::DomSurface, audio::HtmlAudioBackend>;
pub(crate) type SharedViewer = Rc<RefCell<GalleryViewer>>;

const STAGE_STYLE: &str = "position:fixed;inset:0;overflow:hidden;background-color:#000;\
    background-repeat:repeat-x;touch-action:none;cursor:grab;user-select:none;";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("gallery-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let body: web::Node = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no <body>"))?
        .into();

    let catalog = RoomCatalog::from_json(ROOMS_JSON)?;

    // the stage doubles as the panorama layer; markers and tooltip sit inside it
    let stage = dom::ensure_element(&document, &body, "div", STAGE_ID, STAGE_STYLE)?;
    let panorama = document
        .get_element_by_id(PANORAMA_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        .unwrap_or_else(|| stage.clone());
    let chrome = overlay::Chrome::build(&document, &stage)?;

    let loads: surface::LoadQueue = Rc::new(RefCell::new(Vec::new()));
    let ended: audio::EndedQueue = Rc::new(RefCell::new(Vec::new()));
    let failed: audio::FailedQueue = Rc::new(RefCell::new(Vec::new()));
    let surface = surface::DomSurface::new(&document, stage.clone(), panorama, loads.clone());
    let backend = audio::HtmlAudioBackend::new(ended.clone(), failed.clone());

    let viewer: SharedViewer = Rc::new(RefCell::new(Viewer::new(
        catalog,
        surface,
        backend,
        ViewerConfig::default(),
        Instant::now(),
    )));

    wire_modal_buttons(&chrome, &viewer);
    wire_start_overlay(&document, &viewer)?;
    events::wire_global_keydown(viewer.clone());
    events::wire_input_handlers(events::InputWiring {
        stage,
        viewer: viewer.clone(),
        drag_state: Rc::new(RefCell::new(input::DragState::default())),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        viewer,
        loads,
        ended,
        failed,
        chrome,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

fn wire_modal_buttons(chrome: &overlay::Chrome, viewer: &SharedViewer) {
    let viewer_close = viewer.clone();
    dom::add_click_listener(&chrome.close_button, move || {
        viewer_close.borrow_mut().close_artifact(Instant::now());
    });
    let viewer_narration = viewer.clone();
    dom::add_click_listener(&chrome.narration_button, move || {
        viewer_narration.borrow_mut().toggle_narration();
    });
}

// Browsers only allow playback after a user gesture, so the first room is
// entered from the start overlay's button.
fn wire_start_overlay(document: &web::Document, viewer: &SharedViewer) -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    let (overlay_el, button) = overlay::start_overlay(document)?;
    let viewer = viewer.clone();
    dom::add_click_listener(&button, move || {
        dom::set_visible(&overlay_el, false, "flex");
        if !STARTED.swap(true, Ordering::SeqCst) {
            viewer.borrow_mut().start(Instant::now());
        }
    });
    Ok(())
}
