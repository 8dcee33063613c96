use crate::constants::*;
use crate::dom;
use crate::input::tooltip_position;
use gallery_core::{NarrationButton, ViewerEvent};
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const TOOLTIP_STYLE: &str = "position:absolute;display:none;pointer-events:none;z-index:20;\
    padding:4px 8px;border-radius:4px;background:rgba(10,14,24,0.85);color:#fff;font:13px system-ui;";
const LOADING_STYLE: &str = "position:absolute;inset:0;display:none;align-items:center;\
    justify-content:center;z-index:30;background:#000;color:#fff;font:18px system-ui;\
    transition:opacity 0.5s;";
const TITLE_STYLE: &str = "position:absolute;top:16px;left:50%;transform:translateX(-50%);\
    z-index:10;color:#fff;font:24px system-ui;text-shadow:0 0 6px #000;transition:opacity 1s;";
const MODAL_STYLE: &str = "position:fixed;inset:0;display:none;flex-direction:column;\
    align-items:center;justify-content:center;z-index:40;background:rgba(0,0,0,0.8);color:#fff;";
const START_STYLE: &str = "position:fixed;inset:0;display:flex;align-items:center;\
    justify-content:center;z-index:50;background:rgba(0,0,0,0.85);";

/// UI chrome around the scene, driven entirely by [`ViewerEvent`]s.
pub struct Chrome {
    document: web::Document,
    tooltip: web::HtmlElement,
    loading: web::HtmlElement,
    room_title: web::HtmlElement,
    modal: web::HtmlElement,
    modal_image: web::HtmlElement,
    modal_title: web::HtmlElement,
    modal_description: web::HtmlElement,
    pub close_button: web::HtmlElement,
    pub narration_button: web::HtmlElement,
}

impl Chrome {
    /// Find the chrome elements, creating any the page does not provide.
    pub fn build(document: &web::Document, stage: &web::HtmlElement) -> anyhow::Result<Self> {
        let body: web::Node = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no <body>"))?
            .into();
        let stage_node: &web::Node = stage.as_ref();
        let tooltip = dom::ensure_element(document, stage_node, "div", TOOLTIP_ID, TOOLTIP_STYLE)?;
        let loading = dom::ensure_element(document, stage_node, "div", LOADING_ID, LOADING_STYLE)?;
        if loading.inner_text().is_empty() {
            loading.set_inner_text("Loading...");
        }
        let room_title = dom::ensure_element(document, stage_node, "div", ROOM_TITLE_ID, TITLE_STYLE)?;
        let modal = dom::ensure_element(document, &body, "div", MODAL_ID, MODAL_STYLE)?;
        let modal_node: &web::Node = modal.as_ref();
        let modal_image = dom::ensure_element(
            document,
            modal_node,
            "img",
            MODAL_IMAGE_ID,
            "max-width:80vw;max-height:60vh;",
        )?;
        let modal_title = dom::ensure_element(document, modal_node, "h2", MODAL_TITLE_ID, "")?;
        let modal_description =
            dom::ensure_element(document, modal_node, "p", MODAL_DESCRIPTION_ID, "max-width:60ch;")?;
        let narration_button = dom::ensure_element(
            document,
            modal_node,
            "button",
            NARRATION_BUTTON_ID,
            "display:none;margin:8px;",
        )?;
        let close_button =
            dom::ensure_element(document, modal_node, "button", MODAL_CLOSE_ID, "margin:8px;")?;
        if close_button.inner_text().is_empty() {
            close_button.set_inner_text("Close");
        }
        Ok(Self {
            document: document.clone(),
            tooltip,
            loading,
            room_title,
            modal,
            modal_image,
            modal_title,
            modal_description,
            close_button,
            narration_button,
        })
    }

    pub fn apply(&self, event: &ViewerEvent) {
        match event {
            ViewerEvent::TooltipShown { label, x, y } => {
                let at = tooltip_position(Vec2::new(*x, *y), TOOLTIP_OFFSET_PX);
                self.tooltip.set_inner_text(label);
                let style = self.tooltip.style();
                _ = style.set_property("left", &format!("{}px", at.x));
                _ = style.set_property("top", &format!("{}px", at.y));
                dom::set_visible(&self.tooltip, true, "block");
            }
            ViewerEvent::TooltipHidden => dom::set_visible(&self.tooltip, false, "block"),
            ViewerEvent::LoadingShown => {
                _ = self.loading.style().set_property("opacity", "1");
                dom::set_visible(&self.loading, true, "flex");
            }
            ViewerEvent::LoadingHidden => self.fade_out_loading(),
            ViewerEvent::RoomTitleChanged(title) => match title {
                Some(t) => {
                    self.room_title.set_inner_text(t);
                    _ = self.room_title.style().set_property("opacity", "1");
                }
                None => {
                    _ = self.room_title.style().set_property("opacity", "0");
                }
            },
            ViewerEvent::RoomEntered(room) => log::debug!("[ui] room {}", room),
            ViewerEvent::ArtifactOpened {
                title,
                description,
                image_url,
            } => {
                _ = self.modal_image.set_attribute("src", image_url);
                _ = self.modal_image.set_attribute("alt", title);
                self.modal_title.set_inner_text(title);
                self.modal_description.set_inner_text(description);
                dom::set_visible(&self.modal, true, "flex");
            }
            ViewerEvent::ArtifactClosed => dom::set_visible(&self.modal, false, "flex"),
            ViewerEvent::NarrationButton(state) => match state {
                NarrationButton::Hidden => dom::set_visible(&self.narration_button, false, "inline-block"),
                NarrationButton::Play | NarrationButton::Stop => {
                    self.narration_button.set_inner_text(state.label());
                    dom::set_visible(&self.narration_button, true, "inline-block");
                }
            },
            ViewerEvent::Diagnostic(e) => log::warn!("[ui] {}", e),
        }
    }

    fn fade_out_loading(&self) {
        _ = self.loading.style().set_property("opacity", "0");
        let loading = self.loading.clone();
        let hide = Closure::once_into_js(move || {
            // a newer load may have shown it again in the meantime
            if loading.style().get_property_value("opacity").as_deref() == Ok("0") {
                dom::set_visible(&loading, false, "flex");
            }
        });
        if let Some(window) = self.document.default_view() {
            _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                hide.unchecked_ref(),
                LOADING_FADE_MS,
            );
        }
    }
}

/// Start overlay shown until the first user gesture unlocks audio playback.
pub fn start_overlay(document: &web::Document) -> anyhow::Result<(web::HtmlElement, web::HtmlElement)> {
    let body: web::Node = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no <body>"))?
        .into();
    let overlay = dom::ensure_element(document, &body, "div", START_OVERLAY_ID, START_STYLE)?;
    let overlay_node: &web::Node = overlay.as_ref();
    let button = dom::ensure_element(
        document,
        overlay_node,
        "button",
        START_BUTTON_ID,
        "font:18px system-ui;padding:12px 24px;",
    )?;
    if button.inner_text().is_empty() {
        button.set_inner_text("Enter the gallery");
    }
    Ok((overlay, button))
}
