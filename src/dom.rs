use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Element with `id`, created as a `tag` under `parent` when the page lacks it.
pub fn ensure_element(
    document: &web::Document,
    parent: &web::Node,
    tag: &str,
    id: &str,
    style: &str,
) -> anyhow::Result<web::HtmlElement> {
    let el = match document.get_element_by_id(id) {
        Some(el) => el,
        None => {
            let el = document
                .create_element(tag)
                .map_err(|e| anyhow::anyhow!("create <{}>: {:?}", tag, e))?;
            el.set_id(id);
            _ = el.set_attribute("style", style);
            parent
                .append_child(&el)
                .map_err(|e| anyhow::anyhow!("append #{}: {:?}", id, e))?;
            el
        }
    };
    el.dyn_into::<web::HtmlElement>()
        .map_err(|_| anyhow::anyhow!("#{} is not an HTML element", id))
}

#[inline]
pub fn add_click_listener(el: &web::Element, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

#[inline]
pub fn set_visible(el: &web::HtmlElement, visible: bool, display: &str) {
    let cl = el.class_list();
    if visible {
        _ = cl.remove_1("hidden");
        _ = el.style().set_property("display", display);
    } else {
        _ = cl.add_1("hidden");
        // fallback for pages without the CSS class
        _ = el.style().set_property("display", "none");
    }
}

/// Pointer position relative to `el`'s top-left corner, in CSS pixels.
#[inline]
pub fn pointer_local_px(ev: &web::MouseEvent, el: &web::Element) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

#[inline]
pub fn element_size(el: &web::Element) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    Vec2::new(rect.width() as f32, rect.height() as f32)
}
