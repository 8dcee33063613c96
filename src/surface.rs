//! DOM-backed scene: the panorama is the stage's background, drawn as a
//! repeating equirectangular tile positioned from the camera, and every marker
//! is an absolutely positioned element projected from its world position.

use crate::camera::{panorama_layout, LookCamera};
use crate::constants::{CAMERA_VFOV_DEG, MARKER_PICK_RADIUS_FACTOR};
use crate::dom;
use fnv::FnvHashMap;
use gallery_core::{
    ray_sphere, sort_hits, Hit, Hits, LoadResult, LoadTicket, MarkerHandle, MarkerKind,
    MarkerTransform, Ray, SceneSurface, ViewerError, NAVIGATION_MARKER_SCALE,
};
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Panorama loads that finished, drained by the frame loop.
pub type LoadQueue = Rc<RefCell<Vec<(LoadTicket, LoadResult)>>>;

const NAVIGATION_MARKER_STYLE: &str = "position:absolute;left:0;top:0;width:0;height:0;\
    border-left:0.35em solid transparent;border-right:0.35em solid transparent;\
    border-top:1em solid #0f0;pointer-events:none;transform-origin:50% 50%;";
const ARTIFACT_MARKER_STYLE: &str = "position:absolute;left:0;top:0;width:1em;height:1em;\
    border-radius:50%;background:#fc0;color:#000;font-weight:bold;text-align:center;\
    line-height:1em;pointer-events:none;transform-origin:50% 50%;";

struct DomMarker {
    element: web::HtmlElement,
    transform: MarkerTransform,
}

pub struct DomSurface {
    document: web::Document,
    stage: web::HtmlElement,
    panorama: web::HtmlElement,
    camera: LookCamera,
    markers: FnvHashMap<MarkerHandle, DomMarker>,
    next_marker: u64,
    /// Fetched but not yet presented panoramas.
    pending: FnvHashMap<LoadTicket, String>,
    loads: LoadQueue,
}

impl DomSurface {
    pub fn new(
        document: &web::Document,
        stage: web::HtmlElement,
        panorama: web::HtmlElement,
        loads: LoadQueue,
    ) -> Self {
        let camera = LookCamera::new(CAMERA_VFOV_DEG.to_radians(), dom::element_size(&stage));
        Self {
            document: document.clone(),
            stage,
            panorama,
            camera,
            markers: FnvHashMap::default(),
            next_marker: 0,
            pending: FnvHashMap::default(),
            loads,
        }
    }

    pub fn camera(&self) -> &LookCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut LookCamera {
        &mut self.camera
    }

    fn draw_panorama(&self) {
        let layout = panorama_layout(&self.camera);
        let style = self.panorama.style();
        _ = style.set_property(
            "background-size",
            &format!("{:.1}px {:.1}px", layout.size.x, layout.size.y),
        );
        _ = style.set_property(
            "background-position",
            &format!("{:.1}px {:.1}px", layout.offset.x, layout.offset.y),
        );
    }

    fn draw_markers(&self) {
        for marker in self.markers.values() {
            let t = marker.transform;
            let style = marker.element.style();
            let Some(px) = self.camera.project(t.position) else {
                _ = style.set_property("display", "none");
                continue;
            };
            let size = self.camera.projected_size(t.position, t.scale);
            _ = style.set_property("display", "block");
            _ = style.set_property("font-size", &format!("{:.1}px", size));
            _ = style.set_property(
                "transform",
                &format!("translate({:.1}px, {:.1}px) translate(-50%, -50%)", px.x, px.y),
            );
        }
    }
}

impl SceneSurface for DomSurface {
    fn load_panorama(&mut self, url: &str, ticket: LoadTicket) {
        let image = match web::HtmlImageElement::new() {
            Ok(img) => img,
            Err(e) => {
                self.loads
                    .borrow_mut()
                    .push((ticket, Err(ViewerError::asset(url, format!("{:?}", e)))));
                return;
            }
        };
        let loads = self.loads.clone();
        let on_load = Closure::wrap(Box::new(move || {
            loads.borrow_mut().push((ticket, Ok(())));
        }) as Box<dyn FnMut()>);
        let loads = self.loads.clone();
        let failed_url = url.to_owned();
        let on_error = Closure::wrap(Box::new(move || {
            loads
                .borrow_mut()
                .push((ticket, Err(ViewerError::asset(&failed_url, "image failed to load"))));
        }) as Box<dyn FnMut()>);
        image.set_onload(Some(on_load.as_ref().unchecked_ref()));
        image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_load.forget();
        on_error.forget();

        self.pending.insert(ticket, url.to_owned());
        image.set_src(url);
        log::debug!("[surface] loading {} as {:?}", url, ticket);
    }

    fn present_panorama(&mut self, ticket: LoadTicket) {
        let Some(url) = self.pending.remove(&ticket) else {
            log::warn!("[surface] nothing fetched for {:?}", ticket);
            return;
        };
        // anything older can never be presented now
        self.pending.retain(|t, _| *t > ticket);
        _ = self
            .panorama
            .style()
            .set_property("background-image", &format!("url(\"{}\")", url));
        self.camera.yaw = 0.0;
        self.camera.pitch = 0.0;
    }

    fn add_marker(&mut self, position: Vec3, kind: MarkerKind) -> MarkerHandle {
        self.next_marker += 1;
        let handle = MarkerHandle(self.next_marker);
        let (class, style) = match kind {
            MarkerKind::Navigation => ("hotspot hotspot-navigation", NAVIGATION_MARKER_STYLE),
            MarkerKind::Artifact => ("hotspot hotspot-artifact", ARTIFACT_MARKER_STYLE),
        };
        let element = self
            .document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
        match element {
            Some(element) => {
                element.set_class_name(class);
                _ = element.set_attribute("style", style);
                if kind == MarkerKind::Artifact {
                    element.set_inner_text("!");
                }
                _ = self.stage.append_child(&element);
                self.markers.insert(
                    handle,
                    DomMarker {
                        element,
                        transform: MarkerTransform {
                            position,
                            scale: NAVIGATION_MARKER_SCALE,
                        },
                    },
                );
            }
            None => log::error!("[surface] could not create marker element"),
        }
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        if let Some(marker) = self.markers.remove(&handle) {
            marker.element.remove();
        }
    }

    fn set_marker_transform(&mut self, handle: MarkerHandle, transform: MarkerTransform) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            marker.transform = transform;
        }
    }

    fn project_pointer_to_ray(&self, screen_x: f32, screen_y: f32) -> Ray {
        let (origin, direction) = self.camera.ray_through(screen_x, screen_y);
        Ray::new(origin, direction)
    }

    fn intersect(&self, ray: &Ray, markers: &[MarkerHandle]) -> Hits {
        let mut hits = Hits::new();
        for handle in markers {
            let Some(marker) = self.markers.get(handle) else {
                continue;
            };
            let radius = marker.transform.scale * MARKER_PICK_RADIUS_FACTOR;
            if let Some(t) = ray_sphere(ray.origin, ray.direction, marker.transform.position, radius) {
                hits.push(Hit {
                    marker: *handle,
                    distance: t,
                });
            }
        }
        sort_hits(&mut hits);
        hits
    }

    fn camera_position(&self) -> Vec3 {
        self.camera.eye()
    }

    fn render_frame(&mut self) {
        let size = dom::element_size(&self.stage);
        if size != self.camera.viewport {
            self.camera.resize(size);
        }
        self.draw_panorama();
        self.draw_markers();
    }
}
