//! Boundary to the rendering side.
//!
//! The engine never owns the viewport, camera or panorama mesh. It talks to a
//! [`SceneSurface`] that can load and present panoramas, place marker objects,
//! turn a pointer position into a world ray and intersect that ray with markers.

use crate::error::Result;
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Navigation,
    Artifact,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub marker: MarkerHandle,
    pub distance: f32,
}

pub type Hits = SmallVec<[Hit; 4]>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerTransform {
    pub position: Vec3,
    pub scale: f32,
}

pub trait SceneSurface {
    /// Begin loading a panorama. Completion is reported back to the viewer
    /// with the same ticket.
    fn load_panorama(&mut self, url: &str, ticket: LoadTicket);
    /// Show the panorama fetched for `ticket`.
    fn present_panorama(&mut self, ticket: LoadTicket);
    fn add_marker(&mut self, position: Vec3, kind: MarkerKind) -> MarkerHandle;
    fn remove_marker(&mut self, handle: MarkerHandle);
    fn set_marker_transform(&mut self, handle: MarkerHandle, transform: MarkerTransform);
    fn project_pointer_to_ray(&self, screen_x: f32, screen_y: f32) -> Ray;
    /// Hits among `markers`, nearest first.
    fn intersect(&self, ray: &Ray, markers: &[MarkerHandle]) -> Hits;
    fn camera_position(&self) -> Vec3;
    fn render_frame(&mut self);
}

/// Result of a panorama load as reported by the surface.
pub type LoadResult = Result<()>;

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t = -b - sq;
    if t >= 0.0 {
        return Some(t);
    }
    // origin inside the sphere
    let t_far = -b + sq;
    (t_far >= 0.0).then_some(t_far)
}

/// Sort hits nearest first. Equal distances keep their input order.
pub fn sort_hits(hits: &mut Hits) {
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

/// Artifact sprites grow with distance so they keep a steady on-screen size.
#[inline]
pub fn marker_scale(camera_distance: f32, scale_factor: f32) -> f32 {
    scale_factor * camera_distance * crate::constants::MARKER_DISTANCE_SCALE
}

/// Vertical offset of a navigation arrow at `time_sec`.
#[inline]
pub fn bob_offset(time_sec: f32, amplitude: f32, rate: f32) -> f32 {
    (time_sec * rate).sin() * amplitude
}
