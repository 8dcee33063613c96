use glam::{Mat4, Vec2, Vec3, Vec4};
use std::f32::consts::{PI, TAU};

const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

/// First-person camera fixed at the centre of the panorama sphere.
///
/// `yaw` turns right from -Z, `pitch` looks up. `viewport` is in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LookCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub vfov: f32,
    pub viewport: Vec2,
}

impl LookCamera {
    pub fn new(vfov: f32, viewport: Vec2) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            vfov,
            viewport,
        }
    }

    #[inline]
    pub fn eye(&self) -> Vec3 {
        Vec3::ZERO
    }

    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * cp, sp, -cy * cp)
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.viewport.x.max(1.0) / self.viewport.y.max(1.0)
    }

    /// Horizontal field of view in radians.
    pub fn hfov(&self) -> f32 {
        2.0 * ((self.vfov * 0.5).tan() * self.aspect()).atan()
    }

    fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(self.vfov, self.aspect(), NEAR, FAR);
        let view = Mat4::look_to_rh(self.eye(), self.forward(), Vec3::Y);
        proj * view
    }

    /// World-space ray through a viewport pixel, as `(origin, direction)`.
    pub fn ray_through(&self, sx: f32, sy: f32) -> (Vec3, Vec3) {
        let width = self.viewport.x.max(1.0);
        let height = self.viewport.y.max(1.0);
        let ndc_x = (2.0 * sx / width) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / height);
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let ro = self.eye();
        (ro, (p1 - ro).normalize())
    }

    /// Viewport pixel of a world point, `None` when it is behind the camera.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_proj() * world.extend(1.0);
        if clip.w <= NEAR {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    /// On-screen height in pixels of an object `size` world units tall.
    pub fn projected_size(&self, world: Vec3, size: f32) -> f32 {
        let depth = (world - self.eye()).dot(self.forward());
        if depth <= NEAR {
            return 0.0;
        }
        size / (2.0 * depth * (self.vfov * 0.5).tan()) * self.viewport.y
    }

    /// Turn the view so the panorama follows the pointer.
    pub fn rotate_by_drag(&mut self, delta_px: Vec2, pitch_limit: f32) {
        let rad_per_px = self.vfov / self.viewport.y.max(1.0);
        self.yaw = (self.yaw - delta_px.x * rad_per_px).rem_euclid(TAU);
        self.pitch = (self.pitch + delta_px.y * rad_per_px).clamp(-pitch_limit, pitch_limit);
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }
}

/// Where to draw an equirectangular image so that it lines up with the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanoramaLayout {
    /// Size of one full image tile in pixels.
    pub size: Vec2,
    /// Top-left of the tile relative to the viewport.
    pub offset: Vec2,
}

pub fn panorama_layout(camera: &LookCamera) -> PanoramaLayout {
    let width = camera.viewport.x * TAU / camera.hfov();
    let size = Vec2::new(width, width * 0.5);
    // image centre is straight down -Z
    let u = 0.5 + camera.yaw / TAU;
    let v = 0.5 - camera.pitch / PI;
    PanoramaLayout {
        size,
        offset: camera.viewport * 0.5 - Vec2::new(u * size.x, v * size.y),
    }
}
