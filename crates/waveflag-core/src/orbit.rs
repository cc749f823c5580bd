//! Damped orbit controls.
//!
//! Pointer handlers only accumulate pending deltas; nothing touches the
//! camera until [`OrbitControls::update`] runs, which the animation driver
//! calls exactly once per frame. With damping enabled every update consumes a
//! fixed share of what is pending, so the camera keeps gliding for a while
//! after the pointer stops.

use crate::camera::Camera;
use crate::constants::{
    ORBIT_DAMPING, ORBIT_EPS, ORBIT_PAN_SPEED, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
    ORBIT_ZOOM_STEP,
};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Spherical coordinates around +Y: `theta` is the azimuth measured from +Z
/// towards +X, `phi` the polar angle measured from +Y.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }

    /// Keep the polar angle away from the poles so look-at stays defined.
    pub fn make_safe(&mut self) {
        self.phi = self.phi.clamp(ORBIT_EPS, PI - ORBIT_EPS);
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    spherical_delta: Spherical,
    pan_offset: Vec3,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: ORBIT_DAMPING,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            spherical_delta: Spherical::default(),
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a rotation from a pointer drag of `dx`/`dy` CSS pixels.
    pub fn rotate_pointer(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.rotate_left(TAU * dx * self.rotate_speed / h);
        self.rotate_up(TAU * dy * self.rotate_speed / h);
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    /// Queue a screen-space pan from a pointer drag of `dx`/`dy` CSS pixels.
    pub fn pan_pointer(&mut self, dx: f32, dy: f32, viewport_height: f32, camera: &Camera) {
        let h = viewport_height.max(1.0);
        let distance = (camera.eye - camera.target).length() * (camera.fovy_radians * 0.5).tan();
        let (right, up) = camera.screen_axes();
        let dx = dx * self.pan_speed;
        let dy = dy * self.pan_speed;
        self.pan_offset += right * (-2.0 * dx * distance / h);
        self.pan_offset += up * (2.0 * dy * distance / h);
    }

    /// Queue a dolly from a wheel event; negative `delta_y` zooms in.
    pub fn dolly_wheel(&mut self, delta_y: f32) {
        let step = ORBIT_ZOOM_STEP.powf(self.zoom_speed);
        if delta_y < 0.0 {
            self.scale *= step;
        } else if delta_y > 0.0 {
            self.scale /= step;
        }
    }

    /// True while rotation or pan is still being eased out.
    pub fn is_settling(&self) -> bool {
        self.spherical_delta.theta.abs() > ORBIT_EPS
            || self.spherical_delta.phi.abs() > ORBIT_EPS
            || self.pan_offset.length_squared() > ORBIT_EPS
            || (self.scale - 1.0).abs() > ORBIT_EPS
    }

    /// Apply pending input to the camera. Returns whether the eye moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let last_eye = camera.eye;
        let offset = camera.eye - camera.target;
        let mut spherical = Spherical::from_offset(offset);

        let share = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        spherical.theta += self.spherical_delta.theta * share;
        spherical.phi += self.spherical_delta.phi * share;
        spherical.make_safe();
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        camera.target += self.pan_offset * share;
        camera.eye = camera.target + spherical.to_offset();

        if self.enable_damping {
            self.spherical_delta.theta *= 1.0 - self.damping_factor;
            self.spherical_delta.phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.spherical_delta = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        (camera.eye - last_eye).length_squared() > ORBIT_EPS * ORBIT_EPS
    }
}
