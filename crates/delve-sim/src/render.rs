//! Render-collection seam.
//!
//! The frame scheduler owns exactly one backend. Subsystems only keep the
//! [`VisualHandle`]s they created and are responsible for releasing them.

use std::collections::HashMap;

use glam::Vec3;
use log::warn;

use delve_core::enums::VisualKind;
use delve_core::types::VisualHandle;

/// Drawable collection driven by the simulation.
pub trait RenderBackend {
    /// Add a visual and return its handle.
    fn create(&mut self, kind: VisualKind, position: Vec3) -> VisualHandle;
    fn set_transform(&mut self, handle: VisualHandle, position: Vec3);
    /// Emissive intensity in `[0, 1]`; used for eye glow.
    fn set_intensity(&mut self, handle: VisualHandle, intensity: f32);
    /// Free a visual and its resources.
    fn release(&mut self, handle: VisualHandle);
    fn set_camera(&mut self, eye: Vec3, yaw: f32, pitch: f32);
    /// Present the current frame.
    fn draw(&mut self);
}

/// One live visual in a [`HeadlessRenderer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualRecord {
    pub kind: VisualKind,
    pub position: Vec3,
    pub intensity: f32,
}

/// Camera state recorded at the last `set_camera`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraState {
    pub eye: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

/// Backend that keeps the render collection in memory without drawing.
/// Used by the headless host and by tests to observe resource lifetimes.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    next_id: u64,
    live: HashMap<VisualHandle, VisualRecord>,
    frames_drawn: u64,
    camera: CameraState,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn live_of(&self, kind: VisualKind) -> usize {
        self.live.values().filter(|r| r.kind == kind).count()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn camera(&self) -> CameraState {
        self.camera
    }
}

impl RenderBackend for HeadlessRenderer {
    fn create(&mut self, kind: VisualKind, position: Vec3) -> VisualHandle {
        let handle = VisualHandle(self.next_id);
        self.next_id += 1;
        self.live.insert(
            handle,
            VisualRecord {
                kind,
                position,
                intensity: 1.0,
            },
        );
        handle
    }

    fn set_transform(&mut self, handle: VisualHandle, position: Vec3) {
        if let Some(record) = self.live.get_mut(&handle) {
            record.position = position;
        }
    }

    fn set_intensity(&mut self, handle: VisualHandle, intensity: f32) {
        if let Some(record) = self.live.get_mut(&handle) {
            record.intensity = intensity;
        }
    }

    fn release(&mut self, handle: VisualHandle) {
        if self.live.remove(&handle).is_none() {
            warn!("Release of unknown visual {handle:?}");
        }
    }

    fn set_camera(&mut self, eye: Vec3, yaw: f32, pitch: f32) {
        self.camera = CameraState { eye, yaw, pitch };
    }

    fn draw(&mut self) {
        self.frames_drawn += 1;
    }
}
