//! Drag-to-rotate state machine.
//!
//! A secondary-button press starts a drag session. Pointer movement while the
//! button is held turns pixel deltas into yaw and pitch. Releasing the button
//! ends the session. Movement reported without the button held is ignored
//! and does not end the session; only an explicit release does.

use nalgebra::{Matrix4, Point2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::transform::{RotationState, INITIAL_PITCH, INITIAL_YAW};

/// Rotation applied per unit of pointer travel.
pub const DEGREES_PER_PIXEL: f64 = 0.4;

/// Pointer input in the render surface's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    SecondaryDown(Point2<f64>),
    Moved {
        position: Point2<f64>,
        secondary_held: bool,
    },
    SecondaryUp,
}

/// Pointer capture requests for the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Claim,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { last: Point2<f64> },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSettings {
    pub initial_yaw: f64,
    pub initial_pitch: f64,
    pub degrees_per_pixel: f64,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            initial_yaw: INITIAL_YAW,
            initial_pitch: INITIAL_PITCH,
            degrees_per_pixel: DEGREES_PER_PIXEL,
        }
    }
}

impl RotationSettings {
    fn initial_state(&self) -> RotationState {
        RotationState::new(self.initial_yaw, self.initial_pitch)
    }
}

#[derive(Debug, Clone)]
pub struct RotationController {
    settings: RotationSettings,
    rotation: RotationState,
    state: DragState,
}

impl Default for RotationController {
    fn default() -> Self {
        Self::with_settings(RotationSettings::default())
    }
}

impl RotationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: RotationSettings) -> Self {
        Self {
            settings,
            rotation: settings.initial_state(),
            state: DragState::Idle,
        }
    }

    /// Feed one pointer event; returns a capture change for the host, if any.
    pub fn handle(&mut self, event: PointerEvent) -> Option<Capture> {
        match event {
            PointerEvent::SecondaryDown(position) => Some(self.press(position)),
            PointerEvent::Moved {
                position,
                secondary_held,
            } => {
                self.pointer_moved(position, secondary_held);
                None
            }
            PointerEvent::SecondaryUp => Some(self.release()),
        }
    }

    /// Start (or restart) a drag session at `position`.
    pub fn press(&mut self, position: Point2<f64>) -> Capture {
        debug!(x = position.x, y = position.y, "rotation drag started");
        self.state = DragState::Dragging { last: position };
        Capture::Claim
    }

    /// Returns `true` if the move changed the rotation.
    pub fn pointer_moved(&mut self, position: Point2<f64>, secondary_held: bool) -> bool {
        let DragState::Dragging { last } = self.state else {
            return false;
        };
        if !secondary_held {
            return false;
        }

        let delta = (position - last) * self.settings.degrees_per_pixel;
        self.rotation.rotate(delta.x, delta.y);
        self.state = DragState::Dragging { last: position };
        true
    }

    pub fn release(&mut self) -> Capture {
        if self.is_dragging() {
            debug!(
                yaw = self.rotation.yaw,
                pitch = self.rotation.pitch,
                "rotation drag ended"
            );
        }
        self.state = DragState::Idle;
        Capture::Release
    }

    /// Back to the initial angles, ending any drag.
    pub fn reset(&mut self) {
        self.rotation = self.settings.initial_state();
        self.state = DragState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn settings(&self) -> &RotationSettings {
        &self.settings
    }

    pub fn transform(&self) -> Matrix4<f64> {
        self.rotation.matrix()
    }
}
