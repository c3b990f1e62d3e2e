//! Translation of crossterm mouse events into rotation pointer events.
//!
//! Terminal positions are character cells. Rows are scaled by
//! [`CELL_ASPECT`] so that horizontal and vertical drags of the same visual
//! length rotate by the same angle.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use fsurf_core::PointerEvent;
use nalgebra::Point2;

use crate::projection::CELL_ASPECT;

/// Cell coordinates to surface-local coordinates.
pub fn cell_to_surface(column: u16, row: u16) -> Point2<f64> {
    Point2::new(column as f64, row as f64 * CELL_ASPECT as f64)
}

/// Map a mouse event to a pointer event, if it concerns the right button.
pub fn pointer_event(event: &MouseEvent) -> Option<PointerEvent> {
    let position = cell_to_surface(event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Right) => Some(PointerEvent::SecondaryDown(position)),
        MouseEventKind::Up(MouseButton::Right) => Some(PointerEvent::SecondaryUp),
        MouseEventKind::Drag(MouseButton::Right) => Some(PointerEvent::Moved {
            position,
            secondary_held: true,
        }),
        // Motion with no button, or another button, held
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(PointerEvent::Moved {
            position,
            secondary_held: false,
        }),
        _ => None,
    }
}
