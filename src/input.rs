use crate::constants::{
    BUTTON_MIDDLE, BUTTON_PRIMARY, BUTTON_SECONDARY, PANEL_TOGGLE_KEY, WHEEL_LINE_PX,
    WHEEL_PAGE_PX,
};

/// `KeyboardEvent.key` that shows/hides the parameter panel, either case.
#[inline]
pub fn is_panel_toggle(key: &str) -> bool {
    key.eq_ignore_ascii_case(PANEL_TOGGLE_KEY)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
    Dolly,
}

/// Orbit-controls button mapping: left rotates (or pans with a modifier held),
/// middle dollies, right pans.
#[inline]
pub fn drag_mode_for(button: i16, modifier: bool) -> Option<DragMode> {
    match button {
        BUTTON_PRIMARY if modifier => Some(DragMode::Pan),
        BUTTON_PRIMARY => Some(DragMode::Rotate),
        BUTTON_MIDDLE => Some(DragMode::Dolly),
        BUTTON_SECONDARY => Some(DragMode::Pan),
        _ => None,
    }
}

/// `WheelEvent.deltaY` in pixels whatever the event's delta mode.
#[inline]
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32) -> f64 {
    match delta_mode {
        1 => delta_y * WHEEL_LINE_PX,
        2 => delta_y * WHEEL_PAGE_PX,
        _ => delta_y,
    }
}

#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub mode: Option<DragMode>,
    pub pointer_id: i32,
    pub x: f32,
    pub y: f32,
}

impl DragState {
    pub fn begin(&mut self, mode: DragMode, pointer_id: i32, x: f32, y: f32) {
        *self = Self {
            mode: Some(mode),
            pointer_id,
            x,
            y,
        };
    }

    /// Movement since the last event of the captured pointer.
    pub fn moved(&mut self, pointer_id: i32, x: f32, y: f32) -> Option<(DragMode, f32, f32)> {
        let mode = self.mode?;
        if pointer_id != self.pointer_id {
            return None;
        }
        let (dx, dy) = (x - self.x, y - self.y);
        self.x = x;
        self.y = y;
        Some((mode, dx, dy))
    }

    pub fn end(&mut self, pointer_id: i32) -> bool {
        if self.mode.is_some() && pointer_id == self.pointer_id {
            self.mode = None;
            return true;
        }
        false
    }
}
