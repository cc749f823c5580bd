use crate::dom;
use crate::input::{self, DragMode, DragState};
use crate::media::SharedStage;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[derive(Clone)]
pub struct OrbitWiring {
    pub canvas: web::HtmlCanvasElement,
    pub stage: SharedStage,
    pub drag: Rc<RefCell<DragState>>,
}

/// Pointer, wheel and context-menu handlers feeding the orbit controls.
pub fn wire_orbit_handlers(canvas: &web::HtmlCanvasElement, stage: SharedStage) {
    let w = OrbitWiring {
        canvas: canvas.clone(),
        stage,
        drag: Rc::new(RefCell::new(DragState::default())),
    };
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    dom::add_listener(canvas, "contextmenu", |ev: web::MouseEvent| ev.prevent_default());
}

fn wire_pointerdown(w: &OrbitWiring) {
    let w2 = w.clone();
    dom::add_listener(&w.canvas, "pointerdown", move |ev: web::PointerEvent| {
        let modifier = ev.ctrl_key() || ev.meta_key() || ev.shift_key();
        let Some(mode) = input::drag_mode_for(ev.button(), modifier) else {
            return;
        };
        w2.drag.borrow_mut().begin(
            mode,
            ev.pointer_id(),
            ev.client_x() as f32,
            ev.client_y() as f32,
        );
        _ = w2.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    });
}

fn wire_pointermove(w: &OrbitWiring) {
    let w2 = w.clone();
    dom::add_listener(&w.canvas, "pointermove", move |ev: web::PointerEvent| {
        let moved = w2.drag.borrow_mut().moved(
            ev.pointer_id(),
            ev.client_x() as f32,
            ev.client_y() as f32,
        );
        let Some((mode, dx, dy)) = moved else {
            return;
        };
        let height = w2.canvas.client_height().max(1) as f32;
        let mut stage = w2.stage.borrow_mut();
        let scene = &mut stage.scene;
        match mode {
            DragMode::Rotate => scene.controls.rotate_pointer(dx, dy, height),
            DragMode::Pan => scene.controls.pan_pointer(dx, dy, height, &scene.camera),
            DragMode::Dolly if dy != 0.0 => scene.controls.dolly_wheel(dy),
            DragMode::Dolly => {}
        }
    });
}

fn wire_pointerup(w: &OrbitWiring) {
    for name in ["pointerup", "pointercancel"] {
        let w2 = w.clone();
        dom::add_listener(&w.canvas, name, move |ev: web::PointerEvent| {
            if w2.drag.borrow_mut().end(ev.pointer_id()) {
                _ = w2.canvas.release_pointer_capture(ev.pointer_id());
            }
        });
    }
}

fn wire_wheel(w: &OrbitWiring) {
    let w2 = w.clone();
    dom::add_listener(&w.canvas, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        let dy = input::wheel_delta_px(ev.delta_y(), ev.delta_mode());
        if dy != 0.0 {
            w2.stage.borrow_mut().scene.controls.dolly_wheel(dy as f32);
        }
    });
}
