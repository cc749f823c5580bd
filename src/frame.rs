use crate::media::{SharedGpu, SharedStage};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use waveflag_core::Clock;
use web_sys as web;

pub struct FrameContext {
    pub stage: SharedStage,
    pub gpu: SharedGpu,
    pub clock: Clock,
}

impl FrameContext {
    /// One animation step: advance the scene, push what changed to the GPU,
    /// draw.
    pub fn frame(&mut self) {
        let mut stage = self.stage.borrow_mut();
        stage.tick(self.clock.elapsed_secs());

        let mut slot = self.gpu.borrow_mut();
        let Some(gpu) = slot.as_mut() else {
            return;
        };
        if let Some(id) = stage.scene.uniforms.take_texture_update() {
            gpu.bind_texture(id);
        }
        if stage.scene.geometry.take_displacement_dirty() {
            gpu.write_displacement(stage.scene.geometry.displacement());
        }
        let (w, h) = stage.scene.viewport.backing_size();
        gpu.resize_if_needed(w, h);
        if let Err(e) = gpu.render(&stage.scene.gpu_uniforms()) {
            log::error!("[gpu] render error: {:?}", e);
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Reschedule `frame` on every display refresh, forever.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
