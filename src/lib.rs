#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use waveflag_core::{Clock, Stage, TextureSource};
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod media;
mod overlay;
mod panel;
mod render;

use media::{SharedGpu, SharedStage};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("waveflag-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn wire_resize(window: &web::Window, canvas: &web::HtmlCanvasElement, stage: &SharedStage) {
    let win = window.clone();
    let canvas = canvas.clone();
    let stage = stage.clone();
    dom::add_listener(window, "resize", move |_ev: web::Event| {
        let viewport = dom::read_viewport(&win);
        dom::apply_viewport(&canvas, &viewport);
        stage.borrow_mut().resize(viewport);
    });
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .query_selector(constants::CANVAS_SELECTOR)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("missing {}", constants::CANVAS_SELECTOR))?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("{} is not a canvas", constants::CANVAS_SELECTOR))?;

    let viewport = dom::read_viewport(&window);
    dom::apply_viewport(&canvas, &viewport);
    let stage: SharedStage = Rc::new(RefCell::new(Stage::new(viewport)));
    let gpu: SharedGpu = Rc::new(RefCell::new(None));

    wire_resize(&window, &canvas, &stage);
    media::wire_drop(&canvas, stage.clone(), gpu.clone());
    events::wire_orbit_handlers(&canvas, stage.clone());
    events::wire_panel_toggle_h(&window, &document);
    if let Err(e) = panel::build_panel(&document, &stage) {
        log::warn!("[panel] unavailable: {:?}", e);
    }

    let geometry = stage.borrow().scene.geometry.clone();
    match render::GpuState::new(&canvas, &geometry).await {
        Ok(g) => *gpu.borrow_mut() = Some(g),
        Err(e) => log::error!("WebGPU init error: {:?}", e),
    }

    {
        let stage = stage.clone();
        let gpu = gpu.clone();
        spawn_local(async move {
            let source = TextureSource::Url(constants::DEFAULT_TEXTURE_URL.to_string());
            if let Err(e) =
                media::show_image(constants::DEFAULT_TEXTURE_URL, source, &stage, &gpu).await
            {
                log::warn!("[texture] default texture unavailable: {:?}", e);
            }
        });
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        stage,
        gpu,
        clock: Clock::new(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
