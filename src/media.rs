use crate::audio::{self, WebAudioBackend};
use crate::dom;
use crate::render::GpuState;
use js_sys::{ArrayBuffer, Function, Promise};
use std::cell::RefCell;
use std::rc::Rc;
use waveflag_core::{DroppedFile, MediaKind, Stage, TextureBinding, TextureSource};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub type SharedStage = Rc<RefCell<Stage<WebAudioBackend>>>;
pub type SharedGpu = Rc<RefCell<Option<GpuState>>>;

enum ReadAs {
    DataUrl,
    ArrayBuffer,
}

/// Read a file through `FileReader`, resolving with its `result`.
async fn read_file(file: &web::File, mode: ReadAs) -> anyhow::Result<JsValue> {
    let reader = web::FileReader::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let r = reader.clone();
        let onload = Closure::once_into_js(move |_ev: JsValue| {
            let result = r.result().unwrap_or(JsValue::UNDEFINED);
            _ = resolve.call1(&JsValue::NULL, &result);
        });
        let r = reader.clone();
        let onerror = Closure::once_into_js(move |_ev: JsValue| {
            let err = r
                .error()
                .map(JsValue::from)
                .unwrap_or_else(|| JsValue::from_str("read failed"));
            _ = reject.call1(&JsValue::NULL, &err);
        });
        reader.set_onload(Some(onload.unchecked_ref()));
        reader.set_onerror(Some(onerror.unchecked_ref()));
    });
    let started = match mode {
        ReadAs::DataUrl => reader.read_as_data_url(file),
        ReadAs::ArrayBuffer => reader.read_as_array_buffer(file),
    };
    started.map_err(|e| anyhow::anyhow!("{:?}", e))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

async fn decode_image(url: &str) -> anyhow::Result<web::HtmlImageElement> {
    let img = web::HtmlImageElement::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    img.set_src(url);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| anyhow::anyhow!("image decode: {:?}", e))?;
    Ok(img)
}

/// Decode `url`, upload it and swap it into the material.
pub async fn show_image(
    url: &str,
    source: TextureSource,
    stage: &SharedStage,
    gpu: &SharedGpu,
) -> anyhow::Result<()> {
    let img = decode_image(url).await?;
    let id = stage.borrow_mut().allocate_texture_id();
    let (width, height) = {
        let mut slot = gpu.borrow_mut();
        let gpu = slot
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("GPU not ready"))?;
        gpu.stage_image(id, &img)?
    };
    stage.borrow_mut().image_decoded(TextureBinding {
        id,
        width,
        height,
        source,
    });
    Ok(())
}

async fn load_dropped_image(file: web::File, stage: SharedStage, gpu: SharedGpu) {
    let name = file.name();
    let url = match read_file(&file, ReadAs::DataUrl).await {
        Ok(v) => v.as_string().unwrap_or_default(),
        Err(e) => {
            log::warn!("[drop] reading {:?} failed: {:?}", name, e);
            return;
        }
    };
    let source = TextureSource::Dropped { name: name.clone() };
    if let Err(e) = show_image(&url, source, &stage, &gpu).await {
        log::warn!("[drop] image {:?} ignored: {:?}", name, e);
    }
}

async fn load_dropped_audio(file: web::File, stage: SharedStage) {
    let name = file.name();
    let bytes = match read_file(&file, ReadAs::ArrayBuffer).await {
        Ok(v) => match v.dyn_into::<ArrayBuffer>() {
            Ok(b) => b,
            Err(_) => {
                log::warn!("[drop] {:?} did not read as bytes", name);
                return;
            }
        },
        Err(e) => {
            log::warn!("[drop] reading {:?} failed: {:?}", name, e);
            return;
        }
    };
    let ctx = match stage.borrow().playback.backend() {
        Some(b) => b.context().clone(),
        None => {
            log::warn!("[audio] no audio graph for {:?}", name);
            return;
        }
    };
    let buffer = match audio::decode(&ctx, &bytes).await {
        Ok(b) => b,
        Err(e) => {
            log::warn!("[audio] {:?} not decodable: {:?}", name, e);
            return;
        }
    };
    log::info!(
        "[audio] decoded {:?}: {:.1}s, {} ch",
        name,
        buffer.duration(),
        buffer.number_of_channels()
    );
    if let Err(e) = stage.borrow_mut().audio_decoded(&buffer) {
        log::error!("[audio] playback failed: {}", e);
    }
}

fn first_file(ev: &web::DragEvent) -> Option<web::File> {
    ev.data_transfer()
        .and_then(|dt| dt.files())
        .and_then(|files| files.get(0))
}

pub fn wire_drop(canvas: &web::HtmlCanvasElement, stage: SharedStage, gpu: SharedGpu) {
    dom::add_listener(canvas, "dragover", |ev: web::DragEvent| {
        ev.prevent_default();
    });
    dom::add_listener(canvas, "drop", move |ev: web::DragEvent| {
        ev.prevent_default();
        let Some(file) = first_file(&ev) else {
            log::info!("[drop] no file in payload");
            return;
        };
        let meta = DroppedFile {
            name: file.name(),
            mime: file.type_(),
            size: file.size() as u64,
        };
        let accepted = stage.borrow_mut().accept_drop(&meta, audio::open_backend);
        match accepted {
            Ok(MediaKind::Image) => spawn_local(load_dropped_image(file, stage.clone(), gpu.clone())),
            Ok(MediaKind::Audio) => spawn_local(load_dropped_audio(file, stage.clone())),
            Err(e) => log::error!("[audio] could not prepare playback: {}", e),
        }
    });
}
