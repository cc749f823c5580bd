use js_sys::ArrayBuffer;
use waveflag_core::{AudioBackend, AudioError, FFT_SIZE};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// WebAudio side of the playback graph: the context plus the long-lived
/// gain (-> destination) and analyser nodes every source is wired into.
pub struct WebAudioBackend {
    ctx: web::AudioContext,
    gain: web::GainNode,
    analyser: web::AnalyserNode,
}

fn js_err(op: &'static str, e: JsValue) -> AudioError {
    AudioError::backend(op, format!("{:?}", e))
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32) -> Result<web::GainNode, AudioError> {
    let g = web::GainNode::new(audio_ctx).map_err(|e| js_err("GainNode", e))?;
    g.gain().set_value(value);
    Ok(g)
}

/// Build the context, gain and analyser. Called once, on the first audio drop.
pub fn open_backend() -> Result<WebAudioBackend, AudioError> {
    let ctx = web::AudioContext::new().map_err(|e| js_err("AudioContext", e))?;
    let gain = create_gain(&ctx, 1.0)?;
    let analyser = web::AnalyserNode::new(&ctx).map_err(|e| js_err("AnalyserNode", e))?;
    analyser.set_fft_size(FFT_SIZE as u32);
    gain.connect_with_audio_node(&ctx.destination())
        .map_err(|e| js_err("connect gain", e))?;
    log::info!(
        "[audio] context ready: {} Hz, analyser window {}",
        ctx.sample_rate(),
        analyser.fft_size()
    );
    Ok(WebAudioBackend {
        ctx,
        gain,
        analyser,
    })
}

impl WebAudioBackend {
    pub fn context(&self) -> &web::AudioContext {
        &self.ctx
    }
}

impl AudioBackend for WebAudioBackend {
    type Source = web::AudioBufferSourceNode;
    type Buffer = web::AudioBuffer;

    fn create_source(&mut self) -> Result<Self::Source, AudioError> {
        web::AudioBufferSourceNode::new(&self.ctx).map_err(|e| js_err("AudioBufferSourceNode", e))
    }

    fn connect_source(&mut self, source: &Self::Source) -> Result<(), AudioError> {
        source
            .connect_with_audio_node(&self.gain)
            .map_err(|e| js_err("connect source->gain", e))?;
        source
            .connect_with_audio_node(&self.analyser)
            .map_err(|e| js_err("connect source->analyser", e))?;
        Ok(())
    }

    fn disconnect_source(&mut self, source: &Self::Source) {
        if let Err(e) = source.disconnect() {
            log::warn!("[audio] disconnect failed: {:?}", e);
        }
    }

    fn set_looping(&mut self, source: &Self::Source, looping: bool) {
        source.set_loop(looping);
    }

    fn set_buffer(&mut self, source: &Self::Source, buffer: &Self::Buffer) {
        source.set_buffer(Some(buffer));
    }

    fn start(&mut self, source: &Self::Source) -> Result<(), AudioError> {
        source.start_with_when(0.0).map_err(|e| {
            if is_invalid_state(&e) {
                AudioError::AlreadyStarted
            } else {
                js_err("start", e)
            }
        })
    }

    fn stop(&mut self, source: &Self::Source) -> Result<(), AudioError> {
        source.stop_with_when(0.0).map_err(|e| {
            if is_invalid_state(&e) {
                AudioError::NotStarted
            } else {
                js_err("stop", e)
            }
        })
    }

    fn is_suspended(&self) -> bool {
        self.ctx.state() == web::AudioContextState::Suspended
    }

    fn resume(&mut self) {
        _ = self.ctx.resume();
    }

    fn read_time_domain(&mut self, out: &mut [f32]) {
        self.analyser.get_float_time_domain_data(out);
    }
}

fn is_invalid_state(e: &JsValue) -> bool {
    js_sys::Reflect::get(e, &JsValue::from_str("name"))
        .ok()
        .and_then(|n| n.as_string())
        .map(|n| n == "InvalidStateError")
        .unwrap_or(false)
}

/// Decode compressed audio bytes with the given context.
pub async fn decode(ctx: &web::AudioContext, bytes: &ArrayBuffer) -> anyhow::Result<web::AudioBuffer> {
    let promise = ctx
        .decode_audio_data(bytes)
        .map_err(|e| anyhow::anyhow!("decodeAudioData: {:?}", e))?;
    let decoded = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("decodeAudioData rejected: {:?}", e))?;
    decoded
        .dyn_into::<web::AudioBuffer>()
        .map_err(|e| anyhow::anyhow!("decoded value is not an AudioBuffer: {:?}", e))
}
