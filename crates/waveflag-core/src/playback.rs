//! Audio playback graph: `source -> analyser` and `source -> gain -> output`.
//!
//! The graph is built lazily on the first audio drop. Every later drop stops
//! and disconnects the current source, then wires a fresh one into the same
//! analyser/gain pair, so at most one source is connected at any time.
//!
//! The node plumbing is behind [`AudioBackend`]; the browser implementation
//! lives in the web crate.

use crate::constants::FFT_SIZE;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("audio graph is not initialized")]
    Uninitialized,
    #[error("audio source has not been started")]
    NotStarted,
    #[error("audio source was already started")]
    AlreadyStarted,
    #[error("{op} failed: {detail}")]
    Backend { op: &'static str, detail: String },
}

impl AudioError {
    pub fn backend(op: &'static str, detail: impl Into<String>) -> Self {
        AudioError::Backend {
            op,
            detail: detail.into(),
        }
    }
}

/// Node operations the playback graph needs. An implementation owns the
/// context plus the long-lived gain and analyser nodes; sources are handed
/// out and passed back by reference.
pub trait AudioBackend {
    type Source;
    type Buffer;

    /// Create an unconnected buffer source.
    fn create_source(&mut self) -> Result<Self::Source, AudioError>;
    /// Wire `source -> analyser` and `source -> gain`.
    fn connect_source(&mut self, source: &Self::Source) -> Result<(), AudioError>;
    fn disconnect_source(&mut self, source: &Self::Source);
    fn set_looping(&mut self, source: &Self::Source, looping: bool);
    fn set_buffer(&mut self, source: &Self::Source, buffer: &Self::Buffer);
    /// Start immediately at offset zero.
    fn start(&mut self, source: &Self::Source) -> Result<(), AudioError>;
    fn stop(&mut self, source: &Self::Source) -> Result<(), AudioError>;
    fn is_suspended(&self) -> bool;
    fn resume(&mut self);
    /// Copy the analyser's current time-domain window into `out`.
    fn read_time_domain(&mut self, out: &mut [f32]);
}

struct Graph<B: AudioBackend> {
    backend: B,
    source: B::Source,
}

pub struct Playback<B: AudioBackend> {
    graph: Option<Graph<B>>,
    waveform: Vec<f32>,
    source_generation: u64,
}

impl<B: AudioBackend> Default for Playback<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: AudioBackend> Playback<B> {
    pub fn new() -> Self {
        Self {
            graph: None,
            waveform: vec![0.0; FFT_SIZE],
            source_generation: 0,
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.graph.is_some()
    }

    /// Number of source nodes created so far (0 while uninitialized).
    #[inline]
    pub fn source_generation(&self) -> u64 {
        self.source_generation
    }

    pub fn backend(&self) -> Option<&B> {
        self.graph.as_ref().map(|g| &g.backend)
    }

    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.graph.as_mut().map(|g| &mut g.backend)
    }

    pub fn source(&self) -> Option<&B::Source> {
        self.graph.as_ref().map(|g| &g.source)
    }

    /// Bring the graph to a fresh, looping, not-yet-started source.
    ///
    /// Uninitialized: `open` builds the context, gain and analyser, then the
    /// first source is wired in. Ready: a new source is wired in first, then
    /// the current one is stopped (failures are logged) and disconnected;
    /// `open` is not called. If the new source cannot be created or connected
    /// the current one stays in place untouched.
    pub fn prepare<F>(&mut self, open: F) -> Result<(), AudioError>
    where
        F: FnOnce() -> Result<B, AudioError>,
    {
        if let Some(graph) = self.graph.as_mut() {
            let source = graph.backend.create_source()?;
            if let Err(e) = graph.backend.connect_source(&source) {
                graph.backend.disconnect_source(&source);
                return Err(e);
            }
            graph.backend.set_looping(&source, true);
            let old = std::mem::replace(&mut graph.source, source);
            stop_logged(&mut graph.backend, &old);
            graph.backend.disconnect_source(&old);
            self.source_generation += 1;
            log::info!("[audio] source #{} rewired", self.source_generation);
            return Ok(());
        }

        let mut backend = open()?;
        let source = backend.create_source()?;
        backend.connect_source(&source)?;
        backend.set_looping(&source, true);
        self.graph = Some(Graph { backend, source });
        self.source_generation += 1;
        log::info!("[audio] graph ready (fft {})", FFT_SIZE);
        Ok(())
    }

    /// Attach a decoded buffer to the current source and start it looping.
    pub fn play(&mut self, buffer: &B::Buffer) -> Result<(), AudioError> {
        let graph = self.graph.as_mut().ok_or(AudioError::Uninitialized)?;
        log::info!("[audio] playing...");
        graph.backend.set_buffer(&graph.source, buffer);
        graph.backend.start(&graph.source)?;
        if graph.backend.is_suspended() {
            graph.backend.resume();
        }
        Ok(())
    }

    /// Stop the current source. Never fails: a missing graph is a no-op and
    /// backend errors (not started, already stopped) are only logged.
    pub fn stop(&mut self) {
        if let Some(graph) = self.graph.as_mut() {
            stop_logged(&mut graph.backend, &graph.source);
        }
    }

    /// Sample the analyser into the fixed-size waveform buffer. `None` while
    /// no graph exists.
    pub fn sample_waveform(&mut self) -> Option<&[f32]> {
        let graph = self.graph.as_mut()?;
        graph.backend.read_time_domain(&mut self.waveform);
        Some(&self.waveform)
    }
}

fn stop_logged<B: AudioBackend>(backend: &mut B, source: &B::Source) {
    if let Err(e) = backend.stop(source) {
        log::error!("[audio] caught an error while stopping playback: {}", e);
    }
}
