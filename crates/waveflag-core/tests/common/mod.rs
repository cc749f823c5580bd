// Recording audio backend shared by the host tests. Mirrors the WebAudio
// rules that matter here: a source starts at most once, and stopping a
// source that never started (or already stopped) is an error.

#![allow(dead_code)]
use waveflag_core::{AudioBackend, AudioError};

#[derive(Clone, Debug, Default)]
pub struct SourceState {
    pub started: bool,
    pub stopped: bool,
    pub looping: bool,
    pub buffer: Option<String>,
}

#[derive(Default)]
pub struct MockBackend {
    pub sources: Vec<SourceState>,
    pub connected: Vec<usize>,
    pub suspended: bool,
    pub resume_calls: u32,
    pub stop_calls: u32,
    pub waveform_value: f32,
    pub fail_create: bool,
    pub fail_connect: bool,
}

impl MockBackend {
    pub fn suspended() -> Self {
        Self {
            suspended: true,
            ..Self::default()
        }
    }

    pub fn is_playing(&self, id: usize) -> bool {
        let s = &self.sources[id];
        s.started && !s.stopped
    }

    /// The buffer ran out: a looping source wraps around, others end.
    pub fn simulate_end_of_buffer(&mut self, id: usize) {
        let s = &mut self.sources[id];
        if !s.looping {
            s.stopped = true;
        }
    }
}

impl AudioBackend for MockBackend {
    type Source = usize;
    type Buffer = String;

    fn create_source(&mut self) -> Result<usize, AudioError> {
        if self.fail_create {
            return Err(AudioError::backend("AudioBufferSourceNode", "NotSupportedError"));
        }
        self.sources.push(SourceState::default());
        Ok(self.sources.len() - 1)
    }

    fn connect_source(&mut self, source: &usize) -> Result<(), AudioError> {
        if self.fail_connect {
            return Err(AudioError::backend("connect source->gain", "InvalidAccessError"));
        }
        if !self.connected.contains(source) {
            self.connected.push(*source);
        }
        Ok(())
    }

    fn disconnect_source(&mut self, source: &usize) {
        self.connected.retain(|s| s != source);
    }

    fn set_looping(&mut self, source: &usize, looping: bool) {
        self.sources[*source].looping = looping;
    }

    fn set_buffer(&mut self, source: &usize, buffer: &String) {
        self.sources[*source].buffer = Some(buffer.clone());
    }

    fn start(&mut self, source: &usize) -> Result<(), AudioError> {
        let s = &mut self.sources[*source];
        if s.started {
            return Err(AudioError::AlreadyStarted);
        }
        s.started = true;
        Ok(())
    }

    fn stop(&mut self, source: &usize) -> Result<(), AudioError> {
        self.stop_calls += 1;
        let s = &mut self.sources[*source];
        if !s.started {
            return Err(AudioError::NotStarted);
        }
        if s.stopped {
            return Err(AudioError::backend("stop", "InvalidStateError"));
        }
        s.stopped = true;
        Ok(())
    }

    fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn resume(&mut self) {
        self.resume_calls += 1;
        self.suspended = false;
    }

    fn read_time_domain(&mut self, out: &mut [f32]) {
        for (i, v) in out.iter_mut().enumerate() {
            *v = self.waveform_value + i as f32 * 1e-4;
        }
    }
}
