// Host-side tests for the playback graph state machine.

mod common;

use common::MockBackend;
use waveflag_core::{AudioError, Playback, FFT_SIZE};

fn ready_playback() -> Playback<MockBackend> {
    let mut p = Playback::new();
    p.prepare(|| Ok(MockBackend::default())).unwrap();
    p
}

#[test]
fn starts_uninitialized() {
    let mut p: Playback<MockBackend> = Playback::new();
    assert!(!p.is_ready());
    assert_eq!(p.source_generation(), 0);
    assert!(p.backend().is_none());
    assert!(p.sample_waveform().is_none());
}

#[test]
fn first_prepare_builds_graph_with_looping_source() {
    let p = ready_playback();
    assert!(p.is_ready());
    assert_eq!(p.source_generation(), 1);
    let b = p.backend().unwrap();
    assert_eq!(b.sources.len(), 1);
    assert_eq!(b.connected, vec![0]);
    assert!(b.sources[0].looping);
    assert!(!b.sources[0].started);
}

#[test]
fn open_failure_leaves_graph_uninitialized() {
    let mut p: Playback<MockBackend> = Playback::new();
    let err = p
        .prepare(|| Err(AudioError::backend("AudioContext", "blocked")))
        .unwrap_err();
    assert!(matches!(err, AudioError::Backend { .. }));
    assert!(!p.is_ready());
    assert_eq!(p.source_generation(), 0);
}

#[test]
fn later_prepare_reuses_backend_and_does_not_reopen() {
    let mut p = ready_playback();
    p.prepare(|| panic!("backend must not be reopened"))
        .unwrap();
    assert_eq!(p.source_generation(), 2);
    assert_eq!(p.backend().unwrap().sources.len(), 2);
}

#[test]
fn play_starts_immediately_and_loops_past_end_of_buffer() {
    let mut p = ready_playback();
    p.play(&"tone.ogg".to_string()).unwrap();
    let b = p.backend_mut().unwrap();
    assert!(b.is_playing(0));
    assert_eq!(b.sources[0].buffer.as_deref(), Some("tone.ogg"));
    b.simulate_end_of_buffer(0);
    b.simulate_end_of_buffer(0);
    assert!(b.is_playing(0), "looping source must survive end of buffer");
}

#[test]
fn play_resumes_suspended_context() {
    let mut p = Playback::new();
    p.prepare(|| Ok(MockBackend::suspended())).unwrap();
    p.play(&"a".to_string()).unwrap();
    let b = p.backend().unwrap();
    assert_eq!(b.resume_calls, 1);
    assert!(!b.suspended);
}

#[test]
fn play_does_not_resume_running_context() {
    let mut p = ready_playback();
    p.play(&"a".to_string()).unwrap();
    assert_eq!(p.backend().unwrap().resume_calls, 0);
}

#[test]
fn play_before_prepare_is_an_error() {
    let mut p: Playback<MockBackend> = Playback::new();
    assert_eq!(p.play(&"a".to_string()), Err(AudioError::Uninitialized));
}

#[test]
fn second_drop_while_playing_replaces_source() {
    let mut p = ready_playback();
    p.play(&"first".to_string()).unwrap();

    p.prepare(|| Ok(MockBackend::default())).unwrap();
    {
        let b = p.backend().unwrap();
        assert!(b.sources[0].stopped, "old source is stopped");
        assert_eq!(b.connected, vec![1], "only the new source is connected");
        assert!(b.sources[1].looping);
    }

    p.play(&"second".to_string()).unwrap();
    let b = p.backend().unwrap();
    assert!(b.is_playing(1));
    assert!(!b.is_playing(0));
}

#[test]
fn repeated_drops_keep_exactly_one_connected_source() {
    let mut p = ready_playback();
    for i in 0..6 {
        if i % 2 == 0 {
            p.play(&format!("clip{i}")).unwrap();
        }
        p.prepare(|| Ok(MockBackend::default())).unwrap();
        assert_eq!(p.backend().unwrap().connected.len(), 1);
    }
    assert_eq!(p.source_generation(), 7);
}

#[test]
fn rewiring_an_unstarted_source_tolerates_stop_failure() {
    let mut p = ready_playback();
    // Never started: the stop inside prepare fails and is swallowed.
    p.prepare(|| Ok(MockBackend::default())).unwrap();
    let b = p.backend().unwrap();
    assert_eq!(b.stop_calls, 1);
    assert_eq!(b.connected, vec![1]);
}

#[test]
fn stop_before_any_graph_is_a_no_op() {
    let mut p: Playback<MockBackend> = Playback::new();
    p.stop();
    assert!(!p.is_ready());
}

#[test]
fn stop_before_start_and_double_stop_do_not_propagate() {
    let mut p = ready_playback();
    p.stop();
    p.play(&"a".to_string()).unwrap();
    p.stop();
    p.stop();
    let b = p.backend().unwrap();
    assert_eq!(b.stop_calls, 3);
    assert!(!b.is_playing(0));
}

#[test]
fn starting_the_same_source_twice_surfaces_backend_error() {
    let mut p = ready_playback();
    p.play(&"a".to_string()).unwrap();
    assert_eq!(p.play(&"b".to_string()), Err(AudioError::AlreadyStarted));
}

#[test]
fn waveform_buffer_has_fft_size_samples() {
    let mut p = ready_playback();
    p.backend_mut().unwrap().waveform_value = 0.25;
    let w = p.sample_waveform().unwrap();
    assert_eq!(w.len(), FFT_SIZE);
    assert_eq!(FFT_SIZE, 1024);
    assert!((w[0] - 0.25).abs() < 1e-6);
}

#[test]
fn failed_rewire_keeps_current_source_playing() {
    let mut p = ready_playback();
    p.play(&"loop.wav".to_string()).unwrap();

    p.backend_mut().unwrap().fail_create = true;
    let err = p.prepare(|| panic!("backend must not be reopened")).unwrap_err();
    assert!(matches!(err, AudioError::Backend { .. }));
    assert_eq!(p.source(), Some(&0));
    assert_eq!(p.source_generation(), 1);
    {
        let b = p.backend().unwrap();
        assert_eq!(b.connected, vec![0]);
        assert!(b.is_playing(0));
        assert_eq!(b.stop_calls, 0);
    }

    let b = p.backend_mut().unwrap();
    b.fail_create = false;
    b.fail_connect = true;
    assert!(p.prepare(|| panic!("backend must not be reopened")).is_err());
    assert_eq!(p.source(), Some(&0));
    assert_eq!(p.source_generation(), 1);
    let b = p.backend().unwrap();
    assert_eq!(b.connected, vec![0]);
    assert!(b.is_playing(0));
    assert_eq!(b.stop_calls, 0);
}

#[test]
fn rewire_connects_new_source_before_dropping_old() {
    let mut p = ready_playback();
    p.play(&"loop.wav".to_string()).unwrap();
    p.prepare(|| panic!("backend must not be reopened")).unwrap();
    assert_eq!(p.source(), Some(&1));
    let b = p.backend().unwrap();
    assert_eq!(b.connected, vec![1]);
    assert!(!b.is_playing(0));
    assert!(b.sources[1].looping);
    assert!(!b.sources[1].started);
}
