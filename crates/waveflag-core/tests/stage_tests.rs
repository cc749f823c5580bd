// Host-side tests for the owned stage: resize, drop routing, frame ticks.

mod common;

use common::MockBackend;
use rand::prelude::*;
use waveflag_core::{
    DroppedFile, MediaKind, Stage, TextureBinding, TextureSource, Viewport, FFT_SIZE,
};

fn stage() -> Stage<MockBackend> {
    Stage::new(Viewport::new(800.0, 600.0, 1.0))
}

fn file(name: &str, mime: &str) -> DroppedFile {
    DroppedFile {
        name: name.to_string(),
        mime: mime.to_string(),
        size: 1234,
    }
}

#[test]
fn camera_aspect_tracks_every_resize() {
    let mut s = stage();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let w: f64 = rng.gen_range(1.0..4000.0);
        let h: f64 = rng.gen_range(1.0..4000.0);
        let dpr: f64 = rng.gen_range(0.5..4.0);
        s.resize(Viewport::new(w, h, dpr));
        let expected = (w / h) as f32;
        assert!(
            (s.scene.camera.aspect - expected).abs() <= expected * 1e-6,
            "aspect {} != {} for {}x{}",
            s.scene.camera.aspect,
            expected,
            w,
            h
        );
    }
}

#[test]
fn image_drop_swaps_texture_without_touching_audio() {
    let mut s = stage();
    let kind = s
        .accept_drop(&file("cat.png", "image/png"), || {
            panic!("image drops must not open audio")
        })
        .unwrap();
    assert_eq!(kind, MediaKind::Image);
    assert!(!s.playback.is_ready());

    let id = s.allocate_texture_id();
    s.image_decoded(TextureBinding {
        id,
        width: 640,
        height: 480,
        source: TextureSource::Dropped {
            name: "cat.png".to_string(),
        },
    });
    let tex = &s.scene.uniforms.texture;
    assert_eq!(tex.id, id);
    assert_eq!((tex.width, tex.height), (640, 480));
    assert_eq!(s.scene.uniforms.needs_update(), (true, true));
    assert!(!s.playback.is_ready());
    assert_eq!(s.playback.source_generation(), 0);
}

#[test]
fn image_drop_while_audio_plays_leaves_graph_alone() {
    let mut s = stage();
    s.accept_drop(&file("a.mp3", "audio/mpeg"), || Ok(MockBackend::default()))
        .unwrap();
    s.audio_decoded(&"a".to_string()).unwrap();

    s.accept_drop(&file("b.jpg", "image/jpeg"), || {
        panic!("image drops must not open audio")
    })
    .unwrap();
    assert_eq!(s.playback.source_generation(), 1);
    assert!(s.playback.backend().unwrap().is_playing(0));
}

#[test]
fn audio_drop_prepares_then_plays_after_decode() {
    let mut s = stage();
    let kind = s
        .accept_drop(&file("song.ogg", "audio/ogg"), || Ok(MockBackend::default()))
        .unwrap();
    assert_eq!(kind, MediaKind::Audio);
    assert!(s.playback.is_ready());
    assert!(!s.playback.backend().unwrap().is_playing(0));

    s.audio_decoded(&"song".to_string()).unwrap();
    let b = s.playback.backend_mut().unwrap();
    assert!(b.is_playing(0));
    b.simulate_end_of_buffer(0);
    assert!(b.is_playing(0));
}

#[test]
fn untyped_files_are_treated_as_audio() {
    let mut s = stage();
    let kind = s
        .accept_drop(&file("mystery", ""), || Ok(MockBackend::default()))
        .unwrap();
    assert_eq!(kind, MediaKind::Audio);
    assert!(s.playback.is_ready());
}

#[test]
fn second_audio_drop_replaces_playing_source() {
    let mut s = stage();
    s.accept_drop(&file("a.wav", "audio/wav"), || Ok(MockBackend::default()))
        .unwrap();
    s.audio_decoded(&"a".to_string()).unwrap();
    s.accept_drop(&file("b.wav", "audio/wav"), || Ok(MockBackend::default()))
        .unwrap();
    s.audio_decoded(&"b".to_string()).unwrap();

    let b = s.playback.backend().unwrap();
    assert_eq!(b.connected, vec![1]);
    assert!(!b.is_playing(0));
    assert!(b.is_playing(1));
}

#[test]
fn stop_playback_before_anything_started_is_safe() {
    let mut s = stage();
    s.stop_playback();
    s.accept_drop(&file("a.wav", "audio/wav"), || Ok(MockBackend::default()))
        .unwrap();
    s.stop_playback();
    assert!(s.playback.is_ready());
}

#[test]
fn tick_writes_elapsed_time() {
    let mut s = stage();
    s.tick(1.5);
    assert_eq!(s.scene.uniforms.time, 1.5);
    s.tick(2.25);
    assert_eq!(s.scene.uniforms.time, 2.25);
}

#[test]
fn tick_without_analyser_leaves_displacement_untouched() {
    let mut s = stage();
    let before = s.scene.geometry.displacement().to_vec();
    let report = s.tick(0.5);
    assert!(!report.displacement_updated);
    assert_eq!(s.scene.geometry.displacement(), before.as_slice());
}

#[test]
fn tick_with_analyser_rebinds_full_waveform() {
    let mut s = stage();
    s.accept_drop(&file("a.wav", "audio/wav"), || Ok(MockBackend::default()))
        .unwrap();
    s.playback.backend_mut().unwrap().waveform_value = 0.5;

    let report = s.tick(0.1);
    assert!(report.displacement_updated);
    let d = s.scene.geometry.displacement();
    assert_eq!(d.len(), FFT_SIZE);
    assert!((d[0] - 0.5).abs() < 1e-6);
    assert!((d[FFT_SIZE - 1] - (0.5 + (FFT_SIZE - 1) as f32 * 1e-4)).abs() < 1e-5);

    s.playback.backend_mut().unwrap().waveform_value = -0.5;
    s.tick(0.2);
    assert!((s.scene.geometry.displacement()[0] + 0.5).abs() < 1e-6);
}

#[test]
fn tick_advances_damped_controls_without_input() {
    let mut s = stage();
    s.scene
        .controls
        .rotate_pointer(120.0, 0.0, s.scene.viewport.height as f32);
    let first = s.tick(0.0);
    assert!(first.camera_moved);
    // Keeps gliding on later frames with no further input.
    let second = s.tick(0.016);
    assert!(second.camera_moved);
}

#[test]
fn panel_edits_reach_uniforms() {
    let mut s = stage();
    s.apply_control("freqX", "12.5").unwrap();
    s.apply_control("baseColor", "#ff0000").unwrap();
    assert_eq!(s.scene.uniforms.frequency.x, 12.5);
    assert_eq!(s.scene.uniforms.base_color.to_hex(), "#ff0000");
    let gpu = s.scene.gpu_uniforms();
    assert_eq!(gpu.frequency[0], 12.5);
    assert!((gpu.base_color[0] - 1.0).abs() < 1e-5);
    assert_eq!(&gpu.base_color[1..], &[0.0, 0.0, 1.0]);
}

#[test]
fn texture_ids_are_unique_and_nonzero() {
    let mut s = stage();
    let a = s.allocate_texture_id();
    let b = s.allocate_texture_id();
    assert_ne!(a, 0);
    assert_ne!(a, b);
}
