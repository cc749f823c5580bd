// Host-side tests for panel bindings and color parsing.

use waveflag_core::{
    Color, ColorError, ControlKind, ControlValue, PanelError, ParamPanel, ShaderUniforms,
    DEFAULT_CONTROLS,
};

#[test]
fn default_panel_exposes_expected_controls() {
    let panel = ParamPanel::default();
    let names: Vec<&str> = panel.controls().iter().map(|c| c.name).collect();
    assert_eq!(
        names,
        vec![
            "freqX",
            "freqY",
            "timeMul",
            "elevationMul",
            "colorIntensity",
            "baseColor",
            "peakColor"
        ]
    );
    assert_eq!(panel.controls().len(), DEFAULT_CONTROLS.len());
}

#[test]
fn slider_ranges_match_table() {
    let panel = ParamPanel::default();
    let range = |name: &str| match panel.control(name).unwrap().kind {
        ControlKind::Slider { min, max, step } => (min, max, step),
        ControlKind::Color => panic!("{name} is not a slider"),
    };
    assert_eq!(range("freqX"), (0.0, 20.0, 0.01));
    assert_eq!(range("freqY"), (0.0, 20.0, 0.01));
    assert_eq!(range("timeMul"), (1.0, 30.0, 0.01));
    assert_eq!(range("elevationMul"), (-1.0, 1.0, 0.001));
    assert_eq!(range("colorIntensity"), (1.0, 30.0, 0.01));
    assert_eq!(panel.control("baseColor").unwrap().kind, ControlKind::Color);
}

#[test]
fn uniform_defaults() {
    let u = ShaderUniforms::default();
    assert_eq!(u.frequency.to_array(), [10.0, 5.0]);
    assert_eq!(u.time, 0.0);
    assert_eq!(u.time_mul, 1.0);
    assert_eq!(u.elevation_mul, 0.1);
    assert_eq!(u.color_intensity, 3.0);
    assert_eq!(u.base_color, Color::WHITE);
    assert_eq!(u.peak_color, Color::WHITE);
    assert_eq!(u.needs_update(), (false, false));
}

#[test]
fn numeric_edits_are_clamped_to_range() {
    let panel = ParamPanel::default();
    let mut u = ShaderUniforms::default();
    let stored = panel
        .apply("timeMul", ControlValue::Number(99.0), &mut u)
        .unwrap();
    assert_eq!(stored, ControlValue::Number(30.0));
    assert_eq!(u.time_mul, 30.0);

    panel
        .apply("elevationMul", ControlValue::Number(-3.0), &mut u)
        .unwrap();
    assert_eq!(u.elevation_mul, -1.0);

    panel
        .apply("freqY", ControlValue::Number(7.25), &mut u)
        .unwrap();
    assert_eq!(u.frequency.y, 7.25);
    assert_eq!(u.frequency.x, 10.0);
}

#[test]
fn read_reflects_live_store() {
    let panel = ParamPanel::default();
    let mut u = ShaderUniforms::default();
    u.color_intensity = 12.0;
    let c = *panel.control("colorIntensity").unwrap();
    assert_eq!(panel.read(&c, &u), ControlValue::Number(12.0));
    let base = *panel.control("baseColor").unwrap();
    assert_eq!(panel.read(&base, &u).to_input_string(), "#ffffff");
}

#[test]
fn rejected_edits_leave_store_untouched() {
    let panel = ParamPanel::default();
    let mut u = ShaderUniforms::default();
    assert_eq!(
        panel.apply("nope", ControlValue::Number(1.0), &mut u),
        Err(PanelError::UnknownControl("nope".to_string()))
    );
    assert_eq!(
        panel.apply("freqX", ControlValue::Color(Color::WHITE), &mut u),
        Err(PanelError::ExpectedNumber("freqX"))
    );
    assert_eq!(
        panel.apply("peakColor", ControlValue::Number(1.0), &mut u),
        Err(PanelError::ExpectedColor("peakColor"))
    );
    assert!(matches!(
        panel.apply("freqX", ControlValue::Number(f32::NAN), &mut u),
        Err(PanelError::NotFinite { name: "freqX", .. })
    ));
    assert_eq!(u.frequency.x, 10.0);
    assert_eq!(u.peak_color, Color::WHITE);
}

#[test]
fn raw_input_strings_are_parsed_per_kind() {
    let panel = ParamPanel::default();
    let mut u = ShaderUniforms::default();
    panel.apply_input("colorIntensity", " 4.5 ", &mut u).unwrap();
    assert_eq!(u.color_intensity, 4.5);
    panel.apply_input("peakColor", "#336699", &mut u).unwrap();
    assert_eq!(u.peak_color.to_hex(), "#336699");
    assert_eq!(
        panel.apply_input("freqX", "abc", &mut u),
        Err(PanelError::ExpectedNumber("freqX"))
    );
    assert!(matches!(
        panel.apply_input("baseColor", "#12", &mut u),
        Err(PanelError::Color(ColorError::Malformed(_)))
    ));
}

#[test]
fn hex_colors_round_trip() {
    for hex in ["#000000", "#ffffff", "#ff0000", "#336699", "#0a0b0c", "#808080"] {
        let c = Color::from_hex(hex).unwrap();
        assert_eq!(c.to_hex(), hex);
    }
    // Uppercase and missing '#' are accepted.
    assert_eq!(Color::from_hex("FFAA00").unwrap().to_hex(), "#ffaa00");
}

#[test]
fn hex_colors_are_stored_linear() {
    let mid = Color::from_hex("#808080").unwrap();
    assert!(mid.r > 0.2 && mid.r < 0.23, "sRGB 0x80 is ~0.216 linear, got {}", mid.r);
}

#[test]
fn malformed_hex_is_rejected() {
    for bad in ["", "#", "#12345", "#1234567", "#gg0000", "#ffééff", "#+f+f+f", "#+0+0+0", "# 0 0 0"] {
        assert!(Color::from_hex(bad).is_err(), "{bad:?} should fail");
    }
}

#[test]
fn signed_hex_digits_do_not_reach_the_uniforms() {
    let panel = ParamPanel::default();
    let mut u = ShaderUniforms::default();
    let before = u.base_color;
    assert!(matches!(
        panel.apply_input("baseColor", "#+0+0+0", &mut u),
        Err(PanelError::Color(ColorError::Malformed(_)))
    ));
    assert_eq!(u.base_color, before);
}
