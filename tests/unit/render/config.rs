use super::*;

#[test]
fn env_value_matches_renderer_field_names() {
    let cfg = RenderOptions {
        colorizer: Some(Colorizer::EightBit),
        time_per_step: 0.5,
        hud: false,
    }
    .config_for(RenderRange::new(100, 200).unwrap());

    let v: serde_json::Value = serde_json::from_str(&cfg.to_env_value().unwrap()).unwrap();
    assert_eq!(
        v,
        serde_json::json!({
            "colorizer": "8Bit",
            "render_start": 0,
            "render_end": 100,
            "time_per_step": 0.5,
            "hud": false,
        })
    );
}

#[test]
fn missing_colorizer_serializes_as_null() {
    let cfg = RenderOptions::default().config_for(RenderRange::new(200, 250).unwrap());
    let v: serde_json::Value = serde_json::from_str(&cfg.to_env_value().unwrap()).unwrap();
    assert_eq!(v["colorizer"], serde_json::Value::Null);
    assert_eq!(v["render_end"], 50);
    assert_eq!(v["hud"], true);

    let file: serde_json::Value = serde_json::to_value(Colorizer::File).unwrap();
    assert_eq!(file, "File");
}

#[test]
fn time_per_step_must_be_positive_and_finite() {
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let opts = RenderOptions {
            time_per_step: bad,
            ..RenderOptions::default()
        };
        assert!(opts.validate().is_err(), "{bad} should be rejected");
    }
    assert!(RenderOptions::default().validate().is_ok());
}
