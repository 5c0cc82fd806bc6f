use super::*;

#[test]
fn render_range_contains_boundaries() {
    let r = RenderRange::new(2, 5).unwrap();
    assert!(!r.contains(1));
    assert!(r.contains(2));
    assert!(r.contains(4));
    assert!(!r.contains(5));
    assert_eq!(r.len_steps(), 3);
    assert_eq!(r.to_string(), "[2, 5)");
}

#[test]
fn render_range_rejects_empty_and_inverted() {
    assert!(RenderRange::new(5, 5).is_err());
    assert!(RenderRange::new(6, 5).is_err());
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());

    let fps = Fps::new(30000, 1001).unwrap();
    assert_eq!(fps.to_ffmpeg_arg(), "30000/1001");
    assert!((fps.as_f64() - 29.97).abs() < 0.01);
}
