use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SimreelError::data_format("x")
            .to_string()
            .contains("data format error:")
    );
    assert!(
        SimreelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SimreelError::AlreadyRunning(PathBuf::from("/tmp/simreel.lock"))
            .to_string()
            .starts_with("already running")
    );
}

#[test]
fn stage_errors_name_stage_and_segment() {
    let err = SimreelError::RenderProcess {
        segment: 1,
        status: Some(2),
        diagnostics: "boom".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("render failed for segment 1"));
    assert!(msg.contains("exit code 2"));
    assert!(msg.contains("boom"));
    assert_eq!(err.segment(), Some(1));

    let err = SimreelError::encode(3, "no frames");
    assert!(err.to_string().contains("encode failed for segment 3"));
    assert_eq!(err.segment(), Some(3));

    let err = SimreelError::concatenation(0, "missing");
    assert!(err.to_string().contains("concatenation failed after segment 0"));
    assert_eq!(err.segment(), Some(0));

    assert_eq!(SimreelError::validation("x").segment(), None);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SimreelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
