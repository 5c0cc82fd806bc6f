use super::*;

#[test]
fn default_opts_are_valid() {
    let opts = PipelineOpts::default();
    assert!(opts.validate().is_ok());
    assert_eq!(opts.group_size, 100);
    assert_eq!(opts.fps, Fps::new(25, 1).unwrap());
}

#[test]
fn invalid_opts_are_rejected() {
    let zero_group = PipelineOpts {
        group_size: 0,
        ..PipelineOpts::default()
    };
    assert!(matches!(
        zero_group.validate(),
        Err(SimreelError::Validation(_))
    ));

    let zero_fps = PipelineOpts {
        fps: Fps { num: 0, den: 1 },
        ..PipelineOpts::default()
    };
    assert!(zero_fps.validate().is_err());

    let bad_timing = PipelineOpts {
        render: RenderOptions {
            time_per_step: -1.0,
            ..RenderOptions::default()
        },
        ..PipelineOpts::default()
    };
    assert!(bad_timing.validate().is_err());
}

#[test]
fn invalid_opts_fail_before_dataset_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let ws = WorkspaceContext::new(
        dir.path(),
        dir.path().join("work"),
        dir.path().join("out.mp4"),
    )
    .with_lock_path(dir.path().join("simreel.lock"));
    let tools = Toolchain::system(dir.path(), false);
    let opts = PipelineOpts {
        group_size: 0,
        ..PipelineOpts::default()
    };

    let mut pipeline = Pipeline::new(opts, &ws, &tools);
    let err = pipeline.run(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, SimreelError::Validation(_)));
    assert_eq!(pipeline.history(), &[PipelineState::Init]);
}
