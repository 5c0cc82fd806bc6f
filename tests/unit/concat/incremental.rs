use super::*;
use crate::partition::{Segment, partition, segments_for};
use crate::process::ToolOutput;
use std::path::Path;

/// Appends the bytes of every listed file, like a stream copy would.
struct ByteConcat {
    outcome: ToolOutput,
}

impl ConcatTool for ByteConcat {
    fn concat(&self, list_path: &Path, out_path: &Path) -> SimreelResult<ToolOutput> {
        if self.outcome.success {
            let list = std::fs::read_to_string(list_path).unwrap();
            let mut bytes = Vec::new();
            for line in list.lines() {
                let path = line
                    .strip_prefix("file '")
                    .and_then(|s| s.strip_suffix('\''))
                    .unwrap();
                bytes.extend(std::fs::read(path).unwrap());
            }
            std::fs::write(out_path, bytes).unwrap();
        }
        Ok(self.outcome.clone())
    }
}

fn setup(n_segments: u64) -> (tempfile::TempDir, WorkspaceContext, Vec<Segment>) {
    let dir = tempfile::tempdir().unwrap();
    let ws = WorkspaceContext::new(
        dir.path().join("renderer"),
        dir.path().join("work"),
        dir.path().join("video.mp4"),
    );
    std::fs::create_dir_all(&ws.work_dir).unwrap();
    let segments = segments_for(&partition(0, n_segments * 10, 10).unwrap(), &ws);
    for seg in &segments {
        std::fs::write(&seg.video_file, format!("[{}]", seg.index)).unwrap();
    }
    (dir, ws, segments)
}

#[test]
fn output_reflects_every_segment_so_far() {
    let (_dir, ws, segments) = setup(3);
    let tool = ByteConcat {
        outcome: ToolOutput::ok(),
    };

    let mut manifest = Manifest::new();
    let mut expected = String::new();
    for seg in &segments {
        manifest.push(seg).unwrap();
        let out = concatenate(&manifest, &ws, &tool).unwrap();
        expected.push_str(&format!("[{}]", seg.index));
        assert_eq!(out, ws.running_output);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), expected);
        assert_eq!(
            std::fs::read_to_string(&ws.manifest_path)
                .unwrap()
                .lines()
                .count(),
            seg.index + 1
        );
    }
    assert!(!ws.running_staging.exists());
}

#[test]
fn ordering_file_is_rewritten_not_appended() {
    let (_dir, ws, segments) = setup(2);
    std::fs::write(&ws.manifest_path, "file '/stale/from/previous/run.mp4'\n").unwrap();
    let tool = ByteConcat {
        outcome: ToolOutput::ok(),
    };

    let mut manifest = Manifest::new();
    manifest.push(&segments[0]).unwrap();
    concatenate(&manifest, &ws, &tool).unwrap();

    let list = std::fs::read_to_string(&ws.manifest_path).unwrap();
    assert_eq!(list.lines().count(), 1);
    assert!(!list.contains("stale"));
}

#[test]
fn missing_segment_video_is_a_concatenation_error() {
    let (_dir, ws, segments) = setup(2);
    std::fs::remove_file(&segments[0].video_file).unwrap();
    let tool = ByteConcat {
        outcome: ToolOutput::ok(),
    };

    let mut manifest = Manifest::new();
    manifest.push(&segments[0]).unwrap();
    manifest.push(&segments[1]).unwrap();
    let err = concatenate(&manifest, &ws, &tool).unwrap_err();
    assert!(matches!(err, SimreelError::Concatenation { segment: 1, .. }));
    assert!(err.to_string().contains("segment 0 is missing"));
}

#[test]
fn tool_failure_keeps_previous_running_output() {
    let (_dir, ws, segments) = setup(2);
    let mut manifest = Manifest::new();
    manifest.push(&segments[0]).unwrap();
    concatenate(
        &manifest,
        &ws,
        &ByteConcat {
            outcome: ToolOutput::ok(),
        },
    )
    .unwrap();

    manifest.push(&segments[1]).unwrap();
    let err = concatenate(
        &manifest,
        &ws,
        &ByteConcat {
            outcome: ToolOutput::failed(Some(1), "Invalid data"),
        },
    )
    .unwrap_err();
    assert!(matches!(err, SimreelError::Concatenation { segment: 1, .. }));
    assert_eq!(std::fs::read_to_string(&ws.running_output).unwrap(), "[0]");
}

#[test]
fn empty_manifest_is_rejected() {
    let (_dir, ws, _segments) = setup(1);
    let tool = ByteConcat {
        outcome: ToolOutput::ok(),
    };
    assert!(matches!(
        concatenate(&Manifest::new(), &ws, &tool),
        Err(SimreelError::Validation(_))
    ));
}
