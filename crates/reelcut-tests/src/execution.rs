//! Execution tests: plans run through a recording runner, checking step
//! order and that no scratch file outlives its plan.

use reelcut_core::{Operation, ReelcutError};
use reelcut_media::{concat_list, Executor, Planner, PlannerOptions};
use std::fs;
use std::path::PathBuf;

use crate::support::{CurrentDir, FixedDuration, MediaDir, Recorder};

fn concat_two(media: &MediaDir) -> Operation {
    Operation::Concatenate {
        inputs: vec![media.path("a.mp4"), media.path("b.mp4")],
        output: media.path("joined.mp4"),
    }
}

fn fade_two(media: &MediaDir) -> Operation {
    Operation::Fade {
        first: media.path("a.mp4"),
        second: media.path("b.mp4"),
        output: media.path("faded.mp4"),
        seconds: 2,
    }
}

// ── Concat lists ───────────────────────────────────────────────

#[test]
fn concat_list_exists_only_while_running() {
    let media = MediaDir::with_files(&["a.mp4", "b.mp4"]);
    let plan = media.planner(0.0).plan(&concat_two(&media)).unwrap();
    let list = plan.scratch()[0].path().to_path_buf();

    let mut executor = Executor::new(Recorder::default());
    let report = executor.execute(&plan).unwrap();
    assert_eq!(report.steps_run, 1);
    assert_eq!(report.outputs, vec![media.path("joined.mp4")]);

    let recorder = executor.into_runner();
    assert_eq!(recorder.lists.len(), 1);
    assert_eq!(recorder.lists[0].path, list);
    assert_eq!(
        recorder.lists[0].contents,
        format!(
            "file '{}'\nfile '{}'\n",
            media.path("a.mp4").display(),
            media.path("b.mp4").display()
        )
    );

    assert!(!list.exists());
    assert_eq!(media.listing(), vec!["a.mp4", "b.mp4", "joined.mp4"]);
}

#[test]
fn concat_list_removed_after_failure() {
    let media = MediaDir::with_files(&["a.mp4", "b.mp4"]);
    let plan = media.planner(0.0).plan(&concat_two(&media)).unwrap();

    let mut executor = Executor::new(Recorder::failing_on(1));
    let err = executor.execute(&plan).unwrap_err();
    assert!(matches!(err, ReelcutError::ExternalToolFailure { .. }));
    assert_eq!(err.exit_code(), 2);

    // The list was there for ffmpeg to read, and is gone now.
    assert!(!executor.runner().lists[0].contents.is_empty());
    assert_eq!(media.listing(), vec!["a.mp4", "b.mp4"]);
}

fn relative_scratch_planner() -> Planner<FixedDuration> {
    let options = PlannerOptions {
        scratch_dir: "scratch".into(),
        ..PlannerOptions::default()
    };
    Planner::new(options, FixedDuration(0.0))
}

/// Paths named by the `file '...'` lines of a concat list.
fn list_entries(contents: &str) -> Vec<PathBuf> {
    contents
        .lines()
        .map(|line| {
            let quoted = line.strip_prefix("file '").and_then(|l| l.strip_suffix('\''));
            PathBuf::from(quoted.unwrap_or_else(|| panic!("malformed list line {line:?}")))
        })
        .collect()
}

#[test]
fn relative_inputs_are_listed_absolute() {
    let media = MediaDir::with_files(&["a.mp4", "b.mp4"]);
    fs::create_dir(media.path("scratch")).unwrap();
    let cwd = CurrentDir::enter(media.root());
    let here = std::env::current_dir().unwrap();

    let op = Operation::Concatenate {
        inputs: vec!["a.mp4".into(), "./b.mp4".into()],
        output: "joined.mp4".into(),
    };
    let plan = relative_scratch_planner().plan(&op).unwrap();
    let mut executor = Executor::new(Recorder::default());
    executor.execute(&plan).unwrap();
    drop(cwd);

    let seen = &executor.runner().lists[0];
    assert_eq!(seen.path.parent(), Some(here.join("scratch").as_path()));
    assert_eq!(
        seen.contents,
        concat_list(&[here.join("a.mp4"), here.join("b.mp4")])
    );
    // Every entry names the same file whether read from the list's
    // directory or from ours.
    for entry in list_entries(&seen.contents) {
        assert!(entry.is_absolute(), "{}", entry.display());
        assert!(seen.path.parent().unwrap().join(&entry).exists());
    }

    assert_eq!(media.listing(), vec!["a.mp4", "b.mp4", "joined.mp4", "scratch"]);
    assert_eq!(fs::read_dir(media.path("scratch")).unwrap().count(), 0);
}

#[test]
fn relative_scratch_dir_fade_lists_its_own_intermediates() {
    let media = MediaDir::with_files(&["a.mp4", "b.mp4"]);
    fs::create_dir(media.path("scratch")).unwrap();
    let cwd = CurrentDir::enter(media.root());
    let here = std::env::current_dir().unwrap();

    let op = Operation::Fade {
        first: "a.mp4".into(),
        second: "b.mp4".into(),
        output: "faded.mp4".into(),
        seconds: 1,
    };
    let plan = relative_scratch_planner().plan(&op).unwrap();
    let mut executor = Executor::new(Recorder::default());
    executor.execute(&plan).unwrap();
    drop(cwd);

    let faded_out = plan.scratch()[0].path();
    let faded_in = plan.scratch()[1].path();
    assert_eq!(faded_out.parent(), Some(here.join("scratch").as_path()));

    // The fade steps wrote exactly the files the list points ffmpeg at.
    let seen = &executor.runner().lists[0];
    let list_dir = seen.path.parent().unwrap();
    let resolved: Vec<PathBuf> = list_entries(&seen.contents)
        .iter()
        .map(|entry| list_dir.join(entry))
        .collect();
    assert_eq!(resolved, vec![faded_out.to_path_buf(), faded_in.to_path_buf()]);
    assert!(executor.runner().seen[0].references(faded_out));
    assert!(executor.runner().seen[1].references(faded_in));

    assert_eq!(media.listing(), vec!["a.mp4", "b.mp4", "faded.mp4", "scratch"]);
    assert_eq!(fs::read_dir(media.path("scratch")).unwrap().count(), 0);
}

// ── Fade intermediates ─────────────────────────────────────────

#[test]
fn fade_intermediates_removed_after_success() {
    let media = MediaDir::with_files(&["a.mp4", "b.mp4"]);
    let plan = media.planner(0.0).plan(&fade_two(&media)).unwrap();

    let mut executor = Executor::new(Recorder::default());
    let report = executor.execute(&plan).unwrap();
    assert_eq!(report.steps_run, 3);
    assert_eq!(report.outputs, vec![media.path("faded.mp4")]);

    // The concat step saw both intermediates, in order.
    let recorder = executor.into_runner();
    let faded_out = plan.scratch()[0].path();
    let faded_in = plan.scratch()[1].path();
    assert_eq!(
        recorder.lists[0].contents,
        concat_list(&[faded_out, faded_in])
    );

    assert_eq!(media.listing(), vec!["a.mp4", "b.mp4", "faded.mp4"]);
}

#[test]
fn fade_intermediates_removed_after_concat_failure() {
    let media = MediaDir::with_files(&["a.mp4", "b.mp4"]);
    let plan = media.planner(0.0).plan(&fade_two(&media)).unwrap();

    let mut executor = Executor::new(Recorder::failing_on(3));
    let err = executor.execute(&plan).unwrap_err();
    match err {
        ReelcutError::ExternalToolFailure { reason, .. } => {
            assert!(reason.starts_with("step 3/3:"), "{reason}")
        }
        other => panic!("expected ExternalToolFailure, got {other:?}"),
    }
    assert_eq!(executor.runner().seen.len(), 3);
    assert_eq!(media.listing(), vec!["a.mp4", "b.mp4"]);
}

#[test]
fn first_step_failure_skips_the_rest() {
    let media = MediaDir::with_files(&["a.mp4", "b.mp4"]);
    let plan = media.planner(0.0).plan(&fade_two(&media)).unwrap();

    let mut executor = Executor::new(Recorder::failing_on(1));
    assert!(executor.execute(&plan).is_err());
    assert_eq!(executor.runner().seen.len(), 1);
    assert!(executor.runner().lists.is_empty());
    assert_eq!(media.listing(), vec!["a.mp4", "b.mp4"]);
}

// ── Split ──────────────────────────────────────────────────────

#[test]
fn split_failure_names_the_step() {
    let media = MediaDir::with_files(&["talk.mp4"]);
    let op = Operation::Split {
        input: media.path("talk.mp4"),
        chunk: "01:00".into(),
    };
    let plan = media.planner(130.0).plan(&op).unwrap();

    let mut executor = Executor::new(Recorder::failing_on(2));
    let err = executor.execute(&plan).unwrap_err();
    assert!(err.to_string().contains("step 2/3"), "{err}");

    // Part one was written before the failure and is kept.
    assert_eq!(media.listing(), vec!["talk.mp4", "talk_part1.mp4"]);
}

#[test]
fn split_success_reports_every_part() {
    let media = MediaDir::with_files(&["talk.mp4"]);
    let op = Operation::Split {
        input: media.path("talk.mp4"),
        chunk: "01:00".into(),
    };
    let plan = media.planner(130.0).plan(&op).unwrap();

    let report = Executor::new(Recorder::default()).execute(&plan).unwrap();
    assert_eq!(
        report.outputs,
        vec![
            media.path("talk_part1.mp4"),
            media.path("talk_part2.mp4"),
            media.path("talk_part3.mp4"),
        ]
    );
}
