use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

use crate::builder::{self, BuildState};
use crate::cli::{Cli, ProgressMode};
use crate::plan::Plan;
use crate::progress::{LogSink, NullSink, ProgressSink, TerminalBar};
use crate::util::fs::{DirStatus, ensure_dir};

pub const DEFAULT_DEPTH: u32 = 4;

pub fn run(cli: Cli) -> Result<()> {
    let depth = resolve_depth(cli.depth.as_deref());
    let plan = Plan::new(depth)?;
    let root = Utf8PathBuf::from_path_buf(cli.root)
        .map_err(|path| anyhow!("root path {} must be valid UTF-8", path.display()))?;
    debug!(root = %root, depth, total = plan.total(), "resolved invocation");

    if cli.dry_run {
        print_plan(&root, &plan);
        return Ok(());
    }

    prepare_root(&root)?;

    let mut sink = sink_for(cli.progress);
    let state = builder::build(&root, &plan, sink.as_mut());
    report(&root, &plan, &state);
    Ok(())
}

/// Depth from the optional argument, falling back to the default on anything
/// that is not a positive integer.
fn resolve_depth(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return DEFAULT_DEPTH;
    };

    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 => match u32::try_from(value) {
            Ok(depth) => depth,
            Err(_) => {
                warn!("depth `{raw}` is out of range. Using default depth: {}", DEFAULT_DEPTH);
                DEFAULT_DEPTH
            }
        },
        _ => {
            warn!(
                "depth must be a positive integer, got `{raw}`. Using default depth: {}",
                DEFAULT_DEPTH
            );
            DEFAULT_DEPTH
        }
    }
}

fn prepare_root(root: &Utf8Path) -> Result<()> {
    let status = ensure_dir(root).with_context(|| format!("preparing root directory '{root}'"))?;
    match status {
        DirStatus::Created => println!("Created root directory: {root}"),
        DirStatus::Existing => println!(
            "Root directory '{root}' already exists. Proceeding to create subdirectories."
        ),
    }
    Ok(())
}

fn sink_for(mode: ProgressMode) -> Box<dyn ProgressSink> {
    match mode {
        ProgressMode::Bar => Box::new(TerminalBar::stdout()),
        ProgressMode::Log => Box::new(LogSink::default()),
        ProgressMode::None => Box::new(NullSink),
    }
}

fn print_plan(root: &Utf8Path, plan: &Plan) {
    println!("Plan for '{}' with depth {}:", root, plan.depth());
    for (level, count) in plan.levels() {
        println!("  level {level}: {count} directories");
    }
    println!("Total: {} directories (dry-run, nothing created)", plan.total());
}

fn report(root: &Utf8Path, plan: &Plan, state: &BuildState) {
    if state.skipped > 0 {
        warn!(
            "{} branch(es) could not be created; {} of {} directories are in place",
            state.skipped, state.created, state.total
        );
    }
    println!(
        "Directory structure successfully created in '{}' with depth {}.",
        root,
        plan.depth()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn depth_defaults_when_absent() {
        assert_eq!(resolve_depth(None), DEFAULT_DEPTH);
    }

    #[test]
    fn positive_depth_is_kept() {
        assert_eq!(resolve_depth(Some("1")), 1);
        assert_eq!(resolve_depth(Some(" 7 ")), 7);
    }

    #[test]
    fn invalid_depth_falls_back() {
        for raw in ["0", "-3", "abc", "", "2.5", "99999999999"] {
            assert_eq!(resolve_depth(Some(raw)), DEFAULT_DEPTH, "input {raw:?}");
        }
    }

    #[test]
    fn root_is_created_once_then_reused() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().join("out")).unwrap();
        prepare_root(&root).unwrap();
        assert!(root.is_dir());
        prepare_root(&root).unwrap();
    }

    #[test]
    fn root_occupied_by_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().join("out")).unwrap();
        fs::write(&root, b"file").unwrap();
        let err = prepare_root(&root).unwrap_err();
        assert!(format!("{err:#}").contains("not a directory"));
    }

    #[test]
    fn run_builds_requested_depth() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("out");
        let cli = Cli {
            root: root.clone(),
            depth: Some("2".to_owned()),
            dry_run: false,
            progress: ProgressMode::None,
            verbose: 0,
        };
        run(cli).unwrap();
        assert!(root.join("9").join("9").is_dir());
        assert!(!root.join("9").join("9").join("0").exists());
    }

    #[test]
    fn dry_run_leaves_filesystem_alone() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("out");
        let cli = Cli {
            root: root.clone(),
            depth: Some("3".to_owned()),
            dry_run: true,
            progress: ProgressMode::Bar,
            verbose: 0,
        };
        run(cli).unwrap();
        assert!(!root.exists());
    }
}
