use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, trace, warn};

use crate::plan::{FANOUT, Plan};
use crate::progress::{ProgressSink, Update};
use crate::util::fs::{DirStatus, ensure_dir};

/// Counters for one build invocation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BuildState {
    /// Directories confirmed usable, whether created now or already present.
    pub created: u64,
    /// Subset of `created` that did not exist before this run.
    pub newly_created: u64,
    /// Branches abandoned because their top directory could not be ensured.
    pub skipped: u64,
    /// Directories a complete, error-free run produces.
    pub total: u64,
}

/// Pending work below one usable directory.
struct Frame {
    path: Utf8PathBuf,
    depth: u32,
    next_child: u64,
}

impl Frame {
    fn new(path: Utf8PathBuf, depth: u32) -> Self {
        Self {
            path,
            depth,
            next_child: 0,
        }
    }
}

/// Depth-first, pre-order population of a numbered directory tree.
///
/// The walk keeps its own stack of frames, so memory grows with the depth of
/// the tree and not with the call stack.
pub struct TreeBuilder<'a> {
    max_depth: u32,
    state: BuildState,
    sink: &'a mut dyn ProgressSink,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(plan: &Plan, sink: &'a mut dyn ProgressSink) -> Self {
        Self {
            max_depth: plan.depth(),
            state: BuildState {
                total: plan.total(),
                ..BuildState::default()
            },
            sink,
        }
    }

    /// Walk from `root`, which must already be a directory.
    pub fn build(mut self, root: &Utf8Path) -> BuildState {
        let mut stack = vec![Frame::new(root.to_owned(), 0)];

        while let Some(frame) = stack.last_mut() {
            if frame.depth >= self.max_depth || frame.next_child == FANOUT {
                stack.pop();
                continue;
            }

            let child = frame.path.join(frame.next_child.to_string());
            let level = frame.depth + 1;
            frame.next_child += 1;

            if self.ensure(&child, level) {
                stack.push(Frame::new(child, level));
            }
        }

        self.state
    }

    fn ensure(&mut self, path: &Utf8Path, level: u32) -> bool {
        match ensure_dir(path) {
            Ok(status) => {
                if status == DirStatus::Created {
                    self.state.newly_created += 1;
                    trace!("created {}", path);
                } else {
                    trace!("reusing {}", path);
                }
                self.state.created += 1;
                self.sink.update(Update {
                    created: self.state.created,
                    total: self.state.total,
                    level,
                    max_depth: self.max_depth,
                });
                true
            }
            Err(err) => {
                self.state.skipped += 1;
                self.sink.interrupt();
                warn!(
                    "could not create or access '{}' as a directory: {}; skipping branch",
                    path, err
                );
                false
            }
        }
    }
}

/// Build the whole tree below `root`, bracketing the walk with an initial
/// and a final progress event.
pub fn build(root: &Utf8Path, plan: &Plan, sink: &mut dyn ProgressSink) -> BuildState {
    if plan.depth() > 0 {
        sink.update(Update {
            created: 0,
            total: plan.total(),
            level: 1,
            max_depth: plan.depth(),
        });
    }

    let state = TreeBuilder::new(plan, sink).build(root);

    sink.finish(Update {
        created: state.created,
        total: state.total,
        level: plan.depth(),
        max_depth: plan.depth(),
    });
    debug!(
        created = state.created,
        newly_created = state.newly_created,
        skipped = state.skipped,
        total = state.total,
        "build finished"
    );
    state
}
