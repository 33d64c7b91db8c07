use std::io::{self, Write};

use tracing::info;

/// Cells in the rendered bar.
pub const BAR_WIDTH: usize = 20;
/// The status line is padded so a shorter redraw erases the previous one.
const LINE_WIDTH: usize = 80;

/// One progress event from the tree builder.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Update {
    pub created: u64,
    pub total: u64,
    /// Level of the directory just ensured (1 = child of the root).
    pub level: u32,
    pub max_depth: u32,
}

impl Update {
    /// Counter clamped to the total.
    pub fn shown(&self) -> u64 {
        self.created.min(self.total)
    }

    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.shown() as f64 / self.total as f64 * 100.0
        }
    }

    fn filled_cells(&self) -> usize {
        if self.total == 0 {
            BAR_WIDTH
        } else {
            (self.shown() as f64 / self.total as f64 * BAR_WIDTH as f64) as usize
        }
    }
}

/// Receiver of progress events.
pub trait ProgressSink {
    fn update(&mut self, update: Update);

    /// Called before a diagnostic is written so in-place output can step aside.
    fn interrupt(&mut self) {}

    /// Final state of the run.
    fn finish(&mut self, update: Update);
}

/// `Creating (Depth 2): [##########----------] 50.0% (55/110)`
pub fn render_line(update: &Update) -> String {
    let filled = update.filled_cells().min(BAR_WIDTH);
    format!(
        "Creating (Depth {}): [{}{}] {:.1}% ({}/{})",
        update.max_depth,
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        update.percentage(),
        update.shown(),
        update.total
    )
}

/// Status line redrawn in place with a carriage return.
pub struct TerminalBar<W: Write> {
    out: W,
    drawn: bool,
}

impl TerminalBar<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalBar<W> {
    pub fn new(out: W) -> Self {
        Self { out, drawn: false }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, update: &Update) {
        if update.max_depth == 0 {
            return;
        }
        let line = render_line(update);
        let _ = write!(self.out, "\r{:<width$}", line, width = LINE_WIDTH);
        let _ = self.out.flush();
        self.drawn = true;
    }

    fn end_line(&mut self) {
        if self.drawn {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
            self.drawn = false;
        }
    }
}

impl<W: Write> ProgressSink for TerminalBar<W> {
    fn update(&mut self, update: Update) {
        self.draw(&update);
    }

    fn interrupt(&mut self) {
        self.end_line();
    }

    fn finish(&mut self, update: Update) {
        self.draw(&update);
        self.end_line();
    }
}

/// Emits `info` events whenever the whole-number percentage advances.
#[derive(Default)]
pub struct LogSink {
    last_percent: Option<u64>,
}

impl ProgressSink for LogSink {
    fn update(&mut self, update: Update) {
        if update.max_depth == 0 {
            return;
        }
        let percent = update.percentage() as u64;
        if self.last_percent == Some(percent) {
            return;
        }
        self.last_percent = Some(percent);
        info!(
            created = update.shown(),
            total = update.total,
            level = update.level,
            "{percent}% of directories ensured"
        );
    }

    fn finish(&mut self, update: Update) {
        if update.max_depth == 0 {
            return;
        }
        info!(
            created = update.shown(),
            total = update.total,
            "finished at {:.1}%",
            update.percentage()
        );
    }
}

pub struct NullSink;

impl ProgressSink for NullSink {
    fn update(&mut self, _update: Update) {}

    fn finish(&mut self, _update: Update) {}
}
