//! Multi-session progress tracking with automatic batching for large runs

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::collections::VecDeque;
use std::sync::LazyLock;

/// Coordinates progress display for a run of sessions
///
/// Sessions are played one after another. Each gets its own bar; only the
/// most recent [`MAX_INDIVIDUAL_PROGRESS_BARS`] stay on screen, and larger
/// runs add a batch bar counting finished sessions.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    /// Rolling window of (`session index`, `label`, `bar`), oldest first
    session_bars: VecDeque<(usize, String, ProgressBar)>,
    session_count: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Sessions: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Create a manager that draws nowhere, for tests and quiet runs
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(target),
            batch_bar: None,
            session_bars: VecDeque::with_capacity(MAX_INDIVIDUAL_PROGRESS_BARS),
            session_count: 0,
        }
    }

    /// Announce how many sessions the run will play
    pub fn initialize(&mut self, session_count: usize) {
        self.session_count = session_count;

        if session_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(session_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Number of sessions announced to [`ProgressManager::initialize`]
    pub const fn session_count(&self) -> usize {
        self.session_count
    }

    /// Number of session bars currently on screen
    pub fn visible_bars(&self) -> usize {
        self.session_bars.len()
    }

    /// Whether the batch bar is shown
    pub const fn is_batched(&self) -> bool {
        self.batch_bar.is_some()
    }

    /// Add a bar for a new session, dropping the oldest one when the window is full
    pub fn start_session(&mut self, index: usize, seed: u64, turns: usize) {
        if self.session_bars.len() >= MAX_INDIVIDUAL_PROGRESS_BARS {
            if let Some((_, _, oldest)) = self.session_bars.pop_front() {
                self.multi_progress.remove(&oldest);
            }
        }

        let turns = turns as u64;
        let bar = ProgressBar::new(turns);
        bar.set_style(PROGRESS_STYLE.clone());
        let label = format!("seed {seed}");
        bar.set_prefix(label.clone());
        bar.set_message(Self::turn_counter(0, turns));
        self.session_bars
            .push_back((index, label, self.multi_progress.add(bar)));
    }

    /// Report the current turn of a session
    pub fn update_turn(&self, index: usize, turn: usize) {
        if let Some(bar) = self.bar_for(index) {
            let turn = turn as u64;
            bar.set_position(turn);
            bar.set_message(Self::turn_counter(turn, bar.length().unwrap_or(turn)));
        }
    }

    /// Mark a session as completed and update batch progress
    pub fn complete_session(&self, index: usize, summary: &str) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some((_, label, bar)) = self.session_bars.iter().find(|(i, _, _)| *i == index) {
            bar.set_prefix(format!("✓ {label} {summary}"));
            bar.finish();
        }
    }

    /// Finish the batch bar once every session has been played
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All sessions played");
        }
    }

    fn bar_for(&self, index: usize) -> Option<&ProgressBar> {
        self.session_bars
            .iter()
            .find(|(i, _, _)| *i == index)
            .map(|(_, _, bar)| bar)
    }

    fn turn_counter(turn: u64, turns: u64) -> String {
        let width = turns.to_string().len();
        format!("{turn:>width$}/{turns}")
    }
}
