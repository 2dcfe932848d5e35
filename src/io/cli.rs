//! Command-line interface for headless play sessions with an automatic player

use crate::algorithm::engine::{Engine, EngineConfig};
use crate::io::analysis::SessionStats;
use crate::io::configuration::{
    DEFAULT_COLORS, DEFAULT_COLUMNS, DEFAULT_MIN_GROUP_SIZE, DEFAULT_PALETTE, DEFAULT_ROWS,
    DEFAULT_SEED, DEFAULT_SESSIONS, DEFAULT_SHUFFLE_ATTEMPTS, DEFAULT_TURNS, OUTPUT_PREFIX,
    PLAYER_SEED_SALT, PNG_CELL_SIZE,
};
use crate::io::error::Result;
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressManager;
use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(name = "blastgrid")]
#[command(
    author,
    version,
    about = "Play seeded tile-blast sessions with an automatic player"
)]
/// Command-line arguments for the session runner
pub struct Cli {
    /// Board rows
    #[arg(short, long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Board columns
    #[arg(short, long, default_value_t = DEFAULT_COLUMNS)]
    pub columns: usize,

    /// Number of tile colors in play
    #[arg(short = 'k', long, default_value_t = DEFAULT_COLORS)]
    pub colors: usize,

    /// Smallest region a selection may clear
    #[arg(short, long, default_value_t = DEFAULT_MIN_GROUP_SIZE)]
    pub min_group: usize,

    /// Redistribution attempts before a shuffle gives up
    #[arg(short = 'a', long, default_value_t = DEFAULT_SHUFFLE_ATTEMPTS)]
    pub shuffle_attempts: usize,

    /// Random seed of the first session
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Selections per session
    #[arg(short, long, default_value_t = DEFAULT_TURNS)]
    pub turns: usize,

    /// Number of sessions; session `i` uses seed `seed + i`
    #[arg(short = 'n', long, default_value_t = DEFAULT_SESSIONS)]
    pub sessions: usize,

    /// Directory receiving a PNG of each final board
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Engine configuration for the session using `seed`
    pub const fn engine_config(&self, seed: u64) -> EngineConfig {
        EngineConfig {
            rows: self.rows,
            columns: self.columns,
            color_count: self.colors,
            min_group_size: self.min_group,
            max_shuffle_attempts: self.shuffle_attempts,
            seed,
            hold_until_released: false,
        }
    }

    /// Seed of the session at `index`
    pub const fn session_seed(&self, index: usize) -> u64 {
        self.seed.wrapping_add(index as u64)
    }
}

/// Outcome of one played session
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// Seed the session was played with
    pub seed: u64,
    /// Selections attempted
    pub turns_played: usize,
    /// Aggregated engine events
    pub stats: SessionStats,
    /// Whether the session ended on a board with no legal move
    pub stuck: bool,
    /// Exported board image, if requested
    pub image_path: Option<PathBuf>,
}

/// Plays sessions according to CLI arguments with progress tracking
pub struct SessionRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl SessionRunner {
    /// Create a new session runner with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Play every requested session
    ///
    /// # Errors
    ///
    /// Returns an error if the board configuration is invalid or a board
    /// image cannot be written
    pub fn run(&mut self) -> Result<Vec<SessionReport>> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.sessions);
        }

        let mut reports = Vec::with_capacity(self.cli.sessions);
        for index in 0..self.cli.sessions {
            reports.push(self.run_session(index)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(reports)
    }

    /// Play a single session
    ///
    /// Each turn the automatic player picks uniformly among the regions that
    /// can be cleared. The session ends early when the board is stuck.
    ///
    /// # Errors
    ///
    /// Returns an error if the board configuration is invalid or the board
    /// image cannot be written
    pub fn run_session(&mut self, index: usize) -> Result<SessionReport> {
        let seed = self.cli.session_seed(index);
        let mut engine = Engine::with_pooled_factory(self.cli.engine_config(seed))?;

        let stats = Rc::new(RefCell::new(SessionStats::new()));
        let recorder = Rc::clone(&stats);
        engine.subscribe(move |event| recorder.borrow_mut().record(event));
        engine.initialize()?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_session(index, seed, self.cli.turns);
        }

        let mut player = StdRng::seed_from_u64(seed ^ PLAYER_SEED_SALT);
        let mut turns_played = 0;

        while turns_played < self.cli.turns && !engine.is_stuck() {
            let candidates = engine.playable_cells();
            if candidates.is_empty() {
                break;
            }

            let pick = player.random_range(0..candidates.len());
            let Some(target) = candidates.get(pick).copied() else {
                break;
            };

            let accepted = engine.try_select(target.row, target.col)?;
            stats.borrow_mut().record_selection(accepted);
            turns_played += 1;

            if let Some(ref pm) = self.progress_manager {
                pm.update_turn(index, turns_played);
            }
        }

        let image_path = match &self.cli.output {
            Some(dir) => {
                let path = dir.join(format!("{OUTPUT_PREFIX}{seed}.png"));
                export_grid_as_png(engine.grid(), &DEFAULT_PALETTE, PNG_CELL_SIZE, &path)?;
                Some(path)
            }
            None => None,
        };

        let stats = *stats.borrow();
        if let Some(ref pm) = self.progress_manager {
            pm.complete_session(index, &stats.to_string());
        }

        Ok(SessionReport {
            seed,
            turns_played,
            stats,
            stuck: engine.is_stuck() || engine.playable_cells().is_empty(),
            image_path,
        })
    }
}
