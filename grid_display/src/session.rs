// session.rs - Frame-by-frame controller: edits, run state and stepping

use std::fmt;

use conway::{Grid, PATTERNS, randomize, stamp};
use log::{info, warn};

use crate::config::Config;
use crate::input::{Command, FrameInput, PointerMap, cells_between};

/// Owns the grid plus the state that must outlive a single frame.
pub struct Session {
    grid: Grid,
    running: bool,
    pointer_map: PointerMap,
    last_painted: Option<(usize, usize)>,  // Previous cell of the current drag
    hovered: Option<(usize, usize)>,
    seed: u64,
    frame_delay: f64,        // Seconds between generations while running
    last_step: Option<f64>,  // Input time of the last paced step
}

/// Snapshot for the diagnostics overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub generation: u64,
    pub population: usize,
    pub running: bool,
    pub hovered: Option<(usize, usize, u8)>,  // (col, row, live neighbors)
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.running { "running" } else { "paused" };
        write!(f, "Generation {} | Live {} | {state}", self.generation, self.population)?;
        if let Some((col, row, n)) = self.hovered {
            write!(f, " | ({col}, {row}): {n} neighbors")?;
        }
        Ok(())
    }
}

impl Session {
    /// A paused session over an all-dead grid sized from `config`.
    /// `seed` drives the random fill command.
    pub fn new(config: &Config, seed: u64) -> Self {
        let (cols, rows) = config.grid_dims();
        Self {
            grid: Grid::new(cols, rows),
            running: false,
            pointer_map: PointerMap::new(config),
            last_painted: None,
            hovered: None,
            seed,
            frame_delay: config.frame_delay.as_secs_f64(),
            last_step: None,
        }
    }

    pub fn grid(&self) -> &Grid { &self.grid }

    /// Apply one frame of input, then step once if running and at least
    /// one frame delay has passed since the last step. eframe also calls
    /// into here for every input event, which must not speed up the run.
    /// Returns whether any cell may have changed.
    pub fn advance(&mut self, input: &FrameInput) -> bool {
        let mut dirty = false;

        for &command in &input.commands {
            dirty |= self.apply(command);
        }

        self.hovered = input
            .pointer
            .and_then(|(x, y)| self.pointer_map.cell_at(x, y));
        dirty |= self.paint(input);

        if self.running && self.step_due(input.time) {
            self.grid.step();
            self.last_step = Some(input.time);
            dirty = true;
        }
        dirty
    }

    fn step_due(&self, now: f64) -> bool {
        self.last_step.is_none_or(|last| now - last >= self.frame_delay)
    }

    fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::ToggleRun => {
                self.running = !self.running;
                self.last_step = None;
                info!(
                    "{} at generation {}",
                    if self.running { "running" } else { "paused" },
                    self.grid.generation(),
                );
                false
            }
            Command::StepOnce if !self.running => {
                self.grid.step();
                true
            }
            Command::StepOnce => false,
            Command::Clear => {
                self.grid.clear();
                info!("grid cleared at generation {}", self.grid.generation());
                true
            }
            Command::Randomize => {
                self.seed = self.seed.wrapping_add(1);
                randomize(&mut self.grid, self.seed);
                true
            }
            Command::Stamp(index) => match PATTERNS.get(index) {
                Some(pattern) => {
                    stamp(&mut self.grid, pattern);
                    true
                }
                None => {
                    warn!("no preset #{index}");
                    false
                }
            },
        }
    }

    /// Paint along the drag path while a button is held over the grid.
    fn paint(&mut self, input: &FrameInput) -> bool {
        let (Some(brush), Some(cell)) = (input.brush, self.hovered) else {
            self.last_painted = None;
            return false;
        };

        let from = self.last_painted.unwrap_or(cell);
        for (col, row) in cells_between(from, cell) {
            self.grid.set_alive(col, row, brush.is_alive());
        }
        self.last_painted = Some(cell);
        true
    }

    pub fn status(&self) -> Status {
        Status {
            generation: self.grid.generation(),
            population: self.grid.population(),
            running: self.running,
            hovered: self
                .hovered
                .map(|(col, row)| (col, row, self.grid.alive_neighbors(col, row))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Brush;

    // 10x10 cells of 10px.
    fn session() -> Session {
        let config = Config { cell_size: 10, width: 100, height: 100, ..Config::default() };
        Session::new(&config, 0)
    }

    fn press(brush: Brush, x: f32, y: f32) -> FrameInput {
        FrameInput { pointer: Some((x, y)), brush: Some(brush), ..FrameInput::default() }
    }

    fn keys(commands: &[Command]) -> FrameInput {
        FrameInput { commands: commands.to_vec(), ..FrameInput::default() }
    }

    // Default config paces at 16 ms; frames here are 20 ms apart.
    fn at(frame: u32, input: FrameInput) -> FrameInput {
        FrameInput { time: f64::from(frame) * 0.020, ..input }
    }

    #[test]
    fn starts_paused_and_empty() {
        let mut s = session();
        assert!(!s.status().running);
        assert!(!s.advance(&FrameInput::default()));
        assert_eq!(s.grid().generation(), 0);
    }

    #[test]
    fn primary_paints_alive_secondary_paints_dead() {
        let mut s = session();
        s.advance(&press(Brush::Alive, 35.0, 47.0));
        assert!(s.grid().get(3, 4));

        s.advance(&FrameInput::default());
        s.advance(&press(Brush::Dead, 31.0, 41.0));
        assert!(!s.grid().get(3, 4));
        assert_eq!(s.grid().generation(), 0);
    }

    #[test]
    fn drag_fills_gaps_between_samples() {
        let mut s = session();
        s.advance(&press(Brush::Alive, 5.0, 5.0));
        s.advance(&press(Brush::Alive, 75.0, 5.0));
        for col in 0..=7 {
            assert!(s.grid().get(col, 0), "col {col}");
        }
        assert_eq!(s.grid().population(), 8);
    }

    #[test]
    fn releasing_starts_a_new_stroke() {
        let mut s = session();
        s.advance(&press(Brush::Alive, 5.0, 5.0));
        s.advance(&FrameInput { pointer: Some((50.0, 5.0)), ..FrameInput::default() });
        s.advance(&press(Brush::Alive, 95.0, 5.0));
        assert_eq!(s.grid().population(), 2);
    }

    #[test]
    fn pointer_outside_viewport_paints_nothing() {
        let mut s = session();
        assert!(!s.advance(&press(Brush::Alive, -3.0, 5.0)));
        assert!(!s.advance(&press(Brush::Alive, 5.0, 100.0)));
        assert_eq!(s.grid().population(), 0);
    }

    #[test_log::test]
    fn running_flag_persists_across_frames() {
        let mut s = session();
        s.advance(&at(0, keys(&[Command::ToggleRun])));
        assert!(s.status().running);
        assert_eq!(s.grid().generation(), 1);

        for frame in 1..=3 {
            s.advance(&at(frame, FrameInput::default()));
        }
        assert!(s.status().running);
        assert_eq!(s.grid().generation(), 4);

        s.advance(&at(4, keys(&[Command::ToggleRun])));
        s.advance(&at(5, FrameInput::default()));
        assert!(!s.status().running);
        assert_eq!(s.grid().generation(), 4);
    }

    #[test]
    fn single_step_only_while_paused() {
        let mut s = session();
        s.advance(&keys(&[Command::StepOnce]));
        assert_eq!(s.grid().generation(), 1);

        s.advance(&at(1, keys(&[Command::ToggleRun])));
        s.advance(&at(2, keys(&[Command::StepOnce])));
        assert_eq!(s.grid().generation(), 3);  // Two running frames, no extra step
    }

    #[test]
    fn edits_apply_before_the_step() {
        let mut s = session();
        s.advance(&at(0, keys(&[Command::ToggleRun])));
        // A lone cell painted on a running frame is already gone after it.
        s.advance(&at(1, press(Brush::Alive, 55.0, 55.0)));
        assert_eq!(s.grid().population(), 0);
    }

    #[test_log::test]
    fn clear_and_presets_keep_generation() {
        let mut s = session();
        s.advance(&keys(&[Command::StepOnce, Command::Stamp(1)]));
        assert_eq!(s.grid().population(), 3);
        assert_eq!(s.grid().generation(), 1);

        s.advance(&keys(&[Command::Randomize]));
        s.advance(&keys(&[Command::Clear]));
        assert_eq!(s.grid().population(), 0);
        assert_eq!(s.grid().generation(), 1);

        assert!(!s.advance(&keys(&[Command::Stamp(99)])));
    }

    #[test]
    fn status_reports_hovered_neighbors() {
        let mut s = session();
        s.advance(&keys(&[Command::Stamp(1)]));  // Blinker across row 4, cols 3..=5
        s.advance(&FrameInput { pointer: Some((45.0, 35.0)), ..FrameInput::default() });

        let status = s.status();
        assert_eq!(status.hovered, Some((4, 3, 3)));
        assert_eq!(status.population, 3);
        assert_eq!(
            status.to_string(),
            "Generation 0 | Live 3 | paused | (4, 3): 3 neighbors",
        );
    }

    #[test]
    fn events_inside_one_frame_delay_do_not_step() {
        let mut s = session();
        s.advance(&keys(&[Command::ToggleRun]));
        assert_eq!(s.grid().generation(), 1);

        // Pointer motion repaints well inside the 16 ms delay.
        for ms in [2.0, 7.0, 15.0] {
            s.advance(&FrameInput { pointer: Some((5.0, 5.0)), time: ms / 1000.0, ..FrameInput::default() });
        }
        assert_eq!(s.grid().generation(), 1);

        s.advance(&FrameInput { time: 0.017, ..FrameInput::default() });
        assert_eq!(s.grid().generation(), 2);
        s.advance(&FrameInput { time: 0.020, ..FrameInput::default() });
        assert_eq!(s.grid().generation(), 2);
    }

    #[test]
    fn resuming_steps_immediately() {
        let mut s = session();
        s.advance(&at(0, keys(&[Command::ToggleRun])));
        s.advance(&FrameInput { time: 0.001, commands: vec![Command::ToggleRun], ..FrameInput::default() });
        s.advance(&FrameInput { time: 0.002, commands: vec![Command::ToggleRun], ..FrameInput::default() });
        assert_eq!(s.grid().generation(), 2);
    }
}
