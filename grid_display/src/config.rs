// config.rs - Viewport, palette and pacing, fixed at startup

use std::time::Duration;

use anyhow::{Result, ensure};
use egui::Color32;
use log::warn;

pub const CELL_SIZE: u32 = 20;
pub const SCREEN_WIDTH: u32 = 1280;
pub const SCREEN_HEIGHT: u32 = 720;
pub const FRAME_DELAY_MS: u64 = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub alive: Color32,
    pub dead: Color32,
    pub grid_line: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            alive: Color32::from_rgb(0xFF, 0xFF, 0xFF),
            dead: Color32::from_rgb(0x00, 0x00, 0x00),
            grid_line: Color32::from_rgb(0x44, 0x44, 0x45),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub cell_size: u32,
    pub width: u32,   // Viewport width in pixels
    pub height: u32,  // Viewport height in pixels
    pub frame_delay: Duration,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            frame_delay: Duration::from_millis(FRAME_DELAY_MS),
            palette: Palette::default(),
        }
    }
}

impl Config {
    /// Defaults, overridden by `LIFE_CELL_SIZE`, `LIFE_WIDTH`, `LIFE_HEIGHT`
    /// and `LIFE_FRAME_MS` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        override_from(&lookup, "LIFE_CELL_SIZE", &mut config.cell_size);
        override_from(&lookup, "LIFE_WIDTH", &mut config.width);
        override_from(&lookup, "LIFE_HEIGHT", &mut config.height);

        let mut frame_ms = FRAME_DELAY_MS;
        override_from(&lookup, "LIFE_FRAME_MS", &mut frame_ms);
        config.frame_delay = Duration::from_millis(frame_ms);
        config
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size > 0, "cell size must be non-zero");
        ensure!(
            self.width >= self.cell_size && self.height >= self.cell_size,
            "viewport {}x{} cannot hold a single {}px cell",
            self.width,
            self.height,
            self.cell_size,
        );
        Ok(())
    }

    /// `(cols, rows)`; any remainder narrower than a cell is margin.
    pub fn grid_dims(&self) -> (usize, usize) {
        (
            (self.width / self.cell_size) as usize,
            (self.height / self.cell_size) as usize,
        )
    }
}

fn override_from<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    slot: &mut T,
) {
    let Some(raw) = lookup(key) else { return };
    match raw.trim().parse() {
        Ok(value) => *slot = value,
        Err(_) => warn!("{key}={raw:?} is not a valid number, keeping the default"),
    }
}
