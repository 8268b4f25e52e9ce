// input.rs - Pointer and key input, reduced to per-frame intents

use egui::{Event, InputState, Key, PointerButton, Pos2};

use crate::config::Config;

/// What a held pointer button paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brush {
    Alive,  // Primary button
    Dead,   // Secondary button
}

impl Brush {
    pub fn is_alive(self) -> bool {
        self == Brush::Alive
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleRun,
    StepOnce,
    Clear,
    Randomize,
    Stamp(usize),  // Index into `conway::PATTERNS`
}

const KEY_BINDINGS: &[(Key, Command)] = &[
    (Key::Space, Command::ToggleRun),
    (Key::N, Command::StepOnce),
    (Key::C, Command::Clear),
    (Key::R, Command::Randomize),
    (Key::Num1, Command::Stamp(0)),
    (Key::Num2, Command::Stamp(1)),
    (Key::Num3, Command::Stamp(2)),
    (Key::Num4, Command::Stamp(3)),
    (Key::Num5, Command::Stamp(4)),
    (Key::Num6, Command::Stamp(5)),
];

/// Everything polled during one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer position relative to the viewport's top-left, in pixels.
    pub pointer: Option<(f32, f32)>,
    pub brush: Option<Brush>,
    pub commands: Vec<Command>,
    /// Seconds on the input clock when the frame was polled.
    pub time: f64,
}

impl FrameInput {
    /// Snapshot egui's input for a viewport drawn with its top-left at `origin`.
    pub fn collect(input: &InputState, origin: Pos2) -> Self {
        let relative = |pos: Pos2| (pos.x - origin.x, pos.y - origin.y);
        let mut pointer = input.pointer.hover_pos().map(relative);

        let mut brush = if input.pointer.primary_down() {
            Some(Brush::Alive)
        } else if input.pointer.secondary_down() {
            Some(Brush::Dead)
        } else {
            None
        };

        // A press released within the same frame leaves no button down, but
        // still paints the cell it landed on.
        if brush.is_none() {
            if let Some((pressed, pos)) = first_press(&input.events) {
                brush = Some(pressed);
                pointer = Some(relative(pos));
            }
        }

        let commands = KEY_BINDINGS
            .iter()
            .filter(|(key, _)| input.key_pressed(*key))
            .map(|&(_, command)| command)
            .collect();

        Self { pointer, brush, commands, time: input.time }
    }
}

fn first_press(events: &[Event]) -> Option<(Brush, Pos2)> {
    events.iter().find_map(|event| match event {
        Event::PointerButton { pos, button, pressed: true, .. } => match button {
            PointerButton::Primary => Some((Brush::Alive, *pos)),
            PointerButton::Secondary => Some((Brush::Dead, *pos)),
            _ => None,
        },
        _ => None,
    })
}

/// Maps viewport pixels to grid cells.
#[derive(Debug, Clone, Copy)]
pub struct PointerMap {
    cell_size: f32,
    width: f32,
    height: f32,
    cols: usize,
    rows: usize,
}

impl PointerMap {
    pub fn new(config: &Config) -> Self {
        let (cols, rows) = config.grid_dims();
        Self {
            cell_size: config.cell_size as f32,
            width: config.width as f32,
            height: config.height as f32,
            cols,
            rows,
        }
    }

    /// Cell under `(x, y)`. `None` outside the viewport; inside it, the
    /// remainder margin clamps onto the last column or row.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if !(0.0..self.width).contains(&x) || !(0.0..self.height).contains(&y) {
            return None;
        }
        let col = ((x / self.cell_size) as usize).min(self.cols - 1);
        let row = ((y / self.cell_size) as usize).min(self.rows - 1);
        Some((col, row))
    }
}

/// Cells on the line from `from` to `to`, both ends included (Bresenham).
pub fn cells_between(from: (usize, usize), to: (usize, usize)) -> Vec<(usize, usize)> {
    let (mut x, mut y) = (from.0 as isize, from.1 as isize);
    let (x1, y1) = (to.0 as isize, to.1 as isize);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut out = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    loop {
        out.push((x as usize, y as usize));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    out
}
