//! The terminal user interface.

use crate::{
    args::Args,
    cli::{rng, write_result},
};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Print, PrintStyledContent, Stylize},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rlifesim_lib::{Coord, LineEnding, Pattern, Simulation};
use std::{
    error::Error,
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    time::{Duration, Instant},
};

/// How long to wait for a key when paused before redrawing.
const IDLE: Duration = Duration::from_secs(1);

/// Bounds of the generation length reachable with `+` and `-`, in milliseconds.
const MIN_GEN_LENGTH: u64 = 10;
const MAX_GEN_LENGTH: u64 = 5000;

/// Where to save when neither an output nor an input file is given.
const DEFAULT_SAVE_PATH: &str = "life.cells";

const HELP: &str = "[space] run/pause  [n] next  [arrows] move  [enter] toggle  \
                    [c] clear  [r] random  [t] torus  [R] resize  [+/-] speed  \
                    [g] neighbors  [d] grid  [a] cells alive  [o] open  [s] save  [q] quit";

/// Switches the terminal to raw mode and the alternate screen,
/// and switches back when dropped.
struct RawTerminal;

impl RawTerminal {
    fn enter<W: Write>(out: &mut W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = RawTerminal;
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(guard)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

struct LifeWindow {
    sim: Simulation,
    comments: Vec<String>,
    rng: StdRng,
    running: bool,
    generation_length: u64,
    draw_grid: bool,
    show_neighbors: bool,
    show_cells_alive: bool,

    /// The selected cell.
    cursor: Coord,
    /// The cell at the top left corner of the screen.
    offset: Coord,
    /// Size of the terminal.
    size: (u16, u16),

    input: Option<PathBuf>,
    save_path: PathBuf,
    line_ending: LineEnding,
    message: Option<String>,
}

impl LifeWindow {
    fn new(args: &Args, sim: Simulation, comments: Vec<String>) -> io::Result<Self> {
        let config = &args.config;
        let save_path = args
            .output
            .clone()
            .or_else(|| args.input.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_PATH));
        Ok(LifeWindow {
            sim,
            comments,
            rng: rng(config.seed),
            running: false,
            generation_length: config.generation_length,
            draw_grid: config.draw_grid,
            show_neighbors: config.show_neighbors,
            show_cells_alive: config.show_cells_alive,
            cursor: (0, 0),
            offset: (0, 0),
            size: terminal::size()?,
            input: args.input.clone(),
            save_path,
            line_ending: args.line_ending,
            message: None,
        })
    }

    /// Number of columns and rows available for the cells.
    fn view_size(&self) -> (i32, i32) {
        let (cols, rows) = self.size;
        (i32::from(cols).max(1), (i32::from(rows) - 2).max(1))
    }

    /// Keeps the cursor inside the grid and the view.
    fn scroll(&mut self) {
        let (width, height) = self.sim.dims();
        let (view_w, view_h) = self.view_size();
        let fit = |cursor: i32, offset: i32, len: i32, view: i32| {
            let cursor = cursor.clamp(0, len - 1);
            let offset = offset
                .min(cursor)
                .max(cursor - view + 1)
                .min((len - view).max(0));
            (cursor, offset)
        };
        let (cx, ox) = fit(self.cursor.0, self.offset.0, width, view_w);
        let (cy, oy) = fit(self.cursor.1, self.offset.1, height, view_h);
        self.cursor = (cx, cy);
        self.offset = (ox, oy);
    }

    fn cell_char(&self, x: i32, y: i32) -> char {
        if matches!(self.sim.grid().get(x, y), Ok(true)) {
            return 'O';
        }
        if self.show_neighbors {
            match self.sim.neighbor_count(x, y) {
                Ok(n) if n > 0 => return char::from(b'0' + n),
                _ => (),
            }
        }
        if self.draw_grid {
            '.'
        } else {
            ' '
        }
    }

    fn draw<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.scroll();
        let (cols, rows) = self.size;
        let (view_w, view_h) = self.view_size();
        let (width, height) = self.sim.dims();
        let (ox, oy) = self.offset;

        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

        let mut top = format!("Gen: {}", self.sim.generation());
        if self.show_cells_alive {
            top += &format!("  Cells: {}", self.sim.alive_count());
        }
        top += &format!(
            "  {}x{} {}  {} ms  {}",
            width,
            height,
            self.sim.policy(),
            self.generation_length,
            if self.running { "Running" } else { "Paused" }
        );
        queue!(out, PrintStyledContent(pad(&top, cols).reverse()))?;

        for vy in 0..view_h.min(height - oy) {
            let y = oy + vy;
            let row: String = (ox..(ox + view_w).min(width))
                .map(|x| self.cell_char(x, y))
                .collect();
            queue!(out, MoveTo(0, (vy + 1) as u16), Print(row))?;
        }

        let (cx, cy) = self.cursor;
        queue!(
            out,
            MoveTo((cx - ox) as u16, (cy - oy + 1) as u16),
            PrintStyledContent(self.cell_char(cx, cy).reverse()),
        )?;

        let bottom = self.message.as_deref().unwrap_or(HELP);
        queue!(
            out,
            MoveTo(0, rows.saturating_sub(1)),
            PrintStyledContent(pad(bottom, cols).reverse())
        )?;
        out.flush()
    }

    fn save(&mut self) {
        let pattern = Pattern {
            comments: self.comments.clone(),
            grid: self.sim.grid().clone(),
        };
        let result = File::create(&self.save_path)
            .map_err(Into::into)
            .and_then(|file| pattern.write(BufWriter::new(file), self.line_ending));
        self.message = Some(match result {
            Ok(()) => format!("Saved to {}", self.save_path.display()),
            Err(e) => format!("Unable to save {}: {}", self.save_path.display(), e),
        });
    }

    fn open(&mut self) {
        let path = match &self.input {
            Some(path) => path.clone(),
            None => {
                self.message = Some(String::from("No pattern file was given."));
                return;
            }
        };
        let result = File::open(&path)
            .map_err(Into::into)
            .and_then(|file| self.sim.load(file));
        self.message = Some(match result {
            Ok(pattern) => {
                self.comments = pattern.comments;
                self.running = false;
                format!("Opened {}", path.display())
            }
            Err(e) => format!("Unable to open {}: {}", path.display(), e),
        });
    }

    /// Handles a key press. Returns `true` to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        self.message = None;
        let (cx, cy) = self.cursor;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char(' ') => self.running = !self.running,
            KeyCode::Char('n') => {
                self.running = false;
                self.sim.step();
            }
            KeyCode::Char('c') => {
                self.running = false;
                self.sim.clear();
            }
            KeyCode::Char('r') => self.sim.randomize(&mut self.rng),
            KeyCode::Char('t') => self.sim.set_policy(self.sim.policy().toggled()),
            KeyCode::Char('R') => {
                let (view_w, view_h) = self.view_size();
                if let Err(e) = self.sim.resize(view_w, view_h) {
                    self.message = Some(e.to_string());
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.generation_length = faster(self.generation_length);
            }
            KeyCode::Char('-') => {
                self.generation_length = slower(self.generation_length);
            }
            KeyCode::Char('g') => self.show_neighbors = !self.show_neighbors,
            KeyCode::Char('d') => self.draw_grid = !self.draw_grid,
            KeyCode::Char('a') => self.show_cells_alive = !self.show_cells_alive,
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('o') => self.open(),
            KeyCode::Enter | KeyCode::Char('x') => {
                if let Err(e) = self.sim.toggle(cx, cy) {
                    self.message = Some(e.to_string());
                }
            }
            KeyCode::Left => self.cursor = (cx - 1, cy),
            KeyCode::Right => self.cursor = (cx + 1, cy),
            KeyCode::Up => self.cursor = (cx, cy - 1),
            KeyCode::Down => self.cursor = (cx, cy + 1),
            _ => (),
        }
        false
    }
}

fn faster(generation_length: u64) -> u64 {
    (generation_length / 2).max(MIN_GEN_LENGTH)
}

fn slower(generation_length: u64) -> u64 {
    generation_length
        .saturating_mul(2)
        .clamp(MIN_GEN_LENGTH, MAX_GEN_LENGTH)
}

/// Cuts or pads a line to the width of the terminal.
fn pad(s: &str, cols: u16) -> String {
    format!("{:<1$.1$}", s, cols as usize)
}

pub(crate) fn run_with_tui(
    args: &Args,
    sim: Simulation,
    comments: Vec<String>,
) -> Result<(), Box<dyn Error>> {
    let mut out = io::stdout();
    let mut win = LifeWindow::new(args, sim, comments)?;
    {
        let _terminal = RawTerminal::enter(&mut out)?;
        let mut last_step = Instant::now();
        loop {
            win.draw(&mut out)?;
            let generation_length = Duration::from_millis(win.generation_length);
            let timeout = if win.running {
                generation_length.saturating_sub(last_step.elapsed())
            } else {
                IDLE
            };
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if win.handle_key(key.code) {
                            break;
                        }
                    }
                    Event::Resize(cols, rows) => win.size = (cols, rows),
                    _ => (),
                }
            }
            if win.running && last_step.elapsed() >= generation_length {
                win.sim.step();
                last_step = Instant::now();
            }
        }
    }
    write_result(args, &win.sim, win.comments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_to_width() {
        assert_eq!(pad("Gen: 3", 8), "Gen: 3  ");
        assert_eq!(pad("Paused", 3), "Pau");
    }

    #[test]
    fn speed_bounds() {
        assert_eq!(slower(100), 200);
        assert_eq!(slower(u64::MAX), MAX_GEN_LENGTH);
        assert_eq!(slower(0), MIN_GEN_LENGTH);
        assert_eq!(faster(100), 50);
        assert_eq!(faster(u64::MAX), u64::MAX / 2);
        assert_eq!(faster(15), MIN_GEN_LENGTH);
    }

    #[test]
    fn help_lists_every_binding() {
        for key in ["[R]", "[g]", "[d]", "[a]", "[o]", "[s]", "[t]"] {
            assert!(HELP.contains(key), "{} is missing", key);
        }
    }
}
