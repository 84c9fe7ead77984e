//! The interactive edit/run loop.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use gridfind_core::{Category, Grid, Point};
use gridfind_search::{Search, Status};

use crate::render::Screen;

const HELP: &str = "click: start/end/walls | right-click: erase | space: search | r: random walls | c: clear | q: quit";

/// Delay between visualized search steps.
const STEP_DELAY: Duration = Duration::from_millis(15);

/// Input poll interval while idle.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

pub struct App {
    grid: Grid,
    status: String,
}

enum Outcome {
    Continue,
    Quit,
}

impl App {
    pub fn new(rows: i32) -> Self {
        Self {
            grid: Grid::new(rows),
            status: HELP.to_string(),
        }
    }

    /// Run the interactive loop until the user quits.
    pub fn run(&mut self, screen: &mut Screen) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            screen.draw(&self.grid, &self.status)?;
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            match event::read()? {
                Event::Key(KeyEvent { code, .. }) => match code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') => {
                        self.grid.clear();
                        self.status = HELP.to_string();
                    }
                    KeyCode::Char('r') => self.scatter_obstacles(),
                    KeyCode::Char(' ') => {
                        if let Outcome::Quit = self.search(screen)? {
                            return Ok(());
                        }
                    }
                    _ => {}
                },
                Event::Mouse(me) => self.handle_mouse(me),
                _ => {}
            }
        }
    }

    fn handle_mouse(&mut self, me: MouseEvent) {
        let Some(p) = Screen::cell_at(&self.grid, me.column, me.row) else {
            return;
        };
        match me.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                self.place(p);
            }
            MouseEventKind::Down(MouseButton::Right) | MouseEventKind::Drag(MouseButton::Right) => {
                self.grid.set_category(p, Category::Empty);
            }
            _ => {}
        }
    }

    /// First click places the start, the second the end, the rest walls
    /// (the grid itself refuses walls over the markers).
    fn place(&mut self, p: Point) {
        if self.grid.start().is_none() && self.grid.end_pos() != Some(p) {
            self.grid.set_category(p, Category::Start);
        } else if self.grid.end_pos().is_none() && self.grid.start() != Some(p) {
            self.grid.set_category(p, Category::End);
        } else {
            self.grid.set_category(p, Category::Obstacle);
        }
    }

    /// Scatter random walls over empty cells (about one in four).
    fn scatter_obstacles(&mut self) {
        use rand::RngExt;
        let mut rng = rand::rng();
        let pts: Vec<Point> = self.grid.points().collect();
        for p in pts {
            if self.grid.category(p) == Some(Category::Empty) && rng.random_range(0..4) == 0 {
                self.grid.set_category(p, Category::Obstacle);
            }
        }
    }

    /// Run the search stepwise, redrawing after every expansion and
    /// polling input between steps so the run can be cancelled.
    fn search(&mut self, screen: &mut Screen) -> Result<Outcome, Box<dyn std::error::Error>> {
        if self.grid.start().is_none() || self.grid.end_pos().is_none() {
            self.status = "place a start and an end cell first".to_string();
            return Ok(Outcome::Continue);
        }
        self.grid.clear_search();
        self.grid.recompute_adjacency();
        let mut search = match Search::begin_marked(&self.grid) {
            Ok(s) => s,
            Err(e) => {
                self.status = e.to_string();
                return Ok(Outcome::Continue);
            }
        };

        let started = Instant::now();
        self.status = "searching... (q cancels)".to_string();
        let status = loop {
            let status = search.step(&mut self.grid);
            screen.draw(&self.grid, &self.status)?;
            if status != Status::InProgress {
                break status;
            }
            // Cooperative cancellation: pump input between steps.
            while event::poll(Duration::ZERO)? {
                if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                    match code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            log::info!("search cancelled after {} steps", search.steps());
                            return Ok(Outcome::Quit);
                        }
                        _ => {}
                    }
                }
            }
            std::thread::sleep(STEP_DELAY);
        };

        let elapsed = started.elapsed();
        self.status = match status {
            Status::Succeeded => {
                let len = search.path().map_or(0, <[Point]>::len);
                log::info!("path of length {len} found in {elapsed:.2?}");
                format!("done in {elapsed:.2?}: path length {len}")
            }
            Status::Failed => {
                log::info!("no path found after {} steps", search.steps());
                format!("no path found ({elapsed:.2?})")
            }
            Status::InProgress => unreachable!(),
        };
        Ok(Outcome::Continue)
    }
}
