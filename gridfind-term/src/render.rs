//! Terminal rendering: maps cell categories to colors and draws the board.

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{self, Clear, ClearType},
};

use gridfind_core::{Category, Grid, Point};

/// Each board cell is drawn as two terminal columns so it looks square.
pub const CELL_WIDTH: i32 = 2;

/// Background color for a cell category.
fn palette(cat: Category) -> Color {
    match cat {
        Category::Empty => Color::Rgb {
            r: 235,
            g: 235,
            b: 235,
        },
        Category::Start => Color::Rgb {
            r: 255,
            g: 165,
            b: 0,
        },
        Category::End => Color::Rgb {
            r: 64,
            g: 224,
            b: 208,
        },
        Category::Obstacle => Color::Rgb {
            r: 31,
            g: 32,
            b: 34,
        },
        Category::Frontier => Color::Rgb {
            r: 0,
            g: 168,
            b: 107,
        },
        Category::Visited => Color::Rgb {
            r: 219,
            g: 62,
            b: 121,
        },
        Category::Path => Color::Rgb {
            r: 255,
            g: 233,
            b: 0,
        },
    }
}

/// Terminal screen handle: raw mode + alternate screen for the lifetime of
/// the value, restored on [`Screen::close`].
pub struct Screen {
    out: io::Stdout,
}

impl Screen {
    /// Take over the terminal.
    pub fn init() -> Result<Self, Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture,
            Clear(ClearType::All)
        )?;
        Ok(Self { out })
    }

    /// Restore the terminal. Errors are ignored: this runs on every exit
    /// path, including after a failure.
    pub fn close(&mut self) {
        let _ = execute!(
            self.out,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }

    /// Draw the whole board plus a status line underneath.
    pub fn draw(&mut self, grid: &Grid, status: &str) -> Result<(), Box<dyn std::error::Error>> {
        for p in grid.points() {
            let cat = grid.category(p).unwrap_or(Category::Empty);
            queue!(
                self.out,
                cursor::MoveTo((p.x * CELL_WIDTH) as u16, p.y as u16),
                SetBackgroundColor(palette(cat)),
                Print("  "),
            )?;
        }
        queue!(
            self.out,
            ResetColor,
            cursor::MoveTo(0, grid.rows() as u16 + 1),
            Clear(ClearType::CurrentLine),
            Print(status),
        )?;
        self.out.flush()?;
        Ok(())
    }

    /// Map a terminal mouse position to a board cell, if it is on the board.
    pub fn cell_at(grid: &Grid, column: u16, row: u16) -> Option<Point> {
        let p = Point::new(column as i32 / CELL_WIDTH, row as i32);
        grid.contains(p).then_some(p)
    }
}
