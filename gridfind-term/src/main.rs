//! gridfind — interactive A* pathfinding visualizer for the terminal.

mod app;
mod render;

use app::App;
use render::Screen;

const ROWS: i32 = 25;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut screen = Screen::init()?;
    let result = App::new(ROWS).run(&mut screen);
    // Restore the terminal on every exit path before reporting errors.
    screen.close();
    result
}
