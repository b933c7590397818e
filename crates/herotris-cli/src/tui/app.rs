use crossterm::event::Event;
use ratatui::Frame;

use super::Runtime;

/// Trait for TUI applications driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first event. Use this to arm the tick timer.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event);

    /// Draws the screen.
    fn draw(&self, frame: &mut Frame);

    /// Called on every tick of the timer set with
    /// [`Runtime::set_tick_interval`].
    fn update(&mut self, runtime: &mut Runtime);
}
