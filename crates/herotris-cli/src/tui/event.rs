use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick timer elapsed.
    Tick,
    /// State changed since the last draw.
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
