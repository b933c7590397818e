use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use herotris_engine::{Command, GameSession, PieceSource, RandomPieceSource};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    tui::{App, Runtime},
    view::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Command(Command),
    TogglePause,
    Reset,
    Quit,
}

fn key_action(code: KeyCode) -> Option<KeyAction> {
    let action = match code {
        KeyCode::Left => KeyAction::Command(Command::MoveLeft),
        KeyCode::Right => KeyAction::Command(Command::MoveRight),
        KeyCode::Down => KeyAction::Command(Command::SoftDrop),
        KeyCode::Up => KeyAction::Command(Command::Rotate),
        KeyCode::Char(' ') => KeyAction::Command(Command::HardDrop),
        KeyCode::Char('p') => KeyAction::TogglePause,
        KeyCode::Char('r') => KeyAction::Reset,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => return None,
    };
    Some(action)
}

const PLAYING_BINDINGS: &[KeyBinding] = &[
    KeyBinding::new(&["←", "→"], "Move"),
    KeyBinding::new(&["↓"], "Soft Drop"),
    KeyBinding::new(&["↑"], "Rotate"),
    KeyBinding::new(&["Space"], "Hard Drop"),
    KeyBinding::new(&["P"], "Pause"),
    KeyBinding::new(&["R"], "Reset"),
    KeyBinding::new(&["Q", "Esc"], "Quit"),
];

const PAUSED_BINDINGS: &[KeyBinding] = &[
    KeyBinding::new(&["P"], "Resume"),
    KeyBinding::new(&["R"], "Reset"),
    KeyBinding::new(&["Q", "Esc"], "Quit"),
];

const GAME_OVER_BINDINGS: &[KeyBinding] = &[
    KeyBinding::new(&["R"], "New Game"),
    KeyBinding::new(&["Q", "Esc"], "Quit"),
];

#[derive(Debug)]
pub struct PlayApp<S = RandomPieceSource> {
    session: GameSession<S>,
    is_paused: bool,
    is_exiting: bool,
}

impl<S> PlayApp<S>
where
    S: PieceSource,
{
    pub fn new(session: GameSession<S>) -> Self {
        Self {
            session,
            is_paused: false,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    fn is_playing(&self) -> bool {
        !self.is_paused && self.session.status().is_running()
    }

    /// Period of the gravity timer, or `None` while gravity is stopped.
    fn tick_interval(&self) -> Option<Duration> {
        self.is_playing().then(|| self.session.drop_interval())
    }

    fn handle_key(&mut self, code: KeyCode) {
        let Some(action) = key_action(code) else {
            return;
        };
        match action {
            KeyAction::Command(command) => {
                if self.is_playing() {
                    self.session.apply_command(command);
                }
            }
            KeyAction::TogglePause => {
                if self.session.status().is_running() {
                    self.is_paused = !self.is_paused;
                }
            }
            KeyAction::Reset => {
                self.session.reset();
                self.is_paused = false;
            }
            KeyAction::Quit => self.is_exiting = true,
        }
    }

    /// Re-arms the timer if the state change altered the tick interval.
    fn sync_tick_interval(&self, runtime: &mut Runtime, before: Option<Duration>) {
        let after = self.tick_interval();
        if after != before {
            runtime.set_tick_interval(after);
        }
    }
}

impl<S> App for PlayApp<S>
where
    S: PieceSource,
{
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(self.tick_interval());
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) {
        let Some(key) = event.as_key_press_event() else {
            return;
        };
        let before = self.tick_interval();
        self.handle_key(key.code);
        self.sync_tick_interval(runtime, before);
    }

    fn draw(&self, frame: &mut Frame) {
        let bindings = if self.session.status().is_over() {
            GAME_OVER_BINDINGS
        } else if self.is_paused {
            PAUSED_BINDINGS
        } else {
            PLAYING_BINDINGS
        };

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(
            SessionDisplay::new(&self.session).paused(self.is_paused),
            main_area,
        );
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    fn update(&mut self, runtime: &mut Runtime) {
        let before = self.tick_interval();
        if self.is_playing() {
            self.session.tick();
        }
        self.sync_tick_interval(runtime, before);
    }
}
