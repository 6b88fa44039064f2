//! Shared fixtures for integration tests: key scripting helpers used
//! together with the in-memory API and point builders from
//! `tripline::board::testing`.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// A plain key press event
pub fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

/// A character key press event
pub fn press(c: char) -> Event {
    key(KeyCode::Char(c))
}

/// A script that always ends the session so `run()` terminates
pub fn script(events: impl IntoIterator<Item = Event>) -> Vec<Event> {
    let mut all: Vec<Event> = events.into_iter().collect();
    all.push(press('q'));
    all
}
