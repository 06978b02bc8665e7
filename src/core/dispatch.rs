use crate::domain::model::{Action, Command};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map one key event to the action the controller takes.
///
/// Total and stateless: the same event always yields the same action.
/// Release events are ignored so a single keystroke never publishes twice
/// on terminals that report them. Arrows only count when pressed alone and
/// space alone or with shift; Esc terminates whatever the modifiers.
pub fn dispatch(key: &KeyEvent) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::Ignore;
    }

    let plain = key.modifiers.is_empty();
    let shifted_at_most = key.modifiers.difference(KeyModifiers::SHIFT).is_empty();

    match key.code {
        KeyCode::Esc => Action::Terminate,
        // raw mode swallows SIGINT
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Terminate,
        KeyCode::Char(' ') if shifted_at_most => Action::Publish(Command::StartStop),
        KeyCode::Up if plain => Action::Publish(Command::Up),
        KeyCode::Down if plain => Action::Publish(Command::Down),
        KeyCode::Left if plain => Action::Publish(Command::Left),
        KeyCode::Right if plain => Action::Publish(Command::Right),
        _ => Action::Ignore,
    }
}
