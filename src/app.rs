use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::runtime::{GameEvent, PointerTracker};
use crate::session::SessionController;
use crate::timer::{Clock, MonotonicClock};

pub const TICK_RATE_MS: u64 = 100;
/// Arrow keys stand in for a short drag.
pub const NUDGE_X_PX: f64 = 5.0;
pub const NUDGE_Y_PX: f64 = 7.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App<C: Clock = MonotonicClock> {
    pub session: SessionController<C>,
    pub pointer: PointerTracker,
}

impl<C: Clock> App<C> {
    pub fn new(session: SessionController<C>, pointer: PointerTracker) -> Self {
        Self { session, pointer }
    }

    pub fn handle_event(&mut self, event: GameEvent) -> Control {
        match event {
            GameEvent::Tick => {
                self.session.on_tick();
            }
            GameEvent::Resize => {}
            GameEvent::Mouse(mouse) => {
                if let Some((dx, dy)) = self.pointer.track(&mouse) {
                    self.session.drag(dx, dy);
                }
            }
            GameEvent::Key(key) => return self.handle_key(key),
            GameEvent::Closed => return Control::Quit,
        }
        Control::Continue
    }

    fn handle_key(&mut self, key: KeyEvent) -> Control {
        match key.code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Control::Quit
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.session.submit();
            }
            KeyCode::Char('n') => {
                self.session.advance();
            }
            KeyCode::Char('g') => self.session.new_game(),
            KeyCode::Left => {
                self.session.drag(-NUDGE_X_PX, 0.0);
            }
            KeyCode::Right => {
                self.session.drag(NUDGE_X_PX, 0.0);
            }
            KeyCode::Up => {
                self.session.drag(0.0, -NUDGE_Y_PX);
            }
            KeyCode::Down => {
                self.session.drag(0.0, NUDGE_Y_PX);
            }
            _ => {}
        }
        Control::Continue
    }
}
