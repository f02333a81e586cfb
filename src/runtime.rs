use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

/// Approximate pixel size of one terminal cell, used to turn cell motion into drag pixels.
pub const DEFAULT_CELL_WIDTH_PX: f64 = 8.0;
pub const DEFAULT_CELL_HEIGHT_PX: f64 = 16.0;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Tick,
    /// The event source hung up; nothing more will arrive.
    Closed,
}

/// Source of terminal events (keyboard, mouse, resize)
pub trait GameEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => GameEvent::Key(key),
                Ok(CtEvent::Mouse(mouse)) => GameEvent::Mouse(mouse),
                Ok(CtEvent::Resize(_, _)) => GameEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl GameEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: GameEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: GameEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, Tick on timeout
    /// or Closed once the source is gone.
    pub fn step(&self) -> GameEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => GameEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => GameEvent::Closed,
        }
    }
}

/// Turns left-button mouse drags into pixel deltas.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    cell_width_px: f64,
    cell_height_px: f64,
    anchor: Option<(u16, u16)>,
}

impl PointerTracker {
    pub fn new(cell_width_px: f64, cell_height_px: f64) -> Self {
        Self {
            cell_width_px,
            cell_height_px,
            anchor: None,
        }
    }

    /// Returns `(dx, dy)` in pixels for a drag step, `None` for anything else.
    pub fn track(&mut self, mouse: &MouseEvent) -> Option<(f64, f64)> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.anchor = Some((mouse.column, mouse.row));
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let (col, row) = self.anchor.replace((mouse.column, mouse.row))?;
                let dx = (f64::from(mouse.column) - f64::from(col)) * self.cell_width_px;
                let dy = (f64::from(mouse.row) - f64::from(row)) * self.cell_height_px;
                if dx == 0.0 && dy == 0.0 {
                    None
                } else {
                    Some((dx, dy))
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.anchor = None;
                None
            }
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_WIDTH_PX, DEFAULT_CELL_HEIGHT_PX)
    }
}
