//! Input handling for the Bitlights TUI.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::debug;

use bitlights_engine::{Action, App, Mode};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 256; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads crossterm events on a blocking task and hands them to the frame loop.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(&stop2, &tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Closing first unblocks a reader stuck on a full channel.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: &AtomicBool, tx: &mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain pending input into `app`. Returns `Ok(true)` when the app should quit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if apply_event(app, &ev) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

/// Apply one terminal event. Returns `true` when the app should quit.
pub fn apply_event(app: &mut App, event: &Event) -> bool {
    if let Event::Key(key) = event {
        // Handle press + repeat events (ignore releases)
        if matches!(key.kind, KeyEventKind::Release) {
            return app.should_quit();
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            app.request_quit();
            return true;
        }

        if app.show_help() {
            // Any key dismisses the overlay without acting.
            app.toggle_help();
            return app.should_quit();
        }

        handle_key(app, *key);
    }
    app.should_quit()
}

fn handle_key(app: &mut App, key: KeyEvent) {
    let outcome = match key.code {
        KeyCode::Char(digit @ '1'..='8') => {
            let position = (digit as usize) - ('1' as usize);
            Some(app.toggle_bit(position))
        }
        KeyCode::Char(' ') => Some(app.toggle_at_cursor()),
        KeyCode::Left | KeyCode::Char('h') => {
            app.move_cursor_left();
            None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.move_cursor_right();
            None
        }
        KeyCode::Char('e') => Some(app.select_mode(Mode::Explore)),
        KeyCode::Char('g') => Some(app.select_mode(Mode::Quiz)),
        KeyCode::Tab => Some(app.switch_mode()),
        KeyCode::Char('+' | '=') => Some(app.more_bits()),
        KeyCode::Char('-') => Some(app.fewer_bits()),
        KeyCode::Char('d') => Some(app.flip_difficulty()),
        KeyCode::Char('c') => Some(app.dispatch(Action::CheckAnswer)),
        KeyCode::Char('n') => Some(app.dispatch(Action::Advance)),
        KeyCode::Enter => Some(app.primary_action()),
        KeyCode::Char('r') => Some(app.dispatch(Action::ResetBits)),
        KeyCode::Char('z') => Some(app.dispatch(Action::ToggleZeroDisplay)),
        KeyCode::Char('?') => {
            app.toggle_help();
            None
        }
        KeyCode::Esc => {
            app.request_quit();
            None
        }
        _ => None,
    };

    if let Some(outcome) = outcome {
        debug!(key = ?key.code, ?outcome, "key handled");
    }
}
