//! Input Actor: dedicated thread for polling terminal events.
//!
//! Polls crossterm with a timeout so the shutdown flag is noticed promptly,
//! converts what the calculator cares about and forwards it over a channel.

use super::messages::{InputEvent, KeyCode, KeyModifiers};
use crate::error::{Error, Result};
use crossbeam_channel::{SendTimeoutError, Sender};
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Input actor that polls terminal events.
pub struct InputActor {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input thread.
    ///
    /// `poll_timeout` bounds how long the thread blocks before checking
    /// whether it should stop.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);

        let handle = thread::Builder::new()
            .name(String::from("calci-input"))
            .spawn(move || Self::run_loop(&sender, &flag, poll_timeout))
            .map_err(|source| Error::ThreadSpawn {
                name: "input",
                source,
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to stop.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Stop the input thread and wait for it.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration) {
        tracing::debug!("input thread started");
        while !shutdown.load(Ordering::Relaxed) {
            let event = match event::poll(poll_timeout) {
                Ok(true) => event::read(),
                Ok(false) => continue,
                Err(e) => Err(e),
            };
            let converted = match event {
                Ok(event) => convert_event(event),
                Err(e) => {
                    tracing::warn!(error = %e, "reading terminal events failed");
                    Some(InputEvent::Error(e.to_string()))
                }
            };
            if let Some(input) = converted {
                if !forward(sender, input, shutdown, poll_timeout) {
                    break;
                }
            }
        }
        // Nobody may be reading any more; never block on the notice.
        let _ = sender.try_send(InputEvent::Shutdown);
        tracing::debug!("input thread stopped");
    }
}

/// Send `event`, waiting for room in the channel in `poll_timeout` steps.
///
/// Returns `false` once the receiver is gone or shutdown was requested
/// while the channel stayed full.
fn forward(
    sender: &Sender<InputEvent>,
    mut event: InputEvent,
    shutdown: &AtomicBool,
    poll_timeout: Duration,
) -> bool {
    loop {
        match sender.send_timeout(event, poll_timeout) {
            Ok(()) => return true,
            Err(SendTimeoutError::Disconnected(_)) => return false,
            Err(SendTimeoutError::Timeout(pending)) => {
                if shutdown.load(Ordering::Relaxed) {
                    tracing::debug!("input channel full at shutdown, dropping event");
                    return false;
                }
                event = pending;
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Convert a crossterm event, dropping what the calculator ignores.
fn convert_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(InputEvent::Key {
            code: convert_key_code(key.code)?,
            modifiers: convert_modifiers(key.modifiers),
        }),
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            Some(InputEvent::MouseDown {
                x: mouse.column,
                y: mouse.row,
            })
        }
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        _ => None,
    }
}

fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: mods.contains(event::KeyModifiers::SHIFT),
        control: mods.contains(event::KeyModifiers::CONTROL),
        alt: mods.contains(event::KeyModifiers::ALT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState, MouseEvent};

    fn press(code: event::KeyCode, modifiers: event::KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_key_press_converted() {
        let event = convert_event(press(event::KeyCode::Char('7'), event::KeyModifiers::NONE));
        assert_eq!(event, Some(InputEvent::key(KeyCode::Char('7'))));

        let event = convert_event(press(event::KeyCode::Char('c'), event::KeyModifiers::CONTROL));
        assert_eq!(
            event,
            Some(InputEvent::Key {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
            })
        );
    }

    #[test]
    fn test_key_release_and_unknown_keys_dropped() {
        let release = Event::Key(KeyEvent {
            code: event::KeyCode::Char('1'),
            modifiers: event::KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(convert_event(release), None);
        assert_eq!(
            convert_event(press(event::KeyCode::F(1), event::KeyModifiers::NONE)),
            None
        );
        assert_eq!(convert_event(Event::FocusGained), None);
    }

    #[test]
    fn test_left_click_converted() {
        let click = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 12,
                row: 7,
                modifiers: event::KeyModifiers::NONE,
            })
        };
        assert_eq!(
            convert_event(click(MouseEventKind::Down(MouseButton::Left))),
            Some(InputEvent::MouseDown { x: 12, y: 7 })
        );
        assert_eq!(convert_event(click(MouseEventKind::Down(MouseButton::Right))), None);
        assert_eq!(convert_event(click(MouseEventKind::Moved)), None);
    }

    #[test]
    fn test_forward_delivers_when_room() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let shutdown = AtomicBool::new(false);
        assert!(forward(&tx, InputEvent::key(KeyCode::Char('1')), &shutdown, Duration::from_millis(5)));
        assert_eq!(rx.try_recv(), Ok(InputEvent::key(KeyCode::Char('1'))));
    }

    #[test]
    fn test_forward_gives_up_on_full_channel_at_shutdown() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        tx.send(InputEvent::key(KeyCode::Char('1'))).unwrap();
        let shutdown = AtomicBool::new(true);
        assert!(!forward(&tx, InputEvent::key(KeyCode::Char('2')), &shutdown, Duration::from_millis(5)));
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn test_forward_stops_when_receiver_dropped() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        drop(rx);
        let shutdown = AtomicBool::new(false);
        assert!(!forward(&tx, InputEvent::Resize { width: 1, height: 1 }, &shutdown, Duration::from_millis(5)));
    }

    #[test]
    fn test_resize_converted() {
        assert_eq!(
            convert_event(Event::Resize(80, 24)),
            Some(InputEvent::Resize {
                width: 80,
                height: 24
            })
        );
    }
}
