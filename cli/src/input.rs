use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal;

use reachr_common::warn;
use reachr_core::prober::StopSignal;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Keeps the key listener alive; dropping it restores the terminal.
pub struct InputGuard {
    active: Arc<AtomicBool>,
    raw_mode: bool,
}

/// Watches for 'q' on a background thread and triggers `stop` when seen.
pub fn listen_for_stop(stop: StopSignal) -> InputGuard {
    let raw_mode: bool = terminal::enable_raw_mode().is_ok();
    if !raw_mode {
        warn!("cannot watch the keyboard, 'q' to stop is disabled");
    }

    let active = Arc::new(AtomicBool::new(true));
    let active_ref = active.clone();

    if raw_mode {
        thread::spawn(move || {
            while active_ref.load(Ordering::Relaxed) {
                match event::poll(POLL_INTERVAL) {
                    Ok(true) => {
                        if let Ok(Event::Key(key)) = event::read()
                            && key.code == KeyCode::Char('q')
                        {
                            stop.trigger();
                            break;
                        }
                    }
                    Ok(false) => {}
                    Err(_) => break,
                }
            }
        });
    }

    InputGuard { active, raw_mode }
}

impl Drop for InputGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Relaxed);
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
    }
}
