//! Terminal event abstraction.
//!
//! Two producers feed one channel: a reader that forwards crossterm input,
//! and a frame clock that paces spring animation. Neither touches
//! application state; the main loop is the only consumer.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Animation frame; carries the real time since the previous frame.
    Frame(Duration),
}

pub fn channel() -> (mpsc::UnboundedSender<AppEvent>, mpsc::UnboundedReceiver<AppEvent>) {
    mpsc::unbounded_channel()
}

/// Forward terminal input until the receiver goes away.
///
/// `poll_interval` bounds how long shutdown can go unnoticed.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<AppEvent>, poll_interval: Duration) {
    tokio::task::spawn_blocking(move || loop {
        if tx.is_closed() {
            break;
        }
        if !event::poll(poll_interval).unwrap_or(false) {
            continue;
        }
        let Ok(ev) = event::read() else {
            continue;
        };
        let app_event = match ev {
            CtEvent::Key(k) => AppEvent::Key(k),
            CtEvent::Mouse(m) => AppEvent::Mouse(m),
            CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
            _ => continue,
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });
}

/// Emit [`AppEvent::Frame`] at `fps` until the receiver goes away.
pub fn spawn_frame_clock(tx: mpsc::UnboundedSender<AppEvent>, fps: u32) {
    let period = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last = ticker.tick().await;
        loop {
            let now = ticker.tick().await;
            let dt = now.saturating_duration_since(last);
            last = now;
            if tx.send(AppEvent::Frame(dt)).is_err() {
                break;
            }
        }
    });
}
