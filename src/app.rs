use crate::command::Command;
use crate::game::Game;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// The top-level event loop: draws the game, feeds it input, and ticks its
/// clock at a fixed rate while it's running
#[derive(Clone, Debug)]
pub(crate) struct App<R = rand::rngs::ThreadRng> {
    game: Game<R>,
    tick_period: Duration,
    next_tick: Option<Instant>,
    quitting: bool,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(game: Game<R>, tick_period: Duration) -> App<R> {
        App {
            game,
            tick_period,
            next_tick: None,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        info!(tick_period = ?self.tick_period, "Starting up");
        while !self.quitting {
            terminal.draw(|frame| self.game.draw(frame))?;
            self.process_input()?;
        }
        info!("Quitting");
        Ok(())
    }

    /// Wait for either the next tick or the next input event, whichever
    /// comes first, and handle it.  Events that arrive between ticks do not
    /// delay the next tick.
    fn process_input(&mut self) -> io::Result<()> {
        if self.game.running() {
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + self.tick_period);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.game.tick();
                self.next_tick = Some(following_tick(when, Instant::now(), self.tick_period));
            } else {
                self.handle_event(read()?);
            }
        } else {
            self.next_tick = None;
            self.handle_event(read()?);
        }
        Ok(())
    }
}

/// Return the deadline for the tick after the one due at `when`.  Ticks are
/// scheduled at a fixed rate, except that if the loop has fallen more than a
/// whole period behind, the schedule restarts from `now` instead of firing a
/// burst of ticks to catch up.
fn following_tick(when: Instant, now: Instant, period: Duration) -> Instant {
    let next = when + period;
    if next < now {
        now + period
    } else {
        next
    }
}

impl<R> App<R> {
    fn handle_event(&mut self, event: Event) {
        if event == Event::FocusLost {
            self.game.pause();
            return;
        }
        let Some(cmd) = event
            .as_key_press_event()
            .and_then(Command::from_key_event)
        else {
            return;
        };
        if cmd == Command::Quit {
            debug!("Quit requested");
            self.quitting = true;
        } else {
            self.game.handle_command(cmd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn new_app() -> App<ChaCha12Rng> {
        App::new(
            Game::new_with_rng(ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF)),
            crate::consts::TICK_PERIOD,
        )
    }

    #[test]
    fn ticks_keep_fixed_rate() {
        let start = Instant::now();
        let period = Duration::from_millis(150);
        let now = start + Duration::from_millis(7);
        assert_eq!(following_tick(start, now, period), start + period);
    }

    #[test]
    fn ticks_restart_after_stall() {
        let start = Instant::now();
        let period = Duration::from_millis(150);
        let now = start + Duration::from_secs(2);
        assert_eq!(following_tick(start, now, period), now + period);
    }

    #[test]
    fn space_starts_game() {
        let mut app = new_app();
        app.handle_event(Event::Key(KeyCode::Char(' ').into()));
        assert!(app.game.running());
        assert!(!app.quitting);
    }

    #[test]
    fn focus_lost_pauses() {
        let mut app = new_app();
        app.handle_event(Event::Key(KeyCode::Char(' ').into()));
        app.handle_event(Event::FocusLost);
        assert!(!app.game.running());
    }

    #[test]
    fn quit() {
        let mut app = new_app();
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.quitting);
    }

    #[test]
    fn key_release_ignored() {
        let mut app = new_app();
        app.handle_event(Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char(' '),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        )));
        assert!(!app.game.running());
    }
}
