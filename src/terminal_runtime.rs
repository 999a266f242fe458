//! Screen ownership for an interactive arcade run.
//!
//! The frame loop only ever hands snapshots to an [`ArcadeScreen`]. On a real
//! terminal the screen holds raw mode, the alternate screen and the hidden
//! cursor for as long as it lives, and hands them back on drop or when a
//! panic unwinds out of the loop.

use std::io;
use std::panic;
use std::sync::Once;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::renderer;
use crate::snapshot::Snapshot;
use crate::ui::hud::HudInfo;

static PANIC_HOOK: Once = Once::new();

/// Where the arcade draws its boards.
pub struct ArcadeScreen<B: Backend> {
    terminal: Terminal<B>,
    owns_tty: bool,
    frames: u64,
}

impl ArcadeScreen<CrosstermBackend<io::Stdout>> {
    /// Takes over stdout: raw mode, alternate screen, hidden cursor.
    ///
    /// A failure part way through undoes whatever was already switched on.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self {
                terminal,
                owns_tty: true,
                frames: 0,
            }),
            Err(error) => {
                let _ = restore_terminal();
                Err(error)
            }
        }
    }
}

impl<B: Backend> ArcadeScreen<B> {
    /// Draws into `backend` without touching any terminal modes.
    pub fn headless(backend: B) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            owns_tty: false,
            frames: 0,
        })
    }

    /// Draws one full frame for `snapshot`.
    pub fn draw(&mut self, snapshot: &Snapshot, hud: HudInfo) -> io::Result<()> {
        self.terminal.draw(|frame| renderer::render(frame, snapshot, hud))?;
        self.frames += 1;
        Ok(())
    }

    /// Frames drawn so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Drop for ArcadeScreen<B> {
    fn drop(&mut self) {
        if self.owns_tty {
            let _ = restore_terminal();
        }
    }
}

/// Restores the terminal ahead of the default panic report. Installed once
/// per process no matter how many screens are entered.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            default_hook(panic_info);
        }));
    });
}

fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use crate::input::Direction;
    use crate::snake::{SnakeRules, SnakeSimulation};
    use crate::snapshot::render_snake;
    use crate::ui::hud::HudInfo;

    use super::ArcadeScreen;

    fn screen_text(screen: &ArcadeScreen<TestBackend>) -> String {
        screen
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn headless_screen_draws_snapshots_and_counts_frames() {
        let mut screen = ArcadeScreen::headless(TestBackend::new(44, 20)).unwrap();
        let sim = SnakeSimulation::with_seed(4, SnakeRules::default());

        screen.draw(&render_snake(&sim), HudInfo::default()).unwrap();
        screen.draw(&render_snake(&sim), HudInfo::default()).unwrap();

        assert_eq!(screen.frames(), 2);
        assert!(screen_text(&screen).contains("Snake"));
    }

    #[test]
    fn game_over_overlay_is_drawn() {
        let mut screen = ArcadeScreen::headless(TestBackend::new(44, 20)).unwrap();
        let mut sim = SnakeSimulation::with_seed(4, SnakeRules::default());
        sim.set_direction(Direction::Left);
        sim.step();

        screen.draw(&render_snake(&sim), HudInfo::default()).unwrap();

        assert!(screen_text(&screen).contains("GAME OVER"));
    }
}
