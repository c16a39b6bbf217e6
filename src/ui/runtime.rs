use std::io::{self, Stdout};
use std::time::Duration;

use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::banner::Banner;
use crate::shutdown::{ExitOutcome, TerminationFlag};
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::render::draw;

/// Runs the animation until cancelled.
///
/// Draws a frame, then parks on the event channel; a tick advances the
/// offset, a key feeds the local cancellation check. The input thread's
/// bounded poll is the loop's only suspension point, so both cancellation
/// sources take effect within one frame's latency: the termination flag is
/// checked before each draw, and once observed no further frame renders.
///
/// Terminal resize mid-run is not handled: the geometry captured at startup
/// stays in effect until exit.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    banner: &Banner,
    frame_interval: Duration,
    termination: &TerminationFlag,
) -> io::Result<ExitOutcome> {
    let size = terminal.size()?;
    let mut app = App::new(banner, size.width, size.height);
    let events = EventHandler::new(frame_interval);

    loop {
        if termination.is_raised() {
            return Ok(ExitOutcome::TerminatedBySignal);
        }
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            return Ok(ExitOutcome::UserInterrupt);
        }

        match events.next() {
            Ok(AppEvent::Key(key)) => app.on_key(key),
            Ok(AppEvent::Tick) => app.advance(),
            // Input thread gone; fall back to the flag to pick the exit path.
            Err(_) => {
                return Ok(if termination.is_raised() {
                    ExitOutcome::TerminatedBySignal
                } else {
                    ExitOutcome::UserInterrupt
                });
            }
        }
    }
}
