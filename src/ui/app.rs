use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::banner::{visible_part, Banner};

/// Animation state, owned exclusively by the render loop.
///
/// The banner enters fully off-screen to the left (`col = -width`), crawls
/// right one column per tick, and wraps back once it has fully left the
/// right edge. The sequence is deterministic and never reverses.
pub struct App<'a> {
    banner: &'a Banner,
    col: i32,
    row_offset: u16,
    term_width: u16,
    should_quit: bool,
}

impl<'a> App<'a> {
    /// Captures the terminal geometry and starts the banner off-screen,
    /// vertically centered. A terminal smaller than the banner just clips;
    /// the row offset floors at 0 and is never negative.
    pub fn new(banner: &'a Banner, term_width: u16, term_height: u16) -> Self {
        let row_offset = term_height.saturating_sub(banner.height() as u16) / 2;
        Self {
            banner,
            col: -(banner.width() as i32),
            row_offset,
            term_width,
            should_quit: false,
        }
    }

    pub fn banner(&self) -> &Banner {
        self.banner
    }

    pub fn col(&self) -> i32 {
        self.col
    }

    pub fn row_offset(&self) -> u16 {
        self.row_offset
    }

    /// Advance one column; wrap back to fully off-screen once the banner has
    /// scrolled past the right edge.
    pub fn advance(&mut self) {
        self.col += 1;
        if self.col > i32::from(self.term_width) {
            self.col = -(self.banner.width() as i32);
        }
    }

    /// The visible slice of banner row `i` at the current offset, with its
    /// screen column. `None` when the row is off-screen or doesn't exist.
    pub fn visible_row(&self, i: usize) -> Option<(u16, String)> {
        visible_part(self.banner.lines().get(i)?, self.col, self.term_width)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Local cancellation check: ESC or Ctrl-C requests an immediate,
    /// grace-free exit. Distinct from the SIGTERM path, which never passes
    /// through here.
    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let cancel = key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));
        if cancel {
            self.should_quit = true;
        }
    }
}
