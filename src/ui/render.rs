use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use ratatui::Frame;

use crate::ui::app::App;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    frame.render_widget(BannerFrame { app }, frame.area());
}

/// One frame of the scrolling banner: each row's visible slice, drawn at the
/// current horizontal offset, vertically centered.
struct BannerFrame<'a> {
    app: &'a App<'a>,
}

impl Widget for BannerFrame<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(self.app.banner().color());
        for i in 0..self.app.banner().height() {
            let y = self.app.row_offset().saturating_add(i as u16);
            if y >= area.height {
                // Banner taller than the terminal: clip, never fail.
                break;
            }
            if let Some((x, text)) = self.app.visible_row(i) {
                buf.set_string(area.x + x, area.y + y, &text, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banner::Banner;
    use ratatui::style::Color;

    fn render_to_buffer(app: &App, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        BannerFrame { app }.render(area, &mut buf);
        buf
    }

    #[test]
    fn renders_rows_at_the_vertical_center() {
        let banner = Banner::new("ab\ncd", Color::Green);
        let mut app = App::new(&banner, 10, 6);
        // Bring the banner fully on screen at column 0.
        for _ in 0..banner.width() {
            app.advance();
        }
        let buf = render_to_buffer(&app, 10, 6);
        assert_eq!(buf[(0, 2)].symbol(), "a");
        assert_eq!(buf[(1, 2)].symbol(), "b");
        assert_eq!(buf[(0, 3)].symbol(), "c");
        assert_eq!(buf[(1, 3)].symbol(), "d");
        assert_eq!(buf[(0, 2)].style().fg, Some(Color::Green));
    }

    #[test]
    fn off_screen_banner_leaves_the_buffer_blank() {
        let banner = Banner::new("ab\ncd", Color::Green);
        let app = App::new(&banner, 10, 6);
        let buf = render_to_buffer(&app, 10, 6);
        for y in 0..6 {
            for x in 0..10 {
                assert_eq!(buf[(x, y)].symbol(), " ");
            }
        }
    }

    #[test]
    fn banner_taller_than_terminal_clips_rows() {
        let banner = Banner::new("a\nb\nc\nd\ne", Color::Green);
        let mut app = App::new(&banner, 10, 3);
        for _ in 0..banner.width() {
            app.advance();
        }
        // Rows beyond the bottom edge are skipped; no panic, no wraparound.
        let buf = render_to_buffer(&app, 10, 3);
        assert_eq!(buf[(0, 0)].symbol(), "a");
        assert_eq!(buf[(0, 2)].symbol(), "c");
    }
}
