use ratatui::style::Color;

/// The crawling snail, in Braille blocks. Rows keep their original padding so
/// the block scrolls as one rigid unit.
pub const BANNER_TEXT: &str = r#"
⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀
⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⣠⣾⣦⠀⢀⠀⠀
⠀⠀⠀⠀⠀⠀⢀⣤⣶⣶⣿⣿⣷⣶⣦⣄⠀⠀⠀⠀⠀⠀⢰⡟⠈⠁⣰⣿⡗⠀
⠀⠀⠀⠀⣠⣾⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣦⡀⠀⠀⠀⢸⡇⠀⢠⡟⠀⠀⠀
⠀⠀⠀⣰⣿⣿⣿⣿⠟⠋⣉⣉⣉⠙⠻⣿⣿⣿⣷⡀⠀⠀⢸⡇⠀⢸⠃⠀⠀⠀
⠀⠀⢀⣿⣿⣿⣿⡇⢠⣿⣿⣿⢿⣿⣆⠘⣿⣿⣿⣷⡀⠀⢸⣧⠀⢸⡇⠀⠀⠀
⠀⠀⢸⣿⣿⣿⣿⡇⠸⣿⣿⣿⠆⣿⣿⡄⢸⣿⣿⣿⣧⠀⣼⣿⣿⣿⣇⠀⠀⠀
⠀⠀⠀⣿⣿⣿⣿⣿⣦⣈⣉⣁⣴⣿⣿⠁⣼⣿⣿⣿⣿⠀⣿⣿⣿⣿⣿⠀⠀⠀
⠀⠀⠀⠸⣿⣿⣿⣿⣿⣿⣿⣿⣿⡿⠃⣰⣿⣿⣿⣿⡿⠀⣿⣿⣿⣿⡿⠀⠀⠀
⠀⠀⠀⠀⠈⠻⠿⣿⣿⣿⠿⠟⠋⠀⠾⢿⣿⣿⠿⠟⢁⣼⣿⣿⣿⣿⡇⠀⠀⠀
⠀⠀⠀⠀⣀⣤⣤⣤⣤⣤⣤⣶⣿⣷⣦⣤⣤⣤⣴⣾⣿⣿⣿⣿⣿⡿⠀⠀⠀⠀
⠀⢀⣴⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⠿⠋⠀⠀⠀⠀⠀
⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀⠀
"#;

/// An immutable block of fixed-width text rows plus its display color.
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Banner {
    lines: Vec<String>,
    width: usize,
    height: usize,
    color: Color,
}

impl Banner {
    pub fn new(text: &str, color: Color) -> Self {
        let lines: Vec<String> = text
            .trim_matches('\n')
            .lines()
            .map(str::to_string)
            .collect();
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        let height = lines.len();
        Self {
            lines,
            width,
            height,
            color,
        }
    }

    /// The built-in snail asset.
    pub fn standard(color: Color) -> Self {
        Self::new(BANNER_TEXT, color)
    }

    /// Widest row, in chars.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// The part of `line` visible when the banner's left edge sits at column
/// `col` of a terminal `term_width` columns wide, together with the screen
/// column to draw it at. `col` may be negative (banner partly off-screen to
/// the left). Returns `None` when nothing of the row is on screen.
pub fn visible_part(line: &str, col: i32, term_width: u16) -> Option<(u16, String)> {
    let start = (-col).max(0) as usize;
    let end = (i32::from(term_width) - col).max(0) as usize;
    if end <= start {
        return None;
    }
    let text: String = line.chars().skip(start).take(end - start).collect();
    if text.is_empty() {
        return None;
    }
    Some((col.max(0) as u16, text))
}
