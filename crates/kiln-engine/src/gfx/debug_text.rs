/// Width of one debug text cell in backbuffer pixels.
pub const CELL_WIDTH: u32 = 8;
/// Height of one debug text cell in backbuffer pixels.
pub const CELL_HEIGHT: u32 = 16;

/// 16-color palette indexed by the nibbles of a text attribute, `0xRRGGBBAA`.
///
/// Index 0 is transparent so `0x0f` prints white text without a background.
pub const PALETTE: [u32; 16] = [
    0x0000_0000, // black (transparent)
    0x0000_aaff, // blue
    0x00aa_00ff, // green
    0x00aa_aaff, // cyan
    0xaa00_00ff, // red
    0xaa00_aaff, // magenta
    0xaa55_00ff, // brown
    0xaaaa_aaff, // light gray
    0x5555_55ff, // dark gray
    0x5555_ffff, // light blue
    0x55ff_55ff, // light green
    0x55ff_ffff, // light cyan
    0xff55_55ff, // light red
    0xff55_ffff, // light magenta
    0xffff_55ff, // yellow
    0xffff_ffff, // white
];

/// One character cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TextCell {
    pub ch: char,
    /// Low nibble foreground, high nibble background palette index.
    pub attr: u8,
}

impl TextCell {
    const BLANK: TextCell = TextCell { ch: ' ', attr: 0 };

    #[inline]
    pub fn foreground(self) -> u32 {
        PALETTE[(self.attr & 0x0f) as usize]
    }

    #[inline]
    pub fn background(self) -> u32 {
        PALETTE[(self.attr >> 4) as usize]
    }

    #[inline]
    pub fn is_blank(self) -> bool {
        self.ch == ' ' && self.attr >> 4 == 0
    }
}

/// Fixed grid of character cells covering the backbuffer.
#[derive(Debug, Clone, Default)]
pub struct DebugText {
    cols: u16,
    rows: u16,
    cells: Vec<TextCell>,
}

impl DebugText {
    /// Creates a grid sized for a `width x height` backbuffer.
    pub fn new(width: u32, height: u32) -> Self {
        let mut text = Self::default();
        text.resize(width, height);
        text
    }

    /// Resizes the grid for a new backbuffer size and blanks it.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.cols = (width / CELL_WIDTH).min(u32::from(u16::MAX)) as u16;
        self.rows = (height / CELL_HEIGHT).min(u32::from(u16::MAX)) as u16;
        self.cells = vec![TextCell::BLANK; usize::from(self.cols) * usize::from(self.rows)];
    }

    #[inline]
    pub fn cols(&self) -> u16 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Fills every cell with a space in `attr`.
    pub fn clear(&mut self, attr: u8) {
        self.cells.fill(TextCell { ch: ' ', attr });
    }

    /// Writes `text` starting at cell `(x, y)`.
    ///
    /// Characters past the right edge and rows past the bottom are dropped.
    /// Control characters are written as spaces.
    pub fn print(&mut self, x: u16, y: u16, attr: u8, text: &str) {
        if y >= self.rows {
            return;
        }
        let row = usize::from(y) * usize::from(self.cols);
        for (col, ch) in (x..self.cols).zip(text.chars()) {
            let ch = if ch.is_control() { ' ' } else { ch };
            self.cells[row + usize::from(col)] = TextCell { ch, attr };
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<TextCell> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        Some(self.cells[usize::from(y) * usize::from(self.cols) + usize::from(x)])
    }

    /// Visible cells as `(col, row, cell)`, skipping blank ones.
    pub fn visible_cells(&self) -> impl Iterator<Item = (u16, u16, TextCell)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_blank())
            .map(move |(i, c)| ((i % usize::from(cols)) as u16, (i / usize::from(cols)) as u16, *c))
    }

    /// Reads back row `y` as a string with trailing spaces removed.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.rows {
            return String::new();
        }
        let start = usize::from(y) * usize::from(self.cols);
        let row: String = self.cells[start..start + usize::from(self.cols)]
            .iter()
            .map(|c| c.ch)
            .collect();
        row.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_covers_backbuffer_in_whole_cells() {
        let text = DebugText::new(1280, 720);
        assert_eq!(text.cols(), 160);
        assert_eq!(text.rows(), 45);
    }

    #[test]
    fn print_writes_cells_with_attribute() {
        let mut text = DebugText::new(1280, 720);
        text.print(0, 0, 0x0f, "Vertices count 53001");
        assert_eq!(text.row_text(0), "Vertices count 53001");
        let cell = text.cell(0, 0).unwrap();
        assert_eq!(cell.ch, 'V');
        assert_eq!(cell.foreground(), 0xffff_ffff);
        assert_eq!(cell.background(), 0x0000_0000);
    }

    #[test]
    fn print_clips_at_right_and_bottom_edges() {
        let mut text = DebugText::new(80, 32); // 10 x 2 cells
        text.print(6, 1, 0x0f, "abcdefgh");
        assert_eq!(text.row_text(1), "      abcd");
        text.print(0, 2, 0x0f, "dropped");
        assert_eq!(text.visible_cells().count(), 4);
    }

    #[test]
    fn blank_cells_with_background_stay_visible() {
        let mut text = DebugText::new(80, 16);
        text.print(0, 0, 0x1f, " ");
        let cells: Vec<_> = text.visible_cells().collect();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].2.background(), PALETTE[1]);
    }

    #[test]
    fn clear_blanks_every_cell() {
        let mut text = DebugText::new(80, 16);
        text.print(0, 0, 0x0f, "hello");
        text.clear(0);
        assert_eq!(text.row_text(0), "");
        assert_eq!(text.visible_cells().count(), 0);
    }

    #[test]
    fn control_characters_become_spaces() {
        let mut text = DebugText::new(80, 16);
        text.print(0, 0, 0x0f, "a\tb");
        assert_eq!(text.row_text(0), "a b");
    }
}
