//! ANSI true-color rasterizer for the clock's draw stream.
//!
//! Every terminal cell covers [`CELL_SIZE`] logical pixels. Commands land on
//! the cell containing their center; glyph and dot colors are blended over
//! the cell background by alpha.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color as TermColor, Colors, Print, ResetColor, SetColors};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use rollclock_engine::coords::{Rect, Vec2};
use rollclock_engine::paint::Color;
use rollclock_engine::render::Surface;
use rollclock_engine::scene::{DrawCmd, DrawList};

/// Logical pixels covered by one terminal cell.
pub const CELL_SIZE: Vec2 = Vec2::new(10.0, 20.0);

const DOT: char = '•';

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

/// `src` composited over an opaque `dst`.
fn over(src: Color, dst: Color) -> Color {
    dst.lerp(Color { a: 1.0, ..src }, src.a)
}

fn term_color(c: Color) -> TermColor {
    let [r, g, b, _] = c.to_srgb_u8();
    TermColor::Rgb { r, g, b }
}

/// Character buffer a frame is rasterized into.
#[derive(Debug, Clone)]
pub struct CellGrid {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl CellGrid {
    pub fn new(cols: u16, rows: u16) -> Self {
        let blank = Cell { ch: ' ', fg: Color::WHITE, bg: Color::BLACK };
        Self { cols, rows, cells: vec![blank; cols as usize * rows as usize] }
    }

    #[inline]
    pub fn cols(&self) -> u16 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn logical_size(&self) -> Vec2 {
        Vec2::new(self.cols as f32 * CELL_SIZE.x, self.rows as f32 * CELL_SIZE.y)
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        (col < self.cols && row < self.rows).then(|| &self.cells[self.offset(col, row)])
    }

    /// Characters of one row, for logs and tests.
    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols).filter_map(|c| self.cell(c, row)).map(|c| c.ch).collect()
    }

    #[inline]
    fn offset(&self, col: u16, row: u16) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    fn index_at(&self, p: Vec2) -> Option<usize> {
        if !p.is_finite() || p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let col = (p.x / CELL_SIZE.x) as u32;
        let row = (p.y / CELL_SIZE.y) as u32;
        (col < self.cols as u32 && row < self.rows as u32)
            .then(|| self.offset(col as u16, row as u16))
    }

    fn cell_center(&self, i: usize) -> Vec2 {
        let cols = self.cols.max(1) as usize;
        let (col, row) = (i % cols, i / cols);
        Vec2::new(
            (col as f32 + 0.5) * CELL_SIZE.x,
            (row as f32 + 0.5) * CELL_SIZE.y,
        )
    }

    /// Replaces the grid contents with `list` drawn over `clear`.
    pub fn rasterize(&mut self, clear: Color, list: &mut DrawList) {
        let background = Color { a: 1.0, ..clear };
        for cell in &mut self.cells {
            *cell = Cell { ch: ' ', fg: background, bg: background };
        }

        for item in list.iter_in_paint_order() {
            let visible = |p: Vec2| item.clip_rect.is_none_or(|clip| clip.contains(p));

            match &item.cmd {
                DrawCmd::Rect(cmd) => self.fill(cmd.rect, cmd.color, item.clip_rect),
                DrawCmd::Glyph(cmd) => {
                    if !visible(cmd.center) {
                        continue;
                    }
                    if let Some(i) = self.index_at(cmd.center) {
                        let cell = &mut self.cells[i];
                        cell.ch = cmd.glyph;
                        cell.fg = over(cmd.color, cell.bg);
                    }
                }
                DrawCmd::Circle(cmd) => {
                    if !visible(cmd.center) {
                        continue;
                    }
                    if let Some(i) = self.index_at(cmd.center) {
                        let cell = &mut self.cells[i];
                        // a second dot in the same cell stacks into a colon
                        cell.ch = match cell.ch {
                            ' ' => DOT,
                            DOT => ':',
                            _ => continue,
                        };
                        cell.fg = over(cmd.color, cell.bg);
                    }
                }
            }
        }
    }

    fn fill(&mut self, rect: Rect, color: Color, clip: Option<Rect>) {
        for i in 0..self.cells.len() {
            let p = self.cell_center(i);
            if rect.contains(p) && clip.is_none_or(|c| c.contains(p)) {
                let cell = &mut self.cells[i];
                cell.bg = over(color, cell.bg);
                cell.fg = cell.bg;
            }
        }
    }

    /// Emits the grid as ANSI escapes, switching colors only when they change.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut current = None;

        for row in 0..self.rows {
            queue!(out, MoveTo(0, row))?;
            for col in 0..self.cols {
                let cell = &self.cells[self.offset(col, row)];
                let colors = (term_color(cell.fg), term_color(cell.bg));
                if current != Some(colors) {
                    queue!(out, SetColors(Colors::new(colors.0, colors.1)))?;
                    current = Some(colors);
                }
                queue!(out, Print(cell.ch))?;
            }
        }

        queue!(out, ResetColor)?;
        out.flush()
    }
}

/// [`Surface`] that draws into a terminal.
///
/// Created with [`TerminalSurface::stdout`], it owns the terminal for its
/// lifetime: raw mode, the alternate screen and a hidden cursor are restored
/// on [`release`](Surface::release) or drop.
pub struct TerminalSurface<W: Write = io::Stdout> {
    out: W,
    grid: CellGrid,
    owns_terminal: bool,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout() -> Result<Self> {
        let (cols, rows) = terminal::size().context("failed to query terminal size")?;
        terminal::enable_raw_mode().context("failed to enable raw mode")?;

        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))
            .context("failed to enter alternate screen")?;

        log::debug!("terminal surface {cols}x{rows}");
        Ok(Self { out, grid: CellGrid::new(cols, rows), owns_terminal: true })
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Surface over any writer with a fixed size; terminal modes are untouched.
    pub fn with_writer(out: W, cols: u16, rows: u16) -> Self {
        Self { out, grid: CellGrid::new(cols, rows), owns_terminal: false }
    }

    #[inline]
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    #[inline]
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn follow_resize(&mut self) {
        if !self.owns_terminal {
            return;
        }
        if let Ok((cols, rows)) = terminal::size() {
            if (cols, rows) != (self.grid.cols, self.grid.rows) {
                log::debug!("terminal resized to {cols}x{rows}");
                self.grid = CellGrid::new(cols, rows);
                let _ = queue!(self.out, Clear(ClearType::All));
            }
        }
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.owns_terminal {
            return Ok(());
        }
        self.owns_terminal = false;
        execute!(self.out, ResetColor, Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn logical_size(&self) -> Vec2 {
        self.grid.logical_size()
    }

    fn present(&mut self, clear: Color, list: &mut DrawList) -> Result<()> {
        self.grid.rasterize(clear, list);
        self.grid.write_to(&mut self.out).context("failed to write frame")?;
        self.follow_resize();
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        self.restore().context("failed to restore terminal")
    }
}

impl<W: Write> Drop for TerminalSurface<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("failed to restore terminal: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use rollclock_engine::scene::ZIndex;

    use super::*;

    fn at(col: u16, row: u16) -> Vec2 {
        Vec2::new((col as f32 + 0.5) * CELL_SIZE.x, (row as f32 + 0.5) * CELL_SIZE.y)
    }

    // ── rasterize ─────────────────────────────────────────────────────────

    #[test]
    fn glyphs_land_on_their_center_cell() {
        let mut grid = CellGrid::new(4, 2);
        let mut list = DrawList::new();
        list.push_glyph(ZIndex(0), '7', at(2, 1), 16.0, Color::WHITE);
        grid.rasterize(Color::BLACK, &mut list);

        assert_eq!(grid.row_text(0), "    ");
        assert_eq!(grid.row_text(1), "  7 ");
        assert_eq!(grid.cell(2, 1).map(|c| c.fg), Some(Color::WHITE));
    }

    #[test]
    fn faded_glyph_blends_into_background() {
        let mut grid = CellGrid::new(1, 1);
        let mut list = DrawList::new();
        list.push_glyph(ZIndex(0), '3', at(0, 0), 16.0, Color::WHITE.with_opacity(0.5));
        grid.rasterize(Color::BLACK, &mut list);

        let fg = grid.cell(0, 0).map(|c| c.fg.to_srgb_u8());
        assert_eq!(fg, Some([128, 128, 128, 255]));
    }

    #[test]
    fn two_dots_in_one_cell_make_a_colon() {
        let mut grid = CellGrid::new(3, 1);
        let mut list = DrawList::new();
        let c = at(1, 0);
        list.push_dot(ZIndex(0), c.offset_y(-4.0), 1.5, Color::WHITE);
        list.push_dot(ZIndex(0), c.offset_y(4.0), 1.5, Color::WHITE);
        list.push_dot(ZIndex(0), at(2, 0), 1.5, Color::WHITE);
        grid.rasterize(Color::BLACK, &mut list);

        assert_eq!(grid.row_text(0), " :•");
    }

    #[test]
    fn dots_do_not_overwrite_glyphs() {
        let mut grid = CellGrid::new(1, 1);
        let mut list = DrawList::new();
        list.push_glyph(ZIndex(0), '8', at(0, 0), 16.0, Color::WHITE);
        list.push_dot(ZIndex(1), at(0, 0), 0.5, Color::WHITE);
        grid.rasterize(Color::BLACK, &mut list);

        assert_eq!(grid.row_text(0), "8");
    }

    #[test]
    fn clipped_items_are_dropped() {
        let mut grid = CellGrid::new(2, 3);
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 20.0, 20.0, 20.0));
        list.push_glyph(ZIndex(0), '1', at(0, 0), 16.0, Color::WHITE);
        list.push_glyph(ZIndex(0), '2', at(0, 1), 16.0, Color::WHITE);
        list.push_glyph(ZIndex(0), '3', at(0, 2), 16.0, Color::WHITE);
        list.pop_clip();
        grid.rasterize(Color::BLACK, &mut list);

        let rows: Vec<_> = (0..3).map(|r| grid.row_text(r)).collect();
        assert_eq!(rows, vec!["  ", "2 ", "  "]);
    }

    #[test]
    fn rect_fills_background() {
        let mut grid = CellGrid::new(3, 1);
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex(0), Rect::new(10.0, 0.0, 20.0, 20.0), Color::WHITE);
        grid.rasterize(Color::BLACK, &mut list);

        assert_eq!(grid.cell(0, 0).map(|c| c.bg), Some(Color::BLACK));
        assert_eq!(grid.cell(2, 0).map(|c| c.bg), Some(Color::WHITE));
    }

    #[test]
    fn out_of_bounds_commands_are_ignored() {
        let mut grid = CellGrid::new(1, 1);
        let mut list = DrawList::new();
        list.push_glyph(ZIndex(0), '9', Vec2::new(-5.0, 5.0), 16.0, Color::WHITE);
        list.push_glyph(ZIndex(0), '9', Vec2::new(500.0, 5.0), 16.0, Color::WHITE);
        grid.rasterize(Color::BLACK, &mut list);

        assert_eq!(grid.row_text(0), " ");
    }

    // ── surface ───────────────────────────────────────────────────────────

    #[test]
    fn present_writes_ansi_frame() {
        let mut surface = TerminalSurface::with_writer(Vec::new(), 2, 1);
        assert_eq!(surface.logical_size(), Vec2::new(20.0, 20.0));

        let mut list = DrawList::new();
        list.push_glyph(ZIndex(0), '5', at(1, 0), 16.0, Color::WHITE);
        surface.present(Color::BLACK, &mut list).unwrap();

        let text = String::from_utf8(surface.writer().clone()).unwrap();
        assert!(text.contains("\u{1b}[1;1H"));
        assert!(text.contains("38;2;255;255;255"));
        assert!(text.ends_with("5\u{1b}[0m"));
        assert!(surface.release().is_ok());
    }
}
