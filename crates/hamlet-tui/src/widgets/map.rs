//! Map display widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

use hamlet_core::Grid;

use crate::theme::Theme;

/// Widget for rendering a tile grid
pub struct MapWidget<'a> {
    grid: &'a Grid,
    theme: &'a Theme,
    title: &'a str,
}

impl<'a> MapWidget<'a> {
    pub fn new(grid: &'a Grid, theme: &'a Theme, title: &'a str) -> Self {
        Self { grid, theme, title }
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(self.title);

        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width as usize;
        let height = inner.height as usize;
        for (x, y, ch, color) in self.grid.glyphs() {
            let (x, y) = (x as usize, y as usize);
            if x >= width || y >= height {
                continue;
            }
            let pos = Position::new(inner.x + x as u16, inner.y + y as u16);
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char(ch);
                cell.set_style(Style::default().fg(self.theme.cell_color(color)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hamlet_core::{Point, Tile};

    #[test]
    fn test_renders_symbols_inside_border() {
        let mut grid = Grid::new(4, 2);
        grid.set(Point::new(1, 0), Tile::Road, 7);
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 6, 4);
        let mut buf = Buffer::empty(area);
        MapWidget::new(&grid, &theme, "t").render(area, &mut buf);

        let cell = buf.cell(Position::new(2, 1)).unwrap();
        assert_eq!(cell.symbol(), "+");
        assert_eq!(cell.fg, theme.cell_color(7));
    }

    #[test]
    fn test_clips_to_area() {
        let grid = Grid::new(50, 50);
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 5, 5);
        let mut buf = Buffer::empty(area);
        MapWidget::new(&grid, &theme, "t").render(area, &mut buf);
    }
}
