use crate::core::canvas::Canvas;
use crate::core::color;

/// Approximate width of one character cell; entry bars are sized by name length.
const GLYPH_WIDTH: usize = 8;
const PADDING: usize = 5;

/// Model list panel on the left edge of the window.
///
/// One row per library entry. There is no text rendering, so each entry is a
/// bar sized by its name; the selected one is highlighted.
#[derive(Debug, Clone, Copy)]
pub struct Sidebar {
    pub width: usize,
    pub row_height: usize,
}

impl Sidebar {
    pub fn new(width: usize, row_height: usize) -> Self {
        Self {
            width,
            row_height: row_height.max(1),
        }
    }

    /// Index of the entry under `(x, y)`, if any.
    pub fn hit_test(&self, x: f32, y: f32, entries: usize) -> Option<usize> {
        if x < 0.0 || y < 0.0 || x >= self.width as f32 {
            return None;
        }
        let index = y as usize / self.row_height;
        (index < entries).then_some(index)
    }

    pub fn draw(&self, canvas: &mut Canvas, entries: &[String], selected: Option<usize>) {
        canvas.fill_rect(0, 0, self.width, canvas.height, color::to_u32(&color::gray25()));

        let max_bar = self.width.saturating_sub(2 * PADDING);
        let bar_height = self.row_height.saturating_sub(PADDING).max(1);
        for (i, name) in entries.iter().enumerate() {
            let top = i * self.row_height;
            if top >= canvas.height {
                break;
            }
            let is_selected = selected == Some(i);
            if is_selected {
                canvas.fill_rect(0, top, self.width, self.row_height, color::to_u32(&color::light_blue()));
            }
            let bar_color = if is_selected {
                color::dark_slate_gray()
            } else {
                color::white()
            };
            let bar_width = (name.chars().count() * GLYPH_WIDTH).clamp(GLYPH_WIDTH, max_bar.max(GLYPH_WIDTH));
            canvas.fill_rect(PADDING, top + PADDING / 2, bar_width, bar_height, color::to_u32(&bar_color));
        }

        // Separator between the list and the viewport.
        let edge = self.width.saturating_sub(1);
        canvas.fill_rect(edge, 0, 1, canvas.height, color::to_u32(&color::white()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_maps_rows_to_entries() {
        let sidebar = Sidebar::new(300, 25);
        assert_eq!(sidebar.hit_test(10.0, 0.0, 3), Some(0));
        assert_eq!(sidebar.hit_test(10.0, 24.9, 3), Some(0));
        assert_eq!(sidebar.hit_test(299.0, 25.0, 3), Some(1));
        assert_eq!(sidebar.hit_test(10.0, 74.0, 3), Some(2));
    }

    #[test]
    fn hit_test_outside_the_list() {
        let sidebar = Sidebar::new(300, 25);
        assert_eq!(sidebar.hit_test(300.0, 10.0, 3), None);
        assert_eq!(sidebar.hit_test(10.0, 75.0, 3), None);
        assert_eq!(sidebar.hit_test(-1.0, 10.0, 3), None);
        assert_eq!(sidebar.hit_test(10.0, 10.0, 0), None);
    }

    #[test]
    fn draw_highlights_the_selected_row() {
        let sidebar = Sidebar::new(100, 20);
        let mut canvas = Canvas::new(200, 100);
        canvas.clear(0);
        let entries = vec!["a.obj".to_string(), "b.obj".to_string()];
        sidebar.draw(&mut canvas, &entries, Some(1));

        let highlight = color::to_u32(&color::light_blue());
        let panel = color::to_u32(&color::gray25());
        // Right end of each row is past the name bar.
        assert_eq!(canvas.get_pixel(90, 30), Some(highlight));
        assert_eq!(canvas.get_pixel(90, 10), Some(panel));
        assert_eq!(canvas.get_pixel(99, 10), Some(color::to_u32(&color::white())));
        // The viewport is untouched.
        assert_eq!(canvas.get_pixel(150, 50), Some(0));
    }

    #[test]
    fn draw_without_selection_highlights_nothing() {
        let sidebar = Sidebar::new(100, 20);
        let mut canvas = Canvas::new(200, 100);
        let entries = vec!["a.obj".to_string(), "b.obj".to_string()];
        sidebar.draw(&mut canvas, &entries, None);

        let panel = color::to_u32(&color::gray25());
        assert_eq!(canvas.get_pixel(90, 10), Some(panel));
        assert_eq!(canvas.get_pixel(90, 30), Some(panel));
    }
}
