use nalgebra::Point2;

/// A 2D pixel buffer in `0RGB` layout, ready to hand to the window or the PNG writer.
pub struct Canvas {
    pub width: usize,
    pub height: usize,
    pixels: Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if self.in_bounds(x, y) {
            let idx = y as usize * self.width + x as usize;
            self.pixels[idx] = color;
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Fills an axis-aligned rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for row in y.min(y_end)..y_end {
            let start = row * self.width;
            self.pixels[start + x.min(x_end)..start + x_end].fill(color);
        }
    }

    /// Draws a line segment with Bresenham's algorithm.
    ///
    /// The segment is clipped to the canvas first, so endpoints far outside the
    /// viewport cost no more than a line across the screen.
    pub fn draw_line(&mut self, start: Point2<f32>, end: Point2<f32>, color: u32) {
        let Some((a, b)) = self.clip_segment(start, end) else {
            return;
        };

        let mut x0 = a.x.round() as i32;
        let mut y0 = a.y.round() as i32;
        let x1 = b.x.round() as i32;
        let y1 = b.y.round() as i32;
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Draws the closed outline through `points`.
    pub fn draw_polygon(&mut self, points: &[Point2<f32>], color: u32) {
        if points.len() < 2 {
            return;
        }
        for (i, &start) in points.iter().enumerate() {
            let end = points[(i + 1) % points.len()];
            self.draw_line(start, end, color);
        }
    }

    /// Fills a polygon with the even-odd rule, sampling pixel centres.
    pub fn fill_polygon(&mut self, points: &[Point2<f32>], color: u32) {
        if points.len() < 3 {
            return;
        }

        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        let start_y = (min_y.floor() as i64).max(0);
        let end_y = (max_y.ceil() as i64).min(self.height as i64 - 1);

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        for y in start_y..=end_y {
            let sample_y = y as f32 + 0.5;
            crossings.clear();

            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                // Half-open rule so shared vertices are counted once.
                if (a.y <= sample_y) != (b.y <= sample_y) {
                    let t = (sample_y - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(|l, r| l.total_cmp(r));

            for span in crossings.chunks_exact(2) {
                let first = ((span[0] - 0.5).ceil() as i64).max(0);
                let last = ((span[1] - 0.5).ceil() as i64 - 1).min(self.width as i64 - 1);
                for x in first..=last {
                    self.set_pixel(x as i32, y as i32, color);
                }
            }
        }
    }

    /// Liang-Barsky clip of a segment against the pixel rectangle.
    fn clip_segment(&self, a: Point2<f32>, b: Point2<f32>) -> Option<(Point2<f32>, Point2<f32>)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
            return None;
        }

        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        let d = b - a;
        let mut t0 = 0.0_f32;
        let mut t1 = 1.0_f32;

        let edges = [
            (-d.x, a.x),
            (d.x, max_x - a.x),
            (-d.y, a.y),
            (d.y, max_y - a.y),
        ];
        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        Some((a + d * t0, a + d * t1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0x00FF_0000;

    fn lit(canvas: &Canvas) -> usize {
        canvas.pixels().iter().filter(|&&p| p == RED).count()
    }

    #[test]
    fn horizontal_line_covers_every_pixel() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_line(Point2::new(1.0, 4.0), Point2::new(8.0, 4.0), RED);
        assert_eq!(lit(&canvas), 8);
        assert_eq!(canvas.get_pixel(1, 4), Some(RED));
        assert_eq!(canvas.get_pixel(8, 4), Some(RED));
    }

    #[test]
    fn far_off_endpoints_are_clipped() {
        let mut canvas = Canvas::new(20, 20);
        canvas.draw_line(Point2::new(-1.0e4, 5.0), Point2::new(1.0e4, 5.0), RED);
        assert_eq!(lit(&canvas), 20);
    }

    #[test]
    fn segment_outside_canvas_draws_nothing() {
        let mut canvas = Canvas::new(20, 20);
        canvas.draw_line(Point2::new(-10.0, -5.0), Point2::new(30.0, -1.0), RED);
        canvas.draw_line(Point2::new(f32::NAN, 1.0), Point2::new(3.0, 3.0), RED);
        assert_eq!(lit(&canvas), 0);
    }

    #[test]
    fn polygon_outline_is_closed() {
        let mut canvas = Canvas::new(10, 10);
        let square = [
            Point2::new(2.0, 2.0),
            Point2::new(6.0, 2.0),
            Point2::new(6.0, 6.0),
            Point2::new(2.0, 6.0),
        ];
        canvas.draw_polygon(&square, RED);
        // The closing edge from (2,6) back to (2,2).
        assert_eq!(canvas.get_pixel(2, 4), Some(RED));
        assert_eq!(canvas.get_pixel(4, 4), Some(0));
        assert_eq!(lit(&canvas), 16);
    }

    #[test]
    fn filled_square_covers_its_area() {
        let mut canvas = Canvas::new(10, 10);
        let square = [
            Point2::new(2.0, 2.0),
            Point2::new(6.0, 2.0),
            Point2::new(6.0, 6.0),
            Point2::new(2.0, 6.0),
        ];
        canvas.fill_polygon(&square, RED);
        assert_eq!(lit(&canvas), 16);
        assert_eq!(canvas.get_pixel(2, 2), Some(RED));
        assert_eq!(canvas.get_pixel(6, 6), Some(0));
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(2, 2, 10, 10, RED);
        assert_eq!(lit(&canvas), 4);
    }
}
