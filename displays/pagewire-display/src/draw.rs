//! Drawing primitives
//!
//! Every routine validates its input first and either draws the whole shape
//! or returns an error without touching the canvas. Shapes are built only
//! from [`Canvas::set_pixel`], so nothing outside
//! `[0, width) x [0, height)` is ever written.

use crate::canvas::Canvas;
use crate::error::Error;
use crate::params::DrawParams;

/// Set or clear a single pixel
///
/// Out-of-range coordinates are rejected rather than clamped.
pub fn put_pixel<C: Canvas + ?Sized>(canvas: &mut C, x: u8, y: u8, on: bool) -> Result<(), Error> {
    if x >= canvas.width() || y >= canvas.height() {
        return Err(Error::OutOfBounds);
    }
    canvas.set_pixel(x, y, on);
    Ok(())
}

/// Set every pixel of the canvas to `on`
pub fn fill<C: Canvas + ?Sized>(canvas: &mut C, on: bool) {
    for x in 0..canvas.width() {
        for y in 0..canvas.height() {
            canvas.set_pixel(x, y, on);
        }
    }
}

/// Clamp `value` to `max`, reporting whether clamping was needed
fn clamp(value: u8, max: u8) -> (u8, bool) {
    if value > max {
        (max, true)
    } else {
        (value, false)
    }
}

/// Draw a rectangle with corners `(x0, y0)` and `(x1, y1)`, inclusive
///
/// Each coordinate is clamped to the display independently. When all four
/// needed clamping the rectangle lies entirely off-screen and
/// [`Error::OutOfBounds`] is returned.
pub fn put_rectangle<C: Canvas + ?Sized>(
    canvas: &mut C,
    x0: u8,
    y0: u8,
    x1: u8,
    y1: u8,
    params: DrawParams,
) -> Result<(), Error> {
    let x_max = canvas.width() - 1;
    let y_max = canvas.height() - 1;

    let (x0, cx0) = clamp(x0, x_max);
    let (x1, cx1) = clamp(x1, x_max);
    let (y0, cy0) = clamp(y0, y_max);
    let (y1, cy1) = clamp(y1, y_max);
    if cx0 && cx1 && cy0 && cy1 {
        return Err(Error::OutOfBounds);
    }

    let color = params.color();
    let (left, right) = (x0.min(x1), x0.max(x1));
    let (top, bottom) = (y0.min(y1), y0.max(y1));

    if params.is_fill() {
        for x in left..=right {
            for y in top..=bottom {
                canvas.set_pixel(x, y, color);
            }
        }
    } else {
        for x in left..=right {
            canvas.set_pixel(x, top, color);
            canvas.set_pixel(x, bottom, color);
        }
        for y in top..=bottom {
            canvas.set_pixel(left, y, color);
            canvas.set_pixel(right, y, color);
        }
    }

    Ok(())
}

/// Draw a line from `(x0, y0)` to `(x1, y1)`, inclusive
///
/// Coordinates are clamped to the display; if both x or both y coordinates
/// needed clamping the line cannot appear on screen and
/// [`Error::OutOfBounds`] is returned.
///
/// Horizontal, vertical and 45° lines are drawn directly. Other slopes are
/// drawn as a staircase of flat runs along the longer axis (see
/// [`stair_runs`]). The fill flag has no effect on lines.
pub fn put_line<C: Canvas + ?Sized>(
    canvas: &mut C,
    x0: u8,
    y0: u8,
    x1: u8,
    y1: u8,
    params: DrawParams,
) -> Result<(), Error> {
    let x_max = canvas.width() - 1;
    let y_max = canvas.height() - 1;

    let (x0, cx0) = clamp(x0, x_max);
    let (x1, cx1) = clamp(x1, x_max);
    let (y0, cy0) = clamp(y0, y_max);
    let (y1, cy1) = clamp(y1, y_max);
    if (cx0 && cx1) || (cy0 && cy1) {
        return Err(Error::OutOfBounds);
    }

    // Start from the left end (the top one for vertical lines), so a line
    // and its reverse rasterize to the same pixels.
    let ((sx, sy), (ex, ey)) = if (x0, y0) > (x1, y1) {
        ((x1, y1), (x0, y0))
    } else {
        ((x0, y0), (x1, y1))
    };

    let color = params.color();
    let dx = ex - sx;
    let dy = sy.abs_diff(ey);
    let rising = ey < sy;
    let row = |offset: u8| if rising { sy - offset } else { sy + offset };

    if dy == 0 {
        for x in sx..=ex {
            canvas.set_pixel(x, sy, color);
        }
    } else if dx == 0 {
        for y in sy..=ey {
            canvas.set_pixel(sx, y, color);
        }
    } else if dx == dy {
        for i in 0..=dx {
            canvas.set_pixel(sx + i, row(i), color);
        }
    } else if dx > dy {
        stair_runs(dx, dy, |along, step| canvas.set_pixel(sx + along, row(step), color));
    } else {
        stair_runs(dy, dx, |along, step| canvas.set_pixel(sx + step, row(along), color));
    }

    Ok(())
}

/// Walk a staircase of `delta_small + 1` flat runs covering
/// `delta_big + 1` positions along the long axis
///
/// Calls `plot(along, step)` once per long-axis position, where `step` is
/// the short-axis offset of the run it belongs to. Runs are
/// `(delta_big + 1) / (delta_small + 1)` long; the remainder is handed out
/// one extra pixel at a time, spread evenly across the runs by an integer
/// accumulator.
///
/// Requires `delta_big > delta_small`.
pub fn stair_runs(delta_big: u8, delta_small: u8, mut plot: impl FnMut(u8, u8)) {
    debug_assert!(delta_big > delta_small);

    let runs = u32::from(delta_small) + 1;
    let pixels = u32::from(delta_big) + 1;
    let base = pixels / runs;
    let long_runs = pixels % runs;

    let mut along = 0u32;
    let mut granted = 0u32;
    for step in 0..runs {
        // Run `step` is long when the running share of long runs crosses
        // the next integer.
        let share = (step + 1) * long_runs / runs;
        let len = if share > granted {
            granted = share;
            base + 1
        } else {
            base
        };
        for _ in 0..len {
            plot(along as u8, step as u8);
            along += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::framebuffer::{buffer_len, Framebuffer};
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use std::vec;
    use std::vec::Vec;

    /// Records every pixel write and refuses writes outside the canvas
    struct Recorder {
        width: u8,
        height: u8,
        on: BTreeSet<(u8, u8)>,
        writes: Vec<(u8, u8)>,
    }

    impl Recorder {
        fn new(width: u8, height: u8) -> Self {
            Self {
                width,
                height,
                on: BTreeSet::new(),
                writes: Vec::new(),
            }
        }
    }

    impl Canvas for Recorder {
        fn width(&self) -> u8 {
            self.width
        }

        fn height(&self) -> u8 {
            self.height
        }

        fn set_pixel(&mut self, x: u8, y: u8, on: bool) {
            assert!(x < self.width && y < self.height, "write at ({x}, {y})");
            self.writes.push((x, y));
            if on {
                self.on.insert((x, y));
            } else {
                self.on.remove(&(x, y));
            }
        }

        fn get_pixel(&self, x: u8, y: u8) -> bool {
            self.on.contains(&(x, y))
        }
    }

    fn line(x0: u8, y0: u8, x1: u8, y1: u8) -> BTreeSet<(u8, u8)> {
        let mut canvas = Recorder::new(128, 64);
        put_line(&mut canvas, x0, y0, x1, y1, DrawParams::BLACK).unwrap();
        canvas.on
    }

    /// Longest run of consecutive pixels sharing a row or a column
    fn longest_run(pixels: &BTreeSet<(u8, u8)>, horizontal: bool) -> usize {
        let mut best = 0;
        for &(x, y) in pixels {
            let mut len = 1;
            loop {
                let next = if horizontal {
                    (x + len as u8, y)
                } else {
                    (x, y + len as u8)
                };
                if !pixels.contains(&next) {
                    break;
                }
                len += 1;
            }
            best = best.max(len);
        }
        best
    }

    #[test]
    fn test_put_pixel_bounds() {
        let mut canvas = Recorder::new(128, 64);
        assert_eq!(put_pixel(&mut canvas, 127, 63, true), Ok(()));
        assert_eq!(put_pixel(&mut canvas, 128, 0, true), Err(Error::OutOfBounds));
        assert_eq!(put_pixel(&mut canvas, 0, 64, true), Err(Error::OutOfBounds));
        assert_eq!(canvas.writes, vec![(127, 63)]);
    }

    #[test]
    fn test_filled_rectangle_count() {
        let mut canvas = Recorder::new(128, 64);
        put_rectangle(&mut canvas, 10, 20, 4, 5, DrawParams::FILL | DrawParams::BLACK).unwrap();
        assert_eq!(canvas.on.len(), 7 * 16);
        assert!(canvas.on.contains(&(4, 5)));
        assert!(canvas.on.contains(&(10, 20)));
    }

    #[test]
    fn test_outline_rectangle_perimeter() {
        let mut canvas = Recorder::new(128, 64);
        put_rectangle(&mut canvas, 2, 3, 9, 7, DrawParams::BLACK).unwrap();

        let expected: BTreeSet<_> = (2..=9u8)
            .flat_map(|x| (3..=7u8).map(move |y| (x, y)))
            .filter(|&(x, y)| x == 2 || x == 9 || y == 3 || y == 7)
            .collect();
        assert_eq!(canvas.on, expected);
        assert_eq!(canvas.on.len(), 2 * 8 + 2 * 3);
    }

    #[test]
    fn test_white_rectangle_clears() {
        let mut buf = [0xFFu8; 1024];
        let mut fb = Framebuffer::new(&mut buf, 128, 64).unwrap();
        put_rectangle(&mut fb, 0, 0, 7, 7, DrawParams::FILL | DrawParams::WHITE).unwrap();
        assert!(fb.as_bytes()[..8].iter().all(|&b| b == 0));
        assert_eq!(fb.as_bytes()[8], 0xFF);
    }

    #[test]
    fn test_rectangle_fully_off_screen() {
        let mut canvas = Recorder::new(128, 64);
        let res = put_rectangle(&mut canvas, 200, 100, 130, 64, DrawParams::FILL);
        assert_eq!(res, Err(Error::OutOfBounds));
        assert!(canvas.writes.is_empty());
    }

    #[test]
    fn test_rectangle_partially_clamped() {
        let mut canvas = Recorder::new(128, 64);
        put_rectangle(&mut canvas, 120, 60, 200, 200, DrawParams::FILL | DrawParams::BLACK).unwrap();
        assert_eq!(canvas.on.len(), 8 * 4);
    }

    #[test]
    fn test_straight_lines() {
        let h = line(5, 5, 50, 5);
        assert_eq!(h.len(), 46);
        assert!(h.iter().all(|&(_, y)| y == 5));

        let v = line(5, 30, 5, 5);
        assert_eq!(v.len(), 26);
        assert!(v.iter().all(|&(x, _)| x == 5));

        assert_eq!(line(7, 7, 7, 7), BTreeSet::from([(7, 7)]));
    }

    #[test]
    fn test_diagonal_0_0_to_50_50() {
        let expected: BTreeSet<_> = (0..=50u8).map(|i| (i, i)).collect();
        assert_eq!(line(0, 0, 50, 50), expected);
        assert_eq!(line(50, 50, 0, 0), expected);
    }

    #[test]
    fn test_rising_diagonal() {
        let expected: BTreeSet<_> = (0..=30u8).map(|i| (i, 30 - i)).collect();
        assert_eq!(line(0, 30, 30, 0), expected);
        assert_eq!(line(30, 0, 0, 30), expected);
    }

    #[test]
    fn test_even_staircase() {
        // 5 runs of 4 pixels, one row apart
        let pixels = line(0, 0, 19, 4);
        assert_eq!(pixels.len(), 20);
        for step in 0..5u8 {
            let run: Vec<_> = pixels.iter().filter(|&&(_, y)| y == step).collect();
            assert_eq!(run.len(), 4);
            assert_eq!(*run[0], (step * 4, step));
        }
    }

    #[test]
    fn test_one_step_line_splits_in_halves() {
        let pixels = line(0, 0, 10, 1);
        let top = pixels.iter().filter(|&&(_, y)| y == 0).count();
        let bottom = pixels.iter().filter(|&&(_, y)| y == 1).count();
        assert_eq!((top, bottom), (5, 6));
    }

    #[test]
    fn test_remainder_equal_to_short_delta() {
        // delta_big % delta_small == delta_small - 1 and friends: no
        // division by zero, exact endpoints
        for &(x1, y1) in &[(11u8, 4u8), (9, 5), (7, 6), (100, 63), (63, 62)] {
            let pixels = line(0, 0, x1, y1);
            assert_eq!(pixels.len(), x1 as usize + 1);
            assert!(pixels.contains(&(0, 0)));
            assert!(pixels.contains(&(x1, y1)));
        }
    }

    #[test]
    fn test_steep_lines() {
        let pixels = line(5, 5, 15, 45);
        assert_eq!(pixels.len(), 41);
        assert!(pixels.contains(&(5, 5)));
        assert!(pixels.contains(&(15, 45)));
        // one pixel per row
        let rows: BTreeSet<_> = pixels.iter().map(|&(_, y)| y).collect();
        assert_eq!(rows.len(), 41);

        let rising = line(0, 45, 30, 0);
        assert_eq!(rising.len(), 46);
        assert!(rising.contains(&(0, 45)));
        assert!(rising.contains(&(30, 0)));
    }

    #[test]
    fn test_line_out_of_bounds() {
        let mut canvas = Recorder::new(128, 64);
        assert_eq!(
            put_line(&mut canvas, 130, 0, 140, 10, DrawParams::BLACK),
            Err(Error::OutOfBounds)
        );
        assert_eq!(
            put_line(&mut canvas, 0, 70, 10, 64, DrawParams::BLACK),
            Err(Error::OutOfBounds)
        );
        assert!(canvas.writes.is_empty());

        // one clamped endpoint still draws
        put_line(&mut canvas, 0, 0, 200, 0, DrawParams::BLACK).unwrap();
        assert_eq!(canvas.on.len(), 128);
    }

    #[test]
    fn test_stair_runs_covers_every_position() {
        let mut seen = Vec::new();
        stair_runs(12, 5, |along, step| seen.push((along, step)));
        let along: Vec<_> = seen.iter().map(|&(a, _)| a).collect();
        assert_eq!(along, (0..=12).collect::<Vec<u8>>());
        assert_eq!(seen.first(), Some(&(0, 0)));
        assert_eq!(seen.last(), Some(&(12, 5)));
        // steps never go backwards or skip
        for pair in seen.windows(2) {
            let diff = pair[1].1 - pair[0].1;
            assert!(diff <= 1);
        }
    }

    #[test]
    fn test_framebuffer_shapes_use_page_layout() {
        let mut buf = [0u8; buffer_len(128, 64)];
        let mut fb = Framebuffer::new(&mut buf, 128, 64).unwrap();
        put_line(&mut fb, 0, 0, 0, 7, DrawParams::BLACK).unwrap();
        assert_eq!(fb.as_bytes()[0], 0xFF);
        assert_eq!(fb.as_bytes()[128], 0);
    }

    proptest! {
        #[test]
        fn prop_shapes_stay_on_canvas(
            x0 in any::<u8>(), y0 in any::<u8>(),
            x1 in any::<u8>(), y1 in any::<u8>(),
            bits in 0u8..=DrawParams::MAX_BITS,
        ) {
            let params = DrawParams::from_bits(bits).unwrap();
            // Recorder asserts every write is in range
            let mut canvas = Recorder::new(128, 64);
            let _ = put_rectangle(&mut canvas, x0, y0, x1, y1, params);
            let _ = put_line(&mut canvas, x0, y0, x1, y1, params);
        }

        #[test]
        fn prop_filled_rectangle_area(
            x0 in 0u8..128, y0 in 0u8..64, x1 in 0u8..128, y1 in 0u8..64,
        ) {
            let mut canvas = Recorder::new(128, 64);
            put_rectangle(&mut canvas, x0, y0, x1, y1, DrawParams::FILL | DrawParams::BLACK).unwrap();
            let area = (x0.abs_diff(x1) as usize + 1) * (y0.abs_diff(y1) as usize + 1);
            prop_assert_eq!(canvas.on.len(), area);
        }

        #[test]
        fn prop_line_is_symmetric_and_complete(
            x0 in 0u8..128, y0 in 0u8..64, x1 in 0u8..128, y1 in 0u8..64,
        ) {
            let forward = line(x0, y0, x1, y1);
            let backward = line(x1, y1, x0, y0);
            prop_assert_eq!(&forward, &backward);

            let dx = x0.abs_diff(x1);
            let dy = y0.abs_diff(y1);
            let delta_big = dx.max(dy);
            let delta_small = dx.min(dy);
            prop_assert_eq!(forward.len(), delta_big as usize + 1);
            prop_assert!(forward.contains(&(x0, y0)));
            prop_assert!(forward.contains(&(x1, y1)));

            if delta_small > 0 && delta_big > delta_small {
                let bound = (delta_big as usize).div_ceil(delta_small as usize) + 1;
                prop_assert!(longest_run(&forward, true) <= bound);
                prop_assert!(longest_run(&forward, false) <= bound);
            }
        }
    }
}
