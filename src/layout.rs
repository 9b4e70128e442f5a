//! Screen geometry shared by the frames: panel outlines, text rows and the moon disc.

use crate::lunar::{moon_face, MoonFace};
use crate::surface::{FontSize, Surface};
use embedded_graphics::pixelcolor::Rgb565;

/// Corner radius of the header and footer panels.
pub const HEADER_RAD: i32 = 8;
/// First pixel row below the header panel.
pub const HEADER_Y: i32 = 36;
/// Left text margin.
pub const LEFT_COL: i32 = 6;
/// Right text margin (anchor for right-aligned text).
pub const RIGHT_COL: i32 = 125;
/// Rows per text frame.
pub const ROWS: usize = 7;

/// Top pixel of each of the seven text rows, one large-font line apart.
pub fn text_rows<S: Surface + ?Sized>(surface: &S) -> [i32; ROWS] {
    let step = surface.font_height(FontSize::Large);
    let mut rows = [1; ROWS];
    for i in 1..ROWS {
        rows[i] = rows[i - 1] + step;
    }
    rows
}

/// Paint the rounded two-tone background used by the weather and almanac frames.
pub fn draw_frame_panels<S: Surface + ?Sized>(surface: &mut S, top: Rgb565, bottom: Rgb565) {
    let w = surface.width();
    let h = surface.height();
    surface.fill_round_rect(0, 0, w, 2 * HEADER_RAD, HEADER_RAD, top);
    surface.fill_rect(0, HEADER_RAD, w, HEADER_Y - HEADER_RAD, top);
    surface.fill_rect(0, HEADER_Y, w, h - HEADER_Y - HEADER_RAD, bottom);
    surface.fill_round_rect(0, h - 2 * HEADER_RAD, w, 2 * HEADER_RAD, HEADER_RAD, bottom);
}

/// Rasterize the moon disc for a lunation fraction with horizontal spans.
///
/// Each scan line is split at the terminator, an ellipse whose half-width
/// shrinks to zero at the quarters. The lit side is on the right while
/// waxing and on the left while waning.
pub fn draw_moon_face<S: Surface + ?Sized>(
    surface: &mut S,
    xc: i32,
    yc: i32,
    r: i32,
    fraction: f64,
    lit: Rgb565,
    dark: Rgb565,
) {
    let (face, f) = moon_face(fraction);
    let rr = (r * r) as f64;

    for y in 0..=r {
        let half_chord = (rr - (y * y) as f64).max(0.0).sqrt();
        let x_moon = half_chord as i32;
        let x_ellipse = (f * half_chord) as i32;
        let xl = xc - x_moon;
        let xr = xc + x_moon;

        let (xp, left, right) = match face {
            MoonFace::WaxingCrescent => (xc + x_ellipse, dark, lit),
            MoonFace::WaxingGibbous => (xc - x_ellipse, dark, lit),
            MoonFace::WaningGibbous => (xc + x_ellipse, lit, dark),
            MoonFace::WaningCrescent => (xc - x_ellipse, lit, dark),
        };

        for row in [yc - y, yc + y] {
            surface.draw_hline(xl, row, xp - xl, left);
            surface.draw_hline(xp, row, xr - xp, right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::palette;
    use crate::surface::{Canvas, DrawOp, RecordingSurface};

    #[test]
    fn rows_are_one_large_line_apart() {
        let surface = RecordingSurface::new(128, 128);
        assert_eq!(text_rows(&surface), [1, 19, 37, 55, 73, 91, 109]);
    }

    #[test]
    fn frame_panels_cover_the_screen() {
        let mut canvas = Canvas::new(FrameBuffer::new(128, 128));
        draw_frame_panels(&mut canvas, palette::YELLOW, palette::BLUE);
        let fb = canvas.target();
        assert_eq!(fb.pixel(64, 0), Some(palette::YELLOW));
        assert_eq!(fb.pixel(64, HEADER_Y - 1), Some(palette::YELLOW));
        assert_eq!(fb.pixel(64, HEADER_Y), Some(palette::BLUE));
        assert_eq!(fb.pixel(64, 127), Some(palette::BLUE));
    }

    fn lit_spans(fraction: f64) -> (i32, i32) {
        let mut surface = RecordingSurface::new(128, 128);
        draw_moon_face(&mut surface, 20, 109, 15, fraction, palette::WHITE, palette::DARKBLUE);
        let mut left = 0;
        let mut right = 0;
        for op in surface.ops() {
            if let DrawOp::HLine { x, w, color, .. } = op {
                if *color == palette::WHITE && *w > 0 {
                    if *x < 20 {
                        left += w;
                    } else {
                        right += w;
                    }
                }
            }
        }
        (left, right)
    }

    #[test]
    fn new_moon_is_dark_and_full_moon_is_lit() {
        let (left, right) = lit_spans(0.0);
        assert_eq!(left + right, 0);
        let (left, right) = lit_spans(0.5);
        // One span per scan line covering the whole disc
        assert!(left + right >= 31 * 15);
    }

    #[test]
    fn waxing_lights_the_right_side() {
        let (left, right) = lit_spans(0.2);
        assert_eq!(left, 0);
        assert!(right > 0);
        let (left, right) = lit_spans(0.8);
        assert!(left > 0);
        assert_eq!(right, 0);
    }
}
