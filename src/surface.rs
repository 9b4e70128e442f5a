//! # Render Surface
//!
//! Every frame renderer draws through the [`Surface`] trait rather than a concrete display.
//! The trait mirrors the small set of TFT primitives the frames need: rectangles, rounded
//! rectangles, lines, triangles, circles, horizontal spans and anchored text.
//!
//! ## Implementations
//!
//! - [`Canvas`]: wraps any embedded-graphics `DrawTarget<Color = Rgb565>`, which covers both
//!   the ST7735 driver and the in-memory [`FrameBuffer`](crate::framebuffer::FrameBuffer)
//! - [`RecordingSurface`]: keeps a log of every draw call, for tests that care about *what*
//!   was drawn (and how often) rather than the resulting pixels
//!
//! ## Text
//!
//! Text is placed with a [`Datum`], the anchor point of the string box, exactly like the
//! TFT libraries the layouts were designed against. Both implementations measure text with
//! the same monospaced font metrics, so layouts computed against a `RecordingSurface` match
//! what a `Canvas` would draw.

use embedded_graphics::{
    mono_font::{
        iso_8859_1::{FONT_6X10, FONT_9X18_BOLD},
        MonoFont, MonoTextStyleBuilder,
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

/// Anchor point of a text box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Datum {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleCenter,
}

/// The two text sizes used on the 128x128 panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontSize {
    /// 6x10, 21 characters per line
    Small,
    /// 9x18 bold, 14 characters per line
    Large,
}

impl FontSize {
    pub fn mono_font(self) -> &'static MonoFont<'static> {
        match self {
            FontSize::Small => &FONT_6X10,
            FontSize::Large => &FONT_9X18_BOLD,
        }
    }

    /// Width in pixels of `text` set in this font.
    pub fn text_width(self, text: &str) -> i32 {
        let font = self.mono_font();
        let chars = text.chars().count() as i32;
        if chars == 0 {
            return 0;
        }
        chars * font.character_size.width as i32 + (chars - 1) * font.character_spacing as i32
    }

    pub fn height(self) -> i32 {
        self.mono_font().character_size.height as i32
    }
}

/// How a string is drawn: font, anchor, ink and optional background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pen {
    pub font: FontSize,
    pub datum: Datum,
    pub color: Rgb565,
    /// When set, the glyph cells are filled, which overwrites previous text.
    pub background: Option<Rgb565>,
}

impl Pen {
    pub fn new(font: FontSize, color: Rgb565) -> Self {
        Self {
            font,
            datum: Datum::TopLeft,
            color,
            background: None,
        }
    }

    pub fn datum(mut self, datum: Datum) -> Self {
        self.datum = datum;
        self
    }

    pub fn background(mut self, background: Rgb565) -> Self {
        self.background = Some(background);
        self
    }
}

/// Drawing primitives required by the frame renderers.
///
/// Coordinates are in pixels with the origin at the top-left corner.
/// Drawing outside the surface is clipped, never an error.
pub trait Surface {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    fn fill_screen(&mut self, color: Rgb565);
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565);
    fn draw_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: Rgb565);
    fn fill_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: Rgb565);
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb565);
    fn draw_hline(&mut self, x: i32, y: i32, w: i32, color: Rgb565);
    fn fill_triangle(&mut self, a: Point, b: Point, c: Point, color: Rgb565);
    fn fill_circle(&mut self, center: Point, radius: i32, color: Rgb565);
    fn draw_circle(&mut self, center: Point, radius: i32, color: Rgb565);
    fn draw_text(&mut self, text: &str, at: Point, pen: Pen);

    fn text_width(&self, text: &str, font: FontSize) -> i32 {
        font.text_width(text)
    }

    fn font_height(&self, font: FontSize) -> i32 {
        font.height()
    }
}

/// [`Surface`] backed by an embedded-graphics draw target.
///
/// Draw errors are dropped: a glitch on one primitive must not stop the frame.
pub struct Canvas<D> {
    target: D,
}

impl<D> Canvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Option<Rectangle> {
        if w <= 0 || h <= 0 {
            return None;
        }
        Some(Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32)))
    }
}

impl<D> Surface for Canvas<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    fn width(&self) -> i32 {
        self.target.size().width as i32
    }

    fn height(&self) -> i32 {
        self.target.size().height as i32
    }

    fn fill_screen(&mut self, color: Rgb565) {
        self.target.clear(color).ok();
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        if let Some(rect) = Self::rect(x, y, w, h) {
            self.target.fill_solid(&rect, color).ok();
        }
    }

    fn draw_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: Rgb565) {
        if let Some(rect) = Self::rect(x, y, w, h) {
            let corner = Size::new(radius.max(0) as u32, radius.max(0) as u32);
            RoundedRectangle::with_equal_corners(rect, corner)
                .into_styled(PrimitiveStyle::with_stroke(color, 1))
                .draw(&mut self.target)
                .ok();
        }
    }

    fn fill_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: Rgb565) {
        if let Some(rect) = Self::rect(x, y, w, h) {
            let corner = Size::new(radius.max(0) as u32, radius.max(0) as u32);
            RoundedRectangle::with_equal_corners(rect, corner)
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(&mut self.target)
                .ok();
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb565) {
        Line::new(from, to)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target)
            .ok();
    }

    fn draw_hline(&mut self, x: i32, y: i32, w: i32, color: Rgb565) {
        self.fill_rect(x, y, w, 1, color);
    }

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point, color: Rgb565) {
        Triangle::new(a, b, c)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
            .ok();
    }

    fn fill_circle(&mut self, center: Point, radius: i32, color: Rgb565) {
        let diameter = (2 * radius.max(0) + 1) as u32;
        Circle::with_center(center, diameter)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
            .ok();
    }

    fn draw_circle(&mut self, center: Point, radius: i32, color: Rgb565) {
        let diameter = (2 * radius.max(0) + 1) as u32;
        Circle::with_center(center, diameter)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target)
            .ok();
    }

    fn draw_text(&mut self, text: &str, at: Point, pen: Pen) {
        let mut builder = MonoTextStyleBuilder::new()
            .font(pen.font.mono_font())
            .text_color(pen.color);
        if let Some(background) = pen.background {
            builder = builder.background_color(background);
        }
        let character_style = builder.build();

        let (alignment, baseline) = match pen.datum {
            Datum::TopLeft => (Alignment::Left, Baseline::Top),
            Datum::TopCenter => (Alignment::Center, Baseline::Top),
            Datum::TopRight => (Alignment::Right, Baseline::Top),
            Datum::MiddleCenter => (Alignment::Center, Baseline::Middle),
        };
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(baseline)
            .build();

        Text::with_text_style(text, at, character_style, text_style)
            .draw(&mut self.target)
            .ok();
    }
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillScreen(Rgb565),
    FillRect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Rgb565,
    },
    RoundRect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        radius: i32,
        color: Rgb565,
        filled: bool,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgb565,
    },
    HLine {
        x: i32,
        y: i32,
        w: i32,
        color: Rgb565,
    },
    Triangle {
        points: [Point; 3],
        color: Rgb565,
    },
    Circle {
        center: Point,
        radius: i32,
        color: Rgb565,
        filled: bool,
    },
    Text {
        text: String,
        at: Point,
        pen: Pen,
    },
}

/// [`Surface`] that records draw calls instead of touching pixels.
///
/// Useful for unit tests and for checking incremental-redraw behaviour
/// without a display attached.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: i32,
    height: i32,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Every string drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Strings drawn with their anchor point.
    pub fn texts_at(&self) -> Vec<(&str, Point)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, at, .. } => Some((text.as_str(), *at)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| predicate(op)).count()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn fill_screen(&mut self, color: Rgb565) {
        self.ops.push(DrawOp::FillScreen(color));
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        self.ops.push(DrawOp::FillRect { x, y, w, h, color });
    }

    fn draw_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: Rgb565) {
        self.ops.push(DrawOp::RoundRect {
            x,
            y,
            w,
            h,
            radius,
            color,
            filled: false,
        });
    }

    fn fill_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: Rgb565) {
        self.ops.push(DrawOp::RoundRect {
            x,
            y,
            w,
            h,
            radius,
            color,
            filled: true,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb565) {
        self.ops.push(DrawOp::Line { from, to, color });
    }

    fn draw_hline(&mut self, x: i32, y: i32, w: i32, color: Rgb565) {
        self.ops.push(DrawOp::HLine { x, y, w, color });
    }

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point, color: Rgb565) {
        self.ops.push(DrawOp::Triangle {
            points: [a, b, c],
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: i32, color: Rgb565) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
            filled: true,
        });
    }

    fn draw_circle(&mut self, center: Point, radius: i32, color: Rgb565) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
            filled: false,
        });
    }

    fn draw_text(&mut self, text: &str, at: Point, pen: Pen) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            pen,
        });
    }
}
