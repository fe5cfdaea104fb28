//! Drawing backend that never fails on text
//!
//! Headless hosts frequently have no TrueType font available. Text the wrapped
//! backend cannot shape is drawn with a built-in 5x7 bitmap font instead, and
//! text extents are estimated from the same glyph metrics.

use std::panic;

use plotters_backend::{
    text_anchor, BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend,
    DrawingErrorKind,
};

const GLYPH_HEIGHT: usize = 7;
const SPACE_WIDTH: i32 = 3;

pub struct FontSafeBackend<DB> {
    inner: DB,
}

impl<DB> FontSafeBackend<DB> {
    pub fn new(inner: DB) -> Self {
        Self { inner }
    }
}

impl<DB: DrawingBackend> DrawingBackend for FontSafeBackend<DB> {
    type ErrorType = DB::ErrorType;

    fn get_size(&self) -> (u32, u32) {
        self.inner.get_size()
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.ensure_prepared()
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.present()
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_pixel(point, color)
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_line(from, to, style)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_rect(upper_left, bottom_right, style, fill)
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_path(path, style)
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_circle(center, radius, style, fill)
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.fill_polygon(vert, style)
    }

    fn blit_bitmap(
        &mut self,
        pos: BackendCoord,
        (iw, ih): (u32, u32),
        src: &[u8],
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.blit_bitmap(pos, (iw, ih), src)
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        let attempt = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            self.inner.draw_text(text, style, pos)
        }));
        match attempt {
            Ok(Err(DrawingErrorKind::FontError(_))) | Err(_) => {
                self.draw_fallback_text(text, style, pos)
            }
            Ok(result) => result,
        }
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Self::ErrorType>> {
        let attempt = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            self.inner.estimate_text_size(text, style)
        }));
        match attempt {
            Ok(Ok(size)) => Ok(size),
            Ok(Err(DrawingErrorKind::DrawingError(e))) => Err(DrawingErrorKind::DrawingError(e)),
            _ => {
                let (w, h) = fallback_extent(text, fallback_scale(style.size()));
                Ok((w.max(0) as u32, h.max(0) as u32))
            }
        }
    }
}

impl<DB: DrawingBackend> FontSafeBackend<DB> {
    fn draw_fallback_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<DB::ErrorType>> {
        let color = style.color();
        if color.alpha == 0.0 || text.trim().is_empty() {
            return Ok(());
        }

        let scale = fallback_scale(style.size());
        let (width, height) = fallback_extent(text, scale);
        let dx = match style.anchor().h_pos {
            text_anchor::HPos::Left => 0,
            text_anchor::HPos::Right => -width,
            text_anchor::HPos::Center => -width / 2,
        };
        let dy = match style.anchor().v_pos {
            text_anchor::VPos::Top => 0,
            text_anchor::VPos::Center => -height / 2,
            text_anchor::VPos::Bottom => -height,
        };
        let transform = style.transform();

        let mut cursor = dx;
        for ch in text.chars() {
            let Some(glyph) = glyph(ch) else {
                cursor += scale * SPACE_WIDTH;
                continue;
            };
            for (row, bits) in glyph.rows.iter().enumerate() {
                for col in 0..glyph.width {
                    if bits & (1 << (glyph.width - 1 - col)) == 0 {
                        continue;
                    }
                    let x = cursor + col as i32 * scale;
                    let y = dy + row as i32 * scale;
                    for px in 0..scale {
                        for py in 0..scale {
                            let (tx, ty) = transform.transform(x + px, y + py);
                            self.inner.draw_pixel((pos.0 + tx, pos.1 + ty), color.clone())?;
                        }
                    }
                }
            }
            cursor += scale * (glyph.width as i32 + 1);
        }
        Ok(())
    }
}

/// Pixel block size for a font of `size` pixels; cap height is about 70%
fn fallback_scale(size: f64) -> i32 {
    ((size * 0.7) / GLYPH_HEIGHT as f64).round().max(1.0) as i32
}

fn fallback_extent(text: &str, scale: i32) -> (i32, i32) {
    let width: i32 = text
        .chars()
        .map(|ch| match glyph(ch) {
            Some(g) => g.width as i32 + 1,
            None => SPACE_WIDTH,
        })
        .sum();
    (width * scale, GLYPH_HEIGHT as i32 * scale)
}

#[derive(Clone, Copy)]
struct Glyph {
    width: u8,
    rows: [u8; GLYPH_HEIGHT],
}

const fn g5(rows: [u8; GLYPH_HEIGHT]) -> Glyph {
    Glyph { width: 5, rows }
}

const fn g3(rows: [u8; GLYPH_HEIGHT]) -> Glyph {
    Glyph { width: 3, rows }
}

fn glyph(ch: char) -> Option<Glyph> {
    let ch = match ch {
        'α' => 'A',
        'β' => 'B',
        'μ' | 'µ' => 'U',
        other => other.to_ascii_uppercase(),
    };
    Some(match ch {
        'A' => g5([0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
        'B' => g5([0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110]),
        'C' => g5([0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110]),
        'D' => g5([0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100]),
        'E' => g5([0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111]),
        'F' => g5([0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000]),
        'G' => g5([0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111]),
        'H' => g5([0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
        'I' => g3([0b111, 0b010, 0b010, 0b010, 0b010, 0b010, 0b111]),
        'J' => g5([0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100]),
        'K' => g5([0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001]),
        'L' => g5([0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111]),
        'M' => g5([0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001]),
        'N' => g5([0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001]),
        'O' => g5([0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
        'P' => g5([0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000]),
        'Q' => g5([0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101]),
        'R' => g5([0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001]),
        'S' => g5([0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110]),
        'T' => g5([0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100]),
        'U' => g5([0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
        'V' => g5([0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100]),
        'W' => g5([0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010]),
        'X' => g5([0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001]),
        'Y' => g5([0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100]),
        'Z' => g5([0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111]),
        '0' => g5([0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110]),
        '1' => g3([0b010, 0b110, 0b010, 0b010, 0b010, 0b010, 0b111]),
        '2' => g5([0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111]),
        '3' => g5([0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110]),
        '4' => g5([0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010]),
        '5' => g5([0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110]),
        '6' => g5([0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110]),
        '7' => g5([0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000]),
        '8' => g5([0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110]),
        '9' => g5([0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100]),
        '-' => g3([0b000, 0b000, 0b000, 0b111, 0b000, 0b000, 0b000]),
        '+' => g5([0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000]),
        '=' => g5([0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000]),
        '%' => g5([0b11001, 0b11010, 0b00010, 0b00100, 0b01000, 0b01011, 0b10011]),
        '&' => g5([0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101]),
        '_' => g5([0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111]),
        '/' => g3([0b001, 0b001, 0b010, 0b010, 0b010, 0b100, 0b100]),
        '(' => g3([0b001, 0b010, 0b100, 0b100, 0b100, 0b010, 0b001]),
        ')' => g3([0b100, 0b010, 0b001, 0b001, 0b001, 0b010, 0b100]),
        '[' => g3([0b110, 0b100, 0b100, 0b100, 0b100, 0b100, 0b110]),
        ']' => g3([0b011, 0b001, 0b001, 0b001, 0b001, 0b001, 0b011]),
        '.' => Glyph { width: 1, rows: [0, 0, 0, 0, 0, 0, 1] },
        ',' => Glyph { width: 2, rows: [0, 0, 0, 0, 0, 0b01, 0b10] },
        ':' => Glyph { width: 1, rows: [0, 1, 0, 0, 0, 1, 0] },
        _ => return None,
    })
}
