//! Software canvas: an ARGB pixel buffer with the few primitives games need.
//!
//! All drawing clips against the canvas bounds, so callers may pass shapes
//! that hang off any edge (pipes do, every frame).

use crate::sensor::PixelFrame;

pub const BLACK: u32 = 0xFF000000;
pub const WHITE: u32 = 0xFFFFFFFF;
pub const RED:   u32 = 0xFFFF0000;
pub const GREEN: u32 = 0xFF00FF00;
pub const BLUE:  u32 = 0xFF0000FF;

/// Pack an opaque ARGB color.
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    0xFF000000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[derive(Clone, Debug)]
pub struct Canvas {
    width:  usize,
    height: usize,
    buf:    Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas { width, height, buf: vec![BLACK; width * height] }
    }

    pub fn width(&self)  -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn pixels(&self) -> &[u32] { &self.buf }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    pub fn fill(&mut self, color: u32) {
        self.buf.fill(color);
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x0 = x.max(0) as usize;
        let y0 = y.max(0) as usize;
        let x1 = (x.saturating_add(w)).clamp(0, self.width as i32) as usize;
        let y1 = (y.saturating_add(h)).clamp(0, self.height as i32) as usize;
        for row in y0..y1 {
            if x0 < x1 {
                self.buf[row * self.width + x0..row * self.width + x1].fill(color);
            }
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        let r = r.max(0);
        for dy in -r..=r {
            // Widest dx with dx² + dy² ≤ r²
            let dx = ((r * r - dy * dy) as f32).sqrt() as i32;
            self.fill_rect(cx - dx, cy + dy, 2 * dx + 1, 1, color);
        }
    }

    /// Line of `thickness` pixels, stamped as squares along a Bresenham walk.
    /// The segment is clipped first, so endpoints may lie anywhere.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, thickness: i32, color: u32) {
        let t = thickness.max(1);
        let half = t / 2;
        // Canvas grown by one stamp, so clipped ends still paint their edge pixels
        let pad = f64::from(t);
        let bounds = (-pad, -pad, self.width as f64 + pad, self.height as f64 + pad);
        let Some(((ax, ay), (bx, by))) =
            clip_segment((x0.into(), y0.into()), (x1.into(), y1.into()), bounds)
        else {
            return;
        };
        let (x0, y0) = (ax.round() as i32, ay.round() as i32);
        let (x1, y1) = (bx.round() as i32, by.round() as i32);

        let (mut x, mut y) = (x0, y0);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.fill_rect(x - half, y - half, t, t, color);
            if x == x1 && y == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    /// Stretch `frame` over the whole canvas (nearest neighbour).
    pub fn blit_scaled(&mut self, frame: &PixelFrame) {
        if frame.width == 0 || frame.height == 0 || frame.pixels.len() < frame.width * frame.height {
            return;
        }
        for row in 0..self.height {
            let sy = row * frame.height / self.height;
            for col in 0..self.width {
                let sx = col * frame.width / self.width;
                self.buf[row * self.width + col] = frame.pixels[sy * frame.width + sx];
            }
        }
    }

    /// Minimal bitmap font, 3×5 characters, scaled by `scale`.
    pub fn draw_label(&mut self, text: &str, x: i32, y: i32, scale: i32, color: u32) {
        let s = scale.max(1);
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3i32 {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * s, y + row as i32 * s, s, s, color);
                    }
                }
            }
            cx += 4 * s; // 3 wide + 1 gap
            if cx >= self.width as i32 { break; }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

/// Rows top to bottom, three bits per row, high bit on the left.
const FONT: &[(char, [u8; 5])] = &[
    ('0', [0b111, 0b101, 0b101, 0b101, 0b111]),
    ('1', [0b010, 0b110, 0b010, 0b010, 0b111]),
    ('2', [0b111, 0b001, 0b111, 0b100, 0b111]),
    ('3', [0b111, 0b001, 0b111, 0b001, 0b111]),
    ('4', [0b101, 0b101, 0b111, 0b001, 0b001]),
    ('5', [0b111, 0b100, 0b111, 0b001, 0b111]),
    ('6', [0b111, 0b100, 0b111, 0b101, 0b111]),
    ('7', [0b111, 0b001, 0b001, 0b001, 0b001]),
    ('8', [0b111, 0b101, 0b111, 0b101, 0b111]),
    ('9', [0b111, 0b101, 0b111, 0b001, 0b111]),
    ('A', [0b111, 0b101, 0b111, 0b101, 0b101]),
    ('B', [0b110, 0b101, 0b110, 0b101, 0b110]),
    ('C', [0b111, 0b100, 0b100, 0b100, 0b111]),
    ('D', [0b110, 0b101, 0b101, 0b101, 0b110]),
    ('E', [0b111, 0b100, 0b111, 0b100, 0b111]),
    ('F', [0b111, 0b100, 0b111, 0b100, 0b100]),
    ('G', [0b111, 0b100, 0b101, 0b101, 0b111]),
    ('H', [0b101, 0b101, 0b111, 0b101, 0b101]),
    ('I', [0b111, 0b010, 0b010, 0b010, 0b111]),
    ('J', [0b001, 0b001, 0b001, 0b101, 0b111]),
    ('K', [0b101, 0b101, 0b110, 0b101, 0b101]),
    ('L', [0b100, 0b100, 0b100, 0b100, 0b111]),
    ('M', [0b101, 0b111, 0b101, 0b101, 0b101]),
    ('N', [0b111, 0b101, 0b101, 0b101, 0b101]),
    ('O', [0b111, 0b101, 0b101, 0b101, 0b111]),
    ('P', [0b111, 0b101, 0b111, 0b100, 0b100]),
    ('Q', [0b111, 0b101, 0b101, 0b111, 0b001]),
    ('R', [0b110, 0b101, 0b110, 0b101, 0b101]),
    ('S', [0b111, 0b100, 0b111, 0b001, 0b111]),
    ('T', [0b111, 0b010, 0b010, 0b010, 0b010]),
    ('U', [0b101, 0b101, 0b101, 0b101, 0b111]),
    ('V', [0b101, 0b101, 0b101, 0b010, 0b010]),
    ('W', [0b101, 0b101, 0b101, 0b111, 0b101]),
    ('X', [0b101, 0b101, 0b010, 0b101, 0b101]),
    ('Y', [0b101, 0b101, 0b111, 0b010, 0b010]),
    ('Z', [0b111, 0b001, 0b010, 0b100, 0b111]),
    ('/', [0b001, 0b001, 0b010, 0b100, 0b100]),
    ('-', [0b000, 0b000, 0b111, 0b000, 0b000]),
    ('.', [0b000, 0b000, 0b000, 0b000, 0b010]),
    (':', [0b000, 0b010, 0b000, 0b010, 0b000]),
    ('=', [0b000, 0b111, 0b000, 0b111, 0b000]),
    (' ', [0b000, 0b000, 0b000, 0b000, 0b000]),
];

const MISSING_GLYPH: [u8; 5] = [0b000, 0b000, 0b010, 0b000, 0b000];

/// Glyph for `c`, folding lowercase onto uppercase.
fn char_glyph(c: char) -> [u8; 5] {
    let c = c.to_ascii_uppercase();
    FONT.iter()
        .find(|(ch, _)| *ch == c)
        .map_or(MISSING_GLYPH, |(_, glyph)| *glyph)
}

/// Liang–Barsky: the part of `p0`→`p1` inside `(xmin, ymin, xmax, ymax)`, or
/// `None` when the segment misses the box.  `f64` holds every `i32` exactly.
fn clip_segment(
    p0: (f64, f64),
    p1: (f64, f64),
    (xmin, ymin, xmax, ymax): (f64, f64, f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, p0.0 - xmin), (dx, xmax - p0.0), (-dy, p0.1 - ymin), (dy, ymax - p0.1)] {
        if p == 0.0 {
            // parallel to this edge and outside it
            if q < 0.0 { return None; }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 { return None; }
            t0 = t0.max(r);
        } else {
            if r < t0 { return None; }
            t1 = t1.min(r);
        }
    }
    let at = |t: f64| (p0.0 + t * dx, p0.1 + t * dy);
    let start = if t0 > 0.0 { at(t0) } else { p0 };
    let end   = if t1 < 1.0 { at(t1) } else { p1 };
    Some((start, end))
}

/// Mix two ARGB colors channel by channel: `t` = 0 gives `a`, `t` = 1 gives
/// `b`.  The result is opaque.
pub fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    [16u32, 8, 0].iter().fold(0xFF000000, |out, &shift| {
        let (ca, cb) = (((a >> shift) & 0xFF) as f32, ((b >> shift) & 0xFF) as f32);
        out | (((ca + (cb - ca) * t).round() as u32) << shift)
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
