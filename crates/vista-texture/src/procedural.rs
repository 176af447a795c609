//! Deterministic synthetic panoramas, used when no real image can be loaded.

use std::f32::consts::PI;
use std::fmt;

use image::{Rgba, RgbaImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProceduralKind {
    /// 2048×1024 sky / mountains / ground scene with 45° reference lines.
    Panorama,
    /// 512×256 checkerboard.
    Test,
}

impl ProceduralKind {
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            ProceduralKind::Panorama => (2048, 1024),
            ProceduralKind::Test => (512, 256),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProceduralKind::Panorama => "panorama",
            ProceduralKind::Test => "test",
        }
    }
}

impl fmt::Display for ProceduralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generate the bitmap for `kind`. Pure: equal inputs give equal bytes.
pub fn generate(kind: ProceduralKind) -> RgbaImage {
    match kind {
        ProceduralKind::Panorama => panorama(),
        ProceduralKind::Test => checkerboard(),
    }
}

fn panorama() -> RgbaImage {
    let (w, h) = ProceduralKind::Panorama.dimensions();
    let grid_step = w / 8;
    let horizon = h / 2;

    RgbaImage::from_fn(w, h, |x, y| {
        let u = x as f32 / w as f32;
        let v = y as f32 / h as f32;
        let [r, g, b] = scene_color(u, v);

        let on_grid = x % grid_step < 2 || y == horizon;
        let [r, g, b] = if on_grid {
            [r.saturating_add(80), g.saturating_add(80), b / 2]
        } else {
            [r, g, b]
        };
        Rgba([r, g, b, 255])
    })
}

fn scene_color(u: f32, v: f32) -> [u8; 3] {
    if v < 0.4 {
        // Sky: brighter toward the zenith.
        let cloud = (u * PI * 6.0).sin() * (v * PI * 8.0).sin() * (u * PI * 15.0).sin();
        if cloud > 0.4 {
            return [255, 255, 255];
        }
        let t = 1.0 - v / 0.4;
        [
            channel(70.0 + 80.0 * t),
            channel(130.0 + 70.0 * t),
            channel(200.0 + 55.0 * t),
        ]
    } else if v < 0.7 {
        let ridge = 0.55 + 0.15 * (u * PI * 8.0).sin();
        if v < ridge {
            let shade = 0.7 + 0.3 * (u * PI * 20.0).sin();
            let gray = 120.0 * shade;
            [channel(gray), channel(gray), channel(gray + 20.0)]
        } else {
            [60, 110, 50]
        }
    } else {
        let grass = (u * PI * 40.0).sin() * (v * PI * 30.0).sin();
        [
            channel(50.0 + 15.0 * grass),
            channel(120.0 + 25.0 * grass),
            channel(40.0 + 10.0 * grass),
        ]
    }
}

fn checkerboard() -> RgbaImage {
    let (w, h) = ProceduralKind::Test.dimensions();
    let (cell_w, cell_h) = (w / 8, h / 8);
    RgbaImage::from_fn(w, h, |x, y| {
        if ((x / cell_w) + (y / cell_h)) % 2 == 0 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([100, 120, 150, 255])
        }
    })
}

fn channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
