//! CPU frame buffer
//!
//! The whole frame is composed here in RGBA8 and handed to the presenter as
//! one texture upload.

use glam::Vec2;
use image::{Pixel, Rgba, RgbaImage, imageops};

use super::scene::{Anchor, DrawCmd, TextAlign};
use crate::assets::{SpriteSet, Typeface};

pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Tightly packed RGBA8 rows, top row first
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn clear(&mut self, color: [u8; 4]) {
        for p in self.image.pixels_mut() {
            *p = Rgba(color);
        }
    }

    /// Alpha-blend `sprite` onto the canvas, clipped to the canvas bounds
    pub fn blit(&mut self, sprite: &RgbaImage, pos: Vec2, anchor: Anchor) {
        let (w, h) = (sprite.width() as f32, sprite.height() as f32);
        let top_left = match anchor {
            Anchor::TopLeft => pos,
            Anchor::Center => pos - Vec2::new(w, h) / 2.0,
            Anchor::BottomCenter => pos - Vec2::new(w / 2.0, h),
        };
        imageops::overlay(
            &mut self.image,
            sprite,
            top_left.x.round() as i64,
            top_left.y.round() as i64,
        );
    }

    /// Width in pixels `text` would occupy at `px`
    pub fn measure_text(typeface: &Typeface, text: &str, px: f32) -> f32 {
        let font = typeface.font();
        text.chars()
            .map(|ch| font.metrics(ch, px).advance_width)
            .sum()
    }

    pub fn draw_text(
        &mut self,
        typeface: &Typeface,
        text: &str,
        pos: Vec2,
        px: f32,
        color: [u8; 4],
        align: TextAlign,
    ) {
        let font = typeface.font();
        let ascent = font
            .horizontal_line_metrics(px)
            .map(|m| m.ascent)
            .unwrap_or(px);

        let mut pen_x = match align {
            TextAlign::Left => pos.x,
            TextAlign::Center => pos.x - Self::measure_text(typeface, text, px) / 2.0,
        };
        let baseline = pos.y + ascent;

        for ch in text.chars() {
            let (metrics, coverage) = font.rasterize(ch, px);
            let gx = (pen_x + metrics.xmin as f32).round() as i64;
            let gy = (baseline - metrics.height as f32 - metrics.ymin as f32).round() as i64;

            for (i, &alpha) in coverage.iter().enumerate() {
                if alpha == 0 {
                    continue;
                }
                let x = gx + (i % metrics.width) as i64;
                let y = gy + (i / metrics.width) as i64;
                let a = (color[3] as u16 * alpha as u16 / 255) as u8;
                self.blend_pixel(x, y, [color[0], color[1], color[2], a]);
            }
            pen_x += metrics.advance_width;
        }
    }

    /// Execute a display list
    pub fn paint(&mut self, cmds: &[DrawCmd], sprites: &SpriteSet, typeface: &Typeface) {
        self.paint_with(cmds, sprites, |canvas, text, pos, px, color, align| {
            canvas.draw_text(typeface, text, pos, px, color, align)
        });
    }

    /// Execute a display list, handing text commands to `text`
    fn paint_with(
        &mut self,
        cmds: &[DrawCmd],
        sprites: &SpriteSet,
        mut text: impl FnMut(&mut Self, &str, Vec2, f32, [u8; 4], TextAlign),
    ) {
        for cmd in cmds {
            match cmd {
                DrawCmd::Clear(color) => self.clear(*color),
                DrawCmd::Sprite { id, pos, anchor } => self.blit(sprites.get(*id), *pos, *anchor),
                DrawCmd::Text {
                    text: run,
                    pos,
                    px,
                    color,
                    align,
                } => text(self, run, *pos, *px, *color, *align),
            }
        }
    }

    fn blend_pixel(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        self.image
            .get_pixel_mut(x as u32, y as u32)
            .blend(&Rgba(color));
    }
}
