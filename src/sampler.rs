//! CPU-side texture sampling for the reference evaluation.
//!
//! Sampling mirrors the repeat + linear sampler a host binds on the GPU:
//! coordinates wrap in both axes and texels are bilinearly filtered.

use glam::Vec4;
use image::RgbaImage;
use std::path::Path;

/// A read-only source image addressed by normalized coordinates.
///
/// Implementations must be total: any finite `(u, v)` yields a color, with
/// out-of-range coordinates wrapping (repeat addressing).
pub trait TextureSource {
    fn sample(&self, u: f32, v: f32) -> Vec4;
}

/// Single flat color, mostly useful for tests and as a fallback source.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor(pub Vec4);

impl TextureSource for SolidColor {
    fn sample(&self, _u: f32, _v: f32) -> Vec4 {
        self.0
    }
}

/// Bilinearly filtered, repeat-wrapped sampler over a decoded RGBA image.
pub struct ImageTexture {
    pixels: RgbaImage,
}

impl ImageTexture {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Decode an image file into a sampler.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let path = path.as_ref();
        log::info!("loading source texture from {}", path.display());
        let img = image::open(path)?;
        let pixels = img.to_rgba8();
        log::info!("texture loaded: {}x{}", pixels.width(), pixels.height());
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn texel(&self, x: u32, y: u32) -> Vec4 {
        let p = self.pixels.get_pixel(x, y).0;
        Vec4::new(
            p[0] as f32 / 255.0,
            p[1] as f32 / 255.0,
            p[2] as f32 / 255.0,
            p[3] as f32 / 255.0,
        )
    }
}

impl TextureSource for ImageTexture {
    fn sample(&self, u: f32, v: f32) -> Vec4 {
        let w = self.pixels.width();
        let h = self.pixels.height();

        // texel-center addressing, as a GPU linear filter does it
        let x = u * w as f32 - 0.5;
        let y = v * h as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;

        let wrap = |i: f32, n: u32| -> u32 { (i as i64).rem_euclid(n as i64) as u32 };
        let xa = wrap(x0, w);
        let xb = wrap(x0 + 1.0, w);
        let ya = wrap(y0, h);
        let yb = wrap(y0 + 1.0, h);

        let top = self.texel(xa, ya) * (1.0 - fx) + self.texel(xb, ya) * fx;
        let bottom = self.texel(xa, yb) * (1.0 - fx) + self.texel(xb, yb) * fx;
        top * (1.0 - fy) + bottom * fy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "expected {} ~ {}", a, b);
    }

    fn checker() -> ImageTexture {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        img.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        img.put_pixel(1, 1, Rgba([255, 255, 255, 255]));
        ImageTexture::new(img)
    }

    #[test]
    fn test_solid_color_ignores_coordinates() {
        let tex = SolidColor(Vec4::new(0.1, 0.2, 0.3, 1.0));
        assert_eq!(tex.sample(0.0, 0.0), tex.sample(123.4, -56.7));
    }

    #[test]
    fn test_texel_center_hits_exact_color() {
        let tex = checker();
        // (0.25, 0.25) is the center of the top-left texel
        let c = tex.sample(0.25, 0.25);
        assert_close(c.x, 1.0);
        assert_close(c.y, 0.0);
        assert_close(c.z, 0.0);
    }

    #[test]
    fn test_repeat_wrap_is_periodic() {
        let tex = checker();
        for &(u, v) in &[(0.1, 0.6), (0.4, 0.9), (0.75, 0.25)] {
            let a = tex.sample(u, v);
            let b = tex.sample(u + 1.0, v);
            let c = tex.sample(u, v - 2.0);
            assert_close(a.x, b.x);
            assert_close(a.y, b.y);
            assert_close(a.x, c.x);
            assert_close(a.z, c.z);
        }
    }

    #[test]
    fn test_single_texel_image_is_constant() {
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, Rgba([51, 102, 153, 255]));
        let tex = ImageTexture::new(img);
        let a = tex.sample(0.0, 0.0);
        let b = tex.sample(0.77, 0.33);
        assert_close(a.x, b.x);
        assert_close(a.x, 51.0 / 255.0);
        assert_close(a.z, 153.0 / 255.0);
    }

    #[test]
    fn test_midpoint_blends_neighbors() {
        let tex = checker();
        // halfway between red and green texel centers on the top row
        let c = tex.sample(0.5, 0.25);
        assert_close(c.x, 0.5);
        assert_close(c.y, 0.5);
        assert_close(c.z, 0.0);
    }
}
