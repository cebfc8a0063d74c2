/// Paint value in sRGB space with straight alpha, components in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit channels and a fractional alpha, the way CSS `rgba()` reads
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
    }

    /// with alpha builder method taking f32
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Convert the color channels to linear space, keeping alpha as is
    pub fn to_linear(self) -> [f32; 4] {
        fn srgb_to_linear(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            self.a,
        ]
    }
}

/// The teal used across the disaster-information site
pub const TEAL: Rgba = Rgba::from_rgba8(100, 255, 218, 1.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_keeps_channels() {
        let faded = TEAL.with_alpha(0.2);

        assert_eq!(faded.r, TEAL.r);
        assert_eq!(faded.g, 1.0);
        assert_eq!(faded.a, 0.2);
    }

    #[test]
    fn test_to_linear_endpoints() {
        let black = Rgba::new(0.0, 0.0, 0.0, 0.3).to_linear();
        let white = Rgba::new(1.0, 1.0, 1.0, 1.0).to_linear();

        assert_eq!(black, [0.0, 0.0, 0.0, 0.3]);
        assert!((white[0] - 1.0).abs() < 1e-5);
    }
}
