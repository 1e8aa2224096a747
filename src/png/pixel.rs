use super::*;

/// Which flavor of PNG a datastream is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PngStandard {
  /// Ordinary PNG, image data is a zlib stream.
  #[default]
  Common,
  /// Apple's variant, marked by a `CgBI` chunk before the header. The image
  /// data is a raw deflate stream (no zlib header or checksum), and the color
  /// channels of RGB and RGBA images are stored in BGR order.
  Ios,
}

/// The pixel formats allowed in a PNG file.
///
/// This combines a channel ordering with a bit depth per channel.
///
/// * The Greyscale (`Y`) and Indexed (`I`) formats allow for pixels that are
///   only 1, 2, or 4 bits each. In this case, the pixels are tightly packed
///   into bytes, with the left-most pixel being the highest bits of the byte.
/// * 16-bit channels are big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PngPixel {
  Y1,
  Y2,
  Y4,
  Y8,
  Y16,
  RGB8,
  RGB16,
  I1,
  I2,
  I4,
  I8,
  YA8,
  YA16,
  RGBA8,
  RGBA16,
}
impl PngPixel {
  /// Picks the pixel format from the header's `(bit_depth, color_type)` pair.
  #[inline]
  #[must_use]
  pub const fn from_depth_and_color_type(bit_depth: u8, color_type: u8) -> Option<Self> {
    Some(match (bit_depth, color_type) {
      (1, 0) => Self::Y1,
      (2, 0) => Self::Y2,
      (4, 0) => Self::Y4,
      (8, 0) => Self::Y8,
      (16, 0) => Self::Y16,
      (8, 2) => Self::RGB8,
      (16, 2) => Self::RGB16,
      (1, 3) => Self::I1,
      (2, 3) => Self::I2,
      (4, 3) => Self::I4,
      (8, 3) => Self::I8,
      (8, 4) => Self::YA8,
      (16, 4) => Self::YA16,
      (8, 6) => Self::RGBA8,
      (16, 6) => Self::RGBA16,
      _ => return None,
    })
  }

  /// Bits per channel.
  #[inline]
  #[must_use]
  pub const fn bit_depth(self) -> u8 {
    match self {
      Self::Y1 | Self::I1 => 1,
      Self::Y2 | Self::I2 => 2,
      Self::Y4 | Self::I4 => 4,
      Self::Y8 | Self::I8 | Self::RGB8 | Self::YA8 | Self::RGBA8 => 8,
      Self::Y16 | Self::RGB16 | Self::YA16 | Self::RGBA16 => 16,
    }
  }

  /// The color type code this pixel has in the header.
  #[inline]
  #[must_use]
  pub const fn color_type(self) -> u8 {
    match self {
      Self::Y1 | Self::Y2 | Self::Y4 | Self::Y8 | Self::Y16 => 0,
      Self::RGB8 | Self::RGB16 => 2,
      Self::I1 | Self::I2 | Self::I4 | Self::I8 => 3,
      Self::YA8 | Self::YA16 => 4,
      Self::RGBA8 | Self::RGBA16 => 6,
    }
  }

  /// Samples per pixel.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self.color_type() {
      2 => 3,
      4 => 2,
      6 => 4,
      _ => 1,
    }
  }

  /// Bits per pixel.
  #[inline]
  #[must_use]
  pub const fn volume(self) -> usize {
    (self.bit_depth() as usize) * self.channel_count()
  }

  /// Bytes from one pixel to the same sample of the next pixel, rounded up to
  /// at least 1.
  ///
  /// This is the distance the "sub", "average", and "paeth" filters look to
  /// the left, and also how many bytes each pixel takes in a [`PngImage`].
  #[inline]
  #[must_use]
  pub const fn delay(self) -> usize {
    (self.volume() + 7) >> 3
  }

  /// Bytes of packed sample data in one scanline `width` pixels wide (the
  /// "pitch"), not counting the filter byte.
  ///
  /// Gives `None` if the bit count overflows `usize`.
  #[inline]
  #[must_use]
  pub const fn bytes_per_scanline(self, width: usize) -> Option<usize> {
    match width.checked_mul(self.volume()) {
      Some(bits) => Some((bits >> 3) + ((bits & 7 != 0) as usize)),
      None => None,
    }
  }

  /// If a `u16` sample value (as `tRNS` and `bKGD` store them) is in range for
  /// this bit depth.
  #[inline]
  #[must_use]
  pub const fn sample_fits(self, v: u16) -> bool {
    let depth = self.bit_depth();
    depth >= 16 || (v as u32) < (1_u32 << depth)
  }

  #[inline]
  #[must_use]
  pub const fn is_indexed(self) -> bool {
    self.color_type() == 3
  }

  #[inline]
  #[must_use]
  pub const fn has_color(self) -> bool {
    (self.color_type() & 0b010) != 0
  }

  #[inline]
  #[must_use]
  pub const fn has_alpha(self) -> bool {
    (self.color_type() & 0b100) != 0
  }
}

#[test]
fn test_png_pixel_geometry() {
  assert_eq!(PngPixel::Y1.bytes_per_scanline(9), Some(2));
  assert_eq!(PngPixel::I2.bytes_per_scanline(5), Some(2));
  assert_eq!(PngPixel::Y4.bytes_per_scanline(3), Some(2));
  assert_eq!(PngPixel::RGB16.bytes_per_scanline(3), Some(18));
  assert_eq!(PngPixel::Y1.bytes_per_scanline(usize::MAX), Some(usize::MAX / 8 + 1));
  assert_eq!(PngPixel::RGBA16.bytes_per_scanline(usize::MAX / 32), None);
  assert_eq!(PngPixel::Y4.delay(), 1);
  assert_eq!(PngPixel::YA8.delay(), 2);
  assert_eq!(PngPixel::RGB8.delay(), 3);
  assert_eq!(PngPixel::RGBA16.delay(), 8);
  assert_eq!(PngPixel::from_depth_and_color_type(16, 3), None);
  assert_eq!(PngPixel::from_depth_and_color_type(4, 2), None);
  for pixel in [
    PngPixel::Y1,
    PngPixel::Y16,
    PngPixel::RGB8,
    PngPixel::I4,
    PngPixel::YA16,
    PngPixel::RGBA8,
  ] {
    assert_eq!(
      PngPixel::from_depth_and_color_type(pixel.bit_depth(), pixel.color_type()),
      Some(pixel)
    );
  }
}
