use super::*;

use bitfrob::u8_replicate_bits;
use pixel_formats::r8g8b8a8_Srgb;

/// A decoded (or decoding) rectangular PNG image.
///
/// Pixels are stored row-major, top to bottom, in the [`PngLayout`]'s pixel
/// type, with multi-byte samples still big-endian. Every pixel takes
/// [`delay`](PngPixel::delay) bytes: pixels of less than 8 bits are unpacked
/// into one byte each, in the low bits.
#[derive(Clone, PartialEq, Eq)]
pub struct PngImage {
  size: (usize, usize),
  layout: PngLayout,
  pub metadata: PngMetadata,
  storage: Vec<u8>,
}
impl Debug for PngImage {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngImage")
      .field("size", &self.size)
      .field("layout", &self.layout)
      .field("metadata", &self.metadata)
      .field("storage", &(&self.storage[..self.storage.len().min(12)], self.storage.len()))
      .finish()
  }
}
impl PngImage {
  /// Allocates zeroed storage for an image of the given `(width, height)`.
  pub fn new(size: (usize, usize), layout: PngLayout, metadata: PngMetadata) -> PngResult<Self> {
    let bytes = size
      .0
      .checked_mul(size.1)
      .and_then(|count| count.checked_mul(layout.format().pixel().delay()))
      .ok_or(PngError::CheckedMath)?;
    let mut storage = Vec::new();
    storage.try_reserve_exact(bytes)?;
    storage.resize(bytes, 0);
    Ok(Self { size, layout, metadata, storage })
  }

  #[inline]
  #[must_use]
  pub const fn size(&self) -> (usize, usize) {
    self.size
  }

  #[inline]
  #[must_use]
  pub const fn layout(&self) -> &PngLayout {
    &self.layout
  }

  #[inline]
  #[must_use]
  pub fn storage(&self) -> &[u8] {
    &self.storage
  }

  #[inline]
  #[must_use]
  pub fn into_storage(self) -> Vec<u8> {
    self.storage
  }

  /// Views the storage as a slice of some other plain data type.
  ///
  /// Gives `None` if the storage isn't aligned for `T` or isn't a whole
  /// number of `T` values long.
  #[inline]
  #[must_use]
  pub fn storage_as<T: bytemuck::Pod>(&self) -> Option<&[T]> {
    bytemuck::try_cast_slice(&self.storage).ok()
  }

  /// Rebinds this image's storage to a new layout, without copying.
  ///
  /// The new layout must have the same kind of format and pixel type, and if
  /// indexed the same number of palette entries.
  pub fn bind_storage(self, layout: PngLayout) -> PngResult<Self> {
    if !self.layout.format().is_storage_compatible(layout.format()) {
      return Err(PngError::IncompatibleLayout);
    }
    Ok(Self { layout, ..self })
  }

  /// Writes an unfiltered scanline into row `base.1`, with the pixels going
  /// to columns `base.0`, `base.0 + stride`, and so on.
  ///
  /// The `scanline` has no filter byte. Pixels that would land outside the
  /// image, and data past the end of the row, are ignored.
  pub fn assign(&mut self, scanline: &[u8], base: (usize, usize), stride: usize) {
    let (width, height) = self.size;
    if base.1 >= height {
      return;
    }
    let row = base.1 * width;
    let columns = (base.0..width).step_by(stride.max(1));
    let pixel = self.layout.format().pixel();
    match pixel.bit_depth() {
      depth @ (1 | 2 | 4) => {
        let per_byte = usize::from(8 / depth);
        let mask = (1_u8 << depth) - 1;
        for (i, x) in columns.enumerate() {
          let full_data = match scanline.get(i / per_byte) {
            Some(byte) => *byte,
            None => break,
          };
          let down_shift = (per_byte - 1 - i % per_byte) * usize::from(depth);
          self.storage[row + x] = (full_data >> down_shift) & mask;
        }
      }
      _ => {
        let n = pixel.delay();
        for (x, data) in columns.zip(scanline.chunks_exact(n)) {
          let d = (row + x) * n;
          self.storage[d..d + n].copy_from_slice(data);
        }
      }
    }
  }

  /// Copies each pixel written at row `base.1`, columns `base.0` and every
  /// `brush.0` after it, across a `brush.0` by `brush.1` block.
  ///
  /// Blocks are clipped to the image. A brush of 1x1 (or less) does nothing.
  pub fn overdraw(&mut self, base: (usize, usize), brush: (usize, usize)) {
    if brush.0 * brush.1 <= 1 {
      return;
    }
    let (width, height) = self.size;
    let n = self.layout.format().pixel().delay();
    for y in base.1..(base.1 + brush.1).min(height) {
      for x in (base.0..width).step_by(brush.0) {
        let s = (base.1 * width + x) * n;
        for x in x..(x + brush.0).min(width) {
          let d = (y * width + x) * n;
          self.storage.copy_within(s..s + n, d);
        }
      }
    }
  }

  /// Converts the image to 8-bit RGBA, applying the palette and any
  /// transparency key.
  ///
  /// 16-bit samples keep only their high byte, and samples of less than 8
  /// bits are scaled up by bit replication.
  pub fn to_rgba8(&self) -> PngResult<Vec<r8g8b8a8_Srgb>> {
    let mut out = Vec::new();
    out.try_reserve(self.size.0 * self.size.1)?;
    let opaque = |key_match: bool| if key_match { 0 } else { u8::MAX };
    match self.layout.format() {
      PngFormat::Indexed { palette, .. } => {
        out.extend(
          self.storage.iter().map(|&i| palette.get(usize::from(i)).copied().unwrap_or_default()),
        );
      }
      PngFormat::Y { pixel, key, .. } => match pixel.bit_depth() {
        16 => out.extend(self.storage.chunks_exact(2).map(|c| {
          let y = c[0];
          let a = opaque(*key == Some(u16::from_be_bytes([c[0], c[1]])));
          r8g8b8a8_Srgb { r: y, g: y, b: y, a }
        })),
        depth => out.extend(self.storage.iter().map(|&v| {
          let y = if depth < 8 { u8_replicate_bits(u32::from(depth), v) } else { v };
          let a = opaque(*key == Some(u16::from(v)));
          r8g8b8a8_Srgb { r: y, g: y, b: y, a }
        })),
      },
      PngFormat::YA { pixel, .. } => {
        let n = pixel.delay();
        out.extend(self.storage.chunks_exact(n).map(|c| {
          let (y, a) = (c[0], c[n / 2]);
          r8g8b8a8_Srgb { r: y, g: y, b: y, a }
        }));
      }
      PngFormat::RGB { pixel: PngPixel::RGB16, key, .. } => {
        out.extend(self.storage.chunks_exact(6).map(|c| {
          let rgb = [
            u16::from_be_bytes([c[0], c[1]]),
            u16::from_be_bytes([c[2], c[3]]),
            u16::from_be_bytes([c[4], c[5]]),
          ];
          r8g8b8a8_Srgb { r: c[0], g: c[2], b: c[4], a: opaque(*key == Some(rgb)) }
        }));
      }
      PngFormat::RGB { key, .. } => {
        out.extend(self.storage.chunks_exact(3).map(|c| {
          let rgb = [u16::from(c[0]), u16::from(c[1]), u16::from(c[2])];
          r8g8b8a8_Srgb { r: c[0], g: c[1], b: c[2], a: opaque(*key == Some(rgb)) }
        }));
      }
      PngFormat::RGBA { pixel: PngPixel::RGBA16, .. } => {
        out.extend(
          self.storage.chunks_exact(8).map(|c| r8g8b8a8_Srgb { r: c[0], g: c[2], b: c[4], a: c[6] }),
        );
      }
      PngFormat::RGBA { .. } => {
        out.extend(
          self.storage.chunks_exact(4).map(|c| r8g8b8a8_Srgb { r: c[0], g: c[1], b: c[2], a: c[3] }),
        );
      }
      PngFormat::BGR { key, .. } => {
        out.extend(self.storage.chunks_exact(3).map(|c| {
          let (b, g, r) = (c[0], c[1], c[2]);
          r8g8b8a8_Srgb { r, g, b, a: opaque(*key == Some([r, g, b])) }
        }));
      }
      PngFormat::BGRA { .. } => {
        out.extend(
          self.storage.chunks_exact(4).map(|c| r8g8b8a8_Srgb { r: c[2], g: c[1], b: c[0], a: c[3] }),
        );
      }
    }
    Ok(out)
  }
}

#[cfg(test)]
fn gray_image(pixel: PngPixel, size: (usize, usize)) -> PngImage {
  let layout = PngLayout::new(PngFormat::Y { pixel, fill: None, key: None }, false).unwrap();
  PngImage::new(size, layout, PngMetadata::default()).unwrap()
}

#[test]
fn test_assign_unpacks_low_depths() {
  let mut image = gray_image(PngPixel::Y2, (5, 1));
  image.assign(&[0b00_01_10_11, 0b11_00_00_00], (0, 0), 1);
  assert_eq!(image.storage(), &[0, 1, 2, 3, 3]);

  let mut image = gray_image(PngPixel::Y1, (10, 2));
  image.assign(&[0b1010_0000], (1, 1), 2);
  assert_eq!(&image.storage()[10..], &[0, 1, 0, 0, 0, 1, 0, 0, 0, 0]);
}

#[test]
fn test_assign_copies_groups() {
  let mut image = gray_image(PngPixel::Y16, (3, 2));
  image.assign(&[1, 2, 3, 4], (1, 1), 1);
  assert_eq!(image.storage(), &[0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4]);
  // rows past the end are ignored
  image.assign(&[9, 9], (0, 2), 1);
  assert_eq!(image.storage().len(), 12);
}

#[test]
fn test_overdraw() {
  let mut image = gray_image(PngPixel::Y8, (3, 3));
  image.assign(&[7], (0, 0), 8);
  image.overdraw((0, 0), (8, 8));
  assert_eq!(image.storage(), &[7; 9]);

  let mut image = gray_image(PngPixel::Y8, (4, 2));
  image.assign(&[1, 2], (0, 0), 2);
  image.overdraw((0, 0), (2, 1));
  assert_eq!(image.storage(), &[1, 1, 2, 2, 0, 0, 0, 0]);
  image.overdraw((0, 1), (1, 1));
  assert_eq!(image.storage(), &[1, 1, 2, 2, 0, 0, 0, 0]);
}

#[test]
fn test_bind_storage() {
  let image = gray_image(PngPixel::Y8, (2, 2));
  let keyed = PngLayout::new(PngFormat::Y { pixel: PngPixel::Y8, fill: None, key: Some(0) }, false);
  let image = image.bind_storage(keyed.unwrap()).unwrap();
  let rgba = image.to_rgba8().unwrap();
  assert_eq!(rgba[0], r8g8b8a8_Srgb { r: 0, g: 0, b: 0, a: 0 });

  let wide = PngLayout::new(PngFormat::Y { pixel: PngPixel::Y16, fill: None, key: None }, false);
  assert_eq!(image.bind_storage(wide.unwrap()), Err(PngError::IncompatibleLayout));
}

#[test]
fn test_bind_storage_indexed() {
  let indexed_with = |pixel: PngPixel, len: u8, g: u8| {
    let palette = (0..len).map(|r| r8g8b8a8_Srgb { r, g, b: 0, a: 255 }).collect();
    PngLayout::new(PngFormat::Indexed { pixel, palette, fill: None }, false).unwrap()
  };
  let indexed = |pixel: PngPixel, len: u8| indexed_with(pixel, len, 0);
  let mut image = PngImage::new((2, 1), indexed(PngPixel::I8, 3), PngMetadata::default()).unwrap();
  image.assign(&[0, 2], (0, 0), 1);

  let rebound = image.clone().bind_storage(indexed_with(PngPixel::I8, 3, 9)).unwrap();
  assert_eq!(rebound.storage(), &[0, 2]);
  assert_eq!(rebound.to_rgba8().unwrap()[1], r8g8b8a8_Srgb { r: 2, g: 9, b: 0, a: 255 });

  assert_eq!(
    image.clone().bind_storage(indexed(PngPixel::I8, 4)),
    Err(PngError::IncompatibleLayout)
  );
  assert_eq!(
    image.clone().bind_storage(indexed(PngPixel::I4, 3)),
    Err(PngError::IncompatibleLayout)
  );
  assert_eq!(
    gray_image(PngPixel::Y8, (2, 1)).bind_storage(indexed(PngPixel::I8, 3)),
    Err(PngError::IncompatibleLayout)
  );
}

#[test]
fn test_storage_as() {
  let image = gray_image(PngPixel::Y8, (2, 3));
  let rows: &[[u8; 2]] = image.storage_as().unwrap();
  assert_eq!(rows.len(), 3);
  assert!(image.storage_as::<[u8; 4]>().is_none());
}
