use super::*;

use pixel_formats::r8g8b8_Srgb;

/// `PLTE`: Palette
///
/// Palette entries are always RGB. If you want to have a paletted image with
/// transparency then the transparency info goes in a separate `tRNS` chunk.
#[derive(Clone, PartialEq, Eq)]
pub struct PLTE {
  entries: Vec<r8g8b8_Srgb>,
}
impl Debug for PLTE {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // currently prints no more than 4 palette entries
    f.debug_tuple("PLTE")
      .field(&&self.entries[..self.entries.len().min(4)])
      .field(&self.entries.len())
      .finish()
  }
}
impl PLTE {
  /// Parses a palette for an image with the given pixel format.
  ///
  /// * Greyscale images can't have a palette at all.
  /// * There must be 1 to 256 entries, and an indexed image can't have more
  ///   entries than its bit depth can address.
  pub fn parse(data: &[u8], pixel: PngPixel) -> PngResult<Self> {
    const ERR: PngError = PngError::InvalidChunkData(PngChunkTy::PLTE);
    if !pixel.has_color() {
      return Err(ERR);
    }
    let triples: &[[u8; 3]] = bytemuck::try_cast_slice(data).map_err(|_| ERR)?;
    let limit = if pixel.is_indexed() { 1_usize << pixel.bit_depth() } else { 256 };
    if triples.is_empty() || triples.len() > limit {
      return Err(ERR);
    }
    let mut entries = Vec::new();
    entries.try_reserve(triples.len())?;
    entries.extend(triples.iter().map(|&[r, g, b]| r8g8b8_Srgb { r, g, b }));
    Ok(Self { entries })
  }

  #[inline]
  #[must_use]
  pub fn entries(&self) -> &[r8g8b8_Srgb] {
    &self.entries
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

#[test]
fn test_plte_parse() {
  let plte = PLTE::parse(&[1, 2, 3, 4, 5, 6], PngPixel::I1).unwrap();
  assert_eq!(plte.len(), 2);
  assert_eq!(plte.entries()[1], r8g8b8_Srgb { r: 4, g: 5, b: 6 });
  // 3 entries don't fit in a 1-bit index
  assert!(PLTE::parse(&[0; 9], PngPixel::I1).is_err());
  assert!(PLTE::parse(&[0; 9], PngPixel::RGB8).is_ok());
  assert!(PLTE::parse(&[0; 3], PngPixel::Y8).is_err());
  assert!(PLTE::parse(&[0; 4], PngPixel::I8).is_err());
  assert!(PLTE::parse(&[], PngPixel::I8).is_err());
}
