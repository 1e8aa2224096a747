use super::*;

/// `IHDR`: Image header
///
/// Always the first chunk (after a `CgBI`, in Apple's variant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IHDR {
  pub width: u32,
  pub height: u32,
  pub pixel: PngPixel,
  pub interlaced: bool,
}
impl IHDR {
  /// Parses the 13 byte header payload.
  ///
  /// Under [`PngStandard::Ios`] only `RGB8` and `RGBA8` pixels are accepted,
  /// since those are the only ones Apple's encoder swizzles.
  pub fn parse(data: &[u8], standard: PngStandard) -> PngResult<Self> {
    let (w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression, filter, interlace) =
      match *data {
        [w0, w1, w2, w3, h0, h1, h2, h3, d, c, cm, fm, im] => {
          (w0, w1, w2, w3, h0, h1, h2, h3, d, c, cm, fm, im)
        }
        _ => return Err(PngError::InvalidChunkData(PngChunkTy::IHDR)),
      };
    let width = u32::from_be_bytes([w0, w1, w2, w3]);
    let height = u32::from_be_bytes([h0, h1, h2, h3]);
    if width == 0 || height == 0 {
      return Err(PngError::WidthOrHeightZero);
    }
    // the top bit of each dimension must be clear
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
      return Err(PngError::InvalidChunkData(PngChunkTy::IHDR));
    }
    let pixel = PngPixel::from_depth_and_color_type(bit_depth, color_type)
      .ok_or(PngError::IllegalColorTypeBitDepthCombination)?;
    if compression != 0 || filter != 0 || interlace > 1 {
      return Err(PngError::IllegalHeaderMethod);
    }
    if standard == PngStandard::Ios && !matches!(pixel, PngPixel::RGB8 | PngPixel::RGBA8) {
      return Err(PngError::IllegalColorTypeBitDepthCombination);
    }
    Ok(Self { width, height, pixel, interlaced: interlace == 1 })
  }

  /// `(width, height)` as `usize` values.
  #[inline]
  #[must_use]
  pub const fn size(&self) -> (usize, usize) {
    (self.width as usize, self.height as usize)
  }
}

#[test]
fn test_ihdr_parse() {
  let mut data = [0, 0, 0, 3, 0, 0, 0, 2, 8, 6, 0, 0, 1];
  let ihdr = IHDR::parse(&data, PngStandard::Common).unwrap();
  assert_eq!(ihdr, IHDR { width: 3, height: 2, pixel: PngPixel::RGBA8, interlaced: true });
  assert_eq!(IHDR::parse(&data, PngStandard::Ios).unwrap().pixel, PngPixel::RGBA8);

  data[9] = 0;
  assert_eq!(IHDR::parse(&data, PngStandard::Common).unwrap().pixel, PngPixel::Y8);
  assert_eq!(
    IHDR::parse(&data, PngStandard::Ios),
    Err(PngError::IllegalColorTypeBitDepthCombination)
  );

  data[12] = 2;
  assert_eq!(IHDR::parse(&data, PngStandard::Common), Err(PngError::IllegalHeaderMethod));
  data[12] = 0;
  data[3] = 0;
  assert_eq!(IHDR::parse(&data, PngStandard::Common), Err(PngError::WidthOrHeightZero));
  assert_eq!(
    IHDR::parse(&data[..12], PngStandard::Common),
    Err(PngError::InvalidChunkData(PngChunkTy::IHDR))
  );
}
