use super::*;

/// `sBIT`: Significant bits
///
/// Gives the original number of significant bits per channel in the image.
///
/// * Each value is more than 0 and no more than the bit depth of the image
///   (8 for indexed images).
/// * Indexed color uses the `RGB` variant.
/// * The variant matches the color type of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum sBIT {
  Y { y: u8 },
  RGB { r: u8, g: u8, b: u8 },
  YA { y: u8, a: u8 },
  RGBA { r: u8, g: u8, b: u8, a: u8 },
}
impl sBIT {
  pub fn parse(data: &[u8], pixel: PngPixel) -> PngResult<Self> {
    let max = if pixel.is_indexed() { 8 } else { pixel.bit_depth() };
    if data.iter().any(|&bits| bits == 0 || bits > max) {
      return Err(PngError::InvalidChunkData(PngChunkTy::sBIT));
    }
    Ok(match (data, pixel.channel_count(), pixel.is_indexed()) {
      (&[y], 1, false) => Self::Y { y },
      (&[r, g, b], 1, true) | (&[r, g, b], 3, _) => Self::RGB { r, g, b },
      (&[y, a], 2, _) => Self::YA { y, a },
      (&[r, g, b, a], 4, _) => Self::RGBA { r, g, b, a },
      _ => return Err(PngError::InvalidChunkData(PngChunkTy::sBIT)),
    })
  }
}

#[test]
fn test_sbit_parse() {
  assert_eq!(sBIT::parse(&[5, 6, 5], PngPixel::I4), Ok(sBIT::RGB { r: 5, g: 6, b: 5 }));
  assert_eq!(sBIT::parse(&[3], PngPixel::Y4), Ok(sBIT::Y { y: 3 }));
  assert!(sBIT::parse(&[5], PngPixel::Y4).is_err());
  assert!(sBIT::parse(&[0, 1], PngPixel::YA8).is_err());
  assert!(sBIT::parse(&[8, 8, 8], PngPixel::RGBA8).is_err());
  assert!(sBIT::parse(&[12, 12, 12, 1], PngPixel::RGBA16).is_ok());
}
