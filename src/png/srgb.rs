use super::*;

use crate::SrgbIntent;

/// `sRGB`: Standard RGB colour space
///
/// If the `sRGB` chunk is present, the image samples conform to the
/// [sRGB](https://en.wikipedia.org/wiki/SRGB) colour space, and should be
/// displayed using the rendering `intent` given.
///
/// If `sRGB` is present it overrides any `gAMA` and/or `cHRM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct sRGB {
  pub intent: SrgbIntent,
}
impl sRGB {
  pub fn parse(data: &[u8]) -> PngResult<Self> {
    let intent = match *data {
      [0] => SrgbIntent::Perceptual,
      [1] => SrgbIntent::RelativeColorimetric,
      [2] => SrgbIntent::Saturation,
      [3] => SrgbIntent::AbsoluteColorimetric,
      _ => return Err(PngError::InvalidChunkData(PngChunkTy::sRGB)),
    };
    Ok(Self { intent })
  }
}
