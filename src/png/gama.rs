use super::*;

/// `gAMA`: Image gamma
///
/// Values are stored as an integer 100,000 times the floating point value.
///
/// **Example:** A gamma of 1/2.2 would be stored as the integer 45,455.
///
/// An `sRGB` chunk or `iCCP` chunk, when present and recognized, overrides the
/// `gAMA` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct gAMA {
  pub gamma: u32,
}
impl gAMA {
  pub fn parse(data: &[u8]) -> PngResult<Self> {
    match *data {
      [g0, g1, g2, g3] => Ok(Self { gamma: u32::from_be_bytes([g0, g1, g2, g3]) }),
      _ => Err(PngError::InvalidChunkData(PngChunkTy::gAMA)),
    }
  }
}
