use super::*;

/// `cHRM`: Primary chromaticities and white point
///
/// Values are stored as an integer 100,000 times the floating point value.
///
/// **Example:** A value of 0.3127 would be stored as the integer 31270.
///
/// An `sRGB` chunk or `iCCP` chunk, when present and recognized, overrides the
/// `cHRM` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct cHRM {
  pub white_x: u32,
  pub white_y: u32,
  pub red_x: u32,
  pub red_y: u32,
  pub green_x: u32,
  pub green_y: u32,
  pub blue_x: u32,
  pub blue_y: u32,
}
impl cHRM {
  pub fn parse(data: &[u8]) -> PngResult<Self> {
    let words: &[[u8; 4]] = bytemuck::try_cast_slice(data)
      .map_err(|_| PngError::InvalidChunkData(PngChunkTy::cHRM))?;
    match *words {
      [wx, wy, rx, ry, gx, gy, bx, by] => Ok(Self {
        white_x: u32::from_be_bytes(wx),
        white_y: u32::from_be_bytes(wy),
        red_x: u32::from_be_bytes(rx),
        red_y: u32::from_be_bytes(ry),
        green_x: u32::from_be_bytes(gx),
        green_y: u32::from_be_bytes(gy),
        blue_x: u32::from_be_bytes(bx),
        blue_y: u32::from_be_bytes(by),
      }),
      _ => Err(PngError::InvalidChunkData(PngChunkTy::cHRM)),
    }
  }
}
