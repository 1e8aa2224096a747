use super::*;

/// `pHYs`: Physical pixel dimensions
///
/// Specifies the intended pixel size or aspect ratio for display of the image.
///
/// When `is_meters` is set then `ppu_x` and `ppu_y` are in pixels per meter.
/// Otherwise they have no unit and define an aspect ratio only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct pHYs {
  pub ppu_x: u32,
  pub ppu_y: u32,
  pub is_meters: bool,
}
impl pHYs {
  pub fn parse(data: &[u8]) -> PngResult<Self> {
    match *data {
      [x0, x1, x2, x3, y0, y1, y2, y3, unit @ (0 | 1)] => Ok(Self {
        ppu_x: u32::from_be_bytes([x0, x1, x2, x3]),
        ppu_y: u32::from_be_bytes([y0, y1, y2, y3]),
        is_meters: unit == 1,
      }),
      _ => Err(PngError::InvalidChunkData(PngChunkTy::pHYs)),
    }
  }
}
