use super::*;

/// `tRNS`: Transparency
///
/// Stores additional transparency data.
///
/// * `Y` and `RGB` each store a single color key. All samples of that color in
///   the image are fully transparent (alpha 0), while the rest are fully
///   opaque. The chunk always uses a `u16` to store the value, even if the
///   image's bit depth is less than 16.
/// * `Index` has an alpha value that goes along with the palette data. There
///   can be fewer alpha entries than palette entries, and all missing entries
///   are fully opaque (`0xFF`).
///
/// Images that already have an alpha channel can't have this chunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum tRNS {
  Y { y: u16 },
  RGB { r: u16, g: u16, b: u16 },
  Index(Vec<u8>),
}
impl tRNS {
  /// Parses transparency for the given pixel format.
  ///
  /// The indexed form needs the palette to already be known.
  pub fn parse(data: &[u8], pixel: PngPixel, palette: Option<&PLTE>) -> PngResult<Self> {
    const ERR: PngError = PngError::InvalidChunkData(PngChunkTy::tRNS);
    if pixel.has_alpha() {
      return Err(ERR);
    }
    if pixel.is_indexed() {
      let palette = palette.ok_or(PngError::MissingPalette)?;
      if data.len() > palette.len() {
        return Err(ERR);
      }
      let mut alphas = Vec::new();
      alphas.try_reserve(data.len())?;
      alphas.extend_from_slice(data);
      return Ok(Self::Index(alphas));
    }
    match *data {
      [y0, y1] if !pixel.has_color() => {
        let y = u16::from_be_bytes([y0, y1]);
        if pixel.sample_fits(y) {
          Ok(Self::Y { y })
        } else {
          Err(ERR)
        }
      }
      [r0, r1, g0, g1, b0, b1] if pixel.has_color() => {
        let r = u16::from_be_bytes([r0, r1]);
        let g = u16::from_be_bytes([g0, g1]);
        let b = u16::from_be_bytes([b0, b1]);
        if pixel.sample_fits(r) && pixel.sample_fits(g) && pixel.sample_fits(b) {
          Ok(Self::RGB { r, g, b })
        } else {
          Err(ERR)
        }
      }
      _ => Err(ERR),
    }
  }
}

#[test]
fn test_trns_parse() {
  let plte = PLTE::parse(&[0; 6], PngPixel::I2).unwrap();
  assert_eq!(
    tRNS::parse(&[7], PngPixel::I2, Some(&plte)),
    Ok(tRNS::Index(alloc::vec![7]))
  );
  assert!(tRNS::parse(&[1, 2, 3], PngPixel::I2, Some(&plte)).is_err());
  assert_eq!(tRNS::parse(&[7], PngPixel::I2, None), Err(PngError::MissingPalette));
  assert_eq!(tRNS::parse(&[0, 3], PngPixel::Y2, None), Ok(tRNS::Y { y: 3 }));
  assert!(tRNS::parse(&[0, 4], PngPixel::Y2, None).is_err());
  assert_eq!(
    tRNS::parse(&[0, 1, 0, 2, 0, 3], PngPixel::RGB8, None),
    Ok(tRNS::RGB { r: 1, g: 2, b: 3 })
  );
  assert!(tRNS::parse(&[0, 1], PngPixel::YA8, None).is_err());
}
