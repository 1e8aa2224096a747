use super::*;

/// `bKGD`: Background colour
///
/// Gives an intended background color for the image.
///
/// The variant matches the color type of the image, with an implied alpha
/// value of "fully opaque".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum bKGD {
  Y { y: u16 },
  RGB { r: u16, g: u16, b: u16 },
  Index { i: u8 },
}
impl bKGD {
  /// Parses a background for the given pixel format.
  ///
  /// The indexed form must name an entry that's in the palette.
  pub fn parse(data: &[u8], pixel: PngPixel, palette: Option<&PLTE>) -> PngResult<Self> {
    const ERR: PngError = PngError::InvalidChunkData(PngChunkTy::bKGD);
    if pixel.is_indexed() {
      let palette = palette.ok_or(PngError::MissingPalette)?;
      return match *data {
        [i] if usize::from(i) < palette.len() => Ok(Self::Index { i }),
        _ => Err(ERR),
      };
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
fn test_bkgd_parse() {
  let plte = PLTE::parse(&[0; 6], PngPixel::I8).unwrap();
  assert_eq!(bKGD::parse(&[1], PngPixel::I8, Some(&plte)), Ok(bKGD::Index { i: 1 }));
  assert!(bKGD::parse(&[2], PngPixel::I8, Some(&plte)).is_err());
  assert_eq!(bKGD::parse(&[1], PngPixel::I8, None), Err(PngError::MissingPalette));
  assert_eq!(bKGD::parse(&[1, 0], PngPixel::YA16, None), Ok(bKGD::Y { y: 256 }));
  assert!(bKGD::parse(&[1, 0], PngPixel::YA8, None).is_err());
  assert!(bKGD::parse(&[0, 1], PngPixel::RGBA8, None).is_err());
}
