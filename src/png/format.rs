use super::*;

use pixel_formats::r8g8b8a8_Srgb;

/// A fully resolved pixel format.
///
/// This folds the header's pixel type together with the palette, background,
/// and transparency chunks, since all of those change what a stored sample
/// *means*.
///
/// * `fill` is the background color from `bKGD`, if any.
/// * `key` is the color from `tRNS` that should be treated as transparent, if
///   any.
/// * `BGR` and `BGRA` come from Apple's variant of PNG, and are always 8 bits
///   per channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PngFormat {
  Indexed { pixel: PngPixel, palette: Vec<r8g8b8a8_Srgb>, fill: Option<u8> },
  Y { pixel: PngPixel, fill: Option<u16>, key: Option<u16> },
  YA { pixel: PngPixel, fill: Option<u16> },
  RGB { pixel: PngPixel, fill: Option<[u16; 3]>, key: Option<[u16; 3]> },
  RGBA { pixel: PngPixel, fill: Option<[u16; 3]> },
  BGR { fill: Option<[u8; 3]>, key: Option<[u8; 3]> },
  BGRA { fill: Option<[u8; 3]> },
}
impl PngFormat {
  /// The pixel type of the encoded data.
  #[inline]
  #[must_use]
  pub const fn pixel(&self) -> PngPixel {
    match self {
      Self::Indexed { pixel, .. }
      | Self::Y { pixel, .. }
      | Self::YA { pixel, .. }
      | Self::RGB { pixel, .. }
      | Self::RGBA { pixel, .. } => *pixel,
      Self::BGR { .. } => PngPixel::RGB8,
      Self::BGRA { .. } => PngPixel::RGBA8,
    }
  }

  /// The palette, with `tRNS` alpha already merged in.
  #[inline]
  #[must_use]
  pub fn palette(&self) -> Option<&[r8g8b8a8_Srgb]> {
    match self {
      Self::Indexed { palette, .. } => Some(palette),
      _ => None,
    }
  }

  /// Checks that the pixel type matches the variant, the palette fits the
  /// index depth, and any fill or key values are in range.
  pub fn validate(&self) -> PngResult<()> {
    let ok = match self {
      Self::Indexed { pixel, palette, fill } => {
        pixel.is_indexed()
          && !palette.is_empty()
          && palette.len() <= (1 << pixel.bit_depth())
          && fill.map_or(true, |i| usize::from(i) < palette.len())
      }
      Self::Y { pixel, fill, key } => {
        pixel.color_type() == 0
          && fill.map_or(true, |v| pixel.sample_fits(v))
          && key.map_or(true, |v| pixel.sample_fits(v))
      }
      Self::YA { pixel, fill } => {
        pixel.color_type() == 4 && fill.map_or(true, |v| pixel.sample_fits(v))
      }
      Self::RGB { pixel, fill, key } => {
        pixel.color_type() == 2
          && fill.map_or(true, |c| c.iter().all(|&v| pixel.sample_fits(v)))
          && key.map_or(true, |c| c.iter().all(|&v| pixel.sample_fits(v)))
      }
      Self::RGBA { pixel, fill } => {
        pixel.color_type() == 6 && fill.map_or(true, |c| c.iter().all(|&v| pixel.sample_fits(v)))
      }
      Self::BGR { .. } | Self::BGRA { .. } => true,
    };
    if ok {
      Ok(())
    } else {
      Err(PngError::InvalidFormat)
    }
  }

  /// Resolves the format from the parsed chunks.
  ///
  /// Gives `None` if an indexed pixel has no palette, or if the background or
  /// transparency is the wrong variant for the pixel type. When each chunk
  /// was parsed against the same pixel type the only possible failure is the
  /// missing palette.
  #[must_use]
  pub fn recognize(
    standard: PngStandard, pixel: PngPixel, palette: Option<&PLTE>, background: Option<&bKGD>,
    transparency: Option<&tRNS>,
  ) -> Option<Self> {
    let format = match pixel.color_type() {
      3 => {
        let palette = palette?;
        let alphas: &[u8] = match transparency {
          None => &[],
          Some(tRNS::Index(alphas)) => alphas,
          Some(_) => return None,
        };
        let fill = match background {
          None => None,
          Some(bKGD::Index { i }) => Some(*i),
          Some(_) => return None,
        };
        let mut entries = Vec::new();
        entries.try_reserve(palette.len()).ok()?;
        entries.extend(palette.entries().iter().enumerate().map(|(n, rgb)| r8g8b8a8_Srgb {
          r: rgb.r,
          g: rgb.g,
          b: rgb.b,
          a: alphas.get(n).copied().unwrap_or(u8::MAX),
        }));
        Self::Indexed { pixel, palette: entries, fill }
      }
      0 | 4 => {
        let fill = match background {
          None => None,
          Some(bKGD::Y { y }) => Some(*y),
          Some(_) => return None,
        };
        if pixel.has_alpha() {
          if transparency.is_some() {
            return None;
          }
          Self::YA { pixel, fill }
        } else {
          let key = match transparency {
            None => None,
            Some(tRNS::Y { y }) => Some(*y),
            Some(_) => return None,
          };
          Self::Y { pixel, fill, key }
        }
      }
      _ => {
        let fill = match background {
          None => None,
          Some(bKGD::RGB { r, g, b }) => Some([*r, *g, *b]),
          Some(_) => return None,
        };
        let key = match transparency {
          None => None,
          Some(tRNS::RGB { r, g, b }) if !pixel.has_alpha() => Some([*r, *g, *b]),
          Some(_) => return None,
        };
        match (standard, pixel.has_alpha()) {
          (PngStandard::Ios, false) => Self::BGR { fill: fill.map(narrow), key: key.map(narrow) },
          (PngStandard::Ios, true) => Self::BGRA { fill: fill.map(narrow) },
          (PngStandard::Common, false) => Self::RGB { pixel, fill, key },
          (PngStandard::Common, true) => Self::RGBA { pixel, fill },
        }
      }
    };
    Some(format)
  }

  /// Storage can only be shared between formats of the same variant and
  /// pixel type, and indexed formats also need the same palette length.
  #[must_use]
  pub fn is_storage_compatible(&self, other: &Self) -> bool {
    match (self, other) {
      (Self::Indexed { pixel: p0, palette: old, .. }, Self::Indexed { pixel: p1, palette: new, .. }) => {
        p0 == p1 && old.len() == new.len()
      }
      (Self::Y { pixel: p0, .. }, Self::Y { pixel: p1, .. })
      | (Self::YA { pixel: p0, .. }, Self::YA { pixel: p1, .. })
      | (Self::RGB { pixel: p0, .. }, Self::RGB { pixel: p1, .. })
      | (Self::RGBA { pixel: p0, .. }, Self::RGBA { pixel: p1, .. }) => p0 == p1,
      (Self::BGR { .. }, Self::BGR { .. }) | (Self::BGRA { .. }, Self::BGRA { .. }) => true,
      _ => false,
    }
  }
}

/// 8-bit images still store `bKGD` and `tRNS` values as `u16`.
#[inline]
fn narrow([r, g, b]: [u16; 3]) -> [u8; 3] {
  [r as u8, g as u8, b as u8]
}

/// A validated pixel format plus the interlacing flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngLayout {
  format: PngFormat,
  interlaced: bool,
}
impl PngLayout {
  /// Makes a layout, failing if the format doesn't [validate](PngFormat::validate).
  pub fn new(format: PngFormat, interlaced: bool) -> PngResult<Self> {
    format.validate()?;
    Ok(Self { format, interlaced })
  }

  /// Resolves the layout from the parsed chunks, see [`PngFormat::recognize`].
  #[must_use]
  pub fn recognize(
    standard: PngStandard, pixel: PngPixel, palette: Option<&PLTE>, background: Option<&bKGD>,
    transparency: Option<&tRNS>, interlaced: bool,
  ) -> Option<Self> {
    let format = PngFormat::recognize(standard, pixel, palette, background, transparency)?;
    Self::new(format, interlaced).ok()
  }

  #[inline]
  #[must_use]
  pub const fn format(&self) -> &PngFormat {
    &self.format
  }

  #[inline]
  #[must_use]
  pub const fn interlaced(&self) -> bool {
    self.interlaced
  }
}

#[test]
fn test_format_recognize() {
  let plte = PLTE::parse(&[1, 2, 3, 4, 5, 6], PngPixel::I1).unwrap();
  let trns = tRNS::parse(&[9], PngPixel::I1, Some(&plte)).unwrap();
  let bkgd = bKGD::parse(&[1], PngPixel::I1, Some(&plte)).unwrap();
  let format =
    PngFormat::recognize(PngStandard::Common, PngPixel::I1, Some(&plte), Some(&bkgd), Some(&trns))
      .unwrap();
  assert_eq!(
    format,
    PngFormat::Indexed {
      pixel: PngPixel::I1,
      palette: alloc::vec![
        r8g8b8a8_Srgb { r: 1, g: 2, b: 3, a: 9 },
        r8g8b8a8_Srgb { r: 4, g: 5, b: 6, a: 255 },
      ],
      fill: Some(1),
    }
  );
  assert!(format.validate().is_ok());
  assert_eq!(PngFormat::recognize(PngStandard::Common, PngPixel::I1, None, None, None), None);

  let key = tRNS::parse(&[0, 1, 0, 2, 0, 3], PngPixel::RGB8, None).unwrap();
  assert_eq!(
    PngFormat::recognize(PngStandard::Ios, PngPixel::RGB8, None, None, Some(&key)),
    Some(PngFormat::BGR { fill: None, key: Some([1, 2, 3]) })
  );
  assert_eq!(
    PngFormat::recognize(PngStandard::Common, PngPixel::RGBA16, None, None, None),
    Some(PngFormat::RGBA { pixel: PngPixel::RGBA16, fill: None })
  );
}

#[test]
fn test_format_validate() {
  let bad = PngFormat::Y { pixel: PngPixel::Y2, fill: Some(4), key: None };
  assert_eq!(PngLayout::new(bad, false), Err(PngError::InvalidFormat));
  let bad = PngFormat::RGB { pixel: PngPixel::Y8, fill: None, key: None };
  assert_eq!(bad.validate(), Err(PngError::InvalidFormat));
  let bad = PngFormat::Indexed {
    pixel: PngPixel::I1,
    palette: alloc::vec![r8g8b8a8_Srgb::default(); 3],
    fill: None,
  };
  assert_eq!(bad.validate(), Err(PngError::InvalidFormat));
}
