use super::*;

/// Everything the ancillary chunks said about the image.
///
/// Each singleton may only be set once per image. The `Vec` fields keep their
/// chunks in the order they appeared, and `application` holds every chunk
/// this crate doesn't interpret, verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PngMetadata {
  pub time: Option<tIME>,
  pub chromaticity: Option<cHRM>,
  pub color_profile: Option<iCCP>,
  pub color_rendering: Option<sRGB>,
  pub gamma: Option<gAMA>,
  pub histogram: Option<hIST>,
  pub physical_dimensions: Option<pHYs>,
  pub significant_bits: Option<sBIT>,
  pub suggested_palettes: Vec<sPLT>,
  pub text: Vec<PngText>,
  pub application: Vec<(PngChunkTy, Vec<u8>)>,
}
impl PngMetadata {
  /// Fills `slot` with the parser's output, unless it's already filled.
  pub fn unique<T>(
    ty: PngChunkTy, slot: &mut Option<T>, parser: impl FnOnce() -> PngResult<T>,
  ) -> PngResult<()> {
    if slot.is_some() {
      return Err(PngError::DuplicateChunk(ty));
    }
    *slot = Some(parser()?);
    Ok(())
  }

  /// Accepts one ancillary chunk from before the image data.
  ///
  /// The background and transparency chunks aren't metadata (they change the
  /// image's format), so they go to the `background` and `transparency` slots
  /// instead.
  ///
  /// ## Failure
  /// * Any chunk that has to come before `PLTE` arriving after it.
  /// * A second copy of a chunk that may appear once.
  /// * `hIST` (or an indexed `bKGD` or `tRNS`) without a palette.
  /// * Any payload that fails to parse.
  pub fn push_ancillary(
    &mut self, ty: PngChunkTy, data: &[u8], pixel: PngPixel, palette: Option<&PLTE>,
    background: &mut Option<bKGD>, transparency: &mut Option<tRNS>,
  ) -> PngResult<()> {
    if palette.is_some()
      && matches!(
        ty,
        PngChunkTy::cHRM | PngChunkTy::gAMA | PngChunkTy::sRGB | PngChunkTy::iCCP | PngChunkTy::sBIT
      )
    {
      return Err(PngError::InvalidChunkOrder { chunk: ty, after: PngChunkTy::PLTE });
    }
    match ty {
      PngChunkTy::bKGD => Self::unique(ty, background, || bKGD::parse(data, pixel, palette)),
      PngChunkTy::tRNS => Self::unique(ty, transparency, || tRNS::parse(data, pixel, palette)),
      PngChunkTy::hIST => {
        let palette = palette.ok_or(PngError::MissingPalette)?;
        Self::unique(ty, &mut self.histogram, || hIST::parse(data, palette))
      }
      PngChunkTy::cHRM => Self::unique(ty, &mut self.chromaticity, || cHRM::parse(data)),
      PngChunkTy::gAMA => Self::unique(ty, &mut self.gamma, || gAMA::parse(data)),
      PngChunkTy::sRGB => Self::unique(ty, &mut self.color_rendering, || sRGB::parse(data)),
      PngChunkTy::iCCP => Self::unique(ty, &mut self.color_profile, || iCCP::parse(data)),
      PngChunkTy::sBIT => {
        Self::unique(ty, &mut self.significant_bits, || sBIT::parse(data, pixel))
      }
      PngChunkTy::pHYs => Self::unique(ty, &mut self.physical_dimensions, || pHYs::parse(data)),
      PngChunkTy::tIME => Self::unique(ty, &mut self.time, || tIME::parse(data)),
      PngChunkTy::sPLT => {
        let splt = sPLT::parse(data)?;
        self.suggested_palettes.try_reserve(1)?;
        self.suggested_palettes.push(splt);
        Ok(())
      }
      PngChunkTy::tEXt | PngChunkTy::zTXt | PngChunkTy::iTXt => self.push_text(ty, data),
      _ => self.push_application(ty, data),
    }
  }

  pub(crate) fn push_text(&mut self, ty: PngChunkTy, data: &[u8]) -> PngResult<()> {
    let text = if ty == PngChunkTy::iTXt {
      PngText::parse_unicode(data)?
    } else {
      PngText::parse_latin1(data, ty == PngChunkTy::zTXt)?
    };
    self.text.try_reserve(1)?;
    self.text.push(text);
    Ok(())
  }

  pub(crate) fn push_application(&mut self, ty: PngChunkTy, data: &[u8]) -> PngResult<()> {
    log::debug!("keeping uninterpreted chunk {ty:?} ({} bytes)", data.len());
    let mut v = Vec::new();
    v.try_reserve(data.len())?;
    v.extend_from_slice(data);
    self.application.try_reserve(1)?;
    self.application.push((ty, v));
    Ok(())
  }
}

#[test]
fn test_metadata_push_ancillary() {
  let mut metadata = PngMetadata::default();
  let mut background = None;
  let mut transparency = None;
  let pixel = PngPixel::I8;
  let gama = [0, 0, 0xB1, 0x8F];
  metadata
    .push_ancillary(PngChunkTy::gAMA, &gama, pixel, None, &mut background, &mut transparency)
    .unwrap();
  assert_eq!(metadata.gamma, Some(gAMA { gamma: 45455 }));
  assert_eq!(
    metadata.push_ancillary(PngChunkTy::gAMA, &gama, pixel, None, &mut background, &mut transparency),
    Err(PngError::DuplicateChunk(PngChunkTy::gAMA))
  );
  assert_eq!(
    metadata.push_ancillary(PngChunkTy::hIST, &[0, 1], pixel, None, &mut background, &mut transparency),
    Err(PngError::MissingPalette)
  );

  let plte = PLTE::parse(&[0; 6], pixel).unwrap();
  let palette = Some(&plte);
  assert_eq!(
    metadata.push_ancillary(PngChunkTy::sRGB, &[0], pixel, palette, &mut background, &mut transparency),
    Err(PngError::InvalidChunkOrder { chunk: PngChunkTy::sRGB, after: PngChunkTy::PLTE })
  );
  for (ty, data) in [
    (PngChunkTy::tRNS, &[0x80_u8][..]),
    (PngChunkTy::tEXt, &b"a\0b"[..]),
    (PngChunkTy::tEXt, &b"c\0d"[..]),
    (PngChunkTy(*b"prVt"), &[1, 2, 3][..]),
  ] {
    metadata.push_ancillary(ty, data, pixel, palette, &mut background, &mut transparency).unwrap();
  }
  assert_eq!(metadata.text.len(), 2);
  assert_eq!(metadata.text[1].keyword, "c");
  assert_eq!(metadata.application, [(PngChunkTy(*b"prVt"), alloc::vec![1, 2, 3])]);
  assert_eq!(transparency, Some(tRNS::Index(alloc::vec![0x80])));
  assert_eq!(background, None);
}
