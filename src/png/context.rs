use super::*;

/// The state of a PNG decode from the first `IDAT` onward.
///
/// This pairs the output image with the streaming [`Decoder`] that fills it.
#[derive(Debug)]
pub struct Context {
  image: PngImage,
  decoder: Decoder,
}
impl Context {
  /// Resolves the layout and allocates the output image.
  ///
  /// ## Failure
  /// * [`MissingPalette`](PngError::MissingPalette) if the layout can't be
  ///   recognized (an indexed image without a `PLTE`).
  /// * Allocation failure, or a size that overflows `usize`.
  pub fn new(
    standard: PngStandard, header: &IHDR, palette: Option<&PLTE>, background: Option<&bKGD>,
    transparency: Option<&tRNS>, metadata: PngMetadata,
  ) -> PngResult<Self> {
    let layout = PngLayout::recognize(
      standard,
      header.pixel,
      palette,
      background,
      transparency,
      header.interlaced,
    )
    .ok_or(PngError::MissingPalette)?;
    log::debug!("{}x{} {layout:?}", header.width, header.height);
    let image = PngImage::new(header.size(), layout, metadata)?;
    Ok(Self { image, decoder: Decoder::new(standard, header.interlaced) })
  }

  #[inline]
  #[must_use]
  pub const fn image(&self) -> &PngImage {
    &self.image
  }

  #[inline]
  #[must_use]
  pub fn into_image(self) -> PngImage {
    self.image
  }

  /// If all of the compressed image data has been seen.
  #[inline]
  #[must_use]
  pub const fn is_finished(&self) -> bool {
    self.decoder.is_finished()
  }

  /// If every pixel of the image has been decoded.
  #[inline]
  #[must_use]
  pub const fn is_complete(&self) -> bool {
    self.decoder.is_complete()
  }

  /// Feeds one `IDAT` payload into the image.
  ///
  /// With `overdraw` set, each pixel of an interlaced image is also painted
  /// over the not-yet-decoded pixels that a later pass will replace, so a
  /// partial decode shows a blocky preview instead of gaps.
  pub fn push(&mut self, data: &[u8], overdraw: bool) -> PngResult<Progress> {
    let image = &mut self.image;
    let size = image.size();
    let pixel = image.layout().format().pixel();
    self.decoder.push(data, size, pixel, |scanline, base, stride| {
      image.assign(scanline, base, stride.0);
      if overdraw {
        let shift = (usize::from(base.0 != 0), usize::from(base.1 & 7 != 0));
        image.overdraw(base, (stride.0 >> shift.0, stride.1 >> shift.1));
      }
      Ok(())
    })
  }

  /// Accepts one chunk that comes after the image data.
  ///
  /// ## Failure
  /// * Any chunk that must come before the image data.
  /// * A second `tIME`.
  /// * `IEND` while the compressed data is still incomplete.
  pub fn push_ancillary(&mut self, ty: PngChunkTy, data: &[u8]) -> PngResult<()> {
    let metadata = &mut self.image.metadata;
    match ty {
      PngChunkTy::IHDR
      | PngChunkTy::PLTE
      | PngChunkTy::bKGD
      | PngChunkTy::tRNS
      | PngChunkTy::hIST
      | PngChunkTy::cHRM
      | PngChunkTy::gAMA
      | PngChunkTy::sRGB
      | PngChunkTy::iCCP
      | PngChunkTy::sBIT
      | PngChunkTy::pHYs
      | PngChunkTy::sPLT => Err(PngError::InvalidChunkOrder { chunk: ty, after: PngChunkTy::IDAT }),
      PngChunkTy::tIME => PngMetadata::unique(ty, &mut metadata.time, || tIME::parse(data)),
      PngChunkTy::tEXt | PngChunkTy::zTXt | PngChunkTy::iTXt => metadata.push_text(ty, data),
      PngChunkTy::IEND => {
        if self.decoder.is_finished() {
          Ok(())
        } else {
          Err(PngError::IncompleteImageDataCompressedBytestream)
        }
      }
      _ => metadata.push_application(ty, data),
    }
  }
}

#[test]
fn test_context_rejects_late_chunks() {
  let header = IHDR { width: 1, height: 1, pixel: PngPixel::Y8, interlaced: false };
  let mut context =
    Context::new(PngStandard::Common, &header, None, None, None, PngMetadata::default()).unwrap();
  assert_eq!(
    context.push_ancillary(PngChunkTy::gAMA, &[0, 0, 0, 1]),
    Err(PngError::InvalidChunkOrder { chunk: PngChunkTy::gAMA, after: PngChunkTy::IDAT })
  );
  assert_eq!(
    context.push_ancillary(PngChunkTy::IEND, &[]),
    Err(PngError::IncompleteImageDataCompressedBytestream)
  );
  let time = [0x07, 0xE8, 1, 2, 3, 4, 5];
  context.push_ancillary(PngChunkTy::tIME, &time).unwrap();
  assert_eq!(
    context.push_ancillary(PngChunkTy::tIME, &time),
    Err(PngError::DuplicateChunk(PngChunkTy::tIME))
  );

  let zlib = miniz_oxide::deflate::compress_to_vec_zlib(&[0, 77], 6);
  assert_eq!(context.push(&zlib, false), Ok(Progress::Finished));
  context.push_ancillary(PngChunkTy::IEND, &[]).unwrap();
  assert_eq!(context.image().storage(), &[77]);
}

#[test]
fn test_context_missing_palette() {
  let header = IHDR { width: 1, height: 1, pixel: PngPixel::I8, interlaced: true };
  let context = Context::new(PngStandard::Common, &header, None, None, None, PngMetadata::default());
  assert!(matches!(context, Err(PngError::MissingPalette)));
}
