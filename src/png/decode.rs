use super::*;

/// Settings for [`decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeOptions {
  /// Paint each interlaced pixel over the area later passes will fill in.
  ///
  /// This only matters if you look at the image before decoding finishes, or
  /// if the data is truncated.
  pub overdraw: bool,
  /// Images wider or taller than this are rejected before any allocation.
  ///
  /// `None` means no limit (other than running out of memory).
  pub max_dimension: Option<u32>,
}
impl Default for DecodeOptions {
  #[inline]
  fn default() -> Self {
    Self { overdraw: false, max_dimension: Some(16_384) }
  }
}

/// Decodes an entire PNG from the chunk source given.
///
/// The chunks are checked against all of the PNG ordering rules as they
/// arrive, and decoding stops at the first problem.
pub fn decode<S: PngSource>(stream: &mut S, options: &DecodeOptions) -> PngResult<PngImage> {
  stream.signature()?;

  let (standard, header) = {
    let mut chunk = stream.chunk()?;
    let standard = if chunk.ty == PngChunkTy::CgBI {
      log::debug!("found CgBI, using Apple's variant");
      chunk = stream.chunk()?;
      PngStandard::Ios
    } else {
      PngStandard::Common
    };
    if chunk.ty != PngChunkTy::IHDR {
      return Err(PngError::MissingImageHeader);
    }
    (standard, IHDR::parse(chunk.data, standard)?)
  };
  log::trace!("{header:?}");
  if let Some(max) = options.max_dimension {
    if header.width > max || header.height > max {
      return Err(PngError::DimensionsTooLarge);
    }
  }

  let mut palette: Option<PLTE> = None;
  let mut background: Option<bKGD> = None;
  let mut transparency: Option<tRNS> = None;
  let mut metadata = PngMetadata::default();
  let mut context = loop {
    let chunk = stream.chunk()?;
    match chunk.ty {
      PngChunkTy::IHDR => return Err(PngError::DuplicateChunk(PngChunkTy::IHDR)),
      PngChunkTy::PLTE => {
        if palette.is_some() {
          return Err(PngError::DuplicateChunk(PngChunkTy::PLTE));
        }
        if background.is_some() {
          return Err(PngError::InvalidChunkOrder {
            chunk: PngChunkTy::PLTE,
            after: PngChunkTy::bKGD,
          });
        }
        if transparency.is_some() {
          return Err(PngError::InvalidChunkOrder {
            chunk: PngChunkTy::PLTE,
            after: PngChunkTy::tRNS,
          });
        }
        palette = Some(PLTE::parse(chunk.data, header.pixel)?);
      }
      PngChunkTy::IDAT => {
        let mut context = Context::new(
          standard,
          &header,
          palette.as_ref(),
          background.as_ref(),
          transparency.as_ref(),
          metadata,
        )?;
        context.push(chunk.data, options.overdraw)?;
        break context;
      }
      PngChunkTy::IEND => return Err(PngError::MissingImageData),
      ty => metadata.push_ancillary(
        ty,
        chunk.data,
        header.pixel,
        palette.as_ref(),
        &mut background,
        &mut transparency,
      )?,
    }
  };

  let mut after_data: Option<PngChunkTy> = None;
  loop {
    let chunk = stream.chunk()?;
    match (chunk.ty, after_data) {
      (PngChunkTy::IDAT, None) => {
        context.push(chunk.data, options.overdraw)?;
      }
      (PngChunkTy::IDAT, Some(after)) => {
        return Err(PngError::InvalidChunkOrder { chunk: PngChunkTy::IDAT, after });
      }
      (ty, _) => {
        context.push_ancillary(ty, chunk.data)?;
        if ty == PngChunkTy::IEND {
          return Ok(context.into_image());
        }
        after_data = Some(ty);
      }
    }
  }
}

/// Decodes a PNG that's entirely in memory, using the default options.
///
/// Bytes after the `IEND` chunk are ignored.
pub fn decode_png_bytes(bytes: &[u8]) -> PngResult<PngImage> {
  let mut slice = PngSlice::new(bytes);
  let image = decode(&mut slice, &DecodeOptions::default())?;
  if !slice.remaining().is_empty() {
    log::warn!("ignoring {} bytes after IEND", slice.remaining().len());
  }
  Ok(image)
}
