use super::*;

/// Chunks larger than this are malformed (PNG caps lengths at
/// 2<sup>31</sup>-1).
const MAX_CHUNK_LEN: u32 = (1 << 31) - 1;

/// Something that can produce the framed chunks of a PNG datastream.
///
/// The decoder never sees raw container bytes, only this. Framing and CRC
/// checking are the source's job.
pub trait PngSource {
  /// Consumes the eight byte PNG signature, failing if it's not there.
  fn signature(&mut self) -> PngResult<()>;

  /// Reads one length-prefixed, type-tagged, CRC-suffixed chunk.
  ///
  /// Fails if the bytes end early, or the declared CRC doesn't match.
  fn chunk(&mut self) -> PngResult<RawPngChunk<'_>>;
}

/// A [`PngSource`] over a PNG that's entirely in memory.
#[derive(Debug, Clone)]
pub struct PngSlice<'b> {
  spare: &'b [u8],
}
impl<'b> PngSlice<'b> {
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'b [u8]) -> Self {
    Self { spare: bytes }
  }

  /// The bytes not yet consumed.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> &'b [u8] {
    self.spare
  }
}
impl PngSource for PngSlice<'_> {
  fn signature(&mut self) -> PngResult<()> {
    let (sig, rest) =
      try_split_off_byte_array::<8>(self.spare).ok_or(PngError::UnexpectedEndOfInput)?;
    if sig != PNG_SIGNATURE {
      return Err(PngError::BytesAreNotPng);
    }
    self.spare = rest;
    Ok(())
  }

  fn chunk(&mut self) -> PngResult<RawPngChunk<'_>> {
    if let Some((len_bytes, rest)) = try_split_off_byte_array::<4>(self.spare) {
      if let Some((ty, _)) = try_split_off_byte_array::<4>(rest) {
        if u32::from_be_bytes(len_bytes) > MAX_CHUNK_LEN {
          return Err(PngError::ChunkTooLong(PngChunkTy(ty)));
        }
      }
    }
    let (chunk, rest) = split_chunk(self.spare).ok_or(PngError::UnexpectedEndOfInput)?;
    let actual_crc = chunk.compute_actual_crc();
    if actual_crc != chunk.declared_crc {
      log::warn!("{:?}: declared crc {:08X}, actual {actual_crc:08X}", chunk.ty, chunk.declared_crc);
      return Err(PngError::CrcMismatch(chunk.ty));
    }
    self.spare = rest;
    log::trace!("{chunk:?}");
    Ok(chunk)
  }
}
