use super::*;

/// `iCCP`: Embedded ICC profile
///
/// * The profile `name` may be any convenient name for referring to the
///   profile. It is case-sensitive.
/// * The `profile` is already decompressed.
///
/// If this chunk is present, then the `sRGB` chunk *should not* be present.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct iCCP {
  pub name: String,
  pub profile: Vec<u8>,
}
impl Debug for iCCP {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("iCCP")
      .field("name", &self.name)
      .field("profile", &(&self.profile[..self.profile.len().min(12)], self.profile.len()))
      .finish()
  }
}
impl iCCP {
  pub fn parse(data: &[u8]) -> PngResult<Self> {
    const ERR: PngError = PngError::InvalidChunkData(PngChunkTy::iCCP);
    let (name, rest) = split_null(data).ok_or(ERR)?;
    let name = parse_keyword(name, PngChunkTy::iCCP)?;
    match rest {
      [0, zlib_data @ ..] => {
        Ok(Self { name, profile: zlib_decompress(zlib_data, PngChunkTy::iCCP)? })
      }
      _ => Err(ERR),
    }
  }
}
