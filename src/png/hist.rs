use super::*;

/// `hIST`: Image Histogram
///
/// Gives the approximate usage frequency of each color in the palette.
///
/// * There's exactly one entry for each entry in the `PLTE` chunk, so this
///   can only appear when there's a palette.
/// * A zero entry means that palette entry isn't used at all in the image.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct hIST {
  frequencies: Vec<u16>,
}
impl Debug for hIST {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("hIST")
      .field(&&self.frequencies[..self.frequencies.len().min(8)])
      .field(&self.frequencies.len())
      .finish()
  }
}
impl hIST {
  pub fn parse(data: &[u8], palette: &PLTE) -> PngResult<Self> {
    const ERR: PngError = PngError::InvalidChunkData(PngChunkTy::hIST);
    let pairs: &[[u8; 2]] = bytemuck::try_cast_slice(data).map_err(|_| ERR)?;
    if pairs.len() != palette.len() {
      return Err(ERR);
    }
    let mut frequencies = Vec::new();
    frequencies.try_reserve(pairs.len())?;
    frequencies.extend(pairs.iter().copied().map(u16::from_be_bytes));
    Ok(Self { frequencies })
  }

  #[inline]
  #[must_use]
  pub fn frequencies(&self) -> &[u16] {
    &self.frequencies
  }
}

#[test]
fn test_hist_parse() {
  let plte = PLTE::parse(&[0; 6], PngPixel::I8).unwrap();
  assert_eq!(hIST::parse(&[0, 1, 1, 0], &plte).unwrap().frequencies(), &[1, 256]);
  assert!(hIST::parse(&[0, 1], &plte).is_err());
  assert!(hIST::parse(&[0, 1, 1], &plte).is_err());
}
