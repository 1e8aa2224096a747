use super::*;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// A four byte chunk type code.
///
/// The associated constants are all of the chunk types that the decoder
/// gives meaning to. Any other code is carried along as opaque application
/// data.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngChunkTy(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngChunkTy {
  /// Apple's proprietary marker. When this comes before the `IHDR`, the image
  /// data is a raw deflate stream without the zlib wrapper.
  pub const CgBI: Self = Self(*b"CgBI");
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");

  pub const cHRM: Self = Self(*b"cHRM");
  pub const gAMA: Self = Self(*b"gAMA");
  pub const iCCP: Self = Self(*b"iCCP");
  pub const sBIT: Self = Self(*b"sBIT");
  pub const sRGB: Self = Self(*b"sRGB");
  pub const bKGD: Self = Self(*b"bKGD");
  pub const hIST: Self = Self(*b"hIST");
  pub const tRNS: Self = Self(*b"tRNS");
  pub const pHYs: Self = Self(*b"pHYs");
  pub const sPLT: Self = Self(*b"sPLT");
  pub const tIME: Self = Self(*b"tIME");
  pub const iTXt: Self = Self(*b"iTXt");
  pub const tEXt: Self = Self(*b"tEXt");
  pub const zTXt: Self = Self(*b"zTXt");

  /// Critical chunks have an uppercase first letter.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    (self.0[0] & 32) == 0
  }
  /// Public chunks have an uppercase second letter.
  #[inline]
  #[must_use]
  pub const fn is_public(self) -> bool {
    (self.0[1] & 32) == 0
  }
  /// The third letter is reserved and should always be uppercase.
  #[inline]
  #[must_use]
  pub const fn is_reserved_bit_valid(self) -> bool {
    (self.0[2] & 32) == 0
  }
  /// Editors that don't understand a chunk may copy it only if it's marked
  /// safe to copy (lowercase fourth letter).
  #[inline]
  #[must_use]
  pub const fn is_safe_to_copy(self) -> bool {
    (self.0[3] & 32) != 0
  }
}
impl Debug for PngChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char(self.0[0] as char)?;
    f.write_char(self.0[1] as char)?;
    f.write_char(self.0[2] as char)?;
    f.write_char(self.0[3] as char)?;
    Ok(())
  }
}

/// An unparsed chunk from a PNG.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawPngChunk<'b> {
  pub ty: PngChunkTy,
  pub data: &'b [u8],
  pub declared_crc: u32,
}
impl Debug for RawPngChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawPngChunk")
      .field("ty", &self.ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
impl RawPngChunk<'_> {
  /// CRC of the chunk type and data, which is what `declared_crc` should be.
  #[inline]
  #[must_use]
  pub fn compute_actual_crc(&self) -> u32 {
    png_crc(self.ty.0.iter().copied().chain(self.data.iter().copied()))
  }
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// This does no validation at all beyond the framing: the CRC isn't checked,
/// and it stops at the first chunk that doesn't fit in the remaining bytes.
/// It will never panic, no matter the input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct RawPngChunkIter<'b>(&'b [u8]);
impl<'b> RawPngChunkIter<'b> {
  /// Pass the full PNG bytes, it will remove the PNG signature automatically.
  ///
  /// The signature bytes are skipped without being checked.
  #[inline]
  pub const fn new(bytes: &'b [u8]) -> Self {
    match bytes {
      [_, _, _, _, _, _, _, _, rest @ ..] => Self(rest),
      _ => Self(&[]),
    }
  }
}
impl<'b> Iterator for RawPngChunkIter<'b> {
  type Item = RawPngChunk<'b>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let (chunk, rest) = split_chunk(self.0)?;
    self.0 = rest;
    Some(chunk)
  }
}

/// Splits one chunk off the front of `bytes`, giving `None` if it doesn't fit.
#[inline]
pub(crate) fn split_chunk(bytes: &[u8]) -> Option<(RawPngChunk<'_>, &[u8])> {
  let (len_bytes, rest) = try_split_off_byte_array::<4>(bytes)?;
  let chunk_len = usize::try_from(u32::from_be_bytes(len_bytes)).ok()?;
  let (ty_bytes, rest) = try_split_off_byte_array::<4>(rest)?;
  if rest.len() < chunk_len {
    return None;
  }
  let (data, rest) = rest.split_at(chunk_len);
  let (crc_bytes, rest) = try_split_off_byte_array::<4>(rest)?;
  let chunk = RawPngChunk {
    ty: PngChunkTy(ty_bytes),
    data,
    declared_crc: u32::from_be_bytes(crc_bytes),
  };
  Some((chunk, rest))
}

#[inline]
pub(crate) fn try_split_off_byte_array<const N: usize>(bytes: &[u8]) -> Option<([u8; N], &[u8])> {
  if bytes.len() >= N {
    let (head, tail) = bytes.split_at(N);
    let mut a = [0_u8; N];
    a.copy_from_slice(head);
    Some((a, tail))
  } else {
    None
  }
}

const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      if (c & 1) != 0 {
        c = 0xEDB8_8320_u32 ^ (c >> 1);
      } else {
        c >>= 1;
      }
      //
      k += 1;
    }
    out[n] = c;
    //
    n += 1;
  }
  out
}

fn update_crc(mut crc: u32, iter: impl Iterator<Item = u8>) -> u32 {
  for byte in iter {
    let i = (crc ^ u32::from(byte)) as u8 as usize;
    crc = CRC_TABLE[i] ^ (crc >> 8);
  }
  crc
}

/// The CRC-32 that PNG uses for chunk checksums.
#[inline]
pub fn png_crc(iter: impl Iterator<Item = u8>) -> u32 {
  update_crc(u32::MAX, iter) ^ u32::MAX
}

#[test]
fn test_png_crc_of_iend() {
  // every IEND chunk in existence ends with these four bytes.
  assert_eq!(png_crc(b"IEND".iter().copied()), 0xAE42_6082);
}

#[test]
fn test_chunk_ty_property_bits() {
  assert!(PngChunkTy::IHDR.is_critical());
  assert!(!PngChunkTy::tEXt.is_critical());
  assert!(PngChunkTy::tEXt.is_public());
  assert!(!PngChunkTy::CgBI.is_safe_to_copy());
  assert!(PngChunkTy::tEXt.is_safe_to_copy());
  assert!(PngChunkTy(*b"prVt").is_reserved_bit_valid());
  assert!(!PngChunkTy(*b"prvt").is_public());
}
