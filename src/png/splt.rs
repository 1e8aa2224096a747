use super::*;

use pixel_formats::r8g8b8a8_Srgb;

/// The entries of a suggested palette, each paired with a frequency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestedEntries {
  Depth8(Vec<(r8g8b8a8_Srgb, u16)>),
  /// `[r, g, b, a]`
  Depth16(Vec<([u16; 4], u16)>),
}

/// `sPLT`: Suggested palette
///
/// A palette that a viewer with a limited number of colors could use. The
/// image may have any number of these, and they don't have to agree with the
/// image's own pixel format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct sPLT {
  pub name: String,
  pub entries: SuggestedEntries,
}
impl sPLT {
  pub fn parse(data: &[u8]) -> PngResult<Self> {
    const ERR: PngError = PngError::InvalidChunkData(PngChunkTy::sPLT);
    let (name, rest) = split_null(data).ok_or(ERR)?;
    let name = parse_keyword(name, PngChunkTy::sPLT)?;
    let entries = match rest {
      [8, entries @ ..] => {
        let entries: &[[u8; 6]] = bytemuck::try_cast_slice(entries).map_err(|_| ERR)?;
        let mut v = Vec::new();
        v.try_reserve(entries.len())?;
        v.extend(
          entries
            .iter()
            .map(|&[r, g, b, a, f0, f1]| (r8g8b8a8_Srgb { r, g, b, a }, u16::from_be_bytes([f0, f1]))),
        );
        SuggestedEntries::Depth8(v)
      }
      [16, entries @ ..] => {
        let entries: &[[[u8; 2]; 5]] = bytemuck::try_cast_slice(entries).map_err(|_| ERR)?;
        let mut v = Vec::new();
        v.try_reserve(entries.len())?;
        v.extend(entries.iter().map(|&[r, g, b, a, f]| {
          let rgba = [r, g, b, a].map(u16::from_be_bytes);
          (rgba, u16::from_be_bytes(f))
        }));
        SuggestedEntries::Depth16(v)
      }
      _ => return Err(ERR),
    };
    Ok(Self { name, entries })
  }
}

#[test]
fn test_splt_parse() {
  let splt = sPLT::parse(b"tiny\0\x08\x01\x02\x03\x04\x00\x09").unwrap();
  assert_eq!(splt.name, "tiny");
  assert_eq!(
    splt.entries,
    SuggestedEntries::Depth8(alloc::vec![(r8g8b8a8_Srgb { r: 1, g: 2, b: 3, a: 4 }, 9)])
  );
  let splt = sPLT::parse(b"wide\0\x10\0\x01\0\x02\0\x03\0\x04\0\x05").unwrap();
  assert_eq!(splt.entries, SuggestedEntries::Depth16(alloc::vec![([1, 2, 3, 4], 5)]));
  assert!(sPLT::parse(b"odd\0\x08\x01\x02").is_err());
  assert!(sPLT::parse(b"deep\0\x04").is_err());
}
