use super::*;

/// `tIME`: Image last-modification time.
///
/// Last image modification time, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct tIME {
  /// 4-digit year.
  pub year: u16,
  /// 1-12
  pub month: u8,
  /// 1-31
  pub day: u8,
  /// 0-23
  pub hour: u8,
  /// 0-59
  pub minute: u8,
  /// 0-60 (60 is for leap seconds)
  pub second: u8,
}
impl tIME {
  pub fn parse(data: &[u8]) -> PngResult<Self> {
    match *data {
      [y0, y1, month @ 1..=12, day @ 1..=31, hour @ 0..=23, minute @ 0..=59, second @ 0..=60] => {
        Ok(Self { year: u16::from_be_bytes([y0, y1]), month, day, hour, minute, second })
      }
      _ => Err(PngError::InvalidChunkData(PngChunkTy::tIME)),
    }
  }
}

#[test]
fn test_time_parse() {
  assert_eq!(
    tIME::parse(&[0x07, 0xE8, 2, 29, 23, 59, 60]),
    Ok(tIME { year: 2024, month: 2, day: 29, hour: 23, minute: 59, second: 60 })
  );
  assert!(tIME::parse(&[0x07, 0xE8, 13, 1, 0, 0, 0]).is_err());
  assert!(tIME::parse(&[0x07, 0xE8, 1, 1, 24, 0, 0]).is_err());
  assert!(tIME::parse(&[0x07, 0xE8, 1, 1, 0, 0]).is_err());
}
