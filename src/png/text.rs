use super::*;

/// Decodes a Latin-1 keyword, which must be 1 to 79 bytes.
pub(crate) fn parse_keyword(bytes: &[u8], ty: PngChunkTy) -> PngResult<String> {
  if bytes.is_empty() || bytes.len() > 79 {
    return Err(PngError::InvalidChunkData(ty));
  }
  Ok(latin1_to_string(bytes))
}

/// Every Latin-1 byte is the Unicode scalar value of the same number.
pub(crate) fn latin1_to_string(bytes: &[u8]) -> String {
  bytes.iter().map(|&b| b as char).collect()
}

/// Splits at the first null byte, dropping the null.
pub(crate) fn split_null(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
  let i = bytes.iter().position(|&b| b == 0)?;
  Some((&bytes[..i], &bytes[i + 1..]))
}

/// A text entry, from a `tEXt`, `zTXt`, or `iTXt` chunk.
///
/// Compressed text is decompressed while parsing. `tEXt` and `zTXt` entries
/// never have a language or a translated keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PngText {
  pub keyword: String,
  /// An RFC 3066 language tag, or empty.
  pub language: String,
  pub translated_keyword: String,
  pub text: String,
  /// If the text was stored compressed.
  pub compressed: bool,
}
impl PngText {
  /// Parses a `tEXt` (`compressed == false`) or `zTXt` chunk, which hold
  /// Latin-1 text.
  pub fn parse_latin1(data: &[u8], compressed: bool) -> PngResult<Self> {
    let ty = if compressed { PngChunkTy::zTXt } else { PngChunkTy::tEXt };
    let (keyword, rest) = split_null(data).ok_or(PngError::InvalidChunkData(ty))?;
    let keyword = parse_keyword(keyword, ty)?;
    let text = if compressed {
      match rest {
        [0, zlib_data @ ..] => latin1_to_string(&zlib_decompress(zlib_data, ty)?),
        _ => return Err(PngError::InvalidChunkData(ty)),
      }
    } else {
      latin1_to_string(rest)
    };
    Ok(Self {
      keyword,
      language: String::new(),
      translated_keyword: String::new(),
      text,
      compressed,
    })
  }

  /// Parses an `iTXt` chunk, which holds UTF-8 text.
  pub fn parse_unicode(data: &[u8]) -> PngResult<Self> {
    const ERR: PngError = PngError::InvalidChunkData(PngChunkTy::iTXt);
    let (keyword, rest) = split_null(data).ok_or(ERR)?;
    let keyword = parse_keyword(keyword, PngChunkTy::iTXt)?;
    // flag is 0 or 1, method should always be 0
    let (compressed, rest) = match rest {
      [0, 0, rest @ ..] => (false, rest),
      [1, 0, rest @ ..] => (true, rest),
      _ => return Err(ERR),
    };
    let (language, rest) = split_null(rest).ok_or(ERR)?;
    let (translated_keyword, rest) = split_null(rest).ok_or(ERR)?;
    let language: String = core::str::from_utf8(language).map_err(|_| ERR)?.into();
    let translated_keyword: String =
      core::str::from_utf8(translated_keyword).map_err(|_| ERR)?.into();
    let text = if compressed {
      String::from_utf8(zlib_decompress(rest, PngChunkTy::iTXt)?).map_err(|_| ERR)?
    } else {
      core::str::from_utf8(rest).map_err(|_| ERR)?.into()
    };
    Ok(Self { keyword, language, translated_keyword, text, compressed })
  }
}

#[test]
fn test_text_parse() {
  let t = PngText::parse_latin1(b"Title\0caf\xE9", false).unwrap();
  assert_eq!(t.keyword, "Title");
  assert_eq!(t.text, "caf\u{E9}");
  assert!(PngText::parse_latin1(b"\0abc", false).is_err());
  assert!(PngText::parse_latin1(b"no null", false).is_err());

  let mut z = b"Comment\0\0".to_vec();
  z.extend(miniz_oxide::deflate::compress_to_vec_zlib(b"squished", 6));
  let t = PngText::parse_latin1(&z, true).unwrap();
  assert_eq!(t.text, "squished");
  assert!(t.compressed);

  let t = PngText::parse_unicode("Author\0\0\0en\0Auteur\0\u{263A}".as_bytes()).unwrap();
  assert_eq!(t.language, "en");
  assert_eq!(t.translated_keyword, "Auteur");
  assert_eq!(t.text, "\u{263A}");
  assert!(!t.compressed);
  assert!(PngText::parse_unicode(b"Author\0\x02\0\0\0").is_err());
}
