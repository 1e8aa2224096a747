use miniz_oxide::deflate::{compress_to_vec, compress_to_vec_zlib};
use pngstream::{
  png::{
    decode, decode_png_bytes, png_crc, DecodeOptions, PngChunkTy, PngFormat, PngImage, PngPixel,
    PngSlice, RawPngChunkIter, PNG_SIGNATURE,
  },
  PngError,
};
use walkdir::WalkDir;

fn chunk(ty: &[u8; 4], data: &[u8]) -> Vec<u8> {
  let mut v = Vec::with_capacity(12 + data.len());
  v.extend_from_slice(&(data.len() as u32).to_be_bytes());
  v.extend_from_slice(ty);
  v.extend_from_slice(data);
  v.extend_from_slice(&png_crc(ty.iter().copied().chain(data.iter().copied())).to_be_bytes());
  v
}

fn ihdr(width: u32, height: u32, depth: u8, color_type: u8, interlaced: bool) -> Vec<u8> {
  let mut data = Vec::new();
  data.extend_from_slice(&width.to_be_bytes());
  data.extend_from_slice(&height.to_be_bytes());
  data.extend_from_slice(&[depth, color_type, 0, 0, u8::from(interlaced)]);
  chunk(b"IHDR", &data)
}

fn iend() -> Vec<u8> {
  chunk(b"IEND", &[])
}

fn build_png(chunks: &[Vec<u8>]) -> Vec<u8> {
  let mut v = PNG_SIGNATURE.to_vec();
  chunks.iter().for_each(|c| v.extend_from_slice(c));
  v
}

/// An 8-bit grayscale image where pixel `(x, y)` is `x * 16 + y`, as
/// unfiltered image data.
fn gray_ramp(size: (usize, usize), interlaced: bool) -> Vec<u8> {
  const PASSES: [((usize, usize), (usize, usize)); 7] = [
    ((0, 0), (8, 8)),
    ((4, 0), (8, 8)),
    ((0, 4), (4, 8)),
    ((2, 0), (4, 4)),
    ((0, 2), (2, 4)),
    ((1, 0), (2, 2)),
    ((0, 1), (1, 2)),
  ];
  let passes: &[((usize, usize), (usize, usize))] =
    if interlaced { &PASSES } else { &[((0, 0), (1, 1))] };
  let mut out = Vec::new();
  for &(base, stride) in passes {
    let xs: Vec<usize> = (base.0..size.0).step_by(stride.0).collect();
    if xs.is_empty() {
      continue;
    }
    for y in (base.1..size.1).step_by(stride.1) {
      out.push(0);
      out.extend(xs.iter().map(|&x| (x * 16 + y) as u8));
    }
  }
  out
}

fn expected_ramp(size: (usize, usize)) -> Vec<u8> {
  (0..size.1).flat_map(|y| (0..size.0).map(move |x| (x * 16 + y) as u8)).collect()
}

#[test]
fn test_RawPngChunkIter_no_panics() {
  // iter ALL files in the test folder, even non-png files shouldn't panic it.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    println!("{}", entry.path().display());
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    for _ in RawPngChunkIter::new(&v) {
      //
    }
    assert!(decode_png_bytes(&v).is_err());
  }
  // even totally random data should never panic the iterator!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    for _ in RawPngChunkIter::new(&v) {
      //
    }
  }
}

#[test]
fn test_decode_no_panics_on_garbage() {
  for _ in 0..50 {
    let mut v = PNG_SIGNATURE.to_vec();
    v.extend(super::rand_bytes(256));
    let _ = decode_png_bytes(&v);
  }
  // well framed chunks full of garbage
  for _ in 0..50 {
    let garbage = super::rand_bytes(64);
    let v = build_png(&[ihdr(4, 4, 8, 0, false), chunk(b"IDAT", &garbage), iend()]);
    assert!(decode_png_bytes(&v).is_err());
  }
}

#[test]
fn test_one_by_one_gray() {
  for interlaced in [false, true] {
    let v = build_png(&[
      ihdr(1, 1, 8, 0, interlaced),
      chunk(b"IDAT", &compress_to_vec_zlib(&[0, 0xAB], 6)),
      iend(),
    ]);
    let image = decode_png_bytes(&v).unwrap();
    assert_eq!(image.size(), (1, 1));
    assert_eq!(image.storage(), &[0xAB]);
    assert_eq!(image.layout().interlaced(), interlaced);
  }
}

#[test]
fn test_random_idat_splits_give_the_same_image() {
  let size = (13, 11);
  for interlaced in [false, true] {
    let zlib = compress_to_vec_zlib(&gray_ramp(size, interlaced), 6);
    let whole = build_png(&[
      ihdr(size.0 as u32, size.1 as u32, 8, 0, interlaced),
      chunk(b"IDAT", &zlib),
      iend(),
    ]);
    let expected: PngImage = decode_png_bytes(&whole).unwrap();
    assert_eq!(expected.storage(), &expected_ramp(size)[..]);

    for _ in 0..20 {
      let mut chunks = vec![ihdr(size.0 as u32, size.1 as u32, 8, 0, interlaced)];
      let mut rest = &zlib[..];
      for r in super::rand_bytes(8) {
        let (head, tail) = rest.split_at((usize::from(r) / 4).min(rest.len()));
        // nothing may follow the end of the stream, not even an empty chunk
        if !tail.is_empty() {
          chunks.push(chunk(b"IDAT", head));
          rest = tail;
        }
      }
      chunks.push(chunk(b"IDAT", rest));
      chunks.push(iend());
      let image = decode_png_bytes(&build_png(&chunks)).unwrap();
      assert_eq!(image, expected);
    }
  }
}

#[test]
fn test_push_after_end() {
  let zlib = compress_to_vec_zlib(&[0, 1], 6);
  let v = build_png(&[ihdr(1, 1, 8, 0, false), chunk(b"IDAT", &zlib), chunk(b"IDAT", &[0]), iend()]);
  assert_eq!(decode_png_bytes(&v), Err(PngError::ExtraneousCompressedBytes));

  let mut long = zlib.clone();
  long.push(0);
  let v = build_png(&[ihdr(1, 1, 8, 0, false), chunk(b"IDAT", &long), iend()]);
  assert_eq!(decode_png_bytes(&v), Err(PngError::ExtraneousCompressedBytes));
}

#[test]
fn test_image_data_length_errors() {
  let v = build_png(&[
    ihdr(1, 1, 8, 0, false),
    chunk(b"IDAT", &compress_to_vec_zlib(&[0, 1, 2], 6)),
    iend(),
  ]);
  assert_eq!(decode_png_bytes(&v), Err(PngError::ExtraneousImageData));

  let zlib = compress_to_vec_zlib(&[0, 1, 0, 2], 6);
  let v = build_png(&[ihdr(1, 2, 8, 0, false), chunk(b"IDAT", &zlib[..zlib.len() - 4]), iend()]);
  assert_eq!(decode_png_bytes(&v), Err(PngError::IncompleteImageDataCompressedBytestream));
}

#[test]
fn test_chunk_order_errors() {
  let idat = chunk(b"IDAT", &compress_to_vec_zlib(&[0, 1, 2, 3], 6));
  let header = ihdr(1, 1, 8, 2, false);
  let time = chunk(b"tIME", &[0x07, 0xE8, 6, 1, 12, 0, 0]);

  let v = build_png(&[header.clone(), chunk(b"bKGD", &[0, 1, 0, 2, 0, 3]), chunk(b"PLTE", &[0; 3])]);
  assert_eq!(
    decode_png_bytes(&v),
    Err(PngError::InvalidChunkOrder { chunk: PngChunkTy::PLTE, after: PngChunkTy::bKGD })
  );

  let v = build_png(&[header.clone(), time.clone(), time.clone(), idat.clone(), iend()]);
  assert_eq!(decode_png_bytes(&v), Err(PngError::DuplicateChunk(PngChunkTy::tIME)));
  let v = build_png(&[header.clone(), time.clone(), idat.clone(), time.clone(), iend()]);
  assert_eq!(decode_png_bytes(&v), Err(PngError::DuplicateChunk(PngChunkTy::tIME)));
  // a single one after the data is fine
  let v = build_png(&[header.clone(), idat.clone(), time.clone(), iend()]);
  assert!(decode_png_bytes(&v).unwrap().metadata.time.is_some());

  let v = build_png(&[header.clone(), header.clone()]);
  assert_eq!(decode_png_bytes(&v), Err(PngError::DuplicateChunk(PngChunkTy::IHDR)));

  let v = build_png(&[header.clone(), idat.clone(), chunk(b"gAMA", &[0, 0, 0, 1]), iend()]);
  assert_eq!(
    decode_png_bytes(&v),
    Err(PngError::InvalidChunkOrder { chunk: PngChunkTy::gAMA, after: PngChunkTy::IDAT })
  );

  let text = chunk(b"tEXt", b"a\0b");
  let v = build_png(&[header.clone(), idat.clone(), text, idat.clone(), iend()]);
  assert_eq!(
    decode_png_bytes(&v),
    Err(PngError::InvalidChunkOrder { chunk: PngChunkTy::IDAT, after: PngChunkTy::tEXt })
  );

  let v = build_png(&[chunk(b"tEXt", b"a\0b"), header.clone(), idat.clone(), iend()]);
  assert_eq!(decode_png_bytes(&v), Err(PngError::MissingImageHeader));

  let v = build_png(&[header.clone(), iend()]);
  assert_eq!(decode_png_bytes(&v), Err(PngError::MissingImageData));

  let v = build_png(&[ihdr(1, 1, 8, 3, false), idat.clone(), iend()]);
  assert_eq!(decode_png_bytes(&v), Err(PngError::MissingPalette));
}

#[test]
fn test_repeated_chunks() {
  let header = ihdr(1, 1, 8, 3, false);
  let plte = chunk(b"PLTE", &[0, 0, 0, 255, 255, 255]);
  let idat = chunk(b"IDAT", &compress_to_vec_zlib(&[0, 0], 6));
  let iccp = [b"icc\0\0".to_vec(), compress_to_vec_zlib(b"profile", 6)].concat();
  let mut phys = [0_u8; 9];
  phys[3] = 1;
  phys[7] = 1;

  let before_palette: [(&[u8; 4], &[u8]); 4] =
    [(b"cHRM", &[0; 32]), (b"sRGB", &[0]), (b"iCCP", &iccp), (b"sBIT", &[5, 6, 5])];
  for (ty, data) in before_palette {
    let dup = chunk(ty, data);
    let v = build_png(&[header.clone(), dup.clone(), dup, plte.clone(), idat.clone(), iend()]);
    assert_eq!(decode_png_bytes(&v), Err(PngError::DuplicateChunk(PngChunkTy(*ty))), "{ty:?}");
  }

  let after_palette: [(&[u8; 4], &[u8]); 4] =
    [(b"bKGD", &[1]), (b"tRNS", &[0]), (b"hIST", &[0, 1, 0, 2]), (b"pHYs", &phys)];
  for (ty, data) in after_palette {
    let dup = chunk(ty, data);
    let v = build_png(&[header.clone(), plte.clone(), dup.clone(), dup, idat.clone(), iend()]);
    assert_eq!(decode_png_bytes(&v), Err(PngError::DuplicateChunk(PngChunkTy(*ty))), "{ty:?}");
  }

  let rgb = ihdr(1, 1, 8, 2, false);
  let trns = chunk(b"tRNS", &[0, 1, 0, 2, 0, 3]);
  let v = build_png(&[rgb.clone(), trns, plte.clone(), idat.clone(), iend()]);
  assert_eq!(
    decode_png_bytes(&v),
    Err(PngError::InvalidChunkOrder { chunk: PngChunkTy::PLTE, after: PngChunkTy::tRNS })
  );
  let v = build_png(&[rgb, plte.clone(), plte.clone(), idat.clone(), iend()]);
  assert_eq!(decode_png_bytes(&v), Err(PngError::DuplicateChunk(PngChunkTy::PLTE)));

  // any number of suggested palettes, kept in order
  let v = build_png(&[
    header,
    chunk(b"sPLT", b"a\0\x08"),
    plte,
    chunk(b"sPLT", b"b\0\x10"),
    idat,
    iend(),
  ]);
  let image = decode_png_bytes(&v).unwrap();
  let names: Vec<&str> = image.metadata.suggested_palettes.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, ["a", "b"]);
}

#[test]
fn test_framing_errors() {
  assert_eq!(decode_png_bytes(b"GIF89a and then some"), Err(PngError::BytesAreNotPng));
  assert_eq!(decode_png_bytes(&PNG_SIGNATURE[..4]), Err(PngError::UnexpectedEndOfInput));

  let mut bad_crc = ihdr(1, 1, 8, 0, false);
  *bad_crc.last_mut().unwrap() ^= 1;
  let v = build_png(&[bad_crc]);
  assert_eq!(decode_png_bytes(&v), Err(PngError::CrcMismatch(PngChunkTy::IHDR)));

  let idat = chunk(b"IDAT", &compress_to_vec_zlib(&[0, 9], 6));
  let v = build_png(&[ihdr(1, 1, 8, 0, false), idat]);
  assert_eq!(decode_png_bytes(&v), Err(PngError::UnexpectedEndOfInput));
}

#[test]
fn test_max_dimension() {
  let v = build_png(&[ihdr(20_000, 1, 8, 0, false)]);
  assert_eq!(decode_png_bytes(&v), Err(PngError::DimensionsTooLarge));
  let options = DecodeOptions { max_dimension: Some(4), ..DecodeOptions::default() };
  let v = build_png(&[ihdr(5, 1, 8, 0, false)]);
  assert_eq!(decode(&mut PngSlice::new(&v), &options), Err(PngError::DimensionsTooLarge));
}

#[test]
fn test_cgbi() {
  let v = build_png(&[
    chunk(b"CgBI", &[0x50, 0x00, 0x20, 0x02]),
    ihdr(1, 1, 8, 2, false),
    chunk(b"IDAT", &compress_to_vec(&[0, 1, 2, 3], 6)),
    iend(),
  ]);
  let image = decode_png_bytes(&v).unwrap();
  assert_eq!(image.layout().format(), &PngFormat::BGR { fill: None, key: None });
  assert_eq!(image.storage(), &[1, 2, 3]);
  let rgba = image.to_rgba8().unwrap();
  assert_eq!((rgba[0].r, rgba[0].g, rgba[0].b, rgba[0].a), (3, 2, 1, 255));

  // Apple's variant only has 8-bit color images
  let v = build_png(&[chunk(b"CgBI", &[0; 4]), ihdr(1, 1, 8, 0, false)]);
  assert!(decode_png_bytes(&v).is_err());
}

#[test]
fn test_indexed_with_transparency() {
  // 2-bit indices 3, 0, 1, 2 packed into one byte
  let idat = chunk(b"IDAT", &compress_to_vec_zlib(&[0, 0b11_00_01_10], 6));
  let v = build_png(&[
    ihdr(4, 1, 2, 3, false),
    chunk(b"PLTE", &[10, 10, 10, 20, 20, 20, 30, 30, 30, 40, 40, 40]),
    chunk(b"tRNS", &[0, 128]),
    chunk(b"bKGD", &[2]),
    idat,
    iend(),
  ]);
  let image = decode_png_bytes(&v).unwrap();
  assert_eq!(image.storage(), &[3, 0, 1, 2]);
  let rgba = image.to_rgba8().unwrap();
  let alphas: Vec<u8> = rgba.iter().map(|p| p.a).collect();
  let reds: Vec<u8> = rgba.iter().map(|p| p.r).collect();
  assert_eq!(alphas, [255, 0, 128, 255]);
  assert_eq!(reds, [40, 10, 20, 30]);
  match image.layout().format() {
    PngFormat::Indexed { pixel, fill, .. } => {
      assert_eq!(*pixel, PngPixel::I2);
      assert_eq!(*fill, Some(2));
    }
    other => panic!("{other:?}"),
  }
}

#[test]
fn test_metadata_is_collected() {
  let mut ztxt = b"Comment\0\0".to_vec();
  ztxt.extend(compress_to_vec_zlib(b"squished", 6));
  let v = build_png(&[
    ihdr(1, 1, 8, 0, false),
    chunk(b"gAMA", &[0, 0, 0xB1, 0x8F]),
    chunk(b"tEXt", b"Title\0hello"),
    chunk(b"prVt", &[1, 2, 3]),
    chunk(b"IDAT", &compress_to_vec_zlib(&[0, 7], 6)),
    chunk(b"zTXt", &ztxt),
    chunk(b"iTXt", "Author\0\0\0en\0Autor\0Ülrich".as_bytes()),
    iend(),
  ]);
  let image = decode_png_bytes(&v).unwrap();
  let metadata = &image.metadata;
  assert_eq!(metadata.gamma.map(|g| g.gamma), Some(45455));
  let texts: Vec<(&str, &str)> =
    metadata.text.iter().map(|t| (t.keyword.as_str(), t.text.as_str())).collect();
  assert_eq!(texts, [("Title", "hello"), ("Comment", "squished"), ("Author", "Ülrich")]);
  assert_eq!(metadata.text[2].language, "en");
  assert_eq!(metadata.application, [(PngChunkTy(*b"prVt"), vec![1, 2, 3])]);
}

#[test]
fn test_interlaced_sixteen_bit_rgba() {
  // 3x2 RGBA16: pass 0 has (0,0), pass 3 has (2,0), pass 5 has (1,0), pass 6
  // has the whole second row.
  let px = |x: u8, y: u8| [x, y, 0, 0, 0, 0, 0xFF, 0xFF];
  let mut data = Vec::new();
  for row in [vec![(0, 0)], vec![(2, 0)], vec![(1, 0)], vec![(0, 1), (1, 1), (2, 1)]] {
    data.push(0);
    row.into_iter().for_each(|(x, y)| data.extend(px(x, y)));
  }
  let v = build_png(&[
    ihdr(3, 2, 16, 6, true),
    chunk(b"IDAT", &compress_to_vec_zlib(&data, 6)),
    iend(),
  ]);
  let image = decode_png_bytes(&v).unwrap();
  let expected: Vec<u8> = [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
    .into_iter()
    .flat_map(|(x, y)| px(x, y))
    .collect();
  assert_eq!(image.storage(), &expected[..]);
  let words: &[[u8; 8]] = image.storage_as().unwrap();
  assert_eq!(words.len(), 6);
}
