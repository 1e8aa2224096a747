use super::*;

use alloc::vec;

const ALL_PIXELS: [PngPixel; 15] = [
  PngPixel::Y1,
  PngPixel::Y2,
  PngPixel::Y4,
  PngPixel::Y8,
  PngPixel::Y16,
  PngPixel::RGB8,
  PngPixel::RGB16,
  PngPixel::I1,
  PngPixel::I2,
  PngPixel::I4,
  PngPixel::I8,
  PngPixel::YA8,
  PngPixel::YA16,
  PngPixel::RGBA8,
  PngPixel::RGBA16,
];

/// Cheap deterministic noise, good enough for test data.
fn noise(seed: u32, len: usize) -> Vec<u8> {
  let mut x = seed.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
  (0..len)
    .map(|_| {
      x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
      (x >> 16) as u8
    })
    .collect()
}

/// Applies filter `tag` to `raw`, given the previous raw line (no filter
/// bytes on either), and gives back the tag byte plus filtered bytes.
fn filter_line(tag: u8, raw: &[u8], last: &[u8], delay: usize) -> Vec<u8> {
  let a = |i: usize| if i >= delay { raw[i - delay] } else { 0 };
  let b = |i: usize| last[i];
  let c = |i: usize| if i >= delay { last[i - delay] } else { 0 };
  let mut out = vec![tag];
  out.extend((0..raw.len()).map(|i| {
    let predicted = match tag {
      0 => 0,
      1 => a(i),
      2 => b(i),
      3 => ((u16::from(a(i)) + u16::from(b(i))) >> 1) as u8,
      _ => paeth_predict(a(i), b(i), c(i)),
    };
    raw[i].wrapping_sub(predicted)
  }));
  out
}

/// Makes the filtered (uncompressed) image data for an image whose unpacked
/// pixel bytes are `pixels`.
fn image_data(pixel: PngPixel, size: (usize, usize), pixels: &[u8], interlaced: bool) -> Vec<u8> {
  let n = pixel.delay();
  let mut out = Vec::new();
  let mut emit = |base: (usize, usize), stride: (usize, usize), sub: (usize, usize)| {
    let pitch = pixel.bytes_per_scanline(sub.0).unwrap();
    let mut last = vec![0; pitch];
    for j in 0..sub.1 {
      let y = base.1 + j * stride.1;
      let mut raw = vec![0_u8; pitch];
      for i in 0..sub.0 {
        let p = &pixels[(y * size.0 + base.0 + i * stride.0) * n..][..n];
        match pixel.bit_depth() {
          depth @ (1 | 2 | 4) => {
            let per_byte = usize::from(8 / depth);
            let shift = (per_byte - 1 - i % per_byte) * usize::from(depth);
            raw[i / per_byte] |= p[0] << shift;
          }
          _ => raw[i * n..][..n].copy_from_slice(p),
        }
      }
      out.extend(filter_line((j % 5) as u8, &raw, &last, n));
      last = raw;
    }
  };
  if interlaced {
    for pass in ADAM7 {
      let sub = subimage_size(pass, size);
      if sub.0 > 0 && sub.1 > 0 {
        emit(pass.base, pass.stride(), sub);
      }
    }
  } else {
    emit((0, 0), (1, 1), size);
  }
  out
}

/// Unpacked pixel bytes where every sample is in range for the depth.
fn test_pixels(pixel: PngPixel, size: (usize, usize), seed: u32) -> Vec<u8> {
  let mut v = noise(seed, size.0 * size.1 * pixel.delay());
  if pixel.bit_depth() < 8 {
    let mask = (1_u8 << pixel.bit_depth()) - 1;
    v.iter_mut().for_each(|p| *p &= mask);
  }
  v
}

fn layout_for(pixel: PngPixel, interlaced: bool) -> PngLayout {
  let format = match pixel.color_type() {
    0 => PngFormat::Y { pixel, fill: None, key: None },
    2 => PngFormat::RGB { pixel, fill: None, key: None },
    3 => PngFormat::Indexed {
      pixel,
      palette: vec![pixel_formats::r8g8b8a8_Srgb::default(); 1 << pixel.bit_depth()],
      fill: None,
    },
    4 => PngFormat::YA { pixel, fill: None },
    _ => PngFormat::RGBA { pixel, fill: None },
  };
  PngLayout::new(format, interlaced).unwrap()
}

#[test]
fn test_unfilter_reverses_every_filter() {
  for pixel in ALL_PIXELS {
    let delay = pixel.delay();
    for width in [1, 2, 3, 7, 9] {
      let pitch = pixel.bytes_per_scanline(width).unwrap();
      for tag in 0..=4_u8 {
        let rows: Vec<Vec<u8>> = (0..4).map(|y| noise(u32::from(tag) * 10 + y, pitch)).collect();
        let mut last = vec![0_u8; pitch + 1];
        let mut raw_last = vec![0_u8; pitch];
        for raw in rows.iter() {
          let mut line = filter_line(tag, raw, &raw_last, delay);
          unfilter_line(&mut line, &last, delay);
          assert_eq!(&line[1..], &raw[..], "{pixel:?} width:{width} tag:{tag}");
          raw_last = raw.clone();
          last = line;
        }
      }
    }
  }
}

#[test]
fn test_unfilter_unknown_tag_is_a_no_op() {
  let mut line = [5, 1, 2, 3];
  unfilter_line(&mut line, &[0, 9, 9, 9], 1);
  assert_eq!(line, [5, 1, 2, 3]);
}

#[test]
fn test_paeth_predict() {
  for (a, b, c) in [(0, 0, 0), (1, 2, 3), (200, 100, 50), (10, 20, 15), (255, 0, 255)] {
    let p = paeth_predict(a, b, c);
    assert!(p == a || p == b || p == c);
  }
  assert_eq!(paeth_predict(7, 7, 7), 7);
  // ties go to `a`, then `b`
  assert_eq!(paeth_predict(4, 4, 0), 4);
  assert_eq!(paeth_predict(0, 10, 10), 0);
}

#[test]
fn test_context_decodes_every_pixel_type() {
  let size = (9, 6);
  for pixel in ALL_PIXELS {
    for interlaced in [false, true] {
      let pixels = test_pixels(pixel, size, pixel.volume() as u32);
      let data = image_data(pixel, size, &pixels, interlaced);
      let zlib = miniz_oxide::deflate::compress_to_vec_zlib(&data, 6);
      let mut image = PngImage::new(size, layout_for(pixel, interlaced), PngMetadata::default())
        .unwrap();
      let mut decoder = Decoder::new(PngStandard::Common, interlaced);
      let progress = decoder
        .push(&zlib, size, pixel, |line, base, stride| {
          image.assign(line, base, stride.0);
          Ok(())
        })
        .unwrap();
      assert_eq!(progress, Progress::Finished);
      assert!(decoder.is_finished());
      assert_eq!(image.storage(), &pixels[..], "{pixel:?} interlaced:{interlaced}");
    }
  }
}

#[test]
fn test_decoder_resumes_at_any_split() {
  let size = (7, 5);
  let pixel = PngPixel::RGB8;
  for interlaced in [false, true] {
    let pixels = test_pixels(pixel, size, 99);
    let data = image_data(pixel, size, &pixels, interlaced);
    let zlib = miniz_oxide::deflate::compress_to_vec_zlib(&data, 1);
    for split in 0..zlib.len() {
      for second in [split + 1, (split + zlib.len()) / 2 + 1] {
        let second = second.min(zlib.len());
        let mut image =
          PngImage::new(size, layout_for(pixel, interlaced), PngMetadata::default()).unwrap();
        let mut decoder = Decoder::new(PngStandard::Common, interlaced);
        let mut progress = Progress::NeedMoreInput;
        for piece in [&zlib[..split], &zlib[split..second], &zlib[second..]] {
          if progress == Progress::Finished {
            assert!(piece.is_empty());
            continue;
          }
          progress = decoder
            .push(piece, size, pixel, |line, base, stride| {
              image.assign(line, base, stride.0);
              Ok(())
            })
            .unwrap();
        }
        assert_eq!(progress, Progress::Finished);
        assert_eq!(image.storage(), &pixels[..], "split:{split} second:{second}");
      }
    }
  }
}

#[test]
fn test_decoder_errors() {
  let size = (2, 2);
  let pixel = PngPixel::Y8;
  let data = image_data(pixel, size, &[1, 2, 3, 4], false);
  let zlib = miniz_oxide::deflate::compress_to_vec_zlib(&data, 6);
  let ignore = |_: &[u8], _: (usize, usize), _: (usize, usize)| -> PngResult<()> { Ok(()) };

  let mut decoder = Decoder::new(PngStandard::Common, false);
  assert_eq!(decoder.push(&zlib, size, pixel, ignore), Ok(Progress::Finished));
  assert_eq!(decoder.push(&[], size, pixel, ignore), Err(PngError::ExtraneousCompressedBytes));

  let mut long = data.clone();
  long.push(0);
  let zlib = miniz_oxide::deflate::compress_to_vec_zlib(&long, 6);
  let mut decoder = Decoder::new(PngStandard::Common, false);
  assert_eq!(decoder.push(&zlib, size, pixel, ignore), Err(PngError::ExtraneousImageData));

  let mut decoder = Decoder::new(PngStandard::Common, false);
  let fail =
    |_: &[u8], _: (usize, usize), _: (usize, usize)| -> PngResult<()> { Err(PngError::InvalidFormat) };
  let zlib = miniz_oxide::deflate::compress_to_vec_zlib(&data, 6);
  assert_eq!(decoder.push(&zlib, size, pixel, fail), Err(PngError::InvalidFormat));
}

#[test]
fn test_decoder_stream_ends_early() {
  let size = (1, 2);
  let pixel = PngPixel::Y8;
  // only the first of the two rows
  let zlib = miniz_oxide::deflate::compress_to_vec_zlib(&[0, 5], 6);
  let mut image = PngImage::new(size, layout_for(pixel, false), PngMetadata::default()).unwrap();
  let mut decoder = Decoder::new(PngStandard::Common, false);
  let progress = decoder.push(&zlib, size, pixel, |line, base, stride| {
    image.assign(line, base, stride.0);
    Ok(())
  });
  assert_eq!(progress, Ok(Progress::Finished));
  assert!(decoder.is_finished());
  assert!(!decoder.is_complete());
  assert_eq!(image.storage(), &[5, 0]);

  let zlib = miniz_oxide::deflate::compress_to_vec_zlib(&[0, 5, 0, 6], 6);
  let mut decoder = Decoder::new(PngStandard::Common, false);
  let ignore = |_: &[u8], _: (usize, usize), _: (usize, usize)| -> PngResult<()> { Ok(()) };
  assert_eq!(decoder.push(&zlib, size, pixel, ignore), Ok(Progress::Finished));
  assert!(decoder.is_complete());
}

#[test]
fn test_decoder_size_overflow() {
  let ignore = |_: &[u8], _: (usize, usize), _: (usize, usize)| -> PngResult<()> { Ok(()) };
  let zlib = miniz_oxide::deflate::compress_to_vec_zlib(&[0], 6);
  for size in [(usize::MAX / 8, 1), (usize::MAX / 16, 3)] {
    let mut decoder = Decoder::new(PngStandard::Common, false);
    assert_eq!(decoder.push(&zlib, size, PngPixel::RGBA16, ignore), Err(PngError::CheckedMath));
  }
}

/// Hands bytes through untouched, and counts an empty push as the end of the
/// stream.
#[derive(Default)]
struct Passthrough {
  bytes: Vec<u8>,
  cursor: usize,
  limit: Option<usize>,
}
impl Inflate for Passthrough {
  fn push(&mut self, data: &[u8]) -> PngResult<Progress> {
    self.bytes.extend_from_slice(data);
    Ok(if data.is_empty() { Progress::Finished } else { Progress::NeedMoreInput })
  }
  fn pull_into(&mut self, out: &mut [u8]) -> bool {
    match self.bytes.get(self.cursor..self.cursor + out.len()) {
      Some(src) => {
        out.copy_from_slice(src);
        self.cursor += out.len();
        true
      }
      None => false,
    }
  }
  fn drain(&mut self) -> Vec<u8> {
    let rest = self.bytes.split_off(self.cursor);
    self.cursor = self.bytes.len();
    rest
  }
  fn limit_output(&mut self, max: usize) {
    self.limit = Some(max);
  }
}

#[test]
fn test_decoder_with_custom_inflate() {
  let size = (3, 1);
  let pixel = PngPixel::Y8;
  let mut decoder = Decoder::with_inflator(Passthrough::default(), true);
  let mut calls = Vec::new();
  let mut record = |line: &[u8], base: (usize, usize), stride: (usize, usize)| -> PngResult<()> {
    calls.push((line.to_vec(), base, stride));
    Ok(())
  };
  // pass 0 holds x=0, pass 3 holds x=2, pass 5 holds x=1
  assert_eq!(decoder.push(&[0, 10, 0], size, pixel, &mut record), Ok(Progress::NeedMoreInput));
  assert_eq!(decoder.push(&[30, 0, 20], size, pixel, &mut record), Ok(Progress::NeedMoreInput));
  assert_eq!(decoder.push(&[], size, pixel, &mut record), Ok(Progress::Finished));
  assert!(decoder.is_complete());
  // three one-pixel passes, each with a filter byte
  assert_eq!(decoder.inflator().limit, Some(6));
  assert_eq!(
    calls,
    [
      (vec![10], (0, 0), (8, 8)),
      (vec![30], (2, 0), (4, 4)),
      (vec![20], (1, 0), (2, 2)),
    ]
  );
}

#[test]
fn test_partial_interlaced_overdraw() {
  let header = IHDR { width: 3, height: 3, pixel: PngPixel::Y8, interlaced: true };
  let mut context =
    Context::new(PngStandard::Common, &header, None, None, None, PngMetadata::default()).unwrap();
  // just pass 0, the rest of the data never arrives
  let zlib = miniz_oxide::deflate::compress_to_vec_zlib(&[0, 42], 6);
  let (head, _) = zlib.split_at(zlib.len() - 4);
  context.push(head, true).unwrap();
  assert_eq!(context.image().storage(), &[42; 9]);
  assert!(!context.is_finished());
  assert!(!context.is_complete());
}
