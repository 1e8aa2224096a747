use super::*;

/// The resumable image data decoder.
///
/// This owns the decompressor, plus a cursor of where in the image (which
/// interlace pass, which row, and the previous row's bytes) decoding stopped
/// last time. Each [`push`](Decoder::push) picks up exactly at that point, so
/// the compressed data can be split anywhere at all.
#[derive(Debug)]
pub struct Decoder<I = Inflator> {
  /// `(next row, previous unfiltered row)` if stopped mid-image.
  row: Option<(usize, Vec<u8>)>,
  /// The current Adam7 pass, or `None` for a non-interlaced image that's not
  /// done yet. This is 7 once all the image data has been seen.
  pass: Option<u8>,
  /// If the decompressor still wants input.
  continues: bool,
  /// If the decompressor has been told how much output to expect.
  limited: bool,
  inflator: I,
}
impl Decoder<Inflator> {
  #[inline]
  #[must_use]
  pub fn new(standard: PngStandard, interlaced: bool) -> Self {
    Self::with_inflator(Inflator::new(standard), interlaced)
  }
}
impl<I: Inflate> Decoder<I> {
  /// Makes a decoder that uses any decompressor you like.
  #[inline]
  #[must_use]
  pub fn with_inflator(inflator: I, interlaced: bool) -> Self {
    Self {
      row: None,
      pass: if interlaced { Some(0) } else { None },
      continues: true,
      limited: false,
      inflator,
    }
  }

  /// If the compressed stream has ended (nothing more may be pushed).
  #[inline]
  #[must_use]
  pub const fn is_finished(&self) -> bool {
    !self.continues
  }

  #[inline]
  #[must_use]
  pub const fn inflator(&self) -> &I {
    &self.inflator
  }

  /// If every scanline of the image has been decoded.
  ///
  /// This can be `false` even after [`is_finished`](Decoder::is_finished),
  /// when the compressed stream ended before the image did.
  #[inline]
  #[must_use]
  pub const fn is_complete(&self) -> bool {
    matches!(self.pass, Some(7))
  }

  /// Decompresses `data` and sends each complete scanline to `delegate`.
  ///
  /// The delegate gets `(scanline, base, stride)`. The `scanline` is already
  /// unfiltered and has no filter byte, `base` is the image position of the
  /// first pixel, and `stride` is the `(x, y)` distance between the pixels of
  /// the current interlace pass (`(1, 1)` when not interlaced).
  ///
  /// ## Failure
  /// * Pushing after the compressed stream has already ended.
  /// * [`CheckedMath`](PngError::CheckedMath) if the image's byte size
  ///   overflows `usize`.
  /// * Any decompressor error.
  ///
  /// The decompressor gets [limited](Inflate::limit_output) to the number of
  /// bytes the image uses, so a stream with too much data fails before it's
  /// all buffered.
  /// * The decompressed data being longer than the image needs.
  /// * Any error from the delegate.
  pub fn push<F>(
    &mut self, data: &[u8], size: (usize, usize), pixel: PngPixel, mut delegate: F,
  ) -> PngResult<Progress>
  where
    F: FnMut(&[u8], (usize, usize), (usize, usize)) -> PngResult<()>,
  {
    if !self.continues {
      return Err(PngError::ExtraneousCompressedBytes);
    }
    if !self.limited {
      let expected = expected_bytes(size, pixel, self.pass.is_some())?;
      self.inflator.limit_output(expected);
      self.limited = true;
    }
    self.continues = self.inflator.push(data)? == Progress::NeedMoreInput;

    let delay = pixel.delay();
    if let Some(pass) = self.pass {
      for z in pass..7 {
        let adam7 = ADAM7[usize::from(z)];
        let subimage = subimage_size(adam7, size);
        if subimage.0 == 0 || subimage.1 == 0 {
          continue;
        }
        if self.row.is_none() {
          log::trace!("pass {z}: {}x{}", subimage.0, subimage.1);
        }
        let pitch = pixel.bytes_per_scanline(subimage.0).ok_or(PngError::CheckedMath)?;
        if !self.scanlines(subimage.1, pitch, delay, adam7.base, adam7.stride(), &mut delegate)? {
          self.pass = Some(z);
          return Ok(self.stalled());
        }
      }
    } else {
      let pitch = pixel.bytes_per_scanline(size.0).ok_or(PngError::CheckedMath)?;
      if !self.scanlines(size.1, pitch, delay, (0, 0), (1, 1), &mut delegate)? {
        return Ok(self.stalled());
      }
    }

    self.pass = Some(7);
    if !self.inflator.drain().is_empty() {
      return Err(PngError::ExtraneousImageData);
    }
    Ok(self.progress())
  }

  #[inline]
  fn progress(&self) -> Progress {
    if self.continues {
      Progress::NeedMoreInput
    } else {
      Progress::Finished
    }
  }

  /// Progress when the decompressor ran out before the image did.
  fn stalled(&self) -> Progress {
    if !self.continues {
      log::warn!("compressed stream ended before the image data did");
    }
    self.progress()
  }

  /// Runs the rows of one (reduced) image, resuming from the saved cursor.
  ///
  /// Gives `false` when the decompressor runs dry first, with the cursor
  /// saved for next time.
  fn scanlines<F>(
    &mut self, height: usize, pitch: usize, delay: usize, base: (usize, usize),
    stride: (usize, usize), delegate: &mut F,
  ) -> PngResult<bool>
  where
    F: FnMut(&[u8], (usize, usize), (usize, usize)) -> PngResult<()>,
  {
    let (start, mut last) = match self.row.take() {
      Some(row) => row,
      None => (0, zeroed(pitch.checked_add(1).ok_or(PngError::CheckedMath)?)?),
    };
    let mut line = zeroed(last.len())?;
    for y in start..height {
      if !self.inflator.pull_into(&mut line) {
        self.row = Some((y, last));
        return Ok(false);
      }
      unfilter_line(&mut line, &last, delay);
      delegate(&line[1..], (base.0, base.1 + y * stride.1), stride)?;
      core::mem::swap(&mut line, &mut last);
    }
    Ok(true)
  }
}

/// Total decompressed bytes (filter bytes included) of the whole image.
fn expected_bytes(size: (usize, usize), pixel: PngPixel, interlaced: bool) -> PngResult<usize> {
  let line_bytes = |width: usize, height: usize| -> PngResult<usize> {
    if width == 0 || height == 0 {
      return Ok(0);
    }
    pixel
      .bytes_per_scanline(width)
      .and_then(|pitch| pitch.checked_add(1))
      .and_then(|pitch| pitch.checked_mul(height))
      .ok_or(PngError::CheckedMath)
  };
  if interlaced {
    ADAM7.iter().try_fold(0_usize, |total, &adam7| {
      let (w, h) = subimage_size(adam7, size);
      total.checked_add(line_bytes(w, h)?).ok_or(PngError::CheckedMath)
    })
  } else {
    line_bytes(size.0, size.1)
  }
}

fn zeroed(len: usize) -> PngResult<Vec<u8>> {
  let mut v = Vec::new();
  v.try_reserve_exact(len)?;
  v.resize(len, 0);
  Ok(v)
}
