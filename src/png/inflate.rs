use super::*;

use alloc::boxed::Box;

use miniz_oxide::{
  inflate::stream::{inflate, InflateState},
  DataFormat, MZError, MZFlush, MZStatus, StreamResult,
};

/// Compressed text and ICC profiles larger than this are rejected.
const MAX_ANCILLARY_INFLATE: usize = 1 << 24;

/// How much output space each step of the streaming decompressor gets.
const OUTPUT_STEP: usize = 32 * 1024;

/// Decompresses an entire zlib stream from an ancillary chunk.
pub(crate) fn zlib_decompress(zlib_data: &[u8], ty: PngChunkTy) -> PngResult<Vec<u8>> {
  miniz_oxide::inflate::decompress_to_vec_zlib_with_limit(zlib_data, MAX_ANCILLARY_INFLATE)
    .map_err(|_| PngError::InvalidChunkData(ty))
}

/// What a decompressor wants after taking some input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Progress {
  /// The compressed stream isn't over yet.
  NeedMoreInput,
  /// The compressed stream has ended, no more input is allowed.
  Finished,
}

/// A push/pull streaming decompressor.
///
/// Compressed bytes go in with [`push`](Inflate::push), and decompressed
/// bytes come out with [`pull_into`](Inflate::pull_into) in whatever sized
/// pieces the caller needs.
pub trait Inflate {
  /// Decompresses as much of `data` as possible.
  ///
  /// ## Failure
  /// * Pushing non-empty data after the stream already finished.
  /// * Corrupt compressed data.
  fn push(&mut self, data: &[u8]) -> PngResult<Progress>;

  /// Fills `out` with the next decompressed bytes.
  ///
  /// This is all or nothing: if there aren't enough bytes available then
  /// nothing is consumed and the output is `false`.
  fn pull_into(&mut self, out: &mut [u8]) -> bool;

  /// Takes all decompressed bytes that haven't been pulled yet.
  fn drain(&mut self) -> Vec<u8>;

  /// Caps the total decompressed output at `max` bytes.
  ///
  /// A decompressor that honors this fails with
  /// [`ExtraneousImageData`](PngError::ExtraneousImageData) during
  /// [`push`](Inflate::push) as soon as the stream goes over, so buffering
  /// never grows much past what the image can use.
  #[inline]
  fn limit_output(&mut self, max: usize) {
    let _ = max;
  }
}

/// An [`Inflate`] using `miniz_oxide`.
pub struct Inflator {
  state: Box<InflateState>,
  out: Vec<u8>,
  cursor: usize,
  finished: bool,
  /// Bytes produced so far, pulled or not.
  total_out: usize,
  limit: Option<usize>,
}
impl Debug for Inflator {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Inflator")
      .field("buffered", &(self.out.len() - self.cursor))
      .field("finished", &self.finished)
      .field("total_out", &self.total_out)
      .field("limit", &self.limit)
      .finish()
  }
}
impl Inflator {
  /// Makes a decompressor for the standard's container: a zlib stream
  /// normally, or a raw deflate stream for Apple's variant.
  #[inline]
  #[must_use]
  pub fn new(standard: PngStandard) -> Self {
    let format = match standard {
      PngStandard::Common => DataFormat::Zlib,
      PngStandard::Ios => DataFormat::Raw,
    };
    Self {
      state: InflateState::new_boxed(format),
      out: Vec::new(),
      cursor: 0,
      finished: false,
      total_out: 0,
      limit: None,
    }
  }

  /// If the end of the compressed stream has been seen.
  #[inline]
  #[must_use]
  pub const fn is_finished(&self) -> bool {
    self.finished
  }
}
impl Inflate for Inflator {
  fn push(&mut self, data: &[u8]) -> PngResult<Progress> {
    if self.finished {
      return if data.is_empty() {
        Ok(Progress::Finished)
      } else {
        Err(PngError::ExtraneousCompressedBytes)
      };
    }
    // compact what's already been pulled
    if self.cursor > 0 {
      self.out.drain(..self.cursor);
      self.cursor = 0;
    }
    let mut input = data;
    loop {
      let start = self.out.len();
      self.out.try_reserve(OUTPUT_STEP)?;
      self.out.resize(start + OUTPUT_STEP, 0);
      let StreamResult { bytes_consumed, bytes_written, status } =
        inflate(&mut self.state, input, &mut self.out[start..], MZFlush::None);
      self.out.truncate(start + bytes_written);
      input = &input[bytes_consumed..];
      self.total_out = self.total_out.saturating_add(bytes_written);
      if self.limit.map_or(false, |max| self.total_out > max) {
        log::warn!("decompressed data went past {:?} bytes", self.limit);
        return Err(PngError::ExtraneousImageData);
      }
      match status {
        Ok(MZStatus::StreamEnd) => {
          self.finished = true;
          log::debug!("compressed stream ended");
          return if input.is_empty() {
            Ok(Progress::Finished)
          } else {
            Err(PngError::ExtraneousCompressedBytes)
          };
        }
        Ok(MZStatus::Ok) | Err(MZError::Buf) => {
          if bytes_consumed == 0 && bytes_written == 0 {
            return Ok(Progress::NeedMoreInput);
          }
        }
        Ok(MZStatus::NeedDict) | Err(_) => {
          log::warn!("inflate failed: {status:?}");
          return Err(PngError::Inflate);
        }
      }
    }
  }

  fn pull_into(&mut self, out: &mut [u8]) -> bool {
    let available = &self.out[self.cursor..];
    if available.len() < out.len() {
      return false;
    }
    out.copy_from_slice(&available[..out.len()]);
    self.cursor += out.len();
    true
  }

  fn drain(&mut self) -> Vec<u8> {
    let mut rest = core::mem::take(&mut self.out);
    rest.drain(..self.cursor);
    self.cursor = 0;
    rest
  }

  #[inline]
  fn limit_output(&mut self, max: usize) {
    self.limit = Some(max);
  }
}

#[test]
fn test_inflator_pull_is_all_or_nothing() {
  let zlib = miniz_oxide::deflate::compress_to_vec_zlib(&[1, 2, 3, 4, 5], 6);
  let (head, tail) = zlib.split_at(zlib.len() / 2);
  let mut inflator = Inflator::new(PngStandard::Common);
  assert_eq!(inflator.push(head), Ok(Progress::NeedMoreInput));
  assert_eq!(inflator.push(tail), Ok(Progress::Finished));
  let mut buf = [0; 2];
  assert!(inflator.pull_into(&mut buf));
  assert_eq!(buf, [1, 2]);
  let mut big = [0; 4];
  assert!(!inflator.pull_into(&mut big));
  assert_eq!(inflator.drain(), [3, 4, 5]);
  assert!(inflator.drain().is_empty());
  assert_eq!(inflator.push(&[]), Ok(Progress::Finished));
  assert_eq!(inflator.push(&[0]), Err(PngError::ExtraneousCompressedBytes));
}

#[test]
fn test_inflator_raw_deflate() {
  let raw = miniz_oxide::deflate::compress_to_vec(b"apple", 6);
  let mut inflator = Inflator::new(PngStandard::Ios);
  assert_eq!(inflator.push(&raw), Ok(Progress::Finished));
  assert_eq!(inflator.drain(), b"apple");
}

#[test]
fn test_inflator_trailing_bytes() {
  let mut zlib = miniz_oxide::deflate::compress_to_vec_zlib(&[9; 40], 6);
  zlib.push(0);
  let mut inflator = Inflator::new(PngStandard::Common);
  assert_eq!(inflator.push(&zlib), Err(PngError::ExtraneousCompressedBytes));
}

#[test]
fn test_inflator_garbage() {
  let mut inflator = Inflator::new(PngStandard::Common);
  assert_eq!(inflator.push(&[0xFF; 16]), Err(PngError::Inflate));
}

#[test]
fn test_inflator_output_limit() {
  let zlib = miniz_oxide::deflate::compress_to_vec_zlib(&[0; 1 << 20], 9);
  let mut inflator = Inflator::new(PngStandard::Common);
  inflator.limit_output(10);
  assert_eq!(inflator.push(&zlib), Err(PngError::ExtraneousImageData));
  assert!(inflator.drain().len() <= 10 + OUTPUT_STEP);

  let mut inflator = Inflator::new(PngStandard::Common);
  inflator.limit_output(1 << 20);
  assert_eq!(inflator.push(&zlib), Ok(Progress::Finished));
  assert_eq!(inflator.drain().len(), 1 << 20);
}
