use core::{fmt, num::TryFromIntError};

use crate::png::PngChunkTy;

/// An error from decoding PNG data.
///
/// Every variant is terminal. Once a decode call hands you one of these, the
/// in-progress state should be dropped and decoding restarted from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PngError {
  /// The first eight bytes weren't the PNG signature.
  BytesAreNotPng,
  /// The byte stream ended in the middle of something.
  UnexpectedEndOfInput,
  /// A chunk's declared CRC didn't match the computed CRC.
  CrcMismatch(PngChunkTy),
  /// A chunk declared a length that's larger than PNG allows.
  ChunkTooLong(PngChunkTy),

  /// The first chunk (after an optional `CgBI`) wasn't `IHDR`.
  MissingImageHeader,
  /// `IEND` arrived before any `IDAT`.
  MissingImageData,
  /// The pixel format is indexed but no `PLTE` came before the image data, or
  /// a chunk that needs the palette arrived without one.
  MissingPalette,
  /// A chunk that may appear at most once appeared again.
  DuplicateChunk(PngChunkTy),
  /// `chunk` is not allowed to come after `after`.
  InvalidChunkOrder {
    /// the chunk that showed up
    chunk: PngChunkTy,
    /// the chunk it illegally follows
    after: PngChunkTy,
  },
  /// A chunk's payload didn't parse, or didn't agree with the pixel format.
  InvalidChunkData(PngChunkTy),

  /// The header's bit depth and color type don't make a legal pair.
  IllegalColorTypeBitDepthCombination,
  /// The header uses a compression, filter, or interlace method that isn't
  /// defined.
  IllegalHeaderMethod,
  /// The declared width and/or height of this image is 0.
  WidthOrHeightZero,
  /// The image is larger than the configured
  /// [`max_dimension`](crate::png::DecodeOptions::max_dimension).
  DimensionsTooLarge,
  /// A format failed validation (palette size, fill index, key range, ...).
  InvalidFormat,
  /// [`bind_storage`](crate::png::PngImage::bind_storage) was asked to rebind
  /// to a layout with a different pixel width, arity, or palette size.
  IncompatibleLayout,

  /// More compressed bytes were pushed after the zlib stream had already
  /// ended.
  ExtraneousCompressedBytes,
  /// The decompressed data held more bytes than the image's scanlines need.
  ExtraneousImageData,
  /// `IEND` arrived while the decompressor still wanted more input.
  IncompleteImageDataCompressedBytestream,
  /// The decompressor reported corrupt data.
  Inflate,

  /// A checked math operation failed.
  CheckedMath,
  /// The allocator couldn't give us enough space.
  Alloc,
}
/// Shorthand for a result with a [`PngError`].
pub type PngResult<T> = Result<T, PngError>;

impl fmt::Display for PngError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::BytesAreNotPng => write!(f, "missing PNG signature"),
      Self::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
      Self::CrcMismatch(ty) => write!(f, "CRC mismatch in {ty:?} chunk"),
      Self::ChunkTooLong(ty) => write!(f, "{ty:?} chunk is too long"),
      Self::MissingImageHeader => write!(f, "missing IHDR chunk"),
      Self::MissingImageData => write!(f, "missing IDAT chunk"),
      Self::MissingPalette => write!(f, "missing PLTE chunk"),
      Self::DuplicateChunk(ty) => write!(f, "duplicate {ty:?} chunk"),
      Self::InvalidChunkOrder { chunk, after } => {
        write!(f, "{chunk:?} chunk can not appear after {after:?} chunk")
      }
      Self::InvalidChunkData(ty) => write!(f, "invalid {ty:?} chunk data"),
      Self::IllegalColorTypeBitDepthCombination => {
        write!(f, "illegal color type and bit depth combination")
      }
      Self::IllegalHeaderMethod => write!(f, "illegal compression, filter, or interlace method"),
      Self::WidthOrHeightZero => write!(f, "width or height is zero"),
      Self::DimensionsTooLarge => write!(f, "image dimensions exceed the configured limit"),
      Self::InvalidFormat => write!(f, "invalid pixel format"),
      Self::IncompatibleLayout => write!(f, "layouts are not storage compatible"),
      Self::ExtraneousCompressedBytes => write!(f, "extraneous image data compressed bytes"),
      Self::ExtraneousImageData => write!(f, "extraneous image data"),
      Self::IncompleteImageDataCompressedBytestream => {
        write!(f, "incomplete image data compressed bytestream")
      }
      Self::Inflate => write!(f, "corrupt compressed data"),
      Self::CheckedMath => write!(f, "arithmetic overflow"),
      Self::Alloc => write!(f, "allocation failure"),
    }
  }
}

#[cfg(feature = "std")]
#[cfg_attr(docs_rs, doc(cfg(feature = "std")))]
impl std::error::Error for PngError {}

impl From<alloc::collections::TryReserveError> for PngError {
  #[inline]
  fn from(_: alloc::collections::TryReserveError) -> Self {
    Self::Alloc
  }
}
impl From<TryFromIntError> for PngError {
  #[inline]
  fn from(_: TryFromIntError) -> Self {
    Self::CheckedMath
  }
}
