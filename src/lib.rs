#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![forbid(unsafe_code)]

//! A crate for resumable PNG decoding.
//!
//! The [`png`] module holds everything: chunk framing, chunk sequencing
//! rules, streaming decompression, scanline unfiltering, Adam7
//! de-interlacing, and the rectangular pixel store that receives the output.
//!
//! If you just have all of the bytes in memory, call
//! [`decode_png_bytes`](png::decode_png_bytes). If the bytes trickle in, build
//! a [`Context`](png::Context) yourself and [`push`](png::Context::push) each
//! `IDAT` payload as it arrives.

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

pub mod png;

/// Rendering intent, as given by an `sRGB` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
// Note(Lokathor): This doesn't have direct impls to parse to and from bytes
// because each format uses different bytes to mean each of these options.
pub enum SrgbIntent {
  /// for images preferring good adaptation to the output device gamut at the
  /// expense of colorimetric accuracy, such as photographs.
  Perceptual,
  /// for images requiring colour appearance matching (relative to the output
  /// device white point), such as logos.
  RelativeColorimetric,
  /// for images preferring preservation of saturation at the expense of hue and
  /// lightness, such as charts and graphs.
  Saturation,
  /// for images requiring preservation of absolute colorimetry, such as
  /// previews of images destined for a different output device (proofs).
  AbsoluteColorimetric,
}
