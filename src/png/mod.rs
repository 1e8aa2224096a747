//! Holds all the tools for decoding PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! ## Automated PNG Decoding
//!
//! If all of the PNG bytes are already in memory, call [`decode_png_bytes`].
//! If you have some other way of producing chunks, implement [`PngSource`] for
//! it and call [`decode`].
//!
//! Either way you get back a [`PngImage`]: the image dimensions, the
//! [`PngLayout`] the samples are stored in, the [`PngMetadata`] gathered from
//! the ancillary chunks, and the sample storage itself.
//!
//! ## Decoding a PNG Yourself
//!
//! The general format of a PNG is that the information is stored in "chunks".
//! There's four "critical" chunk types:
//! * **Header** - This has all the important information about the image's
//!   dimensions, pixel format, and if the image is interlaced or not.
//! * **Palette** - If an image uses indexed color it will have a palette of
//!   what index values map to what `RGB8` values.
//! * **Image Data** - One or more chunks of compressed data. All of the
//!   compressed data forms a single zlib data stream, and the chunk boundaries
//!   within it mean nothing at all. All of the image data chunks must appear
//!   one after the other.
//! * **End** - The last chunk, lets you know you had the full PNG and your data
//!   wasn't truncated accidentally.
//!
//! Before and after the image data there are also zero or more "ancillary"
//! chunks. Which ancillary chunks may appear where, and how many times, is
//! strictly ruled. This module enforces those rules, and a violation is a hard
//! error.
//!
//! ### Step By Step
//!
//! 1) Parse the [`IHDR`] from the first chunk.
//! 2) Feed every chunk up to the first `IDAT` to a [`PngMetadata`] via
//!    [`push_ancillary`](PngMetadata::push_ancillary), keeping the palette,
//!    background, and transparency chunks aside.
//! 3) At the first `IDAT`, build a [`Context`]. This resolves the final
//!    [`PngLayout`] and allocates the output storage.
//! 4) [`push`](Context::push) each `IDAT` payload into the context, in order.
//!    You can split the compressed bytes however you like, the decoder keeps a
//!    cursor and picks up exactly where it left off.
//! 5) Pass every trailing chunk to
//!    [`push_ancillary`](Context::push_ancillary), then take the
//!    [`image`](Context::into_image) after `IEND`.
//!
//! Internally each scanline is pulled from the decompressor, unfiltered with
//! [`unfilter_line`], and written into the output with
//! [`assign`](PngImage::assign). When the image is interlaced the scanlines
//! belong to one of the seven [`ADAM7`] reduced images, and each is scattered
//! to its final position as it arrives.

#![allow(non_camel_case_types)]

use core::fmt::{Debug, Write};

use alloc::{string::String, vec::Vec};

use crate::{PngError, PngResult};

mod chunk;
pub use chunk::*;

mod source;
pub use source::*;

mod pixel;
pub use pixel::*;

mod ihdr;
pub use ihdr::*;

mod plte;
pub use plte::*;

mod trns;
pub use trns::*;

mod bkgd;
pub use bkgd::*;

mod hist;
pub use hist::*;

mod chrm;
pub use chrm::*;

mod gama;
pub use gama::*;

mod srgb;
pub use srgb::*;

mod iccp;
pub use iccp::*;

mod sbit;
pub use sbit::*;

mod phys;
pub use phys::*;

mod time;
pub use time::*;

mod splt;
pub use splt::*;

mod text;
pub use text::*;

mod format;
pub use format::*;

mod unfilter;
pub use unfilter::*;

mod interlace;
pub use interlace::*;

mod image;
pub use image::*;

mod metadata;
pub use metadata::*;

mod inflate;
pub use inflate::*;

mod decoder;
pub use decoder::*;

mod context;
pub use context::*;

mod decode;
pub use decode::*;

#[cfg(test)]
mod tests;
