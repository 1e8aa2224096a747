use super::*;

/// One pass of Adam7 interlacing.
///
/// The pass covers the pixels at `base + (i << exponent.0, j << exponent.1)`
/// for all `i` and `j` that land inside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Adam7Pass {
  pub base: (usize, usize),
  pub exponent: (u32, u32),
}
impl Adam7Pass {
  /// Pixel distance between samples of this pass, `(x, y)`.
  #[inline]
  #[must_use]
  pub const fn stride(self) -> (usize, usize) {
    (1 << self.exponent.0, 1 << self.exponent.1)
  }
}

/// The seven Adam7 passes, in the order they're stored.
///
/// ```txt
/// 0 5 3 5 1 5 3 5
/// 6 6 6 6 6 6 6 6
/// 4 5 4 5 4 5 4 5
/// 6 6 6 6 6 6 6 6
/// 2 5 3 5 2 5 3 5
/// 6 6 6 6 6 6 6 6
/// 4 5 4 5 4 5 4 5
/// 6 6 6 6 6 6 6 6
/// ```
pub const ADAM7: [Adam7Pass; 7] = [
  Adam7Pass { base: (0, 0), exponent: (3, 3) },
  Adam7Pass { base: (4, 0), exponent: (3, 3) },
  Adam7Pass { base: (0, 4), exponent: (2, 3) },
  Adam7Pass { base: (2, 0), exponent: (2, 2) },
  Adam7Pass { base: (0, 2), exponent: (1, 2) },
  Adam7Pass { base: (1, 0), exponent: (1, 1) },
  Adam7Pass { base: (0, 1), exponent: (0, 1) },
];

/// The dimensions of the reduced image that `pass` holds, given the full
/// image's `(width, height)`.
///
/// Either dimension can be 0, in which case the pass has no data at all.
///
/// PS: Interlacing is terrible, don't interlace your images.
#[inline]
#[must_use]
pub const fn subimage_size(pass: Adam7Pass, (width, height): (usize, usize)) -> (usize, usize) {
  let (stride_x, stride_y) = pass.stride();
  (
    (width + stride_x - pass.base.0 - 1) >> pass.exponent.0,
    (height + stride_y - pass.base.1 - 1) >> pass.exponent.1,
  )
}

#[test]
fn test_subimage_size() {
  let dims = |w: usize, h: usize, z: usize| subimage_size(ADAM7[z], (w, h));
  assert_eq!(dims(0, 0, 0), (0, 0));
  // zero
  for (w, ex) in (1..=8).zip([1, 1, 1, 1, 1, 1, 1, 1]) {
    assert_eq!(dims(w, 0, 0).0, ex, "failed w:{w}");
  }
  for (h, ex) in (1..=8).zip([1, 1, 1, 1, 1, 1, 1, 1]) {
    assert_eq!(dims(0, h, 0).1, ex, "failed h:{h}");
  }
  // one
  for (w, ex) in (1..=8).zip([0, 0, 0, 0, 1, 1, 1, 1]) {
    assert_eq!(dims(w, 0, 1).0, ex, "failed w:{w}");
  }
  for (h, ex) in (1..=8).zip([1, 1, 1, 1, 1, 1, 1, 1]) {
    assert_eq!(dims(0, h, 1).1, ex, "failed h:{h}");
  }
  // two
  for (w, ex) in (1..=8).zip([1, 1, 1, 1, 2, 2, 2, 2]) {
    assert_eq!(dims(w, 0, 2).0, ex, "failed w: {w}");
  }
  for (h, ex) in (1..=8).zip([0, 0, 0, 0, 1, 1, 1, 1]) {
    assert_eq!(dims(0, h, 2).1, ex, "failed h: {h}");
  }
  // three
  for (w, ex) in (1..=8).zip([0, 0, 1, 1, 1, 1, 2, 2]) {
    assert_eq!(dims(w, 0, 3).0, ex, "failed w: {w}");
  }
  for (h, ex) in (1..=8).zip([1, 1, 1, 1, 2, 2, 2, 2]) {
    assert_eq!(dims(0, h, 3).1, ex, "failed h: {h}");
  }
  // four
  for (w, ex) in (1..=8).zip([1, 1, 2, 2, 3, 3, 4, 4]) {
    assert_eq!(dims(w, 0, 4).0, ex, "failed w: {w}");
  }
  for (h, ex) in (1..=8).zip([0, 0, 1, 1, 1, 1, 2, 2]) {
    assert_eq!(dims(0, h, 4).1, ex, "failed h: {h}");
  }
  // five
  for (w, ex) in (1..=8).zip([0, 1, 1, 2, 2, 3, 3, 4]) {
    assert_eq!(dims(w, 0, 5).0, ex, "failed w: {w}");
  }
  for (h, ex) in (1..=8).zip([1, 1, 2, 2, 3, 3, 4, 4]) {
    assert_eq!(dims(0, h, 5).1, ex, "failed h: {h}");
  }
  // six
  for (w, ex) in (1..=8).zip([1, 2, 3, 4, 5, 6, 7, 8]) {
    assert_eq!(dims(w, 0, 6).0, ex, "failed w: {w}");
  }
  for (h, ex) in (1..=8).zip([0, 1, 1, 2, 2, 3, 3, 4]) {
    assert_eq!(dims(0, h, 6).1, ex, "failed h: {h}");
  }
  //
  let all: [(usize, usize); 7] = core::array::from_fn(|z| dims(8, 8, z));
  assert_eq!(all, [(1, 1), (1, 1), (2, 1), (2, 2), (4, 2), (4, 4), (8, 4)]);
}

#[test]
fn test_one_pixel_passes() {
  let non_empty: Vec<usize> = (0..7)
    .filter(|&z| {
      let (w, h) = subimage_size(ADAM7[z], (1, 1));
      w > 0 && h > 0
    })
    .collect();
  assert_eq!(non_empty, [0]);
}
