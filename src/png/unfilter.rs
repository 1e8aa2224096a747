use super::*;

/// The paeth predictor: whichever of `a` (left), `b` (up), or `c` (up-left)
/// is closest to `a + b - c`.
#[inline]
#[must_use]
pub const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // Note(Lokathor): The PNG spec is extremely specific that you shall not,
  // under any circumstances, alter the order of evaluation of this
  // expression's tests.
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Reverses the filter on one scanline, in place.
///
/// * `line` is the filter type byte followed by the filtered bytes.
/// * `last` is the previous *unfiltered* line in the same layout (including
///   its own filter byte, which is ignored). For the first line of an image or
///   of an interlace pass this should be all zeroes.
/// * `delay` is the distance in bytes to the corresponding byte of the
///   pixel on the left, see [`PngPixel::delay`].
///
/// All math wraps. An unknown filter type leaves the line as is.
pub fn unfilter_line(line: &mut [u8], last: &[u8], delay: usize) {
  let (filter, line) = match line.split_first_mut() {
    Some(split) => split,
    None => return,
  };
  let last = last.get(1..).unwrap_or(&[]);
  let up = |i: usize| last.get(i).copied().unwrap_or(0);
  let delay = delay.min(line.len());
  match *filter {
    0 => (),
    1 => {
      // Sub
      for i in delay..line.len() {
        line[i] = line[i].wrapping_add(line[i - delay]);
      }
    }
    2 => {
      // Up
      line.iter_mut().zip(last.iter().copied()).for_each(|(p, b)| *p = p.wrapping_add(b));
    }
    3 => {
      // Average, the `a` is 0 for the first pixel so we elide it
      line[..delay].iter_mut().enumerate().for_each(|(i, p)| *p = p.wrapping_add(up(i) >> 1));
      for i in delay..line.len() {
        let total = u16::from(line[i - delay]) + u16::from(up(i));
        line[i] = line[i].wrapping_add((total >> 1) as u8);
      }
    }
    4 => {
      // Paeth, the `a` and `c` are 0 for the first pixel
      line[..delay]
        .iter_mut()
        .enumerate()
        .for_each(|(i, p)| *p = p.wrapping_add(paeth_predict(0, up(i), 0)));
      for i in delay..line.len() {
        line[i] = line[i].wrapping_add(paeth_predict(line[i - delay], up(i), up(i - delay)));
      }
    }
    unknown => {
      log::warn!("unknown filter type {unknown}, the line is left as is");
    }
  }
}

#[test]
fn test_paeth_predict() {
  assert_eq!(paeth_predict(0, 0, 0), 0);
  // ties go to `a`, then `b`
  assert_eq!(paeth_predict(7, 7, 7), 7);
  assert_eq!(paeth_predict(10, 20, 10), 20);
  assert_eq!(paeth_predict(20, 10, 10), 20);
  assert_eq!(paeth_predict(10, 20, 15), 15);
  assert_eq!(paeth_predict(100, 200, 250), 100);
  assert_eq!(paeth_predict(200, 100, 250), 100);
  assert_eq!(paeth_predict(50, 60, 255), 50);
  assert_eq!(paeth_predict(10, 40, 30), 10);
  assert_eq!(paeth_predict(40, 10, 30), 10);
  assert_eq!(paeth_predict(30, 30, 0), 30);
}

#[test]
fn test_unfilter_line_first_row() {
  let zeroes = [0_u8; 7];
  // sub, delay 2
  let mut line = [1, 1, 2, 3, 4, 5, 6];
  unfilter_line(&mut line, &zeroes, 2);
  assert_eq!(line, [1, 1, 2, 4, 6, 9, 12]);
  // average against a zero line is half of the left value
  let mut line = [3, 10, 20, 10, 20, 10, 20];
  unfilter_line(&mut line, &zeroes, 2);
  assert_eq!(line, [3, 10, 20, 15, 30, 17, 35]);
  // paeth against a zero line is the same as sub
  let mut line = [4, 1, 1, 2, 3, 4, 5];
  unfilter_line(&mut line, &zeroes, 2);
  assert_eq!(line, [4, 1, 1, 3, 4, 7, 9]);
  // unknown filters are left alone
  let mut line = [9, 1, 2, 3, 4, 5, 6];
  unfilter_line(&mut line, &zeroes, 1);
  assert_eq!(line, [9, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_unfilter_line_wraps() {
  let last = [0, 200, 255];
  let mut line = [2, 100, 1];
  unfilter_line(&mut line, &last, 1);
  assert_eq!(line, [2, 44, 0]);
}
