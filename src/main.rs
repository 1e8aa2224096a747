use pngstream::png::*;

use std::path::Path;

fn main() {
  let paths: Vec<String> = std::env::args().skip(1).collect();
  if paths.is_empty() {
    println!("usage: pngstream FILE.png [FILE.png ...]");
    return;
  }
  for path in paths {
    if let Err(e) = describe_a_png_file(&path) {
      println!("{path}: {e}");
    }
  }
}

fn describe_a_png_file<P: AsRef<Path>>(path: P) -> Result<(), Box<dyn std::error::Error>> {
  let bytes = std::fs::read(path.as_ref())?;
  println!("{}:", path.as_ref().display());

  for chunk in RawPngChunkIter::new(&bytes) {
    let crc = if chunk.compute_actual_crc() == chunk.declared_crc { "ok" } else { "BAD" };
    println!("  {:?} ({} bytes, crc {crc})", chunk.ty, chunk.data.len());
  }

  let image = decode_png_bytes(&bytes)?;
  let (width, height) = image.size();
  let layout = image.layout();
  println!("  {width}x{height} {:?}, interlaced: {}", layout.format().pixel(), layout.interlaced());
  if let Some(palette) = layout.format().palette() {
    println!("  palette: {} entries", palette.len());
  }

  let metadata = &image.metadata;
  if let Some(time) = metadata.time {
    println!(
      "  modified: {:04}-{:02}-{:02} {:02}:{:02}:{:02}",
      time.year, time.month, time.day, time.hour, time.minute, time.second
    );
  }
  if let Some(gamma) = metadata.gamma {
    println!("  gamma: {}", gamma.gamma);
  }
  if let Some(rendering) = metadata.color_rendering {
    println!("  sRGB: {:?}", rendering.intent);
  }
  if let Some(profile) = &metadata.color_profile {
    println!("  ICC profile {:?}: {} bytes", profile.name, profile.profile.len());
  }
  for text in metadata.text.iter() {
    println!("  {}: {}", text.keyword, text.text);
  }
  for (ty, data) in metadata.application.iter() {
    println!("  unknown chunk {ty:?}: {} bytes", data.len());
  }
  Ok(())
}
