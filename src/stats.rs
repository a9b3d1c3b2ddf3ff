//! Debug-only histogram and image-info printing, ported from the original
//! tool's `ImageUtils::printHistogram`/`printImageInfo` against [`Image`]
//! rather than `cv::Mat`. Only ever invoked when `--debug` is set.

use crate::image::{Channels, Image};

/// Prints `{w}x{h}, channels={c}, total pixels={n}` to stdout, optionally
/// prefixed with `name`.
pub fn print_image_info(image: &Image, name: &str) {
    let prefix = if name.is_empty() { String::new() } else { format!("{name}: ") };
    println!(
        "{prefix}size={}x{}, channels={}, total pixels={}",
        image.width(),
        image.height(),
        image.channels(),
        image.width() as u64 * image.height() as u64
    );
}

fn channel_names(channels: u32) -> Vec<&'static str> {
    match channels {
        1 => vec!["Gray"],
        3 => vec!["Red", "Green", "Blue"],
        other => panic!("unsupported channel count for histogram: {other}"),
    }
}

/// Prints one ASCII bar chart per channel: `bins` buckets of `256/bins`
/// values each, `chart_height` rows tall.
pub fn print_histogram(image: &Image, bins: usize, chart_height: usize) {
    let channels = image.channels();
    let names = channel_names(channels);
    let pixels = image.pixels();

    for (c, name) in names.iter().enumerate() {
        let mut hist = vec![0u32; bins];
        for chunk in pixels.chunks_exact(channels as usize) {
            let bucket = (chunk[c] as usize * bins) / 256;
            hist[bucket.min(bins - 1)] += 1;
        }

        let max_val = *hist.iter().max().unwrap_or(&0);
        if max_val == 0 {
            println!("\n=== Channel {name} (bins={bins}, height={chart_height}) ===");
            println!("(no data)");
            continue;
        }

        println!("\n=== Channel {name} (bins={bins}, height={chart_height}) ===");
        println!("{:>width$} Count", "", width = 6);

        let mut grid = vec![vec![' '; bins]; chart_height];
        for (b, &count) in hist.iter().enumerate() {
            let h = ((count as f64 / max_val as f64) * chart_height as f64 + 0.5) as usize;
            for row in (chart_height.saturating_sub(h))..chart_height {
                grid[row][b] = '#';
            }
        }

        for (row, cells) in grid.iter().enumerate() {
            let value = (max_val as f64 * (chart_height - row) as f64 / chart_height as f64 + 0.5) as u64;
            let line: String = cells.iter().collect();
            println!("{value:>6} |{line}");
        }
        println!("       +{}", "-".repeat(bins));
    }
}
