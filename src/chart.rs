//! Bar chart geometry: equal-width buckets and bar heights

/// Map a horizontal position to a category index.
///
/// Treats the chart as `n` equal buckets across `width`, ignoring where the
/// bars are actually drawn. Positions outside `[0, width)` and empty charts
/// select nothing.
pub fn bucket_index(x: f64, width: f64, n: usize) -> Option<usize> {
    if n == 0 || !x.is_finite() || !width.is_finite() || width <= 0.0 {
        return None;
    }
    if x < 0.0 || x >= width {
        return None;
    }
    let index = (x * n as f64 / width).floor() as usize;
    (index < n).then_some(index)
}

/// Columns `[start, end)` of bucket `k`, as offsets into a chart `width` wide.
///
/// Every column in the span maps back to `k` through [`bucket_index`].
pub fn bucket_span(k: usize, width: u16, n: usize) -> Option<(u16, u16)> {
    if n == 0 || k >= n {
        return None;
    }
    let w = width as usize;
    let ceil_div = |a: usize| a.div_ceil(n);
    Some((ceil_div(k * w) as u16, ceil_div((k + 1) * w) as u16))
}

/// Bar height in eighths of a row, proportional to `count / max`.
pub fn bar_eighths(count: u32, max: u32, rows: u16) -> u32 {
    if max == 0 || rows == 0 {
        return 0;
    }
    let full = rows as u64 * 8;
    (count.min(max) as u64 * full / max as u64) as u32
}

/// Block glyph for a partially filled row
pub fn partial_block(eighths: u32) -> &'static str {
    const BLOCKS: [&str; 9] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];
    BLOCKS[eighths.min(8) as usize]
}
