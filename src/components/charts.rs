use sports_feed::{Event, TrendRecorder};
use std::collections::HashMap;

/// The per-sport bar chart shows at most this many sports.
pub const SPORT_LABEL_LIMIT: usize = 12;

/// Event count per sport, in the order each sport first appears in `events`,
/// truncated to `limit` sports.
pub fn sport_counts(events: &[Event], limit: usize) -> Vec<(String, u64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, u64)> = Vec::new();

    for event in events {
        match index.get(event.sport.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(event.sport.as_str(), counts.len());
                counts.push((event.sport.clone(), 1));
            }
        }
    }

    counts.truncate(limit);
    counts
}

/// (sample index, live count) pairs for the trend line.
pub fn trend_points(trend: &TrendRecorder) -> Vec<(f64, f64)> {
    trend
        .samples()
        .enumerate()
        .map(|(i, s)| (i as f64, s.live as f64))
        .collect()
}

/// First and last sample timestamps, used as x-axis labels.
pub fn trend_bounds_labels(trend: &TrendRecorder) -> (String, String) {
    let first = trend.samples().next().map(|s| s.at.clone()).unwrap_or_default();
    let last = trend.latest().map(|s| s.at.clone()).unwrap_or_default();
    (first, last)
}

/// Upper y bound with a little headroom so a flat line is not drawn on the border.
pub fn trend_y_max(trend: &TrendRecorder) -> f64 {
    let max = trend.samples().map(|s| s.live).max().unwrap_or(0);
    (max + 1) as f64
}
