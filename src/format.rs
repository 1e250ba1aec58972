use chrono::{DateTime, Local, NaiveDate};

use crate::models::dashboard::FollowerGrowthPoint;

pub fn avatar_url(username: &str) -> String {
    format!("https://images.hive.blog/u/{username}/avatar")
}

/// 999 -> "999", 1_200 -> "1.2K", 3_400_000 -> "3.4M".
pub fn compact_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

pub fn watch_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// HH:MM:SS since `started_ms`. Negative spans clamp to zero.
pub fn uptime(started_ms: Option<i64>, now_ms: i64) -> String {
    let Some(started) = started_ms.filter(|s| *s > 0) else {
        return "00:00:00".to_string();
    };
    let elapsed = (now_ms - started).max(0) / 1000;
    format!(
        "{:02}:{:02}:{:02}",
        elapsed / 3600,
        (elapsed % 3600) / 60,
        elapsed % 60
    )
}

/// Percentage change from the first to the last point, to one decimal place.
pub fn growth_percentage(points: &[FollowerGrowthPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let oldest = points[0].followers as f64;
    let newest = points[points.len() - 1].followers as f64;
    if oldest <= 0.0 {
        return 0.0;
    }
    ((newest - oldest) / oldest * 1000.0).round() / 10.0
}

/// Bar heights as a percentage of the tallest point.
pub fn bar_heights(points: &[FollowerGrowthPoint]) -> Vec<f64> {
    let max = points.iter().map(|p| p.followers).max().unwrap_or(0);
    points
        .iter()
        .map(|p| {
            if max == 0 {
                0.0
            } else {
                p.followers as f64 / max as f64 * 100.0
            }
        })
        .collect()
}

/// "2024-03-04" -> "Mon". Unparseable input comes back unchanged.
pub fn weekday_label(date: &str) -> String {
    NaiveDate::parse_from_str(date.get(..10).unwrap_or(date), "%Y-%m-%d")
        .map(|d| d.format("%a").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Local wall-clock time for a chat line.
pub fn chat_time(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_default()
}

pub fn local_datetime(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(&Local).format("%b %e, %Y %H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, followers: u64) -> FollowerGrowthPoint {
        FollowerGrowthPoint {
            date: date.to_string(),
            followers,
        }
    }

    #[test]
    fn compacts_counts() {
        assert_eq!(compact_count(0), "0");
        assert_eq!(compact_count(999), "999");
        assert_eq!(compact_count(1_000), "1.0K");
        assert_eq!(compact_count(1_250), "1.2K");
        assert_eq!(compact_count(3_400_000), "3.4M");
    }

    #[test]
    fn formats_watch_time() {
        assert_eq!(watch_time(59), "0m");
        assert_eq!(watch_time(125), "2m");
        assert_eq!(watch_time(3600 * 5 + 60 * 7), "5h 7m");
    }

    #[test]
    fn formats_uptime() {
        assert_eq!(uptime(None, 10_000), "00:00:00");
        assert_eq!(uptime(Some(1_000), 1_000 + 3_723_000), "01:02:03");
        assert_eq!(uptime(Some(5_000), 1_000), "00:00:00");
    }

    #[test]
    fn computes_growth() {
        assert_eq!(growth_percentage(&[]), 0.0);
        assert_eq!(growth_percentage(&[point("a", 10)]), 0.0);
        assert_eq!(growth_percentage(&[point("a", 0), point("b", 10)]), 0.0);
        assert_eq!(growth_percentage(&[point("a", 100), point("b", 90), point("c", 112)]), 12.0);
        assert_eq!(growth_percentage(&[point("a", 3), point("b", 4)]), 33.3);
        assert_eq!(growth_percentage(&[point("a", 200), point("b", 150)]), -25.0);
    }

    #[test]
    fn scales_bars() {
        assert_eq!(bar_heights(&[point("a", 5), point("b", 10)]), vec![50.0, 100.0]);
        assert_eq!(bar_heights(&[point("a", 0)]), vec![0.0]);
    }

    #[test]
    fn labels_weekdays() {
        assert_eq!(weekday_label("2024-03-04"), "Mon");
        assert_eq!(weekday_label("2024-03-10T00:00:00Z"), "Sun");
        assert_eq!(weekday_label("nope"), "nope");
    }

    #[test]
    fn bad_timestamps_render_empty() {
        assert_eq!(chat_time("not a time"), "");
        assert_eq!(local_datetime("soon"), "soon");
    }
}
