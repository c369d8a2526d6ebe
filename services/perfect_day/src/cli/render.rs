//! services/perfect_day/src/cli/render.rs
//!
//! Plain-text views of days for the terminal.

use perfect_day_core::domain::{format_duration, Day};
use perfect_day_core::search::SearchResult;
use std::io::{self, Write};

const SHORT_ID_LEN: usize = 8;

/// The first eight characters of an id, as shown in listings.
pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

/// Cuts `text` to at most `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

pub fn day_table<W: Write>(out: &mut W, days: &[Day]) -> io::Result<()> {
    writeln!(out, "Found {} perfect days:\n", days.len())?;
    writeln!(
        out,
        "{:<8} {:<20} {:<12} {:<12} {:<24} {}",
        "ID", "Title", "Username", "Date", "Areas", "Activities"
    )?;
    writeln!(out, "{}", "-".repeat(90))?;

    for day in days {
        let marker = if day.is_deleted() { " [DELETED]" } else { "" };
        writeln!(
            out,
            "{:<8} {:<20} {:<12} {:<12} {:<24} {} activities{}",
            short_id(day.id()),
            truncate(day.title(), 20),
            truncate(day.username(), 12),
            day.date(),
            truncate(&day.areas().join(", "), 24),
            day.activities().len(),
            marker
        )?;
    }

    writeln!(out, "\nUse 'perfect-day show <ID>' to view details")
}

pub fn day_details<W: Write>(out: &mut W, day: &Day) -> io::Result<()> {
    writeln!(out, "Perfect Day: {}", day.title())?;
    writeln!(out, "ID: {}", day.id())?;
    writeln!(out, "Username: {}", day.username())?;
    writeln!(out, "Date: {}", day.date())?;
    if !day.description().is_empty() {
        writeln!(out, "Description: {}", day.description())?;
    }
    if !day.areas().is_empty() {
        writeln!(out, "Areas: {}", day.areas().join(", "))?;
    }
    if day.is_deleted() {
        writeln!(out, "Status: DELETED")?;
    }
    writeln!(out, "Created: {}", day.created_at().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out, "Updated: {}", day.updated_at().format("%Y-%m-%d %H:%M:%S"))?;

    if day.activities().is_empty() {
        return writeln!(out, "\nNo activities yet");
    }

    writeln!(out, "\nActivities ({}):", day.activities().len())?;
    writeln!(out, "{}", "=".repeat(80))?;
    for (i, activity) in day.activities().iter().enumerate() {
        let location = activity.location();
        writeln!(out, "\n{}. {}", i + 1, activity.name())?;
        writeln!(
            out,
            "   Time: {} ({})",
            activity.time_range(),
            format_duration(activity.duration_minutes())
        )?;
        write!(out, "   Location: {}", location.name())?;
        if !location.area().is_empty() {
            write!(out, " ({})", location.area())?;
        }
        writeln!(out)?;
        if let perfect_day_core::domain::Location::ExternalPlace(place) = location {
            if !place.address().is_empty() {
                writeln!(out, "   Address: {}", place.address())?;
            }
        }
        if !activity.description().is_empty() {
            writeln!(out, "   Description: {}", activity.description())?;
        }
        if !activity.commentary().is_empty() {
            writeln!(out, "   Commentary: {}", activity.commentary())?;
        }
    }
    Ok(())
}

pub fn search_results<W: Write>(out: &mut W, result: &SearchResult) -> io::Result<()> {
    if result.total == 0 {
        return writeln!(out, "No perfect days found matching your criteria");
    }

    write!(out, "Found {} perfect days", result.total)?;
    if !result.items.is_empty() {
        let start = result.offset.max(0) + 1;
        let end = result.offset.max(0) + result.items.len() as i64;
        write!(out, " (showing {}-{})", start, end)?;
    }
    writeln!(out, ":\n")?;

    for (i, day) in result.items.iter().enumerate() {
        if i > 0 {
            writeln!(out, "{}", "-".repeat(60))?;
        }
        writeln!(out, "Title: {}", day.title())?;
        writeln!(out, "ID: {}", short_id(day.id()))?;
        writeln!(out, "User: {} | Date: {}", day.username(), day.date())?;
        if !day.areas().is_empty() {
            writeln!(out, "Areas: {}", day.areas().join(", "))?;
        }
        if !day.description().is_empty() {
            writeln!(out, "Description: {}", day.description())?;
        }
        writeln!(out, "Activities: {}", day.activities().len())?;
        if !day.activities().is_empty() {
            writeln!(out, "Timeline:")?;
            for activity in day.activities() {
                writeln!(
                    out,
                    "  - {} at {} ({})",
                    activity.name(),
                    activity.location().name(),
                    activity.time_range()
                )?;
            }
        }
        writeln!(out)?;
    }

    if result.has_more() {
        writeln!(
            out,
            "Showing {} of {} results. Use --offset and --limit to see more.",
            result.items.len(),
            result.total
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfect_day_core::domain::{Activity, Location};

    fn sample_day() -> Day {
        let mut day = Day::new(
            "1a2b3c4d-0000-0000-0000-000000000000",
            "Coffee Day in Tokyo",
            "",
            "alice",
            "2023-12-01",
        )
        .unwrap();
        let place = Location::external_place("ChIJ1", "Blue Bottle", "Kiyosumi, Tokyo", "Kiyosumi", None)
            .unwrap();
        day.add_activity(Activity::new("a1", "Pour over", place, "09:00", 90, "", "Best cup").unwrap());
        day
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn short_ids_and_truncation() {
        assert_eq!(short_id("1a2b3c4d-rest"), "1a2b3c4d");
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(truncate("short", 20), "short");
        assert_eq!(truncate("a very long title indeed", 10), "a very ...");
    }

    #[test]
    fn details_show_timeline_and_address() {
        let text = render(|out| day_details(out, &sample_day()));
        assert!(text.contains("Perfect Day: Coffee Day in Tokyo"));
        assert!(text.contains("Time: 09:00 - 10:30 (1h 30m)"));
        assert!(text.contains("Location: Blue Bottle (Kiyosumi)"));
        assert!(text.contains("Address: Kiyosumi, Tokyo"));
        assert!(text.contains("Commentary: Best cup"));
        assert!(!text.contains("Description:"));
    }

    #[test]
    fn table_marks_deleted_days() {
        let mut day = sample_day();
        day.soft_delete();
        let text = render(|out| day_table(out, &[day]));
        assert!(text.contains("1a2b3c4d"));
        assert!(text.contains("1 activities [DELETED]"));
    }

    #[test]
    fn search_output_reports_paging() {
        let result = SearchResult {
            items: vec![sample_day()],
            total: 3,
            limit: 1,
            offset: 1,
        };
        let text = render(|out| search_results(out, &result));
        assert!(text.contains("Found 3 perfect days (showing 2-2):"));
        assert!(text.contains("  - Pour over at Blue Bottle (09:00 - 10:30)"));
        assert!(text.contains("Showing 1 of 3 results."));

        let empty = SearchResult {
            items: vec![],
            total: 0,
            limit: 10,
            offset: 0,
        };
        let text = render(|out| search_results(out, &empty));
        assert_eq!(text.trim(), "No perfect days found matching your criteria");
    }
}
