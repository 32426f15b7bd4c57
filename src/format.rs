//! Detailed-record formatting: mode, ownership, size and timestamp columns.

use crate::fs::Entry;
use chrono::{DateTime, Datelike, FixedOffset, Local, Utc};

/// Source of "now" for the time-or-year column.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the local timezone, read on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;
const TIB: u64 = GIB * 1024;

/// Scale a byte count to the largest fitting unit with one decimal ("1.5K").
/// Counts up to 1024 are printed as bytes ("512B").
pub fn format_bytes(bytes: u64) -> String {
    let scaled = |unit: u64| bytes as f64 / unit as f64;
    match bytes {
        b if b > TIB => format!("{:.1}T", scaled(TIB)),
        b if b > GIB => format!("{:.1}G", scaled(GIB)),
        b if b > MIB => format!("{:.1}M", scaled(MIB)),
        b if b > KIB => format!("{:.1}K", scaled(KIB)),
        b => format!("{b}B"),
    }
}

/// Size column text.
pub fn format_size(size: u64, human_readable: bool) -> String {
    if human_readable {
        format_bytes(size)
    } else {
        size.to_string()
    }
}

/// Date and time-or-year columns, as `ls -l` prints them.
///
/// The modification time is shown in `now`'s timezone. Entries from the current
/// calendar year get `HH:MM`; older or future-year entries get the year.
pub fn format_time(modified: &DateTime<Utc>, now: &DateTime<FixedOffset>) -> (String, String) {
    let local = modified.with_timezone(now.offset());
    let date = local.format("%b %e").to_string();
    let time_or_year = if local.year() == now.year() {
        local.format("%H:%M").to_string()
    } else {
        local.format("%Y").to_string()
    };
    (date, time_or_year)
}

/// Cells of one detailed row. The last cell is the display path and is never padded.
pub fn long_row(
    display: &str,
    entry: &Entry,
    human_readable: bool,
    now: &DateTime<FixedOffset>,
) -> Vec<String> {
    let (date, time_or_year) = format_time(&entry.modification_time, now);
    vec![
        format!("{} ", entry.mode_string()),
        format!("{} ", entry.owner),
        format!(" {} ", entry.group),
        format!(" {} ", format_size(entry.size, human_readable)),
        format!("{date} "),
        format!("{time_or_year} "),
        display.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::EntryKind;
    use chrono::TimeZone;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 8, 15, 9, 0, 0)
            .unwrap()
    }

    fn entry_at(modified: DateTime<Utc>) -> Entry {
        Entry {
            name: "f".to_string(),
            kind: EntryKind::File,
            size: 1536,
            permission: 0o644,
            owner: "alice".to_string(),
            group: "staff".to_string(),
            modification_time: modified,
        }
    }

    #[test]
    fn human_readable_sizes() {
        assert_eq!(format_bytes(0), "0B");
        assert_eq!(format_bytes(1024), "1024B");
        assert_eq!(format_bytes(1536), "1.5K");
        assert_eq!(format_bytes(5 * MIB + MIB / 2), "5.5M");
        assert_eq!(format_bytes(3 * GIB), "3.0G");
        assert_eq!(format_bytes(2 * TIB + 1), "2.0T");
    }

    #[test]
    fn raw_size_is_exact_integer() {
        assert_eq!(format_size(1536, false), "1536");
        assert_eq!(format_size(1536, true), "1.5K");
    }

    #[test]
    fn current_year_shows_time_of_day() {
        let modified = Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 0).unwrap();
        assert_eq!(
            format_time(&modified, &now()),
            ("Mar  7".to_string(), "14:05".to_string())
        );
    }

    #[test]
    fn prior_year_shows_year() {
        let modified = Utc.with_ymd_and_hms(2019, 11, 23, 14, 5, 0).unwrap();
        assert_eq!(
            format_time(&modified, &now()),
            ("Nov 23".to_string(), "2019".to_string())
        );
    }

    #[test]
    fn timezone_of_now_decides_the_year() {
        // 23:30 UTC on Dec 31 is already next year at UTC+2.
        let modified = Utc.with_ymd_and_hms(2023, 12, 31, 23, 30, 0).unwrap();
        let now = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
            .unwrap();
        assert_eq!(
            format_time(&modified, &now),
            ("Jan  1".to_string(), "01:30".to_string())
        );
    }

    #[test]
    fn long_row_cells_in_order() {
        let modified = Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 0).unwrap();
        let row = long_row("sub/f", &entry_at(modified), true, &now());
        assert_eq!(
            row,
            vec!["-rw-r--r-- ", "alice ", " staff ", " 1.5K ", "Mar  7 ", "14:05 ", "sub/f"]
        );
    }

    #[test]
    fn fixed_clock_returns_its_instant() {
        assert_eq!(FixedClock(now()).now(), now());
    }
}
