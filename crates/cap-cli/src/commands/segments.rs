//! Segments command: valid split counts for a task duration.

use std::fmt::Write;

use anyhow::Result;

use cap_core::valid_segment_counts;

pub fn run(duration: u32, json: bool) -> Result<()> {
    let counts = valid_segment_counts(duration);
    if json {
        let payload = serde_json::json!({
            "duration_half_days": duration,
            "segment_counts": counts,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print!("{}", format_segments(duration, &counts));
    }
    Ok(())
}

/// Formats the human-readable segment listing.
pub fn format_segments(duration: u32, counts: &[u32]) -> String {
    let mut output = String::new();

    if counts.is_empty() {
        writeln!(output, "a 0 half-day task cannot be segmented").unwrap();
        return output;
    }

    writeln!(
        output,
        "{duration} half-days ({}) splits into:",
        format_days(duration)
    )
    .unwrap();
    for &count in counts {
        let per_segment = duration / count;
        writeln!(output, "  {count:>2} x {per_segment} half-days").unwrap();
    }
    output
}

fn format_days(duration: u32) -> String {
    let whole = duration / 2;
    if duration % 2 == 0 {
        if whole == 1 {
            "1 day".to_string()
        } else {
            format!("{whole} days")
        }
    } else {
        format!("{whole}.5 days")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_divisor_with_units_per_segment() {
        let counts = valid_segment_counts(12);
        insta::assert_snapshot!(format_segments(12, &counts), @r"
        12 half-days (6 days) splits into:
           1 x 12 half-days
           2 x 6 half-days
           3 x 4 half-days
           4 x 3 half-days
           6 x 2 half-days
          12 x 1 half-days
        ");
    }

    #[test]
    fn zero_duration_cannot_be_segmented() {
        let out = format_segments(0, &[]);
        assert!(out.contains("cannot be segmented"));
    }

    #[test]
    fn odd_durations_read_as_half_days() {
        assert_eq!(format_days(5), "2.5 days");
        assert_eq!(format_days(2), "1 day");
        assert_eq!(format_days(8), "4 days");
    }
}
