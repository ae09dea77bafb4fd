//! Render command for the capacity grid.
//!
//! This module implements `cap render` with zoom levels (--view), an anchor
//! date (--anchor) and output formats (human-readable, JSON).

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;

use cap_core::{
    AvailabilityResolver, BlockReason, CalendarViewState, CapacityGrid, CellState, HalfDay,
    HalfDayRef, MemberPalette, MemberRow, MemberWorkload, UserId, ViewLevel, build_grid,
    compute_workloads,
};

use crate::data::Snapshot;

pub fn run(
    snapshot: &Snapshot,
    level: ViewLevel,
    anchor: NaiveDate,
    member: Option<&str>,
    json: bool,
) -> Result<()> {
    let selected_user = member.map(UserId::new).transpose()?;
    let view = CalendarViewState {
        level,
        anchor,
        selected_user,
    };
    let span = view.period();

    let workloads = compute_workloads(
        &snapshot.members,
        &snapshot.slots,
        &snapshot.holidays,
        &snapshot.leaves,
        span,
    );

    let calendar = snapshot.calendar();
    let occupied = snapshot.occupied_units();
    let occupancy = |user: &UserId, date: NaiveDate, half_day: HalfDay| {
        occupied
            .get(user)
            .is_none_or(|units| !units.contains(&HalfDayRef::new(date, half_day)))
    };
    let resolver = AvailabilityResolver::new(&calendar).with_override(&occupancy);

    let grid = build_grid(&view, &workloads, &resolver);

    if json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        print!("{}", format_grid(&view, &grid, &workloads));
    }
    Ok(())
}

/// Formats the human-readable grid output.
pub fn format_grid(
    view: &CalendarViewState,
    grid: &CapacityGrid,
    workloads: &[MemberWorkload],
) -> String {
    let mut output = String::new();
    let span = view.period();
    // Color slots follow roster order and stay stable under --member
    // filtering, so the palette is built from the full workload list.
    let palette = MemberPalette::from_roster(workloads.iter().map(|w| &w.member.id));

    writeln!(
        output,
        "CAPACITY: {} view, {} to {}",
        view.level.as_str(),
        span.start.format("%b %-d, %Y"),
        span.end.format("%b %-d, %Y"),
    )
    .unwrap();
    writeln!(output).unwrap();

    match grid {
        CapacityGrid::HalfDays { rows } => {
            format_rows(&mut output, rows, workloads, &palette, |cell| {
                match &cell.state {
                    CellState::Occupied { .. } => '#',
                    CellState::Blocked(BlockReason::Weekend) => '.',
                    CellState::Blocked(BlockReason::Holiday) => 'H',
                    CellState::Blocked(BlockReason::Leave) => 'L',
                    CellState::Open => '·',
                }
            });
            writeln!(output).unwrap();
            writeln!(output, "# occupied  L leave  H holiday  . weekend  · open").unwrap();
        }
        CapacityGrid::Weeks { rows } => {
            format_rows(&mut output, rows, workloads, &palette, |cell| {
                cell.load.glyph()
            });
            writeln!(output).unwrap();
            writeln!(output, "one glyph per week:  ░ low  ▒ medium  ▓ high  █ over").unwrap();
        }
        CapacityGrid::Buckets { rows } => {
            format_rows(&mut output, rows, workloads, &palette, |cell| {
                cell.load.glyph()
            });
            writeln!(output).unwrap();
            writeln!(output, "one glyph per week:  ░ low  ▒ medium  ▓ high  █ over").unwrap();
        }
    }

    output
}

/// Writes one line per collaborator: color slot, padded name, cell glyphs,
/// totals.
fn format_rows<C>(
    output: &mut String,
    rows: &[MemberRow<C>],
    workloads: &[MemberWorkload],
    palette: &MemberPalette,
    glyph: impl Fn(&C) -> char,
) {
    let width = rows
        .iter()
        .map(|row| row.member_name.chars().count())
        .max()
        .unwrap_or(0);

    for row in rows {
        let color = palette.color_slot(&row.member_id).unwrap_or(0);
        let cells: String = row.cells.iter().map(&glyph).collect();
        let totals = workloads
            .iter()
            .find(|w| w.member.id == row.member_id)
            .map(|w| {
                format!(
                    "  {}/{} used, {} free",
                    w.used_slots,
                    w.total_slots,
                    w.available_slots().saturating_sub(w.used_slots)
                )
            })
            .unwrap_or_default();
        writeln!(output, "[{color}] {:<width$}  {cells}{totals}", row.member_name).unwrap();
    }
}
