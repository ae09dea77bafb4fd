//! Check command: availability of one half-day for one collaborator.

use anyhow::Result;
use chrono::NaiveDate;

use cap_core::{AvailabilityResolver, HalfDay, HalfDayRef, Unavailable, UserId};

use crate::data::Snapshot;

pub fn run(snapshot: &Snapshot, member: &str, date: NaiveDate, half_day: HalfDay) -> Result<()> {
    println!("{}", check_line(snapshot, member, date, half_day)?);
    Ok(())
}

/// Resolves one capacity unit and describes the outcome.
pub fn check_line(
    snapshot: &Snapshot,
    member: &str,
    date: NaiveDate,
    half_day: HalfDay,
) -> Result<String> {
    let user = UserId::new(member)?;
    let calendar = snapshot.calendar();
    let occupied = snapshot.occupied_units();
    let occupancy = |user: &UserId, date: NaiveDate, half_day: HalfDay| {
        occupied
            .get(user)
            .is_none_or(|units| !units.contains(&HalfDayRef::new(date, half_day)))
    };
    let resolver = AvailabilityResolver::new(&calendar).with_override(&occupancy);

    let line = match resolver.check(&user, date, half_day) {
        Ok(()) => format!("{date} {half_day}: available for {user}"),
        Err(reason) => format!(
            "{date} {half_day}: blocked for {user} ({})",
            describe(reason)
        ),
    };
    Ok(line)
}

const fn describe(reason: Unavailable) -> &'static str {
    match reason {
        Unavailable::Weekend => "weekend",
        Unavailable::Holiday => "holiday",
        Unavailable::Leave => "on leave",
        Unavailable::External => "already occupied",
    }
}
