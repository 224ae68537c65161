//! Plain and tab-separated schedule output.

use std::io::{self, Write};

use satforge::{Assignment, SearchResult};

use crate::encoding::Encoding;
use crate::roster::Roster;

/// Writes one solution, either one line per slot or as a table with one
/// column per day.
pub fn write_solution(
    out: &mut impl Write,
    roster: &Roster,
    encoding: &Encoding,
    assignment: &Assignment<'_>,
    table: bool,
) -> io::Result<()> {
    writeln!(out, "== Solution {} ==", assignment.occurrence())?;
    if table {
        write_table(out, roster, encoding, assignment)
    } else {
        write_plain(out, roster, encoding, assignment)
    }
}

fn attendees<'r>(
    roster: &'r Roster,
    encoding: &Encoding,
    assignment: &Assignment<'_>,
    slot: usize,
) -> Vec<&'r str> {
    roster
        .people
        .iter()
        .enumerate()
        .filter(|(person, _)| assignment.value(encoding.attendance(slot, *person)))
        .map(|(_, name)| name.as_str())
        .collect()
}

fn write_plain(
    out: &mut impl Write,
    roster: &Roster,
    encoding: &Encoding,
    assignment: &Assignment<'_>,
) -> io::Result<()> {
    for day in roster.days() {
        for slot in roster.slots_on(day) {
            write!(out, "{}, {}:  ", day, roster.slots[slot].time)?;
            for name in attendees(roster, encoding, assignment, slot) {
                write!(out, "{} ", name)?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }
    writeln!(out)
}

fn write_table(
    out: &mut impl Write,
    roster: &Roster,
    encoding: &Encoding,
    assignment: &Assignment<'_>,
) -> io::Result<()> {
    let days = roster.days();
    let schedule: Vec<Vec<Vec<&str>>> = days
        .iter()
        .map(|day| {
            roster
                .slots_on(day)
                .map(|slot| attendees(roster, encoding, assignment, slot))
                .collect()
        })
        .collect();
    let rows = schedule.iter().map(Vec::len).max().unwrap_or(0);

    for time in 0..rows {
        for seat in 0..roster.people_per_meeting {
            let cells: Vec<&str> = schedule
                .iter()
                .map(|slots| {
                    slots
                        .get(time)
                        .and_then(|people| people.get(seat))
                        .copied()
                        .unwrap_or(" ")
                })
                .collect();
            writeln!(out, "{}", cells.join("\t"))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes the closing statistics block.
pub fn write_statistics(out: &mut impl Write, result: &SearchResult) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Statistics")?;
    writeln!(out, "  - conflicts       : {}", result.conflicts)?;
    writeln!(out, "  - branches        : {}", result.branches)?;
    writeln!(out, "  - wall time       : {:.6} s", result.wall_time.as_secs_f64())?;
    writeln!(out, "  - solutions found : {}", result.solutions_found)?;
    if !result.completed() {
        writeln!(out, "  - status          : {} (incomplete)", result.status)?;
    }
    Ok(())
}
