//! Translates a [`Roster`] into a boolean model.
//!
//! Attendance variables come first (slot-major, then person) so that the
//! search branches on who attends before anything else. Each group of
//! `people_per_meeting` people then gets one indicator per slot that is
//! true exactly when the whole group attends that slot.

use satforge::{Comparison, Model, SatForgeError, VariableId};

use crate::roster::Roster;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MeetingKey {
    /// `person` attends `slot`.
    Attendance { slot: usize, person: usize },
    /// Every member of combination `group` attends `slot`.
    Combination { group: usize, slot: usize },
}

/// The model plus the attendance grid needed to read solutions back.
#[derive(Debug)]
pub struct Encoding {
    pub model: Model<MeetingKey>,
    attendance: Vec<Vec<VariableId>>,
    groups: usize,
}

impl Encoding {
    pub fn attendance(&self, slot: usize, person: usize) -> VariableId {
        self.attendance[slot][person]
    }

    /// Number of people combinations that got indicators.
    pub fn group_count(&self) -> usize {
        self.groups
    }
}

/// Builds the meeting model for `roster`.
pub fn encode(roster: &Roster) -> Result<Encoding, SatForgeError> {
    let mut model = Model::new();
    let people = roster.people.len();
    let slots = roster.slots.len();

    let mut attendance = Vec::with_capacity(slots);
    for slot in 0..slots {
        let row = (0..people)
            .map(|person| model.new_variable(MeetingKey::Attendance { slot, person }))
            .collect::<Result<Vec<_>, _>>()?;
        attendance.push(row);
    }

    // Each meeting has exactly `people_per_meeting` attendees.
    for row in &attendance {
        model.add_sum(
            row.iter().copied(),
            Comparison::Eq,
            roster.people_per_meeting as i64,
        )?;
    }

    // Each person meets between `min_meetings` and `max_meetings` times.
    for person in 0..people {
        let week: Vec<VariableId> = attendance.iter().map(|row| row[person]).collect();
        model.add_sum(week.iter().copied(), Comparison::Ge, roster.min_meetings)?;
        model.add_sum(week, Comparison::Le, roster.max_meetings)?;
    }

    // No group of people meets more than once.
    let mut groups = 0;
    for (group, members) in Combinations::new(people, roster.people_per_meeting).enumerate() {
        let mut together = Vec::with_capacity(slots);
        for (slot, row) in attendance.iter().enumerate() {
            let indicator = model.new_variable(MeetingKey::Combination { group, slot })?;
            model.add_indicator(indicator, members.iter().map(|&p| row[p]))?;
            together.push(indicator);
        }
        model.add_sum(together, Comparison::Le, 1)?;
        groups += 1;
    }

    for rule in &roster.unavailable {
        let Some(person) = roster.person_index(&rule.person) else {
            return Err(SatForgeError::UnknownKey(rule.person.clone()));
        };
        let blocked: Vec<VariableId> = roster
            .slots_on(&rule.day)
            .map(|slot| attendance[slot][person])
            .collect();
        if !blocked.is_empty() {
            model.add_sum(blocked, Comparison::Eq, 0)?;
        }
    }

    Ok(Encoding {
        model,
        attendance,
        groups,
    })
}

/// `k`-element subsets of `0..n` in lexicographic order.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        let k = self.indices.len();
        // Rightmost position that can still move up.
        match (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(current)
    }
}
