//! Problem data: who meets, when, and how often.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid roster: {0}")]
    Invalid(String),
}

/// A meeting slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Slot {
    pub day: String,
    pub time: String,
}

impl Slot {
    pub fn new(day: &str, time: &str) -> Self {
        Self {
            day: day.to_string(),
            time: time.to_string(),
        }
    }
}

/// A person who cannot attend any slot on `day`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Unavailability {
    pub person: String,
    pub day: String,
}

/// Everything the encoder needs to know about the week.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Roster {
    pub people: Vec<String>,
    pub slots: Vec<Slot>,
    pub people_per_meeting: usize,
    pub min_meetings: i64,
    pub max_meetings: i64,
    #[serde(default)]
    pub unavailable: Vec<Unavailability>,
}

impl Default for Roster {
    fn default() -> Self {
        let people = [
            "Dhruva", "Michael", "Mónika", "Adriano", "Andy", "Adriana", "Thomas", "Ethan",
            "Prannoy", "Saeed", "Weiming", "Ildikó",
        ];
        Self {
            people: people.iter().map(|p| p.to_string()).collect(),
            slots: ["Mon", "Tue", "Wed", "Thu", "Fri"]
                .iter()
                .map(|day| Slot::new(day, "10:00"))
                .collect(),
            people_per_meeting: 5,
            min_meetings: 2,
            max_meetings: 3,
            unavailable: vec![Unavailability {
                person: "Prannoy".to_string(),
                day: "Wed".to_string(),
            }],
        }
    }
}

impl Roster {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, RosterError> {
        let roster: Roster = toml::from_str(s)?;
        roster.validate()?;
        Ok(roster)
    }

    pub fn validate(&self) -> Result<(), RosterError> {
        if self.people_per_meeting == 0 || self.people_per_meeting > self.people.len() {
            return Err(RosterError::Invalid(format!(
                "cannot seat {} people per meeting with {} people",
                self.people_per_meeting,
                self.people.len()
            )));
        }
        if self.min_meetings < 0 || self.min_meetings > self.max_meetings {
            return Err(RosterError::Invalid(format!(
                "meeting range {}..={} is empty",
                self.min_meetings, self.max_meetings
            )));
        }
        for rule in &self.unavailable {
            if self.person_index(&rule.person).is_none() {
                return Err(RosterError::Invalid(format!("unknown person {}", rule.person)));
            }
        }
        Ok(())
    }

    pub fn person_index(&self, name: &str) -> Option<usize> {
        self.people.iter().position(|p| p == name)
    }

    /// Distinct days in slot order.
    pub fn days(&self) -> Vec<&str> {
        let mut days: Vec<&str> = Vec::new();
        for slot in &self.slots {
            if !days.contains(&slot.day.as_str()) {
                days.push(&slot.day);
            }
        }
        days
    }

    /// Indices of the slots on `day`.
    pub fn slots_on<'a>(&'a self, day: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(_, slot)| slot.day == day)
            .map(|(index, _)| index)
    }
}
