//! Core data model types for aima.
//!
//! Programs, campuses, quiz questions and course offerings. Everything the
//! quiz engine and the catalog operate on lives here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three training tracks the academy offers.
///
/// Declaration order matters: it is the order used for display and for
/// breaking ties between non-combo programs.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProgramKey {
    #[default]
    Microblading,
    Microshading,
    Combo,
}

impl ProgramKey {
    /// All programs in declaration order.
    pub const ALL: [ProgramKey; 3] = [
        ProgramKey::Microblading,
        ProgramKey::Microshading,
        ProgramKey::Combo,
    ];

    /// Human-readable program title in the given language.
    pub fn title(self, language: Language) -> &'static str {
        match (self, language) {
            (ProgramKey::Microblading, Language::En) => "Microblading Program",
            (ProgramKey::Microshading, Language::En) => "Microshading Program",
            (ProgramKey::Combo, Language::En) => "Combo Course (Microblading + Microshading)",
            (ProgramKey::Microblading, Language::Es) => "Programa de Microblading",
            (ProgramKey::Microshading, Language::Es) => "Programa de Microshading",
            (ProgramKey::Combo, Language::Es) => "Programa Combo",
        }
    }

    /// Short display name ("Microblading", "Combo").
    pub fn display_name(self) -> &'static str {
        match self {
            ProgramKey::Microblading => "Microblading",
            ProgramKey::Microshading => "Microshading",
            ProgramKey::Combo => "Combo",
        }
    }
}

impl fmt::Display for ProgramKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramKey::Microblading => write!(f, "microblading"),
            ProgramKey::Microshading => write!(f, "microshading"),
            ProgramKey::Combo => write!(f, "combo"),
        }
    }
}

impl FromStr for ProgramKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "microblading" => Ok(ProgramKey::Microblading),
            "microshading" => Ok(ProgramKey::Microshading),
            "combo" | "combo course" => Ok(ProgramKey::Combo),
            other => Err(format!("unknown program: {other}")),
        }
    }
}

/// Static language lookup for the handful of translated strings the core owns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "es" | "spanish" | "español" => Ok(Language::Es),
            other => Err(format!("unknown language: {other}")),
        }
    }
}

/// A value per program, with one field for each [`ProgramKey`].
///
/// Being a closed struct rather than a map, a missing or misspelled program
/// key is a compile-time (or deserialization) error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramMap<T> {
    pub microblading: T,
    pub microshading: T,
    pub combo: T,
}

/// Points per program.
pub type ProgramScores = ProgramMap<u32>;

impl<T: Copy> ProgramMap<T> {
    pub fn new(microblading: T, microshading: T, combo: T) -> Self {
        Self {
            microblading,
            microshading,
            combo,
        }
    }

    pub fn get(&self, program: ProgramKey) -> T {
        match program {
            ProgramKey::Microblading => self.microblading,
            ProgramKey::Microshading => self.microshading,
            ProgramKey::Combo => self.combo,
        }
    }

    pub fn get_mut(&mut self, program: ProgramKey) -> &mut T {
        match program {
            ProgramKey::Microblading => &mut self.microblading,
            ProgramKey::Microshading => &mut self.microshading,
            ProgramKey::Combo => &mut self.combo,
        }
    }

    /// Iterate `(program, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ProgramKey, T)> + '_ {
        ProgramKey::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    /// Apply `f` to every value.
    pub fn map<U: Copy>(&self, mut f: impl FnMut(ProgramKey, T) -> U) -> ProgramMap<U> {
        ProgramMap {
            microblading: f(ProgramKey::Microblading, self.microblading),
            microshading: f(ProgramKey::Microshading, self.microshading),
            combo: f(ProgramKey::Combo, self.combo),
        }
    }
}

impl ProgramScores {
    /// Add another score card into this one.
    pub fn add(&mut self, other: &ProgramScores) {
        for program in ProgramKey::ALL {
            *self.get_mut(program) += other.get(program);
        }
    }

    /// Largest single value across programs.
    pub fn max_value(&self) -> u32 {
        self.microblading.max(self.microshading).max(self.combo)
    }
}

/// One selectable answer to a quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    /// Identifier, unique within its question.
    pub id: String,
    /// Answer text.
    pub label: String,
    /// Points this option contributes to each program when chosen.
    pub scores: ProgramScores,
}

/// A multiple-choice quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Ordinal position; defines presentation order.
    pub id: u32,
    /// Question text.
    pub prompt: String,
    /// Answers in display order.
    pub options: Vec<QuizOption>,
}

impl QuizQuestion {
    /// Find an option by id.
    pub fn option(&self, option_id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// The largest contribution any single option makes to any program.
    pub fn max_contribution(&self) -> u32 {
        self.options
            .iter()
            .map(|o| o.scores.max_value())
            .max()
            .unwrap_or(0)
    }
}

/// Academy campus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Campus {
    #[default]
    SantaAna,
    SouthGate,
}

impl Campus {
    pub fn display_name(self) -> &'static str {
        match self {
            Campus::SantaAna => "Santa Ana",
            Campus::SouthGate => "South Gate",
        }
    }
}

impl fmt::Display for Campus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Campus::SantaAna => write!(f, "santa-ana"),
            Campus::SouthGate => write!(f, "south-gate"),
        }
    }
}

impl FromStr for Campus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(' ', "-").as_str() {
            "santa-ana" => Ok(Campus::SantaAna),
            "south-gate" => Ok(Campus::SouthGate),
            other => Err(format!("unknown campus: {other}")),
        }
    }
}

/// Whether an offering still takes enrollments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferingStatus {
    #[default]
    Available,
    Full,
}

/// One scheduled, dated instance of a program at a campus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOffering {
    pub program: ProgramKey,
    pub campus: Campus,
    pub start_date: NaiveDate,
    /// Display-only date range ("Mar 20-22 & 27-29, 2024").
    pub schedule: String,
    #[serde(default)]
    pub is_hybrid: bool,
    pub time_slot: String,
    #[serde(default)]
    pub status: OfferingStatus,
    /// Remaining seats, when the academy publishes it.
    #[serde(default)]
    pub slots_left: Option<u32>,
    /// Marketing label ("MOST POPULAR").
    #[serde(default)]
    pub tag: Option<String>,
}

impl CourseOffering {
    pub fn is_full(&self) -> bool {
        self.status == OfferingStatus::Full
    }

    /// "2 spaces remaining" / "Full" / "" depending on status.
    pub fn availability_label(&self) -> String {
        match (self.status, self.slots_left) {
            (OfferingStatus::Full, _) => "Full".to_string(),
            (OfferingStatus::Available, Some(1)) => "1 space remaining".to_string(),
            (OfferingStatus::Available, Some(n)) => format!("{n} spaces remaining"),
            (OfferingStatus::Available, None) => "Available".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_display_and_parse() {
        assert_eq!(ProgramKey::Microblading.to_string(), "microblading");
        assert_eq!("Combo Course".parse::<ProgramKey>().unwrap(), ProgramKey::Combo);
        assert_eq!(
            "MICROSHADING".parse::<ProgramKey>().unwrap(),
            ProgramKey::Microshading
        );
        assert!("lash-lift".parse::<ProgramKey>().is_err());
    }

    #[test]
    fn campus_parse_accepts_display_names() {
        assert_eq!("South Gate".parse::<Campus>().unwrap(), Campus::SouthGate);
        assert_eq!("santa-ana".parse::<Campus>().unwrap(), Campus::SantaAna);
        assert!("irvine".parse::<Campus>().is_err());
    }

    #[test]
    fn program_map_add_and_iter() {
        let mut total = ProgramScores::default();
        total.add(&ProgramScores::new(5, 1, 3));
        total.add(&ProgramScores::new(2, 4, 5));
        assert_eq!(total, ProgramScores::new(7, 5, 8));

        let order: Vec<ProgramKey> = total.iter().map(|(p, _)| p).collect();
        assert_eq!(order, ProgramKey::ALL.to_vec());
        assert_eq!(total.max_value(), 8);
    }

    #[test]
    fn scores_serialize_as_named_fields() {
        let json = serde_json::to_value(ProgramScores::new(1, 2, 3)).unwrap();
        assert_eq!(json["microblading"], 1);
        assert_eq!(json["combo"], 3);

        let missing: Result<ProgramScores, _> =
            serde_json::from_str(r#"{"microblading": 1, "microshading": 2}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn availability_labels() {
        let mut offering = CourseOffering {
            program: ProgramKey::Microshading,
            campus: Campus::SouthGate,
            start_date: NaiveDate::from_ymd_opt(2025, 2, 21).unwrap(),
            schedule: "Feb 21-23, 2025".into(),
            is_hybrid: false,
            time_slot: "10:00 AM - 7:00 PM".into(),
            status: OfferingStatus::Available,
            slots_left: Some(1),
            tag: None,
        };
        assert_eq!(offering.availability_label(), "1 space remaining");
        offering.slots_left = Some(3);
        assert_eq!(offering.availability_label(), "3 spaces remaining");
        offering.status = OfferingStatus::Full;
        assert!(offering.is_full());
        assert_eq!(offering.availability_label(), "Full");
    }
}
