//! Course catalog.
//!
//! A static, read-only list of scheduled offerings. The catalog never
//! changes after construction; every operation is a filtered read.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Campus, CourseOffering, OfferingStatus, ProgramKey};

/// Read-only list of course offerings in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CourseCatalog {
    offerings: Vec<CourseOffering>,
}

impl CourseCatalog {
    pub fn new(offerings: Vec<CourseOffering>) -> Self {
        Self { offerings }
    }

    /// Every offering, in declaration order.
    pub fn list_all(&self) -> impl Iterator<Item = &CourseOffering> + '_ {
        self.offerings.iter()
    }

    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    /// Offerings of one program, preserving relative order.
    pub fn filter_by_program(
        &self,
        program: ProgramKey,
    ) -> impl Iterator<Item = &CourseOffering> + '_ {
        self.offerings.iter().filter(move |o| o.program == program)
    }

    /// Offerings still taking enrollments.
    pub fn available(&self) -> impl Iterator<Item = &CourseOffering> + '_ {
        self.offerings.iter().filter(|o| !o.is_full())
    }

    /// Listing filter: one program (or all), optionally only offerings still
    /// taking enrollments. Declaration order is kept.
    pub fn search(
        &self,
        program: Option<ProgramKey>,
        available_only: bool,
    ) -> Vec<&CourseOffering> {
        let pool: Box<dyn Iterator<Item = &CourseOffering> + '_> = if available_only {
            Box::new(self.available())
        } else {
            Box::new(self.list_all())
        };
        pool.filter(|o| program.map_or(true, |p| o.program == p))
            .collect()
    }

    /// First offering of a program, used to pre-fill the enrollment form.
    pub fn select_default(&self, program: ProgramKey) -> Option<&CourseOffering> {
        self.filter_by_program(program).next()
    }

    /// First offering starting on `start_date`, whatever its program.
    ///
    /// Start dates are not unique across programs; prefer [`Self::resolve`]
    /// when the program is known.
    pub fn resolve_by_start_date(&self, start_date: NaiveDate) -> Option<&CourseOffering> {
        self.offerings.iter().find(|o| o.start_date == start_date)
    }

    /// The offering for a `(program, start_date)` pair.
    pub fn resolve(&self, program: ProgramKey, start_date: NaiveDate) -> Option<&CourseOffering> {
        self.filter_by_program(program)
            .find(|o| o.start_date == start_date)
    }

    /// The academy's published schedule.
    pub fn builtin() -> Self {
        const DAY: &str = "10:00 AM - 7:00 PM";
        const SPLIT_DAY: &str = "10:00 AM - 2:00 PM & 3:00 PM - 7:00 PM";

        use Campus::{SantaAna, SouthGate};
        use ProgramKey::{Combo, Microblading, Microshading};

        let offerings = vec![
            offering(Microblading, SantaAna, (2024, 1, 17), "Jan 17-19, 2024", true, DAY),
            offering(Microshading, SouthGate, (2024, 2, 21), "Feb 21-23, 2024", true, DAY),
            offering(Microblading, SantaAna, (2024, 2, 14), "Feb 14-16, 2024", false, DAY),
            offering(Microshading, SouthGate, (2024, 3, 13), "Mar 13-15, 2024", true, DAY),
            offering(Combo, SantaAna, (2024, 3, 20), "Mar 20-22 & 27-29, 2024", false, DAY),
            offering(Combo, SouthGate, (2024, 4, 17), "Apr 17-19 & 24-26, 2024", true, DAY),
            offering(Microblading, SantaAna, (2024, 5, 15), "May 15-17, 2024", true, DAY),
            offering(Microshading, SouthGate, (2024, 6, 12), "Jun 12-14, 2024", false, DAY),
            offering(Combo, SantaAna, (2024, 7, 10), "Jul 10-12 & 17-19, 2024", true, DAY),
            CourseOffering {
                status: OfferingStatus::Full,
                tag: Some("BEST VALUE".into()),
                ..offering(Combo, SantaAna, (2025, 1, 25), "Jan 25-27, 2025", false, SPLIT_DAY)
            },
            CourseOffering {
                status: OfferingStatus::Full,
                ..offering(Microblading, SantaAna, (2025, 2, 1), "Feb 1-3, 2025", false, SPLIT_DAY)
            },
            CourseOffering {
                slots_left: Some(2),
                tag: Some("MOST POPULAR".into()),
                ..offering(Microshading, SouthGate, (2025, 2, 21), "Feb 21-23, 2025", false, SPLIT_DAY)
            },
            CourseOffering {
                slots_left: Some(1),
                tag: Some("MOST POPULAR".into()),
                ..offering(Microshading, SantaAna, (2025, 3, 7), "Mar 7-9, 2025", false, SPLIT_DAY)
            },
            CourseOffering {
                slots_left: Some(3),
                ..offering(Microblading, SouthGate, (2025, 4, 25), "Apr 25-27, 2025", false, SPLIT_DAY)
            },
        ];

        Self { offerings }
    }
}

fn offering(
    program: ProgramKey,
    campus: Campus,
    (y, m, d): (i32, u32, u32),
    schedule: &str,
    is_hybrid: bool,
    time_slot: &str,
) -> CourseOffering {
    CourseOffering {
        program,
        campus,
        // Only called with literal calendar dates above.
        start_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        schedule: schedule.to_string(),
        is_hybrid,
        time_slot: time_slot.to_string(),
        status: OfferingStatus::Available,
        slots_left: None,
        tag: None,
    }
}
