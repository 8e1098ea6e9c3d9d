//! Enrollment form state.
//!
//! An [`EnrollmentDraft`] is the in-progress enrollment a visitor is filling
//! in. It keeps the selected start date consistent with the selected program:
//! switching programs never leaves a date that belongs to another program.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::CourseCatalog;
use crate::error::CoreError;
use crate::forms::{check_person, EnrollmentForm, FieldIssue, PaymentPlan};
use crate::model::{Campus, CourseOffering, ProgramKey};

/// In-progress enrollment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentDraft {
    pub campus: Campus,
    pub program: ProgramKey,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub preferred_time: Option<String>,
    pub notes: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub schedule: Option<String>,
    pub is_hybrid: bool,
    pub payment_plan: PaymentPlan,
    pub referral_source: Option<String>,
    pub goals: Option<String>,
}

impl EnrollmentDraft {
    /// A fresh draft pre-filled from the first offering in the catalog.
    pub fn for_catalog(catalog: &CourseCatalog) -> Self {
        let mut draft = Self::default();
        if let Some(first) = catalog.list_all().next() {
            draft.select_offering(first);
        }
        draft
    }

    /// Copy program, campus and date details from an offering.
    pub fn select_offering(&mut self, offering: &CourseOffering) {
        self.program = offering.program;
        self.campus = offering.campus;
        self.start_date = Some(offering.start_date);
        self.schedule = Some(offering.schedule.clone());
        self.is_hybrid = offering.is_hybrid;
    }

    /// Switch program, dropping a start date that belongs to another program.
    ///
    /// When no date remains, the program's first offering is applied and
    /// returned. Returns `None` if the program has no offerings, in which case
    /// the start date stays empty.
    pub fn change_program<'c>(
        &mut self,
        program: ProgramKey,
        catalog: &'c CourseCatalog,
    ) -> Option<&'c CourseOffering> {
        self.program = program;

        let still_valid = self
            .start_date
            .is_some_and(|date| catalog.resolve(program, date).is_some());
        if !still_valid {
            self.clear_start_date();
        }

        if self.start_date.is_some() {
            return None;
        }

        let default = catalog.select_default(program)?;
        self.select_offering(default);
        Some(default)
    }

    /// Pick a start date for the current program.
    ///
    /// The date must match an offering of `self.program`; otherwise the draft
    /// is left unchanged.
    pub fn select_start_date<'c>(
        &mut self,
        start_date: NaiveDate,
        catalog: &'c CourseCatalog,
    ) -> Result<&'c CourseOffering, CoreError> {
        let offering = catalog.resolve(self.program, start_date).ok_or(
            CoreError::OfferingNotFound {
                program: self.program,
                start_date,
            },
        )?;
        self.select_offering(offering);
        Ok(offering)
    }

    fn clear_start_date(&mut self) {
        self.start_date = None;
        self.schedule = None;
        self.is_hybrid = false;
    }

    /// Field-level problems that would block submission.
    pub fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        check_person(
            &mut issues,
            &self.first_name,
            &self.last_name,
            &self.phone,
            self.email.as_deref(),
        );
        if self.start_date.is_none() {
            issues.push(FieldIssue::new("startDate", "start date is required"));
        }
        issues
    }

    /// The payload sent to the relay.
    pub fn to_submission(&self) -> EnrollmentForm {
        EnrollmentForm {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            program: self.program.display_name().to_string(),
            start_date: self
                .schedule
                .clone()
                .or_else(|| self.start_date.map(|d| d.to_string()))
                .unwrap_or_default(),
            campus: self.campus.display_name().to_string(),
            schedule: self.schedule.clone(),
            is_hybrid: self.is_hybrid,
            payment_plan: Some(self.payment_plan),
            referral_source: self.referral_source.clone(),
            goals: self.goals.clone(),
            preferred_time: self.preferred_time.clone(),
            notes: self.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OfferingStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filled(catalog: &CourseCatalog) -> EnrollmentDraft {
        EnrollmentDraft {
            first_name: "Ana".into(),
            last_name: "Reyes".into(),
            phone: "(714) 555-0199".into(),
            ..EnrollmentDraft::for_catalog(catalog)
        }
    }

    #[test]
    fn for_catalog_prefills_first_offering() {
        let catalog = CourseCatalog::builtin();
        let draft = EnrollmentDraft::for_catalog(&catalog);
        assert_eq!(draft.program, ProgramKey::Microblading);
        assert_eq!(draft.campus, Campus::SantaAna);
        assert_eq!(draft.start_date, Some(date(2024, 1, 17)));
        assert_eq!(draft.schedule.as_deref(), Some("Jan 17-19, 2024"));
        assert!(draft.is_hybrid);
    }

    #[test]
    fn for_empty_catalog_keeps_defaults() {
        let draft = EnrollmentDraft::for_catalog(&CourseCatalog::default());
        assert_eq!(draft.campus, Campus::SantaAna);
        assert_eq!(draft.program, ProgramKey::Microblading);
        assert!(draft.start_date.is_none());
    }

    #[test]
    fn change_program_replaces_stale_date() {
        let catalog = CourseCatalog::builtin();
        let mut draft = EnrollmentDraft::for_catalog(&catalog);

        let applied = draft.change_program(ProgramKey::Combo, &catalog).unwrap();
        assert_eq!(applied.start_date, date(2024, 3, 20));
        assert_eq!(draft.program, ProgramKey::Combo);
        assert_eq!(draft.start_date, Some(date(2024, 3, 20)));
        assert!(!draft.is_hybrid);
    }

    #[test]
    fn change_program_keeps_date_that_still_matches() {
        let catalog = CourseCatalog::builtin();
        let mut draft = EnrollmentDraft::for_catalog(&catalog);
        draft.select_start_date(date(2024, 5, 15), &catalog).unwrap();

        assert!(draft.change_program(ProgramKey::Microblading, &catalog).is_none());
        assert_eq!(draft.start_date, Some(date(2024, 5, 15)));
    }

    #[test]
    fn change_to_program_without_offerings_clears_date() {
        let catalog = CourseCatalog::new(
            CourseCatalog::builtin()
                .list_all()
                .filter(|o| o.program != ProgramKey::Combo)
                .cloned()
                .collect(),
        );
        let mut draft = EnrollmentDraft::for_catalog(&catalog);
        assert!(draft.start_date.is_some());

        assert!(catalog.select_default(ProgramKey::Combo).is_none());
        assert!(draft.change_program(ProgramKey::Combo, &catalog).is_none());
        assert_eq!(draft.program, ProgramKey::Combo);
        assert_eq!(draft.start_date, None);
        assert_eq!(draft.schedule, None);
        assert!(!draft.is_hybrid);
    }

    #[test]
    fn select_start_date_is_keyed_by_program() {
        let catalog = CourseCatalog::builtin();
        let mut draft = EnrollmentDraft::for_catalog(&catalog);
        let before = draft.clone();

        // 2024-03-20 is a combo date, not a microblading one.
        let err = draft.select_start_date(date(2024, 3, 20), &catalog).unwrap_err();
        assert!(matches!(err, CoreError::OfferingNotFound { .. }));
        assert_eq!(draft, before);

        let offering = draft.select_start_date(date(2025, 4, 25), &catalog).unwrap();
        assert_eq!(offering.campus, Campus::SouthGate);
        assert_eq!(draft.campus, Campus::SouthGate);
        assert_eq!(offering.status, OfferingStatus::Available);
    }

    #[test]
    fn validate_requires_start_date() {
        let catalog = CourseCatalog::builtin();
        let mut draft = filled(&catalog);
        assert!(draft.validate().is_empty());

        draft.start_date = None;
        draft.email = Some("ana@".into());
        let fields: Vec<&str> = draft.validate().iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["email", "startDate"]);
    }

    #[test]
    fn submission_uses_display_values() {
        let catalog = CourseCatalog::builtin();
        let mut draft = filled(&catalog);
        draft.change_program(ProgramKey::Microshading, &catalog);
        draft.payment_plan = PaymentPlan::Installment;

        let form = draft.to_submission();
        assert_eq!(form.program, "Microshading");
        assert_eq!(form.campus, "South Gate");
        assert_eq!(form.start_date, "Feb 21-23, 2024");
        assert_eq!(form.payment_plan, Some(PaymentPlan::Installment));
    }
}
