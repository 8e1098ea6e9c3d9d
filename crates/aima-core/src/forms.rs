//! Form submissions relayed by email.
//!
//! The wire shape is the JSON the site posts to the relay:
//! `{ "to": [...], "subject": "...", "formType": "...", "formData": {...} }`.
//! `formData` is kept as raw JSON on the request and interpreted according to
//! `formType` by [`SendEmailRequest::submission`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::phone::is_valid_phone_number;

/// Which form produced a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    Contact,
    Tour,
    Enrollment,
}

impl FormType {
    /// Subject line the site uses for this form.
    pub fn default_subject(self) -> &'static str {
        match self {
            FormType::Contact => "New Contact Form Submission",
            FormType::Tour => "New Campus Tour Request",
            FormType::Enrollment => "New Enrollment Request",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormType::Contact => write!(f, "contact"),
            FormType::Tour => write!(f, "tour"),
            FormType::Enrollment => write!(f, "enrollment"),
        }
    }
}

impl FromStr for FormType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contact" => Ok(FormType::Contact),
            "tour" => Ok(FormType::Tour),
            "enrollment" => Ok(FormType::Enrollment),
            other => Err(CoreError::InvalidSubmission(format!(
                "invalid form type: {other}"
            ))),
        }
    }
}

/// How the student intends to pay tuition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentPlan {
    #[default]
    Full,
    Installment,
}

impl fmt::Display for PaymentPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentPlan::Full => write!(f, "Paid in full"),
            PaymentPlan::Installment => write!(f, "Installment plan"),
        }
    }
}

/// General contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Campus tour request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub program: String,
}

/// Enrollment request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub email: Option<String>,
    #[serde(default, alias = "course")]
    pub program: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default, alias = "location")]
    pub campus: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub schedule: Option<String>,
    #[serde(default)]
    pub is_hybrid: bool,
    #[serde(default)]
    pub payment_plan: Option<PaymentPlan>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub referral_source: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub goals: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub preferred_time: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub notes: Option<String>,
}

/// A problem with one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A typed form payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    Contact(ContactForm),
    Tour(TourForm),
    Enrollment(EnrollmentForm),
}

impl FormSubmission {
    /// Interpret raw `formData` according to `formType`.
    pub fn from_parts(form_type: &str, form_data: serde_json::Value) -> Result<Self, CoreError> {
        let form_type: FormType = form_type.parse()?;
        let invalid = |e: serde_json::Error| {
            CoreError::InvalidSubmission(format!("malformed {form_type} form data: {e}"))
        };
        Ok(match form_type {
            FormType::Contact => FormSubmission::Contact(serde_json::from_value(form_data).map_err(invalid)?),
            FormType::Tour => FormSubmission::Tour(serde_json::from_value(form_data).map_err(invalid)?),
            FormType::Enrollment => {
                FormSubmission::Enrollment(serde_json::from_value(form_data).map_err(invalid)?)
            }
        })
    }

    pub fn form_type(&self) -> FormType {
        match self {
            FormSubmission::Contact(_) => FormType::Contact,
            FormSubmission::Tour(_) => FormType::Tour,
            FormSubmission::Enrollment(_) => FormType::Enrollment,
        }
    }

    /// The payload as the `formData` JSON object.
    pub fn form_data(&self) -> serde_json::Value {
        let value = match self {
            FormSubmission::Contact(form) => serde_json::to_value(form),
            FormSubmission::Tour(form) => serde_json::to_value(form),
            FormSubmission::Enrollment(form) => serde_json::to_value(form),
        };
        // Plain structs of strings and bools always serialize.
        value.unwrap_or_default()
    }

    /// "First Last" of the person who filled in the form.
    pub fn applicant_name(&self) -> String {
        let (first, last) = match self {
            FormSubmission::Contact(f) => (&f.first_name, &f.last_name),
            FormSubmission::Tour(f) => (&f.first_name, &f.last_name),
            FormSubmission::Enrollment(f) => (&f.first_name, &f.last_name),
        };
        format!("{first} {last}").trim().to_string()
    }

    /// Check the fields every form shares, plus the per-form required ones.
    pub fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        match self {
            FormSubmission::Contact(f) => {
                check_person(&mut issues, &f.first_name, &f.last_name, &f.phone, f.email.as_deref());
                if f.message.trim().is_empty() {
                    issues.push(FieldIssue::new("message", "message is required"));
                }
            }
            FormSubmission::Tour(f) => {
                check_person(&mut issues, &f.first_name, &f.last_name, &f.phone, f.email.as_deref());
                if f.date.trim().is_empty() {
                    issues.push(FieldIssue::new("date", "preferred date is required"));
                }
            }
            FormSubmission::Enrollment(f) => {
                check_person(&mut issues, &f.first_name, &f.last_name, &f.phone, f.email.as_deref());
                if f.program.trim().is_empty() {
                    issues.push(FieldIssue::new("program", "program is required"));
                }
                if f.start_date.trim().is_empty() {
                    issues.push(FieldIssue::new("startDate", "start date is required"));
                }
            }
        }
        issues
    }
}

pub(crate) fn check_person(
    issues: &mut Vec<FieldIssue>,
    first_name: &str,
    last_name: &str,
    phone: &str,
    email: Option<&str>,
) {
    if first_name.trim().is_empty() {
        issues.push(FieldIssue::new("firstName", "first name is required"));
    }
    if last_name.trim().is_empty() {
        issues.push(FieldIssue::new("lastName", "last name is required"));
    }
    if !is_valid_phone_number(phone) {
        issues.push(FieldIssue::new("phone", "phone number must have 10 digits"));
    }
    if let Some(email) = email {
        if !looks_like_email(email) {
            issues.push(FieldIssue::new("email", format!("not an email address: {email}")));
        }
    }
}

/// Loose `local@domain.tld` shape check.
pub fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.starts_with('.')
        && domain.contains('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

/// Body of `POST /api/send-email`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub to: Vec<String>,
    pub subject: String,
    pub form_type: String,
    #[serde(default)]
    pub form_data: serde_json::Value,
}

impl SendEmailRequest {
    /// Request for a submission, using the form's usual subject line.
    pub fn new(to: Vec<String>, submission: &FormSubmission) -> Self {
        let form_type = submission.form_type();
        Self {
            to,
            subject: form_type.default_subject().to_string(),
            form_type: form_type.to_string(),
            form_data: submission.form_data(),
        }
    }

    /// Typed view of `formType` + `formData`.
    pub fn submission(&self) -> Result<FormSubmission, CoreError> {
        FormSubmission::from_parts(&self.form_type, self.form_data.clone())
    }
}

/// Relay reply: `{ "success": true }` or `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SendEmailResponse {
    Sent { success: bool },
    Failed { error: String },
}

impl SendEmailResponse {
    pub fn sent() -> Self {
        SendEmailResponse::Sent { success: true }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        SendEmailResponse::Failed {
            error: error.into(),
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
