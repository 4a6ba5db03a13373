// libs/appointment-cell/src/models.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// PARTIES (read-only from this cell)
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub national_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professional {
    pub council_number: String,
    pub name: String,
    pub specialty: String,
    pub phone: String,
}

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// Stored appointment row. `patient` and `professional` hold the parties'
/// identifiers (national ID and council number).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub date: NaiveDateTime,
    #[serde(default)]
    pub finished: bool,
    pub patient: String,
    pub professional: String,
}

/// Appointment with both relations loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDetails {
    pub id: Uuid,
    pub date: NaiveDateTime,
    #[serde(default)]
    pub finished: bool,
    pub patient: Patient,
    pub professional: Professional,
}

impl AppointmentDetails {
    pub fn to_appointment(&self) -> Appointment {
        Appointment {
            id: self.id,
            date: self.date,
            finished: self.finished,
            patient: self.patient.national_id.clone(),
            professional: self.professional.council_number.clone(),
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient: String,
    pub professional: String,
    pub date: NaiveDateTime,
    #[serde(default)]
    pub finished: bool,
    /// Display strings for the confirmation email; derived from `date` when absent.
    #[serde(default)]
    pub date_label: Option<String>,
    #[serde(default)]
    pub hour_label: Option<String>,
}

/// Row inserted into the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub date: NaiveDateTime,
    pub finished: bool,
    pub patient: String,
    pub professional: String,
}

impl From<&CreateAppointmentRequest> for NewAppointment {
    fn from(request: &CreateAppointmentRequest) -> Self {
        Self {
            date: request.date,
            finished: request.finished,
            patient: request.patient.clone(),
            professional: request.professional.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional: Option<String>,
}

impl UpdateAppointmentRequest {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.finished.is_none()
            && self.patient.is_none()
            && self.professional.is_none()
    }
}

/// Store query. Every populated field narrows the result (logical AND).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentFilter {
    pub patient: Option<String>,
    pub professional: Option<String>,
    pub finished: Option<bool>,
    /// Inclusive lower bound on `date`
    pub date_from: Option<NaiveDateTime>,
    /// Inclusive upper bound on `date`
    pub date_to: Option<NaiveDateTime>,
    /// Exclusive upper bound on `date`
    pub date_before: Option<NaiveDateTime>,
}

impl AppointmentFilter {
    pub fn for_patient(national_id: &str) -> Self {
        Self {
            patient: Some(national_id.to_string()),
            ..Self::default()
        }
    }

    pub fn for_professional(council_number: &str) -> Self {
        Self {
            professional: Some(council_number.to_string()),
            ..Self::default()
        }
    }

    pub fn between(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        Self {
            date_from: Some(from),
            date_to: Some(to),
            ..Self::default()
        }
    }

    /// Whether a row satisfies the filter. Stores that cannot push the
    /// filter down use this to post-filter.
    pub fn matches(&self, appointment: &AppointmentDetails) -> bool {
        self.patient.as_deref().map_or(true, |p| appointment.patient.national_id == p)
            && self.professional.as_deref().map_or(true, |p| appointment.professional.council_number == p)
            && self.finished.map_or(true, |f| appointment.finished == f)
            && self.date_from.map_or(true, |from| appointment.date >= from)
            && self.date_to.map_or(true, |to| appointment.date <= to)
            && self.date_before.map_or(true, |before| appointment.date < before)
    }
}

// ==============================================================================
// PROJECTIONS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientAppointmentView {
    pub id: Uuid,
    pub date: NaiveDateTime,
    pub finished: bool,
    pub professional: String,
    pub specialty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalAppointmentView {
    pub id: Uuid,
    pub date: NaiveDateTime,
    pub finished: bool,
    pub patient: String,
    pub patient_phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomorrowAppointmentView {
    pub id: Uuid,
    pub date: NaiveDateTime,
    pub patient: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub professional: String,
    pub specialty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitListView {
    pub id: Uuid,
    pub date: NaiveDateTime,
    pub patient: String,
    pub patient_phone: String,
    pub overdue_minutes: i64,
}

/// Update response: parties by identifier rather than by record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentUpdateView {
    pub id: Uuid,
    pub date: NaiveDateTime,
    pub professional: String,
    pub patient: String,
    pub finished: bool,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AppointmentError {
    #[error("This appointment does not exist")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
