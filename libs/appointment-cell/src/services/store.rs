// libs/appointment-cell/src/services/store.rs
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_database::supabase::SupabaseClient;

use crate::models::{
    Appointment, AppointmentDetails, AppointmentError, AppointmentFilter, NewAppointment,
    Patient, Professional, UpdateAppointmentRequest,
};

/// Embeds both parties in place of their identifier columns.
const SELECT_WITH_PARTIES: &str =
    "id,date,finished,patient:patients!patient(*),professional:professionals!professional(*)";

/// Timestamp format understood by PostgREST filters on `timestamp` columns.
const FILTER_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn find_patient(&self, national_id: &str) -> Result<Option<Patient>, AppointmentError>;

    async fn find_professional(&self, council_number: &str) -> Result<Option<Professional>, AppointmentError>;

    async fn insert(&self, appointment: &NewAppointment) -> Result<Appointment, AppointmentError>;

    /// Single appointment with relations loaded.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AppointmentDetails>, AppointmentError>;

    /// Appointments matching `filter`, relations loaded, ordered by date.
    async fn find(&self, filter: &AppointmentFilter) -> Result<Vec<AppointmentDetails>, AppointmentError>;

    async fn update(&self, id: Uuid, changes: &UpdateAppointmentRequest) -> Result<(), AppointmentError>;

    async fn remove(&self, id: Uuid) -> Result<(), AppointmentError>;
}

/// PostgREST backed store. Requests carry the caller's token.
pub struct SupabaseAppointmentStore {
    supabase: Arc<SupabaseClient>,
    auth_token: String,
}

impl SupabaseAppointmentStore {
    pub fn new(supabase: Arc<SupabaseClient>, auth_token: &str) -> Self {
        Self {
            supabase,
            auth_token: auth_token.to_string(),
        }
    }

    async fn get_rows<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, AppointmentError> {
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            path,
            Some(&self.auth_token),
            None,
        ).await.map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        result.into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()
            .map_err(|e| AppointmentError::DatabaseError(format!("Failed to parse rows: {}", e)))
    }

    /// Query string for `filter`, without the leading `?`.
    pub fn filter_query(filter: &AppointmentFilter) -> String {
        let mut query_parts = vec![format!("select={}", SELECT_WITH_PARTIES)];

        if let Some(patient) = &filter.patient {
            query_parts.push(format!("patient=eq.{}", urlencoding::encode(patient)));
        }
        if let Some(professional) = &filter.professional {
            query_parts.push(format!("professional=eq.{}", urlencoding::encode(professional)));
        }
        if let Some(finished) = filter.finished {
            query_parts.push(format!("finished=eq.{}", finished));
        }
        if let Some(from) = filter.date_from {
            query_parts.push(format!("date=gte.{}", from.format(FILTER_TIMESTAMP_FORMAT)));
        }
        if let Some(to) = filter.date_to {
            query_parts.push(format!("date=lte.{}", to.format(FILTER_TIMESTAMP_FORMAT)));
        }
        if let Some(before) = filter.date_before {
            query_parts.push(format!("date=lt.{}", before.format(FILTER_TIMESTAMP_FORMAT)));
        }

        query_parts.push("order=date.asc".to_string());
        query_parts.join("&")
    }
}

#[async_trait]
impl AppointmentStore for SupabaseAppointmentStore {
    async fn find_patient(&self, national_id: &str) -> Result<Option<Patient>, AppointmentError> {
        debug!("Fetching patient: {}", national_id);

        let path = format!("/rest/v1/patients?national_id=eq.{}", urlencoding::encode(national_id));
        let patients: Vec<Patient> = self.get_rows(&path).await?;

        Ok(patients.into_iter().next())
    }

    async fn find_professional(&self, council_number: &str) -> Result<Option<Professional>, AppointmentError> {
        debug!("Fetching professional: {}", council_number);

        let path = format!("/rest/v1/professionals?council_number=eq.{}", urlencoding::encode(council_number));
        let professionals: Vec<Professional> = self.get_rows(&path).await?;

        Ok(professionals.into_iter().next())
    }

    async fn insert(&self, appointment: &NewAppointment) -> Result<Appointment, AppointmentError> {
        debug!("Inserting appointment for patient {} with {}", appointment.patient, appointment.professional);

        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/appointments",
            Some(&self.auth_token),
            Some(json!(appointment)),
            Some(headers),
        ).await.map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        let row = result.into_iter().next()
            .ok_or_else(|| AppointmentError::DatabaseError("Insert returned no rows".to_string()))?;

        serde_json::from_value(row)
            .map_err(|e| AppointmentError::DatabaseError(format!("Failed to parse appointment: {}", e)))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AppointmentDetails>, AppointmentError> {
        debug!("Fetching appointment: {}", id);

        let path = format!("/rest/v1/appointments?id=eq.{}&select={}", id, SELECT_WITH_PARTIES);
        let appointments: Vec<AppointmentDetails> = self.get_rows(&path).await?;

        Ok(appointments.into_iter().next())
    }

    async fn find(&self, filter: &AppointmentFilter) -> Result<Vec<AppointmentDetails>, AppointmentError> {
        debug!("Searching appointments with filter: {:?}", filter);

        let path = format!("/rest/v1/appointments?{}", Self::filter_query(filter));
        self.get_rows(&path).await
    }

    async fn update(&self, id: Uuid, changes: &UpdateAppointmentRequest) -> Result<(), AppointmentError> {
        debug!("Updating appointment {}: {:?}", id, changes);

        let path = format!("/rest/v1/appointments?id=eq.{}", id);
        self.supabase.execute(
            Method::PATCH,
            &path,
            Some(&self.auth_token),
            Some(json!(changes)),
        ).await.map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }

    async fn remove(&self, id: Uuid) -> Result<(), AppointmentError> {
        debug!("Removing appointment: {}", id);

        let path = format!("/rest/v1/appointments?id=eq.{}", id);
        self.supabase.execute(
            Method::DELETE,
            &path,
            Some(&self.auth_token),
            None,
        ).await.map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }
}
