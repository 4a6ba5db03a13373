// libs/appointment-cell/src/services/appointment.rs
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use notification_cell::{
    AppointmentEmail, CancelationEmail, CancelationMessage, EmailSender, HttpEmailSender,
    MessageSender, RescheduleMessage, WhatsAppClient,
};
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{
    Appointment, AppointmentDetails, AppointmentError, AppointmentFilter, AppointmentUpdateView,
    CreateAppointmentRequest, NewAppointment, PatientAppointmentView, ProfessionalAppointmentView,
    TomorrowAppointmentView, UpdateAppointmentRequest, WaitListView,
};
use crate::services::formatting::{
    format_appointments_tomorrow, format_patient_appointments, format_professional_appointments,
    format_updated_appointment, format_wait_list, DATE_FORMAT, HOUR_FORMAT, TIME_FORMAT,
};
use crate::services::schedule::{tomorrow_window, waitlist_cutoff, Clock, LocalClock};
use crate::services::store::{AppointmentStore, SupabaseAppointmentStore};

/// Appointment use cases. Collaborators are injected; notifications are
/// best-effort and never undo or block the stored change.
pub struct AppointmentService {
    store: Arc<dyn AppointmentStore>,
    email: Arc<dyn EmailSender>,
    messages: Arc<dyn MessageSender>,
    clock: Arc<dyn Clock>,
}

impl AppointmentService {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        email: Arc<dyn EmailSender>,
        messages: Arc<dyn MessageSender>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            email,
            messages,
            clock,
        }
    }

    /// Production wiring: PostgREST store acting as the caller, HTTP email
    /// and WhatsApp clients, local clock.
    pub fn from_config(config: &AppConfig, auth_token: &str) -> Self {
        let supabase = Arc::new(SupabaseClient::new(config));

        Self::new(
            Arc::new(SupabaseAppointmentStore::new(supabase, auth_token)),
            Arc::new(HttpEmailSender::new(config)),
            Arc::new(WhatsAppClient::new(config)),
            Arc::new(LocalClock),
        )
    }

    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Creating appointment for patient {} with {}", request.patient, request.professional);

        let patient = self.store.find_patient(&request.patient).await?;
        let professional = self.store.find_professional(&request.professional).await?;

        if patient.is_none() {
            warn!("Booking appointment for unknown patient {}", request.patient);
        }
        if professional.is_none() {
            warn!("Booking appointment with unknown professional {}", request.professional);
        }

        let appointment = self.store.insert(&NewAppointment::from(&request)).await?;
        info!("Appointment {} created", appointment.id);

        if let (Some(patient), Some(professional)) = (patient, professional) {
            let email = AppointmentEmail {
                name: patient.name,
                medic_name: professional.name,
                email: patient.email,
                specialty: professional.specialty,
                date: request
                    .date_label
                    .unwrap_or_else(|| appointment.date.format(DATE_FORMAT).to_string()),
                hour: request
                    .hour_label
                    .unwrap_or_else(|| appointment.date.format(HOUR_FORMAT).to_string()),
            };

            if let Err(e) = self.email.send_appointment_email(&email).await {
                warn!("Confirmation email for appointment {} not sent: {}", appointment.id, e);
            }
        }

        Ok(appointment)
    }

    pub async fn appointments_by_patient(
        &self,
        national_id: &str,
    ) -> Result<Vec<PatientAppointmentView>, AppointmentError> {
        let appointments = self.store.find(&AppointmentFilter::for_patient(national_id)).await?;
        Ok(format_patient_appointments(&appointments))
    }

    pub async fn appointments_by_professional(
        &self,
        council_number: &str,
    ) -> Result<Vec<ProfessionalAppointmentView>, AppointmentError> {
        let appointments = self.store.find(&AppointmentFilter::for_professional(council_number)).await?;
        Ok(format_professional_appointments(&appointments))
    }

    pub async fn appointments_tomorrow(&self) -> Result<Vec<TomorrowAppointmentView>, AppointmentError> {
        let (start, end) = tomorrow_window(self.clock.now());
        debug!("Listing appointments between {} and {}", start, end);

        let appointments = self.store.find(&AppointmentFilter::between(start, end)).await?;
        Ok(format_appointments_tomorrow(&appointments))
    }

    pub async fn wait_list(&self, council_number: &str) -> Result<Vec<WaitListView>, AppointmentError> {
        let cutoff = waitlist_cutoff(self.clock.now());
        debug!("Listing overdue appointments for {} before {}", council_number, cutoff);

        let filter = AppointmentFilter {
            finished: Some(false),
            date_before: Some(cutoff),
            ..AppointmentFilter::for_professional(council_number)
        };

        let late_appointments = self.store.find(&filter).await?;
        Ok(format_wait_list(&late_appointments, cutoff))
    }

    pub async fn get_appointment(&self, id: Uuid) -> Result<AppointmentDetails, AppointmentError> {
        self.store.find_by_id(id).await?.ok_or(AppointmentError::NotFound)
    }

    pub async fn update_appointment(
        &self,
        id: Uuid,
        request: UpdateAppointmentRequest,
    ) -> Result<AppointmentUpdateView, AppointmentError> {
        if request.is_empty() {
            debug!("Empty update for appointment {}, nothing to write", id);
        } else {
            self.store.update(id, &request).await?;
        }

        let updated = self.store.find_by_id(id).await?.ok_or(AppointmentError::NotFound)?;
        let result = format_updated_appointment(&updated);

        if let Some(date) = request.date {
            let message = RescheduleMessage {
                patient_name: updated.patient.name.clone(),
                patient_phone: updated.patient.phone.clone(),
                professional_name: updated.professional.name.clone(),
                specialty: updated.professional.specialty.clone(),
                date,
            };

            if let Err(e) = self.messages.send_update_whatsapp(&message).await {
                warn!("Reschedule message for appointment {} not sent: {}", id, e);
            }
        }

        info!("Appointment {} updated", id);
        Ok(result)
    }

    pub async fn delete_appointment(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        let appointment = self.store.find_by_id(id).await?.ok_or(AppointmentError::NotFound)?;
        let AppointmentDetails { patient, professional, date, .. } = &appointment;

        let email = CancelationEmail {
            name: patient.name.clone(),
            medic_name: professional.name.clone(),
            email: patient.email.clone(),
            specialty: professional.specialty.clone(),
            date: date.format(DATE_FORMAT).to_string(),
            hour: date.format(TIME_FORMAT).to_string(),
        };
        if let Err(e) = self.email.send_cancelation_email(&email).await {
            warn!("Cancellation email for appointment {} not sent: {}", id, e);
        }

        let message = CancelationMessage {
            patient_name: patient.name.clone(),
            professional_name: professional.name.clone(),
            patient_phone: patient.phone.clone(),
            specialty: professional.specialty.clone(),
        };
        if let Err(e) = self.messages.send_cancelation_whatsapp(&message).await {
            warn!("Cancellation message for appointment {} not sent: {}", id, e);
        }

        self.store.remove(id).await?;
        info!("Appointment {} deleted", id);

        Ok(appointment.to_appointment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime};
    use mockall::mock;

    use notification_cell::{NotificationError, PrescriptionEmail};

    use crate::models::{Patient, Professional};
    use crate::services::schedule::FixedClock;
    use crate::services::store::MockAppointmentStore;

    mock! {
        pub Email {}

        #[async_trait]
        impl EmailSender for Email {
            async fn send_appointment_email(&self, email: &AppointmentEmail) -> Result<(), NotificationError>;
            async fn send_cancelation_email(&self, email: &CancelationEmail) -> Result<(), NotificationError>;
            async fn send_prescription(&self, email: &PrescriptionEmail) -> Result<(), NotificationError>;
        }
    }

    mock! {
        pub Messages {}

        #[async_trait]
        impl MessageSender for Messages {
            async fn send_update_whatsapp(&self, message: &RescheduleMessage) -> Result<(), NotificationError>;
            async fn send_cancelation_whatsapp(&self, message: &CancelationMessage) -> Result<(), NotificationError>;
        }
    }

    fn at(d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    fn patient(national_id: &str) -> Patient {
        Patient {
            national_id: national_id.to_string(),
            name: format!("Patient {}", national_id),
            email: format!("{}@example.com", national_id),
            phone: "+5511999990000".to_string(),
        }
    }

    fn professional(council_number: &str) -> Professional {
        Professional {
            council_number: council_number.to_string(),
            name: "Dr. Paulo Lima".to_string(),
            specialty: "Cardiology".to_string(),
            phone: "+5511988880000".to_string(),
        }
    }

    fn details(patient_id: &str, council_number: &str, date: NaiveDateTime, finished: bool) -> AppointmentDetails {
        AppointmentDetails {
            id: Uuid::new_v4(),
            date,
            finished,
            patient: patient(patient_id),
            professional: professional(council_number),
        }
    }

    /// Store whose `find` applies the filter to a fixed set of rows.
    fn store_with_rows(rows: Vec<AppointmentDetails>) -> MockAppointmentStore {
        let mut store = MockAppointmentStore::new();
        store
            .expect_find()
            .returning(move |filter| Ok(rows.iter().filter(|r| filter.matches(r)).cloned().collect()));
        store
    }

    fn service(store: MockAppointmentStore, email: MockEmail, messages: MockMessages, now: NaiveDateTime) -> AppointmentService {
        AppointmentService::new(
            Arc::new(store),
            Arc::new(email),
            Arc::new(messages),
            Arc::new(FixedClock(now)),
        )
    }

    fn create_request() -> CreateAppointmentRequest {
        CreateAppointmentRequest {
            patient: "12345678900".to_string(),
            professional: "CRM-SP-1234".to_string(),
            date: at(25, 10, 0),
            finished: false,
            date_label: Some("25/10/2026".to_string()),
            hour_label: Some("10:00".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_returns_stored_record() {
        let mut store = MockAppointmentStore::new();
        store.expect_find_patient().returning(|id| Ok(Some(patient(id))));
        store.expect_find_professional().returning(|crm| Ok(Some(professional(crm))));
        store
            .expect_insert()
            .withf(|new| new.patient == "12345678900" && new.professional == "CRM-SP-1234" && !new.finished)
            .times(1)
            .returning(|new| Ok(Appointment {
                id: Uuid::new_v4(),
                date: new.date,
                finished: new.finished,
                patient: new.patient.clone(),
                professional: new.professional.clone(),
            }));

        let mut email = MockEmail::new();
        email
            .expect_send_appointment_email()
            .withf(|e| e.name == "Patient 12345678900" && e.date == "25/10/2026" && e.hour == "10:00")
            .times(1)
            .returning(|_| Ok(()));

        let created = service(store, email, MockMessages::new(), at(19, 9, 0))
            .create_appointment(create_request())
            .await
            .unwrap();

        assert_eq!(created.patient, "12345678900");
        assert_eq!(created.professional, "CRM-SP-1234");
        assert!(!created.id.is_nil());
    }

    #[tokio::test]
    async fn test_create_with_unknown_patient_still_stores_without_email() {
        let mut store = MockAppointmentStore::new();
        store.expect_find_patient().returning(|_| Ok(None));
        store.expect_find_professional().returning(|crm| Ok(Some(professional(crm))));
        store.expect_insert().times(1).returning(|new| Ok(Appointment {
            id: Uuid::new_v4(),
            date: new.date,
            finished: false,
            patient: new.patient.clone(),
            professional: new.professional.clone(),
        }));

        let mut email = MockEmail::new();
        email.expect_send_appointment_email().never();

        let result = service(store, email, MockMessages::new(), at(19, 9, 0))
            .create_appointment(create_request())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_ignores_email_failure() {
        let mut store = MockAppointmentStore::new();
        store.expect_find_patient().returning(|id| Ok(Some(patient(id))));
        store.expect_find_professional().returning(|crm| Ok(Some(professional(crm))));
        store.expect_insert().returning(|new| Ok(Appointment {
            id: Uuid::new_v4(),
            date: new.date,
            finished: false,
            patient: new.patient.clone(),
            professional: new.professional.clone(),
        }));

        let mut email = MockEmail::new();
        email.expect_send_appointment_email().returning(|_| {
            Err(NotificationError::ProviderError { message: "down".to_string() })
        });

        let mut request = create_request();
        request.date_label = None;
        request.hour_label = None;

        let result = service(store, email, MockMessages::new(), at(19, 9, 0))
            .create_appointment(request)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_list_by_patient_only_returns_that_patient() {
        let store = store_with_rows(vec![
            details("111", "CRM-1", at(20, 10, 0), false),
            details("222", "CRM-1", at(20, 11, 0), false),
            details("111", "CRM-2", at(21, 9, 0), true),
        ]);

        let views = service(store, MockEmail::new(), MockMessages::new(), at(19, 9, 0))
            .appointments_by_patient("111")
            .await
            .unwrap();

        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.professional == "Dr. Paulo Lima"));
    }

    #[tokio::test]
    async fn test_list_by_professional() {
        let store = store_with_rows(vec![
            details("111", "CRM-1", at(20, 10, 0), false),
            details("222", "CRM-2", at(20, 11, 0), false),
        ]);

        let views = service(store, MockEmail::new(), MockMessages::new(), at(19, 9, 0))
            .appointments_by_professional("CRM-2")
            .await
            .unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].patient, "Patient 222");
    }

    #[tokio::test]
    async fn test_tomorrow_window_boundaries_are_inclusive() {
        let store = store_with_rows(vec![
            details("1", "CRM-1", at(19, 20, 59), false),
            details("2", "CRM-1", at(19, 21, 0), false),
            details("3", "CRM-1", at(20, 12, 0), false),
            details("4", "CRM-1", at(20, 20, 59), false),
            details("5", "CRM-1", at(20, 21, 0), false),
        ]);

        let views = service(store, MockEmail::new(), MockMessages::new(), at(19, 8, 30))
            .appointments_tomorrow()
            .await
            .unwrap();

        let patients: Vec<&str> = views.iter().map(|v| v.patient.as_str()).collect();
        assert_eq!(patients, vec!["Patient 2", "Patient 3", "Patient 4"]);
    }

    #[tokio::test]
    async fn test_wait_list_excludes_cutoff_and_finished() {
        // now 15:00, cutoff 12:00
        let store = store_with_rows(vec![
            details("1", "CRM-1", at(19, 11, 59), false),
            details("2", "CRM-1", at(19, 12, 0), false),
            details("3", "CRM-1", at(19, 10, 0), true),
            details("4", "CRM-2", at(19, 9, 0), false),
        ]);

        let views = service(store, MockEmail::new(), MockMessages::new(), at(19, 15, 0))
            .wait_list("CRM-1")
            .await
            .unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].patient, "Patient 1");
        assert_eq!(views[0].overdue_minutes, 1);
    }

    #[tokio::test]
    async fn test_update_with_new_date_sends_one_reschedule_message() {
        let new_date = at(28, 14, 30);
        let mut stored = details("111", "CRM-1", new_date, false);
        let id = stored.id;
        stored.patient.name = "Maria Souza".to_string();

        let mut store = MockAppointmentStore::new();
        store
            .expect_update()
            .withf(move |update_id, changes| *update_id == id && changes.date == Some(new_date))
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));

        let mut messages = MockMessages::new();
        messages
            .expect_send_update_whatsapp()
            .withf(move |m| {
                m.patient_name == "Maria Souza"
                    && m.patient_phone == "+5511999990000"
                    && m.professional_name == "Dr. Paulo Lima"
                    && m.specialty == "Cardiology"
                    && m.date == new_date
            })
            .times(1)
            .returning(|_| Ok(()));

        let view = service(store, MockEmail::new(), messages, at(19, 9, 0))
            .update_appointment(id, UpdateAppointmentRequest {
                date: Some(new_date),
                ..UpdateAppointmentRequest::default()
            })
            .await
            .unwrap();

        assert_eq!(view.date, new_date);
        assert_eq!(view.patient, "111");
        assert_eq!(view.professional, "CRM-1");
    }

    #[tokio::test]
    async fn test_update_without_date_sends_nothing() {
        let stored = details("111", "CRM-1", at(20, 10, 0), true);
        let id = stored.id;

        let mut store = MockAppointmentStore::new();
        store.expect_update().times(1).returning(|_, _| Ok(()));
        store.expect_find_by_id().returning(move |_| Ok(Some(stored.clone())));

        let mut messages = MockMessages::new();
        messages.expect_send_update_whatsapp().never();

        let view = service(store, MockEmail::new(), messages, at(19, 9, 0))
            .update_appointment(id, UpdateAppointmentRequest {
                finished: Some(true),
                ..UpdateAppointmentRequest::default()
            })
            .await
            .unwrap();

        assert!(view.finished);
    }

    #[tokio::test]
    async fn test_update_missing_appointment_is_not_found() {
        let mut store = MockAppointmentStore::new();
        store.expect_update().returning(|_, _| Ok(()));
        store.expect_find_by_id().returning(|_| Ok(None));

        let mut messages = MockMessages::new();
        messages.expect_send_update_whatsapp().never();

        let result = service(store, MockEmail::new(), messages, at(19, 9, 0))
            .update_appointment(Uuid::new_v4(), UpdateAppointmentRequest {
                date: Some(at(28, 14, 30)),
                ..UpdateAppointmentRequest::default()
            })
            .await;

        assert_matches!(result, Err(AppointmentError::NotFound));
    }

    #[tokio::test]
    async fn test_update_survives_message_failure() {
        let stored = details("111", "CRM-1", at(28, 14, 30), false);
        let id = stored.id;

        let mut store = MockAppointmentStore::new();
        store.expect_update().returning(|_, _| Ok(()));
        store.expect_find_by_id().returning(move |_| Ok(Some(stored.clone())));

        let mut messages = MockMessages::new();
        messages.expect_send_update_whatsapp().times(1).returning(|_| {
            Err(NotificationError::NotConfigured { channel: "WhatsApp".to_string() })
        });

        let result = service(store, MockEmail::new(), messages, at(19, 9, 0))
            .update_appointment(id, UpdateAppointmentRequest {
                date: Some(at(28, 14, 30)),
                ..UpdateAppointmentRequest::default()
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_notifies_then_removes() {
        let stored = details("111", "CRM-1", at(25, 10, 0), false);
        let id = stored.id;

        let mut store = MockAppointmentStore::new();
        store
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        store
            .expect_remove()
            .withf(move |removed| *removed == id)
            .times(1)
            .returning(|_| Ok(()));
        store.expect_find_by_id().returning(|_| Ok(None));

        let mut email = MockEmail::new();
        email
            .expect_send_cancelation_email()
            .withf(|e| {
                e.email == "111@example.com"
                    && e.medic_name == "Dr. Paulo Lima"
                    && e.date == "25/10/2026"
                    && e.hour == "10:00:00"
            })
            .times(1)
            .returning(|_| Ok(()));

        let mut messages = MockMessages::new();
        messages
            .expect_send_cancelation_whatsapp()
            .withf(|m| m.patient_phone == "+5511999990000" && m.specialty == "Cardiology")
            .times(1)
            .returning(|_| Ok(()));

        let service = service(store, email, messages, at(19, 9, 0));
        let deleted = service.delete_appointment(id).await.unwrap();

        assert_eq!(deleted.id, id);
        assert_eq!(deleted.patient, "111");
        assert_matches!(service.get_appointment(id).await, Err(AppointmentError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_missing_appointment_sends_nothing() {
        let mut store = MockAppointmentStore::new();
        store.expect_find_by_id().returning(|_| Ok(None));
        store.expect_remove().never();

        let mut email = MockEmail::new();
        email.expect_send_cancelation_email().never();
        let mut messages = MockMessages::new();
        messages.expect_send_cancelation_whatsapp().never();

        let result = service(store, email, messages, at(19, 9, 0))
            .delete_appointment(Uuid::new_v4())
            .await;

        assert_matches!(result, Err(AppointmentError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_proceeds_when_notifications_fail() {
        let stored = details("111", "CRM-1", at(25, 10, 0), false);
        let id = stored.id;

        let mut store = MockAppointmentStore::new();
        store.expect_find_by_id().returning(move |_| Ok(Some(stored.clone())));
        store.expect_remove().times(1).returning(|_| Ok(()));

        let mut email = MockEmail::new();
        email.expect_send_cancelation_email().returning(|_| {
            Err(NotificationError::ProviderError { message: "smtp down".to_string() })
        });
        let mut messages = MockMessages::new();
        messages.expect_send_cancelation_whatsapp().returning(|_| {
            Err(NotificationError::ProviderError { message: "rate limited".to_string() })
        });

        let result = service(store, email, messages, at(19, 9, 0))
            .delete_appointment(id)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut store = MockAppointmentStore::new();
        store
            .expect_find()
            .returning(|_| Err(AppointmentError::DatabaseError("connection refused".to_string())));

        let result = service(store, MockEmail::new(), MockMessages::new(), at(19, 9, 0))
            .appointments_by_patient("111")
            .await;

        assert_matches!(result, Err(AppointmentError::DatabaseError(_)));
    }
}
