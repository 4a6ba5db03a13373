// libs/appointment-cell/src/services/formatting.rs
use chrono::NaiveDateTime;

use crate::models::{
    AppointmentDetails, AppointmentUpdateView, PatientAppointmentView,
    ProfessionalAppointmentView, TomorrowAppointmentView, WaitListView,
};

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const HOUR_FORMAT: &str = "%H:%M";
pub const TIME_FORMAT: &str = "%H:%M:%S";

pub fn format_patient_appointments(appointments: &[AppointmentDetails]) -> Vec<PatientAppointmentView> {
    appointments
        .iter()
        .map(|apt| PatientAppointmentView {
            id: apt.id,
            date: apt.date,
            finished: apt.finished,
            professional: apt.professional.name.clone(),
            specialty: apt.professional.specialty.clone(),
        })
        .collect()
}

pub fn format_professional_appointments(appointments: &[AppointmentDetails]) -> Vec<ProfessionalAppointmentView> {
    appointments
        .iter()
        .map(|apt| ProfessionalAppointmentView {
            id: apt.id,
            date: apt.date,
            finished: apt.finished,
            patient: apt.patient.name.clone(),
            patient_phone: apt.patient.phone.clone(),
        })
        .collect()
}

pub fn format_appointments_tomorrow(appointments: &[AppointmentDetails]) -> Vec<TomorrowAppointmentView> {
    appointments
        .iter()
        .map(|apt| TomorrowAppointmentView {
            id: apt.id,
            date: apt.date,
            patient: apt.patient.name.clone(),
            patient_email: apt.patient.email.clone(),
            patient_phone: apt.patient.phone.clone(),
            professional: apt.professional.name.clone(),
            specialty: apt.professional.specialty.clone(),
        })
        .collect()
}

/// `cutoff` is the instant the appointments were judged overdue against.
pub fn format_wait_list(appointments: &[AppointmentDetails], cutoff: NaiveDateTime) -> Vec<WaitListView> {
    appointments
        .iter()
        .map(|apt| WaitListView {
            id: apt.id,
            date: apt.date,
            patient: apt.patient.name.clone(),
            patient_phone: apt.patient.phone.clone(),
            overdue_minutes: (cutoff - apt.date).num_minutes().max(0),
        })
        .collect()
}

pub fn format_updated_appointment(appointment: &AppointmentDetails) -> AppointmentUpdateView {
    AppointmentUpdateView {
        id: appointment.id,
        date: appointment.date,
        professional: appointment.professional.council_number.clone(),
        patient: appointment.patient.national_id.clone(),
        finished: appointment.finished,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    use crate::models::{Patient, Professional};

    fn details(hour: u32) -> AppointmentDetails {
        AppointmentDetails {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(hour, 0, 0).unwrap(),
            finished: false,
            patient: Patient {
                national_id: "12345678900".to_string(),
                name: "Maria Souza".to_string(),
                email: "maria@example.com".to_string(),
                phone: "+5511999990000".to_string(),
            },
            professional: Professional {
                council_number: "CRM-SP-1234".to_string(),
                name: "Dr. Paulo Lima".to_string(),
                specialty: "Cardiology".to_string(),
                phone: "+5511988880000".to_string(),
            },
        }
    }

    #[test]
    fn test_patient_view_resolves_professional() {
        let views = format_patient_appointments(&[details(10)]);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].professional, "Dr. Paulo Lima");
        assert_eq!(views[0].specialty, "Cardiology");
    }

    #[test]
    fn test_professional_view_resolves_patient() {
        let views = format_professional_appointments(&[details(10), details(11)]);
        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.patient == "Maria Souza"));
    }

    #[test]
    fn test_wait_list_overdue_minutes() {
        let cutoff = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(12, 30, 0).unwrap();
        let views = format_wait_list(&[details(10)], cutoff);
        assert_eq!(views[0].overdue_minutes, 150);
    }

    #[test]
    fn test_update_view_uses_identifiers() {
        let apt = details(9);
        let view = format_updated_appointment(&apt);
        assert_eq!(view.professional, "CRM-SP-1234");
        assert_eq!(view.patient, "12345678900");
        assert_eq!(view.id, apt.id);
    }

    #[test]
    fn test_empty_input() {
        assert!(format_appointments_tomorrow(&[]).is_empty());
    }
}
