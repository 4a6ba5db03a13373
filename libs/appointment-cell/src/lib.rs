// libs/appointment-cell/src/lib.rs
//! # Appointment Cell
//!
//! Booking, listing, rescheduling and cancelling appointments between
//! patients and professionals.
//!
//! ```text
//! +-----------------------------------------------------+
//! |                 Appointment Cell                    |
//! +-----------------------------------------------------+
//! |  handlers.rs        |  HTTP endpoint handlers       |
//! |  router.rs          |  Route definitions            |
//! |  models.rs          |  Records, requests, views     |
//! |  services/          |                               |
//! |    appointment.rs   |  Use cases                    |
//! |    store.rs         |  Store port + PostgREST store |
//! |    formatting.rs    |  Display projections          |
//! |    schedule.rs      |  Clock and date windows       |
//! +-----------------------------------------------------+
//! ```
//!
//! ## API Endpoints
//!
//! - `POST /appointments` - Book an appointment; emails the patient a confirmation
//! - `GET /appointments/patients/{national_id}` - Patient's appointments
//! - `GET /appointments/professionals/{council_number}` - Professional's appointments
//! - `GET /appointments/tomorrow` - Appointments in the reminder window
//! - `GET /appointments/waitlist/{council_number}` - Overdue unfinished appointments
//! - `GET /appointments/{id}` - Appointment with patient and professional
//! - `PATCH /appointments/{id}` - Update; a new date triggers a WhatsApp notice
//! - `DELETE /appointments/{id}` - Cancel with email and WhatsApp notices

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    Appointment, AppointmentDetails, AppointmentError, AppointmentFilter,
    CreateAppointmentRequest, Patient, Professional, UpdateAppointmentRequest,
};

pub use services::{AppointmentService, AppointmentStore, SupabaseAppointmentStore};

pub use router::appointment_routes;
