pub mod appointment;
pub mod formatting;
pub mod schedule;
pub mod store;

pub use appointment::AppointmentService;
pub use schedule::{Clock, FixedClock, LocalClock};
pub use store::{AppointmentStore, SupabaseAppointmentStore};
