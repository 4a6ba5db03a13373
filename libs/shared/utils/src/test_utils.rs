use std::sync::Arc;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use base64::{Engine as _, engine::general_purpose};
use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;

pub struct TestConfig {
    pub jwt_secret: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub email_api_url: String,
    pub whatsapp_api_url: String,
    pub prescription_output_path: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            email_api_url: "http://localhost:54400".to_string(),
            whatsapp_api_url: "http://localhost:54500".to_string(),
            prescription_output_path: "temp/prescription.pdf".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            supabase_jwt_secret: self.jwt_secret.clone(),
            email_api_url: self.email_api_url.clone(),
            email_api_key: "test-email-key".to_string(),
            email_from: "clinic@example.com".to_string(),
            whatsapp_api_url: self.whatsapp_api_url.clone(),
            whatsapp_api_token: "test-whatsapp-token".to_string(),
            whatsapp_phone_number_id: "100200300".to_string(),
            prescription_output_path: self.prescription_output_path.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "authenticated".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn professional(email: &str) -> Self {
        Self::new(email, "professional")
    }

    pub fn staff(email: &str) -> Self {
        Self::new(email, "staff")
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            metadata: None,
            created_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "email": user.email,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }
}

/// PostgREST row shapes for the clinic tables.
pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn patient_response(national_id: &str, name: &str) -> serde_json::Value {
        json!({
            "national_id": national_id,
            "name": name,
            "email": format!("{}@example.com", national_id),
            "phone": "+5511999990000"
        })
    }

    pub fn professional_response(council_number: &str, name: &str, specialty: &str) -> serde_json::Value {
        json!({
            "council_number": council_number,
            "name": name,
            "specialty": specialty,
            "phone": "+5511988880000"
        })
    }

    pub fn appointment_response(id: &str, date: &str, patient: &str, professional: &str) -> serde_json::Value {
        json!({
            "id": id,
            "date": date,
            "finished": false,
            "patient": patient,
            "professional": professional
        })
    }

    /// Appointment row with both relations embedded, as returned by a
    /// `select=id,date,finished,patient:patients!patient(*),professional:professionals!professional(*)`
    /// query.
    pub fn appointment_details_response(id: &str, date: &str, patient_id: &str, professional_id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "date": date,
            "finished": false,
            "patient": Self::patient_response(patient_id, "Maria Souza"),
            "professional": Self::professional_response(professional_id, "Dr. Paulo Lima", "Cardiology")
        })
    }

    pub fn error_response(message: &str, code: &str) -> serde_json::Value {
        json!({
            "message": message,
            "code": code
        })
    }
}
