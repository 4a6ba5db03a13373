use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_jwt_secret: String,
    pub email_api_url: String,
    pub email_api_key: String,
    pub email_from: String,
    pub whatsapp_api_url: String,
    pub whatsapp_api_token: String,
    pub whatsapp_phone_number_id: String,
    pub prescription_output_path: String,
}

fn var_or_empty(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        warn!("{} not set, using empty value", name);
        String::new()
    })
}

fn var_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        warn!("{} not set, using default", name);
        default.to_string()
    })
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: var_or_empty("SUPABASE_URL"),
            supabase_anon_key: var_or_empty("SUPABASE_ANON_PUBLIC_KEY"),
            supabase_jwt_secret: var_or_empty("SUPABASE_JWT_SECRET"),
            email_api_url: var_or_empty("EMAIL_API_URL"),
            email_api_key: var_or_empty("EMAIL_API_KEY"),
            email_from: var_or_default("EMAIL_FROM", "no-reply@clinic.local"),
            whatsapp_api_url: var_or_default("WHATSAPP_API_URL", "https://graph.facebook.com/v19.0"),
            whatsapp_api_token: var_or_empty("WHATSAPP_API_TOKEN"),
            whatsapp_phone_number_id: var_or_empty("WHATSAPP_PHONE_NUMBER_ID"),
            prescription_output_path: var_or_default("PRESCRIPTION_OUTPUT_PATH", "temp/prescription.pdf"),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }
        if !config.is_email_configured() {
            warn!("Email delivery not configured - notifications by email will be skipped");
        }
        if !config.is_whatsapp_configured() {
            warn!("WhatsApp delivery not configured - notifications by WhatsApp will be skipped");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
            && !self.supabase_jwt_secret.is_empty()
    }

    pub fn is_email_configured(&self) -> bool {
        !self.email_api_url.is_empty()
            && !self.email_api_key.is_empty()
            && !self.email_from.is_empty()
    }

    pub fn is_whatsapp_configured(&self) -> bool {
        !self.whatsapp_api_url.is_empty()
            && !self.whatsapp_api_token.is_empty()
            && !self.whatsapp_phone_number_id.is_empty()
    }
}
