use folio_core_health_contracts::{HealthFeatureService, HealthStatus};
use folio_email_contracts::EmailService;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Email> {
    email: Email,
    owner_email_configured: bool,
}

impl<Email> HealthFeatureServiceImpl<Email> {
    pub fn new(email: Email, owner_email_configured: bool) -> Self {
        Self {
            email,
            owner_email_configured,
        }
    }
}

impl<Email> HealthFeatureService for HealthFeatureServiceImpl<Email>
where
    Email: EmailService,
{
    async fn get_status(&self) -> HealthStatus {
        let email = self.email.is_configured();
        if !email {
            warn!("email delivery is not configured");
        }
        let forms = self.owner_email_configured;
        if !forms {
            warn!("form owner address is not configured");
        }

        HealthStatus { email, forms }
    }
}
