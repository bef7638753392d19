use folio_config::Config;
use folio_email_contracts::EmailService;
use tracing::warn;

use crate::environment;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let email = environment::email_service(&config)?;
    if !email.is_configured() {
        warn!("email.api_key is not set, form submissions will fail");
    }
    if config.forms.owner_email.is_none() {
        warn!("forms.owner_email is not set, form submissions will fail");
    }

    let server = environment::rest_server(&config, email)?;
    server.serve(config.http.host, config.http.port).await
}
