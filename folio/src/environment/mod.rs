//! Wiring of the concrete service implementations.

use folio_api_rest::RestServerConfig;
use folio_config::Config;
use folio_core_forms_impl::FormFeatureConfig;
use folio_email_impl::EmailServiceConfig;
use types::{Email, FormFeature, HealthFeature, RestServer, Template, TemplateEmail};

pub mod types;

pub fn email_service(config: &Config) -> anyhow::Result<Email> {
    let email_config = EmailServiceConfig::new(
        config.email.endpoint_override.clone(),
        config.email.api_key.clone(),
        config.email.timeout.into(),
    )?;
    Email::new(email_config)
}

pub fn rest_server(config: &Config, email: Email) -> anyhow::Result<RestServer> {
    let template_email = TemplateEmail::new(email.clone(), Template::new()?);

    let forms = FormFeature::new(
        template_email,
        FormFeatureConfig {
            owner_email: config.forms.owner_email.clone(),
            owner_name: config.forms.owner_name.clone(),
            sender: config.email.sender.clone(),
            contact_sender_name: config.forms.contact_sender_name.clone(),
            quote_sender_name: config.forms.quote_sender_name.clone(),
        },
    );
    let health = HealthFeature::new(email, config.forms.owner_email.is_some());

    Ok(RestServer::new(
        health,
        forms,
        RestServerConfig::new(&config.http.allowed_origins)?,
    ))
}
