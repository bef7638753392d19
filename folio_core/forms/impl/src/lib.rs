use folio_core_forms_contracts::{FormFeatureService, FormSubmitError};
use folio_email_contracts::template::{Envelope, TemplateEmailService};
use folio_models::{
    email_address::EmailAddress,
    form::{ContactForm, FormKind, FormSubmission, QuoteForm, ValidFormSubmission},
    Delivery, DeliveryId,
};
use folio_templates_contracts::{
    ContactAcknowledgementTemplate, ContactNotificationTemplate, QuoteAcknowledgementTemplate,
    QuoteNotificationTemplate,
};
use tracing::{debug, error, info, warn};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
pub struct FormFeatureServiceImpl<TemplateEmail> {
    template_email: TemplateEmail,
    config: FormFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct FormFeatureConfig {
    /// Recipient of notifications. Submissions fail while this is unset.
    pub owner_email: Option<EmailAddress>,
    pub owner_name: String,
    /// Address every message is sent from.
    pub sender: EmailAddress,
    pub contact_sender_name: String,
    pub quote_sender_name: String,
}

impl<TemplateEmail> FormFeatureServiceImpl<TemplateEmail> {
    pub fn new(template_email: TemplateEmail, config: FormFeatureConfig) -> Self {
        Self {
            template_email,
            config,
        }
    }
}

impl<TemplateEmail> FormFeatureService for FormFeatureServiceImpl<TemplateEmail>
where
    TemplateEmail: TemplateEmailService,
{
    async fn submit(&self, submission: FormSubmission) -> Result<DeliveryId, FormSubmitError> {
        let kind = submission.kind;
        let form = submission
            .validate()
            .inspect_err(|err| debug!(%kind, error = %err, "rejected form submission"))?;

        let owner_email = self.owner_email()?;

        let id = match self.send_notification(&form, owner_email).await? {
            Delivery::Sent(id) => id,
            Delivery::Failed(reason) => {
                error!(%kind, %reason, "Failed to send notification email");
                return Err(FormSubmitError::NotificationFailed);
            }
        };
        info!(%kind, %id, "sent notification email");

        match self.send_acknowledgement(&form).await {
            Ok(Delivery::Sent(ack_id)) => info!(%kind, id = %ack_id, "sent acknowledgement email"),
            Ok(Delivery::Failed(reason)) => {
                warn!(%kind, %reason, "Failed to send acknowledgement email")
            }
            Err(err) => warn!(%kind, error = %err, "Failed to send acknowledgement email"),
        }

        Ok(id)
    }
}

impl<TemplateEmail> FormFeatureServiceImpl<TemplateEmail>
where
    TemplateEmail: TemplateEmailService,
{
    fn owner_email(&self) -> Result<EmailAddress, FormSubmitError> {
        let missing = [
            (!self.template_email.is_configured()).then_some("email.api_key"),
            self.config
                .owner_email
                .is_none()
                .then_some("forms.owner_email"),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

        match &self.config.owner_email {
            Some(owner_email) if missing.is_empty() => Ok(owner_email.clone()),
            _ => {
                error!(?missing, "Missing email configuration");
                Err(FormSubmitError::Configuration)
            }
        }
    }

    fn sender_name(&self, kind: FormKind) -> &str {
        match kind {
            FormKind::Contact => &self.config.contact_sender_name,
            FormKind::Quote => &self.config.quote_sender_name,
        }
    }

    async fn send_notification(
        &self,
        form: &ValidFormSubmission,
        owner_email: EmailAddress,
    ) -> anyhow::Result<Delivery> {
        let envelope = Envelope {
            from: self
                .config
                .sender
                .clone()
                .with_name(self.sender_name(form.kind())),
            to: owner_email,
            reply_to: Some(form.email().clone()),
        };

        match form {
            ValidFormSubmission::Contact(ContactForm {
                name,
                email,
                message,
            }) => {
                let data = ContactNotificationTemplate {
                    name: name.to_string(),
                    email: email.to_string(),
                    message: message.to_string(),
                };
                self.template_email
                    .send_contact_notification(envelope, &data)
                    .await
            }
            ValidFormSubmission::Quote(QuoteForm {
                name,
                email,
                message,
                service,
            }) => {
                let data = QuoteNotificationTemplate {
                    name: name.to_string(),
                    email: email.to_string(),
                    message: message.to_string(),
                    service: service.to_string(),
                };
                self.template_email
                    .send_quote_notification(envelope, &data)
                    .await
            }
        }
    }

    async fn send_acknowledgement(&self, form: &ValidFormSubmission) -> anyhow::Result<Delivery> {
        let envelope = Envelope {
            from: self
                .config
                .sender
                .clone()
                .with_name(self.config.owner_name.as_str()),
            to: form.email().clone(),
            reply_to: None,
        };
        let owner_name = self.config.owner_name.clone();

        match form {
            ValidFormSubmission::Contact(ContactForm { name, message, .. }) => {
                let data = ContactAcknowledgementTemplate {
                    name: name.to_string(),
                    message: message.to_string(),
                    owner_name,
                };
                self.template_email
                    .send_contact_acknowledgement(envelope, &data)
                    .await
            }
            ValidFormSubmission::Quote(QuoteForm {
                name,
                message,
                service,
                ..
            }) => {
                let data = QuoteAcknowledgementTemplate {
                    name: name.to_string(),
                    message: message.to_string(),
                    service: service.to_string(),
                    owner_name,
                };
                self.template_email
                    .send_quote_acknowledgement(envelope, &data)
                    .await
            }
        }
    }
}
