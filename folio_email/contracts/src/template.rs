use std::future::Future;

use folio_models::{
    email_address::{EmailAddress, Mailbox},
    Delivery,
};
use folio_templates_contracts::{
    ContactAcknowledgementTemplate, ContactNotificationTemplate, QuoteAcknowledgementTemplate,
    QuoteNotificationTemplate,
};

/// Sender, recipient and reply address of a templated email. The subject is
/// derived from the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub from: Mailbox,
    pub to: EmailAddress,
    pub reply_to: Option<EmailAddress>,
}

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateEmailService: Send + Sync + 'static {
    fn is_configured(&self) -> bool;

    fn send_contact_notification(
        &self,
        envelope: Envelope,
        data: &ContactNotificationTemplate,
    ) -> impl Future<Output = anyhow::Result<Delivery>> + Send;

    fn send_contact_acknowledgement(
        &self,
        envelope: Envelope,
        data: &ContactAcknowledgementTemplate,
    ) -> impl Future<Output = anyhow::Result<Delivery>> + Send;

    fn send_quote_notification(
        &self,
        envelope: Envelope,
        data: &QuoteNotificationTemplate,
    ) -> impl Future<Output = anyhow::Result<Delivery>> + Send;

    fn send_quote_acknowledgement(
        &self,
        envelope: Envelope,
        data: &QuoteAcknowledgementTemplate,
    ) -> impl Future<Output = anyhow::Result<Delivery>> + Send;
}

#[cfg(feature = "mock")]
impl MockTemplateEmailService {
    pub fn with_is_configured(mut self, result: bool) -> Self {
        self.expect_is_configured().return_const(result);
        self
    }

    pub fn with_send_contact_notification(
        mut self,
        envelope: Envelope,
        data: ContactNotificationTemplate,
        result: Delivery,
    ) -> Self {
        self.expect_send_contact_notification()
            .once()
            .with(
                mockall::predicate::eq(envelope),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_contact_acknowledgement(
        mut self,
        envelope: Envelope,
        data: ContactAcknowledgementTemplate,
        result: Delivery,
    ) -> Self {
        self.expect_send_contact_acknowledgement()
            .once()
            .with(
                mockall::predicate::eq(envelope),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_quote_notification(
        mut self,
        envelope: Envelope,
        data: QuoteNotificationTemplate,
        result: Delivery,
    ) -> Self {
        self.expect_send_quote_notification()
            .once()
            .with(
                mockall::predicate::eq(envelope),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_quote_acknowledgement(
        mut self,
        envelope: Envelope,
        data: QuoteAcknowledgementTemplate,
        result: Delivery,
    ) -> Self {
        self.expect_send_quote_acknowledgement()
            .once()
            .with(
                mockall::predicate::eq(envelope),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
