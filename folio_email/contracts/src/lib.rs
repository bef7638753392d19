use std::future::Future;

use folio_models::{
    email_address::{EmailAddress, Mailbox},
    Delivery,
};

pub mod template;

/// Client for the external email delivery provider.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Whether the client has the credentials it needs to talk to the provider.
    fn is_configured(&self) -> bool;

    /// Hand a message to the provider.
    ///
    /// Rejections and transport failures are reported as [`Delivery::Failed`],
    /// `Err` is reserved for failures that happen before anything is sent.
    fn send(&self, email: Email) -> impl Future<Output = anyhow::Result<Delivery>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from: Mailbox,
    pub recipients: Vec<EmailAddress>,
    pub reply_to: Option<EmailAddress>,
    pub subject: String,
    pub body: String,
    pub content_type: ContentType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Html,
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_is_configured(mut self, result: bool) -> Self {
        self.expect_is_configured().return_const(result);
        self
    }

    pub fn with_send(mut self, email: Email, result: Delivery) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
