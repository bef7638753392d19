use folio_email_contracts::{
    template::{Envelope, TemplateEmailService},
    ContentType, Email, EmailService,
};
use folio_models::Delivery;
use folio_templates_contracts::{
    ContactAcknowledgementTemplate, ContactNotificationTemplate, QuoteAcknowledgementTemplate,
    QuoteNotificationTemplate, Template, TemplateService,
};

#[derive(Debug, Clone)]
pub struct TemplateEmailServiceImpl<Email, Template> {
    email: Email,
    template: Template,
}

impl<Email, Template> TemplateEmailServiceImpl<Email, Template> {
    pub fn new(email: Email, template: Template) -> Self {
        Self { email, template }
    }
}

impl<EmailS, TemplateS> TemplateEmailService for TemplateEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    fn is_configured(&self) -> bool {
        self.email.is_configured()
    }

    async fn send_contact_notification(
        &self,
        envelope: Envelope,
        data: &ContactNotificationTemplate,
    ) -> anyhow::Result<Delivery> {
        let subject = format!("New Contact Form Submission from {}", data.name);
        self.send_email(envelope, data, &subject).await
    }

    async fn send_contact_acknowledgement(
        &self,
        envelope: Envelope,
        data: &ContactAcknowledgementTemplate,
    ) -> anyhow::Result<Delivery> {
        self.send_email(envelope, data, "Thank you for contacting me!")
            .await
    }

    async fn send_quote_notification(
        &self,
        envelope: Envelope,
        data: &QuoteNotificationTemplate,
    ) -> anyhow::Result<Delivery> {
        let subject = format!("New Quote Request for {}", data.service);
        self.send_email(envelope, data, &subject).await
    }

    async fn send_quote_acknowledgement(
        &self,
        envelope: Envelope,
        data: &QuoteAcknowledgementTemplate,
    ) -> anyhow::Result<Delivery> {
        self.send_email(envelope, data, "Thank you for your quote request!")
            .await
    }
}

impl<EmailS, TemplateS> TemplateEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_email<T: Template + 'static>(
        &self,
        Envelope { from, to, reply_to }: Envelope,
        data: &T,
        subject: &str,
    ) -> anyhow::Result<Delivery> {
        self.email
            .send(Email {
                from,
                recipients: vec![to],
                reply_to,
                subject: sanitize_subject(subject),
                body: self.template.render(data)?,
                content_type: ContentType::Html,
            })
            .await
    }
}

/// Header values must not contain line breaks.
fn sanitize_subject(subject: &str) -> String {
    subject
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
