use anyhow::bail;
use clap::Subcommand;
use folio_config::Config;
use folio_email_contracts::{ContentType, Email, EmailService};
use folio_models::{email_address::EmailAddress, Delivery};
use tracing::info;

use crate::environment;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Send a test email through the configured delivery provider
    Test { recipient: EmailAddress },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddress) -> anyhow::Result<()> {
    let email_service = environment::email_service(&config)?;

    let delivery = email_service
        .send(Email {
            from: config
                .email
                .sender
                .clone()
                .with_name(config.forms.owner_name.as_str()),
            recipients: vec![recipient],
            reply_to: None,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            content_type: ContentType::Text,
        })
        .await?;

    match delivery {
        Delivery::Sent(id) => {
            info!(%id, "Test email sent");
            Ok(())
        }
        Delivery::Failed(reason) => bail!("Failed to send email: {reason}"),
    }
}
