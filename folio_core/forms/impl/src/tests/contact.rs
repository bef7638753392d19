use folio_core_forms_contracts::{FormFeatureService, FormSubmitError};
use folio_email_contracts::template::MockTemplateEmailService;
use folio_models::{form::FormValidationError, Delivery};
use folio_templates_contracts::{ContactAcknowledgementTemplate, ContactNotificationTemplate};
use folio_utils::assert_matches;
use pretty_assertions::assert_eq;

use super::*;

fn notification() -> ContactNotificationTemplate {
    ContactNotificationTemplate {
        name: "Ann".into(),
        email: SUBMITTER_EMAIL.into(),
        message: "Hi".into(),
    }
}

fn acknowledgement() -> ContactAcknowledgementTemplate {
    ContactAcknowledgementTemplate {
        name: "Ann".into(),
        message: "Hi".into(),
        owner_name: "Jane Doe".into(),
    }
}

#[tokio::test]
async fn ok() {
    // Arrange
    let template_email = MockTemplateEmailService::new()
        .with_is_configured(true)
        .with_send_contact_notification(
            notification_envelope("Portfolio Contact Form"),
            notification(),
            sent("notification-id"),
        )
        .with_send_contact_acknowledgement(
            acknowledgement_envelope(),
            acknowledgement(),
            sent("acknowledgement-id"),
        );

    let sut = make_sut(template_email);

    // Act
    let result = sut.submit(contact("Ann", SUBMITTER_EMAIL, "Hi")).await;

    // Assert
    assert_eq!(result.unwrap(), delivery_id("notification-id"));
}

#[tokio::test]
async fn ok_name_is_trimmed() {
    // Arrange
    let template_email = MockTemplateEmailService::new()
        .with_is_configured(true)
        .with_send_contact_notification(
            notification_envelope("Portfolio Contact Form"),
            notification(),
            sent("notification-id"),
        )
        .with_send_contact_acknowledgement(
            acknowledgement_envelope(),
            acknowledgement(),
            sent("acknowledgement-id"),
        );

    let sut = make_sut(template_email);

    // Act
    let result = sut.submit(contact("  Ann \n", SUBMITTER_EMAIL, "Hi")).await;

    // Assert
    assert_eq!(result.unwrap(), delivery_id("notification-id"));
}

#[tokio::test]
async fn ok_acknowledgement_rejected() {
    // Arrange
    let template_email = MockTemplateEmailService::new()
        .with_is_configured(true)
        .with_send_contact_notification(
            notification_envelope("Portfolio Contact Form"),
            notification(),
            sent("notification-id"),
        )
        .with_send_contact_acknowledgement(
            acknowledgement_envelope(),
            acknowledgement(),
            Delivery::Failed("422 Unprocessable Entity".into()),
        );

    let sut = make_sut(template_email);

    // Act
    let result = sut.submit(contact("Ann", SUBMITTER_EMAIL, "Hi")).await;

    // Assert
    assert_eq!(result.unwrap(), delivery_id("notification-id"));
}

#[tokio::test]
async fn ok_acknowledgement_error() {
    // Arrange
    let mut template_email = MockTemplateEmailService::new()
        .with_is_configured(true)
        .with_send_contact_notification(
            notification_envelope("Portfolio Contact Form"),
            notification(),
            sent("notification-id"),
        );
    template_email
        .expect_send_contact_acknowledgement()
        .once()
        .return_once(|_, _| {
            Box::pin(std::future::ready(Err(anyhow::anyhow!("render failed"))))
        });

    let sut = make_sut(template_email);

    // Act
    let result = sut.submit(contact("Ann", SUBMITTER_EMAIL, "Hi")).await;

    // Assert
    assert_eq!(result.unwrap(), delivery_id("notification-id"));
}

#[tokio::test]
async fn notification_failed() {
    // Arrange
    let template_email = MockTemplateEmailService::new()
        .with_is_configured(true)
        .with_send_contact_notification(
            notification_envelope("Portfolio Contact Form"),
            notification(),
            Delivery::Failed("401 Unauthorized".into()),
        );

    let sut = make_sut(template_email);

    // Act
    let result = sut.submit(contact("Ann", SUBMITTER_EMAIL, "Hi")).await;

    // Assert
    assert_matches!(result, Err(FormSubmitError::NotificationFailed));
}

#[tokio::test]
async fn notification_error() {
    // Arrange
    let mut template_email = MockTemplateEmailService::new().with_is_configured(true);
    template_email
        .expect_send_contact_notification()
        .once()
        .return_once(|_, _| {
            Box::pin(std::future::ready(Err(anyhow::anyhow!("render failed"))))
        });

    let sut = make_sut(template_email);

    // Act
    let result = sut.submit(contact("Ann", SUBMITTER_EMAIL, "Hi")).await;

    // Assert
    assert_matches!(result, Err(FormSubmitError::Other(_)));
}

#[tokio::test]
async fn missing_fields() {
    for submission in [
        contact("", SUBMITTER_EMAIL, "Hi"),
        contact("Ann", "", "Hi"),
        contact("Ann", SUBMITTER_EMAIL, "   "),
    ] {
        // Arrange
        let sut = make_sut(MockTemplateEmailService::new());

        // Act
        let result = sut.submit(submission).await;

        // Assert
        assert_matches!(
            result,
            Err(FormSubmitError::Validation(
                FormValidationError::MissingFields
            ))
        );
    }
}

#[tokio::test]
async fn invalid_email() {
    // Arrange
    let sut = make_sut(MockTemplateEmailService::new());

    // Act
    let result = sut.submit(contact("Ann", "not-an-email", "Hi")).await;

    // Assert
    assert_matches!(
        result,
        Err(FormSubmitError::Validation(FormValidationError::InvalidEmail))
    );
}

#[tokio::test]
async fn message_too_long() {
    // Arrange
    let sut = make_sut(MockTemplateEmailService::new());

    // Act
    let result = sut
        .submit(contact("Ann", SUBMITTER_EMAIL, &"m".repeat(5001)))
        .await;

    // Assert
    assert_matches!(
        result,
        Err(FormSubmitError::Validation(FormValidationError::FieldTooLong))
    );
}

#[tokio::test]
async fn api_key_not_configured() {
    // Arrange
    let template_email = MockTemplateEmailService::new().with_is_configured(false);
    let sut = make_sut(template_email);

    // Act
    let result = sut.submit(contact("Ann", SUBMITTER_EMAIL, "Hi")).await;

    // Assert
    assert_matches!(result, Err(FormSubmitError::Configuration));
}

#[tokio::test]
async fn owner_email_not_configured() {
    // Arrange
    let template_email = MockTemplateEmailService::new().with_is_configured(true);
    let sut = FormFeatureServiceImpl::new(
        template_email,
        FormFeatureConfig {
            owner_email: None,
            ..config()
        },
    );

    // Act
    let result = sut.submit(contact("Ann", SUBMITTER_EMAIL, "Hi")).await;

    // Assert
    assert_matches!(result, Err(FormSubmitError::Configuration));
}

#[tokio::test]
async fn identical_submissions_are_delivered_twice() {
    // Arrange
    let mut template_email = MockTemplateEmailService::new().with_is_configured(true);
    template_email
        .expect_send_contact_notification()
        .times(2)
        .returning(|_, _| Box::pin(std::future::ready(Ok(sent("notification-id")))));
    template_email
        .expect_send_contact_acknowledgement()
        .times(2)
        .returning(|_, _| Box::pin(std::future::ready(Ok(sent("acknowledgement-id")))));

    let sut = make_sut(template_email);

    // Act
    let first = sut.submit(contact("Ann", SUBMITTER_EMAIL, "Hi")).await;
    let second = sut.submit(contact("Ann", SUBMITTER_EMAIL, "Hi")).await;

    // Assert
    assert_eq!(first.unwrap(), delivery_id("notification-id"));
    assert_eq!(second.unwrap(), delivery_id("notification-id"));
}
