use folio_email_contracts::template::{Envelope, MockTemplateEmailService};
use folio_models::{
    email_address::EmailAddress,
    form::{FormSubmission, RawFormFields},
    Delivery, DeliveryId,
};

use crate::{FormFeatureConfig, FormFeatureServiceImpl};

mod contact;

type Sut = FormFeatureServiceImpl<MockTemplateEmailService>;

const OWNER_EMAIL: &str = "owner@example.com";
const SENDER: &str = "onboarding@resend.dev";
const SUBMITTER_EMAIL: &str = "ann@x.com";

fn make_sut(template_email: MockTemplateEmailService) -> Sut {
    FormFeatureServiceImpl::new(template_email, config())
}

fn config() -> FormFeatureConfig {
    FormFeatureConfig {
        owner_email: Some(OWNER_EMAIL.parse().unwrap()),
        owner_name: "Jane Doe".into(),
        sender: SENDER.parse().unwrap(),
        contact_sender_name: "Portfolio Contact Form".into(),
        quote_sender_name: "Portfolio Quote Request".into(),
    }
}

fn email(address: &str) -> EmailAddress {
    address.parse().unwrap()
}

fn notification_envelope(sender_name: &str) -> Envelope {
    Envelope {
        from: email(SENDER).with_name(sender_name),
        to: email(OWNER_EMAIL),
        reply_to: Some(email(SUBMITTER_EMAIL)),
    }
}

fn acknowledgement_envelope() -> Envelope {
    Envelope {
        from: email(SENDER).with_name("Jane Doe"),
        to: email(SUBMITTER_EMAIL),
        reply_to: None,
    }
}

fn sent(id: &str) -> Delivery {
    Delivery::Sent(delivery_id(id))
}

fn delivery_id(id: &str) -> DeliveryId {
    DeliveryId::from(id.to_owned())
}

fn contact(name: &str, email: &str, message: &str) -> FormSubmission {
    FormSubmission::contact(RawFormFields {
        name: Some(name.into()),
        email: Some(email.into()),
        message: Some(message.into()),
        service: None,
    })
}

fn quote(name: &str, email: &str, message: &str, service: &str) -> FormSubmission {
    FormSubmission::quote(RawFormFields {
        name: Some(name.into()),
        email: Some(email.into()),
        message: Some(message.into()),
        service: Some(service.into()),
    })
}
