use nutype::nutype;
use thiserror::Error;

use crate::email_address::EmailAddress;

pub const NAME_MAX_CHARS: usize = 100;
pub const MESSAGE_MAX_CHARS: usize = 5000;
pub const SERVICE_MAX_CHARS: usize = 200;

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = NAME_MAX_CHARS),
    derive(Debug, Clone, PartialEq, Eq, Display, TryFrom, AsRef, Deref, Serialize)
)]
pub struct SubmitterName(String);

#[nutype(
    validate(not_empty, len_char_max = MESSAGE_MAX_CHARS),
    derive(Debug, Clone, PartialEq, Eq, Display, TryFrom, AsRef, Deref, Serialize)
)]
pub struct FormMessage(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = SERVICE_MAX_CHARS),
    derive(Debug, Clone, PartialEq, Eq, Display, TryFrom, AsRef, Deref, Serialize)
)]
pub struct ServiceName(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Contact,
    Quote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Message,
    Service,
}

impl FormKind {
    pub const fn required_fields(self) -> &'static [FormField] {
        match self {
            Self::Contact => &[FormField::Name, FormField::Email, FormField::Message],
            Self::Quote => &[
                FormField::Name,
                FormField::Email,
                FormField::Message,
                FormField::Service,
            ],
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Quote => "quote",
        }
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A form submission exactly as it was received.
///
/// Fields are optional because clients may omit them; absent, empty and
/// whitespace-only values are all treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFormFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub service: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub kind: FormKind,
    pub fields: RawFormFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidFormSubmission {
    Contact(ContactForm),
    Quote(QuoteForm),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: SubmitterName,
    pub email: EmailAddress,
    pub message: FormMessage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteForm {
    pub name: SubmitterName,
    pub email: EmailAddress,
    pub message: FormMessage,
    pub service: ServiceName,
}

/// Reasons a submission is rejected, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormValidationError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Field length exceeds maximum")]
    FieldTooLong,
}

impl RawFormFields {
    pub fn get(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Name => self.name.as_deref(),
            FormField::Email => self.email.as_deref(),
            FormField::Message => self.message.as_deref(),
            FormField::Service => self.service.as_deref(),
        }
    }
}

impl FormSubmission {
    pub fn contact(fields: RawFormFields) -> Self {
        Self {
            kind: FormKind::Contact,
            fields,
        }
    }

    pub fn quote(fields: RawFormFields) -> Self {
        Self {
            kind: FormKind::Quote,
            fields,
        }
    }

    pub fn missing_fields(&self) -> Vec<FormField> {
        self.kind
            .required_fields()
            .iter()
            .copied()
            .filter(|&field| self.fields.get(field).map_or(true, |v| v.trim().is_empty()))
            .collect()
    }

    /// Validates the submission, reporting the first failing category:
    /// missing fields, then email format, then field lengths.
    pub fn validate(self) -> Result<ValidFormSubmission, FormValidationError> {
        if !self.missing_fields().is_empty() {
            return Err(FormValidationError::MissingFields);
        }

        let RawFormFields {
            name,
            email,
            message,
            service,
        } = self.fields;
        let (name, email, message) = (
            name.unwrap_or_default(),
            email.unwrap_or_default(),
            message.unwrap_or_default(),
        );

        let email =
            EmailAddress::try_new(email).map_err(|_| FormValidationError::InvalidEmail)?;

        // Limits apply to the values as received, before trimming.
        let too_long = |value: &str, max: usize| value.chars().count() > max;
        if too_long(&name, NAME_MAX_CHARS)
            || too_long(&message, MESSAGE_MAX_CHARS)
            || (self.kind == FormKind::Quote
                && too_long(service.as_deref().unwrap_or_default(), SERVICE_MAX_CHARS))
        {
            return Err(FormValidationError::FieldTooLong);
        }

        let name = SubmitterName::try_new(name).map_err(|_| FormValidationError::FieldTooLong)?;
        let message =
            FormMessage::try_new(message).map_err(|_| FormValidationError::FieldTooLong)?;

        Ok(match self.kind {
            FormKind::Contact => ValidFormSubmission::Contact(ContactForm {
                name,
                email,
                message,
            }),
            FormKind::Quote => ValidFormSubmission::Quote(QuoteForm {
                name,
                email,
                message,
                service: ServiceName::try_new(service.unwrap_or_default())
                    .map_err(|_| FormValidationError::FieldTooLong)?,
            }),
        })
    }
}

impl ValidFormSubmission {
    pub fn kind(&self) -> FormKind {
        match self {
            Self::Contact(_) => FormKind::Contact,
            Self::Quote(_) => FormKind::Quote,
        }
    }

    pub fn email(&self) -> &EmailAddress {
        match self {
            Self::Contact(form) => &form.email,
            Self::Quote(form) => &form.email,
        }
    }
}
