use std::future::Future;

use folio_models::{
    form::{FormSubmission, FormValidationError},
    DeliveryId,
};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait FormFeatureService: Send + Sync + 'static {
    /// Validate a submission, notify the site owner and acknowledge it to the
    /// submitter.
    ///
    /// Returns the provider id of the owner notification. A failed
    /// acknowledgement does not fail the submission.
    fn submit(
        &self,
        submission: FormSubmission,
    ) -> impl Future<Output = Result<DeliveryId, FormSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum FormSubmitError {
    #[error(transparent)]
    Validation(#[from] FormValidationError),
    #[error("Email delivery is not configured.")]
    Configuration,
    #[error("Failed to send the notification email.")]
    NotificationFailed,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockFormFeatureService {
    pub fn with_submit(
        mut self,
        submission: FormSubmission,
        result: Result<DeliveryId, FormSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
