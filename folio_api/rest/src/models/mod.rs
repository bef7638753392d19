use serde::Serialize;

pub mod forms;

#[derive(Serialize)]
pub struct ApiError {
    pub error: &'static str,
}
