use crate::page::IndexPage;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use neo_core::NeoError;

/// Date fields as the user submitted them, echoed back into the error page.
#[derive(Debug, Clone, Default)]
pub struct SubmittedDates {
    pub start_date: String,
    pub end_date: String,
}

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
///
/// Rendered as the form page with the error message, so the user can fix
/// the input and resubmit.
#[derive(Debug)]
pub struct AppError {
    pub error: anyhow::Error,
    pub submitted: Option<SubmittedDates>,
}

impl AppError {
    /// Attach the submitted form values so they survive the round trip.
    pub fn with_submitted(mut self, submitted: SubmittedDates) -> Self {
        self.submitted = Some(submitted);
        self
    }

    pub fn status(&self) -> StatusCode {
        match self.error.downcast_ref::<NeoError>() {
            Some(e) if e.is_input_error() => StatusCode::BAD_REQUEST,
            Some(e) if e.is_upstream_error() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self.error.downcast_ref::<NeoError>() {
            Some(e) => e.to_string(),
            None => format!("{:#}", self.error),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "request failed: {message}");
        } else {
            tracing::warn!(status = status.as_u16(), "rejected request: {message}");
        }

        let submitted = self.submitted.unwrap_or_default();
        let body = IndexPage {
            start_date: &submitted.start_date,
            end_date: &submitted.end_date,
            plot_url: None,
            error: Some(&message),
        }
        .render();
        (status, Html(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            error: err.into(),
            submitted: None,
        }
    }
}
