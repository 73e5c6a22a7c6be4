use axum::extract::State;
use axum::response::Html;
use axum::Form;

use crate::error::{AppError, SubmittedDates};
use crate::page::IndexPage;
use crate::state::AppState;

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct PlotForm {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

impl PlotForm {
    fn submitted(&self) -> SubmittedDates {
        SubmittedDates {
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

/// POST /plot: render the composite plot for the submitted range.
pub async fn create_plot(
    State(app): State<AppState>,
    Form(form): Form<PlotForm>,
) -> Result<Html<String>, AppError> {
    let range = app
        .pipeline
        .date_range(&form.start_date, &form.end_date)
        .map_err(|e| AppError::from(e).with_submitted(form.submitted()))?;

    tracing::info!(%range, "rendering plot");
    let artifact = app
        .pipeline
        .render_all(&range)
        .await
        .map_err(|e| AppError::from(e).with_submitted(form.submitted()))?;

    let body = IndexPage {
        start_date: &artifact.start_date,
        end_date: &artifact.end_date,
        plot_url: Some(&artifact.url),
        error: None,
    }
    .render();
    Ok(Html(body))
}
