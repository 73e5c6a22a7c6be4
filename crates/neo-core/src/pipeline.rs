use crate::client::NeoClient;
use crate::config::DashboardConfig;
use crate::dates::DateRange;
use crate::error::{NeoError, Result};
use crate::paths;
use crate::render;
use crate::types::Datasets;
use plotters::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Composite canvas size: 10 x 15 at 100 dpi.
pub const CANVAS_SIZE: (u32, u32) = (1000, 1500);

pub const PANEL_COUNT: usize = 3;

// ---------------------------------------------------------------------------
// Artifact
// ---------------------------------------------------------------------------

/// A composite plot written to disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifact {
    pub path: PathBuf,
    pub file_name: String,
    /// Path the server exposes the file under.
    pub url: String,
    pub start_date: String,
    pub end_date: String,
}

impl Artifact {
    fn new(plot_dir: &Path, range: &DateRange) -> Self {
        Self {
            path: paths::plot_path(plot_dir, range),
            file_name: range.plot_file_name(),
            url: paths::plot_url(range),
            start_date: range.start_param(),
            end_date: range.end_param(),
        }
    }
}

// ---------------------------------------------------------------------------
// RenderContext
// ---------------------------------------------------------------------------

/// Drawing surface owned by a single request.
///
/// The canvas is staged in a private temp file next to its destination, so
/// concurrent requests never share pixels and a failed render never leaves a
/// partial artifact behind: dropping the context deletes the staging file.
pub struct RenderContext {
    staging: NamedTempFile,
    size: (u32, u32),
}

impl RenderContext {
    pub fn new(plot_dir: &Path) -> Result<Self> {
        Self::with_size(plot_dir, CANVAS_SIZE)
    }

    pub fn with_size(plot_dir: &Path, size: (u32, u32)) -> Result<Self> {
        crate::io::ensure_dir(plot_dir)?;
        let staging = tempfile::Builder::new()
            .prefix(".plot-")
            .suffix(".png")
            .tempfile_in(plot_dir)?;
        Ok(Self { staging, size })
    }

    /// Draw the three panels, top to bottom.
    pub fn draw(&self, datasets: &Datasets) -> Result<()> {
        let root = BitMapBackend::new(self.staging.path(), self.size).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let panels = root.split_evenly((PANEL_COUNT, 1));
        render::render_miss_distance(&panels[0], &datasets.miss_distances)?;
        render::render_velocity(&panels[1], &datasets.velocities)?;
        render::render_diameter_range(&panels[2], datasets.diameter.as_ref())?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    /// Move the finished canvas to `target`, replacing any existing file.
    pub fn persist(self, target: &Path) -> Result<()> {
        self.staging.persist(target).map_err(|e| e.error)?;
        Ok(())
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> NeoError {
    NeoError::Render(e.to_string())
}

/// Render `datasets` into `plot_dir/plot_{start}_to_{end}.png`.
///
/// Blocking; call from a worker thread inside async code.
pub fn compose(datasets: &Datasets, plot_dir: &Path, range: &DateRange) -> Result<Artifact> {
    let artifact = Artifact::new(plot_dir, range);
    let ctx = RenderContext::new(plot_dir)?;
    ctx.draw(datasets)?;
    ctx.persist(&artifact.path)?;

    tracing::info!(
        path = %artifact.path.display(),
        miss_distances = datasets.miss_distances.len(),
        velocities = datasets.velocities.len(),
        diameter = datasets.diameter.is_some(),
        "plot written"
    );
    Ok(artifact)
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Fetch-and-render orchestrator.
#[derive(Debug, Clone)]
pub struct Pipeline {
    client: NeoClient,
    plot_dir: PathBuf,
    max_span_days: u32,
}

impl Pipeline {
    pub fn new(client: NeoClient, plot_dir: impl Into<PathBuf>, max_span_days: u32) -> Self {
        Self {
            client,
            plot_dir: plot_dir.into(),
            max_span_days,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let client = NeoClient::new(&config.upstream)?;
        Ok(Self::new(
            client,
            config.plot_dir.clone(),
            config.max_span_days,
        ))
    }

    pub fn plot_dir(&self) -> &Path {
        &self.plot_dir
    }

    pub fn client(&self) -> &NeoClient {
        &self.client
    }

    /// Validate raw date input against this pipeline's span limit.
    pub fn date_range(&self, start: &str, end: &str) -> Result<DateRange> {
        DateRange::parse(start, end)?.within(self.max_span_days)
    }

    /// Fetch the three datasets and write the composite plot.
    pub async fn render_all(&self, range: &DateRange) -> Result<Artifact> {
        let datasets = self.client.fetch_all(range).await?;

        let plot_dir = self.plot_dir.clone();
        let range = *range;
        tokio::task::spawn_blocking(move || compose(&datasets, &plot_dir, &range))
            .await
            .map_err(|e| NeoError::Render(format!("render task failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;
    use crate::types::{DiameterEstimate, MissDistanceSample, VelocitySample};
    use mockito::Matcher;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn range() -> DateRange {
        DateRange::parse("2024-01-01", "2024-01-07").unwrap()
    }

    fn pipeline_for(base_url: &str, plot_dir: &Path) -> Pipeline {
        let client = NeoClient::new(&UpstreamConfig {
            base_url: base_url.to_string(),
            timeout_secs: Some(5),
        })
        .unwrap();
        Pipeline::new(client, plot_dir, 7)
    }

    fn assert_png(path: &Path) {
        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(PNG_MAGIC), "not a PNG: {}", path.display());
    }

    fn leftover_staging_files(dir: &Path) -> usize {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".plot-"))
            .count()
    }

    #[test]
    fn compose_writes_png_named_after_range() {
        let dir = tempfile::TempDir::new().unwrap();
        let plots = dir.path().join("plots");
        let datasets = Datasets {
            miss_distances: vec![MissDistanceSample {
                name: "A".into(),
                distance: 2e7,
            }],
            velocities: vec![VelocitySample {
                name: "A".into(),
                velocity: 10.0,
            }],
            diameter: Some(DiameterEstimate {
                estimated_diameter_min: 0.01,
                estimated_diameter_max: 0.05,
            }),
        };

        let artifact = compose(&datasets, &plots, &range()).unwrap();

        assert_eq!(artifact.path, plots.join("plot_2024-01-01_to_2024-01-07.png"));
        assert_eq!(artifact.url, "/plots/plot_2024-01-01_to_2024-01-07.png");
        assert_png(&artifact.path);
        assert_eq!(leftover_staging_files(&plots), 0);
    }

    #[test]
    fn compose_with_empty_datasets_still_writes_artifact() {
        let dir = tempfile::TempDir::new().unwrap();
        let artifact = compose(&Datasets::default(), dir.path(), &range()).unwrap();
        assert_png(&artifact.path);
    }

    #[test]
    fn compose_twice_overwrites_same_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let first = compose(&Datasets::default(), dir.path(), &range()).unwrap();
        let second = compose(&Datasets::default(), dir.path(), &range()).unwrap();
        assert_eq!(first.path, second.path);
        assert_png(&second.path);
        assert_eq!(leftover_staging_files(dir.path()), 0);
    }

    #[test]
    fn dropped_context_leaves_nothing_behind() {
        let dir = tempfile::TempDir::new().unwrap();
        {
            let _ctx = RenderContext::new(dir.path()).unwrap();
            assert_eq!(leftover_staging_files(dir.path()), 1);
        }
        assert_eq!(leftover_staging_files(dir.path()), 0);
    }

    #[test]
    fn date_range_applies_span_limit() {
        let dir = tempfile::TempDir::new().unwrap();
        let pipeline = pipeline_for("http://localhost:8080/", dir.path());
        assert!(pipeline.date_range("2024-01-01", "2024-01-07").is_ok());
        let err = pipeline.date_range("2024-01-01", "2024-02-01").unwrap_err();
        assert!(matches!(err, NeoError::SpanTooLong { .. }));
    }

    #[tokio::test]
    async fn render_all_end_to_end() {
        let mut server = mockito::Server::new_async().await;
        let query = Matcher::AllOf(vec![
            Matcher::UrlEncoded("start_date".into(), "2024-01-01".into()),
            Matcher::UrlEncoded("end_date".into(), "2024-01-07".into()),
        ]);
        let miss = server
            .mock("GET", "/listMissDistanceJson")
            .match_query(query.clone())
            .with_status(200)
            .with_body(r#"[{"name":"A","distance":2e7},{"name":"B","distance":1e7}]"#)
            .create_async()
            .await;
        let velocity = server
            .mock("GET", "/listRelativeVelocityJson")
            .match_query(query.clone())
            .with_status(200)
            .with_body(r#"[{"name":"A","velocity":15.2}]"#)
            .create_async()
            .await;
        let diameter = server
            .mock("GET", "/listMaxMinDiameterJson")
            .match_query(query)
            .with_status(200)
            .with_body(r#"{"estimated_diameter_min":0.01,"estimated_diameter_max":0.05}"#)
            .create_async()
            .await;

        let dir = tempfile::TempDir::new().unwrap();
        let plots = dir.path().join("plots");
        let pipeline = pipeline_for(&server.url(), &plots);
        let artifact = pipeline.render_all(&range()).await.unwrap();

        miss.assert_async().await;
        velocity.assert_async().await;
        diameter.assert_async().await;
        assert_eq!(artifact.path, plots.join("plot_2024-01-01_to_2024-01-07.png"));
        assert_png(&artifact.path);
    }

    #[tokio::test]
    async fn render_all_survives_upstream_500s() {
        let mut server = mockito::Server::new_async().await;
        let mut mocks = Vec::new();
        for endpoint in crate::types::Endpoint::all() {
            let mock = server
                .mock("GET", format!("/{endpoint}").as_str())
                .match_query(Matcher::Any)
                .with_status(500)
                .create_async()
                .await;
            mocks.push(mock);
        }

        let dir = tempfile::TempDir::new().unwrap();
        let pipeline = pipeline_for(&server.url(), dir.path());
        let artifact = pipeline.render_all(&range()).await.unwrap();
        assert_png(&artifact.path);
    }

    #[tokio::test]
    async fn render_all_aborts_on_decode_error_without_artifact() {
        let mut server = mockito::Server::new_async().await;
        let _upstream = server
            .mock("GET", Matcher::Any)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let dir = tempfile::TempDir::new().unwrap();
        let pipeline = pipeline_for(&server.url(), dir.path());
        let err = pipeline.render_all(&range()).await.unwrap_err();
        assert!(err.is_upstream_error());
        assert!(!dir.path().join("plot_2024-01-01_to_2024-01-07.png").exists());
    }
}
