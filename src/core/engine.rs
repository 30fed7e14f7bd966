use crate::app::export::{build_artifacts, ExportSettings};
use crate::app::render::{render_report, RenderContext};
use crate::core::estimator::GainEstimator;
use crate::core::Storage;
use crate::domain::model::{Assessment, GainResult};
use crate::utils::error::Result;
use chrono::Utc;

#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub result: GainResult,
    pub rendered: String,
    pub saved: Vec<String>,
}

/// 估算 → 呈現 → 匯出 → 儲存
pub struct ReportEngine<S: Storage> {
    storage: S,
    estimator: GainEstimator,
    context: RenderContext,
    export: ExportSettings,
}

impl<S: Storage> ReportEngine<S> {
    pub fn new(
        storage: S,
        estimator: GainEstimator,
        context: RenderContext,
        export: ExportSettings,
    ) -> Self {
        Self {
            storage,
            estimator,
            context,
            export,
        }
    }

    pub async fn run(&self, assessment: &Assessment) -> Result<ReportOutcome> {
        let factor = assessment.factor();
        tracing::info!("Estimating {} gain", factor);

        // Estimate; everything downstream sees the input actually used
        let assessment = &self.estimator.prepare_assessment(assessment)?;
        let result = self.estimator.estimate(assessment)?;
        if result.capped {
            tracing::info!("{} estimate reached the model cap", factor);
        }

        // Render
        let rendered = render_report(&self.context, assessment, &result)?;

        // Export
        let artifacts = build_artifacts(
            &self.context.messages,
            &self.export,
            assessment,
            &result,
            Utc::now(),
        )?;

        // Save
        let mut saved = Vec::with_capacity(artifacts.len());
        for artifact in &artifacts {
            tracing::debug!(
                "Writing {} ({} bytes) to storage",
                artifact.file_name,
                artifact.data.len()
            );
            saved.push(self.storage.write_file(&artifact.file_name, &artifact.data).await?);
        }
        if !saved.is_empty() {
            tracing::info!("Saved {} export file(s)", saved.len());
        }

        Ok(ReportOutcome {
            result,
            rendered,
            saved,
        })
    }
}
