use crate::core::Pipeline;
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    #[cfg(feature = "cli")]
    monitor: Option<SystemMonitor>,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            #[cfg(feature = "cli")]
            monitor: None,
        }
    }

    #[cfg(feature = "cli")]
    pub fn new_with_monitoring(pipeline: P, enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: Some(SystemMonitor::new(enabled)),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting stats aggregation...");

        let snapshots = self.pipeline.extract().await?;
        tracing::info!("Extracted {} player snapshots", snapshots.len());

        let reports = self.pipeline.transform(snapshots).await?;
        tracing::info!("Transformed {} records", reports.len());

        let sink = self.pipeline.load(reports).await?;
        tracing::info!("Report delivered to: {}", sink);

        #[cfg(feature = "cli")]
        if let Some(stats) = self.monitor.as_ref().and_then(|m| m.get_stats()) {
            tracing::info!(
                "Resources: {} MB peak memory, {:.2}s elapsed",
                stats.peak_memory_mb,
                stats.elapsed_time.as_secs_f64()
            );
        }

        Ok(sink)
    }
}
