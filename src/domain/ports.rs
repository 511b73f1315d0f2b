use crate::domain::model::{PlayerReport, PlayerSnapshot, PlaytimeUnit};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait StatsStore: Send + Sync {
    /// Identifiers derived from the regular files in the stats directory.
    fn list_identifiers(&self) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
    fn read_snapshot(&self, uuid: &str)
        -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_report(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn lookup_endpoint(&self) -> &str;
    fn stats_dir(&self) -> &str;
    /// `None` means the report goes to stdout.
    fn output_file(&self) -> Option<&str>;
    fn playtime_unit(&self) -> PlaytimeUnit;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<PlayerSnapshot>>;
    async fn transform(&self, data: Vec<PlayerSnapshot>) -> Result<Vec<PlayerReport>>;
    async fn load(&self, reports: Vec<PlayerReport>) -> Result<String>;
}
