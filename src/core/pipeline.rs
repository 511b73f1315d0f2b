use crate::core::{
    ConfigProvider, Pipeline, PlayerReport, PlayerSnapshot, Playtime, PlaytimeUnit, StatsStore,
};
use crate::domain::model::{ticks_to_hours, ProfileLookupResponse, StatsDocument, DEFAULT_USERNAME};
use crate::utils::error::{Result, StatsError};
use reqwest::Client;
use serde::Serialize;

pub struct StatsPipeline<S: StatsStore, C: ConfigProvider> {
    store: S,
    config: C,
    client: Client,
}

impl<S: StatsStore, C: ConfigProvider> StatsPipeline<S, C> {
    pub fn new(store: S, config: C) -> Self {
        Self {
            store,
            config,
            client: Client::new(),
        }
    }

    /// One GET per identifier. Any failure falls back to the default
    /// username; the batch never stops here.
    async fn resolve_username(&self, uuid: &str) -> String {
        let url = format!(
            "{}/{}",
            self.config.lookup_endpoint().trim_end_matches('/'),
            uuid
        );
        tracing::debug!("Looking up username at: {}", url);

        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<ProfileLookupResponse>().await {
                    Ok(profile) => profile.name,
                    Err(e) => {
                        tracing::warn!("Malformed lookup body for {}: {}", uuid, e);
                        DEFAULT_USERNAME.to_string()
                    }
                }
            }
            Ok(response) => {
                tracing::warn!("Lookup for {} failed: {}", uuid, response.status().as_u16());
                DEFAULT_USERNAME.to_string()
            }
            Err(e) => {
                tracing::warn!("Lookup request for {} failed: {}", uuid, e);
                DEFAULT_USERNAME.to_string()
            }
        }
    }

    /// A missing or malformed snapshot yields `None` so the record still gets
    /// emitted with default counters.
    async fn read_document(&self, uuid: &str) -> Option<StatsDocument> {
        let bytes = match self.store.read_snapshot(uuid).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Cannot read snapshot for {}: {}", uuid, e);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::warn!("Malformed snapshot for {}: {}", uuid, e);
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl<S: StatsStore, C: ConfigProvider> Pipeline for StatsPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<PlayerSnapshot>> {
        let uuids = self.store.list_identifiers().await?;
        tracing::debug!(
            "Found {} snapshot files in {}",
            uuids.len(),
            self.config.stats_dir()
        );

        let mut snapshots = Vec::with_capacity(uuids.len());
        for uuid in uuids {
            let username = self.resolve_username(&uuid).await;
            let document = self.read_document(&uuid).await;
            snapshots.push(PlayerSnapshot {
                uuid,
                username,
                document,
            });
        }

        Ok(snapshots)
    }

    async fn transform(&self, data: Vec<PlayerSnapshot>) -> Result<Vec<PlayerReport>> {
        let unit = self.config.playtime_unit();
        let mut reports = Vec::with_capacity(data.len());

        for snapshot in data {
            let (total_deaths, ticks) = snapshot
                .document
                .as_ref()
                .map(StatsDocument::counters)
                .unwrap_or((0, 0));

            let total_playtime = match unit {
                PlaytimeUnit::Ticks => Playtime::Ticks(ticks),
                PlaytimeUnit::Hours => Playtime::Hours(ticks_to_hours(ticks)),
            };

            reports.push(PlayerReport {
                username: snapshot.username,
                total_deaths,
                total_playtime,
            });
        }

        Ok(reports)
    }

    async fn load(&self, reports: Vec<PlayerReport>) -> Result<String> {
        let json = to_indented_json(&reports)?;

        match self.config.output_file() {
            Some(path) => {
                tracing::debug!("Writing report ({} bytes) to {}", json.len(), path);
                self.store.write_report(path, json.as_bytes()).await?;
                Ok(path.to_string())
            }
            None => {
                println!("{}", json);
                Ok("stdout".to_string())
            }
        }
    }
}

// Report files are 4-space indented; serde_json defaults to 2.
fn to_indented_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| StatsError::ProcessingError {
        message: format!("Report is not valid UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CustomStats, StatsSection};
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStore {
        snapshots: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
        reports: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                snapshots: Arc::new(Mutex::new(Vec::new())),
                reports: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn add_snapshot(&self, uuid: &str, bytes: &[u8]) {
            let mut snapshots = self.snapshots.lock().await;
            snapshots.push((uuid.to_string(), bytes.to_vec()));
        }

        async fn get_report(&self, path: &str) -> Option<Vec<u8>> {
            let reports = self.reports.lock().await;
            reports.get(path).cloned()
        }
    }

    impl StatsStore for MockStore {
        async fn list_identifiers(&self) -> Result<Vec<String>> {
            let snapshots = self.snapshots.lock().await;
            Ok(snapshots.iter().map(|(uuid, _)| uuid.clone()).collect())
        }

        async fn read_snapshot(&self, uuid: &str) -> Result<Vec<u8>> {
            let snapshots = self.snapshots.lock().await;
            snapshots
                .iter()
                .find(|(id, _)| id == uuid)
                .map(|(_, bytes)| bytes.clone())
                .ok_or_else(|| {
                    StatsError::IoError(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("Snapshot not found: {}", uuid),
                    ))
                })
        }

        async fn write_report(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut reports = self.reports.lock().await;
            reports.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        lookup_endpoint: String,
        output: Option<String>,
        playtime_unit: PlaytimeUnit,
    }

    impl MockConfig {
        fn new(lookup_endpoint: String) -> Self {
            Self {
                lookup_endpoint,
                output: None,
                playtime_unit: PlaytimeUnit::Hours,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn lookup_endpoint(&self) -> &str {
            &self.lookup_endpoint
        }

        fn stats_dir(&self) -> &str {
            "test_raw"
        }

        fn output_file(&self) -> Option<&str> {
            self.output.as_deref()
        }

        fn playtime_unit(&self) -> PlaytimeUnit {
            self.playtime_unit
        }
    }

    fn document(deaths: u64, play_time: u64) -> StatsDocument {
        StatsDocument {
            stats: Some(StatsSection {
                custom: Some(CustomStats {
                    play_time: Some(play_time),
                    deaths: Some(deaths),
                }),
            }),
        }
    }

    fn snapshot(uuid: &str, username: &str, document: Option<StatsDocument>) -> PlayerSnapshot {
        PlayerSnapshot {
            uuid: uuid.to_string(),
            username: username.to_string(),
            document,
        }
    }

    #[tokio::test]
    async fn test_extract_resolves_username() {
        let server = MockServer::start();
        let lookup_mock = server.mock(|when, then| {
            when.method(GET).path("/abc123");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"name": "Steve", "id": "abc123"}));
        });

        let store = MockStore::new();
        store
            .add_snapshot(
                "abc123",
                br#"{"stats":{"minecraft:custom":{"minecraft:deaths":5,"minecraft:play_time":36000}}}"#,
            )
            .await;

        let config = MockConfig::new(server.url(""));
        let pipeline = StatsPipeline::new(store, config);

        let snapshots = pipeline.extract().await.unwrap();

        lookup_mock.assert();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].uuid, "abc123");
        assert_eq!(snapshots[0].username, "Steve");
        assert_eq!(snapshots[0].document.as_ref().unwrap().counters(), (5, 36000));
    }

    #[tokio::test]
    async fn test_extract_falls_back_on_404() {
        let server = MockServer::start();
        let lookup_mock = server.mock(|when, then| {
            when.method(GET).path("/ghost");
            then.status(404);
        });

        let store = MockStore::new();
        store.add_snapshot("ghost", b"{}").await;

        let config = MockConfig::new(server.url(""));
        let pipeline = StatsPipeline::new(store, config);

        let snapshots = pipeline.extract().await.unwrap();

        lookup_mock.assert();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].username, "Herobrine");
    }

    #[tokio::test]
    async fn test_extract_falls_back_on_malformed_lookup_body() {
        let server = MockServer::start();
        let lookup_mock = server.mock(|when, then| {
            when.method(GET).path("/abc123");
            then.status(200).body("not json at all");
        });

        let store = MockStore::new();
        store.add_snapshot("abc123", b"{}").await;

        let config = MockConfig::new(server.url(""));
        let pipeline = StatsPipeline::new(store, config);

        let snapshots = pipeline.extract().await.unwrap();

        lookup_mock.assert();
        assert_eq!(snapshots[0].username, "Herobrine");
    }

    #[tokio::test]
    async fn test_extract_keeps_going_on_malformed_snapshot() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"name": "Alex"}));
        });

        let store = MockStore::new();
        store.add_snapshot("broken", b"{ this is not json").await;

        let config = MockConfig::new(server.url(""));
        let pipeline = StatsPipeline::new(store, config);

        let snapshots = pipeline.extract().await.unwrap();

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].username, "Alex");
        assert!(snapshots[0].document.is_none());
    }

    #[tokio::test]
    async fn test_transform_converts_ticks_to_hours() {
        let store = MockStore::new();
        let config = MockConfig::new("http://test.invalid".to_string());
        let pipeline = StatsPipeline::new(store, config);

        let input = vec![
            snapshot("a", "Steve", Some(document(3, 72000))),
            snapshot("b", "Alex", Some(document(0, 36000))),
        ];

        let reports = pipeline.transform(input).await.unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].total_deaths, 3);
        assert_eq!(reports[0].total_playtime, Playtime::Hours(1.0));
        assert_eq!(reports[1].total_playtime, Playtime::Hours(0.5));
    }

    #[tokio::test]
    async fn test_transform_retains_raw_ticks() {
        let store = MockStore::new();
        let mut config = MockConfig::new("http://test.invalid".to_string());
        config.playtime_unit = PlaytimeUnit::Ticks;
        let pipeline = StatsPipeline::new(store, config);

        let input = vec![snapshot("a", "Steve", Some(document(5, 36000)))];

        let reports = pipeline.transform(input).await.unwrap();

        assert_eq!(reports[0].total_playtime, Playtime::Ticks(36000));
    }

    #[tokio::test]
    async fn test_transform_defaults_without_stats() {
        let store = MockStore::new();
        let config = MockConfig::new("http://test.invalid".to_string());
        let pipeline = StatsPipeline::new(store, config);

        let input = vec![
            snapshot("a", "Steve", Some(StatsDocument::default())),
            snapshot("b", "Herobrine", None),
        ];

        let reports = pipeline.transform(input).await.unwrap();

        for report in &reports {
            assert_eq!(report.total_deaths, 0);
            assert_eq!(report.total_playtime, Playtime::Hours(0.0));
        }
    }

    #[tokio::test]
    async fn test_transform_emits_one_record_per_snapshot() {
        let store = MockStore::new();
        let config = MockConfig::new("http://test.invalid".to_string());
        let pipeline = StatsPipeline::new(store, config);

        let input = vec![
            snapshot("a", "Steve", Some(document(1, 100))),
            snapshot("b", "Herobrine", None),
            snapshot("c", "Alex", Some(StatsDocument::default())),
        ];

        let reports = pipeline.transform(input).await.unwrap();

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].username, "Steve");
        assert_eq!(reports[1].username, "Herobrine");
        assert_eq!(reports[2].username, "Alex");
    }

    #[tokio::test]
    async fn test_load_writes_indented_report_file() {
        let store = MockStore::new();
        let mut config = MockConfig::new("http://test.invalid".to_string());
        config.output = Some("report.json".to_string());
        let pipeline = StatsPipeline::new(store.clone(), config);

        let reports = vec![PlayerReport {
            username: "Steve".to_string(),
            total_deaths: 5,
            total_playtime: Playtime::Hours(0.5),
        }];

        let sink = pipeline.load(reports).await.unwrap();
        assert_eq!(sink, "report.json");

        let written = store.get_report("report.json").await.unwrap();
        let text = String::from_utf8(written).unwrap();

        assert!(text.starts_with("[\n    {\n"));
        assert!(text.contains("        \"username\": \"Steve\""));
        assert!(text.contains("\"total_playtime\": 0.5"));
    }

    #[tokio::test]
    async fn test_load_without_output_prints_to_stdout() {
        let store = MockStore::new();
        let config = MockConfig::new("http://test.invalid".to_string());
        let pipeline = StatsPipeline::new(store.clone(), config);

        let sink = pipeline.load(Vec::new()).await.unwrap();

        assert_eq!(sink, "stdout");
        assert!(store.get_report("report.json").await.is_none());
    }
}
