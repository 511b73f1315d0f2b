use crate::core::StatsStore;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    stats_dir: String,
}

impl LocalStorage {
    pub fn new(stats_dir: String) -> Self {
        Self { stats_dir }
    }
}

impl StatsStore for LocalStorage {
    async fn list_identifiers(&self) -> Result<Vec<String>> {
        let mut uuids = Vec::new();
        for entry in fs::read_dir(&self.stats_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) {
                uuids.push(stem.to_string());
            }
        }
        Ok(uuids)
    }

    async fn read_snapshot(&self, uuid: &str) -> Result<Vec<u8>> {
        let path = Path::new(&self.stats_dir).join(format!("{}.json", uuid));
        Ok(fs::read(path)?)
    }

    async fn write_report(&self, path: &str, data: &[u8]) -> Result<()> {
        let path = Path::new(path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, data)?;
        Ok(())
    }
}
