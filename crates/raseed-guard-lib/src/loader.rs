use crate::data_structures::{BalanceLog, Plan};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// File import for the host: balance logs as JSONL, plans as single JSON
/// documents. Durable storage proper is the host's concern, not ours.
pub struct DataLoader;

impl DataLoader {
    pub fn new() -> Self {
        Self
    }

    /// Reads one balance log per line. Blank lines and lines that are not
    /// balance readings are skipped.
    pub fn load_logs_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<BalanceLog>> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;

        let reader = BufReader::new(file);
        let mut logs = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<BalanceLog>(&line) {
                Ok(log) => logs.push(log),
                Err(_) => {
                    // Silently skip lines that don't contain balance readings
                    continue;
                }
            }
        }

        Ok(logs)
    }

    /// Recursively loads every `.jsonl` file under a directory. Files that
    /// fail to load are reported to stderr and skipped.
    pub fn load_logs_from_directory<P: AsRef<Path>>(&self, dir_path: P) -> Result<Vec<BalanceLog>> {
        let mut all_logs = Vec::new();
        self.load_from_directory_recursive(dir_path.as_ref(), &mut all_logs)?;
        all_logs.sort_by_key(|log| log.logged_at());
        Ok(all_logs)
    }

    fn load_from_directory_recursive(
        &self,
        dir_path: &Path,
        logs: &mut Vec<BalanceLog>,
    ) -> Result<()> {
        let dir = std::fs::read_dir(dir_path)
            .with_context(|| format!("Failed to read directory: {}", dir_path.display()))?;

        for entry in dir {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(extension) = path.extension() {
                    if extension == "jsonl" {
                        match self.load_logs_from_file(&path) {
                            Ok(mut file_logs) => logs.append(&mut file_logs),
                            Err(e) => {
                                eprintln!("Warning: Failed to load file {}: {}", path.display(), e);
                            }
                        }
                    }
                }
            } else if path.is_dir() {
                if let Err(e) = self.load_from_directory_recursive(&path, logs) {
                    eprintln!(
                        "Warning: Failed to load from directory {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }

        Ok(())
    }

    pub fn load_plan_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Plan> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse plan file: {}", path.as_ref().display()))
    }
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_logs_from_file() {
        let loader = DataLoader::new();
        let mut temp_file = NamedTempFile::new().unwrap();

        let content = r#"{"plan_id": "plan-1", "logged_at": "2024-01-01T12:00:00Z", "remaining_amount": 3000.0}
{"plan_id": "plan-1", "logged_at": "2024-01-02T12:00:00Z", "remaining_amount": 2900.0}"#;
        temp_file.write_all(content.as_bytes()).unwrap();

        let logs = loader.load_logs_from_file(temp_file.path()).unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].remaining_amount(), 3000.0);
        assert_eq!(logs[1].remaining_amount(), 2900.0);
    }

    #[test]
    fn test_load_logs_skips_blank_and_foreign_lines() {
        let loader = DataLoader::new();
        let mut temp_file = NamedTempFile::new().unwrap();

        let content = r#"{"plan_id": "plan-1", "logged_at": "2024-01-01T12:00:00Z", "remaining_amount": 3000.0}

{"note": "not a balance reading"}
{"plan_id": "plan-1", "logged_at": "2024-01-02T12:00:00Z", "remaining_amount": 2900.0}"#;
        temp_file.write_all(content.as_bytes()).unwrap();

        let logs = loader.load_logs_from_file(temp_file.path()).unwrap();
        assert_eq!(logs.len(), 2);
    }

    #[test]
    fn test_load_logs_missing_file_fails() {
        let loader = DataLoader::new();
        assert!(loader.load_logs_from_file("/no/such/file.jsonl").is_err());
    }

    #[test]
    fn test_load_logs_from_directory_recurses_and_sorts() {
        let loader = DataLoader::new();
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("older");
        std::fs::create_dir(&nested).unwrap();

        std::fs::write(
            dir.path().join("recent.jsonl"),
            r#"{"plan_id": "plan-1", "logged_at": "2024-01-05T12:00:00Z", "remaining_amount": 2500.0}"#,
        )
        .unwrap();
        std::fs::write(
            nested.join("earlier.jsonl"),
            r#"{"plan_id": "plan-1", "logged_at": "2024-01-01T12:00:00Z", "remaining_amount": 3000.0}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("ignored.txt"), "not a log file").unwrap();

        let logs = loader.load_logs_from_directory(dir.path()).unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].remaining_amount(), 3000.0);
        assert_eq!(logs[1].remaining_amount(), 2500.0);
    }

    #[test]
    fn test_load_plan_from_file() {
        let loader = DataLoader::new();
        let mut temp_file = NamedTempFile::new().unwrap();

        let content = r#"{
            "id": "plan-1",
            "type": "INTERNET",
            "category": "MOBILE",
            "start_at": "2024-01-01T00:00:00Z",
            "end_at": "2024-01-31T00:00:00Z",
            "initial_amount": 3.0,
            "unit": "GB"
        }"#;
        temp_file.write_all(content.as_bytes()).unwrap();

        let plan = loader.load_plan_from_file(temp_file.path()).unwrap();
        assert_eq!(plan.id(), "plan-1");
        assert_eq!(plan.initial_amount(), 3.0);
    }

    #[test]
    fn test_load_plan_invalid_json_fails() {
        let loader = DataLoader::new();
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{\"id\": \"plan-1\"").unwrap();

        assert!(loader.load_plan_from_file(temp_file.path()).is_err());
    }
}
