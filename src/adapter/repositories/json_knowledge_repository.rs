//! JSON Knowledge Repository Implementation
//!
//! KnowledgeRepositoryのJSON実装（ナレッジベースをJSONファイルで永続化）

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::domain::entities::issue::{IssueCatalog, IssuePattern};
use crate::domain::repositories::knowledge_repository::KnowledgeRepository;

/// JSONファイルベースのナレッジリポジトリ
pub struct JsonKnowledgeRepository {
    path: PathBuf,
}

/// 問題パターン（JSON永続化用の内部表現）
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
struct IssueJson {
    pattern: String,
    solution: String,
    occurrences: u64,
    category: String,
}

/// 問題名 → 問題パターン
type KnowledgeJson = BTreeMap<String, IssueJson>;

impl JsonKnowledgeRepository {
    /// 新しいリポジトリを作成
    ///
    /// # Arguments
    ///
    /// * `path` - ナレッジベースファイルのパス
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// ファイルから読み込む
    fn load_sync(path: &Path) -> Result<Option<KnowledgeJson>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).context("Failed to read knowledge base file")?;

        let json: KnowledgeJson =
            serde_json::from_str(&content).context("Failed to parse knowledge base JSON")?;

        info!("Loaded knowledge base: {} issues", json.len());

        Ok(Some(json))
    }

    /// ファイルに保存する
    ///
    /// 同じディレクトリの一時ファイルに書いてから置き換える
    fn save_sync(path: &Path, json: &KnowledgeJson) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        fs::create_dir_all(&parent).context("Failed to create knowledge base directory")?;

        let content =
            serde_json::to_string_pretty(json).context("Failed to serialize knowledge base")?;

        let mut temp = NamedTempFile::new_in(&parent)
            .context("Failed to create temporary knowledge base file")?;
        temp.write_all(content.as_bytes())
            .context("Failed to write knowledge base file")?;
        temp.persist(path)
            .map_err(|e| e.error)
            .context("Failed to replace knowledge base file")?;

        info!("Saved knowledge base: {} issues", json.len());

        Ok(())
    }

    /// JSON形式からDomain形式に変換
    fn to_domain(json: KnowledgeJson) -> IssueCatalog {
        let mut catalog = IssueCatalog::new();
        for (name, issue) in json {
            catalog.insert(IssuePattern {
                name,
                pattern: issue.pattern,
                solution_text: issue.solution,
                category: issue.category,
                occurrence_count: issue.occurrences,
            });
        }
        catalog
    }

    /// Domain形式からJSON形式に変換
    fn from_domain(catalog: &IssueCatalog) -> KnowledgeJson {
        catalog
            .iter()
            .map(|issue| {
                (
                    issue.name.clone(),
                    IssueJson {
                        pattern: issue.pattern.clone(),
                        solution: issue.solution_text.clone(),
                        occurrences: issue.occurrence_count,
                        category: issue.category.clone(),
                    },
                )
            })
            .collect()
    }
}

impl KnowledgeRepository for JsonKnowledgeRepository {
    fn load(&self) -> Result<Option<IssueCatalog>> {
        Ok(Self::load_sync(&self.path)?.map(Self::to_domain))
    }

    fn save(&self, catalog: &IssueCatalog) -> Result<()> {
        Self::save_sync(&self.path, &Self::from_domain(catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_nonexistent_file() {
        let repo = JsonKnowledgeRepository::new("/nonexistent/path/knowledge-base.json");

        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn test_load_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        let json = r#"{
            "Disk Space": {
                "Pattern": "disk (full|insufficient)",
                "Solution": "Free up space",
                "Occurrences": 7,
                "Category": "Storage"
            }
        }"#;
        file.write_all(json.as_bytes()).unwrap();

        let catalog = JsonKnowledgeRepository::new(file.path()).load().unwrap().unwrap();

        let issue = catalog.get("Disk Space").unwrap();
        assert_eq!(issue.pattern, "disk (full|insufficient)");
        assert_eq!(issue.solution_text, "Free up space");
        assert_eq!(issue.occurrence_count, 7);
        assert_eq!(issue.category, "Storage");
    }

    #[test]
    fn test_load_corrupt_file_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ \"Disk Space\": { \"Pattern\": ").unwrap();

        assert!(JsonKnowledgeRepository::new(file.path()).load().is_err());
    }

    #[test]
    fn test_save_writes_expected_shape() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("knowledge-base.json");
        let repo = JsonKnowledgeRepository::new(&path);

        repo.save(&IssueCatalog::seeded()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 5);
        assert_eq!(value["Disk Space"]["Occurrences"], 0);
        assert_eq!(value["Disk Space"]["Category"], "Storage");
        assert!(value["Disk Space"]["Pattern"].is_string());
        assert!(value["Disk Space"]["Solution"].is_string());
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("knowledge-base.json");
        let repo = JsonKnowledgeRepository::new(&path);
        let mut catalog = IssueCatalog::seeded();
        catalog.increment("Missing File");
        catalog.insert(IssuePattern::new("Custom \"quoted\"", r"\d+ retries", "Wait", "Misc"));

        repo.save(&catalog).unwrap();
        let first = repo.load().unwrap().unwrap();
        repo.save(&first).unwrap();
        let second = repo.load().unwrap().unwrap();

        assert_eq!(first, catalog);
        assert_eq!(second, first);
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("knowledge-base.json");
        let repo = JsonKnowledgeRepository::new(&path);

        repo.save(&IssueCatalog::seeded()).unwrap();
        repo.save(&IssueCatalog::seeded()).unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(names.len(), 1);
    }
}
