//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use log::info;
use serde::Serialize;

use std::sync::Arc;

use crate::adapter::config::Config;
use crate::adapter::event_log::ExportedEventLogReader;
use crate::adapter::repositories::json_knowledge_repository::JsonKnowledgeRepository;
use crate::adapter::repositories::local_log_repository::LocalLogRepository;
use crate::application::dto::search_query::SearchQuery;
use crate::application::use_cases::analyze_issues::AnalyzeIssuesUseCase;
use crate::application::use_cases::knowledge_base::KnowledgeBase;
use crate::application::use_cases::list_logs::ListLogsUseCase;
use crate::application::use_cases::parse_logs::{ParseLogsUseCase, ParsedLog};
use crate::application::use_cases::search_logs::SearchLogsUseCase;
use crate::domain::entities::log_category::{CategoryRegistry, LogCategory, LogFileRef};
use crate::domain::entities::log_entry::LogEntry;
use crate::domain::entities::search::{EntryFilter, TimeWindow};

use super::cli::{Args, Command};

type HostLogRepository = LocalLogRepository<ExportedEventLogReader>;

/// Find a listed file by display name or full location
pub fn find_file(files: Vec<LogFileRef>, name: &str) -> Option<LogFileRef> {
    files
        .into_iter()
        .find(|f| f.display_name == name || f.location == name)
}

/// `show` のフィルタ（`since_hours` は `now` から遡る）
pub fn show_filter(
    term: Option<String>,
    since_hours: Option<i64>,
    now: NaiveDateTime,
) -> Result<EntryFilter> {
    let window = match since_hours {
        Some(hours) => Some(
            TimeWindow::last_hours(hours, now)
                .with_context(|| format!("Invalid period: {} hours", hours))?,
        ),
        None => None,
    };
    Ok(EntryFilter::new(term, window))
}

/// One-line summary of a log file
pub fn format_file_line(file: &LogFileRef) -> String {
    let modified = file
        .last_modified
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<40} {:>10}  {}  {}",
        file.display_name, file.size_or_record_count, modified, file.location
    )
}

/// One-line summary of an entry (first message line only)
pub fn format_entry_line(entry: &LogEntry) -> String {
    let first_line = entry.message.lines().next().unwrap_or("");
    format!(
        "{} [{:<5}] {}: {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.level,
        entry.source,
        first_line
    )
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Log Review Workflow
pub struct LogReviewWorkflow {
    config: Config,
    registry: CategoryRegistry,
    log_repository: Arc<HostLogRepository>,
    knowledge_repository: Arc<JsonKnowledgeRepository>,
}

impl LogReviewWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Self {
        let events = ExportedEventLogReader::new(config.event_log_dir());
        let log_repository = Arc::new(LocalLogRepository::new(events));
        let knowledge_repository = Arc::new(JsonKnowledgeRepository::new(
            config.knowledge_base_path(),
        ));

        Self {
            config,
            registry: CategoryRegistry::builtin(),
            log_repository,
            knowledge_repository,
        }
    }

    /// Execute the selected command
    pub fn execute(&self, args: Args) -> Result<()> {
        let json = args.json;

        match args.command {
            Command::Categories => self.categories(json),
            Command::List { category } => self.list(&category, json),
            Command::Show {
                category,
                file,
                term,
                since_hours,
            } => self.show(&category, &file, term, since_hours, json),
            Command::Analyze { category, file } => self.analyze(&category, &file, json),
            Command::Search { term, hours } => {
                let hours = hours.unwrap_or(self.config.default_search_hours);
                self.search(&term, hours, json)
            }
            Command::Learn {
                name,
                pattern,
                solution,
                category,
            } => self.learn(&name, &pattern, &solution, &category),
            Command::Knowledge => self.knowledge(json),
        }
    }

    fn category(&self, name: &str) -> Result<&LogCategory> {
        self.registry
            .get(name)
            .with_context(|| format!("Unknown log category: {}", name))
    }

    fn knowledge_base(&self) -> KnowledgeBase<JsonKnowledgeRepository> {
        KnowledgeBase::load(self.knowledge_repository.clone())
    }

    fn parse_file(&self, category: &LogCategory, name: &str, filter: &EntryFilter) -> Result<ParsedLog> {
        let files = ListLogsUseCase::new(self.log_repository.clone()).execute(category);
        let file = find_file(files, name)
            .with_context(|| format!("No log file '{}' in category {}", name, category.name))?;

        info!("Parsing {} ({})", file.display_name, category.name);
        Ok(ParseLogsUseCase::new(self.log_repository.clone()).execute(category, &file, filter))
    }

    fn categories(&self, json: bool) -> Result<()> {
        if json {
            let categories: Vec<_> = self.registry.iter().collect();
            return print_json(&categories);
        }

        for category in self.registry.iter() {
            println!("{:<16} {}", category.name, category.description);
        }
        Ok(())
    }

    fn list(&self, name: &str, json: bool) -> Result<()> {
        let category = self.category(name)?;
        let files = ListLogsUseCase::new(self.log_repository.clone()).execute(category);

        if json {
            return print_json(&files);
        }

        if files.is_empty() {
            println!("No log files found for {}", category.name);
            return Ok(());
        }
        for file in &files {
            println!("{}", format_file_line(file));
        }
        println!("✓ {} files", files.len());
        Ok(())
    }

    fn show(
        &self,
        category: &str,
        file: &str,
        term: Option<String>,
        since_hours: Option<i64>,
        json: bool,
    ) -> Result<()> {
        let category = self.category(category)?;
        let filter = show_filter(term, since_hours, Local::now().naive_local())?;
        let parsed = self.parse_file(category, file, &filter)?;

        if json {
            return print_json(&parsed);
        }

        for entry in &parsed.entries {
            println!("{}", format_entry_line(entry));
        }
        println!(
            "✓ {} entries ({:?} format)",
            parsed.entries.len(),
            parsed.format.kind
        );
        Ok(())
    }

    fn analyze(&self, category: &str, file: &str, json: bool) -> Result<()> {
        let category = self.category(category)?;
        let parsed = self.parse_file(category, file, &EntryFilter::default())?;

        let mut knowledge_base = self.knowledge_base();
        let results = AnalyzeIssuesUseCase::execute(&mut knowledge_base, &parsed.entries);

        if json {
            return print_json(&results);
        }

        if results.is_empty() {
            println!("No known issues found in {} entries", parsed.entries.len());
            return Ok(());
        }
        for result in &results {
            println!(
                "⚠ {} [{}]: {} matches",
                result.issue_name, result.category, result.match_count
            );
            println!("  Solution: {}", result.solution_text);
        }
        Ok(())
    }

    fn search(&self, term: &str, hours: i64, json: bool) -> Result<()> {
        let query = SearchQuery::last_hours(term, hours, Local::now().naive_local())?;
        let use_case = SearchLogsUseCase::new(self.registry.clone(), self.log_repository.clone());
        let results = use_case.execute(&query);

        if json {
            return print_json(&results);
        }

        if results.is_empty() {
            println!("No entries matching '{}' in the last {} hours", term, hours);
            return Ok(());
        }
        for result in &results {
            println!(
                "{} / {}: {} matches",
                result.category, result.file_ref.display_name, result.match_count
            );
            for entry in &result.entries {
                println!("  {}", format_entry_line(entry));
            }
        }
        Ok(())
    }

    fn learn(&self, name: &str, pattern: &str, solution: &str, category: &str) -> Result<()> {
        let mut knowledge_base = self.knowledge_base();
        knowledge_base.add_issue(name, pattern, solution, category)?;
        println!("✓ Learned issue: {}", name);
        Ok(())
    }

    fn knowledge(&self, json: bool) -> Result<()> {
        let knowledge_base = self.knowledge_base();

        if json {
            let issues: Vec<_> = knowledge_base.issues().collect();
            return print_json(&issues);
        }

        for issue in knowledge_base.issues() {
            println!(
                "{} [{}] seen {} times",
                issue.name, issue.category, issue.occurrence_count
            );
            println!("  Pattern: {}", issue.pattern);
            println!("  Solution: {}", issue.solution_text);
        }
        Ok(())
    }
}
