//! # Search Query DTO
//!
//! カテゴリ横断検索の条件のData Transfer Object

use anyhow::Result;
use chrono::NaiveDateTime;

use crate::domain::entities::search::{EntryFilter, TimeWindow};

/// 検索条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// 検索語（message / level / source に対する部分一致、大文字小文字を区別しない）
    pub term: String,
    /// 対象期間の開始（含む）
    pub start: NaiveDateTime,
    /// 対象期間の終了（含む）
    pub end: NaiveDateTime,
}

impl SearchQuery {
    /// 新しい検索条件を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use logsift::application::dto::search_query::SearchQuery;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    /// let query = SearchQuery::new(
    ///     "timeout",
    ///     day.and_hms_opt(0, 0, 0).unwrap(),
    ///     day.and_hms_opt(23, 59, 59).unwrap(),
    /// );
    ///
    /// assert_eq!(query.term, "timeout");
    /// assert!(query.start < query.end);
    /// ```
    pub fn new(term: &str, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            term: term.to_string(),
            start,
            end,
        }
    }

    /// `now` から遡って `hours` 時間を対象とする検索条件を作成します。
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// # use logsift::application::dto::search_query::SearchQuery;
    /// let now = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap().and_hms_opt(12, 0, 0).unwrap();
    /// let query = SearchQuery::last_hours("error", 24, now).unwrap();
    ///
    /// assert_eq!(query.end, now);
    /// assert_eq!((query.end - query.start).num_hours(), 24);
    /// assert!(SearchQuery::last_hours("error", -1, now).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// `hours` が負、または遡った日時が表現できない場合にエラーを返す
    pub fn last_hours(term: &str, hours: i64, now: NaiveDateTime) -> Result<Self> {
        let window = TimeWindow::last_hours(hours, now)
            .ok_or_else(|| anyhow::anyhow!("Invalid search period: {} hours", hours))?;
        Ok(Self::new(term, window.start, window.end))
    }

    /// エントリフィルタに変換
    pub fn to_filter(&self) -> EntryFilter {
        EntryFilter::new(
            Some(self.term.clone()),
            Some(TimeWindow::new(self.start, self.end)),
        )
    }
}
