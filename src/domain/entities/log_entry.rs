//! # LogEntry Entity
//!
//! 正規化されたログエントリと、検出されたログ形式

use chrono::NaiveDateTime;
use serde::Serialize;

/// ログ内容の構造
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormatKind {
    /// ヘッダ行でフィールドが宣言された表形式（Webサーバーログ等）
    Tabular,
    /// タイムスタンプまたは重大度トークンで始まる構造化ログ
    Structured,
    /// 行単位
    Unknown,
}

/// タイムスタンプの形
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimestampShape {
    /// 表形式の `date` + `time` フィールド
    TabularDateTime,
    /// `2024-01-05T10:00:00`
    Iso8601,
    /// `2024-01-05 10:00:00,123`（小数部は省略可）
    CommaFraction,
    /// イベントログのテキストエクスポート（`Log Name:` マーカー）
    EventLogMarker,
    /// `[10:00:00]`
    BracketedTime,
}

impl TimestampShape {
    /// 表示用の形の説明
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampShape::TabularDateTime => "yyyy-MM-dd HH:mm:ss",
            TimestampShape::Iso8601 => "yyyy-MM-ddTHH:mm:ss",
            TimestampShape::CommaFraction => "yyyy-MM-dd HH:mm:ss,fff",
            TimestampShape::EventLogMarker => "Log Name:",
            TimestampShape::BracketedTime => "[HH:mm:ss]",
        }
    }
}

/// 検出されたログ形式（永続化されない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogFormat {
    pub kind: FormatKind,
    pub timestamp_shape: Option<TimestampShape>,
}

impl LogFormat {
    pub fn tabular() -> Self {
        Self {
            kind: FormatKind::Tabular,
            timestamp_shape: Some(TimestampShape::TabularDateTime),
        }
    }

    pub fn structured(shape: Option<TimestampShape>) -> Self {
        Self {
            kind: FormatKind::Structured,
            timestamp_shape: shape,
        }
    }

    pub fn unknown() -> Self {
        Self {
            kind: FormatKind::Unknown,
            timestamp_shape: None,
        }
    }
}

/// タイムスタンプの出所
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimestampSource {
    /// ログ内容から解析された
    Parsed,
    /// 解析できず、パース時点の現在時刻で代用された
    Fallback,
}

/// 正規化されたログエントリ
///
/// 1行以上の生の行から作られ、作成後は不変
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime,
    pub timestamp_source: TimestampSource,
    /// 重大度トークン（ERROR, WARN, INFO ...）
    pub level: String,
    pub source: String,
    /// 複数行の場合は改行で連結
    pub message: String,
    pub raw_lines: Vec<String>,
}

impl LogEntry {
    /// 検索語が message / level / source のいずれかに含まれるか（大文字小文字を区別しない）
    pub fn contains_term(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.message.to_lowercase().contains(&needle)
            || self.level.to_lowercase().contains(&needle)
            || self.source.to_lowercase().contains(&needle)
    }
}
