//! # Format Detection Service
//!
//! 生の行のサンプルからログ形式を判定するサービス

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::entities::log_entry::LogFormat;
use crate::domain::services::extractors::{
    contains_severity, line_starts_with_shape, DETECTION_SHAPES, TABULAR_FIELDS_MARKER,
};

/// 判定に使う先頭行数
pub const SAMPLE_SIZE: usize = 10;

/// Webサーバーログを示すファイル名（IIS の `u_ex240105.log` など）
static WEB_SERVER_NAME_HINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(^u?_?ex\d{6}|^iis|\biis\b|w3svc|httperr)").unwrap_or_else(|_| unreachable!())
});

/// ログ形式判定サービス
///
/// 入力テキストだけで決まる（乱数や環境に依存しない）
pub struct FormatDetector;

impl FormatDetector {
    /// ログ形式を判定する
    ///
    /// 次の順に判定し、最初に一致したものを返す
    ///
    /// 1. ファイル名がWebサーバーログを示す、またはフィールドヘッダ行がある → Tabular
    /// 2. いずれかの行がタイムスタンプ形に一致 → Structured（最初に一致した形）
    /// 3. 重大度トークンを含む → Structured（形なし）
    /// 4. それ以外 → Unknown
    ///
    /// # Arguments
    ///
    /// * `lines` - 生の行（先頭 [`SAMPLE_SIZE`] 行のみ使用）
    /// * `display_name` - ファイルの表示名
    pub fn detect<S: AsRef<str>>(lines: &[S], display_name: &str) -> LogFormat {
        let sample: Vec<&str> = lines.iter().take(SAMPLE_SIZE).map(|l| l.as_ref()).collect();

        if WEB_SERVER_NAME_HINT.is_match(display_name)
            || sample
                .iter()
                .any(|line| line.trim_start().starts_with(TABULAR_FIELDS_MARKER))
        {
            return LogFormat::tabular();
        }

        for shape in DETECTION_SHAPES {
            if sample.iter().any(|line| line_starts_with_shape(line, shape)) {
                return LogFormat::structured(Some(shape));
            }
        }

        if contains_severity(&sample.join("\n")) {
            return LogFormat::structured(None);
        }

        LogFormat::unknown()
    }
}
