// パーサーファクトリー
//
// フォーマット識別子文字列から対応するスキーマパーサーを選択します。
// パーサーの共有契約 (SchemaParser トレイト) と
// パース結果の集約型 (ParseResult) もここで定義します。

use crate::core::error::{FormatError, ParseDiagnostic, ParseError};
use crate::core::schema::Schema;
use crate::services::dbml_parser::DbmlParser;
use crate::services::postgresql_parser::PostgresqlParser;
use std::fmt;
use std::str::FromStr;

/// パース結果
///
/// 構築されたスキーマと、スキップされた断片の診断情報を保持します。
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// 構築されたスキーマ
    pub schema: Schema,
    /// 診断情報のリスト
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl ParseResult {
    /// 新しいパース結果を作成
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            diagnostics: Vec::new(),
        }
    }

    /// 診断を追加
    pub fn add_diagnostic(&mut self, diagnostic: ParseDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// 診断なしでパースが完了したかどうか
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// 診断の数を取得
    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }
}

/// スキーマパーサーの共有契約
///
/// ソーステキストから正準スキーマを構築します。決定的であり、
/// 同一の入力テキストは常に深い等価のスキーマを返します。
/// パースはベストエフォートです: 構造的に壊れたテーブル/ブロックや
/// 不正な句は診断としてスキップされ、残りの処理は継続します。
/// 1つもテーブルを抽出できなかった場合も空のスキーマが返されます。
pub trait SchemaParser {
    /// ソーステキストをパースして正準スキーマを構築
    fn parse(&self, source: &str) -> Result<ParseResult, ParseError>;
}

/// スキーマフォーマット
///
/// サポートされる入力フォーマットの固定列挙です。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// PostgreSQL DDL (`CREATE TABLE` サブセット)
    Postgresql,
    /// DBML (`Table "name" { ... }` サブセット)
    Dbml,
}

impl SchemaFormat {
    /// フォーマット識別子を取得
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaFormat::Postgresql => "postgresql",
            SchemaFormat::Dbml => "dbml",
        }
    }
}

impl FromStr for SchemaFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "postgresql" => Ok(SchemaFormat::Postgresql),
            "dbml" => Ok(SchemaFormat::Dbml),
            other => Err(FormatError::new(other.to_string())),
        }
    }
}

impl fmt::Display for SchemaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 指定されたフォーマットのパーサーを作成
pub fn create_parser(format: SchemaFormat) -> Box<dyn SchemaParser> {
    match format {
        SchemaFormat::Postgresql => Box::new(PostgresqlParser::new()),
        SchemaFormat::Dbml => Box::new(DbmlParser::new()),
    }
}

/// フォーマット識別子文字列からパーサーを作成
///
/// # Errors
///
/// 未知の識別子の場合は `FormatError` を返します。
pub fn create_parser_for(format: &str) -> Result<Box<dyn SchemaParser>, FormatError> {
    let format = SchemaFormat::from_str(format)?;
    Ok(create_parser(format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!(
            "postgresql".parse::<SchemaFormat>().unwrap(),
            SchemaFormat::Postgresql
        );
        assert_eq!("dbml".parse::<SchemaFormat>().unwrap(), SchemaFormat::Dbml);
    }

    #[test]
    fn test_format_from_str_rejects_unknown() {
        let error = "yaml".parse::<SchemaFormat>().unwrap_err();
        assert_eq!(error.format, "yaml");

        // 大文字・別名は受け付けない
        assert!("PostgreSQL".parse::<SchemaFormat>().is_err());
        assert!("postgres".parse::<SchemaFormat>().is_err());
    }

    #[test]
    fn test_create_parser_for_known_formats() {
        assert!(create_parser_for("postgresql").is_ok());
        assert!(create_parser_for("dbml").is_ok());
        assert!(create_parser_for("mysql").is_err());
    }

    #[test]
    fn test_parse_result_diagnostics() {
        use crate::core::error::ParseDiagnostic;
        use crate::core::schema::Schema;

        let mut result = ParseResult::new(Schema::new());
        assert!(result.is_clean());

        result.add_diagnostic(ParseDiagnostic::skipped_statement(
            "Failed to extract table name".to_string(),
        ));

        assert!(!result.is_clean());
        assert_eq!(result.diagnostic_count(), 1);
    }
}
