// エラー型定義
//
// アプリケーション全体で使用されるカスタムエラー型を提供します。
// thiserrorを使用して、ParseError, FormatError, IoError を定義します。
// パース中にスキップされた断片の診断情報 (ParseDiagnostic) もここで定義します。

use thiserror::Error;

/// パースエラー
///
/// スキーマソーステキストの解析時に発生するエラーを表現します。
/// テーブルレベルの失敗はその断片のみを中断し、句レベルの失敗は
/// 該当句のスキップとして扱われます（いずれも診断情報に変換されます）。
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// Table name could not be extracted
    #[error("Failed to extract table name")]
    TableName,

    /// Table body could not be extracted
    #[error("Failed to extract table body for table '{table}'")]
    TableBody {
        /// テーブル名
        table: String,
    },

    /// Invalid column clause
    #[error("Invalid column definition: {clause}")]
    Column {
        /// 解析に失敗した句
        clause: String,
    },

    /// Invalid index clause
    #[error("Invalid index definition: {clause}")]
    Index {
        /// 解析に失敗した句
        clause: String,
    },

    /// Invalid constraint clause
    #[error("Invalid constraint definition: {clause}")]
    Constraint {
        /// 解析に失敗した句
        clause: String,
    },

    /// Unterminated block
    #[error("Unterminated block for table '{table}'")]
    UnterminatedBlock {
        /// テーブル名
        table: String,
    },
}

impl ParseError {
    /// テーブル名抽出エラーかどうか
    pub fn is_table_name(&self) -> bool {
        matches!(self, ParseError::TableName)
    }

    /// テーブル本体抽出エラーかどうか
    pub fn is_table_body(&self) -> bool {
        matches!(self, ParseError::TableBody { .. })
    }

    /// カラム句エラーかどうか
    pub fn is_column(&self) -> bool {
        matches!(self, ParseError::Column { .. })
    }

    /// インデックス句エラーかどうか
    pub fn is_index(&self) -> bool {
        matches!(self, ParseError::Index { .. })
    }

    /// 制約句エラーかどうか
    pub fn is_constraint(&self) -> bool {
        matches!(self, ParseError::Constraint { .. })
    }
}

/// フォーマット設定エラー
///
/// 未知のフォーマット識別子が指定された場合のエラーです。
/// パース開始前に致命的エラーとして呼び出し元へ返されます。
#[derive(Debug, Clone, Error)]
#[error("Unsupported schema format: {format}. Please specify one of: postgresql, dbml.")]
pub struct FormatError {
    /// 指定されたフォーマット識別子
    pub format: String,
}

impl FormatError {
    /// 新しいフォーマットエラーを作成
    pub fn new(format: String) -> Self {
        Self { format }
    }
}

/// I/Oエラー
///
/// スキーマソースファイルの読み込み時に発生するエラーを表現します。
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// ファイルパス
        path: String,
    },

    /// File read error
    #[error("Failed to read file: {path} (cause: {cause})")]
    FileRead {
        /// ファイルパス
        path: String,
        /// エラー原因
        cause: String,
    },
}

impl IoError {
    /// ファイルが見つからないエラーかどうか
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, IoError::FileNotFound { .. })
    }

    /// ファイル読み込みエラーかどうか
    pub fn is_file_read(&self) -> bool {
        matches!(self, IoError::FileRead { .. })
    }
}

/// 診断発生位置
///
/// スキーマソース内で断片がスキップされた位置を表現します。
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorLocation {
    /// テーブル名
    pub table: Option<String>,
    /// カラム名
    pub column: Option<String>,
}

impl ErrorLocation {
    /// 新しい診断位置を作成
    pub fn new() -> Self {
        Self {
            table: None,
            column: None,
        }
    }

    /// テーブル名を指定して診断位置を作成
    pub fn with_table(table: String) -> Self {
        Self {
            table: Some(table),
            column: None,
        }
    }

    /// 位置情報をフォーマット
    pub fn format(&self) -> String {
        let mut parts = Vec::new();

        if let Some(table) = &self.table {
            parts.push(format!("table: {}", table));
        }
        if let Some(column) = &self.column {
            parts.push(format!("column: {}", column));
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!(" ({})", parts.join(", "))
        }
    }
}

impl Default for ErrorLocation {
    fn default() -> Self {
        Self::new()
    }
}

/// 診断の種類
///
/// パース中にスキップされた断片の分類を表します。
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    /// CREATE TABLE ステートメント全体のスキップ
    SkippedStatement,
    /// DBML テーブルブロック全体のスキップ
    SkippedBlock,
    /// カラム句のスキップ
    SkippedColumn,
    /// インデックス句のスキップ
    SkippedIndex,
    /// 制約句のスキップ
    SkippedConstraint,
}

/// パース診断
///
/// ソフト失敗（スキップされた断片）の記録を表現します。
/// エラーではないが、ユーザーに伝えるべき事項を表します。
#[derive(Debug, Clone, PartialEq)]
pub struct ParseDiagnostic {
    /// 診断メッセージ
    pub message: String,
    /// 診断発生位置
    pub location: Option<ErrorLocation>,
    /// 診断の種類
    pub kind: DiagnosticKind,
}

impl ParseDiagnostic {
    /// 新しい診断を作成
    pub fn new(message: String, location: Option<ErrorLocation>, kind: DiagnosticKind) -> Self {
        Self {
            message,
            location,
            kind,
        }
    }

    /// ステートメントスキップの診断を作成
    pub fn skipped_statement(message: String) -> Self {
        Self::new(message, None, DiagnosticKind::SkippedStatement)
    }

    /// ブロックスキップの診断を作成
    pub fn skipped_block(message: String) -> Self {
        Self::new(message, None, DiagnosticKind::SkippedBlock)
    }

    /// カラム句スキップの診断を作成
    pub fn skipped_column(message: String, location: Option<ErrorLocation>) -> Self {
        Self::new(message, location, DiagnosticKind::SkippedColumn)
    }

    /// インデックス句スキップの診断を作成
    pub fn skipped_index(message: String, location: Option<ErrorLocation>) -> Self {
        Self::new(message, location, DiagnosticKind::SkippedIndex)
    }

    /// 制約句スキップの診断を作成
    pub fn skipped_constraint(message: String, location: Option<ErrorLocation>) -> Self {
        Self::new(message, location, DiagnosticKind::SkippedConstraint)
    }

    /// 位置情報を含めてフォーマット
    pub fn format(&self) -> String {
        let location_str = self
            .location
            .as_ref()
            .map_or(String::new(), |loc| loc.format());
        format!("Warning: {}{}", self.message, location_str)
    }
}
