// diffコマンドハンドラー
//
// スキーマ比較機能を実装します。
// - 2つのスキーマ定義ファイルの読み込みとパース
// - 正準スキーマ同士の構造比較
// - 差分レポートのフォーマットされた表示（テキスト / JSON）

use crate::adapters::schema_source::read_schema_source;
use crate::cli::commands::diff_formatter::DiffFormatter;
use crate::cli::OutputFormat;
use crate::services::parser_factory::{create_parser_for, SchemaParser};
use crate::services::schema_comparator::SchemaComparator;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// diffコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct DiffCommand {
    /// 1つ目のスキーマファイルのフォーマット識別子
    pub format1: String,
    /// 1つ目のスキーマファイルのパス
    pub file1: PathBuf,
    /// 2つ目のスキーマファイルのフォーマット識別子
    pub format2: String,
    /// 2つ目のスキーマファイルのパス
    pub file2: PathBuf,
    /// 出力フォーマット
    pub output: OutputFormat,
    /// 詳細出力フラグ
    pub verbose: bool,
}

/// JSON出力用の差分レポート
#[derive(Debug, Serialize)]
struct DiffReport {
    /// 両スキーマが等価かどうか
    equal: bool,
    /// 差分のマップ（ドット区切りパス -> 説明）
    differences: BTreeMap<String, String>,
}

/// diffコマンドハンドラー
#[derive(Debug, Clone)]
pub struct DiffCommandHandler {}

impl DiffCommandHandler {
    /// 新しいDiffCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// diffコマンドを実行
    ///
    /// # Arguments
    ///
    /// * `command` - diffコマンドのパラメータ
    ///
    /// # Returns
    ///
    /// 成功時は差分レポート、失敗時はエラーメッセージ
    pub fn execute(&self, command: &DiffCommand) -> Result<String> {
        // フォーマット識別子はパース開始前に両方とも解決する
        // （未知のフォーマットは設定エラーとして即時に中断）
        let parser1 = create_parser_for(&command.format1)?;
        let parser2 = create_parser_for(&command.format2)?;

        let source1 = read_schema_source(&command.file1)?;
        let source2 = read_schema_source(&command.file2)?;

        let result1 = parser1
            .parse(&source1)
            .with_context(|| format!("Failed to parse schema file: {:?}", command.file1))?;
        let result2 = parser2
            .parse(&source2)
            .with_context(|| format!("Failed to parse schema file: {:?}", command.file2))?;

        if command.verbose {
            eprintln!(
                "Parsed {} table(s) from {:?}",
                result1.schema.table_count(),
                command.file1
            );
            eprintln!(
                "Parsed {} table(s) from {:?}",
                result2.schema.table_count(),
                command.file2
            );
        }

        let comparator = SchemaComparator::new();
        let diff = comparator.compare(&result1.schema, &result2.schema);

        let mut diagnostics = result1.diagnostics;
        diagnostics.extend(result2.diagnostics);

        match &command.output {
            OutputFormat::Text => Ok(DiffFormatter::format(&diff, &diagnostics)),
            OutputFormat::Json => {
                // JSONモードでは標準出力を機械可読に保ち、警告は標準エラーへ
                for diagnostic in &diagnostics {
                    eprintln!("{}", diagnostic.format());
                }

                let report = DiffReport {
                    equal: diff.is_empty(),
                    differences: diff.descriptions(),
                };
                Ok(serde_json::to_string_pretty(&report)?)
            }
        }
    }
}

impl Default for DiffCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
