// parseコマンドハンドラー
//
// 単一のスキーマ定義ファイルをパースし、正準表現を表示します。
// 比較が何を対象に動作するのかを確認するためのデバッグ用途です。

use crate::adapters::schema_source::read_schema_source;
use crate::cli::OutputFormat;
use crate::services::parser_factory::{create_parser_for, SchemaParser};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt::Write;
use std::path::PathBuf;

/// parseコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct ParseCommand {
    /// スキーマファイルのフォーマット識別子
    pub format: String,
    /// スキーマファイルのパス
    pub file: PathBuf,
    /// 出力フォーマット
    pub output: OutputFormat,
    /// 詳細出力フラグ
    pub verbose: bool,
}

/// parseコマンドハンドラー
#[derive(Debug, Clone)]
pub struct ParseCommandHandler {}

impl ParseCommandHandler {
    /// 新しいParseCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// parseコマンドを実行
    ///
    /// # Arguments
    ///
    /// * `command` - parseコマンドのパラメータ
    ///
    /// # Returns
    ///
    /// 成功時は正準スキーマの表現、失敗時はエラーメッセージ
    pub fn execute(&self, command: &ParseCommand) -> Result<String> {
        let parser = create_parser_for(&command.format)?;
        let source = read_schema_source(&command.file)?;

        let result = parser
            .parse(&source)
            .with_context(|| format!("Failed to parse schema file: {:?}", command.file))?;

        if command.verbose {
            eprintln!(
                "Parsed {} table(s) from {:?}",
                result.schema.table_count(),
                command.file
            );
        }

        let schema_json = serde_json::to_string_pretty(&result.schema)?;

        match &command.output {
            OutputFormat::Text => {
                let mut output = String::new();
                output.push_str("=== Canonical Schema ===\n\n");
                let _ = writeln!(
                    output,
                    "{} table(s) parsed from {:?}.\n",
                    result.schema.table_count(),
                    command.file
                );
                output.push_str(&schema_json);
                output.push('\n');

                if !result.diagnostics.is_empty() {
                    let _ = writeln!(
                        output,
                        "\n⚠️  {} fragment(s) skipped during parsing:\n",
                        result.diagnostics.len()
                    );
                    for diagnostic in &result.diagnostics {
                        let _ = writeln!(output, "  {}", diagnostic.format().yellow());
                    }
                }

                Ok(output)
            }
            OutputFormat::Json => {
                // JSONモードでは標準出力を機械可読に保ち、警告は標準エラーへ
                for diagnostic in &result.diagnostics {
                    eprintln!("{}", diagnostic.format());
                }
                Ok(schema_json)
            }
        }
    }
}

impl Default for ParseCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
