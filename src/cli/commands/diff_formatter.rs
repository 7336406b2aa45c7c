// 差分レポートのフォーマッター
//
// diffコマンドのテキスト出力を構造化して生成します。
// セクション別のフォーマットロジックを分離し、
// ビジネスロジックと表示整形の責務を分けます。

use crate::core::error::ParseDiagnostic;
use crate::core::schema_diff::{Difference, SchemaDiff};
use colored::Colorize;
use std::fmt::Write;

/// 差分レポートのフォーマッター
pub(crate) struct DiffFormatter;

impl DiffFormatter {
    /// 差分レポート全体をフォーマット
    pub fn format(diff: &SchemaDiff, diagnostics: &[ParseDiagnostic]) -> String {
        let mut output = String::new();

        output.push_str("=== Schema Comparison ===\n\n");

        if diff.is_empty() {
            let _ = writeln!(output, "{}", "✅ Schemas are identical.".green());
        } else {
            let _ = writeln!(
                output,
                "❌ {} difference(s) found:\n",
                diff.count().to_string().bold()
            );
            for (key, difference) in &diff.entries {
                let _ = writeln!(
                    output,
                    "  {}: {}",
                    key.as_str().bold(),
                    Self::render_difference(*difference)
                );
            }
        }

        Self::append_warning_section(&mut output, diagnostics);

        output
    }

    /// 差分の種類を色付きでレンダリング
    fn render_difference(difference: Difference) -> String {
        match difference {
            Difference::MissingInA | Difference::MissingInB => {
                difference.as_str().red().to_string()
            }
            Difference::Differs => difference.as_str().yellow().to_string(),
        }
    }

    /// スキップされた断片の警告セクションを追加
    fn append_warning_section(output: &mut String, diagnostics: &[ParseDiagnostic]) {
        if diagnostics.is_empty() {
            return;
        }

        let _ = writeln!(
            output,
            "\n⚠️  {} fragment(s) skipped during parsing:\n",
            diagnostics.len()
        );
        for diagnostic in diagnostics {
            let _ = writeln!(output, "  {}", diagnostic.format().yellow());
        }
    }
}
