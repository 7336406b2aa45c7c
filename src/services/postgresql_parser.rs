// PostgreSQL DDLパーサーサービス
//
// `CREATE TABLE` サブセットのSQLテキストを正準スキーマに変換します。
// 前処理（コメント・空行の除去、セミコロン分割）の後、各ステートメントの
// テーブル名と括弧内の本体を抽出し、本体をカンマで句に分割して分類します。
//
// 本体のカンマ分割は括弧の入れ子を追跡しません。複数カラムの制約リストや
// カンマを含む CHECK 式は分断されます（既知の制限）。

use crate::core::error::{ErrorLocation, ParseDiagnostic, ParseError};
use crate::core::schema::{Column, Constraint, ConstraintType, Index, Schema, Table};
use crate::services::parser_factory::{ParseResult, SchemaParser};
use regex::Regex;

/// PostgreSQL DDLパーサー
///
/// ステートレスであり、同一入力に対して常に同一のスキーマを構築します。
#[derive(Debug, Clone)]
pub struct PostgresqlParser {
    line_comment: Regex,
    block_comment: Regex,
    table_name: Regex,
    table_body: Regex,
    index_clause: Regex,
    constraint_clause: Regex,
}

impl PostgresqlParser {
    /// 新しいPostgresqlParserを作成
    pub fn new() -> Self {
        Self {
            line_comment: Regex::new(r"--.*").expect("valid regex"),
            block_comment: Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"),
            table_name: Regex::new(r"(?i)CREATE\s+TABLE\s+(\w+)").expect("valid regex"),
            // 本体は複数行にまたがるため、`.` は改行にもマッチさせる
            table_body: Regex::new(r"(?is)CREATE\s+TABLE\s+\w+\s*\((.*)\)").expect("valid regex"),
            index_clause: Regex::new(r"(?i)^(UNIQUE\s+)?INDEX\s+(\w+)\s*\((.+)\)")
                .expect("valid regex"),
            // カラムリストの捕捉は非貪欲にして、後続の REFERENCES 句を残す
            constraint_clause: Regex::new(
                r"(?i)^(PRIMARY KEY|FOREIGN KEY|UNIQUE|CHECK)\s+(?:(\w+)\s*)?\((.+?)\)(?:\s+REFERENCES\s+(\w+)\s*\((\w+)\))?",
            )
            .expect("valid regex"),
        }
    }

    /// コメントを除去
    ///
    /// `--` 行コメントと `/* */` ブロックコメント（非ネスト）を取り除きます。
    fn remove_comments(&self, sql: &str) -> String {
        let without_line = self.line_comment.replace_all(sql, "");
        self.block_comment.replace_all(&without_line, "").into_owned()
    }

    /// 空行を除去
    fn remove_empty_lines(&self, sql: &str) -> String {
        sql.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// セミコロンで個別のステートメントに分割
    fn split_statements(&self, sql: &str) -> Vec<String> {
        sql.split(';')
            .map(str::trim)
            .filter(|stmt| !stmt.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// CREATE TABLE ステートメントをパース
    ///
    /// テーブル名または本体が抽出できない場合はそのステートメント全体の
    /// ハード失敗として `ParseError` を返します。句レベルの失敗は
    /// `diagnostics` に記録してスキップします。
    fn parse_create_table(
        &self,
        stmt: &str,
        diagnostics: &mut Vec<ParseDiagnostic>,
    ) -> Result<Table, ParseError> {
        let name_caps = self.table_name.captures(stmt).ok_or(ParseError::TableName)?;
        let table_name = name_caps[1].to_string();

        let body_caps = self
            .table_body
            .captures(stmt)
            .ok_or_else(|| ParseError::TableBody {
                table: table_name.clone(),
            })?;
        let body = body_caps[1].to_string();

        let mut table = Table::new(table_name.clone());

        // 本体をカンマで句に分割（括弧の入れ子は追跡しない）
        for clause in body.split(',') {
            let clause = clause.trim();
            if clause.is_empty() {
                continue;
            }

            if clause.starts_with("INDEX") || clause.starts_with("UNIQUE INDEX") {
                // インデックス句。UNIQUE 制約の接頭辞判定より先に行う
                match self.parse_index(clause) {
                    Ok(index) => table.add_index(index),
                    Err(e) => diagnostics.push(ParseDiagnostic::skipped_index(
                        e.to_string(),
                        Some(ErrorLocation::with_table(table_name.clone())),
                    )),
                }
            } else if clause.starts_with("PRIMARY KEY")
                || clause.starts_with("FOREIGN KEY")
                || clause.starts_with("UNIQUE")
                || clause.starts_with("CHECK")
            {
                match self.parse_constraint(clause) {
                    Ok(constraint) => table.add_constraint(constraint),
                    Err(e) => diagnostics.push(ParseDiagnostic::skipped_constraint(
                        e.to_string(),
                        Some(ErrorLocation::with_table(table_name.clone())),
                    )),
                }
            } else {
                match self.parse_column(clause) {
                    Ok(column) => table.add_column(column),
                    Err(e) => diagnostics.push(ParseDiagnostic::skipped_column(
                        e.to_string(),
                        Some(ErrorLocation::with_table(table_name.clone())),
                    )),
                }
            }
        }

        Ok(table)
    }

    /// カラム句をパース
    ///
    /// 先頭トークンが名前、2番目が型。残りのトークンから
    /// `NOT NULL` / `DEFAULT <値>` / `COMMENT <値>` を取り出します。
    fn parse_column(&self, clause: &str) -> Result<Column, ParseError> {
        let parts: Vec<&str> = clause.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(ParseError::Column {
                clause: clause.to_string(),
            });
        }

        let mut column = Column::new(parts[0].to_string(), parts[1].to_string());

        let mut i = 2;
        while i < parts.len() {
            match parts[i] {
                "NOT" => {
                    if i + 1 < parts.len() && parts[i + 1] == "NULL" {
                        column.not_null = true;
                        i += 1;
                    }
                }
                "DEFAULT" => {
                    if i + 1 < parts.len() {
                        column.default_value =
                            Some(parts[i + 1].trim_matches('\'').to_string());
                        i += 1;
                    }
                }
                "COMMENT" => {
                    if i + 1 < parts.len() {
                        column.comment = Some(parts[i + 1].trim_matches('\'').to_string());
                        i += 1;
                    }
                }
                _ => {}
            }
            i += 1;
        }

        Ok(column)
    }

    /// インデックス句をパース
    ///
    /// `(UNIQUE )?INDEX <名前> (<カラムリスト>)` 形式。
    fn parse_index(&self, clause: &str) -> Result<Index, ParseError> {
        let caps = self
            .index_clause
            .captures(clause)
            .ok_or_else(|| ParseError::Index {
                clause: clause.to_string(),
            })?;

        Ok(Index::new(
            caps[2].to_string(),
            caps[3].split(',').map(str::to_string).collect(),
            caps.get(1).is_some(),
        ))
    }

    /// 制約句をパース
    ///
    /// `<種別> [名前] (<カラムリスト>)` 形式。FOREIGN KEY の場合は
    /// 後続の ` REFERENCES table(column)` を参照先として取り込みます。
    fn parse_constraint(&self, clause: &str) -> Result<Constraint, ParseError> {
        let caps =
            self.constraint_clause
                .captures(clause)
                .ok_or_else(|| ParseError::Constraint {
                    clause: clause.to_string(),
                })?;

        let keyword = caps[1].to_uppercase();
        let constraint_type =
            ConstraintType::from_keyword(&keyword).ok_or_else(|| ParseError::Constraint {
                clause: clause.to_string(),
            })?;

        let name = caps
            .get(2)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let columns: Vec<String> = caps[3].split(',').map(str::to_string).collect();

        let references = match (constraint_type, caps.get(4), caps.get(5)) {
            (ConstraintType::ForeignKey, Some(table), Some(column)) => {
                Some(format!("{}({})", table.as_str(), column.as_str()))
            }
            _ => None,
        };

        Ok(Constraint {
            name,
            constraint_type,
            columns,
            references,
        })
    }
}

impl Default for PostgresqlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaParser for PostgresqlParser {
    fn parse(&self, source: &str) -> Result<ParseResult, ParseError> {
        let cleaned = self.remove_empty_lines(&self.remove_comments(source));
        let statements = self.split_statements(&cleaned);

        let mut result = ParseResult::new(Schema::new());

        for stmt in statements {
            // CREATE TABLE 以外のステートメントは対象外
            if !stmt.to_uppercase().starts_with("CREATE TABLE") {
                continue;
            }

            match self.parse_create_table(&stmt, &mut result.diagnostics) {
                Ok(table) => result.schema.add_table(table),
                Err(e) => {
                    // テーブル単位のハード失敗。他のステートメントは継続する
                    result.add_diagnostic(ParseDiagnostic::skipped_statement(e.to_string()));
                }
            }
        }

        Ok(result)
    }
}
