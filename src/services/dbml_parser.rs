// DBMLパーサーサービス
//
// `Table "<名前>" { ... }` ブロックのDBMLテキストを正準スキーマに変換します。
// テーブル本体は波括弧の深さを数えて切り出します。本体内に入れ子の
// `Indexes { ... }` ブロックが現れるため、正規表現だけでは本体の境界を
// 表現できません。
//
// カラム属性 `pk` / `ref:` はそれぞれ `<カラム名>_pk` / `<カラム名>_fk` と
// 命名された制約をテーブルに合成します。

use crate::core::error::{ErrorLocation, ParseDiagnostic, ParseError};
use crate::core::schema::{Column, Constraint, ConstraintType, Index, Schema, Table};
use crate::services::parser_factory::{ParseResult, SchemaParser};
use regex::Regex;

/// DBMLパーサー
///
/// ステートレスであり、同一入力に対して常に同一のスキーマを構築します。
#[derive(Debug, Clone)]
pub struct DbmlParser {
    table_header: Regex,
    table_name: Regex,
    column_line: Regex,
    index_name_attr: Regex,
    index_columns: Regex,
    note_line: Regex,
}

impl DbmlParser {
    /// 新しいDbmlParserを作成
    pub fn new() -> Self {
        Self {
            table_header: Regex::new(r"(?m)^[ \t]*Table\b[^{}\n]*\{").expect("valid regex"),
            table_name: Regex::new(r#""(\w+)""#).expect("valid regex"),
            column_line: Regex::new(r#"^"(\w+)"\s+([\w()]+)(?:\s*\[(.*)\])?"#)
                .expect("valid regex"),
            index_name_attr: Regex::new(r#"name:\s*"([^"]+)""#).expect("valid regex"),
            index_columns: Regex::new(r"\(([^)]+)\)").expect("valid regex"),
            note_line: Regex::new(r"^Note:\s*'([^']+)'").expect("valid regex"),
        }
    }

    /// ヘッダーの `{` 以降から対応する `}` までの本体を切り出す
    ///
    /// 深さが0に戻らない場合は None（未終端ブロック）。
    fn extract_body<'a>(&self, rest: &'a str) -> Option<&'a str> {
        let mut depth = 1usize;
        for (i, c) in rest.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&rest[..i]);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// テーブル本体をパース
    ///
    /// カラム行・`Indexes { }` セクション・`Note:` 行を行単位で処理します。
    /// 不正な行はスキップして診断に記録します。
    fn parse_table_body(
        &self,
        table_name: &str,
        body: &str,
        diagnostics: &mut Vec<ParseDiagnostic>,
    ) -> Table {
        let mut table = Table::new(table_name.to_string());
        let mut in_indexes = false;

        for line in body.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if in_indexes {
                if line.starts_with('}') {
                    in_indexes = false;
                    continue;
                }
                self.parse_index_line(line, &mut table, diagnostics);
                continue;
            }

            if line.starts_with("Indexes") && line.contains('{') {
                in_indexes = true;
                continue;
            }

            if line.starts_with("Note:") {
                if let Some(caps) = self.note_line.captures(line) {
                    table.comment = Some(caps[1].to_string());
                }
                continue;
            }

            if line.starts_with('"') {
                if let Err(e) = self.parse_column_line(line, &mut table) {
                    diagnostics.push(ParseDiagnostic::skipped_column(
                        e.to_string(),
                        Some(ErrorLocation::with_table(table_name.to_string())),
                    ));
                }
            }
            // その他の行（閉じ括弧など）は無視
        }

        table
    }

    /// カラム行をパース
    ///
    /// `"<名前>" <型>` に任意の `[<属性リスト>]` が続く形式。
    /// 属性の処理でカラムへの設定と制約の合成を行います。
    fn parse_column_line(&self, line: &str, table: &mut Table) -> Result<(), ParseError> {
        let caps = self
            .column_line
            .captures(line)
            .ok_or_else(|| ParseError::Column {
                clause: line.to_string(),
            })?;

        let column_name = caps[1].to_string();
        let mut column = Column::new(column_name.clone(), caps[2].to_string());

        if let Some(attributes) = caps.get(3) {
            for attribute in attributes.as_str().split(',') {
                let attribute = attribute.trim();

                if attribute == "pk" {
                    table.add_constraint(Constraint::new(
                        format!("{}_pk", column_name),
                        ConstraintType::PrimaryKey,
                        vec![column_name.clone()],
                    ));
                } else if attribute == "not null" {
                    column.not_null = true;
                } else if let Some(value) = attribute.strip_prefix("default:") {
                    column.default_value = Some(
                        value
                            .trim()
                            .trim_matches('`')
                            .trim_matches('\'')
                            .to_string(),
                    );
                } else if let Some(target) = attribute.strip_prefix("ref:") {
                    // 方向記号 (>, <, -) と空白を取り除いて `テーブル.カラム` を取り出す
                    let target =
                        target.trim_matches(|c| c == ' ' || c == '>' || c == '<' || c == '-');
                    let parts: Vec<&str> = target.split('.').collect();
                    if parts.len() == 2 {
                        table.add_constraint(Constraint::foreign_key(
                            format!("{}_fk", column_name),
                            vec![column_name.clone()],
                            format!("{}({})", parts[0], parts[1]),
                        ));
                    }
                } else if let Some(value) = attribute.strip_prefix("note:") {
                    column.comment = Some(value.trim().trim_matches('\'').to_string());
                }
                // 未知の属性トークンは無視する
            }
        }

        table.add_column(column);
        Ok(())
    }

    /// インデックス定義行をパース
    ///
    /// `[` より前がカラム指定（括弧付きリストまたは単一識別子）、
    /// `[...]` 内が属性リスト。`[` のない行は不正としてスキップします。
    fn parse_index_line(
        &self,
        line: &str,
        table: &mut Table,
        diagnostics: &mut Vec<ParseDiagnostic>,
    ) {
        let Some((definition, attributes)) = line.split_once('[') else {
            diagnostics.push(ParseDiagnostic::skipped_index(
                ParseError::Index {
                    clause: line.to_string(),
                }
                .to_string(),
                Some(ErrorLocation::with_table(table.name.clone())),
            ));
            return;
        };

        let attributes = attributes.trim_end_matches(']');

        let name = self
            .index_name_attr
            .captures(attributes)
            .map(|caps| caps[1].to_string())
            .unwrap_or_default();

        // 括弧付きリストが優先。なければ単一の識別子として扱う
        let columns: Vec<String> = match self.index_columns.captures(definition) {
            Some(caps) => caps[1].split(',').map(str::to_string).collect(),
            None => vec![definition.trim().to_string()],
        };

        table.add_index(Index::new(name, columns, attributes.contains("unique")));
    }
}

impl Default for DbmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaParser for DbmlParser {
    fn parse(&self, source: &str) -> Result<ParseResult, ParseError> {
        let mut result = ParseResult::new(Schema::new());

        for header in self.table_header.find_iter(source) {
            // ヘッダー部分（`{` まで）から引用されたテーブル名を取り出す
            let table_name = match self.table_name.captures(header.as_str()) {
                Some(caps) => caps[1].to_string(),
                None => {
                    // ブロック単位のハード失敗。他のブロックは継続する
                    result.add_diagnostic(ParseDiagnostic::skipped_block(
                        ParseError::TableName.to_string(),
                    ));
                    continue;
                }
            };

            let Some(body) = self.extract_body(&source[header.end()..]) else {
                result.add_diagnostic(ParseDiagnostic::skipped_block(
                    ParseError::UnterminatedBlock {
                        table: table_name.clone(),
                    }
                    .to_string(),
                ));
                continue;
            };

            let table = self.parse_table_body(&table_name, body, &mut result.diagnostics);
            result.schema.add_table(table);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> ParseResult {
        DbmlParser::new().parse(source).unwrap()
    }

    #[test]
    fn test_parse_simple_table() {
        let source = r#"
Table "users" {
  "id" SERIAL [pk]
  "username" VARCHAR(50) [not null]
}
"#;
        let result = parse(source);
        let table = result.schema.get_table("users").unwrap();

        assert_eq!(table.columns.len(), 2);

        let id = table.get_column("id").unwrap();
        assert_eq!(id.column_type, "SERIAL");

        let username = table.get_column("username").unwrap();
        assert_eq!(username.column_type, "VARCHAR(50)");
        assert!(username.not_null);

        // pk 属性は `<カラム名>_pk` 制約として合成される
        let pk = table.get_constraint("id_pk").unwrap();
        assert_eq!(pk.constraint_type, ConstraintType::PrimaryKey);
        assert_eq!(pk.columns, vec!["id".to_string()]);
    }

    #[test]
    fn test_parse_column_without_attributes() {
        let source = "Table \"t\" {\n  \"id\" INT\n}\n";
        let result = parse(source);

        let table = result.schema.get_table("t").unwrap();
        assert_eq!(table.get_column("id").unwrap().column_type, "INT");
    }

    #[test]
    fn test_parse_default_and_note_attributes() {
        let source = r#"
Table "users" {
  "status" VARCHAR(20) [default: 'active', note: 'user state']
}
"#;
        let result = parse(source);
        let column = result
            .schema
            .get_table("users")
            .unwrap()
            .get_column("status")
            .unwrap();

        assert_eq!(column.default_value.as_deref(), Some("active"));
        assert_eq!(column.comment.as_deref(), Some("user state"));
    }

    #[test]
    fn test_parse_backtick_default() {
        let source = "Table \"t\" {\n  \"created\" TIMESTAMP [default: `now()`]\n}\n";
        let result = parse(source);

        let column = result
            .schema
            .get_table("t")
            .unwrap()
            .get_column("created")
            .unwrap();
        assert_eq!(column.default_value.as_deref(), Some("now()"));
    }

    #[test]
    fn test_parse_ref_synthesizes_foreign_key() {
        let source = "Table \"posts\" {\n  \"user_id\" INT [ref: > users.id]\n}\n";
        let result = parse(source);

        let table = result.schema.get_table("posts").unwrap();
        let fk = table.get_constraint("user_id_fk").unwrap();
        assert_eq!(fk.constraint_type, ConstraintType::ForeignKey);
        assert_eq!(fk.columns, vec!["user_id".to_string()]);
        assert_eq!(fk.references.as_deref(), Some("users(id)"));
    }

    #[test]
    fn test_unknown_attributes_are_ignored() {
        let source = "Table \"t\" {\n  \"id\" INT [pk, increment, unique]\n}\n";
        let result = parse(source);

        let table = result.schema.get_table("t").unwrap();
        assert!(table.get_column("id").is_some());
        assert!(table.get_constraint("id_pk").is_some());
        assert!(result.is_clean());
    }

    #[test]
    fn test_parse_indexes_block() {
        let source = r#"
Table "users" {
  "email" VARCHAR(255)
  Indexes {
    email [name: "idx_email"]
    (email, created_at) [unique, name: "idx_email_created"]
  }
}
"#;
        let result = parse(source);
        let table = result.schema.get_table("users").unwrap();

        assert_eq!(table.indexes.len(), 2);

        let single = table.get_index("idx_email").unwrap();
        assert_eq!(single.columns, vec!["email".to_string()]);
        assert!(!single.unique);

        // 括弧付きリストはカンマで分割される（トリムなし）
        let composite = table.get_index("idx_email_created").unwrap();
        assert_eq!(
            composite.columns,
            vec!["email".to_string(), " created_at".to_string()]
        );
        assert!(composite.unique);
    }

    #[test]
    fn test_two_unnamed_indexes_collapse_to_one() {
        // 無名インデックスは空文字列キーで衝突し、後勝ちになる
        let source = r#"
Table "users" {
  "a" INT
  Indexes {
    a [unique]
    b [unique]
  }
}
"#;
        let result = parse(source);
        let table = result.schema.get_table("users").unwrap();

        assert_eq!(table.indexes.len(), 1);
        let index = table.get_index("").unwrap();
        assert_eq!(index.columns, vec!["b".to_string()]);
    }

    #[test]
    fn test_index_line_without_brackets_is_skipped() {
        let source = "Table \"t\" {\n  \"a\" INT\n  Indexes {\n    a\n  }\n}\n";
        let result = parse(source);

        let table = result.schema.get_table("t").unwrap();
        assert!(table.indexes.is_empty());
        assert_eq!(result.diagnostic_count(), 1);
    }

    #[test]
    fn test_parse_table_note() {
        let source = "Table \"users\" {\n  \"id\" INT\n  Note: 'application users'\n}\n";
        let result = parse(source);

        let table = result.schema.get_table("users").unwrap();
        assert_eq!(table.comment.as_deref(), Some("application users"));
    }

    #[test]
    fn test_block_without_name_is_skipped() {
        let source = "Table {\n  \"id\" INT\n}\nTable \"ok\" {\n  \"id\" INT\n}\n";
        let result = parse(source);

        assert_eq!(result.schema.table_count(), 1);
        assert!(result.schema.has_table("ok"));
        assert_eq!(result.diagnostic_count(), 1);
    }

    #[test]
    fn test_unterminated_block_is_skipped() {
        let source = "Table \"broken\" {\n  \"id\" INT\n";
        let result = parse(source);

        assert_eq!(result.schema.table_count(), 0);
        assert_eq!(result.diagnostic_count(), 1);
        assert!(result.diagnostics[0].message.contains("broken"));
    }

    #[test]
    fn test_malformed_column_line_is_skipped() {
        let source = "Table \"t\" {\n  \"id\" INT\n  \"broken\"\n}\n";
        let result = parse(source);

        let table = result.schema.get_table("t").unwrap();
        assert_eq!(table.columns.len(), 1);
        assert_eq!(result.diagnostic_count(), 1);
    }

    #[test]
    fn test_multiple_tables() {
        let source = r#"
Table "users" {
  "id" INT
}

Table "posts" {
  "id" INT
}
"#;
        let result = parse(source);
        assert_eq!(result.schema.table_count(), 2);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let source = r#"
Table "users" {
  "id" SERIAL [pk]
  Indexes {
    id [name: "idx_id"]
  }
  Note: 'users'
}
"#;
        let first = parse(source);
        let second = parse(source);
        assert_eq!(first.schema, second.schema);
    }
}
