// スキーマ比較サービス
//
// 2つの正準スキーマを構造的に比較し、差分レポートを生成するサービス。
// 純粋な読み取り専用の処理であり、失敗することはありません。
// 片側にしか存在しない要素は差分として報告されます（エラーではありません）。

use crate::core::schema::{Schema, Table};
use crate::core::schema_diff::{Difference, SchemaDiff};

/// スキーマ比較サービス
#[derive(Debug, Clone)]
pub struct SchemaComparator {}

impl SchemaComparator {
    /// 新しいSchemaComparatorを作成
    pub fn new() -> Self {
        Self {}
    }

    /// 2つのスキーマを比較して差分レポートを生成
    ///
    /// # Arguments
    ///
    /// * `a` - 比較元のスキーマ
    /// * `b` - 比較先のスキーマ
    ///
    /// # Returns
    ///
    /// 差分レポート。空であれば両スキーマは等価です。
    /// キーは `<テーブル名>` または `<テーブル名>.<メンバー名>`、
    /// 値は方向付きの固定語彙（"missing in a" / "missing in b" / "differs"）です。
    pub fn compare(&self, a: &Schema, b: &Schema) -> SchemaDiff {
        let mut diff = SchemaDiff::new();

        // a のテーブルを基準に比較
        for (table_name, table_a) in &a.tables {
            match b.tables.get(table_name) {
                Some(table_b) => self.compare_tables(table_name, table_a, table_b, &mut diff),
                None => diff.record(table_name.clone(), Difference::MissingInB),
            }
        }

        // b にのみ存在するテーブル
        for table_name in b.tables.keys() {
            if !a.tables.contains_key(table_name) {
                diff.record(table_name.clone(), Difference::MissingInA);
            }
        }

        diff
    }

    /// テーブル内のメンバー（カラム、インデックス、制約）を比較
    ///
    /// フィールド単位の厳密な構造的等価で判定します。
    /// 型文字列の大文字小文字や空白の正規化は行いません。
    fn compare_tables(
        &self,
        table_name: &str,
        table_a: &Table,
        table_b: &Table,
        diff: &mut SchemaDiff,
    ) {
        // カラムの比較
        for (column_name, column_a) in &table_a.columns {
            match table_b.columns.get(column_name) {
                Some(column_b) if column_a == column_b => {}
                Some(_) => diff.record(
                    format!("{}.{}", table_name, column_name),
                    Difference::Differs,
                ),
                None => diff.record(
                    format!("{}.{}", table_name, column_name),
                    Difference::MissingInB,
                ),
            }
        }

        // インデックスの比較
        for (index_name, index_a) in &table_a.indexes {
            match table_b.indexes.get(index_name) {
                Some(index_b) if index_a == index_b => {}
                Some(_) => diff.record(
                    format!("{}.{}", table_name, index_name),
                    Difference::Differs,
                ),
                None => diff.record(
                    format!("{}.{}", table_name, index_name),
                    Difference::MissingInB,
                ),
            }
        }

        // 制約の比較
        for (constraint_name, constraint_a) in &table_a.constraints {
            match table_b.constraints.get(constraint_name) {
                Some(constraint_b) if constraint_a == constraint_b => {}
                Some(_) => diff.record(
                    format!("{}.{}", table_name, constraint_name),
                    Difference::Differs,
                ),
                None => diff.record(
                    format!("{}.{}", table_name, constraint_name),
                    Difference::MissingInB,
                ),
            }
        }
    }
}

impl Default for SchemaComparator {
    fn default() -> Self {
        Self::new()
    }
}
