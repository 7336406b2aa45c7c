// スキーマドメインモデル
//
// データベーススキーマの正準表現を提供する型システム。
// すべてのパーサーはこの Schema, Table, Column, Index, Constraint に収束し、
// コンパレーターはこれらのみを読み取ります。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// スキーマ定義
///
/// データベース全体のスキーマを表現します。
/// テーブル名をキーとしたテーブル定義のマップを保持します（挿入順は無関係）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// テーブル定義のマップ（テーブル名 -> Table）
    pub tables: HashMap<String, Table>,
}

impl Schema {
    /// 新しい空のスキーマを作成
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// テーブルを追加
    ///
    /// 同名のテーブルが既に存在する場合は上書きされます。
    pub fn add_table(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), table);
    }

    /// 指定されたテーブルが存在するか確認
    pub fn has_table(&self, table_name: &str) -> bool {
        self.tables.contains_key(table_name)
    }

    /// 指定されたテーブルを取得
    pub fn get_table(&self, table_name: &str) -> Option<&Table> {
        self.tables.get(table_name)
    }

    /// テーブル数を取得
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

/// テーブル定義
///
/// 単一のテーブルの構造を表現します。
/// カラム、インデックス、制約はそれぞれ名前をキーとしたマップで保持します。
/// 名前の衝突は黙って上書きされます（パーサー側の責務であり、モデルは強制しません）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// テーブル名
    pub name: String,

    /// カラム定義のマップ（カラム名 -> Column）
    pub columns: HashMap<String, Column>,

    /// インデックス定義のマップ（インデックス名 -> Index）
    pub indexes: HashMap<String, Index>,

    /// 制約定義のマップ（制約名 -> Constraint）
    pub constraints: HashMap<String, Constraint>,

    /// テーブルコメント
    pub comment: Option<String>,
}

impl Table {
    /// 新しいテーブルを作成
    pub fn new(name: String) -> Self {
        Self {
            name,
            columns: HashMap::new(),
            indexes: HashMap::new(),
            constraints: HashMap::new(),
            comment: None,
        }
    }

    /// カラムを追加（同名は上書き）
    pub fn add_column(&mut self, column: Column) {
        self.columns.insert(column.name.clone(), column);
    }

    /// インデックスを追加（同名は上書き。空名も有効なキー）
    pub fn add_index(&mut self, index: Index) {
        self.indexes.insert(index.name.clone(), index);
    }

    /// 制約を追加（同名は上書き）
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.insert(constraint.name.clone(), constraint);
    }

    /// 指定されたカラムを取得
    pub fn get_column(&self, column_name: &str) -> Option<&Column> {
        self.columns.get(column_name)
    }

    /// 指定されたインデックスを取得
    pub fn get_index(&self, index_name: &str) -> Option<&Index> {
        self.indexes.get(index_name)
    }

    /// 指定された制約を取得
    pub fn get_constraint(&self, constraint_name: &str) -> Option<&Constraint> {
        self.constraints.get(constraint_name)
    }
}

/// カラム定義
///
/// テーブル内の単一カラムの構造を表現します。
/// 型は不透明な文字列として保持し、意味的な正規化は行いません。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// カラム名
    pub name: String,

    /// カラム型（ソーステキストのままの文字列）
    #[serde(rename = "type")]
    pub column_type: String,

    /// NOT NULL フラグ
    pub not_null: bool,

    /// デフォルト値（引用符を除いたリテラルテキスト）
    pub default_value: Option<String>,

    /// カラムコメント
    pub comment: Option<String>,
}

impl Column {
    /// 新しいカラムを作成
    pub fn new(name: String, column_type: String) -> Self {
        Self {
            name,
            column_type,
            not_null: false,
            default_value: None,
            comment: None,
        }
    }
}

/// インデックス定義
///
/// テーブルのインデックスを表現します。
/// カラムリストの順序は意味を持ちます。名前は空文字列の場合があります。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    /// インデックス名（無名の場合は空文字列）
    pub name: String,

    /// インデックス対象のカラム名リスト（順序が有意）
    pub columns: Vec<String>,

    /// ユニークインデックスかどうか
    pub unique: bool,
}

impl Index {
    /// 新しいインデックスを作成
    pub fn new(name: String, columns: Vec<String>, unique: bool) -> Self {
        Self {
            name,
            columns,
            unique,
        }
    }
}

/// 制約の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintType {
    /// プライマリキー制約
    PrimaryKey,

    /// 外部キー制約
    ForeignKey,

    /// ユニーク制約
    Unique,

    /// チェック制約
    Check,
}

impl ConstraintType {
    /// 制約の種類を文字列で取得
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintType::PrimaryKey => "PRIMARY_KEY",
            ConstraintType::ForeignKey => "FOREIGN_KEY",
            ConstraintType::Unique => "UNIQUE",
            ConstraintType::Check => "CHECK",
        }
    }

    /// SQL キーワードから制約の種類を解決
    ///
    /// `CREATE TABLE` 本体の制約句の先頭キーワードに対応します。
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "PRIMARY KEY" => Some(ConstraintType::PrimaryKey),
            "FOREIGN KEY" => Some(ConstraintType::ForeignKey),
            "UNIQUE" => Some(ConstraintType::Unique),
            "CHECK" => Some(ConstraintType::Check),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 制約定義
///
/// テーブルの制約（PRIMARY KEY, FOREIGN KEY, UNIQUE, CHECK）を表現します。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// 制約名（無名の場合は空文字列）
    pub name: String,

    /// 制約の種類
    #[serde(rename = "type")]
    pub constraint_type: ConstraintType,

    /// 対象カラム名リスト（順序が有意）
    pub columns: Vec<String>,

    /// 参照先（FOREIGN KEY のみ。`table(column)` 形式）
    pub references: Option<String>,
}

impl Constraint {
    /// 新しい制約を作成
    pub fn new(name: String, constraint_type: ConstraintType, columns: Vec<String>) -> Self {
        Self {
            name,
            constraint_type,
            columns,
            references: None,
        }
    }

    /// 参照先を指定して外部キー制約を作成
    pub fn foreign_key(name: String, columns: Vec<String>, references: String) -> Self {
        Self {
            name,
            constraint_type: ConstraintType::ForeignKey,
            columns,
            references: Some(references),
        }
    }
}
