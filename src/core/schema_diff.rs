// スキーマ差分ドメインモデル
//
// 2つのスキーマ間の構造的な差分レポートを表現する型システム。
// キーは `<テーブル名>` または `<テーブル名>.<メンバー名>` のドット区切りパスです。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 差分の種類
///
/// 方向付きの固定語彙でレンダリングされます。
/// "missing in a" / "missing in b" はどちら側に要素が欠けているかを示します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difference {
    /// 要素が片側 a に存在しない
    #[serde(rename = "missing in a")]
    MissingInA,

    /// 要素が片側 b に存在しない
    #[serde(rename = "missing in b")]
    MissingInB,

    /// 両側に存在するがフィールドが一致しない
    #[serde(rename = "differs")]
    Differs,
}

impl Difference {
    /// 差分の説明文字列を取得
    pub fn as_str(&self) -> &'static str {
        match self {
            Difference::MissingInA => "missing in a",
            Difference::MissingInB => "missing in b",
            Difference::Differs => "differs",
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// スキーマ差分レポート
///
/// 2つのスキーマ間の差分を表現します。
/// エントリが空であることがスキーマ等価の定義です。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDiff {
    /// 差分エントリのマップ（ドット区切りパス -> 差分の種類）
    pub entries: BTreeMap<String, Difference>,
}

impl SchemaDiff {
    /// 新しい空のスキーマ差分を作成
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// 差分エントリを記録
    ///
    /// 同一キーへの再記録は上書きされます（キーは構成上一意）。
    pub fn record(&mut self, key: String, difference: Difference) {
        self.entries.insert(key, difference);
    }

    /// 差分が空かどうか（空 = 両スキーマが等価）
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 差分の項目数を取得
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// 説明文字列のマップとして取得
    ///
    /// 外部レイヤー向けの `パス -> 説明` 形式です。
    pub fn descriptions(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(key, difference)| (key.clone(), difference.as_str().to_string()))
            .collect()
    }
}

impl Default for SchemaDiff {
    fn default() -> Self {
        Self::new()
    }
}
