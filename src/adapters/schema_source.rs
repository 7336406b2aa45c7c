// スキーマソースアダプター
//
// スキーマ定義ファイルをメモリ上のテキストとして読み込みます。
// 読み込み失敗はその入力に対して致命的であり、IoError として呼び出し元へ返します。

use crate::core::error::IoError;
use std::fs;
use std::path::Path;

/// スキーマソースファイルを読み込む
///
/// # Arguments
///
/// * `path` - スキーマ定義ファイルのパス
///
/// # Returns
///
/// ファイル内容のテキスト
///
/// # Errors
///
/// - ファイルが存在しない場合
/// - ファイルの読み込みに失敗した場合
pub fn read_schema_source(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    fs::read_to_string(path).map_err(|e| IoError::FileRead {
        path: path.display().to_string(),
        cause: e.to_string(),
    })
}
