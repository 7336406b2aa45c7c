// Schemadiffライブラリのエントリーポイント
//
// モジュール構造:
// - cli: CLIレイヤー（ユーザー入力の受付とコマンドルーティング）
// - core: コアドメインロジック（スキーマの正準表現、差分レポート、エラー型）
// - adapters: ファイルシステムへのアクセスを抽象化
// - services: パーサー、パーサーファクトリー、スキーマ比較

pub mod adapters;
pub mod cli;
pub mod core;
pub mod services;
