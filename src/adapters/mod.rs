// Adapters
// ファイルシステムへのアクセスを抽象化

pub mod schema_source;
