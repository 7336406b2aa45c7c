// コマンドハンドラー層
// 各CLIコマンドの実装

pub mod diff;
pub mod diff_formatter;
pub mod parse;
