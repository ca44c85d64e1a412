//! # mecab-utils
//!
//! MeCab形式の辞書と格子のコスト計算で使われる、低レベルな文字列・数値ユーティリティです。
//!
//! ## 概要
//!
//! 辞書コンパイラは、辞書の各行を[`tokenizer`]でフィールドに分割し、
//! 数値フィールドを[`num`]で格子用のコストに変換し、見出し語の
//! [`fingerprint`]を索引のキーとして使用します。各コンポーネントは互いに依存せず、
//! 呼び出し側が用意したバッファに対する状態を持たない関数として実装されています。
//!
//! ## 主な機能
//!
//! - **ゼロコピーの分割**: ダブルクォート対応のCSV分割と区切り文字による分割
//! - **飽和するコスト型**: 対数確率を16ビットの[`Cost`](num::Cost)に量子化
//! - **log-sum-exp**: 対数空間での確率の加算
//! - **決定的なフィンガープリント**: プラットフォームに依存しない64ビットハッシュ
//! - **エスケープ**: CSVフィールドのエスケープとC形式のエスケープシーケンスの復号
//! - **辞書設定**: dicrcからのコスト係数と文字コードの読み込み
//!
//! ## 使用例
//!
//! ```
//! use mecab_utils::{fingerprint, tokenizer, CostQuantizer};
//!
//! let mut line = "京都,-2.5,\"1,2\"".as_bytes().to_vec();
//! let mut fields = vec![];
//! assert_eq!(tokenizer::tokenize_csv(&mut line, 8, &mut fields), 3);
//! assert_eq!(fields[2], b"1,2");
//!
//! let score: f64 = std::str::from_utf8(fields[1]).unwrap().parse().unwrap();
//! let quantizer = CostQuantizer::new(700.0).unwrap();
//! assert_eq!(quantizer.quantize(score).get(), 1750);
//!
//! let key = fingerprint::fingerprint(fields[0]);
//! assert_eq!(key, fingerprint::fingerprint_str("京都"));
//! ```
/// 辞書設定で使われる文字コード名
pub mod charset;

/// 辞書設定ファイルの読み込み
pub mod config;

/// エラー型の定義
pub mod errors;

/// CSVとエスケープシーケンスの処理
pub mod escape;

/// 64ビットフィンガープリント
pub mod fingerprint;

/// コストとlog-sum-exp
pub mod num;

/// フィールドへの分割
pub mod tokenizer;


// Re-exports
pub use config::DictionaryConfig;
pub use fingerprint::Fingerprint;
pub use num::{Cost, CostQuantizer, LogSumExp};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
