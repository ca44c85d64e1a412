//! 辞書設定で使われる文字コード名
//!
//! 名前から[`Charset`]への変換のみを扱い、文字コードの判定や変換は行いません。

use std::fmt;
use std::str::FromStr;

use crate::errors::UtilError;

/// 辞書ファイルの文字コード
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Charset {
    /// EUC-JP
    EucJp,
    /// Shift_JIS (CP932)
    Cp932,
    /// UTF-8
    #[default]
    Utf8,
    /// UTF-16 (BOMによる判定)
    Utf16,
    /// UTF-16 リトルエンディアン
    Utf16Le,
    /// UTF-16 ビッグエンディアン
    Utf16Be,
    /// ASCII
    Ascii,
}

impl Charset {
    /// 文字コード名を解釈します。未知の名前はUTF-8とみなします。
    pub fn decode(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(name, "unknown charset name; falling back to UTF-8");
            Self::Utf8
        })
    }

    /// 正規の名前を返します。
    pub const fn name(self) -> &'static str {
        match self {
            Self::EucJp => "EUC-JP",
            Self::Cp932 => "CP932",
            Self::Utf8 => "UTF-8",
            Self::Utf16 => "UTF-16",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
            Self::Ascii => "ASCII",
        }
    }
}

impl FromStr for Charset {
    type Err = UtilError;

    /// 大文字と小文字を区別せずに文字コード名を解釈します。
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let charset = match name.to_ascii_lowercase().as_str() {
            "sjis" | "shift-jis" | "shift_jis" | "cp932" => Self::Cp932,
            "euc" | "euc_jp" | "euc-jp" => Self::EucJp,
            "utf8" | "utf_8" | "utf-8" => Self::Utf8,
            "utf16" | "utf_16" | "utf-16" => Self::Utf16,
            "utf16be" | "utf_16be" | "utf-16be" => Self::Utf16Be,
            "utf16le" | "utf_16le" | "utf-16le" => Self::Utf16Le,
            "ascii" => Self::Ascii,
            _ => {
                return Err(UtilError::invalid_argument(
                    "charset",
                    format!("unknown charset name: {name}"),
                ))
            }
        };
        Ok(charset)
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
