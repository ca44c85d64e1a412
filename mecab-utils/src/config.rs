//! 辞書設定ファイル（dicrc）の読み込み
//!
//! dicrcは1行に1つの`key = value`を書く形式です。空行と、`#`または`;`で始まる行は
//! 読み飛ばされます。同じキーが複数回現れた場合は後の値が優先されます。

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use hashbrown::HashMap;

use crate::charset::Charset;
use crate::errors::{Result, UtilError};
use crate::escape::unescape;
use crate::num::CostQuantizer;
use crate::tokenizer::parse_csv_row;

/// コスト係数のキー
pub const COST_FACTOR_KEY: &str = "cost-factor";

/// 辞書の文字コードのキー
pub const CHARSET_KEY: &str = "config-charset";

/// BOS/EOSの素性のキー
pub const BOS_FEATURE_KEY: &str = "bos-feature";

/// dicrcから読み込んだ辞書設定
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DictionaryConfig {
    entries: HashMap<String, String>,
}

impl DictionaryConfig {
    /// リーダーから設定を読み込みます。
    ///
    /// # 引数
    ///
    /// * `rdr` - dicrcのリーダー
    ///
    /// # エラー
    ///
    /// `=`を含まない行やキーが空の行がある場合、または読み込み中に
    /// I/Oエラーが発生した場合に[`UtilError`]が返されます。
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut entries = HashMap::new();
        for (i, line) in BufReader::new(rdr).lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                UtilError::invalid_format("dicrc", format!("line {}: missing '='", i + 1))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(UtilError::invalid_format(
                    "dicrc",
                    format!("line {}: empty key", i + 1),
                ));
            }
            entries.insert(key.to_string(), value.trim().to_string());
        }
        tracing::debug!(keys = entries.len(), "loaded dictionary configuration");
        Ok(Self { entries })
    }

    /// ファイルから設定を読み込みます。
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::from_reader(File::open(path)?)
    }

    /// 生の値を取得します。
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// 値を設定します。既存の値は上書きされます。
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.entries.insert(key.into(), value.into());
    }

    /// 設定されているキーの数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 設定が空の場合に真を返します。
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// コスト係数を取得します。
    ///
    /// # エラー
    ///
    /// `cost-factor`が存在しない場合、整数でない場合、正でない場合にエラーを返します。
    pub fn cost_factor(&self) -> Result<i32> {
        let value = self.get(COST_FACTOR_KEY).ok_or_else(|| {
            UtilError::invalid_format("dicrc", format!("{COST_FACTOR_KEY} is not defined"))
        })?;
        let factor: i32 = value.parse()?;
        if factor <= 0 {
            return Err(UtilError::invalid_argument(
                "cost-factor",
                format!("must be positive, got {factor}"),
            ));
        }
        Ok(factor)
    }

    /// コスト係数から量子化器を作成します。
    pub fn cost_quantizer(&self) -> Result<CostQuantizer> {
        let factor = self.cost_factor()?;
        tracing::debug!(factor, "building cost quantizer");
        CostQuantizer::new(f64::from(factor))
    }

    /// 辞書の文字コード。未指定の場合はUTF-8です。
    pub fn charset(&self) -> Charset {
        self.get(CHARSET_KEY).map_or(Charset::Utf8, Charset::decode)
    }

    /// BOS/EOSの素性。エスケープシーケンスは復号されます。
    pub fn bos_feature(&self) -> Option<String> {
        self.get(BOS_FEATURE_KEY).map(unescape)
    }

    /// BOS/EOSの素性をCSVのフィールドに分割したもの
    pub fn bos_feature_fields(&self) -> Option<Vec<String>> {
        self.bos_feature().map(|f| parse_csv_row(&f))
    }
}
