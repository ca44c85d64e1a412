//! 辞書の行をフィールドに分割するユーティリティ
//!
//! このバイナリは、標準入力から読み込んだ行を指定された方法（csv、split、collapse）で
//! 分割し、指定された出力形式（fields、csv、detail）で結果を出力します。
//! `--cost-column`を指定すると、その列の対数確率をコストに変換して出力します。

use std::borrow::Cow;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use mecab_utils::errors::UtilError;
use mecab_utils::escape::write_csv_row;
use mecab_utils::fingerprint::fingerprint;
use mecab_utils::tokenizer::{tokenize, tokenize_collapsed, tokenize_csv};
use mecab_utils::{CostQuantizer, DictionaryConfig};
use tracing_subscriber::EnvFilter;

/// 分割方法
#[derive(Clone, Copy, Debug)]
enum Policy {
    Csv,
    Split,
    Collapse,
}

impl FromStr for Policy {
    type Err = &'static str;

    fn from_str(policy: &str) -> Result<Self, Self::Err> {
        match policy {
            "csv" => Ok(Self::Csv),
            "split" => Ok(Self::Split),
            "collapse" => Ok(Self::Collapse),
            _ => Err("Could not parse a policy"),
        }
    }
}

/// 出力モード
#[derive(Clone, Copy, Debug)]
enum OutputMode {
    Fields,
    Csv,
    Detail,
}

/// `OutputMode` の `FromStr` 実装
impl FromStr for OutputMode {
    type Err = &'static str;

    /// 文字列から出力モードをパースする
    ///
    /// # 引数
    ///
    /// * `mode` - パース対象の文字列（"fields"、"csv"、"detail"のいずれか）
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "fields" => Ok(Self::Fields),
            "csv" => Ok(Self::Csv),
            "detail" => Ok(Self::Detail),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "fields", about = "Splits dictionary lines into fields")]
struct Args {
    /// Tokenization policy. Choices are csv, split, and collapse.
    #[clap(short = 'p', long, default_value = "csv")]
    policy: Policy,

    /// Delimiter bytes used by the split and collapse policies.
    #[clap(short = 'd', long, default_value = " \t")]
    delims: String,

    /// Maximum number of fields per line.
    #[clap(short = 'n', long)]
    max: Option<usize>,

    /// Output mode. Choices are fields, csv, and detail.
    #[clap(short = 'O', long, default_value = "fields")]
    output_mode: OutputMode,

    /// Zero-based column holding a log-probability to be converted into a cost.
    #[clap(short = 'c', long)]
    cost_column: Option<usize>,

    /// Factor multiplied when casting a log-probability into a cost.
    #[clap(short = 'f', long)]
    cost_factor: Option<f64>,

    /// Dictionary configuration file (dicrc) providing `cost-factor`.
    #[clap(short = 'r', long)]
    dicrc: Option<PathBuf>,
}

/// 実行中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
enum FieldsError {
    /// ライブラリのエラー
    #[error(transparent)]
    Util(#[from] UtilError),

    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// コスト係数が指定されていない
    #[error("--cost-column requires either --cost-factor or --dicrc")]
    MissingCostFactor,

    /// コスト列が存在しない
    #[error("line {line}: column {column} is missing")]
    MissingColumn { line: usize, column: usize },

    /// コスト列が数値でない
    #[error("line {line}: {source}")]
    InvalidScore {
        line: usize,
        source: std::num::ParseFloatError,
    },
}

/// コスト列の変換に使う量子化器を用意する
fn load_quantizer(args: &Args) -> Result<Option<CostQuantizer>, FieldsError> {
    if args.cost_column.is_none() {
        return Ok(None);
    }
    if let Some(factor) = args.cost_factor {
        return Ok(Some(CostQuantizer::new(factor)?));
    }
    match &args.dicrc {
        Some(path) => Ok(Some(DictionaryConfig::from_path(path)?.cost_quantizer()?)),
        None => Err(FieldsError::MissingCostFactor),
    }
}

/// メイン関数
///
/// 標準入力から読み込んだ行を分割し、指定された形式で標準出力に出力します。
fn main() -> Result<(), FieldsError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let quantizer = load_quantizer(&args)?;
    let max = args.max.unwrap_or(usize::MAX);
    let delims = args.delims.as_bytes();

    tracing::info!(policy = ?args.policy, max, "ready to split");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    for (i, line) in std::io::stdin().lock().lines().enumerate() {
        let lineno = i + 1;
        let mut line = line?.into_bytes();
        let mut raw = vec![];
        match args.policy {
            Policy::Csv => tokenize_csv(&mut line, max, &mut raw),
            Policy::Split => tokenize(&line, delims, max, &mut raw),
            Policy::Collapse => tokenize_collapsed(&line, delims, max, &mut raw),
        };

        let mut fields: Vec<Cow<str>> = raw.iter().map(|f| String::from_utf8_lossy(f)).collect();
        if let (Some(column), Some(quantizer)) = (args.cost_column, quantizer) {
            let field = fields.get_mut(column).ok_or(FieldsError::MissingColumn {
                line: lineno,
                column,
            })?;
            let score: f64 = field
                .trim()
                .parse()
                .map_err(|source| FieldsError::InvalidScore {
                    line: lineno,
                    source,
                })?;
            *field = Cow::Owned(quantizer.quantize(score).get().to_string());
        }

        match args.output_mode {
            OutputMode::Fields => {
                for (j, field) in fields.iter().enumerate() {
                    if j != 0 {
                        out.write_all(b"\t")?;
                    }
                    out.write_all(field.as_bytes())?;
                }
                out.write_all(b"\n")?;
            }
            OutputMode::Csv => {
                write_csv_row(&mut out, &fields)?;
                out.write_all(b"\n")?;
            }
            OutputMode::Detail => {
                for (j, (field, bytes)) in fields.iter().zip(&raw).enumerate() {
                    writeln!(
                        &mut out,
                        "{j}\t{}\tlen={}\t{field}",
                        fingerprint(bytes),
                        bytes.len(),
                    )?;
                }
                out.write_all(b"EOS\n")?;
            }
        }
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}
