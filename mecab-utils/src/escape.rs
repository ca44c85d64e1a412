//! CSVのエスケープとC形式のエスケープシーケンスの復号
//!
//! - [`escape_csv_element`]: 1つの値をCSVのフィールドとして安全な形に書き換える
//! - [`write_csv_row`]: フィールド列をエスケープしてCSVの1行として書き出す
//! - [`escaped_char`], [`unescape`]: `\n`などのエスケープシーケンスを復号する

use std::io::Write;

/// 値がCSVのフィールドとして安全でない場合、その場で引用符付きの形式に書き換えます。
///
/// 値にカンマ、ダブルクォート、改行（`\n`または`\r`）が含まれる場合、全体を
/// ダブルクォートで囲み、内部のダブルクォートを二重にします。
/// それ以外の場合、値は変更されません。
///
/// # 戻り値
///
/// 書き換えが行われた場合は`true`
///
/// # 例
///
/// ```
/// # use mecab_utils::escape::escape_csv_element;
/// let mut w = String::from("1,2-ジクロロエタン");
/// assert!(escape_csv_element(&mut w));
/// assert_eq!(w, "\"1,2-ジクロロエタン\"");
///
/// let mut w = String::from("名詞");
/// assert!(!escape_csv_element(&mut w));
/// assert_eq!(w, "名詞");
/// ```
pub fn escape_csv_element(w: &mut String) -> bool {
    if !w.contains([',', '"', '\n', '\r']) {
        return false;
    }
    let mut escaped = String::with_capacity(w.len() + 2);
    escaped.push('"');
    for c in w.chars() {
        if c == '"' {
            escaped.push('"');
        }
        escaped.push(c);
    }
    escaped.push('"');
    *w = escaped;
    true
}

/// CSVの1行を書き出します。
///
/// 各フィールドは[`escape_csv_element`]でエスケープされ、カンマで連結されます。
/// 行末には改行を付けません。
///
/// # 引数
///
/// * `wtr` - 書き込み先のWriterオブジェクト
/// * `fields` - 書き込むフィールド
///
/// # エラー
///
/// 書き込み中にI/Oエラーが発生した場合は`std::io::Error`を返します。
pub fn write_csv_row<W, I, S>(mut wtr: W, fields: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cell = String::new();
    for (i, field) in fields.into_iter().enumerate() {
        if i != 0 {
            wtr.write_all(b",")?;
        }
        cell.clear();
        cell.push_str(field.as_ref());
        escape_csv_element(&mut cell);
        wtr.write_all(cell.as_bytes())?;
    }
    Ok(())
}

/// エスケープシーケンスの文字を対応する制御文字に変換します。
///
/// `0 a b t n v f r s \` をそれぞれ NUL、BEL、BS、TAB、LF、VT、FF、CR、空白、
/// バックスラッシュに変換します。それ以外の文字はNULになります。
#[inline]
pub const fn escaped_char(c: char) -> char {
    match c {
        '0' => '\0',
        'a' => '\x07',
        'b' => '\x08',
        't' => '\t',
        'n' => '\n',
        'v' => '\x0b',
        'f' => '\x0c',
        'r' => '\r',
        's' => ' ',
        '\\' => '\\',
        _ => '\0',
    }
}

/// 文字列中のバックスラッシュによるエスケープシーケンスをすべて復号します。
///
/// 末尾に単独で残ったバックスラッシュはそのまま残します。
///
/// ```
/// # use mecab_utils::escape::unescape;
/// assert_eq!(unescape(r"%m\t%H\n"), "%m\t%H\n");
/// assert_eq!(unescape(r"a\sb\\"), "a b\\");
/// ```
pub fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some(e) => result.push(escaped_char(e)),
            None => result.push('\\'),
        }
    }
    result
}
