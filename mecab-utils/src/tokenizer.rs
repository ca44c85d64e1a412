//! 辞書の行をフィールドに分割するトークナイザ
//!
//! 3種類の分割方法を提供します。
//!
//! - [`tokenize_csv`]: ダブルクォートに対応したCSVの分割
//! - [`tokenize`], [`tokenize_str`]: 区切り文字による分割（空フィールドを保持）
//! - [`tokenize_collapsed`], [`tokenize_str_collapsed`]: 連続する区切り文字を1つとみなす分割
//!
//! いずれの関数も、入力バッファを借用したスライスを出力先の`Vec`に追加し、
//! 追加したフィールド数を返します。出力先の確保以外にヒープ割り当ては行いません。
//! フィールド数が`max`に達した場合は、エラーにせずそこで分割を打ち切ります。

/// CSV形式の行をフィールドに分割します。
///
/// - カンマで区切ります。フィールドの前の空白とタブは読み飛ばします。
/// - ダブルクォートで囲まれたフィールドでは、`""`を`"`に復号し、
///   閉じクォートから次のカンマまでの文字は捨てます。
/// - 閉じクォートがない場合は、バッファの終端で閉じたものとみなします。
/// - 末尾のカンマの後には空のフィールドが1つ続きます。
///
/// 復号はバッファ上でその場で行われるため、`text`は書き換えられます。
///
/// `max`個目のフィールドに到達した時点でテキストが残っている場合、
/// 最後のフィールドはその位置から行末までの残り全体（カンマを含む）になります。
///
/// # 引数
///
/// * `text` - 分割する行。復号のために書き換えられます。
/// * `max` - 出力するフィールドの最大数
/// * `out` - フィールドの追加先
///
/// # 戻り値
///
/// `out`に追加したフィールドの数（常に`max`以下）
///
/// # 例
///
/// ```
/// # use mecab_utils::tokenizer::tokenize_csv;
/// let mut line = b"\"a\"\"b\",c".to_vec();
/// let mut fields = vec![];
/// assert_eq!(tokenize_csv(&mut line, usize::MAX, &mut fields), 2);
/// assert_eq!(fields, [&b"a\"b"[..], b"c"]);
/// ```
pub fn tokenize_csv<'a>(text: &'a mut [u8], max: usize, out: &mut Vec<&'a [u8]>) -> usize {
    let mut rest = text;
    let mut n = 0;
    while n < max {
        let blanks = rest
            .iter()
            .take_while(|&&b| b == b' ' || b == b'\t')
            .count();
        let (_, field_start) = std::mem::take(&mut rest).split_at_mut(blanks);
        rest = field_start;

        let is_last = n + 1 == max;
        let quoted = rest.first() == Some(&b'"');

        // `len` is the length of the field at the head of `rest`; `next` is the
        // index of the comma terminating it, if any.
        let (len, next) = if quoted {
            let (decoded, close) = unquote_in_place(rest);
            if is_last {
                trace_merged_rest(&rest[close..], max);
                let tail = rest.len() - close;
                rest.copy_within(close.., decoded);
                (decoded + tail, None)
            } else {
                (decoded, find_comma(&rest[close..]).map(|i| close + i))
            }
        } else if is_last {
            trace_merged_rest(rest, max);
            (rest.len(), None)
        } else {
            let next = find_comma(rest);
            (next.unwrap_or(rest.len()), next)
        };

        let split = next.map_or(rest.len(), |i| i + 1);
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(split);
        let head: &'a [u8] = head;
        out.push(&head[..len]);
        n += 1;

        if next.is_none() {
            break;
        }
        rest = tail;
    }
    n
}

#[inline(always)]
fn trace_merged_rest(rest: &[u8], max: usize) {
    if find_comma(rest).is_some() {
        tracing::trace!(max, "CSV field limit reached; rest of the line kept in the last field");
    }
}

#[inline(always)]
fn find_comma(text: &[u8]) -> Option<usize> {
    text.iter().position(|&b| b == b',')
}

/// `field[0]`の開きクォートから始まるフィールドをその場で復号します。
///
/// 復号後の内容は`field[..decoded]`に書き込まれます。
/// 戻り値は`(decoded, close)`で、`close`は閉じクォートの直後の位置です。
/// 閉じクォートがない場合、`close`は`field.len()`です。
fn unquote_in_place(field: &mut [u8]) -> (usize, usize) {
    let mut read = 1;
    let mut write = 0;
    while read < field.len() {
        let b = field[read];
        read += 1;
        if b == b'"' {
            if field.get(read) != Some(&b'"') {
                return (write, read);
            }
            read += 1;
        }
        field[write] = b;
        write += 1;
    }
    (write, read)
}

/// 区切り文字の集合でバイト列を分割します。
///
/// 隣接する区切り文字の間には空のフィールドが生成されます。
/// 空の入力からは空のフィールドが1つ生成されます。
///
/// # 例
///
/// ```
/// # use mecab_utils::tokenizer::tokenize;
/// let mut fields = vec![];
/// assert_eq!(tokenize(b"a,,b", b",", usize::MAX, &mut fields), 3);
/// assert_eq!(fields, [&b"a"[..], b"", b"b"]);
/// ```
pub fn tokenize<'a>(text: &'a [u8], delims: &[u8], max: usize, out: &mut Vec<&'a [u8]>) -> usize {
    push_limited(text.split(|b| delims.contains(b)), max, out)
}

/// 区切り文字の集合でバイト列を分割し、空のフィールドを捨てます。
///
/// 連続する区切り文字は1つの境界として扱われるため、
/// 長さ0のフィールドが出力されることはありません。
///
/// ```
/// # use mecab_utils::tokenizer::tokenize_collapsed;
/// let mut fields = vec![];
/// assert_eq!(tokenize_collapsed(b"  a \t b ", b" \t", usize::MAX, &mut fields), 2);
/// assert_eq!(fields, [&b"a"[..], b"b"]);
/// ```
pub fn tokenize_collapsed<'a>(
    text: &'a [u8],
    delims: &[u8],
    max: usize,
    out: &mut Vec<&'a [u8]>,
) -> usize {
    push_limited(
        text.split(|b| delims.contains(b)).filter(|f| !f.is_empty()),
        max,
        out,
    )
}

/// [`tokenize`]の文字列版です。`delims`に含まれる任意の文字で分割します。
pub fn tokenize_str<'a>(text: &'a str, delims: &str, max: usize, out: &mut Vec<&'a str>) -> usize {
    push_limited(text.split(|c| delims.contains(c)), max, out)
}

/// [`tokenize_collapsed`]の文字列版です。
pub fn tokenize_str_collapsed<'a>(
    text: &'a str,
    delims: &str,
    max: usize,
    out: &mut Vec<&'a str>,
) -> usize {
    push_limited(
        text.split(|c| delims.contains(c)).filter(|f| !f.is_empty()),
        max,
        out,
    )
}

fn push_limited<T, I>(fields: I, max: usize, out: &mut Vec<T>) -> usize
where
    I: Iterator<Item = T>,
{
    let before = out.len();
    let mut fields = fields.peekable();
    while out.len() - before < max {
        match fields.next() {
            Some(f) => out.push(f),
            None => break,
        }
    }
    if fields.peek().is_some() {
        tracing::trace!(max, "field limit reached; remaining text dropped");
    }
    out.len() - before
}

/// CSV形式の行を解析してフィールドのベクターに分割する
///
/// [`tokenize_csv`]の所有権を持つ版です。
///
/// # 例
///
/// ```
/// # use mecab_utils::tokenizer::parse_csv_row;
/// let fields = parse_csv_row("名詞,トスカーナ");
/// assert_eq!(fields, vec!["名詞", "トスカーナ"]);
///
/// let fields_with_quote = parse_csv_row("名詞,\"1,2-ジクロロエタン\"");
/// assert_eq!(fields_with_quote, vec!["名詞", "1,2-ジクロロエタン"]);
/// ```
pub fn parse_csv_row(row: &str) -> Vec<String> {
    let mut buf = row.as_bytes().to_vec();
    let mut fields = vec![];
    tokenize_csv(&mut buf, usize::MAX, &mut fields);
    // Decoding only removes ASCII quotes, so every field stays valid UTF-8.
    fields
        .into_iter()
        .map(|f| String::from_utf8_lossy(f).into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv(text: &str, max: usize) -> Vec<String> {
        let mut buf = text.as_bytes().to_vec();
        let mut fields = vec![];
        let n = tokenize_csv(&mut buf, max, &mut fields);
        assert_eq!(n, fields.len());
        fields
            .iter()
            .map(|f| String::from_utf8(f.to_vec()).unwrap())
            .collect()
    }

    fn split<'a>(text: &'a str, delims: &str, max: usize) -> Vec<&'a str> {
        let mut fields = vec![];
        let n = tokenize_str(text, delims, max, &mut fields);
        assert_eq!(n, fields.len());
        fields
    }

    fn collapse<'a>(text: &'a str, delims: &str, max: usize) -> Vec<&'a str> {
        let mut fields = vec![];
        let n = tokenize_str_collapsed(text, delims, max, &mut fields);
        assert_eq!(n, fields.len());
        fields
    }

    #[test]
    fn test_csv_plain() {
        assert_eq!(csv("京都,4,4,5,京都", usize::MAX), ["京都", "4", "4", "5", "京都"]);
    }

    #[test]
    fn test_csv_doubled_quote() {
        assert_eq!(csv("\"a\"\"b\",c", usize::MAX), ["a\"b", "c"]);
    }

    #[test]
    fn test_csv_quoted_comma() {
        assert_eq!(
            csv("名詞,\"1,2-ジクロロエタン\",*", usize::MAX),
            ["名詞", "1,2-ジクロロエタン", "*"]
        );
    }

    #[test]
    fn test_csv_skips_after_closing_quote() {
        assert_eq!(csv("\"ab\"cd,e", usize::MAX), ["ab", "e"]);
    }

    #[test]
    fn test_csv_leading_blanks() {
        assert_eq!(csv(" a,\t b , \"c\"", usize::MAX), ["a", "b ", "c"]);
    }

    #[test]
    fn test_csv_empty_fields() {
        assert_eq!(csv("a,,b", usize::MAX), ["a", "", "b"]);
        assert_eq!(csv(",a", usize::MAX), ["", "a"]);
        assert_eq!(csv("a,", usize::MAX), ["a", ""]);
        assert_eq!(csv("", usize::MAX), [""]);
        assert_eq!(csv("\"\"", usize::MAX), [""]);
    }

    #[test]
    fn test_csv_unterminated_quote() {
        assert_eq!(csv("a,\"b,c", usize::MAX), ["a", "b,c"]);
        assert_eq!(csv("\"x\"\"", usize::MAX), ["x\""]);
    }

    #[test]
    fn test_csv_max_keeps_rest() {
        assert_eq!(csv("a,b,c,d", 2), ["a", "b,c,d"]);
        assert_eq!(csv("a,\"x\"\"y\",c", 2), ["a", "x\"y,c"]);
        assert_eq!(csv("a,b", 2), ["a", "b"]);
    }

    #[test]
    fn test_csv_max_zero() {
        assert!(csv("a,b", 0).is_empty());
    }

    #[test]
    fn test_csv_appends_to_sink() {
        let mut first = b"x,y".to_vec();
        let mut second = b"z".to_vec();
        let mut fields = vec![];
        assert_eq!(tokenize_csv(&mut first, usize::MAX, &mut fields), 2);
        assert_eq!(tokenize_csv(&mut second, usize::MAX, &mut fields), 1);
        assert_eq!(fields, [&b"x"[..], b"y", b"z"]);
    }

    #[test]
    fn test_split_keeps_empty() {
        assert_eq!(split("a,,b", ",", usize::MAX), ["a", "", "b"]);
        assert_eq!(split("", ",", usize::MAX), [""]);
        assert_eq!(split(",", ",", usize::MAX), ["", ""]);
    }

    #[test]
    fn test_split_multiple_delims() {
        assert_eq!(split("a b\tc", " \t", usize::MAX), ["a", "b", "c"]);
        assert_eq!(split("名詞、動詞", "、", usize::MAX), ["名詞", "動詞"]);
    }

    #[test]
    fn test_split_max() {
        assert_eq!(split("a,b,c", ",", 2), ["a", "b"]);
        assert!(split("a,b,c", ",", 0).is_empty());
    }

    #[test]
    fn test_collapse_drops_empty() {
        assert_eq!(collapse("a,,b", ",", usize::MAX), ["a", "b"]);
        assert_eq!(collapse(",,,", ",", usize::MAX), Vec::<&str>::new());
        assert_eq!(collapse("", ",", usize::MAX), Vec::<&str>::new());
        assert_eq!(collapse("  x  y ", " ", 1), ["x"]);
    }

    #[test]
    fn test_bytes_match_str() {
        let text = "1 2\t\t3";
        let mut by_bytes = vec![];
        tokenize(text.as_bytes(), b" \t", usize::MAX, &mut by_bytes);
        let by_str: Vec<&[u8]> = split(text, " \t", usize::MAX)
            .into_iter()
            .map(str::as_bytes)
            .collect();
        assert_eq!(by_bytes, by_str);

        let mut collapsed = vec![];
        tokenize_collapsed(text.as_bytes(), b" \t", usize::MAX, &mut collapsed);
        assert_eq!(collapsed, [&b"1"[..], b"2", b"3"]);
    }

    #[test]
    fn test_parse_csv_row() {
        assert_eq!(
            &["名詞", "トスカーナ"],
            parse_csv_row("名詞,トスカーナ").as_slice()
        );
    }

    #[test]
    fn test_parse_csv_row_with_quote() {
        assert_eq!(
            &["名詞", "1,2-ジクロロエタン"],
            parse_csv_row("名詞,\"1,2-ジクロロエタン\"").as_slice()
        );
    }
}
