//! 辞書キー用の64ビットフィンガープリント
//!
//! MurmurHash64Aによる決定的なハッシュを提供します。8バイトのブロックは
//! 常にリトルエンディアンで読み込むため、プラットフォームに依存せず、
//! 同じバイト列からは常に同じ値が得られます。暗号学的な安全性はありません。

use std::fmt;

use rkyv::{Archive, Deserialize, Serialize};

/// MurmurHash64Aのシード値
pub const FINGERPRINT_SEED: u64 = 0xfd14_deff;

const M: u64 = 0xc6a4_a793_5bd1_e995;
const R: u32 = 47;

/// バイト列の64ビットフィンガープリント
///
/// 辞書やキャッシュのキーとして使用される不透明な値です。
/// 衝突の扱いは呼び出し側の責任です。
#[derive(
    Clone, Copy, Default, Eq, PartialEq, Debug, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize,
)]
#[rkyv(compare(PartialEq), derive(Clone, Copy))]
#[repr(transparent)]
pub struct Fingerprint(pub u64);

impl Fingerprint {
    /// 内部のu64値を取得する
    #[inline(always)]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<Fingerprint> for u64 {
    fn from(fp: Fingerprint) -> Self {
        fp.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl ArchivedFingerprint {
    /// アーカイブされたFingerprintをネイティブ表現に変換する
    pub fn to_native(self) -> Fingerprint {
        Fingerprint(self.0.to_native())
    }
}

/// バイト列のフィンガープリントを計算します。
///
/// # 例
///
/// ```
/// # use mecab_utils::fingerprint::fingerprint;
/// assert_eq!(fingerprint(b"foo"), fingerprint(b"foo"));
/// assert_ne!(fingerprint(b"foo"), fingerprint(b"bar"));
/// ```
pub fn fingerprint(data: &[u8]) -> Fingerprint {
    Fingerprint(murmur_hash64a(data, FINGERPRINT_SEED))
}

/// 文字列のフィンガープリントを計算します。
///
/// UTF-8のバイト列に対する[`fingerprint`]と同じ値を返します。
#[inline(always)]
pub fn fingerprint_str(data: &str) -> Fingerprint {
    fingerprint(data.as_bytes())
}

fn murmur_hash64a(data: &[u8], seed: u64) -> u64 {
    let mut h = seed ^ (data.len() as u64).wrapping_mul(M);

    let mut blocks = data.chunks_exact(8);
    for block in &mut blocks {
        let mut buf = [0; 8];
        buf.copy_from_slice(block);
        let mut k = u64::from_le_bytes(buf);
        k = k.wrapping_mul(M);
        k ^= k >> R;
        k = k.wrapping_mul(M);
        h ^= k;
        h = h.wrapping_mul(M);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        for (i, &b) in tail.iter().enumerate() {
            h ^= u64::from(b) << (8 * i);
        }
        h = h.wrapping_mul(M);
    }

    h ^= h >> R;
    h = h.wrapping_mul(M);
    h ^= h >> R;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(fingerprint(b"").get(), 0x6096_55a6_ff4a_2047);
        assert_eq!(fingerprint(b"foo").get(), 0x5583_7a4a_03d0_3b7a);
        assert_eq!(fingerprint(b"bar").get(), 0xbef8_372c_ad7f_6851);
        // exactly one block, then one block plus a tail byte
        assert_eq!(fingerprint(b"abcdefgh").get(), 0x1711_ad42_2b1c_cda8);
        assert_eq!(fingerprint(b"abcdefghi").get(), 0x73ed_67da_dfad_748c);
        assert_eq!(fingerprint_str("東京").get(), 0x035e_2eb6_e922_1e91);
    }

    #[test]
    fn test_deterministic() {
        let a = fingerprint_str("形態素");
        for _ in 0..10 {
            assert_eq!(fingerprint_str("形態素"), a);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(fingerprint(b"foo").to_string(), "55837a4a03d03b7a");
        assert_eq!(Fingerprint(0x2a).to_string(), "000000000000002a");
    }

    #[test]
    fn test_no_collisions_on_lexical_keys() {
        let words = [
            "名詞", "動詞", "形容詞", "副詞", "助詞", "助動詞", "記号", "東京", "京都", "東京都",
            "a", "b", "ab", "ba", "foo", "bar", "baz", "",
        ];
        let set: hashbrown::HashSet<Fingerprint> =
            words.iter().map(|w| fingerprint_str(w)).collect();
        assert_eq!(set.len(), words.len());
    }

    #[test]
    fn test_archived_fingerprint() {
        let fps = vec![fingerprint(b"foo"), fingerprint(b"bar")];
        let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(&fps).unwrap();
        let archived =
            rkyv::access::<rkyv::Archived<Vec<Fingerprint>>, rkyv::rancor::Error>(&bytes).unwrap();
        assert_eq!(archived[0].to_native(), fps[0]);
        assert!(archived[1] == fps[1]);
    }
}
