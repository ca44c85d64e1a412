//! コスト量子化と対数空間での確率の加算
//!
//! 格子上の連接コストは16ビット符号付き整数に収める必要があります。
//! このモジュールでは、飽和することを型で表した[`Cost`]と、
//! 対数確率を整数コストへ変換する[`CostQuantizer`]、
//! 対数空間で確率を加算する[`logsumexp`]および[`LogSumExp`]を提供します。

use rkyv::{Archive, Deserialize, Serialize};

use crate::errors::{Result, UtilError};

/// log-sum-expで補正項を省略する差分のしきい値（自然対数単位）
///
/// 2つの値の差がこれを超えると、`exp(min - max)`は倍精度で無視できるため、
/// 大きい方の値をそのまま返します。
pub const MINUS_LOG_EPSILON: f64 = 50.0;

/// -32767から32767までの整数で表されるコスト
///
/// 浮動小数点数からの変換は常に飽和します。範囲外の値はエラーにならず、
/// 最も近い境界値に丸められます。
///
/// # 特徴
///
/// - rkyv によるゼロコピーシリアライゼーション対応
/// - 透過的な表現により、メモリレイアウトはi16と同一
#[derive(
    Clone, Copy, Default, Eq, PartialEq, Debug, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize,
)]
#[rkyv(compare(PartialEq), derive(Clone, Copy))]
#[repr(transparent)]
pub struct Cost(i16);

impl Cost {
    /// 表現可能な最大値(32767)
    pub const MAX: Self = Self(32767);

    /// 表現可能な最小値(-32767)
    ///
    /// `i16::MIN`は使用しません。符号反転で溢れないよう対称な範囲に制限しています。
    pub const MIN: Self = Self(-32767);

    /// 指定されたi16値からCostを生成する
    ///
    /// 値が範囲内であれば`Some(Cost)`を、`i16::MIN`の場合は`None`を返します。
    ///
    /// # 例
    ///
    /// ```
    /// # use mecab_utils::num::Cost;
    /// assert!(Cost::new(-32767).is_some());
    /// assert!(Cost::new(i16::MIN).is_none());
    /// ```
    #[inline(always)]
    pub const fn new(x: i16) -> Option<Self> {
        if x >= Self::MIN.get() {
            Some(Self(x))
        } else {
            None
        }
    }

    /// 浮動小数点数を飽和変換してCostを生成する
    ///
    /// 値は`[-32767, 32767]`に切り詰められた後、ゼロ方向に丸められます。
    /// NaNは0になります。
    ///
    /// # 例
    ///
    /// ```
    /// # use mecab_utils::num::Cost;
    /// assert_eq!(Cost::saturating_from_f64(12.9).get(), 12);
    /// assert_eq!(Cost::saturating_from_f64(-12.9).get(), -12);
    /// assert_eq!(Cost::saturating_from_f64(1e300), Cost::MAX);
    /// assert_eq!(Cost::saturating_from_f64(f64::NEG_INFINITY), Cost::MIN);
    /// ```
    #[inline(always)]
    pub fn saturating_from_f64(x: f64) -> Self {
        if x.is_nan() {
            return Self(0);
        }
        let clamped = x.clamp(f64::from(Self::MIN.get()), f64::from(Self::MAX.get()));
        // The clamped value always fits, so the cast only truncates the fraction.
        Self(clamped as i16)
    }

    /// 内部のi16値を取得する
    #[inline(always)]
    pub const fn get(self) -> i16 {
        self.0
    }
}

impl From<Cost> for i16 {
    fn from(cost: Cost) -> Self {
        cost.get()
    }
}

impl From<Cost> for i32 {
    fn from(cost: Cost) -> Self {
        i32::from(cost.get())
    }
}

impl ArchivedCost {
    /// アーカイブされたCostをネイティブ表現に変換する
    pub fn to_native(self) -> Cost {
        Cost(self.0.to_native())
    }
}

/// 対数確率`value`を倍率`scale`でコストに変換します。
///
/// `-scale * value`を計算し、[`Cost`]の範囲に飽和させます。
/// 確率が高い（対数確率が大きい）ほどコストは小さくなります。
///
/// # 例
///
/// ```
/// # use mecab_utils::num::{quantize, Cost};
/// assert_eq!(quantize(-0.5, 700.0).get(), 350);
/// assert_eq!(quantize(1e9, 1.0), Cost::MIN);
/// ```
#[inline(always)]
pub fn quantize(value: f64, scale: f64) -> Cost {
    Cost::saturating_from_f64(-scale * value)
}

/// 固定の倍率で対数確率をコストに変換する量子化器
///
/// コスト表全体で同じ倍率を使う必要があるため、倍率を一度検証して保持します。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostQuantizer {
    scale: f64,
}

impl CostQuantizer {
    /// 新しい量子化器を作成します。
    ///
    /// # 引数
    ///
    /// * `scale` - コストを整数にキャストする際に乗算される係数
    ///
    /// # エラー
    ///
    /// `scale`が有限の正の数でない場合、[`UtilError`]が返されます。
    pub fn new(scale: f64) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(UtilError::invalid_argument(
                "scale",
                format!("must be a finite positive number, got {scale}"),
            ));
        }
        Ok(Self { scale })
    }

    /// 倍率を取得します。
    #[inline(always)]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// 対数確率をコストに変換します。
    #[inline(always)]
    pub fn quantize(&self, value: f64) -> Cost {
        quantize(value, self.scale)
    }
}

/// 対数空間で2つの確率を加算します。
///
/// `init`が真の場合はアキュムレータの初期化とみなし、`y`をそのまま返します。
/// それ以外の場合は`log(exp(x) + exp(y))`を返します。差が
/// [`MINUS_LOG_EPSILON`]を超える場合は補正項を計算せず、大きい方を返します。
///
/// # 例
///
/// ```
/// # use mecab_utils::num::logsumexp;
/// assert_eq!(logsumexp(3.0, -1.0, true), -1.0);
/// assert!((logsumexp(0.0, 0.0, false) - 2f64.ln()).abs() < 1e-12);
/// assert_eq!(logsumexp(0.0, -1000.0, false), 0.0);
/// ```
#[inline]
pub fn logsumexp(x: f64, y: f64, init: bool) -> f64 {
    if init {
        return y;
    }
    log_add_exp(x, y, MINUS_LOG_EPSILON)
}

#[inline]
fn log_add_exp(x: f64, y: f64, threshold: f64) -> f64 {
    let (vmin, vmax) = if x < y { (x, y) } else { (y, x) };
    if vmax.is_infinite() || vmax > vmin + threshold {
        vmax
    } else {
        vmax + (vmin - vmax).exp().ln_1p()
    }
}

/// 対数確率の累積和を保持するアキュムレータ
///
/// [`logsumexp`]の初期化フラグを内部で管理します。
/// 何も加算していない状態の値は`log(0) = -inf`です。
///
/// ```
/// # use mecab_utils::num::LogSumExp;
/// let total: LogSumExp = [0.5f64.ln(), 0.25f64.ln(), 0.25f64.ln()].into_iter().collect();
/// assert!(total.value().abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogSumExp {
    total: f64,
    init: bool,
    threshold: f64,
}

impl Default for LogSumExp {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSumExp {
    /// 空のアキュムレータを作成します。
    pub const fn new() -> Self {
        Self::with_threshold(MINUS_LOG_EPSILON)
    }

    /// 補正項を省略するしきい値を指定してアキュムレータを作成します。
    pub const fn with_threshold(threshold: f64) -> Self {
        Self {
            total: f64::NEG_INFINITY,
            init: true,
            threshold,
        }
    }

    /// 対数確率を1つ加算します。
    #[inline]
    pub fn add(&mut self, x: f64) {
        self.total = if self.init {
            x
        } else {
            log_add_exp(self.total, x, self.threshold)
        };
        self.init = false;
    }

    /// 現在の累積値を返します。
    #[inline(always)]
    pub fn value(&self) -> f64 {
        self.total
    }

    /// まだ何も加算されていない場合に真を返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.init
    }
}

impl Extend<f64> for LogSumExp {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl FromIterator<f64> for LogSumExp {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}
