//! Wilaya (Algerian province) codes.
//!
//! Shipping prices are keyed by the numeric wilaya code. Codes reach the
//! server as strings from form fields and query parameters, and are read
//! the same way a browser's `parseInt` reads them: leading whitespace is
//! skipped, an optional sign and the leading run of digits are taken, and
//! anything after the digits is ignored (`"16 - Alger"` is wilaya 16).

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Arabic wilaya names, indexed by `code - 1`.
const NAMES: [&str; 58] = [
    "أدرار",
    "الشلف",
    "الأغواط",
    "أم البواقي",
    "باتنة",
    "بجاية",
    "بسكرة",
    "بشار",
    "البليدة",
    "البويرة",
    "تمنراست",
    "تبسة",
    "تلمسان",
    "تيارت",
    "تيزي وزو",
    "الجزائر",
    "الجلفة",
    "جيجل",
    "سطيف",
    "سعيدة",
    "سكيكدة",
    "سيدي بلعباس",
    "عنابة",
    "قالمة",
    "قسنطينة",
    "المدية",
    "مستغانم",
    "المسيلة",
    "معسكر",
    "ورقلة",
    "وهران",
    "البيض",
    "إليزي",
    "برج بوعريريج",
    "بومرداس",
    "الطارف",
    "تندوف",
    "تيسمسيلت",
    "الوادي",
    "خنشلة",
    "سوق أهراس",
    "تيبازة",
    "ميلة",
    "عين الدفلى",
    "النعامة",
    "عين تموشنت",
    "غرداية",
    "غليزان",
    "تيميمون",
    "برج باجي مختار",
    "أولاد جلال",
    "بني عباس",
    "عين صالح",
    "عين قزام",
    "تقرت",
    "جانت",
    "المغير",
    "المنيعة",
];

/// Errors that can occur when parsing a [`WilayaCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WilayaCodeError {
    /// The input has no leading digits.
    #[error("wilaya code must start with a number: {0:?}")]
    NotANumber(String),
    /// The leading digits do not fit in a wilaya code.
    #[error("wilaya code out of range: {0:?}")]
    OutOfRange(String),
}

/// A wilaya code as stored in the `shipping_zones.wilaya_code` column.
///
/// Parsing does not check that the code names a real wilaya: an unknown
/// code simply has no shipping zone. Use [`WilayaCode::is_known`] when a
/// range check matters for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WilayaCode(i32);

impl WilayaCode {
    /// Highest code in the current administrative division.
    pub const MAX_KNOWN: i32 = 58;

    /// Wrap a numeric code.
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// The numeric code.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Whether the code is within `1..=58`.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.0 >= 1 && self.0 <= Self::MAX_KNOWN
    }

    /// Arabic name of a known wilaya.
    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        let index = usize::try_from(self.0.checked_sub(1)?).ok()?;
        NAMES.get(index).copied()
    }

    /// All known wilayas, in code order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=Self::MAX_KNOWN).map(Self)
    }

    /// Parse a code with `parseInt` semantics.
    ///
    /// # Errors
    ///
    /// Returns [`WilayaCodeError::NotANumber`] if no digits follow the
    /// optional whitespace and sign, or [`WilayaCodeError::OutOfRange`] if
    /// the digits overflow an `i32`.
    pub fn parse(input: &str) -> Result<Self, WilayaCodeError> {
        let trimmed = input.trim_start();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let digits = rest
            .get(..digits_len)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| WilayaCodeError::NotANumber(input.to_owned()))?;

        let magnitude: i64 = digits
            .parse()
            .map_err(|_| WilayaCodeError::OutOfRange(input.to_owned()))?;
        let value = if negative { -magnitude } else { magnitude };

        i32::try_from(value)
            .map(Self)
            .map_err(|_| WilayaCodeError::OutOfRange(input.to_owned()))
    }
}

impl fmt::Display for WilayaCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl FromStr for WilayaCode {
    type Err = WilayaCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i32> for WilayaCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}
