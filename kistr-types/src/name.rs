//! Typed TR (transaction) names.

use core::fmt;

/// Typed key identifying one remote operation (TR).
///
/// The canonical form is a lower snake-case string such as `"bid_ask_list"`.
/// Lookups also accept the upper-case constant spelling (`"BID_ASK_LIST"`),
/// see [`TrName::matches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrName(&'static str);

impl TrName {
    /// Domestic stock ask/bid ladder with expected execution.
    pub const BID_ASK_LIST: Self = Self::new("bid_ask_list");

    /// Construct a typed TR name from a static canonical string.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the canonical string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }

    /// Whether `raw` names this TR, either canonically or via its constant alias.
    #[must_use]
    pub fn matches(self, raw: &str) -> bool {
        self.0 == raw || self.0.to_ascii_uppercase() == raw
    }
}

impl fmt::Display for TrName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for TrName {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl From<TrName> for &'static str {
    fn from(n: TrName) -> Self {
        n.0
    }
}
