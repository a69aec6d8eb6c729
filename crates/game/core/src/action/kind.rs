/// Discriminant of every operation the engine executes.
///
/// Used for logging, error reporting and in-flight bookkeeping.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum OperationKind {
    RegisterClick,
    Credit,
    Debit,
    PassiveTick,
    PurchaseUpgrade,
    OpenCase,
    ResolveCase,
    Mutate,
    ResolveMutation,
    RedeemPromo,
    GrantCurrency,
    GrantClickPower,
    GrantItem,
    ResetProgress,
}

impl OperationKind {
    /// Returns true for operations gated behind admin status.
    pub const fn is_privileged(&self) -> bool {
        matches!(
            self,
            Self::GrantCurrency | Self::GrantClickPower | Self::GrantItem | Self::ResetProgress
        )
    }
}
