//! Common error infrastructure for clicker-core.
//!
//! Every transition reports failures through [`EconomyError`]. All variants are
//! expected, recoverable outcomes for the caller to display; none of them leaves
//! the player state partially mutated (see [`crate::engine::EconomyEngine`]).
//!
//! # Design Principles
//!
//! - **Rich Context**: Errors carry the nonce and item involved for diagnostics
//! - **Severity Classification**: Errors are categorized for logging and recovery
//! - **Stable Codes**: [`GameError::error_code`] gives a string suitable for metrics

use crate::env::TierId;
use crate::state::ItemId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed later (e.g. after earning more)
/// - **Validation**: the request itself is invalid and should not be retried as-is
/// - **Internal**: unexpected inconsistency between state and static data
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry once conditions change.
    ///
    /// Examples: not enough currency for a case
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown promo code, item already mutated
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: an owned item references a tier missing from the table
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorContext {
    /// Inventory item the operation targeted (if applicable).
    pub item: Option<ItemId>,

    /// Player nonce at the time of error.
    ///
    /// Correlates the failure with the random-draw sequence in logs.
    pub nonce: u64,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context with the given nonce.
    #[must_use]
    pub const fn new(nonce: u64) -> Self {
        Self {
            item: None,
            nonce,
            message: None,
        }
    }

    /// Attaches an item to this context (builder pattern).
    #[must_use]
    pub const fn with_item(mut self, item: ItemId) -> Self {
        self.item = Some(item);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all clicker-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Failures surfaced by economy transitions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EconomyError {
    /// The balance does not cover the price of the operation.
    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds {
        required: u64,
        available: u64,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    /// The submitted promo code is not recognised.
    #[error("promo code is not recognised")]
    InvalidCode {
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    /// The item has already used its single mutation attempt.
    #[error("item {item} has already been mutated")]
    AlreadyMutated {
        item: ItemId,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    /// No inventory item carries the requested id.
    #[error("item {item} not found in inventory")]
    NotFound {
        item: ItemId,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    /// A privileged operation was requested without admin status.
    #[error("operation requires admin privileges")]
    NotAdmin {
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    /// An item references a tier the rarity table does not define.
    #[error("tier '{tier}' is not defined in the rarity table")]
    UnknownTier {
        tier: TierId,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },
}

impl EconomyError {
    /// Creates an InsufficientFunds error with context.
    pub fn insufficient_funds(required: u64, available: u64, nonce: u64) -> Self {
        Self::InsufficientFunds {
            required,
            available,
            context: ErrorContext::new(nonce).with_message("balance below price"),
        }
    }

    /// Creates an InvalidCode error with context.
    pub fn invalid_code(nonce: u64) -> Self {
        Self::InvalidCode {
            context: ErrorContext::new(nonce),
        }
    }

    /// Creates an AlreadyMutated error with context.
    pub fn already_mutated(item: ItemId, nonce: u64) -> Self {
        Self::AlreadyMutated {
            item,
            context: ErrorContext::new(nonce)
                .with_item(item)
                .with_message("mutation attempt already spent"),
        }
    }

    /// Creates a NotFound error with context.
    pub fn not_found(item: ItemId, nonce: u64) -> Self {
        Self::NotFound {
            item,
            context: ErrorContext::new(nonce).with_item(item),
        }
    }

    /// Creates a NotAdmin error with context.
    pub fn not_admin(nonce: u64) -> Self {
        Self::NotAdmin {
            context: ErrorContext::new(nonce).with_message("admin status required"),
        }
    }

    /// Creates an UnknownTier error with context.
    pub fn unknown_tier(tier: TierId, item: ItemId, nonce: u64) -> Self {
        Self::UnknownTier {
            tier,
            context: ErrorContext::new(nonce)
                .with_item(item)
                .with_message("item tier missing from rarity table"),
        }
    }
}

impl GameError for EconomyError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientFunds { .. } => ErrorSeverity::Recoverable,
            Self::InvalidCode { .. } => ErrorSeverity::Validation,
            Self::AlreadyMutated { .. } => ErrorSeverity::Validation,
            Self::NotFound { .. } => ErrorSeverity::Validation,
            Self::NotAdmin { .. } => ErrorSeverity::Validation,
            Self::UnknownTier { .. } => ErrorSeverity::Internal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::InsufficientFunds { context, .. } => Some(context),
            Self::InvalidCode { context } => Some(context),
            Self::AlreadyMutated { context, .. } => Some(context),
            Self::NotFound { context, .. } => Some(context),
            Self::NotAdmin { context } => Some(context),
            Self::UnknownTier { context, .. } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::InvalidCode { .. } => "INVALID_CODE",
            Self::AlreadyMutated { .. } => "ALREADY_MUTATED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::NotAdmin { .. } => "NOT_ADMIN",
            Self::UnknownTier { .. } => "UNKNOWN_TIER",
        }
    }
}
