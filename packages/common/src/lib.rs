/// Implements `ALL`, `as_str`, `Display` and `FromStr` for a string-backed enum.
macro_rules! impl_str_conversions {
    ($name:ident, $kind:literal, { $($variant:ident => $value:literal),+ $(,)? }) => {
        impl $name {
            /// All possible values.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the stored string representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err($crate::ParseEnumError::new(
                        $kind,
                        s,
                        Self::ALL.iter().map(|v| v.as_str()),
                    )),
                }
            }
        }
    };
}

pub mod action;
pub mod config;
pub mod error;
pub mod production;
pub mod promotion;
pub mod purchase_order;
pub mod settings;
pub mod sync_status;

pub use action::{ActionStatus, ActionType, AutopilotModule};
pub use config::{AutopilotConfig, PromotionConfig, SchedulerConfig};
pub use error::ParseEnumError;
pub use production::RecommendationStatus;
pub use promotion::{PromotionStatus, PromotionType, TargetAudience};
pub use purchase_order::{OrderOrigin, PurchaseOrderStatus};
pub use settings::ExecutionFrequency;
pub use sync_status::{SyncStatus, TargetSystem};
