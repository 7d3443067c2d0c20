//! Gating of capability-dependent operations.
//!
//! A capability is a named optional prerequisite: an optional feature
//! compiled into this build, or an environment variable that must be
//! present and non-empty. Evaluation returns a two-outcome value instead
//! of raising: a missing capability is expected, and the caller skips the
//! dependent operation rather than failing it. A skip is thereby
//! distinguishable from both a pass and a failure.
//!
//! ```rust
//! use strata_client::capability::{evaluate, Capability};
//!
//! let Some(endpoint) = evaluate(&Capability::Env("MY_ENDPOINT")).into_value() else {
//!     // skip the endpoint-dependent operation
//!     return;
//! };
//! let _ = endpoint;
//! ```

use tracing::debug;

/// Optional features of this crate, with their compile-time state.
const COMPILED_FEATURES: &[(&str, bool)] = &[("polars", cfg!(feature = "polars"))];

/// A named optional prerequisite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// An optional cargo feature of this crate, by name.
    Feature(&'static str),
    /// An environment variable that must be present and non-empty.
    ///
    /// Only presence is checked; format and reachability of whatever the
    /// variable points at are the dependent operation's concern.
    Env(&'static str),
}

/// Outcome of evaluating a [`Capability`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// The capability is present. Carries the resolved value: the feature
    /// name, or the environment variable's contents. Check and value
    /// extraction are a single evaluation.
    Available(String),
    /// The capability is absent; the dependent operation should be
    /// skipped, not executed and not treated as failed.
    Unavailable {
        /// Why the capability is absent.
        reason: String,
    },
}

impl Availability {
    /// `true` when the capability is present.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// The resolved value; `None` when unavailable.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable { .. } => None,
        }
    }

    /// Consume into the resolved value; `None` when unavailable.
    #[must_use]
    pub fn into_value(self) -> Option<String> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable { .. } => None,
        }
    }
}

/// Evaluate a capability against the current process state.
///
/// Side-effect-free and deterministic: repeated evaluation under the same
/// process state returns the same outcome. Never an error; absence is a
/// first-class outcome.
#[must_use]
pub fn evaluate(capability: &Capability) -> Availability {
    match *capability {
        Capability::Feature(name) => {
            let compiled = COMPILED_FEATURES
                .iter()
                .any(|(feature, enabled)| *feature == name && *enabled);
            if compiled {
                Availability::Available(name.to_string())
            } else {
                debug!(feature = name, "optional feature not compiled in");
                Availability::Unavailable {
                    reason: format!("optional feature '{name}' is not compiled into this build"),
                }
            }
        }
        Capability::Env(name) => match std::env::var(name) {
            Ok(value) if !value.trim().is_empty() => Availability::Available(value),
            _ => {
                debug!(variable = name, "environment variable not set");
                Availability::Unavailable {
                    reason: format!("environment variable '{name}' is not set"),
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_capability_carries_the_value() {
        let name = "STRATA_CAPABILITY_TEST_SET";
        std::env::set_var(name, "http://localhost:8123");

        let outcome = evaluate(&Capability::Env(name));
        assert_eq!(outcome.value(), Some("http://localhost:8123"));
        assert!(outcome.is_available());

        std::env::remove_var(name);
    }

    #[test]
    fn missing_env_is_unavailable_not_an_error() {
        let name = "STRATA_CAPABILITY_TEST_UNSET";
        std::env::remove_var(name);

        let outcome = evaluate(&Capability::Env(name));
        assert!(!outcome.is_available());
        assert_eq!(outcome.value(), None);
        match outcome {
            Availability::Unavailable { reason } => assert!(reason.contains(name)),
            Availability::Available(_) => panic!("expected unavailable"),
        }
    }

    #[test]
    fn empty_env_counts_as_unset() {
        let name = "STRATA_CAPABILITY_TEST_EMPTY";
        std::env::set_var(name, "   ");
        assert!(!evaluate(&Capability::Env(name)).is_available());
        std::env::remove_var(name);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let name = "STRATA_CAPABILITY_TEST_DETERMINISM";
        std::env::set_var(name, "value");

        let capability = Capability::Env(name);
        assert_eq!(evaluate(&capability), evaluate(&capability));

        std::env::remove_var(name);
        assert_eq!(evaluate(&capability), evaluate(&capability));
    }

    #[test]
    fn feature_capability_follows_the_build() {
        let outcome = evaluate(&Capability::Feature("polars"));
        assert_eq!(outcome.is_available(), cfg!(feature = "polars"));
    }

    #[test]
    fn unknown_feature_is_unavailable() {
        assert!(!evaluate(&Capability::Feature("no-such-feature")).is_available());
    }
}
