//! Validated solution and project names.
//!
//! Both names end up as directory names and as arguments to the external
//! toolchain, so they share one set of rules. Construction is the only place
//! validation happens; holding a `SolutionName` or `ProjectName` means the
//! value is safe to use as a path component.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Longest name accepted for a solution or base project.
pub const MAX_NAME_LEN: usize = 128;

const FORBIDDEN_CHARS: &[char] = &['/', '\\', '<', '>', ':', '"', '|', '?', '*'];

fn validate_name(field: &'static str, raw: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidName {
        field,
        name: raw.to_string(),
        reason: reason.to_string(),
    };

    if raw.trim().is_empty() {
        return Err(DomainError::EmptyName { field });
    }
    if raw.trim() != raw {
        return Err(invalid("leading or trailing whitespace"));
    }
    if raw == "." || raw == ".." {
        return Err(invalid("reserved directory name"));
    }
    if raw.starts_with('.') {
        return Err(invalid("cannot start with '.'"));
    }
    if raw.chars().count() > MAX_NAME_LEN {
        return Err(invalid(&format!("longer than {MAX_NAME_LEN} characters")));
    }
    if let Some(c) = raw.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(invalid(&format!("contains forbidden character '{c}'")));
    }
    if raw.chars().any(char::is_control) {
        return Err(invalid("contains control characters"));
    }
    Ok(())
}

macro_rules! validated_name {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap a name.
            pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
                let raw = raw.into();
                validate_name($field, &raw)?;
                Ok(Self(raw))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

validated_name!(
    /// Name of the solution; also the name of the solution directory.
    SolutionName,
    "solution"
);

validated_name!(
    /// Base project name. Layer projects are named `<base>.<Layer>`.
    ProjectName,
    "project"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_dotted_names() {
        let name = ProjectName::new("Contoso.Billing").unwrap();
        assert_eq!(name.as_str(), "Contoso.Billing");
        assert_eq!(name.to_string(), "Contoso.Billing");
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert_eq!(
            SolutionName::new(""),
            Err(DomainError::EmptyName { field: "solution" })
        );
        assert_eq!(
            ProjectName::new("   "),
            Err(DomainError::EmptyName { field: "project" })
        );
    }

    #[test]
    fn rejects_path_separators() {
        assert!(matches!(
            SolutionName::new("a/b"),
            Err(DomainError::InvalidName { .. })
        ));
        assert!(matches!(
            SolutionName::new("a\\b"),
            Err(DomainError::InvalidName { .. })
        ));
    }

    #[test]
    fn rejects_dot_prefixed_and_reserved() {
        for raw in [".", "..", ".hidden"] {
            assert!(
                matches!(SolutionName::new(raw), Err(DomainError::InvalidName { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        assert!(SolutionName::new(" Shop").is_err());
        assert!(SolutionName::new("Shop ").is_err());
    }

    #[test]
    fn rejects_windows_reserved_characters() {
        for raw in ["a<b", "a:b", "what?", "star*", "pi|pe", "q\"uote"] {
            assert!(ProjectName::new(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn rejects_control_characters() {
        assert!(ProjectName::new("tab\there").is_err());
    }

    #[test]
    fn rejects_overlong_names() {
        let long = "a".repeat(MAX_NAME_LEN + 1);
        assert!(ProjectName::new(long).is_err());
        assert!(ProjectName::new("a".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn parses_via_from_str() {
        let name: SolutionName = "Shop".parse().unwrap();
        assert_eq!(name.as_ref(), "Shop");
    }
}
