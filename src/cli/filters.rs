//! Unified filter enums for CLI commands

use clap::ValueEnum;

/// Visibility filter for list commands
///
/// Entities with an `is_active` column are hidden from the public site
/// when inactive; by default lists show only what the site shows.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum ActiveFilter {
    /// Active rows only - default
    #[default]
    Active,
    /// Inactive rows only
    Inactive,
    /// Everything
    All,
}

impl ActiveFilter {
    /// Check if a row's active flag matches this filter
    pub fn matches(&self, is_active: bool) -> bool {
        match self {
            ActiveFilter::Active => is_active,
            ActiveFilter::Inactive => !is_active,
            ActiveFilter::All => true,
        }
    }
}

impl std::fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActiveFilter::Active => write!(f, "active"),
            ActiveFilter::Inactive => write!(f, "inactive"),
            ActiveFilter::All => write!(f, "all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_filter_matches() {
        assert!(ActiveFilter::Active.matches(true));
        assert!(!ActiveFilter::Active.matches(false));

        assert!(ActiveFilter::Inactive.matches(false));
        assert!(!ActiveFilter::Inactive.matches(true));

        assert!(ActiveFilter::All.matches(true));
        assert!(ActiveFilter::All.matches(false));
    }

    #[test]
    fn test_display() {
        assert_eq!(ActiveFilter::Active.to_string(), "active");
        assert_eq!(ActiveFilter::All.to_string(), "all");
    }
}
