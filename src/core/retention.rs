// LogLens - core/retention.rs
//
// Retention guard: compares a requested time range against the active
// plan tier's retention allowance. The allowance table is an external
// policy input (config-overridable); this module only owns the check.

use crate::core::model::{PlanTier, TimeRange};
use crate::util::constants;

/// Per-tier retention allowances in days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// The caller's plan tier.
    pub tier: PlanTier,

    /// Allowance in days for each tier, indexed by `PlanTier`.
    free_days: i64,
    pro_days: i64,
    team_days: i64,
    enterprise_days: i64,
}

impl RetentionPolicy {
    /// Policy with the default allowance table for the given tier.
    pub fn for_tier(tier: PlanTier) -> Self {
        Self {
            tier,
            free_days: constants::RETENTION_FREE_DAYS,
            pro_days: constants::RETENTION_PRO_DAYS,
            team_days: constants::RETENTION_TEAM_DAYS,
            enterprise_days: constants::RETENTION_ENTERPRISE_DAYS,
        }
    }

    /// Policy with explicit per-tier overrides (from config.toml).
    pub fn with_allowances(
        tier: PlanTier,
        free_days: i64,
        pro_days: i64,
        team_days: i64,
        enterprise_days: i64,
    ) -> Self {
        Self {
            tier,
            free_days,
            pro_days,
            team_days,
            enterprise_days,
        }
    }

    /// Allowance in days for a tier.
    pub fn allowance_days(&self, tier: PlanTier) -> i64 {
        match tier {
            PlanTier::Free => self.free_days,
            PlanTier::Pro => self.pro_days,
            PlanTier::Team => self.team_days,
            PlanTier::Enterprise => self.enterprise_days,
        }
    }

    /// Allowance for the active tier.
    pub fn active_allowance_days(&self) -> i64 {
        self.allowance_days(self.tier)
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::for_tier(PlanTier::Free)
    }
}

/// A blocked range: the requested span exceeds the tier's allowance.
/// Presenting this blocks normal rendering behind the "Log retention"
/// upsell dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionBlock {
    /// The tier that was exceeded.
    pub tier: PlanTier,

    /// The tier's allowance in days.
    pub allowance_days: i64,

    /// The requested span in whole days, rounded up.
    pub requested_days: i64,
}

/// Check a requested range against the policy.
///
/// Returns `Some(block)` when the span exceeds the active tier's
/// allowance. Inverted ranges have zero span and never block.
pub fn check_range(range: &TimeRange, policy: &RetentionPolicy) -> Option<RetentionBlock> {
    let allowance_days = policy.active_allowance_days();
    let span = range.span();

    if span <= chrono::Duration::days(allowance_days) {
        return None;
    }

    // Round up so a span of 3 days + 1 second reports 4 days.
    let requested_days = (span.num_seconds() + 86_399) / 86_400;

    Some(RetentionBlock {
        tier: policy.tier,
        allowance_days,
        requested_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn range_of_days(days: i64) -> TimeRange {
        let end = Utc::now();
        TimeRange {
            start: end - Duration::days(days),
            end,
        }
    }

    #[test]
    fn test_last_three_days_blocks_free_only() {
        let range = range_of_days(3);
        for tier in PlanTier::all() {
            let policy = RetentionPolicy::for_tier(*tier);
            let block = check_range(&range, &policy);
            if *tier == PlanTier::Free {
                let block = block.expect("free tier must block a 3-day range");
                assert_eq!(block.allowance_days, 1);
                assert_eq!(block.requested_days, 3);
            } else {
                assert!(block.is_none(), "{tier} must allow a 3-day range");
            }
        }
    }

    #[test]
    fn test_five_month_range_blocks_every_tier() {
        let range = range_of_days(150);
        for tier in PlanTier::all() {
            let policy = RetentionPolicy::for_tier(*tier);
            assert!(
                check_range(&range, &policy).is_some(),
                "{tier} must block a 5-month range"
            );
        }
    }

    #[test]
    fn test_one_day_range_passes_every_tier() {
        let range = range_of_days(1);
        for tier in PlanTier::all() {
            let policy = RetentionPolicy::for_tier(*tier);
            assert!(check_range(&range, &policy).is_none());
        }
    }

    #[test]
    fn test_span_exactly_at_allowance_passes() {
        let policy = RetentionPolicy::for_tier(PlanTier::Pro);
        assert!(check_range(&range_of_days(7), &policy).is_none());
        assert!(check_range(&range_of_days(8), &policy).is_some());
    }

    #[test]
    fn test_inverted_range_never_blocks() {
        let start = Utc::now();
        let range = TimeRange {
            start,
            end: start - Duration::days(200),
        };
        let policy = RetentionPolicy::for_tier(PlanTier::Free);
        assert!(check_range(&range, &policy).is_none());
    }

    #[test]
    fn test_config_overrides_change_the_threshold() {
        let policy = RetentionPolicy::with_allowances(PlanTier::Free, 30, 60, 90, 365);
        assert!(check_range(&range_of_days(10), &policy).is_none());
        assert!(check_range(&range_of_days(31), &policy).is_some());
    }

    #[test]
    fn test_requested_days_round_up() {
        let end = Utc::now();
        let range = TimeRange {
            start: end - Duration::days(3) - Duration::seconds(1),
            end,
        };
        let policy = RetentionPolicy::for_tier(PlanTier::Free);
        let block = check_range(&range, &policy).unwrap();
        assert_eq!(block.requested_days, 4);
    }
}
