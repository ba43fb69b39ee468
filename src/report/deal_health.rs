use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{config::HealthPolicy, domain::Deal, errors::CoreError};

/// Penalty applied when a deal sits in a stage past the warning threshold.
pub const STAGE_WARN_PENALTY: f64 = 35.0;
/// Penalty applied when a deal sits in a stage past the critical threshold.
pub const STAGE_CRITICAL_PENALTY: f64 = 75.0;
/// Base penalty for an overdue follow-up, before the per-day component.
pub const FOLLOW_UP_BASE_PENALTY: f64 = 20.0;
/// Per-day growth of the overdue follow-up penalty.
pub const FOLLOW_UP_DAILY_PENALTY: f64 = 2.0;
/// Ceiling on the overdue follow-up penalty.
pub const FOLLOW_UP_MAX_PENALTY: f64 = 40.0;
/// Penalty for a deal with no logged activity past the staleness threshold.
pub const ACTIVITY_STALE_PENALTY: f64 = 25.0;

/// Classification bands over the numeric score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HealthLevel {
    Healthy,
    Warning,
    Critical,
}

/// Result of scoring a single deal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DealHealth {
    /// Clamped to [0, 100].
    pub score: f64,
    pub level: HealthLevel,
    /// Every triggered penalty in human-readable form, most severe first.
    /// The UI shows only the first inline.
    pub reasons: Vec<String>,
}

/// Scores a deal with an additive-penalty model starting at 100.
///
/// Pure and idempotent: the reference times are passed in, the deal is never
/// mutated, and identical input always yields identical output. Terminal
/// stages are exempt from stage-age penalties.
pub fn deal_health(
    deal: &Deal,
    today: NaiveDate,
    now: DateTime<Utc>,
    policy: &HealthPolicy,
) -> Result<DealHealth, CoreError> {
    validate(deal)?;

    let mut penalties: Vec<(f64, String)> = Vec::new();

    if let Some(follow_up) = deal.next_follow_up {
        if follow_up < today {
            let days = (today - follow_up).num_days();
            let penalty = (FOLLOW_UP_BASE_PENALTY + days as f64 * FOLLOW_UP_DAILY_PENALTY)
                .min(FOLLOW_UP_MAX_PENALTY);
            penalties.push((penalty, format!("Follow-up overdue by {days} day(s)")));
        }
    }

    if !deal.stage.is_terminal() {
        let days_in_stage = (now - deal.stage_entered_at).num_days();
        if days_in_stage > policy.stage_critical_days {
            penalties.push((
                STAGE_CRITICAL_PENALTY,
                format!(
                    "Stuck in {} stage for {days_in_stage} days",
                    deal.stage.label()
                ),
            ));
        } else if days_in_stage > policy.stage_warn_days {
            penalties.push((
                STAGE_WARN_PENALTY,
                format!(
                    "In {} stage for {days_in_stage} days",
                    deal.stage.label()
                ),
            ));
        }
    }

    if let Some(last_activity) = deal.last_activity_at {
        let idle_days = (now - last_activity).num_days();
        if idle_days > policy.activity_stale_days {
            penalties.push((
                ACTIVITY_STALE_PENALTY,
                format!("No activity logged for {idle_days} days"),
            ));
        }
    }

    penalties.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let total_penalty: f64 = penalties.iter().map(|(p, _)| p).sum();
    let score = (100.0 - total_penalty).clamp(0.0, 100.0);
    let level = classify(score, policy);

    Ok(DealHealth {
        score,
        level,
        reasons: penalties.into_iter().map(|(_, reason)| reason).collect(),
    })
}

fn classify(score: f64, policy: &HealthPolicy) -> HealthLevel {
    if score >= policy.healthy_floor {
        HealthLevel::Healthy
    } else if score >= policy.warning_floor {
        HealthLevel::Warning
    } else {
        HealthLevel::Critical
    }
}

fn validate(deal: &Deal) -> Result<(), CoreError> {
    if !deal.estimated_value.is_finite() || deal.estimated_value < 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "deal {} has invalid estimated value {}",
            deal.id, deal.estimated_value
        )));
    }
    if !deal.win_probability.is_finite()
        || !(0.0..=100.0).contains(&deal.win_probability)
    {
        return Err(CoreError::InvalidInput(format!(
            "deal {} has win probability {} outside [0, 100]",
            deal.id, deal.win_probability
        )));
    }
    Ok(())
}
