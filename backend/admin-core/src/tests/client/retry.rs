// Unit tests for RetryPolicy and its backoff schedule
// The schedule must be deterministic: operators reason about outage
// behavior in terms of "1s, 2s, 4s, give up"

use crate::client::RetryPolicy;

use std::time::Duration;

use backoff::backoff::Backoff;

/// **VALUE**: Verifies the default schedule is exactly 1s, 2s, 4s.
///
/// **WHY THIS MATTERS**: These three delays are the documented operational
/// contract for every admin page. Jitter or a wrong multiplier would make
/// persistently-failing operations take an unpredictable amount of time and
/// break the timeout math in calling code.
///
/// **BUG THIS CATCHES**: Would catch a non-zero randomization factor (the
/// backoff crate's default is 0.5, which this policy must override) or a
/// changed multiplier/initial delay.
#[test]
fn given_default_policy_when_schedule_drained_then_delays_are_1s_2s_4s() {
    let mut schedule = RetryPolicy::default().schedule();

    assert_eq!(schedule.next_backoff(), Some(Duration::from_secs(1)));
    assert_eq!(schedule.next_backoff(), Some(Duration::from_secs(2)));
    assert_eq!(schedule.next_backoff(), Some(Duration::from_secs(4)));
}

/// **VALUE**: Verifies the delay ceiling holds beyond the default bound.
///
/// **WHY THIS MATTERS**: Configs may raise `max_retries`. Without the cap,
/// retry 10 would wait over 8 minutes; with it, no single wait exceeds
/// `max_delay`.
#[test]
fn given_default_policy_when_drained_past_bound_then_delay_capped_at_max() {
    let mut schedule = RetryPolicy::default().schedule();

    for _ in 0..3 {
        schedule.next_backoff();
    }

    assert_eq!(schedule.next_backoff(), Some(Duration::from_secs(4)));
    assert_eq!(schedule.next_backoff(), Some(Duration::from_secs(4)));
}

/// **VALUE**: Verifies the schedule never terminates on its own.
///
/// **WHY THIS MATTERS**: The retry bound is enforced by the descriptor's
/// attempt counter, not by the schedule. If the schedule hit the backoff
/// crate's default 15-minute elapsed cutoff and returned None, the client
/// would fall back to the initial delay mid-sequence.
///
/// **BUG THIS CATCHES**: Would catch the `max_elapsed_time: None` override
/// being dropped.
#[test]
fn given_policy_schedule_when_drained_repeatedly_then_never_exhausts() {
    let mut schedule = RetryPolicy::default().schedule();

    for _ in 0..50 {
        assert!(schedule.next_backoff().is_some());
    }
}

/// **VALUE**: Verifies custom policies drive the schedule.
///
/// **WHY THIS MATTERS**: Tests and config-driven deployments rely on shorter
/// delays; if `schedule()` ignored the policy fields and hardcoded defaults,
/// integration tests would take seconds and config tuning would be a no-op.
#[test]
fn given_custom_policy_when_schedule_drained_then_uses_policy_fields() {
    let policy = RetryPolicy {
        max_retries: 2,
        initial_delay: Duration::from_millis(10),
        multiplier: 3.0,
        max_delay: Duration::from_millis(90),
    };

    let mut schedule = policy.schedule();

    assert_eq!(schedule.next_backoff(), Some(Duration::from_millis(10)));
    assert_eq!(schedule.next_backoff(), Some(Duration::from_millis(30)));
    assert_eq!(schedule.next_backoff(), Some(Duration::from_millis(90)));
}

/// **VALUE**: Verifies the default retry bound is 3 (4 total attempts).
///
/// **BUG THIS CATCHES**: Would catch a changed `DEFAULT_MAX_RETRIES` that
/// silently alters how long a failing operation occupies a page.
#[test]
fn given_default_policy_then_max_retries_is_three() {
    assert_eq!(RetryPolicy::default().max_retries, 3);
}
