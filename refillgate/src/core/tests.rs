use super::ConfigError;
use super::limiter::{LimiterConfig, RateLimiter, Verdict};
use super::shared::SharedLimiter;
use super::store::UnboundedStore;
use std::time::{Duration, SystemTime};

fn limiter(
    max_attempts: u32,
    refill_amount: u32,
    period_secs: u64,
) -> RateLimiter<UnboundedStore> {
    let config =
        LimiterConfig::new(max_attempts, refill_amount, Duration::from_secs(period_secs)).unwrap();
    RateLimiter::new(config, UnboundedStore::new())
}

#[test]
fn test_fresh_identity_is_admitted() {
    let mut limiter = limiter(5, 1, 60);
    let now = SystemTime::now();

    let verdict = limiter.query("fresh", now);
    match verdict {
        Verdict::Admitted {
            should_warn,
            refill_at,
        } => {
            assert!(!should_warn);
            assert_eq!(refill_at, now + Duration::from_secs(60));
        }
        Verdict::Exceeded { .. } => panic!("fresh identity must be admitted"),
    }
}

#[test]
fn test_single_attempt_warns_immediately() {
    let mut limiter = limiter(1, 1, 60);
    let now = SystemTime::now();

    // With max_attempts = 1, the very first admit drains the quota
    match limiter.query("one_shot", now) {
        Verdict::Admitted { should_warn, .. } => assert!(should_warn),
        Verdict::Exceeded { .. } => panic!("first query must be admitted"),
    }
}

#[test]
fn test_monotonic_exhaustion() {
    let mut limiter = limiter(3, 3, 60);
    let now = SystemTime::now();

    for i in 0..3 {
        let verdict = limiter.query("exhaust", now);
        assert!(verdict.is_admitted(), "query {} should be admitted", i + 1);
    }

    // 4th query within the same period is rejected
    match limiter.query("exhaust", now) {
        Verdict::Exceeded { retry_at } => {
            assert_eq!(retry_at, now + Duration::from_secs(60));
        }
        Verdict::Admitted { .. } => panic!("quota should be exhausted"),
    }
}

#[test]
fn test_warn_threshold() {
    let mut limiter = limiter(5, 1, 60);
    let now = SystemTime::now();

    // First four admits do not warn
    for i in 0..4 {
        match limiter.query("warn", now) {
            Verdict::Admitted { should_warn, .. } => {
                assert!(!should_warn, "admit {} should not warn", i + 1)
            }
            Verdict::Exceeded { .. } => panic!("admit {} should succeed", i + 1),
        }
    }

    // The 5th admit drains the quota and warns
    match limiter.query("warn", now) {
        Verdict::Admitted { should_warn, .. } => assert!(should_warn),
        Verdict::Exceeded { .. } => panic!("5th query should still be admitted"),
    }

    // And the 6th is rejected
    assert!(!limiter.query("warn", now).is_admitted());
}

#[test]
fn test_refill_after_one_period() {
    let mut limiter = limiter(3, 3, 60);
    let start = SystemTime::now();

    for _ in 0..3 {
        assert!(limiter.query("refill", start).is_admitted());
    }
    assert!(!limiter.query("refill", start).is_admitted());

    // Exactly one period later the quota is back
    let later = start + Duration::from_secs(60);
    assert!(limiter.query("refill", later).is_admitted());

    // A never-seen identity queried at the same instant is independent
    assert!(limiter.query("refill_other", later).is_admitted());
}

#[test]
fn test_partial_refill_accumulates() {
    let mut limiter = limiter(5, 1, 10);
    let start = SystemTime::now();

    for _ in 0..5 {
        assert!(limiter.query("partial", start).is_admitted());
    }
    assert!(!limiter.query("partial", start).is_admitted());

    // One period grants one attempt back, not the full quota
    let later = start + Duration::from_secs(10);
    assert!(limiter.query("partial", later).is_admitted());
    assert!(!limiter.query("partial", later).is_admitted());

    // Three periods after the last admit grant three attempts
    let much_later = later + Duration::from_secs(30);
    for _ in 0..3 {
        assert!(limiter.query("partial", much_later).is_admitted());
    }
    assert!(!limiter.query("partial", much_later).is_admitted());
}

#[test]
fn test_refill_is_capped_at_max_attempts() {
    let mut limiter = limiter(3, 3, 60);
    let start = SystemTime::now();

    assert!(limiter.query("capped", start).is_admitted());

    // A very long idle stretch must not grant more than max_attempts
    let later = start + Duration::from_secs(60 * 1000);
    for _ in 0..3 {
        assert!(limiter.query("capped", later).is_admitted());
    }
    assert!(!limiter.query("capped", later).is_admitted());
}

#[test]
fn test_retry_at_is_stable_while_exceeded() {
    let mut limiter = limiter(2, 2, 60);
    let start = SystemTime::now();

    assert!(limiter.query("stable", start).is_admitted());
    let last_admit = start + Duration::from_secs(5);
    assert!(limiter.query("stable", last_admit).is_admitted());

    let expected_retry = last_admit + Duration::from_secs(60);

    // Repeated exceeded queries before retry_at report the same instant
    for offset in [10u64, 20, 40, 59] {
        match limiter.query("stable", last_admit + Duration::from_secs(offset)) {
            Verdict::Exceeded { retry_at } => assert_eq!(retry_at, expected_retry),
            Verdict::Admitted { .. } => panic!("still within the exhausted period"),
        }
    }

    // At retry_at the query succeeds again
    assert!(limiter.query("stable", expected_retry).is_admitted());
}

#[test]
fn test_refill_anchor_advances_on_admit() {
    let mut limiter = limiter(2, 2, 60);
    let start = SystemTime::now();

    assert!(limiter.query("anchor", start).is_admitted());

    // Second admit 30s in moves the anchor, so the refill instant is
    // relative to the last consumption, not the first
    let mid = start + Duration::from_secs(30);
    match limiter.query("anchor", mid) {
        Verdict::Admitted { refill_at, .. } => {
            assert_eq!(refill_at, mid + Duration::from_secs(60));
        }
        Verdict::Exceeded { .. } => panic!("second query should be admitted"),
    }

    match limiter.query("anchor", mid) {
        Verdict::Exceeded { retry_at } => {
            assert_eq!(retry_at, mid + Duration::from_secs(60));
        }
        Verdict::Admitted { .. } => panic!("quota should be exhausted"),
    }
}

#[test]
fn test_identities_are_isolated() {
    let mut limiter = limiter(2, 2, 60);
    let now = SystemTime::now();

    assert!(limiter.query("alpha", now).is_admitted());
    assert!(limiter.query("alpha", now).is_admitted());
    assert!(!limiter.query("alpha", now).is_admitted());

    // Exhausting alpha leaves beta untouched
    assert!(limiter.query("beta", now).is_admitted());
}

#[test]
fn test_clock_regression_counts_as_zero_elapsed() {
    let mut limiter = limiter(3, 3, 60);
    let start = SystemTime::now();

    assert!(limiter.query("backwards", start).is_admitted());

    // A query with an earlier timestamp must not panic, must not credit
    // a refill, and must not move the anchor backwards
    let earlier = start - Duration::from_secs(30);
    assert!(limiter.query("backwards", earlier).is_admitted());
    assert!(limiter.query("backwards", earlier).is_admitted());
    match limiter.query("backwards", earlier) {
        Verdict::Exceeded { retry_at } => {
            assert_eq!(retry_at, start + Duration::from_secs(60));
        }
        Verdict::Admitted { .. } => panic!("quota should be exhausted"),
    }
}

#[test]
fn test_invalid_config_is_rejected() {
    let period = Duration::from_secs(60);
    assert_eq!(
        LimiterConfig::new(0, 1, period).unwrap_err(),
        ConfigError::ZeroMaxAttempts
    );
    assert_eq!(
        LimiterConfig::new(5, 0, period).unwrap_err(),
        ConfigError::ZeroRefillAmount
    );
    assert_eq!(
        LimiterConfig::new(5, 1, Duration::ZERO).unwrap_err(),
        ConfigError::ZeroRefillPeriod
    );
}

#[test]
fn test_limiters_do_not_share_state() {
    let mut first = limiter(1, 1, 60);
    let mut second = limiter(1, 1, 60);
    let now = SystemTime::now();

    assert!(first.query("shared_key", now).is_admitted());
    assert!(!first.query("shared_key", now).is_admitted());

    // Same key, separate limiter, separate record store
    assert!(second.query("shared_key", now).is_admitted());
}

#[test]
fn test_concurrent_queries_never_over_admit() {
    let config = LimiterConfig::new(8, 1, Duration::from_secs(60)).unwrap();
    let shared = SharedLimiter::new(RateLimiter::new(config, UnboundedStore::new()));
    let now = SystemTime::now();

    // 32 threads race for 8 attempts; exactly 8 may win
    let handles: Vec<_> = (0..32)
        .map(|_| {
            let limiter = shared.clone();
            std::thread::spawn(move || limiter.query("contended", now).is_admitted())
        })
        .collect();

    let admitted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|admitted| *admitted)
        .count();

    assert_eq!(admitted, 8);
}
