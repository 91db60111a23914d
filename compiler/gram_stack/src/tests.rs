use super::*;

#[test]
fn test_deep_recursion() {
    // This would overflow without stack growth
    fn deep_recurse(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { deep_recurse(n - 1) + 1 })
    }

    assert_eq!(deep_recurse(100_000), 100_000);
}

#[test]
fn test_works_with_result_type() {
    let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(123));
    assert_eq!(result, Ok(123));
}

#[test]
fn test_limit_enter_exit() {
    let mut limit = RecursionLimit::new(2);
    assert_eq!(limit.enter(), Ok(()));
    assert_eq!(limit.enter(), Ok(()));
    assert_eq!(limit.depth(), 2);
    assert_eq!(limit.enter(), Err(LimitExceeded { limit: 2 }));
    assert_eq!(limit.depth(), 2, "a refused enter does not count");

    limit.exit();
    assert_eq!(limit.depth(), 1);
    assert_eq!(limit.enter(), Ok(()));
}

#[test]
fn test_zero_limit_refuses_everything() {
    let mut limit = RecursionLimit::new(0);
    assert!(limit.enter().is_err());
    assert_eq!(limit.limit(), 0);
}

#[test]
fn test_limit_exceeded_display() {
    assert_eq!(
        LimitExceeded { limit: 7 }.to_string(),
        "recursion limit of 7 exceeded"
    );
}
