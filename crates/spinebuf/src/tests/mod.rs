
/// Number of quickcheck cases to run for each property.
fn quickcheck_budget() -> u64 {
    if cfg!(any(miri, feature = "test-fast")) {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}
