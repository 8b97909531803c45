//! Shared proptest configuration for domain property suites.

pub fn proptest_config() -> proptest::test_runner::Config {
    proptest::test_runner::Config {
        cases: 64,
        ..proptest::test_runner::Config::default()
    }
}
