use serial_test::serial;
use std::env;
use trip_finder::config::TripFinderConfig;

const VARS: [&str; 5] = [
    "TRIPFINDER_PORT",
    "TRIPFINDER_DEFAULT_PAGE_SIZE",
    "TRIPFINDER_MAX_PAGE_SIZE",
    "TRIPFINDER_SEED_FILE",
    "TRIPFINDER_CORS_ALLOWED_ORIGIN",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = TripFinderConfig::from_env().unwrap();

    assert_eq!(config, TripFinderConfig::default());
}

#[test]
#[serial]
fn test_reads_prefixed_variables() {
    clear_env();
    env::set_var("TRIPFINDER_PORT", "9090");
    env::set_var("TRIPFINDER_MAX_PAGE_SIZE", "50");
    env::set_var("TRIPFINDER_SEED_FILE", "/tmp/trips.json");
    env::set_var("TRIPFINDER_CORS_ALLOWED_ORIGIN", "https://trips.example.org");

    let config = TripFinderConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.port, 9090);
    assert_eq!(config.max_page_size, 50);
    assert_eq!(config.default_page_size, 10);
    assert_eq!(config.seed_file.as_deref(), Some("/tmp/trips.json"));
    assert_eq!(config.cors_allowed_origin, "https://trips.example.org");
}

#[test]
#[serial]
fn test_unparseable_variable_falls_back_to_defaults() {
    clear_env();
    env::set_var("TRIPFINDER_PORT", "eighty");

    assert!(TripFinderConfig::from_env().is_err());
    let config = TripFinderConfig::from_env_or_default();
    clear_env();

    assert_eq!(config, TripFinderConfig::default());
}

#[test]
#[serial]
fn test_invalid_values_fail_validation() {
    clear_env();
    env::set_var("TRIPFINDER_DEFAULT_PAGE_SIZE", "0");

    let result = TripFinderConfig::from_env();
    clear_env();

    assert!(result.is_err());
}
