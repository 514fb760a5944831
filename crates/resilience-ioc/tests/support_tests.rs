//! Integration tests for engine wiring

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use resilience_core::retry::{Failure, RecordingObserver, RetryError};
use resilience_core::config::ENV_LIFETIME;
use resilience_core::{ConfigLoader, ServiceLifetime};
use resilience_ioc::{init_console_logging, ResilienceSupport};
use serial_test::serial;

#[test]
fn test_resolved_engine_notifies_wired_observer() {
    let observer = Arc::new(RecordingObserver::new());
    let provider = ResilienceSupport::new()
        .with_logger_support(false)
        .with_observer(observer.clone())
        .build()
        .unwrap();

    let retry = provider.resolve();
    let mut calls = 0;
    let result: Result<(), RetryError<std::io::Error>> = retry.perform(
        || {
            calls += 1;
            if calls < 3 {
                Err(Failure::retry("X"))
            } else {
                Ok(())
            }
        },
        Duration::from_millis(1),
        3,
    );

    assert!(result.is_ok());
    assert_eq!(observer.messages(), vec!["X", "X"]);
}

#[test]
fn test_transient_engines_share_the_hook() {
    let observer = Arc::new(RecordingObserver::new());
    let provider = ResilienceSupport::new()
        .with_logger_support(false)
        .with_lifetime(ServiceLifetime::Transient)
        .with_observer(observer.clone())
        .build()
        .unwrap();

    for _ in 0..3 {
        let err = provider
            .resolve()
            .until_true("never", || false, Duration::ZERO, 2)
            .unwrap_err();
        assert!(err.is_exhausted());
    }

    assert_eq!(observer.count(), 6);
}

#[tokio::test]
async fn test_singleton_engine_serves_concurrent_tasks() {
    let observer = Arc::new(RecordingObserver::new());
    let provider = ResilienceSupport::new()
        .with_logger_support(false)
        .with_observer(observer.clone())
        .build()
        .unwrap();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let retry = provider.resolve();
            let polls = Arc::new(AtomicU32::new(0));
            tokio::spawn(async move {
                retry
                    .until_false_async(
                        "busy",
                        || {
                            let polls = polls.clone();
                            // still busy on the first poll only
                            async move { polls.fetch_add(1, Ordering::SeqCst) == 0 }
                        },
                        Duration::from_millis(1),
                        2,
                    )
                    .await
            })
        })
        .collect();

    for task in tasks {
        assert!(task.await.unwrap().is_ok());
    }
    assert_eq!(observer.count(), 8);
    assert!(observer.messages().iter().all(|m| m == "busy"));
}

#[test]
#[serial]
fn test_console_logging_can_be_installed_twice() {
    assert!(init_console_logging("debug").is_ok());
    assert!(!init_console_logging("info").unwrap());
}

#[test]
#[serial]
fn test_build_with_logger_support() {
    let provider = ResilienceSupport::new().build().unwrap();
    let retry = provider.resolve();

    let err = retry
        .until_true("logged through tracing", || false, Duration::ZERO, 2)
        .unwrap_err();
    assert_eq!(err.to_string(), "logged through tracing");
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let err = init_console_logging("resilience_core=loud").unwrap_err();
    assert!(err.to_string().contains("Invalid log level directive"));
}

#[test]
#[serial]
fn test_from_env_reads_lifetime() {
    std::env::set_var(ENV_LIFETIME, "transient");
    let support = ResilienceSupport::from_env();
    std::env::remove_var(ENV_LIFETIME);

    assert_eq!(support.unwrap().lifetime(), ServiceLifetime::Transient);
}

#[test]
#[serial]
fn test_from_env_rejects_bad_lifetime() {
    std::env::set_var(ENV_LIFETIME, "scoped");
    let support = ResilienceSupport::from_env();
    std::env::remove_var(ENV_LIFETIME);

    assert!(support.is_err());
}

#[test]
#[serial]
fn test_wiring_from_config_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("resilience.yaml");
    std::fs::write(&path, "logger-support: false\nlifetime: transient\n").unwrap();
    let path = path.to_str().unwrap().to_string();

    let config = ConfigLoader::with_file(path).load().unwrap();
    let support = ResilienceSupport::from_config(&config);
    assert!(!support.logger_support());
    assert_eq!(support.lifetime(), ServiceLifetime::Transient);

    let observer = Arc::new(RecordingObserver::new());
    let provider = support.with_observer(observer.clone()).build().unwrap();
    assert!(!Arc::ptr_eq(&provider.resolve(), &provider.resolve()));

    let err = provider
        .resolve()
        .until_true("from file", || false, Duration::ZERO, 1)
        .unwrap_err();
    assert_eq!(err.to_string(), "from file");
    assert_eq!(observer.count(), 1);
}
