//! Panic funnel checks. Kept in their own test binary because
//! `catch_panics` replaces the process-wide panic hook.

use roster_cli::{catch_panics, classify, CliError, ErrorKind};
use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn panics_become_one_unknown_error_and_later_hooks_still_see_them() {
    let ok = catch_panics(|| Ok(7)).unwrap();
    assert_eq!(ok, 7);

    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let silent = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        counter.fetch_add(1, Ordering::SeqCst);
        silent(info);
    }));

    let err = catch_panics(|| -> Result<(), CliError> { panic!("boom") }).unwrap_err();
    assert_eq!(classify(&err), ErrorKind::Unknown);
    assert!(err.to_string().contains("boom"));
    assert_eq!(seen.load(Ordering::SeqCst), 1);

    let err = catch_panics(|| -> Result<(), CliError> {
        Err(CliError::Unknown("plain".to_string()))
    })
    .unwrap_err();
    assert!(err.to_string().contains("plain"));
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}
