//! Diagnostics emitted through the `log` crate on write failures.

use logentries::{
    LeError, LeLogger,
    test_utils::{ScriptedDialer, TransportScript},
};
use logtest::Logger;

#[test]
fn failed_delivery_is_reported_once_per_interval() {
    let mut captured = Logger::start();
    let dialer = ScriptedDialer::new()
        .then_connect(TransportScript::failing_writes(1))
        .then_refuse()
        .then_refuse();
    let logger = LeLogger::builder("tok")
        .connect_with(dialer.clone())
        .expect("connect");

    let err = logger.print("first").expect_err("reopen refused");
    assert!(matches!(err, LeError::Connect(_)));
    let err = logger.print("second").expect_err("reopen refused again");
    assert!(matches!(err, LeError::Connect(_)));

    let mut messages = Vec::new();
    while let Some(record) = captured.pop() {
        if record.level() == log::Level::Warn {
            messages.push(record.args().to_string());
        }
    }
    let reconnects = messages
        .iter()
        .filter(|m| m.contains("write failed"))
        .count();
    let drops: Vec<_> = messages
        .iter()
        .filter(|m| m.contains("dropped"))
        .collect();
    assert_eq!(reconnects, 2, "each failed write announces its reconnect");
    assert_eq!(drops.len(), 1, "drop warnings are rate limited: {drops:?}");
    assert!(drops[0].contains("dropped 1 frames"));
}
