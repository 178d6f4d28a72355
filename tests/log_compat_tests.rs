//! The `log` crate bridge, installed as the process-wide logger.

use log::LevelFilter;
use logentries::{
    LeLogger, log_compat,
    test_utils::{ScriptedDialer, TransportScript},
};

const TOKEN: &str = "bridge-token";

#[test]
fn forwards_application_records_and_skips_its_own() {
    // The first write fails so the reconnect warning is logged while the
    // write lock is held; the bridge must not try to take it again.
    let dialer = ScriptedDialer::new().then_connect(TransportScript::failing_writes(1));
    let logger: &'static LeLogger<ScriptedDialer> = Box::leak(Box::new(
        LeLogger::builder(TOKEN)
            .with_prefix("bridge")
            .connect_with(dialer.clone())
            .expect("connect"),
    ));
    log_compat::install(logger, LevelFilter::Info).expect("install bridge");

    log::info!(target: "my_app", "user {} signed in", 7);
    log::debug!(target: "my_app", "below the configured level");
    log::warn!(target: "logentries::connection", "internal diagnostics stay local");
    log::error!(target: "my_app::db", "pool exhausted");

    assert_eq!(
        dialer.frames(),
        vec![
            format!("{TOKEN} bridge INFO my_app user 7 signed in\n").into_bytes(),
            format!("{TOKEN} bridge ERROR my_app::db pool exhausted\n").into_bytes(),
        ]
    );
    assert_eq!(dialer.dials(), 2, "first write reconnected once");
    assert!(
        log_compat::install(logger, LevelFilter::Info).is_err(),
        "a second global logger cannot be installed"
    );
}
