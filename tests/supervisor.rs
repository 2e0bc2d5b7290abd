//! Process supervision against real child processes.

#![cfg(unix)]

mod common;

use std::time::{Duration, Instant};

use common::{fake_client, scratch_dir};
use voice_failover::supervisor::{
    ClientLauncher, LaunchError, ProcessState, StopOutcome, StopPolicy, Supervisor, SupervisorSettings,
};
use voice_failover::Endpoint;

fn supervisor(binary: std::path::PathBuf, grace: Duration) -> Supervisor<ClientLauncher> {
    Supervisor::new(
        ClientLauncher::new(binary),
        SupervisorSettings {
            desktop_session: false,
            stop: StopPolicy {
                grace,
                kill_grace: Duration::from_secs(2),
            },
            ..Default::default()
        },
    )
}

fn endpoint() -> Endpoint {
    Endpoint::new("127.0.0.1", 64738)
}

#[tokio::test]
async fn test_well_behaved_client_terminates() {
    let dir = scratch_dir("sup-term");
    let sup = supervisor(fake_client(&dir, "client", "exec sleep 30"), Duration::from_secs(2));

    let mut process = sup.launch(&endpoint()).unwrap();
    assert_eq!(process.state(), ProcessState::Running);
    assert!(sup.is_alive(&mut process));

    assert_eq!(sup.stop(&mut process).await, StopOutcome::Terminated);
    assert_eq!(process.state(), ProcessState::Stopped);
    assert!(process.bound_endpoint().is_none());

    // Second stop is a no-op.
    assert_eq!(sup.stop(&mut process).await, StopOutcome::AlreadyStopped);
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_stubborn_client_is_killed() {
    let dir = scratch_dir("sup-kill");
    let body = "trap '' TERM\nwhile true; do sleep 1; done";
    let sup = supervisor(fake_client(&dir, "client", body), Duration::from_millis(300));

    let mut process = sup.launch(&endpoint()).unwrap();
    // Give the shell time to install its trap.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let started = Instant::now();
    assert_eq!(sup.stop(&mut process).await, StopOutcome::Killed);
    assert!(started.elapsed() >= Duration::from_millis(300));
    assert_eq!(process.state(), ProcessState::Stopped);
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_exit_is_detected_and_binding_kept() {
    let dir = scratch_dir("sup-exit");
    let sup = supervisor(fake_client(&dir, "client", "exit 3"), Duration::from_secs(1));

    let mut process = sup.launch(&endpoint()).unwrap();
    let mut alive = true;
    for _ in 0..100 {
        alive = sup.is_alive(&mut process);
        if !alive {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(!alive);
    assert_eq!(process.state(), ProcessState::Stopped);
    assert_eq!(process.bound_endpoint(), Some(&endpoint()));

    assert_eq!(sup.stop(&mut process).await, StopOutcome::AlreadyStopped);
    assert!(process.bound_endpoint().is_none());
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_missing_binary_fails_launch() {
    let sup = supervisor("/nonexistent/mumble".into(), Duration::from_secs(1));
    let err = sup.launch(&endpoint()).unwrap_err();
    assert!(matches!(err, LaunchError::Spawn { .. }));
}
