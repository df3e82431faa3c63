//! End-to-end tests for `usbipd wsl detach`.
//!
//! Every test drives the full path from command-line tokens to exit status
//! against a backend that records the calls it receives.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use usbipd_cli::cli;
use usbipd_cli::error::{BackendError, BackendResult, CliError};
use usbipd_cli::output::{Console, MemoryConsole};
use usbipd_cli::{BusId, DetachBackend, ExitCode, HardwareId, Selector};

const TEST_BUS_ID: &str = "3-42";
const TEST_HARDWARE_ID: &str = "0123:cdef";

#[derive(Debug, Clone, Copy)]
enum Behavior {
    Succeed,
    Fail,
    Cancel,
    /// Block until canceled, then report success anyway.
    SucceedAfterCancel,
    Defect,
}

struct MockBackend {
    behavior: Behavior,
    calls: Mutex<Vec<Selector>>,
}

impl MockBackend {
    fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Selector> {
        self.calls.lock().unwrap().clone()
    }

    async fn respond(&self, selector: Selector, cancel: &CancellationToken) -> BackendResult<()> {
        self.calls.lock().unwrap().push(selector);
        match self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail => Err(BackendError::Failed("device is not attached".to_string())),
            Behavior::Cancel => Err(BackendError::Canceled),
            Behavior::SucceedAfterCancel => {
                cancel.cancelled().await;
                Ok(())
            }
            Behavior::Defect => Err(anyhow::anyhow!("unexpected backend state").into()),
        }
    }
}

#[async_trait]
impl DetachBackend for MockBackend {
    async fn detach_all(
        &self,
        _console: &dyn Console,
        cancel: &CancellationToken,
    ) -> BackendResult<()> {
        self.respond(Selector::All, cancel).await
    }

    async fn detach_bus(
        &self,
        bus_id: BusId,
        _console: &dyn Console,
        cancel: &CancellationToken,
    ) -> BackendResult<()> {
        self.respond(Selector::ByBus(bus_id), cancel).await
    }

    async fn detach_hardware(
        &self,
        hardware_id: HardwareId,
        _console: &dyn Console,
        cancel: &CancellationToken,
    ) -> BackendResult<()> {
        self.respond(Selector::ByHardware(hardware_id), cancel).await
    }
}

fn bus_selector() -> Selector {
    Selector::ByBus(TEST_BUS_ID.parse().unwrap())
}

fn hardware_selector() -> Selector {
    Selector::ByHardware(TEST_HARDWARE_ID.parse().unwrap())
}

async fn run_with(backend: &MockBackend, args: &[&str]) -> (ExitCode, MemoryConsole) {
    let console = MemoryConsole::new();
    let argv = std::iter::once("usbipd").chain(args.iter().copied());
    let code = cli::run(argv, backend, &console, &CancellationToken::new())
        .await
        .unwrap();
    (code, console)
}

/// Run and assert the expected exit status and backend calls.
async fn check(behavior: Behavior, expected: ExitCode, calls: &[Selector], args: &[&str]) {
    let backend = MockBackend::new(behavior);
    let (code, _) = run_with(&backend, args).await;
    assert_eq!(code, expected, "exit status for {:?}", args);
    assert_eq!(backend.calls(), calls, "backend calls for {:?}", args);
}

/// Run input that must be rejected before reaching the backend.
async fn check_parse_error(args: &[&str]) -> MemoryConsole {
    let backend = MockBackend::new(Behavior::Succeed);
    let (code, console) = run_with(&backend, args).await;
    assert_eq!(code, ExitCode::ParseError, "exit status for {:?}", args);
    assert!(backend.calls().is_empty(), "backend called for {:?}", args);
    console
}

#[tokio::test]
async fn test_all_success() {
    check(Behavior::Succeed, ExitCode::Success, &[Selector::All], &["wsl", "detach", "--all"]).await;
}

#[tokio::test]
async fn test_all_failure() {
    check(Behavior::Fail, ExitCode::Failure, &[Selector::All], &["wsl", "detach", "--all"]).await;
}

#[tokio::test]
async fn test_all_canceled() {
    check(Behavior::Cancel, ExitCode::Canceled, &[Selector::All], &["wsl", "detach", "--all"]).await;
}

#[tokio::test]
async fn test_bus_id_success() {
    check(
        Behavior::Succeed,
        ExitCode::Success,
        &[bus_selector()],
        &["wsl", "detach", "--busid", TEST_BUS_ID],
    )
    .await;
}

#[tokio::test]
async fn test_bus_id_failure() {
    check(
        Behavior::Fail,
        ExitCode::Failure,
        &[bus_selector()],
        &["wsl", "detach", "--busid", TEST_BUS_ID],
    )
    .await;
}

#[tokio::test]
async fn test_bus_id_canceled() {
    check(
        Behavior::Cancel,
        ExitCode::Canceled,
        &[bus_selector()],
        &["wsl", "detach", "--busid", TEST_BUS_ID],
    )
    .await;
}

#[tokio::test]
async fn test_hardware_id_success() {
    check(
        Behavior::Succeed,
        ExitCode::Success,
        &[hardware_selector()],
        &["wsl", "detach", "--hardware-id", TEST_HARDWARE_ID],
    )
    .await;
}

#[tokio::test]
async fn test_hardware_id_failure() {
    check(
        Behavior::Fail,
        ExitCode::Failure,
        &[hardware_selector()],
        &["wsl", "detach", "--hardware-id", TEST_HARDWARE_ID],
    )
    .await;
}

#[tokio::test]
async fn test_hardware_id_canceled() {
    check(
        Behavior::Cancel,
        ExitCode::Canceled,
        &[hardware_selector()],
        &["wsl", "detach", "--hardware-id", TEST_HARDWARE_ID],
    )
    .await;
}

#[tokio::test]
async fn test_short_options() {
    check(Behavior::Succeed, ExitCode::Success, &[Selector::All], &["wsl", "detach", "-a"]).await;
    check(
        Behavior::Succeed,
        ExitCode::Success,
        &[bus_selector()],
        &["wsl", "detach", "-b", TEST_BUS_ID],
    )
    .await;
    check(
        Behavior::Succeed,
        ExitCode::Success,
        &[hardware_selector()],
        &["wsl", "detach", "-i", TEST_HARDWARE_ID],
    )
    .await;
}

#[tokio::test]
async fn test_failure_reason_reported() {
    let backend = MockBackend::new(Behavior::Fail);
    let (code, console) = run_with(&backend, &["wsl", "detach", "--all"]).await;
    assert_eq!(code, ExitCode::Failure);
    assert!(console.err().contains("device is not attached"));
}

#[tokio::test]
async fn test_help() {
    let backend = MockBackend::new(Behavior::Succeed);
    let (code, console) = run_with(&backend, &["wsl", "detach", "--help"]).await;
    assert_eq!(code, ExitCode::Success);
    assert!(backend.calls().is_empty());
    assert!(console.out().contains("--hardware-id"));
}

#[tokio::test]
async fn test_help_suppresses_selectors() {
    let backend = MockBackend::new(Behavior::Succeed);
    let (code, _) = run_with(&backend, &["wsl", "detach", "--all", "--help"]).await;
    assert_eq!(code, ExitCode::Success);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_option_missing() {
    let console = check_parse_error(&["wsl", "detach"]).await;
    assert!(console.err().contains("exactly one of"));
}

#[tokio::test]
async fn test_option_missing_with_stray_argument() {
    let console = check_parse_error(&["wsl", "detach", "stray-argument"]).await;
    assert!(console.err().contains("exactly one of"));
}

#[tokio::test]
async fn test_all_and_bus_id() {
    check_parse_error(&["wsl", "detach", "--all", "--busid", TEST_BUS_ID]).await;
}

#[tokio::test]
async fn test_all_and_hardware_id() {
    check_parse_error(&["wsl", "detach", "--all", "--hardware-id", TEST_HARDWARE_ID]).await;
}

#[tokio::test]
async fn test_bus_id_and_hardware_id() {
    let console = check_parse_error(&[
        "wsl",
        "detach",
        "--busid",
        TEST_BUS_ID,
        "--hardware-id",
        TEST_HARDWARE_ID,
    ])
    .await;
    assert!(console.err().contains("'--busid' cannot be used with '--hardware-id'"));
}

#[tokio::test]
async fn test_all_three_selectors() {
    check_parse_error(&[
        "wsl",
        "detach",
        "--all",
        "--busid",
        TEST_BUS_ID,
        "--hardware-id",
        TEST_HARDWARE_ID,
    ])
    .await;
}

#[tokio::test]
async fn test_all_with_argument() {
    let console = check_parse_error(&["wsl", "detach", "--all=argument"]).await;
    assert!(console.err().contains("does not take an argument"));
}

#[tokio::test]
async fn test_bus_id_argument_missing() {
    let console = check_parse_error(&["wsl", "detach", "--busid"]).await;
    assert!(console.err().contains("requires an argument"));
}

#[tokio::test]
async fn test_hardware_id_argument_missing() {
    check_parse_error(&["wsl", "detach", "--hardware-id"]).await;
}

#[tokio::test]
async fn test_bus_id_argument_invalid() {
    let console = check_parse_error(&["wsl", "detach", "--busid", "not-a-busid"]).await;
    assert!(console.err().contains("not-a-busid"));
}

#[tokio::test]
async fn test_hardware_id_argument_invalid() {
    check_parse_error(&["wsl", "detach", "--hardware-id", "not-a-hardware-id"]).await;
}

#[tokio::test]
async fn test_stray_argument() {
    let console =
        check_parse_error(&["wsl", "detach", "--busid", TEST_BUS_ID, "stray-argument"]).await;
    assert!(console.err().contains("stray-argument"));
}

#[tokio::test]
async fn test_unknown_option() {
    check_parse_error(&["wsl", "detach", "--all", "--unknown"]).await;
}

#[tokio::test]
async fn test_deterministic_exit_status() {
    for _ in 0..3 {
        check(Behavior::Fail, ExitCode::Failure, &[Selector::All], &["wsl", "detach", "--all"])
            .await;
    }
}

#[tokio::test]
async fn test_cancellation_during_call_wins_over_success() {
    let backend = MockBackend::new(Behavior::SucceedAfterCancel);
    let console = MemoryConsole::new();
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let code = cli::run(
        ["usbipd", "wsl", "detach", "--busid", TEST_BUS_ID],
        &backend,
        &console,
        &cancel,
    )
    .await
    .unwrap();

    assert_eq!(code, ExitCode::Canceled);
    assert_eq!(backend.calls(), vec![bus_selector()]);
}

#[tokio::test]
async fn test_backend_defect_is_fatal() {
    let backend = MockBackend::new(Behavior::Defect);
    let console = MemoryConsole::new();

    let result = cli::run(
        ["usbipd", "wsl", "detach", "--all"],
        &backend,
        &console,
        &CancellationToken::new(),
    )
    .await;

    assert!(matches!(result, Err(CliError::Backend(_))));
}
