use std::process;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;
use usbipd_cli::backend::ConfiguredBackend;
use usbipd_cli::cli::{parse_args, Cli};
use usbipd_cli::exit_code::FATAL_EXIT_CODE;
use usbipd_cli::output::{Console, TerminalConsole};

fn init_logging(cli: &Cli) {
    let default = if cli.verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

/// Cancel `cancel` on Ctrl+C.
///
/// The handler is registered before this returns, so an interrupt that
/// arrives while the helper is running is never missed.
#[cfg(unix)]
fn watch_interrupt(cancel: CancellationToken) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        if interrupt.recv().await.is_some() {
            debug!("interrupt received");
            cancel.cancel();
        }
    });
    Ok(())
}

#[cfg(not(unix))]
fn watch_interrupt(cancel: CancellationToken) -> std::io::Result<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received");
            cancel.cancel();
        }
    });
    Ok(())
}

#[tokio::main]
async fn main() -> process::ExitCode {
    let console = TerminalConsole::new();

    let cli = match parse_args(std::env::args_os(), &console) {
        Ok(cli) => cli,
        Err(code) => return code.into(),
    };

    init_logging(&cli);
    let console = console.quiet(cli.quiet);

    // Settings are only read once a validated detach reaches the backend.
    let backend = ConfiguredBackend::new(cli.config.clone(), cli.helper.clone());

    let cancel = CancellationToken::new();
    if let Err(err) = watch_interrupt(cancel.clone()) {
        warn!(error = %err, "could not install interrupt handler");
    }

    match cli.execute(&backend, &console, &cancel).await {
        Ok(code) => code.into(),
        Err(err) => {
            error!(error = %err, "fatal error");
            console.report_error(&err.to_string());
            process::ExitCode::from(FATAL_EXIT_CODE)
        }
    }
}
