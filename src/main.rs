//! speaker-cat - play raw PCM from stdin
//!
//! Bytes read from standard input are handed one at a time to the audio
//! callback of the default output device, in the format given on the
//! command line:
//!
//! ```text
//! cat noise.raw | speaker-cat -16 -c 2 -f 48000
//! ```
//!
//! Playback ends on SIGINT, SIGTERM or end of input.

use std::process::ExitCode;

mod audio;
mod cli;
mod player;
mod relay;
mod shutdown;
mod signals;

use audio::{AudioFormat, CpalBackend};
use cli::Args;
use player::PlayerError;
use shutdown::Shutdown;
use signals::SignalWatcher;

fn main() -> ExitCode {
    let args = Args::from_env();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let format = args.resolve();
    format.log_summary();

    match play(&format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Set everything up, play until shutdown, tear down in reverse order
fn play(format: &AudioFormat) -> Result<(), PlayerError> {
    let backend = CpalBackend::init()?;

    let shutdown = Shutdown::new();
    let (sender, handoff) = crossbeam_channel::bounded(1);
    relay::spawn_relay(std::io::stdin(), sender, shutdown.clone())
        .map_err(PlayerError::Relay)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("signals")
        .enable_all()
        .build()
        .map_err(PlayerError::Signals)?;
    let watcher = {
        let _guard = runtime.enter();
        SignalWatcher::install().map_err(PlayerError::Signals)?
    };
    runtime.spawn(watcher.watch(shutdown.clone()));

    player::run(&backend, format, handoff, &shutdown)?;
    Ok(())
}
