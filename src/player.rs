//! Playback lifecycle
//!
//! Opens the device with a callback that drains the handoff queue,
//! unpauses it, then blocks until shutdown. Returning (or failing) drops
//! the device, which closes it.

use crossbeam_channel::Receiver;
use thiserror::Error;

use crate::audio::{
    fill_from_handoff, AudioBackend, AudioError, AudioFormat, PlaybackDevice, RenderCallback,
};
use crate::shutdown::Shutdown;

/// Fatal errors that end the program
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error("Failed to start input relay: {0}")]
    Relay(#[source] std::io::Error),

    #[error("Failed to start signal handling: {0}")]
    Signals(#[source] std::io::Error),
}

/// Play bytes from `handoff` on a device opened by `backend` until shutdown
pub fn run<B: AudioBackend>(
    backend: &B,
    format: &AudioFormat,
    handoff: Receiver<u8>,
    shutdown: &Shutdown,
) -> Result<(), AudioError> {
    let callback_shutdown = shutdown.clone();
    let render: RenderCallback = Box::new(move |out: &mut [u8]| {
        fill_from_handoff(out, &handoff, &callback_shutdown);
    });
    let device = backend.open(format, render)?;

    if let Err(e) = device.resume() {
        // Unblock a callback the device may already be running before it is closed
        shutdown.raise("playback failed");
        return Err(e);
    }

    shutdown.wait();
    log::debug!("Exiting loop.");

    drop(device);
    Ok(())
}
