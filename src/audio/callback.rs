//! Playback fill routine
//!
//! Runs on the audio backend's thread every time the device wants more
//! data. It blocks on the handoff queue for each byte, which ties the
//! playback rate to the rate stdin delivers data.

use crossbeam_channel::{select, Receiver, TryRecvError};

use crate::shutdown::Shutdown;

/// Fill `out` from the handoff queue, one byte at a time
///
/// Returns how many bytes were written. On shutdown (or when the relay
/// has gone away) the rest of `out` is left as it was.
pub fn fill_from_handoff(out: &mut [u8], handoff: &Receiver<u8>, shutdown: &Shutdown) -> usize {
    let len = out.len();
    for (filled, slot) in out.iter_mut().enumerate() {
        match next_byte(handoff, shutdown) {
            Some(byte) => *slot = byte,
            None => {
                log::trace!("Signalled, leaving {} of {} bytes unfilled", len - filled, len);
                return filled;
            }
        }
    }
    len
}

/// Wait for the next byte, or `None` once shutdown wins
fn next_byte(handoff: &Receiver<u8>, shutdown: &Shutdown) -> Option<u8> {
    match handoff.try_recv() {
        Ok(byte) => return Some(byte),
        Err(TryRecvError::Disconnected) => return None,
        Err(TryRecvError::Empty) => {}
    }

    select! {
        recv(handoff) -> byte => byte.ok(),
        recv(shutdown.receiver()) -> _ => {
            // A byte the relay handed off before raising still gets played
            handoff.try_recv().ok()
        }
    }
}
