//! Input relay - moves bytes from stdin into the handoff queue
//!
//! The relay runs on its own thread, reads one byte at a time and
//! blocks on the single-slot queue until the audio callback has taken the
//! previous byte. End of input (or any read error) raises the shutdown
//! signal.

use std::io::{BufReader, Read};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{select, Sender};

use crate::shutdown::Shutdown;

/// Relay every byte of `input` into `sender` until EOF or shutdown
///
/// Returns the number of bytes handed off.
pub fn relay<R: Read>(input: R, sender: Sender<u8>, shutdown: &Shutdown) -> u64 {
    let mut relayed = 0u64;

    for byte in BufReader::new(input).bytes() {
        let byte = match byte {
            Ok(b) => b,
            Err(e) => {
                log::debug!("Stdin read failed: {}", e);
                break;
            }
        };

        select! {
            send(sender, byte) -> res => {
                if res.is_err() {
                    // Callback side is gone
                    log::debug!("Handoff queue closed after {} bytes", relayed);
                    return relayed;
                }
                relayed += 1;
            }
            recv(shutdown.receiver()) -> _ => {
                log::debug!("Quitting reader after {} bytes", relayed);
                return relayed;
            }
        }
    }

    log::debug!("Done reading ({} bytes)", relayed);
    shutdown.raise("end of input");
    relayed
}

/// Run [`relay`] on a dedicated `stdin-relay` thread
pub fn spawn_relay<R>(
    input: R,
    sender: Sender<u8>,
    shutdown: Shutdown,
) -> std::io::Result<JoinHandle<u64>>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name("stdin-relay".to_string())
        .spawn(move || relay(input, sender, &shutdown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};
    use std::time::Duration;

    #[test]
    fn test_relay_preserves_order_and_raises_on_eof() {
        let shutdown = Shutdown::new();
        let (tx, rx) = crossbeam_channel::bounded(1);
        let input: Vec<u8> = (0..=255).collect();

        let handle = spawn_relay(Cursor::new(input.clone()), tx, shutdown.clone()).unwrap();

        let received: Vec<u8> = rx.iter().collect();
        assert_eq!(received, input);
        assert_eq!(handle.join().unwrap(), 256);
        assert!(shutdown.is_raised());
    }

    #[test]
    fn test_empty_input_raises_shutdown() {
        let shutdown = Shutdown::new();
        let (tx, _rx) = crossbeam_channel::bounded(1);

        assert_eq!(relay(io::empty(), tx, &shutdown), 0);
        assert!(shutdown.is_raised());
    }

    #[test]
    fn test_blocked_send_returns_on_shutdown() {
        let shutdown = Shutdown::new();
        let (tx, rx) = crossbeam_channel::bounded(1);

        // Nobody consumes, so the relay blocks with one byte in the slot
        let handle = spawn_relay(io::repeat(7), tx, shutdown.clone()).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        shutdown.raise("test");

        assert_eq!(handle.join().unwrap(), 1);
        assert_eq!(rx.try_recv(), Ok(7));
    }

    #[test]
    fn test_read_error_raises_shutdown() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            }
        }

        let shutdown = Shutdown::new();
        let (tx, _rx) = crossbeam_channel::bounded(1);

        assert_eq!(relay(Broken, tx, &shutdown), 0);
        assert!(shutdown.is_raised());
    }
}
