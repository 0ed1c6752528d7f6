//! Draw reporting over the UART TX line.

use embedded_hal_nb::serial::Write;

/// Single-byte reporter. Confirmed numbers go out as raw bytes, end-of-round
/// and reset as a newline; nothing is ever received.
pub struct Reporter<W> {
    tx: W,
}

impl<W: Write<u8>> Reporter<W> {
    pub fn new(tx: W) -> Self {
        Self { tx }
    }

    /// Hands one byte to the transmitter. The game never waits on the wire;
    /// a byte the transmitter cannot take right away is dropped.
    pub fn send(&mut self, byte: u8) {
        self.tx.write(byte).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal_nb::nb;
    use embedded_hal_nb::serial::{ErrorType, Write};
    use std::vec::Vec;

    /// Takes bytes while ready, reports busy otherwise.
    struct Wire {
        sent: Vec<u8>,
        busy: bool,
    }

    impl ErrorType for Wire {
        type Error = Infallible;
    }

    impl Write<u8> for Wire {
        fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
            if self.busy {
                Err(nb::Error::WouldBlock)
            } else {
                self.sent.push(word);
                Ok(())
            }
        }

        fn flush(&mut self) -> nb::Result<(), Self::Error> {
            Ok(())
        }
    }

    fn reporter(busy: bool) -> Reporter<Wire> {
        Reporter::new(Wire {
            sent: Vec::new(),
            busy,
        })
    }

    #[test]
    fn sends_bytes_in_order() {
        let mut reporter = reporter(false);
        reporter.send(7);
        reporter.send(b'\n');
        assert_eq!(reporter.tx.sent, [7, b'\n']);
    }

    #[test]
    fn busy_transmitter_drops_the_byte() {
        let mut reporter = reporter(true);
        reporter.send(7);
        reporter.tx.busy = false;
        reporter.send(9);
        assert_eq!(reporter.tx.sent, [9]);
    }
}
