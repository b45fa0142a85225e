use std::sync::mpsc::{self, Receiver, RecvError, SendError, Sender};

/// Create a connected unbounded FIFO pair.
///
/// Values arrive at the [`Input`] in the order they were written to the
/// [`Output`]. Either end may be moved to another thread.
pub fn channel() -> (Output, Input) {
    let (tx, rx) = mpsc::channel();
    (Output { tx }, Input { rx })
}

/// Consuming end of a channel. Reads block until a value is available.
#[derive(Debug)]
pub struct Input {
    rx: Receiver<i64>,
}

impl Input {
    /// Block until the next value arrives.
    ///
    /// Fails only once every [`Output`] for this channel has been dropped
    /// and no buffered values remain.
    pub fn read(&self) -> Result<i64, RecvError> {
        self.rx.recv()
    }

    /// Drain the values that are buffered right now, without blocking.
    pub fn drain(&self) -> Vec<i64> {
        self.rx.try_iter().collect()
    }
}

impl IntoIterator for Input {
    type Item = i64;
    type IntoIter = mpsc::IntoIter<i64>;

    /// Blocking iterator that ends when the producing side is dropped.
    fn into_iter(self) -> Self::IntoIter {
        self.rx.into_iter()
    }
}

/// Producing end of a channel. Writes never block: the buffer is unbounded.
#[derive(Debug, Clone)]
pub struct Output {
    tx: Sender<i64>,
}

impl Output {
    /// Enqueue a value. Fails if the [`Input`] has been dropped.
    pub fn write(&self, value: i64) -> Result<(), SendError<i64>> {
        self.tx.send(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_fifo_order() {
        let (out, inp) = channel();
        for v in [3, -1, 4, 1, 5] {
            out.write(v).unwrap();
        }
        assert_eq!(inp.drain(), vec![3, -1, 4, 1, 5]);
    }

    #[test]
    fn test_buffered_values_survive_sender_drop() {
        let (out, inp) = channel();
        out.write(9).unwrap();
        drop(out);
        assert_eq!(inp.read(), Ok(9));
        assert!(inp.read().is_err());
    }

    #[test]
    fn test_write_to_dropped_input_fails() {
        let (out, inp) = channel();
        drop(inp);
        assert_eq!(out.write(1), Err(SendError(1)));
    }

    #[test]
    fn test_read_blocks_until_value_arrives() {
        let (out, inp) = channel();
        let handle = thread::spawn(move || inp.read());
        out.write(42).unwrap();
        assert_eq!(handle.join().unwrap(), Ok(42));
    }

    #[test]
    fn test_iterator_ends_on_close() {
        let (out, inp) = channel();
        let producer = thread::spawn(move || {
            for v in 0..5 {
                out.write(v).unwrap();
            }
        });
        let values: Vec<i64> = inp.into_iter().collect();
        producer.join().unwrap();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }
}
