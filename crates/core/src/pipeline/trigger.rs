use std::io::BufRead;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};

/// Discrete user input, applied by the session between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Move to the next detector mode.
    Advance,
    /// End the session after the current frame.
    Stop,
}

impl Trigger {
    /// Maps one line of user input to a trigger: `q` or `quit` stops,
    /// anything else advances.
    pub fn from_line(line: &str) -> Trigger {
        match line.trim() {
            "q" | "quit" => Trigger::Stop,
            _ => Trigger::Advance,
        }
    }
}

/// Creates the channel that carries triggers from input to the session.
pub fn trigger_channel() -> (Sender<Trigger>, Receiver<Trigger>) {
    crossbeam_channel::unbounded()
}

/// Reads `input` on a background thread, sending one trigger per line.
/// Stops after a [`Trigger::Stop`], at end of input, or when the session
/// hangs up.
pub fn spawn_line_triggers<R>(input: R, sender: Sender<Trigger>) -> JoinHandle<usize>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        let mut sent = 0;
        for line in input.lines() {
            let Ok(line) = line else { break };
            let trigger = Trigger::from_line(&line);
            if sender.send(trigger).is_err() {
                break;
            }
            sent += 1;
            if trigger == Trigger::Stop {
                break;
            }
        }
        sent
    })
}

/// Convenience wrapper: Enter on stdin advances the mode, `q` stops.
pub fn spawn_stdin_triggers(sender: Sender<Trigger>) -> JoinHandle<usize> {
    spawn_line_triggers(std::io::BufReader::new(std::io::stdin()), sender)
}
