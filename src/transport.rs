//! Duplex line channels to the two players.
//!
//! [`PlayerSession`] runs a player as a child process with its stdin and stdout
//! piped to the referee. [`LocalPlayer`] runs a [`Bot`] in-process behind the
//! same interface, speaking the same wire text.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};

use tracing::{debug, warn};

use crate::bot::Bot;
use crate::error::TransportError;
use crate::player::PlayerContext;
use crate::protocol::{Message, strip_newline};

/// Blocking line exchange with one player.
pub trait Transport {
    /// Writes `line` followed by a newline.
    fn send_line(&mut self, line: &str) -> Result<(), TransportError>;

    /// Reads one line, without its terminator. Blocks until a line arrives.
    fn recv_line(&mut self) -> Result<String, TransportError>;

    /// Writes every line of an encoded message.
    fn send_message(&mut self, message: &Message) -> Result<(), TransportError> {
        for line in message.encode().lines() {
            self.send_line(line)?;
        }
        Ok(())
    }

    /// Releases the channel. Failures here are reported, never fatal to the match.
    fn close(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send_line(&mut self, line: &str) -> Result<(), TransportError> {
        (**self).send_line(line)
    }

    fn recv_line(&mut self) -> Result<String, TransportError> {
        (**self).recv_line()
    }

    fn send_message(&mut self, message: &Message) -> Result<(), TransportError> {
        (**self).send_message(message)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        (**self).close()
    }
}

/// A player program running as a child process.
///
/// The child's stdin and stdout are pipes owned by this session; stderr is
/// inherited. Pipes are opened close-on-exec, so neither child inherits the
/// other player's endpoints.
pub struct PlayerSession {
    path: PathBuf,
    child: Child,
    writer: Option<BufWriter<ChildStdin>>,
    reader: BufReader<ChildStdout>,
    closed: bool,
}

impl PlayerSession {
    pub fn spawn(path: impl AsRef<Path>) -> Result<Self, TransportError> {
        let path = path.as_ref().to_path_buf();
        let mut child = Command::new(&path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| TransportError::Launch {
                path: path.clone(),
                source,
            })?;
        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(TransportError::Closed);
        };
        debug!(path = %path.display(), pid = child.id(), "player started");
        Ok(Self {
            path,
            child,
            writer: Some(BufWriter::new(stdin)),
            reader: BufReader::new(stdout),
            closed: false,
        })
    }

    /// Closes the child's stdin and waits for it to exit.
    pub fn shutdown(&mut self) -> Result<ExitStatus, TransportError> {
        self.closed = true;
        let flushed = match self.writer.take() {
            Some(mut writer) => writer.flush(),
            None => Ok(()),
        };
        let status = self.child.wait()?;
        flushed.map_err(map_write_error)?;
        Ok(status)
    }
}

impl Transport for PlayerSession {
    fn send_line(&mut self, line: &str) -> Result<(), TransportError> {
        let writer = self.writer.as_mut().ok_or(TransportError::Closed)?;
        write_line(writer, line).map_err(map_write_error)
    }

    fn recv_line(&mut self) -> Result<String, TransportError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(TransportError::Closed);
        }
        Ok(strip_newline(&line).to_string())
    }

    fn close(&mut self) -> Result<(), TransportError> {
        let status = self.shutdown()?;
        debug!(path = %self.path.display(), %status, "player exited");
        if !status.success() {
            warn!(path = %self.path.display(), %status, "player exited unsuccessfully");
        }
        Ok(())
    }
}

impl Drop for PlayerSession {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        // Failure path: hang up, and do not wait on a child that ignores EOF.
        drop(self.writer.take());
        match self.child.try_wait() {
            Ok(Some(_)) => {}
            Ok(None) => {
                if let Err(err) = self.child.kill() {
                    warn!(path = %self.path.display(), error = %err, "failed to stop player");
                }
                let _ = self.child.wait();
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to query player status");
            }
        }
    }
}

fn write_line(writer: &mut impl Write, line: &str) -> io::Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

fn map_write_error(err: io::Error) -> TransportError {
    if err.kind() == ErrorKind::BrokenPipe {
        TransportError::Closed
    } else {
        TransportError::Io(err)
    }
}

/// In-process player: the referee's lines are parsed and answered by a [`Bot`].
pub struct LocalPlayer<B: Bot> {
    context: PlayerContext<B>,
    inbound: VecDeque<String>,
    replies: VecDeque<String>,
}

impl<B: Bot> LocalPlayer<B> {
    pub fn new(bot: B) -> Self {
        Self {
            context: PlayerContext::new(bot),
            inbound: VecDeque::new(),
            replies: VecDeque::new(),
        }
    }

    pub fn context(&self) -> &PlayerContext<B> {
        &self.context
    }

    /// Parses one buffered message and queues the reply, if any.
    fn pump(&mut self) -> Result<(), TransportError> {
        let mut lines = std::iter::from_fn(|| self.inbound.pop_front().map(Ok));
        let message = Message::read(&mut lines)
            .map_err(|err| io::Error::new(ErrorKind::InvalidData, err))?;
        if let Some(reply) = message.and_then(|message| self.context.handle(message)) {
            self.replies.push_back(reply);
        }
        Ok(())
    }
}

impl<B: Bot> Transport for LocalPlayer<B> {
    fn send_line(&mut self, line: &str) -> Result<(), TransportError> {
        if self.context.is_finished() {
            return Err(TransportError::Closed);
        }
        self.inbound.push_back(line.to_string());
        Ok(())
    }

    fn recv_line(&mut self) -> Result<String, TransportError> {
        loop {
            if let Some(reply) = self.replies.pop_front() {
                return Ok(reply);
            }
            if self.inbound.is_empty() || self.context.is_finished() {
                return Err(TransportError::Closed);
            }
            self.pump()?;
        }
    }

    fn close(&mut self) -> Result<(), TransportError> {
        while !self.inbound.is_empty() && !self.context.is_finished() {
            self.pump()?;
        }
        Ok(())
    }
}
