//! Tokio TCP outbound channel.

extern crate std;

use alloc::{string::ToString, sync::Arc, vec::Vec};
use std::io;

use spin::Mutex;
use tokio::{
  io::{AsyncReadExt, AsyncWriteExt},
  net::tcp::{OwnedReadHalf, OwnedWriteHalf},
  sync::mpsc,
};

use crate::core::{ChannelError, OutboundChannel, SendError, UniqueNode, WriteFuture};

/// Upper bound on a single frame body; larger lengths indicate a corrupt
/// or hostile peer.
pub(crate) const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

struct OutboundWrite {
  frame: Vec<u8>,
  ack:   Option<WriteFuture>,
}

/// Outbound half of one TCP association connection.
///
/// Frames are queued to a writer task that length-prefixes them (u32
/// big-endian) and resolves the attached write futures after the flush.
pub struct TcpChannel {
  peer:   UniqueNode,
  sender: Mutex<Option<mpsc::UnboundedSender<OutboundWrite>>>,
}

impl TcpChannel {
  /// Spawns the writer task over `write_half` and returns the channel.
  #[must_use]
  pub fn spawn(peer: UniqueNode, write_half: OwnedWriteHalf) -> Arc<Self> {
    let (sender, receiver) = mpsc::unbounded_channel();
    tokio::spawn(write_loop(write_half, receiver));
    Arc::new(Self { peer, sender: Mutex::new(Some(sender)) })
  }
}

impl OutboundChannel for TcpChannel {
  fn peer(&self) -> &UniqueNode {
    &self.peer
  }

  fn write_and_flush(&self, frame: Vec<u8>, ack: Option<WriteFuture>) -> Result<(), ChannelError> {
    let guard = self.sender.lock();
    let Some(sender) = guard.as_ref() else {
      if let Some(ack) = ack {
        ack.complete(Err(SendError::ChannelWrite(ChannelError::Closed)));
      }
      return Err(ChannelError::Closed);
    };
    sender.send(OutboundWrite { frame, ack }).map_err(|rejected| {
      if let Some(ack) = rejected.0.ack {
        ack.complete(Err(SendError::ChannelWrite(ChannelError::Closed)));
      }
      ChannelError::Closed
    })
  }

  fn close(&self) {
    // Dropping the sender ends the writer loop, which shuts the socket down.
    self.sender.lock().take();
  }
}

async fn write_loop(mut write_half: OwnedWriteHalf, mut receiver: mpsc::UnboundedReceiver<OutboundWrite>) {
  while let Some(write) = receiver.recv().await {
    let mut framed = Vec::with_capacity(4 + write.frame.len());
    framed.extend_from_slice(&(write.frame.len() as u32).to_be_bytes());
    framed.extend_from_slice(&write.frame);
    let result = async {
      write_half.write_all(&framed).await?;
      write_half.flush().await
    }
    .await;
    match result {
      | Ok(()) => {
        if let Some(ack) = write.ack {
          ack.complete(Ok(()));
        }
      },
      | Err(error) => {
        if let Some(ack) = write.ack {
          ack.complete(Err(SendError::ChannelWrite(ChannelError::Io(error.to_string()))));
        }
        break;
      },
    }
  }
  receiver.close();
  while let Ok(write) = receiver.try_recv() {
    if let Some(ack) = write.ack {
      ack.complete(Err(SendError::ChannelWrite(ChannelError::Closed)));
    }
  }
  let _ = write_half.shutdown().await;
}

/// Writes one length-prefixed frame directly, outside any channel. Used for
/// handshake frames before a channel exists.
pub(crate) async fn write_framed(write_half: &mut OwnedWriteHalf, frame: Vec<u8>) -> io::Result<()> {
  let mut framed = Vec::with_capacity(4 + frame.len());
  framed.extend_from_slice(&(frame.len() as u32).to_be_bytes());
  framed.extend_from_slice(&frame);
  write_half.write_all(&framed).await?;
  write_half.flush().await
}

/// Reads one length-prefixed frame. Returns `None` on a clean peer close
/// before the next frame.
pub(crate) async fn read_frame(read_half: &mut OwnedReadHalf) -> io::Result<Option<Vec<u8>>> {
  let mut len_bytes = [0u8; 4];
  match read_half.read_exact(&mut len_bytes).await {
    | Ok(_) => {},
    | Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
    | Err(error) => return Err(error),
  }
  let len = u32::from_be_bytes(len_bytes) as usize;
  if len == 0 || len > MAX_FRAME_LEN {
    return Err(io::Error::new(io::ErrorKind::InvalidData, "frame length out of bounds"));
  }
  let mut frame = alloc::vec![0u8; len];
  read_half.read_exact(&mut frame).await?;
  Ok(Some(frame))
}
