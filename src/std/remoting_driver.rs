//! Ties the cluster shell to the Tokio TCP transport.

#[cfg(test)]
mod tests;

extern crate std;

use alloc::{format, string::ToString, sync::Arc, vec::Vec};
use std::io;

use spin::Mutex;
use tokio::{
  net::{tcp::OwnedReadHalf, TcpListener, TcpStream},
  task::JoinHandle,
};

use super::{
  clock::MonotonicClock,
  tracing_dead_letter_sink::TracingDeadLetterSink,
  transport::{read_frame, write_framed, TcpChannel},
};
use crate::core::{
  Association, ClusterSettings, ClusterShell, ClusterShellShared, DeadLetters, HandshakeFrame, InboundFrame,
  InboundHandler, RejectReason, RemotingLifecycleEvent, ShellEffect, UniqueNode,
};

struct DriverInner {
  shell:        ClusterShellShared,
  clock:        MonotonicClock,
  settings:     ClusterSettings,
  local_node:   UniqueNode,
  handler:      Arc<dyn InboundHandler>,
  dead_letters: Arc<DeadLetters>,
  tasks:        Mutex<Vec<JoinHandle<()>>>,
}

/// Runs the remote association subsystem on a Tokio runtime.
///
/// The driver owns the listener, performs outbound handshakes, pumps
/// inbound frames into the [`InboundHandler`], reaps tombstones on a timer,
/// and logs lifecycle events through `tracing`.
pub struct RemotingDriver {
  inner: Arc<DriverInner>,
}

impl Clone for RemotingDriver {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}

impl RemotingDriver {
  /// Creates a driver for `local_node`. Dead letters are logged and
  /// retained in an in-memory store.
  #[must_use]
  pub fn new(local_node: UniqueNode, settings: ClusterSettings, handler: Arc<dyn InboundHandler>) -> Self {
    let dead_letters = Arc::new(DeadLetters::new(settings.dead_letter_capacity()));
    let sink = Arc::new(TracingDeadLetterSink::forwarding_to(dead_letters.clone()));
    let shell = ClusterShellShared::new(ClusterShell::new(local_node.clone(), settings.clone(), sink));
    Self {
      inner: Arc::new(DriverInner {
        shell,
        clock: MonotonicClock::new(),
        settings,
        local_node,
        handler,
        dead_letters,
        tasks: Mutex::new(Vec::new()),
      }),
    }
  }

  /// Returns the shared shell handle.
  #[must_use]
  pub fn shell(&self) -> ClusterShellShared {
    self.inner.shell.clone()
  }

  /// Returns the in-memory dead letter store.
  #[must_use]
  pub fn dead_letters(&self) -> Arc<DeadLetters> {
    self.inner.dead_letters.clone()
  }

  /// Returns the driver's monotonic clock.
  #[must_use]
  pub fn clock(&self) -> MonotonicClock {
    self.inner.clock.clone()
  }

  /// Binds the listener on the local node's endpoint and starts the
  /// housekeeping timers.
  ///
  /// # Errors
  ///
  /// Returns the bind failure from the operating system.
  pub async fn start(&self) -> io::Result<()> {
    let authority = format!("{}:{}", self.inner.local_node.node().host(), self.inner.local_node.node().port());
    let listener = TcpListener::bind(&authority).await?;
    let accept = tokio::spawn(run_accept_loop(self.clone(), listener));
    let reaper = tokio::spawn(run_reaper(self.clone()));
    let sweeper = tokio::spawn(run_handshake_sweeper(self.clone()));
    let mut tasks = self.inner.tasks.lock();
    tasks.push(accept);
    tasks.push(reaper);
    tasks.push(sweeper);
    Ok(())
  }

  /// Looks up or creates the association for `remote`, kicking off the
  /// handshake when a fresh one is installed.
  #[must_use]
  pub fn association_for(&self, remote: &UniqueNode) -> Arc<Association> {
    let now = self.inner.clock.now();
    let (association, effects) = self.inner.shell.with_write(|shell| shell.association_for(remote, now));
    self.process_effects(effects);
    association
  }

  /// Terminates every association and stops the background tasks.
  pub fn shutdown(&self) {
    for task in self.inner.tasks.lock().drain(..) {
      task.abort();
    }
    let now = self.inner.clock.now();
    let effects = self.inner.shell.with_write(|shell| shell.shutdown(now));
    self.process_effects(effects);
  }

  fn process_effects(&self, effects: Vec<ShellEffect>) {
    for effect in effects {
      match effect {
        | ShellEffect::InitiateHandshake { offer } => {
          tokio::spawn(run_outbound_handshake(self.clone(), offer));
        },
        | ShellEffect::Lifecycle(event) => log_lifecycle(&event),
        | ShellEffect::ReplyToOffer { .. } => {
          // Replies only make sense on the connection the offer arrived on;
          // they are handled inline by the accept path.
          tracing::debug!("ignoring reply effect outside a connection context");
        },
      }
    }
  }
}

fn log_lifecycle(event: &RemotingLifecycleEvent) {
  match event {
    | RemotingLifecycleEvent::Connected { remote } => tracing::info!(%remote, "association established"),
    | RemotingLifecycleEvent::HandshakeRejected { remote, error } => {
      tracing::warn!(%remote, %error, "handshake failed");
    },
    | RemotingLifecycleEvent::Tombstoned { remote } => tracing::info!(%remote, "association tombstoned"),
    | RemotingLifecycleEvent::TombstoneExpired { remote } => tracing::debug!(%remote, "tombstone expired"),
  }
}

async fn run_outbound_handshake(driver: RemotingDriver, offer: HandshakeFrame) {
  let HandshakeFrame::Offer { target, .. } = &offer else {
    return;
  };
  let remote = target.clone();
  let timeout = driver.inner.settings.handshake_timeout();
  let attempt = tokio::time::timeout(timeout, connect_and_offer(&driver, &remote, offer)).await;
  let now = driver.inner.clock.now();
  match attempt {
    | Ok(Ok(())) => {},
    | Ok(Err(error)) => {
      let effects = driver.inner.shell.with_write(|shell| {
        shell.on_handshake_rejected(&remote, RejectReason::Other, error.to_string(), now)
      });
      driver.process_effects(effects);
    },
    | Err(_elapsed) => {
      let effects = driver.inner.shell.with_write(|shell| shell.expire_handshakes(now));
      driver.process_effects(effects);
    },
  }
}

async fn connect_and_offer(driver: &RemotingDriver, remote: &UniqueNode, offer: HandshakeFrame) -> io::Result<()> {
  let authority = format!("{}:{}", remote.node().host(), remote.node().port());
  let stream = TcpStream::connect(&authority).await?;
  stream.set_nodelay(true)?;
  let (mut read_half, mut write_half) = stream.into_split();
  write_framed(&mut write_half, offer.encode()).await?;

  let Some(reply) = read_frame(&mut read_half).await? else {
    return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "connection closed before handshake reply"));
  };
  let frame = InboundFrame::decode(&reply)
    .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error.to_string()))?;
  let now = driver.inner.clock.now();
  match frame {
    | InboundFrame::Handshake(HandshakeFrame::Accept { origin }) => {
      let channel = TcpChannel::spawn(origin.clone(), write_half);
      let effects = driver.inner.shell.with_write(|shell| shell.on_handshake_completed(&origin, channel));
      driver.process_effects(effects);
      tokio::spawn(run_inbound_frames(driver.clone(), read_half, origin));
      Ok(())
    },
    | InboundFrame::Handshake(HandshakeFrame::Reject { reason, message }) => {
      let effects =
        driver.inner.shell.with_write(|shell| shell.on_handshake_rejected(remote, reason, message, now));
      driver.process_effects(effects);
      Ok(())
    },
    | _ => Err(io::Error::new(io::ErrorKind::InvalidData, "peer replied with a non-handshake frame")),
  }
}

async fn run_accept_loop(driver: RemotingDriver, listener: TcpListener) {
  loop {
    match listener.accept().await {
      | Ok((stream, _peer)) => {
        tokio::spawn(run_inbound_connection(driver.clone(), stream));
      },
      | Err(error) => {
        tracing::warn!(%error, "accept failed; listener stopping");
        break;
      },
    }
  }
}

async fn run_inbound_connection(driver: RemotingDriver, stream: TcpStream) {
  if let Err(error) = serve_inbound_connection(driver, stream).await {
    tracing::warn!(%error, "inbound connection closed with error");
  }
}

async fn serve_inbound_connection(driver: RemotingDriver, stream: TcpStream) -> io::Result<()> {
  stream.set_nodelay(true)?;
  let (mut read_half, mut write_half) = stream.into_split();
  let Some(first) = read_frame(&mut read_half).await? else {
    return Ok(());
  };
  let frame = InboundFrame::decode(&first)
    .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error.to_string()))?;
  let InboundFrame::Handshake(HandshakeFrame::Offer { origin, target }) = frame else {
    return Err(io::Error::new(io::ErrorKind::InvalidData, "expected an offer as the first frame"));
  };

  let now = driver.inner.clock.now();
  let effects = driver.inner.shell.with_write(|shell| shell.on_inbound_offer(origin.clone(), target, now));
  let mut accepted = false;
  for effect in effects {
    match effect {
      | ShellEffect::ReplyToOffer { frame } => {
        accepted = matches!(frame, HandshakeFrame::Accept { .. });
        write_framed(&mut write_half, frame.encode()).await?;
      },
      | ShellEffect::Lifecycle(event) => log_lifecycle(&event),
      | ShellEffect::InitiateHandshake { offer } => {
        tokio::spawn(run_outbound_handshake(driver.clone(), offer));
      },
    }
  }
  if !accepted {
    return Ok(());
  }

  // The accept reply is flushed; bind the connection as the association's
  // channel and keep reading envelopes from the peer.
  let channel = TcpChannel::spawn(origin.clone(), write_half);
  let effects = driver.inner.shell.with_write(|shell| shell.on_handshake_completed(&origin, channel));
  driver.process_effects(effects);
  run_inbound_frames(driver.clone(), read_half, origin).await;
  Ok(())
}

async fn run_inbound_frames(driver: RemotingDriver, mut read_half: OwnedReadHalf, peer: UniqueNode) {
  loop {
    match read_frame(&mut read_half).await {
      | Ok(Some(bytes)) => match InboundFrame::decode(&bytes) {
        | Ok(InboundFrame::User { recipient, payload }) => driver.inner.handler.handle_user(recipient, payload),
        | Ok(InboundFrame::System(message)) => driver.inner.handler.handle_system(message),
        | Ok(InboundFrame::Handshake(_)) => {
          tracing::warn!(%peer, "handshake frame on an established connection; closing");
          break;
        },
        | Err(error) => {
          tracing::warn!(%peer, %error, "malformed frame; closing connection");
          break;
        },
      },
      | Ok(None) => break,
      | Err(error) => {
        tracing::warn!(%peer, %error, "read failed; closing connection");
        break;
      },
    }
  }
}

async fn run_reaper(driver: RemotingDriver) {
  let mut interval = tokio::time::interval(driver.inner.settings.tombstone_reap_interval());
  interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
  loop {
    interval.tick().await;
    let now = driver.inner.clock.now();
    let effects = driver.inner.shell.with_write(|shell| shell.reap_tombstones(now));
    driver.process_effects(effects);
  }
}

async fn run_handshake_sweeper(driver: RemotingDriver) {
  let mut interval = tokio::time::interval(driver.inner.settings.handshake_timeout());
  interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
  loop {
    interval.tick().await;
    let now = driver.inner.clock.now();
    let effects = driver.inner.shell.with_write(|shell| shell.expire_handshakes(now));
    driver.process_effects(effects);
  }
}
