//! Single-owner coordinator for associations, handshakes, and tombstones.

mod effect;
mod event;
mod shared;

use alloc::{collections::BTreeMap, format, string::String, sync::Arc, vec, vec::Vec};
use core::time::Duration;

pub use effect::ShellEffect;
pub use event::RemotingLifecycleEvent;
pub use shared::ClusterShellShared;

use crate::core::{
  association::{Association, AssociationStateKind},
  dead_letter::DeadLetterSink,
  handshake::{HandshakeError, HandshakeFrame, HandshakeState, HandshakeStateMachine, RejectReason},
  outbound_channel::OutboundChannel,
  settings::ClusterSettings,
  tombstone_registry::TombstoneRegistry,
  unique_node::UniqueNode,
};

/// Owns the association map, the tombstone set, and every handshake state
/// machine for one node.
///
/// All methods take `&mut self`: the shell is driven from a single executor
/// and other components submit events to it rather than mutating shared
/// state directly. Producers only ever touch the `Arc<Association>` handles
/// the shell gives out.
pub struct ClusterShell {
  local_node:   UniqueNode,
  settings:     ClusterSettings,
  dead_letters: Arc<dyn DeadLetterSink>,
  associations: BTreeMap<UniqueNode, Arc<Association>>,
  handshakes:   BTreeMap<UniqueNode, HandshakeStateMachine>,
  tombstones:   TombstoneRegistry,
}

impl ClusterShell {
  /// Creates a shell for the given local node.
  #[must_use]
  pub fn new(local_node: UniqueNode, settings: ClusterSettings, dead_letters: Arc<dyn DeadLetterSink>) -> Self {
    Self {
      local_node,
      settings,
      dead_letters,
      associations: BTreeMap::new(),
      handshakes: BTreeMap::new(),
      tombstones: TombstoneRegistry::new(),
    }
  }

  /// Returns the local node identity.
  #[must_use]
  pub const fn local_node(&self) -> &UniqueNode {
    &self.local_node
  }

  /// Returns the active settings.
  #[must_use]
  pub const fn settings(&self) -> &ClusterSettings {
    &self.settings
  }

  /// Returns the dead letter sink handed to terminating associations.
  #[must_use]
  pub fn dead_letters(&self) -> Arc<dyn DeadLetterSink> {
    self.dead_letters.clone()
  }

  /// Returns the number of associations in the map.
  #[must_use]
  pub fn association_count(&self) -> usize {
    self.associations.len()
  }

  /// Returns the association installed for `remote`, when one exists.
  #[must_use]
  pub fn association(&self, remote: &UniqueNode) -> Option<Arc<Association>> {
    self.associations.get(remote).cloned()
  }

  /// Returns `true` while `remote` is barred by a tombstone.
  #[must_use]
  pub fn is_tombstoned(&self, remote: &UniqueNode) -> bool {
    self.tombstones.contains(remote)
  }

  /// Returns the state of the outbound handshake attempt toward `remote`.
  #[must_use]
  pub fn handshake_state(&self, remote: &UniqueNode) -> Option<&HandshakeState> {
    self.handshakes.get(remote).map(HandshakeStateMachine::state)
  }

  /// Looks up or creates the association for `remote`.
  ///
  /// A fresh association starts *associating* so the caller can begin
  /// buffering immediately; the returned effects then ask the driver to run
  /// the handshake. A tombstone-barred peer yields an association born
  /// terminated, which is not installed in the map.
  pub fn association_for(&mut self, remote: &UniqueNode, now: Duration) -> (Arc<Association>, Vec<ShellEffect>) {
    if let Some(existing) = self.associations.get(remote) {
      return (existing.clone(), Vec::new());
    }
    if self.tombstones.contains(remote) {
      let association =
        Association::tombstoned(self.local_node.clone(), remote.clone(), self.dead_letters.clone(), now);
      return (Arc::new(association), Vec::new());
    }
    let association = Arc::new(Association::associating(self.local_node.clone(), remote.clone()));
    self.associations.insert(remote.clone(), association.clone());
    let machine = HandshakeStateMachine::initiate(self.local_node.clone(), remote.clone(), now);
    let offer = machine.offer();
    self.handshakes.insert(remote.clone(), machine);
    (association, vec![ShellEffect::InitiateHandshake { offer }])
  }

  /// Arbitrates an inbound offer and produces the reply to send.
  ///
  /// Covers the whole acceptor decision table: wrong target, tombstoned
  /// origin, address reuse by a new incarnation, duplicate handshakes, and
  /// the tie-break between two concurrent offers.
  pub fn on_inbound_offer(&mut self, origin: UniqueNode, target: UniqueNode, now: Duration) -> Vec<ShellEffect> {
    if target != self.local_node {
      return vec![Self::reply_reject(
        RejectReason::WrongTarget,
        format!("offer targeted {target} but this node is {}", self.local_node),
      )];
    }
    if self.tombstones.contains(&origin) {
      return vec![Self::reply_reject(RejectReason::Tombstoned, format!("{origin} is tombstoned"))];
    }

    let mut effects = Vec::new();

    // A matching endpoint under a different nid means the prior incarnation
    // is dead; bury it before looking at the offer itself.
    let stale: Vec<UniqueNode> =
      self.associations.keys().filter(|known| known.is_other_incarnation_of(&origin)).cloned().collect();
    for known in stale {
      effects.extend(self.terminate_association(&known, now));
    }

    match self.associations.get(&origin).map(|association| association.state_kind()) {
      | Some(AssociationStateKind::Associated) => {
        effects.push(Self::reply_reject(RejectReason::Duplicate, format!("{origin} is already associated")));
      },
      | Some(AssociationStateKind::Tombstone) => {
        effects.push(Self::reply_reject(RejectReason::Tombstoned, format!("{origin} is tombstoned")));
      },
      | Some(AssociationStateKind::Associating) => {
        let racing = self.handshakes.get(&origin).is_some_and(HandshakeStateMachine::is_initiated);
        if racing && self.local_node < origin {
          // Our own offer wins the tie-break; the peer's offer loses.
          effects.push(Self::reply_reject(
            RejectReason::ConcurrentLost,
            format!("concurrent handshake lost against {}", self.local_node),
          ));
        } else {
          // Either the peer's offer wins the tie-break or this is a repeat
          // of an offer we already admitted; accept and keep the entry
          // (and its buffered envelopes).
          effects.push(ShellEffect::ReplyToOffer { frame: HandshakeFrame::Accept { origin: self.local_node.clone() } });
        }
      },
      | None => {
        let association = Arc::new(Association::associating(self.local_node.clone(), origin.clone()));
        self.associations.insert(origin.clone(), association);
        effects.push(ShellEffect::ReplyToOffer { frame: HandshakeFrame::Accept { origin: self.local_node.clone() } });
      },
    }
    effects
  }

  /// Completes the handshake toward `remote` with the established channel:
  /// the matching association transitions to *associated* and flushes its
  /// pending queue. Without a completable entry the channel is closed.
  pub fn on_handshake_completed(
    &mut self,
    remote: &UniqueNode,
    channel: Arc<dyn OutboundChannel>,
  ) -> Vec<ShellEffect> {
    if let Some(machine) = self.handshakes.get_mut(remote) {
      machine.on_accept(remote.clone());
    }
    match self.associations.get(remote).cloned() {
      | Some(association) if association.state_kind() == AssociationStateKind::Associating => {
        association.complete_association(channel);
        vec![ShellEffect::Lifecycle(RemotingLifecycleEvent::Connected { remote: remote.clone() })]
      },
      | Some(_) | None => {
        channel.close();
        Vec::new()
      },
    }
  }

  /// Records the rejection of the outbound handshake toward `remote`.
  ///
  /// Every reason except `ConcurrentLost` terminates the association and
  /// installs a tombstone. A lost tie-break leaves the entry alone: the
  /// peer's winning offer completes it from the other direction.
  pub fn on_handshake_rejected(
    &mut self,
    remote: &UniqueNode,
    reason: RejectReason,
    message: String,
    now: Duration,
  ) -> Vec<ShellEffect> {
    if let Some(machine) = self.handshakes.get_mut(remote) {
      machine.on_reject(reason, message.clone());
    }
    let mut effects = vec![ShellEffect::Lifecycle(RemotingLifecycleEvent::HandshakeRejected {
      remote: remote.clone(),
      error:  HandshakeError::Rejected(reason, message),
    })];
    if reason != RejectReason::ConcurrentLost {
      effects.extend(self.terminate_association(remote, now));
    }
    effects
  }

  /// Times out every outbound attempt whose reply deadline has passed,
  /// terminating the affected associations.
  pub fn expire_handshakes(&mut self, now: Duration) -> Vec<ShellEffect> {
    let timeout = self.settings.handshake_timeout();
    let expired: Vec<UniqueNode> = self
      .handshakes
      .iter()
      .filter(|(_, machine)| machine.is_expired(now, timeout))
      .map(|(remote, _)| remote.clone())
      .collect();
    let mut effects = Vec::new();
    for remote in expired {
      if let Some(machine) = self.handshakes.get_mut(&remote) {
        machine.on_timeout();
      }
      effects.push(ShellEffect::Lifecycle(RemotingLifecycleEvent::HandshakeRejected {
        remote: remote.clone(),
        error:  HandshakeError::TimedOut,
      }));
      effects.extend(self.terminate_association(&remote, now));
    }
    effects
  }

  /// Removes tombstones whose deadline is at or before `now`, together with
  /// the map entries they were keeping dead. The affected peers may
  /// associate again afterwards.
  pub fn reap_tombstones(&mut self, now: Duration) -> Vec<ShellEffect> {
    let mut effects = Vec::new();
    for remote in self.tombstones.reap(now) {
      let buried = self
        .associations
        .get(&remote)
        .is_some_and(|association| association.state_kind() == AssociationStateKind::Tombstone);
      if buried {
        self.associations.remove(&remote);
      }
      self.handshakes.remove(&remote);
      effects.push(ShellEffect::Lifecycle(RemotingLifecycleEvent::TombstoneExpired { remote }));
    }
    effects
  }

  /// Terminates every association and aborts in-flight handshakes. Queued
  /// envelopes drain to dead letters with their futures failed.
  pub fn shutdown(&mut self, now: Duration) -> Vec<ShellEffect> {
    let remotes: Vec<UniqueNode> = self.associations.keys().cloned().collect();
    let mut effects = Vec::new();
    for remote in remotes {
      effects.extend(self.terminate_association(&remote, now));
    }
    for machine in self.handshakes.values_mut() {
      machine.on_timeout();
    }
    effects
  }

  fn terminate_association(&mut self, remote: &UniqueNode, now: Duration) -> Vec<ShellEffect> {
    let Some(association) = self.associations.get(remote).cloned() else {
      return Vec::new();
    };
    if association.state_kind() == AssociationStateKind::Tombstone {
      return Vec::new();
    }
    let ttl = self.settings.association_tombstone_ttl();
    let tombstone = association.terminate(self.dead_letters.clone(), now, ttl);
    self.tombstones.install(tombstone);
    vec![ShellEffect::Lifecycle(RemotingLifecycleEvent::Tombstoned { remote: remote.clone() })]
  }

  fn reply_reject(reason: RejectReason, message: String) -> ShellEffect {
    ShellEffect::ReplyToOffer { frame: HandshakeFrame::Reject { reason, message } }
  }
}
