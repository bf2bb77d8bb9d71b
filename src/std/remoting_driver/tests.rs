#![cfg(test)]

use alloc::sync::Arc;
use core::time::Duration;
use std::sync::Mutex;

use tokio::{runtime::Runtime, time::sleep};

use super::RemotingDriver;
use crate::core::{
  ActorAddress, AssociationStateKind, ClusterSettings, InboundHandler, Node, NodeId, SerializedMessage,
  SystemMessage, TransportEnvelope, UniqueNode, WriteFuture,
};

#[derive(Default)]
struct CollectingHandler {
  user:   Mutex<Vec<(ActorAddress, SerializedMessage)>>,
  system: Mutex<Vec<SystemMessage>>,
}

impl InboundHandler for CollectingHandler {
  fn handle_user(&self, recipient: ActorAddress, payload: SerializedMessage) {
    self.user.lock().expect("lock").push((recipient, payload));
  }

  fn handle_system(&self, message: SystemMessage) {
    self.system.lock().expect("lock").push(message);
  }
}

fn find_free_port() -> u16 {
  std::net::TcpListener::bind("127.0.0.1:0").expect("bind").local_addr().expect("addr").port()
}

fn local_node(system: &str, port: u16) -> UniqueNode {
  UniqueNode::new(Node::new(system, "127.0.0.1", port), NodeId::random())
}

async fn started_driver(system: &str) -> (RemotingDriver, UniqueNode, Arc<CollectingHandler>) {
  let node = local_node(system, find_free_port());
  let handler = Arc::new(CollectingHandler::default());
  let driver = RemotingDriver::new(node.clone(), ClusterSettings::new(), handler.clone());
  driver.start().await.expect("start");
  (driver, node, handler)
}

async fn wait_for<F: Fn() -> bool>(condition: F, what: &str) {
  for _ in 0..500 {
    if condition() {
      return;
    }
    sleep(Duration::from_millis(10)).await;
  }
  panic!("timed out waiting for {what}");
}

#[test]
fn handshake_establishes_and_envelopes_flow() {
  let rt = Runtime::new().expect("runtime");
  rt.block_on(async {
    let (driver_a, _node_a, _handler_a) = started_driver("orders").await;
    let (driver_b, node_b, handler_b) = started_driver("billing").await;

    let association = driver_a.association_for(&node_b);
    let recipient = ActorAddress::new(Some(node_b.clone()), vec!["user".into(), "invoices".into()], 1);
    let ack = WriteFuture::pending();
    association
      .send(TransportEnvelope::user_with_ack(SerializedMessage::new(vec![7, 7, 7]), recipient.clone(), ack.clone()))
      .expect("send while associating buffers");

    wait_for(|| association.state_kind() == AssociationStateKind::Associated, "association").await;
    wait_for(|| ack.is_completed(), "write completion").await;
    assert_eq!(ack.try_take(), Some(Ok(())));

    wait_for(|| !handler_b.user.lock().expect("lock").is_empty(), "delivery").await;
    let delivered = handler_b.user.lock().expect("lock").remove(0);
    assert_eq!(delivered.0, recipient);
    assert_eq!(delivered.1.bytes(), &[7, 7, 7]);

    driver_a.shutdown();
    driver_b.shutdown();
  });
}

#[test]
fn offers_to_the_wrong_incarnation_tombstone_the_initiator_side() {
  let rt = Runtime::new().expect("runtime");
  rt.block_on(async {
    let (driver_a, _node_a, _handler_a) = started_driver("orders").await;
    let (driver_b, node_b, _handler_b) = started_driver("billing").await;

    // Target B's endpoint under a nid B never had; B replies wrong target.
    let stale = UniqueNode::new(node_b.node().clone(), NodeId::new(node_b.nid().value().wrapping_add(1)));
    let association = driver_a.association_for(&stale);
    wait_for(|| association.state_kind() == AssociationStateKind::Tombstone, "rejection").await;
    assert!(driver_a.shell().with_read(|shell| shell.is_tombstoned(&stale)));

    driver_a.shutdown();
    driver_b.shutdown();
  });
}
