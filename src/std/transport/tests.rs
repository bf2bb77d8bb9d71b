#![cfg(test)]

use core::time::Duration;

use tokio::{net::{TcpListener, TcpStream}, runtime::Runtime, time::timeout};

use super::{read_frame, write_framed, TcpChannel};
use crate::core::{ChannelError, Node, NodeId, OutboundChannel, SendError, UniqueNode, WriteFuture};

fn peer() -> UniqueNode {
  UniqueNode::new(Node::new("billing", "127.0.0.1", 7337), NodeId::new(0x22))
}

async fn connected_pair() -> (TcpStream, TcpStream) {
  let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
  let addr = listener.local_addr().expect("addr");
  let client = TcpStream::connect(addr).await.expect("connect");
  let (server, _) = listener.accept().await.expect("accept");
  (client, server)
}

#[test]
fn channel_writes_framed_bytes_and_resolves_the_future() {
  let rt = Runtime::new().expect("runtime");
  rt.block_on(async {
    let (client, server) = connected_pair().await;
    let (_client_read, client_write) = client.into_split();
    let (mut server_read, _server_write) = server.into_split();

    let channel = TcpChannel::spawn(peer(), client_write);
    let ack = WriteFuture::pending();
    channel.write_and_flush(vec![1, 2, 3], Some(ack.clone())).expect("submit");

    let frame = timeout(Duration::from_secs(5), read_frame(&mut server_read))
      .await
      .expect("read in time")
      .expect("read")
      .expect("frame");
    assert_eq!(frame, vec![1, 2, 3]);

    while !ack.is_completed() {
      tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(ack.try_take(), Some(Ok(())));
  });
}

#[test]
fn closed_channel_refuses_writes_and_fails_futures() {
  let rt = Runtime::new().expect("runtime");
  rt.block_on(async {
    let (client, _server) = connected_pair().await;
    let (_client_read, client_write) = client.into_split();

    let channel = TcpChannel::spawn(peer(), client_write);
    channel.close();

    let ack = WriteFuture::pending();
    let result = channel.write_and_flush(vec![9], Some(ack.clone()));
    assert_eq!(result, Err(ChannelError::Closed));
    assert_eq!(ack.try_take(), Some(Err(SendError::ChannelWrite(ChannelError::Closed))));
  });
}

#[test]
fn direct_frames_round_trip() {
  let rt = Runtime::new().expect("runtime");
  rt.block_on(async {
    let (client, server) = connected_pair().await;
    let (_client_read, mut client_write) = client.into_split();
    let (mut server_read, _server_write) = server.into_split();

    write_framed(&mut client_write, vec![42; 100]).await.expect("write");
    let frame = read_frame(&mut server_read).await.expect("read").expect("frame");
    assert_eq!(frame, vec![42; 100]);

    drop(_client_read);
    drop(client_write);
    assert!(read_frame(&mut server_read).await.expect("clean close").is_none());
  });
}
