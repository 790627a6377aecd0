use ledcube::{decode_332, palette, Cube, MemoryStrip};
use ledcube_server::{FrameListener, ServerConfig, StreamMetrics};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;

async fn local_listener(size: u32) -> FrameListener<MemoryStrip> {
    let config = ServerConfig {
        bind_host: "127.0.0.1".to_string(),
        port: 0,
        size,
        ..Default::default()
    };
    let cube = Cube::with_strip(size, 50, MemoryStrip::new());
    FrameListener::bind(&config, cube, Arc::new(StreamMetrics::default()))
        .await
        .unwrap()
}

async fn send(to: SocketAddr, payload: &[u8]) {
    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    client.send_to(payload, to).await.unwrap();
}

async fn recv(listener: &mut FrameListener<MemoryStrip>) -> bool {
    tokio::time::timeout(Duration::from_secs(5), listener.recv_once())
        .await
        .expect("no datagram arrived")
        .unwrap()
}

#[tokio::test]
async fn test_exact_size_frame_is_applied() {
    let mut listener = local_listener(4).await;
    let addr = listener.local_addr().unwrap();

    let mut frame = vec![0u8; 64];
    frame[0] = 0xE0;
    frame[63] = 0x03;
    send(addr, &frame).await;

    assert!(recv(&mut listener).await);
    let cube = listener.cube();
    assert_eq!(cube.strip().show_count(), 1);
    assert_eq!(cube.get_voxel_index(0), decode_332(0xE0));
    assert_eq!(cube.get_voxel_index(63), decode_332(0x03));
    assert_eq!(listener.metrics().applied(), 1);
}

#[tokio::test]
async fn test_wrong_size_datagram_is_dropped() {
    let mut listener = local_listener(4).await;
    listener.cube_mut().background(palette::RED);
    let addr = listener.local_addr().unwrap();

    send(addr, &[0xFF; 10]).await;
    assert!(!recv(&mut listener).await);

    send(addr, &[0xFF; 65]).await;
    assert!(!recv(&mut listener).await);

    let cube = listener.cube();
    assert_eq!(cube.strip().show_count(), 0);
    assert!(cube.as_slice().iter().all(|&c| c == palette::RED));
    assert_eq!(listener.metrics().dropped(), 2);
    assert_eq!(listener.metrics().applied(), 0);
}

#[tokio::test]
async fn test_set_port_rebinds() {
    let mut listener = local_listener(2).await;
    let old = listener.local_addr().unwrap();

    let port = listener.set_port("0").await.unwrap();
    assert_ne!(port, 0);
    let new = listener.local_addr().unwrap();
    assert_eq!(new.port(), port);
    assert_ne!(new, old);
    assert_eq!(listener.network_info().port, port);

    send(new, &[0x1C; 8]).await;
    assert!(recv(&mut listener).await);
    assert_eq!(listener.cube().get_voxel_index(7), decode_332(0x1C));
}

#[tokio::test]
async fn test_set_port_to_current_port_keeps_socket() {
    let mut listener = local_listener(2).await;
    let current = listener.local_addr().unwrap();

    let port = listener.set_port(&current.port().to_string()).await.unwrap();
    assert_eq!(port, current.port());
    assert_eq!(listener.local_addr().unwrap(), current);
    assert_eq!(listener.network_info().port, port);

    send(current, &[0xE0; 8]).await;
    assert!(recv(&mut listener).await);
    assert_eq!(listener.cube().get_voxel_index(0), decode_332(0xE0));
}

#[tokio::test]
async fn test_run_until_stops_on_shutdown() {
    let mut listener = local_listener(2).await;
    listener.run_until(async {}).await.unwrap();
    assert_eq!(listener.metrics().applied(), 0);
}

#[tokio::test]
async fn test_bind_rejects_mismatched_cube() {
    let config = ServerConfig {
        bind_host: "127.0.0.1".to_string(),
        port: 0,
        size: 8,
        ..Default::default()
    };
    let cube = Cube::with_strip(4, 50, MemoryStrip::new());
    let result = FrameListener::bind(&config, cube, Arc::new(StreamMetrics::default())).await;
    assert!(result.is_err());
}
