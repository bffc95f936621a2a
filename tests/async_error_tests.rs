use std::time::Duration;
use streamscope::{Config, Error, Frame, FrameReader, GREETING, PACKET_SIZE};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn local_config(port: u16) -> Config {
    Config::new("127.0.0.1".to_string(), port).with_connect_timeout(Duration::from_secs(5))
}

fn frame_bytes(seed: u8) -> Vec<u8> {
    (0..PACKET_SIZE)
        .map(|i| (i as u8).wrapping_add(seed))
        .collect()
}

/// Accepts one connection, consumes the greeting, and hands the socket over.
async fn accept_after_greeting(listener: TcpListener) -> tokio::net::TcpStream {
    let (mut socket, _) = listener.accept().await.unwrap();
    let mut greeting = vec![0u8; GREETING.len()];
    socket.read_exact(&mut greeting).await.unwrap();
    assert_eq!(greeting, GREETING);
    socket
}

/// Test that a refused connection fails before the receive loop
#[tokio::test]
async fn test_connect_refused() {
    // Bind and immediately drop to find a port with no listener.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = local_config(port).with_connect_timeout(Duration::from_secs(1));
    let result = FrameReader::connect(&config).await;

    match result {
        Err(Error::Connect(msg)) => assert!(msg.contains("127.0.0.1")),
        other => panic!("expected Connect error, got {:?}", other.map(|_| ())),
    }
}

/// Test that a connection attempt that never completes hits the timeout
#[tokio::test]
async fn test_connect_timeout() {
    // Non-routable address, as in RFC 5737 test blocks.
    let config = Config::new("192.0.2.1".to_string(), 80)
        .with_connect_timeout(Duration::from_millis(200));

    let result = FrameReader::connect(&config).await;
    assert!(matches!(result, Err(Error::Connect(_))));
}

/// Test that the greeting is written once and frames flow afterwards
#[tokio::test]
async fn test_greeting_then_one_frame() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let data = frame_bytes(0);
    let expected = data.clone();

    let server = tokio::spawn(async move {
        let mut socket = accept_after_greeting(listener).await;
        socket.write_all(&data).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    let mut reader = FrameReader::connect(&local_config(port)).await.unwrap();
    let frame = reader.read_frame().await.unwrap();
    assert_eq!(frame, expected);

    // The peer closed after one frame.
    assert!(matches!(
        reader.read_frame().await,
        Err(Error::ConnectionClosed { received: 0, .. })
    ));

    server.await.unwrap();
}

/// Test the three-frames-then-close scenario end to end
#[tokio::test]
async fn test_three_frames_then_close() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let mut socket = accept_after_greeting(listener).await;
        for seed in 0..3u8 {
            socket.write_all(&frame_bytes(seed)).await.unwrap();
        }
        socket.shutdown().await.unwrap();
    });

    let mut reader = FrameReader::connect(&local_config(port)).await.unwrap();

    for seed in 0..3u8 {
        let bytes = reader.read_frame().await.unwrap();
        assert_eq!(bytes, frame_bytes(seed));
        // Every complete buffer decodes.
        assert!(Frame::decode(&bytes).is_ok());
    }

    match reader.read_frame().await {
        Err(Error::ConnectionClosed { received, expected }) => {
            assert_eq!(received, 0);
            assert_eq!(expected, PACKET_SIZE);
        }
        other => panic!("expected ConnectionClosed, got {other:?}"),
    }

    server.await.unwrap();
}

/// Test that a mid-frame close never surfaces a short buffer
#[tokio::test]
async fn test_partial_frame_then_close() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let mut socket = accept_after_greeting(listener).await;
        socket
            .write_all(&frame_bytes(0)[..PACKET_SIZE / 2])
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let mut reader = FrameReader::connect(&local_config(port)).await.unwrap();

    match reader.read_frame().await {
        Err(Error::ConnectionClosed { received, expected }) => {
            assert_eq!(received, PACKET_SIZE / 2);
            assert_eq!(expected, PACKET_SIZE);
        }
        other => panic!("expected ConnectionClosed, got {other:?}"),
    }

    server.await.unwrap();
}
