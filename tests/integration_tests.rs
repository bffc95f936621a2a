use std::time::Duration;
use streamscope::{Config, Frame, FrameStats, StatsCollector, BUFFER_SIZE, PACKET_SIZE};

// Full end-to-end runs live in async_error_tests and callback_tests; these
// cover configuration and the arithmetic the reports rely on.

#[test]
fn test_config_builder() {
    let config = Config::new("192.168.4.1".to_string(), 80)
        .with_connect_timeout(Duration::from_secs(5))
        .with_recv_chunk(4096)
        .with_plot(true)
        .with_plot_size(80, 20)
        .with_json(true);

    assert_eq!(config.endpoint(), "192.168.4.1:80");
    assert_eq!(config.connect_timeout, Duration::from_secs(5));
    assert_eq!(config.recv_chunk, 4096);
    assert!(config.plot);
    assert_eq!(config.plot_width, 80);
    assert_eq!(config.plot_height, 20);
    assert!(config.json);
}

#[test]
fn test_wire_constants() {
    assert_eq!(BUFFER_SIZE, 16384);
    assert_eq!(PACKET_SIZE, 32768);
    assert_eq!(PACKET_SIZE, BUFFER_SIZE * 2);
}

#[test]
fn test_bandwidth_computation() {
    let stats = FrameStats {
        index: 0,
        bytes: PACKET_SIZE,
        elapsed: Duration::from_secs(1),
    };

    // 32768 bytes in exactly one second
    assert_eq!(stats.mib_per_sec(), 32768.0 / 1_048_576.0);
    assert_eq!(stats.mib_per_sec(), 0.03125);
}

#[test]
fn test_decode_known_pattern() {
    let mut bytes = Vec::with_capacity(PACKET_SIZE);
    for _ in 0..BUFFER_SIZE {
        bytes.extend_from_slice(&[0x00, 0x01]);
    }

    let frame = Frame::decode(&bytes).unwrap();
    assert_eq!(frame.samples().len(), BUFFER_SIZE);
    assert!(frame.samples().iter().all(|&v| v == 256));
}

#[test]
fn test_session_totals() {
    let collector = StatsCollector::new();

    for index in 0..3 {
        collector.record_frame(
            &FrameStats {
                index,
                bytes: PACKET_SIZE,
                elapsed: Duration::from_millis(250),
            },
            0,
            4095,
        );
    }

    let totals = collector.get();
    assert_eq!(totals.frames, 3);
    assert_eq!(totals.total_bytes, 3 * PACKET_SIZE as u64);
    assert_eq!(totals.total_elapsed, Duration::from_millis(750));
    assert_eq!(totals.min_sample, Some(0));
    assert_eq!(totals.max_sample, Some(4095));
}

#[test]
fn test_session_summary_serializes() {
    let collector = StatsCollector::new();
    collector.record_frame(
        &FrameStats {
            index: 0,
            bytes: PACKET_SIZE,
            elapsed: Duration::from_secs(1),
        },
        12,
        3400,
    );

    let value = serde_json::to_value(collector.get()).unwrap();
    assert_eq!(value["frames"], 1);
    assert_eq!(value["total_bytes"], PACKET_SIZE as u64);
    assert_eq!(value["min_sample"], 12);
    assert_eq!(value["max_sample"], 3400);
}
