//! Tests for the outlet client against an in-process fake outlet.

use camsign_plug::actuator::mock::RecordingActuator;
use camsign_plug::cipher;
use camsign_plug::codec::encode_frame;
use camsign_plug::{Actuator, PlugClient, PlugError, CONNECT_TIMEOUT, DEFAULT_PORT};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Accepts connections, records each decrypted request and answers with
/// `reply`. Returns the port and the shared request log.
async fn spawn_fake_outlet(reply: &'static str) -> (u16, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = requests.clone();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut len = [0u8; 4];
            socket.read_exact(&mut len).await.unwrap();
            let mut body = vec![0u8; u32::from_be_bytes(len) as usize];
            socket.read_exact(&mut body).await.unwrap();

            let request = String::from_utf8(cipher::decrypt(&body)).unwrap();
            log.lock().unwrap().push(request);

            socket.write_all(&encode_frame(reply)).await.unwrap();
        }
    });

    (port, requests)
}

#[test]
fn defaults() {
    let client = PlugClient::new("10.0.0.7");
    assert_eq!(client.host(), "10.0.0.7");
    assert_eq!(client.port(), DEFAULT_PORT);
    assert_eq!(DEFAULT_PORT, 9999);
    assert_eq!(CONNECT_TIMEOUT, Duration::from_secs(10));
}

#[tokio::test]
async fn system_info_returns_decrypted_response() {
    let reply = r#"{"system":{"get_sysinfo":{"alias":"camera sign","relay_state":0}}}"#;
    let (port, requests) = spawn_fake_outlet(reply).await;
    let client = PlugClient::new("127.0.0.1").with_port(port);

    let info = client.system_info().await.unwrap();

    assert_eq!(info, reply);
    assert_eq!(
        requests.lock().unwrap().as_slice(),
        &[r#"{"system":{"get_sysinfo":{}}}"#.to_string()]
    );
}

#[tokio::test]
async fn turn_on_and_off_send_relay_state() {
    let (port, requests) =
        spawn_fake_outlet(r#"{"system":{"set_relay_state":{"err_code":0}}}"#).await;
    let client = PlugClient::new("127.0.0.1").with_port(port);

    client.turn_on().await.unwrap();
    client.turn_off().await.unwrap();

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], r#"{"system":{"set_relay_state":{"state":1}}}"#);
    assert_eq!(requests[1], r#"{"system":{"set_relay_state":{"state":0}}}"#);
}

#[tokio::test]
async fn actuator_apply_uses_a_new_connection_per_command() {
    let (port, requests) = spawn_fake_outlet(r#"{}"#).await;
    let client = PlugClient::new("127.0.0.1").with_port(port);
    let actuator: &dyn Actuator = &client;

    actuator.apply(true).await.unwrap();
    actuator.apply(true).await.unwrap();
    actuator.apply(false).await.unwrap();

    assert_eq!(requests.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn daily_stats_and_meter_info() {
    let (port, requests) = spawn_fake_outlet(r#"{"emeter":{"err_code":0}}"#).await;
    let client = PlugClient::new("127.0.0.1").with_port(port);

    assert_eq!(
        client.daily_stats(7, 2023).await.unwrap(),
        r#"{"emeter":{"err_code":0}}"#
    );
    client.meter_info().await.unwrap();

    let requests = requests.lock().unwrap();
    let stats: serde_json::Value = serde_json::from_str(&requests[0]).unwrap();
    assert_eq!(stats["emeter"]["get_daystat"]["month"], 7);
    assert_eq!(stats["emeter"]["get_daystat"]["year"], 2023);
    let meter: serde_json::Value = serde_json::from_str(&requests[1]).unwrap();
    assert!(meter["emeter"]["get_realtime"].is_object());
    assert!(meter["system"]["get_sysinfo"].is_object());
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = PlugClient::new("127.0.0.1").with_port(port);
    let err = client.turn_on().await.unwrap_err();

    assert!(matches!(err, PlugError::Connect { .. }), "got {err:?}");
    assert!(err.is_transport());
    assert!(err.to_string().contains("cannot connect to plug"));
}

#[tokio::test]
async fn outlet_hanging_up_without_reply_is_protocol_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut len = [0u8; 4];
        socket.read_exact(&mut len).await.unwrap();
        let mut body = vec![0u8; u32::from_be_bytes(len) as usize];
        socket.read_exact(&mut body).await.unwrap();
    });

    let client = PlugClient::new("127.0.0.1").with_port(port);
    let err = client.system_info().await.unwrap_err();

    assert!(matches!(err, PlugError::Protocol(_)), "got {err:?}");
}

#[tokio::test]
async fn silent_outlet_hits_io_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let client = PlugClient::new("127.0.0.1")
        .with_port(port)
        .with_timeouts(Duration::from_secs(1), Duration::from_millis(100));
    let err = client.turn_off().await.unwrap_err();

    assert!(matches!(err, PlugError::IoTimeout), "got {err:?}");
    assert!(err.is_transport());
}

#[tokio::test]
async fn recording_actuator_records_and_fails_on_demand() {
    let actuator = RecordingActuator::new();
    actuator.apply(true).await.unwrap();

    actuator.set_failing(true);
    assert!(actuator.apply(false).await.is_err());

    assert_eq!(actuator.applied(), vec![true, false]);
    assert_eq!(actuator.last(), Some(false));
}
