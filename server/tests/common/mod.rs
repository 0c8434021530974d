//! Shared helpers for HTTP API tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use camsign_plug::codec::encode_frame;
use camsign_plug::{cipher, Actuator, PlugClient};
use camsign_server::{build_router, AppState};
use camsign_sync::{Reconciler, StatusStore, SyncConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const RELAY_OK: &str = r#"{"system":{"set_relay_state":{"err_code":0}}}"#;
pub const TURN_ON: &str = r#"{"system":{"set_relay_state":{"state":1}}}"#;
pub const TURN_OFF: &str = r#"{"system":{"set_relay_state":{"state":0}}}"#;

/// An in-process outlet that records every decrypted command.
pub struct FakeOutlet {
    pub port: u16,
    commands: Arc<Mutex<Vec<String>>>,
}

impl FakeOutlet {
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let commands = Arc::new(Mutex::new(Vec::new()));
        let log = commands.clone();

        tokio::spawn(async move {
            loop {
                let (mut socket, _) = listener.accept().await.unwrap();
                let log = log.clone();
                tokio::spawn(async move {
                    let mut len = [0u8; 4];
                    socket.read_exact(&mut len).await.unwrap();
                    let mut body = vec![0u8; u32::from_be_bytes(len) as usize];
                    socket.read_exact(&mut body).await.unwrap();

                    let command = String::from_utf8(cipher::decrypt(&body)).unwrap();
                    log.lock().unwrap().push(command);
                    socket.write_all(&encode_frame(RELAY_OK)).await.unwrap();
                });
            }
        });

        Self { port, commands }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn client(&self) -> PlugClient {
        PlugClient::new("127.0.0.1")
            .with_port(self.port)
            .with_timeouts(Duration::from_secs(2), Duration::from_secs(2))
    }
}

/// A port with nothing listening on it.
pub async fn dead_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// Spin up the HTTP server on an OS-assigned port, returning the base URL.
pub async fn spawn_test_server(actuator: Arc<dyn Actuator>) -> String {
    let reconciler = Arc::new(Reconciler::new(
        Arc::new(StatusStore::new()),
        actuator,
        SyncConfig::default(),
    ));
    let app = build_router(AppState::new(reconciler));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}
