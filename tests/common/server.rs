//! Test server management.
//!
//! Spawns and manages relayd instances for integration testing.

use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

/// A test server instance.
pub struct TestServer {
    child: Child,
    port: u16,
    // Holds the config file until the server is gone.
    _config_dir: TempDir,
}

impl TestServer {
    /// Spawn a server with the default idle timeout.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with_idle(300).await
    }

    /// Spawn a server that kicks clients after `idle_secs` of silence.
    pub async fn spawn_with_idle(idle_secs: u64) -> anyhow::Result<Self> {
        let port = free_port()?;
        let config_dir = tempfile::tempdir()?;
        let config_path = config_dir.path().join("relayd.toml");
        let config_content = format!(
            r#"
[server]
name = "test.relay"
metrics_port = 0

[listen]
address = "127.0.0.1:{port}"

[timeouts]
idle = {idle_secs}

[limits]
max_line_len = 512
"#
        );
        std::fs::write(&config_path, config_content)?;

        let child = Command::new(env!("CARGO_BIN_EXE_relayd"))
            .arg("--config")
            .arg(&config_path)
            .env("RUST_LOG", "warn")
            .stdout(Stdio::null())
            .spawn()?;

        let server = Self {
            child,
            port,
            _config_dir: config_dir,
        };

        server.wait_until_ready().await?;

        Ok(server)
    }

    /// Wait until the server is accepting connections.
    ///
    /// The probe connection itself comes and goes as a session; give its
    /// joined/left notices time to flush before test clients arrive.
    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        for _ in 0..50 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                sleep(Duration::from_millis(100)).await;
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("Server failed to start within 5 seconds")
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    /// Create a new test client connected to this server, waiting until it
    /// has seen its own join notice.
    pub async fn connect(&self) -> anyhow::Result<super::client::TestClient> {
        let mut client = super::client::TestClient::connect(&self.address()).await?;
        client.wait_joined().await?;
        Ok(client)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn free_port() -> std::io::Result<u16> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
