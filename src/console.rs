//! Console Mode
//!
//! Line-oriented front end over the coordinator, selected with `APP_MODE=2`.
//! Each `GET <key>` line prints the value or `(nil)`.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::warn;

use crate::proxy::Coordinator;

/// Banner written before the first prompt.
pub const BANNER: &str = "RESPY>";

/// Runs the console until `input` reaches end of file.
pub async fn run_console<R, W>(
    coordinator: &Coordinator,
    input: R,
    mut output: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(format!("{}\n", BANNER).as_bytes()).await?;
    output.flush().await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = execute(coordinator, line).await;
        output.write_all(reply.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }

    Ok(())
}

async fn execute(coordinator: &Coordinator, line: &str) -> String {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(command), Some(key)) if command.eq_ignore_ascii_case("GET") => {
            match coordinator.handle_get(key).await {
                Ok(Some(value)) => value,
                Ok(None) => "(nil)".to_string(),
                Err(e) => {
                    warn!("Console GET for '{}' failed: {}", key, e);
                    format!("(error) {}", e)
                }
            }
        }
        (Some(command), None) if command.eq_ignore_ascii_case("GET") => {
            "(error) GET requires a key".to_string()
        }
        _ => "Only GET is supported".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backing::InMemoryStore;
    use crate::cache::LocalCache;
    use std::sync::Arc;
    use tokio::io::BufReader;

    async fn run(coordinator: &Coordinator, script: &str) -> Vec<String> {
        let mut output = Vec::new();
        run_console(coordinator, BufReader::new(script.as_bytes()), &mut output)
            .await
            .unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn test_console_get() {
        let store = Arc::new(InMemoryStore::new());
        store.insert("bing", "charlie").await;
        let coordinator = Coordinator::new(LocalCache::new(10, None), store);

        let lines = run(&coordinator, "GET bing\nGET zeep\n\nget bing\n").await;

        assert_eq!(lines, vec![BANNER, "charlie", "(nil)", "charlie"]);
    }

    #[tokio::test]
    async fn test_console_rejects_other_commands() {
        let store = Arc::new(InMemoryStore::new());
        let coordinator = Coordinator::new(LocalCache::new(10, None), store.clone());

        let lines = run(&coordinator, "SET a b\nGET\n").await;

        assert_eq!(
            lines,
            vec![BANNER, "Only GET is supported", "(error) GET requires a key"]
        );
        assert_eq!(store.put_calls(), 0);
    }

    #[tokio::test]
    async fn test_console_reports_backing_errors() {
        let store = Arc::new(InMemoryStore::new());
        store.set_unavailable(true);
        let coordinator = Coordinator::new(LocalCache::new(10, None), store);

        let lines = run(&coordinator, "GET k\n").await;

        assert!(lines[1].starts_with("(error) Backing store unavailable"));
    }
}
