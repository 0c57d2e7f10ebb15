//! End-to-end session over an in-memory transport.

use std::sync::Arc;

use serde_json::{json, Value};

use notebridge_client::testing::{note, FakeNotesApi, RecordedCall};
use notebridge_core::{Note, NoteFormat};
use notebridge_mcp::{ChannelTransport, McpServer, McpTransport, PROTOCOL_VERSION};

async fn exchange(client: &mut ChannelTransport, message: Value) -> Value {
    client.send(&message.to_string()).await.unwrap();
    let line = client.receive().await.unwrap().expect("server closed");
    serde_json::from_str(&line).unwrap()
}

#[tokio::test]
async fn test_full_session() {
    let api = Arc::new(
        FakeNotesApi::new()
            .with_note(Note {
                markdown: Some("# Groceries\n- milk".to_string()),
                ..note("n1", "Groceries")
            })
            .with_payload(json!({"enabled": true})),
    );
    let mut server = McpServer::for_api(api.clone()).unwrap().with_name("session-test");
    let (mut client, mut server_side) = ChannelTransport::pair();

    let handle = tokio::spawn(async move { server.run(&mut server_side).await });

    let init = exchange(
        &mut client,
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {"protocolVersion": PROTOCOL_VERSION, "capabilities": {}}
        }),
    )
    .await;
    assert_eq!(init["id"], 1);
    assert_eq!(init["result"]["serverInfo"]["name"], "session-test");

    // Notifications get no reply; the next message read is the tools/list response.
    client
        .send(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string())
        .await
        .unwrap();

    let tools = exchange(
        &mut client,
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
    )
    .await;
    assert_eq!(tools["id"], 2);
    assert_eq!(tools["result"]["tools"].as_array().unwrap().len(), 6);

    let created = exchange(
        &mut client,
        json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {"name": "create-note", "arguments": {"title": "Ideas", "markdown": "- one"}}
        }),
    )
    .await;
    let text = created["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("Ideas"));
    assert!(created["result"].get("isError").is_none());

    let read = exchange(
        &mut client,
        json!({
            "jsonrpc": "2.0",
            "id": "r-4",
            "method": "resources/read",
            "params": {"uri": "note://notes/n1"}
        }),
    )
    .await;
    assert_eq!(read["id"], "r-4");
    assert_eq!(read["result"]["contents"][0]["text"], "# Groceries\n- milk");

    let missing = exchange(
        &mut client,
        json!({
            "jsonrpc": "2.0",
            "id": 5,
            "method": "resources/read",
            "params": {"uri": "note://notes/unknown"}
        }),
    )
    .await;
    assert_eq!(missing["error"]["code"], -32603);
    assert!(missing["error"]["message"]
        .as_str()
        .unwrap()
        .contains("HTTP 404"));

    drop(client);
    handle.await.unwrap().unwrap();

    let calls = api.calls();
    assert_eq!(calls.len(), 3);
    assert!(matches!(calls[0], RecordedCall::CreateNote(_)));
    assert_eq!(
        calls[1],
        RecordedCall::GetNote {
            id: "n1".to_string(),
            format: NoteFormat::Markdown
        }
    );
}

#[tokio::test]
async fn test_garbage_line_gets_parse_error_and_session_continues() {
    let mut server = McpServer::for_api(Arc::new(FakeNotesApi::new())).unwrap();
    let (mut client, mut server_side) = ChannelTransport::pair();
    let handle = tokio::spawn(async move { server.run(&mut server_side).await });

    client.send("this is not json").await.unwrap();
    let line = client.receive().await.unwrap().unwrap();
    let parsed: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(parsed["error"]["code"], -32700);
    assert_eq!(parsed["id"], Value::Null);

    let pong = exchange(&mut client, json!({"jsonrpc": "2.0", "id": 9, "method": "ping"})).await;
    assert_eq!(pong["result"], json!({}));

    drop(client);
    handle.await.unwrap().unwrap();
}
