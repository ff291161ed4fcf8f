use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use shoplist::{MemoryStore, Server};

async fn roundtrip(addr: std::net::SocketAddr, raw: String) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();
    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

fn request(method: &str, path: &str, body: &str) -> String {
    format!(
        "{method} {path} HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\
         content-type: application/json\r\ncontent-length: {}\r\n\r\n{body}",
        body.len()
    )
}

#[tokio::test]
async fn serves_items_over_tcp_and_shuts_down() {
    let server = Server::bind("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr();
    let (stop, stopped) = oneshot::channel::<()>();

    let app = shoplist::app(Arc::new(MemoryStore::new()));
    let handle = tokio::spawn(server.serve_with_shutdown(app, async {
        let _ = stopped.await;
    }));

    let res = roundtrip(addr, request("POST", "/items", r#"{"name":"popsicle","price":1.45}"#)).await;
    assert!(res.starts_with("HTTP/1.1 201"), "{res}");
    assert!(res.contains("location: /items/popsicle"), "{res}");
    assert!(res.ends_with(r#"{"added":{"name":"popsicle","price":1.45}}"#), "{res}");

    let res = roundtrip(addr, request("GET", "/items", "")).await;
    assert!(res.starts_with("HTTP/1.1 200"), "{res}");
    assert!(res.contains("content-type: application/json"), "{res}");
    assert!(res.ends_with(r#"[{"name":"popsicle","price":1.45}]"#), "{res}");

    let res = roundtrip(addr, request("POST", "/items", "{oops")).await;
    assert!(res.starts_with("HTTP/1.1 400"), "{res}");
    assert!(res.ends_with(r#"{"error":"Invalid JSON"}"#), "{res}");

    stop.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn bind_rejects_bad_address() {
    assert!(matches!(
        Server::bind("not-an-address").await,
        Err(shoplist::Error::Addr { .. })
    ));
}
