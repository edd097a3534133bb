//! RandomUserApi against a local canned HTTP server

use randomusers::{
    domain::UserError,
    infrastructure::{
        config::ApiConfig,
        remote::{RandomUserApi, UserRemoteDataSource},
    },
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    sync::oneshot,
};

const PAGE_BODY: &str = r#"{
    "results": [
        {
            "name": { "title": "Ms", "first": "Lydia", "last": "Garcia" },
            "location": {
                "street": { "number": 4512, "name": "Calle de Alcala" },
                "city": "Madrid",
                "state": "Comunidad de Madrid",
                "country": "Spain",
                "postcode": 28014
            },
            "email": "lydia.garcia@example.com",
            "phone": "912-345-678",
            "picture": {
                "large": "https://randomuser.me/api/portraits/women/1.jpg",
                "thumbnail": "https://randomuser.me/api/portraits/thumb/women/1.jpg"
            },
            "nat": "ES"
        }
    ],
    "info": { "seed": "lydia", "results": 1, "page": 2, "version": "1.3" }
}"#;

/// Serve one response and hand back the request line that was received
async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.expect("read");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let request_line = String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string();
        let _ = tx.send(request_line);

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();
    });

    (format!("http://{addr}/"), rx)
}

fn api_for(base_url: String) -> RandomUserApi {
    RandomUserApi::new(&ApiConfig {
        base_url,
        timeout_secs: 5,
        ..ApiConfig::default()
    })
    .expect("client should build")
}

#[tokio::test]
async fn test_fetches_and_decodes_page() {
    let (base_url, request) = serve_once("200 OK", PAGE_BODY).await;
    let api = api_for(base_url);

    let paged = api.get_user_page(2, 20).await.expect("page should load");

    assert_eq!(paged.users.len(), 1);
    assert_eq!(paged.users[0].email, "lydia.garcia@example.com");
    assert_eq!(paged.users[0].location.street_number, "4512");
    assert_eq!(paged.next_page, 3);

    let request_line = request.await.expect("request line");
    assert!(request_line.starts_with("GET /api/1.3/?"), "{request_line}");
    assert!(request_line.contains("seed=lydia"), "{request_line}");
    assert!(request_line.contains("results=20"), "{request_line}");
    assert!(request_line.contains("page=2"), "{request_line}");
}

#[tokio::test]
async fn test_failure_status_is_server_error() {
    let (base_url, _request) = serve_once(
        "500 Internal Server Error",
        r#"{"error": "Uh oh, something has gone wrong"}"#,
    )
    .await;
    let api = api_for(base_url);

    let error = api.get_user_page(1, 20).await.expect_err("should fail");

    assert!(matches!(error, UserError::Server(ref m) if m.contains("500")), "{error:?}");
    assert_eq!(error.user_message(), "Server error. Please try again later.");
}

#[tokio::test]
async fn test_malformed_body_is_server_error() {
    let (base_url, _request) = serve_once("200 OK", "<html>not json</html>").await;
    let api = api_for(base_url);

    let error = api.get_user_page(1, 20).await.expect_err("should fail");

    assert!(matches!(error, UserError::Server(_)), "{error:?}");
}

#[tokio::test]
async fn test_unreachable_host_is_connectivity_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let api = api_for(format!("http://{addr}/"));

    let error = api.get_user_page(1, 20).await.expect_err("should fail");

    assert!(matches!(error, UserError::Connectivity(_)), "{error:?}");
    assert_eq!(
        error.user_message(),
        "Network connection error. Please check your connection."
    );
}
