// HTTP API tests: requests go through the full router via `oneshot`
//
// Numan Thabit 2025 Nov

mod common;

use axum::http::{Request, StatusCode};
use axum::body::Body;
use common::{get, post_form, read_json, MockNode};
use lncm_gateway::config::SensorConfig;
use lncm_gateway::router::{create_api_router, Backends};
use lncm_gateway::sensors::Sensors;
use lncm_gateway::signing::{sign_claims, Claims, JwtAuth};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

const JWT_KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

async fn bitcoind_app(node: &MockNode) -> axum::Router {
    let client = node.client().await;
    create_api_router(Backends {
        bitcoind: Some(Arc::new(client)),
        ..Backends::default()
    })
}

const BLOCKCHAIN_INFO: &str = r#"{"result":{
    "chain":"main","blocks":700000,"headers":700000,
    "bestblockhash":"0000000000000000000590fc0f3eba193a278534220b2b37e9849e1a770ca959",
    "difficulty":18415156832118.24,"mediantime":1631331583,
    "verificationprogress":0.9999,"initialblockdownload":false,
    "chainwork":"00000000000000000000000000000000000000001fa4663bbbe19f82de910280",
    "size_on_disk":420000000000,"pruned":false,"warnings":""
},"error":null}"#;

#[tokio::test]
async fn blockchain_info_is_wrapped_in_envelope() {
    let node = MockNode::new();
    node.reply("getblockchaininfo", BLOCKCHAIN_INFO);
    let app = bitcoind_app(&node).await;

    let (status, body) = read_json(app.oneshot(get("/api/blockchaininfo")).await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OK");
    assert_eq!(body["blockchaininfo"]["blocks"], 700000);
    assert_eq!(body["blockchaininfo"]["chain"], "main");
}

#[tokio::test]
async fn block_count_route() {
    let node = MockNode::new();
    let app = bitcoind_app(&node).await;
    let (status, body) = read_json(app.oneshot(get("/api/blockcount")).await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "OK", "blockcount": 700000}));
}

#[tokio::test]
async fn mempool_lists_txids() {
    let node = MockNode::new();
    node.reply(
        "getrawmempool",
        r#"{"result":["6f7cf9580f1c2dfb3c4d5d043cdbb128c640e3f20161245aa7372e9666168516","c2e4a3f8ba9d7a5d0b6a1d8f44a8f4b0a9bdfa54f0d7d7fd1e0d1a0a7b9c2d3e"],"error":null}"#,
    );
    let app = bitcoind_app(&node).await;

    let (status, body) = read_json(app.oneshot(get("/api/mempool")).await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let txids = body["mempool"].as_array().unwrap();
    assert_eq!(txids.len(), 2);
    assert_eq!(
        txids[0],
        "6f7cf9580f1c2dfb3c4d5d043cdbb128c640e3f20161245aa7372e9666168516"
    );
}

#[tokio::test]
async fn best_block_hash_route() {
    let node = MockNode::new();
    node.reply(
        "getbestblockhash",
        r#"{"result":"0000000000000000000590fc0f3eba193a278534220b2b37e9849e1a770ca959","error":null}"#,
    );
    let app = bitcoind_app(&node).await;

    let (status, body) = read_json(app.oneshot(get("/api/getblockhash")).await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "OK",
            "blockhash": "0000000000000000000590fc0f3eba193a278534220b2b37e9849e1a770ca959"
        })
    );
}

#[tokio::test]
async fn mempool_info_route() {
    let node = MockNode::new();
    node.reply(
        "getmempoolinfo",
        r#"{"result":{"loaded":true,"size":3,"bytes":750,"usage":4096,"total_fee":0.0001,"maxmempool":300000000,"mempoolminfee":0.00001,"minrelaytxfee":0.00001,"unbroadcastcount":0},"error":null}"#,
    );
    let app = bitcoind_app(&node).await;

    let (status, body) = read_json(app.oneshot(get("/api/mempoolinfo")).await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mempoolinfo"]["size"], 3);
    assert_eq!(body["mempoolinfo"]["maxmempool"], 300000000);
}

#[tokio::test]
async fn node_error_becomes_500_without_payload() {
    let node = MockNode::new();
    node.reply_with_status(
        "getrawtransaction",
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"result":null,"error":{"code":-5,"message":"No such mempool or blockchain transaction"}}"#,
    );
    let app = bitcoind_app(&node).await;

    let (status, body) = read_json(app.oneshot(get("/api/txid/deadbeef")).await.unwrap()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Can't access transaction index"));
    assert!(message.contains("-5"));
    assert!(body.get("txinfo").is_none());

    let tx_call = node.calls().into_iter().find(|c| c.method == "getrawtransaction").unwrap();
    assert_eq!(tx_call.params, json!(["deadbeef", 1]));
}

#[tokio::test]
async fn non_numeric_height_never_reaches_node() {
    let node = MockNode::new();
    let app = bitcoind_app(&node).await;

    let (status, body) = read_json(app.oneshot(get("/api/blockheight/abc")).await.unwrap()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Error converting input to integer"}));
    assert!(!node.methods().iter().any(|m| m == "getblockhash"));
}

#[tokio::test]
async fn block_hash_by_height() {
    let node = MockNode::new();
    node.reply(
        "getblockhash",
        r#"{"result":"000000006a625f06636b8bb6ac7b960a8d03705d1ace08b1a19da3fdcc99ddbd","error":null}"#,
    );
    let app = bitcoind_app(&node).await;

    let (status, body) = read_json(app.oneshot(get("/api/blockheight/100")).await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "OK",
            "blockhash": "000000006a625f06636b8bb6ac7b960a8d03705d1ace08b1a19da3fdcc99ddbd"
        })
    );
}

#[tokio::test]
async fn pushtx_requires_hex_field() {
    let node = MockNode::new();
    let app = bitcoind_app(&node).await;

    let (status, body) =
        read_json(app.oneshot(post_form("/api/pushtx", "other=1")).await.unwrap()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Missing form field: hex");
    assert!(!node.methods().iter().any(|m| m == "sendrawtransaction"));
}

#[tokio::test]
async fn pushtx_broadcasts_hex() {
    let node = MockNode::new();
    node.reply("sendrawtransaction", r#"{"result":"f00d","error":null}"#);
    let app = bitcoind_app(&node).await;

    let (status, body) =
        read_json(app.oneshot(post_form("/api/pushtx", "hex=0200aa")).await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "OK", "txid": "f00d"}));
    let call = node.calls().into_iter().last().unwrap();
    assert_eq!(call.method, "sendrawtransaction");
    assert_eq!(call.params, json!(["0200aa"]));
}

#[tokio::test]
async fn api_index_lists_enabled_routes() {
    let node = MockNode::new();
    let app = bitcoind_app(&node).await;

    let (status, body) = read_json(app.oneshot(get("/api")).await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let paths: Vec<&str> = body.as_array().unwrap().iter().filter_map(|v| v.as_str()).collect();
    assert!(paths.contains(&"GET /api/blockcount"));
    assert!(paths.contains(&"POST /api/pushtx"));
    assert!(!paths.contains(&"GET /api/cpuTemp"));
    assert!(!paths.contains(&"POST /api/login"));
}

#[tokio::test]
async fn trailing_slash_index_is_listed_and_served() {
    let app = create_api_router(Backends::default());

    let (status, slash) = read_json(app.clone().oneshot(get("/api/")).await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let (_, bare) = read_json(app.oneshot(get("/api")).await.unwrap()).await;
    assert_eq!(slash, bare);

    let paths: Vec<&str> = slash.as_array().unwrap().iter().filter_map(|v| v.as_str()).collect();
    assert!(paths.contains(&"GET /api"));
    assert!(paths.contains(&"GET /api/"));
    assert!(paths.contains(&"GET /api/info"));
}

#[tokio::test]
async fn ping_and_unregistered_routes() {
    let app = create_api_router(Backends::default());

    let (status, body) = read_json(app.clone().oneshot(get("/api/info")).await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "pong"}));

    let resp = app.oneshot(get("/api/blockcount")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

fn sensor_tree() -> (tempfile::TempDir, SensorConfig) {
    let dir = tempfile::tempdir().unwrap();
    let battery = dir.path().join("battery");
    let thermal = dir.path().join("thermal");
    let magn = dir.path().join("iio");
    std::fs::create_dir_all(&battery).unwrap();
    std::fs::create_dir_all(thermal.join("thermal_zone0")).unwrap();
    std::fs::create_dir_all(thermal.join("thermal_zone1")).unwrap();
    std::fs::create_dir_all(&magn).unwrap();
    std::fs::write(battery.join("present"), "1\n").unwrap();
    std::fs::write(battery.join("capacity"), "87\n").unwrap();
    std::fs::write(thermal.join("thermal_zone0/temp"), "41500\n").unwrap();
    std::fs::write(thermal.join("thermal_zone1/temp"), "39000\n").unwrap();
    std::fs::write(magn.join("in_magn_y_raw"), "-312\n").unwrap();
    let conf = SensorConfig {
        battery_dir: battery,
        thermal_dir: thermal,
        magnetometer_dir: magn,
    };
    (dir, conf)
}

#[tokio::test]
async fn sensor_routes_read_sysfs() {
    let (_dir, conf) = sensor_tree();
    let app = create_api_router(Backends {
        sensors: Some(Arc::new(Sensors::new(&conf))),
        ..Backends::default()
    });

    let (_, body) = read_json(app.clone().oneshot(get("/api/batteryStatus")).await.unwrap()).await;
    assert_eq!(body, json!({"message": "OK", "status": "1"}));
    let (_, body) = read_json(app.clone().oneshot(get("/api/batteryCapacity")).await.unwrap()).await;
    assert_eq!(body["percent"], "87");
    let (_, body) = read_json(app.clone().oneshot(get("/api/cpuTemp")).await.unwrap()).await;
    assert_eq!(body["cputemp"], 41);
    let (_, body) = read_json(app.clone().oneshot(get("/api/gpuTemp")).await.unwrap()).await;
    assert_eq!(body["gputemp"], 39);
    let (_, body) = read_json(app.clone().oneshot(get("/api/magnetometer/y")).await.unwrap()).await;
    assert_eq!(body["magnetometer"], -312);

    let (status, _) = read_json(app.oneshot(get("/api/magnetometer/x")).await.unwrap()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

fn login_app() -> axum::Router {
    create_api_router(Backends {
        auth: Some(Arc::new(JwtAuth::new(JWT_KEY.to_vec(), "lncm", "changeme"))),
        ..Backends::default()
    })
}

#[tokio::test]
async fn login_issues_token_that_validates() {
    let app = login_app();
    let (status, body) = read_json(
        app.clone()
            .oneshot(post_form("/api/login", "username=lncm&password=changeme"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("POST")
        .uri("/api/login")
        .header("JWT", token)
        .body(Body::empty())
        .unwrap();
    let (status, body) = read_json(app.oneshot(req).await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "OK", "status": "valid"}));
}

#[tokio::test]
async fn login_rejects_bad_password() {
    let (status, body) = read_json(
        login_app()
            .oneshot(post_form("/api/login", "username=lncm&password=nope"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn expired_token_is_not_active() {
    let claims = Claims {
        user: "lncm".into(),
        exp: jsonwebtoken::get_current_timestamp() - 60,
    };
    let token = sign_claims(JWT_KEY, &claims).unwrap();
    let req = Request::builder()
        .method("POST")
        .uri("/api/login")
        .header("JWT", token)
        .body(Body::empty())
        .unwrap();
    let (status, body) = read_json(login_app().oneshot(req).await.unwrap()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Token rejected: not active");
}

#[tokio::test]
async fn btc_price_passes_upstream_body_through() {
    use lncm_gateway::transport::pricefeed::PriceFeed;

    const QUOTE: &str = r#"{"USD":{"last":64012.5,"symbol":"$"}}"#;
    let upstream = axum::Router::new().route(
        "/ticker",
        axum::routing::get(|| async { ([("content-type", "application/json")], QUOTE) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.unwrap();
    });

    let url = format!("http://{addr}/ticker").parse().unwrap();
    let app = create_api_router(Backends {
        price_feed: Some(Arc::new(PriceFeed::new(url).unwrap())),
        ..Backends::default()
    });
    let resp = app.oneshot(get("/api/btcprice")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "application/json");
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], QUOTE.as_bytes());
}

#[tokio::test]
async fn btc_price_upstream_down_is_500() {
    use lncm_gateway::transport::pricefeed::PriceFeed;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("http://{addr}/ticker").parse().unwrap();
    let app = create_api_router(Backends {
        price_feed: Some(Arc::new(PriceFeed::new(url).unwrap())),
        ..Backends::default()
    });
    let (status, body) = read_json(app.oneshot(get("/api/btcprice")).await.unwrap()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().unwrap().starts_with("Can't fetch price feed"));
}
