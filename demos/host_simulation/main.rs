mod host;

use bunner_cors_intercept::{Activation, InterceptOptions, Interceptor, Preferences};
use host::SimulatedHost;
use http::{HeaderMap, HeaderValue};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PREFERENCES: &str = r#"{
    "enabledAtStartup": true,
    "staticOrigin": "",
    "activationWhitelist": "http://localhost:3000\n/^https://[a-z0-9-]+\\.cryptocontrol\\.io/"
}"#;

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let preferences: Preferences =
        serde_json::from_str(PREFERENCES).expect("valid demo preferences");
    let options = InterceptOptions {
        max_transaction_age: Some(Duration::from_secs(30)),
        ..InterceptOptions::try_from(&preferences).expect("valid activation whitelist")
    };
    let interceptor = Arc::new(Interceptor::new(options).expect("valid intercept options"));

    let host = SimulatedHost::default();
    let mut activation = Activation::new(
        Arc::clone(&interceptor),
        host.clone(),
        preferences.enabled_at_startup,
    );
    activation.start();

    let sweeper = {
        let interceptor = Arc::clone(&interceptor);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(250));
            loop {
                ticker.tick().await;
                interceptor.sweep_abandoned();
            }
        })
    };

    let initiators = [
        ("http://localhost:3000/markets", Some("http://localhost:3000")),
        ("https://terminal.cryptocontrol.io/app", Some("https://terminal.cryptocontrol.io")),
        ("https://elsewhere.example/page", Some("https://elsewhere.example")),
        ("http://localhost:3000/ws", None),
    ];

    let exchanges = initiators
        .into_iter()
        .map(|(origin_url, origin)| {
            let host = host.clone();
            tokio::spawn(async move { run_exchange(&host, origin_url, origin).await })
        })
        .collect::<Vec<_>>();
    for exchange in exchanges {
        exchange.await.expect("exchange task");
    }

    let enabled = activation.toggle();
    println!("activation toggled, enabled = {enabled}");
    run_exchange(&host, "http://localhost:3000/markets", Some("http://localhost:3000")).await;

    sweeper.abort();
}

async fn run_exchange(host: &SimulatedHost, origin_url: &str, origin: Option<&str>) {
    let id = NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed);

    let mut request = HeaderMap::new();
    if let Some(origin) = origin {
        request.insert(http::header::ORIGIN, HeaderValue::from_str(origin).expect("origin"));
    }
    request.insert(
        http::header::ACCESS_CONTROL_REQUEST_METHOD,
        HeaderValue::from_static("POST"),
    );
    let sent = host.send_request(id, origin_url, &request);

    tokio::time::sleep(Duration::from_millis(10 * id)).await;

    let mut response = HeaderMap::new();
    response.insert(
        http::header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    let delivered = host.receive_response(id, &response);

    println!("#{id} {origin_url}");
    println!("  sent:      {sent:?}");
    println!("  delivered: {delivered:?}");
}
