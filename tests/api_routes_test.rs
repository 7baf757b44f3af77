use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use osint_portal::api::build_router;
use osint_portal::config::ProvidersConfig;
use osint_portal::domain::model::DnsRecordType;
use osint_portal::domain::ports::NameResolver;
use osint_portal::{Credentials, Portal, PortalConfig, PortalError, Result as PortalResult};
use serde_json::{json, Value};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use tower::ServiceExt;

/// Resolver that knows nothing.
struct NoDns;

#[async_trait]
impl NameResolver for NoDns {
    async fn lookup_records(&self, name: &str, _record_type: DnsRecordType) -> PortalResult<Vec<String>> {
        Err(offline(name))
    }

    async fn resolve_ipv4(&self, name: &str) -> PortalResult<Option<Ipv4Addr>> {
        Err(offline(name))
    }

    async fn reverse_lookup(&self, _ip: IpAddr) -> PortalResult<Option<String>> {
        Ok(None)
    }
}

fn offline(name: &str) -> PortalError {
    PortalError::ConfigError {
        message: format!("offline: {}", name),
    }
}

fn closed_port() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);
    addr
}

fn config_with_base(base_url: &str) -> PortalConfig {
    PortalConfig {
        providers: ProvidersConfig {
            timeout_seconds: 2,
            github_base_url: base_url.to_string(),
            reddit_base_url: base_url.to_string(),
            ip_api_base_url: base_url.to_string(),
            hibp_base_url: base_url.to_string(),
            ipinfo_base_url: base_url.to_string(),
            shodan_base_url: base_url.to_string(),
            whois_server: closed_port(),
            ..ProvidersConfig::default()
        },
        ..PortalConfig::default()
    }
}

fn router_for(config: &PortalConfig) -> axum::Router {
    let portal = Portal::with_resolver(config, Credentials::default(), Arc::new(NoDns)).unwrap();
    build_router(Arc::new(portal))
}

fn offline_router() -> axum::Router {
    router_for(&config_with_base(&format!("http://{}", closed_port())))
}

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_root_banner() {
    let (status, body) = get_json(offline_router(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "OSINT Portal API"}));
}

#[tokio::test]
async fn test_domain_with_every_source_down() {
    let (status, body) = get_json(offline_router(), "/api/domain/example.com").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"domain": "example.com", "results": {"ip": null}}));
}

#[tokio::test]
async fn test_email_with_breach_source_down() {
    let (status, body) = get_json(offline_router(), "/api/email/user@example.com").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"email": "user@example.com", "results": {"validation": {"valid": true}}})
    );
}

#[tokio::test]
async fn test_ip_with_every_source_down() {
    let (status, body) = get_json(offline_router(), "/api/ip/8.8.8.8").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ip": "8.8.8.8", "results": {"reverse_dns": null}}));
}

#[tokio::test]
async fn test_username_aggregates_live_profiles() {
    let server = MockServer::start();
    let github = server.mock(|when, then| {
        when.method(GET).path("/users/octocat");
        then.status(200).json_body(json!({
            "login": "octocat",
            "name": "The Octocat",
            "followers": 9000,
            "public_repos": 8,
            "html_url": "https://github.com/octocat"
        }));
    });
    let reddit = server.mock(|when, then| {
        when.method(GET).path("/user/octocat/about.json");
        then.status(404);
    });

    let (status, body) = get_json(router_for(&config_with_base(&server.base_url())), "/api/username/octocat").await;

    github.assert();
    reddit.assert();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], json!("octocat"));
    assert_eq!(body["results"]["github"]["exists"], json!(true));
    assert_eq!(body["results"]["github"]["profile_url"], json!("https://github.com/octocat"));
    assert!(body["results"].get("reddit").is_none());
    assert_eq!(
        body["results"]["twitter"],
        json!({
            "exists": "unknown",
            "profile_url": "https://twitter.com/octocat",
            "note": "Manual verification required"
        })
    );
}

#[tokio::test]
async fn test_username_with_every_source_down() {
    let (status, body) = get_json(offline_router(), "/api/username/ghost").await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_object().unwrap();
    assert_eq!(results.keys().collect::<Vec<_>>(), vec!["twitter"]);
}

#[tokio::test]
async fn test_intel_routes_serve_mocks_without_keys() {
    let (status, body) = get_json(offline_router(), "/api/intel/hibp/user@example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], json!("user@example.com"));
    assert!(body["results"]["hibp"].is_object());

    let (_, body) = get_json(offline_router(), "/api/intel/ipinfo/1.1.1.1").await;
    assert_eq!(body["results"]["ipinfo"]["ip"], json!("1.1.1.1"));
    assert_eq!(body["results"]["ipinfo"]["city"], json!("New York"));

    let (_, body) = get_json(offline_router(), "/api/intel/shodan/1.1.1.1").await;
    assert_eq!(body["results"]["shodan"]["ports"], json!([22, 80, 443, 8080]));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let response = offline_router()
        .oneshot(
            Request::builder()
                .uri("/")
                .header("origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = offline_router()
        .oneshot(Request::builder().uri("/api/phone/123").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
