//! Check lookup against a scripted service.

use pingdom_sync::gateway::PingdomGateway;
use pingdom_sync::models::CheckType;
use pingdom_sync::scripted::ScriptedRequester;
use pingdom_sync::transport::Method;
use serde_json::{json, Value};

fn summaries() -> Value {
    json!({ "checks": [
        { "id": 100, "name": "other host", "hostname": "other.com",
          "resolution": 5, "type": "http", "status": "up" },
        { "id": 200, "name": "tcp", "hostname": "test.com",
          "resolution": 1, "type": "tcp", "status": "up" },
        { "id": 578657, "name": "/dev/check/suite", "hostname": "test.com",
          "resolution": 1, "type": "http", "status": "up" },
    ]})
}

fn tcp_detail() -> Value {
    json!({ "check": {
        "id": 200, "name": "tcp", "hostname": "test.com", "resolution": 1,
        "type": { "tcp": { "port": 80 } }, "status": "up",
    }})
}

fn http_detail(encryption: bool) -> Value {
    json!({ "check": {
        "id": 578657, "name": "/dev/check/suite", "hostname": "test.com", "resolution": 1,
        "type": { "http": { "encryption": encryption, "url": "/dev/check/suite" } },
        "encryption": encryption, "status": "up",
    }})
}

#[test]
fn test_list_checks() {
    let gw = PingdomGateway::new(ScriptedRequester::new().expect(
        Method::Get,
        "checks",
        summaries(),
    ));

    let checks = gw.checks().unwrap();
    assert_eq!(checks.len(), 3);
    assert_eq!(checks[2].id, 578657);
    assert_eq!(checks[2].kind, "http");
    assert_eq!(checks[2].status, "up");
}

#[test]
fn test_get_check() {
    let gw = PingdomGateway::new(ScriptedRequester::new().expect(
        Method::Get,
        "checks/578657",
        http_detail(true),
    ));

    let check = gw.check(578657).unwrap();
    assert!(matches!(check.probe, CheckType::Http(_)));
    assert_eq!(
        gw.check_url(&check).as_deref(),
        Some("https://test.com/dev/check/suite")
    );
}

#[test]
fn test_check_url_for_tcp_is_none() {
    let gw = PingdomGateway::new(ScriptedRequester::new().expect(
        Method::Get,
        "checks/200",
        tcp_detail(),
    ));
    let check = gw.check(200).unwrap();
    assert_eq!(gw.check_url(&check), None);
}

#[test]
fn test_find_by_url_fetches_only_http_checks_on_same_host() {
    let gw = PingdomGateway::new(
        ScriptedRequester::new()
            .expect(Method::Get, "checks", summaries())
            .expect(Method::Get, "checks/578657", http_detail(true)),
    );

    let check = gw
        .find_check_by_url("https://test.com/dev/check/suite")
        .unwrap()
        .unwrap();
    assert_eq!(check.id, 578657);

    let resources: Vec<String> = gw
        .requester()
        .calls()
        .into_iter()
        .map(|c| c.resource)
        .collect();
    assert_eq!(resources, vec!["checks", "checks/578657"]);
}

#[test]
fn test_find_by_url_ignores_scheme() {
    let gw = PingdomGateway::new(
        ScriptedRequester::new()
            .expect(Method::Get, "checks", summaries())
            .expect(Method::Get, "checks/578657", http_detail(true)),
    );

    let check = gw
        .find_check_by_url("http://test.com/dev/check/suite")
        .unwrap();
    assert_eq!(check.map(|c| c.id), Some(578657));
}

#[test]
fn test_find_by_url_collapses_leading_double_slash() {
    let gw = PingdomGateway::new(
        ScriptedRequester::new()
            .expect(Method::Get, "checks", summaries())
            .expect(Method::Get, "checks/578657", http_detail(false)),
    );

    let check = gw
        .find_check_by_url("https://test.com//dev/check/suite")
        .unwrap();
    assert_eq!(check.map(|c| c.id), Some(578657));
}

#[test]
fn test_find_by_url_no_match() {
    let gw = PingdomGateway::new(
        ScriptedRequester::new()
            .expect(Method::Get, "checks", summaries())
            .expect(Method::Get, "checks/578657", http_detail(true)),
    );

    assert_eq!(gw.find_check_by_url("https://test.com/elsewhere").unwrap(), None);
}

#[test]
fn test_find_by_unknown_host_fetches_no_details() {
    let gw = PingdomGateway::new(ScriptedRequester::new().expect(
        Method::Get,
        "checks",
        summaries(),
    ));

    assert_eq!(gw.find_check_by_url("https://nowhere.org/").unwrap(), None);
    assert_eq!(gw.requester().calls().len(), 1);
}

#[test]
fn test_find_by_unsupported_url_issues_no_request() {
    let gw = PingdomGateway::new(ScriptedRequester::new());
    assert_eq!(gw.find_check_by_url("ftp://test.com/dev").unwrap(), None);
    assert!(gw.requester().calls().is_empty());
}

#[test]
fn test_find_by_url_fetches_summaries_without_kind() {
    let gw = PingdomGateway::new(
        ScriptedRequester::new()
            .expect(
                Method::Get,
                "checks",
                json!({ "checks": [{ "id": 578657, "hostname": "test.com" }] }),
            )
            .expect(Method::Get, "checks/578657", http_detail(true)),
    );

    let check = gw.find_check_by_url("https://test.com/dev/check/suite").unwrap();
    assert_eq!(check.map(|c| c.id), Some(578657));
}
