//! Model, weather, health, config and dashboard entry points.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use smartinvo_backend::Operation;
use smartinvo_testing::{StubServer, TestWorld};

#[test]
fn test_model_info() {
    let world = TestWorld::new().unwrap();
    let result = world.run(&["model"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr);
    assert!(result.stdout.contains("Model: RandomForestRegressor"));
    assert!(result.stdout.contains("0.87"));
    assert!(result.stdout.contains("Reliable for perishables"));
}

#[test]
fn test_model_unavailable_fails() {
    let server = StubServer::start().unwrap();
    server.route(Operation::ModelInfo, 503, serde_json::json!({"detail": "warming up"}));
    let world = TestWorld::with_server(server).unwrap();

    let result = world.run(&["model"]).unwrap();
    assert_eq!(result.code(), Some(1));
    assert!(result.stderr.contains("model information unavailable"));
}

#[test]
fn test_weather_forecast() {
    let world = TestWorld::new().unwrap();
    let result = world.run(&["weather", "--city", "Singapore"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr);
    assert!(result.stdout.contains("Weather for Singapore"));
    assert!(result.stdout.contains("2024-03-01"));
    assert!(result.stdout.contains("Patchy rain"));

    let requests = world.server().requests_for(Operation::Weather);
    assert_eq!(requests[0].query_value().as_deref(), Some("Singapore"));
}

#[test]
fn test_weather_json_keeps_sparse_days_sparse() {
    let world = TestWorld::new().unwrap();
    let (result, json) = world.run_json(&["weather", "--city", "Singapore"]).unwrap();

    assert!(result.success());
    let forecast = json["content"]["forecast"].as_array().unwrap();
    assert_eq!(forecast.len(), 2);
    assert!(forecast[1].get("condition").is_none());
}

#[test]
fn test_health() {
    let world = TestWorld::new().unwrap();

    let mut cmd = cargo_bin_cmd!("smartinvo");
    world
        .configure_command(&mut cmd)
        .arg("health")
        .assert()
        .success()
        .stdout(predicate::str::contains("Service reachable"))
        .stdout(predicate::str::contains("SmartInvo API is running"))
        .stdout(predicate::str::contains(world.server().url()));
}

#[test]
fn test_unreachable_service_exits_one() {
    let world = TestWorld::new().unwrap();

    let mut cmd = cargo_bin_cmd!("smartinvo");
    world
        .configure_command(&mut cmd)
        .args(["--api-url", "http://127.0.0.1:9", "health"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: "));
}

#[test]
fn test_invalid_api_url_is_rejected() {
    let world = TestWorld::new().unwrap();
    let result = world.run(&["--api-url", "not a url", "health"]).unwrap();

    assert_eq!(result.code(), Some(1));
    assert!(result.stderr.contains("not a url"));
    assert!(world.server().requests().is_empty());
}

#[test]
fn test_config_init_then_show() {
    let world = TestWorld::new().unwrap();
    assert!(!world.config_path().exists());

    let result = world.run(&["config", "init"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr);
    assert!(result.stdout.contains("Config written to"));
    assert!(world.config_path().exists());

    let result = world.run(&["config", "init"]).unwrap();
    assert!(result.success());
    assert!(result.stdout.contains("Config already exists"));

    let (result, json) = world.run_json(&["config", "show"]).unwrap();
    assert!(result.success());
    assert_eq!(json["content"]["exists"], true);
    assert_eq!(json["content"]["config"]["api_url"], world.server().url());
}

#[test]
fn test_dashboard_requires_terminal() {
    let world = TestWorld::new().unwrap();
    let result = world.run(&["dashboard", "--city", "Singapore"]).unwrap();

    assert_eq!(result.code(), Some(1));
    assert!(result.stderr.contains("interactive terminal"));
    assert!(world.server().requests().is_empty());
}

#[test]
fn test_no_command_shows_guidance() {
    let world = TestWorld::new().unwrap();
    let result = world.run(&[]).unwrap();

    assert!(result.success());
    assert!(result.stdout.contains("smartinvo config init"));
    assert!(world.server().requests().is_empty());
}
