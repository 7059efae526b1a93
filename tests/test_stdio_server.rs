use fixture_rpc_server::{Server, ServerConfig};
use serde_json::{Value, json};
use std::time::{Duration, Instant};
use tokio::io::BufReader;

/// Run the server over `lines` and return every output line
async fn serve(lines: &[String]) -> Vec<String> {
    let mut input = lines.join("\n");
    input.push('\n');

    let server = Server::new(ServerConfig::default());
    let mut output = Vec::new();
    server
        .run(BufReader::new(input.as_bytes()), &mut output)
        .await
        .expect("server loop should finish at end of input");

    String::from_utf8(output)
        .expect("output should be UTF-8")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Run a single request line and return its parsed response
async fn call(line: &str) -> Value {
    let output = serve(&[line.to_string()]).await;
    assert_eq!(output.len(), 2, "expected READY plus one response: {:?}", output);
    serde_json::from_str(&output[1]).expect("response should be JSON")
}

fn request(id: Value, method: &str, params: Option<Value>) -> String {
    let mut req = json!({"jsonrpc": "2.0", "id": id, "method": method});
    if let Some(params) = params {
        req["params"] = params;
    }
    req.to_string()
}

#[tokio::test]
async fn test_wrong_or_missing_version_is_invalid_request() {
    for line in [
        r#"{"id":1,"method":"test.echo"}"#,
        r#"{"jsonrpc":"1.0","id":1,"method":"test.echo"}"#,
        r#"{"jsonrpc":2,"id":1,"method":"test.echo"}"#,
        r#"{"jsonrpc":null,"id":1,"method":"test.echo"}"#,
    ] {
        let response = call(line).await;
        assert_eq!(response["error"]["code"], -32600, "line: {}", line);
        assert_eq!(response["id"], 1);
        assert!(response.get("result").is_none());
    }
}

#[tokio::test]
async fn test_non_object_request_is_invalid_request() {
    let response = call("[1,2,3]").await;
    assert_eq!(response["error"]["code"], -32600);
    assert_eq!(response["id"], Value::Null);
}

#[tokio::test]
async fn test_falsy_method_is_invalid_request() {
    for method in [json!(null), json!(""), json!(0), json!(false)] {
        let line = json!({"jsonrpc": "2.0", "id": 5, "method": method}).to_string();
        let response = call(&line).await;
        assert_eq!(response["error"]["code"], -32600);
        assert_eq!(
            response["error"]["message"],
            "Invalid Request: method required"
        );
    }
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    for line in ["{", "not json", r#"{"jsonrpc":"2.0","id":1,"#, "{'single':'quotes'}"] {
        let response = call(line).await;
        assert_eq!(response["error"]["code"], -32700, "line: {}", line);
        assert_eq!(response["id"], Value::Null);
        assert!(response.get("result").is_none());
    }
}

#[tokio::test]
async fn test_echo_returns_params() {
    for params in [
        json!({}),
        json!({"outer": {"inner": [1, 2, {"deep": true}]}}),
        json!([1, "two", null]),
    ] {
        let response = call(&request(json!("e"), "test.echo", Some(params.clone()))).await;
        assert_eq!(response["id"], "e");
        assert_eq!(response["result"]["data"], params);
        assert!(response.get("error").is_none());
    }
}

#[tokio::test]
async fn test_echo_without_params_returns_empty_object() {
    let response = call(&request(json!(1), "test.echo", None)).await;
    assert_eq!(response["result"]["data"], json!({}));
}

#[tokio::test]
async fn test_success_metadata() {
    let response = call(&request(json!(1), "test.echo", None)).await;
    let metadata = &response["result"]["metadata"];

    assert_eq!(metadata["executionTime"], 50);
    assert_eq!(metadata["cached"], false);
    assert_eq!(metadata["version"], "1.0.0");
    assert!(metadata["responseTime"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_sleep_delays_response() {
    let started = Instant::now();
    let response = call(&request(json!(1), "test.sleep", Some(json!({"duration": 0.01})))).await;

    assert!(started.elapsed() >= Duration::from_millis(10));
    assert_eq!(response["result"]["data"], json!({"slept": 0.01}));
}

#[tokio::test]
async fn test_sleep_holds_back_later_requests() {
    let lines = vec![
        request(json!(1), "test.sleep", Some(json!({"duration": 0.02}))),
        request(json!(2), "test.echo", Some(json!({"after": "sleep"}))),
    ];

    let started = Instant::now();
    let output = serve(&lines).await;
    assert!(started.elapsed() >= Duration::from_millis(20));

    let first: Value = serde_json::from_str(&output[1]).unwrap();
    let second: Value = serde_json::from_str(&output[2]).unwrap();
    assert_eq!(first["id"], 1);
    assert_eq!(second["id"], 2);
}

#[tokio::test]
async fn test_error_without_params_mentions_value_error() {
    let response = call(&request(json!(1), "test.error", None)).await;

    assert_eq!(response["error"]["code"], -32603);
    let message = response["error"]["message"].as_str().unwrap();
    assert!(message.contains("ValueError"));
    assert!(response.get("result").is_none());
    assert!(response["error"]["data"]["errorKind"].is_string());
    assert!(response["error"]["data"]["traceback"].is_string());
}

#[tokio::test]
async fn test_error_with_custom_type() {
    let response = call(&request(json!(1), "test.error", Some(json!({"type": "TimeoutError"})))).await;
    assert_eq!(response["error"]["message"], "Internal error: Mock TimeoutError");
}

#[tokio::test]
async fn test_unknown_method() {
    let response = call(&request(json!(1), "foo.bar", None)).await;

    assert_eq!(response["error"]["code"], -32603);
    assert!(
        response["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Method not found: foo.bar")
    );
}

#[tokio::test]
async fn test_method_names_are_case_sensitive() {
    let response = call(&request(json!(1), "Test.Echo", None)).await;
    assert_eq!(response["error"]["code"], -32603);
}

#[tokio::test]
async fn test_params_of_wrong_shape_are_internal_errors() {
    let response = call(&request(
        json!(1),
        "pattern_learning.get_recommendations",
        Some(json!("finance")),
    ))
    .await;

    assert_eq!(response["error"]["code"], -32603);
    assert_eq!(response["error"]["data"]["errorKind"], "InvalidParams");
}

#[tokio::test]
async fn test_every_output_line_is_a_json_object() {
    let lines = vec![
        request(json!(1), "pattern_learning.get_recommendations", Some(json!({"domain": "ml"}))),
        "garbage".to_string(),
        request(json!("two"), "pattern_learning.find_similar", Some(json!({"description": "rolling sum"}))),
        r#"{"jsonrpc":"1.0","id":3}"#.to_string(),
        request(json!(4), "extension_generator.analyze_requirements", Some(json!({"description": "x"}))),
        request(json!(5), "extension_generator.generate", Some(json!({"backend_language": "rust"}))),
        request(json!(6), "agent.detect_type", None),
        request(json!(null), "test.error", None),
        request(json!(8), "nope", None),
    ];

    let output = serve(&lines).await;
    assert_eq!(output.len(), lines.len() + 1);

    for line in &output[1..] {
        let value: Value = serde_json::from_str(line).expect("each line should be JSON");
        let object = value.as_object().expect("each line should be an object");
        assert_eq!(object["jsonrpc"], "2.0");
        assert!(object.contains_key("id"));
        assert!(object.contains_key("result") ^ object.contains_key("error"));
    }
}

#[tokio::test]
async fn test_ready_comes_first() {
    let lines: Vec<String> = (0..25)
        .map(|i| request(json!(i), "test.echo", Some(json!({"n": i}))))
        .collect();

    let output = serve(&lines).await;
    assert_eq!(output[0], "READY");
    assert_eq!(output.len(), 26);
    for (i, line) in output[1..].iter().enumerate() {
        let value: Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["id"], i);
    }
}

#[tokio::test]
async fn test_statistics_end_to_end() {
    let response =
        call(r#"{"jsonrpc":"2.0","id":1,"method":"pattern_learning.get_statistics"}"#).await;

    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["data"]["total_patterns"], 156);
    assert_eq!(response["result"]["data"]["domains"]["finance"], 42);
}

#[tokio::test]
async fn test_recommendations_end_to_end() {
    let response = call(&request(
        json!(1),
        "pattern_learning.get_recommendations",
        None,
    ))
    .await;

    let data = &response["result"]["data"];
    assert_eq!(data["total_patterns"], 2);
    assert_eq!(data["execution_time_ms"], 15);
    assert_eq!(data["recommendations"][0]["pattern_name"], "general_pattern_1");
    assert_eq!(data["recommendations"][1]["anti_patterns"], json!(["avoid_blocking_io"]));
}

#[tokio::test]
async fn test_generate_end_to_end() {
    let python = call(&request(json!(1), "extension_generator.generate", Some(json!({})))).await;
    let native = call(&request(
        json!(2),
        "extension_generator.generate",
        Some(json!({"backend_language": "rust"})),
    ))
    .await;

    assert_eq!(python["result"]["data"]["performance"]["estimated_ops_per_sec"], 10000);
    assert_eq!(native["result"]["data"]["performance"]["estimated_ops_per_sec"], 100000);
    assert_eq!(native["result"]["data"]["test_suite"], "tests_rust.py");
}

#[tokio::test]
async fn test_request_ids_are_echoed_verbatim() {
    for id in [json!("abc"), json!(42), json!(1.5), json!(null)] {
        let response = call(&request(id.clone(), "agent.detect_type", None)).await;
        assert_eq!(response["id"], id);
    }
}

#[tokio::test]
async fn test_missing_id_is_null() {
    let response = call(r#"{"jsonrpc":"2.0","method":"agent.detect_type"}"#).await;
    let object = response.as_object().unwrap();
    assert!(object.contains_key("id"));
    assert_eq!(object["id"], Value::Null);
}

#[tokio::test]
async fn test_large_integers_are_echoed_exactly() {
    let line = r#"{"jsonrpc":"2.0","id":123456789012345678901234567890,"method":"test.echo","params":{"n":123456789012345678901234567890}}"#;
    let output = serve(&[line.to_string()]).await;

    assert!(output[1].contains(r#""id":123456789012345678901234567890"#));
    assert!(output[1].contains(r#""data":{"n":123456789012345678901234567890}"#));

    let big: Value = serde_json::from_str("123456789012345678901234567890").unwrap();
    let response: Value = serde_json::from_str(&output[1]).unwrap();
    assert_eq!(response["id"], big);
    assert_eq!(response["result"]["data"], json!({"n": big}));
}

#[tokio::test]
async fn test_sleep_echoes_duration_text() {
    let line = r#"{"jsonrpc":"2.0","id":1,"method":"test.sleep","params":{"duration":0.010}}"#;
    let started = Instant::now();
    let output = serve(&[line.to_string()]).await;

    assert!(started.elapsed() >= Duration::from_millis(10));
    assert!(output[1].contains(r#""data":{"slept":0.010}"#));
}
