use fixture_rpc_server::create_default_dispatcher;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create the default dispatcher with all fixture methods registered
    let dispatcher = create_default_dispatcher();

    // Example JSONRPC request for pattern recommendations
    let request = r#"{
        "jsonrpc": "2.0",
        "method": "pattern_learning.get_recommendations",
        "params": {
            "domain": "finance"
        },
        "id": 1
    }"#;

    // Dispatch the request
    let response = dispatcher.dispatch(request).await?;

    // Print the response
    println!("{}", response);

    // Failures come back as error responses, not as Err
    let response = dispatcher
        .dispatch(r#"{"jsonrpc":"2.0","method":"test.error","params":{"type":"KeyError"},"id":2}"#)
        .await?;
    println!("{}", response);

    Ok(())
}
