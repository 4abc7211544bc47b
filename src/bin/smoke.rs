//! Manual smoke test against a running deployment. Probes the three
//! observable states: unauthenticated GET, unauthenticated POST, and
//! authenticated POST.
//!
//! Usage: PROXY_URL=http://127.0.0.1:8080 CLIENT_API_KEY=... cargo run --bin smoke

use dotenv::dotenv;
use reqwest::{header, Client};
use serde_json::{json, Value};
use std::env;
use std::process::ExitCode;

#[actix_web::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let proxy_url = env::var("PROXY_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let api_key = env::var("CLIENT_API_KEY").unwrap_or_else(|_| "".to_string());
    let client = Client::new();

    println!("Smoke testing {}\n", proxy_url);
    let mut all_passed = true;

    println!("Test 1: GET request to root endpoint");
    match client.get(&proxy_url).send().await {
        Ok(response) => {
            let status = response.status();
            let body: Value = response.json().await.unwrap_or(Value::Null);
            println!("GET status: {}", status);
            println!("GET response: {}", body);
            all_passed &= report(status.is_success());
        }
        Err(e) => {
            println!("Error: {}", e);
            all_passed &= report(false);
        }
    }

    let chat_body = json!({
        "messages": [{"role": "user", "content": "Hello!"}],
        "temperature": 0.7,
        "max_tokens": 2000
    });

    println!("Test 2: POST request without API key");
    match client.post(&proxy_url).json(&chat_body).send().await {
        Ok(response) => {
            let status = response.status();
            let body: Value = response.json().await.unwrap_or(Value::Null);
            println!("No-key status: {}", status);
            println!("No-key response: {}", body);
            all_passed &= report(status.as_u16() == 401);
        }
        Err(e) => {
            println!("Error: {}", e);
            all_passed &= report(false);
        }
    }

    println!("Test 3: POST request with API key");
    match client
        .post(&proxy_url)
        .header(header::AUTHORIZATION, format!("Bearer {}", api_key))
        .json(&chat_body)
        .send()
        .await
    {
        Ok(response) => {
            let status = response.status();
            let body: Value = response.json().await.unwrap_or(Value::Null);
            println!("POST status: {}", status);
            println!("POST response: {}", body);
            all_passed &= report(status.is_success());
        }
        Err(e) => {
            println!("Error: {}", e);
            all_passed &= report(false);
        }
    }

    if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn report(passed: bool) -> bool {
    println!("{}\n", if passed { "PASSED" } else { "FAILED" });
    passed
}
