//! AWS Lambda function relaying calculator results by email
//!
//! Accepts `{ "to", "subject", "text", "csv" }` as JSON and forwards it to
//! SendGrid. Credentials come from `SENDGRID_API_KEY` / `SENDGRID_FROM`.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use savings_projection::email::{handle_request, EmailRelay, SendGridConfig, SendGridRelay, CORS_HEADERS};

fn text_response(status: u16, body: String) -> Result<Response<Body>, Error> {
    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8");
    for (name, value) in CORS_HEADERS {
        builder = builder.header(name, value);
    }

    let body = if body.is_empty() { Body::Empty } else { Body::Text(body) };
    Ok(builder.body(body)?)
}

/// Lambda handler function
async fn handler(relay: Option<&SendGridRelay>, event: Request) -> Result<Response<Body>, Error> {
    let body = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => String::new(),
    };

    let relay = relay.map(|r| r as &dyn EmailRelay);
    let response = handle_request(event.method().as_str(), &body, relay).await;

    text_response(response.status, response.body)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let relay = match SendGridConfig::from_env() {
        Ok(config) => Some(SendGridRelay::new(config)),
        Err(e) => {
            log::warn!("{}; every request will be refused", e);
            None
        }
    };
    let relay = relay.as_ref();

    run(service_fn(move |event: Request| handler(relay, event))).await
}
