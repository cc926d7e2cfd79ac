//! AWS Lambda handler for running net-worth projections
//!
//! Accepts projection configuration via JSON and returns the six output
//! series with summary statistics.
//!
//! Supports Lambda Function URLs for direct HTTP access. The caller's
//! identity arrives in the `x-user-id` header; a missing header is a 401
//! before any computation begins.

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::http::HeaderMap;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde::Serialize;

use networth_engine::accounts::CsvAccountStore;
use networth_engine::projection::{ProjectionResult, ProjectionSummary};
use networth_engine::{AuthContext, ProjectionError, ProjectionRequest, ProjectionService};

/// Output from the projection
#[derive(Debug, Serialize)]
struct ProjectionResponse {
    months: usize,
    summary: ProjectionSummary,
    result: ProjectionResult,
    execution_time_ms: u64,
}

fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", "application/json".parse().unwrap());
    headers.insert("Access-Control-Allow-Origin", "*".parse().unwrap());
    headers.insert("Access-Control-Allow-Methods", "POST, OPTIONS".parse().unwrap());
    headers.insert("Access-Control-Allow-Headers", "Content-Type, x-user-id".parse().unwrap());
    headers
}

fn error_response(status_code: i64, message: &str) -> ApiGatewayProxyResponse {
    ApiGatewayProxyResponse {
        status_code,
        headers: cors_headers(),
        body: Some(Body::Text(format!(r#"{{"error":"{}"}}"#, message))),
        ..Default::default()
    }
}

async fn handler(event: LambdaEvent<ApiGatewayProxyRequest>) -> Result<ApiGatewayProxyResponse, Error> {
    let start = std::time::Instant::now();
    let request_event = event.payload;

    // Handle CORS preflight
    if request_event.http_method == "OPTIONS" {
        return Ok(ApiGatewayProxyResponse {
            status_code: 200,
            headers: cors_headers(),
            body: Some(Body::Empty),
            ..Default::default()
        });
    }

    let auth = AuthContext {
        user_id: request_event
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    };

    // Parse request body; an empty body runs the default scenario
    let body = request_event.body.unwrap_or_else(|| "{}".to_string());
    let request: ProjectionRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let data_dir = std::env::var("ACCOUNTS_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let store = CsvAccountStore::new(data_dir);
    let service = ProjectionService::new(Box::new(store.clone()), Box::new(store));

    let result = match service.project(&auth, &request) {
        Ok(result) => result,
        Err(ProjectionError::Unauthenticated) => {
            return Ok(error_response(401, "missing or empty x-user-id header"));
        }
        Err(e @ ProjectionError::DataLoad(_)) => {
            return Ok(error_response(500, &format!("{}", e)));
        }
    };

    let response = ProjectionResponse {
        months: result.months(),
        summary: result.summary(),
        result,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    Ok(ApiGatewayProxyResponse {
        status_code: 200,
        headers: cors_headers(),
        body: Some(Body::Text(serde_json::to_string(&response)?)),
        ..Default::default()
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    lambda_runtime::run(service_fn(handler)).await
}
