use rocket::form::Form;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::{json, Json, Value};
use rocket::{Route, State};
use serde::{Deserialize, Serialize};

use telemetry::Measure;

use crate::config::Config;
use crate::display::{self, DisplayState};
use crate::error::ApiError;
use crate::page;

lazy_static! {
    static ref COMPUTE_MEASURE: Measure = Measure::new("controller", "compute");
}

#[get("/status")]
fn status() -> Value {
    json!({ "status": "ok" })
}

#[get("/metrics")]
fn metrics() -> Result<String, Status> {
    telemetry::encode().map_err(|_| Status::InternalServerError)
}

#[derive(FromForm)]
struct ExpressionForm {
    expression: Option<String>,
}

#[get("/")]
fn index() -> RawHtml<String> {
    RawHtml(page::render(&DisplayState::default()))
}

#[post("/", data = "<form>")]
fn calculate(form: Form<ExpressionForm>, config: &State<Config>) -> RawHtml<String> {
    let raw = form.expression.as_deref().unwrap_or("");
    RawHtml(page::render(&DisplayState::submit(raw, &config.calculator)))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
struct ComputeRequest {
    expr: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
struct ComputeResponse {
    expr: String,
    result: String,
}

#[post("/api/v1/compute", format = "json", data = "<request>")]
fn compute(
    request: Json<ComputeRequest>,
    config: &State<Config>,
) -> Result<Json<ComputeResponse>, ApiError> {
    COMPUTE_MEASURE.stats(move || {
        let result = display::run(&request.expr, &config.calculator)?;
        Ok(Json(ComputeResponse {
            expr: request.into_inner().expr,
            result,
        }))
    })
}

pub fn routes() -> Vec<Route> {
    routes![status, metrics, index, calculate, compute]
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use rocket::http::ContentType;
    use rocket::local::blocking::Client;

    use super::*;

    #[derive(Deserialize)]
    struct StatusResponse {
        status: String,
    }

    fn client() -> Client {
        let rocket = rocket::build()
            .manage(Config::default())
            .mount("/", routes());
        Client::untracked(rocket).expect("valid rocket instance")
    }

    fn submit(client: &Client, body: &str) -> Result<String, Box<dyn Error>> {
        let response = client
            .post("/")
            .header(ContentType::Form)
            .body(body)
            .dispatch();

        assert_eq!(response.status(), Status::Ok);
        let body = response.into_string().ok_or("missing body")?;
        Ok(body)
    }

    fn post_compute(client: &Client, expr: &str) -> (Status, Option<Value>) {
        let response = client
            .post("/api/v1/compute")
            .header(ContentType::JSON)
            .body(json!({ "expr": expr }).to_string())
            .dispatch();

        (response.status(), response.into_json())
    }

    #[test]
    fn test_status() -> Result<(), Box<dyn Error>> {
        let client = client();
        let response = client.get("/status").dispatch();

        assert_eq!(response.status(), Status::Ok);
        let decoded: StatusResponse = response.into_json().ok_or("invalid body")?;
        assert_eq!(decoded.status, "ok");
        Ok(())
    }

    #[test]
    fn test_metrics() {
        let client = client();
        let response = client.get("/metrics").dispatch();

        assert_eq!(response.status(), Status::Ok);
    }

    #[test]
    fn test_index() -> Result<(), Box<dyn Error>> {
        let client = client();
        let response = client.get("/").dispatch();

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.content_type(), Some(ContentType::HTML));
        let body = response.into_string().ok_or("missing body")?;
        assert!(body.contains("name=\"expression\""));
        assert!(!body.contains("class=\"error\""));
        Ok(())
    }

    #[test]
    fn test_calculate() -> Result<(), Box<dyn Error>> {
        let client = client();

        let body = submit(&client, "expression=2%2B3*4")?;
        assert!(body.contains("Result: 2+3*4 = 14"));

        let body = submit(&client, "expression=(2%2B3)*4")?;
        assert!(body.contains("= 20</p>"));

        let body = submit(&client, "expression=1%2F4")?;
        assert!(body.contains("= 0.25</p>"));
        Ok(())
    }

    #[test]
    fn test_calculate_rejected() -> Result<(), Box<dyn Error>> {
        let client = client();

        let body = submit(&client, "expression=5%2F0")?;
        assert!(body.contains("Division by zero is not allowed"));
        assert!(body.contains("value=\"5/0\""));

        let body = submit(&client, "expression=%20%20")?;
        assert!(body.contains("Please enter an expression"));

        let body = submit(&client, "")?;
        assert!(body.contains("Please enter an expression"));

        let body = submit(&client, "expression=%3Cb%3E")?;
        assert!(body.contains("Expression is not well-formed"));
        assert!(body.contains("value=\"&lt;b&gt;\""));
        Ok(())
    }

    #[test]
    fn test_compute() -> Result<(), Box<dyn Error>> {
        let client = client();

        let (status, body) = post_compute(&client, "3+4*2");
        assert_eq!(status, Status::Ok);
        assert_eq!(
            body.ok_or("invalid body")?,
            json!({ "expr": "3+4*2", "result": "11" })
        );
        Ok(())
    }

    #[test]
    fn test_compute_rejected() -> Result<(), Box<dyn Error>> {
        let client = client();

        for (expr, message) in &[
            ("1+2)", "Expression is not well-formed"),
            ("5/0", "Division by zero is not allowed"),
            ("", "Please enter an expression"),
            ("__import__('os')", "Expression is not well-formed"),
        ] {
            let (status, body) = post_compute(&client, expr);

            assert_eq!(status, Status::BadRequest);
            assert_eq!(body.ok_or("invalid body")?, json!({ "message": message }));
        }
        Ok(())
    }
}
