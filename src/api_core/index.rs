use log::error;
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{Request, State};
use serde::Serialize;

use crate::dto::{GenerateKeyBody, GenerateKeyForm};
use crate::error::ApiError;
use crate::keygen_core::SshKeygen;
use crate::model_core::{KeyPair, KeyRequest, KeyTypeCatalog};
use crate::templates;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[get("/")]
pub fn home() -> RawHtml<String> {
    RawHtml(templates::index_page(KeyTypeCatalog::global()).into_string())
}

#[get("/catalog")]
pub fn catalog() -> Json<&'static KeyTypeCatalog> {
    Json(KeyTypeCatalog::global())
}

#[get("/health")]
pub fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// A missing or unparsable form counts as no parameters.
#[post("/generate", data = "<form>")]
pub async fn generate(
    keygen: &State<SshKeygen>,
    form: Option<Form<GenerateKeyForm>>,
) -> Result<RawHtml<String>, Status> {
    let request = form.map(|form| form.to_request()).unwrap_or_default();
    match keygen.generate(&request).await {
        Ok(key_pair) => Ok(RawHtml(templates::result_page(&key_pair).into_string())),
        Err(e) => {
            error!("Failed to generate {} key: {}", request.key_type(), e);
            Err(Status::InternalServerError)
        }
    }
}

#[post("/keys", format = "json", data = "<body>", rank = 1)]
pub async fn keys_json(
    keygen: &State<SshKeygen>,
    body: Option<Json<GenerateKeyBody>>,
) -> Result<Json<KeyPair>, ApiError> {
    let request = body.map(|body| body.to_request()).unwrap_or_default();
    generate_json(keygen, request).await
}

#[post("/keys", data = "<form>", rank = 2)]
pub async fn keys(
    keygen: &State<SshKeygen>,
    form: Option<Form<GenerateKeyForm>>,
) -> Result<Json<KeyPair>, ApiError> {
    let request = form.map(|form| form.to_request()).unwrap_or_default();
    generate_json(keygen, request).await
}

async fn generate_json(keygen: &SshKeygen, request: KeyRequest) -> Result<Json<KeyPair>, ApiError> {
    keygen.generate(&request).await.map(Json).map_err(|e| {
        error!("Failed to generate {} key: {}", request.key_type(), e);
        ApiError::from(e)
    })
}

#[catch(404)]
pub fn not_found(_req: &Request) -> RawHtml<String> {
    RawHtml(templates::error_page(404, "Not Found").into_string())
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> RawHtml<String> {
    RawHtml(templates::error_page(500, "Key generation failed").into_string())
}
