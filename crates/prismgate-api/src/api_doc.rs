//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Prismgate API",
        version = "0.1.0",
        description = "Upload gateway for a PhotoPrism-backed photo library. \
                       Accepts image batches, orchestrates upload and record \
                       correlation against the photo service, and hands back \
                       shareable viewer and album URLs behind a result token. \
                       All endpoints are versioned under /api/v0/."
    ),
    paths(
        handlers::upload::submit_batch,
        handlers::result::get_result,
    ),
    components(schemas(
        prismgate_core::models::UploadAccepted,
        prismgate_core::models::UploadResult,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "uploads", description = "Batch upload and result retrieval")
    )
)]
pub struct ApiDoc;

/// The OpenAPI spec served at /api/openapi.json.
pub fn openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
