//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health};
use crate::models::{book, envelope};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "1.0.0",
        description = "In-memory bookshelf REST API"
    ),
    paths(
        // Health
        health::health_check,
        // Books
        books::add_book,
        books::list_books,
        books::get_book,
        books::update_book,
        books::delete_book,
    ),
    components(
        schemas(
            // Books
            book::Book,
            book::BookPayload,
            book::BookSummary,
            book::BookQuery,
            // Envelopes
            envelope::Status,
            envelope::BookCreated,
            envelope::BookList,
            envelope::BookDetail,
            envelope::BookCreatedResponse,
            envelope::BookListResponse,
            envelope::BookDetailResponse,
            envelope::MessageResponse,
            // Health
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Bookshelf management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
