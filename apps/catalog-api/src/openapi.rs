//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Catalog API",
        description = "CRUD and search over the product catalog",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/produtos", api = domain_catalog::handlers::ApiDoc)
    ),
    tags(
        (name = "Produtos", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;
