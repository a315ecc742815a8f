use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Body of POST and PUT `/cakes`.
#[derive(ToSchema)]
pub struct CakeRequestDoc {
    pub title: String,
    pub description: String,
}

#[derive(ToSchema)]
pub struct CakeResponseDoc {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(ToSchema)]
pub struct CakesResponseDoc {
    pub cakes: Vec<CakeResponseDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::cakes::list_cakes,
        crate::routes::cakes::get_cake,
        crate::routes::cakes::create_cake,
        crate::routes::cakes::update_cake,
        crate::routes::cakes::delete_cake,
    ),
    components(
        schemas(
            HealthResponse,
            CakeRequestDoc,
            CakeResponseDoc,
            CakesResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "cakes")
    )
)]
pub struct ApiDoc;
