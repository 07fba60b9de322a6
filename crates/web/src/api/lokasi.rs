use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use locations::database::Database;
use model::{location::Location, WithId};
use serde::Deserialize;
use serde_json::json;
use utility::id::Id;

use crate::{
    common::{schema, RouteErrorResponse, RouteResult, DELETED_MESSAGE},
    WebState,
};

pub(crate) fn routes<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .route("/lokasi/schema", get(schema::<WithId<Location>>))
        .route(
            "/lokasi",
            get(get_locations::<D>)
                .post(create_location::<D>)
                .put(update_location::<D>)
                .delete(delete_location::<D>),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct IdQuery {
    id: Option<String>,
}

impl IdQuery {
    fn from_extracted(
        query: Result<Query<IdQuery>, QueryRejection>,
    ) -> RouteResult<Self> {
        query
            .map(|Query(query)| query)
            .map_err(|_| RouteErrorResponse::invalid_id())
    }

    /// The id parameter, `None` when absent or empty.
    fn raw(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    fn parse(&self) -> RouteResult<Id<Location>> {
        self.raw()
            .and_then(Location::parse_id)
            .ok_or_else(RouteErrorResponse::invalid_id)
    }
}

/// Decodes the body as JSON whatever the `Content-Type` header says.
fn decode_body(body: Result<Bytes, BytesRejection>) -> RouteResult<Location> {
    let body =
        body.map_err(|rejection| RouteErrorResponse::malformed_body(rejection.body_text()))?;
    serde_json::from_slice(&body)
        .map_err(|why| RouteErrorResponse::malformed_body(why.to_string()))
}

/// Returns a single location when an id is given, all locations otherwise.
async fn get_locations<D: Database>(
    State(WebState { location_client }): State<WebState<D>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> RouteResult<Response> {
    let query = IdQuery::from_extracted(query)?;
    match query.raw() {
        Some(_) => {
            let id = query.parse()?;
            let location = location_client.get_location(&id).await?;
            Ok(Json(location).into_response())
        }
        None => {
            let locations = location_client.get_locations().await?;
            Ok(Json(locations).into_response())
        }
    }
}

async fn create_location<D: Database>(
    State(WebState { location_client }): State<WebState<D>>,
    body: Result<Bytes, BytesRejection>,
) -> RouteResult<(StatusCode, Json<WithId<Location>>)> {
    let location = decode_body(body)?;
    let created = location_client.create_location(location).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_location<D: Database>(
    State(WebState { location_client }): State<WebState<D>>,
    query: Result<Query<IdQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> RouteResult<Json<WithId<Location>>> {
    let id = IdQuery::from_extracted(query)?.parse()?;
    let location = decode_body(body)?;
    location_client
        .update_location(id, location)
        .await
        .map(Json)
        .map_err(RouteErrorResponse::from)
}

async fn delete_location<D: Database>(
    State(WebState { location_client }): State<WebState<D>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> RouteResult<impl IntoResponse> {
    let id = IdQuery::from_extracted(query)?.parse()?;
    location_client.delete_location(&id).await?;
    Ok(Json(json!({
        "message": DELETED_MESSAGE
    })))
}
