use crate::{Store, controllers::healthcheck::healthcheck, handler::warp_handler};
use std::sync::Arc;
use warp::{Filter, Rejection};

pub fn healthcheck_routes(
    store: Arc<Store>,
) -> impl Filter<Extract = impl warp::Reply, Error = Rejection> + Clone {
    let store_filter = warp::any().map(move || store.clone());

    warp::get()
        .and(warp::path("api"))
        .and(warp::path("v1"))
        .and(warp::path("healthcheck"))
        .and(warp::path::end())
        .and(store_filter)
        .and_then(warp_handler(healthcheck))
}
