//! Handlers wired through `warp_handler` and recovered by `return_error`.

use handle_errors::{Error, return_error};
use serde_json::{Value, json};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};
use warp_backend::{Next, Response, warp_handler};

fn routes() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let greet = warp::path("greet")
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and_then(warp_handler(
            |name: String, res: Response, _next: Next<Error>| async move {
                res.status(StatusCode::OK)
                    .json(json!({ "success": true, "name": name }));
                Ok::<(), Error>(())
            },
        ));

    let fail = warp::path("fail")
        .and(warp::path::end())
        .and(warp::any().map(|| "payload"))
        .and_then(warp_handler(
            |_payload: &'static str, _res: Response, _next: Next<Error>| async {
                Err::<(), _>(Error::RequestError(
                    StatusCode::BAD_REQUEST,
                    "bad input".to_string(),
                ))
            },
        ));

    let explicit_next = warp::path("next")
        .and(warp::path::end())
        .and(warp::any().map(|| ()))
        .and_then(warp_handler(
            |_: (), res: Response, next: Next<Error>| async move {
                res.status(StatusCode::OK);
                next.call(Error::RequestError(
                    StatusCode::FORBIDDEN,
                    "not allowed".to_string(),
                ));
                Ok::<(), Error>(())
            },
        ));

    greet.or(fail).or(explicit_next).recover(return_error)
}

fn body_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).expect("body should be JSON")
}

#[tokio::test]
async fn successful_handler_writes_its_response() {
    let res = warp::test::request()
        .path("/greet/ada")
        .reply(&routes())
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res.body()), json!({ "success": true, "name": "ada" }));
}

#[tokio::test]
async fn failing_handler_reaches_central_error_stage() {
    let res = warp::test::request().path("/fail").reply(&routes()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(res.body()),
        json!({ "success": false, "message": "bad input" })
    );
}

#[tokio::test]
async fn error_passed_to_next_wins_over_response() {
    let res = warp::test::request().path("/next").reply(&routes()).await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(res.body())["message"], "not allowed");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let res = warp::test::request().path("/nowhere").reply(&routes()).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res.body())["success"], false);
}
