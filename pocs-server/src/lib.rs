use std::sync::Arc;

use warp::Filter;
use warp::Reply;
use warp::http::StatusCode;
use warp::reply::Response;

use crate::datasets::Datasets;
use crate::fetcher::FetchError;
use crate::session_manager::{SessionError, SessionManager};
use pocs_core::{communes, drawing, trees};
use pocs_types::{
    CommuneDetail, CommuneList, CommuneQuery, DataError, ErrorResponse, GuessRequest,
    SessionCreated, SessionId, TreeQuery, TreeSelection,
};

pub mod cache;
pub mod config;
pub mod datasets;
pub mod fetcher;
pub mod odwb;
pub mod session_manager;

pub fn create_routes(
    session_manager: Arc<SessionManager>,
    datasets: Arc<Datasets>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let sessions_filter = warp::any().map({
        let session_manager = session_manager.clone();
        move || session_manager.clone()
    });

    let datasets_filter = warp::any().map({
        let datasets = datasets.clone();
        move || datasets.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    // Hangman
    let create_session = warp::path!("hangman")
        .and(warp::post())
        .and(sessions_filter.clone())
        .and_then(handle_create_session);

    let render_session = warp::path!("hangman" / SessionId)
        .and(warp::get())
        .and(sessions_filter.clone())
        .and_then(handle_render_session);

    let guess = warp::path!("hangman" / SessionId / "guess")
        .and(warp::post())
        .and(warp::body::json::<GuessRequest>())
        .and(sessions_filter.clone())
        .and_then(handle_guess);

    let reset = warp::path!("hangman" / SessionId / "reset")
        .and(warp::post())
        .and(sessions_filter.clone())
        .and_then(handle_reset);

    let drawing = warp::path!("hangman" / SessionId / "drawing.svg")
        .and(warp::get())
        .and(sessions_filter.clone())
        .and_then(handle_drawing);

    // Tree dashboard
    let tree_selection = warp::path!("trees")
        .and(warp::get())
        .and(warp::query::<TreeQuery>())
        .and(datasets_filter.clone())
        .and_then(handle_tree_selection);

    let tree_options = warp::path!("trees" / "options")
        .and(warp::get())
        .and(datasets_filter.clone())
        .and_then(handle_tree_options);

    let tree_localities = warp::path!("trees" / "localities")
        .and(warp::get())
        .and(datasets_filter.clone())
        .and_then(handle_tree_localities);

    // Commune viewer
    let commune_list = warp::path!("communes")
        .and(warp::get())
        .and(datasets_filter.clone())
        .and_then(handle_commune_list);

    let commune_detail = warp::path!("communes" / "detail")
        .and(warp::get())
        .and(warp::query::<CommuneQuery>())
        .and(datasets_filter.clone())
        .and_then(handle_commune_detail);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(create_session)
        .or(render_session)
        .or(guess)
        .or(reset)
        .or(drawing)
        .or(tree_selection)
        .or(tree_options)
        .or(tree_localities)
        .or(commune_list)
        .or(commune_detail)
        .recover(handle_rejection)
        .with(cors)
        .with(warp::log("pocs"))
}

fn json_reply<T: serde::Serialize>(body: &T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(body), status).into_response()
}

fn session_error_reply(error: SessionError) -> Response {
    let status = match error {
        SessionError::NotFound(_) => StatusCode::NOT_FOUND,
        SessionError::Guess(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    json_reply(
        &ErrorResponse::game(error.to_string(), error.to_game_error()),
        status,
    )
}

fn upstream_error_reply(error: FetchError) -> Response {
    tracing::warn!("Failed to load ODWB data: {}", error);
    json_reply(
        &ErrorResponse::data(
            "Failed to load data from ODWB",
            DataError::UpstreamUnavailable {
                message: error.to_string(),
            },
        ),
        StatusCode::BAD_GATEWAY,
    )
}

/// Turns rejections that reach the end of the route chain into `ErrorResponse` bodies
async fn handle_rejection(rejection: warp::Rejection) -> Result<Response, warp::Rejection> {
    let (status, message) =
        if let Some(e) = rejection.find::<warp::filters::body::BodyDeserializeError>() {
            (StatusCode::BAD_REQUEST, e.to_string())
        } else if let Some(e) = rejection.find::<warp::reject::InvalidQuery>() {
            (StatusCode::BAD_REQUEST, e.to_string())
        } else if rejection.find::<warp::reject::UnsupportedMediaType>().is_some() {
            (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Expected a JSON body".to_string(),
            )
        } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
            (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            )
        } else if rejection.is_not_found() {
            (StatusCode::NOT_FOUND, "Not found".to_string())
        } else {
            tracing::error!("Unhandled rejection: {:?}", rejection);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        };

    Ok(json_reply(&ErrorResponse::message(message), status))
}

async fn handle_create_session(
    session_manager: Arc<SessionManager>,
) -> Result<Response, warp::Rejection> {
    let (session_id, view) = session_manager.create_session().await;
    Ok(json_reply(
        &SessionCreated { session_id, view },
        StatusCode::CREATED,
    ))
}

async fn handle_render_session(
    session_id: SessionId,
    session_manager: Arc<SessionManager>,
) -> Result<Response, warp::Rejection> {
    match session_manager.render(session_id).await {
        Ok(view) => Ok(json_reply(&view, StatusCode::OK)),
        Err(e) => Ok(session_error_reply(e)),
    }
}

async fn handle_guess(
    session_id: SessionId,
    request: GuessRequest,
    session_manager: Arc<SessionManager>,
) -> Result<Response, warp::Rejection> {
    match session_manager.guess_input(session_id, &request.letter).await {
        Ok(view) => Ok(json_reply(&view, StatusCode::OK)),
        Err(e) => Ok(session_error_reply(e)),
    }
}

async fn handle_reset(
    session_id: SessionId,
    session_manager: Arc<SessionManager>,
) -> Result<Response, warp::Rejection> {
    match session_manager.reset(session_id).await {
        Ok(view) => Ok(json_reply(&view, StatusCode::OK)),
        Err(e) => Ok(session_error_reply(e)),
    }
}

async fn handle_drawing(
    session_id: SessionId,
    session_manager: Arc<SessionManager>,
) -> Result<Response, warp::Rejection> {
    match session_manager.lives_remaining(session_id).await {
        Some(lives) => Ok(warp::reply::with_header(
            drawing::render_svg(lives),
            "content-type",
            "image/svg+xml",
        )
        .into_response()),
        None => Ok(session_error_reply(SessionError::NotFound(session_id))),
    }
}

async fn handle_tree_selection(
    query: TreeQuery,
    datasets: Arc<Datasets>,
) -> Result<Response, warp::Rejection> {
    let filter = match trees::TreeFilter::try_from(query) {
        Ok(filter) => filter,
        Err(e) => {
            return Ok(json_reply(
                &ErrorResponse::message(e.to_string()),
                StatusCode::BAD_REQUEST,
            ));
        }
    };

    let all = match datasets.trees().await {
        Ok(all) => all,
        Err(e) => return Ok(upstream_error_reply(e)),
    };

    let selected = trees::filter(&all, &filter);
    let selection = TreeSelection {
        count: selected.len(),
        points: trees::map_points(&selected),
        heights: trees::height_histogram(&selected),
        trees: selected,
    };
    Ok(json_reply(&selection, StatusCode::OK))
}

async fn handle_tree_options(datasets: Arc<Datasets>) -> Result<Response, warp::Rejection> {
    match datasets.trees().await {
        Ok(all) => Ok(json_reply(&trees::options(&all), StatusCode::OK)),
        Err(e) => Ok(upstream_error_reply(e)),
    }
}

async fn handle_tree_localities(datasets: Arc<Datasets>) -> Result<Response, warp::Rejection> {
    match datasets.trees().await {
        Ok(all) => Ok(json_reply(&trees::locality_heights(&all), StatusCode::OK)),
        Err(e) => Ok(upstream_error_reply(e)),
    }
}

async fn handle_commune_list(datasets: Arc<Datasets>) -> Result<Response, warp::Rejection> {
    let all = match datasets.communes().await {
        Ok(all) => all,
        Err(e) => return Ok(upstream_error_reply(e)),
    };

    let names = communes::sorted_names(&all);
    let default = communes::default_selection(&names).map(str::to_string);
    Ok(json_reply(&CommuneList { names, default }, StatusCode::OK))
}

async fn handle_commune_detail(
    query: CommuneQuery,
    datasets: Arc<Datasets>,
) -> Result<Response, warp::Rejection> {
    let all = match datasets.communes().await {
        Ok(all) => all,
        Err(e) => return Ok(upstream_error_reply(e)),
    };

    match communes::find(&all, &query.name) {
        Some(commune) => Ok(json_reply(
            &CommuneDetail {
                name: commune.nom.clone(),
                attributes: communes::attributes(commune),
                feature: communes::feature_collection(commune),
            },
            StatusCode::OK,
        )),
        None => Ok(json_reply(
            &ErrorResponse::data(
                "Commune not found",
                DataError::CommuneNotFound { name: query.name },
            ),
            StatusCode::NOT_FOUND,
        )),
    }
}
