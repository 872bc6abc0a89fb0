use axum::Json;
use axum::extract::Path;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::error::AppError;
use crate::models::*;
use crate::services::CourseService;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).put(replace_course).delete(delete_course),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseSummary>>, AppError> {
    let service = CourseService::new(state.courses.clone());
    let courses = service.list().await?;
    Ok(Json(courses))
}

async fn create_course(
    State(state): State<AppState>,
    Json(input): Json<CourseInput>,
) -> Result<Response, AppError> {
    let service = CourseService::new(state.courses.clone());
    let course = service.create(input).await?;

    let location = format!("/courses/{}", course.id);
    Ok(([(header::LOCATION, location)], Json(course)).into_response())
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Course>, AppError> {
    let service = CourseService::new(state.courses.clone());
    let course = service.get_by_id(id).await?;
    Ok(Json(course))
}

async fn replace_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<CourseInput>,
) -> Result<StatusCode, AppError> {
    let service = CourseService::new(state.courses.clone());
    service.replace_by_id(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let service = CourseService::new(state.courses.clone());
    service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
