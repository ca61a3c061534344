use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    dto::qna::{AnswerDto, CreateAnswerRequest, CreateQuestionRequest, QuestionDto, QuestionList},
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::qna_service::{self, QuestionRecord},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(list_questions))
        .route("/question", post(create_question))
        .route("/question/{id}", delete(delete_question))
        .route("/answer", post(create_answer))
        .route("/answer/{id}", delete(delete_answer))
}

fn question_dto(record: QuestionRecord) -> QuestionDto {
    let answers = record
        .answers
        .into_iter()
        .map(|(answer, author)| AnswerDto::from_entity(answer, author))
        .collect();
    QuestionDto::from_entity(record.question, record.user, answers)
}

#[utoipa::path(
    get,
    path = "/api/qna/{productId}",
    params(
        ("productId" = Uuid, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Questions with answers, newest question first", body = ApiResponse<QuestionList>),
    ),
    tag = "QnA"
)]
pub async fn list_questions(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<QuestionList>>> {
    let records = qna_service::list_questions(&state, product_id).await?;
    let total = records.len() as i64;
    let items = records.into_iter().map(question_dto).collect();
    Ok(Json(ApiResponse::paginated(
        "Questions",
        QuestionList { items },
        1,
        total,
        total,
    )))
}

#[utoipa::path(
    post,
    path = "/api/qna/question",
    request_body = CreateQuestionRequest,
    responses(
        (status = 200, description = "Question created", body = ApiResponse<QuestionDto>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "QnA"
)]
pub async fn create_question(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateQuestionRequest>,
) -> AppResult<Json<ApiResponse<QuestionDto>>> {
    let record = qna_service::create_question(&state, &user, payload).await?;
    Ok(Json(ApiResponse::success(
        "Question created",
        question_dto(record),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/qna/answer",
    request_body = CreateAnswerRequest,
    responses(
        (status = 200, description = "Answer created", body = ApiResponse<AnswerDto>),
        (status = 404, description = "Question not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "QnA"
)]
pub async fn create_answer(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateAnswerRequest>,
) -> AppResult<Json<ApiResponse<AnswerDto>>> {
    let (answer, author) = qna_service::create_answer(&state, &user, payload).await?;
    Ok(Json(ApiResponse::success(
        "Answer created",
        AnswerDto::from_entity(answer, author),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/qna/question/{id}",
    params(
        ("id" = Uuid, Path, description = "Question ID"),
    ),
    responses(
        (status = 200, description = "Question and its answers deleted"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Question not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "QnA"
)]
pub async fn delete_question(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    qna_service::delete_question(&state, &user, id).await?;
    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/qna/answer/{id}",
    params(
        ("id" = Uuid, Path, description = "Answer ID"),
    ),
    responses(
        (status = 200, description = "Answer deleted"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Answer not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "QnA"
)]
pub async fn delete_answer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    qna_service::delete_answer(&state, &user, id).await?;
    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}
