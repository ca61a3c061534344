use std::collections::HashMap;

use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit::log_audit,
    dto::qna::{CreateAnswerRequest, CreateQuestionRequest},
    entity::answers::{
        ActiveModel as AnswerActive, Column as AnswerColumn, Entity as Answers,
        Model as AnswerModel,
    },
    entity::products::Entity as Products,
    entity::questions::{
        ActiveModel as QuestionActive, Column as QuestionColumn, Entity as Questions,
        Model as QuestionModel,
    },
    entity::users::{Column as UserColumn, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    state::AppState,
};

/// A question with its author and answers, each answer paired with its own
/// author. This is the shape the product page renders.
pub struct QuestionRecord {
    pub question: QuestionModel,
    pub user: Option<UserModel>,
    pub answers: Vec<(AnswerModel, Option<UserModel>)>,
}

pub async fn list_questions(state: &AppState, product_id: Uuid) -> AppResult<Vec<QuestionRecord>> {
    let questions = Questions::find()
        .filter(QuestionColumn::ProductId.eq(product_id))
        .order_by_desc(QuestionColumn::CreatedAt)
        .all(&state.orm)
        .await?;

    let question_ids: Vec<Uuid> = questions.iter().map(|q| q.id).collect();
    let answers: Vec<AnswerModel> = if question_ids.is_empty() {
        Vec::new()
    } else {
        Answers::find()
            .filter(AnswerColumn::QuestionId.is_in(question_ids))
            .order_by_asc(AnswerColumn::CreatedAt)
            .all(&state.orm)
            .await?
    };

    let author_ids = questions
        .iter()
        .map(|q| q.user_id)
        .chain(answers.iter().map(|a| a.user_id));
    let users = load_authors(state, author_ids).await?;

    let mut answers_by_question: HashMap<Uuid, Vec<(AnswerModel, Option<UserModel>)>> =
        HashMap::new();
    for answer in answers {
        let author = users.get(&answer.user_id).cloned();
        answers_by_question
            .entry(answer.question_id)
            .or_default()
            .push((answer, author));
    }

    Ok(questions
        .into_iter()
        .map(|question| {
            let user = users.get(&question.user_id).cloned();
            let answers = answers_by_question.remove(&question.id).unwrap_or_default();
            QuestionRecord {
                question,
                user,
                answers,
            }
        })
        .collect())
}

pub async fn create_question(
    state: &AppState,
    user: &AuthUser,
    payload: CreateQuestionRequest,
) -> AppResult<QuestionRecord> {
    payload.validate()?;

    Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let question = QuestionActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        product_id: Set(payload.product_id),
        content: Set(payload.content),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    let author = Users::find_by_id(user.user_id).one(&state.orm).await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "question_create",
        Some("questions"),
        Some(serde_json::json!({
            "question_id": question.id,
            "product_id": question.product_id,
        })),
    )
    .await;

    Ok(QuestionRecord {
        question,
        user: author,
        answers: Vec::new(),
    })
}

pub async fn create_answer(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAnswerRequest,
) -> AppResult<(AnswerModel, Option<UserModel>)> {
    payload.validate()?;

    Questions::find_by_id(payload.question_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

    let answer = AnswerActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        question_id: Set(payload.question_id),
        content: Set(payload.content),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    let author = Users::find_by_id(user.user_id).one(&state.orm).await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "answer_create",
        Some("answers"),
        Some(serde_json::json!({
            "answer_id": answer.id,
            "question_id": answer.question_id,
        })),
    )
    .await;

    Ok((answer, author))
}

pub async fn delete_question(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    let question = Questions::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

    if question.user_id != user.user_id {
        return Err(AppError::Forbidden(
            "You can only delete your own questions".to_string(),
        ));
    }

    // Answers hang off the question without a cascade, so they go first.
    let txn = state.orm.begin().await?;
    Answers::delete_many()
        .filter(AnswerColumn::QuestionId.eq(question.id))
        .exec(&txn)
        .await?;
    Questions::delete_by_id(question.id).exec(&txn).await?;
    txn.commit().await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "question_delete",
        Some("questions"),
        Some(serde_json::json!({ "question_id": id })),
    )
    .await;

    Ok(())
}

pub async fn delete_answer(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    let answer = Answers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Answer not found".to_string()))?;

    if answer.user_id != user.user_id {
        return Err(AppError::Forbidden(
            "You can only delete your own answers".to_string(),
        ));
    }

    Answers::delete_by_id(answer.id).exec(&state.orm).await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "answer_delete",
        Some("answers"),
        Some(serde_json::json!({ "answer_id": id })),
    )
    .await;

    Ok(())
}

async fn load_authors(
    state: &AppState,
    ids: impl Iterator<Item = Uuid>,
) -> AppResult<HashMap<Uuid, UserModel>> {
    let mut user_ids: Vec<Uuid> = ids.collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let mut users = HashMap::new();
    if !user_ids.is_empty() {
        for user in Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&state.orm)
            .await?
        {
            users.insert(user.id, user);
        }
    }
    Ok(users)
}
