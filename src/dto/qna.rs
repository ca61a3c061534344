use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::users::UserSummaryDto;
use crate::entity::{answers, questions, users};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDto {
    pub id: Uuid,
    pub question_id: Uuid,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummaryDto>,
    pub created_at: DateTime<Utc>,
}

impl AnswerDto {
    pub fn from_entity(model: answers::Model, user: Option<users::Model>) -> Self {
        Self {
            id: model.id,
            question_id: model.question_id,
            content: model.content,
            user: user.map(UserSummaryDto::from),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummaryDto>,
    pub answers: Vec<AnswerDto>,
    pub created_at: DateTime<Utc>,
}

impl QuestionDto {
    pub fn from_entity(
        model: questions::Model,
        user: Option<users::Model>,
        answers: Vec<AnswerDto>,
    ) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            content: model.content,
            user: user.map(UserSummaryDto::from),
            answers,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionList {
    pub items: Vec<QuestionDto>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub product_id: Uuid,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnswerRequest {
    pub question_id: Uuid,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
}
