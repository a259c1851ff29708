use actix_web::{delete, get, http::StatusCode, post, put, web, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{ExpenseError, PersonError, StoreError};
use crate::group::NewExpense;
use crate::schemas::Group;
use crate::settlement::calculate_settlements;
use crate::store::GroupStore;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Couldn't find the desired group")]
    GroupNotFound,
    #[error("A group with this id already exists")]
    GroupExists,
    #[error("Couldn't find the desired person")]
    PersonNotFound,
    #[error("Couldn't find the desired expense")]
    ExpenseNotFound,
    #[error(transparent)]
    Person(#[from] PersonError),
    #[error(transparent)]
    Expense(#[from] ExpenseError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::GroupNotFound | ApiError::PersonNotFound | ApiError::ExpenseNotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::GroupExists => StatusCode::CONFLICT,
            ApiError::Person(_) | ApiError::Expense(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("request failed: {}", self);
        }
        HttpResponse::build(status).body(self.to_string())
    }
}

type ApiResult = Result<HttpResponse, ApiError>;

#[derive(Deserialize, Serialize)]
struct NameJson {
    name: String,
}

async fn load(store: &GroupStore, id: &str) -> Result<Group, ApiError> {
    store.find(id).await?.ok_or(ApiError::GroupNotFound)
}

async fn save(store: &GroupStore, group: &Group) -> Result<(), ApiError> {
    if store.replace(group).await? {
        Ok(())
    } else {
        Err(ApiError::GroupNotFound)
    }
}

#[get("/health")]
async fn health() -> &'static str {
    "OK"
}

#[get("/groups")]
async fn list_groups(store: web::Data<GroupStore>) -> ApiResult {
    Ok(HttpResponse::Ok().json(store.list().await?))
}

#[put("/groups/{id}")]
async fn add_group(
    store: web::Data<GroupStore>,
    id: web::Path<String>,
    json: web::Json<NameJson>,
) -> ApiResult {
    let id = id.into_inner();
    if store.find(&id).await?.is_some() {
        return Err(ApiError::GroupExists);
    }
    let group = Group::new(id, json.into_inner().name);
    store.insert(&group).await?;
    info!(group = %group.id, "created group");
    Ok(HttpResponse::Created().json(group))
}

#[get("/groups/{id}")]
async fn get_group(store: web::Data<GroupStore>, id: web::Path<String>) -> ApiResult {
    Ok(HttpResponse::Ok().json(load(&store, &id).await?))
}

#[delete("/groups/{id}")]
async fn delete_group(store: web::Data<GroupStore>, id: web::Path<String>) -> ApiResult {
    if !store.delete(&id).await? {
        return Err(ApiError::GroupNotFound);
    }
    info!(group = %id.as_str(), "deleted group");
    Ok(HttpResponse::NoContent().finish())
}

#[post("/groups/{id}/people")]
async fn add_person(
    store: web::Data<GroupStore>,
    id: web::Path<String>,
    json: web::Json<NameJson>,
) -> ApiResult {
    let mut group = load(&store, &id).await?;
    let person = group.add_person(&json.name)?.clone();
    save(&store, &group).await?;
    Ok(HttpResponse::Created().json(person))
}

#[delete("/groups/{id}/people/{person_id}")]
async fn remove_person(
    store: web::Data<GroupStore>,
    path: web::Path<(String, String)>,
) -> ApiResult {
    let (id, person_id) = path.into_inner();
    let mut group = load(&store, &id).await?;
    let person = group
        .remove_person(&person_id)
        .ok_or(ApiError::PersonNotFound)?;
    save(&store, &group).await?;
    Ok(HttpResponse::Ok().json(person))
}

#[post("/groups/{id}/expenses")]
async fn add_expense(
    store: web::Data<GroupStore>,
    id: web::Path<String>,
    expense: web::Json<NewExpense>,
) -> ApiResult {
    let mut group = load(&store, &id).await?;
    let expense = group.add_expense(expense.into_inner())?.clone();
    save(&store, &group).await?;
    Ok(HttpResponse::Created().json(expense))
}

#[delete("/groups/{id}/expenses/{expense_id}")]
async fn delete_expense(
    store: web::Data<GroupStore>,
    path: web::Path<(String, String)>,
) -> ApiResult {
    let (id, expense_id) = path.into_inner();
    let mut group = load(&store, &id).await?;
    let expense = group
        .delete_expense(&expense_id)
        .ok_or(ApiError::ExpenseNotFound)?;
    save(&store, &group).await?;
    Ok(HttpResponse::Ok().json(expense))
}

#[get("/groups/{id}/expenses")]
async fn list_expenses(store: web::Data<GroupStore>, id: web::Path<String>) -> ApiResult {
    let group = load(&store, &id).await?;
    Ok(HttpResponse::Ok().json(group.expense_history()))
}

#[get("/groups/{id}/balances")]
async fn get_balances(store: web::Data<GroupStore>, id: web::Path<String>) -> ApiResult {
    let group = load(&store, &id).await?;
    Ok(HttpResponse::Ok().json(group.balances()))
}

#[get("/groups/{id}/settlements")]
async fn get_settlements(store: web::Data<GroupStore>, id: web::Path<String>) -> ApiResult {
    let group = load(&store, &id).await?;
    Ok(HttpResponse::Ok().json(calculate_settlements(&group.balances())))
}

#[get("/groups/{id}/summary")]
async fn get_summary(store: web::Data<GroupStore>, id: web::Path<String>) -> ApiResult {
    let group = load(&store, &id).await?;
    Ok(HttpResponse::Ok().json(group.summary()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(list_groups)
        .service(add_group)
        .service(get_group)
        .service(delete_group)
        .service(add_person)
        .service(remove_person)
        .service(list_expenses)
        .service(add_expense)
        .service(delete_expense)
        .service(get_balances)
        .service(get_settlements)
        .service(get_summary);
}
