//! Contact HTTP handlers.
//!
//! ```text
//! GET    /api/v1/contacts?skip=0&limit=100
//! POST   /api/v1/contacts
//! GET    /api/v1/contacts/{contact_id}
//! PUT    /api/v1/contacts/{contact_id}
//! DELETE /api/v1/contacts/{contact_id}
//! GET    /api/v1/contacts/find/{info}
//! GET    /api/v1/contacts/birthday/{days}
//! ```
//!
//! Every handler requires a session; the session user id is the owner passed
//! to the contact ports.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::PageRequest;
use crate::domain::{Contact, ContactDraft, ContactDraftParts, ContactId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{contact_validation_error, non_negative};

const CONTACT_NOT_FOUND: &str = "Contact not found";

/// Contact fields accepted by create and update.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[schema(example = "Ann", max_length = 50)]
    pub name: String,
    #[schema(example = "Lee", max_length = 50)]
    pub surname: String,
    #[schema(example = "ann@example.com", format = "email")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "555-0100", max_length = 50)]
    pub phone_number: Option<String>,
    #[schema(value_type = String, format = Date, example = "1990-04-01")]
    pub birthday: NaiveDate,
    #[schema(example = "met at the conference", max_length = 150)]
    pub description: String,
}

impl TryFrom<ContactRequest> for ContactDraft {
    type Error = Error;

    fn try_from(value: ContactRequest) -> Result<Self, Self::Error> {
        let ContactRequest {
            name,
            surname,
            email,
            phone_number,
            birthday,
            description,
        } = value;
        ContactDraft::new(ContactDraftParts {
            name,
            surname,
            email,
            phone_number,
            birthday,
            description,
        })
        .map_err(contact_validation_error)
    }
}

/// Stored contact as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: Option<String>,
    #[schema(value_type = String, format = Date, example = "1990-04-01")]
    pub birthday: NaiveDate,
    pub description: String,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id().get(),
            name: contact.name().to_owned(),
            surname: contact.surname().to_owned(),
            email: contact.email().to_owned(),
            phone_number: contact.phone_number().map(str::to_owned),
            birthday: contact.birthday(),
            description: contact.description().to_owned(),
        }
    }
}

fn to_responses(contacts: Vec<Contact>) -> Vec<ContactResponse> {
    contacts.into_iter().map(ContactResponse::from).collect()
}

fn found(contact: Option<Contact>) -> ApiResult<web::Json<ContactResponse>> {
    contact
        .map(|contact| web::Json(ContactResponse::from(contact)))
        .ok_or_else(|| Error::not_found(CONTACT_NOT_FOUND))
}

/// Pagination parameters for `GET /contacts`.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Number of contacts to skip; defaults to 0.
    pub skip: Option<i64>,
    /// Maximum number of contacts to return; defaults to 100.
    pub limit: Option<i64>,
}

impl ListQuery {
    fn page(self) -> Result<PageRequest, Error> {
        Ok(PageRequest::new(
            non_negative(self.skip.unwrap_or(0), "skip")?,
            self.limit
                .map_or(Ok(PageRequest::DEFAULT_LIMIT), |limit| non_negative(limit, "limit"))?,
        ))
    }
}

/// List the caller's contacts in ascending id order.
#[utoipa::path(
    get,
    path = "/api/v1/contacts",
    params(ListQuery),
    responses(
        (status = 200, description = "Owned contacts", body = [ContactResponse]),
        (status = 400, description = "Invalid pagination", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "listContacts",
    security(("SessionCookie" = []))
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<Vec<ContactResponse>>> {
    let owner = session.require_user_id()?;
    let page = query.into_inner().page()?;
    let contacts = state.contacts_query.list(&owner, page).await?;
    Ok(web::Json(to_responses(contacts)))
}

/// Create a contact owned by the caller.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use contacts_backend::inbound::http::contacts::create_contact;
///
/// let _app = App::new().service(web::scope("/api/v1").service(create_contact));
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/contacts",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Contact created", body = ContactResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "createContact",
    security(("SessionCookie" = []))
)]
#[post("/contacts")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = ContactDraft::try_from(payload.into_inner())?;
    let contact = state.contacts.create(&owner, draft).await?;
    Ok(HttpResponse::Created().json(ContactResponse::from(contact)))
}

/// Search the caller's contacts by name, surname or email substring.
///
/// A contact matching on two fields is listed twice.
#[utoipa::path(
    get,
    path = "/api/v1/contacts/find/{info}",
    params(("info" = String, Path, description = "Substring to look for")),
    responses(
        (status = 200, description = "Matching contacts", body = [ContactResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "findContacts",
    security(("SessionCookie" = []))
)]
#[get("/contacts/find/{info}")]
pub async fn find_contacts(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ContactResponse>>> {
    let owner = session.require_user_id()?;
    let info = path.into_inner();
    let contacts = state.contacts_query.find_by_info(&owner, &info).await?;
    Ok(web::Json(to_responses(contacts)))
}

/// Contacts whose birthday falls within the next `days` days, today included.
#[utoipa::path(
    get,
    path = "/api/v1/contacts/birthday/{days}",
    params(("days" = i64, Path, minimum = 0, description = "Window length in days")),
    responses(
        (status = 200, description = "Upcoming birthdays", body = [ContactResponse]),
        (status = 400, description = "Negative window", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "upcomingBirthdays",
    security(("SessionCookie" = []))
)]
#[get("/contacts/birthday/{days}")]
pub async fn upcoming_birthdays(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<ContactResponse>>> {
    let owner = session.require_user_id()?;
    let days = non_negative(path.into_inner(), "days")?;
    let contacts = state.contacts_query.birthdays_within(&owner, days).await?;
    Ok(web::Json(to_responses(contacts)))
}

#[utoipa::path(
    get,
    path = "/api/v1/contacts/{contact_id}",
    params(("contact_id" = i32, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Contact", body = ContactResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Contact not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "getContact",
    security(("SessionCookie" = []))
)]
#[get("/contacts/{contact_id}")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<ContactResponse>> {
    let owner = session.require_user_id()?;
    let id = ContactId::new(path.into_inner());
    found(state.contacts_query.get(&owner, id).await?)
}

/// Replace every field of an owned contact.
#[utoipa::path(
    put,
    path = "/api/v1/contacts/{contact_id}",
    params(("contact_id" = i32, Path, description = "Contact identifier")),
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Updated contact", body = ContactResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Contact not found", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "updateContact",
    security(("SessionCookie" = []))
)]
#[put("/contacts/{contact_id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<web::Json<ContactResponse>> {
    let owner = session.require_user_id()?;
    let id = ContactId::new(path.into_inner());
    let draft = ContactDraft::try_from(payload.into_inner())?;
    found(state.contacts.update(&owner, id, draft).await?)
}

/// Delete an owned contact and return its last stored values.
#[utoipa::path(
    delete,
    path = "/api/v1/contacts/{contact_id}",
    params(("contact_id" = i32, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Deleted contact", body = ContactResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Contact not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact",
    security(("SessionCookie" = []))
)]
#[delete("/contacts/{contact_id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<ContactResponse>> {
    let owner = session.require_user_id()?;
    let id = ContactId::new(path.into_inner());
    found(state.contacts.delete(&owner, id).await?)
}

#[cfg(test)]
#[path = "contacts_tests.rs"]
mod tests;
