//! Contacts API handlers.
//!
//! ```text
//! POST   /api/contacts {"name":"Jo","email":"jo@x.com","phone":"5551234567"}
//! GET    /api/contacts?page=1&limit=10
//! DELETE /api/contacts/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use pagination::{PageRequest, Paginated, PaginationMeta};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Contact, ContactDraft, ContactError, ContactField, FieldErrors, validate_contact,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::Error;
use crate::inbound::http::state::HttpState;

/// Create request body for `POST /api/contacts`.
///
/// Missing fields are reported as validation failures, not as a malformed
/// body. Fields of the wrong JSON type are validation failures too.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateContactRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Jo Bloggs")]
    pub name: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "jo@example.com")]
    pub email: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "5551234567")]
    pub phone: Option<Value>,
}

impl CreateContactRequest {
    /// Split the body into a draft and the fields that were not strings.
    fn into_draft(self) -> (ContactDraft, FieldErrors) {
        let mut mistyped = FieldErrors::default();
        let mut text = |field, value| string_field(field, value, &mut mistyped);
        let draft = ContactDraft {
            name: text(ContactField::Name, self.name),
            email: text(ContactField::Email, self.email),
            phone: text(ContactField::Phone, self.phone),
        };
        (draft, mistyped)
    }
}

fn string_field(
    field: ContactField,
    value: Option<Value>,
    mistyped: &mut FieldErrors,
) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(_) => {
            mistyped.insert(field, not_a_string(field));
            None
        }
    }
}

const fn not_a_string(field: ContactField) -> &'static str {
    match field {
        ContactField::Name => "Name must be a string",
        ContactField::Email => "Email must be a string",
        ContactField::Phone => "Phone number must be a string",
    }
}

/// Contact as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ContactResponse {
    #[schema(example = 1)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id.get(),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

/// Pagination block of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationBody {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<PaginationMeta> for PaginationBody {
    fn from(meta: PaginationMeta) -> Self {
        Self {
            page: meta.page,
            limit: meta.limit,
            total: meta.total,
            total_pages: meta.total_pages,
            has_next: meta.has_next,
            has_prev: meta.has_prev,
        }
    }
}

/// Body of `GET /api/contacts`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ContactListResponse {
    pub data: Vec<ContactResponse>,
    pub pagination: PaginationBody,
}

impl From<Paginated<Contact>> for ContactListResponse {
    fn from(page: Paginated<Contact>) -> Self {
        let Paginated { data, pagination } = page.map(ContactResponse::from);
        Self {
            data,
            pagination: pagination.into(),
        }
    }
}

/// Raw paging parameters. Values that do not start with an integer fall
/// back to the defaults; out-of-range values are clamped. When a key repeats,
/// its first value wins.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListContactsQuery {
    /// One-based page number (default 1).
    pub page: Option<String>,
    /// Page size, 1 to 50 (default 10).
    pub limit: Option<String>,
}

impl ListContactsQuery {
    /// Collect the paging keys from decoded query pairs, ignoring others.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    fn page_request(&self) -> PageRequest {
        PageRequest::from_optional(
            self.page.as_deref().and_then(parse_leading_int),
            self.limit.as_deref().and_then(parse_leading_int),
        )
    }
}

/// Parse the integer at the start of `raw`, ignoring leading whitespace and
/// anything after the digits. Magnitudes beyond `i64` saturate.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude = rest[..digits_len].bytes().fold(0_i64, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Create a contact.
#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Contact created", body = ContactResponse),
        (status = 400, description = "Validation failed or malformed body", body = Error),
        (status = 409, description = "Email already in use", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "createContact"
)]
#[post("/contacts")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    payload: web::Json<CreateContactRequest>,
) -> ApiResult<HttpResponse> {
    let (draft, mistyped) = payload.into_inner().into_draft();
    if !mistyped.is_empty() {
        return Err(mistyped_fields(mistyped, &draft).into());
    }
    let contact = state.contacts.create_contact(draft).await?;
    Ok(HttpResponse::Created().json(ContactResponse::from(contact)))
}

/// Report wrongly typed fields together with whatever the remaining fields
/// fail on.
fn mistyped_fields(mut errors: FieldErrors, draft: &ContactDraft) -> ContactError {
    if let Err(rest) = validate_contact(draft) {
        for (field, message) in rest.iter() {
            errors.insert(field, message);
        }
    }
    ContactError::Validation(errors)
}

/// List contacts, newest first.
#[utoipa::path(
    get,
    path = "/api/contacts",
    params(ListContactsQuery),
    responses(
        (status = 200, description = "One page of contacts", body = ContactListResponse),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
    query: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<ContactListResponse>> {
    let query = ListContactsQuery::from_pairs(query.into_inner());
    let page = state
        .contacts_query
        .list_contacts(query.page_request())
        .await?;
    Ok(web::Json(page.into()))
}

/// Delete a contact.
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    params(("id" = String, Path, description = "Contact identifier")),
    responses(
        (status = 204, description = "Contact deleted"),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 404, description = "No such contact", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.contacts.delete_contact(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
