// Legacy item pages, kept from the first version of the catalog

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tracing::info;

use super::PageQuery;
use crate::auth::{FlashKind, Session};
use crate::db::{Item, Page};
use crate::error::AppError;
use crate::ui::{self, ItemDetailTemplate, ItemFormTemplate, ItemsTemplate, Layout};
use crate::validation::ItemForm;
use crate::AppState;

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    mut session: Session,
) -> Result<Response, AppError> {
    let page = Page::<Item>::normalize(query.number());
    let listing = state
        .items
        .list_page(page, state.config.catalog.per_page)
        .await?;
    if listing.is_out_of_range() {
        return Err(AppError::NotFound("Page"));
    }

    let template = ItemsTemplate {
        layout: Layout::from_session(&mut session),
        page: listing,
    };
    Ok((session, ui::render(&template)).into_response())
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut session: Session,
) -> Result<Response, AppError> {
    let item = find_item(&state, id).await?;
    let template = ItemDetailTemplate {
        layout: Layout::from_session(&mut session),
        item,
    };
    Ok((session, ui::render(&template)).into_response())
}

pub async fn new_form(mut session: Session) -> Response {
    let template = form_template(Layout::from_session(&mut session), None, ItemForm::default());
    (session, ui::render(&template)).into_response()
}

pub async fn create(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<ItemForm>,
) -> Result<Response, AppError> {
    let changes = match form.validate() {
        Ok(changes) => changes,
        Err(errors) => {
            let layout = Layout::from_session(&mut session).with_errors(&errors);
            let template = form_template(layout, None, form.trimmed());
            return Ok((
                session,
                ui::render_with_status(StatusCode::BAD_REQUEST, &template),
            )
                .into_response());
        }
    };

    let item = state.items.insert(&changes).await?;
    info!(item_id = item.id, "Item created");

    session.flash(FlashKind::Success, "Item created successfully.");
    Ok((session, Redirect::to("/items")).into_response())
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut session: Session,
) -> Result<Response, AppError> {
    let item = find_item(&state, id).await?;
    let form = ItemForm {
        title: item.title.clone(),
        description: item.description_text().to_string(),
    };
    let template = form_template(Layout::from_session(&mut session), Some(id), form);
    Ok((session, ui::render(&template)).into_response())
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut session: Session,
    Form(form): Form<ItemForm>,
) -> Result<Response, AppError> {
    find_item(&state, id).await?;

    let changes = match form.validate() {
        Ok(changes) => changes,
        Err(errors) => {
            let layout = Layout::from_session(&mut session).with_errors(&errors);
            let template = form_template(layout, Some(id), form.trimmed());
            return Ok((
                session,
                ui::render_with_status(StatusCode::BAD_REQUEST, &template),
            )
                .into_response());
        }
    };

    state
        .items
        .update(id, &changes)
        .await?
        .ok_or(AppError::NotFound("Item"))?;

    session.flash(FlashKind::Success, "Item updated.");
    Ok((session, Redirect::to(&format!("/items/{id}"))).into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut session: Session,
) -> Result<Response, AppError> {
    if !state.items.delete(id).await? {
        return Err(AppError::NotFound("Item"));
    }
    info!(item_id = id, "Item deleted");

    session.flash(FlashKind::Info, "Item deleted.");
    Ok((session, Redirect::to("/items")).into_response())
}

async fn find_item(state: &AppState, id: i64) -> Result<Item, AppError> {
    state
        .items
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Item"))
}

fn form_template(layout: Layout, id: Option<i64>, form: ItemForm) -> ItemFormTemplate {
    match id {
        Some(id) => ItemFormTemplate {
            layout,
            heading: "Edit item",
            action: format!("/items/edit/{id}"),
            cancel_url: format!("/items/{id}"),
            form,
        },
        None => ItemFormTemplate {
            layout,
            heading: "New item",
            action: "/items/create".to_string(),
            cancel_url: "/items".to_string(),
            form,
        },
    }
}
