//! # Product Commands
//!
//! `list`, `add`, `edit` and `delete`, each expressed as intents.

use stockroom_core::{DraftForm, EditField, ProductId, StockFilter};
use tracing::debug;

use super::render;
use crate::error::AppResult;
use crate::state::InventoryState;

/// Shows the filtered view.
pub fn list(state: &InventoryState, search: String, bucket: StockFilter, json: bool) -> AppResult<()> {
    debug!(search = %search, %bucket, "list command");
    state.on_search_change(search);
    state.on_bucket_change(bucket);
    render::products(&state.visible_products(), json);
    Ok(())
}

/// Submits the add form.
pub async fn add(
    state: &InventoryState,
    name: String,
    sku: String,
    quantity: String,
    description: String,
    json: bool,
) -> AppResult<()> {
    debug!("add command");
    state
        .on_add(DraftForm::new(name, sku, quantity, description))
        .await?;
    after_mutation(state, json);
    Ok(())
}

/// Opens, fills and commits an edit session.
pub async fn edit(
    state: &InventoryState,
    id: String,
    field: EditField,
    value: String,
    json: bool,
) -> AppResult<()> {
    debug!(id = %id, %field, "edit command");
    state.on_open_edit(&ProductId::from(id), field)?;
    state.on_edit_value_change(value)?;
    state.on_commit_edit().await?;
    after_mutation(state, json);
    Ok(())
}

/// Deletes one product.
pub async fn delete(state: &InventoryState, id: String, json: bool) -> AppResult<()> {
    debug!(id = %id, "delete command");
    state.on_delete(&ProductId::from(id)).await?;
    after_mutation(state, json);
    Ok(())
}

fn after_mutation(state: &InventoryState, json: bool) {
    if json {
        render::json(&state.snapshot());
    } else {
        render::success(&state.notifications());
        render::products(&state.products(), false);
    }
}
