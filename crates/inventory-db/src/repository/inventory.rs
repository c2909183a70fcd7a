//! # Inventory Repository
//!
//! Database operations for inventory records.
//!
//! ## Key Operations
//! - `create` / `update` from caller forms (blank check, coercion, defaults)
//! - `delete` / `delete_all`
//! - `query`: lazy, projected read path over a collection or one record
//! - `record_sale`: the one-tap decrement used by the list screen
//!
//! ## Sale Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                                                                     │
//! │  record_sale(7)                                                     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SELECT ... WHERE _id = 7          → quantity = 1                   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  max(1 - 1, 0) = 0                                                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  UPDATE (same path as edit-save)   → product_quantity = 0           │
//! │                                                                     │
//! │  At 0 the decrement writes 0 again: the floor is never crossed.     │
//! │  Read-then-write is not atomic; the store assumes a single writer.  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use futures_util::stream::{BoxStream, StreamExt};
use inventory_core::validation::{clamped_fields, normalize_form};
use inventory_core::{
    InventoryItem, ItemForm, ItemId, ItemRow, ItemUri, ItemValues, NewItem, Projection,
    SaveOutcome, ValidationError,
};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::notify::{ChangeKind, ChangeNotifier};

// Numeric columns are read through CAST: files written by earlier builds of
// the app can hold '' or NULL text in them.
const SELECT_ALL: &str = r#"
    SELECT
        _id,
        product_name,
        CAST(IFNULL(NULLIF(product_price, ''), 0) AS REAL) AS product_price,
        CAST(IFNULL(NULLIF(product_quantity, ''), 0) AS INTEGER) AS product_quantity,
        IFNULL(supplier_name, 'Unknown Supplier') AS supplier_name,
        IFNULL(supplier_phone_number, 'Unknown Phone') AS supplier_phone_number
    FROM inventory
    ORDER BY _id
"#;

const SELECT_ONE: &str = r#"
    SELECT
        _id,
        product_name,
        CAST(IFNULL(NULLIF(product_price, ''), 0) AS REAL) AS product_price,
        CAST(IFNULL(NULLIF(product_quantity, ''), 0) AS INTEGER) AS product_quantity,
        IFNULL(supplier_name, 'Unknown Supplier') AS supplier_name,
        IFNULL(supplier_phone_number, 'Unknown Phone') AS supplier_phone_number
    FROM inventory
    WHERE _id = ?1
"#;

const INSERT: &str = r#"
    INSERT INTO inventory (
        product_name, product_price, product_quantity,
        supplier_name, supplier_phone_number
    ) VALUES (?1, ?2, ?3, ?4, ?5)
"#;

const UPDATE: &str = r#"
    UPDATE inventory SET
        product_name = COALESCE(?2, product_name),
        product_price = COALESCE(?3, product_price),
        product_quantity = COALESCE(?4, product_quantity),
        supplier_name = COALESCE(?5, supplier_name),
        supplier_phone_number = COALESCE(?6, supplier_phone_number)
    WHERE _id = ?1
"#;

/// Repository for inventory database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.inventory();
///
/// let form = ItemForm::new().product_name("Silver Pen").price("19.95");
/// if let SaveOutcome::Saved(id) = repo.create(&form).await? {
///     repo.record_sale(id).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
    notifier: ChangeNotifier,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool, notifier: ChangeNotifier) -> Self {
        InventoryRepository { pool, notifier }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Creates a record from a caller form.
    ///
    /// ## Returns
    /// * `Ok(SaveOutcome::NothingToSave)` - every field was blank, nothing written
    /// * `Ok(SaveOutcome::Saved(id))` - the new record's id
    /// * `Err(DbError::Validation)` - price or quantity text is not a number
    /// * `Err(DbError)` - storage failure
    pub async fn create(&self, form: &ItemForm) -> DbResult<SaveOutcome<ItemId>> {
        let Some(values) = self.normalize(form)? else {
            debug!("Blank form, nothing to save");
            return Ok(SaveOutcome::NothingToSave);
        };

        let id = self.insert(&values.into_new_item()).await?;
        Ok(SaveOutcome::Saved(id))
    }

    /// Inserts a fully populated record.
    pub async fn insert(&self, item: &NewItem) -> DbResult<ItemId> {
        debug!(product_name = %item.product_name, "Inserting item");

        let price = storable_price(item.price)?;

        let result = sqlx::query(INSERT)
            .bind(&item.product_name)
            .bind(price)
            .bind(item.quantity.max(0))
            .bind(&item.supplier_name)
            .bind(&item.supplier_phone)
            .execute(&self.pool)
            .await?;

        let id = ItemId(result.last_insert_rowid());
        self.notifier.notify(ChangeKind::Created, ItemUri::Item(id));

        debug!(%id, "Item inserted");
        Ok(id)
    }

    /// Updates the record `id` from a caller form.
    ///
    /// Supplied fields overwrite the stored ones; fields left `None` in the
    /// form keep their stored values.
    ///
    /// ## Returns
    /// * `Ok(SaveOutcome::NothingToSave)` - every field was blank, nothing written
    /// * `Ok(SaveOutcome::Saved(0))` - no record with that id
    /// * `Ok(SaveOutcome::Saved(1))` - record updated
    pub async fn update(&self, id: ItemId, form: &ItemForm) -> DbResult<SaveOutcome<u64>> {
        let Some(values) = self.normalize(form)? else {
            debug!(%id, "Blank form, nothing to save");
            return Ok(SaveOutcome::NothingToSave);
        };

        let rows = self.apply(id, &values).await?;
        Ok(SaveOutcome::Saved(rows))
    }

    /// Writes already-coerced values to the record `id`.
    ///
    /// Returns the number of rows affected (0 or 1).
    pub async fn apply(&self, id: ItemId, values: &ItemValues) -> DbResult<u64> {
        debug!(%id, "Updating item");

        let price = values.price.map(storable_price).transpose()?;

        let result = sqlx::query(UPDATE)
            .bind(id)
            .bind(values.product_name.as_deref())
            .bind(price)
            .bind(values.quantity.map(|q| q.max(0)))
            .bind(values.supplier_name.as_deref())
            .bind(values.supplier_phone.as_deref())
            .execute(&self.pool)
            .await?;

        let rows = result.rows_affected();
        if rows > 0 {
            self.notifier.notify(ChangeKind::Updated, ItemUri::Item(id));
        } else {
            debug!(%id, "Update matched no record");
        }

        Ok(rows)
    }

    /// Sells one unit of the record `id`.
    ///
    /// Reads the current quantity, computes `max(quantity - 1, 0)` and writes
    /// it through the update path.
    ///
    /// ## Returns
    /// Rows affected: 0 if the record does not exist, 1 otherwise.
    pub async fn record_sale(&self, id: ItemId) -> DbResult<u64> {
        let Some(item) = self.get(id).await? else {
            debug!(%id, "Sale on missing item");
            return Ok(0);
        };

        let quantity = item.quantity_after_sale();
        debug!(%id, from = item.quantity, to = quantity, "Recording sale");

        self.apply(id, &ItemValues::quantity_only(quantity)).await
    }

    /// Adds `amount` units to the record `id`.
    ///
    /// ## Returns
    /// Rows affected: 0 if the record does not exist, 1 otherwise.
    pub async fn restock(&self, id: ItemId, amount: u32) -> DbResult<u64> {
        let Some(item) = self.get(id).await? else {
            debug!(%id, "Restock on missing item");
            return Ok(0);
        };

        let quantity = item.quantity.saturating_add(i64::from(amount));
        debug!(%id, from = item.quantity, to = quantity, "Restocking item");

        self.apply(id, &ItemValues::quantity_only(quantity)).await
    }

    /// Deletes the record `id`.
    ///
    /// ## Returns
    /// Rows removed: 0 if absent, 1 if removed.
    pub async fn delete(&self, id: ItemId) -> DbResult<u64> {
        debug!(%id, "Deleting item");

        let result = sqlx::query("DELETE FROM inventory WHERE _id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let rows = result.rows_affected();
        if rows > 0 {
            self.notifier.notify(ChangeKind::Deleted, ItemUri::Item(id));
        }

        Ok(rows)
    }

    /// Deletes every record. Used for bulk reset.
    ///
    /// ## Returns
    /// Number of records removed.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM inventory")
            .execute(&self.pool)
            .await?;

        let rows = result.rows_affected();
        debug!(rows, "Deleted all items");

        if rows > 0 {
            self.notifier.notify(ChangeKind::Cleared, ItemUri::Collection);
        }

        Ok(rows)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Streams records addressed by `target`, keeping only the projected
    /// columns.
    ///
    /// - `ItemUri::Collection`: every record, ascending id
    /// - `ItemUri::Item(id)`: zero or one record
    ///
    /// Rows are pulled from SQLite as the stream is polled. Nothing is
    /// cached: a query issued after a write observes that write.
    pub fn query(
        &self,
        target: ItemUri,
        projection: Projection,
    ) -> BoxStream<'_, DbResult<ItemRow>> {
        let rows = match target {
            ItemUri::Collection => {
                sqlx::query_as::<_, InventoryItem>(SELECT_ALL).fetch(&self.pool)
            }
            ItemUri::Item(id) => sqlx::query_as::<_, InventoryItem>(SELECT_ONE)
                .bind(id)
                .fetch(&self.pool),
        };

        rows.map(move |row| {
            row.map(|item| item.project(&projection))
                .map_err(DbError::from)
        })
        .boxed()
    }

    /// Gets a record by id.
    ///
    /// ## Returns
    /// * `Ok(Some(InventoryItem))` - record found
    /// * `Ok(None)` - no record with that id
    pub async fn get(&self, id: ItemId) -> DbResult<Option<InventoryItem>> {
        let item = sqlx::query_as::<_, InventoryItem>(SELECT_ONE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Lists every record, ascending id.
    pub async fn list(&self) -> DbResult<Vec<InventoryItem>> {
        let items = sqlx::query_as::<_, InventoryItem>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Lists the records addressed by `target`.
    pub async fn fetch(&self, target: ItemUri) -> DbResult<Vec<InventoryItem>> {
        match target {
            ItemUri::Collection => self.list().await,
            ItemUri::Item(id) => Ok(self.get(id).await?.into_iter().collect()),
        }
    }

    /// Counts records.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn normalize(&self, form: &ItemForm) -> DbResult<Option<ItemValues>> {
        for column in clamped_fields(form) {
            warn!(%column, "Negative input clamped to zero");
        }

        Ok(normalize_form(form)?)
    }
}

/// Rejects non-finite prices and clamps negative ones to zero.
fn storable_price(price: f64) -> DbResult<f64> {
    if !price.is_finite() {
        return Err(ValidationError::not_a_number("price", price.to_string()).into());
    }

    Ok(price.max(0.0))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::InventoryChange;
    use crate::pool::{Database, DbConfig};
    use futures_util::TryStreamExt;
    use inventory_core::Column;
    use tokio::sync::broadcast;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn silver_pen_form() -> ItemForm {
        ItemForm::new()
            .product_name("Silver Pen")
            .price("19.95")
            .quantity("1")
            .supplier_name("Microsoft")
            .supplier_phone("(360)514-1234")
    }

    async fn create(repo: &InventoryRepository, form: &ItemForm) -> ItemId {
        repo.create(form).await.unwrap().saved().expect("form is not blank")
    }

    async fn query_one(repo: &InventoryRepository, id: ItemId) -> Vec<ItemRow> {
        repo.query(ItemUri::Item(id), Projection::all())
            .try_collect()
            .await
            .unwrap()
    }

    fn drain(rx: &mut broadcast::Receiver<InventoryChange>) -> Vec<(ChangeKind, ItemUri)> {
        let mut changes = Vec::new();
        while let Ok(change) = rx.try_recv() {
            changes.push((change.kind, change.uri));
        }
        changes
    }

    #[tokio::test]
    async fn test_silver_pen_lifecycle() {
        let db = test_db().await;
        let repo = db.inventory();

        let id = create(&repo, &silver_pen_form()).await;

        let rows = query_one(&repo, id).await;
        assert_eq!(
            rows,
            vec![ItemRow {
                id,
                product_name: Some("Silver Pen".to_string()),
                price: Some(19.95),
                quantity: Some(1),
                supplier_name: Some("Microsoft".to_string()),
                supplier_phone: Some("(360)514-1234".to_string()),
            }]
        );

        let outcome = repo.update(id, &ItemForm::new().quantity("0")).await.unwrap();
        assert_eq!(outcome, SaveOutcome::Saved(1));
        assert_eq!(repo.get(id).await.unwrap().unwrap().quantity, 0);

        assert_eq!(repo.delete(id).await.unwrap(), 1);
        assert!(query_one(&repo, id).await.is_empty());
        assert_eq!(repo.delete_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_applies_defaults_to_blank_fields() {
        let db = test_db().await;
        let repo = db.inventory();

        let form = ItemForm::new()
            .product_name("Notebook")
            .price("")
            .quantity("")
            .supplier_name("")
            .supplier_phone("");
        let id = create(&repo, &form).await;

        let item = repo.get(id).await.unwrap().unwrap();
        assert_eq!(item.product_name, "Notebook");
        assert_eq!(item.price, 0.0);
        assert_eq!(item.quantity, 0);
        assert_eq!(item.supplier_name, "Unknown Supplier");
        assert_eq!(item.supplier_phone, "Unknown Phone");
    }

    #[tokio::test]
    async fn test_create_accepts_partial_record() {
        let db = test_db().await;
        let repo = db.inventory();

        let id = create(&repo, &ItemForm::new().supplier_phone("555-0100")).await;

        let item = repo.get(id).await.unwrap().unwrap();
        assert_eq!(item.product_name, "");
        assert_eq!(item.supplier_phone, "555-0100");
        assert_eq!(item.supplier_name, "Unknown Supplier");
    }

    #[tokio::test]
    async fn test_blank_create_is_nothing_to_save() {
        let db = test_db().await;
        let repo = db.inventory();
        let mut changes = db.subscribe();

        let blank = ItemForm::new()
            .product_name("")
            .price(" ")
            .quantity("")
            .supplier_name("")
            .supplier_phone("");

        assert_eq!(repo.create(&blank).await.unwrap(), SaveOutcome::NothingToSave);
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(drain(&mut changes).is_empty());
    }

    #[tokio::test]
    async fn test_invalid_number_is_validation_failure() {
        let db = test_db().await;
        let repo = db.inventory();

        let err = repo
            .create(&ItemForm::new().product_name("Pen").price("cheap"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Validation(_)));
        assert!(!err.is_persistence_failure());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_negative_input_is_clamped() {
        let db = test_db().await;
        let repo = db.inventory();

        let id = create(
            &repo,
            &ItemForm::new().product_name("Ruler").price("-2").quantity("-5"),
        )
        .await;

        let item = repo.get(id).await.unwrap().unwrap();
        assert_eq!(item.price, 0.0);
        assert_eq!(item.quantity, 0);
    }

    #[tokio::test]
    async fn test_update_merges_over_previous_state() {
        let db = test_db().await;
        let repo = db.inventory();
        let id = create(&repo, &silver_pen_form()).await;

        let edit = ItemForm::new().product_name("Gold Pen").price("49.50");
        assert_eq!(repo.update(id, &edit).await.unwrap(), SaveOutcome::Saved(1));

        let item = repo.get(id).await.unwrap().unwrap();
        assert_eq!(item.product_name, "Gold Pen");
        assert_eq!(item.price, 49.5);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.supplier_name, "Microsoft");
        assert_eq!(item.supplier_phone, "(360)514-1234");
    }

    #[tokio::test]
    async fn test_full_edit_overwrites_every_field() {
        let db = test_db().await;
        let repo = db.inventory();
        let id = create(&repo, &silver_pen_form()).await;

        let edit = ItemForm::new()
            .product_name("Blue Pen")
            .price("")
            .quantity("12")
            .supplier_name("")
            .supplier_phone("");
        repo.update(id, &edit).await.unwrap();

        let item = repo.get(id).await.unwrap().unwrap();
        assert_eq!(item.product_name, "Blue Pen");
        assert_eq!(item.price, 0.0);
        assert_eq!(item.quantity, 12);
        assert_eq!(item.supplier_name, "Unknown Supplier");
        assert_eq!(item.supplier_phone, "Unknown Phone");
    }

    #[tokio::test]
    async fn test_edit_round_trip_through_form() {
        let db = test_db().await;
        let repo = db.inventory();
        let id = create(&repo, &silver_pen_form()).await;

        let before = repo.get(id).await.unwrap().unwrap();
        repo.update(id, &ItemForm::from(&before)).await.unwrap();

        assert_eq!(repo.get(id).await.unwrap().unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_missing_id_affects_nothing() {
        let db = test_db().await;
        let repo = db.inventory();

        let outcome = repo
            .update(ItemId(404), &ItemForm::new().quantity("3"))
            .await
            .unwrap();
        assert_eq!(outcome, SaveOutcome::Saved(0));
    }

    #[tokio::test]
    async fn test_blank_update_is_nothing_to_save() {
        let db = test_db().await;
        let repo = db.inventory();
        let id = create(&repo, &silver_pen_form()).await;

        let outcome = repo.update(id, &ItemForm::new().price("")).await.unwrap();
        assert_eq!(outcome, SaveOutcome::NothingToSave);
        assert_eq!(repo.get(id).await.unwrap().unwrap().price, 19.95);
    }

    #[tokio::test]
    async fn test_delete_missing_id_returns_zero() {
        let db = test_db().await;
        let repo = db.inventory();

        assert_eq!(repo.delete(ItemId(1)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_all_returns_count() {
        let db = test_db().await;
        let repo = db.inventory();
        for name in ["A", "B", "C"] {
            create(&repo, &ItemForm::new().product_name(name)).await;
        }

        assert_eq!(repo.delete_all().await.unwrap(), 3);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let db = test_db().await;
        let repo = db.inventory();

        let first = create(&repo, &ItemForm::new().product_name("First")).await;
        repo.delete(first).await.unwrap();
        let second = create(&repo, &ItemForm::new().product_name("Second")).await;

        assert!(second > first);
    }

    #[tokio::test]
    async fn test_sale_decrements_and_stops_at_zero() {
        let db = test_db().await;
        let repo = db.inventory();
        let id = create(&repo, &ItemForm::new().product_name("Pencil").quantity("2")).await;

        assert_eq!(repo.record_sale(id).await.unwrap(), 1);
        assert_eq!(repo.get(id).await.unwrap().unwrap().quantity, 1);

        for _ in 0..3 {
            repo.record_sale(id).await.unwrap();
            assert_eq!(repo.get(id).await.unwrap().unwrap().quantity, 0);
        }
    }

    #[tokio::test]
    async fn test_sale_on_missing_item() {
        let db = test_db().await;
        assert_eq!(db.inventory().record_sale(ItemId(9)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_restock() {
        let db = test_db().await;
        let repo = db.inventory();
        let id = create(&repo, &ItemForm::new().product_name("Tape")).await;

        assert_eq!(repo.restock(id, 5).await.unwrap(), 1);
        assert_eq!(repo.get(id).await.unwrap().unwrap().quantity, 5);
        assert_eq!(repo.restock(ItemId(999), 1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_query_collection_in_id_order_with_projection() {
        let db = test_db().await;
        let repo = db.inventory();
        let a = create(&repo, &ItemForm::new().product_name("Zebra Clip").quantity("4")).await;
        let b = create(&repo, &ItemForm::new().product_name("Apple Clip").quantity("2")).await;

        let rows: Vec<ItemRow> = repo
            .query(
                ItemUri::Collection,
                Projection::of([Column::ProductName, Column::Quantity]),
            )
            .try_collect()
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, a);
        assert_eq!(rows[1].id, b);
        assert_eq!(rows[0].product_name.as_deref(), Some("Zebra Clip"));
        assert_eq!(rows[1].quantity, Some(2));
        assert_eq!(rows[0].price, None);
        assert_eq!(rows[0].supplier_name, None);
    }

    #[tokio::test]
    async fn test_fetch_by_uri() {
        let db = test_db().await;
        let repo = db.inventory();
        let id = create(&repo, &silver_pen_form()).await;
        create(&repo, &ItemForm::new().product_name("Other")).await;

        assert_eq!(repo.fetch(ItemUri::Collection).await.unwrap().len(), 2);
        assert_eq!(repo.fetch(ItemUri::Item(id)).await.unwrap().len(), 1);
        assert!(repo.fetch(ItemUri::Item(ItemId(77))).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mutations_emit_change_signals() {
        let db = test_db().await;
        let repo = db.inventory();
        let mut changes = db.subscribe();

        let id = create(&repo, &silver_pen_form()).await;
        repo.record_sale(id).await.unwrap();
        repo.update(ItemId(500), &ItemForm::new().quantity("1")).await.unwrap();
        repo.delete(ItemId(500)).await.unwrap();
        repo.delete(id).await.unwrap();
        repo.delete_all().await.unwrap();
        create(&repo, &ItemForm::new().product_name("Last")).await;
        repo.delete_all().await.unwrap();

        let kinds: Vec<_> = drain(&mut changes).into_iter().map(|(kind, _)| kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChangeKind::Created,
                ChangeKind::Updated,
                ChangeKind::Deleted,
                ChangeKind::Created,
                ChangeKind::Cleared,
            ]
        );
    }

    #[tokio::test]
    async fn test_closed_pool_is_persistence_failure() {
        let db = test_db().await;
        let repo = db.inventory();
        db.close().await;

        let err = repo.create(&silver_pen_form()).await.unwrap_err();
        assert!(err.is_persistence_failure());
    }

    #[tokio::test]
    async fn test_insert_clamps_negative_values() {
        let db = test_db().await;
        let repo = db.inventory();

        let item = NewItem {
            product_name: "Refund Slip".to_string(),
            price: -5.0,
            quantity: -3,
            supplier_name: "Microsoft".to_string(),
            supplier_phone: "(360)514-1234".to_string(),
        };
        let id = repo.insert(&item).await.unwrap();

        let stored = repo.get(id).await.unwrap().unwrap();
        assert_eq!(stored.price, 0.0);
        assert_eq!(stored.quantity, 0);
    }

    #[tokio::test]
    async fn test_non_finite_price_is_validation_failure() {
        let db = test_db().await;
        let repo = db.inventory();

        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let item = ItemValues {
                product_name: Some("Broken".to_string()),
                price: Some(price),
                ..ItemValues::default()
            }
            .into_new_item();

            let err = repo.insert(&item).await.unwrap_err();
            assert!(matches!(err, DbError::Validation(_)), "{price}: {err:?}");
        }
        assert_eq!(repo.count().await.unwrap(), 0);

        let id = create(&repo, &silver_pen_form()).await;
        let err = repo
            .apply(
                id,
                &ItemValues {
                    price: Some(f64::NAN),
                    ..ItemValues::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(repo.get(id).await.unwrap().unwrap().price, 19.95);
    }

    #[tokio::test]
    async fn test_text_in_numeric_columns_reads_as_number() {
        let db = test_db().await;
        let repo = db.inventory();

        // Earlier builds stored the raw field text, blank included
        sqlx::query(
            "INSERT INTO inventory (product_name, product_price, product_quantity) \
             VALUES ('Blank Qty', '', ''), ('Text Qty', '4.5', '7')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let items = repo.list().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!((items[0].price, items[0].quantity), (0.0, 0));
        assert_eq!((items[1].price, items[1].quantity), (4.5, 7));

        let rows: Vec<ItemRow> = repo
            .query(ItemUri::Collection, Projection::all())
            .try_collect()
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(repo.record_sale(items[0].id).await.unwrap(), 1);
        assert_eq!(repo.get(items[0].id).await.unwrap().unwrap().quantity, 0);
        assert_eq!(repo.record_sale(items[1].id).await.unwrap(), 1);
        assert_eq!(repo.get(items[1].id).await.unwrap().unwrap().quantity, 6);
    }

    #[test]
    fn test_sql_uses_contract_identifiers() {
        use inventory_core::contract::{
            DATABASE_VERSION, DEFAULT_SUPPLIER_NAME, DEFAULT_SUPPLIER_PHONE, TABLE_NAME,
        };

        let schema = include_str!("../../../../migrations/sqlite/001_create_inventory.sql");

        for sql in [SELECT_ALL, SELECT_ONE] {
            assert!(sql.contains(&format!("FROM {}", TABLE_NAME)));
            assert!(sql.contains(&format!("'{}'", DEFAULT_SUPPLIER_NAME)));
            assert!(sql.contains(&format!("'{}'", DEFAULT_SUPPLIER_PHONE)));
            for column in Column::ALL {
                let name = column.name();
                assert!(
                    sql.contains(&format!("AS {}", name)) || sql.contains(&format!("{},", name)),
                    "{column} missing from select"
                );
            }
        }

        assert!(INSERT.contains(&format!("INSERT INTO {}", TABLE_NAME)));
        assert!(UPDATE.contains(&format!("UPDATE {}", TABLE_NAME)));
        for column in &Column::ALL[1..] {
            assert!(INSERT.contains(column.name()), "{column} missing from insert");
            assert!(
                UPDATE.contains(&format!("{0} = COALESCE(", column.name())),
                "{column} missing from update"
            );
        }

        assert!(schema.contains(&format!("CREATE TABLE IF NOT EXISTS {}", TABLE_NAME)));
        assert!(schema.contains(&format!("DEFAULT '{}'", DEFAULT_SUPPLIER_NAME)));
        assert!(schema.contains(&format!("DEFAULT '{}'", DEFAULT_SUPPLIER_PHONE)));
        assert!(schema.contains(&format!("PRAGMA user_version = {};", DATABASE_VERSION)));
        for column in Column::ALL {
            assert!(
                schema.contains(&format!("    {} ", column.name())),
                "{column} missing from schema"
            );
        }
    }
}
