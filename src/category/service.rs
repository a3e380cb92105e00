//! Reads and writes categories in the `category_c` table.

use std::sync::Arc;

use axum::extract::FromRef;
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    category::core::{Category, CategoryData, CategoryType, DEFAULT_COLOR, DEFAULT_ICON},
    records::{
        FetchParams, Filter, OrderBy, Record, RecordId, RecordStore, ensure_all_succeeded,
        into_stored_record, map_listing, record_id, record_text, record_text_or, select,
        to_record,
    },
};

const TABLE: &str = "category_c";

const FIELDS: [&str; 4] = ["name_c", "type_c", "color_c", "icon_c"];

/// The category operations the route handlers use.
#[derive(Debug, Clone)]
pub struct CategoryService {
    store: Arc<dyn RecordStore>,
}

impl FromRef<AppState> for CategoryService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.record_store.clone())
    }
}

impl CategoryService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Every category, sorted by name.
    pub async fn get_all(&self) -> Result<Vec<Category>, Error> {
        self.fetch(FetchParams::new(select(&FIELDS))).await
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<Category, Error> {
        let params = FetchParams::new(select(&FIELDS));
        let record = self.store.get_record_by_id(TABLE, id, &params).await?;

        map_record_to_category(&record)
    }

    /// The categories of one type, sorted by name.
    pub async fn get_by_type(&self, category_type: CategoryType) -> Result<Vec<Category>, Error> {
        let params = FetchParams::new(select(&FIELDS))
            .filter(Filter::equal_to("type_c", category_type.as_str()));

        self.fetch(params).await
    }

    pub async fn get_income_categories(&self) -> Result<Vec<Category>, Error> {
        self.get_by_type(CategoryType::Income).await
    }

    pub async fn get_expense_categories(&self) -> Result<Vec<Category>, Error> {
        self.get_by_type(CategoryType::Expense).await
    }

    /// Create a category, filling in the default colour and icon when they are not given.
    pub async fn create(&self, category: &CategoryData) -> Result<Category, Error> {
        let record = to_record(json!({
            "Name": display_name(category),
            "name_c": category.name,
            "type_c": category.category_type.as_str(),
            "color_c": category.color.as_deref().unwrap_or(DEFAULT_COLOR),
            "icon_c": category.icon.as_deref().unwrap_or(DEFAULT_ICON),
        }));

        let results = self.store.create_records(TABLE, vec![record]).await?;

        map_record_to_category(&into_stored_record(results)?)
    }

    /// Update the category `id`. A missing colour or icon keeps the stored value.
    pub async fn update(&self, id: RecordId, category: &CategoryData) -> Result<Category, Error> {
        let mut record = to_record(json!({
            "Id": id,
            "Name": display_name(category),
            "name_c": category.name,
            "type_c": category.category_type.as_str(),
        }));

        if let Some(color) = &category.color {
            record.insert("color_c".to_owned(), Value::from(color.as_str()));
        }

        if let Some(icon) = &category.icon {
            record.insert("icon_c".to_owned(), Value::from(icon.as_str()));
        }

        let results = self.store.update_records(TABLE, vec![record]).await?;

        map_record_to_category(&into_stored_record(results)?)
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), Error> {
        let results = self.store.delete_records(TABLE, &[id]).await?;

        ensure_all_succeeded(&results)
    }

    async fn fetch(&self, params: FetchParams) -> Result<Vec<Category>, Error> {
        let params = params.order_by(OrderBy::ascending("name_c"));

        let records = self.store.fetch_records(TABLE, &params).await?;

        Ok(map_listing(TABLE, &records, map_record_to_category))
    }
}

fn display_name(category: &CategoryData) -> &str {
    if category.name.is_empty() {
        "Untitled Category"
    } else {
        &category.name
    }
}

fn map_record_to_category(record: &Record) -> Result<Category, Error> {
    Ok(Category {
        id: record_id(record)?,
        name: record_text_or(record, "name_c", ""),
        category_type: record_text(record, "type_c")
            .and_then(|text| text.parse().ok())
            .unwrap_or(CategoryType::Expense),
        color: record_text_or(record, "color_c", DEFAULT_COLOR),
        icon: record_text_or(record, "icon_c", DEFAULT_ICON),
    })
}
