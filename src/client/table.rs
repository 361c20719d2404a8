//! Table handle

use super::base::{Base, ListRowsOptions};
use crate::envelope::AddRowResponse;
use crate::error::Result;
use crate::schema::RowSchema;
use crate::types::{RowAnchor, RowUpdate};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// One table of a [`Base`], so calls don't repeat the table name
#[derive(Debug, Clone)]
pub struct Table<'a> {
    base: &'a Base,
    name: String,
}

impl<'a> Table<'a> {
    pub fn new(base: &'a Base, name: impl Into<String>) -> Self {
        Self {
            base,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> &'a Base {
        self.base
    }

    pub async fn get_row<T: DeserializeOwned>(
        &self,
        row_id: &str,
        row_schema: &RowSchema,
        convert_keys: Option<bool>,
    ) -> Result<T> {
        self.base
            .get_row(&self.name, row_id, row_schema, convert_keys)
            .await
    }

    pub async fn get_rows<T: DeserializeOwned>(
        &self,
        row_schema: &RowSchema,
        options: &ListRowsOptions,
    ) -> Result<Vec<T>> {
        self.base.get_rows(&self.name, row_schema, options).await
    }

    pub async fn add_row<R: Serialize>(
        &self,
        row: &R,
        anchor: Option<&RowAnchor>,
    ) -> Result<AddRowResponse> {
        self.base.add_row(&self.name, row, anchor).await
    }

    pub async fn add_rows<R: Serialize>(&self, rows: &[R]) -> Result<u64> {
        self.base.add_rows(&self.name, rows).await
    }

    pub async fn update_row<R: Serialize>(&self, row_id: &str, row: &R) -> Result<()> {
        self.base.update_row(&self.name, row_id, row).await
    }

    pub async fn update_rows<R: Serialize>(&self, updates: &[RowUpdate<R>]) -> Result<()> {
        self.base.update_rows(&self.name, updates).await
    }

    pub async fn delete_row(&self, row_id: &str) -> Result<()> {
        self.base.delete_row(&self.name, row_id).await
    }

    pub async fn delete_rows<S: AsRef<str>>(&self, row_ids: &[S]) -> Result<()> {
        self.base.delete_rows(&self.name, row_ids).await
    }
}
