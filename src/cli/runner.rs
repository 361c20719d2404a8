//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::client::ListRowsOptions;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::schema::RowSchema;
use crate::types::{JsonValue, RowAnchor, RowInsertPosition};
use serde::Serialize;
use serde_json::json;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Query { sql, raw_keys } => self.query(sql, !*raw_keys).await,
            Commands::Rows {
                table,
                view,
                order_by,
                direction,
                start,
                limit,
            } => {
                let mut options = ListRowsOptions::new();
                options.view_name.clone_from(view);
                options.order_by.clone_from(order_by);
                options.direction = *direction;
                options.start = *start;
                options.limit = *limit;
                self.rows(table, &options).await
            }
            Commands::Row { table, id } => self.row(table, id).await,
            Commands::AddRow {
                table,
                json,
                anchor,
                position,
            } => self.add_row(table, json, anchor.as_deref(), *position).await,
            Commands::DeleteRow { table, id } => self.delete_row(table, id).await,
            Commands::User { id } => self.user(id).await,
            Commands::Serve { port } => crate::cli::serve(*port).await,
        }
    }

    /// Load the config file, or the environment when no file is given
    fn load_config(&self) -> Result<ClientConfig> {
        match &self.cli.config {
            Some(path) => ClientConfig::load(path),
            None => ClientConfig::from_env(),
        }
    }

    async fn query(&self, sql: &str, convert_keys: bool) -> Result<()> {
        let base = self.load_config()?.base()?;
        let rows: Vec<JsonValue> = base
            .query_with(sql, &RowSchema::for_query(), convert_keys)
            .await?;
        print_json(&rows)
    }

    async fn rows(&self, table: &str, options: &ListRowsOptions) -> Result<()> {
        let base = self.load_config()?.base()?;
        let rows: Vec<JsonValue> = base
            .get_rows(table, &RowSchema::for_rows(), options)
            .await?;
        print_json(&rows)
    }

    async fn row(&self, table: &str, id: &str) -> Result<()> {
        let base = self.load_config()?.base()?;
        let row: JsonValue = base
            .get_row(table, id, &RowSchema::for_rows(), None)
            .await?;
        print_json(&row)
    }

    async fn add_row(
        &self,
        table: &str,
        row_json: &str,
        anchor: Option<&str>,
        position: RowInsertPosition,
    ) -> Result<()> {
        let row = parse_row_json(row_json)?;
        let anchor = anchor.map(|row_id| RowAnchor {
            row_id: row_id.to_string(),
            position,
        });

        let base = self.load_config()?.base()?;
        let created = base.add_row(table, &row, anchor.as_ref()).await?;
        print_json(&created)
    }

    async fn delete_row(&self, table: &str, id: &str) -> Result<()> {
        let base = self.load_config()?.base()?;
        base.delete_row(table, id).await?;
        print_json(&json!({ "deleted": id }))
    }

    async fn user(&self, id: &str) -> Result<()> {
        let admin = self.load_config()?.admin().await?;
        let user = admin.get_user(id).await?;
        print_json(&user)
    }
}

/// Parse a row given on the command line; it must be a JSON object
fn parse_row_json(input: &str) -> Result<JsonValue> {
    let value: JsonValue =
        serde_json::from_str(input).map_err(|e| anyhow::anyhow!("Invalid row JSON: {e}"))?;
    if !value.is_object() {
        return Err(Error::config("Row JSON must be an object"));
    }
    Ok(value)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
