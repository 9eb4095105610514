use anyhow::{Context, Result};
use gcloud_gax::grpc::Code;
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::client::{Client, ClientConfig};
use gcloud_spanner::mutation::{insert_or_update, update};
use gcloud_spanner::row::Row;
use gcloud_spanner::statement::Statement;
use std::sync::Arc;

use crate::config::Config;
use crate::models::Customer;

/// Shareable store client for use across async handlers.
///
/// Wraps a Spanner connection and the configured table name; every operation
/// addresses that one table by its primary key `id`.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<Client>,
    table: String,
}

impl StoreClient {
    /// Create a new store client from configuration.
    ///
    /// The gcloud-spanner library automatically detects the
    /// SPANNER_EMULATOR_HOST environment variable and connects to the
    /// emulator when set, or production Spanner otherwise.
    ///
    /// Also performs auto-provisioning: the instance, database, and
    /// customers table are created if they don't exist.
    pub async fn from_config(config: &Config) -> Result<Self> {
        auto_provision(config).await?;

        let database_path = format!(
            "projects/{}/instances/{}/databases/{}",
            config.spanner_project, config.spanner_instance, config.spanner_database
        );

        if let Some(host) = &config.spanner_emulator_host {
            tracing::info!("Connecting to Spanner emulator at: {}", host);
        } else {
            tracing::info!("Connecting to production Spanner");
        }

        // ClientConfig::default() automatically uses SPANNER_EMULATOR_HOST if set
        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
            table: config.customers_table.clone(),
        })
    }

    /// Write a full customer record, unconditionally overwriting any
    /// existing record with the same id.
    ///
    /// # Errors
    /// Returns an error if the Spanner operation fails
    pub async fn put(&self, customer: &Customer) -> Result<()> {
        let mutation = insert_or_update(
            &self.table,
            &["id", "first_name", "last_name", "created_at", "updated_at"],
            &[
                &customer.id,
                &customer.first_name,
                &customer.last_name,
                &customer.created_at,
                &customer.updated_at,
            ],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to write customer to store")?;

        tracing::debug!("Stored customer with id: {}", customer.id);
        Ok(())
    }

    /// Read a single customer record by id.
    ///
    /// # Returns
    /// * `Ok(Some(customer))` - Record found and returned
    /// * `Ok(None)` - Record not found
    /// * `Err(_)` - Store operation failed
    pub async fn read(&self, id: &str) -> Result<Option<Customer>> {
        let mut statement = Statement::new(format!(
            "SELECT id, first_name, last_name, created_at, updated_at \
             FROM {} WHERE id = @id",
            self.table
        ));
        statement.add_param("id", &id.to_string());

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query customer from store")?;

        if let Some(row) = result_set.next().await? {
            let customer = customer_from_row(&row)?;
            tracing::debug!("Read customer with id: {}", id);
            Ok(Some(customer))
        } else {
            tracing::debug!("Customer not found with id: {}", id);
            Ok(None)
        }
    }

    /// Full unbounded scan of the customers table.
    ///
    /// Returns every stored record in whatever order the store yields them;
    /// no ordering is part of the contract. There is no pagination, so this
    /// reads the whole table in one pass.
    ///
    /// # Errors
    /// Returns an error if the Spanner query fails
    pub async fn scan_all(&self) -> Result<Vec<Customer>> {
        let statement = Statement::new(format!(
            "SELECT id, first_name, last_name, created_at, updated_at FROM {}",
            self.table
        ));

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction for scan")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to scan customers from store")?;

        let mut customers = Vec::new();
        while let Some(row) = result_set.next().await? {
            customers.push(customer_from_row(&row)?);
        }

        tracing::debug!("Scanned {} customers", customers.len());
        Ok(customers)
    }

    /// Merge-update an existing customer: set exactly `first_name`,
    /// `last_name`, and `updated_at`, leaving `id` and `created_at`
    /// untouched by omission from the mutation.
    ///
    /// Existence is checked first so a merge against an unknown id never
    /// silently upserts a partial record.
    ///
    /// # Returns
    /// * `Ok(Some(customer))` - The full post-update record
    /// * `Ok(None)` - No record with this id exists; nothing was written
    /// * `Err(_)` - Store operation failed
    pub async fn merge_update(
        &self,
        id: &str,
        first_name: &str,
        last_name: &str,
        updated_at: &str,
    ) -> Result<Option<Customer>> {
        if self.read(id).await?.is_none() {
            return Ok(None);
        }

        let mutation = update(
            &self.table,
            &["id", "first_name", "last_name", "updated_at"],
            &[
                &id.to_string(),
                &first_name.to_string(),
                &last_name.to_string(),
                &updated_at.to_string(),
            ],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to update customer in store")?;

        tracing::debug!("Updated customer with id: {}", id);

        // Read back the post-update state for the response
        let customer = self
            .read(id)
            .await?
            .context("Customer disappeared between update and read-back")?;

        Ok(Some(customer))
    }

    /// Perform a health check by executing a simple query.
    ///
    /// # Returns
    /// * `Ok(())` - Database is reachable and responsive
    /// * `Err(_)` - Database connection failed or query failed
    pub async fn health_check(&self) -> Result<()> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create health check transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute health check query")?;

        if result_set.next().await?.is_some() {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned no results"))
        }
    }
}

fn customer_from_row(row: &Row) -> Result<Customer> {
    Ok(Customer {
        id: row.column_by_name("id")?,
        first_name: row.column_by_name("first_name")?,
        last_name: row.column_by_name("last_name")?,
        created_at: row.column_by_name("created_at")?,
        updated_at: row.column_by_name("updated_at")?,
    })
}

/// Automatically provision the Spanner instance, database, and table.
///
/// Checks if the configured resources exist and creates them if needed,
/// enabling zero-setup local development with the emulator.
async fn auto_provision(config: &Config) -> Result<()> {
    tracing::info!("Starting auto-provisioning checks...");

    let admin_client = AdminClient::new(AdminClientConfig::default())
        .await
        .context("Failed to create Spanner admin client")?;

    let project_path = format!("projects/{}", config.spanner_project);
    let instance_path = format!("{}/instances/{}", project_path, config.spanner_instance);
    let database_path = format!("{}/databases/{}", instance_path, config.spanner_database);

    ensure_instance_exists(&admin_client, config, &project_path, &instance_path).await?;
    ensure_database_exists(&admin_client, &instance_path, &database_path).await?;
    ensure_table_exists(&admin_client, &database_path, &config.customers_table).await?;

    tracing::info!("Auto-provisioning complete");
    Ok(())
}

/// Ensure the Spanner instance exists, creating it if necessary
async fn ensure_instance_exists(
    admin_client: &AdminClient,
    config: &Config,
    project_path: &str,
    instance_path: &str,
) -> Result<()> {
    let get_request = GetInstanceRequest {
        name: instance_path.to_string(),
        field_mask: None,
    };

    match admin_client.instance().get_instance(get_request, None).await {
        Ok(_) => {
            tracing::info!("Instance already exists: {}", instance_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Instance not found, creating: {}", instance_path);

            let instance_config = if config.spanner_emulator_host.is_some() {
                format!("{}/instanceConfigs/emulator-config", project_path)
            } else {
                format!("{}/instanceConfigs/regional-us-central1", project_path)
            };

            let create_request = CreateInstanceRequest {
                parent: project_path.to_string(),
                instance_id: config.spanner_instance.clone(),
                instance: Some(Instance {
                    name: instance_path.to_string(),
                    config: instance_config,
                    display_name: format!("{} instance", config.spanner_instance),
                    node_count: 1,
                    ..Default::default()
                }),
            };

            let mut operation = admin_client
                .instance()
                .create_instance(create_request, None)
                .await
                .context("Failed to start instance creation")?;

            operation
                .wait(None)
                .await
                .context("Failed to create instance")?;

            tracing::info!("Instance created successfully: {}", instance_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check instance existence: {}",
            e.message()
        )),
    }
}

/// Ensure the Spanner database exists, creating it if necessary
async fn ensure_database_exists(
    admin_client: &AdminClient,
    instance_path: &str,
    database_path: &str,
) -> Result<()> {
    let get_request = GetDatabaseRequest {
        name: database_path.to_string(),
    };

    match admin_client
        .database()
        .get_database(get_request, None)
        .await
    {
        Ok(_) => {
            tracing::info!("Database already exists: {}", database_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Database not found, creating: {}", database_path);

            let database_id = database_path
                .split('/')
                .next_back()
                .context("Invalid database path")?;

            let create_request = CreateDatabaseRequest {
                parent: instance_path.to_string(),
                create_statement: format!("CREATE DATABASE `{}`", database_id),
                extra_statements: vec![],
                encryption_config: None,
                database_dialect: 1, // Google Standard SQL
                proto_descriptors: vec![],
            };

            let mut operation = admin_client
                .database()
                .create_database(create_request, None)
                .await
                .context("Failed to start database creation")?;

            operation
                .wait(None)
                .await
                .context("Failed to create database")?;

            tracing::info!("Database created successfully: {}", database_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check database existence: {}",
            e.message()
        )),
    }
}

/// Ensure the customers table exists, creating it if necessary
async fn ensure_table_exists(
    admin_client: &AdminClient,
    database_path: &str,
    table: &str,
) -> Result<()> {
    let get_ddl_request = GetDatabaseDdlRequest {
        database: database_path.to_string(),
    };

    let ddl_response = admin_client
        .database()
        .get_database_ddl(get_ddl_request, None)
        .await
        .context("Failed to get database DDL")?;

    let table_exists = ddl_response.into_inner().statements.iter().any(|stmt| {
        stmt.contains(&format!("CREATE TABLE {}", table))
            || stmt.contains(&format!("CREATE TABLE `{}`", table))
    });

    if table_exists {
        tracing::info!("Table '{}' already exists", table);
        Ok(())
    } else {
        tracing::info!("Table '{}' not found, creating...", table);

        // Timestamps are stored as strings of fractional epoch seconds,
        // matching the record's wire encoding exactly.
        let create_table_ddl = format!(
            "CREATE TABLE {} (
    id STRING(36) NOT NULL,
    first_name STRING(MAX) NOT NULL,
    last_name STRING(MAX) NOT NULL,
    created_at STRING(32) NOT NULL,
    updated_at STRING(32) NOT NULL,
) PRIMARY KEY (id)",
            table
        );

        let update_request = UpdateDatabaseDdlRequest {
            database: database_path.to_string(),
            statements: vec![create_table_ddl],
            operation_id: String::new(),
            proto_descriptors: vec![],
            throughput_mode: false,
        };

        let mut operation = admin_client
            .database()
            .update_database_ddl(update_request, None)
            .await
            .context("Failed to start table creation")?;

        operation
            .wait(None)
            .await
            .context("Failed to create table")?;

        tracing::info!("Table '{}' created successfully", table);
        Ok(())
    }
}
