use api_types::QueryParams;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel};

use crate::{Catalog, EngineError, FailurePolicy, ResultEngine, endpoints};

mod balances;
mod metadata;
mod periods;
mod store;

pub use metadata::RefreshSummary;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Rows per `INSERT` statement when replacing a cached table.
const INSERT_CHUNK: usize = 500;

/// Balance retrieval over the metadata store, the ledger catalog and a remote
/// item source.
#[derive(Debug)]
pub struct Engine<C> {
    database: DatabaseConnection,
    client: C,
    catalog: Catalog,
    failure_policy: FailurePolicy,
    balances_template: QueryParams,
}

impl<C> Engine<C> {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder<C> {
        EngineBuilder::default()
    }
}

/// Insert `models` in chunks of [`INSERT_CHUNK`] rows.
async fn insert_chunked<A, D>(db: &D, models: Vec<A>) -> ResultEngine<usize>
where
    A: ActiveModelTrait + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    D: ConnectionTrait,
{
    let total = models.len();
    let mut models = models.into_iter();
    loop {
        let chunk: Vec<A> = models.by_ref().take(INSERT_CHUNK).collect();
        if chunk.is_empty() {
            break;
        }
        <A::Entity as EntityTrait>::insert_many(chunk)
            .exec_without_returning(db)
            .await?;
    }
    Ok(total)
}

/// The builder for `Engine`
pub struct EngineBuilder<C> {
    database: DatabaseConnection,
    client: Option<C>,
    catalog: Catalog,
    failure_policy: FailurePolicy,
    balances_template: QueryParams,
}

impl<C> Default for EngineBuilder<C> {
    fn default() -> Self {
        Self {
            database: DatabaseConnection::default(),
            client: None,
            catalog: Catalog::default(),
            failure_policy: FailurePolicy::default(),
            balances_template: endpoints::balances_template(),
        }
    }
}

impl<C> EngineBuilder<C> {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder<C> {
        self.database = db;
        self
    }

    /// Pass the required remote item source
    pub fn client(mut self, client: C) -> EngineBuilder<C> {
        self.client = Some(client);
        self
    }

    pub fn catalog(mut self, catalog: Catalog) -> EngineBuilder<C> {
        self.catalog = catalog;
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> EngineBuilder<C> {
        self.failure_policy = policy;
        self
    }

    /// Replace the default balance query template.
    pub fn balances_template(mut self, template: QueryParams) -> EngineBuilder<C> {
        self.balances_template = template;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine<C>> {
        let client = self
            .client
            .ok_or_else(|| EngineError::InvalidInput("engine requires a client".to_string()))?;
        if self.catalog.is_empty() {
            tracing::warn!("ledger catalog is empty, no ledger can be queried");
        }
        Ok(Engine {
            database: self.database,
            client,
            catalog: self.catalog,
            failure_policy: self.failure_policy,
            balances_template: self.balances_template,
        })
    }
}
