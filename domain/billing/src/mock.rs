use async_trait::async_trait;
use mockall::mock;

use crate::model::entity::{Category, Client, Consumption, Invoice, Resource};
use crate::repository::{
    CategoryRepo, ClientRepo, ConsumptionRepo, InvoiceRepo, ResourceRepo, StoreMaintenance,
};

mock! {
    pub ResourceRepo {}
    #[async_trait]
    impl ResourceRepo for ResourceRepo {
        async fn load_all(&self) -> anyhow::Result<Vec<Resource>>;
        async fn save(&self, resource: &Resource) -> anyhow::Result<()>;
        async fn replace_all(&self, resources: &[Resource]) -> anyhow::Result<()>;
    }
}

mock! {
    pub CategoryRepo {}
    #[async_trait]
    impl CategoryRepo for CategoryRepo {
        async fn load_all(&self) -> anyhow::Result<Vec<Category>>;
        async fn save(&self, category: &Category) -> anyhow::Result<()>;
        async fn replace_all(&self, categories: &[Category]) -> anyhow::Result<()>;
    }
}

mock! {
    pub ClientRepo {}
    #[async_trait]
    impl ClientRepo for ClientRepo {
        async fn load_all(&self) -> anyhow::Result<Vec<Client>>;
        async fn save(&self, client: &Client) -> anyhow::Result<()>;
        async fn replace_all(&self, clients: &[Client]) -> anyhow::Result<()>;
    }
}

mock! {
    pub ConsumptionRepo {}
    #[async_trait]
    impl ConsumptionRepo for ConsumptionRepo {
        async fn load_all(&self) -> anyhow::Result<Vec<Consumption>>;
        async fn append(&self, consumption: &Consumption) -> anyhow::Result<()>;
    }
}

mock! {
    pub InvoiceRepo {}
    #[async_trait]
    impl InvoiceRepo for InvoiceRepo {
        async fn load_all(&self) -> anyhow::Result<Vec<Invoice>>;
        async fn append(&self, invoice: &Invoice) -> anyhow::Result<()>;
    }
}

mock! {
    pub StoreMaintenance {}
    #[async_trait]
    impl StoreMaintenance for StoreMaintenance {
        async fn reset(&self) -> anyhow::Result<()>;
    }
}
