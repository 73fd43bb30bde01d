use std::sync::Arc;

use async_trait::async_trait;
use domain_billing::{
    repository::{CategoryRepo, ClientRepo, ResourceRepo},
    service::RatingService,
};
use rust_decimal::Decimal;
use tracing::warn;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct RatingServiceImpl {
    client_repo: Arc<dyn ClientRepo>,
    category_repo: Arc<dyn CategoryRepo>,
    resource_repo: Arc<dyn ResourceRepo>,
}

#[async_trait]
impl RatingService for RatingServiceImpl {
    async fn instance_cost(&self, instance_id: i64, hours: Decimal) -> anyhow::Result<Decimal> {
        let clients = self.client_repo.load_all().await?;
        // Duplicate ids should not exist but are not structurally ruled
        // out; the first match in iteration order wins.
        let Some(configuration_id) = clients
            .iter()
            .flat_map(|client| client.instances.iter())
            .find(|instance| instance.id == instance_id)
            .map(|instance| instance.configuration_id)
        else {
            warn!(instance_id, "rating: instance not found, cost is zero");
            return Ok(Decimal::ZERO);
        };

        let categories = self.category_repo.load_all().await?;
        // Configuration ids are matched across all categories, not scoped
        // to the owning one. Dubious but long-standing behavior; keep it
        // until product says otherwise.
        let Some(configuration) = categories
            .iter()
            .flat_map(|category| category.configurations.iter())
            .find(|configuration| configuration.id == configuration_id)
        else {
            warn!(configuration_id, "rating: configuration not found, cost is zero");
            return Ok(Decimal::ZERO);
        };
        if configuration.resources.is_empty() {
            warn!(
                configuration_id,
                "rating: configuration has no resource quantities"
            );
            return Ok(Decimal::ZERO);
        }

        let resources = self.resource_repo.load_all().await?;
        let mut total = Decimal::ZERO;
        for (resource_id, quantity) in &configuration.resources {
            // Unknown resource ids contribute zero, silently.
            if let Some(resource) = resources.iter().find(|r| r.id == *resource_id) {
                total += *quantity * resource.hourly_price * hours;
            }
        }
        Ok(total.round_dp(2))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::str::FromStr;

    use super::*;
    use domain_billing::mock::{MockCategoryRepo, MockClientRepo, MockResourceRepo};
    use domain_billing::model::entity::{Category, Client, Configuration, Instance, Resource};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn client_with_instance(instance_id: i64, configuration_id: i64) -> Client {
        Client {
            tax_id: "1234567-8".into(),
            name: "Acme".into(),
            username: "acme".into(),
            password: "secret".into(),
            address: "Main St".into(),
            email: "a@acme.io".into(),
            instances: vec![Instance {
                id: instance_id,
                configuration_id,
                name: "web".into(),
                started_at: "01/01/2024".into(),
                status: "running".into(),
                ended_at: None,
            }],
        }
    }

    fn category_with_configuration(
        configuration_id: i64,
        resources: BTreeMap<i64, Decimal>,
    ) -> Category {
        Category {
            id: 5,
            name: "General".into(),
            description: "general purpose".into(),
            workload: "web".into(),
            configurations: vec![Configuration {
                id: configuration_id,
                name: "small".into(),
                description: "small shape".into(),
                resources,
            }],
        }
    }

    fn resource(id: i64, price: Decimal) -> Resource {
        Resource {
            id,
            name: format!("resource-{id}"),
            abbreviation: format!("r{id}"),
            metric: "unit".into(),
            kind: "compute".into(),
            hourly_price: price,
        }
    }

    fn service(
        clients: Vec<Client>,
        categories: Vec<Category>,
        resources: Vec<Resource>,
    ) -> RatingServiceImpl {
        let mut client_repo = MockClientRepo::new();
        client_repo.expect_load_all().return_once(move || Ok(clients));
        let mut category_repo = MockCategoryRepo::new();
        category_repo.expect_load_all().returning(move || Ok(categories.clone()));
        let mut resource_repo = MockResourceRepo::new();
        resource_repo.expect_load_all().returning(move || Ok(resources.clone()));
        RatingServiceImpl::builder()
            .client_repo(Arc::new(client_repo))
            .category_repo(Arc::new(category_repo))
            .resource_repo(Arc::new(resource_repo))
            .build()
    }

    #[tokio::test]
    async fn three_units_at_two_fifty_for_four_hours_is_thirty() {
        let service = service(
            vec![client_with_instance(100, 10)],
            vec![category_with_configuration(10, BTreeMap::from([(1, dec("3"))]))],
            vec![resource(1, dec("2.50"))],
        );
        let cost = service.instance_cost(100, dec("4")).await.unwrap();
        assert_eq!(cost, dec("30.00"));
    }

    #[tokio::test]
    async fn unknown_instance_rates_to_zero() {
        let service = service(Vec::new(), Vec::new(), Vec::new());
        let cost = service.instance_cost(999, dec("4")).await.unwrap();
        assert_eq!(cost, Decimal::ZERO);
    }

    #[tokio::test]
    async fn unknown_configuration_rates_to_zero() {
        let service = service(vec![client_with_instance(100, 42)], Vec::new(), Vec::new());
        let cost = service.instance_cost(100, dec("4")).await.unwrap();
        assert_eq!(cost, Decimal::ZERO);
    }

    #[tokio::test]
    async fn empty_resource_map_rates_to_zero() {
        let service = service(
            vec![client_with_instance(100, 10)],
            vec![category_with_configuration(10, BTreeMap::new())],
            Vec::new(),
        );
        let cost = service.instance_cost(100, dec("4")).await.unwrap();
        assert_eq!(cost, Decimal::ZERO);
    }

    #[tokio::test]
    async fn missing_resource_reference_contributes_zero() {
        let service = service(
            vec![client_with_instance(100, 10)],
            vec![category_with_configuration(
                10,
                BTreeMap::from([(1, dec("3")), (2, dec("5"))]),
            )],
            vec![resource(1, dec("2.50"))],
        );
        // Resource 2 is unknown; only resource 1 contributes.
        let cost = service.instance_cost(100, dec("4")).await.unwrap();
        assert_eq!(cost, dec("30.00"));
    }

    #[tokio::test]
    async fn total_is_rounded_to_two_decimals() {
        let service = service(
            vec![client_with_instance(100, 10)],
            vec![category_with_configuration(10, BTreeMap::from([(1, dec("1"))]))],
            vec![resource(1, dec("0.333"))],
        );
        let cost = service.instance_cost(100, dec("1")).await.unwrap();
        assert_eq!(cost, dec("0.33"));
    }
}
