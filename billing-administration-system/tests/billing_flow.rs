use std::str::FromStr;

use billing_administration_system::api::{
    NewCategory, NewClient, NewConfiguration, NewResource, SalesAnalysisKind,
};
use billing_administration_system::infrastructure::config::AppConfig;
use billing_administration_system::infrastructure::telemetry::TelemetryConfig;
use billing_administration_system::BillingAdmin;
use domain_billing::exception::BillingException;
use rust_decimal::Decimal;
use tempfile::TempDir;

fn admin(dir: &TempDir) -> BillingAdmin {
    BillingAdmin::new(&AppConfig {
        data_dir: dir.path().to_path_buf(),
        telemetry: TelemetryConfig::default(),
    })
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

const CONFIG_SNAPSHOT: &str = r#"{
    "resources": [
        {"id": 1, "name": "CPU", "abbreviation": "cpu", "metric": "core",
         "kind": "compute", "hourly_price": "2.50"}
    ],
    "categories": [
        {"id": 5, "name": "General purpose", "description": "balanced",
         "workload": "web",
         "configurations": [
            {"id": 10, "name": "small", "description": "entry tier",
             "resources": {"1": "3"}}
         ]}
    ],
    "clients": [
        {"tax_id": "1234567-8", "name": "Acme", "username": "acme",
         "password": "secret", "address": "Main St", "email": "ops@acme.io",
         "instances": [
            {"id": 100, "configuration_id": 10, "name": "web-1",
             "started_at": "01/01/2024", "status": "running"}
         ]}
    ]
}"#;

fn consumption_snapshot(hours: &str) -> String {
    format!(
        r#"{{"consumptions": [
            {{"client_tax_id": "1234567-8", "instance_id": 100,
              "hours": "{hours}", "recorded_at": "15/01/2024 10:00"}}
        ]}}"#
    )
}

#[tokio::test]
async fn end_to_end_run_bills_three_units_at_two_fifty_for_four_hours() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);

    let outcome = admin.ingest_configuration(CONFIG_SNAPSHOT).await;
    assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
    assert_eq!(outcome.resources_created, 1);
    assert_eq!(outcome.categories_created, 1);
    assert_eq!(outcome.clients_created, 1);
    assert_eq!(outcome.instances_created, 1);

    let outcome = admin.ingest_consumption(&consumption_snapshot("4")).await;
    assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
    assert_eq!(outcome.consumptions_processed, 1);

    let run = admin.generate_invoices("2024-01-01", "2024-01-31").await.unwrap();
    assert_eq!(run.invoices_generated, 1);
    assert_eq!(run.details[0].total, dec("30.00"));
    assert!(run.details[0].number.starts_with("INV-"));
    assert!(run.details[0].number.ends_with("-1234"));

    let invoices = admin.query_invoices().await.unwrap();
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0].total, dec("30.00"));
    assert_eq!(invoices[0].issued_at, "31/01/2024");
    assert_eq!(invoices[0].details.len(), 1);
    assert_eq!(invoices[0].details[0].instance_id, 100);
    assert_eq!(invoices[0].details[0].hours, dec("4"));
}

#[tokio::test]
async fn hours_for_the_same_instance_are_summed_before_rating() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);
    admin.ingest_configuration(CONFIG_SNAPSHOT).await;
    admin.ingest_consumption(&consumption_snapshot("4")).await;
    admin.ingest_consumption(&consumption_snapshot("2")).await;

    let run = admin.generate_invoices("2024-01-01", "2024-01-31").await.unwrap();
    assert_eq!(run.invoices_generated, 1);
    // 6 hours of 3 units at 2.50
    assert_eq!(run.details[0].total, dec("45.00"));
    let invoices = admin.query_invoices().await.unwrap();
    assert_eq!(invoices[0].details.len(), 1);
    assert_eq!(invoices[0].details[0].hours, dec("6"));
}

#[tokio::test]
async fn added_consumption_never_decreases_the_billed_amount() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);
    admin.ingest_configuration(CONFIG_SNAPSHOT).await;
    admin.ingest_consumption(&consumption_snapshot("4")).await;

    let first = admin.generate_invoices("2024-01-01", "2024-01-31").await.unwrap();
    admin.ingest_consumption(&consumption_snapshot("2")).await;
    let second = admin.generate_invoices("2024-02-01", "2024-02-29").await.unwrap();

    assert_eq!(first.details[0].total, dec("30.00"));
    assert_eq!(second.details[0].total, dec("45.00"));
    assert!(second.details[0].total >= first.details[0].total);
}

#[tokio::test]
async fn reingesting_the_same_snapshot_does_not_duplicate_entities() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);
    admin.ingest_configuration(CONFIG_SNAPSHOT).await;
    admin.ingest_configuration(CONFIG_SNAPSHOT).await;

    assert_eq!(admin.query_resources().await.unwrap().len(), 1);
    assert_eq!(admin.query_categories().await.unwrap().len(), 1);
    let clients = admin.query_clients().await.unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].instances.len(), 1);
}

#[tokio::test]
async fn partial_snapshot_leaves_absent_collections_untouched() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);
    admin.ingest_configuration(CONFIG_SNAPSHOT).await;

    let resources_only = r#"{"resources": [
        {"id": 2, "name": "RAM", "abbreviation": "ram", "metric": "GiB",
         "kind": "memory", "hourly_price": "0.75"}
    ]}"#;
    let outcome = admin.ingest_configuration(resources_only).await;
    assert!(outcome.errors.is_empty());

    assert_eq!(admin.query_resources().await.unwrap().len(), 2);
    assert_eq!(admin.query_categories().await.unwrap().len(), 1);
    assert_eq!(admin.query_clients().await.unwrap().len(), 1);
}

#[tokio::test]
async fn zero_total_runs_persist_no_invoice() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);
    admin.ingest_configuration(CONFIG_SNAPSHOT).await;
    admin.ingest_consumption(&consumption_snapshot("0")).await;

    let run = admin.generate_invoices("2024-01-01", "2024-01-31").await.unwrap();
    assert_eq!(run.invoices_generated, 0);
    assert!(admin.query_invoices().await.unwrap().is_empty());
}

#[tokio::test]
async fn consumption_for_an_unknown_client_produces_no_invoice() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);
    admin.ingest_configuration(CONFIG_SNAPSHOT).await;

    let stray = r#"{"consumptions": [
        {"client_tax_id": "9999999-K", "instance_id": 100,
         "hours": "4", "recorded_at": "15/01/2024 10:00"}
    ]}"#;
    let outcome = admin.ingest_consumption(stray).await;
    assert_eq!(outcome.consumptions_processed, 1);

    let run = admin.generate_invoices("2024-01-01", "2024-01-31").await.unwrap();
    assert_eq!(run.invoices_generated, 0);
}

#[tokio::test]
async fn consumption_outside_the_requested_period_is_still_billed() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);
    admin.ingest_configuration(CONFIG_SNAPSHOT).await;
    admin.ingest_consumption(&consumption_snapshot("4")).await;

    // The run covers March but the record was taken in January.
    let run = admin.generate_invoices("2024-03-01", "2024-03-31").await.unwrap();
    assert_eq!(run.invoices_generated, 1);
    assert_eq!(run.details[0].total, dec("30.00"));
}

#[tokio::test]
async fn reset_clears_every_collection() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);
    admin.ingest_configuration(CONFIG_SNAPSHOT).await;
    admin.ingest_consumption(&consumption_snapshot("4")).await;
    admin.generate_invoices("2024-01-01", "2024-01-31").await.unwrap();

    admin.reset_system().await.unwrap();

    assert!(admin.query_resources().await.unwrap().is_empty());
    assert!(admin.query_categories().await.unwrap().is_empty());
    assert!(admin.query_clients().await.unwrap().is_empty());
    assert!(admin.query_consumptions().await.unwrap().is_empty());
    assert!(admin.query_invoices().await.unwrap().is_empty());
}

#[tokio::test]
async fn corrupt_collection_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);
    admin.ingest_configuration(CONFIG_SNAPSHOT).await;

    std::fs::write(dir.path().join("resources.json"), "not json at all").unwrap();

    assert!(admin.query_resources().await.unwrap().is_empty());
    // The other collections are unaffected.
    assert_eq!(admin.query_categories().await.unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_envelope_is_reported_without_side_effects() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);

    let outcome = admin.ingest_configuration("<resources/>").await;
    assert_eq!(outcome.errors.len(), 1);
    assert!(admin.query_resources().await.unwrap().is_empty());
}

#[tokio::test]
async fn invoice_report_renders_a_document_for_known_numbers_only() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);
    admin.ingest_configuration(CONFIG_SNAPSHOT).await;
    admin.ingest_consumption(&consumption_snapshot("4")).await;
    let run = admin.generate_invoices("2024-01-01", "2024-01-31").await.unwrap();
    let number = run.details[0].number.clone();

    assert!(admin.invoice_report("FAKE-1").await.unwrap().is_none());

    let document = admin.invoice_report(&number).await.unwrap().unwrap();
    let content = std::fs::read_to_string(&document.path).unwrap();
    assert!(content.contains(&number));
    assert!(content.contains("1234567-8"));
    assert!(content.contains("30.00"));
}

#[tokio::test]
async fn sales_analysis_documents_land_in_the_data_directory() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);
    admin.ingest_configuration(CONFIG_SNAPSHOT).await;
    admin.ingest_consumption(&consumption_snapshot("4")).await;
    admin.generate_invoices("2024-01-01", "2024-01-31").await.unwrap();

    let by_category = admin
        .sales_analysis(SalesAnalysisKind::Category, "2024-01-01", "2024-01-31")
        .await
        .unwrap();
    let content = std::fs::read_to_string(&by_category.path).unwrap();
    assert!(content.contains("General purpose"));
    assert!(content.contains("30.00"));

    let by_resource = admin
        .sales_analysis(SalesAnalysisKind::Resource, "2024-01-01", "2024-01-31")
        .await
        .unwrap();
    let content = std::fs::read_to_string(&by_resource.path).unwrap();
    assert!(content.contains("CPU"));
    assert!(content.contains("30.00"));
}

#[tokio::test]
async fn created_entities_take_the_next_free_id() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);

    let first = admin
        .create_resource(NewResource {
            name: "CPU".into(),
            abbreviation: "cpu".into(),
            metric: "core".into(),
            kind: "compute".into(),
            hourly_price: dec("2.50"),
        })
        .await
        .unwrap();
    let second = admin
        .create_resource(NewResource {
            name: "RAM".into(),
            abbreviation: "ram".into(),
            metric: "GiB".into(),
            kind: "memory".into(),
            hourly_price: dec("0.75"),
        })
        .await
        .unwrap();
    assert_eq!(first, 1);
    assert_eq!(second, 2);

    let category = admin
        .create_category(NewCategory {
            name: "General purpose".into(),
            description: "balanced".into(),
            workload: "web".into(),
        })
        .await
        .unwrap();
    assert_eq!(category, 1);

    let configuration = admin
        .create_configuration(
            category,
            NewConfiguration {
                name: "small".into(),
                description: "entry tier".into(),
                resources: [(first, dec("3"))].into_iter().collect(),
            },
        )
        .await
        .unwrap();
    assert_eq!(configuration, 1);
    let categories = admin.query_categories().await.unwrap();
    assert_eq!(categories[0].configurations.len(), 1);
}

#[tokio::test]
async fn resaving_an_entity_moves_it_to_the_end_of_the_collection() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);

    let first = admin
        .create_category(NewCategory {
            name: "General purpose".into(),
            description: "balanced".into(),
            workload: "web".into(),
        })
        .await
        .unwrap();
    let second = admin
        .create_category(NewCategory {
            name: "Compute optimized".into(),
            description: "cpu heavy".into(),
            workload: "batch".into(),
        })
        .await
        .unwrap();

    // Adding a configuration re-saves the owning category.
    admin
        .create_configuration(
            first,
            NewConfiguration {
                name: "small".into(),
                description: "entry tier".into(),
                resources: Default::default(),
            },
        )
        .await
        .unwrap();

    let categories = admin.query_categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].id, second);
    assert_eq!(categories[1].id, first);
    assert_eq!(categories[1].configurations.len(), 1);
}

#[tokio::test]
async fn configuration_creation_requires_an_existing_category() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);

    let err = admin
        .create_configuration(
            42,
            NewConfiguration {
                name: "small".into(),
                description: "entry tier".into(),
                resources: Default::default(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BillingException::UnknownCategory { id: 42 }));
}

#[tokio::test]
async fn client_creation_rejects_malformed_tax_ids() {
    let dir = TempDir::new().unwrap();
    let admin = admin(&dir);

    let err = admin
        .create_client(NewClient {
            tax_id: "12345678".into(),
            name: "Acme".into(),
            username: "acme".into(),
            password: "secret".into(),
            address: "Main St".into(),
            email: "ops@acme.io".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BillingException::InvalidTaxId { .. }));
    assert!(admin.query_clients().await.unwrap().is_empty());

    admin
        .create_client(NewClient {
            tax_id: "1234567-K".into(),
            name: "Acme".into(),
            username: "acme".into(),
            password: "secret".into(),
            address: "Main St".into(),
            email: "ops@acme.io".into(),
        })
        .await
        .unwrap();
    assert_eq!(admin.query_clients().await.unwrap().len(), 1);
}
