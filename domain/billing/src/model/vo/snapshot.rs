//! Tolerant decoding of submitted snapshots.
//!
//! Snapshots arrive as loosely structured JSON envelopes: any subset of
//! the entity kinds may be present and individual elements may be
//! incomplete. Decoding never fails once the envelope itself parses;
//! elements missing a required field are dropped and recorded as
//! warnings instead.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::exception::{BillingException, BillingResult};
use crate::model::entity::{Category, Client, Configuration, Consumption, Instance, Resource};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigSnapshot {
    pub resources: Vec<RawResource>,
    pub categories: Vec<RawCategory>,
    pub clients: Vec<RawClient>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawResource {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub metric: Option<String>,
    pub kind: Option<String>,
    pub hourly_price: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawCategory {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub workload: Option<String>,
    pub configurations: Vec<RawConfiguration>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawConfiguration {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Resource id (as a JSON object key) to hourly quantity.
    pub resources: BTreeMap<String, Decimal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawClient {
    pub tax_id: Option<String>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub instances: Vec<RawInstance>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawInstance {
    pub id: Option<i64>,
    pub configuration_id: Option<i64>,
    pub name: Option<String>,
    pub started_at: Option<String>,
    pub status: Option<String>,
    pub ended_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConsumptionSnapshot {
    pub consumptions: Vec<RawConsumption>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawConsumption {
    pub client_tax_id: Option<String>,
    pub instance_id: Option<i64>,
    pub hours: Option<Decimal>,
    pub recorded_at: Option<String>,
}

/// Typed intermediate representation of a configuration snapshot, plus
/// the warnings accumulated while decoding it.
#[derive(Debug, Default)]
pub struct DecodedConfig {
    pub resources: Vec<Resource>,
    pub categories: Vec<Category>,
    pub clients: Vec<Client>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Default)]
pub struct DecodedConsumption {
    pub consumptions: Vec<Consumption>,
    pub warnings: Vec<String>,
}

fn label(id: Option<i64>) -> String {
    id.map(|i| i.to_string()).unwrap_or_else(|| "?".to_owned())
}

impl ConfigSnapshot {
    pub fn parse(payload: &str) -> BillingResult<Self> {
        serde_json::from_str(payload).map_err(|e| BillingException::MalformedSnapshot {
            reason: e.to_string(),
        })
    }

    pub fn decode(self) -> DecodedConfig {
        let mut out = DecodedConfig::default();
        for raw in self.resources {
            match decode_resource(raw) {
                Ok(resource) => out.resources.push(resource),
                Err(warning) => out.warnings.push(warning),
            }
        }
        for raw in self.categories {
            match decode_category(raw, &mut out.warnings) {
                Ok(category) => out.categories.push(category),
                Err(warning) => out.warnings.push(warning),
            }
        }
        for raw in self.clients {
            match decode_client(raw, &mut out.warnings) {
                Ok(client) => out.clients.push(client),
                Err(warning) => out.warnings.push(warning),
            }
        }
        out
    }
}

impl ConsumptionSnapshot {
    pub fn parse(payload: &str) -> BillingResult<Self> {
        serde_json::from_str(payload).map_err(|e| BillingException::MalformedSnapshot {
            reason: e.to_string(),
        })
    }

    pub fn decode(self) -> DecodedConsumption {
        let mut out = DecodedConsumption::default();
        for raw in self.consumptions {
            let (Some(client_tax_id), Some(instance_id), Some(hours), Some(recorded_at)) =
                (raw.client_tax_id, raw.instance_id, raw.hours, raw.recorded_at)
            else {
                out.warnings.push("consumption dropped: missing required fields".to_owned());
                continue;
            };
            if hours < Decimal::ZERO {
                out.warnings.push(format!(
                    "consumption for instance {instance_id} dropped: negative hours {hours}"
                ));
                continue;
            }
            out.consumptions.push(Consumption {
                client_tax_id,
                instance_id,
                hours,
                recorded_at,
            });
        }
        out
    }
}

fn decode_resource(raw: RawResource) -> Result<Resource, String> {
    let id_label = label(raw.id);
    let (Some(id), Some(name), Some(abbreviation), Some(metric), Some(kind), Some(hourly_price)) =
        (raw.id, raw.name, raw.abbreviation, raw.metric, raw.kind, raw.hourly_price)
    else {
        return Err(format!("resource {id_label} dropped: missing required fields"));
    };
    if hourly_price < Decimal::ZERO {
        return Err(format!(
            "resource {id} dropped: negative hourly price {hourly_price}"
        ));
    }
    Ok(Resource {
        id,
        name,
        abbreviation,
        metric,
        kind,
        hourly_price,
    })
}

fn decode_category(raw: RawCategory, warnings: &mut Vec<String>) -> Result<Category, String> {
    let id_label = label(raw.id);
    let mut configurations = Vec::new();
    for config in raw.configurations {
        match decode_configuration(config, warnings) {
            Ok(configuration) => configurations.push(configuration),
            Err(warning) => warnings.push(warning),
        }
    }
    let (Some(id), Some(name), Some(description), Some(workload)) =
        (raw.id, raw.name, raw.description, raw.workload)
    else {
        return Err(format!("category {id_label} dropped: missing required fields"));
    };
    Ok(Category {
        id,
        name,
        description,
        workload,
        configurations,
    })
}

fn decode_configuration(
    raw: RawConfiguration,
    warnings: &mut Vec<String>,
) -> Result<Configuration, String> {
    let id_label = label(raw.id);
    let mut resources = BTreeMap::new();
    for (key, quantity) in raw.resources {
        let Ok(resource_id) = key.parse::<i64>() else {
            warnings.push(format!(
                "configuration {id_label}: resource key {key:?} is not an id"
            ));
            continue;
        };
        if quantity < Decimal::ZERO {
            warnings.push(format!(
                "configuration {id_label}: negative quantity {quantity} for resource {resource_id}"
            ));
            continue;
        }
        resources.insert(resource_id, quantity);
    }
    let (Some(id), Some(name), Some(description)) = (raw.id, raw.name, raw.description) else {
        return Err(format!(
            "configuration {id_label} dropped: missing required fields"
        ));
    };
    Ok(Configuration {
        id,
        name,
        description,
        resources,
    })
}

fn decode_client(raw: RawClient, warnings: &mut Vec<String>) -> Result<Client, String> {
    let id_label = raw.tax_id.clone().unwrap_or_else(|| "?".to_owned());
    let mut instances = Vec::new();
    for instance in raw.instances {
        match decode_instance(instance) {
            Ok(decoded) => instances.push(decoded),
            Err(warning) => warnings.push(warning),
        }
    }
    let (Some(tax_id), Some(name), Some(username), Some(password), Some(address), Some(email)) =
        (raw.tax_id, raw.name, raw.username, raw.password, raw.address, raw.email)
    else {
        return Err(format!("client {id_label} dropped: missing required fields"));
    };
    Ok(Client {
        tax_id,
        name,
        username,
        password,
        address,
        email,
        instances,
    })
}

fn decode_instance(raw: RawInstance) -> Result<Instance, String> {
    let id_label = label(raw.id);
    let (Some(id), Some(configuration_id), Some(name), Some(started_at), Some(status)) =
        (raw.id, raw.configuration_id, raw.name, raw.started_at, raw.status)
    else {
        return Err(format!("instance {id_label} dropped: missing required fields"));
    };
    Ok(Instance {
        id,
        configuration_id,
        name,
        started_at,
        status,
        ended_at: raw.ended_at,
    })
}
