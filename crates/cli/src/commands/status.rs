//! Server health and readiness

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use crate::client::{ApiClient, HealthStatus, Readiness};
use crate::output::{
    color_status, print_json, print_success, print_table, print_warning, OutputFormat,
};

#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Component")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
}

#[derive(Serialize)]
struct StatusReport {
    health: HealthStatus,
    readiness: Readiness,
}

/// Show whether the server is ready to serve predictions
pub async fn show_status(client: &ApiClient, format: OutputFormat) -> Result<()> {
    // Both probes answer 503 when unhealthy, so read them without the
    // success check the prediction calls rely on.
    let health: HealthStatus = client.probe("healthz").await?;
    let readiness: Readiness = client.probe("readyz").await?;

    match format {
        OutputFormat::Json => print_json(&StatusReport { health, readiness })?,
        OutputFormat::Table => {
            let rows = health
                .components
                .iter()
                .map(|(name, component)| ComponentRow {
                    name: name.clone(),
                    status: color_status(&component.status),
                    message: component.message.clone().unwrap_or_default(),
                })
                .collect();
            print_table::<ComponentRow>(rows);

            if readiness.ready {
                print_success("Server is ready to serve predictions");
            } else {
                print_warning(&format!(
                    "Server is not ready: {}",
                    readiness.reason.as_deref().unwrap_or("unknown reason")
                ));
            }
        }
    }

    Ok(())
}
