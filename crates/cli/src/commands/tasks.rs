//! Task listing and schema commands

use anyhow::Result;
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{print_info, print_json, print_table, OutputFormat};

/// Row for tasks table
#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "Task")]
    task: String,
    #[tabled(rename = "Menu")]
    menu_label: String,
    #[tabled(rename = "Fields")]
    arity: usize,
}

/// Row for schema table
#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Label")]
    label: String,
}

/// List the available prediction tasks
pub async fn list_tasks(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let list = client.tasks().await?;

    match format {
        OutputFormat::Json => print_json(&list)?,
        OutputFormat::Table => {
            print_info(&list.title);
            let rows = list
                .tasks
                .into_iter()
                .map(|t| TaskRow {
                    task: t.task,
                    menu_label: t.menu_label,
                    arity: t.arity,
                })
                .collect();
            print_table::<TaskRow>(rows);
        }
    }

    Ok(())
}

/// Show the ordered input fields of a task
pub async fn show_schema(client: &ApiClient, task: &str, format: OutputFormat) -> Result<()> {
    let schema = client.schema(task).await?;

    match format {
        OutputFormat::Json => print_json(&schema)?,
        OutputFormat::Table => {
            print_info(&schema.title);
            let rows = schema
                .fields
                .into_iter()
                .map(|f| FieldRow {
                    index: f.index,
                    name: f.name,
                    label: f.label,
                })
                .collect();
            print_table::<FieldRow>(rows);
        }
    }

    Ok(())
}
