//! Prediction command
//!
//! Submits one form for a task. Values come from the command line or,
//! when omitted, are prompted for field by field using the server's labels.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

use crate::client::{ApiClient, FieldInfo};
use crate::output::{color_label, print_json, print_success, OutputFormat};

/// Run a prediction and print the verdict
pub async fn run_prediction(
    client: &ApiClient,
    task: &str,
    values: Vec<String>,
    format: OutputFormat,
) -> Result<()> {
    let values = if values.is_empty() {
        let schema = client.schema(task).await?;
        println!("{}", schema.title);
        println!("Please enter the following details:");
        let stdin = io::stdin();
        prompt_values(&schema.fields, &mut stdin.lock(), &mut io::stdout())?
    } else {
        values
    };

    let prediction = client.predict(task, values).await?;

    match format {
        OutputFormat::Json => print_json(&prediction)?,
        OutputFormat::Table => {
            print_success(&format!(
                "{} ({})",
                prediction.message,
                color_label(&prediction.label)
            ));
        }
    }

    Ok(())
}

/// Read one line per field, in schema order
fn prompt_values<R: BufRead, W: Write>(
    fields: &[FieldInfo],
    input: &mut R,
    output: &mut W,
) -> Result<Vec<String>> {
    let mut values = Vec::with_capacity(fields.len());
    for field in fields {
        write!(output, "{}: ", field.label)?;
        output.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("Failed to read input")?;
        if read == 0 {
            anyhow::bail!("Input ended before '{}' was entered", field.label);
        }
        values.push(line.trim_end_matches(['\r', '\n']).to_string());
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(labels: &[&str]) -> Vec<FieldInfo> {
        labels
            .iter()
            .enumerate()
            .map(|(index, label)| FieldInfo {
                index,
                name: label.to_lowercase(),
                label: label.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_prompt_reads_one_line_per_field() {
        let mut input = io::Cursor::new("2\n120\r\n 70 \n");
        let mut output = Vec::new();

        let values = prompt_values(
            &fields(&["No. of Pregnancies", "Glucose Level", "Blood Pressure"]),
            &mut input,
            &mut output,
        )
        .unwrap();

        assert_eq!(values, vec!["2", "120", " 70 "]);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Glucose Level: "));
    }

    #[test]
    fn test_prompt_fails_on_early_eof() {
        let mut input = io::Cursor::new("2\n");
        let mut output = Vec::new();

        let err = prompt_values(&fields(&["Age", "Sex"]), &mut input, &mut output).unwrap_err();
        assert!(err.to_string().contains("Sex"));
    }
}
