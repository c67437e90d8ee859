//! Text to number coercion for submitted form values

use crate::error::PredictError;
use crate::models::{FeatureVector, RawInput};
use crate::schema::FeatureSchema;

/// Convert raw form text into a feature vector in schema order.
///
/// Fails on the first value that is not a finite number; never returns a
/// partial vector. No range checks are applied.
pub fn coerce(raw: &RawInput, schema: &FeatureSchema) -> Result<FeatureVector, PredictError> {
    if raw.len() != schema.len() {
        return Err(PredictError::SchemaMismatch {
            task: schema.task(),
            expected: schema.len(),
            actual: raw.len(),
        });
    }

    let values = raw
        .values()
        .iter()
        .zip(schema.fields())
        .enumerate()
        .map(|(index, (text, field))| {
            parse_number(text).ok_or_else(|| PredictError::Validation {
                task: schema.task(),
                index,
                field: field.name,
                value: text.clone(),
            })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    Ok(FeatureVector::new(values))
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use crate::schema::schema_for;

    fn raw(values: &[&str]) -> RawInput {
        values.iter().copied().collect()
    }

    #[test]
    fn test_coerce_valid_diabetes_input() {
        let schema = schema_for(Task::Diabetes);
        let input = raw(&["2", "120", "70", "30", "80", "28.5", "0.5", "33"]);

        let vector = coerce(&input, &schema).unwrap();
        assert_eq!(
            vector.as_slice(),
            &[2.0, 120.0, 70.0, 30.0, 80.0, 28.5, 0.5, 33.0]
        );
    }

    #[test]
    fn test_coerce_accepts_negatives_exponents_and_whitespace() {
        let schema = schema_for(Task::Diabetes);
        let input = raw(&["-1.5", " 42 ", "+3", "1e2", "0", "-0.0", ".5", "7."]);

        let vector = coerce(&input, &schema).unwrap();
        assert_eq!(vector.as_slice(), &[-1.5, 42.0, 3.0, 100.0, 0.0, -0.0, 0.5, 7.0]);
    }

    #[test]
    fn test_formatted_floats_round_trip() {
        let schema = schema_for(Task::Parkinsons);
        let originals: Vec<f64> = (0..schema.len())
            .map(|i| (i as f64 - 7.0) * 1.337e-3 + (i as f64).powi(3) * 0.11)
            .collect();
        let input: RawInput = originals.iter().map(|v| v.to_string()).collect::<Vec<_>>().into();

        let vector = coerce(&input, &schema).unwrap();
        assert_eq!(vector.len(), originals.len());
        for (parsed, original) in vector.as_slice().iter().zip(&originals) {
            assert!((parsed - original).abs() <= f64::EPSILON * original.abs().max(1.0));
        }
    }

    #[test]
    fn test_non_numeric_field_reports_index() {
        let schema = schema_for(Task::Parkinsons);
        let mut values = vec!["0.1"; schema.len()];
        values[5] = "abc";

        let err = coerce(&raw(&values), &schema).unwrap_err();
        match err {
            PredictError::Validation {
                task,
                index,
                field,
                value,
            } => {
                assert_eq!(task, Task::Parkinsons);
                assert_eq!(index, 5);
                assert_eq!(field, "rap");
                assert_eq!(value, "abc");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_field_is_invalid() {
        let schema = schema_for(Task::Diabetes);
        let input = raw(&["2", "120", "", "30", "80", "28.5", "0.5", "33"]);

        let err = coerce(&input, &schema).unwrap_err();
        assert!(matches!(err, PredictError::Validation { index: 2, .. }));
    }

    #[test]
    fn test_first_invalid_field_wins() {
        let schema = schema_for(Task::Diabetes);
        let input = raw(&["2", "x", "70", "y", "80", "28.5", "0.5", "33"]);

        let err = coerce(&input, &schema).unwrap_err();
        assert!(matches!(err, PredictError::Validation { index: 1, .. }));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let schema = schema_for(Task::Diabetes);
        for bad in ["nan", "inf", "-infinity", "1e400"] {
            let mut values = vec!["1"; schema.len()];
            values[0] = bad;
            let err = coerce(&raw(&values), &schema).unwrap_err();
            assert!(matches!(err, PredictError::Validation { index: 0, .. }), "{}", bad);
        }
    }

    #[test]
    fn test_length_mismatch() {
        let schema = schema_for(Task::HeartDisease);
        let input = raw(&["1", "2", "3"]);

        let err = coerce(&input, &schema).unwrap_err();
        assert_eq!(
            err,
            PredictError::SchemaMismatch {
                task: Task::HeartDisease,
                expected: 13,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_length_checked_before_values() {
        let schema = schema_for(Task::Diabetes);
        let input = raw(&["abc"]);

        let err = coerce(&input, &schema).unwrap_err();
        assert!(matches!(err, PredictError::SchemaMismatch { .. }));
    }
}
