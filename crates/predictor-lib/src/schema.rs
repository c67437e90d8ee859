//! Feature schema registry
//!
//! Each task owns an ordered list of numeric input fields. The order is
//! the column order the task's classifier was trained on; nothing checks
//! it at runtime, so the lists below must only change together with the
//! model artifacts. The arity is part of each array's type.

use crate::models::{FieldSpec, MessagePair, Task};
use serde::Serialize;

/// Application title shown above the task menu
pub const APP_TITLE: &str = "Prediction of Disease Outbreaks";

pub const DIABETES_ARITY: usize = 8;
pub const HEART_DISEASE_ARITY: usize = 13;
pub const PARKINSONS_ARITY: usize = 22;

const fn field(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { name, label }
}

const DIABETES_FIELDS: [FieldSpec; DIABETES_ARITY] = [
    field("pregnancies", "No. of Pregnancies"),
    field("glucose", "Glucose Level"),
    field("blood_pressure", "Blood Pressure"),
    field("skin_thickness", "Skin Thickness"),
    field("insulin", "Insulin Level"),
    field("bmi", "BMI"),
    field("diabetes_pedigree_function", "Diabetes Pedigree Function"),
    field("age", "Age"),
];

const HEART_DISEASE_FIELDS: [FieldSpec; HEART_DISEASE_ARITY] = [
    field("age", "Age"),
    field("sex", "Sex"),
    field("chest_pain_type", "Chest Pain Types"),
    field("resting_blood_pressure", "Resting Blood Pressure"),
    field("serum_cholesterol", "Serum Cholesterol in mg/dl"),
    field("fasting_blood_sugar", "Fasting Blood Sugar > 120 mg/dl"),
    field("resting_ecg", "Resting Electrocardiographic results"),
    field("max_heart_rate", "Maximum Heart Rate Achieved"),
    field("exercise_induced_angina", "Exercise Induced Angina"),
    field("st_depression", "ST depression induced by exercise"),
    field("st_slope", "Slope of the peak exercise ST segment"),
    field("major_vessels", "Major vessels colored by fluoroscopy"),
    field(
        "thalassemia",
        "Thalassemia: 0 = normal, 1 = fixed defect, 2 = reversible defect",
    ),
];

const PARKINSONS_FIELDS: [FieldSpec; PARKINSONS_ARITY] = [
    field("fo_hz", "Fo(Hz)"),
    field("fhi_hz", "Fhi(Hz)"),
    field("flo_hz", "Flo(Hz)"),
    field("jitter_percent", "Jitter(%)"),
    field("jitter_abs", "Jitter(Abs)"),
    field("rap", "RAP"),
    field("ppq", "PPQ"),
    field("ddp", "DDP"),
    field("shimmer", "Shimmer"),
    field("shimmer_db", "Shimmer(dB)"),
    field("apq3", "APQ3"),
    field("apq5", "APQ5"),
    field("apq", "APQ"),
    field("dda", "DDA"),
    field("nhr", "NHR"),
    field("hnr", "HNR"),
    field("rpde", "RPDE"),
    field("dfa", "DFA"),
    field("spread1", "spread1"),
    field("spread2", "spread2"),
    field("d2", "D2"),
    field("ppe", "PPE"),
];

/// Ordered input fields of one task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSchema {
    task: Task,
    fields: &'static [FieldSpec],
}

impl FeatureSchema {
    pub fn task(&self) -> Task {
        self.task
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Resolve the ordered field list for a task
pub fn schema_for(task: Task) -> FeatureSchema {
    let fields: &'static [FieldSpec] = match task {
        Task::Diabetes => &DIABETES_FIELDS,
        Task::HeartDisease => &HEART_DISEASE_FIELDS,
        Task::Parkinsons => &PARKINSONS_FIELDS,
    };
    FeatureSchema { task, fields }
}

/// Verdict text for a task's two outcomes
pub fn messages_for(task: Task) -> MessagePair {
    match task {
        Task::Diabetes => MessagePair {
            positive: "The person is diabetic",
            negative: "The person is not diabetic",
        },
        Task::HeartDisease => MessagePair {
            positive: "The person has heart disease",
            negative: "The person does not have heart disease",
        },
        Task::Parkinsons => MessagePair {
            positive: "The person has Parkinson's disease",
            negative: "The person does not have Parkinson's disease",
        },
    }
}

/// Presentation metadata for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskInfo {
    pub task: Task,
    /// Entry in the task menu
    pub menu_label: &'static str,
    /// Heading of the task's form
    pub title: &'static str,
    /// Text of the submit action
    pub action: &'static str,
    /// Artifact path relative to the model directory, without extension
    pub artifact: &'static str,
}

pub fn task_info(task: Task) -> TaskInfo {
    match task {
        Task::Diabetes => TaskInfo {
            task,
            menu_label: "Diabetes Prediction",
            title: "Diabetes Prediction",
            action: "Predict Diabetes",
            artifact: "SVM/diabetes_svm",
        },
        Task::HeartDisease => TaskInfo {
            task,
            menu_label: "Heart Disease Prediction",
            title: "Heart Disease Prediction",
            action: "Predict Heart Disease",
            artifact: "SVM/heart_svm",
        },
        Task::Parkinsons => TaskInfo {
            task,
            menu_label: "Parkinson's Prediction",
            title: "Parkinson's Disease Prediction",
            action: "Predict Parkinson's Disease",
            artifact: "RF/parkinsons_rf",
        },
    }
}
