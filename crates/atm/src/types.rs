//! Wire types for the ATM service's REST endpoints.

use codegen_core::types::TestType;
use serde::{Deserialize, Serialize};

/// Response body of `GET /test-details/{id}`.
///
/// Only `test_type` is consulted; the rest of the payload is ignored.
/// The field is optional because the remote omits it for some tests;
/// an absent type means the job is unsupported.
#[derive(Debug, Deserialize)]
pub struct TestDetails {
    #[serde(default)]
    pub test_type: Option<String>,
}

/// Code-generation parameters sent with `POST /test/{id}/code`.
#[derive(Debug, Clone, Serialize)]
pub struct CodegenParams {
    pub code_name: &'static str,
    pub language: &'static str,
    pub framework: &'static str,
    pub folder_name: &'static str,
    pub accessibility: &'static str,
}

impl CodegenParams {
    /// Parameter set for a given test type.
    ///
    /// Web tests generate Python-Selenium code, mobile tests
    /// Python-Appium. These values mirror what the ATM service expects.
    pub fn for_type(test_type: TestType) -> Self {
        match test_type {
            TestType::Web => Self {
                code_name: "Python-Selenium",
                language: "python",
                framework: "selenium",
                folder_name: "",
                accessibility: "false",
            },
            TestType::Mobile => Self {
                code_name: "Python-Appium",
                language: "python",
                framework: "appium",
                folder_name: "",
                accessibility: "false",
            },
        }
    }
}

/// One generation attempt in the paginated `GET /test/{id}/codes` list.
#[derive(Debug, Deserialize)]
pub struct CodeEntry {
    #[serde(default)]
    pub status: Option<String>,
}

/// Response body of `GET /test/{id}/codes`.
///
/// The list is requested sorted by commit time, so the first entry is
/// the most recent generation attempt.
#[derive(Debug, Deserialize)]
pub struct CodeListResponse {
    #[serde(default)]
    pub data: Vec<CodeEntry>,
}

impl CodeListResponse {
    /// Status of the most recent generation attempt, if any.
    pub fn latest_status(&self) -> Option<&str> {
        self.data.first().and_then(|entry| entry.status.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
