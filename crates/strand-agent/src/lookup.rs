//! Offline stand-in for a web search tool.

use crate::tool::{Tool, ToolFuture};

const CAPITALS: &[(&str, &str)] = &[
    ("Brazil", "Brasília"),
    ("France", "Paris"),
    ("Germany", "Berlin"),
    ("Italy", "Rome"),
    ("Spain", "Madrid"),
    ("United States", "Washington, D.C."),
];

/// Answers capital-of-country queries from a fixed table.
pub struct CapitalLookup;

impl Tool for CapitalLookup {
    fn name(&self) -> &'static str {
        "capital_lookup"
    }

    fn description(&self) -> &'static str {
        "Return the capital of a given country if it exists in the offline dataset."
    }

    fn call<'a>(&'a self, input: &'a str) -> ToolFuture<'a> {
        Box::pin(async move {
            let query = input.to_lowercase();
            for (country, capital) in CAPITALS {
                if query.contains(&country.to_lowercase()) {
                    return Ok(format!("The capital of {country} is {capital}."));
                }
            }
            Ok("I don't know the capital of that country.".to_owned())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_country_is_answered() {
        let output = CapitalLookup.call("What is the capital of France?").await.unwrap();
        assert_eq!(output, "The capital of France is Paris.");
    }

    #[tokio::test]
    async fn match_is_case_insensitive() {
        let output = CapitalLookup.call("capital of BRAZIL").await.unwrap();
        assert!(output.contains("Brasília"));
    }

    #[tokio::test]
    async fn unknown_country_is_admitted() {
        let output = CapitalLookup.call("What is the capital of Iran?").await.unwrap();
        assert_eq!(output, "I don't know the capital of that country.");
    }

    #[test]
    fn not_return_direct() {
        assert!(!CapitalLookup.return_direct());
    }
}
