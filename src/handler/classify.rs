//! Classification endpoint
//!
//! Reads the `number` query parameter, classifies it and picks the status.

use crate::facts::FactFetcher;
use crate::numbers::{Classification, ClassifyResponse, RejectedNumber};
use tokio::task::JoinError;

const NUMBER_PARAM: &str = "number";

/// Value of the `number` parameter, trimmed; empty when absent.
/// The last occurrence wins when the parameter is repeated.
pub fn number_param(query: Option<&str>) -> String {
    query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .filter(|(key, _)| key == NUMBER_PARAM)
                .map(|(_, value)| value.into_owned())
                .last()
                .unwrap_or_default()
        })
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Classify the `number` parameter.
///
/// Trial division is `O(sqrt |n|)`, so the predicates run on the blocking
/// pool while the fun fact is fetched. Fails only if that task panics.
pub async fn classify_number(
    query: Option<&str>,
    facts: &FactFetcher,
) -> Result<ClassifyResponse, JoinError> {
    let Ok(number) = number_param(query).parse::<i64>() else {
        return Ok(ClassifyResponse::Rejected(RejectedNumber::default()));
    };

    let arithmetic = tokio::task::spawn_blocking(move || Classification::compute(number));
    let (fun_fact, classification) = tokio::join!(facts.fun_fact(number), arithmetic);

    Ok(ClassifyResponse::Classified(
        classification?.with_fun_fact(fun_fact),
    ))
}
