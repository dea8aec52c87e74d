//! Argument handling for the `lookup_cli` binary.

use crate::models::{LookupForm, LookupPayload, LookupResult};
use crate::simulator::LookupSimulator;
use crate::validation::validate_lookup_form;

pub const USAGE: &str = "usage: lookup_cli <DOCUMENT_TYPE> <DOCUMENT_NUMBER>";

/// Turns `<DOCUMENT_TYPE> <DOCUMENT_NUMBER>` into a validated payload.
///
/// Validation failures become one `field: message` line per failing field.
pub fn parse_lookup_args(args: &[String]) -> anyhow::Result<LookupPayload> {
    let [doc_type, doc_number] = args else {
        anyhow::bail!(USAGE);
    };

    validate_lookup_form(&LookupForm::new(doc_type.as_str(), doc_number.as_str())).map_err(
        |errors| {
            let lines: Vec<String> = errors
                .iter()
                .map(|(field, message)| format!("{}: {}", field, message))
                .collect();
            anyhow::anyhow!("invalid lookup arguments\n{}", lines.join("\n"))
        },
    )
}

/// Validates the arguments and runs one lookup.
pub async fn run_lookup(
    args: &[String],
    simulator: &LookupSimulator,
) -> anyhow::Result<LookupResult> {
    let payload = parse_lookup_args(args)?;
    Ok(simulator.lookup_detached(payload).await)
}
