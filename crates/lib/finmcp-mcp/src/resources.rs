use finmcp_core::ticker::Ticker;
use rmcp::ErrorData;
use rmcp::model::{
    AnnotateAble,
    ErrorCode,
    RawResourceTemplate,
    ReadResourceResult,
    ResourceContents,
    ResourceTemplate,
};

use crate::{FinanceMcp, helpers};

pub const FINANCE_INFO_TEMPLATE: &str = "finance://info/{ticker}";
const FINANCE_INFO_PREFIX: &str = "finance://info/";

pub fn finance_info_template() -> ResourceTemplate {
    RawResourceTemplate {
        uri_template: FINANCE_INFO_TEMPLATE.to_string(),
        name: "stock_info".to_string(),
        title: Some("Company profile".to_string()),
        description: Some(
            "Company profile for a ticker symbol; same content as the get_stock_info tool."
                .to_string(),
        ),
        mime_type: Some("application/json".to_string()),
        icons: None,
    }
    .no_annotation()
}

/// Extracts the ticker substitution from a `finance://info/{ticker}` URI.
fn ticker_from_uri(uri: &str) -> Option<&str> {
    uri.strip_prefix(FINANCE_INFO_PREFIX)
        .filter(|rest| !rest.is_empty() && !rest.contains('/'))
}

/// Serves a resource read as a second access path to the profile data.
///
/// Outcomes mirror `get_stock_info`: a profile record on success, an error
/// envelope as JSON content on provider failure. Only unknown URI shapes are
/// protocol-level errors.
pub async fn read(server: &FinanceMcp, uri: &str) -> Result<ReadResourceResult, ErrorData> {
    let Some(raw) = ticker_from_uri(uri) else {
        return Err(helpers::mcp_err(
            ErrorCode::RESOURCE_NOT_FOUND,
            format!("unknown resource uri: {uri}"),
        ));
    };
    let ticker = Ticker::parse(raw)
        .map_err(|err| helpers::mcp_err(ErrorCode::INVALID_PARAMS, err.to_string()))?;

    let payload = match server.provider().fetch_profile(&ticker).await {
        Ok(profile) => serde_json::to_string(&profile),
        Err(err) => serde_json::to_string(&crate::ErrorEnvelope::from(&err)),
    }
    .map_err(|err| helpers::mcp_err(ErrorCode::INTERNAL_ERROR, err.to_string()))?;

    Ok(ReadResourceResult {
        contents: vec![ResourceContents::text(payload, uri)],
    })
}
