pub mod auth;
pub mod difficulties;
pub mod health;
pub mod images;
pub mod regions;
pub mod walks;

use clap::Args;

use super::client::{ApiClient, ListOptions};
use super::config;
use crate::auth::WRITER;

/// List flags shared by every `list` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(long, help = "Field to sort on (e.g. Name, Code, LengthInKm)")]
    pub sort_by: Option<String>,
    #[arg(long, help = "Sort descending")]
    pub desc: bool,
    #[arg(long, requires = "filter_query", help = "Field to filter on (e.g. Name)")]
    pub filter_on: Option<String>,
    #[arg(long, requires = "filter_on", help = "Substring the filter field must contain")]
    pub filter_query: Option<String>,
    #[arg(long, help = "Page number, starting at 1")]
    pub page: Option<u64>,
    #[arg(long, help = "Records per page")]
    pub page_size: Option<u64>,
}

impl From<ListArgs> for ListOptions {
    fn from(args: ListArgs) -> Self {
        Self {
            sort_by: args.sort_by,
            ascending: args.desc.then_some(false),
            filter_on: args.filter_on,
            filter_query: args.filter_query,
            page_number: args.page,
            page_size: args.page_size,
        }
    }
}

/// Fail early when the stored session cannot perform writes.
pub(crate) fn require_writer(client: &ApiClient) -> anyhow::Result<()> {
    match client.session() {
        Some(session) if !session.has_role(WRITER) => {
            anyhow::bail!("{} does not hold the {} role", session.username, WRITER)
        }
        _ => Ok(()),
    }
}

/// Client for the resolved server, carrying the saved session when there is one.
pub(crate) fn connect(server: Option<&str>) -> anyhow::Result<ApiClient> {
    let session = config::load_session()?;
    let base_url = config::resolve_server(server, session.as_ref());
    Ok(ApiClient::new(base_url, session))
}
